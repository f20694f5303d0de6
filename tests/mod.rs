mod support;

mod tracker_scenarios;
