use std::path::PathBuf;
use chrono::NaiveDate;
use clap::Subcommand;
use crate::enums::analysis_status::AnalysisStatus;

#[derive(Subcommand)]
pub enum Commands {
    /// Write a sample configuration to ~/.threatmodel/config.toml
    Init,
    /// Check the configuration file
    Validate,
    /// Ask the backend whether it is up
    Health,
    /// Upload a diagram and wait for the full report in one request
    Analyze {
        file: PathBuf,
        #[clap(short, long)]
        confidence: Option<f64>,
        #[clap(short, long)]
        iou: Option<f64>,
    },
    /// Create an analysis job and follow it until it finishes
    Submit {
        file: PathBuf,
        #[clap(long)]
        no_wait: bool,
    },
    /// Show one analysis
    Status {
        id: String,
        #[clap(short, long)]
        wait: bool,
    },
    /// List analyses
    List {
        #[clap(short, long)]
        code: Option<String>,
        #[clap(short, long, value_parser = parse_status)]
        status: Option<AnalysisStatus>,
        #[clap(long)]
        from: Option<NaiveDate>,
        #[clap(long)]
        to: Option<NaiveDate>,
        #[clap(short, long)]
        page: Option<u32>,
        #[clap(long)]
        size: Option<u32>,
    },
    /// Show unread notifications
    Notifications {
        #[clap(short, long)]
        watch: bool,
        #[clap(short, long)]
        limit: Option<u32>,
    },
    /// Mark a notification as read
    Read {
        id: String,
    },
    /// Open an analysis in the web UI
    Open {
        analysis_id: String,
    },
}

fn parse_status(value: &str) -> Result<AnalysisStatus, String> {
    AnalysisStatus::parse(value).ok_or_else(|| {
        format!("unknown status '{}', expected CREATED, PROCESSING, ANALYZED or FAILED", value)
    })
}
