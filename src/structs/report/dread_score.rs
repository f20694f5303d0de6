use serde::{Deserialize, Serialize};

/// DREAD breakdown for a threat, each factor on a 0-10 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DreadScore {
    pub damage: f64,
    pub reproducibility: f64,
    pub exploitability: f64,
    pub affected_users: f64,
    pub discoverability: f64,
}

impl DreadScore {
    pub fn average(&self) -> f64 {
        (self.damage + self.reproducibility + self.exploitability + self.affected_users + self.discoverability) / 5.0
    }
}
