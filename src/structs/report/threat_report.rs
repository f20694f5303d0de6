use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::enums::risk_level::RiskLevel;
use crate::errors::{ClientError, ClientResult};
use crate::structs::report::component::Component;
use crate::structs::report::connection::Connection;
use crate::structs::report::threat::Threat;

/// Result of a finished analysis: detected architecture, STRIDE threats and
/// the aggregate DREAD risk. Display-only, never mutated after receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatReport {
    pub model_used: String,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub threats: Vec<Threat>,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub processing_time: Option<f64>,
    pub threat_count: usize,
    pub component_count: usize,
}

impl ThreatReport {
    pub fn validate(&self) -> ClientResult<()> {
        if self.threat_count != self.threats.len() {
            return Err(ClientError::parse_error(
                "threat report",
                &format!("threat_count is {} but {} threats were sent", self.threat_count, self.threats.len()),
            ));
        }
        if self.component_count != self.components.len() {
            return Err(ClientError::parse_error(
                "threat report",
                &format!("component_count is {} but {} components were sent", self.component_count, self.components.len()),
            ));
        }
        Ok(())
    }

    pub fn component_name(&self, component_id: &str) -> Option<&str> {
        self.components
            .iter()
            .find(|c| c.id == component_id)
            .map(|c| c.name.as_str())
    }

    /// Threat count per STRIDE label, ordered by label.
    pub fn threats_by_category(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for threat in &self.threats {
            *counts.entry(threat.threat_type.label().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Threats sorted by score, highest first; unscored threats go last.
    pub fn ranked_threats(&self) -> Vec<&Threat> {
        let mut ranked: Vec<&Threat> = self.threats.iter().collect();
        ranked.sort_by(|a, b| {
            let a = a.effective_score().unwrap_or(f64::MIN);
            let b = b.effective_score().unwrap_or(f64::MIN);
            b.total_cmp(&a)
        });
        ranked
    }
}
