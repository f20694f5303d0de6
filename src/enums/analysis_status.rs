use std::fmt;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an analysis job as reported by the server.
///
/// The backend historically spells these `EM_ABERTO`, `PROCESSANDO`,
/// `ANALISADO` and `FALHOU`; both spellings are accepted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisStatus {
    #[serde(rename = "CREATED", alias = "EM_ABERTO")]
    Created,
    #[serde(rename = "PROCESSING", alias = "PROCESSANDO")]
    Processing,
    #[serde(rename = "ANALYZED", alias = "ANALISADO")]
    Analyzed,
    #[serde(rename = "FAILED", alias = "FALHOU")]
    Failed,
}

impl AnalysisStatus {
    pub const ALL: [AnalysisStatus; 4] = [
        AnalysisStatus::Created,
        AnalysisStatus::Processing,
        AnalysisStatus::Analyzed,
        AnalysisStatus::Failed,
    ];

    /// Progress rank. Both terminal statuses share the top rank.
    pub const fn rank(self) -> u8 {
        match self {
            AnalysisStatus::Created => 0,
            AnalysisStatus::Processing => 1,
            AnalysisStatus::Analyzed | AnalysisStatus::Failed => 2,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, AnalysisStatus::Analyzed | AnalysisStatus::Failed)
    }

    pub const fn is_pending(self) -> bool {
        !self.is_terminal()
    }

    /// Statuses only move forward: `CREATED -> PROCESSING -> {ANALYZED | FAILED}`.
    /// Staying put is allowed, leaving a terminal status is not.
    pub fn can_transition_to(self, next: AnalysisStatus) -> bool {
        if self == next {
            return true;
        }
        !self.is_terminal() && next.rank() > self.rank()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            AnalysisStatus::Created => "CREATED",
            AnalysisStatus::Processing => "PROCESSING",
            AnalysisStatus::Analyzed => "ANALYZED",
            AnalysisStatus::Failed => "FAILED",
        }
    }

    pub const fn emoji(self) -> &'static str {
        match self {
            AnalysisStatus::Created => "🕓",
            AnalysisStatus::Processing => "⚙️",
            AnalysisStatus::Analyzed => "✅",
            AnalysisStatus::Failed => "❌",
        }
    }

    pub fn parse(value: &str) -> Option<AnalysisStatus> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CREATED" | "EM_ABERTO" => Some(AnalysisStatus::Created),
            "PROCESSING" | "PROCESSANDO" => Some(AnalysisStatus::Processing),
            "ANALYZED" | "ANALISADO" => Some(AnalysisStatus::Analyzed),
            "FAILED" | "FALHOU" => Some(AnalysisStatus::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn status_strategy() -> impl Strategy<Value = AnalysisStatus> {
        prop::sample::select(AnalysisStatus::ALL.to_vec())
    }

    #[test]
    fn test_accepts_both_wire_spellings() {
        let english: AnalysisStatus = serde_json::from_str("\"PROCESSING\"").unwrap();
        let native: AnalysisStatus = serde_json::from_str("\"PROCESSANDO\"").unwrap();
        assert_eq!(english, AnalysisStatus::Processing);
        assert_eq!(native, AnalysisStatus::Processing);
        assert_eq!(serde_json::to_string(&AnalysisStatus::Failed).unwrap(), "\"FAILED\"");
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!(serde_json::from_str::<AnalysisStatus>("\"QUEUED\"").is_err());
        assert_eq!(AnalysisStatus::parse("queued"), None);
        assert_eq!(AnalysisStatus::parse("analisado"), Some(AnalysisStatus::Analyzed));
    }

    #[test]
    fn test_terminal_statuses_are_final() {
        for next in AnalysisStatus::ALL {
            assert_eq!(AnalysisStatus::Analyzed.can_transition_to(next), next == AnalysisStatus::Analyzed);
            assert_eq!(AnalysisStatus::Failed.can_transition_to(next), next == AnalysisStatus::Failed);
        }
        assert!(AnalysisStatus::Created.can_transition_to(AnalysisStatus::Failed));
        assert!(!AnalysisStatus::Processing.can_transition_to(AnalysisStatus::Created));
    }

    proptest! {
        #[test]
        fn prop_accepted_sequences_never_regress(seq in prop::collection::vec(status_strategy(), 1..20)) {
            let mut current = AnalysisStatus::Created;
            for next in seq {
                if current.can_transition_to(next) {
                    prop_assert!(next.rank() >= current.rank());
                    current = next;
                }
            }
            prop_assert!(current.rank() >= AnalysisStatus::Created.rank());
        }

        #[test]
        fn prop_transition_is_reflexive_only_for_same_status(a in status_strategy(), b in status_strategy()) {
            if a.can_transition_to(b) && b.can_transition_to(a) {
                prop_assert_eq!(a, b);
            }
        }
    }
}
