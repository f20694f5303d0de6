use std::collections::HashMap;
use std::fmt;
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StrideCategory {
    Spoofing,
    Tampering,
    Repudiation,
    InformationDisclosure,
    DenialOfService,
    ElevationOfPrivilege,
    /// The model is free to emit labels outside STRIDE; keep them verbatim.
    Other(String),
}

static STRIDE_DESCRIPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Spoofing", "Pretending to be someone or something else"),
        ("Tampering", "Modifying data or code without authorization"),
        ("Repudiation", "Denying having performed an action"),
        ("Information Disclosure", "Exposing information to unauthorized parties"),
        ("Denial of Service", "Making a system unavailable"),
        ("Elevation of Privilege", "Gaining unauthorized access or capabilities"),
    ])
});

impl StrideCategory {
    pub const KNOWN: [&'static str; 6] = [
        "Spoofing",
        "Tampering",
        "Repudiation",
        "Information Disclosure",
        "Denial of Service",
        "Elevation of Privilege",
    ];

    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Spoofing" => StrideCategory::Spoofing,
            "Tampering" => StrideCategory::Tampering,
            "Repudiation" => StrideCategory::Repudiation,
            "Information Disclosure" => StrideCategory::InformationDisclosure,
            "Denial of Service" => StrideCategory::DenialOfService,
            "Elevation of Privilege" => StrideCategory::ElevationOfPrivilege,
            other => StrideCategory::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            StrideCategory::Spoofing => "Spoofing",
            StrideCategory::Tampering => "Tampering",
            StrideCategory::Repudiation => "Repudiation",
            StrideCategory::InformationDisclosure => "Information Disclosure",
            StrideCategory::DenialOfService => "Denial of Service",
            StrideCategory::ElevationOfPrivilege => "Elevation of Privilege",
            StrideCategory::Other(label) => label,
        }
    }

    pub fn description(&self) -> Option<&'static str> {
        STRIDE_DESCRIPTIONS.get(self.label()).copied()
    }
}

impl fmt::Display for StrideCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for StrideCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for StrideCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(StrideCategory::from_label(&label))
    }
}
