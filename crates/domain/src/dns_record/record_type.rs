use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record types the gateway asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    TXT,
    CNAME,
    MX,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::TXT => "TXT",
            RecordType::CNAME => "CNAME",
            RecordType::MX => "MX",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TXT" => Ok(RecordType::TXT),
            "CNAME" => Ok(RecordType::CNAME),
            "MX" => Ok(RecordType::MX),
            _ => Err(format!("Unsupported record type: {s}")),
        }
    }
}
