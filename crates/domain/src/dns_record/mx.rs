use serde::{Serialize, Serializer};
use std::fmt;

/// One mail-exchange entry, in answer order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxRecord {
    pub preference: u16,
    /// Exchange host without the trailing root dot. A null MX (RFC 7505)
    /// keeps its root target as `"."`.
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        let exchange = exchange.into();
        let exchange = match exchange.trim_end_matches('.') {
            "" if !exchange.is_empty() => ".".to_string(),
            host => host.to_string(),
        };
        Self {
            preference,
            exchange,
        }
    }
}

impl MxRecord {
    /// `0 .`: the domain publishes that it accepts no mail.
    pub fn is_null(&self) -> bool {
        self.exchange == "."
    }
}

impl fmt::Display for MxRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.preference, self.exchange)
    }
}

// Serialized as "<preference> <exchange>" so the wire shape stays string[].
impl Serialize for MxRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
