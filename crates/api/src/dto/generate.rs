use mailauth_domain::{DkimForm, DkimValue, GeneratedRecord, GeneratedRecordSet};
use serde::{Deserialize, Serialize};

/// Request DTO for `/generate`: the values a previous `/check` produced,
/// plus the DKIM value the user supplied.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub domain: String,
    #[serde(default)]
    pub spf_record: Option<String>,
    #[serde(default)]
    pub dmarc_present: bool,
    #[serde(default)]
    pub dkim_value: String,
    #[serde(default)]
    pub dkim_form: DkimForm,
}

impl GenerateRequest {
    pub fn dkim(&self) -> DkimValue {
        DkimValue {
            form: self.dkim_form,
            value: self.dkim_value.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub records: Vec<GeneratedRecord>,
}

impl From<GeneratedRecordSet> for GenerateResponse {
    fn from(set: GeneratedRecordSet) -> Self {
        Self {
            records: set.records().cloned().collect(),
        }
    }
}
