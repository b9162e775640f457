use serde::{Deserialize, Serialize};

/// How generated hosts are written.
///
/// Most DNS hosting panels append the zone name themselves (`relative`);
/// raw zone files and some APIs want the full name (`fully_qualified`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HostConvention {
    #[default]
    Relative,
    FullyQualified,
}

impl HostConvention {
    /// Host for `label` under `domain`; `None` is the zone apex.
    pub fn host(&self, label: Option<&str>, domain: &str) -> String {
        match (self, label) {
            (HostConvention::Relative, None) => "@".to_string(),
            (HostConvention::Relative, Some(l)) => l.to_string(),
            (HostConvention::FullyQualified, None) => domain.to_string(),
            (HostConvention::FullyQualified, Some(l)) => format!("{l}.{domain}"),
        }
    }
}

/// Whether the generate step is offered once SPF already authorizes the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratePolicy {
    #[default]
    Always,
    SuppressWhenAuthorized,
}

/// The sending service whose authorization is being checked
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailServiceConfig {
    /// SPF term that authorizes the service (default: "include:spfa.mailendo.com")
    #[serde(default = "default_authorization_token")]
    pub authorization_token: String,

    /// DKIM selector the service signs with (default: "ms")
    #[serde(default = "default_dkim_selector")]
    pub dkim_selector: String,

    #[serde(default)]
    pub host_convention: HostConvention,

    #[serde(default)]
    pub generate_policy: GeneratePolicy,

    /// Ask for aggregate reports at dmarc-reports@<domain> in a generated DMARC record
    #[serde(default)]
    pub dmarc_aggregate_reports: bool,
}

impl Default for MailServiceConfig {
    fn default() -> Self {
        Self {
            authorization_token: default_authorization_token(),
            dkim_selector: default_dkim_selector(),
            host_convention: HostConvention::default(),
            generate_policy: GeneratePolicy::default(),
            dmarc_aggregate_reports: false,
        }
    }
}

fn default_authorization_token() -> String {
    "include:spfa.mailendo.com".to_string()
}

fn default_dkim_selector() -> String {
    "ms".to_string()
}
