//! Mailauth Domain Layer
pub mod auth;
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod record_bundle;
pub mod session;
pub mod validators;

pub use auth::{
    AuthenticationStatus, DkimForm, DkimValue, DmarcTag, DmarcTagToken, DomainReport,
    GeneratedRecord, GeneratedRecordSet, RecordAction, RecordGenerator, RecordKind,
    RecordTokenizer, SimpleTokenizer, SpfAnalysis, SpfEvaluator, SpfMechanismToken, SpfQualifier,
    SpfStatus, SpfTag,
};
pub use config::{CliOverrides, Config, ConfigError, GeneratePolicy, HostConvention};
pub use dns_query::DnsQuery;
pub use dns_record::{MxRecord, RecordType};
pub use errors::DomainError;
pub use record_bundle::DomainRecordBundle;
pub use session::{Session, SessionError, SessionPhase};
