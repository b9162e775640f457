//! Email-authentication rules: tokenizing SPF/DMARC text, classifying what a
//! domain already publishes and generating the records it still needs.

pub mod dmarc;
pub mod generator;
pub mod spf;
pub mod status;
pub mod tokenizer;

pub use dmarc::{DmarcTag, DmarcTagToken};
pub use generator::{
    DkimForm, DkimValue, GeneratedRecord, GeneratedRecordSet, RecordAction, RecordGenerator,
    RecordKind,
};
pub use spf::{SpfAnalysis, SpfEvaluator, SpfMechanismToken, SpfQualifier, SpfTag};
pub use status::{AuthenticationStatus, DomainReport, SpfStatus};
pub use tokenizer::{RecordTokenizer, SimpleTokenizer};
