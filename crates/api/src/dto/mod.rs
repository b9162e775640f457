pub mod error;
pub mod generate;
pub mod records;

pub use error::ErrorResponse;
pub use generate::{GenerateRequest, GenerateResponse};
pub use records::{DkimLookupParams, DkimLookupResponse, DnsRecordsResponse, DomainParams};
