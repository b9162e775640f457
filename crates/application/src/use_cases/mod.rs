pub mod auth;
pub mod dns;

// Re-export use cases
pub use auth::{CheckDomainUseCase, GenerateRecordsUseCase};
pub use dns::{LookupDkimUseCase, ResolveRecordsUseCase};
