pub mod lookup_dkim;
pub mod resolve_records;

pub use lookup_dkim::LookupDkimUseCase;
pub use resolve_records::ResolveRecordsUseCase;
