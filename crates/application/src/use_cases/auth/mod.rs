pub mod check_domain;
pub mod generate_records;

pub use check_domain::CheckDomainUseCase;
pub use generate_records::GenerateRecordsUseCase;
