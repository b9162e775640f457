pub mod check;
pub mod dkim_lookup;
pub mod dns_query;
pub mod generate;
pub mod health;

pub use check::check_domain;
pub use dkim_lookup::dkim_lookup;
pub use dns_query::dns_query;
pub use generate::generate_records;
pub use health::health_check;
