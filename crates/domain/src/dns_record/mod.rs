pub mod mx;
pub mod record_type;

pub use mx::MxRecord;
pub use record_type::RecordType;
