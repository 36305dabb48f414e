pub mod loaders;
pub mod record;

pub use loaders::{load_records, records_from_rows};
pub use record::{normalize_application_number, Record};
