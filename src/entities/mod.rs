//! Entity types loaded from record files

pub mod record;

pub use record::{load_records, InspectionRecord, RecordError, RecordKind};
