//! I/O module
//!
//! Interfaces to the upstream sequence readers.

pub mod record;

/// Convenience re-exports
pub use record::{translate_records, RecordTranslation, SequenceRecord};
