/// Identifier assigned to records by the persistence collaborator.
///
/// Ids are ordered so that ledgers can break date ties deterministically.
pub type RecordId = i64;

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use rust_decimal;
