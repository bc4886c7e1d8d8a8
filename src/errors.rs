use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::RecordId;

pub type EngineResult<T> = Result<T, EngineError>;

/// Error type that captures engine and collaborator failures.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid window: start {start} is after end {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },
    #[error("invalid record {id}: {reason}")]
    InvalidRecord { id: RecordId, reason: String },
    #[error("unrecognized recurrence `{label}` on record {id}")]
    UnrecognizedRecurrence { id: RecordId, label: String },
    #[error("ledger source failed: {0}")]
    Source(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn invalid_record(id: RecordId, reason: impl Into<String>) -> Self {
        EngineError::InvalidRecord {
            id,
            reason: reason.into(),
        }
    }
}
