//! Pipeline-level error taxonomy: one variant per failure category,
//! `#[source]`/`#[from]` threading the underlying error where one exists.
//!
//! Only failures fatal to the current session's processing task are
//! represented here. Malformed lines, unknown VT sequences, and
//! zero-event sessions are recovered internally and never reach this
//! enum — see module docs on [`crate::pipeline`].

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("I/O error while processing session: {0}")]
    Io(#[from] std::io::Error),

    #[error("recording has no valid header")]
    NoHeader,

    #[error("section store rejected the write: {0}")]
    Store(String),
}

impl From<scrollkeep_ingest::IngestError> for PipelineError {
    fn from(err: scrollkeep_ingest::IngestError) -> Self {
        match err {
            scrollkeep_ingest::IngestError::Io(io_err) => PipelineError::Io(io_err),
        }
    }
}

impl From<scrollkeep_store::StoreError> for PipelineError {
    fn from(err: scrollkeep_store::StoreError) -> Self {
        PipelineError::Store(err.to_string())
    }
}
