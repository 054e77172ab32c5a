//! Streaming NDJSON reader for asciicast recordings.
//!
//! Produces a finite, forward-only sequence of records from a `.cast`
//! file without loading it into memory up front: one [`Header`] followed
//! by many [`Event`]s. Malformed lines are skipped rather than surfaced,
//! since a single corrupt event in a multi-megabyte recording shouldn't
//! fail the whole session.

pub mod event;
pub mod header;
pub mod reader;

pub use event::Event;
pub use header::Header;
pub use reader::{IngestError, Reader, Record};
