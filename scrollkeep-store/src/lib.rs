//! Backend-agnostic persistence for sessions and detected sections.
//!
//! A [`SectionStore`] trait with two implementations — [`InMemorySectionStore`]
//! for tests and embedding, [`JsonFileSectionStore`] for a real on-disk
//! backend — so the pipeline never depends on which one is wired in.

pub mod error;
pub mod json_file;
pub mod memory;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use json_file::JsonFileSectionStore;
pub use memory::InMemorySectionStore;
pub use store::SectionStore;
pub use types::{
    DetectionStatus, NewSession, Section, SectionId, SectionType, Session, SessionId, SessionPatch,
};
