//! The backend-agnostic [`SectionStore`] trait.
//!
//! A keyed store with two implementations sharing one contract, so the
//! pipeline never knows which backend it's talking to.

use crate::error::StoreError;
use crate::types::{NewSession, Section, Session, SessionId, SessionPatch};
use std::time::Duration;

pub trait SectionStore: Send + Sync {
    fn create_session(&self, meta: NewSession) -> Result<SessionId, StoreError>;

    fn get_session(&self, id: SessionId) -> Result<Option<Session>, StoreError>;

    fn update_session(&self, id: SessionId, patch: SessionPatch) -> Result<(), StoreError>;

    /// Atomically delete every `Detected` section for `session_id` and
    /// insert `new_sections`; `Marker` sections are left untouched.
    fn replace_detected_sections(
        &self,
        session_id: SessionId,
        new_sections: Vec<Section>,
    ) -> Result<(), StoreError>;

    fn insert_marker_sections(
        &self,
        session_id: SessionId,
        sections: Vec<Section>,
    ) -> Result<(), StoreError>;

    /// Atomically delete every section (marker and detected alike) for
    /// `session_id` and insert `new_sections` in their place. What the
    /// pipeline uses each run: it recomputes the full merged marker set
    /// (inline `m`-kind events plus whatever markers the caller supplies)
    /// alongside the detected boundaries every time, so a full swap is
    /// the atomic unit — not a partial one that has to reconcile against
    /// what was there before.
    fn replace_all_sections(
        &self,
        session_id: SessionId,
        new_sections: Vec<Section>,
    ) -> Result<(), StoreError>;

    fn list_sections(&self, session_id: SessionId) -> Result<Vec<Section>, StoreError>;

    /// Deletes the session and cascades to its sections.
    fn delete_session(&self, id: SessionId) -> Result<(), StoreError>;

    /// Sessions stuck in `Processing` for longer than `older_than` — the
    /// hook an embedder's reaper polls; the store never sweeps on its own.
    fn list_stale_processing(&self, older_than: Duration) -> Result<Vec<SessionId>, StoreError>;
}
