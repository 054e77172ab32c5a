//! In-memory reference implementation: a `parking_lot::RwLock`-guarded
//! map. Used in tests and as the implementation embedders reach for
//! before standing up file or database storage.

use crate::error::StoreError;
use crate::store::SectionStore;
use crate::types::{DetectionStatus, NewSession, Section, SectionType, Session, SessionId, SessionPatch};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

struct Record {
    session: Session,
    sections: Vec<Section>,
    processing_since: Option<DateTime<Utc>>,
}

#[derive(Default)]
pub struct InMemorySectionStore {
    records: RwLock<HashMap<SessionId, Record>>,
}

impl InMemorySectionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SectionStore for InMemorySectionStore {
    fn create_session(&self, meta: NewSession) -> Result<SessionId, StoreError> {
        let id = Uuid::new_v4();
        let session = Session {
            id,
            filename: meta.filename,
            filepath: meta.filepath,
            size_bytes: meta.size_bytes,
            marker_count: meta.marker_count,
            uploaded_at: meta.uploaded_at,
            event_count: None,
            detected_sections_count: 0,
            detection_status: DetectionStatus::Pending,
        };
        self.records.write().insert(
            id,
            Record { session, sections: Vec::new(), processing_since: None },
        );
        Ok(id)
    }

    fn get_session(&self, id: SessionId) -> Result<Option<Session>, StoreError> {
        Ok(self.records.read().get(&id).map(|r| r.session.clone()))
    }

    fn update_session(&self, id: SessionId, patch: SessionPatch) -> Result<(), StoreError> {
        let mut records = self.records.write();
        let record = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if let Some(event_count) = patch.event_count {
            record.session.event_count = Some(event_count);
        }
        if let Some(count) = patch.detected_sections_count {
            record.session.detected_sections_count = count;
        }
        if let Some(status) = patch.detection_status {
            record.session.detection_status = status;
            record.processing_since = matches!(status, DetectionStatus::Processing).then(Utc::now);
        }
        Ok(())
    }

    fn replace_detected_sections(
        &self,
        session_id: SessionId,
        new_sections: Vec<Section>,
    ) -> Result<(), StoreError> {
        let mut records = self.records.write();
        let record = records.get_mut(&session_id).ok_or(StoreError::NotFound(session_id))?;
        record.sections.retain(|s| s.section_type != SectionType::Detected);
        record.sections.extend(new_sections);
        record.sections.sort_by_key(|s| s.start_event);
        Ok(())
    }

    fn insert_marker_sections(
        &self,
        session_id: SessionId,
        sections: Vec<Section>,
    ) -> Result<(), StoreError> {
        let mut records = self.records.write();
        let record = records.get_mut(&session_id).ok_or(StoreError::NotFound(session_id))?;
        record.sections.extend(sections);
        record.sections.sort_by_key(|s| s.start_event);
        Ok(())
    }

    fn replace_all_sections(
        &self,
        session_id: SessionId,
        mut new_sections: Vec<Section>,
    ) -> Result<(), StoreError> {
        let mut records = self.records.write();
        let record = records.get_mut(&session_id).ok_or(StoreError::NotFound(session_id))?;
        new_sections.sort_by_key(|s| s.start_event);
        record.sections = new_sections;
        Ok(())
    }

    fn list_sections(&self, session_id: SessionId) -> Result<Vec<Section>, StoreError> {
        let records = self.records.read();
        let record = records.get(&session_id).ok_or(StoreError::NotFound(session_id))?;
        Ok(record.sections.clone())
    }

    fn delete_session(&self, id: SessionId) -> Result<(), StoreError> {
        self.records.write().remove(&id);
        Ok(())
    }

    fn list_stale_processing(&self, older_than: Duration) -> Result<Vec<SessionId>, StoreError> {
        let now = Utc::now();
        let records = self.records.read();
        Ok(records
            .values()
            .filter(|r| {
                r.session.detection_status == DetectionStatus::Processing
                    && r.processing_since
                        .is_some_and(|since| now.signed_duration_since(since).to_std().unwrap_or_default() >= older_than)
            })
            .map(|r| r.session.id)
            .collect())
    }
}
