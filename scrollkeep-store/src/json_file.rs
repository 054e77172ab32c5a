//! File-backed implementation: one JSON document per session under a
//! storage root.
//!
//! Create the parent directory if needed, then write. Writes go to a temp
//! file in the same directory and are renamed into place so a reader never
//! observes a half-written document — the atomicity `replace_detected_sections`
//! needs.

use crate::error::StoreError;
use crate::store::SectionStore;
use crate::types::{DetectionStatus, NewSession, Section, SectionType, Session, SessionId, SessionPatch};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
struct Document {
    session: Session,
    sections: Vec<Section>,
    #[serde(default)]
    processing_since: Option<chrono::DateTime<Utc>>,
}

pub struct JsonFileSectionStore {
    root: PathBuf,
}

impl JsonFileSectionStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        JsonFileSectionStore { root: root.as_ref().to_path_buf() }
    }

    fn session_path(&self, id: SessionId) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    fn load(&self, id: SessionId) -> Result<Document, StoreError> {
        let path = self.session_path(id);
        let bytes = fs::read(&path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(id)
            } else {
                StoreError::Io(err)
            }
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn save(&self, id: SessionId, doc: &Document) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        let final_path = self.session_path(id);
        let tmp_path = self.root.join(format!("{id}.json.tmp"));
        let bytes = serde_json::to_vec_pretty(doc)?;
        fs::write(&tmp_path, bytes)?;
        fs::rename(&tmp_path, &final_path)?;
        Ok(())
    }
}

impl SectionStore for JsonFileSectionStore {
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
        self.save(id, &Document { session, sections: Vec::new(), processing_since: None })?;
        Ok(id)
    }

    fn get_session(&self, id: SessionId) -> Result<Option<Session>, StoreError> {
        match self.load(id) {
            Ok(doc) => Ok(Some(doc.session)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn update_session(&self, id: SessionId, patch: SessionPatch) -> Result<(), StoreError> {
        let mut doc = self.load(id)?;
        if let Some(event_count) = patch.event_count {
            doc.session.event_count = Some(event_count);
        }
        if let Some(count) = patch.detected_sections_count {
            doc.session.detected_sections_count = count;
        }
        if let Some(status) = patch.detection_status {
            doc.session.detection_status = status;
            doc.processing_since = matches!(status, DetectionStatus::Processing).then(Utc::now);
        }
        self.save(id, &doc)
    }

    fn replace_detected_sections(
        &self,
        session_id: SessionId,
        new_sections: Vec<Section>,
    ) -> Result<(), StoreError> {
        let mut doc = self.load(session_id)?;
        doc.sections.retain(|s| s.section_type != SectionType::Detected);
        doc.sections.extend(new_sections);
        doc.sections.sort_by_key(|s| s.start_event);
        self.save(session_id, &doc)
    }

    fn insert_marker_sections(
        &self,
        session_id: SessionId,
        sections: Vec<Section>,
    ) -> Result<(), StoreError> {
        let mut doc = self.load(session_id)?;
        doc.sections.extend(sections);
        doc.sections.sort_by_key(|s| s.start_event);
        self.save(session_id, &doc)
    }

    fn replace_all_sections(
        &self,
        session_id: SessionId,
        mut new_sections: Vec<Section>,
    ) -> Result<(), StoreError> {
        let mut doc = self.load(session_id)?;
        new_sections.sort_by_key(|s| s.start_event);
        doc.sections = new_sections;
        self.save(session_id, &doc)
    }

    fn list_sections(&self, session_id: SessionId) -> Result<Vec<Section>, StoreError> {
        Ok(self.load(session_id)?.sections)
    }

    fn delete_session(&self, id: SessionId) -> Result<(), StoreError> {
        let path = self.session_path(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn list_stale_processing(&self, older_than: Duration) -> Result<Vec<SessionId>, StoreError> {
        let now = Utc::now();
        let mut stale = Vec::new();
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(stale),
            Err(err) => return Err(StoreError::Io(err)),
        };
        for entry in entries {
            let entry = entry?;
            let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str().map(str::to_string)) else {
                continue;
            };
            let Ok(id) = Uuid::parse_str(&stem) else { continue };
            if let Ok(doc) = self.load(id) {
                let is_stale = doc.session.detection_status == DetectionStatus::Processing
                    && doc.processing_since.is_some_and(|since| {
                        now.signed_duration_since(since).to_std().unwrap_or_default() >= older_than
                    });
                if is_stale {
                    stale.push(id);
                }
            }
        }
        Ok(stale)
    }
}
