//! Session and section types — the logical schema the store persists,
//! regardless of backend.

use chrono::{DateTime, Utc};
use scrollkeep_vt::Snapshot;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type SessionId = Uuid;
pub type SectionId = Uuid;

/// Where a session's processing currently stands. The transition is
/// monotone except that re-detection may re-enter `Processing` from
/// `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub filename: String,
    pub filepath: String,
    pub size_bytes: u64,
    pub marker_count: usize,
    pub uploaded_at: DateTime<Utc>,
    pub event_count: Option<usize>,
    pub detected_sections_count: usize,
    pub detection_status: DetectionStatus,
}

/// Fields supplied when creating a session; everything else starts at
/// its lifecycle default (`Pending`, zero counts, no `event_count`).
#[derive(Debug, Clone, PartialEq)]
pub struct NewSession {
    pub filename: String,
    pub filepath: String,
    pub size_bytes: u64,
    pub marker_count: usize,
    pub uploaded_at: DateTime<Utc>,
}

/// A partial update applied to a stored session; `None` fields are left
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    pub event_count: Option<usize>,
    pub detected_sections_count: Option<usize>,
    pub detection_status: Option<DetectionStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Marker,
    Detected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub session_id: SessionId,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub start_event: usize,
    pub end_event: Option<usize>,
    pub label: String,
    pub snapshot: Option<Snapshot>,
    pub created_at: DateTime<Utc>,
}
