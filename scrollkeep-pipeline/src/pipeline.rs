//! The session pipeline: the single entry point for processing a
//! recording end to end.
//!
//! Marker persistence is this module's job, not the caller's: `process`
//! merges the markers a caller supplies with the `m`-kind events found in
//! the recording itself, builds a `Marker` section for every one of them
//! alongside the `Detected` sections the boundary detector finds, and
//! persists the whole set in a single atomic
//! `SectionStore::replace_all_sections` call. A caller only needs to pass
//! in the markers it knows about (e.g. from a sidecar file); re-running
//! `process` on the same recording and the same supplied markers always
//! recomputes the same merged set, which is what keeps re-detection
//! idempotent.

use crate::error::PipelineError;
use scrollkeep_detect::{detect_with_markers, DetectorConfig, Marker};
use scrollkeep_ingest::{Reader, Record};
use scrollkeep_store::{
    DetectionStatus, Section, SectionStore, SectionType, SessionId, SessionPatch,
};
use scrollkeep_vt::{Engine, Snapshot};
use std::collections::HashMap;
use std::path::Path;

/// Thresholds forwarded from [`crate::PipelineConfig`] into the
/// components that actually run. Kept separate from `PipelineConfig`
/// itself so this module doesn't need to depend on `toml`/`serde`.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    pub scrollback_limit: Option<usize>,
    pub detector: DetectorConfig,
    pub dedup: scrollkeep_dedup::DedupConfig,
}

impl From<crate::config::PipelineConfig> for RunConfig {
    fn from(config: crate::config::PipelineConfig) -> Self {
        RunConfig {
            scrollback_limit: config.scrollback_limit,
            detector: config.to_detector_config(),
            dedup: config.to_dedup_config(),
        }
    }
}

struct IngestResult {
    width: usize,
    height: usize,
    events: Vec<scrollkeep_ingest::Event>,
}

fn ingest(file_path: &Path) -> Result<IngestResult, PipelineError> {
    let mut reader = Reader::open(file_path)?;
    let header = match reader.next() {
        Some(Record::Header(h)) => h,
        _ => return Err(PipelineError::NoHeader),
    };

    let mut events = Vec::new();
    for record in reader {
        if let Record::Event(event) = record {
            events.push(event);
        }
    }

    Ok(IngestResult { width: header.width, height: header.height, events })
}

fn extract_inline_markers(events: &[scrollkeep_ingest::Event]) -> Vec<Marker> {
    events
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_marker())
        .map(|(i, e)| Marker { event_index: i, label: e.data.clone() })
        .collect()
}

fn merge_markers(inline: Vec<Marker>, supplied: &[Marker]) -> Vec<Marker> {
    let mut by_index: HashMap<usize, Marker> =
        inline.into_iter().map(|m| (m.event_index, m)).collect();
    for marker in supplied {
        by_index.insert(marker.event_index, marker.clone());
    }
    let mut merged: Vec<Marker> = by_index.into_values().collect();
    merged.sort_by_key(|m| m.event_index);
    merged
}

/// Feed every event through the VT engine in order, capturing a viewport
/// snapshot whenever the current event index is a boundary.
fn replay_and_snapshot(
    events: &[scrollkeep_ingest::Event],
    width: usize,
    height: usize,
    scrollback_limit: Option<usize>,
    boundary_indices: &std::collections::HashSet<usize>,
) -> (HashMap<usize, Snapshot>, Vec<scrollkeep_vt::Line>) {
    let mut engine = Engine::create(width, height, scrollback_limit);
    let mut snapshots = HashMap::new();

    for (i, event) in events.iter().enumerate() {
        if event.is_output() {
            engine.feed(&event.data);
        }
        if boundary_indices.contains(&i) {
            let (cols, rows) = engine.size();
            snapshots.insert(i, Snapshot::from_lines(cols, rows, &engine.view()));
        }
    }

    let all_lines = engine.all_lines();
    (snapshots, all_lines)
}

/// Build a `Section` for every boundary — marker and detected alike — in
/// one pass, so `end_event` and the captured snapshot land on markers too,
/// not just on detected sections.
fn build_sections(
    session_id: SessionId,
    boundaries: &[scrollkeep_detect::Boundary],
    event_count: usize,
    snapshots: &mut HashMap<usize, Snapshot>,
) -> Vec<Section> {
    boundaries
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let end = boundaries.get(i + 1).map(|next| next.event_index).unwrap_or(event_count);
            let section_type = if b.is_marker { SectionType::Marker } else { SectionType::Detected };
            Section {
                id: uuid::Uuid::new_v4(),
                session_id,
                section_type,
                start_event: b.event_index,
                end_event: Some(end),
                label: b.label.clone(),
                snapshot: snapshots.remove(&b.event_index),
                created_at: chrono::Utc::now(),
            }
        })
        .collect()
}

/// Process a session end to end: ingest, detect, snapshot, dedup,
/// persist. No return value; every outcome is reflected in the store —
/// `detection_status` ends at `Completed` or `Failed`.
pub fn process(
    file_path: &Path,
    session_id: SessionId,
    markers: &[Marker],
    store: &dyn SectionStore,
    config: RunConfig,
) -> Result<(), PipelineError> {
    store.update_session(
        session_id,
        SessionPatch { detection_status: Some(DetectionStatus::Processing), ..Default::default() },
    )?;

    let outcome = (|| -> Result<(), PipelineError> {
        let ingested = ingest(file_path)?;
        let all_markers = merge_markers(extract_inline_markers(&ingested.events), markers);

        let boundaries =
            detect_with_markers(&ingested.events, &all_markers, &config.detector);
        let boundary_indices: std::collections::HashSet<usize> =
            boundaries.iter().map(|b| b.event_index).collect();

        let (mut snapshots, all_lines) = replay_and_snapshot(
            &ingested.events,
            ingested.width,
            ingested.height,
            config.scrollback_limit,
            &boundary_indices,
        );

        let dedup_result = scrollkeep_dedup::dedup(&all_lines, &config.dedup);
        log::debug!(
            "session {session_id}: {} raw lines deduplicated to {}",
            all_lines.len(),
            dedup_result.clean_lines.len()
        );

        let detected_count = boundaries.iter().filter(|b| !b.is_marker).count();
        let sections = build_sections(
            session_id,
            &boundaries,
            ingested.events.len(),
            &mut snapshots,
        );
        store.replace_all_sections(session_id, sections)?;

        store.update_session(
            session_id,
            SessionPatch {
                event_count: Some(ingested.events.len()),
                detected_sections_count: Some(detected_count),
                detection_status: Some(DetectionStatus::Completed),
            },
        )?;
        Ok(())
    })();

    if let Err(ref err) = outcome {
        log::error!("session {session_id} processing failed: {err}");
        let _ = store.update_session(
            session_id,
            SessionPatch { detection_status: Some(DetectionStatus::Failed), ..Default::default() },
        );
    }

    outcome
}
