//! The boundary pipeline: candidate gathering, merging, filtering,
//! capping, labeling — and marker precedence on top.
//!
//! Operates over discrete scored candidates on the event axis: gather
//! candidates from every signal, merge within a window, apply size/volume
//! floors, emit labeled output. This is an offline multi-signal merge over
//! a whole recording, not a single live heuristic over a streaming line.

use crate::config::DetectorConfig;
use crate::merge::merge_candidates;
use crate::scanner::{alt_screen_exit_candidates, screen_clear_candidates};
use crate::signal::{Candidate, Signal};
use crate::timing::{timing_gap_candidates, timing_is_reliable, volume_burst_candidates};
use scrollkeep_ingest::Event;

/// A marker extracted from an `m`-kind event: an inviolable section
/// anchor supplied by the recording itself (or the caller).
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub event_index: usize,
    pub label: String,
}

/// One boundary in the final, ordered output: either a user marker or an
/// algorithmically detected boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub event_index: usize,
    pub score: f64,
    pub signals: Vec<Signal>,
    pub label: String,
    pub is_marker: bool,
}

/// Gather every signal's raw candidates over the full event stream.
fn gather_candidates(events: &[Event], config: &DetectorConfig) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    candidates.extend(screen_clear_candidates(events));
    candidates.extend(alt_screen_exit_candidates(events));
    if timing_is_reliable(events) {
        candidates.extend(timing_gap_candidates(events));
        candidates.extend(volume_burst_candidates(events, config.volume_window));
    }
    candidates
}

/// Merge, apply the min-section-size floor (unless disabled), cap to
/// `max_sections`, and return boundaries still unlabeled.
fn process_candidates(
    candidates: Vec<Candidate>,
    event_count: usize,
    config: &DetectorConfig,
    enforce_min_size: bool,
) -> Vec<Candidate> {
    let mut merged = merge_candidates(candidates, config.merge_window);

    if enforce_min_size && !merged.is_empty() {
        if merged.first().unwrap().event_index < config.min_section_size {
            merged.remove(0);
        }
    }
    if enforce_min_size && !merged.is_empty() {
        let last = merged.last().unwrap();
        if event_count.saturating_sub(last.event_index) < config.min_section_size {
            merged.pop();
        }
    }

    if merged.len() > config.max_sections {
        merged.sort_by(|a, b| b.score.total_cmp(&a.score));
        merged.truncate(config.max_sections);
        merged.sort_by_key(|c| c.event_index);
    }

    merged
}

/// Detect boundaries with no markers. Pure function: same `events` in,
/// byte-identical boundaries out.
pub fn detect(events: &[Event], config: &DetectorConfig) -> Vec<Boundary> {
    if events.len() < config.min_session_size {
        return Vec::new();
    }

    let candidates = gather_candidates(events, config);
    let processed = process_candidates(candidates, events.len(), config, true);

    processed
        .into_iter()
        .enumerate()
        .map(|(i, c)| Boundary {
            event_index: c.event_index,
            score: c.score,
            signals: c.signals,
            label: format!("Section {}", i + 1),
            is_marker: false,
        })
        .collect()
}

/// Detect boundaries with marker precedence: markers are injected as
/// inviolable anchors, detection runs independently within each
/// marker-bounded gap (with the minimum-section-size floor disabled
/// inside a gap), and any detected boundary landing on a marker's event
/// index is discarded.
pub fn detect_with_markers(
    events: &[Event],
    markers: &[Marker],
    config: &DetectorConfig,
) -> Vec<Boundary> {
    if markers.is_empty() {
        return detect(events, config);
    }

    let mut sorted_markers = markers.to_vec();
    sorted_markers.sort_by_key(|m| m.event_index);

    let all_candidates = gather_candidates(events, config);
    let event_count = events.len();

    let mut gap_starts = vec![0usize];
    gap_starts.extend(sorted_markers.iter().map(|m| m.event_index + 1));
    let mut gap_ends: Vec<usize> = sorted_markers.iter().map(|m| m.event_index).collect();
    gap_ends.push(event_count);

    let mut detected: Vec<Candidate> = Vec::new();
    for (lo, hi) in gap_starts.into_iter().zip(gap_ends) {
        if lo >= hi {
            continue;
        }
        let in_gap: Vec<Candidate> = all_candidates
            .iter()
            .filter(|c| c.event_index >= lo && c.event_index < hi)
            .cloned()
            .collect();
        detected.extend(process_candidates(in_gap, event_count, config, false));
    }

    let mut boundaries: Vec<Boundary> = sorted_markers
        .iter()
        .map(|m| Boundary {
            event_index: m.event_index,
            score: f64::INFINITY,
            signals: Vec::new(),
            label: m.label.clone(),
            is_marker: true,
        })
        .collect();

    boundaries.extend(detected.into_iter().map(|c| Boundary {
        event_index: c.event_index,
        score: c.score,
        signals: c.signals,
        label: String::new(),
        is_marker: false,
    }));

    boundaries.sort_by_key(|b| b.event_index);

    let mut section_number = 0;
    for boundary in &mut boundaries {
        if !boundary.is_marker {
            section_number += 1;
            boundary.label = format!("Section {section_number}");
        }
    }

    boundaries
}
