//! Timing-based signals: the timing-gap candidate generator, the
//! volume-burst candidate generator, and the reliability check that
//! disables both when a recording's silence has been pre-compressed.

use crate::signal::{Candidate, Signal};
use scrollkeep_ingest::Event;

/// Recordings preprocessed to strip silence report near-zero gaps
/// throughout; timing-based signals would fire on noise. The median
/// `relative_time` across all events is the reliability probe: below
/// 0.1s, timing is considered unreliable.
pub fn timing_is_reliable(events: &[Event]) -> bool {
    if events.is_empty() {
        return true;
    }
    median(events, |e| e.relative_time) >= 0.1
}

fn median(events: &[Event], f: impl Fn(&Event) -> f64) -> f64 {
    let mut values: Vec<f64> = events.iter().map(f).collect();
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

fn percentile(mut values: Vec<f64>, p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let rank = (p * (values.len() - 1) as f64).round() as usize;
    values[rank.min(values.len() - 1)]
}

/// Emit a candidate for every event whose `relative_time` exceeds
/// `max(5s, 3 * p95_gap)`.
pub fn timing_gap_candidates(events: &[Event]) -> Vec<Candidate> {
    let p95 = percentile(events.iter().map(|e| e.relative_time).collect(), 0.95);
    let threshold = (5.0_f64).max(3.0 * p95);

    events
        .iter()
        .enumerate()
        .filter(|(_, e)| e.relative_time > threshold)
        .map(|(i, e)| Candidate::new(i, e.relative_time / 5.0, Signal::TimingGap))
        .collect()
}

/// Emit a candidate wherever an event's byte count exceeds 5x the mean of
/// the preceding `window` events' byte counts, and its own gap exceeds 1s
/// (a burst that arrives instantly after the prior event is just a large
/// paste, not a semantic boundary).
pub fn volume_burst_candidates(events: &[Event], window: usize) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for i in 0..events.len() {
        if i == 0 || events[i].relative_time <= 1.0 {
            continue;
        }
        let start = i.saturating_sub(window);
        let preceding = &events[start..i];
        if preceding.is_empty() {
            continue;
        }
        let mean: f64 = preceding.iter().map(|e| e.data.len() as f64).sum::<f64>()
            / preceding.len() as f64;
        if mean <= 0.0 {
            continue;
        }
        let current = events[i].data.len() as f64;
        if current > 5.0 * mean {
            candidates.push(Candidate::new(i, 0.3, Signal::VolumeBurst));
        }
    }
    candidates
}
