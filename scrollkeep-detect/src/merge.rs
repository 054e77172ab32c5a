//! Candidate clustering: fuse nearby candidates into one.

use crate::signal::Candidate;

/// Walk candidates in event-index order and fuse any two within
/// `merge_window` events of the running cluster. The fused candidate's
/// position is the highest-scoring member's index (ties go to the
/// smaller index); its score is the max of the group; its signals are
/// the sorted, deduplicated union.
pub fn merge_candidates(mut candidates: Vec<Candidate>, merge_window: usize) -> Vec<Candidate> {
    candidates.sort_by_key(|c| c.event_index);

    let mut fused: Vec<Candidate> = Vec::new();
    let mut group: Vec<Candidate> = Vec::new();

    for candidate in candidates {
        let fits = group
            .last()
            .is_none_or(|last| candidate.event_index.saturating_sub(last.event_index) <= merge_window);
        if fits {
            group.push(candidate);
        } else {
            fused.push(fuse(std::mem::take(&mut group)));
            group.push(candidate);
        }
    }
    if !group.is_empty() {
        fused.push(fuse(group));
    }

    fused
}

fn fuse(group: Vec<Candidate>) -> Candidate {
    let event_index = group
        .iter()
        .max_by(|a, b| a.score.total_cmp(&b.score).then(b.event_index.cmp(&a.event_index)))
        .map(|c| c.event_index)
        .expect("group is non-empty");
    let score = group.iter().map(|c| c.score).fold(f64::MIN, f64::max);
    let mut signals: Vec<_> = group.into_iter().flat_map(|c| c.signals).collect();
    signals.sort();
    signals.dedup();
    Candidate { event_index, score, signals }
}
