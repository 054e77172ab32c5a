//! Contiguous-block matching: the main dedup scan.

use crate::key::line_key;
use crate::stutter::stutter_targets;
use scrollkeep_vt::Line;
use std::collections::HashMap;

/// Thresholds the dedup scan is parameterized by, so tests (and
/// embedders) can exercise non-default values instead of the algorithm
/// hardcoding them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupConfig {
    /// Minimum contiguous run length to count as a re-render.
    pub min_match: usize,
    /// How many lines ahead the stutter pre-pass looks for a repeat.
    pub stutter_window: usize,
}

impl Default for DedupConfig {
    fn default() -> Self {
        DedupConfig { min_match: 3, stutter_window: 5 }
    }
}

/// The result of deduplicating a raw line sequence: the clean document
/// plus the raw-to-clean mapping needed to translate positions back.
pub struct DedupResult {
    pub clean_lines: Vec<Line>,
    raw_to_clean: Vec<usize>,
    count_prefix: Vec<usize>,
}

impl DedupResult {
    /// The clean-document position a raw line maps to.
    pub fn raw_to_clean(&self, raw_line: usize) -> usize {
        self.raw_to_clean[raw_line]
    }

    /// The clean-document length reached after consuming the first `n`
    /// raw lines (a running max, since re-renders don't advance it).
    pub fn raw_line_count_to_clean(&self, n: usize) -> usize {
        if n == 0 {
            0
        } else {
            self.count_prefix[n - 1]
        }
    }
}

/// Deduplicate a raw line sequence. An empty `raw_lines` (or one with no
/// repeated content at all) is its own fixed point: `clean_lines` equals
/// `raw_lines` and `raw_to_clean` is the identity — this is what happens
/// naturally when there is nothing yet in the clean document to match
/// against, which is also why the "zero epoch" case needs no special
/// handling: the hash index starts empty regardless.
pub fn dedup(raw_lines: &[Line], config: &DedupConfig) -> DedupResult {
    let n = raw_lines.len();
    let keys: Vec<String> = raw_lines.iter().map(line_key).collect();
    let targets = stutter_targets(&keys, config.stutter_window);

    let real_indices: Vec<usize> = (0..n).filter(|&i| targets[i] == i).collect();

    let mut clean_lines: Vec<Line> = Vec::new();
    let mut clean_keys: Vec<String> = Vec::new();
    let mut hash_index: HashMap<String, Vec<usize>> = HashMap::new();
    let mut raw_to_clean = vec![0usize; n];

    let mut pos = 0usize;
    while pos < real_indices.len() {
        let raw_i = real_indices[pos];
        let key = &keys[raw_i];

        let best_match = hash_index.get(key).and_then(|starts| {
            starts
                .iter()
                .map(|&p| (p, match_length(&keys, &real_indices, pos, &clean_keys, p)))
                .max_by_key(|&(_, len)| len)
        });

        match best_match {
            Some((p, len)) if len >= config.min_match => {
                for k in 0..len {
                    raw_to_clean[real_indices[pos + k]] = p + k;
                }
                pos += len;
            }
            _ => {
                let clean_pos = clean_lines.len();
                clean_lines.push(raw_lines[raw_i].clone());
                clean_keys.push(key.clone());
                hash_index.entry(key.clone()).or_default().push(clean_pos);
                raw_to_clean[raw_i] = clean_pos;
                pos += 1;
            }
        }
    }

    for i in 0..n {
        if targets[i] != i {
            raw_to_clean[i] = raw_to_clean[targets[i]];
        }
    }

    let mut count_prefix = vec![0usize; n];
    let mut running_max = 0usize;
    for i in 0..n {
        running_max = running_max.max(raw_to_clean[i] + 1);
        count_prefix[i] = running_max;
    }

    DedupResult { clean_lines, raw_to_clean, count_prefix }
}

fn match_length(
    raw_keys: &[String],
    real_indices: &[usize],
    start_pos: usize,
    clean_keys: &[String],
    clean_start: usize,
) -> usize {
    let mut len = 0;
    loop {
        let raw_pos = start_pos + len;
        let clean_pos = clean_start + len;
        if raw_pos >= real_indices.len() || clean_pos >= clean_keys.len() {
            break;
        }
        if raw_keys[real_indices[raw_pos]] != clean_keys[clean_pos] {
            break;
        }
        len += 1;
    }
    len
}
