//! Detector thresholds, factored out of the algorithm so tests (and
//! embedders) can exercise non-default values.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Candidates closer together than this (in event indices) fuse into one.
    pub merge_window: usize,
    /// A detected boundary closer to the stream's start or end than this
    /// many events is dropped. Interior boundaries are never filtered by
    /// this rule.
    pub min_section_size: usize,
    /// Hard cap on detected boundaries; lowest-scoring candidates are
    /// dropped first once exceeded.
    pub max_sections: usize,
    /// Recordings with fewer events than this produce zero sections.
    pub min_session_size: usize,
    /// Rolling window size for the volume-burst signal.
    pub volume_window: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            merge_window: 50,
            min_section_size: 100,
            max_sections: 50,
            min_session_size: 100,
            volume_window: 10,
        }
    }
}
