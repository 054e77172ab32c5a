//! The individual boundary signals and the candidate type they produce.

use serde::{Deserialize, Serialize};

/// Which heuristic raised a candidate boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Signal {
    TimingGap,
    ScreenClear,
    AltScreenExit,
    VolumeBurst,
}

/// A scored boundary candidate before merging, filtering, and labeling.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub event_index: usize,
    pub score: f64,
    pub signals: Vec<Signal>,
}

impl Candidate {
    pub fn new(event_index: usize, score: f64, signal: Signal) -> Self {
        Candidate { event_index, score, signals: vec![signal] }
    }
}
