//! Multi-signal section boundary detector.
//!
//! Places boundaries on the event-index axis using timing gaps, screen
//! clears, alt-screen exits, and output volume bursts, then merges,
//! floors, caps, and labels the result. Markers (from `m`-kind events or
//! supplied externally) take precedence over anything detected.

pub mod boundary;
pub mod config;
pub mod merge;
pub mod scanner;
pub mod signal;
pub mod timing;

pub use boundary::{detect, detect_with_markers, Boundary, Marker};
pub use config::DetectorConfig;
pub use signal::{Candidate, Signal};
