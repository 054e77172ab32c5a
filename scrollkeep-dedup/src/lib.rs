//! Scrollback deduplication for redraw-heavy terminal recordings.
//!
//! TUI applications redraw by clearing the screen and re-emitting the
//! full conversation region; the VT engine faithfully pushes each
//! redraw into scrollback, producing an order of magnitude of
//! duplication. This crate recovers the "document" view: a clean line
//! sequence plus a monotone mapping from raw line positions to clean
//! ones.

pub mod key;
pub mod matcher;
pub mod stutter;

pub use key::line_key;
pub use matcher::{dedup, DedupConfig, DedupResult};
