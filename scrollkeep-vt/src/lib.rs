//! VT emulator bridge: wraps `avt` and emits the snapshot wire format.
//!
//! This crate owns everything downstream stages need to know about
//! terminal emulation but nothing about asciicast framing, section
//! boundaries, or storage — those live in their own crates.

pub mod cell;
pub mod color;
pub mod engine;
pub mod snapshot;
pub mod span;

pub use cell::{Cell, Line};
pub use color::{AttrFlags, Color, Intensity, Pen};
pub use engine::Engine;
pub use snapshot::{Snapshot, WireColor, WireLine, WireSpan};
pub use span::{extract_spans, Span};
