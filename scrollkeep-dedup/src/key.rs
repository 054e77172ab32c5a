//! Line keys used for matching.
//!
//! Lines are opaque keys when matching: the trimmed concatenation of
//! their span texts. Styles are ignored deliberately — real re-renders
//! often redraw the same text with altered colors (selection, focus)
//! while keeping content identical, and matching on style would miss
//! exactly the redraws this crate exists to collapse.

use scrollkeep_vt::{extract_spans, Line};

pub fn line_key(line: &Line) -> String {
    extract_spans(line)
        .iter()
        .map(|span| span.text.as_str())
        .collect::<String>()
        .trim()
        .to_string()
}
