//! The VT engine bridge: a thin, stable surface over `avt`.
//!
//! This is not a VT parser — `avt` already is one, and is the same VT
//! library asciinema's own tooling uses for offline `.cast` processing.
//! This module only adds what the rest of the pipeline needs: a typed
//! [`Line`]/[`Cell`] view, a panic-safe `feed`, and local alt-screen
//! tracking (`avt` doesn't surface that directly, so the bridge scans fed
//! bytes for the DEC 1047/1049 set/reset sequences itself — the same kind
//! of raw escape-sequence scan the section detector already performs on
//! `o`-event data).

use crate::cell::Line;
use std::collections::HashSet;
use std::panic;

/// A thin wrapper over `avt::Vt` exposing the subset of terminal state
/// the ingestion pipeline needs.
pub struct Engine {
    vt: avt::Vt,
    in_alt_screen: bool,
}

impl Engine {
    /// Create a new engine with the given geometry. `scrollback_limit` of
    /// `None` means unlimited, the default.
    pub fn create(cols: usize, rows: usize, scrollback_limit: Option<usize>) -> Self {
        let mut builder = avt::Vt::builder().size(cols, rows);
        if let Some(limit) = scrollback_limit {
            builder = builder.scrollback_limit(limit);
        }
        Engine {
            vt: builder.build(),
            in_alt_screen: false,
        }
    }

    /// Feed output bytes (already decoded as UTF-8 text) to the parser.
    ///
    /// Returns the set of row indices whose rendered content changed, or
    /// `None` if the underlying parser panicked — the caller treats the
    /// event as absorbed and continues rather than propagating the panic.
    pub fn feed(&mut self, text: &str) -> Option<HashSet<usize>> {
        self.update_alt_screen_state(text);

        let vt = &mut self.vt;
        let result = panic::catch_unwind(panic::AssertUnwindSafe(|| vt.feed_str(text)));
        match result {
            Ok(changes) => Some(changes.lines.into_iter().collect()),
            Err(_) => {
                log::warn!("VT engine panicked while feeding {} bytes; absorbing", text.len());
                None
            }
        }
    }

    /// The visible viewport, `rows` lines tall.
    pub fn view(&self) -> Vec<Line> {
        self.vt.view().map(Line::from).collect()
    }

    /// Scrollback plus viewport, with trailing blank viewport lines
    /// trimmed by the caller (see [`crate::snapshot::Snapshot::from_lines`]).
    pub fn all_lines(&self) -> Vec<Line> {
        self.vt.lines().map(Line::from).collect()
    }

    /// Cursor position, or `None` when hidden.
    pub fn cursor(&self) -> Option<(usize, usize)> {
        let cursor = self.vt.cursor();
        cursor.visible.then_some((cursor.col, cursor.row))
    }

    /// Current `(cols, rows)`.
    pub fn size(&self) -> (usize, usize) {
        self.vt.size()
    }

    /// Resize the terminal, causing reflow. `avt` does not report a precise
    /// diff for resize, so every row is conservatively reported changed.
    pub fn resize(&mut self, cols: usize, rows: usize) -> HashSet<usize> {
        self.vt.resize(cols, rows);
        (0..rows).collect()
    }

    /// Whether the terminal is currently showing the alternate screen
    /// buffer (tracked locally; see module docs).
    pub fn in_alt_screen(&self) -> bool {
        self.in_alt_screen
    }

    fn update_alt_screen_state(&mut self, text: &str) {
        const SET: [&str; 2] = ["\x1b[?1049h", "\x1b[?1047h"];
        const RESET: [&str; 2] = ["\x1b[?1049l", "\x1b[?1047l"];

        let mut events: Vec<(usize, bool)> = Vec::new();
        for pat in SET {
            for (idx, _) in text.match_indices(pat) {
                events.push((idx, true));
            }
        }
        for pat in RESET {
            for (idx, _) in text.match_indices(pat) {
                events.push((idx, false));
            }
        }
        events.sort_by_key(|(idx, _)| *idx);
        if let Some(&(_, last)) = events.last() {
            self.in_alt_screen = last;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_then_feed_matches_single_feed() {
        let mut a = Engine::create(10, 3, None);
        a.feed("hello").unwrap();
        a.feed(" world").unwrap();

        let mut b = Engine::create(10, 3, None);
        b.feed("hello world").unwrap();

        let view_a: Vec<String> = a.view().iter().map(line_text).collect();
        let view_b: Vec<String> = b.view().iter().map(line_text).collect();
        assert_eq!(view_a, view_b);
    }

    fn line_text(line: &Line) -> String {
        line.cells.iter().map(|c| c.codepoint).collect()
    }

    #[test]
    fn cursor_hidden_when_dectrm_25_reset() {
        let mut engine = Engine::create(10, 3, None);
        engine.feed("\x1b[?25l").unwrap();
        assert_eq!(engine.cursor(), None);
    }

    #[test]
    fn tracks_alt_screen_enter_and_exit() {
        let mut engine = Engine::create(10, 3, None);
        assert!(!engine.in_alt_screen());
        engine.feed("\x1b[?1049h").unwrap();
        assert!(engine.in_alt_screen());
        engine.feed("\x1b[?1049l").unwrap();
        assert!(!engine.in_alt_screen());
    }

    #[test]
    fn view_has_configured_row_count() {
        let engine = Engine::create(20, 5, None);
        assert_eq!(engine.view().len(), 5);
        assert_eq!(engine.size(), (20, 5));
    }

    #[test]
    fn resize_updates_size() {
        let mut engine = Engine::create(80, 24, None);
        engine.resize(100, 30);
        assert_eq!(engine.size(), (100, 30));
    }
}
