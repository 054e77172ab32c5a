//! Escape-sequence scanning signals: screen clear and alt-screen exit.

use crate::signal::{Candidate, Signal};
use scrollkeep_ingest::Event;

const SCREEN_CLEAR: [&str; 2] = ["\x1b[2J", "\x1b[H\x1b[2J"];
const ALT_SCREEN_EXIT: [&str; 2] = ["\x1b[?1049l", "\x1b[?1047l"];

/// One candidate per `o`-event whose data contains a clear-screen sequence.
pub fn screen_clear_candidates(events: &[Event]) -> Vec<Candidate> {
    scan(events, &SCREEN_CLEAR, 1.0, Signal::ScreenClear)
}

/// One candidate per `o`-event whose data drops out of the alternate
/// screen buffer.
pub fn alt_screen_exit_candidates(events: &[Event]) -> Vec<Candidate> {
    scan(events, &ALT_SCREEN_EXIT, 0.8, Signal::AltScreenExit)
}

fn scan(events: &[Event], patterns: &[&str], score: f64, signal: Signal) -> Vec<Candidate> {
    events
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_output() && patterns.iter().any(|p| e.data.contains(p)))
        .map(|(i, _)| Candidate::new(i, score, signal))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(kind: &str, data: &str) -> Event {
        Event { relative_time: 0.1, kind: kind.into(), data: data.into() }
    }

    #[test]
    fn finds_plain_clear() {
        let events = vec![ev("o", "hello"), ev("o", "\x1b[2J"), ev("o", "world")];
        let candidates = screen_clear_candidates(&events);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].event_index, 1);
        assert_eq!(candidates[0].score, 1.0);
    }

    #[test]
    fn finds_home_then_clear() {
        let events = vec![ev("o", "\x1b[H\x1b[2J")];
        assert_eq!(screen_clear_candidates(&events).len(), 1);
    }

    #[test]
    fn finds_alt_screen_exit_either_variant() {
        let events = vec![ev("o", "\x1b[?1049l"), ev("o", "\x1b[?1047l"), ev("o", "plain")];
        let candidates = alt_screen_exit_candidates(&events);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].score, 0.8);
    }

    #[test]
    fn ignores_non_output_events() {
        let events = vec![ev("m", "\x1b[2J"), ev("i", "\x1b[2J")];
        assert!(screen_clear_candidates(&events).is_empty());
    }
}
