//! Span extraction from VT lines.
//!
//! Converts a [`Line`] of cells into a flat list of [`Span`] values —
//! contiguous runs of text sharing the same pen. This is the bridge's
//! entry point into the snapshot wire format; everything downstream
//! (storage, display) works in spans, never individual cells.

use crate::cell::Line;
use crate::color::Pen;

/// A contiguous run of cells on a line that share the same [`Pen`].
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub pen: Pen,
}

/// Merge a line's cells into spans.
///
/// Consecutive cells with equal pens collapse into a single span. Zero-width
/// cells (the trailing half of a wide-char pair) never start a span; they
/// extend whatever span precedes them without contributing text.
pub fn extract_spans(line: &Line) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();

    for cell in &line.cells {
        if cell.width == 0 {
            continue;
        }

        match spans.last_mut() {
            Some(span) if span.pen == cell.pen => {
                span.text.push(cell.codepoint);
            }
            _ => {
                spans.push(Span {
                    text: cell.codepoint.to_string(),
                    pen: cell.pen,
                });
            }
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::color::{Color, Intensity};

    fn plain_pen() -> Pen {
        Pen {
            fg: Color::None,
            bg: Color::None,
            intensity: Intensity::Normal,
            attrs: Default::default(),
        }
    }

    fn bold_pen() -> Pen {
        Pen {
            intensity: Intensity::Bold,
            ..plain_pen()
        }
    }

    #[test]
    fn merges_runs_of_equal_pen() {
        let line = Line {
            cells: "AAA".chars().map(|c| Cell {
                codepoint: c,
                width: 1,
                pen: plain_pen(),
            }).collect(),
            wrapped: false,
        };
        let spans = extract_spans(&line);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "AAA");
    }

    #[test]
    fn splits_on_pen_change() {
        let mut cells: Vec<Cell> = "AAA".chars().map(|c| Cell {
            codepoint: c,
            width: 1,
            pen: plain_pen(),
        }).collect();
        cells.extend("BBB".chars().map(|c| Cell {
            codepoint: c,
            width: 1,
            pen: bold_pen(),
        }));
        let line = Line { cells, wrapped: false };
        let spans = extract_spans(&line);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "AAA");
        assert_eq!(spans[1].text, "BBB");
        assert_eq!(spans[1].pen.intensity, Intensity::Bold);
    }

    #[test]
    fn zero_width_cell_extends_previous_span_without_text() {
        let cells = vec![
            Cell { codepoint: '\u{1F600}', width: 2, pen: plain_pen() },
            Cell { codepoint: '\0', width: 0, pen: plain_pen() },
            Cell { codepoint: 'x', width: 1, pen: plain_pen() },
        ];
        let line = Line { cells, wrapped: false };
        let spans = extract_spans(&line);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "\u{1F600}x");
    }
}
