//! The snapshot wire format.
//!
//! A [`Snapshot`] is what actually gets persisted and handed to a client:
//! a grid dimension plus a list of lines, each a list of style-merged
//! [`WireSpan`]s. Colors serialize as `null` (unset), `"default"`, a
//! palette index, or a `#rrggbb` string — never as the internal four-way
//! [`Color`] enum, which the store and wire boundary don't need to know
//! about.

use crate::cell::Line;
use crate::color::Color;
use crate::span::{extract_spans, Span};
use serde::de::{self, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A span's color as it appears on the wire: absent, the terminal default,
/// a 256-color index, or truecolor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireColor {
    Unset,
    Default,
    Indexed(u8),
    Rgb(u8, u8, u8),
}

impl From<Color> for WireColor {
    fn from(c: Color) -> Self {
        match c {
            Color::None => WireColor::Unset,
            Color::DefaultFg | Color::DefaultBg => WireColor::Default,
            Color::Indexed(n) => WireColor::Indexed(n),
            Color::Rgb(r, g, b) => WireColor::Rgb(r, g, b),
        }
    }
}

impl Serialize for WireColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WireColor::Unset => serializer.serialize_none(),
            WireColor::Default => serializer.serialize_str("default"),
            WireColor::Indexed(n) => serializer.serialize_u8(*n),
            WireColor::Rgb(r, g, b) => {
                serializer.serialize_str(&format!("#{r:02x}{g:02x}{b:02x}"))
            }
        }
    }
}

struct WireColorVisitor;

impl<'de> Visitor<'de> for WireColorVisitor {
    type Value = WireColor;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("null, \"default\", a palette index, or a #rrggbb string")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(WireColor::Unset)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(WireColor::Unset)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        u8::try_from(v)
            .map(WireColor::Indexed)
            .map_err(|_| de::Error::custom("palette index out of range"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v == "default" {
            return Ok(WireColor::Default);
        }
        let hex = v.strip_prefix('#').ok_or_else(|| {
            de::Error::custom(format!("unrecognized color string '{v}'"))
        })?;
        if hex.len() != 6 {
            return Err(de::Error::custom("expected #rrggbb"));
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).map_err(de::Error::custom);
        Ok(WireColor::Rgb(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?))
    }
}

impl<'de> Deserialize<'de> for WireColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(WireColorVisitor)
    }
}

fn is_unset(c: &WireColor) -> bool {
    matches!(c, WireColor::Unset)
}

fn is_false(b: &bool) -> bool {
    !b
}

/// A styled run of text as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireSpan {
    pub text: String,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub fg: WireColor,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub bg: WireColor,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub faint: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub blink: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub inverse: bool,
}

impl From<Span> for WireSpan {
    fn from(span: Span) -> Self {
        let pen = span.pen;
        WireSpan {
            text: span.text,
            fg: pen.fg.into(),
            bg: pen.bg.into(),
            bold: pen.intensity == crate::color::Intensity::Bold,
            faint: pen.intensity == crate::color::Intensity::Faint,
            italic: pen.attrs.italic(),
            underline: pen.attrs.underline(),
            strikethrough: pen.attrs.strikethrough(),
            blink: pen.attrs.blink(),
            inverse: pen.attrs.inverse(),
        }
    }
}

/// A line in the wire format: its spans plus the wrap flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireLine {
    #[serde(default)]
    pub wrapped: bool,
    pub spans: Vec<WireSpan>,
}

impl From<&Line> for WireLine {
    fn from(line: &Line) -> Self {
        WireLine {
            wrapped: line.wrapped,
            spans: extract_spans(line).into_iter().map(WireSpan::from).collect(),
        }
    }
}

/// A full terminal grid snapshot, either viewport-only or all-lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub cols: usize,
    pub rows: usize,
    pub lines: Vec<WireLine>,
}

impl Snapshot {
    /// Build a snapshot from a set of VT lines, trimming trailing blank
    /// lines (used for the all-lines flavor; a no-op on a full viewport).
    pub fn from_lines(cols: usize, rows: usize, lines: &[Line]) -> Self {
        let mut wire: Vec<WireLine> = lines.iter().map(WireLine::from).collect();
        while wire.last().is_some_and(is_blank_line) {
            wire.pop();
        }
        Snapshot { cols, rows, lines: wire }
    }
}

fn is_blank_line(line: &WireLine) -> bool {
    line.spans.iter().all(|s| s.text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_color_roundtrips() {
        for c in [
            WireColor::Unset,
            WireColor::Default,
            WireColor::Indexed(42),
            WireColor::Rgb(0x12, 0x34, 0x56),
        ] {
            let json = serde_json::to_string(&c).unwrap();
            let back: WireColor = serde_json::from_str(&json).unwrap();
            assert_eq!(c, back);
        }
    }

    #[test]
    fn unset_color_serializes_as_null() {
        let json = serde_json::to_string(&WireColor::Unset).unwrap();
        assert_eq!(json, "null");
    }

    #[test]
    fn rgb_serializes_as_hex_string() {
        let json = serde_json::to_string(&WireColor::Rgb(255, 0, 128)).unwrap();
        assert_eq!(json, "\"#ff0080\"");
    }

    #[test]
    fn absent_bool_flags_are_omitted_from_wire_json() {
        let span = WireSpan {
            text: "hi".to_string(),
            fg: WireColor::Unset,
            bg: WireColor::Unset,
            bold: false,
            faint: false,
            italic: false,
            underline: false,
            strikethrough: false,
            blink: false,
            inverse: false,
        };
        let json = serde_json::to_value(&span).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("bold"));
        assert!(!obj.contains_key("italic"));
        assert_eq!(obj.get("text").unwrap(), "hi");
    }

    #[test]
    fn trailing_blank_lines_are_trimmed() {
        let blank = WireLine { wrapped: false, spans: vec![WireSpan {
            text: "   ".to_string(), fg: WireColor::Unset, bg: WireColor::Unset,
            bold: false, faint: false, italic: false, underline: false,
            strikethrough: false, blink: false, inverse: false,
        }] };
        let content = WireLine { wrapped: false, spans: vec![WireSpan {
            text: "hi".to_string(), fg: WireColor::Unset, bg: WireColor::Unset,
            bold: false, faint: false, italic: false, underline: false,
            strikethrough: false, blink: false, inverse: false,
        }] };
        let mut lines = vec![content.clone(), blank.clone(), blank];
        while lines.last().is_some_and(is_blank_line) {
            lines.pop();
        }
        assert_eq!(lines, vec![content]);
    }
}
