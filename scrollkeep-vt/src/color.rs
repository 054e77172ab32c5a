//! Cell color and attribute types.
//!
//! Mirrors the tagged color value used by the snapshot wire format: a
//! cell's foreground/background is either unset, an explicit default, a
//! 256-color index, or truecolor RGB. Intensity (Normal/Bold/Faint) is kept
//! out of the attribute bitfield deliberately — folding Bold into the same
//! bits as italic/underline/etc. is the exact bug this split exists to avoid.

use serde::{Deserialize, Serialize};

/// A cell or pen color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    /// No color set; render with the theme's default.
    None,
    /// Explicit "use the terminal's default foreground".
    DefaultFg,
    /// Explicit "use the terminal's default background".
    DefaultBg,
    /// 256-color palette index.
    Indexed(u8),
    /// Truecolor RGB.
    Rgb(u8, u8, u8),
}

impl Default for Color {
    fn default() -> Self {
        Color::None
    }
}

impl From<avt::Color> for Color {
    fn from(c: avt::Color) -> Self {
        match c {
            avt::Color::Indexed(n) => Color::Indexed(n),
            avt::Color::RGB(rgb) => Color::Rgb(rgb.0, rgb.1, rgb.2),
        }
    }
}

/// Text intensity. Kept separate from [`AttrFlags`] — see module docs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Intensity {
    #[default]
    Normal,
    Bold,
    Faint,
}

/// Boolean text attributes, packed into a single byte.
///
/// Bit layout matches the persisted snapshot schema: italic is bit 0,
/// underline bit 1, strikethrough bit 2, blink bit 3, inverse bit 4.
/// Bold/Faint are carried by [`Intensity`], never by this bitfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttrFlags(u8);

impl AttrFlags {
    pub const ITALIC: u8 = 1 << 0;
    pub const UNDERLINE: u8 = 1 << 1;
    pub const STRIKETHROUGH: u8 = 1 << 2;
    pub const BLINK: u8 = 1 << 3;
    pub const INVERSE: u8 = 1 << 4;

    pub fn new() -> Self {
        Self(0)
    }

    pub fn set(&mut self, bit: u8, value: bool) {
        if value {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
    }

    fn has(self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    pub fn italic(self) -> bool {
        self.has(Self::ITALIC)
    }

    pub fn underline(self) -> bool {
        self.has(Self::UNDERLINE)
    }

    pub fn strikethrough(self) -> bool {
        self.has(Self::STRIKETHROUGH)
    }

    pub fn blink(self) -> bool {
        self.has(Self::BLINK)
    }

    pub fn inverse(self) -> bool {
        self.has(Self::INVERSE)
    }
}

/// The full set of style attributes applied to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pen {
    pub fg: Color,
    pub bg: Color,
    pub intensity: Intensity,
    pub attrs: AttrFlags,
}

impl From<&avt::Pen> for Pen {
    fn from(pen: &avt::Pen) -> Self {
        let mut attrs = AttrFlags::new();
        attrs.set(AttrFlags::ITALIC, pen.is_italic());
        attrs.set(AttrFlags::UNDERLINE, pen.is_underline());
        attrs.set(AttrFlags::STRIKETHROUGH, pen.is_strikethrough());
        attrs.set(AttrFlags::BLINK, pen.is_blink());
        attrs.set(AttrFlags::INVERSE, pen.is_inverse());

        let intensity = if pen.is_bold() {
            Intensity::Bold
        } else if pen.is_faint() {
            Intensity::Faint
        } else {
            Intensity::Normal
        };

        Pen {
            fg: pen.foreground().map(Color::from).unwrap_or(Color::None),
            bg: pen.background().map(Color::from).unwrap_or(Color::None),
            intensity,
            attrs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_flags_italic_is_bit_zero() {
        let mut attrs = AttrFlags::new();
        attrs.set(AttrFlags::ITALIC, true);
        assert!(attrs.italic());
        assert!(!attrs.underline());
    }

    #[test]
    fn bold_never_sets_attr_bits() {
        // The intensity trap: bold/faint must never leak into the attribute
        // bitfield, even though some VT libraries pack them together.
        let mut attrs = AttrFlags::new();
        attrs.set(AttrFlags::UNDERLINE, true);
        let pen = Pen {
            fg: Color::None,
            bg: Color::None,
            intensity: Intensity::Bold,
            attrs,
        };
        assert_eq!(pen.intensity, Intensity::Bold);
        assert!(!pen.attrs.italic());
        assert!(pen.attrs.underline());
    }
}
