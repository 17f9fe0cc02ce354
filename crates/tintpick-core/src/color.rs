//! Color values accepted by the picker.
//!
//! A [`Color`] is either an opaque RGB triple (rendered as `#rrggbb`) or the
//! `transparent` sentinel. Anything typed by the user goes through
//! [`normalize`] before it can become a `Color`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::PickerError;

/// Name of the transparent sentinel.
pub const TRANSPARENT: &str = "transparent";

/// A validated picker color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Opaque color.
    Rgb([u8; 3]),
    /// The `transparent` sentinel.
    Transparent,
}

impl Color {
    pub const BLACK: Color = Color::Rgb([0, 0, 0]);
    pub const WHITE: Color = Color::Rgb([255, 255, 255]);

    /// Create an opaque color from RGB components.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb([r, g, b])
    }

    /// RGB components, or `None` for transparent.
    pub const fn rgb(&self) -> Option<[u8; 3]> {
        match self {
            Self::Rgb(rgb) => Some(*rgb),
            Self::Transparent => None,
        }
    }

    pub const fn is_transparent(&self) -> bool {
        matches!(self, Self::Transparent)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb([r, g, b]) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
            Self::Transparent => f.write_str(TRANSPARENT),
        }
    }
}

impl FromStr for Color {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s).ok_or_else(|| PickerError::InvalidColor(s.to_string()))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Normalize user input into a [`Color`].
///
/// The input is lower-cased. The transparent sentinel passes through as is.
/// Otherwise the `#`-prefixed form is tried before the raw form, so that a
/// bare hex string such as `"abc"` is always read as `#aabbcc`.
pub fn normalize(input: &str) -> Option<Color> {
    let value = input.to_lowercase();
    if value == TRANSPARENT {
        return Some(Color::Transparent);
    }

    renderable(&format!("#{}", value)).or_else(|| renderable(&value))
}

/// Convert a sampled pixel into a color.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgb(r, g, b)
}

/// Parse anything a CSS engine would render. Fully transparent values map to
/// the sentinel; partially transparent values are rejected.
fn renderable(candidate: &str) -> Option<Color> {
    let parsed = csscolorparser::parse(candidate).ok()?;
    match parsed.to_rgba8() {
        [_, _, _, 0] => Some(Color::Transparent),
        [r, g, b, 255] => Some(Color::from_rgb(r, g, b)),
        _ => None,
    }
}
