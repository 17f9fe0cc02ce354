//! Read-only palette lookup.
//!
//! A palette is an ordered list of named entries. Each entry is either a
//! single color or an ordered ramp of shades. Order matters: it drives the
//! base-color grid layout and the hotkey assignment.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

use crate::color::Color;
use crate::error::{PickerError, PickerResult};

/// Shade positions picked from each open-color ramp.
const OPEN_COLOR_SHADES: [usize; 5] = [0, 2, 4, 6, 8];

/// A palette entry: one color, or a ramp of shades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaletteEntry {
    Scalar(Color),
    Shades(Vec<Color>),
}

impl PaletteEntry {
    /// Color shown for this entry in the base grid, given the active shade.
    pub fn color_at(&self, active_shade: usize) -> Option<Color> {
        match self {
            Self::Scalar(color) => Some(*color),
            Self::Shades(shades) => shades.get(active_shade).copied(),
        }
    }

    pub fn shades(&self) -> Option<&[Color]> {
        match self {
            Self::Scalar(_) => None,
            Self::Shades(shades) => Some(shades),
        }
    }

    fn contains(&self, color: &Color) -> Option<Option<usize>> {
        match self {
            Self::Scalar(value) => (value == color).then_some(None),
            Self::Shades(shades) => shades.iter().position(|c| c == color).map(Some),
        }
    }
}

/// Where a color sits in the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteMatch<'a> {
    /// Entry name.
    pub name: &'a str,
    /// Entry position in palette order.
    pub index: usize,
    /// Shade position, `None` for scalar entries.
    pub shade: Option<usize>,
}

/// An immutable, ordered palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<(String, PaletteEntry)>,
}

impl Palette {
    /// Build a palette, rejecting empty palettes, empty shade ramps and
    /// duplicate names.
    pub fn new(entries: Vec<(String, PaletteEntry)>) -> PickerResult<Self> {
        if entries.is_empty() {
            return Err(PickerError::EmptyPalette);
        }

        let mut seen = HashSet::new();
        for (name, entry) in &entries {
            if !seen.insert(name.as_str()) {
                return Err(PickerError::DuplicatePaletteEntry(name.clone()));
            }
            if matches!(entry, PaletteEntry::Shades(shades) if shades.is_empty()) {
                return Err(PickerError::EmptyShades(name.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// Load a palette from a JSON object (`{"name": "#hex" | ["#hex", ...]}`).
    pub fn from_json(json: &str) -> PickerResult<Self> {
        let palette: Palette = serde_json::from_str(json)?;
        Ok(palette)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at a palette position.
    pub fn entry(&self, index: usize) -> Option<(&str, &PaletteEntry)> {
        self.entries
            .get(index)
            .map(|(name, entry)| (name.as_str(), entry))
    }

    /// Entry by name.
    pub fn by_name(&self, name: &str) -> Option<&PaletteEntry> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PaletteEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Locate a color in the palette. The first matching entry wins.
    pub fn classify(&self, color: &Color) -> Option<PaletteMatch<'_>> {
        self.entries
            .iter()
            .enumerate()
            .find_map(|(index, (name, entry))| {
                entry.contains(color).map(|shade| PaletteMatch {
                    name,
                    index,
                    shade,
                })
            })
    }

    /// True when the color is not part of the palette.
    pub fn is_custom_color(&self, color: &Color) -> bool {
        self.classify(color).is_none()
    }

    /// Shade `shade` of the entry at `index`.
    pub fn shade(&self, index: usize, shade: usize) -> Option<Color> {
        self.entries
            .get(index)
            .and_then(|(_, entry)| entry.shades())
            .and_then(|shades| shades.get(shade).copied())
    }
}

impl Default for Palette {
    /// Open-color based drawing palette.
    fn default() -> Self {
        let ramp = |colors: [&str; 10]| {
            PaletteEntry::Shades(
                OPEN_COLOR_SHADES
                    .iter()
                    .map(|&i| hex(colors[i]))
                    .collect(),
            )
        };

        let entries = vec![
            ("transparent", PaletteEntry::Scalar(Color::Transparent)),
            ("black", PaletteEntry::Scalar(hex("#1e1e1e"))),
            ("white", PaletteEntry::Scalar(Color::WHITE)),
            ("gray", ramp(["#f8f9fa", "#f1f3f5", "#e9ecef", "#dee2e6", "#ced4da", "#adb5bd", "#868e96", "#495057", "#343a40", "#212529"])),
            ("red", ramp(["#fff5f5", "#ffe3e3", "#ffc9c9", "#ffa8a8", "#ff8787", "#ff6b6b", "#fa5252", "#f03e3e", "#e03131", "#c92a2a"])),
            ("pink", ramp(["#fff0f6", "#ffdeeb", "#fcc2d7", "#faa2c1", "#f783ac", "#f06595", "#e64980", "#d6336c", "#c2255c", "#a61e4d"])),
            ("grape", ramp(["#f8f0fc", "#f3d9fa", "#eebefa", "#e599f7", "#da77f2", "#cc5de8", "#be4bdb", "#ae3ec9", "#9c36b5", "#862e9c"])),
            ("violet", ramp(["#f3f0ff", "#e5dbff", "#d0bfff", "#b197fc", "#9775fa", "#845ef7", "#7950f2", "#7048e8", "#6741d9", "#5f3dc4"])),
            ("blue", ramp(["#e7f5ff", "#d0ebff", "#a5d8ff", "#74c0fc", "#4dabf7", "#339af0", "#228be6", "#1c7ed6", "#1971c2", "#1864ab"])),
            ("cyan", ramp(["#e3fafc", "#c5f6fa", "#99e9f2", "#66d9e8", "#3bc9db", "#22b8cf", "#15aabf", "#1098ad", "#0c8599", "#0b7285"])),
            ("teal", ramp(["#e6fcf5", "#c3fae8", "#96f2d7", "#63e6be", "#38d9a9", "#20c997", "#12b886", "#0ca678", "#099268", "#087f5b"])),
            ("green", ramp(["#ebfbee", "#d3f9d8", "#b2f2bb", "#8ce99a", "#69db7c", "#51cf66", "#40c057", "#37b24d", "#2f9e44", "#2b8a3e"])),
            ("yellow", ramp(["#fff9db", "#fff3bf", "#ffec99", "#ffe066", "#ffd43b", "#fcc419", "#fab005", "#f59f00", "#f08c00", "#e67700"])),
            ("orange", ramp(["#fff4e6", "#ffe8cc", "#ffd8a8", "#ffc078", "#ffa94d", "#ff922b", "#fd7e14", "#f76707", "#e8590c", "#d9480f"])),
            (
                "bronze",
                PaletteEntry::Shades(
                    ["#f8f1ee", "#eaddd7", "#d2bab0", "#a18072", "#846358"]
                        .into_iter()
                        .map(hex)
                        .collect(),
                ),
            ),
        ];

        Self {
            entries: entries
                .into_iter()
                .map(|(name, entry)| (name.to_string(), entry))
                .collect(),
        }
    }
}

/// Parse a built-in hex literal.
fn hex(value: &str) -> Color {
    let channel = |i: usize| u8::from_str_radix(&value[i..i + 2], 16).unwrap_or(0);
    Color::from_rgb(channel(1), channel(3), channel(5))
}

impl Serialize for Palette {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, entry) in &self.entries {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Palette {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PaletteVisitor;

        impl<'de> Visitor<'de> for PaletteVisitor {
            type Value = Palette;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of palette entry names to colors or shade lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Palette, A::Error> {
                let mut entries = Vec::new();
                while let Some((name, entry)) = access.next_entry::<String, PaletteEntry>()? {
                    entries.push((name, entry));
                }
                Palette::new(entries).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_map(PaletteVisitor)
    }
}
