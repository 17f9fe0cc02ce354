//! Picker sections and Tab cycling between them.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::palette::Palette;

/// A keyboard-focusable region of the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Custom,
    BaseColors,
    Shades,
    Hex,
}

impl Section {
    /// Tab order.
    pub const ORDER: [Section; 4] = [
        Section::Custom,
        Section::BaseColors,
        Section::Shades,
        Section::Hex,
    ];

    /// Whether arrow keys move within this section.
    pub fn is_grid(self) -> bool {
        !matches!(self, Section::Hex)
    }
}

/// Which conditional sections can currently take focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    /// There is at least one custom color.
    pub custom: bool,
    /// The current color sits on a shade ramp.
    pub shades: bool,
}

impl Eligibility {
    pub fn new(color: Option<&Color>, palette: &Palette, custom_colors: &[Color]) -> Self {
        Self {
            custom: !custom_colors.is_empty(),
            shades: color
                .and_then(|c| palette.classify(c))
                .is_some_and(|m| m.shade.is_some()),
        }
    }

    pub fn allows(self, section: Section) -> bool {
        match section {
            Section::Custom => self.custom,
            Section::Shades => self.shades,
            Section::BaseColors | Section::Hex => true,
        }
    }

    /// Eligible sections in Tab order.
    pub fn sections(self) -> Vec<Section> {
        Section::ORDER
            .into_iter()
            .filter(|s| self.allows(*s))
            .collect()
    }
}

/// Section to focus when the picker opens on `color`.
pub fn initial_section(color: Option<&Color>, palette: &Palette, custom_colors: &[Color]) -> Section {
    let Some(color) = color else {
        return Section::BaseColors;
    };

    match palette.classify(color) {
        None if custom_colors.contains(color) => Section::Custom,
        None => Section::Hex,
        Some(m) if m.shade.is_some() => Section::Shades,
        Some(_) => Section::BaseColors,
    }
}

/// Result of a Tab keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabTransition {
    /// Newly active section.
    pub section: Section,
    /// Color to commit on entering the section, if any.
    pub color: Option<Color>,
}

/// Move to the next (or previous) eligible section.
///
/// A current section that is unset or no longer eligible counts as sitting
/// just before the first entry, so Tab enters the first eligible section
/// and Shift+Tab the last one.
pub fn tab(
    current: Option<Section>,
    color: &Color,
    palette: &Palette,
    custom_colors: &[Color],
    fallback: Color,
    reverse: bool,
) -> Option<TabTransition> {
    let sections = Eligibility::new(Some(color), palette, custom_colors).sections();
    if sections.is_empty() {
        return None;
    }

    let len = sections.len() as isize;
    let position = current
        .and_then(|s| sections.iter().position(|x| *x == s))
        .map_or(-1, |i| i as isize);
    let offset = if reverse { -1 } else { 1 };
    let next = position + offset;
    let next = if next >= len {
        0
    } else if next < 0 {
        len - 1
    } else {
        next
    };
    let section = sections[next as usize];

    let color = match section {
        Section::Custom => custom_colors.first().copied(),
        Section::BaseColors if palette.classify(color).is_none() => Some(fallback),
        _ => None,
    };

    log::debug!("tab {:?} -> {:?}", current, section);
    Some(TabTransition { section, color })
}
