//! Single-keystroke color selection.

use crate::color::Color;
use crate::input::KeyInput;
use crate::palette::Palette;
use crate::section::Section;

/// Digits 1 through this value act as hotkeys.
pub const DIGIT_HOTKEYS: u8 = 5;

/// One character per base palette entry, in palette order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyBindings {
    keys: Vec<char>,
}

impl HotkeyBindings {
    pub fn new(keys: Vec<char>) -> Self {
        Self { keys }
    }

    /// Palette position bound to `key`.
    pub fn index_of(&self, key: char) -> Option<usize> {
        self.keys.iter().position(|k| *k == key)
    }

    /// Key bound to the palette entry at `index`.
    pub fn key_for(&self, index: usize) -> Option<char> {
        self.keys.get(index).copied()
    }
}

impl From<&[char]> for HotkeyBindings {
    fn from(keys: &[char]) -> Self {
        Self::new(keys.to_vec())
    }
}

/// A color picked by hotkey, and the section it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeySelection {
    pub color: Color,
    pub section: Section,
}

/// Resolve a hotkey against the current picker state.
///
/// - Shift+digit picks a shade of the current color's ramp.
/// - A digit picks a custom color.
/// - A bound character picks a base palette entry at the active shade.
///
/// A shifted digit key that also types a digit goes through both digit
/// rules in that order; the custom color wins when both match.
pub fn dispatch(
    input: &KeyInput,
    color: &Color,
    palette: &Palette,
    custom_colors: &[Color],
    bindings: &HotkeyBindings,
    active_shade: usize,
) -> Option<HotkeySelection> {
    let selection = match *input {
        KeyInput::ShiftDigit {
            digit,
            produced_digit,
        } => produced_digit
            .and_then(|d| custom_pick(d, custom_colors))
            .or_else(|| shade_pick(digit, color, palette)),
        KeyInput::Digit(digit) => custom_pick(digit, custom_colors),
        KeyInput::Char(key) => {
            let index = bindings.index_of(key)?;
            let (_, entry) = palette.entry(index)?;
            Some(HotkeySelection {
                color: entry.color_at(active_shade)?,
                section: Section::BaseColors,
            })
        }
        _ => None,
    }?;

    log::debug!("hotkey {:?} -> {} ({:?})", input, selection.color, selection.section);
    Some(selection)
}

fn shade_pick(digit: u8, color: &Color, palette: &Palette) -> Option<HotkeySelection> {
    if !(1..=DIGIT_HOTKEYS).contains(&digit) {
        return None;
    }
    let m = palette.classify(color)?;
    m.shade?;
    Some(HotkeySelection {
        color: palette.shade(m.index, usize::from(digit - 1))?,
        section: Section::Shades,
    })
}

fn custom_pick(digit: u8, custom_colors: &[Color]) -> Option<HotkeySelection> {
    if !(1..=DIGIT_HOTKEYS).contains(&digit) {
        return None;
    }
    Some(HotkeySelection {
        color: *custom_colors.get(usize::from(digit - 1))?,
        section: Section::Custom,
    })
}
