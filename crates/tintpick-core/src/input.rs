//! Input events for the picker: classified keystrokes and pointer events.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::grid::ArrowKey;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// Pointer event in client (CSS pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            Self::Down { position, .. } | Self::Up { position, .. } | Self::Move { position } => {
                position
            }
        }
    }
}

/// Modifier keys that drive picker behavior on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKey {
    /// Held to eyedrop in keep-open mode.
    Alt,
}

/// A keystroke, classified by what the picker does with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyInput {
    /// Section cycling. `reverse` is Shift+Tab.
    Tab { reverse: bool },
    Escape,
    Arrow(ArrowKey),
    /// Shift held on a physical digit key. `produced_digit` is the digit
    /// the layout typed, if any (AZERTY types digits with Shift).
    ShiftDigit { digit: u8, produced_digit: Option<u8> },
    /// A plain digit character.
    Digit(u8),
    /// Any other single character.
    Char(char),
    Modifier(ModifierKey),
    Other,
}

impl KeyInput {
    /// Classify a DOM-style keystroke: `key` is the produced key value,
    /// `code` the physical key code (`"Digit1"`, `"KeyQ"`, ...).
    pub fn from_key(key: &str, code: &str, modifiers: Modifiers) -> Self {
        match key {
            "Tab" => return Self::Tab {
                reverse: modifiers.shift,
            },
            "Escape" => return Self::Escape,
            "Alt" => return Self::Modifier(ModifierKey::Alt),
            _ => {}
        }

        if let Some(arrow) = ArrowKey::from_key(key) {
            return Self::Arrow(arrow);
        }

        if modifiers.shift {
            if let Some(digit) = physical_digit(code) {
                return Self::ShiftDigit {
                    digit,
                    produced_digit: single_digit(key),
                };
            }
        }

        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => match c.to_digit(10) {
                Some(digit) => Self::Digit(digit as u8),
                None => Self::Char(c),
            },
            _ => Self::Other,
        }
    }

    /// Whether this keystroke is Tab or Escape, the keys a focused text
    /// field lets through.
    pub fn is_focus_key(&self) -> bool {
        matches!(self, Self::Tab { .. } | Self::Escape)
    }
}

/// Digit of a physical `DigitN` key code.
fn physical_digit(code: &str) -> Option<u8> {
    single_digit(code.strip_prefix("Digit")?)
}

fn single_digit(text: &str) -> Option<u8> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_digit(10).map(|d| d as u8),
        _ => None,
    }
}
