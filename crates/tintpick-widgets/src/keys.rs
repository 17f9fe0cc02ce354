//! egui keyboard events to picker keystrokes.

use egui::{Event, Key};
use tintpick_core::{ArrowKey, KeyInput, ModifierKey};

/// Classify a key press. Shortcuts with Ctrl or Cmd are not picker keys.
pub fn key_input(key: Key, physical_key: Option<Key>, modifiers: egui::Modifiers) -> KeyInput {
    if modifiers.command || modifiers.ctrl {
        return KeyInput::Other;
    }

    match key {
        Key::Tab => return KeyInput::Tab {
            reverse: modifiers.shift,
        },
        Key::Escape => return KeyInput::Escape,
        Key::ArrowLeft => return KeyInput::Arrow(ArrowKey::Left),
        Key::ArrowRight => return KeyInput::Arrow(ArrowKey::Right),
        Key::ArrowUp => return KeyInput::Arrow(ArrowKey::Up),
        Key::ArrowDown => return KeyInput::Arrow(ArrowKey::Down),
        _ => {}
    }

    // Digits are read from the physical key so Shift+1 is not "!"
    if let Some(physical) = digit(physical_key.unwrap_or(key)) {
        return if modifiers.shift {
            KeyInput::ShiftDigit {
                digit: physical,
                produced_digit: digit(key),
            }
        } else {
            KeyInput::Digit(physical)
        };
    }

    let mut chars = key.name().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => KeyInput::Char(if modifiers.shift {
            c.to_ascii_uppercase()
        } else {
            c.to_ascii_lowercase()
        }),
        _ => KeyInput::Other,
    }
}

fn digit(key: Key) -> Option<u8> {
    Some(match key {
        Key::Num0 => 0,
        Key::Num1 => 1,
        Key::Num2 => 2,
        Key::Num3 => 3,
        Key::Num4 => 4,
        Key::Num5 => 5,
        Key::Num6 => 6,
        Key::Num7 => 7,
        Key::Num8 => 8,
        Key::Num9 => 9,
        _ => return None,
    })
}

/// Key presses in one frame's events.
pub fn key_presses(events: &[Event]) -> Vec<KeyInput> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Key {
                key,
                physical_key,
                pressed: true,
                modifiers,
                ..
            } => Some(key_input(*key, *physical_key, *modifiers)),
            _ => None,
        })
        .filter(|input| *input != KeyInput::Other)
        .collect()
}

/// egui reports modifiers as frame state, not as key events. The tracker
/// turns Alt state changes into keydown/keyup transitions.
#[derive(Debug, Default, Clone, Copy)]
pub struct AltTracker {
    down: bool,
}

/// A modifier transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltTransition {
    Pressed(KeyInput),
    Released(KeyInput),
}

impl AltTracker {
    /// Feed this frame's Alt state.
    pub fn update(&mut self, alt: bool) -> Option<AltTransition> {
        let was_down = std::mem::replace(&mut self.down, alt);
        let input = KeyInput::Modifier(ModifierKey::Alt);
        match (was_down, alt) {
            (false, true) => Some(AltTransition::Pressed(input)),
            (true, false) => Some(AltTransition::Released(input)),
            _ => None,
        }
    }
}
