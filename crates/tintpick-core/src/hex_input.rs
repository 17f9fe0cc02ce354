//! Hex text field model.
//!
//! The field keeps whatever the user typed, even when it is not a color yet.
//! Only text that normalizes to a [`Color`] is ever committed.

use crate::color::{Color, normalize};

/// Raw text buffer of the hex field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HexInput {
    buffer: String,
}

impl HexInput {
    pub fn new(color: Option<Color>) -> Self {
        let mut input = Self::default();
        input.reset(color);
        input
    }

    /// Replace the buffer with new field contents. Returns the color to
    /// commit, if the text is one.
    pub fn edit(&mut self, text: &str) -> Option<Color> {
        let value = text.to_lowercase();
        let color = normalize(&value);
        self.buffer = value;
        color
    }

    /// Discard uncommitted text and show `color` again.
    pub fn reset(&mut self, color: Option<Color>) {
        self.buffer = color.map(|c| c.to_string()).unwrap_or_default();
    }

    /// Raw buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Text shown in the field; the `#` is drawn outside it.
    pub fn display(&self) -> &str {
        self.buffer.strip_prefix('#').unwrap_or(&self.buffer)
    }
}
