//! Keyboard navigation for the picker content.
//!
//! [`key_nav`] is a pure function from (keystroke, picker state) to the
//! changes the picker controller should apply. It never touches the state
//! itself, which keeps every transition visible to tests.

use crate::color::Color;
use crate::config::PickerConfig;
use crate::grid::{self, ArrowKey};
use crate::hotkeys::{self, HotkeyBindings};
use crate::input::{KeyInput, ModifierKey};
use crate::palette::Palette;
use crate::section::{self, Section};

/// Picker state a keystroke is resolved against.
#[derive(Debug, Clone, Copy)]
pub struct NavState<'a> {
    pub palette: &'a Palette,
    pub config: &'a PickerConfig,
    pub bindings: &'a HotkeyBindings,
    pub custom_colors: &'a [Color],
    pub color: Option<Color>,
    pub section: Option<Section>,
    pub active_shade: usize,
}

/// Changes requested by one keystroke.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavOutcome {
    /// New active section.
    pub section: Option<Section>,
    /// Color to commit.
    pub color: Option<Color>,
    /// Flip the eyedropper.
    pub toggle_eyedropper: bool,
    /// Open the eyedropper in keep-open mode.
    pub hold_eyedropper: bool,
    /// Escape was pressed.
    pub escape: bool,
    /// Ask the popup host to close the picker.
    pub close_popup: bool,
}

/// Resolve a keydown inside the picker content.
pub fn key_nav(input: KeyInput, state: &NavState<'_>) -> NavOutcome {
    let mut outcome = NavOutcome::default();

    match input {
        KeyInput::Escape => {
            outcome.escape = true;
            return outcome;
        }
        KeyInput::Modifier(ModifierKey::Alt) => {
            outcome.hold_eyedropper = true;
            return outcome;
        }
        _ => {}
    }

    let Some(color) = state.color else {
        outcome.close_popup = true;
        return outcome;
    };

    if input == KeyInput::Char(state.config.eyedropper_key) {
        outcome.toggle_eyedropper = true;
    }

    if let KeyInput::Tab { reverse } = input {
        if let Some(t) = section::tab(
            state.section,
            &color,
            state.palette,
            state.custom_colors,
            state.config.fallback_color,
            reverse,
        ) {
            outcome.section = Some(t.section);
            outcome.color = t.color;
        }
        return outcome;
    }

    let mut active = state.section;
    let mut current = color;
    if let Some(selection) = hotkeys::dispatch(
        &input,
        &color,
        state.palette,
        state.custom_colors,
        state.bindings,
        state.active_shade,
    ) {
        active = Some(selection.section);
        current = selection.color;
        outcome.section = Some(selection.section);
        outcome.color = Some(selection.color);
    }

    if let (KeyInput::Arrow(arrow), Some(active)) = (input, active) {
        if let Some(next) = navigate(active, arrow, &current, state) {
            outcome.color = Some(next);
        }
    }

    outcome
}

/// Arrow movement inside a grid section. `None` means no move.
fn navigate(section: Section, arrow: ArrowKey, color: &Color, state: &NavState<'_>) -> Option<Color> {
    let per_row = state.config.colors_per_row;
    match section {
        Section::Shades => {
            let m = state.palette.classify(color)?;
            let shade = m.shade?;
            let (_, entry) = state.palette.entry(m.index)?;
            let count = entry.shades()?.len();
            let next = grid::arrow(arrow, Some(shade), count, per_row)?;
            state.palette.shade(m.index, next)
        }
        Section::BaseColors => {
            let m = state.palette.classify(color)?;
            let next = grid::arrow(arrow, Some(m.index), state.palette.len(), per_row)?;
            let (_, entry) = state.palette.entry(next)?;
            entry.color_at(state.active_shade)
        }
        Section::Custom => {
            let current = state.custom_colors.iter().position(|c| c == color);
            let next = grid::arrow(arrow, current, state.custom_colors.len(), per_row)?;
            state.custom_colors.get(next).copied()
        }
        Section::Hex => None,
    }
}
