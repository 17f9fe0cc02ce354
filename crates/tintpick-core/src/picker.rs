//! Picker popup controller.
//!
//! [`ColorPicker`] owns all per-popup state: the active section, the active
//! shade, the custom colors, the hex field and the eyedropper session. The
//! popup host and the color sink are passed in per call through
//! [`PickerHost`]; nothing here is global.

use kurbo::Point;
use serde::{Deserialize, Serialize};

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

use crate::color::Color;
use crate::config::PickerConfig;
use crate::custom::{ColoredElement, most_used_custom_colors};
use crate::error::PickerResult;
use crate::eyedropper::{EyeDropperSession, PixelCanvas, SelectCallback, SelectionSink};
use crate::hex_input::HexInput;
use crate::hotkeys::HotkeyBindings;
use crate::input::{KeyInput, ModifierKey, PointerEvent};
use crate::keyboard::{NavState, key_nav};
use crate::listeners::{ListenerKind, ListenerOptions, ListenerRegistry, Subscription};
use crate::palette::Palette;
use crate::section::{Section, initial_section};

/// Which property a picker edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickerType {
    ElementStroke,
    ElementBackground,
    CanvasBackground,
}

impl PickerType {
    /// Element color the picker writes.
    pub fn role(self) -> ColorRole {
        match self {
            Self::ElementStroke => ColorRole::Stroke,
            Self::ElementBackground | Self::CanvasBackground => ColorRole::Background,
        }
    }
}

/// An element color slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorRole {
    Stroke,
    Background,
}

/// Where keyboard focus sits inside the popup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    /// The swatch area; keystrokes go to section navigation.
    #[default]
    Content,
    /// The hex text field; keystrokes other than Tab and Escape are text.
    HexInput,
}

/// Outbound interface of the picker.
pub trait PickerHost {
    /// Commit a new color.
    fn on_change(&mut self, color: Color);

    /// Open or close a picker popup.
    fn update_data(&mut self, open_popup: Option<PickerType>);
}

/// State that lives exactly as long as the popup is open.
#[derive(Debug)]
struct Popup {
    color: Option<Color>,
    section: Option<Section>,
    active_shade: usize,
    custom_colors: Vec<Color>,
    hex_input: HexInput,
    focus: Focus,
    /// Hex field refocus pending after an eyedropper press.
    refocus_at: Option<Instant>,
    _key_up: Subscription,
}

/// Controller for one picker (stroke, background or canvas).
#[derive(Debug)]
pub struct ColorPicker {
    picker_type: PickerType,
    palette: Palette,
    config: PickerConfig,
    bindings: HotkeyBindings,
    listeners: ListenerRegistry,
    popup: Option<Popup>,
    eyedropper: Option<EyeDropperSession>,
}

impl ColorPicker {
    /// Create a picker. Fails when the config does not fit the palette.
    pub fn new(
        picker_type: PickerType,
        palette: Palette,
        config: PickerConfig,
        listeners: ListenerRegistry,
    ) -> PickerResult<Self> {
        config.validate_for(&palette)?;
        Ok(Self {
            picker_type,
            bindings: HotkeyBindings::from(config.hotkeys.as_slice()),
            palette,
            config,
            listeners,
            popup: None,
            eyedropper: None,
        })
    }

    pub fn picker_type(&self) -> PickerType {
        self.picker_type
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    // --- Popup lifecycle ---

    /// Open the popup on `color`. Custom colors are computed once, here.
    pub fn open<E: ColoredElement>(&mut self, color: Option<Color>, elements: &[E]) {
        let custom_colors = most_used_custom_colors(
            elements,
            self.picker_type,
            &self.palette,
            self.config.max_custom_colors,
        );
        let section = initial_section(color.as_ref(), &self.palette, &custom_colors);
        let default_shade = match self.picker_type.role() {
            ColorRole::Stroke => self.config.default_stroke_shade,
            ColorRole::Background => self.config.default_background_shade,
        };
        let focus = if section == Section::Hex {
            Focus::HexInput
        } else {
            Focus::Content
        };

        log::debug!(
            "{:?} picker open on {:?}, section {:?}, {} custom colors",
            self.picker_type,
            color,
            section,
            custom_colors.len()
        );

        let mut popup = Popup {
            color,
            section: Some(section),
            active_shade: default_shade,
            custom_colors,
            hex_input: HexInput::new(color),
            focus,
            refocus_at: None,
            _key_up: self
                .listeners
                .subscribe(ListenerKind::KeyUp, ListenerOptions::CAPTURE),
        };
        self.follow_shade(&mut popup);
        self.popup = Some(popup);
    }

    /// Close the popup. Drops the active section, any pending hex refocus and
    /// any eyedropper session, releasing their listeners.
    pub fn close(&mut self) {
        if self.popup.take().is_some() {
            log::debug!("{:?} picker closed", self.picker_type);
        }
        self.eyedropper = None;
    }

    pub fn is_open(&self) -> bool {
        self.popup.is_some()
    }

    /// The host changed the color (e.g. after committing it to the document).
    pub fn set_color(&mut self, color: Option<Color>) {
        let Some(mut popup) = self.popup.take() else {
            return;
        };
        popup.color = color;
        popup.hex_input.reset(color);
        self.follow_shade(&mut popup);
        self.popup = Some(popup);
    }

    // --- Queries ---

    pub fn color(&self) -> Option<Color> {
        self.popup.as_ref().and_then(|p| p.color)
    }

    pub fn active_section(&self) -> Option<Section> {
        self.popup.as_ref().and_then(|p| p.section)
    }

    pub fn active_shade(&self) -> Option<usize> {
        self.popup.as_ref().map(|p| p.active_shade)
    }

    pub fn custom_colors(&self) -> &[Color] {
        self.popup
            .as_ref()
            .map_or(&[][..], |p| p.custom_colors.as_slice())
    }

    pub fn hex_input(&self) -> Option<&HexInput> {
        self.popup.as_ref().map(|p| &p.hex_input)
    }

    pub fn focus(&self) -> Option<Focus> {
        self.popup.as_ref().map(|p| p.focus)
    }

    pub fn eyedropper(&self) -> Option<&EyeDropperSession> {
        self.eyedropper.as_ref()
    }

    pub fn hotkey_for(&self, palette_index: usize) -> Option<char> {
        self.bindings.key_for(palette_index)
    }

    // --- Keyboard ---

    /// Keydown inside the popup. Returns whether the event was consumed
    /// (default action and propagation suppressed).
    pub fn key_down(&mut self, input: KeyInput, host: &mut dyn PickerHost) -> bool {
        let Some(popup) = self.popup.as_ref() else {
            return false;
        };
        if popup.focus == Focus::HexInput && !input.is_focus_key() {
            // Text for the hex field
            return false;
        }

        let outcome = key_nav(
            input,
            &NavState {
                palette: &self.palette,
                config: &self.config,
                bindings: &self.bindings,
                custom_colors: &popup.custom_colors,
                color: popup.color,
                section: popup.section,
                active_shade: popup.active_shade,
            },
        );

        if outcome.escape {
            self.escape(host);
            return true;
        }
        if outcome.hold_eyedropper {
            self.toggle_eyedropper(Some(true));
            return true;
        }
        if outcome.close_popup {
            host.update_data(None);
            return true;
        }
        if outcome.toggle_eyedropper {
            self.toggle_eyedropper(None);
        }
        if let Some(section) = outcome.section {
            self.set_section(section);
        }
        if let Some(color) = outcome.color {
            self.commit(color, host);
        }
        true
    }

    /// Keyup from the document-level listener held while the popup is open.
    pub fn key_up(&mut self, input: KeyInput) {
        if self.popup.is_some() && input == KeyInput::Modifier(ModifierKey::Alt) {
            self.toggle_eyedropper(Some(false));
        }
    }

    /// Escape: close the eyedropper first, then leave the hex field, and
    /// only then close the popup.
    fn escape(&mut self, host: &mut dyn PickerHost) {
        if self.eyedropper.take().is_some() {
            return;
        }
        match self.popup.as_mut() {
            Some(popup) if popup.focus == Focus::HexInput => {
                popup.focus = Focus::Content;
                popup.hex_input.reset(popup.color);
            }
            Some(_) => host.update_data(None),
            None => {}
        }
    }

    // --- Pointer on swatches ---

    /// A swatch in `section` was clicked.
    pub fn pick(&mut self, section: Section, color: Color, host: &mut dyn PickerHost) {
        if self.popup.is_none() {
            return;
        }
        self.set_section(section);
        self.commit(color, host);
    }

    // --- Hex field ---

    /// The hex field gained focus.
    pub fn focus_hex(&mut self) {
        if let Some(popup) = self.popup.as_mut() {
            popup.focus = Focus::HexInput;
            popup.section = Some(Section::Hex);
        }
    }

    /// The hex field lost focus; uncommitted text is discarded.
    pub fn blur_hex(&mut self) {
        if let Some(popup) = self.popup.as_mut() {
            popup.focus = Focus::Content;
            popup.hex_input.reset(popup.color);
        }
    }

    /// New hex field contents. Commits only valid colors; the raw text is
    /// kept either way.
    pub fn edit_hex(&mut self, text: &str, host: &mut dyn PickerHost) {
        let Some(mut popup) = self.popup.take() else {
            return;
        };
        let committed = popup.hex_input.edit(text);
        if let Some(color) = committed {
            popup.color = Some(color);
            self.follow_shade(&mut popup);
        }
        self.popup = Some(popup);
        if let Some(color) = committed {
            host.on_change(color);
        }
    }

    // --- Eyedropper ---

    /// Toggle the eyedropper. `Some(true)` opens it in keep-open mode
    /// (leaving an existing keep-open session alone), `Some(false)` closes
    /// it, `None` flips it, opening in single-shot mode.
    pub fn toggle_eyedropper(&mut self, force: Option<bool>) {
        if self.popup.is_none() {
            return;
        }
        match force {
            Some(true) => {
                if !self.eyedropper.as_ref().is_some_and(|s| s.keep_open()) {
                    self.open_eyedropper(true, None);
                }
            }
            Some(false) => self.eyedropper = None,
            None => {
                if self.eyedropper.take().is_none() {
                    self.open_eyedropper(false, None);
                }
            }
        }
    }

    /// Open an eyedropper session, replacing any open one. Without
    /// `on_select` selections are committed through the host.
    pub fn open_eyedropper(&mut self, keep_open: bool, on_select: Option<SelectCallback>) {
        if self.popup.is_none() {
            return;
        }
        // Release the old session's listeners before subscribing again
        self.eyedropper = None;
        self.eyedropper = Some(EyeDropperSession::open(
            &self.listeners,
            keep_open,
            on_select,
            self.picker_type.role(),
            self.config.preview_offset,
        ));
    }

    /// Pointer moved while eyedropping. Returns the sampled color.
    pub fn pointer_move(
        &mut self,
        position: Point,
        canvas: Option<&dyn PixelCanvas>,
        selection: &mut dyn SelectionSink,
    ) -> Option<Color> {
        self.eyedropper
            .as_mut()?
            .pointer_move(position, canvas, selection)
    }

    /// Pointer pressed while eyedropping. Returns true when the event must
    /// not propagate to the canvas. Schedules the hex field refocus, which
    /// outlives the session and is dropped only with the popup.
    pub fn pointer_down(&mut self, now: Instant) -> bool {
        let Some(session) = self.eyedropper.as_mut() else {
            return false;
        };
        session.pointer_down();
        if let Some(popup) = self.popup.as_mut() {
            popup.refocus_at = Some(now + self.config.refocus_delay());
        }
        true
    }

    /// Pointer released while eyedropping: select the last sample and close
    /// the session unless it is in keep-open mode.
    pub fn pointer_up(&mut self, host: &mut dyn PickerHost) -> Option<Color> {
        let session = self.eyedropper.as_mut()?;
        let picked = session.pointer_up();
        let keep_open = session.keep_open();
        let commit = picked.and_then(|color| session.select(color));

        if !keep_open {
            self.eyedropper = None;
        }
        if let Some(color) = commit {
            self.commit(color, host);
        }
        picked
    }

    /// Route a pointer event from the canvas backdrop to the eyedropper.
    /// Returns true when the event must not reach the canvas.
    pub fn pointer_event(
        &mut self,
        event: PointerEvent,
        now: Instant,
        canvas: Option<&dyn PixelCanvas>,
        selection: &mut dyn SelectionSink,
        host: &mut dyn PickerHost,
    ) -> bool {
        if self.eyedropper.is_none() {
            return false;
        }
        match event {
            PointerEvent::Move { position } => {
                self.pointer_move(position, canvas, selection);
                false
            }
            PointerEvent::Down { .. } => self.pointer_down(now),
            PointerEvent::Up { .. } => {
                self.pointer_up(host);
                true
            }
        }
    }

    /// Pointer pressed outside the preview marker, backdrop and trigger.
    pub fn outside_click(&mut self) {
        if self.eyedropper.take().is_some() {
            log::debug!("eyedropper cancelled by outside click");
        }
    }

    /// Advance timers. Fires the deferred hex field refocus once.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(popup) = self.popup.as_mut() else {
            return false;
        };
        match popup.refocus_at {
            Some(at) if now >= at => {
                popup.refocus_at = None;
                self.focus_hex();
                true
            }
            _ => false,
        }
    }

    // --- Internals ---

    fn set_section(&mut self, section: Section) {
        if let Some(popup) = self.popup.as_mut() {
            popup.section = Some(section);
            popup.focus = if section == Section::Hex {
                Focus::HexInput
            } else {
                Focus::Content
            };
        }
    }

    /// Update local state for `color`, then notify the host last.
    fn commit(&mut self, color: Color, host: &mut dyn PickerHost) {
        if let Some(mut popup) = self.popup.take() {
            popup.color = Some(color);
            popup.hex_input.reset(Some(color));
            self.follow_shade(&mut popup);
            self.popup = Some(popup);
        }
        host.on_change(color);
    }

    /// The active shade tracks the current color when it sits on a ramp.
    fn follow_shade(&self, popup: &mut Popup) {
        if let Some(shade) = popup
            .color
            .and_then(|c| self.palette.classify(&c))
            .and_then(|m| m.shade)
        {
            popup.active_shade = shade;
        }
    }
}
