//! Picker popup panel and eyedropper preview marker.

use egui::{vec2, Area, Color32, Context, CursorIcon, Event, Id, Order, Pos2, Rect, Stroke, Ui};

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

use tintpick_core::{
    Color, ColorPicker, EyeDropperSession, Focus, KeyInput, PickerHost, Section,
};

use crate::colors::{ColorSwatch, SwatchStyle, to_color32};
use crate::keys::{self, AltTracker, AltTransition};
use crate::layout::{panel_frame, section_label, separator};
use crate::{sizing, theme};

/// Screen areas owned by the popup this frame.
#[derive(Debug, Clone, Copy)]
pub struct PopupResponse {
    /// The popup panel.
    pub rect: Rect,
    /// The eyedropper trigger button.
    pub trigger_rect: Option<Rect>,
}

impl PopupResponse {
    /// Whether a pointer press at `pos` belongs to the popup. Presses that do
    /// not, and that do not land on the canvas the eyedropper samples, should
    /// be reported with [`ColorPicker::outside_click`].
    pub fn contains(&self, pos: Pos2) -> bool {
        self.rect.contains(pos) || self.trigger_rect.is_some_and(|r| r.contains(pos))
    }
}

/// The picker popup for one [`ColorPicker`].
pub struct PickerPanel<'a> {
    picker: &'a mut ColorPicker,
    title: &'a str,
}

impl<'a> PickerPanel<'a> {
    pub fn new(picker: &'a mut ColorPicker, title: &'a str) -> Self {
        Self { picker, title }
    }

    /// Route this frame's keyboard input to the picker and draw the popup at
    /// `anchor`. Returns `None` when the picker is closed.
    pub fn show(
        self,
        ctx: &Context,
        anchor: Pos2,
        host: &mut dyn PickerHost,
    ) -> Option<PopupResponse> {
        if !self.picker.is_open() {
            return None;
        }
        let id = Id::new(("tintpick_popup", self.picker.picker_type()));

        handle_keys(ctx, id, self.picker, host);
        if self.picker.tick(Instant::now()) {
            log::debug!("hex field refocused after eyedropper click");
        }
        // The close may have come from a key handled above
        if !self.picker.is_open() {
            return None;
        }
        if self.picker.eyedropper().is_some() {
            ctx.request_repaint();
        }

        let mut trigger_rect = None;
        let area = Area::new(id)
            .fixed_pos(anchor)
            .order(Order::Foreground)
            .show(ctx, |ui| {
                panel_frame().show(ui, |ui| {
                    ui.set_width(sizing::POPUP_WIDTH);
                    ui.vertical(|ui| {
                        ui.spacing_mut().item_spacing = vec2(0.0, 4.0);
                        ui.label(
                            egui::RichText::new(self.title)
                                .size(12.0)
                                .color(theme::TEXT_MUTED),
                        );
                        ui.add_space(4.0);

                        let mut picked = None;
                        custom_row(ui, self.picker, &mut picked);
                        base_grid(ui, self.picker, &mut picked);
                        shade_row(ui, self.picker, &mut picked);
                        if let Some((section, color)) = picked {
                            self.picker.pick(section, color, host);
                        }

                        separator(ui);
                        trigger_rect = Some(hex_row(ui, self.picker, host));
                    });
                });
            });

        Some(PopupResponse {
            rect: area.response.rect,
            trigger_rect,
        })
    }
}

/// Feed key presses and Alt transitions to the picker, removing consumed
/// presses from the frame's events.
fn handle_keys(ctx: &Context, id: Id, picker: &mut ColorPicker, host: &mut dyn PickerHost) {
    let alt = ctx.input(|i| i.modifiers.alt);
    let transition = ctx.data_mut(|d| d.get_temp_mut_or_default::<AltTracker>(id).update(alt));
    match transition {
        Some(AltTransition::Pressed(input)) => {
            picker.key_down(input, host);
        }
        Some(AltTransition::Released(input)) => picker.key_up(input),
        None => {}
    }

    let presses = ctx.input(|i| keys::key_presses(&i.events));
    let mut consumed: Vec<KeyInput> = Vec::new();
    for input in presses {
        if !picker.is_open() {
            break;
        }
        if picker.key_down(input, host) {
            consumed.push(input);
        }
    }
    if consumed.is_empty() {
        return;
    }

    ctx.input_mut(|i| {
        i.events.retain(|event| match event {
            Event::Key {
                key,
                physical_key,
                modifiers,
                ..
            } => !consumed.contains(&keys::key_input(*key, *physical_key, *modifiers)),
            _ => true,
        })
    });
}

fn focus_in(picker: &ColorPicker, section: Section) -> bool {
    picker.active_section() == Some(section) && picker.focus() == Some(Focus::Content)
}

fn digit_hint(index: usize) -> Option<char> {
    u32::try_from(index + 1)
        .ok()
        .and_then(|d| char::from_digit(d, 10))
}

fn custom_row(ui: &mut Ui, picker: &ColorPicker, picked: &mut Option<(Section, Color)>) {
    if picker.custom_colors().is_empty() {
        return;
    }
    section_label(ui, "Most used custom colors");
    let current = picker.color();
    let focused = focus_in(picker, Section::Custom);
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing = vec2(6.0, 0.0);
        for (i, &color) in picker.custom_colors().iter().enumerate() {
            let label = color.to_string();
            let active = current == Some(color);
            let (clicked, _) = ColorSwatch::new(color, &label)
                .hint(digit_hint(i))
                .active(active)
                .focused(active && focused)
                .show(ui);
            if clicked {
                *picked = Some((Section::Custom, color));
            }
        }
    });
    ui.add_space(4.0);
}

fn base_grid(ui: &mut Ui, picker: &ColorPicker, picked: &mut Option<(Section, Color)>) {
    section_label(ui, "Colors");
    let palette = picker.palette();
    let per_row = picker.config().colors_per_row.max(1);
    let active_shade = picker.active_shade().unwrap_or_default();
    let current = picker.color();
    let current_index = current.and_then(|c| palette.classify(&c)).map(|m| m.index);
    let focused = focus_in(picker, Section::BaseColors);

    let entries: Vec<_> = palette.iter().enumerate().collect();
    for row in entries.chunks(per_row) {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing = vec2(6.0, 0.0);
            for &(index, (name, entry)) in row {
                let Some(color) = entry.color_at(active_shade).or_else(|| entry.color_at(0))
                else {
                    continue;
                };
                let active = current_index == Some(index);
                let (clicked, _) = ColorSwatch::new(color, name)
                    .hint(picker.hotkey_for(index))
                    .active(active)
                    .focused(active && focused)
                    .show(ui);
                if clicked {
                    *picked = Some((Section::BaseColors, color));
                }
            }
        });
    }
    ui.add_space(4.0);
}

fn shade_row(ui: &mut Ui, picker: &ColorPicker, picked: &mut Option<(Section, Color)>) {
    section_label(ui, "Shades");
    let palette = picker.palette();
    let ramp = picker
        .color()
        .and_then(|c| palette.classify(&c))
        .filter(|m| m.shade.is_some())
        .and_then(|m| palette.entry(m.index))
        .and_then(|(_, entry)| entry.shades());

    let Some(shades) = ramp else {
        ui.label(
            egui::RichText::new("No shades available for this color")
                .size(10.0)
                .color(theme::TEXT_MUTED),
        );
        return;
    };

    let current = picker.color();
    let focused = focus_in(picker, Section::Shades);
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing = vec2(6.0, 0.0);
        for (i, &color) in shades.iter().enumerate() {
            let label = color.to_string();
            let active = current == Some(color);
            let (clicked, _) = ColorSwatch::new(color, &label)
                .style(SwatchStyle::shade())
                .hint(digit_hint(i))
                .active(active)
                .focused(active && focused)
                .show(ui);
            if clicked {
                *picked = Some((Section::Shades, color));
            }
        }
    });
}

/// Hex text field with the eyedropper trigger. Returns the trigger rect.
fn hex_row(ui: &mut Ui, picker: &mut ColorPicker, host: &mut dyn PickerHost) -> Rect {
    section_label(ui, "Hex code");
    let mut text = picker
        .hex_input()
        .map(|h| h.display().to_owned())
        .unwrap_or_default();

    ui.horizontal(|ui| {
        ui.label("#");
        let response = ui.add(
            egui::TextEdit::singleline(&mut text)
                .desired_width(sizing::POPUP_WIDTH - 60.0)
                .lock_focus(true),
        );
        if response.gained_focus() {
            picker.focus_hex();
        }
        if response.changed() {
            picker.edit_hex(&text, host);
        }
        if response.lost_focus() {
            picker.blur_hex();
        }
        match picker.focus() {
            Some(Focus::HexInput) if !response.has_focus() => response.request_focus(),
            Some(Focus::Content) if response.has_focus() => response.surrender_focus(),
            _ => {}
        }

        let dropping = picker.eyedropper().is_some();
        let trigger = ui
            .selectable_label(dropping, "Pick")
            .on_hover_text("Pick color from canvas (I)");
        if trigger.clicked() {
            picker.toggle_eyedropper(None);
        }
        trigger.rect
    })
    .inner
}

/// Draw the eyedropper marker next to the pointer. Returns its rect once a
/// sample exists.
pub fn show_eyedropper_preview(ctx: &Context, session: &EyeDropperSession) -> Option<Rect> {
    ctx.set_cursor_icon(CursorIcon::Crosshair);
    let preview = session.preview()?;
    let pos = Pos2::new(preview.position.x as f32, preview.position.y as f32);
    let rect = Rect::from_min_size(pos, vec2(sizing::PREVIEW, sizing::PREVIEW));

    Area::new(Id::new("tintpick_eyedropper_preview"))
        .fixed_pos(pos)
        .order(Order::Tooltip)
        .interactable(false)
        .show(ctx, |ui| {
            let painter = ui.painter();
            let center = rect.center();
            let radius = sizing::PREVIEW / 2.0;
            painter.circle_filled(center, radius, to_color32(preview.color));
            painter.circle_stroke(center, radius, Stroke::new(2.0, Color32::WHITE));
            painter.circle_stroke(center, radius + 1.0, Stroke::new(1.0, theme::BORDER));
        });

    Some(rect)
}
