//! Color swatches.

use egui::{
    vec2, Align2, Color32, CornerRadius, CursorIcon, FontId, Pos2, Rect, Sense, Stroke,
    StrokeKind, Ui, Vec2,
};
use tintpick_core::Color;

use crate::{sizing, theme};

/// Convert a picker color for painting. Transparent maps to
/// `Color32::TRANSPARENT`.
pub fn to_color32(color: Color) -> Color32 {
    match color.rgb() {
        Some([r, g, b]) => Color32::from_rgb(r, g, b),
        None => Color32::TRANSPARENT,
    }
}

/// Style for color swatches.
#[derive(Clone)]
pub struct SwatchStyle {
    /// Size of the swatch
    pub size: Vec2,
    /// Corner radius of the swatch body
    pub corner_radius: u8,
}

impl Default for SwatchStyle {
    fn default() -> Self {
        Self {
            size: vec2(sizing::SWATCH, sizing::SWATCH),
            corner_radius: sizing::CORNER_RADIUS,
        }
    }
}

impl SwatchStyle {
    /// Smaller swatch for the shade row.
    pub fn shade() -> Self {
        Self {
            size: vec2(sizing::SHADE_SWATCH, sizing::SHADE_SWATCH),
            corner_radius: sizing::CORNER_RADIUS,
        }
    }
}

/// A clickable color swatch with an optional hotkey hint.
pub struct ColorSwatch<'a> {
    color: Color,
    tooltip: &'a str,
    hint: Option<char>,
    active: bool,
    focused: bool,
    style: SwatchStyle,
}

impl<'a> ColorSwatch<'a> {
    /// Create a new color swatch.
    pub fn new(color: Color, tooltip: &'a str) -> Self {
        Self {
            color,
            tooltip,
            hint: None,
            active: false,
            focused: false,
            style: SwatchStyle::default(),
        }
    }

    /// Hotkey drawn in the swatch corner.
    pub fn hint(mut self, hint: Option<char>) -> Self {
        self.hint = hint;
        self
    }

    /// The swatch holds the current color.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// The swatch holds the current color inside the active section.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set the style.
    pub fn style(mut self, style: SwatchStyle) -> Self {
        self.style = style;
        self
    }

    /// Show the swatch and return (clicked, rect).
    pub fn show(self, ui: &mut Ui) -> (bool, Rect) {
        let (rect, response) = ui.allocate_exact_size(self.style.size, Sense::click());

        if ui.is_rect_visible(rect) {
            let radius = CornerRadius::same(self.style.corner_radius);
            let painter = ui.painter();

            if self.color.is_transparent() {
                // White body with a red diagonal
                painter.rect_filled(rect, radius, Color32::WHITE);
                let inset = rect.shrink(rect.width() * 0.2);
                painter.line_segment(
                    [inset.left_bottom(), inset.right_top()],
                    Stroke::new(2.0, Color32::from_rgb(239, 68, 68)),
                );
            } else {
                painter.rect_filled(rect, radius, to_color32(self.color));
            }
            painter.rect_stroke(
                rect,
                radius,
                Stroke::new(1.0, Color32::from_black_alpha(25)),
                StrokeKind::Inside,
            );

            if self.active {
                painter.rect_stroke(
                    rect.expand(2.0),
                    radius,
                    Stroke::new(1.5, theme::ACTIVE_RING),
                    StrokeKind::Outside,
                );
            }
            if self.focused {
                painter.rect_stroke(
                    rect.expand(4.0),
                    radius,
                    Stroke::new(2.0, theme::ACCENT),
                    StrokeKind::Outside,
                );
            }

            if let Some(hint) = self.hint {
                painter.text(
                    Pos2::new(rect.right() - 2.0, rect.bottom() - 1.0),
                    Align2::RIGHT_BOTTOM,
                    hint.to_ascii_uppercase(),
                    FontId::proportional(8.0),
                    hint_color(self.color),
                );
            }
        }

        let clicked = response.clicked();
        response
            .on_hover_text(self.tooltip)
            .on_hover_cursor(CursorIcon::PointingHand);
        (clicked, rect)
    }
}

/// Hint text that stays readable on the swatch body.
fn hint_color(color: Color) -> Color32 {
    match color.rgb() {
        Some([r, g, b]) => {
            let luma = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
            if luma > 160.0 {
                Color32::from_black_alpha(140)
            } else {
                Color32::from_white_alpha(200)
            }
        }
        None => Color32::from_black_alpha(140),
    }
}
