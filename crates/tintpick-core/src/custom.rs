//! Custom colors: non-palette colors already used in the document.

use std::collections::HashMap;

use crate::color::Color;
use crate::palette::Palette;
use crate::picker::{ColorRole, PickerType};

/// A document element as seen by the custom color scan.
pub trait ColoredElement {
    fn is_deleted(&self) -> bool;

    /// The element's color for the given role.
    fn color(&self, role: ColorRole) -> Color;
}

/// Most frequently used non-palette colors for the picker's role, most used
/// first. Ties keep first-seen order. Canvas background pickers get none.
pub fn most_used_custom_colors<E: ColoredElement>(
    elements: &[E],
    picker_type: PickerType,
    palette: &Palette,
    max: usize,
) -> Vec<Color> {
    if picker_type == PickerType::CanvasBackground {
        return Vec::new();
    }
    let role = picker_type.role();

    let mut order: Vec<Color> = Vec::new();
    let mut counts: HashMap<Color, usize> = HashMap::new();
    for element in elements.iter().filter(|e| !e.is_deleted()) {
        let color = element.color(role);
        if !palette.is_custom_color(&color) {
            continue;
        }
        let count = counts.entry(color).or_insert(0);
        if *count == 0 {
            order.push(color);
        }
        *count += 1;
    }

    // Stable sort keeps first-seen order among equal counts
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.truncate(max);
    order
}
