//! egui components for the TintPick color picker popup.
//!
//! - **Colors**: swatches for palette, shade and custom colors
//! - **Keys**: egui key events to picker keystrokes
//! - **Canvas**: pixel reads from an egui `ColorImage`
//! - **Popup**: the picker panel and the eyedropper preview marker
//! - **Layout**: section labels, separators, panel frames

pub mod canvas;
pub mod colors;
pub mod keys;
pub mod layout;
pub mod popup;

pub use canvas::ImageCanvas;
pub use colors::{ColorSwatch, SwatchStyle, to_color32};
pub use keys::{AltTracker, AltTransition, key_input, key_presses};
pub use layout::{panel_frame, section_label, separator};
pub use popup::{PickerPanel, PopupResponse, show_eyedropper_preview};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Swatch size in the base color grid
    pub const SWATCH: f32 = 24.0;
    /// Swatch size in the shade row
    pub const SHADE_SWATCH: f32 = 20.0;
    /// Eyedropper preview marker diameter
    pub const PREVIEW: f32 = 24.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
    /// Popup content width
    pub const POPUP_WIDTH: f32 = 160.0;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Keyboard focus ring (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Active swatch ring
    pub const ACTIVE_RING: Color32 = Color32::from_gray(30);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
}
