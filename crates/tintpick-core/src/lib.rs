//! TintPick Core Library
//!
//! Platform-agnostic interaction engine for the TintPick color picker popup:
//! color normalization, palette lookup, keyboard section navigation, grid
//! arrow traversal, hotkeys and the eyedropper sampling loop.

pub mod color;
pub mod config;
pub mod custom;
pub mod error;
pub mod eyedropper;
pub mod grid;
pub mod hex_input;
pub mod hotkeys;
pub mod input;
pub mod keyboard;
pub mod listeners;
pub mod palette;
pub mod picker;
pub mod section;

pub use color::{Color, normalize};
pub use config::PickerConfig;
pub use custom::{ColoredElement, most_used_custom_colors};
pub use error::{PickerError, PickerResult};
pub use eyedropper::{EyeDropperSession, PixelCanvas, Preview, SelectCallback, SelectionSink};
pub use grid::{ArrowKey, arrow};
pub use hex_input::HexInput;
pub use hotkeys::{HotkeyBindings, HotkeySelection};
pub use input::{KeyInput, ModifierKey, Modifiers, MouseButton, PointerEvent};
pub use keyboard::{NavOutcome, NavState, key_nav};
pub use listeners::{ListenerKind, ListenerOptions, ListenerRegistry, Subscription};
pub use palette::{Palette, PaletteEntry, PaletteMatch};
pub use picker::{ColorPicker, ColorRole, Focus, PickerHost, PickerType};
pub use section::{Eligibility, Section, TabTransition};
