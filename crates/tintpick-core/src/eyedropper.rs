//! Eyedropper sampling engine.
//!
//! A session samples the live canvas under the pointer on every move,
//! previews the sample next to the pointer, paints it onto the selection
//! while a button is held and reports it on release. The session holds its
//! listener subscriptions; dropping it releases them.

use kurbo::Point;
use std::fmt;

use crate::color::{Color, rgb_to_hex};
use crate::listeners::{ListenerKind, ListenerOptions, ListenerRegistry, Subscription};
use crate::picker::ColorRole;

/// Read access to the rendered canvas.
pub trait PixelCanvas {
    /// Device pixels per client pixel.
    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }

    /// RGB of the device pixel at (`x`, `y`), `None` outside the buffer.
    fn read_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]>;
}

/// The externally owned selection the eyedropper paints onto.
pub trait SelectionSink {
    /// Number of selected elements.
    fn selection_len(&self) -> usize;

    /// Set the `role` color of the selected element at `index`.
    fn apply_color(&mut self, index: usize, role: ColorRole, color: Color);

    /// Drop cached rendering of the selected element at `index`.
    fn invalidate(&mut self, _index: usize) {}

    /// Ask the host to redraw after a batch of mutations.
    fn request_redraw(&mut self);
}

/// Selection callback for a session.
pub type SelectCallback = Box<dyn FnMut(Color)>;

/// The floating marker that follows the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preview {
    /// Marker position in client coordinates.
    pub position: Point,
    /// Last sampled color.
    pub color: Color,
}

/// An open eyedropper.
pub struct EyeDropperSession {
    keep_open: bool,
    on_select: Option<SelectCallback>,
    role: ColorRole,
    preview_offset: f64,
    preview: Option<Preview>,
    holding: bool,
    _listeners: [Subscription; 3],
}

impl fmt::Debug for EyeDropperSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EyeDropperSession")
            .field("keep_open", &self.keep_open)
            .field("has_on_select", &self.on_select.is_some())
            .field("role", &self.role)
            .field("preview", &self.preview)
            .field("holding", &self.holding)
            .finish()
    }
}

impl EyeDropperSession {
    /// Open a session, subscribing to pointer input on `listeners`.
    pub fn open(
        listeners: &ListenerRegistry,
        keep_open: bool,
        on_select: Option<SelectCallback>,
        role: ColorRole,
        preview_offset: f64,
    ) -> Self {
        log::debug!("eyedropper open (keep_open: {})", keep_open);
        Self {
            keep_open,
            on_select,
            role,
            preview_offset,
            preview: None,
            holding: false,
            _listeners: [
                listeners.subscribe(ListenerKind::PointerMove, ListenerOptions::PASSIVE),
                listeners.subscribe(ListenerKind::PointerDown, ListenerOptions::default()),
                listeners.subscribe(ListenerKind::PointerUp, ListenerOptions::default()),
            ],
        }
    }

    pub fn keep_open(&self) -> bool {
        self.keep_open
    }

    pub fn role(&self) -> ColorRole {
        self.role
    }

    /// The marker to draw, once something has been sampled.
    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Last sampled color.
    pub fn current_color(&self) -> Option<Color> {
        self.preview.map(|p| p.color)
    }

    /// Whether a pointer button is held.
    pub fn is_holding(&self) -> bool {
        self.holding
    }

    /// Sample the canvas under `position`. Without a canvas the session is
    /// inert and nothing changes. While a button is held the sample is
    /// painted onto every selected element.
    pub fn pointer_move(
        &mut self,
        position: Point,
        canvas: Option<&dyn PixelCanvas>,
        selection: &mut dyn SelectionSink,
    ) -> Option<Color> {
        let canvas = canvas?;
        let ratio = canvas.device_pixel_ratio();
        let x = (position.x * ratio).floor();
        let y = (position.y * ratio).floor();
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        if x < 0.0 || y < 0.0 || x > u32::MAX as f64 || y > u32::MAX as f64 {
            return None;
        }
        let [r, g, b] = canvas.read_pixel(x as u32, y as u32)?;
        let color = rgb_to_hex(r, g, b);
        log::trace!("eyedropper sample ({}, {}) -> {}", x, y, color);

        if self.holding {
            let count = selection.selection_len();
            for index in 0..count {
                selection.apply_color(index, self.role, color);
                selection.invalidate(index);
            }
            if count > 0 {
                selection.request_redraw();
            }
        }

        self.preview = Some(Preview {
            position: Point::new(
                position.x + self.preview_offset,
                position.y + self.preview_offset,
            ),
            color,
        });
        Some(color)
    }

    /// Start holding. The pointer-down must not reach the canvas.
    pub fn pointer_down(&mut self) {
        self.holding = true;
    }

    /// Stop holding and return the color to select.
    pub fn pointer_up(&mut self) -> Option<Color> {
        self.holding = false;
        self.current_color()
    }

    /// Hand a selected color to the session callback. Returns the color back
    /// when the session has no callback of its own.
    pub fn select(&mut self, color: Color) -> Option<Color> {
        match self.on_select.as_mut() {
            Some(on_select) => {
                on_select(color);
                None
            }
            None => Some(color),
        }
    }
}

impl Drop for EyeDropperSession {
    fn drop(&mut self) {
        log::debug!("eyedropper closed");
    }
}
