//! Pixel reads from a rendered frame.

use egui::ColorImage;
use tintpick_core::PixelCanvas;

/// A captured frame the eyedropper samples from. `pixels_per_point` maps
/// egui points to pixels of the image.
#[derive(Debug, Clone, Copy)]
pub struct ImageCanvas<'a> {
    image: &'a ColorImage,
    pixels_per_point: f32,
}

impl<'a> ImageCanvas<'a> {
    pub fn new(image: &'a ColorImage, pixels_per_point: f32) -> Self {
        Self {
            image,
            pixels_per_point,
        }
    }
}

impl PixelCanvas for ImageCanvas<'_> {
    fn device_pixel_ratio(&self) -> f64 {
        f64::from(self.pixels_per_point)
    }

    fn read_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        let [width, height] = self.image.size;
        let (x, y) = (x as usize, y as usize);
        if x >= width || y >= height {
            return None;
        }
        let pixel = self.image.pixels.get(y * width + x)?;
        Some([pixel.r(), pixel.g(), pixel.b()])
    }
}
