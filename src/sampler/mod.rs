mod error;


pub use error::SampleError;

use crate::quantizer::Color;
use image::DynamicImage;
use std::collections::HashSet;
use std::path::Path;

/// Immutable pixel store for one decoded image: the colors in row-major
/// order plus the grid dimensions needed to restore spatial layout.
pub struct PixelMap {
    /// One RGB triple per pixel, row-major
    pixels: Vec<Color>,
    width: u32,
    height: u32,
}

impl PixelMap {
    /// Decode an image file and flatten it into a pixel map
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SampleError> {
        let img = image::open(path.as_ref())?;
        Self::from_image(&img)
    }

    /// Flatten an already-decoded image into a pixel map
    pub fn from_image(img: &DynamicImage) -> Result<Self, SampleError> {
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err(SampleError::EmptyImage);
        }
        let pixels = rgb.pixels().map(|p| p.0).collect();
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Convert a flat pixel index back to its (row, column) grid position
    pub fn position(&self, index: usize) -> (u32, u32) {
        let index = index as u32;
        (index / self.width, index % self.width)
    }

    /// Exact number of distinct colors in the image
    pub fn distinct_colors(&self) -> usize {
        let unique: HashSet<Color> = self.pixels.iter().copied().collect();
        unique.len()
    }
}
