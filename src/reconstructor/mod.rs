
use crate::quantizer::QuantizationResult;
use image::{Rgb, RgbImage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconstructError {
    #[error("dimension mismatch: a {width}x{height} grid needs {expected} assignments, got {actual}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Rebuild the pixel grid from a quantization result by substituting each
/// pixel's palette color at its row-major position. Pure function.
pub fn reconstruct(
    result: &QuantizationResult,
    width: u32,
    height: u32,
) -> Result<RgbImage, ReconstructError> {
    let expected = width as usize * height as usize;
    if expected != result.assignments.len() {
        return Err(ReconstructError::DimensionMismatch {
            width,
            height,
            expected,
            actual: result.assignments.len(),
        });
    }

    let mut out = RgbImage::new(width, height);
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let index = y as usize * width as usize + x as usize;
        let cluster = result.assignments[index] as usize;
        *pixel = Rgb(result.palette[cluster]);
    }

    Ok(out)
}
