use crate::quantizer::{Color, QuantizationResult};
use crate::sampler::PixelMap;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Statistics for one compression level.
#[derive(Debug, Clone, Serialize)]
pub struct LevelStats {
    /// Requested color count
    pub k: usize,
    /// Distinct palette colors actually referenced; may be below k
    pub colors_used: usize,
    /// Per-channel mean squared reconstruction error vs. the original
    pub mean_squared_error: f64,
    /// Distinct source colors divided by colors actually used
    pub compression_ratio: f64,
    /// Palette bytes plus packed per-pixel indices
    pub estimated_size_bytes: u64,
    /// Bytes on disk after encoding, filled in once the file is written
    pub file_size_bytes: Option<u64>,
    pub iterations: usize,
    pub converged: bool,
}

impl LevelStats {
    pub fn measure(
        k: usize,
        result: &QuantizationResult,
        original: &[Color],
        distinct_before: usize,
    ) -> Self {
        let colors_used = result.colors_used();
        let mean_squared_error = mean_squared_error(original, result);
        let compression_ratio = if colors_used > 0 {
            distinct_before as f64 / colors_used as f64
        } else {
            1.0
        };

        Self {
            k,
            colors_used,
            mean_squared_error,
            compression_ratio,
            estimated_size_bytes: estimated_size(k, original.len()),
            file_size_bytes: None,
            iterations: result.iterations,
            converged: result.converged,
        }
    }
}

/// Serializable multi-level report for external charting consumers.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub source_width: u32,
    pub source_height: u32,
    pub distinct_colors: usize,
    pub generated_at: DateTime<Utc>,
    /// One entry per requested level, in request order
    pub levels: Vec<LevelStats>,
}

impl AnalysisReport {
    pub fn new(pixels: &PixelMap, distinct_colors: usize, levels: Vec<LevelStats>) -> Self {
        Self {
            source_width: pixels.width(),
            source_height: pixels.height(),
            distinct_colors,
            generated_at: Utc::now(),
            levels,
        }
    }
}

fn mean_squared_error(original: &[Color], result: &QuantizationResult) -> f64 {
    let mut sum = 0f64;
    for (pixel, &assigned) in original.iter().zip(&result.assignments) {
        let center = result.palette[assigned as usize];
        for ch in 0..3 {
            let delta = pixel[ch] as f64 - center[ch] as f64;
            sum += delta * delta;
        }
    }
    sum / (original.len() as f64 * 3.0)
}

/// Rough storage estimate for an indexed rendition: 3 bytes per palette
/// entry plus ceil(log2 k) bits per pixel (1 bit minimum).
fn estimated_size(k: usize, pixel_count: usize) -> u64 {
    let index_bits = (usize::BITS - (k.max(2) - 1).leading_zeros()) as u64;
    let palette_bytes = 3 * k as u64;
    palette_bytes + (pixel_count as u64 * index_bits + 7) / 8
}
