mod stats;


pub use stats::{AnalysisReport, LevelStats};

use crate::quantizer::{self, QuantizeError, QuantizeOptions};
use crate::reconstructor::{self, ReconstructError};
use crate::sampler::PixelMap;
use image::RgbImage;
use thiserror::Error;

/// Preset color counts for a full multi-level analysis
pub const ANALYSIS_LEVELS: [usize; 6] = [4, 8, 16, 32, 64, 128];

#[derive(Error, Debug)]
pub enum CompressError {
    #[error(transparent)]
    Quantize(#[from] QuantizeError),

    #[error(transparent)]
    Reconstruct(#[from] ReconstructError),
}

/// Output of one compression pass: the re-rendered image and its statistics.
pub struct LevelOutput {
    pub image: RgbImage,
    pub stats: LevelStats,
}

/// Drives sampler output through the quantizer and reconstructor for one or
/// more color counts. The pixel map is sampled once and shared across levels.
pub struct Orchestrator {
    pixels: PixelMap,
    distinct_colors: usize,
}

impl Orchestrator {
    pub fn new(pixels: PixelMap) -> Self {
        let distinct_colors = pixels.distinct_colors();
        Self {
            pixels,
            distinct_colors,
        }
    }

    pub fn pixel_map(&self) -> &PixelMap {
        &self.pixels
    }

    /// Distinct colors in the source image, counted once at construction
    pub fn distinct_colors(&self) -> usize {
        self.distinct_colors
    }

    /// One quantization pass at a single color count
    pub fn compress(&self, k: usize, options: &QuantizeOptions) -> Result<LevelOutput, CompressError> {
        let result = quantizer::quantize(self.pixels.pixels(), k, options)?;
        let image = reconstructor::reconstruct(&result, self.pixels.width(), self.pixels.height())?;
        let stats = LevelStats::measure(k, &result, self.pixels.pixels(), self.distinct_colors);

        Ok(LevelOutput { image, stats })
    }

    /// One pass per requested color count, in the order requested
    pub fn analyze(
        &self,
        levels: &[usize],
        options: &QuantizeOptions,
    ) -> Result<Vec<LevelOutput>, CompressError> {
        levels.iter().map(|&k| self.compress(k, options)).collect()
    }

    /// Bundle per-level statistics into a serializable report
    pub fn report(&self, levels: Vec<LevelStats>) -> AnalysisReport {
        AnalysisReport::new(&self.pixels, self.distinct_colors, levels)
    }
}
