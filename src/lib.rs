// Public API exports
pub mod orchestrator;
pub mod quantizer;
pub mod reconstructor;
pub mod sampler;

// Re-export main types for convenience
pub use sampler::{PixelMap, SampleError};

pub use quantizer::{
    quantize, Color, InitStrategy, QuantizationResult, QuantizeError, QuantizeOptions,
};

pub use reconstructor::{reconstruct, ReconstructError};

pub use orchestrator::{
    AnalysisReport, CompressError, LevelOutput, LevelStats, Orchestrator, ANALYSIS_LEVELS,
};
