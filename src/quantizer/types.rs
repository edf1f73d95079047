use std::collections::HashSet;

/// One pixel's color: 8-bit RGB channel intensities.
pub type Color = [u8; 3];

/// How the initial cluster centers are chosen. Both strategies are
/// deterministic for a given seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStrategy {
    /// Uniform sample of k distinct input colors, without replacement
    RandomSample,
    /// k-means++ D²-weighted sampling over the distinct input colors
    PlusPlus,
}

#[derive(Debug, Clone)]
pub struct QuantizeOptions {
    pub init: InitStrategy,
    pub seed: u64,
    pub max_iterations: usize,
    /// Summed squared center movement below which iteration stops
    pub tolerance: f32,
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            init: InitStrategy::PlusPlus,
            seed: 42,
            max_iterations: 100,
            tolerance: 1e-4,
        }
    }
}

/// Final output of one quantization run. The quantizer hands this to the
/// caller and retains nothing.
#[derive(Debug, Clone)]
pub struct QuantizationResult {
    /// Exactly k palette colors, ordered by cluster id
    pub palette: Vec<Color>,
    /// One cluster id per input pixel, each in [0, k)
    pub assignments: Vec<u32>,
    /// Iterations actually run
    pub iterations: usize,
    /// False only when the iteration cap was hit first; not an error
    pub converged: bool,
}

impl QuantizationResult {
    /// Distinct palette colors actually referenced by at least one pixel.
    /// May be less than k when clusters ended up empty.
    pub fn colors_used(&self) -> usize {
        let used: HashSet<Color> = self
            .assignments
            .iter()
            .map(|&a| self.palette[a as usize])
            .collect();
        used.len()
    }
}
