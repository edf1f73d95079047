mod distance;
mod error;
mod init;
mod kmeans;
mod types;

#[cfg(test)]
mod tests;

pub use error::QuantizeError;
pub use kmeans::quantize;
pub use types::{Color, InitStrategy, QuantizationResult, QuantizeOptions};
