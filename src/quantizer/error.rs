use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuantizeError {
    #[error("no pixels to quantize")]
    EmptyInput,

    #[error("invalid color count: {0} (must be at least 1)")]
    InvalidColorCount(usize),
}
