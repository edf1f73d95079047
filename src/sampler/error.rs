use thiserror::Error;

#[derive(Error, Debug)]
pub enum SampleError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image contains no pixels")]
    EmptyImage,
}
