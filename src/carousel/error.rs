use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CarouselError {
    #[error("slide index {index} out of range (carousel has {len} slides)")]
    OutOfRange { index: usize, len: usize },
}
