use thiserror::Error;

/// Failures of the attachment pipeline. None of them reach the user: a failed
/// attachment simply does not appear.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailError {
    #[error("failed to read file: {0}")]
    Read(String),

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("failed to encode thumbnail: {0}")]
    Encode(String),

    #[error("drawing surface unavailable: {0}")]
    Canvas(String),

    #[error("malformed data url")]
    InvalidDataUrl,
}
