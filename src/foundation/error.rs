pub type BlurResult<T> = Result<T, BlurError>;

#[derive(thiserror::Error, Debug)]
pub enum BlurError {
    #[error("invalid dimensions: {width}x{height} (width and height must be positive)")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("image too large: {width}x{height} exceeds the supported pixel count")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlurError {
    pub fn invalid_dimensions(width: u32, height: u32) -> Self {
        Self::InvalidDimensions { width, height }
    }

    pub fn buffer_length(expected: usize, actual: usize) -> Self {
        Self::BufferLength { expected, actual }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
