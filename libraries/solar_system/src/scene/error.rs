use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_yaml::Error),
    #[error("Body {0:?} must have a positive radius")]
    NonPositiveRadius(String),
    #[error("Body name {0:?} is used more than once")]
    DuplicateName(String),
    #[error("Ring of {0:?} needs 0 < inner < outer")]
    InvalidRing(String),
    #[error("Tour setting {0:?} must be a positive number of seconds")]
    InvalidDuration(&'static str),
    #[error("Starfield extent must be positive, got {0}")]
    InvalidStarfieldExtent(f32),
}
