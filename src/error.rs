//! Error types for the trainer and its request parsers.

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, NetError>;

#[derive(Error, Debug)]
pub enum NetError {
    /// A topology needs at least the input layer.
    #[error("topology must contain at least one layer")]
    EmptyTopology,

    #[error("layer {layer} has zero neurons")]
    ZeroWidthLayer { layer: usize },

    #[error("input has {got} values but the input layer has {expected} neurons")]
    InputWidth { expected: usize, got: usize },

    #[error("target has {got} values but the output layer has {expected} neurons")]
    TargetWidth { expected: usize, got: usize },

    /// Topology exceeds the accepted network size.
    #[error("network too large: {0}")]
    TooLarge(String),

    /// Snapshot, parameters and topology disagree on the network shape.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("learning rate must be finite and positive, got {0}")]
    InvalidLearningRate(f64),

    /// Malformed `topology: / in: / out:` request.
    #[error("failed to parse request: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NetError {
    /// True when the error was caused by the caller's data rather than by I/O.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, NetError::Io(_))
    }
}
