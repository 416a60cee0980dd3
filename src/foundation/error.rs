/// Result alias used across the crate.
pub type GridSnakeResult<T> = Result<T, GridSnakeError>;

/// Top-level error type.
///
/// Recoverable faults (a bad counter display, a missing sprite frame, a failed asset
/// fetch) never surface here; they are logged and reported as diagnostics instead.
#[derive(thiserror::Error, Debug)]
pub enum GridSnakeError {
    /// Input grid or path is structurally invalid.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration that makes the whole overlay unrenderable.
    #[error("config error: {0}")]
    Config(String),

    /// Animation program could not be built.
    #[error("animation error: {0}")]
    Animation(String),

    /// Input document could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GridSnakeError {
    /// Build a [`GridSnakeError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GridSnakeError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`GridSnakeError::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`GridSnakeError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for GridSnakeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
