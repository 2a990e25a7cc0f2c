/// Convenience result type used across the crate.
pub type StoryResult<T> = Result<T, StoryError>;

/// Top-level error taxonomy for loading and validating book data.
///
/// The narrative core never returns these: out-of-range scroll input is clamped and
/// degenerate stories fall back to safe defaults. Errors only surface at load time.
#[derive(thiserror::Error, Debug)]
pub enum StoryError {
    /// Invalid user-provided configuration or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// Structurally valid JSON that does not describe a usable story.
    #[error("story error: {0}")]
    Story(String),

    /// Audio backend failures that a caller chose to surface.
    #[error("playback error: {0}")]
    Playback(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoryError {
    /// Build a [`StoryError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StoryError::Story`] value.
    pub fn story(msg: impl Into<String>) -> Self {
        Self::Story(msg.into())
    }

    /// Build a [`StoryError::Playback`] value.
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Build a [`StoryError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for StoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
