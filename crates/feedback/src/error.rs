//! Error types for feedback submission

use thiserror::Error;

/// First required field that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field: labels (at least one label is required)")]
    Labels,

    #[error("Missing required field: title")]
    Title,

    #[error("Missing required field: description")]
    Description,
}

impl ValidationError {
    /// Name of the offending field as it appears on the wire
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Labels => "labels",
            ValidationError::Title => "title",
            ValidationError::Description => "description",
        }
    }
}

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The relay answered with an error status; message is relayed verbatim
    #[error("Feedback rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Could not reach feedback endpoint: {0}")]
    Transport(String),

    #[error("Issue tracker error: {0}")]
    Tracker(String),

    #[error("Relay configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FeedbackError>;
