//! Error types for mass action events
//!
//! Two failure classes exist:
//! - Payload validation failures, which are coding errors raised before an
//!   event can be logged
//! - Dispatch failures reported by an [`EventBus`](crate::EventBus)

/// Event error type
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// The `other` payload does not have the required shape
    #[error("coding error: {0}")]
    InvalidPayload(String),

    /// The bus could not accept the event
    #[error("dispatch failed: {0}")]
    Dispatch(String),

    /// Record could not be serialized
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EventError {
    /// Create a payload validation error
    #[inline]
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload(message.into())
    }

    /// Check whether this error signals a programmer mistake rather than a
    /// runtime failure
    #[inline]
    #[must_use]
    pub fn is_coding_error(&self) -> bool {
        matches!(self, Self::InvalidPayload(_))
    }
}

/// Result type alias for event operations
pub type EventResult<T> = Result<T, EventError>;
