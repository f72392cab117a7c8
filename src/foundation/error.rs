/// Convenience result type used across the crate.
pub type ModulatorResult<T> = Result<T, ModulatorError>;

/// Top-level error taxonomy used by the modulator APIs.
#[derive(thiserror::Error, Debug)]
pub enum ModulatorError {
    /// Malformed frame geometry or pixel buffer, rejected before any processing.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Failure while producing a frame (allocation, worker pool). Retrying later may succeed.
    #[error("transient failure: {0}")]
    Transient(String),

    /// Invalid parameter or settings data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing settings.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ModulatorError {
    /// Build a [`ModulatorError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`ModulatorError::Transient`] value.
    pub fn transient(msg: impl Into<String>) -> Self {
        Self::Transient(msg.into())
    }

    /// Build a [`ModulatorError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ModulatorError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the caller may keep its previous output and try again on the next frame.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
