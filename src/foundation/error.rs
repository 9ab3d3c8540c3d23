/// Convenience result type used across the crate.
pub type GraftResult<T> = Result<T, GraftError>;

/// Top-level error taxonomy for graph construction, rewriting, and serialization.
#[derive(thiserror::Error, Debug)]
pub enum GraftError {
    /// Malformed or semantically invalid caller input.
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced product or vector table does not exist or is inaccessible.
    #[error("not found: {0}")]
    NotFound(String),

    /// The requested axis or combination is structurally unsupported.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// Malformed graph: dangling reference, missing `returns`, or a cycle.
    #[error("graph integrity error: {0}")]
    Integrity(String),

    /// A key was resolved that is not defined in the graft.
    #[error("unknown graft key: {0}")]
    UnknownKey(String),

    /// Errors when serializing or deserializing records.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from a collaborator.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GraftError {
    /// Build a [`GraftError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GraftError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`GraftError::NotImplemented`] value.
    pub fn not_implemented(msg: impl Into<String>) -> Self {
        Self::NotImplemented(msg.into())
    }

    /// Build a [`GraftError::Integrity`] value.
    pub fn integrity(msg: impl Into<String>) -> Self {
        Self::Integrity(msg.into())
    }

    /// Build a [`GraftError::UnknownKey`] value.
    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::UnknownKey(key.into())
    }

    /// Build a [`GraftError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for GraftError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
