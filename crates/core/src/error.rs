use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The model backend behind an engine trait failed to answer.
    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised while resolving [`Settings`](crate::settings::Settings)
/// from the environment. Any of these aborts process startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    InvalidNumber {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{var} must be greater than zero")]
    MustBePositive { var: &'static str },
}
