//! Error types for chainsql

use crate::statement::StatementKind;
use thiserror::Error;

/// Result type alias for chainsql operations
pub type ChainResult<T> = Result<T, ChainError>;

/// Errors raised while configuring models, building statements or running them.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The model configuration is not a usable object
    #[error("{0}")]
    Config(String),

    /// The model configuration has no `table` key
    #[error("Attribute \"table\" not exists")]
    MissingTable,

    /// The statement kind was already chosen for this builder
    #[error("Type cannot be changed (statement is already {current})")]
    KindAlreadySet { current: StatementKind },

    /// A kind-specific method was called on a builder of another kind
    #[error("Type is not matched: expected {expected}, got {actual}")]
    KindMismatch {
        expected: StatementKind,
        actual: StatementKind,
    },

    /// `where_in` was called after another condition
    #[error("whereIn must be the first condition")]
    WhereInNotFirst,

    /// `find` was called on a model without a primary key
    #[error("Primary keys is undefined (table '{table}')")]
    MissingPrimaryKey { table: String },

    /// Failure reported by the database client
    #[error("Client error: {0}")]
    Client(String),

    /// Configuration deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChainError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a client error, typically from a driver's error value
    pub fn client(message: impl ToString) -> Self {
        Self::Client(message.to_string())
    }

    /// Check if this is a configuration error (including a missing table)
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::MissingTable | Self::Json(_))
    }

    /// Check if this error comes from an invalid statement kind transition or usage
    pub fn is_state(&self) -> bool {
        matches!(
            self,
            Self::KindAlreadySet { .. } | Self::KindMismatch { .. } | Self::WhereInNotFirst
        )
    }

    /// Check if this is a missing primary key error
    pub fn is_missing_primary_key(&self) -> bool {
        matches!(self, Self::MissingPrimaryKey { .. })
    }
}
