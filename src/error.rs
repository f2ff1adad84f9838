use crate::hyperparam::bounds::BoundsError;
use crate::hyperparam::param::ValueError;
use crate::hyperparam::path::PathError;
use thiserror::Error;

/// Error types for the hyperparam-rs library.
#[derive(Error, Debug)]
pub enum HyperparamError {
    /// A declared name does not follow the identifier grammar.
    #[error("Illegal name, must be an identifier: {name}")]
    Naming { name: String },

    /// A value was rejected by a hyperparameter's kind, choices or range.
    #[error(transparent)]
    Value(#[from] ValueError),

    /// A path could not be resolved or assigned.
    #[error(transparent)]
    Path(#[from] PathError),

    /// A model, member or dict key does not exist.
    #[error("Key not found: '{key}'")]
    KeyNotFound { key: String },

    /// A name is already used by a sibling.
    #[error("Duplicate name: '{name}'")]
    DuplicateName { name: String },

    /// Choices or a range were declared on a kind that does not support them.
    #[error("Invalid constraint for hyperparameter '{name}': {message}")]
    InvalidConstraint { name: String, message: String },

    /// A range declaration is malformed.
    #[error("Bounds error: {0}")]
    Bounds(#[from] BoundsError),

    /// A document is structurally malformed.
    #[error("Load error: {message}")]
    Load { message: String },

    /// I/O error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse or serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HyperparamError {
    pub(crate) fn key_not_found(key: &str) -> Self {
        HyperparamError::KeyNotFound {
            key: key.to_string(),
        }
    }

    pub(crate) fn load(message: impl Into<String>) -> Self {
        HyperparamError::Load {
            message: message.into(),
        }
    }
}

/// Result type alias for hyperparam-rs operations.
pub type Result<T> = std::result::Result<T, HyperparamError>;
