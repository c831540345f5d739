//! Prompt errors. All of them are reported to the client as invalid params.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PromptError {
    #[error("Unknown prompt '{0}'")]
    NotFound(String),

    #[error("Prompt argument '{0}' is required")]
    MissingArgument(String),

    #[error("Prompt argument '{name}' {reason}")]
    InvalidArgument { name: String, reason: String },
}

impl PromptError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn missing_argument(name: impl Into<String>) -> Self {
        Self::MissingArgument(name.into())
    }

    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
