use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlightsError {
    #[error("Validation error: {}", messages.join(", "))]
    Validation { messages: Vec<String> },

    #[error("{message}")]
    Business { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl FlightsError {
    pub fn validation(messages: Vec<String>) -> Self {
        Self::Validation { messages }
    }

    pub fn business(message: impl Into<String>) -> Self {
        Self::Business {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<crate::domain::error::DomainError> for FlightsError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            Validation { messages } => Self::validation(messages),
            Business { message } => Self::business(message),
            // cause stays in the service logs
            Technical { message, .. } => Self::internal(message),
        }
    }
}
