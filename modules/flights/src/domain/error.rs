use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    /// One message per violated input rule.
    #[error("Validation failed: {}", messages.join(", "))]
    Validation { messages: Vec<String> },

    /// A rule on current state was broken (e.g. updating a missing flight).
    #[error("{message}")]
    Business { message: String },

    /// Infrastructure failure. `message` is client-facing, `cause` is for logs only.
    #[error("{message}")]
    Technical { message: String, cause: String },
}

impl DomainError {
    pub fn validation(messages: Vec<String>) -> Self {
        Self::Validation { messages }
    }

    pub fn business(message: impl Into<String>) -> Self {
        Self::Business {
            message: message.into(),
        }
    }

    pub fn technical(message: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::Technical {
            message: message.into(),
            cause: format!("{cause:#}"),
        }
    }

    pub fn flight_not_found() -> Self {
        Self::business("Flight doesn't exist")
    }

    /// Messages to show the caller.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation { messages } => messages.clone(),
            Self::Business { message } | Self::Technical { message, .. } => vec![message.clone()],
        }
    }
}
