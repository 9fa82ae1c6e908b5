//! Shared error types for the services crate.

use std::time::Duration;

use thiserror::Error;
use vocab_core::{AppError, FailureSource};

/// Failures raised below HTTP: no usable response reached the client.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("could not read response body: {0}")]
    Body(String),
    #[error("could not encode request body: {0}")]
    Encode(String),
    #[error("transport error: {0}")]
    Other(String),
}

impl FailureSource for TransportError {
    fn is_network(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Connect(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(Duration::ZERO)
        } else if err.is_connect() || err.is_request() {
            Self::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else {
            Self::Other(err.to_string())
        }
    }
}

/// Errors emitted by `AddFlashcardResource`.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum AddFlashcardError {
    #[error("Please enter a word.")]
    EmptyWord,
    #[error("\"{0}\" is already in your flashcards.")]
    Duplicate(String),
    #[error(transparent)]
    Api(#[from] AppError),
}

impl AddFlashcardError {
    /// Sentence stored in resource state for display.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

/// Errors emitted by an authentication provider or credential validation.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("sign-in rejected: {0}")]
    Rejected(String),
    #[error("authentication provider unavailable: {0}")]
    Unavailable(String),
}
