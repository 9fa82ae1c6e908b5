//! Failure taxonomy shared by every layer that talks to the backend.
//!
//! Every failure is reduced to one of seven [`ErrorKind`]s. The kind drives
//! both the user-facing message and whether the HTTP client may retry.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Fixed set of failure categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Network,
    Validation,
    Authentication,
    Authorization,
    NotFound,
    Server,
    Unknown,
}

impl ErrorKind {
    /// Map an HTTP status code to a kind. A missing status is `Unknown`.
    #[must_use]
    pub const fn from_status(status: Option<u16>) -> Self {
        match status {
            None => Self::Unknown,
            Some(400) => Self::Validation,
            Some(401) => Self::Authentication,
            Some(403) => Self::Authorization,
            Some(404) => Self::NotFound,
            Some(400..=499) => Self::Validation,
            Some(500..) => Self::Server,
            Some(_) => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Network | Self::Server)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Validation => "validation",
            Self::Authentication => "authentication",
            Self::Authorization => "authorization",
            Self::NotFound => "not_found",
            Self::Server => "server",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a status code (see [`ErrorKind::from_status`]).
#[must_use]
pub const fn classify_by_status(status: Option<u16>) -> ErrorKind {
    ErrorKind::from_status(status)
}

/// A thrown failure that can be wrapped into an [`AppError`].
///
/// Implementors report whether the failure happened below HTTP (no response
/// was received), which forces the `Network` kind.
pub trait FailureSource: std::error::Error + Send + Sync + 'static {
    fn is_network(&self) -> bool {
        false
    }
}

/// Classified failure. Immutable once constructed.
#[derive(Clone, Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    status_code: Option<u16>,
    cause: Option<Arc<dyn std::error::Error + Send + Sync>>,
    timestamp: DateTime<Utc>,
}

/// Outcome of every HTTP client call.
pub type ApiResult<T> = Result<T, AppError>;

impl AppError {
    /// Build an error of an explicit kind.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            cause: None,
            timestamp: Utc::now(),
        }
        .classified()
    }

    /// Build an error from a non-success HTTP status and its body text.
    #[must_use]
    pub fn from_status(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::from_status(status_code),
            message: message.into(),
            status_code,
            cause: None,
            timestamp: Utc::now(),
        }
        .classified()
    }

    /// Wrap a thrown failure. Network-layer failures are always `Network`,
    /// whatever status accompanies them.
    #[must_use]
    pub fn from_thrown<E: FailureSource>(error: E, status_code: Option<u16>) -> Self {
        let kind = if error.is_network() {
            ErrorKind::Network
        } else {
            ErrorKind::from_status(status_code)
        };
        Self {
            kind,
            message: error.to_string(),
            status_code,
            cause: Some(Arc::new(error)),
            timestamp: Utc::now(),
        }
        .classified()
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    #[must_use]
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync)> {
        self.cause.as_deref()
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Timestamp in RFC 3339 form, as carried over the wire and in logs.
    #[must_use]
    pub fn timestamp_string(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Network and server failures may succeed on a later attempt.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// Failures expected to clear up on their own: network trouble and
    /// gateway/unavailable responses.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self.kind {
            ErrorKind::Network => true,
            ErrorKind::Server => matches!(self.status_code, Some(502 | 503)),
            _ => false,
        }
    }

    /// Stable sentence shown to the user for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self.kind {
            ErrorKind::Network => {
                "Could not reach the server. Check your connection and try again.".into()
            }
            ErrorKind::Validation => {
                let detail = self.message.trim();
                if detail.is_empty() {
                    "The request was invalid. Please check your input.".into()
                } else {
                    format!("The request was invalid: {detail}")
                }
            }
            ErrorKind::Authentication => "Your session has expired. Please sign in again.".into(),
            ErrorKind::Authorization => "You do not have permission to do that.".into(),
            ErrorKind::NotFound => "The requested item could not be found.".into(),
            ErrorKind::Server => {
                "The server ran into a problem. Please try again later.".into()
            }
            ErrorKind::Unknown => "Something went wrong. Please try again.".into(),
        }
    }

    /// Record a terminal failure of `method path`. Callers invoke this once
    /// per failure they give up on.
    pub fn log_request(&self, method: &str, path: &str) {
        warn!(
            method,
            path,
            kind = %self.kind,
            message = %self.message,
            status_code = ?self.status_code,
            timestamp = %self.timestamp_string(),
            "request failed"
        );
    }

    fn classified(self) -> Self {
        debug!(
            kind = %self.kind,
            message = %self.message,
            status_code = ?self.status_code,
            timestamp = %self.timestamp_string(),
            "classified error"
        );
        self
    }
}
