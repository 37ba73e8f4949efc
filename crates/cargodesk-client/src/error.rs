//! # API Error Types
//!
//! The normalized, user-facing error type for every request failure.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Error Flow in CargoDesk                            │
//! │                                                                         │
//! │  reqwest failure / non-2xx response                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  TransportFailure (http.rs)                                            │
//! │    Network | Timeout | Status{code, server_message} | AuthExpired      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  normalize(failure, context, operation)  (normalize.rs)                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ApiError { kind, message, status, context, operation }                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Store routes `message` into slice `error`; the view shows it          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. The `message` is always human-readable - never a raw transport string
//! 2. The raw cause is logged at the boundary, not carried to the user
//! 3. Services normalize-and-rethrow; they never swallow errors

use thiserror::Error;

use cargodesk_core::CoreError;

/// Result type alias for client operations.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Error Kind
// =============================================================================

/// Category of a normalized request failure.
///
/// Callers branch on the kind (e.g. redirect to login on `Auth`); the
/// message is what users see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Request was sent but no response was received.
    Network,
    /// The server did not respond in time.
    Timeout,
    /// 401 that survived the one refresh attempt, or the refresh
    /// exchange itself failed.
    Auth,
    /// 400/422 or a server message matching validation keywords.
    Validation,
    /// 409 or a server message matching duplicate/unique keywords.
    Conflict,
    /// Server message matching foreign-key/constraint keywords.
    Referential,
    /// 403.
    Authorization,
    /// 404.
    NotFound,
    /// 5xx.
    Server,
    /// Anything that matched no other category.
    Unclassified,
}

// =============================================================================
// API Error
// =============================================================================

/// A normalized request failure.
///
/// The `Display` impl is the user-facing message, so routing an `ApiError`
/// into slice state is just `err.to_string()`.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    /// Category for programmatic handling.
    pub kind: ErrorKind,

    /// Human-readable message for display.
    pub message: String,

    /// HTTP status code, when a response was received.
    pub status: Option<u16>,

    /// Entity context the failing operation ran under (e.g. "company").
    pub context: Option<&'static str>,

    /// Operation name (e.g. "create").
    pub operation: Option<&'static str>,
}

impl ApiError {
    /// Creates a new error with no context tags.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        ApiError {
            kind,
            message: message.into(),
            status: None,
            context: None,
            operation: None,
        }
    }

    /// Attaches context/operation tags.
    pub fn tagged(mut self, context: &'static str, operation: &'static str) -> Self {
        self.context = Some(context);
        self.operation = Some(operation);
        self
    }

    /// Attaches the HTTP status code.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Creates a configuration error (bad base URL, unbuildable client).
    pub fn config(message: impl Into<String>) -> Self {
        ApiError::new(ErrorKind::Unclassified, message)
    }

    /// Creates an error for a response that failed envelope parsing.
    ///
    /// The raw decode failure is logged here; users get the generic message.
    pub fn decode(context: &'static str, operation: &'static str, cause: CoreError) -> Self {
        tracing::error!(context, operation, %cause, "response decode failed");
        ApiError::new(
            ErrorKind::Unclassified,
            "Something went wrong. Please try again.",
        )
        .tagged(context, operation)
    }

    /// Returns true if the caller should redirect to login.
    pub fn is_auth(&self) -> bool {
        matches!(self.kind, ErrorKind::Auth)
    }

    /// Returns true if the failure was connectivity rather than the server.
    pub fn is_connectivity(&self) -> bool {
        matches!(self.kind, ErrorKind::Network | ErrorKind::Timeout)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
