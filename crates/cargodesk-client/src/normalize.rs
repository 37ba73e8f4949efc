//! # Error Normalizer
//!
//! Maps transport/HTTP-status/server-message combinations to a stable
//! taxonomy of user-facing messages. Every failing request goes through
//! [`normalize`] exactly once, at the service boundary.
//!
//! ## Resolution Order (first match wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. No response received            → network-unreachable message      │
//! │  2. Timeout                         → timeout message                  │
//! │  3. Registered ctx+op AND server    → keyword-class message            │
//! │     message matches a keyword class   ("A category with this name      │
//! │     (duplicate/validation/reference)   already exists.")               │
//! │  4. Registered ctx+op, no keyword   → generic ctx+op message           │
//! │  5. Server message short and clean  → passed through verbatim          │
//! │  6. HTTP status fallback map        → per-status message               │
//! │  7. Otherwise                       → generic default                  │
//! │                                                                         │
//! │  Special case: ctx="auth", op="login" always prefers the server        │
//! │  message - login failures surface the backend's specific reason.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The taxonomy is intentionally conservative: an unrecognized server
//! message is only shown verbatim when it is short and contains none of the
//! technical-leakage terms below.

use crate::error::{ApiError, ErrorKind};

// =============================================================================
// Transport Failure
// =============================================================================

/// The raw failure shape produced by the HTTP wrapper, before normalization.
#[derive(Debug, Clone)]
pub enum TransportFailure {
    /// Request was sent but no response came back.
    Network,

    /// The request timed out.
    Timeout,

    /// A response arrived with a non-success status.
    Status {
        status: u16,
        /// The server's `message` field, when the body carried one.
        server_message: Option<String>,
    },

    /// A 401 that survived the single refresh attempt, or the refresh
    /// exchange itself failed. Tokens have already been cleared.
    AuthExpired,
}

// =============================================================================
// Fixed Messages
// =============================================================================

/// Exact message for a request that never reached the server.
pub const NETWORK_MESSAGE: &str =
    "Unable to connect to the server. Please check your internet connection and try again.";

/// Message for a request the server did not answer in time.
pub const TIMEOUT_MESSAGE: &str = "The server took too long to respond. Please try again.";

/// Message for an expired or unrecoverable session.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

/// Fallback when nothing more specific applies.
pub const DEFAULT_MESSAGE: &str = "Something went wrong. Please try again.";

/// Maximum server-message length eligible for verbatim pass-through.
const PASSTHROUGH_MAX_LEN: usize = 200;

/// Substrings that mark a server message as technical leakage.
/// A message containing any of these is never shown verbatim.
const LEAKAGE_TERMS: &[&str] = &[
    "status code",
    "econnrefused",
    "econnreset",
    "etimedout",
    "enotfound",
    "stack trace",
    "traceback",
    "sqlstate",
    "syntax error",
    "socket hang up",
    "node_modules",
    "at object.",
];

// =============================================================================
// Keyword Classes
// =============================================================================

/// Recognized classes of server-message keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeywordClass {
    /// `duplicate` / `unique` / `already exists`
    Duplicate,
    /// `validation` / `invalid` / `required`
    Validation,
    /// `foreign key` / `constraint` / `reference`
    Reference,
}

fn keyword_class(message: &str) -> Option<KeywordClass> {
    let m = message.to_lowercase();

    const DUPLICATE: &[&str] = &["duplicate", "unique", "already exists"];
    const VALIDATION: &[&str] = &["validation", "invalid", "required"];
    const REFERENCE: &[&str] = &["foreign key", "constraint", "reference"];

    if DUPLICATE.iter().any(|k| m.contains(k)) {
        Some(KeywordClass::Duplicate)
    } else if VALIDATION.iter().any(|k| m.contains(k)) {
        Some(KeywordClass::Validation)
    } else if REFERENCE.iter().any(|k| m.contains(k)) {
        Some(KeywordClass::Reference)
    } else {
        None
    }
}

// =============================================================================
// Context Registry
// =============================================================================

/// User-facing label for a registered context, or None if unregistered.
fn context_label(context: &str) -> Option<&'static str> {
    Some(match context {
        "auth" => "account",
        "category" => "category",
        "company" => "company",
        "order" => "order",
        "shipment" => "shipment",
        "packing-list" => "packing list",
        "vgm" => "VGM document",
        "invoice" => "invoice",
        "menu" => "menu",
        "submenu" => "submenu",
        "permission" => "permission",
        "variant" => "product variant",
        "report" => "report",
        _ => return None,
    })
}

/// Generic message for a registered context+operation, or None if the
/// operation is unregistered.
fn generic_message(label: &str, operation: &str) -> Option<String> {
    Some(match operation {
        "fetch" => format!("Could not load {} data. Please try again.", label),
        "create" => format!("Could not create the {}. Please try again.", label),
        "update" => format!("Could not update the {}. Please try again.", label),
        "delete" => format!("Could not delete the {}. Please try again.", label),
        "status" => format!("Could not update the {} status. Please try again.", label),
        "download" => format!("Could not download the {} document. Please try again.", label),
        "login" => "Login failed. Please check your credentials and try again.".to_string(),
        "logout" => "Logout failed. Please try again.".to_string(),
        _ => return None,
    })
}

/// Class-specific message for a registered context.
fn class_message(label: &str, operation: &str, class: KeywordClass) -> String {
    match class {
        KeywordClass::Duplicate => format!("A {} with this name already exists.", label),
        KeywordClass::Validation => {
            format!("Please check the {} details and try again.", label)
        }
        KeywordClass::Reference => {
            if operation == "delete" {
                format!(
                    "This {} cannot be deleted because other records depend on it.",
                    label
                )
            } else {
                format!("This {} is linked to records that do not exist.", label)
            }
        }
    }
}

// =============================================================================
// Status Fallback
// =============================================================================

fn kind_for_status(status: u16) -> ErrorKind {
    match status {
        400 | 422 => ErrorKind::Validation,
        401 => ErrorKind::Auth,
        403 => ErrorKind::Authorization,
        404 => ErrorKind::NotFound,
        409 => ErrorKind::Conflict,
        500..=599 => ErrorKind::Server,
        _ => ErrorKind::Unclassified,
    }
}

fn status_message(status: u16) -> Option<&'static str> {
    Some(match status {
        400 => "The request was invalid. Please review the entered details and try again.",
        401 => SESSION_EXPIRED_MESSAGE,
        403 => "You do not have permission to perform this action.",
        404 => "The requested record could not be found.",
        409 => "This record conflicts with an existing one.",
        422 => "The submitted data could not be processed. Please review and try again.",
        429 => "Too many requests. Please wait a moment and try again.",
        500 => "The server encountered an unexpected error. Please try again later.",
        502 => "The server is temporarily unreachable. Please try again later.",
        503 => "The service is temporarily unavailable. Please try again later.",
        _ => return None,
    })
}

// =============================================================================
// Normalizer
// =============================================================================

/// Normalizes a transport failure into a user-facing [`ApiError`].
///
/// `context` is the entity the operation ran under ("company", "order", ...)
/// and `operation` the verb ("fetch", "create", ...). Unregistered pairs
/// fall through to pass-through / status-code resolution.
pub fn normalize(
    failure: TransportFailure,
    context: &'static str,
    operation: &'static str,
) -> ApiError {
    match failure {
        TransportFailure::Network => {
            ApiError::new(ErrorKind::Network, NETWORK_MESSAGE).tagged(context, operation)
        }
        TransportFailure::Timeout => {
            ApiError::new(ErrorKind::Timeout, TIMEOUT_MESSAGE).tagged(context, operation)
        }
        TransportFailure::AuthExpired => {
            ApiError::new(ErrorKind::Auth, SESSION_EXPIRED_MESSAGE).tagged(context, operation)
        }
        TransportFailure::Status {
            status,
            server_message,
        } => normalize_status(status, server_message, context, operation),
    }
}

fn normalize_status(
    status: u16,
    server_message: Option<String>,
    context: &'static str,
    operation: &'static str,
) -> ApiError {
    // Login failures surface the backend's specific reason verbatim.
    if context == "auth" && operation == "login" {
        if let Some(message) = &server_message {
            if !message.trim().is_empty() {
                return ApiError::new(ErrorKind::Auth, message.trim())
                    .tagged(context, operation)
                    .with_status(status);
            }
        }
    }

    let label = context_label(context);
    let registered = label.and_then(|l| generic_message(l, operation)).is_some();

    // 3. Registered context+operation with a recognized keyword class.
    if registered {
        let label = label.unwrap_or(context);
        if let Some(class) = server_message.as_deref().and_then(keyword_class) {
            let kind = match class {
                KeywordClass::Duplicate => ErrorKind::Conflict,
                KeywordClass::Validation => ErrorKind::Validation,
                KeywordClass::Reference => ErrorKind::Referential,
            };
            return ApiError::new(kind, class_message(label, operation, class))
                .tagged(context, operation)
                .with_status(status);
        }

        // 4. Registered pair, no keyword matched.
        if let Some(message) = generic_message(label, operation) {
            return ApiError::new(kind_for_status(status), message)
                .tagged(context, operation)
                .with_status(status);
        }
    }

    // 5. Clean, short server message passes through verbatim.
    if let Some(message) = &server_message {
        let message = message.trim();
        if !message.is_empty() && message.len() < PASSTHROUGH_MAX_LEN && is_clean(message) {
            return ApiError::new(kind_for_status(status), message)
                .tagged(context, operation)
                .with_status(status);
        }
    }

    // 6. Status fallback map.
    if let Some(message) = status_message(status) {
        return ApiError::new(kind_for_status(status), message)
            .tagged(context, operation)
            .with_status(status);
    }

    // 7. Generic default.
    ApiError::new(ErrorKind::Unclassified, DEFAULT_MESSAGE)
        .tagged(context, operation)
        .with_status(status)
}

fn is_clean(message: &str) -> bool {
    let m = message.to_lowercase();
    !LEAKAGE_TERMS.iter().any(|term| m.contains(term))
}

// =============================================================================
// Unit Tests
// =============================================================================
