// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::auth::AuthError;
use shift_board_domain::DomainError;
use shift_board_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the
/// API contract: validation failures are detected locally and surfaced
/// before any store attempt; store failures carry the store's message and
/// leave local state unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field (or comma-separated fields) that were invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The store reported a failure; local state was left unchanged.
    StoreFailure {
        /// The store's message, surfaced as-is.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::StoreFailure { message } => {
                write!(f, "Store failure: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::AuthenticationFailed {
            reason: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidTitle(msg) => ApiError::InvalidInput {
            field: String::from("title"),
            message: msg,
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidTimeRange { start, end } => ApiError::InvalidInput {
            field: String::from("end"),
            message: format!("End {end} must be strictly after start {start}"),
        },
        DomainError::InvalidColor(msg) => ApiError::InvalidInput {
            field: String::from("color"),
            message: msg,
        },
        DomainError::UnparsableInstant { value } => ApiError::InvalidInput {
            field: String::from("time"),
            message: format!("Could not parse '{value}' as a timestamp or wall-clock time"),
        },
        DomainError::UnresolvableLocalTime { value, day, zone } => ApiError::InvalidInput {
            field: String::from("time"),
            message: format!(
                "Wall-clock time '{value}' on {day} does not resolve to a single instant in {zone}"
            ),
        },
        DomainError::EventRejected { ref violations } => ApiError::InvalidInput {
            field: violations
                .iter()
                .map(|v| v.field)
                .collect::<Vec<&str>>()
                .join(", "),
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Missing-id failures become the API's not-found contract; everything
/// else is surfaced as a store failure with the store's own message.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::EventNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Event"),
            message: format!("Event {id} does not exist"),
        },
        PersistenceError::ResourceNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message: format!("Resource {id} does not exist"),
        },
        other => ApiError::StoreFailure {
            message: other.to_string(),
        },
    }
}
