// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity extraction.
//!
//! Identity is an external concern: callers present an opaque bearer
//! token minted by the identity collaborator. The token is used only to
//! scope store rows to the caller; its internal structure is never
//! inspected.

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No Authorization header was presented.
    #[error("Missing Authorization header")]
    MissingHeader,

    /// The Authorization header was not a bearer credential.
    #[error("Invalid Authorization header format. Expected: 'Bearer <token>'")]
    MalformedHeader,

    /// The bearer token was empty.
    #[error("Bearer token is empty")]
    EmptyToken,
}

/// An authenticated caller, identified by an opaque token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// The opaque token; scoping key for every store row.
    token: String,
}

impl Caller {
    /// Wraps an already-extracted token (test construction).
    #[must_use]
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Returns the opaque token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Extracts a caller from an `Authorization` header value.
///
/// # Arguments
///
/// * `header` - The raw header value, if one was presented
///
/// # Errors
///
/// Returns an error if the header is missing, is not a `Bearer`
/// credential, or carries an empty token.
pub fn authenticate_bearer(header: Option<&str>) -> Result<Caller, AuthError> {
    let header: &str = header.ok_or(AuthError::MissingHeader)?;
    let token: &str = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MalformedHeader)?;

    if token.trim().is_empty() {
        return Err(AuthError::EmptyToken);
    }

    Ok(Caller {
        token: token.to_string(),
    })
}
