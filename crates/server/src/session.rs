// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller extraction middleware for the server.
//!
//! This module provides the Axum extractor that turns the
//! `Authorization: Bearer <token>` header into an opaque [`Caller`] and
//! rejects unauthenticated requests at the boundary.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use shift_board_api::{AuthError, Caller, authenticate_bearer};
use tracing::debug;

use crate::AppState;

/// Extractor for the authenticated caller.
///
/// The token is opaque: it is never inspected, only used to scope store
/// rows to the caller that presented it.
///
/// # Errors
///
/// Rejects with HTTP 401 Unauthorized if:
/// - The Authorization header is missing
/// - The header is not a `Bearer` credential
/// - The bearer token is empty or not valid UTF-8
pub struct CallerToken(pub Caller);

impl FromRequestParts<AppState> for CallerToken {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header: Option<&str> = match parts.headers.get("Authorization") {
            None => None,
            Some(value) => Some(value.to_str().map_err(|_| {
                debug!("Authorization header is not valid UTF-8");
                SessionError::InvalidEncoding
            })?),
        };

        let caller: Caller = authenticate_bearer(header).map_err(|e| {
            debug!(error = %e, "Authentication failed");
            SessionError::Auth(e)
        })?;

        Ok(Self(caller))
    }
}

/// Caller extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// The header failed bearer extraction.
    Auth(AuthError),
    /// The header value was not valid UTF-8.
    InvalidEncoding,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::Auth(err) => err.to_string(),
            Self::InvalidEncoding => String::from("Authorization header is not valid UTF-8"),
        };
        (StatusCode::UNAUTHORIZED, message).into_response()
    }
}
