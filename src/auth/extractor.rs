// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token extraction and the claims extractor for guarded handlers.
//!
//! Handlers mounted behind [`require_permission`](super::middleware::require_permission)
//! receive the verified claims with the `Authorized` extractor:
//!
//! ```rust,ignore
//! async fn my_handler(Authorized(claims): Authorized) -> impl IntoResponse {
//!     // claims is DecodedClaims
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use super::{AuthError, DecodedClaims};

/// Authorization scheme accepted by [`bearer_token`].
const BEARER_SCHEME: &str = "bearer";

/// Pull the bearer credential out of the `Authorization` header.
///
/// The header must split on single spaces into exactly two parts, the first
/// being `bearer` in any case. The second part is returned as-is.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedAuthHeader)?;

    let parts: Vec<&str> = auth_header.split(' ').collect();
    match parts.as_slice() {
        [scheme, token] if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => Ok(*token),
        _ => Err(AuthError::MalformedAuthHeader),
    }
}

/// Extractor for claims placed in the request by the authorization guard.
///
/// Rejects with 401 when the handler was reached without passing the guard.
pub struct Authorized(pub DecodedClaims);

impl<S> FromRequestParts<S> for Authorized
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<DecodedClaims>()
            .cloned()
            .map(Authorized)
            .ok_or(AuthError::ClaimsUnavailable)
    }
}
