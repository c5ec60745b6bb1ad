// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization errors.
//!
//! Every variant renders as the same generic `401 Unauthorized` envelope.
//! The granular reason is only available server-side through
//! [`AuthError::error_code`] and the `Display` impl, for logging.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Coarse failure kind reported by the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailureKind {
    MissingHeader,
    MalformedHeader,
    KeyFetchError,
    Unauthorized,
}

impl AuthFailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthFailureKind::MissingHeader => "missing-header",
            AuthFailureKind::MalformedHeader => "malformed-header",
            AuthFailureKind::KeyFetchError => "key-fetch-error",
            AuthFailureKind::Unauthorized => "unauthorized",
        }
    }
}

impl std::fmt::Display for AuthFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authorization error type.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No authorization header present
    #[error("Authorization header is required")]
    MissingAuthHeader,
    /// Header is not `Bearer <token>`
    #[error("Invalid authorization header format (expected 'Bearer <token>')")]
    MalformedAuthHeader,
    /// Token header could not be decoded
    #[error("Token is malformed")]
    MalformedToken,
    /// Token header carries no `kid`
    #[error("Token header has no key id")]
    MissingKeyId,
    /// JWKS fetch or parse failed
    #[error("Failed to fetch JWKS: {0}")]
    KeyFetch(String),
    /// No key in the set matches the token's `kid`
    #[error("No matching key found in JWKS")]
    NoMatchingKey,
    /// Matching key cannot verify RS256 signatures
    #[error("Unsupported key in JWKS: {0}")]
    UnsupportedKey(String),
    /// Signature does not verify (or uses an unexpected algorithm)
    #[error("Token signature is invalid")]
    InvalidSignature,
    #[error("Token has expired")]
    TokenExpired,
    #[error("Token is not yet valid")]
    TokenNotYetValid,
    #[error("Token issuer is invalid")]
    InvalidIssuer,
    #[error("Token audience is invalid")]
    InvalidAudience,
    /// A registered claim required for validation is absent
    #[error("Token is missing required claim '{0}'")]
    MissingClaim(String),
    /// Claims carry no usable `permissions` array
    #[error("Token has no permissions claim")]
    MissingPermissions,
    /// Required permission is not granted
    #[error("Permission '{0}' not granted")]
    PermissionDenied(String),
    /// Handler reached without verified claims in the request
    #[error("Verified claims are not available for this request")]
    ClaimsUnavailable,
}

impl AuthError {
    /// Map the granular error to its failure kind.
    pub fn kind(&self) -> AuthFailureKind {
        match self {
            AuthError::MissingAuthHeader => AuthFailureKind::MissingHeader,
            AuthError::MalformedAuthHeader => AuthFailureKind::MalformedHeader,
            AuthError::KeyFetch(_) => AuthFailureKind::KeyFetchError,
            AuthError::MalformedToken
            | AuthError::MissingKeyId
            | AuthError::NoMatchingKey
            | AuthError::UnsupportedKey(_)
            | AuthError::InvalidSignature
            | AuthError::TokenExpired
            | AuthError::TokenNotYetValid
            | AuthError::InvalidIssuer
            | AuthError::InvalidAudience
            | AuthError::MissingClaim(_)
            | AuthError::MissingPermissions
            | AuthError::PermissionDenied(_)
            | AuthError::ClaimsUnavailable => AuthFailureKind::Unauthorized,
        }
    }

    /// Get the error code for this error (for logs only).
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::MalformedAuthHeader => "malformed_auth_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::MissingKeyId => "missing_key_id",
            AuthError::KeyFetch(_) => "jwks_fetch_error",
            AuthError::NoMatchingKey => "no_matching_key",
            AuthError::UnsupportedKey(_) => "unsupported_key",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::TokenNotYetValid => "token_not_yet_valid",
            AuthError::InvalidIssuer => "invalid_issuer",
            AuthError::InvalidAudience => "invalid_audience",
            AuthError::MissingClaim(_) => "missing_claim",
            AuthError::MissingPermissions => "missing_permissions",
            AuthError::PermissionDenied(_) => "permission_denied",
            AuthError::ClaimsUnavailable => "claims_unavailable",
        }
    }

    /// All authorization failures surface as 401.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::ImmatureSignature => AuthError::TokenNotYetValid,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                AuthError::InvalidSignature
            }
            ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
            ErrorKind::InvalidAudience => AuthError::InvalidAudience,
            ErrorKind::MissingRequiredClaim(claim) => AuthError::MissingClaim(claim.clone()),
            _ => AuthError::MalformedToken,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
