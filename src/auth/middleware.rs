// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization guard for Axum.
//!
//! [`authorize`] composes the three checks in order:
//!
//! 1. [`bearer_token`] - pull the credential from the `Authorization` header
//! 2. [`TokenVerifier::verify`] - signature, audience, issuer, expiry
//! 3. [`check_permissions`] - the route's permission must be granted
//!
//! The first failure short-circuits the rest. [`require_permission`] wraps a
//! route with this check and hands the verified claims to the handler through
//! the request extensions. Nothing is retained between requests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let guard = Guard::new(verifier, Permission::PostDrinks);
//!
//! let route = post(create_drink)
//!     .route_layer(axum::middleware::from_fn_with_state(guard, require_permission));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{
    bearer_token, check_permissions, AuthError, DecodedClaims, Permission, TokenVerifier,
};

/// Per-route guard configuration.
#[derive(Clone)]
pub struct Guard {
    pub verifier: Arc<TokenVerifier>,
    pub permission: Permission,
}

impl Guard {
    pub fn new(verifier: Arc<TokenVerifier>, permission: Permission) -> Self {
        Self {
            verifier,
            permission,
        }
    }
}

/// Run extractor, verifier, and permission check against `headers`.
pub async fn authorize(
    headers: &HeaderMap,
    verifier: &TokenVerifier,
    permission: &str,
) -> Result<DecodedClaims, AuthError> {
    let token = bearer_token(headers)?;
    let claims = verifier.verify(token).await?;
    check_permissions(permission, &claims)?;
    Ok(claims)
}

/// Middleware that admits the request only if [`authorize`] succeeds.
pub async fn require_permission(
    State(guard): State<Guard>,
    mut request: Request,
    next: Next,
) -> Response {
    let outcome = authorize(request.headers(), &guard.verifier, guard.permission.as_str()).await;
    match outcome {
        Ok(claims) => {
            tracing::debug!(
                permission = %guard.permission,
                subject = claims.subject().unwrap_or("<none>"),
                "Request authorized"
            );
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}
