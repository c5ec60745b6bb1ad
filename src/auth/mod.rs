// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authorization Module
//!
//! Permission-based authorization for the drinks API using RS256 tokens
//! issued by a third-party authority.
//!
//! ## Auth Flow
//!
//! 1. Client obtains a token from the authority (Auth0-style tenant)
//! 2. Client sends `Authorization: Bearer <token>`
//! 3. Server:
//!    - Fetches the authority's JWKS from `https://{domain}/.well-known/jwks.json`
//!    - Verifies signature, expiry, issuer, audience
//!    - Checks the route's permission against the `permissions` claim
//!
//! ## Security
//!
//! - Every verification fetches the key set; keys are not cached
//! - Key-set fetches are bounded by a timeout
//! - All failures return the same 401 body; reasons are only logged

pub mod claims;
pub mod error;
pub mod extractor;
pub mod jwks;
pub mod middleware;
pub mod permissions;
pub mod verifier;

pub use claims::DecodedClaims;
pub use error::{AuthError, AuthFailureKind};
pub use extractor::{bearer_token, Authorized};
pub use jwks::JwksClient;
pub use middleware::{authorize, require_permission, Guard};
pub use permissions::{check_permissions, Permission};
pub use verifier::TokenVerifier;
