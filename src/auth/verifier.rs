// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! RS256 token verification against the authority's key set.
//!
//! ## Steps
//!
//! 1. Read `kid` from the unverified token header
//! 2. Fetch the key set and take the first key with that `kid`
//! 3. Rebuild the RSA public key from `n`/`e`
//! 4. Verify signature, `aud`, `iss`, and `exp` (plus `nbf` when present)
//!
//! Every failure is returned as an [`AuthError`]; there is no path that yields
//! claims without passing all four steps.

use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde_json::{Map, Value};

use super::claims::DecodedClaims;
use super::error::AuthError;
use super::jwks::JwksClient;
use crate::config::AuthSettings;

/// The only accepted signature algorithm.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::RS256;

/// Verifies bearer tokens issued by the configured authority.
#[derive(Clone)]
pub struct TokenVerifier {
    jwks: JwksClient,
    issuer: String,
    audience: String,
    leeway: u64,
}

impl TokenVerifier {
    pub fn new(settings: &AuthSettings) -> Result<Self, AuthError> {
        Ok(Self {
            jwks: JwksClient::new(settings.jwks_url.clone(), settings.jwks_timeout)?,
            issuer: settings.issuer.clone(),
            audience: settings.audience.clone(),
            leeway: settings.leeway,
        })
    }

    pub fn jwks(&self) -> &JwksClient {
        &self.jwks
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.leeway = self.leeway;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "aud", "iss"]);
        validation
    }

    /// Verify `token` and return its claims.
    pub async fn verify(&self, token: &str) -> Result<DecodedClaims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::MalformedToken)?;
        let kid = header.kid.ok_or(AuthError::MissingKeyId)?;

        let decoding_key = self.jwks.decoding_key(&kid).await?;

        let token_data = decode::<Map<String, Value>>(token, &decoding_key, &self.validation())?;

        tracing::debug!(kid = %kid, "Token verified");
        Ok(DecodedClaims::from_verified(token_data.claims))
    }
}
