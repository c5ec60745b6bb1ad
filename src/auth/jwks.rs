// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWKS (JSON Web Key Set) fetching.
//!
//! ## Behaviour
//!
//! - The key set is fetched on every call; nothing is cached
//! - Each fetch is bounded by the configured timeout
//! - Any transport, status, or parse failure is a `KeyFetch` error
//!
//! Dropping the returned future abandons the request without side effects.

use std::time::Duration;

use jsonwebtoken::jwk::{AlgorithmParameters, Jwk, JwkSet};
use jsonwebtoken::DecodingKey;
use url::Url;

use super::error::AuthError;

/// Client for the authority's published signing keys.
#[derive(Clone)]
pub struct JwksClient {
    /// JWKS URL (`https://{domain}/.well-known/jwks.json`)
    jwks_url: Url,
    /// HTTP client
    client: reqwest::Client,
}

impl JwksClient {
    /// Create a new JWKS client.
    pub fn new(jwks_url: Url, timeout: Duration) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::KeyFetch(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { jwks_url, client })
    }

    /// Get the JWKS URL.
    pub fn jwks_url(&self) -> &Url {
        &self.jwks_url
    }

    /// Fetch the current key set from the endpoint.
    pub async fn fetch(&self) -> Result<JwkSet, AuthError> {
        tracing::debug!(url = %self.jwks_url, "Fetching JWKS");

        let response = self
            .client
            .get(self.jwks_url.clone())
            .send()
            .await
            .map_err(|e| AuthError::KeyFetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::KeyFetch(format!(
                "HTTP {} from JWKS endpoint",
                response.status()
            )));
        }

        let jwks: JwkSet = response
            .json()
            .await
            .map_err(|e| AuthError::KeyFetch(e.to_string()))?;

        Ok(jwks)
    }

    /// Fetch the key set and build a decoding key for `kid`.
    pub async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        let jwks = self.fetch().await?;
        let jwk = find_key(&jwks, kid).ok_or(AuthError::NoMatchingKey)?;
        rsa_decoding_key(jwk)
    }
}

/// First key in the set whose `kid` equals `kid`.
pub fn find_key<'a>(jwks: &'a JwkSet, kid: &str) -> Option<&'a Jwk> {
    jwks.keys
        .iter()
        .find(|k| k.common.key_id.as_deref() == Some(kid))
}

/// Rebuild an RSA public key from the descriptor's modulus and exponent.
pub fn rsa_decoding_key(jwk: &Jwk) -> Result<DecodingKey, AuthError> {
    match &jwk.algorithm {
        AlgorithmParameters::RSA(rsa) => DecodingKey::from_rsa_components(&rsa.n, &rsa.e)
            .map_err(|e| AuthError::UnsupportedKey(format!("Failed to create RSA key: {e}"))),
        _ => Err(AuthError::UnsupportedKey(
            "Only RSA keys can verify RS256 tokens".to_string(),
        )),
    }
}
