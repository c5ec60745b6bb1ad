// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Decoded token claims.
//!
//! [`DecodedClaims`] has no public constructor and does not implement
//! `Deserialize`: the only way to obtain one is a successful
//! [`TokenVerifier::verify`](super::verifier::TokenVerifier::verify).

use serde::Serialize;
use serde_json::{Map, Value};

/// Name of the claim carrying granted permissions.
pub const PERMISSIONS_CLAIM: &str = "permissions";

/// Claim set of a verified token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DecodedClaims {
    claims: Map<String, Value>,
}

impl DecodedClaims {
    /// Only the verifier may wrap a payload.
    pub(super) fn from_verified(claims: Map<String, Value>) -> Self {
        Self { claims }
    }

    /// Subject (`sub`), if present.
    pub fn subject(&self) -> Option<&str> {
        self.claims.get("sub").and_then(Value::as_str)
    }

    /// The `permissions` claim.
    ///
    /// `None` when the claim is absent or is not an array. Non-string entries
    /// are skipped.
    pub fn permissions(&self) -> Option<Vec<&str>> {
        self.claims
            .get(PERMISSIONS_CLAIM)
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(Value::as_str).collect())
    }

    /// Raw access to any claim.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// The full claim mapping as issued.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.claims
    }
}
