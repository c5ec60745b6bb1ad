// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared harness: a mock Auth0 tenant serving a JWKS, token minting, and an
//! in-process router driven with `oneshot`.

#![allow(dead_code)]

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use drinks_server::{
    api::router, auth::TokenVerifier, config::AuthSettings, state::AppState,
    store::RedbDrinkStore,
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PRIMARY_PEM: &str = include_str!("../fixtures/primary_rsa.pem");
pub const PRIMARY_N: &str = include_str!("../fixtures/primary_rsa.n");
pub const ROGUE_PEM: &str = include_str!("../fixtures/rogue_rsa.pem");

pub const DOMAIN: &str = "tenant.example.auth0.com";
pub const AUDIENCE: &str = "drinks";
pub const KID: &str = "primary";

pub fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Claims the tenant would issue to a user holding `permissions`.
pub fn claims_with(permissions: &[&str]) -> Value {
    json!({
        "iss": format!("https://{DOMAIN}/"),
        "sub": "auth0|barista",
        "aud": AUDIENCE,
        "iat": now(),
        "exp": now() + 600,
        "permissions": permissions
    })
}

pub fn sign(claims: &Value, pem: &str, kid: Option<&str>) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(str::to_string);
    encode(
        &header,
        claims,
        &EncodingKey::from_rsa_pem(pem.as_bytes()).unwrap(),
    )
    .unwrap()
}

/// Token signed by the tenant's published key.
pub fn token_with(permissions: &[&str]) -> String {
    sign(&claims_with(permissions), PRIMARY_PEM, Some(KID))
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Start a mock tenant publishing the primary key.
pub async fn mock_tenant() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/.well-known/jwks.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "keys": [{
                "kty": "RSA",
                "kid": KID,
                "use": "sig",
                "alg": "RS256",
                "n": PRIMARY_N.trim(),
                "e": "AQAB"
            }]
        })))
        .mount(&server)
        .await;
    server
}

pub fn settings_for(server: &MockServer) -> AuthSettings {
    let jwks_url = Url::parse(&format!("{}/.well-known/jwks.json", server.uri())).unwrap();
    AuthSettings::for_domain(DOMAIN, AUDIENCE)
        .unwrap()
        .with_jwks_url(jwks_url)
        .with_jwks_timeout(Duration::from_secs(2))
}

/// Test application bound to a running mock tenant.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub tenant: MockServer,
}

impl TestApp {
    pub async fn in_memory() -> Self {
        let tenant = mock_tenant().await;
        let state = AppState::in_memory(&settings_for(&tenant)).unwrap();
        Self {
            router: router(state.clone()),
            state,
            tenant,
        }
    }

    pub async fn with_database(path: &std::path::Path) -> Self {
        let tenant = mock_tenant().await;
        let verifier = TokenVerifier::new(&settings_for(&tenant)).unwrap();
        let state = AppState::new(RedbDrinkStore::open(path).unwrap(), verifier);
        Self {
            router: router(state.clone()),
            state,
            tenant,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        auth: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).unwrap()).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        read_json(response).await
    }

    /// POST a drink with a fully-privileged token and return its id.
    pub async fn seed(&self, title: &str, recipe: Value) -> i64 {
        let token = token_with(&["post:drinks"]);
        let (status, body) = self
            .request(
                Method::POST,
                "/drinks",
                Some(&bearer(&token)),
                Some(json!({ "title": title, "recipe": recipe })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "seed failed: {body}");
        body["drinks"][0]["id"].as_i64().unwrap()
    }
}

pub async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub fn assert_unauthorized(status: StatusCode, body: &Value) {
    assert_eq!(status, StatusCode::UNAUTHORIZED, "body: {body}");
    assert_eq!(
        body,
        &json!({ "success": false, "error": 401, "message": "Unauthorized." })
    );
}
