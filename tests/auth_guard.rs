// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, HeaderMap, Method, Request, StatusCode},
    middleware::from_fn_with_state,
    routing::get,
    Json, Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use common::{
    assert_unauthorized, bearer, claims_with, mock_tenant, settings_for, sign, token_with,
    TestApp, KID, PRIMARY_PEM, ROGUE_PEM,
};
use drinks_server::auth::{
    authorize, require_permission, AuthError, AuthFailureKind, Authorized, Guard, Permission,
    TokenVerifier,
};
use serde_json::json;
use tower::ServiceExt;

fn headers(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value.parse().unwrap());
    headers
}

#[tokio::test]
async fn malformed_headers_are_rejected() {
    let app = TestApp::in_memory().await;
    let token = token_with(&["get:drinks-detail"]);

    let cases = [
        None,
        Some(token.clone()),
        Some(format!("Basic {token}")),
        Some("Bearer".to_string()),
        Some(format!("Bearer {token} extra")),
    ];
    for auth in cases {
        let (status, body) = app
            .request(Method::GET, "/drinks-detail", auth.as_deref(), None)
            .await;
        assert_unauthorized(status, &body);
    }
}

#[tokio::test]
async fn scheme_is_case_insensitive() {
    let app = TestApp::in_memory().await;
    let token = token_with(&["get:drinks-detail"]);

    let (status, _) = app
        .request(
            Method::GET,
            "/drinks-detail",
            Some(&format!("bearer {token}")),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn every_route_checks_its_own_permission() {
    let app = TestApp::in_memory().await;
    let id = app.seed("Latte", json!({"name": "milk", "color": "white", "parts": 1})).await;
    let everything_else = bearer(&token_with(&["get:drinks-detail"]));

    let routes = [
        (Method::POST, "/drinks".to_string(), Some(json!({"title": "Mocha", "recipe": []}))),
        (Method::PATCH, format!("/drinks/{id}"), Some(json!({"title": "Mocha"}))),
        (Method::DELETE, format!("/drinks/{id}"), None),
    ];
    for (method, uri, body) in routes {
        let (status, response) = app
            .request(method.clone(), &uri, Some(&everything_else), body)
            .await;
        assert_unauthorized(status, &response);
    }
}

#[tokio::test]
async fn token_without_permissions_claim_is_rejected() {
    let app = TestApp::in_memory().await;
    let mut claims = claims_with(&[]);
    claims.as_object_mut().unwrap().remove("permissions");
    let token = sign(&claims, PRIMARY_PEM, Some(KID));

    let (status, body) = app
        .request(Method::GET, "/drinks-detail", Some(&bearer(&token)), None)
        .await;
    assert_unauthorized(status, &body);
}

#[tokio::test]
async fn signature_from_unpublished_key_is_rejected() {
    let app = TestApp::in_memory().await;
    let token = sign(&claims_with(&["get:drinks-detail"]), ROGUE_PEM, Some(KID));

    let (status, body) = app
        .request(Method::GET, "/drinks-detail", Some(&bearer(&token)), None)
        .await;
    assert_unauthorized(status, &body);
}

#[tokio::test]
async fn unknown_kid_is_rejected() {
    let app = TestApp::in_memory().await;
    let token = sign(
        &claims_with(&["get:drinks-detail"]),
        PRIMARY_PEM,
        Some("someone-else"),
    );

    let (status, body) = app
        .request(Method::GET, "/drinks-detail", Some(&bearer(&token)), None)
        .await;
    assert_unauthorized(status, &body);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let app = TestApp::in_memory().await;
    let mut claims = claims_with(&["get:drinks-detail"]);
    claims["exp"] = json!(common::now() - 3600);
    let token = sign(&claims, PRIMARY_PEM, Some(KID));

    let (status, body) = app
        .request(Method::GET, "/drinks-detail", Some(&bearer(&token)), None)
        .await;
    assert_unauthorized(status, &body);
}

#[tokio::test]
async fn unsigned_token_is_rejected() {
    let app = TestApp::in_memory().await;
    let header = URL_SAFE_NO_PAD.encode(json!({"alg": "none", "typ": "JWT", "kid": KID}).to_string());
    let payload = URL_SAFE_NO_PAD.encode(claims_with(&["get:drinks-detail"]).to_string());
    let token = format!("{header}.{payload}.");

    let (status, body) = app
        .request(Method::GET, "/drinks-detail", Some(&bearer(&token)), None)
        .await;
    assert_unauthorized(status, &body);
}

#[tokio::test]
async fn authorize_returns_claims_unchanged() {
    let tenant = mock_tenant().await;
    let verifier = Arc::new(TokenVerifier::new(&settings_for(&tenant)).unwrap());
    let claims = claims_with(&["get:drinks-detail", "post:drinks"]);
    let token = sign(&claims, PRIMARY_PEM, Some(KID));

    let decoded = authorize(&headers(&bearer(&token)), &verifier, "post:drinks")
        .await
        .expect("authorized");

    assert_eq!(serde_json::to_value(&decoded).unwrap(), claims);
}

#[tokio::test]
async fn handler_receives_claims_unchanged() {
    let tenant = mock_tenant().await;
    let verifier = Arc::new(TokenVerifier::new(&settings_for(&tenant)).unwrap());
    let guard = Guard::new(verifier, Permission::GetDrinksDetail);
    let app = Router::new().route(
        "/echo",
        get(|Authorized(claims): Authorized| async move { Json(claims) })
            .route_layer(from_fn_with_state(guard, require_permission)),
    );

    let mut claims = claims_with(&["get:drinks-detail"]);
    claims["nickname"] = json!("barista");
    claims["https://drinks.example/roles"] = json!(["manager"]);
    let token = sign(&claims, PRIMARY_PEM, Some(KID));

    let request = Request::builder()
        .uri("/echo")
        .header(AUTHORIZATION, bearer(&token))
        .body(Body::empty())
        .unwrap();
    let (status, body) = common::read_json(app.oneshot(request).await.unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, claims);
}

#[tokio::test]
async fn authorize_classifies_failures() {
    let tenant = mock_tenant().await;
    let verifier = TokenVerifier::new(&settings_for(&tenant)).unwrap();

    let err = authorize(&HeaderMap::new(), &verifier, "post:drinks")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), AuthFailureKind::MissingHeader);

    let err = authorize(&headers("Token abc"), &verifier, "post:drinks")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), AuthFailureKind::MalformedHeader);

    let token = token_with(&["get:drinks-detail"]);
    let err = authorize(&headers(&bearer(&token)), &verifier, "post:drinks")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::PermissionDenied(_)));
    assert_eq!(err.kind(), AuthFailureKind::Unauthorized);
}

#[tokio::test]
async fn unreachable_key_set_rejects_request() {
    let app = TestApp::in_memory().await;
    let token = token_with(&["get:drinks-detail"]);
    app.tenant.reset().await;

    let (status, body) = app
        .request(Method::GET, "/drinks-detail", Some(&bearer(&token)), None)
        .await;
    assert_unauthorized(status, &body);
}
