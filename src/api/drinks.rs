// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Drink endpoints.
//!
//! `GET /drinks` is public. Every other endpoint sits behind the authorization
//! guard and receives the verified claims through [`Authorized`].

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};

use crate::{
    auth::Authorized,
    error::{ApiError, UNPROCESSABLE_MESSAGE},
    models::{
        CreateDrinkRequest, DeletedDrink, DrinkId, DrinkList, DrinkSummaryList,
        UpdateDrinkRequest,
    },
    state::AppState,
};

/// Non-integer ids never match a drink.
fn drink_id(path: Result<Path<DrinkId>, PathRejection>) -> Result<DrinkId, ApiError> {
    path.map(|Path(id)| id).map_err(|_| ApiError::not_found())
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected request body");
        ApiError::unprocessable(UNPROCESSABLE_MESSAGE)
    })
}

/// List the menu (short form).
#[utoipa::path(
    get,
    path = "/drinks",
    tag = "Drinks",
    responses((status = 200, body = DrinkSummaryList))
)]
pub async fn list_drinks(State(state): State<AppState>) -> Result<Json<DrinkSummaryList>, ApiError> {
    let store = state.store.read().await;
    let drinks = store.list()?.iter().map(|drink| drink.short()).collect();
    Ok(Json(DrinkSummaryList {
        success: true,
        drinks,
    }))
}

/// List the menu with full recipes.
#[utoipa::path(
    get,
    path = "/drinks-detail",
    tag = "Drinks",
    security(("bearer" = ["get:drinks-detail"])),
    responses(
        (status = 200, body = DrinkList),
        (status = 401, body = crate::error::ErrorBody)
    )
)]
pub async fn list_drink_details(
    Authorized(_claims): Authorized,
    State(state): State<AppState>,
) -> Result<Json<DrinkList>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(DrinkList {
        success: true,
        drinks: store.list()?,
    }))
}

/// Add a drink to the menu.
#[utoipa::path(
    post,
    path = "/drinks",
    tag = "Drinks",
    request_body = CreateDrinkRequest,
    security(("bearer" = ["post:drinks"])),
    responses(
        (status = 200, description = "The new drink, long form", body = DrinkList),
        (status = 401, body = crate::error::ErrorBody),
        (status = 422, body = crate::error::ErrorBody)
    )
)]
pub async fn create_drink(
    Authorized(claims): Authorized,
    State(state): State<AppState>,
    body: Result<Json<CreateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinkList>, ApiError> {
    let new_drink = json_body(body)?
        .validate()
        .map_err(ApiError::unprocessable)?;

    let mut store = state.store.write().await;
    let drink = store.insert(new_drink)?;
    tracing::info!(
        drink_id = drink.id,
        title = %drink.title,
        subject = claims.subject().unwrap_or("<none>"),
        "Drink created"
    );

    Ok(Json(DrinkList {
        success: true,
        drinks: vec![drink],
    }))
}

/// Edit an existing drink.
#[utoipa::path(
    patch,
    path = "/drinks/{id}",
    tag = "Drinks",
    params(("id" = i64, Path, description = "Identifier of the drink to edit")),
    request_body = UpdateDrinkRequest,
    security(("bearer" = ["patch:drinks"])),
    responses(
        (status = 200, description = "The updated drink, long form", body = DrinkList),
        (status = 401, body = crate::error::ErrorBody),
        (status = 404, body = crate::error::ErrorBody),
        (status = 422, body = crate::error::ErrorBody)
    )
)]
pub async fn update_drink(
    Authorized(claims): Authorized,
    path: Result<Path<DrinkId>, PathRejection>,
    State(state): State<AppState>,
    body: Result<Json<UpdateDrinkRequest>, JsonRejection>,
) -> Result<Json<DrinkList>, ApiError> {
    let id = drink_id(path)?;

    let mut store = state.store.write().await;
    let existing = store.get(id)?.ok_or_else(ApiError::not_found)?;

    let patched = json_body(body)?
        .apply_to(existing)
        .map_err(ApiError::unprocessable)?;
    let drink = store.update(patched)?;
    tracing::info!(
        drink_id = drink.id,
        subject = claims.subject().unwrap_or("<none>"),
        "Drink updated"
    );

    Ok(Json(DrinkList {
        success: true,
        drinks: vec![drink],
    }))
}

/// Remove a drink from the menu.
#[utoipa::path(
    delete,
    path = "/drinks/{id}",
    tag = "Drinks",
    params(("id" = i64, Path, description = "Identifier of the drink to delete")),
    security(("bearer" = ["delete:drinks"])),
    responses(
        (status = 200, body = DeletedDrink),
        (status = 401, body = crate::error::ErrorBody),
        (status = 404, body = crate::error::ErrorBody)
    )
)]
pub async fn delete_drink(
    Authorized(claims): Authorized,
    path: Result<Path<DrinkId>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<DeletedDrink>, ApiError> {
    let id = drink_id(path)?;

    let mut store = state.store.write().await;
    if store.get(id)?.is_none() {
        return Err(ApiError::not_found());
    }
    store.delete(id)?;
    tracing::info!(
        drink_id = id,
        subject = claims.subject().unwrap_or("<none>"),
        "Drink deleted"
    );

    Ok(Json(DeletedDrink {
        success: true,
        delete: id,
    }))
}
