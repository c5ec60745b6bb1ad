// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware::from_fn_with_state,
    routing::{get, patch, post, MethodRouter},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{require_permission, Guard, Permission},
    error::{ApiError, ErrorBody},
    models::{
        CreateDrinkRequest, DeletedDrink, Drink, DrinkList, DrinkSummary, DrinkSummaryList,
        Ingredient, IngredientSummary, RecipeInput, UpdateDrinkRequest,
    },
    state::AppState,
};

pub mod drinks;
pub mod health;

/// Wrap `route` with the authorization guard for `permission`.
fn guarded(
    state: &AppState,
    permission: Permission,
    route: MethodRouter<AppState>,
) -> MethodRouter<AppState> {
    let guard = Guard::new(state.verifier.clone(), permission);
    route.route_layer(from_fn_with_state(guard, require_permission))
}

async fn not_found() -> ApiError {
    ApiError::not_found()
}

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route(
            "/drinks",
            get(drinks::list_drinks).merge(guarded(
                &state,
                Permission::PostDrinks,
                post(drinks::create_drink),
            )),
        )
        .route(
            "/drinks-detail",
            guarded(
                &state,
                Permission::GetDrinksDetail,
                get(drinks::list_drink_details),
            ),
        )
        .route(
            "/drinks/{id}",
            guarded(&state, Permission::PatchDrinks, patch(drinks::update_drink)).merge(
                guarded(
                    &state,
                    Permission::DeleteDrinks,
                    axum::routing::delete(drinks::delete_drink),
                ),
            ),
        )
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .fallback(not_found)
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        drinks::list_drinks,
        drinks::list_drink_details,
        drinks::create_drink,
        drinks::update_drink,
        drinks::delete_drink,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            Drink,
            DrinkSummary,
            Ingredient,
            IngredientSummary,
            RecipeInput,
            CreateDrinkRequest,
            UpdateDrinkRequest,
            DrinkList,
            DrinkSummaryList,
            DeletedDrink,
            ErrorBody
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "Drinks", description = "Drinks menu"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
