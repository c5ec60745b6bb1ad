// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the drinks API. All types derive
//! `ToSchema` for the OpenAPI document.
//!
//! ## Representations
//!
//! A [`Drink`] is exposed in two forms:
//!
//! - **short** ([`DrinkSummary`]): recipe reduced to colour and parts, used by
//!   the public menu listing
//! - **long** ([`Drink`] itself): full recipe including ingredient names

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::UNPROCESSABLE_MESSAGE;

/// Drink identifier assigned by the store.
pub type DrinkId = i64;

// =============================================================================
// Drink
// =============================================================================

/// One ingredient of a recipe.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Ingredient {
    /// Ingredient name, e.g. `milk`.
    pub name: String,
    /// Display colour used when rendering the drink.
    pub color: String,
    /// Relative amount of this ingredient.
    pub parts: u32,
}

/// A drink on the menu (long form).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Drink {
    pub id: DrinkId,
    /// Unique title.
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Ingredient without its name.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct IngredientSummary {
    pub color: String,
    pub parts: u32,
}

/// A drink with its recipe reduced to colours and parts (short form).
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct DrinkSummary {
    pub id: DrinkId,
    pub title: String,
    pub recipe: Vec<IngredientSummary>,
}

impl Drink {
    pub fn short(&self) -> DrinkSummary {
        DrinkSummary {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|ingredient| IngredientSummary {
                    color: ingredient.color.clone(),
                    parts: ingredient.parts,
                })
                .collect(),
        }
    }
}

/// A validated drink ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDrink {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

// =============================================================================
// Requests
// =============================================================================

/// A recipe given either as a list of ingredients or as a single ingredient.
#[derive(Debug, Clone, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum RecipeInput {
    Many(Vec<Ingredient>),
    One(Ingredient),
}

impl RecipeInput {
    pub fn into_vec(self) -> Vec<Ingredient> {
        match self {
            RecipeInput::Many(ingredients) => ingredients,
            RecipeInput::One(ingredient) => vec![ingredient],
        }
    }
}

/// Body of `POST /drinks`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateDrinkRequest {
    pub title: Option<String>,
    pub recipe: Option<RecipeInput>,
}

/// Body of `PATCH /drinks/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateDrinkRequest {
    pub title: Option<String>,
    pub recipe: Option<RecipeInput>,
}

impl CreateDrinkRequest {
    /// Validate into a [`NewDrink`]; the error is the client-facing message.
    pub fn validate(self) -> Result<NewDrink, String> {
        let title = validate_title(self.title.ok_or(UNPROCESSABLE_MESSAGE)?)?;
        let recipe = validate_recipe(self.recipe.ok_or(UNPROCESSABLE_MESSAGE)?)?;
        Ok(NewDrink { title, recipe })
    }
}

impl UpdateDrinkRequest {
    /// Apply the present fields to `drink`.
    pub fn apply_to(self, mut drink: Drink) -> Result<Drink, String> {
        if let Some(title) = self.title {
            drink.title = validate_title(title)?;
        }
        if let Some(recipe) = self.recipe {
            drink.recipe = validate_recipe(recipe)?;
        }
        Ok(drink)
    }
}

fn validate_title(title: String) -> Result<String, String> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Drink title must not be empty.".to_string());
    }
    Ok(title.to_string())
}

fn validate_recipe(recipe: RecipeInput) -> Result<Vec<Ingredient>, String> {
    let recipe = recipe.into_vec();
    if recipe.is_empty() {
        return Err("Recipe must contain at least one ingredient.".to_string());
    }
    if recipe.iter().any(|i| i.name.trim().is_empty()) {
        return Err("Every ingredient needs a name.".to_string());
    }
    Ok(recipe)
}

// =============================================================================
// Responses
// =============================================================================

/// `GET /drinks` response.
#[derive(Debug, Serialize, ToSchema)]
pub struct DrinkSummaryList {
    pub success: bool,
    pub drinks: Vec<DrinkSummary>,
}

/// Long-form drinks response used by the protected endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct DrinkList {
    pub success: bool,
    pub drinks: Vec<Drink>,
}

/// `DELETE /drinks/{id}` response.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedDrink {
    pub success: bool,
    /// Id of the removed drink.
    pub delete: DrinkId,
}
