// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Process-local drink store.

use std::collections::BTreeMap;

use super::{ensure_title_free, DrinkStore, StoreError, StoreResult};
use crate::models::{Drink, DrinkId, NewDrink};

#[derive(Default)]
pub struct InMemoryDrinkStore {
    drinks: BTreeMap<DrinkId, Drink>,
    last_id: DrinkId,
}

impl InMemoryDrinkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DrinkStore for InMemoryDrinkStore {
    fn list(&self) -> StoreResult<Vec<Drink>> {
        Ok(self.drinks.values().cloned().collect())
    }

    fn get(&self, id: DrinkId) -> StoreResult<Option<Drink>> {
        Ok(self.drinks.get(&id).cloned())
    }

    fn insert(&mut self, drink: NewDrink) -> StoreResult<Drink> {
        ensure_title_free(self.drinks.values(), &drink.title, None)?;

        self.last_id += 1;
        let drink = Drink {
            id: self.last_id,
            title: drink.title,
            recipe: drink.recipe,
        };
        self.drinks.insert(drink.id, drink.clone());
        Ok(drink)
    }

    fn update(&mut self, drink: Drink) -> StoreResult<Drink> {
        if !self.drinks.contains_key(&drink.id) {
            return Err(StoreError::NotFound(drink.id));
        }
        ensure_title_free(self.drinks.values(), &drink.title, Some(drink.id))?;

        self.drinks.insert(drink.id, drink.clone());
        Ok(drink)
    }

    fn delete(&mut self, id: DrinkId) -> StoreResult<Option<Drink>> {
        Ok(self.drinks.remove(&id))
    }
}
