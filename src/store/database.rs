// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded drink database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `drinks`: id → serialized Drink (JSON bytes)
//! - `meta`: key → value (`last_id` sequence)

use std::path::Path;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use super::{ensure_title_free, DrinkStore, StoreError, StoreResult};
use crate::models::{Drink, DrinkId, NewDrink};

const DRINKS: TableDefinition<i64, &[u8]> = TableDefinition::new("drinks");

const META: TableDefinition<&str, i64> = TableDefinition::new("meta");

const LAST_ID_KEY: &str = "last_id";

pub struct RedbDrinkStore {
    db: Database,
}

impl RedbDrinkStore {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;

        // Pre-create tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(DRINKS)?;
            let _ = write_txn.open_table(META)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    fn all(table: &impl ReadableTable<i64, &'static [u8]>) -> StoreResult<Vec<Drink>> {
        let mut drinks = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            drinks.push(serde_json::from_slice(value.value())?);
        }
        Ok(drinks)
    }
}

impl DrinkStore for RedbDrinkStore {
    fn list(&self) -> StoreResult<Vec<Drink>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DRINKS)?;
        Self::all(&table)
    }

    fn get(&self, id: DrinkId) -> StoreResult<Option<Drink>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DRINKS)?;
        let drink = match table.get(id)? {
            Some(value) => Some(serde_json::from_slice(value.value())?),
            None => None,
        };
        Ok(drink)
    }

    fn insert(&mut self, drink: NewDrink) -> StoreResult<Drink> {
        let write_txn = self.db.begin_write()?;
        let stored = {
            let mut drinks = write_txn.open_table(DRINKS)?;
            ensure_title_free(Self::all(&drinks)?.iter(), &drink.title, None)?;

            let mut meta = write_txn.open_table(META)?;
            let last_id = meta.get(LAST_ID_KEY)?.map(|v| v.value()).unwrap_or(0);
            let id = last_id + 1;
            meta.insert(LAST_ID_KEY, id)?;

            let stored = Drink {
                id,
                title: drink.title,
                recipe: drink.recipe,
            };
            let json = serde_json::to_vec(&stored)?;
            drinks.insert(id, json.as_slice())?;
            stored
        };
        write_txn.commit()?;
        Ok(stored)
    }

    fn update(&mut self, drink: Drink) -> StoreResult<Drink> {
        let write_txn = self.db.begin_write()?;
        {
            let mut drinks = write_txn.open_table(DRINKS)?;
            if drinks.get(drink.id)?.is_none() {
                return Err(StoreError::NotFound(drink.id));
            }
            ensure_title_free(Self::all(&drinks)?.iter(), &drink.title, Some(drink.id))?;

            let json = serde_json::to_vec(&drink)?;
            drinks.insert(drink.id, json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(drink)
    }

    fn delete(&mut self, id: DrinkId) -> StoreResult<Option<Drink>> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut drinks = write_txn.open_table(DRINKS)?;
            let removed = match drinks.remove(id)? {
                Some(value) => Some(serde_json::from_slice::<Drink>(value.value())?),
                None => None,
            };
            removed
        };
        write_txn.commit()?;
        Ok(removed)
    }
}
