// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Drink Storage
//!
//! Persistence for the single resource type of the service. Handlers only see
//! the [`DrinkStore`] trait; the concrete backend is picked at startup.
//!
//! - [`InMemoryDrinkStore`]: process-local, used when `DATABASE_PATH` is unset
//!   and in tests
//! - [`RedbDrinkStore`]: embedded ACID database file
//!
//! Lookups return `Option` so callers can reject unknown ids before mutating
//! anything. Titles are unique across the store.

pub mod database;
pub mod memory;

pub use database::RedbDrinkStore;
pub use memory::InMemoryDrinkStore;

use crate::models::{Drink, DrinkId, NewDrink};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("drink title already in use: {0}")]
    DuplicateTitle(String),

    #[error("drink not found: {0}")]
    NotFound(DrinkId),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD operations over drinks.
pub trait DrinkStore: Send + Sync {
    /// All drinks, ordered by id.
    fn list(&self) -> StoreResult<Vec<Drink>>;

    fn get(&self, id: DrinkId) -> StoreResult<Option<Drink>>;

    /// Insert a drink and return it with its assigned id.
    fn insert(&mut self, drink: NewDrink) -> StoreResult<Drink>;

    /// Replace an existing drink. Fails with `NotFound` for unknown ids.
    fn update(&mut self, drink: Drink) -> StoreResult<Drink>;

    /// Remove a drink, returning it if it existed.
    fn delete(&mut self, id: DrinkId) -> StoreResult<Option<Drink>>;
}

/// Title uniqueness check shared by the backends. `except` is the id being
/// updated, which may keep its own title.
pub(crate) fn ensure_title_free<'a>(
    mut existing: impl Iterator<Item = &'a Drink>,
    title: &str,
    except: Option<DrinkId>,
) -> StoreResult<()> {
    if existing.any(|d| d.title == title && Some(d.id) != except) {
        return Err(StoreError::DuplicateTitle(title.to_string()));
    }
    Ok(())
}
