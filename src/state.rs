// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::{AuthError, TokenVerifier};
use crate::config::{AuthSettings, Config};
use crate::store::{DrinkStore, InMemoryDrinkStore, RedbDrinkStore, StoreError};

/// Boxed store shared across handlers.
pub type SharedStore = Arc<RwLock<Box<dyn DrinkStore>>>;

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to open drink store: {0}")]
    Store(#[from] StoreError),

    #[error("failed to initialise token verifier: {0}")]
    Auth(#[from] AuthError),
}

/// Request-scoped context handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(store: impl DrinkStore + 'static, verifier: TokenVerifier) -> Self {
        Self {
            store: Arc::new(RwLock::new(Box::new(store))),
            verifier: Arc::new(verifier),
        }
    }

    /// Build state with an in-memory store.
    pub fn in_memory(settings: &AuthSettings) -> Result<Self, StateError> {
        Ok(Self::new(
            InMemoryDrinkStore::new(),
            TokenVerifier::new(settings)?,
        ))
    }

    /// Build state from process configuration.
    pub fn from_config(config: &Config) -> Result<Self, StateError> {
        let verifier = TokenVerifier::new(&config.auth)?;
        let state = match &config.database_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Opening drink database");
                Self::new(RedbDrinkStore::open(path)?, verifier)
            }
            None => {
                tracing::info!("Using in-memory drink store");
                Self::new(InMemoryDrinkStore::new(), verifier)
            }
        };
        Ok(state)
    }
}
