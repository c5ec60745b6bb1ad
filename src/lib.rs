// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Drinks Server - Coffee Shop Menu API
//!
//! A small CRUD service for a drinks menu. Reads of the short-form menu are
//! public; everything else requires an RS256 bearer token issued by the
//! configured Auth0 tenant and carrying the route's permission.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Bearer token verification against the tenant's JWKS
//! - `config` - Environment configuration
//! - `store` - Drink persistence (in-memory or redb)

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod state;
pub mod store;
