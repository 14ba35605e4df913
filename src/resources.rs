// ABOUTME: Shared per-process state handed to every HTTP router
// ABOUTME: Bundles the database, food search provider, resume URL store and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Centralized resource container for dependency injection
//!
//! Expensive or shared components are created once at startup and handed to
//! the routers behind a single `Arc<ServerResources>`.

use crate::config::ServerConfig;
use crate::database_plugins::Database;
use crate::errors::AppResult;
use crate::external::{FoodSearchProvider, UsdaClient};
use crate::foods::ResumeStore;
use std::sync::Arc;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Catalog and foods storage
    pub database: Arc<Database>,
    /// Upstream food search
    pub search: Arc<dyn FoodSearchProvider>,
    /// Resume URLs registered by `/giveas-items`
    pub resume_store: Arc<ResumeStore>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Assemble resources from already-built parts
    #[must_use]
    pub fn new(
        database: Database,
        search: Arc<dyn FoodSearchProvider>,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            database: Arc::new(database),
            search,
            resume_store: Arc::new(ResumeStore::new()),
            config,
        }
    }

    /// Assemble resources with the live USDA client built from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the USDA HTTP client cannot be built
    pub fn with_usda_client(database: Database, config: Arc<ServerConfig>) -> AppResult<Self> {
        let search: Arc<dyn FoodSearchProvider> =
            Arc::new(UsdaClient::new(config.usda.clone())?);
        Ok(Self::new(database, search, config))
    }
}
