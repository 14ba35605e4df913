// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory database, food seeding and router construction helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `giveas_server`

use anyhow::{Context, Result};
use giveas_server::{
    config::{environment::ServerConfig, DatabaseConfig},
    database_plugins::factory::Database,
    external::{FoodSearchProvider, MockUsdaClient},
    resources::ServerResources,
    server::build_router,
};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup: migrated in-memory `SQLite`
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new(&DatabaseConfig::in_memory()).await
}

/// Insert food names into the `foods` table
pub async fn seed_foods(database: &Database, names: &[&str]) -> Result<()> {
    let pool = database
        .sqlite_pool()
        .context("test database is not SQLite")?;
    for name in names {
        sqlx::query("INSERT INTO foods (name) VALUES (?)")
            .bind(name)
            .execute(pool)
            .await?;
    }
    Ok(())
}

/// Server resources over `database` with the given search provider
pub fn create_test_resources(
    database: Database,
    search: Arc<dyn FoodSearchProvider>,
) -> Arc<ServerResources> {
    Arc::new(ServerResources::new(
        database,
        search,
        Arc::new(ServerConfig::default()),
    ))
}

/// Full application router over a fresh database seeded with `foods`
pub async fn create_test_app(foods: &[&str]) -> Result<(axum::Router, Arc<ServerResources>)> {
    let database = create_test_database().await?;
    seed_foods(&database, foods).await?;
    let resources = create_test_resources(database, Arc::new(MockUsdaClient::new()));
    Ok((build_router(Arc::clone(&resources)), resources))
}
