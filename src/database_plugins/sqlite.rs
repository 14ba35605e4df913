// ABOUTME: SQLite implementation of the DatabaseProvider trait
// ABOUTME: Local file or in-memory storage for the nutrient catalog and food names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! `SQLite` database implementation
//!
//! Used for local development, tests and single-host deployments. Nutrient
//! names are unique without regard to ASCII case, matching the default
//! collation of the `MySQL` deployment. Food lookups compare through the
//! connection-level `UNICODE_NOCASE` collation because SQLite's `LOWER` only
//! folds ASCII letters.

use super::{lowered_lookup_keys, placeholders, DatabaseProvider, LOOKUP_CHUNK_SIZE};
use crate::config::DatabaseConfig;
use crate::nutrients::{NutrientCategory, NutrientEntity};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::cmp::Ordering;
use std::str::FromStr;
use tracing::{debug, info};

const NUTRIENT_COLUMNS: &str =
    "name, unit, category, usda_nutrient_number, is_visible, sort_order";

/// Collation registered on every pool connection
const UNICODE_NOCASE: &str = "UNICODE_NOCASE";

/// Order two strings by their Unicode lowercase forms
fn unicode_nocase(left: &str, right: &str) -> Ordering {
    if left.is_ascii() && right.is_ascii() {
        return left
            .bytes()
            .map(|b| b.to_ascii_lowercase())
            .cmp(right.bytes().map(|b| b.to_ascii_lowercase()));
    }
    left.to_lowercase().cmp(&right.to_lowercase())
}

/// `SQLite` database implementation
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DatabaseProvider for SqliteDatabase {
    async fn new(config: &DatabaseConfig) -> Result<Self> {
        let database_url = config.url.to_connection_string();
        let options = SqliteConnectOptions::from_str(&database_url)
            .with_context(|| format!("Invalid SQLite URL {database_url}"))?
            .create_if_missing(true)
            .collation(UNICODE_NOCASE, unicode_nocase);

        let pool = if config.url.is_memory() {
            // Each in-memory connection is its own database: keep exactly one alive
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            if let Some(parent) = options.get_filename().parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await.with_context(|| {
                        format!("Failed to create database directory {}", parent.display())
                    })?;
                }
            }
            SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .connect_with(options)
                .await?
        };

        debug!("SQLite pool ready for {}", config.url);
        let db = Self { pool };

        if config.auto_migrate {
            db.migrate().await?;
        }

        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS nutrients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE COLLATE NOCASE,
                unit TEXT NOT NULL DEFAULT '',
                category TEXT NOT NULL DEFAULT 'Other',
                usda_nutrient_number TEXT,
                is_visible INTEGER NOT NULL DEFAULT 1,
                sort_order INTEGER NOT NULL DEFAULT 999
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_nutrients_display ON nutrients (is_visible, sort_order, name)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS foods (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        info!("SQLite schema is up to date");
        Ok(())
    }

    async fn ping(&self) -> Result<i64> {
        let result: i64 = sqlx::query_scalar("SELECT 1 + 1 AS result")
            .fetch_one(&self.pool)
            .await?;
        Ok(result)
    }

    async fn upsert_nutrient(&self, nutrient: &NutrientEntity) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO nutrients (name, unit, category, usda_nutrient_number, is_visible, sort_order)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(name) DO UPDATE SET
                unit = excluded.unit,
                category = excluded.category,
                sort_order = excluded.sort_order
            ",
        )
        .bind(&nutrient.name)
        .bind(&nutrient.unit)
        .bind(nutrient.category.as_str())
        .bind(&nutrient.usda_number)
        .bind(nutrient.is_visible)
        .bind(nutrient.sort_order)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to upsert nutrient '{}'", nutrient.name))?;
        Ok(())
    }

    async fn get_nutrient(&self, name: &str) -> Result<Option<NutrientEntity>> {
        let sql = format!("SELECT {NUTRIENT_COLUMNS} FROM nutrients WHERE name = ?");
        let row = sqlx::query(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_nutrient).transpose()
    }

    async fn list_nutrients(
        &self,
        category: Option<NutrientCategory>,
    ) -> Result<Vec<NutrientEntity>> {
        let rows = match category {
            Some(category) => {
                let sql = format!(
                    "SELECT {NUTRIENT_COLUMNS} FROM nutrients \
                     WHERE is_visible = 1 AND category = ? \
                     ORDER BY sort_order, name"
                );
                sqlx::query(&sql)
                    .bind(category.as_str())
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT {NUTRIENT_COLUMNS} FROM nutrients \
                     WHERE is_visible = 1 \
                     ORDER BY sort_order, name"
                );
                sqlx::query(&sql).fetch_all(&self.pool).await?
            }
        };

        rows.iter().map(row_to_nutrient).collect()
    }

    async fn find_food_names(&self, names: &[String]) -> Result<Vec<String>> {
        let keys = lowered_lookup_keys(names);
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        for chunk in keys.chunks(LOOKUP_CHUNK_SIZE) {
            let sql = format!(
                "SELECT name FROM foods WHERE name COLLATE {UNICODE_NOCASE} IN ({})",
                placeholders(chunk.len())
            );
            let mut query = sqlx::query_scalar::<_, String>(&sql);
            for key in chunk {
                query = query.bind(key);
            }
            found.extend(query.fetch_all(&self.pool).await?);
        }

        debug!(
            requested = keys.len(),
            found = found.len(),
            "Looked up food names"
        );
        Ok(found)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

fn row_to_nutrient(row: &SqliteRow) -> Result<NutrientEntity> {
    Ok(NutrientEntity {
        name: row.try_get("name")?,
        unit: row.try_get("unit")?,
        category: NutrientCategory::parse(&row.try_get::<String, _>("category")?),
        usda_number: row
            .try_get::<Option<String>, _>("usda_nutrient_number")?
            .unwrap_or_default(),
        is_visible: row.try_get("is_visible")?,
        sort_order: row.try_get("sort_order")?,
    })
}
