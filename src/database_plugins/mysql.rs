// ABOUTME: MySQL implementation of the DatabaseProvider trait
// ABOUTME: Production storage for the nutrient catalog and food names over a TLS connection pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{lowered_lookup_keys, placeholders, DatabaseProvider, LOOKUP_CHUNK_SIZE};
use crate::config::{DatabaseConfig, SslMode};
use crate::nutrients::{NutrientCategory, NutrientEntity};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions, MySqlRow, MySqlSslMode};
use sqlx::{MySqlPool, Row};
use std::str::FromStr;
use tracing::info;

// The stored number may be an integer column in pre-existing schemas
const NUTRIENT_COLUMNS: &str = "name, unit, category, \
     CAST(usda_nutrient_number AS CHAR) AS usda_nutrient_number, is_visible, sort_order";

impl From<SslMode> for MySqlSslMode {
    fn from(mode: SslMode) -> Self {
        match mode {
            SslMode::Disabled => Self::Disabled,
            SslMode::Preferred => Self::Preferred,
            SslMode::Required => Self::Required,
            SslMode::VerifyCa => Self::VerifyCa,
            SslMode::VerifyIdentity => Self::VerifyIdentity,
        }
    }
}

/// `MySQL` database implementation
#[derive(Clone)]
pub struct MySqlDatabase {
    pool: MySqlPool,
}

impl MySqlDatabase {
    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl DatabaseProvider for MySqlDatabase {
    async fn new(config: &DatabaseConfig) -> Result<Self> {
        let options = MySqlConnectOptions::from_str(&config.url.to_connection_string())
            .with_context(|| format!("Invalid MySQL URL {}", config.url))?
            .ssl_mode(config.ssl_mode.into());

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to {}", config.url))?;

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
                id INT AUTO_INCREMENT PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                unit VARCHAR(32) NOT NULL DEFAULT '',
                category VARCHAR(64) NOT NULL DEFAULT 'Other',
                usda_nutrient_number VARCHAR(32),
                is_visible TINYINT(1) NOT NULL DEFAULT 1,
                sort_order INT NOT NULL DEFAULT 999,
                UNIQUE KEY uq_nutrients_name (name),
                KEY idx_nutrients_display (is_visible, sort_order, name)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS foods (
                id INT AUTO_INCREMENT PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                KEY idx_foods_name (name)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        info!("MySQL schema is up to date");
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
            ON DUPLICATE KEY UPDATE
                unit = VALUES(unit),
                category = VALUES(category),
                sort_order = VALUES(sort_order)
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
                "SELECT name FROM foods WHERE LOWER(name) IN ({})",
                placeholders(chunk.len())
            );
            let mut query = sqlx::query_scalar::<_, String>(&sql);
            for key in chunk {
                query = query.bind(key);
            }
            found.extend(query.fetch_all(&self.pool).await?);
        }

        Ok(found)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

fn row_to_nutrient(row: &MySqlRow) -> Result<NutrientEntity> {
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
