// ABOUTME: Database abstraction layer for the Giveas server
// ABOUTME: Plugin architecture for database support with SQLite and MySQL backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::DatabaseConfig;
use crate::nutrients::{NutrientCategory, NutrientEntity};
use anyhow::Result;
use async_trait::async_trait;

/// Database factory and backend selection
pub mod factory;
/// `MySQL` implementation
#[cfg(feature = "mysql")]
pub mod mysql;
/// `SQLite` implementation
pub mod sqlite;

pub use factory::{detect_database_type, Database, DatabaseType};

/// Core database abstraction trait
///
/// All database implementations must implement this trait to provide
/// a consistent interface for the application layer.
#[async_trait]
pub trait DatabaseProvider: Send + Sync + Clone {
    /// Open a connection pool, running migrations when `auto_migrate` is set
    async fn new(config: &DatabaseConfig) -> Result<Self>
    where
        Self: Sized;

    /// Create the `nutrients` and `foods` tables if they do not exist
    async fn migrate(&self) -> Result<()>;

    /// Round-trip a trivial computation through the store; `SELECT 1 + 1`
    async fn ping(&self) -> Result<i64>;

    // ================================
    // Nutrient Catalog
    // ================================

    /// Insert a nutrient, or update `unit`, `category` and `sort_order` of the
    /// row with the same name. `usda_nutrient_number` and `is_visible` are
    /// written on first insert only.
    async fn upsert_nutrient(&self, nutrient: &NutrientEntity) -> Result<()>;

    /// Get a nutrient by its exact name
    async fn get_nutrient(&self, name: &str) -> Result<Option<NutrientEntity>>;

    /// Visible nutrients ordered by `sort_order` then `name`, optionally
    /// restricted to one category
    async fn list_nutrients(
        &self,
        category: Option<NutrientCategory>,
    ) -> Result<Vec<NutrientEntity>>;

    // ================================
    // Foods
    // ================================

    /// Stored food names matching any of `names`, compared case-insensitively
    /// with Unicode case folding. Returns the stored spellings. Any number of
    /// names is accepted; lookups run [`LOOKUP_CHUNK_SIZE`] keys at a time.
    async fn find_food_names(&self, names: &[String]) -> Result<Vec<String>>;

    /// Close the pool; later calls fail
    async fn close(&self);
}

/// Most lookup keys bound into a single `IN (...)` statement
pub const LOOKUP_CHUNK_SIZE: usize = 500;

/// Lowercased, de-duplicated lookup keys for `IN (...)` name queries
pub(crate) fn lowered_lookup_keys(names: &[String]) -> Vec<String> {
    let mut keys: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
    keys.sort_unstable();
    keys.dedup();
    keys
}

/// `?, ?, ?` with one placeholder per bound value
pub(crate) fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_keys_are_lowered_and_unique() {
        let names = vec!["Apple".to_owned(), "APPLE".to_owned(), "banana".to_owned()];
        assert_eq!(lowered_lookup_keys(&names), vec!["apple", "banana"]);
    }

    #[test]
    fn test_lookup_keys_fold_non_ascii() {
        let names = vec!["ÉPINARD".to_owned(), "Épinard".to_owned(), "ÄPFEL".to_owned()];
        assert_eq!(lowered_lookup_keys(&names), vec!["äpfel", "épinard"]);
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(3), "?, ?, ?");
    }
}
