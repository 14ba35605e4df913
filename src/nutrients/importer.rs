// ABOUTME: Best-effort batch import of nutrient records into the catalog
// ABOUTME: Skips incomplete rows and contains each persistence failure to its own record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::NutrientRecord;
use crate::database_plugins::DatabaseProvider;
use serde::Serialize;
use tracing::{debug, error, info};

/// Outcome counts of one import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Rows seen, whatever their fate
    pub total_considered: usize,
    /// Rows upserted
    pub succeeded: usize,
    /// Rows without `id` or `name`
    pub skipped: usize,
    /// Rows whose upsert failed
    pub failed: usize,
}

impl ImportSummary {
    /// Rows that did not end up in the catalog
    #[must_use]
    pub const fn not_imported(&self) -> usize {
        self.skipped + self.failed
    }
}

/// Import every record, one upsert at a time
///
/// Never fails as a whole: a record missing `id` or `name` is skipped, and a
/// record whose upsert fails is logged and counted before moving on to the
/// next one.
pub async fn import_all<D, I>(database: &D, rows: I) -> ImportSummary
where
    D: DatabaseProvider,
    I: IntoIterator<Item = NutrientRecord>,
{
    let mut summary = ImportSummary::default();

    for record in rows {
        summary.total_considered += 1;

        let Some(entity) = record.to_entity() else {
            debug!(?record, "Skipping nutrient row without id or name");
            summary.skipped += 1;
            continue;
        };

        match database.upsert_nutrient(&entity).await {
            Ok(()) => summary.succeeded += 1,
            Err(e) => {
                error!(nutrient.name = %entity.name, "Failed to upsert nutrient: {e:#}");
                summary.failed += 1;
            }
        }
    }

    info!(
        skipped = summary.skipped,
        failed = summary.failed,
        "Imported / updated {} nutrients",
        summary.succeeded
    );

    summary
}
