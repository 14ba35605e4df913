// ABOUTME: Nutrient catalog data model, classification, ranking and import pipeline
// ABOUTME: Defines raw CSV records, persisted nutrient entities and the closed category set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrient catalog
//!
//! Raw rows from the USDA nutrient reference file arrive as [`NutrientRecord`]s,
//! are classified and ranked, and are persisted as [`NutrientEntity`]s keyed by
//! nutrient name.

/// Ordered, first-match-wins category rules
pub mod classifier;
/// Reader for the nutrient reference CSV
pub mod csv_reader;
/// Batch import with per-record fault containment
pub mod importer;
/// Display sort order assignment
pub mod sort_order;

pub use classifier::{classify, RULESET_VERSION};
pub use csv_reader::{parse_nutrient_csv, read_nutrient_csv};
pub use importer::{import_all, ImportSummary};
pub use sort_order::{assign_sort_order, RankHint};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of category labels a nutrient can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NutrientCategory {
    /// Energy values (kcal, kJ)
    Energy,
    /// Vitamins of every kind
    Vitamins,
    /// Saturated, mono- and polyunsaturated fatty acids
    #[serde(rename = "Fatty Acids")]
    FattyAcids,
    /// Cholesterol and related lipids
    Lipids,
    /// Protein, total fat and carbohydrate
    Macronutrients,
    /// Sugars, fiber and starch
    Carbohydrates,
    /// Dietary minerals
    Minerals,
    /// Amino acids
    #[serde(rename = "Amino Acids")]
    AminoAcids,
    /// Everything else
    Other,
}

impl NutrientCategory {
    /// Every label, in rule order
    pub const ALL: [Self; 9] = [
        Self::Energy,
        Self::Vitamins,
        Self::FattyAcids,
        Self::Lipids,
        Self::Macronutrients,
        Self::Carbohydrates,
        Self::Minerals,
        Self::AminoAcids,
        Self::Other,
    ];

    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Energy => "Energy",
            Self::Vitamins => "Vitamins",
            Self::FattyAcids => "Fatty Acids",
            Self::Lipids => "Lipids",
            Self::Macronutrients => "Macronutrients",
            Self::Carbohydrates => "Carbohydrates",
            Self::Minerals => "Minerals",
            Self::AminoAcids => "Amino Acids",
            Self::Other => "Other",
        }
    }

    /// Parse an exact label as stored in the database
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        // Unknown labels written by other tools fall back to Other
        Self::from_label(s).unwrap_or(Self::Other)
    }
}

impl fmt::Display for NutrientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the nutrient reference file
///
/// Every column is optional at parse time; rows without `id` or `name` are
/// skipped by the importer rather than rejected by the reader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NutrientRecord {
    /// USDA nutrient identifier, persisted as `usda_nutrient_number`
    #[serde(default)]
    pub id: Option<String>,
    /// Nutrient name, the natural key
    #[serde(default)]
    pub name: Option<String>,
    /// Unit as spelled in the source file (e.g. `MG`, `KCAL`)
    #[serde(default)]
    pub unit_name: Option<String>,
    /// Optional numeric display rank
    #[serde(default)]
    pub rank: Option<String>,
}

impl NutrientRecord {
    /// Build a record from its four columns
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_name: Option<&str>,
        rank: Option<&str>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            unit_name: unit_name.map(str::to_owned),
            rank: rank.map(str::to_owned),
        }
    }

    /// Derive the persisted entity, or `None` when a required column is blank
    #[must_use]
    pub fn to_entity(&self) -> Option<NutrientEntity> {
        let id = non_blank(self.id.as_deref())?;
        let name = non_blank(self.name.as_deref())?;

        let unit = self
            .unit_name
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();

        Some(NutrientEntity {
            name: name.to_owned(),
            unit,
            category: classify(name),
            usda_number: id.to_owned(),
            is_visible: true,
            sort_order: assign_sort_order(name, self.rank.as_deref().map(RankHint::Text)),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A nutrient as stored in the `nutrients` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientEntity {
    /// Unique nutrient name
    pub name: String,
    /// Lowercased unit, possibly empty
    pub unit: String,
    /// Derived category
    pub category: NutrientCategory,
    /// USDA nutrient number; set on first insert only
    pub usda_number: String,
    /// Visibility flag; set on first insert only
    pub is_visible: bool,
    /// Display order, lower first
    pub sort_order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip_through_database_strings() {
        for category in NutrientCategory::ALL {
            assert_eq!(NutrientCategory::parse(category.as_str()), category);
        }
        assert_eq!(NutrientCategory::parse("Unknown"), NutrientCategory::Other);
        assert_eq!(NutrientCategory::from_label("minerals"), None);
    }

    #[test]
    fn test_category_serializes_as_display_label() {
        let json = serde_json::to_string(&NutrientCategory::AminoAcids).unwrap();
        assert_eq!(json, "\"Amino Acids\"");
    }

    #[test]
    fn test_record_to_entity_derives_all_fields() {
        let record = NutrientRecord::new("1093", " Sodium, Na ", Some("MG"), Some("5800"));
        let entity = record.to_entity().unwrap();

        assert_eq!(entity.name, "Sodium, Na");
        assert_eq!(entity.unit, "mg");
        assert_eq!(entity.category, NutrientCategory::Other);
        assert_eq!(entity.usda_number, "1093");
        assert!(entity.is_visible);
        assert_eq!(entity.sort_order, 5800);
    }

    #[test]
    fn test_record_without_unit_gets_empty_unit() {
        let record = NutrientRecord::new("1003", "Protein", None, None);
        let entity = record.to_entity().unwrap();

        assert_eq!(entity.unit, "");
        assert_eq!(entity.category, NutrientCategory::Macronutrients);
        assert_eq!(entity.sort_order, 2);
    }

    #[test]
    fn test_record_missing_required_columns_is_skipped() {
        let no_id = NutrientRecord {
            id: None,
            ..NutrientRecord::new("1", "Zinc, Zn", None, None)
        };
        let blank_name = NutrientRecord::new("1", "   ", None, None);

        assert!(no_id.to_entity().is_none());
        assert!(blank_name.to_entity().is_none());
    }
}
