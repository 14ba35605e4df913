// ABOUTME: Nutrient category classification as an ordered first-match-wins rule list
// ABOUTME: Substring rules are case-insensitive; macronutrient, mineral and amino acid rules are exact
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrient classification
//!
//! [`classify`] walks [`CLASSIFICATION_RULES`] top to bottom and returns the
//! label of the first rule that matches, falling back to
//! [`NutrientCategory::Other`]. Rule order is part of the contract: the
//! substring rules must run before the exact-name rules. Any change to the
//! table bumps [`RULESET_VERSION`].

use super::NutrientCategory;

/// Version of [`CLASSIFICATION_RULES`]
pub const RULESET_VERSION: u32 = 1;

/// Exact names classified as macronutrients
pub const MACRONUTRIENTS: [&str; 3] = ["Protein", "Total lipid (fat)", "Carbohydrate, by difference"];

/// Exact names classified as minerals
pub const MINERALS: [&str; 10] = [
    "Calcium",
    "Iron",
    "Magnesium",
    "Phosphorus",
    "Potassium",
    "Sodium",
    "Zinc",
    "Copper",
    "Manganese",
    "Selenium",
];

/// Exact names classified as amino acids
pub const AMINO_ACIDS: [&str; 18] = [
    "Tryptophan",
    "Threonine",
    "Isoleucine",
    "Leucine",
    "Lysine",
    "Methionine",
    "Phenylalanine",
    "Tyrosine",
    "Valine",
    "Histidine",
    "Alanine",
    "Arginine",
    "Aspartic acid",
    "Glutamic acid",
    "Glycine",
    "Proline",
    "Serine",
    "Cystine",
];

/// How a rule tests a nutrient name
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Lowercased name contains any of the (lowercase) needles
    ContainsIgnoreCase(&'static [&'static str]),
    /// Name equals one of the entries exactly, case included
    ExactName(&'static [&'static str]),
}

impl Matcher {
    fn matches(&self, name: &str, lowered: &str) -> bool {
        match self {
            Self::ContainsIgnoreCase(needles) => needles.iter().any(|n| lowered.contains(n)),
            Self::ExactName(names) => names.iter().any(|n| *n == name),
        }
    }
}

/// A single `(predicate, label)` pair
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    /// Predicate over the nutrient name
    pub matcher: Matcher,
    /// Label assigned on match
    pub category: NutrientCategory,
}

/// The ordered rule list; first match wins
pub const CLASSIFICATION_RULES: [ClassificationRule; 8] = [
    ClassificationRule {
        matcher: Matcher::ContainsIgnoreCase(&["energy"]),
        category: NutrientCategory::Energy,
    },
    ClassificationRule {
        matcher: Matcher::ContainsIgnoreCase(&["vitamin"]),
        category: NutrientCategory::Vitamins,
    },
    ClassificationRule {
        matcher: Matcher::ContainsIgnoreCase(&["fatty acid"]),
        category: NutrientCategory::FattyAcids,
    },
    ClassificationRule {
        matcher: Matcher::ContainsIgnoreCase(&["cholesterol"]),
        category: NutrientCategory::Lipids,
    },
    ClassificationRule {
        matcher: Matcher::ExactName(&MACRONUTRIENTS),
        category: NutrientCategory::Macronutrients,
    },
    ClassificationRule {
        matcher: Matcher::ContainsIgnoreCase(&["sugar", "fiber", "starch"]),
        category: NutrientCategory::Carbohydrates,
    },
    ClassificationRule {
        matcher: Matcher::ExactName(&MINERALS),
        category: NutrientCategory::Minerals,
    },
    ClassificationRule {
        matcher: Matcher::ExactName(&AMINO_ACIDS),
        category: NutrientCategory::AminoAcids,
    },
];

/// Classify a nutrient name. Total: every input, including `""`, gets a label.
#[must_use]
pub fn classify(name: &str) -> NutrientCategory {
    let lowered = name.to_lowercase();

    CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.matcher.matches(name, &lowered))
        .map_or(NutrientCategory::Other, |rule| rule.category)
}
