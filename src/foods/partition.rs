// ABOUTME: Splits requested foods into those present in storage and those missing
// ABOUTME: Matching ignores case; available items keep every field, missing keeps names only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::FoodQueryItem;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Result of matching a request against stored food names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodPartition {
    /// Requested items found in storage, in request order
    pub available_foods: Vec<FoodQueryItem>,
    /// Names of requested items not found, in request order, caller's casing
    pub missing_foods: Vec<String>,
}

impl FoodPartition {
    /// Whether every requested food was found
    #[must_use]
    pub fn all_available(&self) -> bool {
        self.missing_foods.is_empty()
    }
}

/// Partition `requested` by case-insensitive membership in `stored_names`
#[must_use]
pub fn partition(requested: Vec<FoodQueryItem>, stored_names: &[String]) -> FoodPartition {
    let stored: HashSet<String> = stored_names.iter().map(|n| n.to_lowercase()).collect();

    let mut result = FoodPartition::default();
    for item in requested {
        if stored.contains(&item.name.to_lowercase()) {
            result.available_foods.push(item);
        } else {
            result.missing_foods.push(item.name);
        }
    }
    result
}
