// ABOUTME: Food availability lookup: request normalization, partitioning and resume URLs
// ABOUTME: Defines the opaque food item carried through the /giveas-items endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Food availability
//!
//! Callers send a list of foods; only each item's `name` is inspected. Items
//! whose name is stored (case-insensitively) come back whole in the available
//! partition, the names of the rest come back as missing.

/// Available / missing partitioning
pub mod partition;
/// Closed set of accepted `/giveas-items` body shapes
pub mod request;
/// Job-scoped resume URL store
pub mod resume;

pub use partition::{partition, FoodPartition};
pub use request::GiveasItemsRequest;
pub use resume::ResumeStore;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A requested food; fields other than `name` are passed through untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodQueryItem {
    /// Food name, matched case-insensitively
    pub name: String,
    /// Every other field the caller sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FoodQueryItem {
    /// Item carrying only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }
}
