// ABOUTME: External API client modules (USDA FoodData Central)
// ABOUTME: Search provider abstraction with the live client and a test double
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! External API Clients
//!
//! This module contains clients for external APIs used by the Giveas server.

/// USDA `FoodData` Central search proxy
pub mod usda_client;

// Re-export commonly used types
pub use usda_client::{FoodSearchProvider, FoodSearchResult, MockUsdaClient, UsdaClient};
