// ABOUTME: Route module organization for the Giveas HTTP endpoints
// ABOUTME: Groups route definitions by domain: health, foods and nutrients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the database provider, the food search provider and the
//! `foods` domain logic.

/// Food search proxy, availability check and resume URL routes
pub mod foods;
/// Liveness and database connectivity routes
pub mod health;
/// Nutrient catalog routes
pub mod nutrients;

pub use foods::FoodsRoutes;
pub use health::HealthRoutes;
pub use nutrients::NutrientsRoutes;
