// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-driven settings for the listener, database, USDA client and CORS
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Giveas server
//!
//! Everything is read from the process environment, optionally seeded from a
//! `.env` file. Malformed values are configuration errors; missing values use
//! the defaults in [`crate::constants`].

/// USDA `FoodData` Central client settings
pub mod api_providers;
/// Database URL, pool and TLS settings
pub mod database;
/// Top-level server configuration
pub mod environment;
/// CORS settings
pub mod network;

pub use api_providers::UsdaClientConfig;
pub use database::{DatabaseConfig, DatabaseUrl, SslMode};
pub use environment::{Environment, ServerConfig};
pub use network::CorsConfig;
