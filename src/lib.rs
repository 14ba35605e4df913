// ABOUTME: Main library entry point for the Giveas backend
// ABOUTME: Nutrient catalog import plus the food availability and USDA search HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Giveas Server
//!
//! Two programs share this library:
//!
//! - `import-nutrients` reads a nutrient CSV export, classifies and ranks each
//!   nutrient and upserts it into the catalog.
//! - `giveas-server` answers the HTTP API: liveness, a database round trip,
//!   a USDA `FoodData Central` search proxy, the food availability check and the
//!   nutrient catalog listing.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use giveas_server::config::environment::ServerConfig;
//! use giveas_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Giveas server configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Configuration loaded from the environment
pub mod config;

/// Service names and default values
pub mod constants;

/// Database providers (`SQLite`, `MySQL`) behind a common trait
pub mod database_plugins;

/// Unified error handling
pub mod errors;

/// Outbound HTTP clients
pub mod external;

/// Food availability domain logic
pub mod foods;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Nutrient catalog domain logic and CSV import
pub mod nutrients;

/// Shared server resources
pub mod resources;

/// HTTP routes
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;
