// ABOUTME: System-wide constants and configuration defaults for the Giveas backend
// ABOUTME: Service identity, listener, database pool and upstream provider defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Hardcoded defaults. Anything tunable at runtime is read in [`crate::config`].

/// Service identity used in structured logs
pub mod service_names {
    /// Name of the HTTP service
    pub const GIVEAS_SERVER: &str = "giveas_server";
    /// Name of the nutrient import job
    pub const NUTRIENT_IMPORTER: &str = "import_nutrients";
}

/// Listener and connection defaults
pub mod defaults {
    /// HTTP port used when `PORT` is unset
    pub const HTTP_PORT: u16 = 3000;
    /// Listen address, all interfaces
    pub const BIND_HOST: &str = "0.0.0.0";
    /// MySQL port used when `DB_PORT` is unset
    pub const MYSQL_PORT: u16 = 3306;
    /// Pool size; excess requests queue without bound
    pub const DB_MAX_CONNECTIONS: u32 = 10;
    /// Local database used when no MySQL settings are present
    pub const SQLITE_DATABASE_URL: &str = "sqlite:./data/giveas.db";
    /// Nutrient reference file read by the import job
    pub const NUTRIENT_CSV_PATH: &str = "nutrient.csv";
}

/// USDA `FoodData` Central defaults
pub mod usda {
    /// Base URL of the `FoodData` Central v1 API
    pub const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
    /// Outbound request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Service label used in error messages
    pub const SERVICE_NAME: &str = "USDA API";
}

/// Resume URL store limits
pub mod resume {
    /// Seconds a registered resume URL stays readable
    pub const ENTRY_TTL_SECS: i64 = 86_400;
    /// Store size above which registering sweeps out expired entries
    pub const SWEEP_THRESHOLD: usize = 1_000;
}

/// Liveness text returned from `GET /`
pub const LIVENESS_MESSAGE: &str = "Hello, World!";
