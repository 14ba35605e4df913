// ABOUTME: External API provider configuration for the USDA FoodData Central search
// ABOUTME: Holds the API key, base URL and outbound timeout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::environment::{env_var_or, parse_env};
use crate::constants::usda;
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::env;

/// USDA `FoodData` Central client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsdaClientConfig {
    /// API key appended as `api_key`; searches fail with a config error without it
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for UsdaClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: usda::DEFAULT_BASE_URL.to_owned(),
            timeout_secs: usda::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl UsdaClientConfig {
    /// Load USDA configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if `USDA_TIMEOUT_SECS` is not a number
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            api_key: env::var("USDA_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            base_url: env_var_or("USDA_BASE_URL", usda::DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_owned(),
            timeout_secs: parse_env("USDA_TIMEOUT_SECS", usda::DEFAULT_TIMEOUT_SECS)?,
        })
    }

    /// Configuration with an explicit key and default endpoint
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }
}
