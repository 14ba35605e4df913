// ABOUTME: USDA FoodData Central search client used as an opaque pass-through proxy
// ABOUTME: Forwards search bodies verbatim and returns the provider JSON unchanged; includes a mock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! USDA `FoodData` Central API Client
//!
//! The search endpoint is proxied without interpretation: whatever JSON the
//! caller posts is sent to `POST {base_url}/foods/search?api_key=...` and the
//! provider's JSON comes back untouched. Any transport failure, non-2xx status
//! or undecodable body is a single [`AppError`]; there is no partial result.
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>
//!
//! # Example
//! ```rust,no_run
//! use giveas_server::config::UsdaClientConfig;
//! use giveas_server::external::{FoodSearchProvider, UsdaClient};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = UsdaClient::new(UsdaClientConfig::with_api_key("your_api_key"))?;
//! let results = client.search(&json!({"query": "apple", "pageSize": 5})).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::UsdaClientConfig;
use crate::constants::usda::SERVICE_NAME;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Anything that can answer a food search with provider JSON
#[async_trait]
pub trait FoodSearchProvider: Send + Sync {
    /// Run a search with opaque parameters and return the opaque result
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be reached, rejects the request,
    /// or answers with something other than JSON
    async fn search(&self, params: &Value) -> AppResult<Value>;
}

/// USDA `FoodData` Central API Client
pub struct UsdaClient {
    config: UsdaClientConfig,
    http_client: reqwest::Client,
}

impl UsdaClient {
    /// Create a new USDA API client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: UsdaClientConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Endpoint used for searches
    #[must_use]
    pub fn search_url(&self) -> String {
        format!("{}/foods/search", self.config.base_url)
    }
}

#[async_trait]
impl FoodSearchProvider for UsdaClient {
    async fn search(&self, params: &Value) -> AppResult<Value> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::config_missing("USDA_API_KEY"))?;

        let url = self.search_url();
        debug!("Forwarding food search to {url}");

        let response = self
            .http_client
            .post(&url)
            .query(&[("api_key", api_key)])
            .json(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    AppError::external_unavailable(SERVICE_NAME, e.to_string())
                } else {
                    AppError::external_service(SERVICE_NAME, e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "USDA search rejected");
            return Err(AppError::external_service(
                SERVICE_NAME,
                format!("HTTP {status}: {body}"),
            ));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::external_service(SERVICE_NAME, format!("JSON parse error: {e}")))
    }
}

/// USDA Food Search Result, as returned inside `foods`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchResult {
    /// `FoodData` Central ID
    pub fdc_id: u64,
    /// Food description
    pub description: String,
    /// Data type (e.g., "Survey (FNDDS)", "Foundation", "SR Legacy")
    pub data_type: String,
    /// Nutrients with amounts per 100g
    pub food_nutrients: Vec<FoodNutrient>,
}

/// USDA Food Nutrient
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodNutrient {
    /// Nutrient ID
    pub nutrient_id: u32,
    /// Nutrient name (e.g., "Protein", "Energy")
    pub nutrient_name: String,
    /// Nutrient unit (e.g., "G", "KCAL", "MG")
    pub unit_name: String,
    /// Amount per 100g
    pub value: f64,
}

impl FoodNutrient {
    fn new(nutrient_id: u32, nutrient_name: &str, unit_name: &str, value: f64) -> Self {
        Self {
            nutrient_id,
            nutrient_name: nutrient_name.to_owned(),
            unit_name: unit_name.to_owned(),
            value,
        }
    }
}

/// Mock USDA client for testing (no API calls)
///
/// Answers in the provider's search response shape, filtering its canned foods
/// by the `query` parameter, and records every request it receives.
pub struct MockUsdaClient {
    mock_foods: Vec<FoodSearchResult>,
    failure: Option<String>,
    requests: Mutex<Vec<Value>>,
}

impl MockUsdaClient {
    /// Create a new mock client with predefined test data
    #[must_use]
    pub fn new() -> Self {
        let mock_foods = vec![
            FoodSearchResult {
                fdc_id: 171_477,
                description: "Chicken, breast, meat only, cooked, roasted".to_owned(),
                data_type: "SR Legacy".to_owned(),
                food_nutrients: vec![
                    FoodNutrient::new(1003, "Protein", "G", 31.02),
                    FoodNutrient::new(1004, "Total lipid (fat)", "G", 3.57),
                    FoodNutrient::new(1005, "Carbohydrate, by difference", "G", 0.0),
                    FoodNutrient::new(1008, "Energy", "KCAL", 165.0),
                ],
            },
            FoodSearchResult {
                fdc_id: 171_688,
                description: "Apples, raw, with skin".to_owned(),
                data_type: "SR Legacy".to_owned(),
                food_nutrients: vec![
                    FoodNutrient::new(1003, "Protein", "G", 0.26),
                    FoodNutrient::new(1004, "Total lipid (fat)", "G", 0.17),
                    FoodNutrient::new(1005, "Carbohydrate, by difference", "G", 13.81),
                    FoodNutrient::new(1008, "Energy", "KCAL", 52.0),
                ],
            },
        ];

        Self {
            mock_foods,
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Mock whose every search fails as if the provider rejected it
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// Bodies received so far, in order
    pub async fn requests(&self) -> Vec<Value> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockUsdaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FoodSearchProvider for MockUsdaClient {
    async fn search(&self, params: &Value) -> AppResult<Value> {
        self.requests.lock().await.push(params.clone());

        if let Some(message) = &self.failure {
            return Err(AppError::external_service(SERVICE_NAME, message.clone()));
        }

        let query = params
            .get("query")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_lowercase();

        let foods: Vec<&FoodSearchResult> = self
            .mock_foods
            .iter()
            .filter(|food| food.description.to_lowercase().contains(&query))
            .collect();

        Ok(json!({
            "totalHits": foods.len(),
            "currentPage": 1,
            "totalPages": 1,
            "foodSearchCriteria": params,
            "foods": foods,
        }))
    }
}
