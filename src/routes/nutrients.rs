// ABOUTME: Nutrient catalog read routes
// ABOUTME: Lists visible nutrients in display order, optionally filtered by category
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::database_plugins::DatabaseProvider;
use crate::errors::AppError;
use crate::nutrients::{NutrientCategory, NutrientEntity};
use crate::resources::ServerResources;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query parameters for listing nutrients
#[derive(Debug, Deserialize)]
pub struct ListNutrientsQuery {
    /// Category label, e.g. `Minerals` or `Amino Acids`
    pub category: Option<String>,
}

/// Response for listing nutrients
#[derive(Debug, Serialize, Deserialize)]
pub struct ListNutrientsResponse {
    /// Always `true`
    pub success: bool,
    /// Number of nutrients returned
    pub count: usize,
    /// Nutrients ordered by `sort_order`, then name
    pub data: Vec<NutrientEntity>,
}

/// Nutrient routes handler
pub struct NutrientsRoutes;

impl NutrientsRoutes {
    /// Create all nutrient routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/nutrients", get(Self::handle_list))
            .with_state(resources)
    }

    /// Handle GET /nutrients - list visible nutrients
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<ListNutrientsQuery>,
    ) -> Result<Response, AppError> {
        let category = query
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|label| {
                NutrientCategory::from_label(label).ok_or_else(|| {
                    AppError::invalid_input(format!("Unknown nutrient category '{label}'"))
                })
            })
            .transpose()?;

        let nutrients = resources
            .database
            .list_nutrients(category)
            .await
            .map_err(|e| AppError::database(format!("Failed to list nutrients: {e}")))?;

        let response = ListNutrientsResponse {
            success: true,
            count: nutrients.len(),
            data: nutrients,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
