// ABOUTME: Liveness and database connectivity route handlers
// ABOUTME: Serves the plain-text root greeting, /health and the /db-test round trip
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring
//!
//! `GET /` answers without touching any dependency. `GET /db-test` proves the
//! database answers by computing `1 + 1` there.

use crate::constants::LIVENESS_MESSAGE;
use crate::database_plugins::DatabaseProvider;
use crate::errors::AppError;
use crate::resources::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body of a successful `/db-test`
#[derive(Debug, Serialize, Deserialize)]
pub struct DbTestResponse {
    /// Always `true`
    pub success: bool,
    /// Value computed by the database
    pub result: i64,
}

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_liveness))
            .route("/health", get(Self::handle_health))
            .route("/db-test", get(Self::handle_db_test))
            .with_state(resources)
    }

    /// Handle GET / - plain-text liveness
    async fn handle_liveness() -> &'static str {
        LIVENESS_MESSAGE
    }

    /// Handle GET /health - JSON liveness with timestamp
    async fn handle_health(
        State(resources): State<Arc<ServerResources>>,
    ) -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "healthy",
            "database": resources.database.backend_info(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    /// Handle GET /db-test - trivial query round trip
    async fn handle_db_test(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let result = resources
            .database
            .ping()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((
            StatusCode::OK,
            Json(DbTestResponse {
                success: true,
                result,
            }),
        )
            .into_response())
    }
}
