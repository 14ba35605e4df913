// ABOUTME: Food search proxy and food availability route handlers
// ABOUTME: POST /search-foods, POST /giveas-items and GET /jobs/:job_id/resume-url
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::foods::resume::ResumeEntry;
use crate::foods::{partition, FoodPartition, GiveasItemsRequest};
use crate::resources::ServerResources;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// Message when nothing is missing
pub const ALL_AVAILABLE_MESSAGE: &str = "All foods are available";
/// Message when at least one food is missing
pub const SOME_MISSING_MESSAGE: &str = "Some foods are missing";

/// Response body for `/giveas-items`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiveasItemsResponse {
    /// Always `true`
    pub success: bool,
    /// Human-readable summary
    pub message: String,
    /// Available and missing foods
    pub data: FoodPartition,
    /// Job the resume URL was registered under, if one was sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
}

impl GiveasItemsResponse {
    /// Wrap a partition, choosing the summary message
    #[must_use]
    pub fn new(data: FoodPartition, job_id: Option<String>) -> Self {
        let message = if data.all_available() {
            ALL_AVAILABLE_MESSAGE
        } else {
            SOME_MISSING_MESSAGE
        };
        Self {
            success: true,
            message: message.to_owned(),
            data,
            job_id,
        }
    }
}

/// Response body for `/jobs/:job_id/resume-url`
#[derive(Debug, Serialize)]
pub struct ResumeUrlResponse {
    /// Always `true`
    pub success: bool,
    /// Stored entry
    pub data: ResumeEntry,
}

/// Food routes handler
pub struct FoodsRoutes;

impl FoodsRoutes {
    /// Create all food routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/search-foods", post(Self::handle_search_foods))
            .route("/giveas-items", post(Self::handle_giveas_items))
            .route("/jobs/:job_id/resume-url", get(Self::handle_get_resume_url))
            .with_state(resources)
    }

    /// Handle POST /search-foods - forward the body to the search provider
    async fn handle_search_foods(
        State(resources): State<Arc<ServerResources>>,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let params = parse_json_body(&body)?;
        let result = resources.search.search(&params).await?;

        Ok((StatusCode::OK, Json(result)).into_response())
    }

    /// Handle POST /giveas-items - partition requested foods into available and missing
    async fn handle_giveas_items(
        State(resources): State<Arc<ServerResources>>,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let request = GiveasItemsRequest::from_json(parse_json_body(&body)?)?;
        debug!(requested = request.foods.len(), "Checking food availability");

        let stored = resources
            .database
            .find_food_names(&request.names())
            .await
            .map_err(|e| AppError::database(format!("Failed to look up foods: {e}")))?;

        let job_id = request.resume_url.as_ref().map(|url| {
            let job_id = resources
                .resume_store
                .register(request.job_id.clone(), url.clone());
            info!(job.id = %job_id, "Registered resume URL");
            job_id
        });

        let response = GiveasItemsResponse::new(partition(request.foods, &stored), job_id);
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /jobs/:job_id/resume-url - look up a registered resume URL
    async fn handle_get_resume_url(
        State(resources): State<Arc<ServerResources>>,
        Path(job_id): Path<String>,
    ) -> Result<Response, AppError> {
        let entry = resources
            .resume_store
            .get(&job_id)
            .ok_or_else(|| AppError::not_found(format!("Job {job_id}")))?;

        Ok((
            StatusCode::OK,
            Json(ResumeUrlResponse {
                success: true,
                data: entry,
            }),
        )
            .into_response())
    }
}

/// Decode a JSON request body; an empty body is an empty object
fn parse_json_body(body: &[u8]) -> AppResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::invalid_format(format!("Request body is not valid JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foods::FoodQueryItem;
    use serde_json::json;

    #[test]
    fn test_empty_body_is_empty_object() {
        assert_eq!(parse_json_body(b"").unwrap(), json!({}));
        assert_eq!(parse_json_body(b"  \n").unwrap(), json!({}));
    }

    #[test]
    fn test_malformed_body_is_invalid_format() {
        let error = parse_json_body(b"{not json").unwrap_err();
        assert_eq!(error.http_status(), 400);
    }

    #[test]
    fn test_response_message_and_job_id() {
        let complete = GiveasItemsResponse::new(
            partition(vec![FoodQueryItem::named("Apple")], &["apple".to_owned()]),
            None,
        );
        let json = serde_json::to_value(&complete).unwrap();
        assert_eq!(json["message"], ALL_AVAILABLE_MESSAGE);
        assert!(json.get("jobId").is_none());

        let partial = GiveasItemsResponse::new(
            partition(vec![FoodQueryItem::named("Pear")], &[]),
            Some("job-1".to_owned()),
        );
        let json = serde_json::to_value(&partial).unwrap();
        assert_eq!(json["message"], SOME_MISSING_MESSAGE);
        assert_eq!(json["jobId"], "job-1");
        assert_eq!(json["data"]["missingFoods"], json!(["Pear"]));
    }
}
