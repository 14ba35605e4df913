// ABOUTME: Normalizes the accepted /giveas-items request bodies into one typed request
// ABOUTME: Accepts a bare array, a foods envelope, or a body.data envelope holding JSON or a JSON string
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! `/giveas-items` request shapes
//!
//! Exactly these bodies are accepted:
//!
//! 1. `[{"name": "Apple"}, ...]`
//! 2. `{"foods": [{"name": "Apple"}, ...]}`
//! 3. `{"body": {"data": D}}` where `D` is an array of items, an object with a
//!    `foods` array, or a string containing the JSON of either.
//!
//! Object forms may also carry `resumeUrl` and `jobId` beside the envelope,
//! either at the top level or inside `body`. Anything else is a client error.

use super::FoodQueryItem;
use crate::errors::{AppError, AppResult};
use serde_json::{Map, Value};

/// Field name used in "is required" messages
const FOODS_FIELD: &str = "foods array";

/// A normalized `/giveas-items` request
#[derive(Debug, Clone, PartialEq)]
pub struct GiveasItemsRequest {
    /// Requested foods, never empty
    pub foods: Vec<FoodQueryItem>,
    /// Callback URL to remember for a later step
    pub resume_url: Option<String>,
    /// Caller-chosen job id for the resume URL
    pub job_id: Option<String>,
}

impl GiveasItemsRequest {
    /// Normalize a decoded JSON body
    ///
    /// # Errors
    ///
    /// Returns a 400-class error when the body matches none of the accepted
    /// shapes, the food list is empty, or an item lacks a string `name`
    pub fn from_json(body: Value) -> AppResult<Self> {
        match body {
            Value::Array(items) => Ok(Self {
                foods: parse_items(items)?,
                resume_url: None,
                job_id: None,
            }),
            Value::Object(map) => Self::from_object(map),
            _ => Err(AppError::invalid_input(
                "Request body must be a JSON object or array",
            )),
        }
    }

    fn from_object(mut map: Map<String, Value>) -> AppResult<Self> {
        let mut resume_url = take_optional_string(&mut map, "resumeUrl")?;
        let mut job_id = take_optional_string(&mut map, "jobId")?;

        let foods = if let Some(foods) = map.remove("foods") {
            foods_from_value(foods)?
        } else if let Some(envelope) = map.remove("body") {
            let Value::Object(mut envelope) = envelope else {
                return Err(AppError::invalid_input("body must be an object"));
            };
            if resume_url.is_none() {
                resume_url = take_optional_string(&mut envelope, "resumeUrl")?;
            }
            if job_id.is_none() {
                job_id = take_optional_string(&mut envelope, "jobId")?;
            }
            let data = envelope
                .remove("data")
                .ok_or_else(|| AppError::missing_field("body.data"))?;
            foods_from_data(data)?
        } else {
            return Err(AppError::missing_field(FOODS_FIELD));
        };

        if let Some(url) = &resume_url {
            validate_resume_url(url)?;
        }

        Ok(Self {
            foods,
            resume_url,
            job_id,
        })
    }

    /// Requested names in request order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.foods.iter().map(|f| f.name.clone()).collect()
    }
}

/// `body.data`: list, `{foods}` object, or a string holding either
fn foods_from_data(data: Value) -> AppResult<Vec<FoodQueryItem>> {
    match data {
        Value::String(raw) => {
            let decoded: Value = serde_json::from_str(&raw).map_err(|e| {
                AppError::invalid_format(format!("body.data is not valid JSON: {e}"))
            })?;
            match decoded {
                Value::String(_) => Err(AppError::invalid_input(
                    "body.data must encode a foods list, not another string",
                )),
                other => foods_from_data(other),
            }
        }
        Value::Object(mut map) => match map.remove("foods") {
            Some(foods) => foods_from_value(foods),
            None => Err(AppError::missing_field(FOODS_FIELD)),
        },
        other => foods_from_value(other),
    }
}

fn foods_from_value(value: Value) -> AppResult<Vec<FoodQueryItem>> {
    match value {
        Value::Array(items) => parse_items(items),
        Value::Null => Err(AppError::missing_field(FOODS_FIELD)),
        _ => Err(AppError::invalid_input("foods must be an array")),
    }
}

fn parse_items(items: Vec<Value>) -> AppResult<Vec<FoodQueryItem>> {
    if items.is_empty() {
        return Err(AppError::missing_field(FOODS_FIELD));
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let Value::Object(mut fields) = item else {
                return Err(AppError::invalid_input(format!(
                    "foods[{index}] must be an object"
                )));
            };
            match fields.remove("name") {
                Some(Value::String(name)) if !name.trim().is_empty() => Ok(FoodQueryItem {
                    name,
                    extra: fields,
                }),
                _ => Err(AppError::invalid_input(format!(
                    "foods[{index}].name must be a non-empty string"
                ))),
            }
        })
        .collect()
}

fn take_optional_string(map: &mut Map<String, Value>, key: &str) -> AppResult<Option<String>> {
    match map.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_owned())),
        Some(_) => Err(AppError::invalid_input(format!("{key} must be a string"))),
    }
}

fn validate_resume_url(url: &str) -> AppResult<()> {
    let has_host = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());
    if has_host {
        Ok(())
    } else {
        Err(AppError::invalid_input(
            "resumeUrl must be an absolute http(s) URL",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use serde_json::json;

    fn names(request: &GiveasItemsRequest) -> Vec<String> {
        request.names()
    }

    #[test]
    fn test_bare_array() {
        let request = GiveasItemsRequest::from_json(json!([{"name": "Apple"}])).unwrap();
        assert_eq!(names(&request), vec!["Apple"]);
        assert_eq!(request.resume_url, None);
    }

    #[test]
    fn test_foods_envelope_with_resume_url() {
        let request = GiveasItemsRequest::from_json(json!({
            "foods": [{"name": "Apple", "qty": 2}],
            "resumeUrl": "https://hooks.example.com/resume/1",
            "jobId": "job-1"
        }))
        .unwrap();

        assert_eq!(request.foods[0].extra["qty"], 2);
        assert_eq!(
            request.resume_url.as_deref(),
            Some("https://hooks.example.com/resume/1")
        );
        assert_eq!(request.job_id.as_deref(), Some("job-1"));
    }

    #[test]
    fn test_body_data_variants() {
        let array = json!({"body": {"data": [{"name": "Oats"}]}});
        let object = json!({"body": {"data": {"foods": [{"name": "Oats"}]}}});
        let string = json!({"body": {"data": "[{\"name\":\"Oats\"}]"}});
        let string_object = json!({"body": {"data": "{\"foods\":[{\"name\":\"Oats\"}]}"}});

        for body in [array, object, string, string_object] {
            let request = GiveasItemsRequest::from_json(body.clone()).unwrap();
            assert_eq!(names(&request), vec!["Oats"], "{body}");
        }
    }

    #[test]
    fn test_resume_url_inside_body_envelope() {
        let request = GiveasItemsRequest::from_json(json!({
            "body": {"data": [{"name": "Oats"}], "resumeUrl": "http://n8n.local/webhook/abc"}
        }))
        .unwrap();
        assert_eq!(request.resume_url.as_deref(), Some("http://n8n.local/webhook/abc"));
    }

    #[test]
    fn test_empty_or_absent_foods_are_client_errors() {
        for body in [
            json!([]),
            json!({}),
            json!({"foods": []}),
            json!({"foods": null}),
            json!({"body": {"data": "[]"}}),
        ] {
            let error = GiveasItemsRequest::from_json(body.clone()).unwrap_err();
            assert_eq!(error.code, ErrorCode::MissingRequiredField, "{body}");
            assert_eq!(error.message, "foods array is required");
        }
    }

    #[test]
    fn test_ill_typed_bodies_are_rejected() {
        let cases = [
            json!("apple"),
            json!({"foods": "apple"}),
            json!({"foods": [{"qty": 1}]}),
            json!({"foods": [{"name": 42}]}),
            json!({"foods": ["apple"]}),
            json!({"body": "x"}),
            json!({"body": {"data": "not json"}}),
            json!({"body": {"data": "\"nested\""}}),
            json!({"foods": [{"name": "a"}], "resumeUrl": 5}),
            json!({"foods": [{"name": "a"}], "resumeUrl": "ftp://x"}),
        ];
        for body in cases {
            let error = GiveasItemsRequest::from_json(body.clone()).unwrap_err();
            assert_eq!(error.http_status(), 400, "{body}");
        }
    }

    #[test]
    fn test_foods_wins_over_body_envelope() {
        let request = GiveasItemsRequest::from_json(json!({
            "foods": [{"name": "Top"}],
            "body": {"data": [{"name": "Nested"}]}
        }))
        .unwrap();
        assert_eq!(names(&request), vec!["Top"]);
    }
}
