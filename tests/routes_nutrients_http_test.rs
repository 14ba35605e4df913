// ABOUTME: HTTP integration tests for the nutrient catalog listing route
// ABOUTME: Checks display ordering, category filtering and rejection of unknown categories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use giveas_server::nutrients::{import_all, NutrientRecord};
use helpers::axum_test::AxumTestRequest;
use serde_json::Value;

async fn app_with_catalog() -> axum::Router {
    let (app, resources) = common::create_test_app(&[]).await.unwrap();
    let records = vec![
        NutrientRecord::new("1087", "Calcium, Ca", Some("MG"), Some("5300")),
        NutrientRecord::new("1089", "Iron", Some("MG"), Some("5400")),
        NutrientRecord::new("1090", "Calcium", Some("MG"), Some("5300")),
        NutrientRecord::new("1003", "Protein", Some("G"), Some("600")),
        NutrientRecord::new("1008", "Energy", Some("KCAL"), Some("300")),
        NutrientRecord::new("1162", "Vitamin C, total ascorbic acid", Some("MG"), None),
    ];
    let summary = import_all(resources.database.as_ref(), records).await;
    assert_eq!(summary.succeeded, 6);
    app
}

fn names(body: &Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_list_orders_by_sort_order_then_name() {
    let app = app_with_catalog().await;

    let response = AxumTestRequest::get("/nutrients").send(app).await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["count"], 6);
    assert_eq!(
        names(&body),
        vec![
            "Energy",
            "Protein",
            "Vitamin C, total ascorbic acid",
            "Calcium",
            "Calcium, Ca",
            "Iron"
        ]
    );
}

#[tokio::test]
async fn test_list_filters_by_category_label() {
    let app = app_with_catalog().await;

    let response = AxumTestRequest::get("/nutrients?category=Minerals")
        .send(app)
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(names(&body), vec!["Calcium", "Iron"]);
    assert_eq!(body["data"][0]["category"], "Minerals");
    assert_eq!(body["data"][0]["unit"], "mg");
}

#[tokio::test]
async fn test_list_accepts_encoded_multi_word_label() {
    let app = app_with_catalog().await;

    let response = AxumTestRequest::get("/nutrients?category=Amino%20Acids")
        .send(app)
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json();
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_unknown_category_is_rejected() {
    let app = app_with_catalog().await;

    let response = AxumTestRequest::get("/nutrients?category=Sweets")
        .send(app)
        .await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}
