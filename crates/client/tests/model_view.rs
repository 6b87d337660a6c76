//! Integration tests for the model-evaluation view.

mod common;

use std::collections::HashMap;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use mlboard_client::views::{ModelEvaluationView, Settled};
use mlboard_core::messages;

fn router() -> Router {
    Router::new()
        .route("/api/model/comparison", get(|| async { Json(common::model_comparison()) }))
        .route(
            "/api/model/roc",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                if params.get("n_points").map(String::as_str) != Some("25") {
                    return Err(StatusCode::BAD_REQUEST);
                }
                Ok(Json(common::roc_curve()))
            }),
        )
}

// ---------------------------------------------------------------------------
// Test: comparison and ROC load together, first model selected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn refresh_loads_models_and_roc() {
    let base = common::spawn(router()).await;
    let view = ModelEvaluationView::new(common::api(&base), 25);

    assert_eq!(view.refresh().await, Settled::Applied);

    let data = view.state().data.unwrap();
    // The repeated "Random Forest" entry is dropped.
    assert_eq!(data.models.len(), 2);
    assert_eq!(data.selected.as_deref(), Some("Random Forest"));
    assert_eq!(data.selected_model().unwrap().metrics.accuracy, 0.95);
    assert_eq!(data.roc.len(), 4);
    assert_eq!(data.roc.area_under_curve, 0.9123);
}

// ---------------------------------------------------------------------------
// Test: selection by name
// ---------------------------------------------------------------------------

#[tokio::test]
async fn select_switches_between_known_models() {
    let base = common::spawn(router()).await;
    let view = ModelEvaluationView::new(common::api(&base), 25);

    assert!(!view.select("Logistic Regression"), "nothing loaded yet");

    view.refresh().await;
    assert!(view.select("Logistic Regression"));
    assert!(!view.select("SVM"));

    let data = view.state().data.unwrap();
    assert_eq!(data.selected.as_deref(), Some("Logistic Regression"));
}

// ---------------------------------------------------------------------------
// Test: a failing ROC request fails the whole view
// ---------------------------------------------------------------------------

#[tokio::test]
async fn roc_failure_fails_view() {
    let base = common::spawn(router()).await;
    // The stub rejects any n_points other than 25.
    let view = ModelEvaluationView::new(common::api(&base), 100);

    assert_eq!(view.refresh().await, Settled::Failed);

    let state = view.state();
    assert!(!state.loading);
    assert!(state.data.is_none());
    assert_eq!(state.error.as_deref(), Some(messages::MODEL_LOAD_FAILED));
}

// ---------------------------------------------------------------------------
// Test: mismatched ROC arrays are a malformed payload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn mismatched_roc_is_rejected() {
    let router = Router::new()
        .route("/api/model/comparison", get(|| async { Json(common::model_comparison()) }))
        .route(
            "/api/model/roc",
            get(|| async { Json(json!({"fpr": [0.0, 1.0], "tpr": [0.0], "auc": 0.5})) }),
        );
    let base = common::spawn(router).await;
    let view = ModelEvaluationView::new(common::api(&base), 100);

    assert_eq!(view.refresh().await, Settled::Failed);
    assert!(view.state().data.is_none());
}
