//! Integration tests for the spam detector view.

mod common;

use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

use common::Hits;
use mlboard_client::views::{Settled, SpamView};
use mlboard_core::messages;
use mlboard_core::spam::{FeatureValue, SampleEmail};

fn router(hits: Hits) -> Router {
    Router::new().route(
        "/api/spam/predict/",
        post(move |Json(body): Json<Value>| {
            let hits = hits.clone();
            async move {
                hits.record();
                assert!(body["subject"].is_string());
                assert!(body["body"].is_string());
                Json(common::spam_result())
            }
        }),
    )
}

// ---------------------------------------------------------------------------
// Test: analyze posts the form and stores the verdict
// ---------------------------------------------------------------------------

#[tokio::test]
async fn analyze_classifies_sample() {
    let hits = Hits::default();
    let base = common::spawn(router(hits.clone())).await;
    let view = SpamView::new(common::api(&base));

    view.load_sample(SampleEmail::Spam);
    assert_eq!(view.analyze().await, Settled::Applied);
    assert_eq!(hits.count(), 1);

    let result = view.state().data.unwrap();
    assert!(result.is_spam);
    assert_eq!(result.confidence_percent, 92.4);
    assert_eq!(result.features["tiene_urls"], FeatureValue::Flag(true));
}

// ---------------------------------------------------------------------------
// Test: blank form fails locally without a request
// ---------------------------------------------------------------------------

#[tokio::test]
async fn blank_email_sends_no_request() {
    let hits = Hits::default();
    let base = common::spawn(router(hits.clone())).await;
    let view = SpamView::new(common::api(&base));

    view.set_subject("   ");
    view.set_body("");
    assert_eq!(view.analyze().await, Settled::Failed);

    assert_eq!(hits.count(), 0);
    let state = view.state();
    assert_eq!(state.error.as_deref(), Some(messages::EMAIL_REQUIRED));
    assert!(!state.loading);
}

// ---------------------------------------------------------------------------
// Test: clear empties the form and the result
// ---------------------------------------------------------------------------

#[tokio::test]
async fn clear_resets_form_and_result() {
    let base = common::spawn(router(Hits::default())).await;
    let view = SpamView::new(common::api(&base));

    view.set_body("Oferta exclusiva");
    view.analyze().await;
    assert!(view.state().data.is_some());

    view.clear();
    assert_eq!(view.input().body, "");
    assert!(view.state().data.is_none());
}

// ---------------------------------------------------------------------------
// Test: API down
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_api_shows_analysis_error() {
    let view = SpamView::new(common::api(&common::closed_port().await));
    view.load_sample(SampleEmail::Legitimate);

    assert_eq!(view.analyze().await, Settled::Failed);
    assert_eq!(view.state().error.as_deref(), Some(messages::SPAM_ANALYSIS_FAILED));
}
