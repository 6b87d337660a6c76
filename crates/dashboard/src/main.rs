//! `mlboard-dashboard` -- headless run of the ML dashboard.
//!
//! Loads every view once against the ML API and prints the rendered
//! panels as JSON on stdout.
//!
//! # Environment variables
//!
//! | Variable              | Default                 | Description                        |
//! |-----------------------|-------------------------|------------------------------------|
//! | `ML_API_URL`          | `http://localhost:8000` | Base URL of the ML API             |
//! | `ML_API_TIMEOUT_SECS` | `30`                    | Per-request timeout                |
//! | `ROC_POINTS`          | `100`                   | Samples requested for the ROC      |
//! | `DATASET_SIZE`        | `125973`                | Dataset size for the split preview |
//! | `SPAM_SAMPLE`         | `spam`                  | Sample email, `spam` or `legitimo` |

mod report;

use std::sync::Arc;

use mlboard_client::views::{DatasetView, ModelEvaluationView, PreprocessingView, SpamView};
use mlboard_client::{ClientConfig, MlApi};
use mlboard_core::spam::SampleEmail;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mlboard_dashboard=info,mlboard_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env()?;
    tracing::info!(
        api_url = %config.api_url,
        timeout_secs = config.request_timeout.as_secs(),
        roc_points = config.roc_points,
        "Starting mlboard-dashboard",
    );

    let api = Arc::new(MlApi::new(&config)?);

    let dataset = DatasetView::new(Arc::clone(&api));
    let models = ModelEvaluationView::new(Arc::clone(&api), config.roc_points);
    let spam = SpamView::new(Arc::clone(&api));
    let preprocessing = PreprocessingView::new(Arc::clone(&api), config.dataset_size);

    let sample = match std::env::var("SPAM_SAMPLE").as_deref() {
        Ok("legitimo") => SampleEmail::Legitimate,
        _ => SampleEmail::Spam,
    };
    spam.load_sample(sample);

    // Views are independent; run them side by side.
    tokio::join!(
        dataset.refresh(),
        models.refresh(),
        spam.analyze(),
        preprocessing.calculate_split(),
        preprocessing.load_pipeline(),
    );

    let output = serde_json::json!({
        "dataset": report::dataset(&dataset.state()),
        "model_evaluation": report::model_evaluation(&models.state()),
        "spam": report::spam(&spam.state()),
        "preprocessing": report::preprocessing(&preprocessing),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    tracing::info!("Done");
    Ok(())
}
