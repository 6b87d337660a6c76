//! One controller per dashboard screen.
//!
//! Each view owns its state exclusively and exposes async actions that
//! fetch, normalize and store data. Rendering is left to the caller via
//! `mlboard_core::render`.

mod dataset;
mod model_evaluation;
mod preprocessing;
mod spam;
mod state;

pub use dataset::{DatasetData, DatasetView};
pub use model_evaluation::{ModelEvaluation, ModelEvaluationView};
pub use preprocessing::PreprocessingView;
pub use spam::SpamView;
pub use state::{LoadingGuard, Settled, ViewCell, ViewState};

use mlboard_core::CoreError;

use crate::api::ApiError;

/// Why a view action failed.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// Transport, status or payload failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Input rejected before any request was issued.
    #[error("Invalid input: {0}")]
    Validation(CoreError),
}

impl ViewError {
    /// Message shown to the user. Input errors carry their own text;
    /// everything else shows the view's generic failure message.
    pub fn user_message(&self, failure_message: &str) -> String {
        match self {
            Self::Validation(CoreError::Validation(message)) => message.clone(),
            _ => failure_message.to_string(),
        }
    }
}

/// A payload that failed normalization counts as an API failure.
fn malformed(err: CoreError) -> ViewError {
    ViewError::Api(ApiError::Malformed(err))
}
