use std::sync::Arc;

use mlboard_core::model::{parse_model_comparison, ModelComparisonEntry, RocCurve};
use mlboard_core::{endpoints, messages};

use super::state::{Settled, ViewCell, ViewState};
use super::{malformed, ViewError};
use crate::api::MlApi;
use crate::batch::{fetch_batch, Endpoint};

const VIEW: &str = "model_evaluation";

#[derive(Debug, Clone, PartialEq)]
pub struct ModelEvaluation {
    /// Models in response order, names unique.
    pub models: Vec<ModelComparisonEntry>,
    pub roc: RocCurve,
    /// Name of the model shown in the detail cards.
    pub selected: Option<String>,
}

impl ModelEvaluation {
    pub fn selected_model(&self) -> Option<&ModelComparisonEntry> {
        let name = self.selected.as_deref()?;
        self.models.iter().find(|m| m.model_name == name)
    }
}

pub struct ModelEvaluationView {
    api: Arc<MlApi>,
    roc_points: u32,
    cell: ViewCell<ModelEvaluation>,
}

impl ModelEvaluationView {
    pub fn new(api: Arc<MlApi>, roc_points: u32) -> Self {
        Self {
            api,
            roc_points,
            cell: ViewCell::new(VIEW, messages::MODEL_LOAD_FAILED),
        }
    }

    pub fn state(&self) -> ViewState<ModelEvaluation> {
        self.cell.snapshot()
    }

    /// Fetch the comparison and the ROC curve. On success the selection
    /// falls back to the first model.
    pub async fn refresh(&self) -> Settled {
        let guard = self.cell.begin();
        let result = self.load().await;
        guard.settle(result)
    }

    /// Select a model by name. Unknown names and an unloaded view leave
    /// the selection unchanged.
    pub fn select(&self, model_name: &str) -> bool {
        self.cell
            .with_data_mut(|data| {
                if !data.models.iter().any(|m| m.model_name == model_name) {
                    return false;
                }
                data.selected = Some(model_name.to_string());
                true
            })
            .unwrap_or(false)
    }

    pub fn reset(&self) {
        self.cell.reset();
    }

    async fn load(&self) -> Result<ModelEvaluation, ViewError> {
        let batch = fetch_batch(
            &self.api,
            &[
                Endpoint::get(endpoints::MODEL_COMPARISON),
                Endpoint::get(endpoints::roc_path(self.roc_points)),
            ],
        )
        .await?;

        let comparison = batch.required(0);
        let models = parse_model_comparison(comparison).map_err(malformed)?;
        let listed = comparison["models"].as_array().map_or(0, Vec::len);
        if listed > models.len() {
            tracing::warn!(
                view = VIEW,
                dropped = listed - models.len(),
                "Duplicate model names in comparison, keeping first entries"
            );
        }

        let roc = RocCurve::from_json(batch.required(1)).map_err(malformed)?;
        if !roc.is_sorted_by_fpr() {
            tracing::warn!(
                view = VIEW,
                points = roc.len(),
                "ROC points are not in ascending FPR order; rendering as received"
            );
        }

        Ok(ModelEvaluation {
            selected: models.first().map(|m| m.model_name.clone()),
            models,
            roc,
        })
    }
}
