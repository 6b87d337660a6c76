use std::sync::Arc;

use mlboard_core::dataset::{DatasetStatus, DatasetSummary, DatasetVisualizations};
use mlboard_core::{endpoints, messages};

use super::state::{Settled, ViewCell, ViewState};
use super::{malformed, ViewError};
use crate::api::MlApi;
use crate::batch::{fetch_batch, Endpoint};

const VIEW: &str = "dataset";

/// Everything the dataset screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetData {
    pub summary: DatasetSummary,
    pub visualizations: DatasetVisualizations,
    /// `None` when the status endpoint failed.
    pub status: Option<DatasetStatus>,
}

pub struct DatasetView {
    api: Arc<MlApi>,
    cell: ViewCell<DatasetData>,
}

impl DatasetView {
    pub fn new(api: Arc<MlApi>) -> Self {
        Self {
            api,
            cell: ViewCell::new(VIEW, messages::DATASET_LOAD_FAILED),
        }
    }

    pub fn state(&self) -> ViewState<DatasetData> {
        self.cell.snapshot()
    }

    /// Fetch summary, visualizations and status together. Summary and
    /// visualizations are required; status is optional.
    pub async fn refresh(&self) -> Settled {
        let guard = self.cell.begin();
        let result = self.load().await;
        guard.settle(result)
    }

    pub fn reset(&self) {
        self.cell.reset();
    }

    async fn load(&self) -> Result<DatasetData, ViewError> {
        let batch = fetch_batch(
            &self.api,
            &[
                Endpoint::get(endpoints::DATASET_INFO),
                Endpoint::get(endpoints::DATASET_VISUALIZATIONS),
                Endpoint::get(endpoints::DATASET_STATUS).optional(),
            ],
        )
        .await?;

        Ok(DatasetData {
            summary: DatasetSummary::from_json(batch.required(0)).map_err(malformed)?,
            visualizations: DatasetVisualizations::from_json(batch.required(1))
                .map_err(malformed)?,
            status: batch.optional(2).map(DatasetStatus::from_json),
        })
    }
}
