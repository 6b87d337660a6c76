use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mlboard_core::preprocessing::{PipelineInfo, SplitRequest, SplitResult};
use mlboard_core::split::{preview_sizes, SplitConfiguration, SplitSizes};
use mlboard_core::{endpoints, messages};

use super::state::{Settled, ViewCell, ViewState};
use super::{malformed, ViewError};
use crate::api::MlApi;
use crate::batch::Endpoint;

#[derive(Debug, Clone, Copy)]
struct SplitForm {
    ratios: SplitConfiguration,
    stratified: bool,
}

impl Default for SplitForm {
    fn default() -> Self {
        Self {
            ratios: SplitConfiguration::default(),
            stratified: true,
        }
    }
}

/// Split configuration form, split results and the preprocessing
/// pipeline summary. The split and the pipeline load independently.
pub struct PreprocessingView {
    api: Arc<MlApi>,
    dataset_size: u64,
    form: Mutex<SplitForm>,
    split: ViewCell<SplitResult>,
    pipeline: ViewCell<PipelineInfo>,
}

impl PreprocessingView {
    pub fn new(api: Arc<MlApi>, dataset_size: u64) -> Self {
        Self {
            api,
            dataset_size,
            form: Mutex::new(SplitForm::default()),
            split: ViewCell::new("split", messages::SPLIT_FAILED),
            pipeline: ViewCell::new("pipeline", messages::PIPELINE_FAILED),
        }
    }

    fn form(&self) -> MutexGuard<'_, SplitForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn ratios(&self) -> SplitConfiguration {
        self.form().ratios
    }

    pub fn stratified(&self) -> bool {
        self.form().stratified
    }

    /// Move the train slider; validation and test rebalance.
    pub fn set_train(&self, train: u32) -> SplitConfiguration {
        let mut form = self.form();
        form.ratios.set_train(train);
        form.ratios
    }

    /// Move the validation slider; test absorbs the change.
    pub fn set_validation(&self, validation: u32) -> SplitConfiguration {
        let mut form = self.form();
        form.ratios.set_validation(validation);
        form.ratios
    }

    /// Replace the ratios wholesale, e.g. from a saved preset. No
    /// rebalancing happens; [`PreprocessingView::calculate_split`]
    /// rejects sums other than 100.
    pub fn set_ratios(&self, ratios: SplitConfiguration) {
        self.form().ratios = ratios;
    }

    pub fn set_stratified(&self, stratified: bool) {
        self.form().stratified = stratified;
    }

    pub fn dataset_size(&self) -> u64 {
        self.dataset_size
    }

    /// Partition sizes predicted from the current ratios.
    pub fn preview(&self) -> SplitSizes {
        preview_sizes(self.dataset_size, &self.ratios())
    }

    pub fn split_state(&self) -> ViewState<SplitResult> {
        self.split.snapshot()
    }

    pub fn pipeline_state(&self) -> ViewState<PipelineInfo> {
        self.pipeline.snapshot()
    }

    /// Ask the API to split the dataset. Ratios that do not sum to 100
    /// fail locally and no request is sent.
    pub async fn calculate_split(&self) -> Settled {
        let form = *self.form();
        let request = match SplitRequest::new(form.ratios, form.stratified) {
            Ok(request) => request,
            Err(e) => return self.split.fail_local(ViewError::Validation(e)),
        };

        let guard = self.split.begin();
        let result = self.request_split(&request).await;
        guard.settle(result)
    }

    pub async fn load_pipeline(&self) -> Settled {
        let guard = self.pipeline.begin();
        let result = self.request_pipeline().await;
        guard.settle(result)
    }

    pub fn reset(&self) {
        *self.form() = SplitForm::default();
        self.split.reset();
        self.pipeline.reset();
    }

    async fn request_split(&self, request: &SplitRequest) -> Result<SplitResult, ViewError> {
        let endpoint = Endpoint::post(endpoints::PREPROCESSING_SPLIT).with_body(request.to_json());
        let body = self.api.send(&endpoint).await?;
        SplitResult::from_json(&body).map_err(malformed)
    }

    async fn request_pipeline(&self) -> Result<PipelineInfo, ViewError> {
        let body = self
            .api
            .send(&Endpoint::post(endpoints::PREPROCESSING_TRANSFORM))
            .await?;
        PipelineInfo::from_json(&body).map_err(malformed)
    }
}
