use std::sync::{Arc, Mutex, PoisonError};

use mlboard_core::spam::{EmailInput, SampleEmail, SpamAnalysisResult};
use mlboard_core::{endpoints, messages};

use super::state::{Settled, ViewCell, ViewState};
use super::{malformed, ViewError};
use crate::api::MlApi;
use crate::batch::Endpoint;

const VIEW: &str = "spam";

/// Email form plus the last classification.
pub struct SpamView {
    api: Arc<MlApi>,
    form: Mutex<EmailInput>,
    cell: ViewCell<SpamAnalysisResult>,
}

impl SpamView {
    pub fn new(api: Arc<MlApi>) -> Self {
        Self {
            api,
            form: Mutex::new(EmailInput::default()),
            cell: ViewCell::new(VIEW, messages::SPAM_ANALYSIS_FAILED),
        }
    }

    pub fn state(&self) -> ViewState<SpamAnalysisResult> {
        self.cell.snapshot()
    }

    pub fn input(&self) -> EmailInput {
        self.form.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set_subject(&self, subject: impl Into<String>) {
        self.form.lock().unwrap_or_else(PoisonError::into_inner).subject = subject.into();
    }

    pub fn set_body(&self, body: impl Into<String>) {
        self.form.lock().unwrap_or_else(PoisonError::into_inner).body = body.into();
    }

    /// Fill the form with a built-in example and drop the previous result.
    pub fn load_sample(&self, sample: SampleEmail) {
        *self.form.lock().unwrap_or_else(PoisonError::into_inner) = sample.email();
        self.cell.reset();
    }

    /// Empty the form and drop the previous result.
    pub fn clear(&self) {
        *self.form.lock().unwrap_or_else(PoisonError::into_inner) = EmailInput::default();
        self.cell.reset();
    }

    /// Classify the current form. A blank form fails locally without
    /// contacting the API.
    pub async fn analyze(&self) -> Settled {
        let input = self.input();
        if let Err(e) = input.validate() {
            return self.cell.fail_local(ViewError::Validation(e));
        }

        let guard = self.cell.begin();
        let result = self.classify(&input).await;
        guard.settle(result)
    }

    async fn classify(&self, input: &EmailInput) -> Result<SpamAnalysisResult, ViewError> {
        let endpoint = Endpoint::post(endpoints::SPAM_PREDICT).with_body(input.to_json());
        let body = self.api.send(&endpoint).await?;
        SpamAnalysisResult::from_json(&body).map_err(malformed)
    }
}
