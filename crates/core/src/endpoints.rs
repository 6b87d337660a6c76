//! Well-known API paths and wire constants.
//!
//! Paths are relative to the configured API base URL. Trailing slashes
//! match the routes the API registers; the model endpoints have none.

/// Dataset summary (total records, attack distribution).
pub const DATASET_INFO: &str = "/api/dataset/info/";

/// Chart extras: feature statistics and scatter samples.
pub const DATASET_VISUALIZATIONS: &str = "/api/dataset/visualizations/";

/// Sidebar status. Optional: failures never block the dataset view.
pub const DATASET_STATUS: &str = "/api/dataset/status/";

/// Classify a single email (`POST {subject, body}`).
pub const SPAM_PREDICT: &str = "/api/spam/predict/";

/// Compute train/validation/test partition sizes.
pub const PREPROCESSING_SPLIT: &str = "/api/preprocessing/split/";

/// Run the preprocessing pipeline and report its steps.
pub const PREPROCESSING_TRANSFORM: &str = "/api/preprocessing/transform/";

/// Per-model metrics for every evaluated model.
pub const MODEL_COMPARISON: &str = "/api/model/comparison";

/// ROC curve samples. Takes an `n_points` query parameter.
pub const MODEL_ROC: &str = "/api/model/roc";

/// Default number of ROC samples requested.
pub const DEFAULT_ROC_POINTS: u32 = 100;

/// Seed sent with every split request.
pub const DEFAULT_RANDOM_STATE: u64 = 42;

/// Build the ROC path with its sample-count query.
pub fn roc_path(n_points: u32) -> String {
    format!("{MODEL_ROC}?n_points={n_points}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roc_path_includes_point_count() {
        assert_eq!(roc_path(100), "/api/model/roc?n_points=100");
    }
}
