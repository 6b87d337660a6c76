//! Model-evaluation entities: per-model metrics, confusion matrices and
//! the ROC curve.

use serde_json::Value;

use crate::error::CoreError;
use crate::normalize::{as_count, as_numbers, validate_unit_range, Key, Payload};

const MODELS: Key = Key::plain("models");
const MODEL_NAME: Key = Key::plain("model_name");
const METRICS: Key = Key::plain("metrics");
const ACCURACY: Key = Key::plain("accuracy");
const PRECISION: Key = Key::plain("precision");
const RECALL: Key = Key::plain("recall");
const F1_SCORE: Key = Key::plain("f1_score");
const CONFUSION_MATRIX: Key = Key::plain("confusion_matrix");
const TRAINING_TIME: Key = Key::plain("training_time_s");
const CROSS_VALIDATION: Key = Key::plain("cross_validation_score");
const FPR: Key = Key::plain("fpr");
const TPR: Key = Key::plain("tpr");
const AUC: Key = Key::plain("auc");
const THRESHOLDS: Key = Key::plain("thresholds");

// ---------------------------------------------------------------------------
// ConfusionMatrix
// ---------------------------------------------------------------------------

/// Binary confusion matrix. Wire layout is `[[TN, FP], [FN, TP]]`: rows
/// are the actual class, columns the predicted class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_negative: u64,
    pub false_positive: u64,
    pub false_negative: u64,
    pub true_positive: u64,
}

impl ConfusionMatrix {
    pub fn from_rows(rows: [[u64; 2]; 2]) -> Self {
        let [[true_negative, false_positive], [false_negative, true_positive]] = rows;
        Self {
            true_negative,
            false_positive,
            false_negative,
            true_positive,
        }
    }

    /// Sum of all four cells, `None` on overflow.
    pub fn total(&self) -> Option<u64> {
        self.true_negative
            .checked_add(self.false_positive)?
            .checked_add(self.false_negative)?
            .checked_add(self.true_positive)
    }

    fn from_json(value: &Value) -> Result<Self, CoreError> {
        let field = CONFUSION_MATRIX.name();
        let rows = value
            .as_array()
            .filter(|rows| rows.len() == 2)
            .ok_or_else(|| CoreError::invalid(field, "expected a 2x2 matrix"))?;

        let mut cells = [[0u64; 2]; 2];
        for (r, row) in rows.iter().enumerate() {
            let row = row
                .as_array()
                .filter(|row| row.len() == 2)
                .ok_or_else(|| CoreError::invalid(field, "expected a 2x2 matrix"))?;
            for (c, cell) in row.iter().enumerate() {
                cells[r][c] = as_count(cell, field)?;
            }
        }
        let matrix = Self::from_rows(cells);
        if matrix.total().is_none() {
            return Err(CoreError::invalid(field, "cell counts overflow"));
        }
        Ok(matrix)
    }
}

// ---------------------------------------------------------------------------
// Model metrics & comparison
// ---------------------------------------------------------------------------

/// Classification metrics, each in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub confusion_matrix: ConfusionMatrix,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelComparisonEntry {
    /// Unique key within a comparison.
    pub model_name: String,
    pub metrics: ModelMetrics,
    pub training_time_seconds: f64,
    pub cross_validation_score: f64,
}

impl ModelComparisonEntry {
    /// First word of the model name, used as a compact chart label
    /// (`"Random Forest"` → `"Random"`).
    pub fn short_name(&self) -> &str {
        self.model_name
            .split_whitespace()
            .next()
            .unwrap_or(&self.model_name)
    }

    fn from_json(value: &Value) -> Result<Self, CoreError> {
        let payload = Payload::object(value, "model comparison entry")?;
        let metrics = payload
            .optional_object(METRICS)
            .ok_or(CoreError::MissingField {
                field: METRICS.name(),
            })?;

        // The matrix sits beside the metrics; older responses nest it.
        let matrix = payload
            .get(CONFUSION_MATRIX)
            .or_else(|| metrics.get(CONFUSION_MATRIX))
            .ok_or(CoreError::MissingField {
                field: CONFUSION_MATRIX.name(),
            })?;

        let training_time_seconds = payload.required_number(TRAINING_TIME)?;
        if training_time_seconds < 0.0 {
            return Err(CoreError::invalid(
                TRAINING_TIME.name(),
                format!("must be non-negative, got {training_time_seconds}"),
            ));
        }

        Ok(Self {
            model_name: payload.required_str(MODEL_NAME)?.to_owned(),
            metrics: ModelMetrics {
                accuracy: metrics.required_unit(ACCURACY)?,
                precision: metrics.required_unit(PRECISION)?,
                recall: metrics.required_unit(RECALL)?,
                f1: metrics.required_unit(F1_SCORE)?,
                confusion_matrix: ConfusionMatrix::from_json(matrix)?,
            },
            training_time_seconds,
            cross_validation_score: payload.required_unit(CROSS_VALIDATION)?,
        })
    }
}

/// Normalize a `/model/comparison` payload (`{"models": [...]}`).
///
/// Entries keep response order. A repeated model name keeps the first
/// entry; the duplicate is dropped.
pub fn parse_model_comparison(value: &Value) -> Result<Vec<ModelComparisonEntry>, CoreError> {
    let payload = Payload::object(value, "model comparison")?;
    let mut entries: Vec<ModelComparisonEntry> = Vec::new();
    for item in payload.required_array(MODELS)? {
        let entry = ModelComparisonEntry::from_json(item)?;
        if entries.iter().any(|e| e.model_name == entry.model_name) {
            continue;
        }
        entries.push(entry);
    }
    Ok(entries)
}

// ---------------------------------------------------------------------------
// RocCurve
// ---------------------------------------------------------------------------

/// ROC samples with index-aligned rates.
///
/// The API emits points in ascending false-positive-rate order. The
/// normalizer does not reorder them; use [`RocCurve::is_sorted_by_fpr`]
/// to check the precondition.
#[derive(Debug, Clone, PartialEq)]
pub struct RocCurve {
    pub false_positive_rates: Vec<f64>,
    pub true_positive_rates: Vec<f64>,
    pub area_under_curve: f64,
    pub thresholds: Vec<f64>,
}

impl RocCurve {
    /// Normalize a `/model/roc` payload. Rates must be equal-length
    /// sequences of values in `[0, 1]`.
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        let payload = Payload::object(value, "roc curve")?;

        let fpr = payload
            .get(FPR)
            .ok_or(CoreError::MissingField { field: FPR.name() })?;
        let tpr = payload
            .get(TPR)
            .ok_or(CoreError::MissingField { field: TPR.name() })?;
        let false_positive_rates = as_numbers(fpr, FPR.name())?;
        let true_positive_rates = as_numbers(tpr, TPR.name())?;

        if false_positive_rates.len() != true_positive_rates.len() {
            return Err(CoreError::invalid(
                TPR.name(),
                format!(
                    "length {} does not match fpr length {}",
                    true_positive_rates.len(),
                    false_positive_rates.len()
                ),
            ));
        }
        for &rate in &false_positive_rates {
            validate_unit_range(rate, FPR.name())?;
        }
        for &rate in &true_positive_rates {
            validate_unit_range(rate, TPR.name())?;
        }

        let thresholds = match payload.get(THRESHOLDS) {
            Some(v) => as_numbers(v, THRESHOLDS.name())?,
            None => Vec::new(),
        };

        Ok(Self {
            false_positive_rates,
            true_positive_rates,
            area_under_curve: payload.required_unit(AUC)?,
            thresholds,
        })
    }

    pub fn len(&self) -> usize {
        self.false_positive_rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.false_positive_rates.is_empty()
    }

    pub fn is_sorted_by_fpr(&self) -> bool {
        self.false_positive_rates.windows(2).all(|w| w[0] <= w[1])
    }
}
