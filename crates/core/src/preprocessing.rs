//! Split request/response and preprocessing pipeline summaries.

use serde_json::{json, Value};

use crate::endpoints::DEFAULT_RANDOM_STATE;
use crate::error::CoreError;
use crate::normalize::{as_count_map, Key, Payload};
use crate::split::SplitConfiguration;
use crate::types::CountMap;

const TRAIN_SIZE: Key = Key::dual("tamaño_entrenamiento", "tamano_entrenamiento");
const VALIDATION_SIZE: Key = Key::dual("tamaño_validacion", "tamano_validacion");
const TEST_SIZE: Key = Key::dual("tamaño_prueba", "tamano_prueba");
const STRATIFIED: Key = Key::plain("estratificado");
const RANDOM_SEED: Key = Key::plain("semilla_aleatoria");
const DISTRIBUTION: Key = Key::dual("distribución", "distribucion");
const DIST_TRAIN: Key = Key::plain("train");
const DIST_VALIDATION: Key = Key::plain("validation");
const DIST_TEST: Key = Key::plain("test");

const PIPELINE_COMPLETE: Key = Key::plain("pipeline_completo");
const STEPS: Key = Key::plain("pasos");
const STEP_NUMBER: Key = Key::plain("paso");
const STEP_NAME: Key = Key::plain("nombre");
const STEP_DESCRIPTION: Key = Key::dual("descripción", "descripcion");
const STEP_COMPLETED: Key = Key::plain("completado");
const ORIGINAL_FEATURES: Key =
    Key::dual("características_originales", "caracteristicas_originales");
const FINAL_FEATURES: Key = Key::dual("características_finales", "caracteristicas_finales");
const ELAPSED_MS: Key = Key::plain("tiempo_procesamiento_ms");

// ---------------------------------------------------------------------------
// Split request
// ---------------------------------------------------------------------------

/// Body of the split POST. Ratios travel as fractions of one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitRequest {
    pub ratios: SplitConfiguration,
    pub stratified: bool,
    pub random_state: u64,
}

impl SplitRequest {
    /// Build a request, refusing configurations that do not sum to 100.
    pub fn new(ratios: SplitConfiguration, stratified: bool) -> Result<Self, CoreError> {
        ratios.validate()?;
        Ok(Self {
            ratios,
            stratified,
            random_state: DEFAULT_RANDOM_STATE,
        })
    }

    pub fn to_json(&self) -> Value {
        let (train, validation, test) = self.ratios.fractions();
        json!({
            "train_ratio": train,
            "val_ratio": validation,
            "test_ratio": test,
            "stratified": self.stratified,
            "random_state": self.random_state,
        })
    }
}

// ---------------------------------------------------------------------------
// Split result
// ---------------------------------------------------------------------------

/// Per-partition class counts reported alongside a split.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitDistribution {
    pub train: CountMap,
    pub validation: CountMap,
    pub test: CountMap,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitResult {
    pub train_size: u64,
    pub validation_size: u64,
    pub test_size: u64,
    pub stratified: bool,
    pub random_seed: u64,
    pub distribution: Option<SplitDistribution>,
}

impl SplitResult {
    /// Normalize a `/preprocessing/split/` payload. The class
    /// distribution is optional; a partition missing from it is empty.
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        let payload = Payload::object(value, "split result")?;

        let distribution = match payload.optional_object(DISTRIBUTION) {
            None => None,
            Some(dist) => {
                let part = |key: Key| -> Result<CountMap, CoreError> {
                    match dist.get(key) {
                        Some(v) => as_count_map(v, key.name()),
                        None => Ok(CountMap::new()),
                    }
                };
                Some(SplitDistribution {
                    train: part(DIST_TRAIN)?,
                    validation: part(DIST_VALIDATION)?,
                    test: part(DIST_TEST)?,
                })
            }
        };

        Ok(Self {
            train_size: payload.required_count(TRAIN_SIZE)?,
            validation_size: payload.required_count(VALIDATION_SIZE)?,
            test_size: payload.required_count(TEST_SIZE)?,
            stratified: payload.optional_bool(STRATIFIED),
            random_seed: payload.required_count(RANDOM_SEED)?,
            distribution,
        })
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineStep {
    pub number: u64,
    pub name: String,
    pub description: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineInfo {
    pub complete: bool,
    /// Steps in execution order.
    pub steps: Vec<PipelineStep>,
    pub original_feature_count: u64,
    pub final_feature_count: u64,
    pub elapsed_ms: u64,
}

impl PipelineInfo {
    /// Normalize a `/preprocessing/transform/` payload.
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        let payload = Payload::object(value, "pipeline")?;

        let steps = payload
            .optional_array(STEPS)
            .iter()
            .map(|item| -> Result<PipelineStep, CoreError> {
                let step = Payload::object(item, STEPS.name())?;
                Ok(PipelineStep {
                    number: step.required_count(STEP_NUMBER)?,
                    name: step.required_str(STEP_NAME)?.to_owned(),
                    description: step.optional_str(STEP_DESCRIPTION).unwrap_or_default().to_owned(),
                    completed: step.optional_bool(STEP_COMPLETED),
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        Ok(Self {
            complete: payload.optional_bool(PIPELINE_COMPLETE),
            steps,
            original_feature_count: payload.required_count(ORIGINAL_FEATURES)?,
            final_feature_count: payload.required_count(FINAL_FEATURES)?,
            elapsed_ms: payload.required_count(ELAPSED_MS)?,
        })
    }

    /// Features added (positive) or removed (negative) by the pipeline.
    pub fn feature_delta(&self) -> i64 {
        self.final_feature_count as i64 - self.original_feature_count as i64
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn request_sends_fractions_and_seed() {
        let request = SplitRequest::new(SplitConfiguration::default(), true).unwrap();
        assert_eq!(
            request.to_json(),
            json!({
                "train_ratio": 0.6,
                "val_ratio": 0.2,
                "test_ratio": 0.2,
                "stratified": true,
                "random_state": 42,
            })
        );
    }

    #[test]
    fn request_rejects_unbalanced_ratios() {
        let ratios = SplitConfiguration {
            train: 50,
            validation: 20,
            test: 20,
        };
        assert_matches!(SplitRequest::new(ratios, false), Err(CoreError::Validation(_)));
    }

    #[test]
    fn split_result_accepts_both_spellings() {
        let value = json!({
            "tamaño_entrenamiento": 75583,
            "tamano_validacion": 25194,
            "tamaño_prueba": 25196,
            "estratificado": true,
            "semilla_aleatoria": 42,
        });
        let result = SplitResult::from_json(&value).unwrap();
        assert_eq!(result.train_size, 75583);
        assert_eq!(result.validation_size, 25194);
        assert_eq!(result.test_size, 25196);
        assert!(result.distribution.is_none());
    }

    #[test]
    fn split_result_parses_distribution() {
        let value = json!({
            "tamaño_entrenamiento": 6,
            "tamaño_validacion": 2,
            "tamaño_prueba": 2,
            "semilla_aleatoria": 7,
            "distribucion": {
                "train": {"normal": 4, "otros": 2},
                "validation": {"normal": 2},
            },
        });
        let result = SplitResult::from_json(&value).unwrap();
        let dist = result.distribution.unwrap();
        assert_eq!(dist.train["otros"], 2);
        assert_eq!(dist.validation["normal"], 2);
        assert!(dist.test.is_empty());
        assert!(!result.stratified);
    }

    #[test]
    fn split_result_ignores_non_boolean_stratified_flag() {
        let value = json!({
            "tamaño_entrenamiento": 6,
            "tamaño_validacion": 2,
            "tamaño_prueba": 2,
            "estratificado": "yes",
            "semilla_aleatoria": 7,
        });
        let result = SplitResult::from_json(&value).unwrap();
        assert!(!result.stratified);
        assert_eq!(result.train_size, 6);
    }

    #[test]
    fn split_result_requires_sizes() {
        let value = json!({"tamaño_entrenamiento": 6, "semilla_aleatoria": 7});
        assert_matches!(
            SplitResult::from_json(&value),
            Err(CoreError::MissingField { field: "tamaño_validacion" })
        );
    }

    #[test]
    fn pipeline_parses_steps_in_order() {
        let value = json!({
            "pipeline_completo": true,
            "total_pasos": 2,
            "pasos": [
                {"paso": 1, "nombre": "Imputación", "descripcion": "Mediana", "completado": true},
                {"paso": 2, "nombre": "Escalado", "completado": false},
            ],
            "caracteristicas_originales": 42,
            "caracteristicas_finales": 50,
            "tiempo_procesamiento_ms": 1247,
        });
        let info = PipelineInfo::from_json(&value).unwrap();
        assert!(info.complete);
        assert_eq!(info.steps.len(), 2);
        assert_eq!(info.steps[0].description, "Mediana");
        assert_eq!(info.steps[1].description, "");
        assert!(!info.steps[1].completed);
        assert_eq!(info.feature_delta(), 8);
        assert_eq!(info.elapsed_ms, 1247);
    }

    #[test]
    fn pipeline_tolerates_wrong_typed_optional_fields() {
        let value = json!({
            "pipeline_completo": 1,
            "pasos": {"paso": 1},
            "caracteristicas_originales": 42,
            "caracteristicas_finales": 42,
            "tiempo_procesamiento_ms": 10,
        });
        let info = PipelineInfo::from_json(&value).unwrap();
        assert!(!info.complete);
        assert!(info.steps.is_empty());

        let value = json!({
            "pasos": [{"paso": 1, "nombre": "Imputación", "completado": "sí"}],
            "caracteristicas_originales": 42,
            "caracteristicas_finales": 42,
            "tiempo_procesamiento_ms": 10,
        });
        let info = PipelineInfo::from_json(&value).unwrap();
        assert!(!info.steps[0].completed);
    }

    #[test]
    fn pipeline_requires_feature_counts() {
        let value = json!({"pasos": [], "tiempo_procesamiento_ms": 5});
        assert_matches!(
            PipelineInfo::from_json(&value),
            Err(CoreError::MissingField { .. })
        );
    }
}
