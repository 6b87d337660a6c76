//! User-facing messages.
//!
//! Every view surfaces at most one of these at a time. The dashboard is
//! Spanish-localized, matching the API's own vocabulary.

pub const DATASET_LOAD_FAILED: &str =
    "Error al cargar el dataset. Asegúrate de que el API esté disponible.";

pub const MODEL_LOAD_FAILED: &str =
    "Error al cargar las métricas de los modelos. Asegúrate de que el API esté disponible.";

pub const SPAM_ANALYSIS_FAILED: &str =
    "Error al analizar el correo. Asegúrate de que el API esté disponible.";

pub const SPLIT_FAILED: &str =
    "Error al calcular la división. Asegúrate de que el API esté disponible.";

pub const PIPELINE_FAILED: &str =
    "Error al cargar el pipeline. Asegúrate de que el API esté disponible.";

pub const RATIOS_MUST_SUM_TO_100: &str = "Los ratios deben sumar 100%";

pub const EMAIL_REQUIRED: &str = "Por favor ingresa el asunto o cuerpo del correo";

/// Placeholder rendered wherever a derived value has no data (e.g. a
/// percentage of a zero total).
pub const NO_DATA: &str = "N/D";

pub const YES: &str = "Sí";
pub const NO: &str = "No";

pub const SPAM_DETECTED: &str = "SPAM DETECTADO";
pub const LEGITIMATE_EMAIL: &str = "CORREO LEGÍTIMO";

pub const CUSTOM_DATASET: &str = "Usando dataset personalizado cargado";
pub const SAMPLE_DATASET: &str = "Usando datos de ejemplo (NSL-KDD simulado)";

pub const CUSTOM_SPAM_MODEL: &str = "Modelo personalizado entrenado";
pub const BASELINE_SPAM_MODEL: &str = "Modelo base de reglas";
