//! Spam classifier input and result types.

use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::error::CoreError;
use crate::messages;
use crate::normalize::{validate_percent_range, Key, Payload};

const IS_SPAM: Key = Key::plain("es_spam");
const CONFIDENCE: Key = Key::plain("confianza");
const SPAM_SCORE: Key = Key::plain("puntuacion_spam");
const FEATURES: Key = Key::dual("características", "caracteristicas");
const USING_CUSTOM_MODEL: Key = Key::plain("usando_modelo_personalizado");

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Email submitted for classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailInput {
    pub subject: String,
    pub body: String,
}

impl EmailInput {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// At least one of subject or body must contain non-whitespace text.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.subject.trim().is_empty() && self.body.trim().is_empty() {
            return Err(CoreError::Validation(messages::EMAIL_REQUIRED.to_string()));
        }
        Ok(())
    }

    /// Request body for the predict endpoint.
    pub fn to_json(&self) -> Value {
        json!({
            "subject": self.subject,
            "body": self.body,
        })
    }
}

/// Built-in emails that can be loaded into the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleEmail {
    Spam,
    Legitimate,
}

impl SampleEmail {
    pub fn email(self) -> EmailInput {
        match self {
            Self::Spam => EmailInput::new(
                "¡GANASTE UN PREMIO! Reclama ahora",
                "¡FELICIDADES! Has sido seleccionado para ganar $10,000 USD. Haz clic AQUÍ \
                 AHORA para reclamar tu premio GRATIS. Oferta limitada - ¡ACTÚA YA! No se \
                 requiere tarjeta de crédito. ¡¡¡GARANTIZADO 100%!!!",
            ),
            Self::Legitimate => EmailInput::new(
                "Reunión de equipo - Viernes 3pm",
                "Hola equipo,\n\nLes recuerdo que tenemos nuestra reunión semanal el viernes \
                 a las 3pm. Por favor revisen el reporte adjunto antes de la reunión.\n\n\
                 Saludos,\nJuan",
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// A single extracted feature value.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl FeatureValue {
    /// Booleans, numbers and strings map directly; any other JSON shape
    /// is kept as its compact JSON text.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::Flag(*b),
            Value::Number(n) => n
                .as_f64()
                .map(Self::Number)
                .unwrap_or_else(|| Self::Text(n.to_string())),
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpamAnalysisResult {
    pub is_spam: bool,
    /// Confidence in the verdict, `[0, 100]`.
    pub confidence_percent: f64,
    pub spam_score: f64,
    /// Extracted features in response order.
    pub features: IndexMap<String, FeatureValue>,
    pub using_custom_model: bool,
}

impl SpamAnalysisResult {
    /// Normalize a `/spam/predict/` payload.
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        let payload = Payload::object(value, "spam prediction")?;

        let confidence_percent = payload.required_number(CONFIDENCE)?;
        validate_percent_range(confidence_percent, CONFIDENCE.name())?;

        let features = match payload.get(FEATURES).map(|v| (v, v.as_object())) {
            None => IndexMap::new(),
            Some((_, Some(map))) => map
                .iter()
                .map(|(name, value)| (name.clone(), FeatureValue::from_json(value)))
                .collect(),
            Some((v, None)) => {
                tracing::warn!(field = FEATURES.name(), value = %v, "Ignoring non-object features");
                IndexMap::new()
            }
        };

        Ok(Self {
            is_spam: payload.required_bool(IS_SPAM)?,
            confidence_percent,
            spam_score: payload.required_number(SPAM_SCORE)?,
            features,
            using_custom_model: payload.optional_bool(USING_CUSTOM_MODEL),
        })
    }
}
