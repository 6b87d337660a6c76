//! Network-intrusion dataset entities and their payload normalizers.
//!
//! Three endpoints feed the dataset view: the summary (`/dataset/info/`,
//! required), the chart extras (`/dataset/visualizations/`, required)
//! and the sidebar status (`/dataset/status/`, optional). Status
//! normalization never fails; anything unexpected degrades to defaults.

use serde::Deserialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::normalize::{Key, Payload};
use crate::types::CountMap;

/// Label that marks benign traffic in the attack distribution and in
/// scatter samples. Every other label is an attack type.
pub const NORMAL_LABEL: &str = "normal";

const TOTAL_RECORDS: Key = Key::plain("total_registros");
const ATTACK_DISTRIBUTION: Key = Key::dual("distribución_ataques", "distribucion_ataques");
const USING_CUSTOM_DATASET: Key = Key::plain("usando_datos_personalizados");
const FEATURE_STATISTICS: Key = Key::plain("estadisticas_caracteristicas");
const SCATTER_DATA: Key = Key::plain("scatter_data");
const ATTACK_TYPE_COUNT: Key = Key::plain("tipos_ataque");
const STATE: Key = Key::plain("estado");
const MESSAGE: Key = Key::plain("mensaje");

// ---------------------------------------------------------------------------
// DatasetSummary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub total_records: u64,
    /// Label → record count, in API response order.
    pub attack_distribution: CountMap,
    pub using_custom_dataset: bool,
}

impl DatasetSummary {
    /// Normalize a `/dataset/info/` payload.
    ///
    /// `total_registros` and the attack distribution are required. A zero
    /// total is accepted; derived percentages treat it as "no data".
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        let payload = Payload::object(value, "dataset info")?;
        Ok(Self {
            total_records: payload.required_count(TOTAL_RECORDS)?,
            attack_distribution: payload.required_count_map(ATTACK_DISTRIBUTION)?,
            using_custom_dataset: payload.optional_bool(USING_CUSTOM_DATASET),
        })
    }

    /// Count of benign records; `0` when the distribution has no
    /// `"normal"` entry.
    pub fn normal_count(&self) -> u64 {
        self.attack_distribution
            .get(NORMAL_LABEL)
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct labels, `"normal"` included.
    pub fn attack_type_count(&self) -> usize {
        self.attack_distribution.len()
    }
}

// ---------------------------------------------------------------------------
// Visualizations
// ---------------------------------------------------------------------------

/// Summary statistics for one network feature.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatureStatistic {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "media")]
    pub mean: f64,
    #[serde(rename = "std")]
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// One sampled connection for the source/destination bytes scatter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScatterPoint {
    #[serde(rename = "src_bytes")]
    pub source_bytes: f64,
    #[serde(rename = "dst_bytes")]
    pub dest_bytes: f64,
    #[serde(rename = "tipo")]
    pub label: String,
}

impl ScatterPoint {
    pub fn is_normal(&self) -> bool {
        self.label == NORMAL_LABEL
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetVisualizations {
    pub feature_statistics: Vec<FeatureStatistic>,
    pub scatter_points: Vec<ScatterPoint>,
}

impl DatasetVisualizations {
    /// Normalize a `/dataset/visualizations/` payload. Both sequences are
    /// optional and default to empty when absent or not arrays; a
    /// malformed item inside an array fails.
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        let payload = Payload::object(value, "dataset visualizations")?;
        Ok(Self {
            feature_statistics: parse_items(
                payload.optional_array(FEATURE_STATISTICS),
                FEATURE_STATISTICS,
            )?,
            scatter_points: parse_items(payload.optional_array(SCATTER_DATA), SCATTER_DATA)?,
        })
    }
}

fn parse_items<'de, T: Deserialize<'de>>(
    items: &'de [Value],
    key: Key,
) -> Result<Vec<T>, CoreError> {
    items
        .iter()
        .map(|item| {
            T::deserialize(item).map_err(|e| CoreError::InvalidField {
                field: key.name(),
                reason: e.to_string(),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// DatasetStatus
// ---------------------------------------------------------------------------

/// Sidebar status. Every field is best-effort.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetStatus {
    pub using_custom_dataset: bool,
    pub total_records: Option<u64>,
    pub attack_type_count: Option<u64>,
    pub state: Option<String>,
    pub message: Option<String>,
}

impl DatasetStatus {
    pub fn from_json(value: &Value) -> Self {
        let payload = Payload::lenient(value);
        Self {
            using_custom_dataset: payload.optional_bool(USING_CUSTOM_DATASET),
            total_records: payload.optional_count(TOTAL_RECORDS),
            attack_type_count: payload.optional_count(ATTACK_TYPE_COUNT),
            state: payload.optional_str(STATE).map(str::to_owned),
            message: payload.optional_str(MESSAGE).map(str::to_owned),
        }
    }
}
