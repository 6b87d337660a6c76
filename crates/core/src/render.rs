//! Display formatting for the dashboard views.
//!
//! Builders here take normalized entities plus the derived metrics and
//! produce serializable rows for charts and tables. They only format:
//! fixed decimals, thousands separators, localized boolean labels and
//! placeholders for missing values.

use serde::Serialize;

use crate::dataset::{DatasetStatus, DatasetSummary, FeatureStatistic, ScatterPoint};
use crate::messages;
use crate::metrics::{self, SCATTER_SERIES_LIMIT, TOP_ATTACK_TYPES};
use crate::model::{ConfusionMatrix, ModelComparisonEntry, RocCurve};
use crate::preprocessing::{PipelineInfo, SplitResult};
use crate::spam::{FeatureValue, SpamAnalysisResult};
use crate::split::SplitSizes;

// ---------------------------------------------------------------------------
// Primitive formatters
// ---------------------------------------------------------------------------

pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// `125973` → `"125,973"`.
pub fn format_thousands(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Fixed decimals with a grouped integer part: `1379963888.0` →
/// `"1,379,963,888"` at zero decimals.
pub fn format_number(value: f64, decimals: usize) -> String {
    let fixed = format_fixed(value.abs(), decimals);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let mut out = String::new();
    if value.is_sign_negative() && fixed.chars().any(|c| c != '0' && c != '.') {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// One-decimal percentage, or the no-data placeholder.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}%"),
        None => messages::NO_DATA.to_string(),
    }
}

pub fn bool_label(value: bool) -> &'static str {
    if value {
        messages::YES
    } else {
        messages::NO
    }
}

/// `"src_bytes"` → `"src bytes"`.
pub fn prettify_feature_name(name: &str) -> String {
    name.replace('_', " ")
}

// ---------------------------------------------------------------------------
// Shared rows
// ---------------------------------------------------------------------------

/// A headline figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub label: String,
    pub value: String,
}

impl StatCard {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// A labelled value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyValueRow {
    pub key: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Dataset view
// ---------------------------------------------------------------------------

pub fn dataset_overview(summary: &DatasetSummary) -> Vec<StatCard> {
    let traffic = metrics::traffic_split(summary);
    vec![
        StatCard::new("Total de Registros", format_thousands(summary.total_records)),
        StatCard::new("Tipos de Ataque", summary.attack_type_count().to_string()),
        StatCard::new("Tráfico Normal", format_percent(traffic.normal_percent)),
        StatCard::new("Tráfico de Ataque", format_percent(traffic.attack_percent)),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttackChartRow {
    pub name: String,
    pub count: u64,
    pub percent: String,
}

/// Distribution chart rows: the first eight labels in API order.
pub fn attack_chart_rows(summary: &DatasetSummary) -> Vec<AttackChartRow> {
    metrics::top_attack_shares(summary, TOP_ATTACK_TYPES)
        .into_iter()
        .map(|share| AttackChartRow {
            name: share.name,
            count: share.count,
            percent: format_percent(share.percent),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttackBadge {
    pub label: String,
    pub count: String,
    pub normal: bool,
}

/// Legend badges for every label, normal traffic flagged.
pub fn attack_badges(summary: &DatasetSummary) -> Vec<AttackBadge> {
    summary
        .attack_distribution
        .iter()
        .map(|(label, &count)| AttackBadge {
            label: label.clone(),
            count: format_thousands(count),
            normal: label == crate::dataset::NORMAL_LABEL,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureStatRow {
    pub name: String,
    pub mean: String,
    pub std_dev: String,
    pub min: String,
    pub max: String,
}

pub fn feature_stat_rows(stats: &[FeatureStatistic]) -> Vec<FeatureStatRow> {
    stats
        .iter()
        .map(|stat| FeatureStatRow {
            name: prettify_feature_name(&stat.name),
            mean: format_fixed(stat.mean, 2),
            std_dev: format_fixed(stat.std_dev, 2),
            min: format_number(stat.min, 0),
            max: format_number(stat.max, 0),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeriesRow {
    pub label: String,
    /// `[source_bytes, dest_bytes]` pairs.
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub normal: ScatterSeriesRow,
    pub attack: ScatterSeriesRow,
    pub by_type: Vec<ScatterSeriesRow>,
}

fn scatter_row(label: &str, points: &[ScatterPoint]) -> ScatterSeriesRow {
    ScatterSeriesRow {
        label: label.to_string(),
        points: points
            .iter()
            .map(|p| [p.source_bytes, p.dest_bytes])
            .collect(),
    }
}

pub fn scatter_chart(points: &[ScatterPoint]) -> ScatterChart {
    let series = metrics::partition_scatter(points);
    ScatterChart {
        normal: scatter_row("Normal", &series.normal),
        attack: scatter_row("Ataque", &series.attack),
        by_type: metrics::scatter_series_by_type(points, SCATTER_SERIES_LIMIT)
            .iter()
            .map(|(label, group)| scatter_row(label, group))
            .collect(),
    }
}

/// Sidebar line describing which dataset the API is serving. `None` when
/// the status request failed.
pub fn status_line(status: Option<&DatasetStatus>) -> Option<String> {
    let status = status?;
    if !status.using_custom_dataset {
        return Some(messages::SAMPLE_DATASET.to_string());
    }
    let mut line = messages::CUSTOM_DATASET.to_string();
    if let Some(total) = status.total_records {
        line.push_str(&format!(" ({} registros", format_thousands(total)));
        if let Some(types) = status.attack_type_count {
            line.push_str(&format!(", {types} tipos de ataque"));
        }
        line.push(')');
    }
    Some(line)
}

// ---------------------------------------------------------------------------
// Model evaluation view
// ---------------------------------------------------------------------------

/// Headline metric cards for the selected model.
pub fn model_cards(entry: &ModelComparisonEntry) -> Vec<StatCard> {
    let m = &entry.metrics;
    let card = |label: &str, value: f64| {
        StatCard::new(label, format_percent(Some(metrics::metric_percent(value))))
    };
    vec![
        card("Accuracy", m.accuracy),
        card("Precision", m.precision),
        card("Recall", m.recall),
        card("F1-Score", m.f1),
    ]
}

/// Grouped bar chart row; values are one-decimal percentages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub model: String,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

pub fn comparison_rows(entries: &[ModelComparisonEntry]) -> Vec<ComparisonRow> {
    entries
        .iter()
        .map(|entry| ComparisonRow {
            model: entry.short_name().to_string(),
            accuracy: metrics::metric_percent(entry.metrics.accuracy),
            precision: metrics::metric_percent(entry.metrics.precision),
            recall: metrics::metric_percent(entry.metrics.recall),
            f1: metrics::metric_percent(entry.metrics.f1),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDetailRow {
    pub model: String,
    pub accuracy: String,
    pub training_time: String,
    pub cross_validation: String,
    pub selected: bool,
}

pub fn model_detail_rows(
    entries: &[ModelComparisonEntry],
    selected: Option<&str>,
) -> Vec<ModelDetailRow> {
    entries
        .iter()
        .map(|entry| ModelDetailRow {
            model: entry.model_name.clone(),
            accuracy: format!("{}%", format_fixed(entry.metrics.accuracy * 100.0, 2)),
            training_time: format!("{}s", entry.training_time_seconds),
            cross_validation: format!("{}%", format_fixed(entry.cross_validation_score * 100.0, 2)),
            selected: selected == Some(entry.model_name.as_str()),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfusionCell {
    pub actual: &'static str,
    pub predicted: &'static str,
    pub label: &'static str,
    pub count: u64,
    pub percent: String,
}

/// The four cells in `TN, FP, FN, TP` order.
pub fn confusion_cells(matrix: &ConfusionMatrix) -> Vec<ConfusionCell> {
    let pct = metrics::confusion_percentages(matrix);
    let cell = |(actual, predicted): (&'static str, &'static str),
                label: &'static str,
                count: u64,
                percent: Option<f64>| ConfusionCell {
        actual,
        predicted,
        label,
        count,
        percent: format_percent(percent),
    };
    vec![
        cell(
            ("Negative", "Negative"),
            "True Negative",
            matrix.true_negative,
            pct.map(|p| p.true_negative),
        ),
        cell(
            ("Negative", "Positive"),
            "False Positive",
            matrix.false_positive,
            pct.map(|p| p.false_positive),
        ),
        cell(
            ("Positive", "Negative"),
            "False Negative",
            matrix.false_negative,
            pct.map(|p| p.false_negative),
        ),
        cell(
            ("Positive", "Positive"),
            "True Positive",
            matrix.true_positive,
            pct.map(|p| p.true_positive),
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RocChartPoint {
    pub fpr: f64,
    pub tpr: f64,
}

/// ROC points in percent, two decimals, in input order.
pub fn roc_chart(curve: &RocCurve) -> Vec<RocChartPoint> {
    metrics::roc_points(curve)
        .into_iter()
        .map(|p| RocChartPoint {
            fpr: metrics::round_to(p.fpr, 2),
            tpr: metrics::round_to(p.tpr, 2),
        })
        .collect()
}

pub fn auc_label(curve: &RocCurve) -> String {
    format!("AUC: {}", format_fixed(curve.area_under_curve, 4))
}

// ---------------------------------------------------------------------------
// Spam view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpamVerdict {
    pub label: &'static str,
    pub is_spam: bool,
    pub confidence: String,
    /// Which classifier produced the verdict.
    pub model: &'static str,
    pub features: Vec<KeyValueRow>,
}

pub fn format_feature_value(value: &FeatureValue) -> String {
    match value {
        FeatureValue::Flag(b) => bool_label(*b).to_string(),
        FeatureValue::Number(n) => format_fixed(*n, 2),
        FeatureValue::Text(s) => s.clone(),
    }
}

pub fn spam_verdict(result: &SpamAnalysisResult) -> SpamVerdict {
    SpamVerdict {
        label: if result.is_spam {
            messages::SPAM_DETECTED
        } else {
            messages::LEGITIMATE_EMAIL
        },
        is_spam: result.is_spam,
        confidence: format_percent(Some(result.confidence_percent)),
        model: if result.using_custom_model {
            messages::CUSTOM_SPAM_MODEL
        } else {
            messages::BASELINE_SPAM_MODEL
        },
        features: result
            .features
            .iter()
            .map(|(name, value)| KeyValueRow {
                key: prettify_feature_name(name),
                value: format_feature_value(value),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Preprocessing view
// ---------------------------------------------------------------------------

fn samples(count: u64) -> String {
    format!("{} muestras", format_thousands(count))
}

/// Rows for the locally previewed partition sizes.
pub fn split_preview_rows(sizes: &SplitSizes) -> Vec<KeyValueRow> {
    split_rows(sizes.train, sizes.validation, sizes.test)
}

/// Rows for a server-computed split.
pub fn split_result_rows(result: &SplitResult) -> Vec<KeyValueRow> {
    let mut rows = split_rows(result.train_size, result.validation_size, result.test_size);
    rows.push(KeyValueRow {
        key: "Estratificado".to_string(),
        value: bool_label(result.stratified).to_string(),
    });
    rows.push(KeyValueRow {
        key: "Semilla Aleatoria".to_string(),
        value: result.random_seed.to_string(),
    });
    rows
}

fn split_rows(train: u64, validation: u64, test: u64) -> Vec<KeyValueRow> {
    [
        ("Entrenamiento", train),
        ("Validación", validation),
        ("Prueba", test),
    ]
    .into_iter()
    .map(|(key, count)| KeyValueRow {
        key: key.to_string(),
        value: samples(count),
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineStepRow {
    pub number: u64,
    pub name: String,
    pub description: String,
    pub completed: bool,
}

pub fn pipeline_step_rows(info: &PipelineInfo) -> Vec<PipelineStepRow> {
    info.steps
        .iter()
        .map(|step| PipelineStepRow {
            number: step.number,
            name: step.name.clone(),
            description: step.description.clone(),
            completed: step.completed,
        })
        .collect()
}

pub fn pipeline_summary(info: &PipelineInfo) -> Vec<StatCard> {
    vec![
        StatCard::new("Características Antes", info.original_feature_count.to_string()),
        StatCard::new("Características Después", info.final_feature_count.to_string()),
        StatCard::new("Pasos Ejecutados", info.steps.len().to_string()),
        StatCard::new("Tiempo de Proceso", format!("{}ms", info.elapsed_ms)),
    ]
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn summary() -> DatasetSummary {
        DatasetSummary::from_json(&json!({
            "total_registros": 1000,
            "distribución_ataques": {"normal": 800, "neptune": 150, "satan": 50},
        }))
        .unwrap()
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(125_973), "125,973");
        assert_eq!(format_thousands(1_379_963_888), "1,379,963,888");
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(1_379_963_888.0, 0), "1,379,963,888");
        assert_eq!(format_number(1234.567, 2), "1,234.57");
        assert_eq!(format_number(-1234.5, 1), "-1,234.5");
        assert_eq!(format_number(-0.0, 0), "0");
    }

    #[test]
    fn percent_placeholder() {
        assert_eq!(format_percent(Some(80.0)), "80.0%");
        assert_eq!(format_percent(None), "N/D");
    }

    #[test]
    fn labels_and_names() {
        assert_eq!(bool_label(true), "Sí");
        assert_eq!(bool_label(false), "No");
        assert_eq!(prettify_feature_name("num_failed_logins"), "num failed logins");
    }

    #[test]
    fn overview_cards() {
        let cards = dataset_overview(&summary());
        let values: Vec<&str> = cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, ["1,000", "3", "80.0%", "20.0%"]);
    }

    #[test]
    fn overview_with_zero_total_shows_placeholders() {
        let empty = DatasetSummary::from_json(&json!({
            "total_registros": 0,
            "distribucion_ataques": {},
        }))
        .unwrap();
        let cards = dataset_overview(&empty);
        assert_eq!(cards[2].value, "N/D");
        assert_eq!(cards[3].value, "N/D");
        assert!(cards.iter().all(|c| !c.value.contains("NaN")));
    }

    #[test]
    fn attack_rows_and_badges() {
        let rows = attack_chart_rows(&summary());
        assert_eq!(rows[1].name, "neptune");
        assert_eq!(rows[1].percent, "15.0%");

        let badges = attack_badges(&summary());
        assert!(badges[0].normal);
        assert!(!badges[2].normal);
        assert_eq!(badges[0].count, "800");
    }

    #[test]
    fn status_lines() {
        assert_eq!(status_line(None), None);
        assert_eq!(
            status_line(Some(&DatasetStatus::default())).as_deref(),
            Some(messages::SAMPLE_DATASET)
        );
        let custom = DatasetStatus {
            using_custom_dataset: true,
            total_records: Some(12_000),
            attack_type_count: Some(4),
            ..Default::default()
        };
        assert_eq!(
            status_line(Some(&custom)).unwrap(),
            "Usando dataset personalizado cargado (12,000 registros, 4 tipos de ataque)"
        );
    }

    #[test]
    fn confusion_cells_in_fixed_positions() {
        let cells = confusion_cells(&ConfusionMatrix::from_rows([[50, 10], [5, 35]]));
        let labels: Vec<&str> = cells.iter().map(|c| c.label).collect();
        assert_eq!(labels, ["True Negative", "False Positive", "False Negative", "True Positive"]);
        let percents: Vec<&str> = cells.iter().map(|c| c.percent.as_str()).collect();
        assert_eq!(percents, ["50.0%", "10.0%", "5.0%", "35.0%"]);
    }

    #[test]
    fn zero_confusion_matrix_renders_placeholders() {
        let cells = confusion_cells(&ConfusionMatrix::from_rows([[0, 0], [0, 0]]));
        assert!(cells.iter().all(|c| c.percent == "N/D"));
    }

    #[test]
    fn roc_chart_rounds_to_two_decimals() {
        let curve = RocCurve::from_json(&json!({
            "fpr": [0.0, 0.123456, 1.0],
            "tpr": [0.0, 0.987654, 1.0],
            "auc": 0.923456,
        }))
        .unwrap();
        let points = roc_chart(&curve);
        assert_eq!(points.len(), 3);
        assert_eq!(points[1], RocChartPoint { fpr: 12.35, tpr: 98.77 });
        assert_eq!(auc_label(&curve), "AUC: 0.9235");
    }

    #[test]
    fn spam_verdict_rows() {
        let result = SpamAnalysisResult::from_json(&json!({
            "es_spam": true,
            "confianza": 87.46,
            "puntuacion_spam": 0.87,
            "caracteristicas": {"tiene_urls": true, "ratio_mayusculas": 0.3127},
        }))
        .unwrap();
        let verdict = spam_verdict(&result);
        assert_eq!(verdict.label, messages::SPAM_DETECTED);
        assert_eq!(verdict.confidence, "87.5%");
        assert_eq!(verdict.model, messages::BASELINE_SPAM_MODEL);
        assert_eq!(verdict.features[0].key, "tiene urls");
        assert_eq!(verdict.features[0].value, "Sí");
        assert_eq!(verdict.features[1].value, "0.31");
    }

    #[test]
    fn spam_verdict_names_custom_model() {
        let result = SpamAnalysisResult::from_json(&json!({
            "es_spam": false,
            "confianza": 92.0,
            "puntuacion_spam": 0.08,
            "usando_modelo_personalizado": true,
        }))
        .unwrap();
        let verdict = spam_verdict(&result);
        assert_eq!(verdict.label, messages::LEGITIMATE_EMAIL);
        assert_eq!(verdict.model, messages::CUSTOM_SPAM_MODEL);
        assert!(verdict.features.is_empty());
    }

    #[test]
    fn split_rows_show_samples() {
        let rows = split_preview_rows(&SplitSizes {
            train: 75_584,
            validation: 25_195,
            test: 25_195,
        });
        assert_eq!(rows[0].value, "75,584 muestras");
        assert_eq!(rows[1].key, "Validación");
    }
}
