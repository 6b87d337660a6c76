//! Derived display metrics.
//!
//! Everything here is pure and deterministic. Percentages are rounded to
//! one decimal place. A zero denominator yields `None` instead of NaN so
//! the renderer can show a placeholder.

use crate::dataset::{DatasetSummary, ScatterPoint};
use crate::model::{ConfusionMatrix, RocCurve};

/// Attack types shown in the distribution chart.
pub const TOP_ATTACK_TYPES: usize = 8;

/// Distinct labels that get their own scatter series.
pub const SCATTER_SERIES_LIMIT: usize = 5;

/// Round `value` to `decimals` decimal places, halves away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// `round(count / total * 100, 1)`, or `None` when `total` is zero.
pub fn percentage_of(count: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(round_to(count as f64 / total as f64 * 100.0, 1))
}

/// A `[0, 1]` metric as a one-decimal percentage.
pub fn metric_percent(value: f64) -> f64 {
    round_to(value * 100.0, 1)
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Share of attack records, `(total - normal) / total`, unrounded.
pub fn attack_ratio(summary: &DatasetSummary) -> Option<f64> {
    if summary.total_records == 0 {
        return None;
    }
    let attacks = summary.total_records.saturating_sub(summary.normal_count());
    Some(attacks as f64 / summary.total_records as f64)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficSplit {
    pub normal_percent: Option<f64>,
    pub attack_percent: Option<f64>,
}

/// Normal versus attack traffic as percentages of the total record count.
pub fn traffic_split(summary: &DatasetSummary) -> TrafficSplit {
    let total = summary.total_records;
    let normal = summary.normal_count();
    TrafficSplit {
        normal_percent: percentage_of(normal, total),
        attack_percent: percentage_of(total.saturating_sub(normal), total),
    }
}

/// One row of the attack distribution chart.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackShare {
    pub name: String,
    pub count: u64,
    pub percent: Option<f64>,
}

/// Every label with its share of the total, in API response order.
pub fn attack_shares(summary: &DatasetSummary) -> Vec<AttackShare> {
    summary
        .attack_distribution
        .iter()
        .map(|(name, &count)| AttackShare {
            name: name.clone(),
            count,
            percent: percentage_of(count, summary.total_records),
        })
        .collect()
}

/// The first `limit` shares in API response order. The list is not sorted
/// by count; the API order is taken as the display order.
pub fn top_attack_shares(summary: &DatasetSummary, limit: usize) -> Vec<AttackShare> {
    let mut shares = attack_shares(summary);
    shares.truncate(limit);
    shares
}

/// Scatter samples split into benign and attack series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterSeries {
    pub normal: Vec<ScatterPoint>,
    pub attack: Vec<ScatterPoint>,
}

pub fn partition_scatter(points: &[ScatterPoint]) -> ScatterSeries {
    let (normal, attack) = points.iter().cloned().partition(ScatterPoint::is_normal);
    ScatterSeries { normal, attack }
}

/// Points grouped per label for the first `limit` distinct labels, in
/// the order the labels are first seen. Points of later labels are left
/// out.
pub fn scatter_series_by_type(
    points: &[ScatterPoint],
    limit: usize,
) -> Vec<(String, Vec<ScatterPoint>)> {
    let mut series: Vec<(String, Vec<ScatterPoint>)> = Vec::new();
    for point in points {
        if let Some((_, group)) = series.iter_mut().find(|(label, _)| *label == point.label) {
            group.push(point.clone());
        } else if series.len() < limit {
            series.push((point.label.clone(), vec![point.clone()]));
        }
    }
    series
}

// ---------------------------------------------------------------------------
// Model evaluation
// ---------------------------------------------------------------------------

/// Confusion matrix cells as shares of the matrix total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfusionPercentages {
    pub true_negative: f64,
    pub false_positive: f64,
    pub false_negative: f64,
    pub true_positive: f64,
}

/// `None` for an all-zero matrix or one whose total overflows.
pub fn confusion_percentages(matrix: &ConfusionMatrix) -> Option<ConfusionPercentages> {
    let total = matrix.total()?;
    Some(ConfusionPercentages {
        true_negative: percentage_of(matrix.true_negative, total)?,
        false_positive: percentage_of(matrix.false_positive, total)?,
        false_negative: percentage_of(matrix.false_negative, total)?,
        true_positive: percentage_of(matrix.true_positive, total)?,
    })
}

/// A ROC sample scaled to percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocPoint {
    pub fpr: f64,
    pub tpr: f64,
}

/// Pair the rates index by index as `(fpr * 100, tpr * 100)`.
///
/// Input order is kept as is. Callers rely on the API emitting points in
/// ascending false-positive-rate order.
pub fn roc_points(curve: &RocCurve) -> Vec<RocPoint> {
    curve
        .false_positive_rates
        .iter()
        .zip(&curve.true_positive_rates)
        .map(|(&fpr, &tpr)| RocPoint {
            fpr: fpr * 100.0,
            tpr: tpr * 100.0,
        })
        .collect()
}
