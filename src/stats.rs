use crate::models::FeatureFrame;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Five-number summary of one distribution, with Tukey whiskers.
///
/// Whiskers reach the most extreme data points still within 1.5 IQR of the
/// box; everything beyond the fences lands in `outliers`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// Smallest value the box touches, outliers included.
    pub fn min(&self) -> f64 {
        self.outliers
            .iter()
            .copied()
            .fold(self.lower_whisker, f64::min)
    }

    /// Largest value the box touches, outliers included.
    pub fn max(&self) -> f64 {
        self.outliers
            .iter()
            .copied()
            .fold(self.upper_whisker, f64::max)
    }
}

/// Compute the box summary of a sample. Non-finite values are ignored;
/// returns `None` when nothing finite remains.
pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let n = sorted.len();

    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let q1 = sorted[n / 4];
    let q3 = sorted[(3 * n / 4).min(n - 1)];

    let iqr = q3 - q1;
    let lower_fence = q1 - 1.5 * iqr;
    let upper_fence = q3 + 1.5 * iqr;

    let lower_whisker = sorted
        .iter()
        .copied()
        .find(|&v| v >= lower_fence)
        .unwrap_or(q1);
    let upper_whisker = sorted
        .iter()
        .rev()
        .copied()
        .find(|&v| v <= upper_fence)
        .unwrap_or(q3);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|&v| v < lower_fence || v > upper_fence)
        .collect();

    Some(BoxSummary {
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        outliers,
    })
}

/// Summary statistics for one group of a grouped column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub group: String,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Compute per-group statistics of `value_col` split by `group_col`,
/// sorted by group name. Non-finite cells count as missing.
pub fn grouped_summary(
    frame: &FeatureFrame,
    value_col: &str,
    group_col: &str,
) -> Result<Vec<Summary>> {
    let values = frame
        .numeric_column(value_col)
        .ok_or_else(|| anyhow!("no numeric column {:?}", value_col))?;
    let groups = frame
        .label_column(group_col)
        .ok_or_else(|| anyhow!("no label column {:?}", group_col))?;

    let mut grouped: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    let mut missing: BTreeMap<&str, usize> = BTreeMap::new();
    for (label, value) in groups.iter().zip(values.iter()) {
        if value.is_finite() {
            grouped.entry(label).or_default().push(*value);
        } else {
            grouped.entry(label).or_default();
            *missing.entry(label).or_default() += 1;
        }
    }

    let mut out = Vec::new();
    for (group, mut vals) in grouped {
        vals.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let count = vals.len();
        let min = vals.first().copied();
        let max = vals.last().copied();
        let mean = if count > 0 {
            Some(vals.iter().sum::<f64>() / count as f64)
        } else {
            None
        };
        let median = if count == 0 {
            None
        } else if count % 2 == 1 {
            Some(vals[count / 2])
        } else {
            Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
        };
        out.push(Summary {
            group: group.to_string(),
            count,
            missing: missing.get(group).copied().unwrap_or(0),
            min,
            max,
            mean,
            median,
        });
    }
    Ok(out)
}

/// Silverman's rule-of-thumb bandwidth: `1.06 * sigma * n^(-1/5)`.
pub fn silverman_bandwidth(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if n < 1.0 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    1.06 * variance.sqrt() * n.powf(-0.2)
}

/// Evaluate a Gaussian kernel density estimate of `values` on an evenly
/// spaced grid of `points` samples over `[x_min, x_max]`.
///
/// The bandwidth is Silverman's rule times `bw_adjust`, floored so that a
/// constant sample still yields a (very narrow) curve. Each call normalizes
/// independently: the curve integrates to ~1 regardless of sample size.
pub fn kde_curve(
    values: &[f64],
    bw_adjust: f64,
    points: usize,
    x_min: f64,
    x_max: f64,
) -> Vec<(f64, f64)> {
    if values.is_empty() || points < 2 {
        return Vec::new();
    }
    let bandwidth = (silverman_bandwidth(values) * bw_adjust).max(1e-3);
    let n = values.len() as f64;
    let norm = 1.0 / ((2.0 * std::f64::consts::PI).sqrt() * bandwidth);

    (0..points)
        .map(|i| {
            let x = x_min + (x_max - x_min) * i as f64 / (points - 1) as f64;
            let density = values
                .iter()
                .map(|xi| {
                    let u = (x - xi) / bandwidth;
                    (-0.5 * u * u).exp() * norm
                })
                .sum::<f64>()
                / n;
            (x, density)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_summary_flags_outliers() {
        let mut values: Vec<f64> = (1..=9).map(f64::from).collect();
        values.push(100.0);
        let s = box_summary(&values).unwrap();
        assert_eq!(s.q1, 3.0);
        assert_eq!(s.q3, 8.0);
        assert_eq!(s.median, 5.5);
        assert_eq!(s.upper_whisker, 9.0);
        assert_eq!(s.outliers, vec![100.0]);
        assert_eq!(s.max(), 100.0);
    }

    #[test]
    fn box_summary_needs_finite_input() {
        assert!(box_summary(&[]).is_none());
        assert!(box_summary(&[f64::NAN, f64::INFINITY]).is_none());
    }

    #[test]
    fn kde_integrates_to_one() {
        let values = [1.0, 2.0, 2.5, 3.0, 4.0, 4.5, 5.0];
        let curve = kde_curve(&values, 1.0, 400, -5.0, 11.0);
        let step = curve[1].0 - curve[0].0;
        let mass: f64 = curve.iter().map(|(_, d)| d * step).sum();
        assert!((mass - 1.0).abs() < 0.02, "mass = {mass}");
        assert!(curve.iter().all(|(_, d)| *d >= 0.0));
    }
}
