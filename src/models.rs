use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Wide table for the stacked bar chart: one row per group, one column per
/// category, numeric (count) cells.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTable {
    index: Vec<String>,
    columns: Vec<String>,
    /// Name of the column axis, used as the legend title when present.
    column_axis_name: Option<String>,
    /// Row-major cell values; `values[row][col]`.
    values: Vec<Vec<f64>>,
}

impl CategoryTable {
    /// Build a table from row labels, column labels, and row-major values.
    /// Every row must have exactly one cell per column.
    pub fn new(index: Vec<String>, columns: Vec<String>, values: Vec<Vec<f64>>) -> Result<Self> {
        if values.len() != index.len() {
            return Err(anyhow!(
                "expected {} rows of values, got {}",
                index.len(),
                values.len()
            ));
        }
        if let Some(row) = values.iter().find(|r| r.len() != columns.len()) {
            return Err(anyhow!(
                "expected {} cells per row, got a row with {}",
                columns.len(),
                row.len()
            ));
        }
        Ok(Self {
            index,
            columns,
            column_axis_name: None,
            values,
        })
    }

    /// Set the column-axis name (the legend title of the stacked bar chart).
    pub fn with_column_axis_name(mut self, name: impl Into<String>) -> Self {
        self.column_axis_name = Some(name.into());
        self
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_axis_name(&self) -> Option<&str> {
        self.column_axis_name.as_deref()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.index.len(), self.columns.len())
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty() || self.columns.is_empty()
    }

    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row]
    }

    /// Per-row totals, in row order.
    pub fn row_sums(&self) -> Vec<f64> {
        self.values.iter().map(|r| r.iter().sum()).collect()
    }

    /// Per-cell share of the row total for one row.
    ///
    /// Returns `None` when the row total is zero or not finite: such rows are
    /// skipped by the stacked bar chart rather than propagating NaN into the
    /// drawing layer.
    pub fn row_proportions(&self, row: usize) -> Option<Vec<f64>> {
        let total: f64 = self.values[row].iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return None;
        }
        Some(self.values[row].iter().map(|v| v / total).collect())
    }
}

/// Long-form table: each row is one observation, with named numeric columns
/// (feature values) and named label columns (e.g. the emotion pair).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeatureFrame {
    rows: usize,
    numeric: Vec<(String, Vec<f64>)>,
    labels: Vec<(String, Vec<String>)>,
}

impl FeatureFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Add a numeric column. The first column added fixes the row count.
    pub fn push_numeric(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        self.check_len(&name, values.len())?;
        self.numeric.push((name, values));
        Ok(())
    }

    /// Add a label (string) column. The first column added fixes the row count.
    pub fn push_labels(&mut self, name: impl Into<String>, values: Vec<String>) -> Result<()> {
        let name = name.into();
        self.check_len(&name, values.len())?;
        self.labels.push((name, values));
        Ok(())
    }

    fn check_len(&mut self, name: &str, len: usize) -> Result<()> {
        if self.numeric.is_empty() && self.labels.is_empty() {
            self.rows = len;
            return Ok(());
        }
        if len != self.rows {
            return Err(anyhow!(
                "column {:?} has {} rows, expected {}",
                name,
                len,
                self.rows
            ));
        }
        Ok(())
    }

    pub fn numeric_column(&self, name: &str) -> Option<&[f64]> {
        self.numeric
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn label_column(&self, name: &str) -> Option<&[String]> {
        self.labels
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn numeric_names(&self) -> impl Iterator<Item = &str> {
        self.numeric.iter().map(|(n, _)| n.as_str())
    }

    /// Split one numeric column by a label column.
    ///
    /// Groups appear in first-appearance order and carry only the finite
    /// values of their observations. Returns `None` when either column does
    /// not exist.
    pub fn group_values(&self, value_col: &str, group_col: &str) -> Option<Vec<(String, Vec<f64>)>> {
        let values = self.numeric_column(value_col)?;
        let groups = self.label_column(group_col)?;

        let mut out: Vec<(String, Vec<f64>)> = Vec::new();
        for (label, value) in groups.iter().zip(values.iter()) {
            let idx = match out.iter().position(|(name, _)| name == label) {
                Some(i) => i,
                None => {
                    out.push((label.clone(), Vec::new()));
                    out.len() - 1
                }
            };
            if value.is_finite() {
                out[idx].1.push(*value);
            }
        }
        Some(out)
    }
}

/// Column name of an MFCC feature statistic, e.g. `mfcc_3_mean`.
///
/// This is the naming contract between the upstream feature-extraction table
/// and the boxplot grid.
pub fn mfcc_column(num: usize, stat: &str) -> String {
    format!("mfcc_{num}_{stat}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CategoryTable {
        CategoryTable::new(
            vec!["a".into(), "b".into()],
            vec!["x".into(), "y".into()],
            vec![vec![3.0, 1.0], vec![0.0, 0.0]],
        )
        .unwrap()
    }

    #[test]
    fn table_rejects_ragged_rows() {
        let e = CategoryTable::new(
            vec!["a".into()],
            vec!["x".into(), "y".into()],
            vec![vec![1.0]],
        );
        assert!(e.is_err());
    }

    #[test]
    fn proportions_sum_to_one_or_skip() {
        let t = table();
        let p = t.row_proportions(0).unwrap();
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(t.row_proportions(1).is_none());
    }

    #[test]
    fn frame_rejects_mismatched_columns() {
        let mut f = FeatureFrame::new();
        f.push_numeric("v", vec![1.0, 2.0]).unwrap();
        assert!(f.push_labels("g", vec!["a".into()]).is_err());
    }

    #[test]
    fn group_values_keeps_first_appearance_order() {
        let mut f = FeatureFrame::new();
        f.push_numeric("v", vec![1.0, 2.0, f64::NAN, 4.0]).unwrap();
        f.push_labels("g", vec!["b".into(), "a".into(), "b".into(), "b".into()])
            .unwrap();
        let groups = f.group_values("v", "g").unwrap();
        assert_eq!(groups[0].0, "b");
        assert_eq!(groups[0].1, vec![1.0, 4.0]); // NaN dropped
        assert_eq!(groups[1].0, "a");
    }

    #[test]
    fn mfcc_column_naming() {
        assert_eq!(mfcc_column(7, "mean"), "mfcc_7_mean");
        assert_eq!(mfcc_column(0, "std"), "mfcc_0_std");
    }
}
