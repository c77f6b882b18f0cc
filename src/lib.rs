//! eda-charts
//!
//! A small Rust library of plotting helpers for exploratory analysis of
//! feature-extraction datasets (e.g. audio features grouped by emotion
//! labels). Each function wraps `plotters` with convenience defaults and
//! renders one figure per call.
//!
//! ### Features
//! - Stacked bar charts with per-segment count/percentage labels
//! - Overlaid kernel-density curves, one per group
//! - Boxplot grids over MFCC feature columns, plus single boxplots
//! - Quick grouped summary statistics (count, missing, min, max, mean, median)
//!
//! ### Example
//! ```no_run
//! use eda_charts::models::{CategoryTable, FeatureFrame};
//! use eda_charts::viz::{self, BarChartOptions, SingleBoxplotOptions};
//!
//! let table = CategoryTable::new(
//!     vec!["angry_sad".into(), "happy_calm".into()],
//!     vec!["blues".into(), "jazz".into()],
//!     vec![vec![12.0, 8.0], vec![5.0, 15.0]],
//! )?
//! .with_column_axis_name("genre");
//! viz::stacked_barplot(&table, "counts.svg", &BarChartOptions::default())?;
//!
//! let mut frame = FeatureFrame::new();
//! frame.push_numeric("mfcc_1_mean", vec![0.4, 0.9, 1.3, 0.2])?;
//! frame.push_labels(
//!     "emotion_pair",
//!     vec!["a".into(), "a".into(), "b".into(), "b".into()],
//! )?;
//! viz::plot_single_boxplot(
//!     &frame,
//!     "mfcc_1_mean",
//!     "emotion_pair",
//!     "box.svg",
//!     &SingleBoxplotOptions::default(),
//! )?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod models;
pub mod stats;
pub mod viz;

pub use models::{CategoryTable, FeatureFrame, mfcc_column};
pub use viz::{
    BarChartOptions, ChartError, GridOptions, KdeOptions, Palette, SingleBoxplotOptions,
};
