//! Public types for the chart functions: per-chart options, palettes, and
//! the configuration error raised before any drawing happens.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Qualitative color scales, named after the matplotlib maps common in
/// notebook EDA plus the Office chart series set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Palette {
    /// 10 strong hues (matplotlib `tab10`).
    Tab10,
    /// 20 hues alternating strong/light (matplotlib `tab20`).
    Tab20,
    /// 9 soft hues (matplotlib `Pastel1`).
    Pastel1,
    /// Microsoft Office (2013+) chart series palette.
    Office,
}

/// Configuration failures detected before rendering starts.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("grid shape {rows}x{cols} is too small for {requested} plots")]
    GridTooSmall {
        rows: usize,
        cols: usize,
        requested: usize,
    },
    #[error("column not found: {0}")]
    ColumnNotFound(String),
    #[error("no data to plot")]
    EmptyInput,
}

/// Options for [`stacked_barplot`](crate::viz::stacked_barplot).
#[derive(Debug, Clone)]
pub struct BarChartOptions {
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
    pub palette: Palette,
    /// Label segments as one-decimal percentages of the row total; raw
    /// integer counts otherwise.
    pub percentage: bool,
    /// Draw in-segment value labels at all.
    pub show_values: bool,
    /// (width, height) in pixels.
    pub figsize: (u32, u32),
    /// Font size of the in-segment labels.
    pub fontsize: u32,
    /// Grow the figure so the legend fits: the effective height becomes
    /// `max(figsize.1, num_categories * legend_item_height)`.
    pub auto_height_by_legend: bool,
    /// Vertical pixels reserved per legend entry in auto-height mode.
    pub legend_item_height: u32,
}

impl Default for BarChartOptions {
    fn default() -> Self {
        Self {
            title: "Stacked Bar Plot".into(),
            xlabel: "X".into(),
            ylabel: "Count".into(),
            palette: Palette::Tab20,
            percentage: true,
            show_values: true,
            figsize: (1000, 600),
            fontsize: 9,
            auto_height_by_legend: false,
            legend_item_height: 25,
        }
    }
}

impl BarChartOptions {
    /// Figure size after applying auto-height mode for a legend of
    /// `num_categories` entries.
    pub fn resolved_figsize(&self, num_categories: usize) -> (u32, u32) {
        let (width, height) = self.figsize;
        if !self.auto_height_by_legend {
            return (width, height);
        }
        let legend_height = num_categories as u32 * self.legend_item_height;
        (width, height.max(legend_height))
    }
}

/// Options for [`plot_kde`](crate::viz::plot_kde).
#[derive(Debug, Clone)]
pub struct KdeOptions {
    /// Multiplier on the Silverman rule-of-thumb bandwidth. Values below 1
    /// follow the data more closely.
    pub bw_adjust: f64,
    pub palette: Palette,
    pub figsize: (u32, u32),
}

impl Default for KdeOptions {
    fn default() -> Self {
        Self {
            bw_adjust: 0.2,
            palette: Palette::Tab10,
            figsize: (1000, 600),
        }
    }
}

/// Options for [`plot_mfcc_boxplots`](crate::viz::plot_mfcc_boxplots).
#[derive(Debug, Clone)]
pub struct GridOptions {
    /// Overall figure title; a generic one is used when absent.
    pub suptitle: Option<String>,
    pub palette: Palette,
    /// Pixel width of each grid cell.
    pub base_width: u32,
    /// Pixel height of each grid cell.
    pub base_height: u32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            suptitle: None,
            palette: Palette::Tab10,
            base_width: 500,
            base_height: 400,
        }
    }
}

impl GridOptions {
    pub fn resolved_suptitle(&self) -> String {
        self.suptitle
            .clone()
            .unwrap_or_else(|| "MFCC Feature Boxplots".into())
    }
}

/// Options for [`plot_single_boxplot`](crate::viz::plot_single_boxplot).
#[derive(Debug, Clone)]
pub struct SingleBoxplotOptions {
    /// Chart title; defaults to `"{feature} by label"`.
    pub title: Option<String>,
    pub palette: Palette,
    pub figsize: (u32, u32),
}

impl Default for SingleBoxplotOptions {
    fn default() -> Self {
        Self {
            title: None,
            palette: Palette::Tab10,
            figsize: (600, 500),
        }
    }
}

impl SingleBoxplotOptions {
    pub fn resolved_title(&self, feature: &str) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("{feature} by label"))
    }
}
