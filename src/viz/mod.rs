//! Chart helpers for exploratory data analysis, rendered to **SVG** or **PNG**.
//!
//! - [`stacked_barplot`]: stacked bars with per-segment count/percent labels
//! - [`plot_kde`]: overlaid, filled density curves, one per group
//! - [`plot_mfcc_boxplots`]: a grid of per-feature boxplots
//! - [`plot_single_boxplot`]: one feature, one boxplot panel
//!
//! Every function is stateless: it opens a drawing backend chosen by the
//! output extension (`.svg` vs bitmap), draws, presents, and returns.

pub mod legend;
pub mod types;
pub mod util;

// Re-export types for public API
pub use types::{
    BarChartOptions, ChartError, GridOptions, KdeOptions, Palette, SingleBoxplotOptions,
};

use crate::models::{CategoryTable, FeatureFrame, mfcc_column};
use crate::stats::{BoxSummary, box_summary, kde_curve};
use anyhow::Result;

use plotters::backend::DrawingBackend;
use plotters::chart::ChartContext;
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::AreaSeries;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;

use legend::draw_legend_panel;
use util::{pad_range, palette_colors, segment_label};

/// Samples per KDE curve.
const KDE_POINTS: usize = 200;

/// Half-width of a box in category units; bars and boxes share the scale.
const BOX_HALF_WIDTH: f64 = 0.3;
const CAP_HALF_WIDTH: f64 = 0.15;
const BAR_HALF_WIDTH: f64 = 0.4;

fn is_svg(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("svg")
}

/// Render a stacked bar chart: one bar per table row, one segment per
/// column, colored by a discrete palette sized to the column count.
///
/// Segment labels sit at the vertical midpoint of each segment, as a
/// one-decimal percentage of the row total or as the raw count. Zero cells
/// draw nothing; rows whose total is zero are skipped entirely.
pub fn stacked_barplot<P: AsRef<Path>>(
    table: &CategoryTable,
    out_path: P,
    opts: &BarChartOptions,
) -> Result<()> {
    if table.is_empty() {
        return Err(ChartError::EmptyInput.into());
    }
    let (_, num_categories) = table.shape();
    let (width, height) = opts.resolved_figsize(num_categories);

    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    if is_svg(out_path) {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_stacked_bars(root, table, opts)
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_stacked_bars(root, table, opts)
    }
}

fn draw_stacked_bars<DB>(
    root: DrawingArea<DB, Shift>,
    table: &CategoryTable,
    opts: &BarChartOptions,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let (nrows, ncols) = table.shape();
    let colors = palette_colors(opts.palette, ncols);
    let row_sums = table.row_sums();
    let y_max = row_sums.iter().copied().fold(0.0f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    // Legend panel to the right of the plot, as wide as its labels need.
    let (plot_area, legend_area) = root.split_horizontally((82).percent_width());
    plot_area
        .fill(&WHITE)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let row_labels = table.index().to_vec();
    let x_label_fmt = move |x: &f64| categorical_tick(*x, &row_labels);

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(16)
        .caption(opts.title.as_str(), (FontFamily::SansSerif, 22))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 48)
        .build_cartesian_2d(-0.5f64..(nrows as f64 - 0.5), 0.0f64..y_max)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(opts.xlabel.as_str())
        .y_desc(opts.ylabel.as_str())
        .x_labels(nrows)
        .y_labels(10)
        .x_label_formatter(&x_label_fmt)
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 16))
        .draw()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let label_style = TextStyle::from((FontFamily::SansSerif, opts.fontsize))
        .pos(Pos::new(HPos::Center, VPos::Center));

    for (row, total) in row_sums.iter().enumerate() {
        // Zero-total rows have no defined proportions; skip them outright.
        let Some(shares) = table.row_proportions(row) else {
            continue;
        };
        let x = row as f64;
        let mut cumulative = 0.0;
        for (col, share) in shares.iter().enumerate() {
            let count = table.value(row, col);
            if count <= 0.0 {
                continue;
            }
            let y0 = cumulative * total;
            cumulative += share;
            let y1 = cumulative * total;
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x - BAR_HALF_WIDTH, y0), (x + BAR_HALF_WIDTH, y1)],
                    colors[col].filled(),
                )))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;

            if opts.show_values {
                let y_label = (cumulative - share / 2.0) * total;
                chart
                    .draw_series(std::iter::once(Text::new(
                        segment_label(count, *share, opts.percentage),
                        (x, y_label),
                        label_style.clone(),
                    )))
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            }
        }
    }

    let items: Vec<(String, RGBAColor)> = table
        .columns()
        .iter()
        .cloned()
        .zip(colors.iter().copied())
        .collect();
    draw_legend_panel(
        &legend_area,
        &items,
        table.column_axis_name().unwrap_or("category"),
    )?;

    plot_area
        .present()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    legend_area
        .present()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}

/// Render overlaid kernel-density curves of `value_col`, one filled curve
/// per `group_col` value. Each curve is normalized independently, never
/// scaled by group size.
pub fn plot_kde<P: AsRef<Path>>(
    frame: &FeatureFrame,
    value_col: &str,
    group_col: &str,
    out_path: P,
    opts: &KdeOptions,
) -> Result<()> {
    if frame.is_empty() {
        return Err(ChartError::EmptyInput.into());
    }
    if frame.numeric_column(value_col).is_none() {
        return Err(ChartError::ColumnNotFound(value_col.to_string()).into());
    }
    let groups = frame
        .group_values(value_col, group_col)
        .ok_or_else(|| ChartError::ColumnNotFound(group_col.to_string()))?;

    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    if is_svg(out_path) {
        let root =
            SVGBackend::new(path_string.as_str(), opts.figsize).into_drawing_area();
        draw_kde(root, &groups, value_col, group_col, opts)
    } else {
        let root =
            BitMapBackend::new(path_string.as_str(), opts.figsize).into_drawing_area();
        draw_kde(root, &groups, value_col, group_col, opts)
    }
}

fn draw_kde<DB>(
    root: DrawingArea<DB, Shift>,
    groups: &[(String, Vec<f64>)],
    value_col: &str,
    group_col: &str,
    opts: &KdeOptions,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (_, values) in groups {
        for v in values {
            min = min.min(*v);
            max = max.max(*v);
        }
    }
    if !min.is_finite() {
        return Err(ChartError::EmptyInput.into());
    }
    let (x_min, x_max) = pad_range(min, max, 0.1);

    // One independently normalized curve per non-empty group, all evaluated
    // on the shared grid.
    let curves: Vec<(String, Vec<(f64, f64)>)> = groups
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(name, values)| {
            (
                name.clone(),
                kde_curve(values, opts.bw_adjust, KDE_POINTS, x_min, x_max),
            )
        })
        .collect();

    let y_max = curves
        .iter()
        .flat_map(|(_, curve)| curve.iter().map(|(_, d)| *d))
        .fold(0.0f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    let colors = palette_colors(opts.palette, curves.len());

    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .caption(
            format!("{value_col} KDE by {group_col}"),
            (FontFamily::SansSerif, 22),
        )
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 48)
        .build_cartesian_2d(x_min..x_max, 0.0f64..y_max)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    chart
        .configure_mesh()
        .x_desc(value_col)
        .y_desc("Density")
        .x_labels(10)
        .y_labels(10)
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 16))
        .draw()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    for (idx, (name, curve)) in curves.iter().enumerate() {
        let color = colors[idx];
        let elem = chart
            .draw_series(
                AreaSeries::new(curve.iter().copied(), 0.0, color.mix(0.4).filled())
                    .border_style(color.stroke_width(2)),
            )
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        let legend_color = color;
        let legend_text = name.clone();
        elem.label(name.clone()).legend(move |(x, y)| {
            EmptyElement::at((x, y))
                + Circle::new((x + 8, y), 4, legend_color.filled())
                + Text::new(
                    legend_text.clone(),
                    (x + 20, y),
                    (FontFamily::SansSerif, 13),
                )
        });
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .label_font((FontFamily::SansSerif, 13))
        .draw()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    root.present().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}

/// Render one boxplot per requested MFCC feature on a fixed grid.
///
/// Panel columns derive as `mfcc_{index}_{stat}`; the request must fit the
/// grid (`col_range.len() <= nrows * ncols`) and every derived column must
/// exist, both checked before any drawing. Grid cells beyond the feature
/// list stay blank.
pub fn plot_mfcc_boxplots<P: AsRef<Path>>(
    frame: &FeatureFrame,
    col_range: &[usize],
    stat: &str,
    group_col: &str,
    grid_shape: (usize, usize),
    out_path: P,
    opts: &GridOptions,
) -> Result<()> {
    let (nrows, ncols) = grid_shape;
    if col_range.len() > nrows * ncols {
        return Err(ChartError::GridTooSmall {
            rows: nrows,
            cols: ncols,
            requested: col_range.len(),
        }
        .into());
    }
    if col_range.is_empty() || frame.is_empty() {
        return Err(ChartError::EmptyInput.into());
    }
    let panel_cols: Vec<String> = col_range.iter().map(|num| mfcc_column(*num, stat)).collect();
    for col in &panel_cols {
        if frame.numeric_column(col).is_none() {
            return Err(ChartError::ColumnNotFound(col.clone()).into());
        }
    }
    if frame.label_column(group_col).is_none() {
        return Err(ChartError::ColumnNotFound(group_col.to_string()).into());
    }

    let size = (opts.base_width * ncols as u32, opts.base_height * nrows as u32);
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    if is_svg(out_path) {
        let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_boxplot_grid(root, frame, &panel_cols, group_col, grid_shape, opts)
    } else {
        let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_boxplot_grid(root, frame, &panel_cols, group_col, grid_shape, opts)
    }
}

fn draw_boxplot_grid<DB>(
    root: DrawingArea<DB, Shift>,
    frame: &FeatureFrame,
    panel_cols: &[String],
    group_col: &str,
    grid_shape: (usize, usize),
    opts: &GridOptions,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let root = root
        .titled(
            &opts.resolved_suptitle(),
            (FontFamily::SansSerif, 20),
        )
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let cells = root.split_evenly(grid_shape);
    // zip stops at the panel list; trailing cells stay blank
    for (cell, col) in cells.iter().zip(panel_cols.iter()) {
        draw_box_panel(cell, frame, col, group_col, col, opts.palette)?;
    }

    root.present().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}

/// Render a single boxplot of `feature` across the groups of `group_col`.
/// The title defaults to `"{feature} by label"`.
pub fn plot_single_boxplot<P: AsRef<Path>>(
    frame: &FeatureFrame,
    feature: &str,
    group_col: &str,
    out_path: P,
    opts: &SingleBoxplotOptions,
) -> Result<()> {
    if frame.is_empty() {
        return Err(ChartError::EmptyInput.into());
    }
    if frame.numeric_column(feature).is_none() {
        return Err(ChartError::ColumnNotFound(feature.to_string()).into());
    }
    if frame.label_column(group_col).is_none() {
        return Err(ChartError::ColumnNotFound(group_col.to_string()).into());
    }

    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    if is_svg(out_path) {
        let root = SVGBackend::new(path_string.as_str(), opts.figsize).into_drawing_area();
        draw_single_box(root, frame, feature, group_col, opts)
    } else {
        let root = BitMapBackend::new(path_string.as_str(), opts.figsize).into_drawing_area();
        draw_single_box(root, frame, feature, group_col, opts)
    }
}

fn draw_single_box<DB>(
    root: DrawingArea<DB, Shift>,
    frame: &FeatureFrame,
    feature: &str,
    group_col: &str,
    opts: &SingleBoxplotOptions,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    draw_box_panel(
        &root,
        frame,
        feature,
        group_col,
        &opts.resolved_title(feature),
        opts.palette,
    )?;
    root.present().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}

/// Map a fractional tick position to a category label; only near-integer
/// positions get a label so dense meshes do not repeat names.
fn categorical_tick(x: f64, labels: &[String]) -> String {
    let i = x.round();
    if (x - i).abs() > 0.25 || i < 0.0 {
        return String::new();
    }
    labels.get(i as usize).cloned().unwrap_or_default()
}

/// One boxplot panel comparing `value_col` across groups, drawn into `area`.
fn draw_box_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    frame: &FeatureFrame,
    value_col: &str,
    group_col: &str,
    title: &str,
    palette: Palette,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let groups = frame
        .group_values(value_col, group_col)
        .ok_or_else(|| ChartError::ColumnNotFound(value_col.to_string()))?;
    let summaries: Vec<(String, Option<BoxSummary>)> = groups
        .iter()
        .map(|(name, values)| (name.clone(), box_summary(values)))
        .collect();

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (_, summary) in &summaries {
        if let Some(s) = summary {
            min = min.min(s.min());
            max = max.max(s.max());
        }
    }
    let (y_min, y_max) = pad_range(min, max, 0.1);

    let n = summaries.len().max(1);
    let group_labels: Vec<String> = summaries.iter().map(|(name, _)| name.clone()).collect();
    let x_label_fmt = move |x: &f64| categorical_tick(*x, &group_labels);

    let mut chart = ChartBuilder::on(area)
        .margin(12)
        .caption(title, (FontFamily::SansSerif, 15))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), y_min..y_max)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("label")
        .y_desc(value_col)
        .x_labels(n)
        .y_labels(8)
        .x_label_formatter(&x_label_fmt)
        .label_style((FontFamily::SansSerif, 11))
        .axis_desc_style((FontFamily::SansSerif, 13))
        .draw()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let colors = palette_colors(palette, summaries.len());
    for (idx, (_, summary)) in summaries.iter().enumerate() {
        let Some(s) = summary else {
            continue;
        };
        draw_box(&mut chart, idx as f64, s, colors[idx])?;
    }
    Ok(())
}

/// Draw one box (quartile body, median, Tukey whiskers with caps, outlier
/// dots) centered on category position `x`.
fn draw_box<'a, DB>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    x: f64,
    s: &BoxSummary,
    color: RGBAColor,
) -> Result<()>
where
    DB: DrawingBackend + 'a,
{
    let stroke = color.stroke_width(1);

    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(x - BOX_HALF_WIDTH, s.q1), (x + BOX_HALF_WIDTH, s.q3)],
            color.mix(0.35).filled(),
        )))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(x - BOX_HALF_WIDTH, s.q1), (x + BOX_HALF_WIDTH, s.q3)],
            stroke,
        )))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(x - BOX_HALF_WIDTH, s.median), (x + BOX_HALF_WIDTH, s.median)],
            color.stroke_width(2),
        )))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    for (from, to) in [(s.lower_whisker, s.q1), (s.q3, s.upper_whisker)] {
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x, from), (x, to)],
                stroke,
            )))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    for w in [s.lower_whisker, s.upper_whisker] {
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x - CAP_HALF_WIDTH, w), (x + CAP_HALF_WIDTH, w)],
                stroke,
            )))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }

    chart
        .draw_series(
            s.outliers
                .iter()
                .map(|v| Circle::new((x, *v), 2, color.filled())),
        )
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}
