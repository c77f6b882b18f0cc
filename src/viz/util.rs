//! Utility functions for visualization: palettes, axis padding, grid
//! arithmetic, and segment label formatting.

use super::types::Palette;
use plotters::prelude::*;

/// matplotlib `tab10`.
const TAB10: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// matplotlib `tab20`: the `tab10` hues interleaved with lighter variants.
const TAB20: [RGBColor; 20] = [
    RGBColor(31, 119, 180),
    RGBColor(174, 199, 232),
    RGBColor(255, 127, 14),
    RGBColor(255, 187, 120),
    RGBColor(44, 160, 44),
    RGBColor(152, 223, 138),
    RGBColor(214, 39, 40),
    RGBColor(255, 152, 150),
    RGBColor(148, 103, 189),
    RGBColor(197, 176, 213),
    RGBColor(140, 86, 75),
    RGBColor(196, 156, 148),
    RGBColor(227, 119, 194),
    RGBColor(247, 182, 210),
    RGBColor(127, 127, 127),
    RGBColor(199, 199, 199),
    RGBColor(188, 189, 34),
    RGBColor(219, 219, 141),
    RGBColor(23, 190, 207),
    RGBColor(158, 218, 229),
];

/// matplotlib `Pastel1`.
const PASTEL1: [RGBColor; 9] = [
    RGBColor(251, 180, 174),
    RGBColor(179, 205, 227),
    RGBColor(204, 235, 197),
    RGBColor(222, 203, 228),
    RGBColor(254, 217, 166),
    RGBColor(255, 255, 204),
    RGBColor(229, 216, 189),
    RGBColor(253, 218, 236),
    RGBColor(242, 242, 242),
];

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

/// Discrete color list sized to `n`: one entry per series/category, cycling
/// through the palette when `n` exceeds its length.
pub fn palette_colors(palette: Palette, n: usize) -> Vec<RGBAColor> {
    let base: &[RGBColor] = match palette {
        Palette::Tab10 => &TAB10,
        Palette::Tab20 => &TAB20,
        Palette::Pastel1 => &PASTEL1,
        Palette::Office => &OFFICE10,
    };
    (0..n).map(|i| base[i % base.len()].to_rgba()).collect()
}

/// Pad a value range by `frac` on both sides, repairing degenerate input:
/// a non-finite or empty range becomes `(0, 1)`, a single point is widened
/// by one unit each way.
pub fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    if !min.is_finite() || !max.is_finite() || min > max {
        return (0.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * frac;
    (min - pad, max + pad)
}

/// Number of grid cells left blank when `plots` panels are laid out on a
/// `rows x cols` grid.
pub fn blank_cells(rows: usize, cols: usize, plots: usize) -> usize {
    (rows * cols).saturating_sub(plots)
}

/// In-segment label of a stacked bar cell: one-decimal percent of the row
/// total, or the raw count.
pub fn segment_label(count: f64, share: f64, percentage: bool) -> String {
    if percentage {
        format!("{:.1}%", share * 100.0)
    } else {
        format!("{:.0}", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_color_per_category() {
        for n in [1, 4, 10, 20, 35] {
            assert_eq!(palette_colors(Palette::Tab20, n).len(), n);
            assert_eq!(palette_colors(Palette::Tab10, n).len(), n);
        }
        // cycling wraps to the first hue
        let colors = palette_colors(Palette::Tab10, 11);
        assert_eq!(colors[10], colors[0]);
    }

    #[test]
    fn pad_range_repairs_degenerate_input() {
        assert_eq!(pad_range(f64::NAN, 1.0, 0.1), (0.0, 1.0));
        assert_eq!(pad_range(2.0, 2.0, 0.1), (1.0, 3.0));
        let (lo, hi) = pad_range(0.0, 10.0, 0.1);
        assert_eq!((lo, hi), (-1.0, 11.0));
    }

    #[test]
    fn segment_label_formats() {
        assert_eq!(segment_label(12.0, 0.3333, true), "33.3%");
        assert_eq!(segment_label(12.0, 0.3333, false), "12");
    }
}
