//! Legend panel drawing for the stacked bar chart: a single column of
//! marker + label rows to the right of the plot area.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

const FONT_PX: u32 = 13;
const TITLE_FONT_PX: u32 = 15;
const PAD_X: i32 = 6;
const MARKER_RADIUS: i32 = 4;
const ROW_GAP: i32 = 5;

/// Heuristic pixel width of a label; Plotters has no text measuring on all
/// backends, so labels are truncated against this estimate.
fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Shorten `text` so it fits into `max_px`, appending an ellipsis when
/// anything was cut.
fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out: String = text.to_string();
    while !out.is_empty() {
        out.pop();
        if estimate_text_width_px(&out, font_px) + estimate_text_width_px("…", font_px) <= max_px {
            break;
        }
    }
    out.push('…');
    out
}

/// Draw a legend panel into `area`: optional title at the top, then one row
/// per item with a filled circle marker and its (possibly truncated) label.
pub fn draw_legend_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    items: &[(String, RGBAColor)],
    title: &str,
) -> Result<()> {
    area.fill(&WHITE).map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let (w_u32, _) = area.dim_in_pixel();
    let w = w_u32 as i32;

    let title_style: TextStyle = TextStyle::from((FontFamily::SansSerif, TITLE_FONT_PX))
        .pos(Pos::new(HPos::Left, VPos::Top));
    let label_style: TextStyle = TextStyle::from((FontFamily::SansSerif, FONT_PX))
        .pos(Pos::new(HPos::Left, VPos::Center));

    let mut y = if title.trim().is_empty() {
        10
    } else {
        area.draw(&Text::new(title, (PAD_X, 6), title_style))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        TITLE_FONT_PX as i32 + 14
    };

    let marker_x = PAD_X + MARKER_RADIUS + 2;
    let text_x = marker_x + MARKER_RADIUS + 8;
    let max_text_w = (w - text_x - PAD_X).max(24) as u32;
    let row_h = FONT_PX as i32 + ROW_GAP;

    for (label, color) in items {
        let center_y = y + row_h / 2;
        area.draw(&Circle::new(
            (marker_x, center_y),
            MARKER_RADIUS,
            color.filled(),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        area.draw(&Text::new(
            truncate_to_width(label, FONT_PX, max_text_w),
            (text_x, center_y),
            label_style.clone(),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        y += row_h;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_keeps_short_labels_intact() {
        assert_eq!(truncate_to_width("pop", FONT_PX, 200), "pop");
    }

    #[test]
    fn truncation_appends_ellipsis() {
        let cut = truncate_to_width("a very long category label", FONT_PX, 60);
        assert!(cut.ends_with('…'));
        assert!(estimate_text_width_px(&cut, FONT_PX) <= 60);
    }
}
