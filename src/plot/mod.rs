//! Figure rendering
//!
//! Both renderers compose static SVG figures from a training history, real
//! samples, and a generator. SVG needs no system font stack, so figures come
//! out identical on headless machines.

mod diagnostics;
mod interpolation;
mod limits;

pub use diagnostics::render_diagnostics;
pub use interpolation::{render_latent_interpolation, InterpolationOptions};
pub use limits::{AxisLimits, DEFAULT_PAD};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::ToolkitError;

pub(crate) const LIGHT_GRAY: RGBColor = RGBColor(200, 200, 200);
pub(crate) const SILVER: RGBColor = RGBColor(170, 170, 170);
pub(crate) const TEAL: RGBColor = RGBColor(0, 128, 128);
pub(crate) const PURPLE: RGBColor = RGBColor(128, 0, 160);
pub(crate) const ORANGE: RGBColor = RGBColor(255, 140, 0);
pub(crate) const TOMATO: RGBColor = RGBColor(255, 99, 71);

pub(crate) fn render_err(e: impl std::fmt::Display) -> ToolkitError {
    ToolkitError::Render(e.to_string())
}

/// Min/max of the given series with 5% headroom; a safe fallback range when
/// everything is empty or degenerate.
pub(crate) fn padded_value_range(series: &[&[f64]]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for values in series {
        for &v in values.iter() {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if max - min < 1e-12 {
        return (min - 1.0, max + 1.0);
    }
    let pad = 0.05 * (max - min);
    (min - pad, max + pad)
}

/// An empty panel with a title and a centered message.
pub(crate) fn draw_placeholder(
    area: &DrawingArea<SVGBackend, Shift>,
    title: &str,
    message: &str,
) -> Result<(), ToolkitError> {
    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 22))
        .margin(10)
        .build_cartesian_2d(0.0..1.0, 0.0..1.0)
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(0)
        .y_labels(0)
        .draw()
        .map_err(render_err)?;

    let style = TextStyle::from(("sans-serif", 18).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center))
        .color(&BLACK);
    chart
        .draw_series(std::iter::once(Text::new(
            message.to_string(),
            (0.5, 0.5),
            style,
        )))
        .map_err(render_err)?;
    Ok(())
}

/// A panel of epoch-indexed line series with a shared legend.
pub(crate) fn draw_line_panel(
    area: &DrawingArea<SVGBackend, Shift>,
    title: &str,
    y_desc: &str,
    series: &[(&str, &[f64], RGBColor)],
) -> Result<(), ToolkitError> {
    let n = series.iter().map(|(_, v, _)| v.len()).max().unwrap_or(0);
    let values: Vec<&[f64]> = series.iter().map(|(_, v, _)| *v).collect();
    let (y_min, y_max) = padded_value_range(&values);

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..(n.max(1) as f64 + 1.0), y_min..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Epoch")
        .y_desc(y_desc)
        .x_labels(8)
        .y_labels(6)
        .draw()
        .map_err(render_err)?;

    for (label, values, color) in series {
        if values.is_empty() {
            continue;
        }
        let color = *color;
        chart
            .draw_series(LineSeries::new(
                values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| ((i + 1) as f64, v)),
                color.stroke_width(2),
            ))
            .map_err(render_err)?
            .label(*label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(render_err)?;
    Ok(())
}
