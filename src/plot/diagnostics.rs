//! 2×2 training diagnostics panel
//!
//! Loss curves, the diversity curve, a generated-vs-real scatter, and either
//! the critic score curves (adversarial) or a smoothed loss curve
//! (optimal-transport), composed into one SVG figure.

use std::path::Path;

use ndarray::{Array2, ArrayView2};
use plotters::prelude::*;
use rand::Rng;
use tracing::info;

use super::{
    draw_line_panel, draw_placeholder, render_err, AxisLimits, LIGHT_GRAY, PURPLE, TEAL, TOMATO,
};
use crate::data::standard_normal;
use crate::error::ToolkitError;
use crate::generator::{Generator, InferenceGuard};
use crate::history::History;
use crate::metrics::moving_average_same;

/// Generated samples drawn for the scatter panel.
const DIAGNOSTIC_SAMPLES: usize = 2000;

/// Render the 2×2 diagnostics panel for a training run.
///
/// The generator runs once, inside a scoped inference guard, to produce the
/// scatter panel's fresh batch; its training mode is restored before this
/// function returns, error or not. The epoch axis is derived from the
/// record's primary loss sequence, 1-based.
pub fn render_diagnostics<G, R>(
    history: &History,
    real_samples: ArrayView2<'_, f64>,
    generator: &mut G,
    noise_dim: usize,
    title_suffix: &str,
    rng: &mut R,
    output_path: &Path,
) -> Result<(), ToolkitError>
where
    G: Generator + ?Sized,
    R: Rng + ?Sized,
{
    let fake = {
        let guard = InferenceGuard::new(generator);
        let noise = standard_normal(DIAGNOSTIC_SAMPLES, noise_dim, rng);
        guard.generate(noise.view())
    };

    let root = SVGBackend::new(output_path, (1200, 900)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let areas = root.split_evenly((2, 2));

    // Loss curves
    let loss_title = format!("Training Losses {title_suffix}");
    match history {
        History::Adversarial(h) => draw_line_panel(
            &areas[0],
            loss_title.trim_end(),
            "Loss",
            &[
                ("Discriminator", &h.d_loss, BLUE),
                ("Generator", &h.g_loss, RED),
            ],
        )?,
        History::OptimalTransport(h) => draw_line_panel(
            &areas[0],
            loss_title.trim_end(),
            "Loss",
            &[("Loss", &h.loss, BLUE)],
        )?,
    }

    // Diversity curve or placeholder
    let diversity = history.diversity();
    if diversity.is_empty() {
        draw_placeholder(&areas[1], "Diversity", "Diversity not available")?;
    } else {
        draw_line_panel(
            &areas[1],
            "Sample Diversity Over Time",
            "Variance score",
            &[("Diversity", diversity, TEAL)],
        )?;
    }

    // Generated vs. real scatter
    draw_scatter_panel(&areas[2], real_samples, fake.view())?;

    // Critic scores or smoothed loss
    match history {
        History::Adversarial(h) => {
            if h.real_scores.is_empty() && h.fake_scores.is_empty() {
                draw_placeholder(&areas[3], "Critic Outputs", "No critic scores")?;
            } else {
                draw_line_panel(
                    &areas[3],
                    "Critic Outputs Over Time",
                    "Score",
                    &[
                        ("Real score", &h.real_scores, BLUE),
                        ("Fake score", &h.fake_scores, RED),
                    ],
                )?;
            }
        }
        History::OptimalTransport(h) => {
            if h.loss.is_empty() {
                draw_placeholder(&areas[3], "Loss", "No loss history")?;
            } else {
                let window = (h.loss.len() / 20).max(1);
                let smooth = moving_average_same(&h.loss, window);
                draw_line_panel(
                    &areas[3],
                    "Sinkhorn Loss (smoothed)",
                    "Loss",
                    &[("Smoothed Sinkhorn", &smooth, PURPLE)],
                )?;
            }
        }
    }

    root.present().map_err(render_err)?;
    info!("saved diagnostics panel to {}", output_path.display());
    Ok(())
}

/// Real samples (light, low alpha) against a fresh generated batch, on
/// square limits so the aspect ratio is not distorted.
fn draw_scatter_panel(
    area: &plotters::drawing::DrawingArea<SVGBackend, plotters::coord::Shift>,
    real: ArrayView2<'_, f64>,
    fake: ArrayView2<'_, f64>,
) -> Result<(), ToolkitError> {
    let mut union = Array2::zeros((real.nrows() + fake.nrows(), 2));
    for (i, row) in real.rows().into_iter().enumerate() {
        if row.len() >= 2 {
            union[[i, 0]] = row[0];
            union[[i, 1]] = row[1];
        }
    }
    for (i, row) in fake.rows().into_iter().enumerate() {
        if row.len() >= 2 {
            union[[real.nrows() + i, 0]] = row[0];
            union[[real.nrows() + i, 1]] = row[1];
        }
    }
    let limits = AxisLimits::from_points(Some(union.view()), super::DEFAULT_PAD)?;

    let mut chart = ChartBuilder::on(area)
        .caption("Generated vs. Real Samples", ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(limits.x.0..limits.x.1, limits.y.0..limits.y.1)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("x1")
        .y_desc("x2")
        .x_labels(6)
        .y_labels(6)
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(
            real.rows()
                .into_iter()
                .filter(|row| row.len() >= 2)
                .map(|row| Circle::new((row[0], row[1]), 2, LIGHT_GRAY.mix(0.3).filled())),
        )
        .map_err(render_err)?
        .label("Real")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, LIGHT_GRAY.filled()));

    chart
        .draw_series(
            fake.rows()
                .into_iter()
                .filter(|row| row.len() >= 2)
                .map(|row| Circle::new((row[0], row[1]), 2, TOMATO.mix(0.5).filled())),
        )
        .map_err(render_err)?
        .label("Generated")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, TOMATO.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(render_err)?;
    Ok(())
}
