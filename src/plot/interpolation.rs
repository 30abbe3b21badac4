//! Latent interpolation figure
//!
//! A straight-line path between two random latent points and its image
//! under the generator, each drawn over a random background cloud in two
//! side-by-side panels.

use std::path::Path;

use ndarray::{Array2, ArrayView2, Axis};
use plotters::coord::Shift;
use plotters::drawing::DrawingArea;
use plotters::prelude::*;
use rand::Rng;
use tracing::info;

use super::{render_err, AxisLimits, DEFAULT_PAD, LIGHT_GRAY, ORANGE, PURPLE, SILVER};
use crate::data::standard_normal;
use crate::error::ToolkitError;
use crate::generator::{Generator, InferenceGuard};

/// Options for [`render_latent_interpolation`].
#[derive(Debug, Clone, Default)]
pub struct InterpolationOptions<'a> {
    /// Number of path points, endpoints included. Defaults to 25.
    pub steps: Option<usize>,
    /// Appended to the left panel's title.
    pub title_suffix: &'a str,
    /// Real samples drawn behind the data-space panel.
    pub real_samples: Option<ArrayView2<'a, f64>>,
    /// Precomputed latent-space limits; computed from the clouds when absent.
    pub latent_limits: Option<AxisLimits>,
    /// Precomputed data-space limits; computed from the clouds when absent.
    pub data_limits: Option<AxisLimits>,
    /// Background cloud size. Defaults to 512.
    pub cloud_size: Option<usize>,
}

const DEFAULT_STEPS: usize = 25;
const DEFAULT_CLOUD_SIZE: usize = 512;

/// Render the latent-path / data-trajectory figure.
///
/// Same scoped inference discipline as the diagnostics panel: the generator
/// is switched to inference mode only while sampling, and restored
/// afterwards regardless of outcome.
pub fn render_latent_interpolation<G, R>(
    generator: &mut G,
    noise_dim: usize,
    options: &InterpolationOptions<'_>,
    rng: &mut R,
    output_path: &Path,
) -> Result<(), ToolkitError>
where
    G: Generator + ?Sized,
    R: Rng + ?Sized,
{
    let steps = options.steps.unwrap_or(DEFAULT_STEPS);
    let cloud_size = options.cloud_size.unwrap_or(DEFAULT_CLOUD_SIZE);

    let endpoints = standard_normal(2, noise_dim, rng);
    let z_start = endpoints.row(0);
    let z_end = endpoints.row(1);

    let denom = steps.saturating_sub(1).max(1) as f64;
    let mut z_path = Array2::zeros((steps, noise_dim));
    for (i, mut row) in z_path.axis_iter_mut(Axis(0)).enumerate() {
        let w = i as f64 / denom;
        for d in 0..noise_dim {
            row[d] = (1.0 - w) * z_start[d] + w * z_end[d];
        }
    }
    let z_cloud = standard_normal(cloud_size, noise_dim, rng);

    let (path_samples, data_cloud) = {
        let guard = InferenceGuard::new(generator);
        (guard.generate(z_path.view()), guard.generate(z_cloud.view()))
    };

    let latent_limits = match options.latent_limits {
        Some(limits) => limits,
        None => {
            let union = stack_first_two(&[z_cloud.view(), z_path.view()]);
            AxisLimits::from_points(Some(union.view()), DEFAULT_PAD)?
        }
    };
    let data_limits = match options.data_limits {
        Some(limits) => limits,
        None => {
            let mut clouds = vec![data_cloud.view(), path_samples.view()];
            if let Some(real) = options.real_samples {
                clouds.push(real.reborrow());
            }
            let union = stack_first_two(&clouds);
            AxisLimits::from_points(Some(union.view()), DEFAULT_PAD)?
        }
    };

    let root = SVGBackend::new(output_path, (1100, 450)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let panels = root.split_evenly((1, 2));

    draw_path_panel(
        &panels[0],
        &format!("Latent Space Path{}", options.title_suffix),
        ("z1", "z2"),
        latent_limits,
        z_cloud.view(),
        "Latent Points",
        LIGHT_GRAY,
        z_path.view(),
        "Interpolation path",
        PURPLE,
        None,
    )?;
    draw_path_panel(
        &panels[1],
        "Data Space Trajectory",
        ("x1", "x2"),
        data_limits,
        data_cloud.view(),
        "Generated Points",
        SILVER,
        path_samples.view(),
        "Path image",
        ORANGE,
        options.real_samples,
    )?;

    root.present().map_err(render_err)?;
    info!(
        "saved latent interpolation figure to {}",
        output_path.display()
    );
    Ok(())
}

/// First two columns of each cloud, stacked into one (ΣN, 2) array.
fn stack_first_two(clouds: &[ArrayView2<'_, f64>]) -> Array2<f64> {
    let total: usize = clouds.iter().map(|c| c.nrows()).sum();
    let mut out = Array2::zeros((total, 2));
    let mut offset = 0;
    for cloud in clouds {
        for row in cloud.rows() {
            if row.len() >= 2 {
                out[[offset, 0]] = row[0];
                out[[offset, 1]] = row[1];
            }
            offset += 1;
        }
    }
    out
}

#[allow(clippy::too_many_arguments)]
fn draw_path_panel(
    area: &DrawingArea<SVGBackend, Shift>,
    title: &str,
    axis_labels: (&str, &str),
    limits: AxisLimits,
    cloud: ArrayView2<'_, f64>,
    cloud_label: &str,
    cloud_color: RGBColor,
    path: ArrayView2<'_, f64>,
    path_label: &str,
    path_color: RGBColor,
    real_samples: Option<ArrayView2<'_, f64>>,
) -> Result<(), ToolkitError> {
    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(limits.x.0..limits.x.1, limits.y.0..limits.y.1)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc(axis_labels.0)
        .y_desc(axis_labels.1)
        .x_labels(6)
        .y_labels(6)
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(
            cloud
                .rows()
                .into_iter()
                .filter(|row| row.len() >= 2)
                .map(|row| Circle::new((row[0], row[1]), 2, cloud_color.mix(0.25).filled())),
        )
        .map_err(render_err)?
        .label(cloud_label)
        .legend(move |(x, y)| Circle::new((x + 10, y), 3, cloud_color.filled()));

    if let Some(real) = real_samples {
        chart
            .draw_series(
                real.rows()
                    .into_iter()
                    .filter(|row| row.len() >= 2)
                    .map(|row| Circle::new((row[0], row[1]), 2, LIGHT_GRAY.mix(0.15).filled())),
            )
            .map_err(render_err)?
            .label("Real data")
            .legend(|(x, y)| Circle::new((x + 10, y), 3, LIGHT_GRAY.filled()));
    }

    let path_points: Vec<(f64, f64)> = path
        .rows()
        .into_iter()
        .filter(|row| row.len() >= 2)
        .map(|row| (row[0], row[1]))
        .collect();

    chart
        .draw_series(
            LineSeries::new(path_points.iter().copied(), path_color.stroke_width(2))
                .point_size(3),
        )
        .map_err(render_err)?
        .label(path_label)
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], path_color.stroke_width(2))
        });

    // Start and end markers
    if let (Some(&start), Some(&end)) = (path_points.first(), path_points.last()) {
        chart
            .draw_series([
                Circle::new(start, 6, GREEN.filled()),
                Circle::new(end, 6, RED.filled()),
            ])
            .map_err(render_err)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(render_err)?;
    Ok(())
}
