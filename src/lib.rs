//! # Training Diagnostics for 2-D Generative Models
//!
//! This crate provides the instrumentation used in teaching notebooks that
//! train generative models (GANs, Sinkhorn-distance training) on synthetic
//! 2-D data: distribution sampling, batch loading, per-epoch metric records,
//! and SVG figure rendering.
//!
//! ## Modules
//!
//! - `config`: run configuration (seed, device) and seeded rng factory
//! - `data`: ring-of-Gaussians sampler, batch loader, beams2d projector
//! - `pca`: principal component analysis for the dataset projector
//! - `metrics`: diversity score and moving averages
//! - `history`: per-epoch training history records
//! - `generator`: generator capability trait and scoped inference mode
//! - `plot`: axis limits and the two figure renderers

pub mod config;
pub mod data;
pub mod error;
pub mod generator;
pub mod history;
pub mod metrics;
pub mod pca;
pub mod plot;

pub use config::{Device, RunConfig};
pub use data::{load_beams2d_projection, ring_gaussians, BatchLoader, BeamsProjection};
pub use error::ToolkitError;
pub use generator::{Generator, InferenceGuard};
pub use history::{GanHistory, History, SinkhornHistory};
pub use metrics::{diversity_score, moving_average_same};
pub use pca::Pca;
pub use plot::{
    render_diagnostics, render_latent_interpolation, AxisLimits, InterpolationOptions,
};
