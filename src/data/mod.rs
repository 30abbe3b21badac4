//! Synthetic data generation and batching

mod beams;
mod loader;
mod synthetic;

pub use beams::{load_beams2d_projection, BeamsProjection};
pub use loader::{BatchLoader, BatchLoaderIter};
pub use synthetic::{mode_centers, ring_gaussians, standard_normal};
