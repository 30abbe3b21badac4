//! Ring-of-Gaussians synthetic distribution
//!
//! The standard mode-collapse teaching dataset: K isotropic Gaussian
//! clusters whose centers sit on a circle.

use ndarray::{Array1, Array2};
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal};

/// Analytic cluster centers: K points equally spaced on a circle.
pub fn mode_centers(n_modes: usize, radius: f64) -> Array2<f64> {
    let mut centers = Array2::zeros((n_modes, 2));
    for k in 0..n_modes {
        let angle = 2.0 * std::f64::consts::PI * k as f64 / n_modes as f64;
        centers[[k, 0]] = radius * angle.cos();
        centers[[k, 1]] = radius * angle.sin();
    }
    centers
}

/// Sample a mixture of ring-arranged Gaussian clusters.
///
/// Each of the `n_samples` points is assigned uniformly at random to one of
/// `n_modes` centers and perturbed by isotropic Gaussian noise of standard
/// deviation `cluster_std`. Returns the points (N×2) and the cluster
/// assignment labels in `[0, n_modes)`.
///
/// # Panics
///
/// Panics if `cluster_std` is negative or not finite.
pub fn ring_gaussians<R: Rng + ?Sized>(
    n_samples: usize,
    n_modes: usize,
    radius: f64,
    cluster_std: f64,
    rng: &mut R,
) -> (Array2<f64>, Array1<usize>) {
    let centers = mode_centers(n_modes, radius);
    let noise =
        Normal::new(0.0, cluster_std).expect("cluster_std must be finite and non-negative");

    let mut points = Array2::zeros((n_samples, 2));
    let mut assignments = Array1::zeros(n_samples);

    for i in 0..n_samples {
        let k = rng.gen_range(0..n_modes);
        assignments[i] = k;
        points[[i, 0]] = centers[[k, 0]] + noise.sample(rng);
        points[[i, 1]] = centers[[k, 1]] + noise.sample(rng);
    }

    (points, assignments)
}

/// A batch of standard-normal latent vectors, one per row.
pub fn standard_normal<R: Rng + ?Sized>(n: usize, dim: usize, rng: &mut R) -> Array2<f64> {
    Array2::random_using((n, dim), StandardNormal, rng)
}
