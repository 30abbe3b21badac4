//! Principal component analysis
//!
//! A small, dependency-free PCA used by the external dataset projector:
//! covariance matrix plus power-iteration eigendecomposition with
//! deflation. Deterministic for a given input.

use ndarray::{s, Array1, Array2, Axis};

/// A fitted PCA projection.
#[derive(Debug, Clone)]
pub struct Pca {
    /// Number of components retained
    pub n_components: usize,
    /// Principal axes, one per column (n_features × n_components)
    pub components: Array2<f64>,
    /// Variance explained by each retained component
    pub explained_variance: Array1<f64>,
    /// Total variance across all features, for ratio computation
    total_variance: f64,
    /// Feature means used for centering
    pub mean: Array1<f64>,
}

impl Pca {
    /// Fit a PCA on an (n_samples, n_features) matrix.
    pub fn fit(data: &Array2<f64>, n_components: usize) -> Self {
        let (n_samples, n_features) = data.dim();
        let n_components = n_components.min(n_features).min(n_samples.max(1));

        let mean = data
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(n_features));
        let centered = data - &mean;
        let cov = covariance_matrix(&centered);

        let (eigenvalues, eigenvectors) = symmetric_eigen(&cov);

        let components = eigenvectors.slice(s![.., ..n_components]).to_owned();
        let explained_variance = eigenvalues.slice(s![..n_components]).to_owned();

        Self {
            n_components,
            components,
            explained_variance,
            total_variance: eigenvalues.sum(),
            mean,
        }
    }

    /// Project data into the principal component space.
    pub fn transform(&self, data: &Array2<f64>) -> Array2<f64> {
        let centered = data - &self.mean;
        centered.dot(&self.components)
    }

    /// Fit on `data` and return its embedding.
    pub fn fit_transform(data: &Array2<f64>, n_components: usize) -> (Array2<f64>, Self) {
        let pca = Self::fit(data, n_components);
        let embedding = pca.transform(data);
        (embedding, pca)
    }

    /// Fraction of total variance explained by each retained component.
    pub fn explained_variance_ratio(&self) -> Array1<f64> {
        if self.total_variance > 0.0 {
            &self.explained_variance / self.total_variance
        } else {
            Array1::zeros(self.n_components)
        }
    }
}

/// Covariance of already-centered data: X^T X / (n - 1).
fn covariance_matrix(centered: &Array2<f64>) -> Array2<f64> {
    let n = centered.nrows().max(2) as f64;
    centered.t().dot(centered) / (n - 1.0)
}

/// Eigendecomposition of a symmetric matrix via power iteration with
/// deflation. Eigenvalues come out sorted descending; eigenvectors are the
/// corresponding columns.
fn symmetric_eigen(matrix: &Array2<f64>) -> (Array1<f64>, Array2<f64>) {
    let n = matrix.nrows();
    let mut eigenvalues = Array1::zeros(n);
    let mut eigenvectors = Array2::zeros((n, n));
    let mut deflated = matrix.clone();

    for i in 0..n {
        let (value, vector) = power_iteration(&deflated, 200, 1e-12);
        eigenvalues[i] = value;
        eigenvectors.column_mut(i).assign(&vector);

        // Deflate: A <- A - λ v vᵀ
        for r in 0..n {
            for c in 0..n {
                deflated[[r, c]] -= value * vector[r] * vector[c];
            }
        }
    }

    // Deflation already yields descending order for PSD covariance matrices,
    // but numerical noise can swap near-equal eigenvalues.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        eigenvalues[b]
            .partial_cmp(&eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let sorted_values = Array1::from_iter(order.iter().map(|&i| eigenvalues[i]));
    let mut sorted_vectors = Array2::zeros((n, n));
    for (new_idx, &old_idx) in order.iter().enumerate() {
        sorted_vectors
            .column_mut(new_idx)
            .assign(&eigenvectors.column(old_idx));
    }

    (sorted_values, sorted_vectors)
}

fn power_iteration(matrix: &Array2<f64>, max_iter: usize, tol: f64) -> (f64, Array1<f64>) {
    let n = matrix.nrows();
    let mut v = Array1::from_elem(n, 1.0 / (n as f64).sqrt());
    let mut eigenvalue = 0.0;

    for _ in 0..max_iter {
        let mut next = matrix.dot(&v);
        let new_eigenvalue = v.dot(&next);

        let norm = next.dot(&next).sqrt();
        if norm > 1e-12 {
            next /= norm;
        }

        if (new_eigenvalue - eigenvalue).abs() < tol {
            return (new_eigenvalue, next);
        }
        eigenvalue = new_eigenvalue;
        v = next;
    }

    (eigenvalue, v)
}
