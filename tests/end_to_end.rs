//! Integration tests covering the notebook-level workflows: sampling the
//! ring dataset, batching it, and rendering figures from a history record.

use ndarray::{Array2, ArrayView2};
use rand::rngs::StdRng;
use rand::SeedableRng;

use gen2d_diagnostics::plot::InterpolationOptions;
use gen2d_diagnostics::{
    render_diagnostics, render_latent_interpolation, ring_gaussians, BatchLoader, Generator,
    History,
};

/// Identity map on the first two latent dimensions; mode toggle recorded
/// so the tests can observe the inference-guard discipline.
struct PassthroughGenerator {
    training: bool,
}

impl PassthroughGenerator {
    fn new() -> Self {
        Self { training: true }
    }
}

impl Generator for PassthroughGenerator {
    fn latent_dim(&self) -> usize {
        2
    }

    fn generate(&self, latent: ArrayView2<'_, f64>) -> Array2<f64> {
        assert!(!self.training, "forward pass must run in inference mode");
        latent.to_owned()
    }

    fn set_training(&mut self, training: bool) {
        self.training = training;
    }
}

#[test]
fn test_ring_sampler_cluster_means() {
    let mut rng = StdRng::seed_from_u64(42);
    let (points, labels) = ring_gaussians(5000, 8, 3.0, 0.25, &mut rng);

    assert_eq!(points.shape(), &[5000, 2]);
    assert_eq!(labels.len(), 5000);

    // Empirical cluster means land within three cluster standard
    // deviations of the analytic centers.
    for k in 0..8 {
        let angle = 2.0 * std::f64::consts::PI * k as f64 / 8.0;
        let (cx, cy) = (3.0 * angle.cos(), 3.0 * angle.sin());

        let members: Vec<usize> = (0..5000).filter(|&i| labels[i] == k).collect();
        assert!(!members.is_empty());
        let n = members.len() as f64;
        let mx = members.iter().map(|&i| points[[i, 0]]).sum::<f64>() / n;
        let my = members.iter().map(|&i| points[[i, 1]]).sum::<f64>() / n;

        assert!((mx - cx).abs() < 3.0 * 0.25, "mode {k}: x mean {mx} vs {cx}");
        assert!((my - cy).abs() < 3.0 * 0.25, "mode {k}: y mean {my} vs {cy}");
    }
}

#[test]
fn test_batch_loader_epoch_semantics() {
    let mut rng = StdRng::seed_from_u64(7);
    let (points, _) = ring_gaussians(100, 4, 2.0, 0.1, &mut rng);
    let mut loader = BatchLoader::with_seed(points, 32, 7);

    // 100 / 32: three full batches, remainder dropped
    let first_pass: Vec<Array2<f64>> = loader.iter().collect();
    assert_eq!(first_pass.len(), 3);
    assert!(first_pass.iter().all(|b| b.shape() == [32, 2]));

    let second_pass: Vec<Array2<f64>> = loader.iter().collect();
    assert_eq!(second_pass.len(), 3);
    assert_ne!(first_pass[0], second_pass[0], "passes should reshuffle");
}

#[test]
fn test_diagnostics_panel_without_diversity() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagnostics.svg");

    // An optimal-transport record with losses only: the diversity panel
    // falls back to its placeholder and rendering still succeeds.
    let mut history = History::optimal_transport();
    for i in 0..20 {
        history
            .append_epoch(&[("loss", 1.0 / (i + 1) as f64)])
            .unwrap();
    }

    let mut rng = StdRng::seed_from_u64(3);
    let (real, _) = ring_gaussians(500, 8, 3.0, 0.25, &mut rng);
    let mut generator = PassthroughGenerator::new();

    render_diagnostics(
        &history,
        real.view(),
        &mut generator,
        2,
        "(sinkhorn)",
        &mut rng,
        &path,
    )
    .unwrap();

    assert!(generator.training, "training mode must be restored");
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("Diversity not available"));
    assert!(svg.contains("Generated vs. Real Samples"));
}

#[test]
fn test_adversarial_panel_renders_all_series() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gan.svg");

    let mut history = History::adversarial();
    for i in 0..10 {
        let t = i as f64;
        history
            .append_epoch(&[
                ("d_loss", 1.4 - 0.05 * t),
                ("g_loss", 0.7 + 0.03 * t),
                ("diversity", 4.0 + 0.1 * t),
                ("real_scores", 0.9 - 0.03 * t),
                ("fake_scores", 0.1 + 0.03 * t),
            ])
            .unwrap();
    }

    let mut rng = StdRng::seed_from_u64(11);
    let (real, _) = ring_gaussians(500, 8, 3.0, 0.25, &mut rng);
    let mut generator = PassthroughGenerator::new();

    render_diagnostics(&history, real.view(), &mut generator, 2, "", &mut rng, &path).unwrap();

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("Discriminator"));
    assert!(svg.contains("Sample Diversity Over Time"));
    assert!(svg.contains("Critic Outputs Over Time"));
}

#[test]
fn test_interpolation_figure_renders() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("interp.svg");

    let mut rng = StdRng::seed_from_u64(5);
    let (real, _) = ring_gaussians(300, 8, 3.0, 0.25, &mut rng);
    let mut generator = PassthroughGenerator::new();

    let options = InterpolationOptions {
        real_samples: Some(real.view()),
        ..InterpolationOptions::default()
    };
    render_latent_interpolation(&mut generator, 2, &options, &mut rng, &path).unwrap();

    assert!(generator.training, "training mode must be restored");
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("Latent Space Path"));
    assert!(svg.contains("Data Space Trajectory"));
}

#[test]
fn test_interpolation_with_explicit_sizes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("interp_small.svg");

    let mut rng = StdRng::seed_from_u64(13);
    let (real, _) = ring_gaussians(200, 4, 2.0, 0.2, &mut rng);
    let mut generator = PassthroughGenerator::new();

    let options = InterpolationOptions {
        steps: Some(5),
        cloud_size: Some(32),
        real_samples: Some(real.view()),
        ..InterpolationOptions::default()
    };
    render_latent_interpolation(&mut generator, 2, &options, &mut rng, &path).unwrap();

    assert!(path.exists());
    assert!(generator.training);
}
