//! Training-diagnostics demo
//!
//! Runs a toy training loop against the ring-of-Gaussians dataset and
//! renders the diagnostics panel and the latent interpolation figure, or
//! projects a beams2d CSV export down to two dimensions.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::{Array2, ArrayView2};
use rand::Rng;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use gen2d_diagnostics::data::standard_normal;
use gen2d_diagnostics::plot::InterpolationOptions;
use gen2d_diagnostics::{
    diversity_score, load_beams2d_projection, render_diagnostics, render_latent_interpolation,
    ring_gaussians, BatchLoader, Generator, History, InferenceGuard, RunConfig,
};

/// Training diagnostics for 2-D generative models
#[derive(Parser)]
#[command(name = "gen2d_diagnostics")]
#[command(version = "0.1.0")]
#[command(about = "Render training diagnostics for toy 2-D generative models")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "run_config.toml")]
    config: String,

    /// Verbosity level
    #[arg(short, long, default_value = "info")]
    verbosity: String,

    /// Directory figures and histories are written to
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate an adversarial run and render its diagnostics
    Gan {
        /// Number of epochs to simulate
        #[arg(short, long, default_value = "40")]
        epochs: usize,

        /// Number of real samples to draw
        #[arg(short, long, default_value = "5000")]
        samples: usize,

        /// Number of Gaussian modes on the ring
        #[arg(long, default_value = "8")]
        modes: usize,

        /// Ring radius
        #[arg(long, default_value = "3.0")]
        radius: f64,

        /// Per-mode standard deviation
        #[arg(long, default_value = "0.25")]
        std: f64,

        /// Batch size for the training loop
        #[arg(short, long, default_value = "128")]
        batch_size: usize,
    },

    /// Simulate a Sinkhorn run and render its diagnostics
    Sinkhorn {
        /// Number of epochs to simulate
        #[arg(short, long, default_value = "40")]
        epochs: usize,

        /// Number of real samples to draw
        #[arg(short, long, default_value = "5000")]
        samples: usize,

        /// Number of Gaussian modes on the ring
        #[arg(long, default_value = "8")]
        modes: usize,

        /// Ring radius
        #[arg(long, default_value = "3.0")]
        radius: f64,

        /// Per-mode standard deviation
        #[arg(long, default_value = "0.25")]
        std: f64,

        /// Batch size for the training loop
        #[arg(short, long, default_value = "128")]
        batch_size: usize,
    },

    /// Project a beams2d CSV export to two dimensions
    Beams {
        /// Path to the CSV export, one flattened design per row
        #[arg(short, long)]
        data: PathBuf,

        /// Maximum number of designs to read
        #[arg(short, long, default_value = "1000")]
        samples: usize,

        /// Number of principal components to keep
        #[arg(long, default_value = "2")]
        components: usize,
    },
}

/// Closed-form stand-in for a trained generator: pushes latent points onto
/// the ring with a residual wobble, so its output visibly resembles the
/// target distribution without any actual training.
struct RingGenerator {
    radius: f64,
    wobble: f64,
    training: bool,
}

impl RingGenerator {
    fn new(radius: f64, wobble: f64) -> Self {
        Self {
            radius,
            wobble,
            training: true,
        }
    }
}

impl Generator for RingGenerator {
    fn latent_dim(&self) -> usize {
        2
    }

    fn generate(&self, latent: ArrayView2<'_, f64>) -> Array2<f64> {
        debug_assert!(!self.training, "sampling runs under an inference guard");
        let mut out = Array2::zeros((latent.nrows(), 2));
        for (i, z) in latent.rows().into_iter().enumerate() {
            let (z1, z2) = (z[0], z[1]);
            let norm = (z1 * z1 + z2 * z2).sqrt().max(1e-9);
            out[[i, 0]] = z1 / norm * self.radius + self.wobble * z1;
            out[[i, 1]] = z2 / norm * self.radius + self.wobble * z2;
        }
        out
    }

    fn set_training(&mut self, training: bool) {
        self.training = training;
    }
}

/// Mean toy critic score: high near the ring, low away from it.
fn ring_score(points: ArrayView2<'_, f64>, radius: f64) -> f64 {
    if points.nrows() == 0 {
        return 0.0;
    }
    let total: f64 = points
        .rows()
        .into_iter()
        .map(|p| {
            let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
            (-(r - radius).abs()).exp()
        })
        .sum();
    total / points.nrows() as f64
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbosity.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = if Path::new(&cli.config).exists() {
        RunConfig::from_toml(&cli.config)?
    } else {
        info!("Config file not found, using defaults");
        RunConfig::default()
    };
    info!("seed: {}, device: {:?}", config.seed, config.device);

    std::fs::create_dir_all(&cli.output_dir)?;

    match cli.command {
        Commands::Gan {
            epochs,
            samples,
            modes,
            radius,
            std,
            batch_size,
        } => {
            run_demo(
                &config,
                &cli.output_dir,
                DemoObjective::Adversarial,
                epochs,
                samples,
                modes,
                radius,
                std,
                batch_size,
            )?;
        }
        Commands::Sinkhorn {
            epochs,
            samples,
            modes,
            radius,
            std,
            batch_size,
        } => {
            run_demo(
                &config,
                &cli.output_dir,
                DemoObjective::OptimalTransport,
                epochs,
                samples,
                modes,
                radius,
                std,
                batch_size,
            )?;
        }
        Commands::Beams {
            data,
            samples,
            components,
        } => {
            project_beams(&data, samples, components)?;
        }
    }

    Ok(())
}

enum DemoObjective {
    Adversarial,
    OptimalTransport,
}

#[allow(clippy::too_many_arguments)]
fn run_demo(
    config: &RunConfig,
    output_dir: &Path,
    objective: DemoObjective,
    epochs: usize,
    samples: usize,
    modes: usize,
    radius: f64,
    std: f64,
    batch_size: usize,
) -> Result<()> {
    let mut rng = config.rng();
    let (real, _labels) = ring_gaussians(samples, modes, radius, std, &mut rng);
    let mut loader = BatchLoader::with_seed(real, batch_size, config.seed);
    info!(
        "drew {} real samples from {} modes, {} batches per epoch",
        samples,
        modes,
        loader.num_batches()
    );

    let mut generator = RingGenerator::new(radius, std);
    let noise_dim = generator.latent_dim();
    let (mut history, label) = match objective {
        DemoObjective::Adversarial => (History::adversarial(), "gan"),
        DemoObjective::OptimalTransport => (History::optimal_transport(), "sinkhorn"),
    };

    let pb = ProgressBar::new(epochs as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );

    for epoch in 0..epochs {
        // The simulated schedule tightens the generator toward the ring
        // while the loop walks real batches the way a real trainer would.
        let progress = (epoch + 1) as f64 / epochs as f64;
        generator.wobble = std + (1.0 - progress) * radius * 0.5;

        let mut real_score_acc = 0.0;
        let mut fake_score_acc = 0.0;
        let mut batches = 0;
        for real_batch in loader.iter() {
            let fake_batch = {
                let guard = InferenceGuard::new(&mut generator);
                let noise = standard_normal(real_batch.nrows(), noise_dim, &mut rng);
                guard.generate(noise.view())
            };
            real_score_acc += ring_score(real_batch.view(), radius);
            fake_score_acc += ring_score(fake_batch.view(), radius);
            batches += 1;
        }
        let real_score = real_score_acc / batches.max(1) as f64;
        let fake_score = fake_score_acc / batches.max(1) as f64;

        let diversity = {
            let guard = InferenceGuard::new(&mut generator);
            let noise = standard_normal(512, noise_dim, &mut rng);
            diversity_score(guard.generate(noise.view()).view())
        };

        let jitter: f64 = rng.gen_range(-0.02..0.02);
        match &mut history {
            History::Adversarial(h) => {
                let gap = (real_score - fake_score).abs();
                h.append_epoch(&[
                    ("d_loss", 2.0 * (1.0 - gap).max(0.0) + jitter),
                    ("g_loss", 1.0 + gap + jitter),
                    ("diversity", diversity),
                    ("real_scores", real_score),
                    ("fake_scores", fake_score),
                ])?;
            }
            History::OptimalTransport(h) => {
                h.append_epoch(&[
                    ("loss", (real_score - fake_score).abs() + jitter.abs()),
                    ("diversity", diversity),
                ])?;
            }
        }

        if let Some(loss) = history.latest("d_loss").or_else(|| history.latest("loss")) {
            pb.set_message(format!("loss: {loss:.4}"));
        }
        pb.inc(1);
    }
    pb.finish_with_message("done");

    let csv_path = output_dir.join(format!("{label}_history.csv"));
    history.save_csv(csv_path.to_string_lossy().as_ref())?;
    info!("saved history to {}", csv_path.display());

    let panel_path = output_dir.join(format!("{label}_diagnostics.svg"));
    render_diagnostics(
        &history,
        loader.data(),
        &mut generator,
        noise_dim,
        &format!("({label})"),
        &mut rng,
        &panel_path,
    )?;

    let interp_path = output_dir.join(format!("{label}_interpolation.svg"));
    let suffix = format!(" ({label})");
    let options = InterpolationOptions {
        title_suffix: &suffix,
        real_samples: Some(loader.data()),
        ..InterpolationOptions::default()
    };
    render_latent_interpolation(&mut generator, noise_dim, &options, &mut rng, &interp_path)?;

    Ok(())
}

fn project_beams(data: &Path, samples: usize, components: usize) -> Result<()> {
    let projection = load_beams2d_projection(data, samples, components)?;
    let ratios = projection.pca.explained_variance_ratio();

    info!(
        "projected {} designs to {} components",
        projection.embedding.nrows(),
        projection.embedding.ncols()
    );
    for (i, ratio) in ratios.iter().enumerate() {
        info!("component {}: {:.2}% of variance", i + 1, ratio * 100.0);
    }

    Ok(())
}
