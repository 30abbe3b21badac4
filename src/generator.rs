//! Generator capability
//!
//! The model under inspection is opaque: any type that maps a batch of
//! latent vectors to a batch of data-space vectors and exposes a
//! train/inference toggle can be instrumented. The renderers never touch a
//! generator outside an [`InferenceGuard`], which restores training mode
//! even if the forward pass panics.

use ndarray::{Array2, ArrayView2};

/// A batch-to-batch transform from latent space to data space.
pub trait Generator {
    /// Dimensionality of the latent input vectors.
    fn latent_dim(&self) -> usize;

    /// Map a batch of latent vectors (rows) to data-space vectors (rows).
    fn generate(&self, latent: ArrayView2<'_, f64>) -> Array2<f64>;

    /// Switch between training and inference behavior.
    ///
    /// Implementations without mode-dependent behavior (no dropout, no
    /// batch-norm) may make this a no-op.
    fn set_training(&mut self, training: bool);
}

/// Scoped inference mode.
///
/// Construction switches the generator to inference mode; dropping the guard
/// restores training mode unconditionally, including during unwinding.
pub struct InferenceGuard<'a, G: Generator + ?Sized> {
    generator: &'a mut G,
}

impl<'a, G: Generator + ?Sized> InferenceGuard<'a, G> {
    pub fn new(generator: &'a mut G) -> Self {
        generator.set_training(false);
        Self { generator }
    }

    /// Forward pass while the guard is held.
    pub fn generate(&self, latent: ArrayView2<'_, f64>) -> Array2<f64> {
        self.generator.generate(latent)
    }

    pub fn latent_dim(&self) -> usize {
        self.generator.latent_dim()
    }
}

impl<G: Generator + ?Sized> Drop for InferenceGuard<'_, G> {
    fn drop(&mut self) {
        self.generator.set_training(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    struct Probe {
        training: bool,
    }

    impl Generator for Probe {
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
    fn test_guard_restores_training_mode() {
        let mut probe = Probe { training: true };
        {
            let guard = InferenceGuard::new(&mut probe);
            let out = guard.generate(Array2::zeros((4, 2)).view());
            assert_eq!(out.shape(), &[4, 2]);
        }
        assert!(probe.training);
    }

    #[test]
    fn test_guard_restores_after_panic() {
        let mut probe = Probe { training: true };
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = InferenceGuard::new(&mut probe);
            panic!("forward pass exploded");
        }));
        assert!(result.is_err());
        assert!(probe.training);
    }
}
