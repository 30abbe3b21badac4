//! Scalar summaries of sample batches and loss series

use ndarray::{ArrayView2, Axis};

/// Mean per-dimension variance of a sample batch.
///
/// Used as a qualitative mode-collapse indicator: a value near zero means
/// the generator is producing near-identical outputs. No stronger semantic
/// guarantee is intended. Returns 0.0 for an empty batch.
pub fn diversity_score(samples: ArrayView2<'_, f64>) -> f64 {
    let n = samples.nrows();
    if n == 0 || samples.ncols() == 0 {
        return 0.0;
    }

    let mut total = 0.0;
    for column in samples.axis_iter(Axis(1)) {
        let mean = column.sum() / n as f64;
        let var = column.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n as f64;
        total += var;
    }
    total / samples.ncols() as f64
}

/// Centered moving average with zero padding, same output length as input.
///
/// Matches the smoothing applied to the optimal-transport loss curve:
/// out-of-range positions contribute zero and the divisor stays `window`,
/// so the first and last few values are damped toward zero.
pub fn moving_average_same(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    if n == 0 || window <= 1 {
        return values.to_vec();
    }

    let offset = (window as isize - 1) / 2;
    (0..n as isize)
        .map(|i| {
            let m = i + offset;
            let mut acc = 0.0;
            for j in (m - window as isize + 1)..=m {
                if j >= 0 && j < n as isize {
                    acc += values[j as usize];
                }
            }
            acc / window as f64
        })
        .collect()
}

/// Trailing moving average of the last `window` values.
pub fn moving_average(values: &[f64], window: usize) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = window.min(values.len());
    let sum: f64 = values.iter().rev().take(n).sum();
    sum / n as f64
}
