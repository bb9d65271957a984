// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Estimators of the statistical error of the mean of a sequence of Monte Carlo samples.

use crate::errors::EstimatorError;

pub mod blocking;
pub mod bootstrap;

pub use blocking::{blocking, blocking_transform, BlockingEstimate, BlockingLevel};
pub use bootstrap::{bootstrap, summarize, BootstrapEstimator, BootstrapSummary};

/// Arithmetic mean of the samples.
/// The slice must not be empty.
#[inline(always)]
pub(crate) fn mean(samples: &[f64]) -> f64 {
    statistical::mean(samples)
}

/// Population variance of the samples (normalized by `n`, not `n - 1`).
/// The slice must not be empty.
#[inline(always)]
pub(crate) fn variance(samples: &[f64]) -> f64 {
    statistical::population_variance(samples, None)
}

/// Lag-1 autocovariance of the samples calculated around the provided `mean`
/// and normalized by the full length of the slice.
pub(crate) fn autocovariance(samples: &[f64], mean: f64) -> f64 {
    let sum: f64 = samples
        .windows(2)
        .map(|pair| (pair[0] - mean) * (pair[1] - mean))
        .sum();

    sum / samples.len() as f64
}

/// Check that all samples are finite numbers.
pub(crate) fn check_finite(samples: &[f64]) -> Result<(), EstimatorError> {
    match samples.iter().enumerate().find(|(_, x)| !x.is_finite()) {
        Some((index, &value)) => Err(EstimatorError::NonFiniteSample(index, value)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn mean_and_variance() {
        let samples = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&samples), 5.0);
        assert_relative_eq!(variance(&samples), 4.0);
    }

    #[test]
    fn autocovariance_global_mean() {
        let samples = [1.0, 2.0, 3.0, 4.0];
        // deviations: -1.5, -0.5, 0.5, 1.5
        // products: 0.75, -0.25, 0.75
        assert_relative_eq!(autocovariance(&samples, 2.5), 1.25 / 4.0);

        // a different reference mean changes the result
        // deviations: -2, -1, 0, 1
        assert_relative_eq!(autocovariance(&samples, 3.0), 2.0 / 4.0);
    }

    #[test]
    fn autocovariance_single_sample() {
        assert_relative_eq!(autocovariance(&[3.0], 1.0), 0.0);
    }

    #[test]
    fn finite_samples() {
        assert!(check_finite(&[1.0, -2.0, 3.5]).is_ok());
        assert!(check_finite(&[]).is_ok());

        match check_finite(&[1.0, 2.0, f64::NAN, f64::INFINITY]) {
            Err(EstimatorError::NonFiniteSample(index, value)) => {
                assert_eq!(index, 2);
                assert!(value.is_nan());
            }
            other => panic!("Unexpected result: {:?}", other),
        }

        assert_eq!(
            check_finite(&[f64::NEG_INFINITY]),
            Err(EstimatorError::NonFiniteSample(0, f64::NEG_INFINITY))
        );
    }
}
