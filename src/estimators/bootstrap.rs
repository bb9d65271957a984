// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Implementation of the bootstrap resampling.

use getset::CopyGetters;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

use super::check_finite;
use crate::errors::EstimatorError;

/// Default number of bootstrap resamples.
pub const DEFAULT_N_RESAMPLES: usize = 1000;

/// Draws resamples of the samples with replacement and evaluates a statistic for each of them.
///
/// Each resample is generated by its own random number generator seeded from
/// `seed + index of the resample`. For a fixed seed, the result is therefore
/// the same no matter how many threads are used.
#[derive(Debug, Clone, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct BootstrapEstimator {
    /// Number of resamples to draw.
    n_resamples: usize,
    /// Seed for the random number generators. Random if not provided.
    seed: Option<u64>,
    /// Number of threads to distribute the resamples over.
    n_threads: usize,
}

impl Default for BootstrapEstimator {
    fn default() -> Self {
        Self {
            n_resamples: DEFAULT_N_RESAMPLES,
            seed: None,
            n_threads: 1,
        }
    }
}

impl BootstrapEstimator {
    /// Create a single-threaded estimator drawing `n_resamples` resamples with a random seed.
    pub fn new(n_resamples: usize) -> Self {
        Self {
            n_resamples,
            ..Default::default()
        }
    }

    /// Use a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Distribute the resamples over `n_threads` threads.
    /// `0` lets the thread pool use all the available cores. This is only available
    /// through the library: the configuration of an `Analysis` requires at least one thread.
    pub fn with_threads(mut self, n_threads: usize) -> Self {
        self.n_threads = n_threads;
        self
    }

    /// Evaluate `statistic` for `n_resamples` independent resamples of `samples`.
    /// Each resample has the same length as `samples` and is drawn uniformly with replacement.
    ///
    /// The returned values are ordered by the index of the resample.
    /// If `n_resamples` is zero, the result is empty.
    ///
    /// ## Errors
    /// - `EstimatorError::EmptySequence` if `samples` is empty.
    /// - `EstimatorError::NonFiniteSample` if any of the samples is NaN or infinite.
    /// - `EstimatorError::CouldNotCreateThreadPool` if the worker threads could not be spawned.
    pub fn run<F>(&self, samples: &[f64], statistic: F) -> Result<Vec<f64>, EstimatorError>
    where
        F: Fn(&[f64]) -> f64 + Sync,
    {
        if samples.is_empty() {
            return Err(EstimatorError::EmptySequence);
        }
        check_finite(samples)?;

        if self.n_resamples == 0 {
            return Ok(Vec::new());
        }

        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        let n = samples.len();

        let trial = |index: usize| -> f64 {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
            let resample: Vec<f64> = (0..n).map(|_| samples[rng.random_range(0..n)]).collect();
            statistic(&resample)
        };

        if self.n_threads == 1 {
            return Ok((0..self.n_resamples).map(&trial).collect());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.n_threads)
            .build()
            .map_err(|e| EstimatorError::CouldNotCreateThreadPool(e.to_string()))?;

        Ok(pool.install(|| {
            (0..self.n_resamples)
                .into_par_iter()
                .map(&trial)
                .collect()
        }))
    }
}

/// Evaluate `statistic` for `n_resamples` resamples of `samples` drawn with replacement
/// using a single thread and a random seed.
///
/// See [`BootstrapEstimator::run`] for more information.
pub fn bootstrap<F>(
    samples: &[f64],
    statistic: F,
    n_resamples: usize,
) -> Result<Vec<f64>, EstimatorError>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    BootstrapEstimator::new(n_resamples).run(samples, statistic)
}

/// Mean and spread of the values obtained by bootstrap resampling.
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct BootstrapSummary {
    /// Number of resamples.
    n_resamples: usize,
    /// Mean of the statistic over all resamples.
    mean: f64,
    /// Sample standard deviation of the statistic over all resamples,
    /// i.e. the bootstrap estimate of the standard error of the statistic.
    standard_error: f64,
}

/// Summarize the values obtained by bootstrap resampling.
/// Returns `None` if fewer than two values are provided.
pub fn summarize(values: &[f64]) -> Option<BootstrapSummary> {
    if values.len() < 2 {
        return None;
    }

    let mean = statistical::mean(values);
    Some(BootstrapSummary {
        n_resamples: values.len(),
        mean,
        standard_error: statistical::standard_deviation(values, Some(mean)),
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::estimators::{mean, variance};

    fn uniform_samples(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n).map(|_| rng.random::<f64>()).collect()
    }

    #[test]
    fn bootstrap_length() {
        let samples = uniform_samples(50, 1);
        for b in [1, 2, 17, 500] {
            assert_eq!(bootstrap(&samples, mean, b).unwrap().len(), b);
        }
    }

    #[test]
    fn bootstrap_zero_resamples() {
        let samples = uniform_samples(50, 1);
        assert!(bootstrap(&samples, mean, 0).unwrap().is_empty());
    }

    #[test]
    fn bootstrap_empty() {
        assert_eq!(
            bootstrap(&[], mean, 10).unwrap_err(),
            EstimatorError::EmptySequence
        );
    }

    #[test]
    fn bootstrap_non_finite() {
        assert_eq!(
            bootstrap(&[1.0, f64::NEG_INFINITY], mean, 10).unwrap_err(),
            EstimatorError::NonFiniteSample(1, f64::NEG_INFINITY)
        );
    }

    #[test]
    fn bootstrap_mean_within_range() {
        let samples = vec![-2.5, 7.0, 3.3, 0.1, 4.4, -1.0, 6.9];
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let values = BootstrapEstimator::new(2000)
            .with_seed(5)
            .run(&samples, mean)
            .unwrap();

        for x in values {
            assert!(x >= min && x <= max);
        }
    }

    #[test]
    fn bootstrap_single_sample() {
        let values = bootstrap(&[3.25], mean, 20).unwrap();
        assert!(values.iter().all(|&x| x == 3.25));
    }

    #[test]
    fn bootstrap_reproducible() {
        let samples = uniform_samples(100, 2);

        let estimator = BootstrapEstimator::new(300).with_seed(987);
        let first = estimator.run(&samples, mean).unwrap();
        let second = estimator.run(&samples, mean).unwrap();
        assert_eq!(first, second);

        let other = BootstrapEstimator::new(300)
            .with_seed(988)
            .run(&samples, mean)
            .unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn bootstrap_independent_of_threads() {
        let samples = uniform_samples(200, 3);

        let single = BootstrapEstimator::new(250)
            .with_seed(11)
            .run(&samples, variance)
            .unwrap();

        for n_threads in [0, 2, 3, 8] {
            let multi = BootstrapEstimator::new(250)
                .with_seed(11)
                .with_threads(n_threads)
                .run(&samples, variance)
                .unwrap();
            assert_eq!(single, multi);
        }
    }

    #[test]
    fn bootstrap_mean_converges() {
        for (n, tolerance) in [(100, 1e-2), (10_000, 1e-3)] {
            let samples = uniform_samples(n, 4);

            let values = BootstrapEstimator::new(1000)
                .with_seed(21)
                .with_threads(4)
                .run(&samples, mean)
                .unwrap();

            let summary = summarize(&values).unwrap();
            assert_eq!(summary.n_resamples(), 1000);
            assert!(
                (summary.mean() - mean(&samples)).abs() < tolerance,
                "n = {}: bootstrap mean {} vs sample mean {}",
                n,
                summary.mean(),
                mean(&samples)
            );
        }
    }

    #[test]
    fn bootstrap_error_of_mean() {
        let samples = uniform_samples(2000, 5);
        let values = BootstrapEstimator::new(1000)
            .with_seed(8)
            .with_threads(4)
            .run(&samples, mean)
            .unwrap();

        let naive = (variance(&samples) / samples.len() as f64).sqrt();
        let summary = summarize(&values).unwrap();
        assert_relative_eq!(summary.standard_error(), naive, max_relative = 0.15);
    }

    #[test]
    fn summarize_values() {
        let summary = summarize(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(summary.n_resamples(), 4);
        assert_relative_eq!(summary.mean(), 2.5);
        assert_relative_eq!(summary.standard_error(), (5.0f64 / 3.0).sqrt());

        assert!(summarize(&[1.0]).is_none());
        assert!(summarize(&[]).is_none());
    }
}
