// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Implementation of the blocking method for estimating the standard error
//! of the mean of a correlated time series.
//!
//! The samples are repeatedly transformed by averaging neighbouring pairs.
//! At each blocking level, the lag-1 autocovariance and the variance of the
//! transformed sequence are collected and combined into a test statistic
//! which is compared with the quantiles of the chi-squared distribution.
//! The first level at which the samples can no longer be distinguished
//! from uncorrelated ones is used to calculate the standard error.

use getset::{CopyGetters, Getters};

use super::{autocovariance, check_finite, mean, variance};
use crate::errors::EstimatorError;

/// Quantiles of the chi-squared distribution at 99% confidence
/// for 1 to 30 degrees of freedom. Indexed by the blocking level.
pub const CRITICAL_VALUES: [f64; 30] = [
    6.634897, 9.210340, 11.344867, 13.276704, 15.086272, 16.811894, 18.475307, 20.090235,
    21.665994, 23.209251, 24.724970, 26.216967, 27.688250, 29.141238, 30.577914, 31.999927,
    33.408664, 34.805306, 36.190869, 37.566235, 38.932173, 40.289360, 41.638398, 42.979820,
    44.314105, 45.641683, 46.962942, 48.278236, 49.587884, 50.892181,
];

/// Values collected at a single level of the blocking procedure.
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct BlockingLevel {
    /// Index of the blocking level. Level 0 corresponds to the original samples.
    level: usize,
    /// Number of samples at this level.
    n_samples: usize,
    /// Lag-1 autocovariance calculated around the mean of the original samples.
    autocovariance: f64,
    /// Population variance of the samples at this level.
    variance: f64,
    /// Test statistic `M_k` accumulated from this level and all the levels above it.
    statistic: f64,
}

/// Result of the blocking analysis.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct BlockingEstimate {
    /// Estimated standard error of the mean.
    #[getset(get_copy = "pub")]
    standard_error: f64,
    /// Blocking level selected for the calculation of the standard error.
    #[getset(get_copy = "pub")]
    selected_level: usize,
    /// Was a level with no detectable residual correlation found before
    /// running out of blocking levels?
    /// If `false`, more data should be collected.
    #[getset(get_copy = "pub")]
    converged: bool,
    /// All samples have the same value. The standard error is exactly zero.
    #[getset(get_copy = "pub")]
    degenerate: bool,
    /// Number of samples in the original sequence.
    #[getset(get_copy = "pub")]
    n_samples: usize,
    /// Values collected at the individual blocking levels.
    /// Empty for degenerate samples.
    #[getset(get = "pub")]
    levels: Vec<BlockingLevel>,
}

impl BlockingEstimate {
    /// Result for a sequence of identical samples.
    fn constant(n_samples: usize) -> Self {
        BlockingEstimate {
            standard_error: 0.0,
            selected_level: 0,
            converged: true,
            degenerate: true,
            n_samples,
            levels: Vec::new(),
        }
    }

    /// Number of blocking levels performed.
    #[inline(always)]
    pub fn n_levels(&self) -> usize {
        self.levels.len()
    }
}

/// Perform a single blocking transformation: average neighbouring pairs of samples.
///
/// The length of the sequence is halved. If the sequence has an odd number of samples,
/// the last sample has no partner and is dropped, i.e. `[1, 2, 3, 4, 5]` becomes `[1.5, 3.5]`.
pub fn blocking_transform(samples: &[f64]) -> Vec<f64> {
    samples
        .chunks_exact(2)
        .map(|pair| 0.5 * (pair[0] + pair[1]))
        .collect()
}

/// Get the number of blocking levels for `n_samples` samples.
fn n_levels(n_samples: usize) -> Result<usize, EstimatorError> {
    if n_samples < 2 {
        return Err(EstimatorError::NotEnoughSamples(n_samples));
    }

    let levels = n_samples.ilog2() as usize;
    if levels > CRITICAL_VALUES.len() {
        return Err(EstimatorError::TableExhausted(
            n_samples,
            levels,
            CRITICAL_VALUES.len(),
        ));
    }

    Ok(levels)
}

/// Estimate the standard error of the mean of (possibly correlated) samples using blocking.
///
/// ## Errors
/// - `EstimatorError::NotEnoughSamples` if fewer than 2 samples are provided.
/// - `EstimatorError::NonFiniteSample` if any of the samples is NaN or infinite.
/// - `EstimatorError::TableExhausted` if there are so many samples that the number
///   of blocking levels exceeds the number of available critical values (`n >= 2^31`).
///
/// ## Notes
/// - If all the samples are identical, the standard error is reported as exactly zero
///   and the estimate is marked as `degenerate`.
/// - If the correlation is never removed, a warning is logged, the estimate is marked
///   as not `converged`, and the standard error from the last blocking level is returned.
/// - A blocking level with zero variance (for non-identical samples) fails the test
///   together with all the levels below it.
pub fn blocking(samples: &[f64]) -> Result<BlockingEstimate, EstimatorError> {
    let d = n_levels(samples.len())?;
    check_finite(samples)?;

    if samples.iter().all(|&x| x == samples[0]) {
        return Ok(BlockingEstimate::constant(samples.len()));
    }

    let mu = mean(samples);

    // (length, autocovariance, variance) at each level
    let mut raw = Vec::with_capacity(d);
    let mut working = samples.to_vec();
    for _ in 0..d {
        let gamma = autocovariance(&working, mu);
        let s = variance(&working);
        raw.push((working.len(), gamma, s));
        working = blocking_transform(&working);
    }

    let weights = raw.iter().enumerate().map(|(i, &(_, gamma, s))| {
        // a level which collapsed to a constant can never pass the test
        let rho = if s > 0.0 { (gamma / s).powi(2) } else { f64::INFINITY };
        rho * 2.0f64.powi((d - i) as i32)
    });

    // reverse cumulative sum
    let mut statistics: Vec<f64> = weights
        .rev()
        .scan(0.0, |acc, w| {
            *acc += w;
            Some(*acc)
        })
        .collect();
    statistics.reverse();

    let (selected_level, converged) = match statistics
        .iter()
        .zip(CRITICAL_VALUES.iter())
        .position(|(m, q)| m < q)
    {
        Some(k) if k < d - 1 => (k, true),
        Some(k) => (k, false),
        None => (d - 1, false),
    };

    if !converged {
        log::warn!(
            "Blocking of {} samples did not converge: blocked until the last level. Use more data.",
            samples.len()
        );
    }

    let variance_at_selected = raw[selected_level].2;
    let standard_error =
        (variance_at_selected / 2.0f64.powi((d - selected_level) as i32)).sqrt();

    let levels = raw
        .into_iter()
        .zip(statistics)
        .enumerate()
        .map(
            |(level, ((n_samples, autocovariance, variance), statistic))| BlockingLevel {
                level,
                n_samples,
                autocovariance,
                variance,
                statistic,
            },
        )
        .collect();

    Ok(BlockingEstimate {
        standard_error,
        selected_level,
        converged,
        degenerate: false,
        n_samples: samples.len(),
        levels,
    })
}
