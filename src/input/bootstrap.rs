// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Contains the implementation of the `Bootstrap` structure and its methods.

use crate::errors::BootstrapConfigError;
use crate::estimators::bootstrap::{BootstrapEstimator, DEFAULT_N_RESAMPLES};
use getset::CopyGetters;
use serde::Deserialize;

/// Parameters for the bootstrap estimate of the error of the mean energy.
#[derive(Debug, Clone, CopyGetters, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bootstrap {
    /// Number of resamples to draw.
    /// Default value is 1000.
    #[getset(get_copy = "pub")]
    #[serde(default = "default_n_resamples", alias = "resamples")]
    n_resamples: usize,

    /// Seed for the random number generator.
    /// If not provided, a random seed is used and the results are not reproducible.
    #[getset(get_copy = "pub")]
    #[serde(default)]
    seed: Option<u64>,
}

#[inline(always)]
fn default_n_resamples() -> usize {
    DEFAULT_N_RESAMPLES
}

impl Default for Bootstrap {
    /// Default parameters for the bootstrap.
    fn default() -> Self {
        Self {
            n_resamples: DEFAULT_N_RESAMPLES,
            seed: None,
        }
    }
}

impl Bootstrap {
    /// Specify parameters for the bootstrap.
    /// If the number of resamples is `None`, the default value is used.
    pub fn new(n_resamples: Option<usize>, seed: Option<u64>) -> Result<Self, BootstrapConfigError> {
        if let Some(0) = n_resamples {
            return Err(BootstrapConfigError::NoResamples);
        }

        Ok(Self {
            n_resamples: n_resamples.unwrap_or(DEFAULT_N_RESAMPLES),
            seed,
        })
    }

    /// Log basic info about the bootstrap.
    pub(crate) fn info(&self) {
        log::info!(
            "Will cross-check the error using {} bootstrap resamples.",
            self.n_resamples
        );
        if let Some(seed) = self.seed {
            log::info!("Will use seed '{}' for resampling.", seed);
        }
    }

    /// Check that the parameters of the bootstrap are valid.
    pub(super) fn validate(&self) -> Result<(), BootstrapConfigError> {
        if self.n_resamples == 0 {
            return Err(BootstrapConfigError::NoResamples);
        }

        Ok(())
    }

    /// Construct an estimator running on `n_threads` threads.
    pub(crate) fn estimator(&self, n_threads: usize) -> BootstrapEstimator {
        let estimator = BootstrapEstimator::new(self.n_resamples).with_threads(n_threads);
        match self.seed {
            Some(seed) => estimator.with_seed(seed),
            None => estimator,
        }
    }
}
