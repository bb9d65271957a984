// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Contains the implementation of the `Density` structure and its methods.

use crate::errors::DensityConfigError;
use getset::{CopyGetters, Getters};
use serde::Deserialize;

/// Default number of bins of the density histogram.
const DEFAULT_N_BINS: usize = 500;

/// Default maximal radius covered by the density histogram.
const DEFAULT_MAX_RADIUS: f64 = 5.0;

/// Parameters of the radial one-body density histogram written by the sampler.
#[derive(Debug, Clone, Getters, CopyGetters, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Density {
    /// Path to the binary file containing the histogram.
    #[getset(get = "pub")]
    #[serde(alias = "input")]
    file: String,

    /// Number of bins of the histogram. Default value is 500.
    #[getset(get_copy = "pub")]
    #[serde(default = "default_n_bins", alias = "bins")]
    n_bins: usize,

    /// Radius covered by the last bin of the histogram. Default value is 5.
    #[getset(get_copy = "pub")]
    #[serde(default = "default_max_radius")]
    max_radius: f64,
}

#[inline(always)]
fn default_n_bins() -> usize {
    DEFAULT_N_BINS
}

#[inline(always)]
fn default_max_radius() -> f64 {
    DEFAULT_MAX_RADIUS
}

impl Density {
    /// Specify parameters of the density histogram.
    /// If any of the optional parameters is `None`, the default value is used.
    pub fn new(
        file: &str,
        n_bins: Option<usize>,
        max_radius: Option<f64>,
    ) -> Result<Self, DensityConfigError> {
        let density = Self {
            file: file.to_owned(),
            n_bins: n_bins.unwrap_or(DEFAULT_N_BINS),
            max_radius: max_radius.unwrap_or(DEFAULT_MAX_RADIUS),
        };

        density.validate()?;
        Ok(density)
    }

    /// Log basic info about the density histogram.
    pub(crate) fn info(&self) {
        log::info!(
            "Will normalize density histogram '{}' ({} bins up to radius {}).",
            self.file,
            self.n_bins,
            self.max_radius
        );
    }

    /// Check that the parameters of the histogram are valid.
    pub(super) fn validate(&self) -> Result<(), DensityConfigError> {
        if self.n_bins < 2 {
            return Err(DensityConfigError::NotEnoughBins(self.n_bins));
        }

        if !self.max_radius.is_finite() || self.max_radius <= 0.0 {
            return Err(DensityConfigError::InvalidMaxRadius(self.max_radius));
        }

        Ok(())
    }
}
