// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Reading and basic processing of the data produced by the Monte Carlo sampler.
//!
//! The sampler writes raw arrays without any header:
//! local energies as little-endian `f64` values and the radial one-body density
//! histogram as little-endian `i64` counts.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use getset::{CopyGetters, Getters};

use crate::errors::{DensityConfigError, DensityError, ReadError};
use crate::estimators::{mean, variance};

/// Number of bytes of a single value in the binary files.
const VALUE_SIZE: usize = 8;

/// Read the entire binary file into memory.
fn read_bytes(path: &Path) -> Result<Vec<u8>, ReadError> {
    let mut file = File::open(path).map_err(|_| ReadError::CouldNotOpenFile(Box::from(path)))?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|_| ReadError::CouldNotReadFile(Box::from(path)))?;

    Ok(bytes)
}

/// Split the bytes into `count` chunks of `VALUE_SIZE` bytes.
/// If `count` is `None`, all the bytes are split and their number must be divisible by `VALUE_SIZE`.
fn split_values<'a>(
    path: &Path,
    bytes: &'a [u8],
    count: Option<usize>,
) -> Result<impl Iterator<Item = [u8; VALUE_SIZE]> + 'a, ReadError> {
    let available = bytes.len() / VALUE_SIZE;

    let count = match count {
        Some(requested) if requested > available => {
            return Err(ReadError::NotEnoughValues(
                Box::from(path),
                available,
                requested,
            ))
        }
        Some(requested) => requested,
        None if bytes.len() % VALUE_SIZE != 0 => {
            return Err(ReadError::MisalignedFile(
                Box::from(path),
                bytes.len(),
                VALUE_SIZE,
            ))
        }
        None => available,
    };

    Ok(bytes
        .chunks_exact(VALUE_SIZE)
        .take(count)
        .map(|chunk| {
            let mut value = [0u8; VALUE_SIZE];
            value.copy_from_slice(chunk);
            value
        }))
}

/// Read local energies from a binary file.
///
/// If `count` is provided, exactly `count` values are read from the start of the file
/// and the rest of the file is ignored. Otherwise, the entire file is read.
pub fn read_energies(path: impl AsRef<Path>, count: Option<usize>) -> Result<Vec<f64>, ReadError> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;
    let energies: Vec<f64> = split_values(path, &bytes, count)?
        .map(f64::from_le_bytes)
        .collect();

    log::info!(
        "Read {} energy samples from '{}'.",
        energies.len(),
        path.display()
    );

    Ok(energies)
}

/// Read `n_bins` counts of the radial density histogram from a binary file.
pub fn read_density(path: impl AsRef<Path>, n_bins: usize) -> Result<Vec<i64>, ReadError> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;
    let counts = split_values(path, &bytes, Some(n_bins))?
        .map(i64::from_le_bytes)
        .collect();

    log::info!(
        "Read density histogram with {} bins from '{}'.",
        n_bins,
        path.display()
    );

    Ok(counts)
}

/// Basic statistics of the local energies.
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct EnergySummary {
    /// Number of energy samples.
    n_samples: usize,
    /// Mean of the local energies.
    mean: f64,
    /// Population variance of the local energies.
    variance: f64,
    /// Standard error of the mean assuming that the samples are uncorrelated.
    naive_error: f64,
}

impl EnergySummary {
    /// Summarize the local energies. Returns `None` if there are no energies.
    pub fn new(energies: &[f64]) -> Option<Self> {
        if energies.is_empty() {
            return None;
        }

        let variance = variance(energies);
        Some(EnergySummary {
            n_samples: energies.len(),
            mean: mean(energies),
            variance,
            naive_error: (variance / energies.len() as f64).sqrt(),
        })
    }
}

/// Radial one-body density normalized to unit integral.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct RadialDensity {
    /// Maximal radius covered by the histogram.
    #[getset(get_copy = "pub")]
    max_radius: f64,
    /// Radii of the bins: evenly spaced between 0 and `max_radius`, both inclusive.
    #[getset(get = "pub")]
    radii: Vec<f64>,
    /// Raw counts collected in the individual bins.
    #[getset(get = "pub")]
    counts: Vec<i64>,
    /// Normalized density.
    #[getset(get = "pub")]
    density: Vec<f64>,
}

impl RadialDensity {
    /// Normalize the histogram so that its trapezoidal integral over the radii is one.
    pub fn new(counts: Vec<i64>, max_radius: f64) -> Result<Self, DensityError> {
        if counts.len() < 2 {
            return Err(DensityError::InvalidParameters(
                DensityConfigError::NotEnoughBins(counts.len()),
            ));
        }

        if !max_radius.is_finite() || max_radius <= 0.0 {
            return Err(DensityError::InvalidParameters(
                DensityConfigError::InvalidMaxRadius(max_radius),
            ));
        }

        if let Some((bin, &count)) = counts.iter().enumerate().find(|(_, c)| **c < 0) {
            return Err(DensityError::NegativeCount(bin, count));
        }

        let spacing = max_radius / (counts.len() - 1) as f64;
        let radii: Vec<f64> = (0..counts.len()).map(|i| i as f64 * spacing).collect();

        let values: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
        let integral = trapezoid(&values, spacing);
        if integral <= 0.0 {
            return Err(DensityError::ZeroIntegral);
        }

        let density = values.iter().map(|v| v / integral).collect();

        Ok(RadialDensity {
            max_radius,
            radii,
            counts,
            density,
        })
    }

    /// Number of bins of the histogram.
    #[inline(always)]
    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    /// Radius with the highest density.
    pub fn peak(&self) -> f64 {
        self.density
            .iter()
            .zip(self.radii.iter())
            .fold((f64::NEG_INFINITY, 0.0), |(best, radius), (&d, &r)| {
                if d > best {
                    (d, r)
                } else {
                    (best, radius)
                }
            })
            .1
    }
}

/// Trapezoidal integral of evenly spaced values.
fn trapezoid(values: &[f64], spacing: f64) -> f64 {
    values
        .windows(2)
        .map(|pair| 0.5 * (pair[0] + pair[1]) * spacing)
        .sum()
}
