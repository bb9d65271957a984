// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Functions used in various integration tests.

use std::{fs::File, io::Write, path::Path};

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Test utility. Write values into a binary file as little-endian 64-bit floats.
#[allow(dead_code)]
pub(super) fn write_energies(path: &Path, values: &[f64]) {
    let mut file = File::create(path).unwrap();
    for v in values {
        file.write_all(&v.to_le_bytes()).unwrap();
    }
}

/// Test utility. Write values into a binary file as little-endian 64-bit integers.
#[allow(dead_code)]
pub(super) fn write_counts(path: &Path, values: &[i64]) {
    let mut file = File::create(path).unwrap();
    for v in values {
        file.write_all(&v.to_le_bytes()).unwrap();
    }
}

/// Test utility. Generate an AR(1) process `x_t = phi * x_{t-1} + e_t` with uniform noise in [-1, 1).
#[allow(dead_code)]
pub(super) fn autoregressive(n: usize, phi: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut x = 0.0;
    (0..n)
        .map(|_| {
            x = phi * x + rng.random_range(-1.0..1.0);
            x
        })
        .collect()
}

/// Test utility. Standard error of the mean assuming uncorrelated samples.
#[allow(dead_code)]
pub(super) fn naive_error(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (variance / n).sqrt()
}
