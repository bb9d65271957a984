// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Integration tests for the `vmcstat` library.

mod common;

use approx::assert_relative_eq;
use tempfile::TempDir;
use vmcstat::prelude::*;

use common::{autoregressive, naive_error, write_counts, write_energies};

#[test]
fn test_blocking_uncorrelated() {
    let values = autoregressive(1 << 16, 0.0, 17);
    let estimate = blocking(&values).unwrap();

    assert!(estimate.converged());
    assert!(!estimate.degenerate());
    assert_eq!(estimate.n_levels(), 16);

    let ratio = estimate.standard_error() / naive_error(&values);
    assert!(ratio > 0.7 && ratio < 1.3, "ratio: {}", ratio);
}

#[test]
fn test_blocking_correlated() {
    let values = autoregressive(1 << 17, 0.9, 23);
    let estimate = blocking(&values).unwrap();

    assert!(estimate.converged());
    assert!(estimate.selected_level() > 0);

    // for AR(1), the error grows by sqrt((1 + phi) / (1 - phi)) ≈ 4.36
    let ratio = estimate.standard_error() / naive_error(&values);
    assert!(ratio > 3.0 && ratio < 6.0, "ratio: {}", ratio);
}

#[test]
fn test_blocking_levels() {
    let values = autoregressive(1000, 0.5, 5);
    let estimate = blocking(&values).unwrap();

    assert_eq!(estimate.n_samples(), 1000);
    assert_eq!(estimate.n_levels(), 9);

    let lengths: Vec<usize> = estimate.levels().iter().map(|l| l.n_samples()).collect();
    assert_eq!(lengths, vec![1000, 500, 250, 125, 62, 31, 15, 7, 3]);

    for (i, level) in estimate.levels().iter().enumerate() {
        assert_eq!(level.level(), i);
    }

    // blocks are counted as if the sequence had 2^9 samples
    let selected = &estimate.levels()[estimate.selected_level()];
    let n_blocks = 1usize << (9 - estimate.selected_level());
    assert_relative_eq!(
        estimate.standard_error(),
        (selected.variance() / n_blocks as f64).sqrt(),
        epsilon = 1e-12
    );
}

#[test]
fn test_blocking_transform_halves() {
    let values = autoregressive(257, 0.3, 11);
    let transformed = blocking_transform(&values);

    assert_eq!(transformed.len(), 128);
    assert_relative_eq!(transformed[0], 0.5 * (values[0] + values[1]));
    assert_relative_eq!(transformed[127], 0.5 * (values[254] + values[255]));
}

#[test]
fn test_bootstrap_matches_blocking_for_uncorrelated() {
    let values = autoregressive(4096, 0.0, 99);

    let means = BootstrapEstimator::new(500)
        .with_seed(2)
        .with_threads(3)
        .run(&values, |s| s.iter().sum::<f64>() / s.len() as f64)
        .unwrap();
    let summary = summarize(&means).unwrap();
    let estimate = blocking(&values).unwrap();

    assert_eq!(summary.n_resamples(), 500);
    let ratio = summary.standard_error() / estimate.standard_error();
    assert!(ratio > 0.75 && ratio < 1.25, "ratio: {}", ratio);
}

#[test]
fn test_bootstrap_thread_independent() {
    let values = autoregressive(300, 0.2, 8);
    let statistic = |s: &[f64]| s.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let single = BootstrapEstimator::new(64)
        .with_seed(12)
        .run(&values, statistic)
        .unwrap();
    let multi = BootstrapEstimator::new(64)
        .with_seed(12)
        .with_threads(4)
        .run(&values, statistic)
        .unwrap();

    assert_eq!(single, multi);
}

#[test]
fn test_analysis_full() {
    let dir = TempDir::new().unwrap();
    let energies_path = dir.path().join("energies.bin");
    let density_path = dir.path().join("density.bin");
    let yaml_path = dir.path().join("results.yaml");
    let tab_path = dir.path().join("results.tab");

    let energies: Vec<f64> = autoregressive(1 << 12, 0.7, 3)
        .into_iter()
        .map(|x| x - 2.5)
        .collect();
    write_energies(&energies_path, &energies);

    let counts: Vec<i64> = (0..50).map(|i| (i * (49 - i)) as i64).collect();
    write_counts(&density_path, &counts);

    let analysis = Analysis::new()
        .energies(energies_path.to_str().unwrap())
        .output_yaml(yaml_path.to_str().unwrap())
        .output_tab(tab_path.to_str().unwrap())
        .bootstrap(Bootstrap::new(Some(200), Some(1)).unwrap())
        .density(Density::new(density_path.to_str().unwrap(), Some(50), Some(4.9)).unwrap())
        .n_threads(2)
        .silent()
        .overwrite()
        .build()
        .unwrap();

    let results = analysis.run().unwrap();

    let expected = blocking(&energies).unwrap();
    assert_eq!(results.blocking(), &expected);
    assert_eq!(results.energy().n_samples(), 4096);
    assert_relative_eq!(
        results.energy().mean(),
        energies.iter().sum::<f64>() / 4096.0,
        epsilon = 1e-12
    );

    let density = results.density().as_ref().unwrap();
    assert_eq!(density.n_bins(), 50);
    let integral: f64 = density
        .density()
        .windows(2)
        .map(|w| 0.5 * (w[0] + w[1]) * 0.1)
        .sum();
    assert_relative_eq!(integral, 1.0, epsilon = 1e-10);

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(&std::fs::read_to_string(&yaml_path).unwrap()).unwrap();
    assert_eq!(yaml["energy"]["samples"].as_u64(), Some(4096));
    assert_eq!(
        yaml["blocking"]["level"].as_u64(),
        Some(expected.selected_level() as u64)
    );
    assert_eq!(yaml["blocking"]["converged"].as_bool(), Some(true));
    assert_eq!(yaml["bootstrap"]["resamples"].as_u64(), Some(200));
    assert_eq!(
        yaml["density"]["counts"].as_sequence().unwrap().len(),
        50
    );
    assert_relative_eq!(
        yaml["blocking"]["error"].as_f64().unwrap(),
        expected.standard_error(),
        epsilon = 1e-8
    );

    let table = std::fs::read_to_string(&tab_path).unwrap();
    assert!(table.starts_with("# Results calculated with 'vmcstat v"));
    assert!(table.contains("DENSITY"));
}

#[test]
fn test_analysis_n_samples() {
    let dir = TempDir::new().unwrap();
    let energies_path = dir.path().join("energies.bin");
    let yaml_path = dir.path().join("results.yaml");

    let energies = autoregressive(1000, 0.4, 77);
    write_energies(&energies_path, &energies);

    let analysis = Analysis::new()
        .energies(energies_path.to_str().unwrap())
        .n_samples(512)
        .output(yaml_path.to_str().unwrap())
        .silent()
        .build()
        .unwrap();

    let results = analysis.run().unwrap();
    assert_eq!(results.energy().n_samples(), 512);
    assert_eq!(results.blocking(), &blocking(&energies[..512]).unwrap());
}

#[test]
fn test_analysis_fail_not_enough_values() {
    let dir = TempDir::new().unwrap();
    let energies_path = dir.path().join("energies.bin");
    write_energies(&energies_path, &[1.0, 2.0, 3.0]);

    let analysis = Analysis::new()
        .energies(energies_path.to_str().unwrap())
        .n_samples(10)
        .output(dir.path().join("results.yaml").to_str().unwrap())
        .silent()
        .build()
        .unwrap();

    match analysis.run() {
        Err(vmcstat::errors::AnalysisError::Read(
            vmcstat::errors::ReadError::NotEnoughValues(_, 3, 10),
        )) => (),
        Err(e) => panic!("Unexpected error: {}", e),
        Ok(_) => panic!("Analysis should have failed."),
    }
    assert!(!dir.path().join("results.yaml").exists());
}

#[test]
fn test_analysis_from_file() {
    let analysis = Analysis::from_file("tests/files/inputs/full.yaml").unwrap();
    assert_eq!(analysis.bootstrap().as_ref().unwrap().seed(), Some(1337));
    assert_eq!(analysis.density().as_ref().unwrap().n_bins(), 400);
}
