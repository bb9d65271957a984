// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Errors that can be returned by the `vmcstat` crate.

use std::path::Path;

use colored::{ColoredString, Colorize};
use thiserror::Error;

fn path_to_yellow(path: &Path) -> ColoredString {
    path.to_string_lossy().yellow()
}

/// Errors that can occur inside the application itself.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{} could not read the configuration file '{}'", "error:".red().bold(), .0.yellow())]
    CouldNotReadConfig(String),
}

/// Errors that can occur when the estimators are supplied with invalid samples.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimatorError {
    #[error("{} at least '{}' samples are required for blocking, but only '{}' were provided", "error:".red().bold(), "2".yellow(), .0.to_string().yellow())]
    NotEnoughSamples(usize),

    #[error("{} cannot resample an empty sequence of samples", "error:".red().bold())]
    EmptySequence,

    #[error("{} sample with index '{}' is not a finite number ('{}')", "error:".red().bold(), .0.to_string().yellow(), .1.to_string().yellow())]
    NonFiniteSample(usize, f64),

    #[error("{} blocking of '{}' samples requires '{}' levels, but critical values are only available for '{}' levels (use fewer than 2^31 samples)", "error:".red().bold(), .0.to_string().yellow(), .1.to_string().yellow(), .2.to_string().yellow())]
    TableExhausted(usize, usize, usize),

    #[error("{} could not create a thread pool for resampling ({})", "error:".red().bold(), .0)]
    CouldNotCreateThreadPool(String),
}

/// Errors that can occur when reading the configuration of the analysis.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{} could not open the configuration file '{}'", "error:".red().bold(), .0.yellow())]
    CouldNotOpenConfig(String),

    #[error("{} could not understand the contents of the configuration file '{}' ({})", "error:".red().bold(), .0.yellow(), .1)]
    CouldNotParseConfig(String, serde_yaml::Error),

    #[error("{} the requested number of samples ('{}') is too low (must be at least '{}')", "error:".red().bold(), .0.to_string().yellow(), "2".yellow())]
    InvalidNSamples(usize),

    #[error("{} the requested number of threads is zero (must be at least '{}')", "error:".red().bold(), "1".yellow())]
    InvalidNThreads,

    #[error("{}", .0)]
    InvalidBootstrap(BootstrapConfigError),

    #[error("{}", .0)]
    InvalidDensity(DensityConfigError),
}

/// Errors that can occur when specifying the bootstrap parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BootstrapConfigError {
    #[error("{} the requested number of bootstrap resamples is zero (must be at least '{}')", "error:".red().bold(), "1".yellow())]
    NoResamples,
}

/// Errors that can occur when specifying the parameters of the density histogram.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DensityConfigError {
    #[error("{} the density histogram must have at least '{}' bins, not '{}'", "error:".red().bold(), "2".yellow(), .0.to_string().yellow())]
    NotEnoughBins(usize),

    #[error("{} the maximal radius of the density histogram must be positive and finite, not '{}'", "error:".red().bold(), .0.to_string().yellow())]
    InvalidMaxRadius(f64),
}

/// Errors that can occur while reading the output files of the sampler.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("{} could not open file '{}'", "error:".red().bold(), path_to_yellow(.0))]
    CouldNotOpenFile(Box<Path>),

    #[error("{} could not read file '{}'", "error:".red().bold(), path_to_yellow(.0))]
    CouldNotReadFile(Box<Path>),

    #[error("{} file '{}' contains only '{}' values, but '{}' values were requested", "error:".red().bold(), path_to_yellow(.0), .1.to_string().yellow(), .2.to_string().yellow())]
    NotEnoughValues(Box<Path>, usize, usize),

    #[error("{} size of file '{}' ('{}' bytes) is not a multiple of '{}' bytes", "error:".red().bold(), path_to_yellow(.0), .1.to_string().yellow(), .2.to_string().yellow())]
    MisalignedFile(Box<Path>, usize, usize),
}

/// Errors that can occur when normalizing the density histogram.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DensityError {
    #[error("{}", .0)]
    InvalidParameters(DensityConfigError),

    #[error("{} density histogram contains a negative count ('{}') in bin '{}'", "error:".red().bold(), .1.to_string().yellow(), .0.to_string().yellow())]
    NegativeCount(usize, i64),

    #[error("{} density histogram is empty and cannot be normalized", "error:".red().bold())]
    ZeroIntegral,
}

/// Errors that can occur while writing the results.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("{} could not create file '{}'", "error:".red().bold(), path_to_yellow(.0))]
    CouldNotCreateFile(Box<Path>),

    #[error("{} could not create a backup for file '{}'", "error:".red().bold(), path_to_yellow(.0))]
    CouldNotBackupFile(Box<Path>),

    #[error("{} could not write results in yaml format into '{}'", "error:".red().bold(), path_to_yellow(.0))]
    CouldNotWriteYaml(Box<Path>),

    #[error("{} could not write results ({})", "error:".red().bold(), .0)]
    CouldNotWriteResults(std::io::Error),
}

/// Errors that can occur while running the analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("{}", .0)]
    Read(#[from] ReadError),

    #[error("{}", .0)]
    Estimator(#[from] EstimatorError),

    #[error("{}", .0)]
    Density(#[from] DensityError),

    #[error("{}", .0)]
    Write(#[from] WriteError),
}
