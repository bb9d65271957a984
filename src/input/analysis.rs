// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Contains the implementation of the main `Analysis` structure and its methods.

use std::fs::read_to_string;
use std::path::Path;

use derive_builder::Builder;
use getset::{CopyGetters, Getters, Setters};
use serde::Deserialize;

use crate::errors::ConfigError;

use super::Bootstrap;
use super::Density;

/// Structure holding all the information necessary to perform the specified analysis.
#[derive(Debug, Clone, Builder, Getters, CopyGetters, Setters, Deserialize)]
#[serde(deny_unknown_fields)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct Analysis {
    /// Path to the binary file containing local energies written by the sampler.
    #[builder(setter(into))]
    #[getset(get = "pub")]
    #[serde(alias = "energy")]
    energies: String,
    /// Number of energy samples to read from the start of the file.
    /// If not specified, all samples are read.
    #[builder(setter(strip_option), default)]
    #[getset(get_copy = "pub")]
    #[serde(default, alias = "n_mc")]
    n_samples: Option<usize>,
    /// Parameters of the radial density histogram to normalize.
    /// If not specified, no density is processed.
    #[builder(setter(strip_option), default)]
    #[getset(get = "pub")]
    #[serde(default)]
    density: Option<Density>,
    /// Parameters of the bootstrap estimate of the error.
    /// If not specified, only the blocking estimate is calculated.
    #[builder(setter(strip_option), default)]
    #[getset(get = "pub")]
    #[serde(default)]
    bootstrap: Option<Bootstrap>,
    /// Path to an output YAML file where the results of the analysis will be written.
    #[builder(setter(into))]
    #[getset(get = "pub")]
    #[serde(alias = "output")]
    output_yaml: String,
    /// Path to an output TABLE file where the results of the analysis will be written in a human readable format.
    #[builder(setter(into, strip_option), default)]
    #[getset(get = "pub")]
    #[serde(default)]
    output_tab: Option<String>,
    /// Number of threads to use for the bootstrap.
    /// If not specified, the default value is 1. Must be at least 1.
    #[builder(default = "1")]
    #[serde(default = "default_one")]
    #[getset(get_copy = "pub")]
    n_threads: usize,
    /// Be silent. Print nothing to the standard output during the analysis.
    #[builder(setter(custom), default = "false")]
    #[serde(default = "default_false")]
    #[getset(get_copy = "pub", set = "pub")]
    silent: bool,
    /// Do not make backups. Overwrite all output files.
    #[builder(setter(custom), default = "false")]
    #[serde(default = "default_false")]
    #[getset(get_copy = "pub", set = "pub")]
    overwrite: bool,
}

fn default_one() -> usize {
    1
}

fn default_false() -> bool {
    false
}

fn validate_n_samples(n_samples: Option<usize>) -> Result<(), ConfigError> {
    match n_samples {
        Some(n) if n < 2 => Err(ConfigError::InvalidNSamples(n)),
        _ => Ok(()),
    }
}

fn validate_n_threads(n_threads: usize) -> Result<(), ConfigError> {
    if n_threads == 0 {
        Err(ConfigError::InvalidNThreads)
    } else {
        Ok(())
    }
}

impl Analysis {
    pub fn new() -> AnalysisBuilder {
        AnalysisBuilder::default()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Analysis, ConfigError> {
        let string = read_to_string(&path).map_err(|_| {
            ConfigError::CouldNotOpenConfig(path.as_ref().to_string_lossy().into_owned())
        })?;
        let analysis: Analysis = serde_yaml::from_str(&string).map_err(|e| {
            ConfigError::CouldNotParseConfig(path.as_ref().to_string_lossy().into_owned(), e)
        })?;

        analysis.validate()?;
        Ok(analysis)
    }

    /// Check that the Analysis structure is valid. Used after deserialization from config yaml file.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_n_samples(self.n_samples)?;
        validate_n_threads(self.n_threads)?;

        if let Some(ref bootstrap) = self.bootstrap {
            bootstrap.validate().map_err(ConfigError::InvalidBootstrap)?;
        }

        if let Some(ref density) = self.density {
            density.validate().map_err(ConfigError::InvalidDensity)?;
        }

        Ok(())
    }

    /// Alias for `output_yaml`.
    #[inline(always)]
    pub fn output(&self) -> &String {
        &self.output_yaml
    }

    /// Log basic info about the analysis.
    pub(crate) fn info(&self) {
        log::info!("Will analyze local energies from '{}'.", self.energies);
        match self.n_samples {
            Some(n) => log::info!("Will read the first {} energy samples.", n),
            None => log::info!("Will read all energy samples."),
        }

        if let Some(bootstrap) = &self.bootstrap {
            bootstrap.info();
        }

        if let Some(density) = &self.density {
            density.info();
        }

        if self.n_threads > 1 {
            log::info!("Will use {} threads for resampling.", self.n_threads);
        }
    }
}

impl AnalysisBuilder {
    /// Be silent. Print nothing to the standard output during the analysis.
    #[inline(always)]
    pub fn silent(&mut self) -> &mut Self {
        self.silent = Some(true);
        self
    }

    /// Do not make backups. Overwrite all output files.
    #[inline(always)]
    pub fn overwrite(&mut self) -> &mut Self {
        self.overwrite = Some(true);
        self
    }

    /// Alias for `output_yaml`.
    #[inline(always)]
    pub fn output(&mut self, value: &str) -> &mut Self {
        self.output_yaml(value)
    }

    /// Validate the process of analysis building.
    fn validate(&self) -> Result<(), String> {
        if let Some(n_samples) = self.n_samples {
            validate_n_samples(n_samples).map_err(|e| e.to_string())?;
        }

        if let Some(n_threads) = self.n_threads {
            validate_n_threads(n_threads).map_err(|e| e.to_string())?;
        }

        if let Some(Some(bootstrap)) = &self.bootstrap {
            bootstrap.validate().map_err(|e| e.to_string())?;
        }

        if let Some(Some(density)) = &self.density {
            density.validate().map_err(|e| e.to_string())?;
        }

        Ok(())
    }
}
