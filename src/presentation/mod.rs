// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! This module contains structures and methods for presenting the results of the analysis.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use getset::Getters;

use crate::{
    errors::WriteError,
    estimators::{BlockingEstimate, BootstrapSummary},
    input::Analysis,
    sampling::{EnergySummary, RadialDensity},
};

macro_rules! write_result {
    ($dst:expr, $($arg:tt)*) => {
        write!($dst, $($arg)*).map_err(|e| WriteError::CouldNotWriteResults(e))?
    };
}

mod table;
mod yaml;

/// Results of the analysis of a single Monte Carlo run.
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct AnalysisResults {
    /// Basic statistics of the local energies.
    energy: EnergySummary,
    /// Blocking estimate of the standard error of the mean energy.
    blocking: BlockingEstimate,
    /// Bootstrap estimate of the standard error of the mean energy.
    /// Only available if requested.
    bootstrap: Option<BootstrapSummary>,
    /// Normalized radial density. Only available if requested.
    density: Option<RadialDensity>,
    /// Parameters of the analysis.
    analysis: Analysis,
}

impl AnalysisResults {
    pub(crate) fn new(
        energy: EnergySummary,
        blocking: BlockingEstimate,
        bootstrap: Option<BootstrapSummary>,
        density: Option<RadialDensity>,
        analysis: Analysis,
    ) -> Self {
        AnalysisResults {
            energy,
            blocking,
            bootstrap,
            density,
            analysis,
        }
    }

    /// Best estimate of the standard error of the mean energy.
    #[inline(always)]
    pub fn error(&self) -> f64 {
        self.blocking.standard_error()
    }

    /// Log the most important results.
    pub(crate) fn info(&self) {
        log::info!(
            "Mean energy: {:.8} ± {:.8} (blocking, level {} of {}).",
            self.energy.mean(),
            self.blocking.standard_error(),
            self.blocking.selected_level(),
            self.blocking.n_levels(),
        );
        log::info!(
            "Variance of the local energy: {:.8}. Naive error of the mean: {:.8}.",
            self.energy.variance(),
            self.energy.naive_error()
        );

        if let Some(bootstrap) = &self.bootstrap {
            log::info!(
                "Bootstrap error of the mean: {:.8} ({} resamples).",
                bootstrap.standard_error(),
                bootstrap.n_resamples()
            );
        }

        if let Some(density) = &self.density {
            log::info!("One-body density peaks at radius {:.4}.", density.peak());
        }
    }

    /// Write all the requested output files.
    pub fn write(&self) -> Result<(), WriteError> {
        log::info!("Writing the results into a yaml file '{}'...", self.analysis.output_yaml());
        self.write_yaml(self.analysis.output_yaml(), self.analysis.overwrite())?;

        if let Some(tab) = self.analysis.output_tab() {
            log::info!("Writing the results into a table file '{}'...", tab);
            self.write_tab(tab, self.analysis.overwrite())?;
        }

        Ok(())
    }

    /// Write the results of the analysis into a yaml file.
    pub fn write_yaml(&self, filename: impl AsRef<Path>, overwrite: bool) -> Result<(), WriteError> {
        let writer = prepare_file(&filename, self.analysis.energies(), "yaml", overwrite)?;

        serde_yaml::to_writer(writer, &yaml::YamlResults::from(self))
            .map_err(|_| WriteError::CouldNotWriteYaml(Box::from(filename.as_ref())))?;

        Ok(())
    }

    /// Write the results of the analysis into a human-readable table.
    pub fn write_tab(&self, filename: impl AsRef<Path>, overwrite: bool) -> Result<(), WriteError> {
        let mut writer = prepare_file(&filename, self.analysis.energies(), "tab", overwrite)?;
        table::write_table(self, &mut writer)?;
        writer
            .flush()
            .map_err(|e| WriteError::CouldNotWriteResults(e))?;

        Ok(())
    }
}

/// Back up a file, create a new one and write a header into it.
fn prepare_file(
    filename: &impl AsRef<Path>,
    input_energies: &str,
    file_type: &str,
    overwrite: bool,
) -> Result<BufWriter<File>, WriteError> {
    try_backup_file(filename, overwrite, file_type)?;
    let mut writer = create_and_open_file(filename)?;
    write_header(&mut writer, filename, input_energies)?;

    Ok(writer)
}

/// Write header into an output file.
fn write_header(
    writer: &mut BufWriter<File>,
    filename: &impl AsRef<Path>,
    input_energies: &str,
) -> Result<(), WriteError> {
    writeln!(
        writer,
        "# Results calculated with 'vmcstat v{}' using energy file '{}'.",
        crate::VMCSTAT_VERSION,
        input_energies
    )
    .map_err(|_| WriteError::CouldNotCreateFile(Box::from(filename.as_ref())))
}

/// Create and open file for buffered writing.
fn create_and_open_file(filename: &impl AsRef<Path>) -> Result<BufWriter<File>, WriteError> {
    let file = File::create(filename.as_ref())
        .map_err(|_| WriteError::CouldNotCreateFile(Box::from(filename.as_ref())))?;

    Ok(BufWriter::new(file))
}

/// Back up an output file, if it is necessary and if it is requested.
fn try_backup_file(
    filename: &impl AsRef<Path>,
    overwrite: bool,
    file_type: &str,
) -> Result<(), WriteError> {
    if filename.as_ref().exists() {
        if !overwrite {
            log::warn!(
                "Output {} file '{}' already exists. Backing it up.",
                file_type,
                filename.as_ref().display()
            );
            backitup::backup(filename.as_ref())
                .map_err(|_| WriteError::CouldNotBackupFile(Box::from(filename.as_ref())))?;
        } else {
            log::warn!(
                "Output {} file '{}' already exists. It will be overwritten as requested.",
                file_type,
                filename.as_ref().display()
            );
        }
    }

    Ok(())
}

/// Round a value to 8 decimal places for output.
#[inline(always)]
pub(crate) fn round(x: f64) -> f64 {
    (x * 1e8).round() / 1e8
}
