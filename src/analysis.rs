// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! This module contains the implementation of the analysis logic.

use crate::errors::AnalysisError;
use crate::estimators::{blocking, mean, summarize};
use crate::presentation::AnalysisResults;
use crate::sampling::{read_density, read_energies, EnergySummary, RadialDensity};
use crate::{Analysis, PANIC_MESSAGE};

impl Analysis {
    /// Perform the analysis and write out the results.
    pub fn run(&self) -> Result<AnalysisResults, AnalysisError> {
        let results = self.analyze()?;
        results.write()?;
        Ok(results)
    }

    /// Perform the analysis without writing any output files.
    pub fn analyze(&self) -> Result<AnalysisResults, AnalysisError> {
        self.info();

        let energies = read_energies(self.energies(), self.n_samples())?;
        let blocking = blocking(&energies)?;
        let energy = EnergySummary::new(&energies).expect(PANIC_MESSAGE);

        let bootstrap = match self.bootstrap() {
            Some(params) => {
                let values = params.estimator(self.n_threads()).run(&energies, mean)?;
                summarize(&values)
            }
            None => None,
        };

        let density = match self.density() {
            Some(params) => {
                let counts = read_density(params.file(), params.n_bins())?;
                Some(RadialDensity::new(counts, params.max_radius())?)
            }
            None => None,
        };

        let results = AnalysisResults::new(energy, blocking, bootstrap, density, self.clone());
        results.info();

        Ok(results)
    }
}
