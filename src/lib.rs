// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! # vmcstat: Statistical post-processing of variational Monte Carlo runs
//!
//! Crate for estimating the statistical error of the mean energy obtained from
//! a correlated Markov-chain Monte Carlo simulation. The error is estimated using
//! the automated blocking method and, optionally, the bootstrap. `vmcstat` can also
//! normalize the radial one-body density histogram collected during the same run.
//!
//! ## Usage
//!
//! Run:
//!
//! ```bash
//! $ cargo add vmcstat
//! ```
//!
//! Import the crate in your Rust code:
//!
//! ```rust
//! use vmcstat::prelude::*;
//! ```
//!
//! `vmcstat` is also available as a command line tool. You can install it using:
//! ```bash
//! $ cargo install vmcstat
//! ```
//!
//! ## Examples
//!
//! Blocking estimate of the error of the mean energy stored in a binary file.
//! ```no_run
//! use vmcstat::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     // construct the analysis
//!     let analysis = Analysis::new()
//!             .energies("energies.bin")                  // binary file with local energies
//!             .output("results.yaml")                    // output yaml file
//!             .build()?;                                 // constructing the analysis
//!
//!     // activate colog if you want logging (requires the `colog` crate)
//!     colog::init();
//!
//!     // run the analysis and write the output
//!     analysis.run()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ***
//!
//! The `Analysis` structure has several other, optional fields.
//!
//! ```no_run
//! use vmcstat::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     // construct the analysis
//!     let analysis = Analysis::new()
//!             .energies("energies.bin")                  // binary file with local energies
//!             .n_samples(1 << 20)                        // number of samples to read
//!             .output_yaml("results.yaml")               // output yaml file
//!             .output_tab("results.tab")                 // output table file
//!             .bootstrap(Bootstrap::new(                 // also estimate the error using bootstrap
//!                 Some(2000),                            // number of resamples
//!                 Some(42),                              // seed of the random number generator
//!             )?)
//!             .density(Density::new(                     // normalize the radial density histogram
//!                 "density.bin",                         // binary file with the histogram counts
//!                 Some(500),                             // number of bins
//!                 Some(5.0),                             // maximal radius covered by the histogram
//!             )?)
//!             .n_threads(4)                              // number of threads to use for resampling
//!             .build()?;                                 // constructing the analysis
//!
//!     // activate colog if you want logging (requires the `colog` crate)
//!     colog::init();
//!
//!     // run the analysis and write the output
//!     let results = analysis.run()?;
//!     println!("E = {} ± {}", results.energy().mean(), results.error());
//!
//!     Ok(())
//! }
//! ```
//!
//! ***
//!
//! The estimators can also be used directly on samples held in memory.
//!
//! ```no_run
//! use vmcstat::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let energies = read_energies("energies.bin", None)?;
//!
//!     let estimate = blocking(&energies)?;
//!     if !estimate.converged() {
//!         eprintln!("Blocking did not converge. Collect more samples.");
//!     }
//!
//!     let means = BootstrapEstimator::new(1000)
//!         .with_seed(7)
//!         .with_threads(4)
//!         .run(&energies, |s| s.iter().sum::<f64>() / s.len() as f64)?;
//!     let summary = summarize(&means).unwrap();
//!
//!     println!("blocking: {}, bootstrap: {}", estimate.standard_error(), summary.standard_error());
//!
//!     Ok(())
//! }
//! ```

/// Version of the `vmcstat` crate.
pub const VMCSTAT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Message that should be added to every panic.
pub(crate) const PANIC_MESSAGE: &str =
    "\n\n\n            >>> THIS SHOULD NOT HAVE HAPPENED! PLEASE REPORT THIS ERROR <<<
(open an issue at 'github.com/Ladme/vmcstat/issues' or write an e-mail to 'ladmeb@gmail.com')\n\n";

mod analysis;
pub mod errors;
pub mod estimators;
pub mod input;
pub mod presentation;
pub mod sampling;

pub use input::Analysis;

/// This module contains re-exported public structures of the `vmcstat` crate.
pub mod prelude {
    pub use super::input::{analysis::AnalysisBuilder, Analysis, Bootstrap, Density};

    pub use super::estimators::{
        blocking, blocking_transform, bootstrap, summarize, BlockingEstimate, BlockingLevel,
        BootstrapEstimator, BootstrapSummary,
    };

    pub use super::sampling::{read_density, read_energies, EnergySummary, RadialDensity};

    pub use super::presentation::AnalysisResults;
}
