// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! This module contains the implementation of the `vmcstat` binary.

use clap::Parser;
use colored::Colorize;
use vmcstat::{errors::ApplicationError, Analysis, VMCSTAT_VERSION};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Estimate the statistical error of the mean energy from a correlated Monte Carlo run."
)]
pub struct Args {
    #[arg(
        help = "Config yaml file",
        long_help = "Configuration yaml file specifying the analysis settings."
    )]
    pub config: String,

    #[arg(
        short = 's',
        long = "silent",
        help = "Print nothing to the standard output",
        default_value_t = false
    )]
    pub silent: bool,

    #[arg(
        long = "overwrite",
        help = "Do not back up existing output files",
        default_value_t = false
    )]
    pub overwrite: bool,
}

pub(crate) fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let mut analysis = match Analysis::from_file(&args.config) {
        Ok(x) => x,
        Err(e) => {
            init_logging(true);
            log::error!("{}", e);
            return Err(Box::new(ApplicationError::CouldNotReadConfig(args.config)));
        }
    };

    if args.silent {
        analysis.set_silent(true);
    }
    if args.overwrite {
        analysis.set_overwrite(true);
    }

    init_logging(analysis.silent());
    if !analysis.silent() {
        let header = format!(">>> VMCSTAT v{} <<<", VMCSTAT_VERSION).bold();
        println!("\n{}\n", header);
        log::info!("Read config file '{}'.", args.config);
    }

    let result = analysis.run();

    if !analysis.silent() {
        match &result {
            Ok(_) => {
                let prefix = format!(
                    "{}{}{}",
                    "[".to_string().blue().bold(),
                    "✔".to_string().bright_green().bold(),
                    "]".to_string().blue().bold()
                );
                let message = "ANALYSIS COMPLETED".to_string().bright_green().bold();
                println!("{} {}", prefix, message);
            }
            Err(e) => {
                log::error!("{}", e);

                let prefix = format!(
                    "{}{}{}",
                    "[".to_string().blue().bold(),
                    "✖".to_string().red().bold(),
                    "]".to_string().blue().bold()
                );
                let message = "ANALYSIS FAILED".to_string().red().bold();
                println!("{} {}", prefix, message);
            }
        }
    } else if let Err(e) = &result {
        log::error!("{}", e);
    }

    result.map(|_| ()).map_err(|e| e.into())
}

/// Errors are always reported. Everything else only if not silent.
fn init_logging(silent: bool) {
    if silent {
        colog::basic_builder()
            .filter(None, log::LevelFilter::Error)
            .init();
    } else {
        colog::init();
    }
}
