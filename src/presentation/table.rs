// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Writing the results of the analysis in a human-readable table format.

use std::io::Write;

use super::AnalysisResults;
use crate::errors::WriteError;

/// Write all results into a table.
pub(super) fn write_table(
    results: &AnalysisResults,
    writer: &mut impl Write,
) -> Result<(), WriteError> {
    let energy = results.energy();
    write_result!(writer, "\nENERGY\n");
    write_result!(writer, "samples         {:>16}\n", energy.n_samples());
    write_result!(writer, "mean            {:>16.8}\n", energy.mean());
    write_result!(writer, "variance        {:>16.8}\n", energy.variance());
    write_result!(writer, "naive error     {:>16.8}\n", energy.naive_error());

    write_blocking(results, writer)?;

    if let Some(bootstrap) = results.bootstrap() {
        write_result!(writer, "\nBOOTSTRAP\n");
        write_result!(writer, "resamples       {:>16}\n", bootstrap.n_resamples());
        write_result!(writer, "mean            {:>16.8}\n", bootstrap.mean());
        write_result!(writer, "error           {:>16.8}\n", bootstrap.standard_error());
    }

    if let Some(density) = results.density() {
        write_result!(writer, "\nDENSITY\n");
        write_result!(writer, "        RADIUS         COUNT       DENSITY\n");
        for ((r, c), d) in density
            .radii()
            .iter()
            .zip(density.counts().iter())
            .zip(density.density().iter())
        {
            write_result!(writer, "{:>14.6}{:>14}{:>14.8}\n", r, c, d);
        }
    }

    Ok(())
}

/// Write the blocking estimate together with the values from the individual levels.
fn write_blocking(results: &AnalysisResults, writer: &mut impl Write) -> Result<(), WriteError> {
    let blocking = results.blocking();
    write_result!(writer, "\nBLOCKING\n");
    write_result!(writer, "error           {:>16.8}\n", blocking.standard_error());

    if blocking.degenerate() {
        write_result!(writer, "all samples are identical\n");
        return Ok(());
    }

    write_result!(writer, "selected level  {:>16}\n", blocking.selected_level());
    if !blocking.converged() {
        write_result!(writer, "WARNING: blocking did not converge, use more data\n");
    }

    write_result!(
        writer,
        "LEVEL   SAMPLES    AUTOCOVARIANCE          VARIANCE         STATISTIC\n"
    );
    for level in blocking.levels() {
        let marker = if level.level() == blocking.selected_level() {
            "*"
        } else {
            " "
        };
        write_result!(
            writer,
            "{:>4}{} {:>9} {:>17.8e} {:>17.8e} {:>17.6}\n",
            level.level(),
            marker,
            level.n_samples(),
            level.autocovariance(),
            level.variance(),
            level.statistic()
        );
    }

    Ok(())
}
