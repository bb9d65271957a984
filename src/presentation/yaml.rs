// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! Structures for serializing the results of the analysis into yaml format.

use serde::{Serialize, Serializer};

use super::{round, AnalysisResults};
use crate::estimators::BlockingLevel;

#[derive(Debug, Serialize)]
pub(super) struct YamlResults {
    energy: YamlEnergy,
    blocking: YamlBlocking,
    #[serde(skip_serializing_if = "Option::is_none")]
    bootstrap: Option<YamlBootstrap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    density: Option<YamlDensity>,
}

#[derive(Debug, Serialize)]
struct YamlEnergy {
    samples: usize,
    #[serde(serialize_with = "round_serialize_f64")]
    mean: f64,
    #[serde(serialize_with = "round_serialize_f64")]
    variance: f64,
    #[serde(serialize_with = "round_serialize_f64")]
    naive_error: f64,
}

#[derive(Debug, Serialize)]
struct YamlBlocking {
    #[serde(serialize_with = "round_serialize_f64")]
    error: f64,
    level: usize,
    converged: bool,
    degenerate: bool,
    levels: Vec<YamlLevel>,
}

#[derive(Debug, Serialize)]
struct YamlLevel {
    samples: usize,
    #[serde(serialize_with = "round_serialize_f64")]
    autocovariance: f64,
    #[serde(serialize_with = "round_serialize_f64")]
    variance: f64,
    #[serde(serialize_with = "round_serialize_f64")]
    statistic: f64,
}

#[derive(Debug, Serialize)]
struct YamlBootstrap {
    resamples: usize,
    #[serde(serialize_with = "round_serialize_f64")]
    mean: f64,
    #[serde(serialize_with = "round_serialize_f64")]
    error: f64,
}

#[derive(Debug, Serialize)]
struct YamlDensity {
    #[serde(serialize_with = "round_serialize_f64")]
    max_radius: f64,
    #[serde(serialize_with = "round_serialize_f64")]
    peak: f64,
    #[serde(serialize_with = "round_serialize_vec_f64")]
    radii: Vec<f64>,
    counts: Vec<i64>,
    #[serde(serialize_with = "round_serialize_vec_f64")]
    density: Vec<f64>,
}

impl From<&BlockingLevel> for YamlLevel {
    fn from(level: &BlockingLevel) -> Self {
        YamlLevel {
            samples: level.n_samples(),
            autocovariance: level.autocovariance(),
            variance: level.variance(),
            statistic: level.statistic(),
        }
    }
}

impl From<&AnalysisResults> for YamlResults {
    fn from(results: &AnalysisResults) -> Self {
        let energy = results.energy();
        let blocking = results.blocking();

        YamlResults {
            energy: YamlEnergy {
                samples: energy.n_samples(),
                mean: energy.mean(),
                variance: energy.variance(),
                naive_error: energy.naive_error(),
            },
            blocking: YamlBlocking {
                error: blocking.standard_error(),
                level: blocking.selected_level(),
                converged: blocking.converged(),
                degenerate: blocking.degenerate(),
                levels: blocking.levels().iter().map(YamlLevel::from).collect(),
            },
            bootstrap: results.bootstrap().as_ref().map(|b| YamlBootstrap {
                resamples: b.n_resamples(),
                mean: b.mean(),
                error: b.standard_error(),
            }),
            density: results.density().as_ref().map(|d| YamlDensity {
                max_radius: d.max_radius(),
                peak: d.peak(),
                radii: d.radii().clone(),
                counts: d.counts().clone(),
                density: d.density().clone(),
            }),
        }
    }
}

#[inline(always)]
fn round_serialize_f64<S>(x: &f64, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_f64(round(*x))
}

fn round_serialize_vec_f64<S>(x: &[f64], s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.collect_seq(x.iter().map(|&v| round(v)))
}
