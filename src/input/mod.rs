// Released under MIT License.
// Copyright (c) 2024-2025 Ladislav Bartos

//! This module contains structures and methods for specifying parameters of the analysis.

pub mod analysis;
pub mod bootstrap;
pub mod density;

pub use analysis::{Analysis, AnalysisBuilder};
pub use bootstrap::Bootstrap;
pub use density::Density;
