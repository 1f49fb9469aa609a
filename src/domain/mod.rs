//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw inputs (`InflationObservation`, `NominalSeries`)
//! - the cumulative price index (`PriceIndex`)
//! - derived outputs (`RealSeries`, `TableFile`)
//! - run configuration (`RunConfig`, `DisplayMode`)

pub mod types;

pub use types::*;
