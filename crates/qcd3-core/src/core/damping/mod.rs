//! # Damping Module
//!
//! Resolution of the damping function that governs a D3 dispersion correction.
//!
//! - [`level`] - The closed set of damping families and level-hint resolution
//! - [`method`] - Removal of level markers embedded in method names
//! - [`params`] - Coefficient overrides and construction of the parameter set
//!   handed to the engine

pub mod level;
pub mod method;
pub mod params;
