//! # Engine Module
//!
//! This module defines the contract between the adapter and an external DFT-D3
//! dispersion engine, together with the thin stateful wrappers that drive it.
//!
//! ## Overview
//!
//! The numerical evaluation of the dispersion energy is not performed here. An engine
//! is anything implementing [`DispersionEngine`]: a binding to a native library, a
//! remote service, or a test double. The adapter hands it shape-checked structures
//! and fully described damping-parameter requests and receives raw energies and
//! gradients back.
//!
//! ## Architecture
//!
//! - **Engine Contract** ([`DispersionEngine`]) - Structure construction and update,
//!   damping-parameter construction, evaluation, and identification
//! - **Model** ([`model`]) - A structure bound to an engine, updated transactionally
//! - **Damping Factory** ([`damping`]) - Builds engine damping parameters from a
//!   family, a method name and coefficient overrides
//! - **Configuration** ([`config`]) - Runner settings loaded from TOML
//! - **Error Handling** ([`error`]) - Engine failures and their composition with
//!   shape errors
//!
//! ## Concurrency
//!
//! Nothing in this module holds global state. Whether one engine value may be used
//! from several threads at once is decided by the implementation through the usual
//! `Send`/`Sync` bounds.

pub mod config;
pub mod damping;
pub mod error;
#[cfg(test)]
pub(crate) mod mock;
pub mod model;

use crate::core::damping::level::DampingFamily;
use crate::core::damping::params::{DampingParameterSet, OptionalDefaults};
use crate::core::schema::result::DispersionOutput;
use crate::core::structure::Structure;
use error::EngineError;

/// An external evaluator of DFT-D3 dispersion corrections.
pub trait DispersionEngine {
    /// Engine-side representation of a structure.
    type Structure;
    /// Engine-side representation of a set of damping parameters.
    type Parameters;

    /// Name reported as the creator in result provenance.
    fn name(&self) -> &str;

    /// Version reported in result provenance.
    fn version(&self) -> String;

    /// Fallback values for the optional coefficients of `family`.
    fn default_coefficients(&self, _family: DampingFamily) -> OptionalDefaults {
        OptionalDefaults::default()
    }

    /// Builds the engine's structure.
    ///
    /// # Errors
    ///
    /// Fails when the engine rejects the geometry, e.g. for atoms closer than a
    /// physically plausible distance.
    fn new_structure(&self, structure: &Structure) -> Result<Self::Structure, EngineError>;

    /// Moves an existing engine structure to the positions and lattice of `structure`.
    fn update_structure(
        &self,
        handle: &mut Self::Structure,
        structure: &Structure,
    ) -> Result<(), EngineError>;

    /// Builds damping parameters.
    ///
    /// For [`DampingParameterSet::FromMethod`] the engine resolves the coefficients
    /// from its tables, lets every supplied override replace the tabulated value,
    /// and fails naming the first coefficient it cannot resolve. An `s9` override of
    /// zero selects two-body-only tables where the engine has them.
    fn damping_parameters(
        &self,
        parameters: &DampingParameterSet,
    ) -> Result<Self::Parameters, EngineError>;

    /// Evaluates the dispersion energy, and the gradient if `gradient` is set.
    ///
    /// A returned gradient has one row per atom of the structure.
    fn dispersion(
        &self,
        structure: &Self::Structure,
        parameters: &Self::Parameters,
        gradient: bool,
    ) -> Result<DispersionOutput, EngineError>;
}
