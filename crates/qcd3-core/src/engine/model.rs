use super::DispersionEngine;
use super::error::{DispersionError, EngineError};
use crate::core::schema::result::DispersionOutput;
use crate::core::structure::Structure;
use tracing::trace;

/// A structure registered with an engine.
///
/// Keeps the adapter-side [`Structure`] and the engine handle in step: an update
/// that fails either the shape checks or the engine leaves both unchanged.
pub struct DispersionModel<'e, E: DispersionEngine> {
    engine: &'e E,
    structure: Structure,
    handle: E::Structure,
}

impl<'e, E: DispersionEngine> DispersionModel<'e, E> {
    pub fn new(engine: &'e E, structure: Structure) -> Result<Self, EngineError> {
        let handle = engine.new_structure(&structure)?;
        trace!(atoms = structure.len(), "Engine structure created.");
        Ok(Self {
            engine,
            structure,
            handle,
        })
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn update(
        &mut self,
        positions: &[f64],
        lattice: Option<&[f64]>,
    ) -> Result<(), DispersionError> {
        let mut updated = self.structure.clone();
        updated.update(positions, lattice)?;
        self.engine.update_structure(&mut self.handle, &updated)?;
        self.structure = updated;
        Ok(())
    }

    pub fn dispersion(
        &self,
        parameters: &E::Parameters,
        gradient: bool,
    ) -> Result<DispersionOutput, EngineError> {
        self.engine.dispersion(&self.handle, parameters, gradient)
    }
}
