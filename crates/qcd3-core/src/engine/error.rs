use crate::core::structure::ShapeError;
use thiserror::Error;

/// A failure signalled by a dispersion engine.
///
/// The message is the engine's own and is reported verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("{0}")]
    Structure(String),

    #[error("{0}")]
    Parameters(String),

    #[error("{0}")]
    Evaluation(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispersionError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
