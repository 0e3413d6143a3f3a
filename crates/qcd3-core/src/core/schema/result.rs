use super::input::{AtomicInput, Driver, Keywords, Model, Molecule};
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Classification of a failure recorded in an [`AtomicResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The level hint names no known damping family.
    InvalidLevel,
    /// The computation ran but the driver cannot be answered by a dispersion correction.
    InvalidDriver,
    /// The damping parameters could not be built.
    ParameterConstructionFailed,
    /// The engine refused the structure or failed during evaluation.
    EngineFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeError {
    pub error_type: ErrorKind,
    pub error_message: String,
}

impl ComputeError {
    pub fn new(error_type: ErrorKind, error_message: impl Into<String>) -> Self {
        Self {
            error_type,
            error_message: error_message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub creator: String,
    pub version: String,
    pub routine: String,
}

/// Raw output of one dispersion evaluation, over real atoms only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispersionOutput {
    pub energy: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<Vec<Vector3<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virial: Option<Matrix3<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReturnResult {
    Energy(f64),
    Gradient(Vec<Vector3<f64>>),
}

impl ReturnResult {
    pub fn as_energy(&self) -> Option<f64> {
        match self {
            ReturnResult::Energy(energy) => Some(*energy),
            ReturnResult::Gradient(_) => None,
        }
    }

    pub fn as_gradient(&self) -> Option<&[Vector3<f64>]> {
        match self {
            ReturnResult::Gradient(gradient) => Some(gradient),
            ReturnResult::Energy(_) => None,
        }
    }
}

impl Default for ReturnResult {
    fn default() -> Self {
        ReturnResult::Energy(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_energy: Option<f64>,
}

impl Properties {
    pub fn is_empty(&self) -> bool {
        self.return_energy.is_none()
    }
}

/// Key under which the raw engine output is stored in the result extras.
pub const DISPERSION_EXTRAS_KEY: &str = "dftd3";

/// Free-form extras carried over from the input plus the raw engine output.
///
/// An input entry under [`DISPERSION_EXTRAS_KEY`] is dropped once engine output
/// is stored, so the key is never serialized twice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultExtras {
    #[serde(rename = "dftd3", default, skip_serializing_if = "Option::is_none")]
    pub dispersion: Option<DispersionOutput>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomicResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub molecule: Molecule,
    pub driver: Driver,
    pub model: Model,
    pub keywords: Keywords,
    pub provenance: Provenance,
    pub success: bool,
    pub return_result: ReturnResult,
    pub properties: Properties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ComputeError>,
    #[serde(default)]
    pub extras: ResultExtras,
}

impl AtomicResult {
    /// A failed result mirroring `input`: no properties and a zero placeholder.
    pub fn unsuccessful(input: &AtomicInput, provenance: Provenance) -> Self {
        Self {
            id: input.id.clone(),
            molecule: input.molecule.clone(),
            driver: input.driver,
            model: input.model.clone(),
            keywords: input.keywords.clone(),
            provenance,
            success: false,
            return_result: ReturnResult::default(),
            properties: Properties::default(),
            error: None,
            extras: ResultExtras {
                dispersion: None,
                other: input.extras.clone(),
            },
        }
    }
}
