use crate::core::damping::params::CoefficientOverrides;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

/// The kind of quantity a computation is asked to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    Energy,
    Gradient,
    Hessian,
    Properties,
}

impl Driver {
    pub fn as_str(self) -> &'static str {
        match self {
            Driver::Energy => "energy",
            Driver::Gradient => "gradient",
            Driver::Hessian => "hessian",
            Driver::Properties => "properties",
        }
    }

    /// Whether a dispersion correction can produce this driver's return value.
    pub fn is_supported(self) -> bool {
        matches!(self, Driver::Energy | Driver::Gradient)
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Molecule {
    pub atomic_numbers: Vec<u8>,
    /// Flat cartesian coordinates in Bohr, three per atom.
    pub geometry: Vec<f64>,
    /// `false` marks a ghost atom. Absent means every atom is real.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real: Option<Vec<bool>>,
}

impl Molecule {
    pub fn atom_count(&self) -> usize {
        self.atomic_numbers.len()
    }

    pub fn real_mask(&self) -> Cow<'_, [bool]> {
        match &self.real {
            Some(mask) => Cow::Borrowed(mask),
            None => Cow::Owned(vec![true; self.atom_count()]),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basis: Option<String>,
}

/// Program-specific keywords. Keys other than these two are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keywords {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params_tweaks: Option<CoefficientOverrides>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomicInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub molecule: Molecule,
    pub driver: Driver,
    pub model: Model,
    #[serde(default)]
    pub keywords: Keywords,
    #[serde(default)]
    pub extras: Map<String, Value>,
}
