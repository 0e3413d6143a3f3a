use phf::{Map, phf_map};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The four damping-function families understood by a D3 dispersion engine.
///
/// Each family is addressed by a short level moniker (`d3bj`, `d3zero`, `d3bjm`,
/// `d3zerom`), which is also the suffix conventionally appended to method names
/// such as `"TPSS-D3(BJ)"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum DampingFamily {
    /// Rational (Becke-Johnson) damping, `d3bj`.
    #[default]
    Rational,
    /// Zero (Chai-Head-Gordon) damping, `d3zero`.
    Zero,
    /// Modified rational damping, `d3bjm`.
    ModifiedRational,
    /// Modified zero damping, `d3zerom`.
    ModifiedZero,
}

static LEVELS: Map<&'static str, DampingFamily> = phf_map! {
    "d3bj" => DampingFamily::Rational,
    "d3zero" => DampingFamily::Zero,
    "d3bjm" => DampingFamily::ModifiedRational,
    "d3zerom" => DampingFamily::ModifiedZero,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LevelError {
    #[error("Level '{0}' is invalid for this dispersion correction")]
    Invalid(String),
}

impl DampingFamily {
    pub const ALL: [DampingFamily; 4] = [
        DampingFamily::Rational,
        DampingFamily::Zero,
        DampingFamily::ModifiedRational,
        DampingFamily::ModifiedZero,
    ];

    /// The lowercase level moniker used in keyword hints and method suffixes.
    pub fn moniker(self) -> &'static str {
        match self {
            DampingFamily::Rational => "d3bj",
            DampingFamily::Zero => "d3zero",
            DampingFamily::ModifiedRational => "d3bjm",
            DampingFamily::ModifiedZero => "d3zerom",
        }
    }
}

impl fmt::Display for DampingFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.moniker())
    }
}

impl FromStr for DampingFamily {
    type Err = LevelError;

    /// Parses a level moniker, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LEVELS
            .get(s.to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| LevelError::Invalid(s.to_string()))
    }
}

impl TryFrom<String> for DampingFamily {
    type Error = LevelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DampingFamily> for &'static str {
    fn from(family: DampingFamily) -> Self {
        family.moniker()
    }
}

/// Resolves an optional level hint to a damping family.
///
/// An absent hint selects `default`. A present hint must name one of the four
/// known levels; anything else is rejected with the offending string preserved.
pub fn resolve_level(
    hint: Option<&str>,
    default: DampingFamily,
) -> Result<DampingFamily, LevelError> {
    match hint {
        Some(level) => level.parse(),
        None => Ok(default),
    }
}
