use super::level::DampingFamily;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A named damping coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Coefficient {
    S6,
    S8,
    S9,
    A1,
    A2,
    Alp,
    Rs6,
    Rs8,
    Bet,
}

impl Coefficient {
    pub const ALL: [Coefficient; 9] = [
        Coefficient::S6,
        Coefficient::S8,
        Coefficient::S9,
        Coefficient::A1,
        Coefficient::A2,
        Coefficient::Alp,
        Coefficient::Rs6,
        Coefficient::Rs8,
        Coefficient::Bet,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Coefficient::S6 => "s6",
            Coefficient::S8 => "s8",
            Coefficient::S9 => "s9",
            Coefficient::A1 => "a1",
            Coefficient::A2 => "a2",
            Coefficient::Alp => "alp",
            Coefficient::Rs6 => "rs6",
            Coefficient::Rs8 => "rs8",
            Coefficient::Bet => "bet",
        }
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl DampingFamily {
    /// Coefficients that must be supplied explicitly when no method is given,
    /// in the order they are checked.
    pub fn required_coefficients(self) -> &'static [Coefficient] {
        match self {
            DampingFamily::Rational | DampingFamily::ModifiedRational => {
                &[Coefficient::S8, Coefficient::A1, Coefficient::A2]
            }
            DampingFamily::Zero => &[Coefficient::S8, Coefficient::Rs6],
            DampingFamily::ModifiedZero => &[Coefficient::S8, Coefficient::Rs6, Coefficient::Bet],
        }
    }

    /// Coefficients that fall back to engine defaults when not supplied.
    pub fn optional_coefficients(self) -> &'static [Coefficient] {
        match self {
            DampingFamily::Rational | DampingFamily::ModifiedRational => {
                &[Coefficient::S6, Coefficient::S9, Coefficient::Alp]
            }
            DampingFamily::Zero | DampingFamily::ModifiedZero => &[
                Coefficient::S6,
                Coefficient::S9,
                Coefficient::Rs8,
                Coefficient::Alp,
            ],
        }
    }

    pub fn accepts(self, coefficient: Coefficient) -> bool {
        self.required_coefficients().contains(&coefficient)
            || self.optional_coefficients().contains(&coefficient)
    }
}

/// Explicit coefficient values from the `params_tweaks` keyword.
///
/// Every field is optional. Which fields are meaningful depends on the damping
/// family selected by the level hint; see [`DampingFamily::accepts`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoefficientOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s6: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s8: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s9: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rs6: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rs8: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bet: Option<f64>,
}

impl CoefficientOverrides {
    pub fn get(&self, coefficient: Coefficient) -> Option<f64> {
        match coefficient {
            Coefficient::S6 => self.s6,
            Coefficient::S8 => self.s8,
            Coefficient::S9 => self.s9,
            Coefficient::A1 => self.a1,
            Coefficient::A2 => self.a2,
            Coefficient::Alp => self.alp,
            Coefficient::Rs6 => self.rs6,
            Coefficient::Rs8 => self.rs8,
            Coefficient::Bet => self.bet,
        }
    }

    pub fn supplied(&self) -> impl Iterator<Item = Coefficient> + '_ {
        Coefficient::ALL
            .into_iter()
            .filter(move |&coefficient| self.get(coefficient).is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.supplied().next().is_none()
    }
}

/// Engine-supplied fallbacks for the optional coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionalDefaults {
    pub s6: f64,
    pub s9: f64,
    pub rs8: f64,
    pub alp: f64,
}

impl Default for OptionalDefaults {
    fn default() -> Self {
        Self {
            s6: 1.0,
            s9: 1.0,
            rs8: 1.0,
            alp: 14.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RationalDamping {
    pub s6: f64,
    pub s8: f64,
    pub s9: f64,
    pub a1: f64,
    pub a2: f64,
    pub alp: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZeroDamping {
    pub s6: f64,
    pub s8: f64,
    pub s9: f64,
    pub rs6: f64,
    pub rs8: f64,
    pub alp: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModifiedZeroDamping {
    pub s6: f64,
    pub s8: f64,
    pub s9: f64,
    pub rs6: f64,
    pub rs8: f64,
    pub alp: f64,
    pub bet: f64,
}

/// Fully resolved coefficients for one damping family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum DampingParameters {
    Rational(RationalDamping),
    Zero(ZeroDamping),
    ModifiedRational(RationalDamping),
    ModifiedZero(ModifiedZeroDamping),
}

impl DampingParameters {
    pub fn family(&self) -> DampingFamily {
        match self {
            DampingParameters::Rational(_) => DampingFamily::Rational,
            DampingParameters::Zero(_) => DampingFamily::Zero,
            DampingParameters::ModifiedRational(_) => DampingFamily::ModifiedRational,
            DampingParameters::ModifiedZero(_) => DampingFamily::ModifiedZero,
        }
    }
}

/// What the engine is asked to build its damping parameters from.
///
/// With a method, the engine looks the coefficients up in its tables and any
/// supplied override replaces the tabulated value. No consistency check is made
/// between the two: an override that contradicts the method is taken as is, and
/// the resulting parameter combination is whatever the caller asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum DampingParameterSet {
    FromMethod {
        family: DampingFamily,
        method: String,
        overrides: CoefficientOverrides,
    },
    Explicit(DampingParameters),
}

impl DampingParameterSet {
    pub fn family(&self) -> DampingFamily {
        match self {
            DampingParameterSet::FromMethod { family, .. } => *family,
            DampingParameterSet::Explicit(params) => params.family(),
        }
    }

    pub fn method(&self) -> Option<&str> {
        match self {
            DampingParameterSet::FromMethod { method, .. } => Some(method),
            DampingParameterSet::Explicit(_) => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("Missing '{coefficient}' for {family} damping parameters")]
    MissingCoefficient {
        family: DampingFamily,
        coefficient: Coefficient,
    },
    #[error("Coefficient '{coefficient}' is not accepted by {family} damping parameters")]
    UnexpectedCoefficient {
        family: DampingFamily,
        coefficient: Coefficient,
    },
    #[error("{0}")]
    Engine(String),
}

/// Builds the parameter set handed to the engine.
///
/// Overrides naming a coefficient the family does not use are rejected. Without a
/// method, every required coefficient must be present in `overrides`; the first
/// missing one in the family's fixed order is reported. Optional coefficients
/// default to `defaults`.
pub fn build_parameter_set(
    family: DampingFamily,
    method: Option<String>,
    overrides: &CoefficientOverrides,
    defaults: &OptionalDefaults,
) -> Result<DampingParameterSet, ParameterError> {
    if let Some(coefficient) = overrides.supplied().find(|&c| !family.accepts(c)) {
        return Err(ParameterError::UnexpectedCoefficient {
            family,
            coefficient,
        });
    }

    if let Some(method) = method {
        return Ok(DampingParameterSet::FromMethod {
            family,
            method,
            overrides: *overrides,
        });
    }

    let required = |coefficient: Coefficient| {
        overrides
            .get(coefficient)
            .ok_or(ParameterError::MissingCoefficient {
                family,
                coefficient,
            })
    };
    let s6 = overrides.s6.unwrap_or(defaults.s6);
    let s9 = overrides.s9.unwrap_or(defaults.s9);
    let rs8 = overrides.rs8.unwrap_or(defaults.rs8);
    let alp = overrides.alp.unwrap_or(defaults.alp);

    let params = match family {
        DampingFamily::Rational | DampingFamily::ModifiedRational => {
            let rational = RationalDamping {
                s8: required(Coefficient::S8)?,
                a1: required(Coefficient::A1)?,
                a2: required(Coefficient::A2)?,
                s6,
                s9,
                alp,
            };
            if family == DampingFamily::Rational {
                DampingParameters::Rational(rational)
            } else {
                DampingParameters::ModifiedRational(rational)
            }
        }
        DampingFamily::Zero => DampingParameters::Zero(ZeroDamping {
            s8: required(Coefficient::S8)?,
            rs6: required(Coefficient::Rs6)?,
            s6,
            s9,
            rs8,
            alp,
        }),
        DampingFamily::ModifiedZero => DampingParameters::ModifiedZero(ModifiedZeroDamping {
            s8: required(Coefficient::S8)?,
            rs6: required(Coefficient::Rs6)?,
            bet: required(Coefficient::Bet)?,
            s6,
            s9,
            rs8,
            alp,
        }),
    };

    Ok(DampingParameterSet::Explicit(params))
}
