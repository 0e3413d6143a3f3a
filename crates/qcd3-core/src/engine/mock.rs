use super::DispersionEngine;
use super::error::EngineError;
use crate::core::damping::level::DampingFamily;
use crate::core::damping::params::{
    CoefficientOverrides, DampingParameterSet, DampingParameters, ModifiedZeroDamping,
    OptionalDefaults, RationalDamping, ZeroDamping,
};
use crate::core::schema::result::DispersionOutput;
use crate::core::structure::Structure;
use nalgebra::{Matrix3, Point3, Vector3};
use std::cell::RefCell;

/// Energy of the water/TPSS-D3(BJ) reference system, in Hartree.
pub(crate) const WATER_TPSS_D3BJ_ENERGY: f64 = -0.0002667885779142513;

/// Tabulated TPSS `s8` for rational damping.
pub(crate) const TPSS_D3BJ_S8: f64 = 1.9435;

const MIN_DISTANCE_BOHR: f64 = 0.5;

pub(crate) struct MockStructure {
    positions: Vec<Point3<f64>>,
}

/// A stand-in engine with a handful of tabulated methods and canned outputs.
///
/// The energy is the water reference scaled by the `s8` of the evaluated
/// parameters; gradients do not depend on the parameters.
pub(crate) struct MockEngine {
    energy: f64,
    alp: f64,
    evaluation_failure: Option<String>,
    truncate_gradient: bool,
    omit_gradient: bool,
    parameter_requests: RefCell<Vec<DampingParameterSet>>,
}

impl Default for MockEngine {
    fn default() -> Self {
        Self {
            energy: WATER_TPSS_D3BJ_ENERGY,
            alp: 14.0,
            evaluation_failure: None,
            truncate_gradient: false,
            omit_gradient: false,
            parameter_requests: RefCell::new(Vec::new()),
        }
    }
}

impl MockEngine {
    pub(crate) fn with_alp(mut self, alp: f64) -> Self {
        self.alp = alp;
        self
    }

    pub(crate) fn failing_evaluation(mut self, message: &str) -> Self {
        self.evaluation_failure = Some(message.to_string());
        self
    }

    pub(crate) fn with_truncated_gradient(mut self) -> Self {
        self.truncate_gradient = true;
        self
    }

    pub(crate) fn without_gradient(mut self) -> Self {
        self.omit_gradient = true;
        self
    }

    pub(crate) fn parameter_requests(&self) -> Vec<DampingParameterSet> {
        self.parameter_requests.borrow().clone()
    }

    /// The gradient row the mock reports for the `index`-th evaluated atom.
    pub(crate) fn gradient_row(index: usize) -> Vector3<f64> {
        let scale = (index + 1) as f64;
        Vector3::new(1.0e-5 * scale, -2.0e-5 * scale, 5.0e-6 * scale)
    }

    fn screen(structure: &Structure) -> Result<(), EngineError> {
        let positions = structure.positions();
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                if (a - b).norm() < MIN_DISTANCE_BOHR {
                    return Err(EngineError::Structure(
                        "Too close interatomic distances found".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    fn tabulated(family: DampingFamily, method: &str) -> Option<DampingParameters> {
        let rational = |s8, a1, a2| RationalDamping {
            s6: 1.0,
            s8,
            s9: 1.0,
            a1,
            a2,
            alp: 14.0,
        };
        let params = match (family, method.to_ascii_lowercase().as_str()) {
            (DampingFamily::Rational, "tpss") => {
                DampingParameters::Rational(rational(TPSS_D3BJ_S8, 0.4535, 4.4752))
            }
            (DampingFamily::Rational, "pbe0") => {
                DampingParameters::Rational(rational(1.2177, 0.4145, 4.8593))
            }
            (DampingFamily::Zero, "b3lyp") => DampingParameters::Zero(ZeroDamping {
                s6: 1.0,
                s8: 1.703,
                s9: 1.0,
                rs6: 1.261,
                rs8: 1.0,
                alp: 14.0,
            }),
            (DampingFamily::ModifiedRational, "pbe") => {
                DampingParameters::ModifiedRational(rational(0.358940, 0.012092, 5.938))
            }
            (DampingFamily::ModifiedZero, "bp") => {
                DampingParameters::ModifiedZero(ModifiedZeroDamping {
                    s6: 1.0,
                    s8: 1.945174,
                    s9: 1.0,
                    rs6: 1.233460,
                    rs8: 1.0,
                    alp: 14.0,
                    bet: 0.0,
                })
            }
            _ => return None,
        };
        Some(params)
    }

    fn s8(params: &DampingParameters) -> f64 {
        match params {
            DampingParameters::Rational(p) | DampingParameters::ModifiedRational(p) => p.s8,
            DampingParameters::Zero(p) => p.s8,
            DampingParameters::ModifiedZero(p) => p.s8,
        }
    }

    fn apply(params: DampingParameters, o: &CoefficientOverrides) -> DampingParameters {
        match params {
            DampingParameters::Rational(p) => DampingParameters::Rational(Self::apply_rational(p, o)),
            DampingParameters::ModifiedRational(p) => {
                DampingParameters::ModifiedRational(Self::apply_rational(p, o))
            }
            DampingParameters::Zero(p) => DampingParameters::Zero(ZeroDamping {
                s6: o.s6.unwrap_or(p.s6),
                s8: o.s8.unwrap_or(p.s8),
                s9: o.s9.unwrap_or(p.s9),
                rs6: o.rs6.unwrap_or(p.rs6),
                rs8: o.rs8.unwrap_or(p.rs8),
                alp: o.alp.unwrap_or(p.alp),
            }),
            DampingParameters::ModifiedZero(p) => {
                DampingParameters::ModifiedZero(ModifiedZeroDamping {
                    s6: o.s6.unwrap_or(p.s6),
                    s8: o.s8.unwrap_or(p.s8),
                    s9: o.s9.unwrap_or(p.s9),
                    rs6: o.rs6.unwrap_or(p.rs6),
                    rs8: o.rs8.unwrap_or(p.rs8),
                    alp: o.alp.unwrap_or(p.alp),
                    bet: o.bet.unwrap_or(p.bet),
                })
            }
        }
    }

    fn apply_rational(p: RationalDamping, o: &CoefficientOverrides) -> RationalDamping {
        RationalDamping {
            s6: o.s6.unwrap_or(p.s6),
            s8: o.s8.unwrap_or(p.s8),
            s9: o.s9.unwrap_or(p.s9),
            a1: o.a1.unwrap_or(p.a1),
            a2: o.a2.unwrap_or(p.a2),
            alp: o.alp.unwrap_or(p.alp),
        }
    }
}

impl DispersionEngine for MockEngine {
    type Structure = MockStructure;
    type Parameters = DampingParameters;

    fn name(&self) -> &str {
        "mock-d3"
    }

    fn version(&self) -> String {
        "1.2.1".to_string()
    }

    fn default_coefficients(&self, _family: DampingFamily) -> OptionalDefaults {
        OptionalDefaults {
            alp: self.alp,
            ..OptionalDefaults::default()
        }
    }

    fn new_structure(&self, structure: &Structure) -> Result<MockStructure, EngineError> {
        Self::screen(structure)?;
        Ok(MockStructure {
            positions: structure.positions().to_vec(),
        })
    }

    fn update_structure(
        &self,
        handle: &mut MockStructure,
        structure: &Structure,
    ) -> Result<(), EngineError> {
        Self::screen(structure)?;
        handle.positions = structure.positions().to_vec();
        Ok(())
    }

    fn damping_parameters(
        &self,
        parameters: &DampingParameterSet,
    ) -> Result<DampingParameters, EngineError> {
        self.parameter_requests.borrow_mut().push(parameters.clone());
        match parameters {
            DampingParameterSet::Explicit(params) => Ok(*params),
            DampingParameterSet::FromMethod {
                family,
                method,
                overrides,
            } => Self::tabulated(*family, method)
                .map(|params| Self::apply(params, overrides))
                .ok_or_else(|| {
                    EngineError::Parameters(format!(
                        "No entry for '{}' present in {} tables",
                        method, family
                    ))
                }),
        }
    }

    fn dispersion(
        &self,
        structure: &MockStructure,
        parameters: &DampingParameters,
        gradient: bool,
    ) -> Result<DispersionOutput, EngineError> {
        if let Some(message) = &self.evaluation_failure {
            return Err(EngineError::Evaluation(message.clone()));
        }

        let rows = if self.truncate_gradient {
            structure.positions.len().saturating_sub(1)
        } else {
            structure.positions.len()
        };
        let gradient = (gradient && !self.omit_gradient)
            .then(|| (0..rows).map(Self::gradient_row).collect());

        Ok(DispersionOutput {
            energy: self.energy * (Self::s8(parameters) / TPSS_D3BJ_S8),
            virial: gradient.as_ref().map(|_| Matrix3::zeros()),
            gradient,
        })
    }
}
