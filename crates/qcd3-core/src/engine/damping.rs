use super::DispersionEngine;
use crate::core::damping::level::DampingFamily;
use crate::core::damping::params::{CoefficientOverrides, ParameterError, build_parameter_set};
use tracing::debug;

/// Builds engine damping parameters for `family`.
///
/// Without a method every required coefficient must be present in `overrides`.
/// With a method the engine supplies the tabulated coefficients and any override
/// replaces its counterpart unchecked. Engine refusals (unknown method, coefficient
/// the tables cannot provide) keep the engine's message.
pub fn build_damping_parameters<E: DispersionEngine>(
    engine: &E,
    family: DampingFamily,
    method: Option<String>,
    overrides: &CoefficientOverrides,
) -> Result<E::Parameters, ParameterError> {
    let defaults = engine.default_coefficients(family);
    let set = build_parameter_set(family, method, overrides, &defaults)?;
    debug!(
        family = %family,
        method = set.method().unwrap_or("<explicit>"),
        "Requesting damping parameters from engine."
    );
    engine
        .damping_parameters(&set)
        .map_err(|e| ParameterError::Engine(e.to_string()))
}
