use crate::core::damping::level::{DampingFamily, resolve_level};
use crate::core::damping::method::normalize_method;
use crate::core::gradient::reconstruct_gradient;
use crate::core::schema::input::{AtomicInput, Driver};
use crate::core::schema::result::{
    AtomicResult, ComputeError, DISPERSION_EXTRAS_KEY, DispersionOutput, ErrorKind, Provenance,
    ReturnResult,
};
use crate::core::structure::{ShapeError, Structure};
use crate::engine::DispersionEngine;
use crate::engine::config::RunnerConfig;
use crate::engine::damping::build_damping_parameters;
use crate::engine::error::EngineError;
use crate::engine::model::DispersionModel;
use tracing::{debug, info, instrument, warn};

const INVALID_DRIVER_MESSAGE: &str = "Calculation succeeded but invalid driver request provided";

enum StageError {
    Compute(ComputeError),
    Shape(ShapeError),
}

impl From<ShapeError> for StageError {
    fn from(e: ShapeError) -> Self {
        StageError::Shape(e)
    }
}

/// Runs a dispersion correction for `input` with the default runner settings.
///
/// See [`run_with_config`].
pub fn run<E: DispersionEngine>(
    engine: &E,
    input: &AtomicInput,
) -> Result<AtomicResult, ShapeError> {
    run_with_config(engine, input, &RunnerConfig::default())
}

/// Runs a dispersion correction for `input` and assembles the result record.
///
/// Invalid level hints, damping-parameter failures and engine failures are
/// recorded in the returned result with `success == false`. A driver other than
/// `energy` or `gradient` still evaluates the energy: the result then carries
/// the energy property together with `success == false` and an invalid-driver
/// error.
///
/// # Errors
///
/// Returns [`ShapeError`] when the molecule's arrays are inconsistent (geometry
/// not in triples, atom counts or mask length disagreeing) or the engine returns
/// a gradient of the wrong shape. These are reported only once the damping
/// parameters have been built.
#[instrument(skip_all, name = "qcschema_run", fields(driver = %input.driver))]
pub fn run_with_config<E: DispersionEngine>(
    engine: &E,
    input: &AtomicInput,
    config: &RunnerConfig,
) -> Result<AtomicResult, ShapeError> {
    let provenance = Provenance {
        creator: engine.name().to_string(),
        version: engine.version(),
        routine: config.routine.clone(),
    };
    let mut result = AtomicResult::unsuccessful(input, provenance);

    let family = match resolve_level(input.keywords.level_hint.as_deref(), config.default_level)
    {
        Ok(family) => family,
        Err(e) => {
            warn!("Rejecting request: {}", e);
            result.error = Some(ComputeError::new(ErrorKind::InvalidLevel, e.to_string()));
            return Ok(result);
        }
    };
    debug!(level = %family, "Damping level resolved.");

    let output = match evaluate(engine, input, family) {
        Ok(output) => output,
        Err(StageError::Compute(error)) => {
            warn!(kind = ?error.error_type, "Dispersion evaluation failed: {}", error.error_message);
            result.error = Some(error);
            return Ok(result);
        }
        Err(StageError::Shape(e)) => return Err(e),
    };

    let gradient = match input.driver {
        Driver::Gradient => {
            let real_gradient = output.gradient.clone().ok_or(ShapeError::MissingGradient)?;
            Some(reconstruct_gradient(
                real_gradient,
                &input.molecule.real_mask(),
            )?)
        }
        _ => None,
    };

    result.properties.return_energy = Some(output.energy);
    result.success = input.driver.is_supported();
    match (input.driver, gradient) {
        (Driver::Energy, _) => result.return_result = ReturnResult::Energy(output.energy),
        (Driver::Gradient, Some(gradient)) => {
            result.return_result = ReturnResult::Gradient(gradient)
        }
        (driver, _) => {
            warn!(%driver, "Dispersion energy computed for an unsupported driver.");
            result.error = Some(ComputeError::new(
                ErrorKind::InvalidDriver,
                INVALID_DRIVER_MESSAGE,
            ));
        }
    }
    result.extras.other.remove(DISPERSION_EXTRAS_KEY);
    result.extras.dispersion = Some(output);

    info!(
        success = result.success,
        energy = result.properties.return_energy,
        "Dispersion correction complete."
    );
    Ok(result)
}

fn evaluate<E: DispersionEngine>(
    engine: &E,
    input: &AtomicInput,
    family: DampingFamily,
) -> Result<DispersionOutput, StageError> {
    let method = normalize_method(&input.model.method, family);
    debug!(method = method.as_deref().unwrap_or("<none>"), "Method name normalized.");

    let overrides = input.keywords.params_tweaks.unwrap_or_default();
    let parameters = build_damping_parameters(engine, family, method, &overrides).map_err(|e| {
        StageError::Compute(ComputeError::new(
            ErrorKind::ParameterConstructionFailed,
            e.to_string(),
        ))
    })?;

    let molecule = &input.molecule;
    let structure = Structure::from_real_atoms(
        &molecule.atomic_numbers,
        &molecule.geometry,
        &molecule.real_mask(),
    )?;
    debug!(real_atoms = structure.len(), "Structure prepared.");

    let engine_failure = |e: EngineError| {
        StageError::Compute(ComputeError::new(ErrorKind::EngineFailure, e.to_string()))
    };
    let model = DispersionModel::new(engine, structure).map_err(engine_failure)?;
    model
        .dispersion(&parameters, input.driver == Driver::Gradient)
        .map_err(engine_failure)
}
