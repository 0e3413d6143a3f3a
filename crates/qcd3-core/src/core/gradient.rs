use super::structure::ShapeError;
use nalgebra::Vector3;

/// Expands a gradient evaluated over real atoms back to the full atom list.
///
/// `real_gradient` holds one row per `true` entry of `mask`, in mask order. Ghost
/// atoms receive zero rows. When the mask has no ghosts the input is returned as is.
pub fn reconstruct_gradient(
    real_gradient: Vec<Vector3<f64>>,
    mask: &[bool],
) -> Result<Vec<Vector3<f64>>, ShapeError> {
    let real_count = mask.iter().filter(|&&real| real).count();
    if real_gradient.len() != real_count {
        return Err(ShapeError::GradientShape {
            expected: real_count,
            found: real_gradient.len(),
        });
    }
    if real_count == mask.len() {
        return Ok(real_gradient);
    }

    let mut full = vec![Vector3::zeros(); mask.len()];
    let real_indices = mask
        .iter()
        .enumerate()
        .filter_map(|(index, &real)| real.then_some(index));
    for (index, row) in real_indices.zip(real_gradient) {
        full[index] = row;
    }
    Ok(full)
}
