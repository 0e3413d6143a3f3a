use nalgebra::{Matrix3, Point3};
use thiserror::Error;

/// Malformed array shapes.
///
/// These indicate a programming error on the caller's side rather than a failed
/// computation, so the workflow returns them instead of recording them in the
/// result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Expected triples of cartesian coordinates, got {0} values")]
    ExpectedTriples(usize),
    #[error("Dimension mismatch: {numbers} atomic numbers but {positions} positions")]
    DimensionMismatch { numbers: usize, positions: usize },
    #[error("Dimension mismatch for positions: expected {expected} values, got {found}")]
    PositionsMismatch { expected: usize, found: usize },
    #[error("Invalid lattice provided: expected 9 values, got {0}")]
    InvalidLattice(usize),
    #[error("Dimension mismatch for real-atom mask: expected {expected} entries, got {found}")]
    MaskMismatch { expected: usize, found: usize },
    #[error("Gradient has {found} rows but {expected} real atoms were evaluated")]
    GradientShape { expected: usize, found: usize },
    #[error("Gradient was requested but the engine returned none")]
    MissingGradient,
}

/// Atomic numbers and cartesian positions (Bohr) with shapes already checked.
///
/// Lattice vectors are stored as rows. Periodicity defaults to fully periodic when
/// a lattice is supplied and to a molecule otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    numbers: Vec<u8>,
    positions: Vec<Point3<f64>>,
    lattice: Option<Matrix3<f64>>,
    periodic: [bool; 3],
}

impl Structure {
    pub fn new(
        numbers: Vec<u8>,
        positions: &[f64],
        lattice: Option<&[f64]>,
        periodic: Option<[bool; 3]>,
    ) -> Result<Self, ShapeError> {
        let positions = to_points(positions)?;
        if positions.len() != numbers.len() {
            return Err(ShapeError::DimensionMismatch {
                numbers: numbers.len(),
                positions: positions.len(),
            });
        }
        let lattice = lattice.map(to_lattice).transpose()?;
        let periodic = periodic.unwrap_or([lattice.is_some(); 3]);

        Ok(Self {
            numbers,
            positions,
            lattice,
            periodic,
        })
    }

    /// Keeps only the atoms flagged as real in `mask`, preserving their order.
    pub fn from_real_atoms(
        numbers: &[u8],
        geometry: &[f64],
        mask: &[bool],
    ) -> Result<Self, ShapeError> {
        let all = Self::new(numbers.to_vec(), geometry, None, None)?;
        if mask.len() != all.len() {
            return Err(ShapeError::MaskMismatch {
                expected: all.len(),
                found: mask.len(),
            });
        }

        let (numbers, positions) = all
            .numbers
            .iter()
            .zip(all.positions.iter())
            .zip(mask)
            .filter(|(_, real)| **real)
            .map(|((&number, &position), _)| (number, position))
            .unzip();

        Ok(Self {
            numbers,
            positions,
            lattice: None,
            periodic: [false; 3],
        })
    }

    /// Replaces the positions and, if given, the lattice.
    ///
    /// The atom count is fixed at construction; a position array of any other
    /// length is rejected and the structure is left untouched.
    pub fn update(&mut self, positions: &[f64], lattice: Option<&[f64]>) -> Result<(), ShapeError> {
        let expected = 3 * self.numbers.len();
        if positions.len() != expected {
            return Err(ShapeError::PositionsMismatch {
                expected,
                found: positions.len(),
            });
        }
        let lattice = lattice.map(to_lattice).transpose()?;

        self.positions = to_points(positions)?;
        if lattice.is_some() {
            self.lattice = lattice;
        }
        Ok(())
    }

    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn lattice(&self) -> Option<&Matrix3<f64>> {
        self.lattice.as_ref()
    }

    pub fn periodic(&self) -> [bool; 3] {
        self.periodic
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

fn to_points(flat: &[f64]) -> Result<Vec<Point3<f64>>, ShapeError> {
    if flat.len() % 3 != 0 {
        return Err(ShapeError::ExpectedTriples(flat.len()));
    }
    Ok(flat
        .chunks_exact(3)
        .map(|xyz| Point3::new(xyz[0], xyz[1], xyz[2]))
        .collect())
}

fn to_lattice(flat: &[f64]) -> Result<Matrix3<f64>, ShapeError> {
    if flat.len() != 9 {
        return Err(ShapeError::InvalidLattice(flat.len()));
    }
    Ok(Matrix3::from_row_slice(flat))
}
