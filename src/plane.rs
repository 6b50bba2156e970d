//! Cell-by-cell combination of boolean mask planes.

use tracing::debug;

use crate::{Evaluator, PlaneError, RuntimeError};

/// A rectangular `nx` by `ny` grid of booleans, stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolPlane {
    nx: usize,
    ny: usize,
    data: Vec<bool>,
}

impl BoolPlane {
    /// Create a plane with every cell unset.
    ///
    /// # Panics
    ///
    /// Panics if `nx * ny` overflows `usize`.
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            data: vec![false; nx * ny],
        }
    }

    /// Create a plane from row-major cell values. Returns `None` if `data`
    /// does not hold exactly `nx * ny` values.
    pub fn from_vec(nx: usize, ny: usize, data: Vec<bool>) -> Option<Self> {
        if nx.checked_mul(ny)? != data.len() {
            return None;
        }
        Some(Self { nx, ny, data })
    }

    /// Number of columns.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of rows.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Read the cell at column `x` and row `y`, `None` when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Write the cell at column `x` and row `y`. Returns false and leaves the
    /// plane untouched when out of bounds.
    pub fn set(&mut self, x: usize, y: usize, value: bool) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    /// Number of set cells.
    pub fn count_true(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.nx && y < self.ny {
            Some(y * self.nx + x)
        } else {
            None
        }
    }
}

/// Combine mask planes cell by cell: plane `i` supplies local variable
/// `#(i+1)` and the evaluator's program decides the resulting cell.
///
/// All planes must have the same dimensions and there must be exactly one
/// plane per local variable.
///
/// # Examples
///
/// ```
/// use boolcalc::{combine_planes, BoolPlane, Evaluator};
///
/// let a = BoolPlane::from_vec(2, 1, vec![true, false]).unwrap();
/// let b = BoolPlane::from_vec(2, 1, vec![true, true]).unwrap();
/// let mut calc = Evaluator::with_expression("#1 && #2").unwrap();
///
/// let both = combine_planes("both", &[a, b], &mut calc).unwrap();
/// assert_eq!(both.get(0, 0), Some(true));
/// assert_eq!(both.get(1, 0), Some(false));
/// ```
pub fn combine_planes(
    name: &str,
    planes: &[BoolPlane],
    calc: &mut Evaluator,
) -> Result<BoolPlane, PlaneError> {
    let first = planes.first().ok_or(PlaneError::NoPlanes)?;
    let (nx, ny) = (first.nx, first.ny);
    for (index, plane) in planes.iter().enumerate() {
        if (plane.nx, plane.ny) != (nx, ny) {
            return Err(PlaneError::DimensionMismatch {
                index,
                expected: (nx, ny),
                actual: (plane.nx, plane.ny),
            });
        }
    }
    if planes.len() != calc.max_local() {
        return Err(RuntimeError::ArityMismatch {
            expected: calc.max_local(),
            actual: planes.len(),
        }
        .into());
    }

    let mut result = BoolPlane::new(nx, ny);
    let mut inputs = vec![false; planes.len()];
    for (cell, out) in result.data.iter_mut().enumerate() {
        for (input, plane) in inputs.iter_mut().zip(planes) {
            *input = plane.data[cell];
        }
        *out = calc.run(&inputs)?;
    }
    debug!(
        name,
        expr = calc.expression(),
        nx,
        ny,
        set = result.count_true(),
        "combined mask planes"
    );
    Ok(result)
}
