use crate::error::{LmpError, LmpResult};

/// Orthogonal simulation box given as `(lo, hi)` per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimBox {
    pub bounds: [[f64; 2]; 3],
}

impl SimBox {
    pub fn from_bounds(bounds: [[f64; 2]; 3]) -> LmpResult<Self> {
        for (dim, b) in bounds.iter().enumerate() {
            if !b[0].is_finite() || !b[1].is_finite() {
                return Err(LmpError::Invalid(format!(
                    "box bounds along axis {dim} are not finite"
                )));
            }
            if b[1] <= b[0] {
                return Err(LmpError::Invalid(format!(
                    "box bounds along axis {dim} must have hi > lo (got {} {})",
                    b[0], b[1]
                )));
            }
        }
        Ok(Self { bounds })
    }

    pub fn cube(lo: f64, hi: f64) -> LmpResult<Self> {
        Self::from_bounds([[lo, hi]; 3])
    }

    pub fn extent(&self, dim: usize) -> f64 {
        self.bounds[dim][1] - self.bounds[dim][0]
    }

    pub fn extents(&self) -> [f64; 3] {
        [self.extent(0), self.extent(1), self.extent(2)]
    }
}
