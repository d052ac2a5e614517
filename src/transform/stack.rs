use kurbo::{Point, Vec2};
use nalgebra::{Matrix3, Vector3};

/// Ordered stack of 3x3 homogeneous matrices with precomputed inverses.
///
/// Forward evaluation applies matrices in insertion order with a single
/// homogeneous divide at the end; inverse evaluation applies the stored
/// inverses in reverse order. A non-invertible matrix (a projection is
/// rank-deficient on purpose) is paired with its pseudo-inverse and a
/// warning is emitted.
#[derive(Clone, Debug, Default)]
pub struct TransformStack {
    forward: Vec<Matrix3<f64>>,
    inverse: Vec<Matrix3<f64>>,
}

impl TransformStack {
    /// An empty stack (identity transform).
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of matrices on the stack.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.forward.len(), self.inverse.len());
        self.forward.len()
    }

    /// Whether the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Append a matrix and its (pseudo-)inverse.
    pub fn push(&mut self, matrix: Matrix3<f64>) {
        let inverse = match matrix.try_inverse() {
            Some(inv) => inv,
            None => {
                tracing::warn!(
                    ?matrix,
                    "transform matrix is singular, substituting pseudo-inverse"
                );
                matrix
                    .pseudo_inverse(1e-10)
                    .unwrap_or_else(|_| Matrix3::zeros())
            }
        };
        self.forward.push(matrix);
        self.inverse.push(inverse);
    }

    /// Drop all matrices.
    pub fn clear(&mut self) {
        self.forward.clear();
        self.inverse.clear();
    }

    /// Apply the full stack to a point, in insertion order.
    pub fn apply(&self, p: Point) -> Point {
        Self::fold(self.forward.iter(), p)
    }

    /// Apply the inverses to a point, in reverse insertion order.
    pub fn apply_inverse(&self, p: Point) -> Point {
        Self::fold(self.inverse.iter().rev(), p)
    }

    /// Transform a direction vector by the linear part of the stack.
    pub fn apply_direction(&self, v: Vec2) -> Vec2 {
        let mut h = Vector3::new(v.x, v.y, 0.0);
        for m in &self.forward {
            h = m * h;
        }
        Vec2::new(h.x, h.y)
    }

    fn fold<'a>(matrices: impl Iterator<Item = &'a Matrix3<f64>>, p: Point) -> Point {
        let mut h = Vector3::new(p.x, p.y, 1.0);
        for m in matrices {
            h = m * h;
        }
        if h.z != 0.0 && h.z != 1.0 {
            Point::new(h.x / h.z, h.y / h.z)
        } else {
            Point::new(h.x, h.y)
        }
    }

    pub(crate) fn matrices(&self) -> &[Matrix3<f64>] {
        &self.forward
    }
}

/// Translation by `v`.
pub fn translation(v: Vec2) -> Matrix3<f64> {
    Matrix3::new(1.0, 0.0, v.x, 0.0, 1.0, v.y, 0.0, 0.0, 1.0)
}

/// Rotation by `angle` radians about `center`.
pub fn rotation(angle: f64, center: Point) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    let tx = center.x - c * center.x + s * center.y;
    let ty = center.y - s * center.x - c * center.y;
    Matrix3::new(c, -s, tx, s, c, ty, 0.0, 0.0, 1.0)
}

/// Non-uniform scale about `center`.
pub fn scaling(factors: Vec2, center: Point) -> Matrix3<f64> {
    let tx = center.x - factors.x * center.x;
    let ty = center.y - factors.y * center.y;
    Matrix3::new(factors.x, 0.0, tx, 0.0, factors.y, ty, 0.0, 0.0, 1.0)
}

/// Shear with off-diagonal factors `v`.
pub fn shearing(v: Vec2) -> Matrix3<f64> {
    Matrix3::new(1.0, v.x, 0.0, v.y, 1.0, 0.0, 0.0, 0.0, 1.0)
}

/// Skew by angles `v` (tangent shear).
pub fn skewing(v: Vec2) -> Matrix3<f64> {
    Matrix3::new(1.0, v.x.tan(), 0.0, v.y.tan(), 1.0, 0.0, 0.0, 0.0, 1.0)
}

/// Reflection about the unit axis `a`: `I - 2 a a^t`.
pub fn reflection(axis: Vec2) -> Matrix3<f64> {
    let a = axis.normalize();
    Matrix3::new(
        1.0 - 2.0 * a.x * a.x,
        -2.0 * a.x * a.y,
        0.0,
        -2.0 * a.x * a.y,
        1.0 - 2.0 * a.y * a.y,
        0.0,
        0.0,
        0.0,
        1.0,
    )
}

/// Projection onto the direction at `angle`: the outer product of
/// `(cos, sin)` with itself. Rank-deficient by construction.
pub fn projection(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(c * c, c * s, 0.0, c * s, s * s, 0.0, 0.0, 0.0, 1.0)
}

/// The identity matrix.
pub fn identity() -> Matrix3<f64> {
    Matrix3::identity()
}

#[cfg(test)]
#[path = "../../tests/unit/transform/stack.rs"]
mod tests;
