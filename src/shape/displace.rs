use std::fmt;
use std::sync::Arc;

use kurbo::Point;

use crate::foundation::error::{BeamlineError, BeamlineResult};
use crate::shape::Shape;

/// A scalar field sampled at an explicit coordinate vector. Implementors
/// carry their own seed; the engine never reads ambient randomness.
pub trait NoiseField: Send + Sync {
    /// Sample the field at `position` (one entry per mapped axis).
    fn sample(&self, position: &[f64]) -> f64;
}

/// Input coordinates a noise field can be fed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Axis {
    /// The point's x coordinate.
    X,
    /// The point's y coordinate.
    Y,
    /// The evaluation time in seconds.
    T,
}

/// Ordered selection of [`Axis`] values fed to a [`NoiseField`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AxisMap {
    axes: Vec<Axis>,
}

impl AxisMap {
    /// Build a map from an explicit axis list (1 to 4 entries).
    pub fn new(axes: Vec<Axis>) -> BeamlineResult<Self> {
        if axes.is_empty() || axes.len() > 4 {
            return Err(BeamlineError::validation(format!(
                "axis map must have 1 to 4 axes, got {}",
                axes.len()
            )));
        }
        Ok(Self { axes })
    }

    /// Spatial x and y.
    pub fn xy() -> Self {
        Self {
            axes: vec![Axis::X, Axis::Y],
        }
    }

    /// Spatial x and y plus time.
    pub fn xyt() -> Self {
        Self {
            axes: vec![Axis::X, Axis::Y, Axis::T],
        }
    }

    pub(crate) fn resolve(&self, p: Point, time: f64) -> Vec<f64> {
        self.axes
            .iter()
            .map(|axis| match axis {
                Axis::X => p.x,
                Axis::Y => p.y,
                Axis::T => time,
            })
            .collect()
    }
}

type DisplaceFn = Arc<dyn Fn(&Shape, Point, f64, f64) -> Point + Send + Sync>;

/// A single entry in a shape's displacement chain.
///
/// Entries run after the transform stack, in insertion order, each seeing
/// the output of the previous one. The callback receives the owning shape,
/// the point so far, the arc parameter and the evaluation time.
#[derive(Clone)]
pub struct Displacement {
    f: DisplaceFn,
}

impl fmt::Debug for Displacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Displacement")
    }
}

impl Displacement {
    /// Wrap an arbitrary displacement callback.
    pub fn from_fn(
        f: impl Fn(&Shape, Point, f64, f64) -> Point + Send + Sync + 'static,
    ) -> Self {
        Self { f: Arc::new(f) }
    }

    /// Displace along the shape's normal by a noise field sampled at the
    /// mapped coordinates, scaled by `amplitude`. Where the normal is
    /// undefined the point passes through unchanged.
    pub fn along_normal(noise: Arc<dyn NoiseField>, axes: AxisMap, amplitude: f64) -> Self {
        Self::from_fn(move |shape, p, s, time| match shape.normal(s, time) {
            Ok(normal) => p + normal * (noise.sample(&axes.resolve(p, time)) * amplitude),
            Err(_) => p,
        })
    }

    pub(crate) fn apply(&self, shape: &Shape, p: Point, s: f64, time: f64) -> Point {
        (self.f)(shape, p, s, time)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/displace.rs"]
mod tests;
