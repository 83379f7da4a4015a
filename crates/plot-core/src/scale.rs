// File: crates/plot-core/src/scale.rs
// Summary: Monotonic axis transforms and the linear data <-> pixel scale built on them.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::axis::Direction;

pub type TransformFn = Rc<dyn Fn(f64) -> f64>;

/// Built-in scale kinds selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    #[default]
    Linear,
    Log10,
}

/// A monotonic forward transform with an optional inverse.
#[derive(Clone)]
pub struct Transform {
    forward: TransformFn,
    inverse: Option<TransformFn>,
}

impl Transform {
    pub fn new(
        forward: impl Fn(f64) -> f64 + 'static,
        inverse: Option<TransformFn>,
    ) -> Self {
        Self { forward: Rc::new(forward), inverse }
    }

    /// Base-10 logarithm; values at or below zero are floored to a tiny
    /// positive number so the mapping stays finite.
    pub fn log10() -> Self {
        Self::new(
            |v| v.max(1e-12).log10(),
            Some(Rc::new(|p: f64| 10f64.powf(p))),
        )
    }

    pub fn from_kind(kind: ScaleKind) -> Option<Self> {
        match kind {
            ScaleKind::Linear => None,
            ScaleKind::Log10 => Some(Self::log10()),
        }
    }

    #[inline]
    pub fn apply(&self, v: f64) -> f64 {
        (self.forward)(v)
    }

    #[inline]
    pub fn invert(&self, p: f64) -> Option<f64> {
        self.inverse.as_ref().map(|f| f(p))
    }

    pub fn is_invertible(&self) -> bool {
        self.inverse.is_some()
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("invertible", &self.inverse.is_some())
            .finish()
    }
}

/// Pixel mapping for one axis: `pixel = (forward(v) - origin) * factor`.
///
/// For x axes the factor is positive and the origin is the smaller transformed
/// bound; for y axes the factor is negative and the origin is the larger bound,
/// so pixel rows grow downward while values grow upward.
#[derive(Clone, Debug)]
pub struct Scale {
    origin: f64,
    factor: f64,
    transform: Option<Transform>,
}

impl Scale {
    pub fn identity() -> Self {
        Self { origin: 0.0, factor: 1.0, transform: None }
    }

    pub fn for_range(
        direction: Direction,
        min: f64,
        max: f64,
        pixels: f64,
        transform: Option<Transform>,
    ) -> Self {
        let t = |v: f64| match &transform {
            Some(tr) => tr.apply(v),
            None => v,
        };
        let (tmin, tmax) = (t(min), t(max));
        let span = (tmax - tmin).abs().max(f64::MIN_POSITIVE);
        let magnitude = pixels / span;
        let (origin, factor) = match direction {
            Direction::X => (tmin.min(tmax), magnitude),
            Direction::Y => (tmin.max(tmax), -magnitude),
        };
        Self { origin, factor, transform }
    }

    #[inline]
    pub fn data_to_pixel(&self, v: f64) -> f64 {
        let tv = match &self.transform {
            Some(tr) => tr.apply(v),
            None => v,
        };
        (tv - self.origin) * self.factor
    }

    #[inline]
    pub fn pixel_to_data(&self, p: f64) -> f64 {
        let tv = self.origin + p / self.factor;
        match &self.transform {
            Some(tr) => tr.invert(tv).unwrap_or(tv),
            None => tv,
        }
    }

    /// Pixels per transformed data unit (always positive).
    pub fn magnitude(&self) -> f64 {
        self.factor.abs()
    }

    pub fn is_transformed(&self) -> bool {
        self.transform.is_some()
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::identity()
    }
}
