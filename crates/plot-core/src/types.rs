// File: crates/plot-core/src/types.rs
// Summary: Shared types and constants (canvas sizes, per-side values, plot offset).

use serde::{Deserialize, Serialize};

/// Default canvas width in pixels.
pub const WIDTH: i32 = 1024;
/// Default canvas height in pixels.
pub const HEIGHT: i32 = 640;

/// Pixel margins around the plotting rectangle.
/// Contract: after layout, `left + right < canvas width` and
/// `top + bottom < canvas height`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotOffset {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl PlotOffset {
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self { left, right, top, bottom }
    }
    pub const fn uniform(v: f64) -> Self {
        Self::new(v, v, v, v)
    }
    /// Total horizontal offset (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical offset (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }
}

/// A value given either once for all four sides or per side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sides<T> {
    Uniform(T),
    PerSide { top: T, right: T, bottom: T, left: T },
}

impl<T: Clone> Sides<T> {
    pub fn top(&self) -> T {
        match self { Sides::Uniform(v) => v.clone(), Sides::PerSide { top, .. } => top.clone() }
    }
    pub fn right(&self) -> T {
        match self { Sides::Uniform(v) => v.clone(), Sides::PerSide { right, .. } => right.clone() }
    }
    pub fn bottom(&self) -> T {
        match self { Sides::Uniform(v) => v.clone(), Sides::PerSide { bottom, .. } => bottom.clone() }
    }
    pub fn left(&self) -> T {
        match self { Sides::Uniform(v) => v.clone(), Sides::PerSide { left, .. } => left.clone() }
    }
    pub fn is_uniform(&self) -> bool {
        matches!(self, Sides::Uniform(_))
    }
}

impl<T: Default> Default for Sides<T> {
    fn default() -> Self {
        Sides::Uniform(T::default())
    }
}
