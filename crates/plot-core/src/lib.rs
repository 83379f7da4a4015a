// File: crates/plot-core/src/lib.rs
// Summary: Core library entry point; 2-D plot engine with multi-axis layout, canvas rendering and hit testing.

pub mod axis;
pub mod canvas;
pub mod color;
pub mod data;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod layout;
pub mod legend;
pub mod options;
pub mod overlay;
pub mod plot;
pub mod plugin;
pub mod render;
pub mod scale;
pub mod series;
pub mod skia_backend;
pub mod text;
pub mod theme;
pub mod types;

pub use axis::{Axis, AxisId, Direction, Tick};
pub use canvas::{DrawContext, DrawOp, Recorder};
pub use color::Rgba;
pub use error::{PlotError, Result};
pub use hit::Hit;
pub use options::{AxisOptions, Marking, MarkingRange, Options, TickEntry};
pub use plot::{Plot, PlotBuilder, PlotEvent, PointerEventKind, PointerPosition};
pub use plugin::{Crosshair, CrosshairMode, Plugin};
pub use scale::Transform;
pub use series::{BarAlign, FillSpec, RawPoint, Series, SeriesKind, SeriesSpec, Symbol};
pub use skia_backend::SkiaSurface;
pub use text::{FixedMetrics, FontSpec, TextMeasure, TextShaper};
pub use theme::Theme;
