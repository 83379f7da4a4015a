// File: crates/plot-core/src/plugin.rs
// Summary: Plugin trait with named extension points, plus a crosshair overlay plugin.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::axis::Axis;
use crate::canvas::{DrawContext, StrokeStyle};
use crate::color::Rgba;
use crate::data::FieldFormat;
use crate::options::Options;
use crate::plot::Plot;
use crate::series::{RawPoint, Series};
use crate::types::PlotOffset;

/// Extension registered on a plot before it is built. Hooks run in
/// registration order; every hook has a no-op default.
pub trait Plugin {
    fn id(&self) -> &'static str;

    /// Adjust options before they are finalized.
    fn process_options(&self, _options: &mut Options) {}

    /// Inspect raw data and optionally replace the field format.
    fn process_raw_data(&self, _series: &Series, _raw: &[RawPoint], _format: &mut Vec<FieldFormat>) {}

    /// Post-process a normalized point buffer.
    fn process_datapoints(&self, _series: &mut Series) {}

    /// Configure an axis before ticks are computed, e.g. install a generator.
    fn process_axis(&self, _axis: &mut Axis) {}

    /// Reserve extra space around the plot before axis boxes are allocated.
    fn process_offset(&self, _offset: &mut PlotOffset) {}

    fn draw_background(&self, _plot: &Plot, _ctx: &mut dyn DrawContext) {}

    /// Called before the built-in painter for each series, in canvas
    /// coordinates.
    fn draw_series(&self, _plot: &Plot, _ctx: &mut dyn DrawContext, _series: &Series) {}

    fn draw(&self, _plot: &Plot, _ctx: &mut dyn DrawContext) {}

    fn draw_overlay(&self, _plot: &Plot, _ctx: &mut dyn DrawContext) {}

    /// Pointer moved to canvas pixel `pos`, or left the canvas (`None`).
    /// Returning `true` requests an overlay redraw.
    fn pointer_moved(&self, _plot: &Plot, _pos: Option<(f64, f64)>) -> bool {
        false
    }

    fn shutdown(&self, _plot: &Plot) {}
}

impl<P: Plugin + ?Sized> Plugin for Rc<P> {
    fn id(&self) -> &'static str {
        (**self).id()
    }
    fn process_options(&self, options: &mut Options) {
        (**self).process_options(options)
    }
    fn process_raw_data(&self, series: &Series, raw: &[RawPoint], format: &mut Vec<FieldFormat>) {
        (**self).process_raw_data(series, raw, format)
    }
    fn process_datapoints(&self, series: &mut Series) {
        (**self).process_datapoints(series)
    }
    fn process_axis(&self, axis: &mut Axis) {
        (**self).process_axis(axis)
    }
    fn process_offset(&self, offset: &mut PlotOffset) {
        (**self).process_offset(offset)
    }
    fn draw_background(&self, plot: &Plot, ctx: &mut dyn DrawContext) {
        (**self).draw_background(plot, ctx)
    }
    fn draw_series(&self, plot: &Plot, ctx: &mut dyn DrawContext, series: &Series) {
        (**self).draw_series(plot, ctx, series)
    }
    fn draw(&self, plot: &Plot, ctx: &mut dyn DrawContext) {
        (**self).draw(plot, ctx)
    }
    fn draw_overlay(&self, plot: &Plot, ctx: &mut dyn DrawContext) {
        (**self).draw_overlay(plot, ctx)
    }
    fn pointer_moved(&self, plot: &Plot, pos: Option<(f64, f64)>) -> bool {
        (**self).pointer_moved(plot, pos)
    }
    fn shutdown(&self, plot: &Plot) {
        (**self).shutdown(plot)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrosshairMode {
    X,
    Y,
    XY,
}

/// Guide lines following the pointer across the plot area, drawn on the
/// overlay. `lock` pins the current position.
pub struct Crosshair {
    pub mode: CrosshairMode,
    pub color: Rgba,
    pub line_width: f64,
    position: RefCell<Option<(f64, f64)>>,
    locked: Cell<bool>,
}

impl Crosshair {
    pub fn new(mode: CrosshairMode) -> Self {
        Self {
            mode,
            color: Rgba::make(170.0, 0.0, 0.0, 0.8),
            line_width: 1.0,
            position: RefCell::new(None),
            locked: Cell::new(false),
        }
    }

    /// Current position relative to the plot area.
    pub fn position(&self) -> Option<(f64, f64)> {
        *self.position.borrow()
    }

    pub fn lock(&self) {
        self.locked.set(true);
    }

    pub fn unlock(&self) {
        self.locked.set(false);
    }
}

impl Plugin for Crosshair {
    fn id(&self) -> &'static str {
        "crosshair"
    }

    fn pointer_moved(&self, plot: &Plot, pos: Option<(f64, f64)>) -> bool {
        if self.locked.get() {
            return false;
        }
        let offset = plot.plot_offset();
        let (w, h) = (plot.plot_width(), plot.plot_height());
        let next = pos.map(|(x, y)| ((x - offset.left).clamp(0.0, w), (y - offset.top).clamp(0.0, h)));
        let changed = *self.position.borrow() != next;
        *self.position.borrow_mut() = next;
        changed
    }

    fn draw_overlay(&self, plot: &Plot, ctx: &mut dyn DrawContext) {
        let Some((x, y)) = self.position() else {
            return;
        };
        let offset = plot.plot_offset();
        ctx.save();
        ctx.translate(offset.left, offset.top);
        ctx.begin_path();
        let adj = if self.line_width % 2.0 != 0.0 { 0.5 } else { 0.0 };
        if self.mode != CrosshairMode::Y {
            let px = x.floor() + adj;
            ctx.move_to(px, 0.0);
            ctx.line_to(px, plot.plot_height());
        }
        if self.mode != CrosshairMode::X {
            let py = y.floor() + adj;
            ctx.move_to(0.0, py);
            ctx.line_to(plot.plot_width(), py);
        }
        ctx.stroke(&StrokeStyle::new(self.color, self.line_width).round());
        ctx.restore();
    }
}
