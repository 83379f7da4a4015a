// File: crates/plot-core/src/plot.rs
// Summary: Plot facade: construction, data assignment, layout, drawing, pointer events and export.

use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use log::debug;

use crate::axis::{Axis, AxisId, AxisSet, Direction};
use crate::canvas::DrawContext;
use crate::color::Rgba;
use crate::data::{self, PointBuffer, SeriesExtents};
use crate::error::{PlotError, Result};
use crate::hit::{self, Hit};
use crate::layout::{self, Layout};
use crate::options::{Options, SeriesDefaults};
use crate::overlay::{self, Highlight, OverlayScheduler};
use crate::plugin::Plugin;
use crate::render;
use crate::series::{Series, SeriesKind, SeriesSpec};
use crate::skia_backend::SkiaSurface;
use crate::text::{FixedMetrics, TextMeasure};
use crate::types::PlotOffset;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Hover,
    Click,
}

/// Pointer location in canvas pixels and in data coordinates of every used
/// axis.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerPosition {
    pub canvas: (f64, f64),
    pub coords: Vec<(AxisId, f64)>,
}

impl PointerPosition {
    pub fn get(&self, id: AxisId) -> Option<f64> {
        self.coords.iter().find(|(a, _)| *a == id).map(|(_, v)| *v)
    }

    pub fn x(&self) -> Option<f64> {
        self.get(AxisId::X1)
    }

    pub fn y(&self) -> Option<f64> {
        self.get(AxisId::Y1)
    }
}

/// Hover or click, with the item under the pointer if any.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotEvent {
    pub kind: PointerEventKind,
    pub pos: PointerPosition,
    pub item: Option<Hit>,
}

type Listener = Box<dyn FnMut(&PlotEvent)>;

pub struct PlotBuilder {
    width: i32,
    height: i32,
    options: Options,
    plugins: Vec<Box<dyn Plugin>>,
    text: Box<dyn TextMeasure>,
}

impl PlotBuilder {
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Register a plugin; hooks run in registration order.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn text_measure(mut self, text: impl TextMeasure + 'static) -> Self {
        self.text = Box::new(text);
        self
    }

    /// Finalize options, assign the data and run the first layout pass.
    pub fn build(self, series: Vec<SeriesSpec>) -> Result<Plot> {
        if self.width <= 0 || self.height <= 0 {
            return Err(PlotError::InvalidDimensions { width: self.width, height: self.height });
        }
        let mut options = self.options;
        for plugin in &self.plugins {
            plugin.process_options(&mut options);
        }
        options.finalize();

        let scheduler = OverlayScheduler::from_millis(options.interaction.redraw_overlay_interval);
        let mut plot = Plot {
            width: self.width as f64,
            height: self.height as f64,
            axes: AxisSet::from_options(&options),
            options,
            series: Vec::new(),
            layout: Layout::default(),
            plugins: self.plugins,
            text: self.text,
            highlights: Vec::new(),
            scheduler,
            hover_listeners: Vec::new(),
            click_listeners: Vec::new(),
        };
        plot.set_data(series)?;
        plot.setup_grid()?;
        Ok(plot)
    }
}

pub struct Plot {
    width: f64,
    height: f64,
    options: Options,
    series: Vec<Series>,
    axes: AxisSet,
    layout: Layout,
    plugins: Vec<Box<dyn Plugin>>,
    text: Box<dyn TextMeasure>,
    highlights: Vec<Highlight>,
    scheduler: OverlayScheduler,
    hover_listeners: Vec<Listener>,
    click_listeners: Vec<Listener>,
}

impl Plot {
    pub fn builder(width: i32, height: i32) -> PlotBuilder {
        PlotBuilder {
            width,
            height,
            options: Options::default(),
            plugins: Vec::new(),
            text: Box::new(FixedMetrics::default()),
        }
    }

    /// Replace all series. Data is normalized and axis extents recomputed;
    /// call [`Plot::setup_grid`] before drawing again. A series referencing
    /// an axis ordinal beyond [`AxisSet::ordinal_limit`] is rejected and the
    /// current data is kept.
    pub fn set_data(&mut self, specs: Vec<SeriesSpec>) -> Result<()> {
        for (i, spec) in specs.iter().enumerate() {
            let (x, y) = axis_ordinals(spec);
            for id in [AxisId::x(x), AxisId::y(y)] {
                let limit = AxisSet::ordinal_limit(id.direction, &self.options);
                if id.n > limit {
                    return Err(PlotError::Options(format!("series {i}: {id} exceeds the limit of {limit} axes")));
                }
            }
        }

        let colors = data::assign_colors(&specs, &self.options.colors);
        for axis in self.axes.iter_mut() {
            axis.reset_data();
        }

        let mut resolved = Vec::with_capacity(specs.len());
        for (spec, color) in specs.iter().zip(colors) {
            let mut series = resolve_series(spec, color, &self.options.series);

            let mut format = data::default_format(&series);
            for plugin in &self.plugins {
                plugin.process_raw_data(&series, &spec.data, &mut format);
            }
            let steps = series.kind == SeriesKind::Lines && series.lines.steps;
            let mut gap_extents = SeriesExtents::default();
            series.datapoints = data::normalize(&spec.data, &format, steps, &mut gap_extents);
            for plugin in &self.plugins {
                plugin.process_datapoints(&mut series);
            }

            let extents = data::series_extents(&series);
            let xa = self.axes.get_or_create(series.x_axis_id(), &self.options)?;
            xa.used = true;
            xa.include_extent(&extents.x);
            xa.include_extent(&gap_extents.x);
            let ya = self.axes.get_or_create(series.y_axis_id(), &self.options)?;
            ya.used = true;
            ya.include_extent(&extents.y);
            ya.include_extent(&gap_extents.y);
            resolved.push(series);
        }
        debug!("set_data: {} series", resolved.len());
        self.series = resolved;
        self.highlights.retain(|h| h.series < self.series.len());
        Ok(())
    }

    /// Recompute ranges, ticks and the plot rectangle.
    pub fn setup_grid(&mut self) -> Result<()> {
        self.layout = layout::setup_grid(
            &mut self.axes,
            &self.series,
            &self.options,
            (self.width, self.height),
            self.text.as_ref(),
            &self.plugins,
        )?;
        Ok(())
    }

    /// Full redraw of the main layer.
    pub fn draw(&self, ctx: &mut dyn DrawContext) {
        render::draw(self, ctx);
    }

    /// Redraw the overlay layer now.
    pub fn draw_overlay(&self, ctx: &mut dyn DrawContext) {
        overlay::draw_overlay(self, ctx);
    }

    /// Redraw the overlay if a deferred redraw is due. Returns whether it drew.
    pub fn poll_overlay(&mut self, now: Instant, ctx: &mut dyn DrawContext) -> bool {
        if !self.scheduler.take_due(now) {
            return false;
        }
        self.draw_overlay(ctx);
        true
    }

    /// When the pending overlay redraw is due, if any.
    pub fn overlay_due(&self) -> Option<Instant> {
        self.scheduler.pending()
    }

    /// Change the canvas size and rerun layout.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        if width <= 0 || height <= 0 {
            return Err(PlotError::InvalidDimensions { width, height });
        }
        self.width = width as f64;
        self.height = height as f64;
        self.setup_grid()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn axes(&self) -> &AxisSet {
        &self.axes
    }

    pub fn x_axes(&self) -> &[Axis] {
        self.axes.x()
    }

    pub fn y_axes(&self) -> &[Axis] {
        self.axes.y()
    }

    pub fn axis(&self, id: AxisId) -> Option<&Axis> {
        self.axes.get(id)
    }

    pub fn plot_offset(&self) -> PlotOffset {
        self.layout.offset
    }

    pub fn plot_width(&self) -> f64 {
        self.layout.plot_width
    }

    pub fn plot_height(&self) -> f64 {
        self.layout.plot_height
    }

    pub fn plugins(&self) -> &[Box<dyn Plugin>] {
        &self.plugins
    }

    pub fn text_measure(&self) -> &dyn TextMeasure {
        self.text.as_ref()
    }

    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    /// Data coordinates of a position relative to the plot area, for every
    /// used axis.
    pub fn canvas_to_data(&self, x: f64, y: f64) -> Vec<(AxisId, f64)> {
        self.axes
            .iter()
            .filter(|a| a.used)
            .map(|a| {
                let p = match a.direction() {
                    Direction::X => x,
                    Direction::Y => y,
                };
                (a.id, a.pixel_to_data(p))
            })
            .collect()
    }

    /// Position relative to the plot area of a data point on the given axes.
    pub fn data_to_canvas(&self, x: f64, y: f64, xaxis: usize, yaxis: usize) -> Option<(f64, f64)> {
        let xa = self.axes.get(AxisId::x(xaxis))?;
        let ya = self.axes.get(AxisId::y(yaxis))?;
        Some((xa.data_to_pixel(x), ya.data_to_pixel(y)))
    }

    /// Canvas pixel of a data point on the given axes.
    pub fn point_offset(&self, x: f64, y: f64, xaxis: usize, yaxis: usize) -> Option<(f64, f64)> {
        let (px, py) = self.data_to_canvas(x, y, xaxis, yaxis)?;
        let offset = self.plot_offset();
        Some((offset.left + px, offset.top + py))
    }

    /// Nearest eligible item to canvas pixel `(x, y)` within the configured
    /// mouse radius.
    pub fn find_nearest(&self, x: f64, y: f64, predicate: impl Fn(&Series) -> bool) -> Option<Hit> {
        let offset = self.plot_offset();
        hit::find_nearest(
            &self.series,
            &self.axes,
            (offset.left, offset.top),
            (x - offset.left, y - offset.top),
            self.options.grid.mouse_active_radius,
            predicate,
        )
    }

    /// Manually highlight point `data_index` of a series at host time `now`.
    /// Manual highlights stay until unhighlighted.
    pub fn highlight(&mut self, series: usize, data_index: usize, now: Instant) {
        if let Some(point) = self.datapoint(series, data_index) {
            self.add_highlight(series, point, None, now);
        }
    }

    pub fn unhighlight(&mut self, series: usize, data_index: usize, now: Instant) {
        if let Some(point) = self.datapoint(series, data_index) {
            self.remove_highlight(series, &point, now);
        }
    }

    pub fn unhighlight_all(&mut self, now: Instant) {
        self.highlights.clear();
        self.scheduler.request(now);
    }

    /// Pointer moved to canvas pixel `(x, y)`.
    pub fn pointer_move(&mut self, x: f64, y: f64, now: Instant) {
        self.notify_plugins(Some((x, y)), now);
        if self.options.grid.hoverable {
            self.trigger(PointerEventKind::Hover, (x, y), |s| s.hoverable, now);
        }
    }

    /// Pointer left the canvas: hover fires once more with no item.
    pub fn pointer_leave(&mut self, now: Instant) {
        self.notify_plugins(None, now);
        if self.options.grid.hoverable {
            self.trigger(PointerEventKind::Hover, (-1.0, -1.0), |_| false, now);
        }
    }

    pub fn click(&mut self, x: f64, y: f64, now: Instant) {
        if self.options.grid.clickable {
            self.trigger(PointerEventKind::Click, (x, y), |s| s.clickable, now);
        }
    }

    pub fn on_hover(&mut self, listener: impl FnMut(&PlotEvent) + 'static) {
        self.hover_listeners.push(Box::new(listener));
    }

    pub fn on_click(&mut self, listener: impl FnMut(&PlotEvent) + 'static) {
        self.click_listeners.push(Box::new(listener));
    }

    /// Detach listeners and plugins' resources; the plot stays readable.
    pub fn shutdown(&mut self) {
        for plugin in &self.plugins {
            plugin.shutdown(self);
        }
        self.hover_listeners.clear();
        self.click_listeners.clear();
        self.highlights.clear();
        self.scheduler.cancel();
    }

    /// Render the main layer to a PNG file.
    pub fn render_to_png(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let bytes = self.render_to_png_bytes()?;
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    pub fn render_to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut surface = self.raster()?;
        surface.png_bytes()
    }

    /// Unpremultiplied RGBA8 pixels: `(pixels, width, height, stride)`.
    pub fn render_to_rgba8(&self) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = self.raster()?;
        surface.rgba8()
    }

    fn raster(&self) -> Result<SkiaSurface> {
        let background = self.options.grid.background_color.as_deref().map(Rgba::parse).unwrap_or(Rgba::WHITE);
        let mut surface = SkiaSurface::new(self.width as i32, self.height as i32)?.with_background(background);
        self.draw(&mut surface);
        Ok(surface)
    }

    fn datapoint(&self, series: usize, data_index: usize) -> Option<Vec<Option<f64>>> {
        let buffer = &self.series.get(series)?.datapoints;
        (data_index < buffer.len()).then(|| buffer.point(data_index).to_vec())
    }

    fn highlight_index(&self, series: usize, point: &[Option<f64>]) -> Option<usize> {
        self.highlights
            .iter()
            .position(|h| h.series == series && h.point.first() == point.first() && h.point.get(1) == point.get(1))
    }

    fn add_highlight(&mut self, series: usize, point: Vec<Option<f64>>, auto: Option<PointerEventKind>, now: Instant) {
        match self.highlight_index(series, &point) {
            None => {
                self.highlights.push(Highlight { series, point, auto });
                self.scheduler.request(now);
            }
            Some(i) if auto.is_none() => self.highlights[i].auto = None,
            Some(_) => {}
        }
    }

    fn remove_highlight(&mut self, series: usize, point: &[Option<f64>], now: Instant) {
        if let Some(i) = self.highlight_index(series, point) {
            self.highlights.remove(i);
        }
        self.scheduler.request(now);
    }

    fn notify_plugins(&mut self, pos: Option<(f64, f64)>, now: Instant) {
        let mut redraw = false;
        for plugin in &self.plugins {
            redraw |= plugin.pointer_moved(self, pos);
        }
        if redraw {
            self.scheduler.request(now);
        }
    }

    fn trigger(&mut self, kind: PointerEventKind, (x, y): (f64, f64), predicate: impl Fn(&Series) -> bool, now: Instant) {
        let offset = self.plot_offset();
        let pos = PointerPosition { canvas: (x, y), coords: self.canvas_to_data(x - offset.left, y - offset.top) };
        let item = self.find_nearest(x, y, predicate);

        if self.options.grid.auto_highlight {
            let stale: Vec<(usize, Vec<Option<f64>>)> = self
                .highlights
                .iter()
                .filter(|h| h.auto == Some(kind))
                .filter(|h| {
                    !item.as_ref().is_some_and(|it| {
                        h.series == it.series_index
                            && h.point.first() == it.datapoint.first()
                            && h.point.get(1) == it.datapoint.get(1)
                    })
                })
                .map(|h| (h.series, h.point.clone()))
                .collect();
            for (series, point) in stale {
                self.remove_highlight(series, &point, now);
            }
            if let Some(it) = &item {
                self.add_highlight(it.series_index, it.datapoint.clone(), Some(kind), now);
            }
        }

        let event = PlotEvent { kind, pos, item };
        let listeners = match kind {
            PointerEventKind::Hover => &mut self.hover_listeners,
            PointerEventKind::Click => &mut self.click_listeners,
        };
        for listener in listeners.iter_mut() {
            listener(&event);
        }
    }
}

/// 1-based axis ordinals a descriptor refers to.
fn axis_ordinals(spec: &SeriesSpec) -> (usize, usize) {
    (spec.xaxis.unwrap_or(1).max(1), spec.yaxis.unwrap_or(1).max(1))
}

/// Merge a series descriptor over the series defaults.
fn resolve_series(spec: &SeriesSpec, color: Rgba, defaults: &SeriesDefaults) -> Series {
    Series {
        label: spec.label.clone(),
        color,
        kind: spec.kind.unwrap_or_default(),
        lines: spec.lines.apply(&defaults.lines),
        points: spec.points.apply(&defaults.points),
        bars: spec.bars.apply(&defaults.bars),
        xaxis: axis_ordinals(spec).0,
        yaxis: axis_ordinals(spec).1,
        shadow_size: spec.shadow_size.unwrap_or(defaults.shadow_size),
        highlight_color: spec
            .highlight_color
            .as_deref()
            .or(defaults.highlight_color.as_deref())
            .map(Rgba::parse),
        hoverable: spec.hoverable.unwrap_or(true),
        clickable: spec.clickable.unwrap_or(true),
        datapoints: PointBuffer::default(),
    }
}
