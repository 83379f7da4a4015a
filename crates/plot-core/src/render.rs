// File: crates/plot-core/src/render.rs
// Summary: Full redraw: background, grid (markings, ticks, border), series painters, axis labels.

use std::f64::consts::PI;

use log::warn;

use crate::axis::{Axis, AxisId, AxisSet, Direction};
use crate::canvas::{DrawContext, StrokeStyle, TextAlign, TextBaseline};
use crate::color::Rgba;
use crate::geometry::{bar_rect, clamped_polyline, clip_segment, Viewport};
use crate::legend;
use crate::options::{AxisPosition, Marking, MarkingRange, TickLength};
use crate::plot::Plot;
use crate::series::{FillSpec, Series, SeriesKind, Symbol};
use crate::types::Sides;

/// Direction of the drop shadow, measured from straight down.
pub const SHADOW_ANGLE: f64 = PI / 18.0;

fn shadow_color(alpha: f64) -> Rgba {
    Rgba::make(0.0, 0.0, 0.0, alpha)
}

/// Draw the whole plot: clear, background, grid, series, plugin layers,
/// axis labels and legend.
pub fn draw(plot: &Plot, ctx: &mut dyn DrawContext) {
    let options = plot.options();
    ctx.clear();
    for plugin in plot.plugins() {
        plugin.draw_background(plot, ctx);
    }
    if let Some(bg) = &options.grid.background_color {
        let offset = plot.plot_offset();
        ctx.save();
        ctx.translate(offset.left, offset.top);
        ctx.fill_rect(0.0, 0.0, plot.plot_width(), plot.plot_height(), Rgba::parse(bg));
        ctx.restore();
    }
    if options.grid.show && !options.grid.above_data {
        draw_grid(plot, ctx);
    }
    for series in plot.series() {
        for plugin in plot.plugins() {
            plugin.draw_series(plot, ctx, series);
        }
        draw_series(plot, ctx, series);
    }
    for plugin in plot.plugins() {
        plugin.draw(plot, ctx);
    }
    if options.grid.show && options.grid.above_data {
        draw_grid(plot, ctx);
    }
    if options.grid.show {
        draw_axis_labels(plot, ctx);
    }
    legend::draw_legend(plot, ctx);
}

/// Visible data rectangle of a series' axis pair.
pub fn viewport(xaxis: &Axis, yaxis: &Axis) -> Viewport {
    Viewport::new(xaxis.min, xaxis.max, yaxis.min, yaxis.max)
}

fn series_axes<'a>(axes: &'a AxisSet, series: &Series) -> Option<(&'a Axis, &'a Axis)> {
    Some((axes.get(series.x_axis_id())?, axes.get(series.y_axis_id())?))
}

/// Paint one series in the plot area.
pub fn draw_series(plot: &Plot, ctx: &mut dyn DrawContext, series: &Series) {
    let Some((xa, ya)) = series_axes(plot.axes(), series) else {
        return;
    };
    let offset = plot.plot_offset();
    ctx.save();
    ctx.translate(offset.left, offset.top);
    match series.kind {
        SeriesKind::Lines => draw_lines(ctx, series, xa, ya),
        SeriesKind::Bars => draw_bars(ctx, series, xa, ya),
        SeriesKind::Points => draw_points(ctx, series, xa, ya),
    }
    ctx.restore();
}

/// Fill color for a style: explicit fill color, else the series color at
/// the fill opacity.
fn fill_color(fill: FillSpec, explicit: Option<&str>, series_color: Rgba) -> Option<Rgba> {
    let opacity = fill.opacity()?;
    Some(match explicit {
        Some(c) => Rgba::parse(c),
        None => series_color.with_alpha(opacity),
    })
}

fn draw_lines(ctx: &mut dyn DrawContext, series: &Series, xa: &Axis, ya: &Axis) {
    let lw = series.lines.line_width;
    let sw = series.shadow_size;
    let vp = viewport(xa, ya);

    if lw > 0.0 && sw > 0.0 {
        let (s, c) = SHADOW_ANGLE.sin_cos();
        let d1 = lw / 2.0 + sw / 2.0;
        plot_line(ctx, series, xa, ya, &vp, (s * d1, c * d1), &StrokeStyle::new(shadow_color(0.1), sw).round());
        let d2 = lw / 2.0 + sw / 4.0;
        plot_line(ctx, series, xa, ya, &vp, (s * d2, c * d2), &StrokeStyle::new(shadow_color(0.1), sw / 2.0).round());
    }
    if let Some(color) = fill_color(series.lines.fill, series.lines.fill_color.as_deref(), series.color) {
        plot_line_area(ctx, series, xa, ya, &vp, color);
    }
    if lw > 0.0 {
        plot_line(ctx, series, xa, ya, &vp, (0.0, 0.0), &StrokeStyle::new(series.color, lw).round());
    }
}

/// Stroke the visible segments of a series. Gaps break the path; a sample
/// with gaps on both sides becomes a zero-length subpath.
fn plot_line(
    ctx: &mut dyn DrawContext,
    series: &Series,
    xa: &Axis,
    ya: &Axis,
    vp: &Viewport,
    (xoff, yoff): (f64, f64),
    style: &StrokeStyle,
) {
    let buffer = &series.datapoints;
    let n = buffer.len();
    let to_px = |(x, y): (f64, f64)| (xa.data_to_pixel(x) + xoff, ya.data_to_pixel(y) + yoff);
    let mut prev: Option<(f64, f64)> = None;

    ctx.begin_path();
    for i in 0..n {
        let cur = buffer.xy(i);
        let before = if i > 0 { buffer.xy(i - 1) } else { None };
        if let (Some(a), Some(b)) = (before, cur) {
            if let Some((p1, p2)) = clip_segment(a, b, vp) {
                if prev != Some(p1) {
                    let (px, py) = to_px(p1);
                    ctx.move_to(px, py);
                }
                let (px, py) = to_px(p2);
                ctx.line_to(px, py);
                prev = Some(p2);
            }
        }
        if let Some(p) = cur {
            let after = if i + 1 < n { buffer.xy(i + 1) } else { None };
            if before.is_none() && after.is_none() && vp.contains(p.0, p.1) {
                let (px, py) = to_px(p);
                ctx.move_to(px, py);
                ctx.line_to(px, py);
                prev = Some(p);
            }
        }
    }
    ctx.stroke(style);
}

/// Fill one closed polygon per contiguous run, between the data line and
/// the per-point base, both clamped vertically to the viewport.
fn plot_line_area(ctx: &mut dyn DrawContext, series: &Series, xa: &Axis, ya: &Axis, vp: &Viewport, color: Rgba) {
    let buffer = &series.datapoints;
    let mut runs: Vec<Vec<usize>> = Vec::new();
    let mut run: Vec<usize> = Vec::new();
    for i in 0..buffer.len() {
        if buffer.xy(i).is_some() {
            run.push(i);
        } else if !run.is_empty() {
            runs.push(std::mem::take(&mut run));
        }
    }
    if !run.is_empty() {
        runs.push(run);
    }

    for run in runs.iter().filter(|r| r.len() > 1) {
        let top: Vec<(f64, f64)> = run.iter().filter_map(|&i| buffer.xy(i)).collect();
        let mut base: Vec<(f64, f64)> = run.iter().filter_map(|&i| buffer.xy(i).map(|(x, _)| (x, buffer.base(i)))).collect();
        base.reverse();
        let outline_top = clamped_polyline(&top, vp);
        let outline_base = clamped_polyline(&base, vp);
        if outline_top.is_empty() {
            continue;
        }

        ctx.begin_path();
        for (k, &(x, y)) in outline_top.iter().chain(outline_base.iter()).enumerate() {
            let (px, py) = (xa.data_to_pixel(x), ya.data_to_pixel(y));
            if k == 0 {
                ctx.move_to(px, py);
            } else {
                ctx.line_to(px, py);
            }
        }
        ctx.close_path();
        ctx.fill(color);
    }
}

fn draw_bars(ctx: &mut dyn DrawContext, series: &Series, xa: &Axis, ya: &Axis) {
    let lw = series.bars.line_width;
    let sw = series.shadow_size;
    let fill = fill_color(series.bars.fill, series.bars.fill_color.as_deref(), series.color);
    let buffer = &series.datapoints;

    if lw > 0.0 && sw > 0.0 {
        let (s, c) = SHADOW_ANGLE.sin_cos();
        for (width, dist) in [(sw, lw / 2.0 + sw / 2.0), (sw / 2.0, lw / 2.0 + sw / 4.0)] {
            let style = StrokeStyle::new(shadow_color(0.1), width);
            ctx.save();
            ctx.translate(s * dist, c * dist);
            for i in 0..buffer.len() {
                if let Some((x, y)) = buffer.xy(i) {
                    draw_bar(ctx, series, xa, ya, (x, y, buffer.base(i)), None, Some(&style));
                }
            }
            ctx.restore();
        }
    }

    let style = StrokeStyle::new(series.color, lw);
    for i in 0..buffer.len() {
        if let Some((x, y)) = buffer.xy(i) {
            draw_bar(ctx, series, xa, ya, (x, y, buffer.base(i)), fill, (lw > 0.0).then_some(&style));
        }
    }
}

/// Fill and outline one bar, already translated to the plot area. Edges cut
/// by the viewport or lying on the baseline are not outlined.
pub(crate) fn draw_bar(
    ctx: &mut dyn DrawContext,
    series: &Series,
    xa: &Axis,
    ya: &Axis,
    (x, y, base): (f64, f64, f64),
    fill: Option<Rgba>,
    outline: Option<&StrokeStyle>,
) {
    let (lo, hi) = series.bars.edge_offsets();
    let Some(bar) = bar_rect(x, y, base, lo, hi, series.bars.horizontal, &viewport(xa, ya)) else {
        return;
    };
    let left = xa.data_to_pixel(bar.left);
    let right = xa.data_to_pixel(bar.right);
    let top = ya.data_to_pixel(bar.top);
    let bottom = ya.data_to_pixel(bar.bottom);

    if let Some(color) = fill {
        ctx.fill_rect(left, top, right - left, bottom - top, color);
    }
    if let Some(style) = outline {
        if !bar.edges.any() {
            return;
        }
        let e = bar.edges;
        ctx.begin_path();
        ctx.move_to(left, bottom);
        let steps = [(e.left, (left, top)), (e.top, (right, top)), (e.right, (right, bottom)), (e.bottom, (left, bottom))];
        for (visible, (px, py)) in steps {
            if visible {
                ctx.line_to(px, py);
            } else {
                ctx.move_to(px, py);
            }
        }
        ctx.stroke(style);
    }
}

fn draw_points(ctx: &mut dyn DrawContext, series: &Series, xa: &Axis, ya: &Axis) {
    let mut lw = series.points.line_width;
    let sw = series.shadow_size;
    let radius = series.points.radius;
    if lw == 0.0 {
        lw = 0.0001;
    }

    if lw > 0.0 && sw > 0.0 {
        let w = sw / 2.0;
        plot_points(ctx, series, xa, ya, radius, None, w + w / 2.0, true, &StrokeStyle::new(shadow_color(0.1), w));
        plot_points(ctx, series, xa, ya, radius, None, w / 2.0, true, &StrokeStyle::new(shadow_color(0.2), w));
    }
    let fill = fill_color(series.points.fill, series.points.fill_color.as_deref(), series.color);
    plot_points(ctx, series, xa, ya, radius, fill, 0.0, false, &StrokeStyle::new(series.color, lw));
}

#[allow(clippy::too_many_arguments)]
fn plot_points(
    ctx: &mut dyn DrawContext,
    series: &Series,
    xa: &Axis,
    ya: &Axis,
    radius: f64,
    fill: Option<Rgba>,
    yoff: f64,
    shadow: bool,
    style: &StrokeStyle,
) {
    let vp = viewport(xa, ya);
    let buffer = &series.datapoints;
    for i in 0..buffer.len() {
        let Some((x, y)) = buffer.xy(i) else { continue };
        if !vp.contains(x, y) {
            continue;
        }
        ctx.begin_path();
        trace_symbol(ctx, &series.points.symbol, xa.data_to_pixel(x), ya.data_to_pixel(y) + yoff, radius, shadow);
        ctx.close_path();
        if let Some(color) = fill {
            ctx.fill(color);
        }
        ctx.stroke(style);
    }
}

/// Add a marker outline to the current path. Shadows only trace the lower
/// half where the symbol allows.
pub fn trace_symbol(ctx: &mut dyn DrawContext, symbol: &Symbol, x: f64, y: f64, radius: f64, shadow: bool) {
    match symbol {
        Symbol::Circle => ctx.arc(x, y, radius, 0.0, if shadow { PI } else { 2.0 * PI }),
        Symbol::Square => {
            let size = radius * PI.sqrt() / 2.0;
            ctx.move_to(x - size, y - size);
            ctx.line_to(x + size, y - size);
            ctx.line_to(x + size, y + size);
            ctx.line_to(x - size, y + size);
            ctx.line_to(x - size, y - size);
        }
        Symbol::Diamond => {
            let size = radius * (PI / 2.0).sqrt();
            ctx.move_to(x - size, y);
            ctx.line_to(x, y - size);
            ctx.line_to(x + size, y);
            ctx.line_to(x, y + size);
            ctx.line_to(x - size, y);
        }
        Symbol::Triangle => {
            let size = radius * (2.0 * PI / (PI / 3.0).sin()).sqrt();
            let height = size * (PI / 3.0).sin();
            ctx.move_to(x - size / 2.0, y + height / 2.0);
            ctx.line_to(x + size / 2.0, y + height / 2.0);
            if !shadow {
                ctx.line_to(x, y - height / 2.0);
                ctx.line_to(x - size / 2.0, y + height / 2.0);
            }
        }
        Symbol::Cross => {
            let size = radius * PI.sqrt() / 2.0;
            ctx.move_to(x - size, y - size);
            ctx.line_to(x + size, y + size);
            ctx.move_to(x - size, y + size);
            ctx.line_to(x + size, y - size);
        }
        Symbol::Custom(painter) => painter(ctx, x, y, radius, shadow),
    }
}

/// Markings, axis lines, tick lines and the border.
pub fn draw_grid(plot: &Plot, ctx: &mut dyn DrawContext) {
    let options = plot.options();
    let grid = &options.grid;
    let axes = plot.axes();
    let (pw, ph) = (plot.plot_width(), plot.plot_height());
    let offset = plot.plot_offset();

    ctx.save();
    ctx.translate(offset.left, offset.top);

    let markings: Vec<Marking> = match &grid.markings_fn {
        Some(f) => f(&axes.ranges()),
        None => grid.markings.clone(),
    };
    for marking in &markings {
        draw_marking(ctx, axes, marking, grid.markings_color.as_str(), grid.markings_line_width);
    }

    for axis in axes.iter().filter(|a| a.show && !a.ticks.is_empty()) {
        draw_axis_ticks(ctx, axis, &grid.border_width, offset.left, offset.top, pw, ph);
    }

    draw_border(ctx, &grid.border_width, grid.border_color.as_ref(), &grid.color, pw, ph);
    ctx.restore();
}

fn resolve_marking_range<'a>(axes: &'a AxisSet, range: Option<&MarkingRange>, direction: Direction) -> Option<(f64, f64, &'a Axis)> {
    let n = range.and_then(|r| r.axis).unwrap_or(1);
    let axis = axes.get(AxisId::new(direction, n))?;
    let from = range.and_then(|r| r.from).unwrap_or(axis.min);
    let to = range.and_then(|r| r.to).unwrap_or(axis.max);
    if from.is_nan() || to.is_nan() {
        return None;
    }
    let (from, to) = if from > to { (to, from) } else { (from, to) };
    Some((from, to, axis))
}

fn draw_marking(ctx: &mut dyn DrawContext, axes: &AxisSet, marking: &Marking, default_color: &str, default_width: f64) {
    let (Some(xr), Some(yr)) = (
        resolve_marking_range(axes, marking.xaxis.as_ref(), Direction::X),
        resolve_marking_range(axes, marking.yaxis.as_ref(), Direction::Y),
    ) else {
        warn!("skipping marking with unknown axis or NaN bounds: {marking:?}");
        return;
    };
    let (xfrom, xto, xa) = xr;
    let (yfrom, yto, ya) = yr;
    if xto < xa.min || xfrom > xa.max || yto < ya.min || yfrom > ya.max {
        return;
    }
    let (xfrom, xto) = (xfrom.max(xa.min), xto.min(xa.max));
    let (yfrom, yto) = (yfrom.max(ya.min), yto.min(ya.max));
    let xequal = xfrom == xto;
    let yequal = yfrom == yto;
    if xequal && yequal {
        return;
    }

    let x1 = xa.data_to_pixel(xfrom).floor();
    let x2 = xa.data_to_pixel(xto).floor();
    let y1 = ya.data_to_pixel(yfrom).floor();
    let y2 = ya.data_to_pixel(yto).floor();
    let color = Rgba::parse(marking.color.as_deref().unwrap_or(default_color));

    if xequal || yequal {
        let width = marking.line_width.filter(|w| *w != 0.0).unwrap_or(default_width);
        let sub = if width % 2.0 != 0.0 { 0.5 } else { 0.0 };
        ctx.begin_path();
        if xequal {
            ctx.move_to(x2 + sub, y1);
            ctx.line_to(x2 + sub, y2);
        } else {
            ctx.move_to(x1, y2 + sub);
            ctx.line_to(x2, y2 + sub);
        }
        ctx.stroke(&StrokeStyle::new(color, width));
    } else {
        ctx.fill_rect(x1, y2, x2 - x1, y1 - y2, color);
    }
}

fn draw_axis_ticks(ctx: &mut dyn DrawContext, axis: &Axis, border: &Sides<f64>, left: f64, top: f64, pw: f64, ph: f64) {
    let b = axis.bbox;
    let full = axis.tick_length == TickLength::Full;
    let (mut x, mut y) = (0.0, 0.0);
    match axis.direction() {
        Direction::X => {
            y = if full {
                if axis.position == AxisPosition::Top { 0.0 } else { ph }
            } else {
                b.top - top + if axis.position == AxisPosition::Top { b.height } else { 0.0 }
            };
        }
        Direction::Y => {
            x = if full {
                if axis.position == AxisPosition::Left { 0.0 } else { pw }
            } else {
                b.left - left + if axis.position == AxisPosition::Left { b.width } else { 0.0 }
            };
        }
    }

    if !axis.innermost {
        let color = Rgba::parse(axis.options.color.as_deref().unwrap_or("#545454"));
        ctx.begin_path();
        match axis.direction() {
            Direction::X => {
                let yy = y.floor() + 0.5;
                ctx.move_to(x, yy);
                ctx.line_to(x + pw + 1.0, yy);
            }
            Direction::Y => {
                let xx = x.floor() + 0.5;
                ctx.move_to(xx, y);
                ctx.line_to(xx, y + ph + 1.0);
            }
        }
        ctx.stroke(&StrokeStyle::new(color, 1.0));
    }

    let border_on_side = match axis.position {
        AxisPosition::Top => border.top(),
        AxisPosition::Right => border.right(),
        AxisPosition::Bottom => border.bottom(),
        AxisPosition::Left => border.left(),
    } > 0.0;
    let length = match axis.tick_length {
        TickLength::Full => None,
        TickLength::Pixels(p) => Some(p),
    };

    let color = Rgba::parse(axis.options.tick_color.as_deref().unwrap_or("#545454"));
    ctx.begin_path();
    for tick in &axis.ticks {
        let v = tick.value;
        if v.is_nan() || v < axis.min || v > axis.max {
            continue;
        }
        if full && border_on_side && (v == axis.min || v == axis.max) {
            continue;
        }
        match axis.direction() {
            Direction::X => {
                let px = axis.data_to_pixel(v).floor() + 0.5;
                let mut yoff = length.unwrap_or(-ph);
                if axis.position == AxisPosition::Top {
                    yoff = -yoff;
                }
                ctx.move_to(px, y);
                ctx.line_to(px, y + yoff);
            }
            Direction::Y => {
                let py = axis.data_to_pixel(v).floor() + 0.5;
                let mut xoff = length.unwrap_or(-pw);
                if axis.position == AxisPosition::Left {
                    xoff = -xoff;
                }
                ctx.move_to(x, py);
                ctx.line_to(x + xoff, py);
            }
        }
    }
    ctx.stroke(&StrokeStyle::new(color, 1.0));
}

fn draw_border(ctx: &mut dyn DrawContext, width: &Sides<f64>, color: Option<&Sides<String>>, grid_color: &str, pw: f64, ph: f64) {
    let side_color = |pick: fn(&Sides<String>) -> String| Rgba::parse(&color.map(pick).unwrap_or_else(|| grid_color.to_string()));
    let uniform_color = color.map_or(true, |c| c.is_uniform());

    if width.is_uniform() && uniform_color {
        let bw = width.top();
        if bw > 0.0 {
            let style = StrokeStyle::new(side_color(Sides::top), bw);
            ctx.stroke_rect(-bw / 2.0, -bw / 2.0, pw + bw, ph + bw, &style);
        }
        return;
    }

    let (t, r, b, l) = (width.top(), width.right(), width.bottom(), width.left());
    if t > 0.0 {
        ctx.begin_path();
        ctx.move_to(-l, -t / 2.0);
        ctx.line_to(pw, -t / 2.0);
        ctx.stroke(&StrokeStyle::new(side_color(Sides::top), t));
    }
    if r > 0.0 {
        ctx.begin_path();
        ctx.move_to(pw + r / 2.0, -t);
        ctx.line_to(pw + r / 2.0, ph);
        ctx.stroke(&StrokeStyle::new(side_color(Sides::right), r));
    }
    if b > 0.0 {
        ctx.begin_path();
        ctx.move_to(pw + r, ph + b / 2.0);
        ctx.line_to(0.0, ph + b / 2.0);
        ctx.stroke(&StrokeStyle::new(side_color(Sides::bottom), b));
    }
    if l > 0.0 {
        ctx.begin_path();
        ctx.move_to(-l / 2.0, ph + b);
        ctx.line_to(-l / 2.0, 0.0);
        ctx.stroke(&StrokeStyle::new(side_color(Sides::left), l));
    }
}

/// Tick labels for every shown axis, positioned in its box.
pub fn draw_axis_labels(plot: &Plot, ctx: &mut dyn DrawContext) {
    let offset = plot.plot_offset();
    let grid_color = Rgba::parse(&plot.options().grid.color);
    for axis in plot.axes().iter().filter(|a| a.show && !a.ticks.is_empty()) {
        let font = axis.font();
        let color = font.color.as_deref().map(Rgba::parse).unwrap_or(grid_color);
        let b = axis.bbox;
        for tick in &axis.ticks {
            if tick.label.is_empty() || tick.value < axis.min || tick.value > axis.max {
                continue;
            }
            let (x, y, align, baseline) = match axis.direction() {
                Direction::X => {
                    let x = offset.left + axis.data_to_pixel(tick.value);
                    if axis.position == AxisPosition::Top {
                        (x, b.top + b.height - b.padding, TextAlign::Center, TextBaseline::Bottom)
                    } else {
                        (x, b.top + b.padding, TextAlign::Center, TextBaseline::Top)
                    }
                }
                Direction::Y => {
                    let y = offset.top + axis.data_to_pixel(tick.value);
                    if axis.position == AxisPosition::Right {
                        (b.left + b.padding, y, TextAlign::Left, TextBaseline::Middle)
                    } else {
                        (b.left + b.width - b.padding, y, TextAlign::Right, TextBaseline::Middle)
                    }
                }
            };
            ctx.fill_text(&tick.label, x, y, align, baseline, &font, color);
        }
    }
}
