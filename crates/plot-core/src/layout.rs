// File: crates/plot-core/src/layout.rs
// Summary: Grid setup: axis ranges and ticks, label measurement, axis box stacking, plot rectangle.

use log::{debug, warn};

use crate::axis::{AlignReference, AxisId, AxisSet, Direction};
use crate::error::Result;
use crate::options::{AxisPosition, Options, TickLength};
use crate::plugin::Plugin;
use crate::series::Series;
use crate::text::TextMeasure;
use crate::types::PlotOffset;

/// Outcome of a layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Layout {
    pub offset: PlotOffset,
    pub plot_width: f64,
    pub plot_height: f64,
}

/// Run a full layout pass over `axes` for a canvas of `width` x `height`.
///
/// Axis data extents must already be accumulated. Order: seed margins,
/// ranges, ticks and label sizes, axis boxes from the outside in, room for
/// protruding labels and markers, final boxes, pixel transforms.
pub fn setup_grid(
    axes: &mut AxisSet,
    series: &[Series],
    options: &Options,
    (width, height): (f64, f64),
    text: &dyn TextMeasure,
    plugins: &[Box<dyn Plugin>],
) -> Result<Layout> {
    debug_assert!(axes.is_contiguous(), "axis ordinals are created densely");
    let grid = &options.grid;

    let mut offset = PlotOffset::new(grid.margin.left(), grid.margin.right(), grid.margin.top(), grid.margin.bottom());
    for plugin in plugins {
        plugin.process_offset(&mut offset);
    }
    if grid.show {
        offset.left += grid.border_width.left();
        offset.right += grid.border_width.right();
        offset.top += grid.border_width.top();
        offset.bottom += grid.border_width.bottom();
    }

    for axis in axes.iter_mut() {
        axis.show = axis.options.show.unwrap_or(axis.used);
        axis.reserve_space = axis.options.reserve_space.unwrap_or(axis.show);
        for plugin in plugins {
            plugin.process_axis(axis);
        }
        axis.compute_range();
    }

    if grid.show {
        let allocated: Vec<AxisId> = axes.iter().filter(|a| a.show || a.reserve_space).map(|a| a.id).collect();

        for &id in &allocated {
            let dimension = match id.direction {
                Direction::X => width,
                Direction::Y => height,
            };
            let reference = alignment_reference(axes, id);
            let Some(axis) = axes.get_mut(id) else { continue };
            axis.set_tick_size(dimension)?;
            if let Some(reference) = reference {
                axis.align_to(reference);
            }
            axis.set_ticks();

            let font = axis.font();
            let (mut lw, mut lh) = (0.0f64, 0.0f64);
            for tick in axis.ticks.iter().filter(|t| !t.label.is_empty()) {
                let (w, h) = text.measure(&tick.label, &font);
                lw = lw.max(w);
                lh = lh.max(h);
            }
            axis.label_width = axis.options.label_width.filter(|v| *v != 0.0).unwrap_or(lw);
            axis.label_height = axis.options.label_height.filter(|v| *v != 0.0).unwrap_or(lh);
        }

        for &id in allocated.iter().rev() {
            allocate_box(axes, id, options, (width, height), &mut offset);
        }

        reserve_protrusions(axes, series, options, &mut offset);
        clamp_offset(&mut offset, width, height);

        for &id in &allocated {
            let Some(axis) = axes.get_mut(id) else { continue };
            match id.direction {
                Direction::X => {
                    axis.bbox.left = offset.left - axis.label_width / 2.0;
                    axis.bbox.width = width - offset.left - offset.right + axis.label_width;
                }
                Direction::Y => {
                    axis.bbox.top = offset.top - axis.label_height / 2.0;
                    axis.bbox.height = height - offset.bottom - offset.top + axis.label_height;
                }
            }
        }
    } else {
        clamp_offset(&mut offset, width, height);
    }

    let plot_width = (width - offset.left - offset.right).max(1.0);
    let plot_height = (height - offset.top - offset.bottom).max(1.0);
    for axis in axes.iter_mut() {
        let pixels = match axis.direction() {
            Direction::X => plot_width,
            Direction::Y => plot_height,
        };
        axis.set_scale(pixels);
    }

    debug!("layout: offset {offset:?}, plot area {plot_width}x{plot_height}");
    Ok(Layout { offset, plot_width, plot_height })
}

/// Ticks of the axis `id` is configured to align with, if that axis is an
/// earlier, used axis of the same direction.
fn alignment_reference(axes: &AxisSet, id: AxisId) -> Option<AlignReference> {
    let axis = axes.get(id)?;
    let k = axis.options.align_ticks_with_axis?;
    if k >= id.n {
        if k != id.n {
            warn!("{id}: can only align ticks with an earlier axis, ignoring align_ticks_with_axis={k}");
        }
        return None;
    }
    let other = axes.get(AxisId::new(id.direction, k))?;
    if !other.used {
        return None;
    }
    Some(AlignReference { ticks: other.ticks.iter().map(|t| t.value).collect(), min: other.min, max: other.max })
}

/// Reserve the strip for one axis on its side, stacking outward.
fn allocate_box(axes: &mut AxisSet, id: AxisId, options: &Options, (width, height): (f64, f64), offset: &mut PlotOffset) {
    let Some(axis) = axes.get(id) else { return };
    let position = axis.position;

    let (mut innermost, mut outermost, mut first, mut found) = (true, true, true, false);
    for other in axes.direction(id.direction).iter().filter(|a| a.show || a.reserve_space) {
        if other.id == id {
            found = true;
        } else if other.position == position {
            if found {
                outermost = false;
            } else {
                innermost = false;
            }
        }
        if !found {
            first = false;
        }
    }

    let axis_margin = if outermost { 0.0 } else { options.grid.axis_margin };
    let tick_length = axis.options.tick_length.unwrap_or(if first { TickLength::Full } else { TickLength::Pixels(5.0) });
    let mut padding = options.grid.label_margin;
    if let TickLength::Pixels(p) = tick_length {
        padding += p;
    }

    let Some(axis) = axes.get_mut(id) else { return };
    match id.direction {
        Direction::X => {
            let lh = axis.label_height + padding;
            axis.bbox.height = lh;
            if position == AxisPosition::Top {
                axis.bbox.top = offset.top + axis_margin;
                offset.top += lh + axis_margin;
            } else {
                offset.bottom += lh + axis_margin;
                axis.bbox.top = height - offset.bottom;
            }
        }
        Direction::Y => {
            let lw = axis.label_width + padding;
            axis.bbox.width = lw;
            if position == AxisPosition::Right {
                offset.right += lw + axis_margin;
                axis.bbox.left = width - offset.right;
            } else {
                axis.bbox.left = offset.left + axis_margin;
                offset.left += lw + axis_margin;
            }
        }
    }
    axis.tick_length = tick_length;
    axis.bbox.padding = padding;
    axis.innermost = innermost;
}

/// Widen margins so half labels at the plot edges and point markers fit.
fn reserve_protrusions(axes: &AxisSet, series: &[Series], options: &Options, offset: &mut PlotOffset) {
    let base = options.grid.min_border_margin.unwrap_or_else(|| {
        series.iter().map(|s| 2.0 * (s.points.radius + s.points.line_width / 2.0)).fold(0.0, f64::max)
    });
    let mut room = PlotOffset::uniform(base);
    for axis in axes.iter().filter(|a| a.reserve_space && !a.ticks.is_empty()) {
        match axis.direction() {
            Direction::X => {
                room.left = room.left.max(axis.label_width / 2.0);
                room.right = room.right.max(axis.label_width / 2.0);
            }
            Direction::Y => {
                room.bottom = room.bottom.max(axis.label_height / 2.0);
                room.top = room.top.max(axis.label_height / 2.0);
            }
        }
    }
    offset.left = room.left.max(offset.left).ceil();
    offset.right = room.right.max(offset.right).ceil();
    offset.top = room.top.max(offset.top).ceil();
    offset.bottom = room.bottom.max(offset.bottom).ceil();
}

/// Scale margins down so the plot rectangle keeps at least one pixel.
fn clamp_offset(offset: &mut PlotOffset, width: f64, height: f64) {
    if offset.hsum() >= width {
        let f = ((width - 1.0).max(0.0)) / offset.hsum();
        warn!("horizontal margins {} exceed canvas width {width}; scaling by {f:.3}", offset.hsum());
        offset.left = (offset.left * f).floor();
        offset.right = (offset.right * f).floor();
    }
    if offset.vsum() >= height {
        let f = ((height - 1.0).max(0.0)) / offset.vsum();
        warn!("vertical margins {} exceed canvas height {height}; scaling by {f:.3}", offset.vsum());
        offset.top = (offset.top * f).floor();
        offset.bottom = (offset.bottom * f).floor();
    }
}
