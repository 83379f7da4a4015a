// File: crates/plot-core/src/overlay.rs
// Summary: Highlight set, overlay redraw scheduling and the highlight painter.

use std::time::{Duration, Instant};

use crate::canvas::{DrawContext, StrokeStyle};
use crate::plot::{Plot, PointerEventKind};
use crate::render::{draw_bar, trace_symbol, viewport};
use crate::series::SeriesKind;

/// One highlighted point. `auto` records which pointer event created it;
/// manual highlights have none.
#[derive(Clone, Debug, PartialEq)]
pub struct Highlight {
    pub series: usize,
    pub point: Vec<Option<f64>>,
    pub auto: Option<PointerEventKind>,
}

impl Highlight {
    pub fn xy(&self) -> Option<(f64, f64)> {
        Some((self.point.first().copied()??, self.point.get(1).copied()??))
    }
}

/// Coalesces overlay redraw requests: at most one redraw is pending, due
/// `interval` after the first request. No interval means due immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct OverlayScheduler {
    interval: Option<Duration>,
    pending: Option<Instant>,
}

impl OverlayScheduler {
    /// `interval_ms < 0` redraws on the next poll.
    pub fn from_millis(interval_ms: f64) -> Self {
        let interval = (interval_ms >= 0.0).then(|| Duration::from_secs_f64(interval_ms / 1000.0));
        Self { interval, pending: None }
    }

    pub fn request(&mut self, now: Instant) {
        match self.interval {
            None => self.pending = Some(now),
            Some(interval) => {
                if self.pending.is_none() {
                    self.pending = Some(now + interval);
                }
            }
        }
    }

    pub fn pending(&self) -> Option<Instant> {
        self.pending
    }

    /// Clear and report the pending redraw if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(due) if due <= now => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Paint every highlight, then the plugin overlay layers.
pub fn draw_overlay(plot: &Plot, ctx: &mut dyn DrawContext) {
    let offset = plot.plot_offset();
    ctx.clear();
    ctx.save();
    ctx.translate(offset.left, offset.top);
    for hl in plot.highlights() {
        let Some(series) = plot.series().get(hl.series) else { continue };
        let (Some(xa), Some(ya)) = (plot.axes().get(series.x_axis_id()), plot.axes().get(series.y_axis_id())) else {
            continue;
        };
        let Some((x, y)) = hl.xy() else { continue };
        let color = series.highlight();

        if series.kind == SeriesKind::Bars {
            let base = hl.point.get(2).copied().flatten().unwrap_or(0.0);
            let style = StrokeStyle::new(color, series.bars.line_width);
            draw_bar(ctx, series, xa, ya, (x, y, base), Some(color), Some(&style));
            continue;
        }

        if !viewport(xa, ya).contains(x, y) {
            continue;
        }
        let point_radius = series.points.radius + series.points.line_width / 2.0;
        let (px, py) = (xa.data_to_pixel(x), ya.data_to_pixel(y));
        ctx.begin_path();
        trace_symbol(ctx, &series.points.symbol, px, py, 1.5 * point_radius, false);
        ctx.close_path();
        ctx.stroke(&StrokeStyle::new(color, point_radius));
    }
    ctx.restore();

    for plugin in plot.plugins() {
        plugin.draw_overlay(plot, ctx);
    }
}
