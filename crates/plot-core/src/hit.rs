// File: crates/plot-core/src/hit.rs
// Summary: Nearest-item search for pointer positions.

use log::trace;

use crate::axis::AxisSet;
use crate::series::{Series, SeriesKind};

/// A data point resolved from a pointer position.
#[derive(Clone, Debug, PartialEq)]
pub struct Hit {
    pub series_index: usize,
    pub data_index: usize,
    pub datapoint: Vec<Option<f64>>,
    /// Canvas pixel of the point.
    pub pixel: (f64, f64),
}

/// Find the item nearest to `(mouse_x, mouse_y)` (relative to the plot
/// area) within `radius` pixels along each axis.
///
/// Series are scanned topmost first. Lines and points compete on squared
/// pixel distance; bars are hit by containment, and only while no closer
/// item has been found.
pub fn find_nearest(
    series: &[Series],
    axes: &AxisSet,
    origin: (f64, f64),
    (mouse_x, mouse_y): (f64, f64),
    radius: f64,
    predicate: impl Fn(&Series) -> bool,
) -> Option<Hit> {
    let mut smallest = radius * radius + 1.0;
    let mut item: Option<(usize, usize)> = None;

    for (i, s) in series.iter().enumerate().rev() {
        if !predicate(s) {
            continue;
        }
        let (Some(xa), Some(ya)) = (axes.get(s.x_axis_id()), axes.get(s.y_axis_id())) else {
            continue;
        };
        let mx = xa.pixel_to_data(mouse_x);
        let my = ya.pixel_to_data(mouse_y);
        let maxx = if xa.is_transformed() { f64::MAX } else { radius / xa.scale_factor() };
        let maxy = if ya.is_transformed() { f64::MAX } else { radius / ya.scale_factor() };
        let buffer = &s.datapoints;

        if s.kind != SeriesKind::Bars {
            for j in 0..buffer.len() {
                let Some((x, y)) = buffer.xy(j) else { continue };
                if (x - mx).abs() > maxx || (y - my).abs() > maxy {
                    continue;
                }
                let dx = (xa.data_to_pixel(x) - mouse_x).abs();
                let dy = (ya.data_to_pixel(y) - mouse_y).abs();
                let dist = dx * dx + dy * dy;
                if dist < smallest {
                    smallest = dist;
                    item = Some((i, j));
                }
            }
        } else if item.is_none() {
            let (lo, hi) = s.bars.edge_offsets();
            for j in 0..buffer.len() {
                let Some((x, y)) = buffer.xy(j) else { continue };
                let b = buffer.base(j);
                let inside = if s.bars.horizontal {
                    mx <= b.max(x) && mx >= b.min(x) && my >= y + lo && my <= y + hi
                } else {
                    mx >= x + lo && mx <= x + hi && my >= b.min(y) && my <= b.max(y)
                };
                if inside {
                    item = Some((i, j));
                }
            }
        }
    }

    let (series_index, data_index) = item?;
    let s = &series[series_index];
    let datapoint = s.datapoints.point(data_index).to_vec();
    let (x, y) = s.datapoints.xy(data_index)?;
    let (xa, ya) = (axes.get(s.x_axis_id())?, axes.get(s.y_axis_id())?);
    let pixel = (origin.0 + xa.data_to_pixel(x), origin.1 + ya.data_to_pixel(y));
    trace!("hit series {series_index} point {data_index} at {pixel:?}");
    Some(Hit { series_index, data_index, datapoint, pixel })
}
