// File: crates/plot-core/src/geometry.rs
// Summary: Data-space geometry: viewport clipping for segments, fill outlines and bars.

/// Axis-aligned data-space rectangle formed by an x and a y axis range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Viewport {
    pub const fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self { xmin, xmax, ymin, ymax }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.xmin && x <= self.xmax && y >= self.ymin && y <= self.ymax
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}

/// Clip a segment against the left and right viewport edges, then the
/// horizontal ones. Each edge clamps the endpoint lying outside it; the
/// segment is dropped as soon as both endpoints are outside one edge.
pub fn clip_segment(p1: (f64, f64), p2: (f64, f64), vp: &Viewport) -> Option<((f64, f64), (f64, f64))> {
    let (x1, y1, x2, y2) = clip_x(p1.0, p1.1, p2.0, p2.1, vp.xmin, vp.xmax)?;
    // clip_x with swapped roles handles the y edges.
    let (y1, x1, y2, x2) = clip_x(y1, x1, y2, x2, vp.ymin, vp.ymax)?;
    Some(((x1, y1), (x2, y2)))
}

/// Sequential clamp along the first coordinate of each point.
fn clip_x(
    mut x1: f64,
    mut y1: f64,
    mut x2: f64,
    mut y2: f64,
    min: f64,
    max: f64,
) -> Option<(f64, f64, f64, f64)> {
    if x1 <= x2 && x1 < min {
        if x2 < min {
            return None;
        }
        y1 = (min - x1) / (x2 - x1) * (y2 - y1) + y1;
        x1 = min;
    } else if x2 <= x1 && x2 < min {
        if x1 < min {
            return None;
        }
        y2 = (min - x1) / (x2 - x1) * (y2 - y1) + y1;
        x2 = min;
    }

    if x1 >= x2 && x1 > max {
        if x2 > max {
            return None;
        }
        y1 = (max - x1) / (x2 - x1) * (y2 - y1) + y1;
        x1 = max;
    } else if x2 >= x1 && x2 > max {
        if x1 > max {
            return None;
        }
        y2 = (max - x1) / (x2 - x1) * (y2 - y1) + y1;
        x2 = max;
    }
    Some((x1, y1, x2, y2))
}

/// Build the outline of one contiguous run for area fills.
///
/// Segments are clipped horizontally, but vertical excursions are clamped to
/// the viewport edge (with the crossing vertex inserted) so the outline keeps
/// its full x-extent even where the data leaves the chart.
pub fn clamped_polyline(run: &[(f64, f64)], vp: &Viewport) -> Vec<(f64, f64)> {
    let mut out: Vec<(f64, f64)> = Vec::with_capacity(run.len() * 2);
    let push = |p: (f64, f64), out: &mut Vec<(f64, f64)>| {
        let p = (p.0, clamp(p.1, vp.ymin, vp.ymax));
        if out.last() != Some(&p) {
            out.push(p);
        }
    };

    if run.len() == 1 {
        let (x, y) = run[0];
        if x >= vp.xmin && x <= vp.xmax {
            push((x, y), &mut out);
        }
        return out;
    }

    for pair in run.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let Some((x1, y1, x2, y2)) = clip_x(a.0, a.1, b.0, b.1, vp.xmin, vp.xmax) else {
            continue;
        };
        push((x1, y1), &mut out);

        let mut crossings: Vec<f64> = Vec::with_capacity(2);
        for edge in [vp.ymin, vp.ymax] {
            if (y1 - edge) * (y2 - edge) < 0.0 {
                crossings.push((edge - y1) / (y2 - y1));
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));
        for t in crossings {
            push((x1 + t * (x2 - x1), y1 + t * (y2 - y1)), &mut out);
        }
        push((x2, y2), &mut out);
    }
    out
}

/// Which outline edges of a bar remain visible after clipping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarEdges {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl BarEdges {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// A bar rectangle in data space, already clipped to the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarRect {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub edges: BarEdges,
}

/// Compute the clipped rectangle for one bar sample.
///
/// `offset_lo`/`offset_hi` are the alignment offsets along the bar's width
/// axis (`x` for vertical bars, `y` for horizontal ones). The outline edge at
/// the baseline is hidden, and any edge cut by the viewport is hidden too.
pub fn bar_rect(
    x: f64,
    y: f64,
    base: f64,
    offset_lo: f64,
    offset_hi: f64,
    horizontal: bool,
    vp: &Viewport,
) -> Option<BarRect> {
    let mut left;
    let mut right;
    let mut bottom;
    let mut top;
    let mut edges;

    if horizontal {
        edges = BarEdges { left: false, right: true, top: true, bottom: true };
        top = y + offset_lo;
        bottom = y + offset_hi;
        left = base;
        right = x;
        if right < left {
            std::mem::swap(&mut left, &mut right);
            edges.left = true;
            edges.right = false;
        }
        if top < bottom {
            std::mem::swap(&mut top, &mut bottom);
        }
    } else {
        edges = BarEdges { left: true, right: true, top: true, bottom: false };
        left = x + offset_lo;
        right = x + offset_hi;
        bottom = base;
        top = y;
        if top < bottom {
            std::mem::swap(&mut top, &mut bottom);
            edges.bottom = true;
            edges.top = false;
        }
    }

    if right < vp.xmin || left > vp.xmax || top < vp.ymin || bottom > vp.ymax {
        return None;
    }

    if left < vp.xmin {
        left = vp.xmin;
        edges.left = false;
    }
    if right > vp.xmax {
        right = vp.xmax;
        edges.right = false;
    }
    if bottom < vp.ymin {
        bottom = vp.ymin;
        edges.bottom = false;
    }
    if top > vp.ymax {
        top = vp.ymax;
        edges.top = false;
    }
    Some(BarRect { left, right, bottom, top, edges })
}
