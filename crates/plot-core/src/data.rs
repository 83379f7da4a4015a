// File: crates/plot-core/src/data.rs
// Summary: Normalization of raw series data into flat point buffers, extents and palette assignment.

use log::debug;

use crate::color::{Channel, Rgba};
use crate::series::{RawPoint, RawValue, Series, SeriesKind, SeriesSpec};

/// Which axis direction a point field feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldRole {
    X,
    Y,
}

/// Format of one slot in a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldFormat {
    pub role: FieldRole,
    pub number: bool,
    pub required: bool,
    pub default: Option<f64>,
    pub autoscale: bool,
}

impl FieldFormat {
    pub const fn required(role: FieldRole) -> Self {
        Self { role, number: true, required: true, default: None, autoscale: true }
    }
}

/// Flat storage of `pointsize` slots per logical point. A point whose slots
/// are all `None` is a gap marker.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointBuffer {
    pub points: Vec<Option<f64>>,
    pub pointsize: usize,
    pub format: Vec<FieldFormat>,
}

impl PointBuffer {
    pub fn new(format: Vec<FieldFormat>) -> Self {
        Self { points: Vec::new(), pointsize: format.len(), format }
    }

    pub fn len(&self) -> usize {
        if self.pointsize == 0 { 0 } else { self.points.len() / self.pointsize }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn point(&self, i: usize) -> &[Option<f64>] {
        &self.points[i * self.pointsize..(i + 1) * self.pointsize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[Option<f64>]> {
        self.points.chunks(self.pointsize.max(1))
    }

    /// `(x, y)` of point `i`, or `None` for a gap.
    pub fn xy(&self, i: usize) -> Option<(f64, f64)> {
        let p = self.point(i);
        Some((p[0]?, p[1]?))
    }

    /// Base value of point `i`, 0 when the buffer has no base slot.
    pub fn base(&self, i: usize) -> f64 {
        if self.pointsize >= 3 { self.point(i)[2].unwrap_or(0.0) } else { 0.0 }
    }

    pub fn push(&mut self, point: &[Option<f64>]) {
        self.points.extend_from_slice(point);
    }
}

/// Data extent along one direction. Empty until a value is included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Default for Extent {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Extent {
    pub const EMPTY: Extent = Extent { min: f64::INFINITY, max: f64::NEG_INFINITY };

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Widen by `[lo, hi]`, ignoring the infinity sentinels.
    pub fn include_range(&mut self, lo: f64, hi: f64) {
        if lo < self.min && lo != -f64::MAX {
            self.min = lo;
        }
        if hi > self.max && hi != f64::MAX {
            self.max = hi;
        }
    }

    pub fn include(&mut self, v: f64) {
        self.include_range(v, v);
    }

    pub fn merge(&mut self, other: &Extent) {
        if !other.is_empty() {
            self.include_range(other.min, other.max);
        }
    }

    pub fn bounds(&self) -> Option<(f64, f64)> {
        (!self.is_empty()).then_some((self.min, self.max))
    }
}

/// Per-series data extents for its x and y axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SeriesExtents {
    pub x: Extent,
    pub y: Extent,
}

impl SeriesExtents {
    fn role_mut(&mut self, role: FieldRole) -> &mut Extent {
        match role {
            FieldRole::X => &mut self.x,
            FieldRole::Y => &mut self.y,
        }
    }
}

/// Coerce a raw value: numbers pass, numeric strings are parsed, infinities
/// become the `±f64::MAX` sentinels, NaN and anything else becomes `None`.
pub fn coerce(value: &RawValue) -> Option<f64> {
    let v = match value {
        RawValue::Number(v) => *v,
        RawValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() { 0.0 } else { s.parse::<f64>().ok()? }
        }
        RawValue::Missing => return None,
    };
    if v.is_nan() {
        None
    } else if v == f64::INFINITY {
        Some(f64::MAX)
    } else if v == f64::NEG_INFINITY {
        Some(-f64::MAX)
    } else {
        Some(v)
    }
}

/// Default field format for a resolved series: x and y, plus a base slot for
/// bars and filled lines.
pub fn default_format(series: &Series) -> Vec<FieldFormat> {
    let mut format = vec![FieldFormat::required(FieldRole::X), FieldFormat::required(FieldRole::Y)];
    let fill_lines = series.kind == SeriesKind::Lines && series.lines.fill.is_on();
    if series.kind == SeriesKind::Bars || fill_lines {
        let autoscale = match series.kind {
            SeriesKind::Bars => series.bars.zero,
            _ => series.lines.zero.unwrap_or(fill_lines),
        };
        let role = if series.kind == SeriesKind::Bars && series.bars.horizontal { FieldRole::X } else { FieldRole::Y };
        format.push(FieldFormat { role, number: true, required: false, default: Some(0.0), autoscale });
    }
    format
}

/// Normalize raw samples into a point buffer. Gap points still widen
/// `gap_extents` with their non-null values.
pub fn normalize(raw: &[RawPoint], format: &[FieldFormat], steps: bool, gap_extents: &mut SeriesExtents) -> PointBuffer {
    let ps = format.len();
    let mut buffer = PointBuffer::new(format.to_vec());
    buffer.points.reserve(raw.len() * ps * if steps { 2 } else { 1 });
    let mut current: Vec<Option<f64>> = vec![None; ps];

    for sample in raw {
        let mut nullify = matches!(sample, RawPoint::Missing);
        if !nullify {
            for (j, (slot, f)) in current.iter_mut().zip(format.iter()).enumerate() {
                let value = sample.field(j);
                *slot = value.and_then(|v| if f.number { coerce(v) } else { None });
                if slot.is_none() {
                    if f.required {
                        nullify = true;
                    }
                    if let Some(d) = f.default {
                        *slot = Some(d);
                    }
                }
            }
        }

        if nullify {
            if let RawPoint::Tuple(_) | RawPoint::Object(_) = sample {
                for (slot, f) in current.iter().zip(format.iter()) {
                    if let Some(v) = slot {
                        if f.autoscale {
                            gap_extents.role_mut(f.role).include(*v);
                        }
                    }
                }
            }
            current.iter_mut().for_each(|s| *s = None);
        }

        if steps && ps >= 2 && !nullify {
            if let Some(prev) = buffer.points.len().checked_sub(ps).map(|start| buffer.points[start..].to_vec()) {
                if let (Some(px), Some(py)) = (prev[0], prev[1]) {
                    if Some(px) != current[0] && Some(py) != current[1] {
                        let mut mid = current.clone();
                        mid[1] = Some(py);
                        buffer.push(&mid);
                    }
                }
            }
        }
        buffer.push(&current);
    }
    debug!("normalized {} raw samples into {} points (pointsize {})", raw.len(), buffer.len(), ps);
    buffer
}

/// Scan a buffer for the extents its autoscaled fields contribute, widening
/// bars by their width and alignment.
pub fn series_extents(series: &Series) -> SeriesExtents {
    let buffer = &series.datapoints;
    let mut ext = SeriesExtents::default();
    for point in buffer.iter() {
        for (value, f) in point.iter().zip(buffer.format.iter()) {
            if let (Some(v), true) = (value, f.autoscale) {
                ext.role_mut(f.role).include(*v);
            }
        }
    }

    if series.kind == SeriesKind::Bars {
        let (lo, hi) = series.bars.edge_offsets();
        let widened = if series.bars.horizontal { &mut ext.y } else { &mut ext.x };
        if !widened.is_empty() {
            widened.min += lo;
            widened.max += hi;
        }
    }
    ext
}

/// Resolve series colors: explicit colors and palette indexes as given,
/// the rest from the palette in order, varying brightness on each wrap.
pub fn assign_colors(specs: &[SeriesSpec], palette: &[String]) -> Vec<Rgba> {
    use crate::series::SeriesColor;

    let explicit_max = specs
        .iter()
        .filter_map(|s| match s.color {
            Some(SeriesColor::Index(i)) => Some(i + 1),
            _ => None,
        })
        .max()
        .unwrap_or(0);
    let needed = specs.len().max(explicit_max);
    let mut generated: Vec<Rgba> = Vec::with_capacity(needed);
    if !palette.is_empty() {
        let mut variation = 0.0f64;
        for i in 0..needed {
            if i % palette.len() == 0 && i > 0 {
                variation = if variation >= 0.0 {
                    if variation < 0.5 { -variation - 0.2 } else { 0.0 }
                } else {
                    -variation
                };
            }
            let base = Rgba::parse(&palette[i % palette.len()]);
            generated.push(base.scale(Channel::RGB, 1.0 + variation));
        }
    } else {
        generated.resize(needed, Rgba::BLACK);
    }

    let mut next_auto = 0usize;
    specs
        .iter()
        .map(|s| match &s.color {
            Some(SeriesColor::Index(i)) => generated.get(*i).copied().unwrap_or(Rgba::BLACK),
            Some(SeriesColor::Named(c)) => Rgba::parse(c),
            None => {
                let c = generated.get(next_auto).copied().unwrap_or(Rgba::BLACK);
                next_auto += 1;
                c
            }
        })
        .collect()
}
