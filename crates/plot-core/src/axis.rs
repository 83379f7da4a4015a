// File: crates/plot-core/src/axis.rs
// Summary: Axis model: range policy, tick sizing and generation, tick alignment, label formatting, axis collections.

use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::data::Extent;
use crate::error::{PlotError, Result};
use crate::options::{AxisMode, AxisOptions, AxisPosition, Options, TickEntry, TickGenerator, TickLength, TicksOption};
use crate::scale::Scale;
use crate::text::FontSpec;

/// Upper bound on generated ticks per axis.
pub const MAX_TICKS: usize = 10_000;

/// Highest axis ordinal a series may reference beyond the configured axes.
pub const MAX_AXES: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    X,
    Y,
}

/// Axis identity: direction plus 1-based ordinal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxisId {
    pub direction: Direction,
    pub n: usize,
}

impl AxisId {
    pub const X1: AxisId = AxisId { direction: Direction::X, n: 1 };
    pub const Y1: AxisId = AxisId { direction: Direction::Y, n: 1 };

    pub const fn new(direction: Direction, n: usize) -> Self {
        Self { direction, n }
    }

    pub const fn x(n: usize) -> Self {
        Self::new(Direction::X, n)
    }

    pub const fn y(n: usize) -> Self {
        Self::new(Direction::Y, n)
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = match self.direction {
            Direction::X => "x",
            Direction::Y => "y",
        };
        if self.n == 1 { write!(f, "{d}axis") } else { write!(f, "{d}{}axis", self.n) }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// Pixel box reserved for an axis' labels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

/// Tick positions of another axis that this axis mirrors.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignReference {
    pub ticks: Vec<f64>,
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub id: AxisId,
    pub options: AxisOptions,
    pub used: bool,
    pub show: bool,
    pub reserve_space: bool,
    pub datamin: Option<f64>,
    pub datamax: Option<f64>,
    pub min: f64,
    pub max: f64,
    /// Raw step before snapping (span / target count).
    pub delta: f64,
    pub tick_size: f64,
    pub tick_decimals: u32,
    pub ticks: Vec<Tick>,
    pub label_width: f64,
    pub label_height: f64,
    pub position: AxisPosition,
    pub tick_length: TickLength,
    pub innermost: bool,
    pub bbox: AxisBox,
    scale: Scale,
    extent: Extent,
    generator: Option<TickGenerator>,
    aligned: Option<AlignReference>,
}

impl Axis {
    pub fn new(id: AxisId, options: AxisOptions) -> Self {
        let position = options.position.unwrap_or(match id.direction {
            Direction::X => AxisPosition::Bottom,
            Direction::Y => AxisPosition::Left,
        });
        let generator = options.tick_generator.clone();
        Self {
            id,
            options,
            used: false,
            show: false,
            reserve_space: false,
            datamin: None,
            datamax: None,
            min: 0.0,
            max: 0.0,
            delta: 0.0,
            tick_size: 0.0,
            tick_decimals: 0,
            ticks: Vec::new(),
            label_width: 0.0,
            label_height: 0.0,
            position,
            tick_length: TickLength::Pixels(5.0),
            innermost: true,
            bbox: AxisBox::default(),
            scale: Scale::identity(),
            extent: Extent::EMPTY,
            generator,
            aligned: None,
        }
    }

    pub fn direction(&self) -> Direction {
        self.id.direction
    }

    pub fn font(&self) -> FontSpec {
        self.options.font.clone().unwrap_or_default()
    }

    /// Install a tick generator (used by plugins, e.g. for time axes).
    pub fn install_tick_generator(&mut self, generator: TickGenerator) {
        self.generator = Some(generator);
    }

    pub(crate) fn reset_data(&mut self) {
        self.extent = Extent::EMPTY;
        self.used = false;
        self.datamin = None;
        self.datamax = None;
    }

    pub(crate) fn include_extent(&mut self, extent: &Extent) {
        self.extent.merge(extent);
        let bounds = self.extent.bounds();
        self.datamin = bounds.map(|b| b.0);
        self.datamax = bounds.map(|b| b.1);
    }

    /// Apply the range policy to this axis' data extents and options.
    pub fn compute_range(&mut self) {
        let (min, max) = compute_range(self.datamin, self.datamax, &self.options);
        self.min = min;
        self.max = max;
        self.aligned = None;
        self.ticks.clear();
        debug!("{} range [{min}, {max}] from data {:?}..{:?}", self.id, self.datamin, self.datamax);
    }

    /// Choose the tick step for a canvas dimension along this axis.
    pub fn set_tick_size(&mut self, canvas_dimension: f64) -> Result<()> {
        let target = match self.options.ticks {
            Some(TicksOption::Count(n)) if n > 0.0 => n,
            _ => 0.3 * canvas_dimension.max(0.0).sqrt(),
        };
        let step = tick_step(self.min, self.max, target, self.options.tick_decimals, self.options.min_tick_size);
        self.delta = step.delta;
        self.tick_decimals = step.decimals;
        // An explicit step never needs more than MAX_TICKS ticks to span the range.
        let finest = (self.max - self.min) / (MAX_TICKS - 3) as f64;
        self.tick_size = match self.options.tick_size {
            Some(size) if size > 0.0 && size.is_finite() => {
                if size < finest {
                    debug!("{}: tick_size {size} raised to {finest}", self.id);
                }
                size.max(finest)
            }
            _ => step.size,
        };
        if self.options.mode == Some(AxisMode::Time) && self.generator.is_none() {
            return Err(PlotError::MissingTimeSupport { axis: self.id.to_string() });
        }
        Ok(())
    }

    /// Values from the installed generator, or the default step generator.
    pub fn generate_ticks(&self) -> Vec<TickEntry> {
        if let Some(reference) = &self.aligned {
            return reference.ticks.iter().map(|&v| TickEntry::Value(self.remap(v, reference))).collect();
        }
        match &self.generator {
            Some(generator) => generator(self),
            None => tick_values(self.min, self.max, self.tick_size).into_iter().map(TickEntry::Value).collect(),
        }
    }

    fn remap(&self, v: f64, reference: &AlignReference) -> f64 {
        let span = reference.max - reference.min;
        let t = if span != 0.0 { (v - reference.min) / span } else { 0.0 };
        self.min + t * (self.max - self.min)
    }

    /// Mirror the ticks of another axis, remapped into this axis' range.
    /// Unset bounds first snap outward to this axis' own ticks.
    pub fn align_to(&mut self, reference: AlignReference) {
        let own = self.generate_ticks();
        if let Some(first) = own.first() {
            if self.options.min.is_none() {
                self.min = self.min.min(first.value());
            }
        }
        if let (Some(last), true) = (own.last(), own.len() > 1) {
            if self.options.max.is_none() {
                self.max = self.max.max(last.value());
            }
        }
        self.aligned = Some(reference);

        if self.options.mode.is_none() && self.options.tick_decimals.is_none() {
            let extra = (1.0 - self.delta.log10().floor()).max(0.0);
            let extra = if extra.is_finite() { extra as u32 } else { 0 };
            let ts = self.generate_ticks();
            let keeps = ts.len() > 1 && {
                let diff = format!("{:.*}", extra as usize, ts[1].value() - ts[0].value());
                diff.contains('.') && diff.ends_with('0')
            };
            if !keeps {
                self.tick_decimals = extra;
            }
        }
    }

    /// Build the labeled tick list from the ticks option, the generator or
    /// alignment, then extend unset bounds to the outer ticks when the axis
    /// has an autoscale margin.
    pub fn set_ticks(&mut self) {
        let entries: Vec<TickEntry> = match &self.options.ticks {
            None => self.generate_ticks(),
            Some(TicksOption::Count(n)) if *n > 0.0 => self.generate_ticks(),
            Some(TicksOption::Count(_)) => Vec::new(),
            Some(TicksOption::List(list)) => list.clone(),
        };

        let mut ticks = Vec::with_capacity(entries.len());
        for entry in entries {
            let value = entry.value();
            if value.is_nan() {
                warn!("{}: skipping NaN tick", self.id);
                continue;
            }
            let label = match entry.label() {
                Some(l) => l.to_string(),
                None => self.format_tick(value),
            };
            ticks.push(Tick { value, label });
        }
        self.ticks = ticks;

        if self.options.autoscale_margin.is_some_and(|m| m != 0.0) && !self.ticks.is_empty() {
            if self.options.min.is_none() {
                self.min = self.min.min(self.ticks[0].value);
            }
            if self.options.max.is_none() && self.ticks.len() > 1 {
                self.max = self.max.max(self.ticks[self.ticks.len() - 1].value);
            }
        }
    }

    /// Label for a tick value: the formatter callback or fixed precision.
    pub fn format_tick(&self, v: f64) -> String {
        match &self.options.tick_formatter {
            Some(formatter) => formatter(v, self),
            None => format_fixed(v, self.tick_decimals),
        }
    }

    pub(crate) fn set_scale(&mut self, pixels: f64) {
        self.scale = Scale::for_range(self.direction(), self.min, self.max, pixels, self.options.resolved_transform());
    }

    pub fn data_to_pixel(&self, v: f64) -> f64 {
        self.scale.data_to_pixel(v)
    }

    pub fn pixel_to_data(&self, p: f64) -> f64 {
        self.scale.pixel_to_data(p)
    }

    /// Pixels per data unit (always positive).
    pub fn scale_factor(&self) -> f64 {
        self.scale.magnitude()
    }

    pub fn is_transformed(&self) -> bool {
        self.scale.is_transformed()
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }
}

/// Range policy. Explicit bounds are used verbatim; a degenerate extent is
/// padded by 1% of its value (1 at zero) on the unset side(s); otherwise the
/// autoscale margin widens unset bounds, snapping to zero rather than
/// crossing it when the data does not.
pub fn compute_range(datamin: Option<f64>, datamax: Option<f64>, opts: &AxisOptions) -> (f64, f64) {
    let mut min = opts.min.or(datamin).unwrap_or(0.0);
    let mut max = opts.max.or(datamax).unwrap_or(0.0);
    let delta = max - min;

    if delta == 0.0 {
        let widen = if max == 0.0 { 1.0 } else { 0.01 * max.abs() };
        if opts.min.is_none() {
            min -= widen;
        }
        if opts.max.is_none() || opts.min.is_some() {
            max += widen;
        }
    } else if let Some(margin) = opts.autoscale_margin {
        if opts.min.is_none() {
            min -= delta * margin;
            if min < 0.0 && datamin.is_some_and(|d| d >= 0.0) {
                min = 0.0;
            }
        }
        if opts.max.is_none() {
            max += delta * margin;
            if max > 0.0 && datamax.is_some_and(|d| d <= 0.0) {
                max = 0.0;
            }
        }
    }

    if min > max {
        warn!("axis range [{min}, {max}] is inverted; swapping bounds");
        std::mem::swap(&mut min, &mut max);
    }
    (min, max)
}

/// Result of the tick step computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickStep {
    pub size: f64,
    pub decimals: u32,
    pub delta: f64,
}

/// Snap `(max - min) / target` to 1, 2, 2.5, 5 or 10 times a power of ten.
/// 2.5 is only chosen when `max_decimals` leaves room for the extra digit.
pub fn tick_step(min: f64, max: f64, target: f64, max_decimals: Option<u32>, min_tick_size: Option<f64>) -> TickStep {
    let delta = (max - min) / target;
    let mut dec = -(delta.log10().floor());
    if let Some(md) = max_decimals {
        if dec > md as f64 {
            dec = md as f64;
        }
    }
    let magn = 10f64.powf(-dec);
    let norm = delta / magn;
    let mut size = if norm < 1.5 {
        1.0
    } else if norm < 3.0 {
        if norm > 2.25 && max_decimals.map_or(true, |md| dec + 1.0 <= md as f64) {
            dec += 1.0;
            2.5
        } else {
            2.0
        }
    } else if norm < 7.5 {
        5.0
    } else {
        10.0
    };
    size *= magn;
    if let Some(floor) = min_tick_size {
        if size < floor {
            size = floor;
        }
    }
    let decimals = match max_decimals {
        Some(md) => md,
        None if dec.is_finite() && dec > 0.0 => dec as u32,
        None => 0,
    };
    TickStep { size, decimals, delta }
}

/// Multiples of `step` from `step * floor(min / step)` until the first value
/// at or past `max`. Empty for a non-positive or non-finite step.
pub fn tick_values(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0 && step.is_finite() && min.is_finite() && max.is_finite()) {
        return Vec::new();
    }
    let start = step * (min / step).floor();
    let mut ticks = Vec::new();
    let mut prev = f64::NEG_INFINITY;
    for i in 0.. {
        let v = start + i as f64 * step;
        if v <= prev {
            break;
        }
        ticks.push(v);
        if v >= max {
            break;
        }
        if ticks.len() >= MAX_TICKS {
            warn!("tick generation stopped at {MAX_TICKS} ticks (step {step} over [{min}, {max}])");
            break;
        }
        prev = v;
    }
    ticks
}

/// Round to `decimals` places and pad with zeros.
pub fn format_fixed(v: f64, decimals: u32) -> String {
    let factor = 10f64.powi(decimals as i32);
    let scaled = v * factor;
    let rounded = if scaled.is_finite() && factor.is_finite() { (scaled + 0.5).floor() / factor } else { v };
    // no "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.*}", decimals as usize, rounded)
}

/// Current ranges of all axes, handed to markings callbacks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisRanges {
    pub x: Vec<(f64, f64)>,
    pub y: Vec<(f64, f64)>,
}

impl AxisRanges {
    pub fn get(&self, id: AxisId) -> Option<(f64, f64)> {
        let list = match id.direction {
            Direction::X => &self.x,
            Direction::Y => &self.y,
        };
        id.n.checked_sub(1).and_then(|i| list.get(i)).copied()
    }
}

/// Densely indexed x and y axis collections.
#[derive(Clone, Debug, Default)]
pub struct AxisSet {
    x: Vec<Axis>,
    y: Vec<Axis>,
}

impl AxisSet {
    /// Create the axes configured in `options` (at least one per direction).
    pub fn from_options(options: &Options) -> Self {
        let mut set = AxisSet::default();
        for direction in [Direction::X, Direction::Y] {
            let list = set.list_mut(direction);
            for n in 1..=options.configured_axes(direction) {
                list.push(Axis::new(AxisId::new(direction, n), options.axis_options(direction, n)));
            }
        }
        set
    }

    /// Largest ordinal [`AxisSet::get_or_create`] accepts for a direction.
    pub fn ordinal_limit(direction: Direction, options: &Options) -> usize {
        options.configured_axes(direction).max(MAX_AXES)
    }

    fn list(&self, direction: Direction) -> &Vec<Axis> {
        match direction {
            Direction::X => &self.x,
            Direction::Y => &self.y,
        }
    }

    fn list_mut(&mut self, direction: Direction) -> &mut Vec<Axis> {
        match direction {
            Direction::X => &mut self.x,
            Direction::Y => &mut self.y,
        }
    }

    /// Fetch an axis, creating it and any lower ordinals on demand. Ordinals
    /// outside `1..=ordinal_limit` are rejected.
    pub fn get_or_create(&mut self, id: AxisId, options: &Options) -> Result<&mut Axis> {
        let limit = Self::ordinal_limit(id.direction, options);
        if id.n == 0 || id.n > limit {
            return Err(PlotError::Options(format!("{id}: axis ordinal outside 1..={limit}")));
        }
        let list = self.list_mut(id.direction);
        while list.len() < id.n {
            let next = AxisId::new(id.direction, list.len() + 1);
            list.push(Axis::new(next, options.axis_options(id.direction, next.n)));
        }
        Ok(&mut list[id.n - 1])
    }

    pub fn get(&self, id: AxisId) -> Option<&Axis> {
        id.n.checked_sub(1).and_then(|i| self.list(id.direction).get(i))
    }

    pub fn get_mut(&mut self, id: AxisId) -> Option<&mut Axis> {
        id.n.checked_sub(1).and_then(move |i| self.list_mut(id.direction).get_mut(i))
    }

    pub fn x(&self) -> &[Axis] {
        &self.x
    }

    pub fn y(&self) -> &[Axis] {
        &self.y
    }

    pub fn direction(&self, direction: Direction) -> &[Axis] {
        self.list(direction)
    }

    /// All axes, x axes first.
    pub fn iter(&self) -> impl Iterator<Item = &Axis> {
        self.x.iter().chain(self.y.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Axis> {
        self.x.iter_mut().chain(self.y.iter_mut())
    }

    /// Every axis sits at the slot matching its ordinal.
    pub fn is_contiguous(&self) -> bool {
        [Direction::X, Direction::Y].iter().all(|&d| {
            self.list(d).iter().enumerate().all(|(i, a)| a.id == AxisId::new(d, i + 1))
        })
    }

    pub fn ranges(&self) -> AxisRanges {
        AxisRanges {
            x: self.x.iter().map(|a| (a.min, a.max)).collect(),
            y: self.y.iter().map(|a| (a.min, a.max)).collect(),
        }
    }
}
