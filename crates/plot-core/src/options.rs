// File: crates/plot-core/src/options.rs
// Summary: Plot configuration: fixed option structures, callback wrappers, JSON deep-merge loading.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::axis::{Axis, AxisRanges, Direction};
use crate::color::{Channel, Rgba};
use crate::error::{PlotError, Result};
use crate::legend::LegendEntry;
use crate::scale::{ScaleKind, Transform};
use crate::series::{BarStyle, LineStyle, PointStyle, Series};
use crate::text::FontSpec;
use crate::theme::Theme;
use crate::types::Sides;

/// Shared, cloneable handle to a caller-supplied closure. Configuration
/// callbacks are skipped by serde and print as `Callback(..)`.
pub struct Callback<F: ?Sized>(pub Rc<F>);

impl<F: ?Sized> Clone for Callback<F> {
    fn clone(&self) -> Self {
        Callback(Rc::clone(&self.0))
    }
}

impl<F: ?Sized> fmt::Debug for Callback<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

impl<F: ?Sized> Deref for Callback<F> {
    type Target = F;
    fn deref(&self) -> &F {
        &self.0
    }
}

/// One tick request: a value with an optional fixed label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TickEntry {
    Value(f64),
    Labeled(f64, String),
}

impl TickEntry {
    pub fn value(&self) -> f64 {
        match *self {
            TickEntry::Value(v) | TickEntry::Labeled(v, _) => v,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            TickEntry::Value(_) => None,
            TickEntry::Labeled(_, l) => Some(l),
        }
    }
}

impl From<f64> for TickEntry {
    fn from(v: f64) -> Self {
        TickEntry::Value(v)
    }
}

pub type TickGenerator = Callback<dyn Fn(&Axis) -> Vec<TickEntry>>;
pub type TickFormatter = Callback<dyn Fn(f64, &Axis) -> String>;
pub type MarkingsFn = Callback<dyn Fn(&AxisRanges) -> Vec<Marking>>;
pub type LabelFormatter = Callback<dyn Fn(&str, &Series) -> Option<String>>;
pub type LegendSortFn = Callback<dyn Fn(&LegendEntry, &LegendEntry) -> Ordering>;

/// `ticks` option: a target count or an explicit list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TicksOption {
    Count(f64),
    List(Vec<TickEntry>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPosition {
    Bottom,
    Top,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisMode {
    /// Calendar ticks; requires an installed tick generator.
    Time,
}

/// Tick line length: the whole plot span, or a pixel count.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "TickLengthRepr", into = "TickLengthRepr")]
pub enum TickLength {
    Full,
    Pixels(f64),
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum TickLengthRepr {
    Pixels(f64),
    Keyword(String),
}

impl From<TickLengthRepr> for TickLength {
    fn from(r: TickLengthRepr) -> Self {
        match r {
            TickLengthRepr::Pixels(p) => TickLength::Pixels(p),
            TickLengthRepr::Keyword(_) => TickLength::Full,
        }
    }
}

impl From<TickLength> for TickLengthRepr {
    fn from(t: TickLength) -> Self {
        match t {
            TickLength::Full => TickLengthRepr::Keyword("full".into()),
            TickLength::Pixels(p) => TickLengthRepr::Pixels(p),
        }
    }
}

/// Options for one axis. Every field is optional so indexed entries can be
/// layered over the direction defaults.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOptions {
    pub show: Option<bool>,
    pub position: Option<AxisPosition>,
    pub mode: Option<AxisMode>,
    pub color: Option<String>,
    pub tick_color: Option<String>,
    pub font: Option<FontSpec>,
    pub scale: Option<ScaleKind>,
    #[serde(skip)]
    pub transform: Option<Transform>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub autoscale_margin: Option<f64>,
    pub ticks: Option<TicksOption>,
    #[serde(skip)]
    pub tick_generator: Option<TickGenerator>,
    #[serde(skip)]
    pub tick_formatter: Option<TickFormatter>,
    pub label_width: Option<f64>,
    pub label_height: Option<f64>,
    pub reserve_space: Option<bool>,
    pub tick_length: Option<TickLength>,
    pub align_ticks_with_axis: Option<usize>,
    pub tick_decimals: Option<u32>,
    pub tick_size: Option<f64>,
    pub min_tick_size: Option<f64>,
}

macro_rules! layer {
    ($top:expr, $base:expr, $($field:ident),* $(,)?) => {
        AxisOptions { $($field: $top.$field.clone().or_else(|| $base.$field.clone()),)* }
    };
}

impl AxisOptions {
    /// Field-wise merge: values set here win over `base`.
    pub fn layered_over(&self, base: &AxisOptions) -> AxisOptions {
        layer!(
            self, base, show, position, mode, color, tick_color, font, scale, transform, min, max,
            autoscale_margin, ticks, tick_generator, tick_formatter, label_width, label_height,
            reserve_space, tick_length, align_ticks_with_axis, tick_decimals, tick_size,
            min_tick_size,
        )
    }

    /// Transform configured for this axis: explicit callbacks win over the
    /// named scale kind.
    pub fn resolved_transform(&self) -> Option<Transform> {
        self.transform.clone().or_else(|| self.scale.and_then(Transform::from_kind))
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_tick_generator(mut self, f: impl Fn(&Axis) -> Vec<TickEntry> + 'static) -> Self {
        self.tick_generator = Some(Callback(Rc::new(f)));
        self
    }

    pub fn with_tick_formatter(mut self, f: impl Fn(f64, &Axis) -> String + 'static) -> Self {
        self.tick_formatter = Some(Callback(Rc::new(f)));
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesDefaults {
    pub lines: LineStyle,
    pub points: PointStyle,
    pub bars: BarStyle,
    pub shadow_size: f64,
    pub highlight_color: Option<String>,
}

impl Default for SeriesDefaults {
    fn default() -> Self {
        Self {
            lines: LineStyle::default(),
            points: PointStyle::default(),
            bars: BarStyle::default(),
            shadow_size: 3.0,
            highlight_color: None,
        }
    }
}

/// Range selector of a marking along one direction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkingRange {
    pub from: Option<f64>,
    pub to: Option<f64>,
    /// 1-based axis ordinal, defaults to the first axis.
    pub axis: Option<usize>,
}

impl MarkingRange {
    pub fn span(from: f64, to: f64) -> Self {
        Self { from: Some(from), to: Some(to), axis: None }
    }

    pub fn at(v: f64) -> Self {
        Self::span(v, v)
    }
}

/// Background band or line drawn on the grid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Marking {
    pub xaxis: Option<MarkingRange>,
    pub yaxis: Option<MarkingRange>,
    pub color: Option<String>,
    pub line_width: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    pub show: bool,
    pub above_data: bool,
    pub color: String,
    pub background_color: Option<String>,
    pub border_color: Option<Sides<String>>,
    pub tick_color: Option<String>,
    pub margin: Sides<f64>,
    pub label_margin: f64,
    pub axis_margin: f64,
    pub border_width: Sides<f64>,
    pub min_border_margin: Option<f64>,
    pub markings: Vec<Marking>,
    #[serde(skip)]
    pub markings_fn: Option<MarkingsFn>,
    pub markings_color: String,
    pub markings_line_width: f64,
    pub clickable: bool,
    pub hoverable: bool,
    pub auto_highlight: bool,
    pub mouse_active_radius: f64,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            show: true,
            above_data: false,
            color: "#545454".into(),
            background_color: None,
            border_color: None,
            tick_color: None,
            margin: Sides::Uniform(0.0),
            label_margin: 5.0,
            axis_margin: 8.0,
            border_width: Sides::Uniform(2.0),
            min_border_margin: None,
            markings: Vec::new(),
            markings_fn: None,
            markings_color: "#f4f4f4".into(),
            markings_line_width: 2.0,
            clickable: false,
            hoverable: false,
            auto_highlight: true,
            mouse_active_radius: 10.0,
        }
    }
}

impl GridOptions {
    pub fn with_markings_fn(mut self, f: impl Fn(&AxisRanges) -> Vec<Marking> + 'static) -> Self {
        self.markings_fn = Some(Callback(Rc::new(f)));
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    #[default]
    Ne,
    Nw,
    Se,
    Sw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendSort {
    Ascending,
    Descending,
    Reverse,
}

/// Legend offset from the plot corner; one value or `[x, y]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegendMargin {
    Uniform(f64),
    Pair(f64, f64),
}

impl LegendMargin {
    pub fn xy(&self) -> (f64, f64) {
        match *self {
            LegendMargin::Uniform(m) => (m, m),
            LegendMargin::Pair(x, y) => (x, y),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendOptions {
    pub show: bool,
    pub columns: usize,
    #[serde(skip)]
    pub label_formatter: Option<LabelFormatter>,
    pub label_box_border_color: String,
    pub position: LegendPosition,
    pub margin: LegendMargin,
    pub background_color: Option<String>,
    pub background_opacity: f64,
    pub sorted: Option<LegendSort>,
    #[serde(skip)]
    pub sort_fn: Option<LegendSortFn>,
    pub font: Option<FontSpec>,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            show: true,
            columns: 1,
            label_formatter: None,
            label_box_border_color: "#ccc".into(),
            position: LegendPosition::Ne,
            margin: LegendMargin::Uniform(5.0),
            background_color: None,
            background_opacity: 0.85,
            sorted: None,
            sort_fn: None,
            font: None,
        }
    }
}

impl LegendOptions {
    pub fn with_label_formatter(mut self, f: impl Fn(&str, &Series) -> Option<String> + 'static) -> Self {
        self.label_formatter = Some(Callback(Rc::new(f)));
        self
    }

    pub fn with_sort_fn(mut self, f: impl Fn(&LegendEntry, &LegendEntry) -> Ordering + 'static) -> Self {
        self.sort_fn = Some(Callback(Rc::new(f)));
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionOptions {
    /// Minimum milliseconds between overlay redraws; `-1` redraws immediately.
    pub redraw_overlay_interval: f64,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self { redraw_overlay_interval: 1000.0 / 60.0 }
    }
}

/// Complete plot configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub colors: Vec<String>,
    pub legend: LegendOptions,
    pub xaxis: AxisOptions,
    pub yaxis: AxisOptions,
    pub xaxes: Vec<AxisOptions>,
    pub yaxes: Vec<AxisOptions>,
    pub series: SeriesDefaults,
    pub grid: GridOptions,
    pub interaction: InteractionOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            colors: ["#edc240", "#afd8f8", "#cb4b4b", "#4da74d", "#9440ed"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            legend: LegendOptions::default(),
            xaxis: AxisOptions { position: Some(AxisPosition::Bottom), ..AxisOptions::default() },
            yaxis: AxisOptions {
                position: Some(AxisPosition::Left),
                autoscale_margin: Some(0.02),
                ..AxisOptions::default()
            },
            xaxes: Vec::new(),
            yaxes: Vec::new(),
            series: SeriesDefaults::default(),
            grid: GridOptions::default(),
            interaction: InteractionOptions::default(),
        }
    }
}

impl Options {
    /// Load options from JSON, deep-merged over the defaults. Objects merge
    /// recursively; arrays and scalars replace. Unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Options> {
        let overlay: Value = serde_json::from_str(json).map_err(|e| PlotError::Options(e.to_string()))?;
        let mut merged = serde_json::to_value(Options::default()).map_err(|e| PlotError::Options(e.to_string()))?;
        deep_merge(&mut merged, overlay);
        serde_json::from_value(merged).map_err(|e| PlotError::Options(e.to_string()))
    }

    /// Defaults restyled with a theme's palette and grid colors.
    pub fn themed(theme: &Theme) -> Options {
        let mut options = Options::default();
        theme.apply(&mut options);
        options
    }

    /// Resolve derived colors: axis colors from the grid color, tick colors
    /// from the axis color, the border color from the grid color.
    pub fn finalize(&mut self) {
        let grid = Rgba::parse(&self.grid.color);
        let axis_color = grid.scale(Channel::ALPHA, 0.22).to_string();
        for base in [&mut self.xaxis, &mut self.yaxis] {
            if base.color.is_none() {
                base.color = Some(axis_color.clone());
            }
            if base.tick_color.is_none() {
                base.tick_color = Some(self.grid.tick_color.clone().unwrap_or_else(|| axis_color.clone()));
            }
        }
        for entry in self.xaxes.iter_mut().chain(self.yaxes.iter_mut()) {
            if entry.tick_color.is_none() {
                entry.tick_color = entry.color.clone();
            }
        }
        if self.grid.border_color.is_none() {
            self.grid.border_color = Some(Sides::Uniform(self.grid.color.clone()));
        }
        if self.grid.tick_color.is_none() {
            self.grid.tick_color = Some(axis_color);
        }
    }

    /// Effective options for axis `n` (1-based) of a direction: the indexed
    /// entry layered over the direction defaults.
    pub fn axis_options(&self, direction: Direction, n: usize) -> AxisOptions {
        let (base, entries) = match direction {
            Direction::X => (&self.xaxis, &self.xaxes),
            Direction::Y => (&self.yaxis, &self.yaxes),
        };
        match n.checked_sub(1).and_then(|i| entries.get(i)) {
            Some(entry) => entry.layered_over(base),
            None => base.clone(),
        }
    }

    /// Number of axes configured explicitly for a direction (at least one).
    pub fn configured_axes(&self, direction: Direction) -> usize {
        match direction {
            Direction::X => self.xaxes.len().max(1),
            Direction::Y => self.yaxes.len().max(1),
        }
    }
}

/// Recursive JSON merge: objects merge key by key, everything else replaces.
pub fn deep_merge(target: &mut Value, overlay: Value) {
    match (target, overlay) {
        (Value::Object(dst), Value::Object(src)) => {
            for (key, value) in src {
                match dst.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        dst.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
