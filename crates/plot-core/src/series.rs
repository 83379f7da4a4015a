// File: crates/plot-core/src/series.rs
// Summary: Series descriptors (caller input), per-mode styles and the resolved series model.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::axis::{AxisId, Direction};
use crate::canvas::DrawContext;
use crate::color::Rgba;
use crate::data::PointBuffer;

/// Render mode of a series, decided once when the series is resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    #[default]
    Lines,
    Points,
    Bars,
}

/// Fill toggle or explicit fill opacity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FillSpec {
    Toggle(bool),
    Opacity(f64),
}

impl FillSpec {
    /// Opacity used when no explicit fill color is configured.
    pub fn opacity(&self) -> Option<f64> {
        match *self {
            FillSpec::Toggle(true) => Some(0.4),
            FillSpec::Toggle(false) => None,
            FillSpec::Opacity(o) if o > 0.0 => Some(o),
            FillSpec::Opacity(_) => None,
        }
    }

    pub fn is_on(&self) -> bool {
        self.opacity().is_some()
    }
}

impl Default for FillSpec {
    fn default() -> Self {
        FillSpec::Toggle(false)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarAlign {
    #[default]
    Left,
    Right,
    Center,
}

impl BarAlign {
    /// Offset of the bar's leading edge relative to the sample coordinate.
    pub fn offset(&self, bar_width: f64) -> f64 {
        match self {
            BarAlign::Left => 0.0,
            BarAlign::Right => -bar_width,
            BarAlign::Center => -bar_width / 2.0,
        }
    }
}

/// Custom marker painter: `(ctx, x, y, radius, shadow)`. Adds to the current
/// path; the caller fills/strokes.
pub type SymbolFn = Rc<dyn Fn(&mut dyn DrawContext, f64, f64, f64, bool)>;

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    #[default]
    Circle,
    Square,
    Diamond,
    Triangle,
    Cross,
    #[serde(skip)]
    Custom(SymbolFn),
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Circle => f.write_str("Circle"),
            Symbol::Square => f.write_str("Square"),
            Symbol::Diamond => f.write_str("Diamond"),
            Symbol::Triangle => f.write_str("Triangle"),
            Symbol::Cross => f.write_str("Cross"),
            Symbol::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub line_width: f64,
    pub fill: FillSpec,
    pub fill_color: Option<String>,
    pub steps: bool,
    /// Autoscale the fill base; defaults to whether fill is on.
    pub zero: Option<bool>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self { line_width: 2.0, fill: FillSpec::Toggle(false), fill_color: None, steps: false, zero: None }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PointStyle {
    pub radius: f64,
    pub line_width: f64,
    pub fill: FillSpec,
    pub fill_color: Option<String>,
    pub symbol: Symbol,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            radius: 3.0,
            line_width: 2.0,
            fill: FillSpec::Toggle(true),
            fill_color: Some("#ffffff".to_string()),
            symbol: Symbol::Circle,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BarStyle {
    pub line_width: f64,
    pub bar_width: f64,
    pub fill: FillSpec,
    pub fill_color: Option<String>,
    pub align: BarAlign,
    pub horizontal: bool,
    pub zero: bool,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            bar_width: 1.0,
            fill: FillSpec::Toggle(true),
            fill_color: None,
            align: BarAlign::Left,
            horizontal: false,
            zero: true,
        }
    }
}

impl BarStyle {
    /// `(low, high)` offsets of the bar edges along its width axis.
    pub fn edge_offsets(&self) -> (f64, f64) {
        let lo = self.align.offset(self.bar_width);
        (lo, lo + self.bar_width)
    }
}

/// Per-series overrides for [`LineStyle`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinePatch {
    pub line_width: Option<f64>,
    pub fill: Option<FillSpec>,
    pub fill_color: Option<String>,
    pub steps: Option<bool>,
    pub zero: Option<bool>,
}

impl LinePatch {
    pub fn apply(&self, base: &LineStyle) -> LineStyle {
        LineStyle {
            line_width: self.line_width.unwrap_or(base.line_width),
            fill: self.fill.unwrap_or(base.fill),
            fill_color: self.fill_color.clone().or_else(|| base.fill_color.clone()),
            steps: self.steps.unwrap_or(base.steps),
            zero: self.zero.or(base.zero),
        }
    }
}

/// Per-series overrides for [`PointStyle`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PointPatch {
    pub radius: Option<f64>,
    pub line_width: Option<f64>,
    pub fill: Option<FillSpec>,
    pub fill_color: Option<String>,
    pub symbol: Option<Symbol>,
}

impl PointPatch {
    pub fn apply(&self, base: &PointStyle) -> PointStyle {
        PointStyle {
            radius: self.radius.unwrap_or(base.radius),
            line_width: self.line_width.unwrap_or(base.line_width),
            fill: self.fill.unwrap_or(base.fill),
            fill_color: self.fill_color.clone().or_else(|| base.fill_color.clone()),
            symbol: self.symbol.clone().unwrap_or_else(|| base.symbol.clone()),
        }
    }
}

/// Per-series overrides for [`BarStyle`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BarPatch {
    pub line_width: Option<f64>,
    pub bar_width: Option<f64>,
    pub fill: Option<FillSpec>,
    pub fill_color: Option<String>,
    pub align: Option<BarAlign>,
    pub horizontal: Option<bool>,
    pub zero: Option<bool>,
}

impl BarPatch {
    pub fn apply(&self, base: &BarStyle) -> BarStyle {
        BarStyle {
            line_width: self.line_width.unwrap_or(base.line_width),
            bar_width: self.bar_width.unwrap_or(base.bar_width),
            fill: self.fill.unwrap_or(base.fill),
            fill_color: self.fill_color.clone().or_else(|| base.fill_color.clone()),
            align: self.align.unwrap_or(base.align),
            horizontal: self.horizontal.unwrap_or(base.horizontal),
            zero: self.zero.unwrap_or(base.zero),
        }
    }
}

/// Series color: palette index or explicit color string. Absent means the
/// next automatic palette color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesColor {
    Index(usize),
    Named(String),
}

/// One raw coordinate value as supplied by the caller.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Number(v)
    }
}

impl From<Option<f64>> for RawValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(RawValue::Missing, RawValue::Number)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawObject {
    pub x: RawValue,
    pub y: RawValue,
    pub base: RawValue,
}

/// One raw sample: a tuple `[x, y, base?]`, a field-tagged object, or null.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPoint {
    Tuple(Vec<RawValue>),
    Object(RawObject),
    Missing,
}

impl RawPoint {
    pub fn xy(x: f64, y: f64) -> Self {
        RawPoint::Tuple(vec![RawValue::Number(x), RawValue::Number(y)])
    }

    pub fn xyb(x: f64, y: f64, base: f64) -> Self {
        RawPoint::Tuple(vec![x.into(), y.into(), base.into()])
    }

    /// Value of field `index` (0 = x, 1 = y, 2 = base).
    pub fn field(&self, index: usize) -> Option<&RawValue> {
        match self {
            RawPoint::Tuple(values) => values.get(index),
            RawPoint::Object(obj) => match index {
                0 => Some(&obj.x),
                1 => Some(&obj.y),
                2 => Some(&obj.base),
                _ => None,
            },
            RawPoint::Missing => None,
        }
    }
}

impl From<(f64, f64)> for RawPoint {
    fn from((x, y): (f64, f64)) -> Self {
        RawPoint::xy(x, y)
    }
}

impl From<(f64, Option<f64>)> for RawPoint {
    fn from((x, y): (f64, Option<f64>)) -> Self {
        RawPoint::Tuple(vec![x.into(), y.into()])
    }
}

impl From<[f64; 2]> for RawPoint {
    fn from([x, y]: [f64; 2]) -> Self {
        RawPoint::xy(x, y)
    }
}

/// Series descriptor supplied by the hosting application.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesSpec {
    pub label: Option<String>,
    pub color: Option<SeriesColor>,
    pub kind: Option<SeriesKind>,
    pub lines: LinePatch,
    pub points: PointPatch,
    pub bars: BarPatch,
    pub xaxis: Option<usize>,
    pub yaxis: Option<usize>,
    pub shadow_size: Option<f64>,
    pub highlight_color: Option<String>,
    pub hoverable: Option<bool>,
    pub clickable: Option<bool>,
    pub data: Vec<RawPoint>,
}

impl SeriesSpec {
    pub fn new<P: Into<RawPoint>>(data: impl IntoIterator<Item = P>) -> Self {
        Self { data: data.into_iter().map(Into::into).collect(), ..Self::default() }
    }

    pub fn with_data(kind: SeriesKind, data: Vec<(f64, f64)>) -> Self {
        Self::new(data).kind(kind)
    }

    pub fn kind(mut self, kind: SeriesKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(SeriesColor::Named(color.into()));
        self
    }

    pub fn axes(mut self, xaxis: usize, yaxis: usize) -> Self {
        self.xaxis = Some(xaxis);
        self.yaxis = Some(yaxis);
        self
    }

    pub fn fill(mut self, fill: FillSpec) -> Self {
        self.lines.fill = Some(fill);
        self
    }

    pub fn steps(mut self, steps: bool) -> Self {
        self.lines.steps = Some(steps);
        self
    }

    pub fn bar_width(mut self, width: f64) -> Self {
        self.bars.bar_width = Some(width);
        self
    }

    pub fn align(mut self, align: BarAlign) -> Self {
        self.bars.align = Some(align);
        self
    }

    pub fn shadow_size(mut self, size: f64) -> Self {
        self.shadow_size = Some(size);
        self
    }
}

/// A series after option merging, color assignment and normalization.
#[derive(Clone, Debug)]
pub struct Series {
    pub label: Option<String>,
    pub color: Rgba,
    pub kind: SeriesKind,
    pub lines: LineStyle,
    pub points: PointStyle,
    pub bars: BarStyle,
    pub xaxis: usize,
    pub yaxis: usize,
    pub shadow_size: f64,
    pub highlight_color: Option<Rgba>,
    pub hoverable: bool,
    pub clickable: bool,
    pub datapoints: PointBuffer,
}

impl Series {
    pub fn x_axis_id(&self) -> AxisId {
        AxisId::new(Direction::X, self.xaxis)
    }

    pub fn y_axis_id(&self) -> AxisId {
        AxisId::new(Direction::Y, self.yaxis)
    }

    /// Color used for the overlay highlight: explicit, or the series color at
    /// half its alpha.
    pub fn highlight(&self) -> Rgba {
        self.highlight_color.unwrap_or_else(|| self.color.scale(crate::color::Channel::ALPHA, 0.5))
    }
}
