// File: crates/plot-core/src/canvas.rs
// Summary: Canvas-2D style drawing trait and a command recorder that hosts (and tests) can replay.

use crate::color::Rgba;
use crate::text::FontSpec;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f64,
    pub join: LineJoin,
}

impl StrokeStyle {
    pub fn new(color: Rgba, width: f64) -> Self {
        Self { color, width, join: LineJoin::Miter }
    }

    pub fn round(mut self) -> Self {
        self.join = LineJoin::Round;
        self
    }
}

/// Immediate-mode drawing surface. The current path survives `stroke` and
/// `fill`; `begin_path` starts a new one.
pub trait DrawContext {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear(&mut self);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    /// Arc around `(cx, cy)` from `start` to `end` radians, clockwise.
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64);
    fn close_path(&mut self);
    fn stroke(&mut self, style: &StrokeStyle);
    fn fill(&mut self, color: Rgba);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba);
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &StrokeStyle);
    #[allow(clippy::too_many_arguments)]
    fn fill_text(&mut self, text: &str, x: f64, y: f64, align: TextAlign, baseline: TextBaseline, font: &FontSpec, color: Rgba);
}

/// One recorded drawing command.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    Save,
    Restore,
    Translate(f64, f64),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Arc { cx: f64, cy: f64, radius: f64, start: f64, end: f64 },
    ClosePath,
    Stroke(StrokeStyle),
    Fill(Rgba),
    FillRect { x: f64, y: f64, w: f64, h: f64, color: Rgba },
    StrokeRect { x: f64, y: f64, w: f64, h: f64, style: StrokeStyle },
    FillText { text: String, x: f64, y: f64, align: TextAlign, baseline: TextBaseline, color: Rgba },
}

/// A stroked or filled path replayed from a recording, in canvas pixels.
/// Arcs contribute their center point as a one-point subpath.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintedPath {
    pub color: Rgba,
    pub width: Option<f64>,
    pub subpaths: Vec<Vec<(f64, f64)>>,
}

/// Records commands instead of rasterizing them.
#[derive(Clone, Debug)]
pub struct Recorder {
    width: f64,
    height: f64,
    pub ops: Vec<DrawOp>,
}

impl Recorder {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, ops: Vec::new() }
    }

    /// Replay the recording, resolving translations, and collect every
    /// stroke and fill with the path it painted.
    pub fn painted_paths(&self) -> Vec<(DrawOp, PaintedPath)> {
        let mut stack: Vec<(f64, f64)> = Vec::new();
        let mut offset = (0.0, 0.0);
        let mut subpaths: Vec<Vec<(f64, f64)>> = Vec::new();
        let mut out = Vec::new();

        for op in &self.ops {
            match op {
                DrawOp::Save => stack.push(offset),
                DrawOp::Restore => offset = stack.pop().unwrap_or((0.0, 0.0)),
                DrawOp::Translate(dx, dy) => offset = (offset.0 + dx, offset.1 + dy),
                DrawOp::BeginPath => subpaths.clear(),
                DrawOp::MoveTo(x, y) => subpaths.push(vec![(x + offset.0, y + offset.1)]),
                DrawOp::LineTo(x, y) => {
                    let p = (x + offset.0, y + offset.1);
                    match subpaths.last_mut() {
                        Some(sp) => sp.push(p),
                        None => subpaths.push(vec![p]),
                    }
                }
                DrawOp::Arc { cx, cy, .. } => subpaths.push(vec![(cx + offset.0, cy + offset.1)]),
                DrawOp::Stroke(style) => out.push((
                    op.clone(),
                    PaintedPath { color: style.color, width: Some(style.width), subpaths: subpaths.clone() },
                )),
                DrawOp::Fill(color) => {
                    out.push((op.clone(), PaintedPath { color: *color, width: None, subpaths: subpaths.clone() }))
                }
                DrawOp::FillRect { x, y, w, h, color } => {
                    let (x, y) = (x + offset.0, y + offset.1);
                    out.push((
                        op.clone(),
                        PaintedPath { color: *color, width: None, subpaths: vec![rect_outline(x, y, *w, *h)] },
                    ))
                }
                DrawOp::StrokeRect { x, y, w, h, style } => {
                    let (x, y) = (x + offset.0, y + offset.1);
                    out.push((
                        op.clone(),
                        PaintedPath { color: style.color, width: Some(style.width), subpaths: vec![rect_outline(x, y, *w, *h)] },
                    ))
                }
                _ => {}
            }
        }
        out
    }

    /// Stroked paths only.
    pub fn strokes(&self) -> Vec<PaintedPath> {
        self.painted_paths()
            .into_iter()
            .filter(|(op, _)| matches!(op, DrawOp::Stroke(_)))
            .map(|(_, p)| p)
            .collect()
    }

    /// Filled paths and rectangles.
    pub fn fills(&self) -> Vec<PaintedPath> {
        self.painted_paths()
            .into_iter()
            .filter(|(op, _)| matches!(op, DrawOp::Fill(_) | DrawOp::FillRect { .. }))
            .map(|(_, p)| p)
            .collect()
    }

    /// Text drawn, with canvas positions.
    pub fn texts(&self) -> Vec<(String, f64, f64)> {
        let mut stack = Vec::new();
        let mut offset = (0.0, 0.0);
        let mut out = Vec::new();
        for op in &self.ops {
            match op {
                DrawOp::Save => stack.push(offset),
                DrawOp::Restore => offset = stack.pop().unwrap_or((0.0, 0.0)),
                DrawOp::Translate(dx, dy) => offset = (offset.0 + dx, offset.1 + dy),
                DrawOp::FillText { text, x, y, .. } => out.push((text.clone(), x + offset.0, y + offset.1)),
                _ => {}
            }
        }
        out
    }
}

fn rect_outline(x: f64, y: f64, w: f64, h: f64) -> Vec<(f64, f64)> {
    vec![(x, y), (x + w, y), (x + w, y + h), (x, y + h), (x, y)]
}

impl DrawContext for Recorder {
    fn width(&self) -> f64 {
        self.width
    }
    fn height(&self) -> f64 {
        self.height
    }
    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }
    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }
    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }
    fn translate(&mut self, dx: f64, dy: f64) {
        self.ops.push(DrawOp::Translate(dx, dy));
    }
    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }
    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::MoveTo(x, y));
    }
    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::LineTo(x, y));
    }
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        self.ops.push(DrawOp::Arc { cx, cy, radius, start, end });
    }
    fn close_path(&mut self) {
        self.ops.push(DrawOp::ClosePath);
    }
    fn stroke(&mut self, style: &StrokeStyle) {
        self.ops.push(DrawOp::Stroke(*style));
    }
    fn fill(&mut self, color: Rgba) {
        self.ops.push(DrawOp::Fill(color));
    }
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        self.ops.push(DrawOp::FillRect { x, y, w, h, color });
    }
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &StrokeStyle) {
        self.ops.push(DrawOp::StrokeRect { x, y, w, h, style: *style });
    }
    fn fill_text(&mut self, text: &str, x: f64, y: f64, align: TextAlign, baseline: TextBaseline, _font: &FontSpec, color: Rgba) {
        self.ops.push(DrawOp::FillText { text: text.to_string(), x, y, align, baseline, color });
    }
}
