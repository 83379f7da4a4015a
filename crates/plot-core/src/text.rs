// File: crates/plot-core/src/text.rs
// Summary: Font description, text measurement trait, fixed metrics and the Skia textlayout shaper.

use serde::{Deserialize, Serialize};
use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

/// Font used for tick labels and legend entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub size: f64,
    /// Line box height; `None` means `round(1.15 * size)`.
    pub line_height: Option<f64>,
    pub color: Option<String>,
    pub family: Option<String>,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self { size: 10.0, line_height: None, color: None, family: None }
    }
}

impl FontSpec {
    pub fn line_height(&self) -> f64 {
        self.line_height.unwrap_or_else(|| (self.size * 1.15).round())
    }
}

/// Measures rendered text; layout only needs the bounding box.
pub trait TextMeasure {
    /// `(width, height)` in pixels.
    fn measure(&self, text: &str, font: &FontSpec) -> (f64, f64);
}

/// Deterministic approximation: every glyph is `advance * size` wide and a
/// line is `font.line_height()` tall. Layout results do not depend on the
/// fonts installed on the machine.
#[derive(Clone, Copy, Debug)]
pub struct FixedMetrics {
    pub advance: f64,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasure for FixedMetrics {
    fn measure(&self, text: &str, font: &FontSpec) -> (f64, f64) {
        let lines: Vec<&str> = text.split('\n').collect();
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        (widest as f64 * font.size * self.advance, lines.len() as f64 * font.line_height())
    }
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(font: &FontSpec, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size((font.size as f32).max(1.0));
        ts.set_color(color);
        match &font.family {
            Some(family) => ts.set_font_families(&[family.as_str(), "sans-serif"]),
            None => ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]),
        };
        ts
    }

    pub fn layout(&self, text: &str, font: &FontSpec, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(font, color));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }
}

impl TextMeasure for TextShaper {
    fn measure(&self, text: &str, font: &FontSpec) -> (f64, f64) {
        let p = self.layout(text, font, skia::Color::from_argb(0, 0, 0, 0));
        (p.longest_line() as f64, p.height() as f64)
    }
}
