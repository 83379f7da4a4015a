// File: crates/plot-core/src/skia_backend.rs
// Summary: CPU raster DrawContext backed by a Skia surface, with PNG and RGBA8 export.

use skia_safe as skia;

use crate::canvas::{DrawContext, LineJoin, StrokeStyle, TextAlign, TextBaseline};
use crate::color::Rgba;
use crate::error::{PlotError, Result};
use crate::text::{FontSpec, TextShaper};

pub struct SkiaSurface {
    surface: skia::Surface,
    path: skia::Path,
    shaper: TextShaper,
    background: Rgba,
    width: i32,
    height: i32,
}

impl SkiaSurface {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(PlotError::InvalidDimensions { width, height });
        }
        let surface = skia::surfaces::raster_n32_premul((width, height))
            .ok_or(PlotError::Surface { width, height })?;
        Ok(Self { surface, path: skia::Path::new(), shaper: TextShaper::new(), background: Rgba::WHITE, width, height })
    }

    /// Color `clear` fills with; white by default.
    pub fn with_background(mut self, background: Rgba) -> Self {
        self.background = background;
        self
    }

    pub fn png_bytes(&mut self) -> Result<Vec<u8>> {
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or(PlotError::Encode("PNG"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Unpremultiplied RGBA8 pixels: `(pixels, width, height, stride)`.
    pub fn rgba8(&mut self) -> Result<(Vec<u8>, u32, u32, usize)> {
        let info = skia::ImageInfo::new(
            (self.width, self.height),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = self.width as usize * 4;
        let mut pixels = vec![0u8; stride * self.height as usize];
        if !self.surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(PlotError::Encode("RGBA8"));
        }
        Ok((pixels, self.width as u32, self.height as u32, stride))
    }

    fn stroke_paint(style: &StrokeStyle) -> skia::Paint {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Stroke);
        paint.set_stroke_width(style.width as f32);
        paint.set_color(style.color.to_skia());
        if style.join == LineJoin::Round {
            paint.set_stroke_join(skia::paint::Join::Round);
            paint.set_stroke_cap(skia::paint::Cap::Round);
        }
        paint
    }

    fn fill_paint(color: Rgba) -> skia::Paint {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Fill);
        paint.set_color(color.to_skia());
        paint
    }
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> skia::Rect {
    skia::Rect::from_xywh(x as f32, y as f32, w as f32, h as f32)
}

impl DrawContext for SkiaSurface {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn height(&self) -> f64 {
        self.height as f64
    }

    fn clear(&mut self) {
        let bg = self.background.to_skia();
        self.surface.canvas().clear(bg);
    }

    fn save(&mut self) {
        self.surface.canvas().save();
    }

    fn restore(&mut self) {
        self.surface.canvas().restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.surface.canvas().translate((dx as f32, dy as f32));
    }

    fn begin_path(&mut self) {
        self.path = skia::Path::new();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.move_to((x as f32, y as f32));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.line_to((x as f32, y as f32));
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        let oval = rect(cx - radius, cy - radius, radius * 2.0, radius * 2.0);
        let sweep = (end - start).to_degrees();
        self.path.arc_to(oval, start.to_degrees() as f32, sweep as f32, false);
    }

    fn close_path(&mut self) {
        self.path.close();
    }

    fn stroke(&mut self, style: &StrokeStyle) {
        let paint = Self::stroke_paint(style);
        let path = self.path.clone();
        self.surface.canvas().draw_path(&path, &paint);
    }

    fn fill(&mut self, color: Rgba) {
        let paint = Self::fill_paint(color);
        let path = self.path.clone();
        self.surface.canvas().draw_path(&path, &paint);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
        let paint = Self::fill_paint(color);
        self.surface.canvas().draw_rect(rect(x, y, w, h), &paint);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &StrokeStyle) {
        let paint = Self::stroke_paint(style);
        self.surface.canvas().draw_rect(rect(x, y, w, h), &paint);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, align: TextAlign, baseline: TextBaseline, font: &FontSpec, color: Rgba) {
        let paragraph = self.shaper.layout(text, font, color.to_skia());
        let (w, h) = (paragraph.longest_line(), paragraph.height());
        let left = match align {
            TextAlign::Left => x as f32,
            TextAlign::Center => x as f32 - w / 2.0,
            TextAlign::Right => x as f32 - w,
        };
        let top = match baseline {
            TextBaseline::Top => y as f32,
            TextBaseline::Middle => y as f32 - h / 2.0,
            TextBaseline::Bottom => y as f32 - h,
        };
        paragraph.paint(self.surface.canvas(), (left, top));
    }
}
