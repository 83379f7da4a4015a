// File: crates/plot-core/src/color.rs
// Summary: RGBA color value type: parsing, channel scaling/offsetting, CSS-style formatting.

use std::fmt;
use std::str::FromStr;

use skia_safe as skia;

/// A color with 8-bit rgb channels and a fractional alpha.
/// Contract: every constructor and mutator leaves the value normalized
/// (rgb in `0..=255`, alpha in `0..=1`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

/// Channel selector for [`Rgba::scale`] and [`Rgba::add`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    R,
    G,
    B,
    A,
}

impl Channel {
    pub const RGB: &'static [Channel] = &[Channel::R, Channel::G, Channel::B];
    pub const ALPHA: &'static [Channel] = &[Channel::A];
}

impl Rgba {
    pub const BLACK: Rgba = Rgba { r: 0, g: 0, b: 0, a: 1.0 };
    pub const WHITE: Rgba = Rgba { r: 255, g: 255, b: 255, a: 1.0 };
    pub const TRANSPARENT: Rgba = Rgba { r: 255, g: 255, b: 255, a: 0.0 };

    /// Build a color from unclamped channel values. Rgb channels are
    /// truncated toward zero before clamping.
    pub fn make(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
            a: if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) },
        }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse a CSS-like color string. Unknown input yields opaque black.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();

        if let Some(args) = function_args(&lower, "rgba") {
            if let Some(c) = parse_components(&args, true) {
                return c;
            }
        } else if let Some(args) = function_args(&lower, "rgb") {
            if let Some(c) = parse_components(&args, false) {
                return c;
            }
        }

        if let Some(hex) = lower.strip_prefix('#') {
            if let Some(c) = parse_hex(hex) {
                return c;
            }
        }

        if lower == "transparent" {
            return Rgba::TRANSPARENT;
        }
        match named(&lower) {
            Some((r, g, b)) => Rgba::rgb(r, g, b),
            None => Rgba::BLACK,
        }
    }

    /// Multiply the selected channels by `factor`.
    pub fn scale(self, channels: &[Channel], factor: f64) -> Self {
        self.map(channels, |v| v * factor)
    }

    /// Add `delta` to the selected channels.
    pub fn add(self, channels: &[Channel], delta: f64) -> Self {
        self.map(channels, |v| v + delta)
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Rgba::make(self.r as f64, self.g as f64, self.b as f64, a)
    }

    fn map(self, channels: &[Channel], f: impl Fn(f64) -> f64) -> Self {
        let (mut r, mut g, mut b, mut a) = (self.r as f64, self.g as f64, self.b as f64, self.a);
        for ch in channels {
            match ch {
                Channel::R => r = f(r),
                Channel::G => g = f(g),
                Channel::B => b = f(b),
                Channel::A => a = f(a),
            }
        }
        Rgba::make(r, g, b, a)
    }

    pub fn to_skia(self) -> skia::Color {
        let a = (self.a * 255.0).round().clamp(0.0, 255.0) as u8;
        skia::Color::from_argb(a, self.r, self.g, self.b)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::BLACK
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "rgb({},{},{})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Rgba {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Rgba::parse(s))
    }
}

impl From<&str> for Rgba {
    fn from(s: &str) -> Self {
        Rgba::parse(s)
    }
}

#[inline]
fn clamp_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.trunc().clamp(0.0, 255.0) as u8
}

fn function_args(s: &str, name: &str) -> Option<Vec<String>> {
    let rest = s.strip_prefix(name)?.trim_start();
    let inner = rest.strip_prefix('(')?.strip_suffix(')')?;
    Some(inner.split(',').map(|p| p.trim().to_string()).collect())
}

fn parse_components(args: &[String], with_alpha: bool) -> Option<Rgba> {
    let expected = if with_alpha { 4 } else { 3 };
    if args.len() != expected {
        return None;
    }
    let percent = args[0].ends_with('%');
    let mut rgb = [0.0f64; 3];
    for (slot, raw) in rgb.iter_mut().zip(args.iter()) {
        *slot = if percent {
            raw.strip_suffix('%')?.parse::<f64>().ok()? * 2.55
        } else {
            if raw.ends_with('%') || raw.len() > 3 {
                return None;
            }
            raw.parse::<u32>().ok()? as f64
        };
    }
    let a = if with_alpha { args[3].parse::<f64>().ok()? } else { 1.0 };
    Some(Rgba::make(rgb[0], rgb[1], rgb[2], a))
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let digits: Vec<u8> = hex
        .chars()
        .take_while(|c| c.is_ascii_hexdigit())
        .map(|c| c.to_digit(16).unwrap_or(0) as u8)
        .collect();
    if digits.len() >= 6 {
        Some(Rgba::rgb(
            digits[0] * 16 + digits[1],
            digits[2] * 16 + digits[3],
            digits[4] * 16 + digits[5],
        ))
    } else if digits.len() >= 3 {
        Some(Rgba::rgb(digits[0] * 17, digits[1] * 17, digits[2] * 17))
    } else {
        None
    }
}

fn named(name: &str) -> Option<(u8, u8, u8)> {
    let rgb = match name {
        "aqua" | "cyan" => (0, 255, 255),
        "azure" => (240, 255, 255),
        "beige" => (245, 245, 220),
        "black" => (0, 0, 0),
        "blue" => (0, 0, 255),
        "brown" => (165, 42, 42),
        "darkblue" => (0, 0, 139),
        "darkcyan" => (0, 139, 139),
        "darkgrey" => (169, 169, 169),
        "darkgreen" => (0, 100, 0),
        "darkkhaki" => (189, 183, 107),
        "darkmagenta" => (139, 0, 139),
        "darkolivegreen" => (85, 107, 47),
        "darkorange" => (255, 140, 0),
        "darkorchid" => (153, 50, 204),
        "darkred" => (139, 0, 0),
        "darksalmon" => (233, 150, 122),
        "darkviolet" => (148, 0, 211),
        "fuchsia" | "magenta" => (255, 0, 255),
        "gold" => (255, 215, 0),
        "green" => (0, 128, 0),
        "indigo" => (75, 0, 130),
        "khaki" => (240, 230, 140),
        "lightblue" => (173, 216, 230),
        "lightcyan" => (224, 255, 255),
        "lightgreen" => (144, 238, 144),
        "lightgrey" => (211, 211, 211),
        "lightpink" => (255, 182, 193),
        "lightyellow" => (255, 255, 224),
        "lime" => (0, 255, 0),
        "maroon" => (128, 0, 0),
        "navy" => (0, 0, 128),
        "olive" => (128, 128, 0),
        "orange" => (255, 165, 0),
        "pink" => (255, 192, 203),
        "purple" | "violet" => (128, 0, 128),
        "red" => (255, 0, 0),
        "silver" => (192, 192, 192),
        "white" => (255, 255, 255),
        "yellow" => (255, 255, 0),
        _ => return None,
    };
    Some(rgb)
}
