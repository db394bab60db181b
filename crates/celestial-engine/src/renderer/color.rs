use serde::{Deserialize, Deserializer};

/// RGBA color, components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a color from RGBA components (0.0 - 1.0).
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a fully opaque color from RGB u8 values (0-255).
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Create a color from RGB u8 values with an explicit alpha.
    pub fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    /// Same color with a replaced alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Same color with alpha multiplied by `factor`.
    pub fn fade(self, factor: f32) -> Self {
        Self { a: self.a * factor, ..self }
    }

    /// Parse `#rrggbb`, `#rgb`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(hex);
        }
        let (body, has_alpha) = if let Some(rest) = text.strip_prefix("rgba(") {
            (rest.strip_suffix(')')?, true)
        } else if let Some(rest) = text.strip_prefix("rgb(") {
            (rest.strip_suffix(')')?, false)
        } else {
            return None;
        };

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return None;
        }
        let channel = |s: &str| s.parse::<u8>().ok();
        let r = channel(parts[0])?;
        let g = channel(parts[1])?;
        let b = channel(parts[2])?;
        let a = if has_alpha {
            parts[3].parse::<f32>().ok().filter(|a| (0.0..=1.0).contains(a))?
        } else {
            1.0
        };
        Some(Self::rgba8(r, g, b, a))
    }

    /// CSS `rgba(...)` form for canvas-style hosts.
    pub fn to_css(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {})",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Label gold.
    pub const GOLD: Self = Self::rgb(0.831_372_6, 0.686_274_5, 0.215_686_28);
    /// Label gold while hovered.
    pub const BRIGHT_GOLD: Self = Self::rgb(1.0, 0.843_137_3, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Color::parse(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized color: {text}")))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
    let pair = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        6 => Some(Color::rgb8(pair(0)?, pair(2)?, pair(4)?)),
        3 => Some(Color::rgb8(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex() {
        let c = Color::parse("#d4af37").unwrap();
        assert_eq!(c, Color::rgb8(212, 175, 55));
        assert!((c.r - Color::GOLD.r).abs() < 1e-6);
        let short = Color::parse("#fff").unwrap();
        assert_eq!(short, Color::WHITE);
    }

    #[test]
    fn parses_rgba() {
        let c = Color::parse("rgba(210, 180, 140, 0.4)").unwrap();
        assert_eq!(c, Color::rgba8(210, 180, 140, 0.4));
        assert!(Color::parse("rgb(1, 2, 3)").is_some());
    }

    #[test]
    fn rejects_garbage() {
        assert!(Color::parse("gold").is_none());
        assert!(Color::parse("#12345").is_none());
        assert!(Color::parse("rgba(1, 2, 3)").is_none());
        assert!(Color::parse("rgba(1, 2, 3, 7)").is_none());
    }

    #[test]
    fn css_round_trip_of_channels() {
        assert_eq!(Color::rgba8(255, 0, 128, 0.5).to_css(), "rgba(255, 0, 128, 0.5)");
    }

    #[test]
    fn deserializes_from_string() {
        let c: Color = serde_json::from_str("\"#000000\"").unwrap();
        assert_eq!(c, Color::BLACK);
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }
}
