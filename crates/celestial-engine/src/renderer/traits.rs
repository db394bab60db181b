//! Surface trait the backdrop draws onto.
//!
//! The engine never touches a platform canvas directly. Hosts implement
//! [`Surface`] over whatever 2D raster they have (a browser
//! `CanvasRenderingContext2d`, a lyon tessellator feeding a GPU, or a
//! recorder in tests) and the frame systems issue primitive calls in paint
//! order.

use glam::Vec2;

use crate::assets::provider::DrawableHandle;
use crate::core::geometry::Rect;
use crate::renderer::color::Color;

/// One color stop of a radial gradient; `offset` in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Radial gradient between two circles, canvas-style.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub inner_center: Vec2,
    pub inner_radius: f32,
    pub outer_center: Vec2,
    pub outer_radius: f32,
    pub stops: Vec<GradientStop>,
}

impl RadialGradient {
    /// Concentric gradient from `center` out to `radius`.
    pub fn centered(center: Vec2, radius: f32, stops: Vec<GradientStop>) -> Self {
        Self {
            inner_center: center,
            inner_radius: 0.0,
            outer_center: center,
            outer_radius: radius,
            stops,
        }
    }

    /// Gradient whose bright spot is shifted off-center by `offset`.
    pub fn offset(center: Vec2, offset: Vec2, radius: f32, stops: Vec<GradientStop>) -> Self {
        Self {
            inner_center: center + offset,
            inner_radius: 0.0,
            outer_center: center,
            outer_radius: radius,
            stops,
        }
    }

    /// Color at normalized distance `t` from the inner circle.
    pub fn sample(&self, t: f32) -> Color {
        let Some(first) = self.stops.first() else {
            return Color::TRANSPARENT;
        };
        if t <= first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = (b.offset - a.offset).max(f32::EPSILON);
                let k = (t - a.offset) / span;
                return Color::new(
                    a.color.r + (b.color.r - a.color.r) * k,
                    a.color.g + (b.color.g - a.color.g) * k,
                    a.color.b + (b.color.b - a.color.b) * k,
                    a.color.a + (b.color.a - a.color.a) * k,
                );
            }
        }
        self.stops.last().map(|s| s.color).unwrap_or(Color::TRANSPARENT)
    }
}

/// How a filled shape is painted.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Radial(RadialGradient),
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

/// Soft shadow applied to subsequent draws until cleared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub blur: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFace {
    /// Display serif used for constellation names.
    #[default]
    Serif,
    SansSerif,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub face: FontFace,
    pub bold: bool,
    pub color: Color,
    pub align: TextAlign,
    /// Extra advance between glyphs, in pixels.
    pub letter_spacing: f32,
}

impl TextStyle {
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            face: FontFace::default(),
            bold: false,
            color,
            align: TextAlign::default(),
            letter_spacing: 0.0,
        }
    }

    pub fn sans(mut self) -> Self {
        self.face = FontFace::SansSerif;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn left(mut self) -> Self {
        self.align = TextAlign::Left;
        self
    }

    pub fn spaced(mut self, spacing: f32) -> Self {
        self.letter_spacing = spacing;
        self
    }
}

/// Dash and gap lengths of a dashed outline, in CSS pixels.
pub const ORBIT_DASH: [f32; 2] = [5.0, 10.0];

/// A 2D raster the animation loop paints onto.
///
/// Calls arrive in paint order; later calls cover earlier ones.
pub trait Surface {
    /// Current drawable size in CSS pixels.
    fn size(&self) -> Vec2;

    /// Resize the backing store. Content is discarded.
    fn resize(&mut self, size: Vec2);

    /// Called once at the start of every tick, before the background fill.
    fn begin_frame(&mut self) {}

    /// Set or clear the glow used by subsequent fills and strokes.
    fn set_glow(&mut self, glow: Option<Glow>);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    /// Axis-aligned ellipse outline, optionally dashed with [`ORBIT_DASH`].
    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, width: f32, color: Color, dashed: bool);

    /// Blit a ready drawable into `rect`, rotated by `rotation` radians
    /// about the rect center.
    fn draw_drawable(&mut self, handle: DrawableHandle, rect: Rect, rotation: f32, alpha: f32);

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle);
}
