//! Lyon-backed surface for GPU hosts.
//!
//! Fills and strokes are tessellated on the CPU into a flat triangle-list
//! buffer of [`VectorVertex`]; drawables and text cannot be tessellated and
//! are collected as side lists the host draws on top in the same order.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use super::color::Color;
use super::traits::{Glow, Paint, RadialGradient, Surface, TextStyle, ORBIT_DASH};
use crate::assets::provider::DrawableHandle;
use crate::core::geometry::Rect;

/// Concentric rings used to approximate a radial gradient.
const GRADIENT_STEPS: usize = 12;
/// Polyline samples per dashed ellipse.
const ELLIPSE_SAMPLES: usize = 128;

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

struct FillCtor {
    color: Color,
}

impl FillVertexConstructor<VectorVertex> for FillCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        let p = vertex.position();
        VectorVertex { x: p.x, y: p.y, r: self.color.r, g: self.color.g, b: self.color.b, a: self.color.a }
    }
}

struct StrokeCtor {
    color: Color,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        let p = vertex.position();
        VectorVertex { x: p.x, y: p.y, r: self.color.r, g: self.color.g, b: self.color.b, a: self.color.a }
    }
}

/// A drawable the host must composite at this point of the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blit {
    pub handle: DrawableHandle,
    pub rect: Rect,
    pub rotation: f32,
    pub alpha: f32,
    /// Vertex count at the time of the call, for interleaving with geometry.
    pub after_vertex: usize,
}

/// A text run the host must draw at this point of the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub pos: Vec2,
    pub style: TextStyle,
    pub after_vertex: usize,
}

pub struct VectorSurface {
    size: Vec2,
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    vertices: Vec<VectorVertex>,
    glow: Option<Glow>,
    blits: Vec<Blit>,
    labels: Vec<Label>,
}

impl VectorSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            vertices: Vec::with_capacity(16384),
            glow: None,
            blits: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Number of vertices tessellated this frame.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Triangle list for the current frame.
    pub fn vertices(&self) -> &[VectorVertex] {
        &self.vertices
    }

    /// The triangle list as raw bytes, ready for a GPU upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn blits(&self) -> &[Blit] {
        &self.blits
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Move indexed geometry into the flat triangle list.
    fn flush_geometry(&mut self) {
        let geometry = &self.geometry;
        self.vertices
            .extend(geometry.indices.iter().map(|&i| geometry.vertices[i as usize]));
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillCtor { color }),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => {
                log::debug!("fill tessellation failed: {e:?}");
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }

    fn stroke_path(&mut self, path: &Path, width: f32, color: Color) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeCtor { color }),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => {
                log::debug!("stroke tessellation failed: {e:?}");
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 || color.a <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, Winding::Positive);
        let path = builder.build();
        self.fill_path(&path, color);
    }

    /// Stepped approximation: discs from the outer radius inward, each
    /// sampled at its own normalized radius.
    fn fill_gradient(&mut self, gradient: &RadialGradient) {
        let outer = gradient.outer_radius;
        if outer <= 0.0 {
            return;
        }
        for step in (1..=GRADIENT_STEPS).rev() {
            let t = step as f32 / GRADIENT_STEPS as f32;
            let center = gradient.inner_center.lerp(gradient.outer_center, t);
            self.fill_disc(center, outer * t, gradient.sample(t));
        }
    }

    /// Stroke the dash runs of an open polyline.
    fn stroke_dashed(&mut self, points: &[Vec2], width: f32, color: Color) {
        if points.len() < 2 {
            return;
        }
        let mut lengths = Vec::with_capacity(points.len());
        let mut total = 0.0;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                total += points[i - 1].distance(*p);
            }
            lengths.push(total);
        }

        for (start, end) in dash_spans(total, ORBIT_DASH) {
            let mut builder = Path::builder();
            let from = point_along(points, &lengths, start);
            builder.begin(point(from.x, from.y));
            for (p, _) in points.iter().zip(&lengths).filter(|(_, l)| **l > start && **l < end) {
                builder.line_to(point(p.x, p.y));
            }
            let to = point_along(points, &lengths, end);
            builder.line_to(point(to.x, to.y));
            builder.end(false);
            let path = builder.build();
            self.stroke_path(&path, width, color);
        }
    }

    fn apply_glow(&mut self, center: Vec2, radius: f32) {
        if let Some(glow) = self.glow {
            self.fill_disc(center, radius + glow.blur * 0.5, glow.color.fade(0.35));
        }
    }
}

/// Arc-length intervals that are drawn when a path of `length` is dashed
/// with `[dash, gap]`.
fn dash_spans(length: f32, pattern: [f32; 2]) -> Vec<(f32, f32)> {
    let [dash, gap] = pattern;
    if dash <= 0.0 || dash + gap <= 0.0 {
        return vec![(0.0, length)];
    }
    let mut spans = Vec::new();
    let mut start = 0.0;
    while start < length {
        spans.push((start, (start + dash).min(length)));
        start += dash + gap;
    }
    spans
}

/// Point at arc length `s` along a polyline with cumulative `lengths`.
fn point_along(points: &[Vec2], lengths: &[f32], s: f32) -> Vec2 {
    let i = lengths.partition_point(|l| *l < s).clamp(1, points.len() - 1);
    let span = lengths[i] - lengths[i - 1];
    let t = if span > 0.0 { (s - lengths[i - 1]) / span } else { 0.0 };
    points[i - 1].lerp(points[i], t.clamp(0.0, 1.0))
}

impl Surface for VectorSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn resize(&mut self, size: Vec2) {
        self.size = size;
        self.begin_frame();
    }

    fn begin_frame(&mut self) {
        self.vertices.clear();
        self.blits.clear();
        self.labels.clear();
        self.glow = None;
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.glow = glow;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let mut builder = Path::builder();
        builder.begin(point(rect.x, rect.y));
        builder.line_to(point(rect.right(), rect.y));
        builder.line_to(point(rect.right(), rect.bottom()));
        builder.line_to(point(rect.x, rect.bottom()));
        builder.close();
        let path = builder.build();
        self.fill_path(&path, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.apply_glow(center, radius);
        match paint {
            Paint::Solid(color) => self.fill_disc(center, radius, *color),
            Paint::Radial(gradient) => self.fill_gradient(gradient),
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let mut builder = Path::builder();
        builder.begin(point(from.x, from.y));
        builder.line_to(point(to.x, to.y));
        builder.end(false);
        let path = builder.build();
        self.stroke_path(&path, width, color);
    }

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, width: f32, color: Color, dashed: bool) {
        if radii.x <= 0.0 {
            return;
        }
        // A fully tilted orbit collapses to a horizontal line.
        let ry = radii.y.max(0.01);
        if !dashed {
            let mut builder = Path::builder();
            builder.add_ellipse(
                point(center.x, center.y),
                lyon::math::vector(radii.x, ry),
                lyon::math::Angle::radians(0.0),
                Winding::Positive,
            );
            let path = builder.build();
            self.stroke_path(&path, width, color);
            return;
        }
        let outline: Vec<Vec2> = (0..=ELLIPSE_SAMPLES)
            .map(|i| {
                let a = i as f32 / ELLIPSE_SAMPLES as f32 * std::f32::consts::TAU;
                center + Vec2::new(a.cos() * radii.x, a.sin() * ry)
            })
            .collect();
        self.stroke_dashed(&outline, width, color);
    }

    fn draw_drawable(&mut self, handle: DrawableHandle, rect: Rect, rotation: f32, alpha: f32) {
        self.blits.push(Blit {
            handle,
            rect,
            rotation,
            alpha,
            after_vertex: self.vertices.len(),
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.labels.push(Label {
            text: text.to_string(),
            pos,
            style: style.clone(),
            after_vertex: self.vertices.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::traits::GradientStop;
    use std::mem::size_of;

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(size_of::<VectorVertex>(), 24);
        assert_eq!(VectorVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn fill_rect_is_two_triangles() {
        let mut s = VectorSurface::new(100.0, 100.0);
        s.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        assert_eq!(s.vertex_count(), 6);
        assert_eq!(s.vertex_bytes().len(), 6 * VectorVertex::STRIDE_BYTES);
    }

    #[test]
    fn gradient_produces_more_geometry_than_solid() {
        let mut solid = VectorSurface::new(100.0, 100.0);
        solid.fill_circle(Vec2::splat(50.0), 20.0, &Paint::Solid(Color::WHITE));
        let mut graded = VectorSurface::new(100.0, 100.0);
        let gradient = RadialGradient::centered(
            Vec2::splat(50.0),
            20.0,
            vec![
                GradientStop::new(0.0, Color::WHITE),
                GradientStop::new(1.0, Color::BLACK),
            ],
        );
        graded.fill_circle(Vec2::splat(50.0), 20.0, &Paint::Radial(gradient));
        assert!(solid.vertex_count() > 0);
        assert!(graded.vertex_count() > solid.vertex_count());
    }

    #[test]
    fn dashed_ellipse_tessellates() {
        let mut s = VectorSurface::new(100.0, 100.0);
        s.stroke_ellipse(Vec2::splat(50.0), Vec2::new(40.0, 16.0), 1.0, Color::WHITE, true);
        assert!(s.vertex_count() > 0);
    }

    #[test]
    fn dash_runs_follow_orbit_pattern() {
        let spans = dash_spans(150.0, ORBIT_DASH);
        assert_eq!(spans.len(), 10);
        assert_eq!(spans[0], (0.0, 5.0));
        assert_eq!(spans[1], (15.0, 20.0));
        // One third of the outline is inked.
        let inked: f32 = spans.iter().map(|(a, b)| b - a).sum();
        assert_eq!(inked, 50.0);
        assert_eq!(dash_spans(7.0, ORBIT_DASH), vec![(0.0, 5.0)]);
    }

    #[test]
    fn point_along_interpolates_segments() {
        let points = [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)];
        let lengths = [0.0, 10.0, 20.0];
        assert_eq!(point_along(&points, &lengths, 5.0), Vec2::new(5.0, 0.0));
        assert_eq!(point_along(&points, &lengths, 15.0), Vec2::new(10.0, 5.0));
        assert_eq!(point_along(&points, &lengths, 0.0), Vec2::ZERO);
    }

    #[test]
    fn side_lists_record_position_in_stream() {
        let mut s = VectorSurface::new(100.0, 100.0);
        s.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        s.fill_text("ARIES", Vec2::ZERO, &TextStyle::new(12.0, Color::WHITE));
        s.draw_drawable(DrawableHandle(3), Rect::new(0.0, 0.0, 5.0, 5.0), 0.0, 1.0);
        assert_eq!(s.labels()[0].after_vertex, 6);
        assert_eq!(s.blits()[0].handle, DrawableHandle(3));
        s.begin_frame();
        assert!(s.labels().is_empty());
        assert_eq!(s.vertex_count(), 0);
    }
}
