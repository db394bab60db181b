//! Headless surface that records every primitive call.

use glam::Vec2;

use super::color::Color;
use super::traits::{Glow, Paint, Surface, TextStyle};
use crate::assets::provider::DrawableHandle;
use crate::core::geometry::Rect;

/// One recorded primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Glow(Option<Glow>),
    FillRect { rect: Rect, color: Color },
    FillCircle { center: Vec2, radius: f32, paint: Paint },
    Line { from: Vec2, to: Vec2, width: f32, color: Color },
    Ellipse { center: Vec2, radii: Vec2, width: f32, color: Color, dashed: bool },
    Drawable { handle: DrawableHandle, rect: Rect, rotation: f32, alpha: f32 },
    Text { text: String, pos: Vec2, style: TextStyle },
}

/// Surface that keeps the commands of the current frame.
///
/// `begin_frame` clears the list, so after a tick `commands()` holds exactly
/// what that tick painted.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Vec2,
    commands: Vec<DrawCommand>,
    resizes: u32,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
            resizes: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of `resize` calls seen so far.
    pub fn resize_count(&self) -> u32 {
        self.resizes
    }

    /// Text of every label drawn this frame, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Index of the first text command equal to `text`.
    pub fn text_index(&self, text: &str) -> Option<usize> {
        self.commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Text { text: t, .. } if t == text))
    }

    pub fn drawables(&self) -> Vec<DrawableHandle> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Drawable { handle, .. } => Some(*handle),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn resize(&mut self, size: Vec2) {
        self.size = size;
        self.resizes += 1;
        self.commands.clear();
    }

    fn begin_frame(&mut self) {
        self.commands.clear();
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.commands.push(DrawCommand::Glow(glow));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::FillCircle { center, radius, paint: paint.clone() });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, width, color });
    }

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, width: f32, color: Color, dashed: bool) {
        self.commands.push(DrawCommand::Ellipse { center, radii, width, color, dashed });
    }

    fn draw_drawable(&mut self, handle: DrawableHandle, rect: Rect, rotation: f32, alpha: f32) {
        self.commands.push(DrawCommand::Drawable { handle, rect, rotation, alpha });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            style: style.clone(),
        });
    }
}
