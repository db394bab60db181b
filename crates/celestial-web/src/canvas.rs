//! `Surface` over a 2D canvas context.

use std::f64::consts::TAU;

use celestial_engine::renderer::traits::{FontFace, TextAlign, ORBIT_DASH};
use celestial_engine::{Color, DrawableHandle, EngineError, Glow, Paint, RadialGradient, Rect, Surface, TextStyle};
use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use crate::images::{describe, DrawableStore, WebDrawable};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    store: DrawableStore,
    size: Vec2,
    pixel_ratio: f64,
}

impl CanvasSurface {
    /// Acquire `<canvas id=...>` and its 2D context.
    pub fn from_element_id(id: &str, store: DrawableStore) -> Result<Self, EngineError> {
        let missing = |why: &str| EngineError::SurfaceMissing(format!("#{id}: {why}"));

        let window = web_sys::window().ok_or_else(|| missing("no window"))?;
        let document = window.document().ok_or_else(|| missing("no document"))?;
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| missing("no such element"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| missing("not a canvas"))?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|err| missing(&describe(&err)))?
            .ok_or_else(|| missing("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| missing("unexpected context type"))?;

        let mut size = Vec2::new(canvas.client_width() as f32, canvas.client_height() as f32);
        if size.x <= 0.0 || size.y <= 0.0 {
            size = Vec2::new(
                window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32,
                window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32,
            );
        }

        let mut surface = Self {
            canvas,
            ctx,
            store,
            size,
            pixel_ratio: window.device_pixel_ratio().max(1.0),
        };
        surface.resize(size);
        Ok(surface)
    }

    fn set_fill(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
            Paint::Radial(gradient) => match self.gradient(gradient) {
                Ok(g) => self.ctx.set_fill_style_canvas_gradient(&g),
                Err(err) => {
                    log::debug!("gradient rejected: {}", describe(&err));
                    self.ctx.set_fill_style_str(&gradient.sample(0.5).to_css());
                }
            },
        }
    }

    fn gradient(&self, spec: &RadialGradient) -> Result<CanvasGradient, JsValue> {
        let g = self.ctx.create_radial_gradient(
            spec.inner_center.x as f64,
            spec.inner_center.y as f64,
            spec.inner_radius.max(0.0) as f64,
            spec.outer_center.x as f64,
            spec.outer_center.y as f64,
            spec.outer_radius.max(0.0) as f64,
        )?;
        for stop in &spec.stops {
            g.add_color_stop(stop.offset.clamp(0.0, 1.0), &stop.color.to_css())?;
        }
        Ok(g)
    }

    fn font(style: &TextStyle) -> String {
        let family = match style.face {
            FontFace::Serif => "Georgia, 'Times New Roman', serif",
            FontFace::SansSerif => "system-ui, -apple-system, sans-serif",
        };
        let weight = if style.bold { "bold " } else { "" };
        format!("{weight}{}px {family}", style.size)
    }

    fn text_width(&self, text: &str) -> f64 {
        self.ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
    }

    /// Canvas has no portable letter-spacing, so spaced text is laid out
    /// one glyph at a time.
    fn fill_spaced(&self, text: &str, pos: Vec2, style: &TextStyle) {
        let spacing = style.letter_spacing as f64;
        let glyphs: Vec<String> = text.chars().map(String::from).collect();
        let widths: Vec<f64> = glyphs.iter().map(|g| self.text_width(g)).collect();
        let total = widths.iter().sum::<f64>() + spacing * glyphs.len().saturating_sub(1) as f64;

        let mut x = match style.align {
            TextAlign::Center => pos.x as f64 - total / 2.0,
            TextAlign::Left => pos.x as f64,
        };
        self.ctx.set_text_align("left");
        for (glyph, width) in glyphs.iter().zip(widths) {
            let _ = self.ctx.fill_text(glyph, x, pos.y as f64);
            x += width + spacing;
        }
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn resize(&mut self, size: Vec2) {
        self.size = size;
        if let Some(window) = web_sys::window() {
            self.pixel_ratio = window.device_pixel_ratio().max(1.0);
        }
        self.canvas.set_width((size.x as f64 * self.pixel_ratio).round() as u32);
        self.canvas.set_height((size.y as f64 * self.pixel_ratio).round() as u32);
    }

    fn begin_frame(&mut self) {
        let r = self.pixel_ratio;
        let _ = self.ctx.set_transform(r, 0.0, 0.0, r, 0.0, 0.0);
        self.ctx.set_global_alpha(1.0);
        self.set_glow(None);
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        match glow {
            Some(glow) => {
                self.ctx.set_shadow_color(&glow.color.to_css());
                self.ctx.set_shadow_blur(glow.blur as f64);
            }
            None => {
                self.ctx.set_shadow_color(&Color::TRANSPARENT.to_css());
                self.ctx.set_shadow_blur(0.0);
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.width as f64, rect.height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        if radius <= 0.0 {
            return;
        }
        self.set_fill(paint);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, width: f32, color: Color, dashed: bool) {
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }
        let dash = js_sys::Array::new();
        if dashed {
            for d in ORBIT_DASH {
                dash.push(&JsValue::from_f64(d as f64));
            }
        }
        let _ = self.ctx.set_line_dash(&dash);

        self.ctx.begin_path();
        if self
            .ctx
            .ellipse(center.x as f64, center.y as f64, radii.x as f64, radii.y as f64, 0.0, 0.0, TAU)
            .is_ok()
        {
            self.ctx.set_stroke_style_str(&color.to_css());
            self.ctx.set_line_width(width as f64);
            self.ctx.stroke();
        }
        if dashed {
            let _ = self.ctx.set_line_dash(&js_sys::Array::new());
        }
    }

    fn draw_drawable(&mut self, handle: DrawableHandle, rect: Rect, rotation: f32, alpha: f32) {
        let Some(drawable) = self.store.get(handle) else {
            return;
        };
        let (w, h) = (rect.width as f64, rect.height as f64);
        let center = rect.center();

        self.ctx.save();
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
        let _ = self.ctx.translate(center.x as f64, center.y as f64);
        if rotation != 0.0 {
            let _ = self.ctx.rotate(rotation as f64);
        }
        let drawn = match &drawable {
            WebDrawable::Image(img) => self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(img, -w / 2.0, -h / 2.0, w, h),
            WebDrawable::Texture { canvas, .. } => self
                .ctx
                .draw_image_with_html_canvas_element_and_dw_and_dh(canvas, -w / 2.0, -h / 2.0, w, h),
        };
        if let Err(err) = drawn {
            log::debug!("drawable {handle:?} not drawn: {}", describe(&err));
        }
        self.ctx.restore();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.ctx.set_font(&Self::font(style));
        self.ctx.set_fill_style_str(&style.color.to_css());
        if style.letter_spacing > 0.0 {
            self.fill_spaced(text, pos, style);
            return;
        }
        self.ctx.set_text_align(match style.align {
            TextAlign::Center => "center",
            TextAlign::Left => "left",
        });
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }
}
