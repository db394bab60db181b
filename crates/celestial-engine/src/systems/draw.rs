//! Per-entity drawing.
//!
//! Each function paints one entity from its current state and never mutates
//! it. Drawables are checked for readiness on every call; anything not ready
//! falls back to vector shapes.

use glam::Vec2;

use crate::assets::provider::{AssetTracker, DrawableProvider};
use crate::components::constellation::Constellation;
use crate::components::planet::Planet;
use crate::components::star::Star;
use crate::core::geometry::Rect;
use crate::renderer::color::Color;
use crate::renderer::palette::Palette;
use crate::renderer::traits::{GradientStop, Glow, Paint, RadialGradient, Surface, TextStyle};

/// Halo behind hovered silhouette artwork.
const SILHOUETTE_GLOW: Glow = Glow { color: Color::rgb(0.470_588_24, 0.666_666_7, 0.862_745_1), blur: 40.0 };
const NAME_SPACING: f32 = 5.0;
const DEFAULT_RING: Color = Color::new(0.823_529_4, 0.705_882_4, 0.549_019_6, 0.4);

/// Drawables and their bookkeeping, borrowed for one frame.
pub struct DrawAssets<'a> {
    pub provider: &'a dyn DrawableProvider,
    pub tracker: &'a mut AssetTracker,
}

pub fn draw_background(surface: &mut dyn Surface, palette: &Palette) {
    let size = surface.size();
    surface.fill_rect(Rect::from_origin_size(Vec2::ZERO, size), palette.background);
}

pub fn draw_star(surface: &mut dyn Surface, star: &Star, palette: &Palette) {
    let color = palette.star.with_alpha(star.opacity);
    surface.fill_circle(star.pos, star.radius, &Paint::Solid(color));
}

/// Silhouette, connection lines, stars, then labels.
pub fn draw_constellation(
    surface: &mut dyn Surface,
    c: &Constellation,
    palette: &Palette,
    show_silhouette: bool,
    show_name: bool,
    show_star_names: bool,
    assets: &mut DrawAssets<'_>,
) {
    if c.hovered && show_silhouette {
        draw_silhouette(surface, c, assets);
    }

    let (line_color, line_alpha) = if c.hovered { (Color::GOLD, 0.35) } else { (palette.line, 0.7) };
    if c.hovered {
        surface.set_glow(Some(Glow { color: Color::GOLD.with_alpha(0.3), blur: 3.0 }));
    }
    for [from, to] in &c.pattern.connections {
        if let (Some(a), Some(b)) = (c.stars.get(*from), c.stars.get(*to)) {
            surface.stroke_line(a.pos, b.pos, 1.5, line_color.fade(line_alpha));
        }
    }

    let glow_multiplier = if c.hovered { 2.5 } else { 1.0 };
    let star_color = if c.hovered { Color::WHITE } else { palette.star };
    let scale = c.hover.value();
    for star in &c.stars {
        surface.set_glow(Some(Glow { color: star_color, blur: star.size * 2.0 * glow_multiplier }));
        let color = star_color.with_alpha(star.opacity(c.hovered));
        surface.fill_circle(star.pos, star.size * scale, &Paint::Solid(color));
    }
    surface.set_glow(None);

    if show_star_names {
        let style = TextStyle::new(10.0, palette.star.with_alpha(0.6)).sans().left();
        for star in &c.stars {
            surface.fill_text(&star.name, star.pos + Vec2::new(6.0, -6.0), &style);
        }
    }

    if c.hovered || show_name {
        draw_constellation_name(surface, c);
    }
}

fn draw_silhouette(surface: &mut dyn Surface, c: &Constellation, assets: &mut DrawAssets<'_>) {
    let Some(handle) = c.silhouette else { return };
    if !assets.tracker.is_ready(assets.provider, handle) {
        return;
    }
    let Some(projection) = c.silhouette_projection() else { return };
    surface.set_glow(Some(SILHOUETTE_GLOW));
    surface.draw_drawable(handle, projection.rect, 0.0, c.silhouette_opacity());
    surface.set_glow(None);
}

/// Upper-cased letter-spaced name above the pattern, description below it.
fn draw_constellation_name(surface: &mut dyn Surface, c: &Constellation) {
    let top = c.min_y();
    let color = if c.hovered { Color::BRIGHT_GOLD } else { Color::GOLD.with_alpha(0.7) };
    if c.hovered {
        surface.set_glow(Some(Glow { color: Color::GOLD.with_alpha(0.9), blur: 15.0 }));
    }
    let name_style = TextStyle::new(17.0, color).spaced(NAME_SPACING);
    surface.fill_text(&c.pattern.name.to_uppercase(), Vec2::new(c.anchor.x, top - 25.0), &name_style);

    if c.hovered {
        if let Some(meaning) = &c.pattern.meaning {
            surface.set_glow(Some(Glow { color: Color::GOLD.with_alpha(0.9), blur: 10.0 }));
            let style = TextStyle::new(19.0, color.with_alpha(0.9));
            surface.fill_text(meaning, Vec2::new(c.anchor.x, top - 6.0), &style);
        }
    }
    surface.set_glow(None);
}

/// Dashed orbit ellipse, brighter while the body is hovered.
pub fn draw_orbit_line(surface: &mut dyn Surface, planet: &Planet, palette: &Palette) {
    if planet.is_luminous() || planet.orbit_radius <= 0.0 {
        return;
    }
    let (color, width) = if planet.hovered {
        (planet.spec.colors.glow.with_alpha(0.4), 1.5)
    } else {
        (palette.line, 0.5)
    };
    surface.stroke_ellipse(planet.center, planet.orbit_radii(), width, color, true);
}

/// Luminous body, or a planet through its drawable fallback chain.
pub fn draw_planet(surface: &mut dyn Surface, planet: &Planet, assets: &mut DrawAssets<'_>) {
    if planet.is_luminous() {
        draw_sun(surface, planet);
    } else {
        draw_orbiting_body(surface, planet, assets);
    }
    if planet.hovered {
        draw_planet_label(surface, planet);
    }
}

fn draw_sun(surface: &mut dyn Surface, sun: &Planet) {
    let pos = sun.position();
    let pulse = sun.pulse_amount();

    let glow_radius = sun.size * 3.0 * pulse;
    let glow = RadialGradient {
        inner_center: pos,
        inner_radius: sun.size * 0.5,
        outer_center: pos,
        outer_radius: glow_radius,
        stops: vec![
            GradientStop::new(0.0, Color::rgba8(255, 200, 80, 0.4)),
            GradientStop::new(0.5, Color::rgba8(255, 150, 50, 0.15)),
            GradientStop::new(1.0, Color::rgba8(255, 100, 0, 0.0)),
        ],
    };
    surface.fill_circle(pos, glow_radius, &Paint::Radial(glow));

    let surface_radius = sun.size * pulse;
    let limb = RadialGradient::centered(
        pos,
        surface_radius,
        vec![
            GradientStop::new(0.0, Color::rgb8(0xff, 0xfe, 0xf0)),
            GradientStop::new(0.5, Color::rgb8(0xff, 0xee, 0x88)),
            GradientStop::new(0.8, Color::rgb8(0xff, 0xaa, 0x33)),
            GradientStop::new(1.0, Color::rgb8(0xdd, 0x66, 0x00)),
        ],
    );
    surface.fill_circle(pos, surface_radius, &Paint::Radial(limb));

    let core_radius = sun.size * 0.6;
    let core = RadialGradient::offset(
        pos,
        Vec2::splat(-sun.size * 0.2),
        core_radius,
        vec![
            GradientStop::new(0.0, Color::rgba8(255, 255, 255, 0.8)),
            GradientStop::new(0.4, Color::rgba8(255, 255, 200, 0.3)),
            GradientStop::new(1.0, Color::rgba8(255, 255, 150, 0.0)),
        ],
    );
    surface.fill_circle(pos, core_radius, &Paint::Radial(core));
}

/// Texture, then photo, then a two-tone gradient disc with ring ellipses.
fn draw_orbiting_body(surface: &mut dyn Surface, planet: &Planet, assets: &mut DrawAssets<'_>) {
    let pos = planet.position();
    let blur = 8.0 + 12.0 * planet.highlight.value();
    surface.set_glow(Some(Glow { color: planet.spec.colors.glow, blur }));

    // Artwork covers the whole hit area.
    let half = planet.hit_radius();
    let rect = Rect::from_origin_size(pos - Vec2::splat(half), Vec2::splat(half * 2.0));

    if let Some(texture) = planet.texture.filter(|h| assets.tracker.is_ready(assets.provider, *h)) {
        surface.draw_drawable(texture, rect, 0.0, 1.0);
    } else if let Some(image) = planet.image.filter(|h| assets.tracker.is_ready(assets.provider, *h)) {
        let rotation = if planet.has_rings() { planet.ring_rotation() } else { 0.0 };
        surface.draw_drawable(image, rect, rotation, 1.0);
    } else {
        if planet.has_rings() {
            let ring = planet.spec.ring_color.unwrap_or(DEFAULT_RING);
            let outer = planet.size * 1.8;
            let inner = planet.size * 1.5;
            surface.stroke_ellipse(pos, Vec2::new(outer, outer * 0.3), 4.0, ring, false);
            surface.stroke_ellipse(pos, Vec2::new(inner, inner * 0.3), 2.0, ring, false);
        }
        let disc = RadialGradient::offset(
            pos,
            Vec2::splat(-planet.size / 3.0),
            planet.size,
            vec![
                GradientStop::new(0.0, planet.spec.colors.light),
                GradientStop::new(1.0, planet.spec.colors.dark),
            ],
        );
        surface.fill_circle(pos, planet.size, &Paint::Radial(disc));
    }
    surface.set_glow(None);
}

/// Symbol above the body with the upper-cased name under it.
fn draw_planet_label(surface: &mut dyn Surface, planet: &Planet) {
    let pos = planet.position();
    let label_y = pos.y - planet.size - 15.0;
    let glow = planet.spec.colors.glow;

    surface.set_glow(Some(Glow { color: glow, blur: 10.0 }));
    surface.fill_text(&planet.spec.symbol, Vec2::new(pos.x, label_y), &TextStyle::new(18.0, glow).bold());

    surface.set_glow(Some(Glow { color: Color::GOLD.with_alpha(0.8), blur: 10.0 }));
    let name_style = TextStyle::new(12.0, Color::GOLD);
    surface.fill_text(&planet.spec.name.to_uppercase(), Vec2::new(pos.x, label_y + 16.0), &name_style);
    surface.set_glow(None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::assets::catalog::Catalogs;
    use crate::assets::provider::{DrawableProvider, DrawableStatus, ManualProvider};
    use crate::renderer::palette::Theme;
    use crate::renderer::recorder::{DrawCommand, RecordingSurface};

    fn saturn(provider: &mut ManualProvider, tracker: &mut AssetTracker) -> Planet {
        let catalogs = Catalogs::builtin().unwrap();
        let spec = catalogs.planets.get("Saturn").unwrap().clone();
        let mut p = Planet::new(EntityId(1), spec, Vec2::new(400.0, 300.0), 0.0);
        let texture = provider.generate_texture("Saturn", 256).unwrap();
        let image = provider.load_artwork("planets/saturn.png");
        tracker.track(texture, "texture");
        tracker.track(image, "image");
        p.texture = Some(texture);
        p.image = Some(image);
        p
    }

    fn drawables(surface: &RecordingSurface) -> Vec<(u32, f32)> {
        surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Drawable { handle, rotation, .. } => Some((handle.0, *rotation)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn fallback_chain_prefers_texture_then_photo_then_gradient() {
        let mut provider = ManualProvider::with_textures();
        let mut tracker = AssetTracker::new();
        let planet = saturn(&mut provider, &mut tracker);
        let (texture, image) = (planet.texture.unwrap(), planet.image.unwrap());

        // Nothing ready: gradient disc and ring ellipses.
        let mut surface = RecordingSurface::new(800.0, 600.0);
        draw_planet(&mut surface, &planet, &mut DrawAssets { provider: &provider, tracker: &mut tracker });
        assert!(drawables(&surface).is_empty());
        let rings = surface.commands().iter().filter(|c| matches!(c, DrawCommand::Ellipse { .. })).count();
        assert_eq!(rings, 2);

        // Photo only: rotated for the rings.
        provider.resolve(image, DrawableStatus::Ready);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        draw_planet(&mut surface, &planet, &mut DrawAssets { provider: &provider, tracker: &mut tracker });
        assert_eq!(drawables(&surface), vec![(image.0, planet.ring_rotation())]);

        // Texture wins once ready.
        provider.resolve(texture, DrawableStatus::Ready);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        draw_planet(&mut surface, &planet, &mut DrawAssets { provider: &provider, tracker: &mut tracker });
        assert_eq!(drawables(&surface), vec![(texture.0, 0.0)]);
    }

    #[test]
    fn hovered_planet_gets_symbol_and_name() {
        let provider = ManualProvider::new();
        let mut tracker = AssetTracker::new();
        let catalogs = Catalogs::builtin().unwrap();
        let spec = catalogs.planets.get("Mars").unwrap().clone();
        let mut mars = Planet::new(EntityId(2), spec, Vec2::new(400.0, 300.0), 0.0);
        mars.hovered = true;
        let mut surface = RecordingSurface::new(800.0, 600.0);
        draw_planet(&mut surface, &mars, &mut DrawAssets { provider: &provider, tracker: &mut tracker });
        assert_eq!(surface.texts(), vec![mars.spec.symbol.as_str(), "MARS"]);
    }

    #[test]
    fn orbit_line_is_dashed_and_skipped_for_sun() {
        let catalogs = Catalogs::builtin().unwrap();
        let palette = Theme::Dark.palette();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let sun = Planet::new(EntityId(1), catalogs.planets.get("Sun").unwrap().clone(), Vec2::ZERO, 0.0);
        draw_orbit_line(&mut surface, &sun, &palette);
        assert!(surface.commands().is_empty());

        let mut earth = Planet::new(EntityId(2), catalogs.planets.get("Earth").unwrap().clone(), Vec2::ZERO, 0.0);
        earth.tilt = 0.6;
        draw_orbit_line(&mut surface, &earth, &palette);
        match &surface.commands()[0] {
            DrawCommand::Ellipse { radii, dashed, color, .. } => {
                assert!(*dashed);
                assert_eq!(*radii, earth.orbit_radii());
                assert_eq!(*color, palette.line);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
