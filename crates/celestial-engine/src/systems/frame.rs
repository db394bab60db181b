//! One animation tick, in paint order.

use glam::Vec2;

use super::draw::{self, DrawAssets};
use super::hover::{update_hover, HoverSummary};
use crate::api::config::SceneConfig;
use crate::api::types::EntityId;
use crate::core::scene::Scene;
use crate::renderer::palette::Palette;
use crate::renderer::traits::Surface;

/// Per-tick inputs borrowed from the engine.
pub struct FrameInput<'a> {
    pub palette: Palette,
    pub config: &'a SceneConfig,
    pub pointer: Option<Vec2>,
}

/// What a tick did, for hosts and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub hover: HoverSummary,
    /// Constellations in the order they were painted.
    pub constellation_order: Vec<EntityId>,
    /// Bodies in the order they were painted (far to near).
    pub planet_order: Vec<EntityId>,
}

/// Run one tick against `scene`.
///
/// 1. background, 2. twinkle and draw stars, 3. refresh hover flags,
/// 4. ease and draw constellations with hovered ones last, 5. orbit lines,
/// advance orbits and pulses, 6. draw bodies sorted by screen y.
pub fn run_frame(
    scene: &mut Scene,
    surface: &mut dyn Surface,
    input: &FrameInput<'_>,
    assets: &mut DrawAssets<'_>,
) -> FrameReport {
    let config = input.config;
    let palette = &input.palette;
    let mut report = FrameReport::default();

    surface.begin_frame();
    draw::draw_background(surface, palette);

    for star in scene.stars_mut() {
        star.twinkle();
        draw::draw_star(surface, star, palette);
    }

    report.hover = update_hover(scene, input.pointer, config);

    for c in scene.constellations_mut() {
        c.hover.step(c.hovered);
    }
    for hovered_pass in [false, true] {
        for c in scene.constellations().iter().filter(|c| c.hovered == hovered_pass) {
            draw::draw_constellation(
                surface,
                c,
                palette,
                config.show_silhouettes,
                config.show_constellation_names,
                config.show_star_names,
                assets,
            );
            report.constellation_order.push(c.id);
        }
    }

    if config.show_planets {
        for planet in scene.planets() {
            draw::draw_orbit_line(surface, planet, palette);
        }
    }

    for planet in scene.planets_mut() {
        planet.advance();
        planet.highlight.step(planet.hovered);
    }

    let mut order: Vec<usize> = (0..scene.planets().len()).collect();
    let planets = scene.planets();
    order.sort_by(|&a, &b| planets[a].position().y.total_cmp(&planets[b].position().y));
    for idx in order {
        let planet = &planets[idx];
        let visible = if planet.is_luminous() { config.show_sun } else { config.show_planets };
        if visible {
            draw::draw_planet(surface, planet, assets);
            report.planet_order.push(planet.id);
        }
    }

    report
}
