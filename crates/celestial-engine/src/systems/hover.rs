//! Pointer hit-testing.
//!
//! Every tick recomputes every hover flag from scratch, so each entity has
//! exactly one hover value per tick and a pointer that left the scene
//! (`None`) hovers nothing.

use glam::Vec2;

use crate::api::config::SceneConfig;
use crate::core::scene::Scene;

/// Hovered entity counts after a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverSummary {
    pub constellations: usize,
    pub planets: usize,
}

/// Recompute hover flags for `pointer`.
///
/// Constellations test their label box, plus the projected artwork box when
/// silhouettes are shown. Hidden bodies are never hovered.
pub fn update_hover(scene: &mut Scene, pointer: Option<Vec2>, config: &SceneConfig) -> HoverSummary {
    let mut summary = HoverSummary::default();

    for c in scene.constellations_mut() {
        c.hovered = pointer.is_some_and(|p| c.contains_point(p, config.show_silhouettes));
        summary.constellations += usize::from(c.hovered);
    }

    for planet in scene.planets_mut() {
        let visible = if planet.is_luminous() { config.show_sun } else { config.show_planets };
        planet.hovered = visible && pointer.is_some_and(|p| planet.contains_point(p));
        summary.planets += usize::from(planet.hovered);
    }

    summary
}
