use crate::api::types::{EntityId, Viewport};
use crate::components::constellation::Constellation;
use crate::components::planet::Planet;
use crate::components::star::Star;
use crate::core::geometry::Rect;

/// Entity storage for one backdrop, using flat Vecs.
///
/// The scene owns every entity outright; the hover and frame systems only
/// borrow it for the length of a tick. Rebuilding replaces the whole scene.
#[derive(Debug, Clone)]
pub struct Scene {
    viewport: Viewport,
    stars: Vec<Star>,
    planets: Vec<Planet>,
    constellations: Vec<Constellation>,
}

impl Scene {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            stars: Vec::with_capacity(256),
            planets: Vec::with_capacity(16),
            constellations: Vec::with_capacity(16),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Track a surface-only resize. Entities keep their positions.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    // ── Stars ──

    pub fn spawn_star(&mut self, star: Star) {
        self.stars.push(star);
    }

    pub fn despawn_star(&mut self, id: EntityId) -> Option<Star> {
        let idx = self.stars.iter().position(|s| s.id == id)?;
        Some(self.stars.remove(idx))
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn stars_mut(&mut self) -> &mut [Star] {
        &mut self.stars
    }

    pub fn clear_stars(&mut self) -> Vec<Star> {
        std::mem::take(&mut self.stars)
    }

    // ── Planets ──

    pub fn spawn_planet(&mut self, planet: Planet) {
        self.planets.push(planet);
    }

    pub fn despawn_planet(&mut self, id: EntityId) -> Option<Planet> {
        let idx = self.planets.iter().position(|p| p.id == id)?;
        Some(self.planets.remove(idx))
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn planets_mut(&mut self) -> &mut [Planet] {
        &mut self.planets
    }

    pub fn planet(&self, id: EntityId) -> Option<&Planet> {
        self.planets.iter().find(|p| p.id == id)
    }

    pub fn clear_planets(&mut self) -> Vec<Planet> {
        std::mem::take(&mut self.planets)
    }

    // ── Constellations ──

    pub fn spawn_constellation(&mut self, constellation: Constellation) {
        self.constellations.push(constellation);
    }

    pub fn despawn_constellation(&mut self, id: EntityId) -> Option<Constellation> {
        let idx = self.constellations.iter().position(|c| c.id == id)?;
        Some(self.constellations.remove(idx))
    }

    pub fn constellations(&self) -> &[Constellation] {
        &self.constellations
    }

    pub fn constellations_mut(&mut self) -> &mut [Constellation] {
        &mut self.constellations
    }

    pub fn constellation(&self, id: EntityId) -> Option<&Constellation> {
        self.constellations.iter().find(|c| c.id == id)
    }

    pub fn has_constellation(&self, key: &str) -> bool {
        self.constellations.iter().any(|c| c.key() == key)
    }

    /// Label boxes of every placed constellation, for the overlap search.
    pub fn label_boxes(&self) -> Vec<Rect> {
        self.constellations.iter().map(|c| c.label_box).collect()
    }

    pub fn clear_constellations(&mut self) -> Vec<Constellation> {
        std::mem::take(&mut self.constellations)
    }

    // ── Whole scene ──

    /// Every entity id, stars first, then planets, then constellations.
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.stars
            .iter()
            .map(|s| s.id)
            .chain(self.planets.iter().map(|p| p.id))
            .chain(self.constellations.iter().map(|c| c.id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.stars.len() + self.planets.len() + self.constellations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Viewport::new(0.0, 0.0))
    }
}
