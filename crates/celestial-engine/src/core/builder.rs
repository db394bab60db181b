//! Scene construction from configuration and catalogs.

use std::collections::HashSet;
use std::rc::Rc;

use glam::Vec2;

use crate::api::config::SceneConfig;
use crate::api::types::{EntityIds, Viewport};
use crate::assets::catalog::{Catalogs, ConstellationPattern, PlanetSpec};
use crate::assets::provider::{AssetTracker, DrawableProvider};
use crate::components::constellation::Constellation;
use crate::components::hover::HoverEase;
use crate::components::planet::Planet;
use crate::components::star::Star;
use crate::core::geometry::Rect;
use crate::core::placement::PlacementEngine;
use crate::core::rng::Rng;
use crate::core::scene::Scene;

/// Mutable collaborators a build draws from.
pub struct BuildContext<'a> {
    pub ids: &'a mut EntityIds,
    pub rng: &'a mut Rng,
    pub provider: &'a mut dyn DrawableProvider,
    pub assets: &'a mut AssetTracker,
}

/// Builds entities for one viewport from a configuration and the catalogs.
pub struct SceneBuilder<'a> {
    config: &'a SceneConfig,
    catalogs: &'a Catalogs,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(config: &'a SceneConfig, catalogs: &'a Catalogs) -> Self {
        Self { config, catalogs }
    }

    /// Full scene: starfield, solar system, then constellations.
    ///
    /// Never fails. Unknown names are skipped and constellations that find
    /// no room are dropped.
    pub fn build(&self, viewport: Viewport, ctx: &mut BuildContext<'_>) -> Scene {
        let mut scene = Scene::new(viewport);
        for _ in 0..self.config.star_count {
            scene.spawn_star(self.make_star(viewport, ctx));
        }
        for spec in self.selected_planets() {
            scene.spawn_planet(self.make_planet(spec, viewport, ctx));
        }

        let requested = self.populate_constellations(&mut scene, ctx);
        log::info!(
            "scene built: {} stars, {} planets, {}/{} constellations placed",
            scene.stars().len(),
            scene.planets().len(),
            scene.constellations().len(),
            requested
        );
        scene
    }

    /// Random star anywhere in the viewport.
    pub fn make_star(&self, viewport: Viewport, ctx: &mut BuildContext<'_>) -> Star {
        let rng = &mut *ctx.rng;
        let pos = Vec2::new(rng.range(0.0, viewport.width), rng.range(0.0, viewport.height));
        let radius = rng.range(0.2, 2.0);
        let opacity = rng.next_f32();
        let rate = rng.range(0.001, 0.02);
        Star::new(ctx.ids.next_id(), pos, radius, opacity, rate)
    }

    /// Body at a random orbit angle, with its drawables requested.
    pub fn make_planet(&self, spec: &Rc<PlanetSpec>, viewport: Viewport, ctx: &mut BuildContext<'_>) -> Planet {
        let cfg = self.config;
        let mut planet = Planet::new(ctx.ids.next_id(), spec.clone(), viewport.center(), ctx.rng.angle());
        planet.orbit_radius = spec.orbit_radius * cfg.orbit_scale;
        planet.orbit_speed = spec.orbit_speed * cfg.speed_multiplier;
        planet.size = spec.size * cfg.planet_scale;
        planet.tilt = cfg.orbit_tilt;
        planet.pulse_phase = ctx.rng.angle();
        planet.highlight = HoverEase::new(0.0, 1.0, cfg.tuning.hover_smoothing);

        if !spec.is_star {
            match ctx.provider.generate_texture(&spec.name, spec.texture_resolution()) {
                Ok(handle) => {
                    ctx.assets.track(handle, format!("{} texture", spec.name));
                    planet.texture = Some(handle);
                }
                Err(err) => ctx.assets.report_generator_error(&spec.name, &err),
            }
            if let Some(path) = spec.image_path() {
                let handle = ctx.provider.load_artwork(&path);
                ctx.assets.track(handle, path);
                planet.image = Some(handle);
            }
        }
        planet
    }

    /// Catalog bodies to build. The luminous body is always included; the
    /// explicit list filters orbiting bodies only.
    pub fn selected_planets(&self) -> Vec<&'a Rc<PlanetSpec>> {
        let catalog = &self.catalogs.planets;
        let Some(names) = &self.config.specific_planets else {
            return catalog.bodies().iter().collect();
        };
        let mut wanted = HashSet::new();
        for name in names {
            match catalog.get(name) {
                Some(spec) => {
                    wanted.insert(spec.key.as_str());
                }
                None => log::debug!("unknown planet {name:?} skipped"),
            }
        }
        catalog
            .bodies()
            .iter()
            .filter(|b| b.is_star || wanted.contains(b.key.as_str()))
            .collect()
    }

    /// Place the explicit list, or a random draw of `constellation_count`.
    /// Returns how many were requested.
    fn populate_constellations(&self, scene: &mut Scene, ctx: &mut BuildContext<'_>) -> usize {
        let placement = self.placement(scene.viewport());
        let catalog = &self.catalogs.constellations;

        if let Some(names) = &self.config.specific_constellations {
            let mut requested = 0;
            for name in names {
                let Some(pattern) = catalog.get(name) else {
                    log::debug!("unknown constellation {name:?} skipped");
                    continue;
                };
                if scene.has_constellation(&pattern.key) {
                    continue;
                }
                requested += 1;
                if let Some(c) = self.place(pattern, &scene.label_boxes(), &placement, ctx) {
                    scene.spawn_constellation(c);
                }
            }
            return requested;
        }

        let requested = self.config.constellation_count.min(catalog.len());
        for _ in 0..requested {
            let Some(pattern) = self.draw_unused(scene, ctx.rng) else {
                log::debug!("no unused constellation found");
                continue;
            };
            if let Some(c) = self.place(pattern, &scene.label_boxes(), &placement, ctx) {
                scene.spawn_constellation(c);
            }
        }
        requested
    }

    pub fn placement(&self, viewport: Viewport) -> PlacementEngine {
        let tuning = &self.config.tuning;
        PlacementEngine::new(viewport, tuning.placement_attempts, tuning.label_padding)
    }

    /// Random catalog entry not yet in the scene, within the selection budget.
    pub fn draw_unused(&self, scene: &Scene, rng: &mut Rng) -> Option<&'a Rc<ConstellationPattern>> {
        let patterns = self.catalogs.constellations.patterns();
        if patterns.is_empty() {
            return None;
        }
        (0..self.config.tuning.selection_attempts)
            .map(|_| &patterns[rng.index(patterns.len())])
            .find(|p| !scene.has_constellation(&p.key))
    }

    /// Search for room and build the constellation, or drop it.
    pub fn place(
        &self,
        pattern: &Rc<ConstellationPattern>,
        accepted: &[Rect],
        placement: &PlacementEngine,
        ctx: &mut BuildContext<'_>,
    ) -> Option<Constellation> {
        let scale = self.config.constellation_scale;
        let Some((anchor, _)) =
            placement.find_anchor(|a| Constellation::label_box_for(pattern, a, scale), accepted, ctx.rng)
        else {
            log::debug!("no room for {}, dropped", pattern.key);
            return None;
        };

        let tuning = &self.config.tuning;
        let hover = HoverEase::new(1.0, tuning.hover_scale, tuning.hover_smoothing);
        let mut constellation = Constellation::new(ctx.ids.next_id(), pattern.clone(), anchor, scale, hover);
        if pattern.sprite.is_some() {
            let path = pattern.silhouette_path();
            let handle = ctx.provider.load_artwork(&path);
            ctx.assets.track(handle, path);
            constellation.silhouette = Some(handle);
        }
        Some(constellation)
    }
}

/// Release every drawable of `scene` at the provider and stop tracking it.
pub fn release_drawables(scene: &Scene, provider: &mut dyn DrawableProvider, assets: &mut AssetTracker) {
    for planet in scene.planets() {
        release_planet(planet, provider, assets);
    }
    for c in scene.constellations() {
        release_constellation(c, provider, assets);
    }
}

/// Release one body's texture and photo.
pub fn release_planet(planet: &Planet, provider: &mut dyn DrawableProvider, assets: &mut AssetTracker) {
    for handle in [planet.texture, planet.image].into_iter().flatten() {
        provider.release(handle);
        assets.forget(handle);
    }
}

/// Release one constellation's silhouette artwork.
pub fn release_constellation(
    constellation: &Constellation,
    provider: &mut dyn DrawableProvider,
    assets: &mut AssetTracker,
) {
    if let Some(handle) = constellation.silhouette {
        provider.release(handle);
        assets.forget(handle);
    }
}
