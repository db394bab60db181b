//! The backdrop engine: one scene, one surface, one animation loop.

use std::rc::Rc;

use glam::Vec2;

use crate::api::config::SceneConfig;
use crate::api::error::EngineError;
use crate::api::types::{EntityId, EntityIds, Viewport};
use crate::assets::catalog::{Catalogs, ConstellationPattern};
use crate::assets::provider::{AssetStatus, AssetTracker, DrawableProvider};
use crate::core::builder::{self, BuildContext, SceneBuilder};
use crate::core::resize::{ResizeAction, ResizePolicy};
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::core::schedule::{FrameHandle, FrameScheduler, LoopState};
use crate::input::pointer::PointerSlot;
use crate::renderer::palette::Theme;
use crate::renderer::traits::Surface;
use crate::systems::draw::DrawAssets;
use crate::systems::frame::{run_frame, FrameInput, FrameReport};

/// Seed used when neither the configuration nor the host supplies one.
const DEFAULT_SEED: u64 = 0x5eed_c0de_2024;

/// Owns the scene and drives it frame by frame.
///
/// Host adapters construct one per view, forward pointer, resize and theme
/// notifications, and call [`tick`](Self::tick) whenever the scheduler fires.
pub struct CelestialEngine<S: Surface> {
    surface: S,
    config: SceneConfig,
    catalogs: Rc<Catalogs>,
    theme: Theme,
    pointer: PointerSlot,
    provider: Box<dyn DrawableProvider>,
    scheduler: Box<dyn FrameScheduler>,
    assets: AssetTracker,
    ids: EntityIds,
    rng: Rng,
    resize: ResizePolicy,
    scene: Scene,
    state: LoopState,
    pending: Option<FrameHandle>,
    torn_down: bool,
}

impl<S: Surface> CelestialEngine<S> {
    /// Validate `config` and build the first scene at the surface's size.
    /// The loop starts stopped.
    pub fn new(
        surface: S,
        config: SceneConfig,
        catalogs: Rc<Catalogs>,
        provider: Box<dyn DrawableProvider>,
        scheduler: Box<dyn FrameScheduler>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let size = surface.size();
        let mut engine = Self {
            rng: Rng::new(config.seed.unwrap_or(DEFAULT_SEED)),
            resize: ResizePolicy::new(size, config.tuning.rebuild_height_threshold),
            scene: Scene::new(Viewport::from_size(size)),
            surface,
            config,
            catalogs,
            theme: Theme::default(),
            pointer: PointerSlot::new(),
            provider,
            scheduler,
            assets: AssetTracker::new(),
            ids: EntityIds::new(),
            state: LoopState::Stopped,
            pending: None,
            torn_down: false,
        };
        engine.rebuild();
        Ok(engine)
    }

    // ── Loop control ──

    /// Begin ticking. No-op while already running or after teardown.
    pub fn start(&mut self) {
        if self.torn_down || self.state == LoopState::Running {
            return;
        }
        self.state = LoopState::Running;
        self.pending = Some(self.scheduler.request_frame());
    }

    /// Cancel the pending frame. No further ticks run until `start`.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.state = LoopState::Stopped;
    }

    /// Destroy every entity, build a fresh scene and start running.
    /// No-op after teardown.
    pub fn restart(&mut self) {
        if self.torn_down {
            return;
        }
        self.stop();
        self.rebuild();
        self.start();
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Scheduler callback: run one frame and request the next.
    ///
    /// Returns `None` without drawing when the loop is stopped, so a stale
    /// callback that fires after `stop` does nothing.
    pub fn tick(&mut self) -> Option<FrameReport> {
        if self.state != LoopState::Running {
            return None;
        }
        self.pending = None;

        let input = FrameInput {
            palette: self.theme.palette(),
            config: &self.config,
            pointer: self.pointer.get(),
        };
        let mut assets = DrawAssets {
            provider: &*self.provider,
            tracker: &mut self.assets,
        };
        let report = run_frame(&mut self.scene, &mut self.surface, &input, &mut assets);
        self.assets.sweep(&*self.provider);

        if self.state == LoopState::Running {
            self.pending = Some(self.scheduler.request_frame());
        }
        Some(report)
    }

    // ── Host notifications ──

    /// Shared pointer slot the host may write to directly.
    pub fn pointer(&self) -> PointerSlot {
        self.pointer.clone()
    }

    pub fn set_pointer(&self, pos: Vec2) {
        self.pointer.set(pos);
    }

    /// Pointer left the page; nothing is hovered from the next tick on.
    pub fn clear_pointer(&self) {
        self.pointer.clear();
    }

    /// Takes effect on the next tick; never rebuilds.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Handle a viewport size change.
    ///
    /// Width changes and large height changes rebuild the scene; small
    /// height-only changes resize the surface and keep every entity.
    /// A stopped engine stays stopped after a rebuild. Ignored after teardown.
    pub fn on_resize(&mut self, size: Vec2) -> ResizeAction {
        if self.torn_down {
            return ResizeAction::Unchanged;
        }
        let action = self.resize.observe(size);
        match action {
            ResizeAction::Unchanged => {}
            ResizeAction::ResizeSurface => {
                log::debug!("height changed to {}, resizing surface only", size.y);
                self.surface.resize(size);
                self.scene.set_viewport(Viewport::from_size(size));
            }
            ResizeAction::Rebuild => {
                log::debug!("viewport now {}x{}, rebuilding", size.x, size.y);
                let was_running = self.is_running();
                self.stop();
                self.surface.resize(size);
                self.rebuild();
                if was_running {
                    self.start();
                }
            }
        }
        action
    }

    /// Replace the configuration and rebuild. The loop keeps its state.
    /// After teardown the configuration is stored but nothing is built.
    pub fn set_config(&mut self, config: SceneConfig) -> Result<(), EngineError> {
        config.validate()?;
        self.resize.set_threshold(config.tuning.rebuild_height_threshold);
        if let Some(seed) = config.seed.filter(|s| self.config.seed != Some(*s)) {
            self.rng = Rng::new(seed);
        }
        self.config = config;
        if self.torn_down {
            return Ok(());
        }

        let was_running = self.is_running();
        self.stop();
        self.rebuild();
        if was_running {
            self.start();
        }
        Ok(())
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    // ── Runtime entity control ──
    //
    // Every `add_*` returns `None` once the engine is torn down.

    pub fn add_star(&mut self) -> Option<EntityId> {
        if self.torn_down {
            return None;
        }
        let viewport = self.scene.viewport();
        let catalogs = Rc::clone(&self.catalogs);
        let builder = SceneBuilder::new(&self.config, &catalogs);
        let mut ctx = BuildContext {
            ids: &mut self.ids,
            rng: &mut self.rng,
            provider: &mut *self.provider,
            assets: &mut self.assets,
        };
        let star = builder.make_star(viewport, &mut ctx);
        let id = star.id;
        self.scene.spawn_star(star);
        Some(id)
    }

    /// Add a catalog body by key or name. `None` for unknown names.
    pub fn add_planet(&mut self, name: &str) -> Option<EntityId> {
        if self.torn_down {
            return None;
        }
        let catalogs = Rc::clone(&self.catalogs);
        let Some(spec) = catalogs.planets.get(name) else {
            log::debug!("unknown planet {name:?} skipped");
            return None;
        };
        let viewport = self.scene.viewport();
        let builder = SceneBuilder::new(&self.config, &catalogs);
        let mut ctx = BuildContext {
            ids: &mut self.ids,
            rng: &mut self.rng,
            provider: &mut *self.provider,
            assets: &mut self.assets,
        };
        let planet = builder.make_planet(spec, viewport, &mut ctx);
        let id = planet.id;
        self.scene.spawn_planet(planet);
        Some(id)
    }

    /// Place a named constellation with the same non-overlap search as a
    /// build. `None` if unknown, already shown, or no room is left.
    pub fn add_constellation(&mut self, name: &str) -> Option<EntityId> {
        if self.torn_down {
            return None;
        }
        let catalogs = Rc::clone(&self.catalogs);
        let Some(pattern) = catalogs.constellations.get(name) else {
            log::debug!("unknown constellation {name:?} skipped");
            return None;
        };
        if self.scene.has_constellation(&pattern.key) {
            return None;
        }
        self.place_constellation(&catalogs, pattern)
    }

    /// Place a random constellation not already shown.
    pub fn add_random_constellation(&mut self) -> Option<EntityId> {
        if self.torn_down {
            return None;
        }
        let catalogs = Rc::clone(&self.catalogs);
        let pattern = SceneBuilder::new(&self.config, &catalogs)
            .draw_unused(&self.scene, &mut self.rng)
            .cloned()?;
        self.place_constellation(&catalogs, &pattern)
    }

    fn place_constellation(
        &mut self,
        catalogs: &Catalogs,
        pattern: &Rc<ConstellationPattern>,
    ) -> Option<EntityId> {
        let builder = SceneBuilder::new(&self.config, catalogs);
        let placement = builder.placement(self.scene.viewport());
        let accepted = self.scene.label_boxes();
        let mut ctx = BuildContext {
            ids: &mut self.ids,
            rng: &mut self.rng,
            provider: &mut *self.provider,
            assets: &mut self.assets,
        };
        let constellation = builder.place(pattern, &accepted, &placement, &mut ctx)?;
        let id = constellation.id;
        self.scene.spawn_constellation(constellation);
        Some(id)
    }

    pub fn remove_star(&mut self, id: EntityId) -> bool {
        self.scene.despawn_star(id).is_some()
    }

    /// Remove a body and release its texture and photo.
    pub fn remove_planet(&mut self, id: EntityId) -> bool {
        match self.scene.despawn_planet(id) {
            Some(planet) => {
                builder::release_planet(&planet, &mut *self.provider, &mut self.assets);
                true
            }
            None => false,
        }
    }

    /// Remove a constellation and release its silhouette.
    pub fn remove_constellation(&mut self, id: EntityId) -> bool {
        match self.scene.despawn_constellation(id) {
            Some(c) => {
                builder::release_constellation(&c, &mut *self.provider, &mut self.assets);
                true
            }
            None => false,
        }
    }

    pub fn clear_stars(&mut self) {
        self.scene.clear_stars();
    }

    pub fn clear_planets(&mut self) {
        for planet in self.scene.clear_planets() {
            builder::release_planet(&planet, &mut *self.provider, &mut self.assets);
        }
    }

    pub fn clear_constellations(&mut self) {
        for c in self.scene.clear_constellations() {
            builder::release_constellation(&c, &mut *self.provider, &mut self.assets);
        }
    }

    // ── Visibility toggles (read every tick, no rebuild) ──

    pub fn set_show_constellation_names(&mut self, show: bool) {
        self.config.show_constellation_names = show;
    }

    pub fn set_show_star_names(&mut self, show: bool) {
        self.config.show_star_names = show;
    }

    pub fn set_show_silhouettes(&mut self, show: bool) {
        self.config.show_silhouettes = show;
    }

    pub fn set_show_planets(&mut self, show: bool) {
        self.config.show_planets = show;
    }

    pub fn set_show_sun(&mut self, show: bool) {
        self.config.show_sun = show;
    }

    // ── Queries ──

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Drawables ready to draw vs. drawables requested for the live scene.
    pub fn asset_status(&self) -> AssetStatus {
        self.assets.status(&*self.provider)
    }

    /// Catalog keys of every constellation that can be added.
    pub fn available_constellations(&self) -> Vec<String> {
        self.catalogs.constellations.keys()
    }

    /// Stop for good and release every drawable. Idempotent; also runs on
    /// drop. Every later rebuild or spawn request is ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.stop();
        builder::release_drawables(&self.scene, &mut *self.provider, &mut self.assets);
        self.assets.clear();
        self.scene = Scene::new(self.scene.viewport());
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Replace the scene, releasing the drawables of the old one.
    fn rebuild(&mut self) {
        if self.torn_down {
            return;
        }
        builder::release_drawables(&self.scene, &mut *self.provider, &mut self.assets);
        let viewport = Viewport::from_size(self.surface.size());
        let mut ctx = BuildContext {
            ids: &mut self.ids,
            rng: &mut self.rng,
            provider: &mut *self.provider,
            assets: &mut self.assets,
        };
        self.scene = SceneBuilder::new(&self.config, &self.catalogs).build(viewport, &mut ctx);
    }
}

impl<S: Surface> Drop for CelestialEngine<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::assets::provider::{DrawableHandle, DrawableStatus, ManualProvider};
    use crate::api::error::AssetError;
    use crate::core::schedule::ManualScheduler;
    use crate::renderer::recorder::RecordingSurface;

    /// Scheduler and provider the test keeps a handle on.
    #[derive(Clone, Default)]
    struct Shared<T>(Rc<RefCell<T>>);

    impl FrameScheduler for Shared<ManualScheduler> {
        fn request_frame(&mut self) -> FrameHandle {
            self.0.borrow_mut().request_frame()
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.0.borrow_mut().cancel_frame(handle)
        }
    }

    impl DrawableProvider for Shared<ManualProvider> {
        fn load_artwork(&mut self, path: &str) -> DrawableHandle {
            self.0.borrow_mut().load_artwork(path)
        }

        fn generate_texture(&mut self, body: &str, resolution: u32) -> Result<DrawableHandle, AssetError> {
            self.0.borrow_mut().generate_texture(body, resolution)
        }

        fn status(&self, handle: DrawableHandle) -> DrawableStatus {
            self.0.borrow().status(handle)
        }

        fn release(&mut self, handle: DrawableHandle) {
            self.0.borrow_mut().release(handle)
        }
    }

    struct Fixture {
        engine: CelestialEngine<RecordingSurface>,
        scheduler: Shared<ManualScheduler>,
        provider: Shared<ManualProvider>,
    }

    fn fixture(config: SceneConfig) -> Fixture {
        let scheduler = Shared::<ManualScheduler>::default();
        let provider = Shared(Rc::new(RefCell::new(ManualProvider::with_textures())));
        let engine = CelestialEngine::new(
            RecordingSurface::new(1600.0, 1000.0),
            SceneConfig { seed: Some(31), ..config },
            Rc::new(Catalogs::builtin().unwrap()),
            Box::new(provider.clone()),
            Box::new(scheduler.clone()),
        )
        .unwrap();
        Fixture { engine, scheduler, provider }
    }

    fn star_ids(engine: &CelestialEngine<RecordingSurface>) -> Vec<EntityId> {
        engine.scene().stars().iter().map(|s| s.id).collect()
    }

    fn referenced_drawables(engine: &CelestialEngine<RecordingSurface>) -> usize {
        let scene = engine.scene();
        let planets = scene.planets().iter().map(|p| p.texture.iter().chain(&p.image).count());
        let silhouettes = scene.constellations().iter().filter(|c| c.silhouette.is_some()).count();
        planets.sum::<usize>() + silhouettes
    }

    #[test]
    fn invalid_config_fails_construction() {
        let result = CelestialEngine::new(
            RecordingSurface::new(100.0, 100.0),
            SceneConfig { orbit_scale: -1.0, ..SceneConfig::default() },
            Rc::new(Catalogs::default()),
            Box::new(ManualProvider::new()),
            Box::new(ManualScheduler::new()),
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn start_stop_state_machine() {
        let mut fx = fixture(SceneConfig::default());
        assert_eq!(fx.engine.state(), LoopState::Stopped);
        assert!(fx.engine.tick().is_none());

        fx.engine.start();
        fx.engine.start();
        assert!(fx.engine.is_running());
        assert_eq!(fx.scheduler.0.borrow().requested(), 1);

        assert!(fx.engine.tick().is_some());
        assert_eq!(fx.scheduler.0.borrow().requested(), 2);

        fx.engine.stop();
        assert_eq!(fx.engine.state(), LoopState::Stopped);
        assert_eq!(fx.scheduler.0.borrow().pending(), None);
        assert_eq!(fx.scheduler.0.borrow().cancelled(), 1);
        // A callback that was already in flight does nothing.
        assert!(fx.engine.tick().is_none());
    }

    #[test]
    fn restart_rebuilds_and_runs() {
        let mut fx = fixture(SceneConfig { star_count: 5, ..SceneConfig::default() });
        let before = star_ids(&fx.engine);
        fx.engine.restart();
        assert!(fx.engine.is_running());
        let after = star_ids(&fx.engine);
        assert_eq!(after.len(), 5);
        assert!(before.iter().all(|id| !after.contains(id)));
    }

    #[test]
    fn small_height_change_keeps_entities() {
        let mut fx = fixture(SceneConfig { star_count: 20, ..SceneConfig::default() });
        fx.engine.start();
        let before = fx.engine.scene().entity_ids();

        let action = fx.engine.on_resize(Vec2::new(1600.0, 1080.0));
        assert_eq!(action, ResizeAction::ResizeSurface);
        assert_eq!(fx.engine.scene().entity_ids(), before);
        assert_eq!(fx.engine.surface().size(), Vec2::new(1600.0, 1080.0));
        assert!(fx.engine.is_running());
    }

    #[test]
    fn large_height_change_rebuilds() {
        let mut fx = fixture(SceneConfig { star_count: 20, ..SceneConfig::default() });
        fx.engine.start();
        let before = star_ids(&fx.engine);

        let action = fx.engine.on_resize(Vec2::new(1600.0, 1200.0));
        assert_eq!(action, ResizeAction::Rebuild);
        let after = star_ids(&fx.engine);
        assert_eq!(after.len(), 20);
        assert!(before.iter().all(|id| !after.contains(id)));
        assert_eq!(fx.engine.scene().viewport(), Viewport::new(1600.0, 1200.0));
        assert!(fx.engine.is_running());
    }

    #[test]
    fn rebuild_releases_old_textures() {
        let mut fx = fixture(SceneConfig::default());
        let textures: Vec<DrawableHandle> =
            fx.engine.scene().planets().iter().filter_map(|p| p.texture).collect();
        assert!(!textures.is_empty());

        fx.engine.on_resize(Vec2::new(1200.0, 1000.0));
        let released = fx.provider.0.borrow().released().to_vec();
        assert!(textures.iter().all(|t| released.contains(t)));
    }

    #[test]
    fn teardown_stops_and_disposes() {
        let mut fx = fixture(SceneConfig::default());
        fx.engine.start();
        let live = fx.provider.0.borrow().live_count();
        assert!(live > 0);
        fx.engine.teardown();
        assert!(!fx.engine.is_running());
        assert_eq!(fx.provider.0.borrow().released().len(), live);
        assert_eq!(fx.provider.0.borrow().live_count(), 0);
        fx.engine.start();
        assert!(!fx.engine.is_running());

        // Drop after teardown releases nothing twice.
        drop(fx.engine);
        assert_eq!(fx.provider.0.borrow().released().len(), live);
    }

    #[test]
    fn torn_down_engine_builds_nothing() {
        let mut fx = fixture(SceneConfig::default());
        fx.engine.start();
        fx.engine.teardown();
        let requested = fx.scheduler.0.borrow().requested();

        assert_eq!(fx.engine.on_resize(Vec2::new(1200.0, 900.0)), ResizeAction::Unchanged);
        fx.engine.restart();
        assert!(fx.engine.add_star().is_none());
        assert!(fx.engine.add_planet("Mars").is_none());
        assert!(fx.engine.add_constellation("orion").is_none());
        assert!(fx.engine.add_random_constellation().is_none());
        fx.engine
            .set_config(SceneConfig { star_count: 9, ..SceneConfig::default() })
            .unwrap();

        assert!(!fx.engine.is_running());
        assert!(fx.engine.scene().entity_ids().is_empty());
        assert_eq!(fx.provider.0.borrow().live_count(), 0);
        assert_eq!(fx.scheduler.0.borrow().requested(), requested);
        drop(fx.engine);
        assert_eq!(fx.provider.0.borrow().live_count(), 0);
    }

    #[test]
    fn repeated_rebuilds_do_not_leak_drawables() {
        let mut fx = fixture(SceneConfig::default());
        fx.engine.start();
        assert!(referenced_drawables(&fx.engine) > 0);
        for i in 0..10 {
            let width = if i % 2 == 0 { 1200.0 } else { 1600.0 };
            assert_eq!(fx.engine.on_resize(Vec2::new(width, 1000.0)), ResizeAction::Rebuild);
            assert_eq!(fx.provider.0.borrow().live_count(), referenced_drawables(&fx.engine));
        }
        fx.engine.restart();
        assert_eq!(fx.provider.0.borrow().live_count(), referenced_drawables(&fx.engine));
    }

    #[test]
    fn rebuild_resize_keeps_stopped_engine_stopped() {
        let mut fx = fixture(SceneConfig { star_count: 10, ..SceneConfig::default() });
        let before = star_ids(&fx.engine);
        let action = fx.engine.on_resize(Vec2::new(1300.0, 1000.0));
        assert_eq!(action, ResizeAction::Rebuild);
        assert!(!fx.engine.is_running());
        assert_eq!(fx.scheduler.0.borrow().requested(), 0);
        let after = star_ids(&fx.engine);
        assert_eq!(after.len(), 10);
        assert!(before.iter().all(|id| !after.contains(id)));
        assert!(fx.engine.tick().is_none());
    }

    #[test]
    fn tick_reports_failed_artwork_nobody_hovers() {
        let mut fx = fixture(SceneConfig::default());
        let silhouette = fx.engine.scene().constellations()[0].silhouette.unwrap();
        fx.provider.0.borrow_mut().resolve(silhouette, DrawableStatus::Failed);
        fx.engine.start();
        fx.engine.tick().unwrap();
        assert!(fx.engine.assets.has_warned(silhouette));
    }

    #[test]
    fn theme_change_does_not_rebuild() {
        let mut fx = fixture(SceneConfig::default());
        let before = fx.engine.scene().entity_ids();
        fx.engine.set_theme(Theme::Dark);
        fx.engine.start();
        fx.engine.tick();
        assert_eq!(fx.engine.scene().entity_ids(), before);
        assert_eq!(fx.engine.theme(), Theme::Dark);
    }

    #[test]
    fn runtime_add_and_remove() {
        let mut fx = fixture(SceneConfig { constellation_count: 0, star_count: 0, ..SceneConfig::default() });
        let star = fx.engine.add_star().unwrap();
        assert_eq!(fx.engine.scene().stars().len(), 1);
        assert!(fx.engine.remove_star(star));
        assert!(!fx.engine.remove_star(star));

        assert!(fx.engine.add_planet("Pluto").is_some());
        assert!(fx.engine.add_planet("Nibiru").is_none());

        let orion = fx.engine.add_constellation("orion").unwrap();
        assert!(fx.engine.add_constellation("ORION").is_none());
        assert!(fx.engine.add_constellation("Nowhere").is_none());
        assert!((0..5).any(|_| fx.engine.add_random_constellation().is_some()));
        let orion_art = fx.engine.scene().constellation(orion).and_then(|c| c.silhouette).unwrap();
        assert!(fx.engine.remove_constellation(orion));
        assert!(fx.engine.scene().constellation(orion).is_none());
        assert!(fx.provider.0.borrow().released().contains(&orion_art));

        fx.engine.clear_constellations();
        fx.engine.clear_planets();
        assert!(fx.engine.scene().constellations().is_empty());
        assert!(fx.engine.scene().planets().is_empty());
        assert_eq!(fx.provider.0.borrow().live_count(), 0);
    }

    #[test]
    fn asset_status_counts_loaded_drawables() {
        let fx = fixture(SceneConfig::default());
        let status = fx.engine.asset_status();
        assert!(status.total > 0);
        assert_eq!(status.loaded, 0);
        fx.provider.0.borrow_mut().resolve_all();
        assert!(fx.engine.asset_status().is_complete());
    }

    #[test]
    fn set_config_rebuilds_with_new_counts() {
        let mut fx = fixture(SceneConfig { star_count: 3, ..SceneConfig::default() });
        fx.engine
            .set_config(SceneConfig { star_count: 7, ..SceneConfig::default() })
            .unwrap();
        assert_eq!(fx.engine.scene().stars().len(), 7);
        assert!(fx
            .engine
            .set_config(SceneConfig { orbit_tilt: 2.0, ..SceneConfig::default() })
            .is_err());
        assert_eq!(fx.engine.config().star_count, 7);
    }

    #[test]
    fn toggles_apply_without_rebuild() {
        let mut fx = fixture(SceneConfig::default());
        let before = fx.engine.scene().entity_ids();
        fx.engine.set_show_planets(false);
        fx.engine.set_show_sun(false);
        fx.engine.start();
        let report = fx.engine.tick().unwrap();
        assert!(report.planet_order.is_empty());
        assert_eq!(fx.engine.scene().entity_ids(), before);
    }

    #[test]
    fn pointer_slot_is_shared_with_host() {
        let mut fx = fixture(SceneConfig { show_silhouettes: false, ..SceneConfig::default() });
        let slot = fx.engine.pointer();
        let target = fx.engine.scene().constellations()[0].clone();
        slot.set(target.label_box.center());
        fx.engine.start();
        let report = fx.engine.tick().unwrap();
        assert!(report.hover.constellations >= 1);
        fx.engine.clear_pointer();
        let report = fx.engine.tick().unwrap();
        assert_eq!(report.hover.constellations, 0);
    }

    #[test]
    fn available_constellations_lists_catalog() {
        let fx = fixture(SceneConfig::default());
        let keys = fx.engine.available_constellations();
        assert!(keys.contains(&"ORION".to_string()));
    }
}
