//! Drawable-provider seam.
//!
//! Image decoding and procedural texture generation belong to the host. The
//! engine asks a [`DrawableProvider`] for handles once, at build time, and
//! polls their status every frame; it never waits on a load.

use std::collections::{BTreeMap, HashSet};

use crate::api::error::AssetError;

/// Opaque reference to a host-owned drawable (image, canvas, GPU texture).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawableHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawableStatus {
    /// Still loading. Draw a fallback this frame.
    Pending,
    Ready,
    /// Will never become ready. Draw a fallback from now on.
    Failed,
}

/// Host collaborator that owns every drawable.
pub trait DrawableProvider {
    /// Start loading artwork at `path`. Always returns a handle; failure shows
    /// up later through [`status`](Self::status).
    fn load_artwork(&mut self, path: &str) -> DrawableHandle;

    /// Generate a procedural texture for a body. Returns an error when the
    /// host has no generator or the generator raised.
    fn generate_texture(&mut self, body: &str, resolution: u32) -> Result<DrawableHandle, AssetError>;

    fn status(&self, handle: DrawableHandle) -> DrawableStatus;

    /// Drop a drawable the engine no longer references, disposing it if it
    /// was generated. Unknown handles are ignored.
    fn release(&mut self, handle: DrawableHandle);
}

/// Loaded vs. requested drawables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssetStatus {
    pub loaded: usize,
    pub total: usize,
}

impl AssetStatus {
    pub fn is_complete(&self) -> bool {
        self.loaded == self.total
    }
}

/// Bookkeeping for every drawable the engine requested.
///
/// Tracks handles for the load-status query and makes sure each failed
/// drawable is reported exactly once.
#[derive(Debug, Clone, Default)]
pub struct AssetTracker {
    requested: BTreeMap<DrawableHandle, String>,
    warned: HashSet<DrawableHandle>,
}

impl AssetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a requested drawable under a human-readable label.
    pub fn track(&mut self, handle: DrawableHandle, label: impl Into<String>) {
        self.requested.insert(handle, label.into());
    }

    /// Current status, warning once the first time a handle is seen failed.
    pub fn check(&mut self, provider: &dyn DrawableProvider, handle: DrawableHandle) -> DrawableStatus {
        let status = provider.status(handle);
        if status == DrawableStatus::Failed && self.warned.insert(handle) {
            let label = self.requested.get(&handle).map(String::as_str).unwrap_or("drawable");
            log::warn!("{label} failed to load, drawing fallback");
        }
        status
    }

    /// `true` only when the handle is ready to draw.
    pub fn is_ready(&mut self, provider: &dyn DrawableProvider, handle: DrawableHandle) -> bool {
        self.check(provider, handle) == DrawableStatus::Ready
    }

    /// Check every tracked handle so failures are logged even when nothing
    /// draws them this frame.
    pub fn sweep(&mut self, provider: &dyn DrawableProvider) {
        let handles: Vec<DrawableHandle> = self.requested.keys().copied().collect();
        for handle in handles {
            self.check(provider, handle);
        }
    }

    pub fn has_warned(&self, handle: DrawableHandle) -> bool {
        self.warned.contains(&handle)
    }

    /// Log a generator failure for `label`.
    pub fn report_generator_error(&self, label: &str, err: &AssetError) {
        match err {
            AssetError::Unsupported => log::debug!("no texture generator for {label}"),
            AssetError::Generator(_) => log::warn!("texture for {label} failed: {err}"),
        }
    }

    pub fn status(&self, provider: &dyn DrawableProvider) -> AssetStatus {
        let loaded = self
            .requested
            .keys()
            .filter(|h| provider.status(**h) == DrawableStatus::Ready)
            .count();
        AssetStatus { loaded, total: self.requested.len() }
    }

    /// Stop tracking a handle (its entity was removed or rebuilt away).
    pub fn forget(&mut self, handle: DrawableHandle) {
        self.requested.remove(&handle);
        self.warned.remove(&handle);
    }

    pub fn clear(&mut self) {
        self.requested.clear();
        self.warned.clear();
    }

    pub fn len(&self) -> usize {
        self.requested.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requested.is_empty()
    }
}

/// Provider whose drawables change state only when told to.
///
/// Serves headless hosts (everything stays pending unless resolved) and
/// tests that need to drive load completion by hand.
#[derive(Debug, Clone, Default)]
pub struct ManualProvider {
    next: u32,
    statuses: BTreeMap<DrawableHandle, DrawableStatus>,
    paths: BTreeMap<DrawableHandle, String>,
    textures_enabled: bool,
    failing_generators: HashSet<String>,
    released: Vec<DrawableHandle>,
}

impl ManualProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that also answers texture requests.
    pub fn with_textures() -> Self {
        Self { textures_enabled: true, ..Self::default() }
    }

    /// Make the generator raise for `body`.
    pub fn fail_generator_for(&mut self, body: &str) {
        self.failing_generators.insert(body.to_string());
    }

    fn allocate(&mut self, label: String) -> DrawableHandle {
        self.next += 1;
        let handle = DrawableHandle(self.next);
        self.statuses.insert(handle, DrawableStatus::Pending);
        self.paths.insert(handle, label);
        handle
    }

    pub fn resolve(&mut self, handle: DrawableHandle, status: DrawableStatus) {
        if let Some(s) = self.statuses.get_mut(&handle) {
            *s = status;
        }
    }

    /// Mark every outstanding drawable ready.
    pub fn resolve_all(&mut self) {
        for status in self.statuses.values_mut() {
            if *status == DrawableStatus::Pending {
                *status = DrawableStatus::Ready;
            }
        }
    }

    /// Path or texture label a handle was requested with.
    pub fn path_of(&self, handle: DrawableHandle) -> Option<&str> {
        self.paths.get(&handle).map(String::as_str)
    }

    pub fn handle_for(&self, path: &str) -> Option<DrawableHandle> {
        self.paths.iter().find(|(_, p)| p.as_str() == path).map(|(h, _)| *h)
    }

    /// Handles passed to `release`, in order.
    pub fn released(&self) -> &[DrawableHandle] {
        &self.released
    }

    pub fn live_count(&self) -> usize {
        self.statuses.len()
    }
}

impl DrawableProvider for ManualProvider {
    fn load_artwork(&mut self, path: &str) -> DrawableHandle {
        self.allocate(path.to_string())
    }

    fn generate_texture(&mut self, body: &str, resolution: u32) -> Result<DrawableHandle, AssetError> {
        if !self.textures_enabled {
            return Err(AssetError::Unsupported);
        }
        if self.failing_generators.contains(body) {
            return Err(AssetError::Generator(format!("{body} generator raised")));
        }
        Ok(self.allocate(format!("texture:{body}@{resolution}")))
    }

    fn status(&self, handle: DrawableHandle) -> DrawableStatus {
        self.statuses.get(&handle).copied().unwrap_or(DrawableStatus::Failed)
    }

    fn release(&mut self, handle: DrawableHandle) {
        if self.statuses.remove(&handle).is_some() {
            self.paths.remove(&handle);
            self.released.push(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_counts_ready_drawables() {
        let mut provider = ManualProvider::new();
        let mut tracker = AssetTracker::new();
        let a = provider.load_artwork("a.png");
        let b = provider.load_artwork("b.png");
        tracker.track(a, "a");
        tracker.track(b, "b");
        assert_eq!(tracker.status(&provider), AssetStatus { loaded: 0, total: 2 });

        provider.resolve(a, DrawableStatus::Ready);
        assert_eq!(tracker.status(&provider), AssetStatus { loaded: 1, total: 2 });
        assert!(tracker.is_ready(&provider, a));
        assert!(!tracker.is_ready(&provider, b));
    }

    #[test]
    fn failed_drawable_is_reported_once() {
        let mut provider = ManualProvider::new();
        let mut tracker = AssetTracker::new();
        let a = provider.load_artwork("a.png");
        tracker.track(a, "a");
        provider.resolve(a, DrawableStatus::Failed);
        assert_eq!(tracker.check(&provider, a), DrawableStatus::Failed);
        assert_eq!(tracker.check(&provider, a), DrawableStatus::Failed);
        assert_eq!(tracker.warned.len(), 1);
    }

    #[test]
    fn sweep_reports_failures_nobody_drew() {
        let mut provider = ManualProvider::new();
        let mut tracker = AssetTracker::new();
        let a = provider.load_artwork("a.png");
        let b = provider.load_artwork("b.png");
        tracker.track(a, "a");
        tracker.track(b, "b");
        provider.resolve(b, DrawableStatus::Failed);

        tracker.sweep(&provider);
        assert!(!tracker.has_warned(a));
        assert!(tracker.has_warned(b));
        tracker.sweep(&provider);
        assert_eq!(tracker.warned.len(), 1);
    }

    #[test]
    fn generator_errors() {
        let mut plain = ManualProvider::new();
        assert_eq!(plain.generate_texture("Earth", 128), Err(AssetError::Unsupported));

        let mut provider = ManualProvider::with_textures();
        provider.fail_generator_for("Mars");
        assert!(provider.generate_texture("Earth", 128).is_ok());
        assert!(matches!(provider.generate_texture("Mars", 128), Err(AssetError::Generator(_))));
    }

    #[test]
    fn released_handles_are_gone() {
        let mut provider = ManualProvider::with_textures();
        let t = provider.generate_texture("Earth", 128).unwrap();
        provider.release(t);
        provider.release(t);
        assert_eq!(provider.released(), &[t]);
        assert_eq!(provider.status(t), DrawableStatus::Failed);

        let art = provider.load_artwork("sprites/leo.png");
        provider.release(art);
        assert_eq!(provider.released(), &[t, art]);
        assert_eq!(provider.live_count(), 0);
    }
}
