use glam::Vec2;

/// What a size-change notification requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAction {
    /// Same size as last time.
    Unchanged,
    /// Small height-only change (mobile browser chrome). Resize the surface,
    /// keep every entity.
    ResizeSurface,
    /// Rebuild every entity for the new size.
    Rebuild,
}

/// Rebuild-vs-resize decision against the last known size.
#[derive(Debug, Clone)]
pub struct ResizePolicy {
    last: Vec2,
    height_threshold: f32,
}

impl ResizePolicy {
    pub fn new(initial: Vec2, height_threshold: f32) -> Self {
        Self { last: initial, height_threshold }
    }

    pub fn last_size(&self) -> Vec2 {
        self.last
    }

    pub fn set_threshold(&mut self, height_threshold: f32) {
        self.height_threshold = height_threshold;
    }

    /// Classify a notification and remember `size` as the last known size.
    pub fn observe(&mut self, size: Vec2) -> ResizeAction {
        let previous = std::mem::replace(&mut self.last, size);
        let height_delta = (size.y - previous.y).abs();
        if size.x != previous.x || height_delta > self.height_threshold {
            ResizeAction::Rebuild
        } else if height_delta > 0.0 {
            ResizeAction::ResizeSurface
        } else {
            ResizeAction::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_height_change_resizes_only() {
        let mut policy = ResizePolicy::new(Vec2::new(1000.0, 800.0), 150.0);
        assert_eq!(policy.observe(Vec2::new(1000.0, 720.0)), ResizeAction::ResizeSurface);
        assert_eq!(policy.last_size(), Vec2::new(1000.0, 720.0));
    }

    #[test]
    fn large_height_change_rebuilds() {
        let mut policy = ResizePolicy::new(Vec2::new(1000.0, 800.0), 150.0);
        assert_eq!(policy.observe(Vec2::new(1000.0, 1000.0)), ResizeAction::Rebuild);
    }

    #[test]
    fn any_width_change_rebuilds() {
        let mut policy = ResizePolicy::new(Vec2::new(1000.0, 800.0), 150.0);
        assert_eq!(policy.observe(Vec2::new(1001.0, 800.0)), ResizeAction::Rebuild);
    }

    #[test]
    fn threshold_is_exclusive_and_deltas_do_not_accumulate() {
        let mut policy = ResizePolicy::new(Vec2::new(1000.0, 800.0), 150.0);
        assert_eq!(policy.observe(Vec2::new(1000.0, 950.0)), ResizeAction::ResizeSurface);
        // Measured against the last notification, not the build size.
        assert_eq!(policy.observe(Vec2::new(1000.0, 1050.0)), ResizeAction::ResizeSurface);
        assert_eq!(policy.observe(Vec2::new(1000.0, 1050.0)), ResizeAction::Unchanged);
    }
}
