use glam::Vec2;

/// Unique identifier for an entity in the scene.
///
/// Ids come from [`EntityIds`] and are never reused, so an id that survives a
/// resize still names the same star, planet or constellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Monotonic id source. Lives for the whole engine, not for one scene.
#[derive(Debug, Clone)]
pub struct EntityIds {
    next: u32,
}

impl EntityIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

impl Default for EntityIds {
    fn default() -> Self {
        Self::new()
    }
}

/// Host viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_size(size: Vec2) -> Self {
        Self::new(size.x, size.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Center of the viewport; the luminous body sits here.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}
