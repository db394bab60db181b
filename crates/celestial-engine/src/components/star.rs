use glam::Vec2;

use crate::api::types::EntityId;

/// A background star. Twinkles as a triangle wave in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub twinkle_rate: f32,
}

impl Star {
    pub fn new(id: EntityId, pos: Vec2, radius: f32, opacity: f32, twinkle_rate: f32) -> Self {
        Self {
            id,
            pos,
            radius,
            opacity: opacity.clamp(0.0, 1.0),
            twinkle_rate,
        }
    }

    /// Advance one tick. The rate flips before a step would leave [0, 1],
    /// so opacity stays in range without clamping.
    pub fn twinkle(&mut self) {
        let next = self.opacity + self.twinkle_rate;
        if !(0.0..=1.0).contains(&next) {
            self.twinkle_rate = -self.twinkle_rate;
        }
        self.opacity += self.twinkle_rate;
    }
}
