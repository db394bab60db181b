/// Exponentially smoothed value that snaps its target between two constants.
///
/// Each step closes a fixed fraction of the remaining distance, so hover
/// effects grow and fade without popping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverEase {
    rest: f32,
    active: f32,
    rate: f32,
    value: f32,
}

impl HoverEase {
    pub fn new(rest: f32, active: f32, rate: f32) -> Self {
        Self { rest, active, rate, value: rest }
    }

    /// Move toward the target for the current hover flag; returns the new value.
    pub fn step(&mut self, hovered: bool) -> f32 {
        let target = if hovered { self.active } else { self.rest };
        self.value += (target - self.value) * self.rate;
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// 0.0 at rest, 1.0 fully active.
    pub fn progress(&self) -> f32 {
        let span = self.active - self.rest;
        if span.abs() <= f32::EPSILON {
            return 0.0;
        }
        ((self.value - self.rest) / span).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_toward_target_without_overshoot() {
        let mut ease = HoverEase::new(1.0, 1.15, 0.15);
        let mut last = ease.value();
        for _ in 0..200 {
            let v = ease.step(true);
            assert!(v >= last && v <= 1.15);
            last = v;
        }
        assert!((ease.value() - 1.15).abs() < 1e-3);
        assert!(ease.progress() > 0.99);
    }

    #[test]
    fn first_step_covers_fixed_fraction() {
        let mut ease = HoverEase::new(1.0, 1.15, 0.15);
        let v = ease.step(true);
        assert!((v - (1.0 + 0.15 * 0.15)).abs() < 1e-6);
        ease.step(false);
        assert!(ease.value() < v);
    }
}
