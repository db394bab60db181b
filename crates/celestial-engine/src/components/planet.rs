use std::f32::consts::TAU;
use std::rc::Rc;

use glam::Vec2;

use super::hover::HoverEase;
use crate::api::types::EntityId;
use crate::assets::catalog::PlanetSpec;
use crate::assets::provider::DrawableHandle;

/// Pulse phase advance per tick for the luminous body.
pub const PULSE_STEP: f32 = 0.02;

/// A body of the solar system.
///
/// Position is always derived from `angle`; nothing writes it directly.
#[derive(Debug, Clone)]
pub struct Planet {
    pub id: EntityId,
    pub spec: Rc<PlanetSpec>,
    pub center: Vec2,
    /// Orbit angle in radians, kept in [0, 2π).
    pub angle: f32,
    pub orbit_radius: f32,
    /// Radians per tick.
    pub orbit_speed: f32,
    pub size: f32,
    /// Orbit flattening in [0, 1].
    pub tilt: f32,
    pub hovered: bool,
    pub pulse_phase: f32,
    /// Hover glow, smoothed like constellation scale.
    pub highlight: HoverEase,
    /// Generated texture, preferred when ready.
    pub texture: Option<DrawableHandle>,
    /// Photo artwork, used when no texture is ready.
    pub image: Option<DrawableHandle>,
}

impl Planet {
    /// Body at `angle` on its orbit around `center`.
    pub fn new(id: EntityId, spec: Rc<PlanetSpec>, center: Vec2, angle: f32) -> Self {
        Self {
            id,
            orbit_radius: spec.orbit_radius,
            orbit_speed: spec.orbit_speed,
            size: spec.size,
            spec,
            center,
            angle: angle.rem_euclid(TAU),
            tilt: 0.0,
            hovered: false,
            pulse_phase: 0.0,
            highlight: HoverEase::new(0.0, 1.0, 0.15),
            texture: None,
            image: None,
        }
    }

    pub fn is_luminous(&self) -> bool {
        self.spec.is_star
    }

    pub fn has_rings(&self) -> bool {
        self.spec.has_rings
    }

    /// Current screen position. The luminous body sits at its center.
    pub fn position(&self) -> Vec2 {
        if self.is_luminous() {
            return self.center;
        }
        let (sin, cos) = self.angle.sin_cos();
        self.center + Vec2::new(cos * self.orbit_radius, sin * self.orbit_radius * (1.0 - self.tilt))
    }

    /// Horizontal and vertical radii of the orbit ellipse.
    pub fn orbit_radii(&self) -> Vec2 {
        Vec2::new(self.orbit_radius, self.orbit_radius * (1.0 - self.tilt))
    }

    /// One tick: orbit for regular bodies, pulse for the luminous one.
    pub fn advance(&mut self) {
        if self.is_luminous() {
            self.pulse_phase = (self.pulse_phase + PULSE_STEP).rem_euclid(TAU);
        } else {
            self.angle = (self.angle + self.orbit_speed).rem_euclid(TAU);
        }
    }

    /// Pointer radius; wider than the disc, wider still for ringed bodies.
    pub fn hit_radius(&self) -> f32 {
        if self.has_rings() {
            self.size * 3.5
        } else {
            self.size * 2.0
        }
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        self.position().distance(p) <= self.hit_radius()
    }

    /// Luminous-body radius multiplier in [0.9, 1.1].
    pub fn pulse_amount(&self) -> f32 {
        self.pulse_phase.sin() * 0.1 + 1.0
    }

    /// Photo rotation for ringed bodies, so the rings appear to rock.
    pub fn ring_rotation(&self) -> f32 {
        self.angle.cos() * 0.3 + 0.7
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::catalog::Catalogs;

    fn planet(name: &str) -> Planet {
        let catalogs = Catalogs::builtin().unwrap();
        let spec = catalogs.planets.get(name).unwrap().clone();
        Planet::new(EntityId(1), spec, Vec2::new(500.0, 400.0), 0.0)
    }

    #[test]
    fn vertical_excursion_follows_tilt() {
        for tilt in [0.0_f32, 0.25, 0.6, 1.0] {
            let mut p = planet("Earth");
            p.tilt = tilt;
            p.angle = 0.0;
            let horizontal = (p.position().x - p.center.x).abs();
            p.angle = std::f32::consts::FRAC_PI_2;
            let vertical = (p.position().y - p.center.y).abs();
            assert!((horizontal - p.orbit_radius).abs() < 1e-3);
            assert!((vertical - (1.0 - tilt) * horizontal).abs() < 1e-3, "tilt {tilt}");
        }
    }

    #[test]
    fn angle_stays_wrapped() {
        let mut p = planet("Mercury");
        p.orbit_speed = 1.0;
        for _ in 0..100 {
            p.advance();
            assert!((0.0..TAU).contains(&p.angle));
        }
    }

    #[test]
    fn luminous_body_pulses_in_place() {
        let mut sun = planet("Sun");
        let before = sun.position();
        for _ in 0..50 {
            sun.advance();
        }
        assert_eq!(sun.position(), before);
        assert!((sun.pulse_phase - 50.0 * PULSE_STEP).abs() < 1e-4);
        assert!((0.9..=1.1).contains(&sun.pulse_amount()));
    }

    #[test]
    fn center_hit_and_ring_radius() {
        let p = planet("Earth");
        assert!(p.contains_point(p.position()));
        let saturn = planet("Saturn");
        assert_eq!(saturn.hit_radius(), saturn.size * 3.5);
        assert_eq!(p.hit_radius(), p.size * 2.0);
    }
}
