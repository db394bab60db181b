use serde::{Deserialize, Serialize};

use crate::api::error::EngineError;

/// Every option the host may pass when mounting a backdrop.
///
/// Deserializes from the host's camelCase option bag; unknown keys are
/// ignored and missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneConfig {
    /// Background stars (default: 120).
    pub star_count: usize,
    /// Constellations to place when no explicit list is given (default: 12).
    pub constellation_count: usize,
    /// Catalog keys or display names to place instead of a random pick.
    pub specific_constellations: Option<Vec<String>>,
    /// Pattern-to-screen scale for constellations (default: 0.7).
    pub constellation_scale: f32,
    /// Always draw constellation names. When off, names appear only while hovered.
    pub show_constellation_names: bool,
    /// Label each constellation star.
    pub show_star_names: bool,
    /// Show hover artwork, and hit-test against its projected box.
    pub show_silhouettes: bool,
    /// Show orbiting bodies and their orbit lines.
    pub show_planets: bool,
    /// Show the luminous central body.
    pub show_sun: bool,
    /// Body size multiplier (default: 1.0).
    pub planet_scale: f32,
    /// Orbit radius multiplier (default: 0.8).
    pub orbit_scale: f32,
    /// Orbit flattening in [0, 1]; vertical excursion is `(1 - tilt)` of horizontal.
    pub orbit_tilt: f32,
    /// Orbit speed multiplier (default: 0.4).
    pub speed_multiplier: f32,
    /// Orbiting bodies to include, by catalog key or name. `None` includes all.
    pub specific_planets: Option<Vec<String>>,
    /// Seed for every random choice. `None` lets the host pick one.
    pub seed: Option<u64>,
    /// Empirical layout and animation constants.
    pub tuning: LayoutTuning,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            star_count: 120,
            constellation_count: 12,
            specific_constellations: None,
            constellation_scale: 0.7,
            show_constellation_names: true,
            show_star_names: false,
            show_silhouettes: true,
            show_planets: true,
            show_sun: true,
            planet_scale: 1.0,
            orbit_scale: 0.8,
            orbit_tilt: 0.6,
            speed_multiplier: 0.4,
            specific_planets: None,
            seed: None,
            tuning: LayoutTuning::default(),
        }
    }
}

/// Attempt budgets, thresholds and smoothing constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutTuning {
    /// Anchor samples tried per constellation before it is dropped (default: 25).
    pub placement_attempts: u32,
    /// Random catalog draws tried to find an unused constellation (default: 20).
    pub selection_attempts: u32,
    /// Minimum gap between two label boxes (default: 30).
    pub label_padding: f32,
    /// Height change that forces a rebuild instead of a surface resize (default: 150).
    pub rebuild_height_threshold: f32,
    /// Fraction of the remaining distance covered per tick by hover easing (default: 0.15).
    pub hover_smoothing: f32,
    /// Constellation scale while hovered (default: 1.15).
    pub hover_scale: f32,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            placement_attempts: 25,
            selection_attempts: 20,
            label_padding: 30.0,
            rebuild_height_threshold: 150.0,
            hover_smoothing: 0.15,
            hover_scale: 1.15,
        }
    }
}

impl SceneConfig {
    /// Parse and validate a host option bag.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the layout and animation code cannot work with.
    pub fn validate(&self) -> Result<(), EngineError> {
        positive("constellationScale", self.constellation_scale)?;
        positive("planetScale", self.planet_scale)?;
        positive("orbitScale", self.orbit_scale)?;
        if !self.speed_multiplier.is_finite() || self.speed_multiplier < 0.0 {
            return Err(invalid("speedMultiplier", self.speed_multiplier));
        }
        if !(0.0..=1.0).contains(&self.orbit_tilt) {
            return Err(invalid("orbitTilt", self.orbit_tilt));
        }
        self.tuning.validate()
    }
}

impl LayoutTuning {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.placement_attempts == 0 {
            return Err(EngineError::InvalidConfig(
                "tuning.placementAttempts must be at least 1".into(),
            ));
        }
        if self.selection_attempts == 0 {
            return Err(EngineError::InvalidConfig(
                "tuning.selectionAttempts must be at least 1".into(),
            ));
        }
        if !self.label_padding.is_finite() || self.label_padding < 0.0 {
            return Err(invalid("tuning.labelPadding", self.label_padding));
        }
        if !self.rebuild_height_threshold.is_finite() || self.rebuild_height_threshold < 0.0 {
            return Err(invalid("tuning.rebuildHeightThreshold", self.rebuild_height_threshold));
        }
        if !(self.hover_smoothing > 0.0 && self.hover_smoothing <= 1.0) {
            return Err(invalid("tuning.hoverSmoothing", self.hover_smoothing));
        }
        if !self.hover_scale.is_finite() || self.hover_scale <= 1.0 {
            return Err(invalid("tuning.hoverScale", self.hover_scale));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f32) -> Result<(), EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, value))
    }
}

fn invalid(name: &str, value: f32) -> EngineError {
    EngineError::InvalidConfig(format!("{name} out of range: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn parses_camel_case_option_bag() {
        let json = r#"{
            "starCount": 10,
            "constellationCount": 3,
            "showSilhouettes": false,
            "specificPlanets": ["Earth", "saturn"],
            "tuning": { "placementAttempts": 40 }
        }"#;
        let config = SceneConfig::from_json(json).unwrap();
        assert_eq!(config.star_count, 10);
        assert_eq!(config.constellation_count, 3);
        assert!(!config.show_silhouettes);
        assert_eq!(config.specific_planets.as_ref().map(Vec::len), Some(2));
        assert_eq!(config.tuning.placement_attempts, 40);
        // Untouched keys keep their defaults.
        assert_eq!(config.tuning.selection_attempts, 20);
        assert_eq!(config.orbit_tilt, 0.6);
    }

    #[test]
    fn rejects_tilt_outside_unit_interval() {
        let config = SceneConfig { orbit_tilt: 1.5, ..SceneConfig::default() };
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_attempt_budget() {
        let mut config = SceneConfig::default();
        config.tuning.placement_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_scale() {
        let config = SceneConfig { planet_scale: f32::NAN, ..SceneConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(SceneConfig::from_json("{ nope"), Err(EngineError::Parse(_))));
    }
}
