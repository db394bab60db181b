//! Constellation and planet catalogs.
//!
//! Catalogs are JSON documents keyed by an upper-case identifier. They are
//! parsed once, never mutated, and shared by reference with every scene
//! build.

use std::collections::BTreeMap;
use std::rc::Rc;

use glam::Vec2;
use serde::Deserialize;

use crate::api::error::EngineError;
use crate::renderer::color::Color;

const BUILTIN_CONSTELLATIONS: &str = include_str!("../../data/constellations.json");
const BUILTIN_PLANETS: &str = include_str!("../../data/planets.json");

/// One named point of a constellation pattern, in pattern units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f32>")]
pub struct PatternPoint {
    pub pos: Vec2,
    pub magnitude: f32,
}

impl TryFrom<Vec<f32>> for PatternPoint {
    type Error = String;

    fn try_from(v: Vec<f32>) -> Result<Self, Self::Error> {
        match v.as_slice() {
            [x, y] => Ok(Self { pos: Vec2::new(*x, *y), magnitude: 1.0 }),
            [x, y, mag] => Ok(Self { pos: Vec2::new(*x, *y), magnitude: *mag }),
            _ => Err(format!("expected [x, y, magnitude], got {} values", v.len())),
        }
    }
}

/// A source-artwork pixel matched to one pattern star.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SilhouetteAnchor {
    pub star_index: usize,
    #[serde(with = "vec2_array")]
    pub img_pos: Vec2,
}

/// Hover artwork and the two correspondences that project it onto the sky.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SilhouetteSpec {
    /// Native artwork size in pixels.
    #[serde(with = "vec2_array")]
    pub image_size: Vec2,
    pub anchors: [SilhouetteAnchor; 2],
    /// Magnification applied on top of the anchor-derived scale.
    #[serde(default = "default_silhouette_scale")]
    pub silhouette_scale: f32,
}

fn default_silhouette_scale() -> f32 {
    1.8
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConstellationPattern {
    /// Catalog key, e.g. `URSA_MAJOR`. Filled in from the map key.
    #[serde(skip)]
    pub key: String,
    pub name: String,
    #[serde(default, alias = "description")]
    pub meaning: Option<String>,
    pub stars: Vec<PatternPoint>,
    #[serde(default)]
    pub connections: Vec<[usize; 2]>,
    #[serde(default, alias = "silhouette")]
    pub sprite: Option<SilhouetteSpec>,
}

impl ConstellationPattern {
    /// Relative path of the hover artwork: `silhouettes/<key-in-kebab>.png`.
    pub fn silhouette_path(&self) -> String {
        format!("silhouettes/{}.png", self.key.to_lowercase().replace('_', "-"))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BodyColors {
    pub light: Color,
    pub dark: Color,
    pub glow: Color,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetSpec {
    #[serde(skip)]
    pub key: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub meaning: Option<String>,
    /// Photo file name under `planets/`.
    #[serde(default)]
    pub image: Option<String>,
    pub colors: BodyColors,
    pub size: f32,
    #[serde(default)]
    pub orbit_radius: f32,
    #[serde(default)]
    pub orbit_speed: f32,
    #[serde(default)]
    pub has_rings: bool,
    #[serde(default)]
    pub ring_color: Option<Color>,
    /// The luminous central body: pulses instead of orbiting.
    #[serde(default)]
    pub is_star: bool,
}

impl PlanetSpec {
    pub fn image_path(&self) -> Option<String> {
        self.image.as_ref().map(|file| format!("planets/{file}"))
    }

    /// Side length of the procedural texture requested for this body.
    pub fn texture_resolution(&self) -> u32 {
        if self.has_rings {
            256
        } else {
            128
        }
    }
}

/// Normalize a user-supplied name for lookup: case-insensitive, spaces as `_`.
fn lookup_key(name: &str) -> String {
    name.trim().to_uppercase().replace([' ', '-'], "_")
}

#[derive(Debug, Clone, Default)]
pub struct ConstellationCatalog {
    patterns: Vec<Rc<ConstellationPattern>>,
}

impl ConstellationCatalog {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let raw: BTreeMap<String, ConstellationPattern> = serde_json::from_str(json)?;
        let mut patterns = Vec::with_capacity(raw.len());
        for (key, mut pattern) in raw {
            if pattern.stars.is_empty() {
                log::debug!("constellation {key} has no stars, skipped");
                continue;
            }
            pattern.key = key;
            patterns.push(Rc::new(pattern));
        }
        Ok(Self { patterns })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[Rc<ConstellationPattern>] {
        &self.patterns
    }

    /// Look up by catalog key or display name.
    pub fn get(&self, name: &str) -> Option<&Rc<ConstellationPattern>> {
        let wanted = lookup_key(name);
        self.patterns
            .iter()
            .find(|p| p.key == wanted || lookup_key(&p.name) == wanted)
    }

    /// Catalog keys in catalog order.
    pub fn keys(&self) -> Vec<String> {
        self.patterns.iter().map(|p| p.key.clone()).collect()
    }
}

/// Planet catalog, ordered innermost orbit first.
#[derive(Debug, Clone, Default)]
pub struct PlanetCatalog {
    bodies: Vec<Rc<PlanetSpec>>,
}

impl PlanetCatalog {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let raw: BTreeMap<String, PlanetSpec> = serde_json::from_str(json)?;
        let mut bodies: Vec<Rc<PlanetSpec>> = raw
            .into_iter()
            .map(|(key, mut spec)| {
                spec.key = key;
                Rc::new(spec)
            })
            .collect();
        bodies.sort_by(|a, b| a.orbit_radius.total_cmp(&b.orbit_radius));
        Ok(Self { bodies })
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> &[Rc<PlanetSpec>] {
        &self.bodies
    }

    pub fn get(&self, name: &str) -> Option<&Rc<PlanetSpec>> {
        let wanted = lookup_key(name);
        self.bodies
            .iter()
            .find(|b| b.key == wanted || lookup_key(&b.name) == wanted)
    }
}

/// Both catalogs a scene build reads.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub constellations: ConstellationCatalog,
    pub planets: PlanetCatalog,
}

impl Catalogs {
    pub fn new(constellations: ConstellationCatalog, planets: PlanetCatalog) -> Self {
        Self { constellations, planets }
    }

    /// The embedded zodiac and solar-system tables.
    pub fn builtin() -> Result<Self, EngineError> {
        Ok(Self::new(
            ConstellationCatalog::from_json(BUILTIN_CONSTELLATIONS)?,
            PlanetCatalog::from_json(BUILTIN_PLANETS)?,
        ))
    }
}

/// `[x, y]` arrays as `Vec2`.
mod vec2_array {
    use glam::Vec2;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec2, D::Error> {
        let [x, y] = <[f32; 2]>::deserialize(deserializer)?;
        Ok(Vec2::new(x, y))
    }
}
