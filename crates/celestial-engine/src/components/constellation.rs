use std::rc::Rc;

use glam::Vec2;

use super::hover::HoverEase;
use crate::api::types::EntityId;
use crate::assets::catalog::ConstellationPattern;
use crate::assets::provider::DrawableHandle;
use crate::core::geometry::Rect;

/// Brightness every pattern star is drawn with before hover boost.
const STAR_BRIGHTNESS: f32 = 2.0;

/// A pattern star resolved to screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedStar {
    pub name: String,
    pub pos: Vec2,
    /// Base radius before hover scaling.
    pub size: f32,
}

impl PlacedStar {
    /// Draw opacity, brighter while the constellation is hovered.
    pub fn opacity(&self, hovered: bool) -> f32 {
        let boost = if hovered { 0.4 } else { 0.0 };
        (1.0 - STAR_BRIGHTNESS / 6.0 + boost).clamp(0.4, 1.0)
    }
}

/// Where the hover artwork lands on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilhouetteProjection {
    /// Destination distance over source distance between the two anchors.
    pub base_scale: f32,
    /// `base_scale` times the magnification.
    pub scale: f32,
    /// Draw rectangle, also the artwork hit box.
    pub rect: Rect,
}

impl SilhouetteProjection {
    /// Derive the projection from two source-pixel / screen-point pairs.
    ///
    /// The magnified artwork is re-centered on the footprint of the
    /// unmagnified one. Returns `None` when the source anchors coincide.
    pub fn from_anchors(src: [Vec2; 2], dst: [Vec2; 2], image_size: Vec2, magnification: f32) -> Option<Self> {
        let src_dist = src[0].distance(src[1]);
        if !(src_dist > f32::EPSILON) {
            return None;
        }
        let base_scale = dst[0].distance(dst[1]) / src_dist;
        let scale = base_scale * magnification;
        let base_size = image_size * base_scale;
        let size = image_size * scale;
        let base_origin = dst[0] - src[0] * base_scale;
        let origin = base_origin - (size - base_size) / 2.0;
        Some(Self {
            base_scale,
            scale,
            rect: Rect::from_origin_size(origin, size),
        })
    }
}

/// A catalog pattern placed on screen.
#[derive(Debug, Clone)]
pub struct Constellation {
    pub id: EntityId,
    pub pattern: Rc<ConstellationPattern>,
    /// Screen position of the pattern origin.
    pub anchor: Vec2,
    pub scale: f32,
    pub stars: Vec<PlacedStar>,
    /// Overlap and hit box: the star set plus room for the name.
    pub label_box: Rect,
    pub hovered: bool,
    /// Star and label scale, 1.0 at rest.
    pub hover: HoverEase,
    pub silhouette: Option<DrawableHandle>,
}

impl Constellation {
    pub fn new(id: EntityId, pattern: Rc<ConstellationPattern>, anchor: Vec2, scale: f32, hover: HoverEase) -> Self {
        let stars = place_stars(&pattern, anchor, scale);
        let label_box = label_box(&pattern.name, &stars, anchor);
        Self {
            id,
            pattern,
            anchor,
            scale,
            stars,
            label_box,
            hovered: false,
            hover,
            silhouette: None,
        }
    }

    /// Label box the pattern would occupy at `anchor`, without building it.
    pub fn label_box_for(pattern: &ConstellationPattern, anchor: Vec2, scale: f32) -> Rect {
        label_box(&pattern.name, &place_stars(pattern, anchor, scale), anchor)
    }

    pub fn key(&self) -> &str {
        &self.pattern.key
    }

    /// Topmost star y; labels sit above it.
    pub fn min_y(&self) -> f32 {
        self.stars.iter().map(|s| s.pos.y).fold(f32::INFINITY, f32::min)
    }

    /// Projected artwork box, if the pattern carries a usable descriptor.
    pub fn silhouette_projection(&self) -> Option<SilhouetteProjection> {
        let sprite = self.pattern.sprite.as_ref()?;
        let [a, b] = &sprite.anchors;
        let dst = [self.stars.get(a.star_index)?.pos, self.stars.get(b.star_index)?.pos];
        SilhouetteProjection::from_anchors(
            [a.img_pos, b.img_pos],
            dst,
            sprite.image_size,
            sprite.silhouette_scale,
        )
    }

    /// Artwork opacity for the current hover scale; reaches 1.0 halfway in.
    pub fn silhouette_opacity(&self) -> f32 {
        (self.hover.progress() * 2.0).min(1.0)
    }

    /// Label-box test, plus the artwork box when `include_silhouette` is set.
    pub fn contains_point(&self, p: Vec2, include_silhouette: bool) -> bool {
        if self.label_box.contains(p) {
            return true;
        }
        include_silhouette
            && self
                .silhouette_projection()
                .is_some_and(|proj| proj.rect.contains(p))
    }
}

fn place_stars(pattern: &ConstellationPattern, anchor: Vec2, scale: f32) -> Vec<PlacedStar> {
    pattern
        .stars
        .iter()
        .enumerate()
        .map(|(i, point)| PlacedStar {
            name: format!("Star {}", i + 1),
            pos: anchor + point.pos * scale,
            size: 2.0 * (1.0 + (point.magnitude - 1.0) * 0.33),
        })
        .collect()
}

/// Star bounds widened for the name and raised for the label rows.
fn label_box(name: &str, stars: &[PlacedStar], anchor: Vec2) -> Rect {
    let bounds = Rect::bounding(stars.iter().map(|s| s.pos))
        .unwrap_or(Rect::from_origin_size(anchor, Vec2::ZERO));
    let width = (name.chars().count() as f32 * 14.0 + 80.0).max(bounds.width + 60.0);
    Rect::new(anchor.x - width / 2.0, bounds.y - 60.0, width, 80.0 + bounds.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::catalog::{ConstellationCatalog, PatternPoint, SilhouetteAnchor, SilhouetteSpec};

    fn pattern(sprite: Option<SilhouetteSpec>) -> Rc<ConstellationPattern> {
        Rc::new(ConstellationPattern {
            key: "TEST".into(),
            name: "Test".into(),
            meaning: None,
            stars: vec![
                PatternPoint { pos: Vec2::new(0.0, 0.0), magnitude: 1.0 },
                PatternPoint { pos: Vec2::new(30.0, 40.0), magnitude: 2.0 },
            ],
            connections: vec![[0, 1]],
            sprite,
        })
    }

    fn ease() -> HoverEase {
        HoverEase::new(1.0, 1.15, 0.15)
    }

    #[test]
    fn base_scale_matches_known_factor() {
        let proj = SilhouetteProjection::from_anchors(
            [Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)],
            [Vec2::new(10.0, 10.0), Vec2::new(16.0, 18.0)],
            Vec2::new(100.0, 100.0),
            1.0,
        )
        .unwrap();
        assert_eq!(proj.base_scale, 2.0);
        assert_eq!(proj.rect, Rect::new(10.0, 10.0, 200.0, 200.0));
    }

    #[test]
    fn magnified_artwork_stays_centered() {
        let plain = SilhouetteProjection::from_anchors(
            [Vec2::ZERO, Vec2::new(3.0, 4.0)],
            [Vec2::new(10.0, 10.0), Vec2::new(16.0, 18.0)],
            Vec2::new(100.0, 50.0),
            1.0,
        )
        .unwrap();
        let magnified = SilhouetteProjection::from_anchors(
            [Vec2::ZERO, Vec2::new(3.0, 4.0)],
            [Vec2::new(10.0, 10.0), Vec2::new(16.0, 18.0)],
            Vec2::new(100.0, 50.0),
            1.8,
        )
        .unwrap();
        assert!((magnified.scale - 3.6).abs() < 1e-6);
        assert!(magnified.rect.center().distance(plain.rect.center()) < 1e-3);
    }

    #[test]
    fn coincident_source_anchors_have_no_projection() {
        assert!(SilhouetteProjection::from_anchors(
            [Vec2::ONE, Vec2::ONE],
            [Vec2::ZERO, Vec2::X],
            Vec2::splat(10.0),
            1.0,
        )
        .is_none());
    }

    #[test]
    fn stars_and_label_box() {
        let c = Constellation::new(EntityId(1), pattern(None), Vec2::new(200.0, 300.0), 0.5, ease());
        assert_eq!(c.stars[1].pos, Vec2::new(215.0, 320.0));
        assert_eq!(c.stars[1].name, "Star 2");
        assert!((c.stars[1].size - 2.66).abs() < 1e-5);
        // "Test" is 4 chars: 4 * 14 + 80 = 136, wider than the 15px span + 60.
        assert_eq!(c.label_box, Rect::new(200.0 - 68.0, 240.0, 136.0, 100.0));
        assert_eq!(Constellation::label_box_for(&c.pattern, c.anchor, c.scale), c.label_box);
    }

    #[test]
    fn hover_opacity_bounds() {
        let star = PlacedStar { name: String::new(), pos: Vec2::ZERO, size: 2.0 };
        assert!((star.opacity(false) - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(star.opacity(true), 1.0);
    }

    #[test]
    fn silhouette_box_extends_hit_area() {
        let sprite = SilhouetteSpec {
            image_size: Vec2::new(100.0, 100.0),
            anchors: [
                SilhouetteAnchor { star_index: 0, img_pos: Vec2::new(50.0, 50.0) },
                SilhouetteAnchor { star_index: 1, img_pos: Vec2::new(53.0, 54.0) },
            ],
            silhouette_scale: 1.8,
        };
        let c = Constellation::new(EntityId(1), pattern(Some(sprite)), Vec2::new(500.0, 500.0), 1.0, ease());
        let proj = c.silhouette_projection().unwrap();
        let outside_label = Vec2::new(proj.rect.x + 1.0, proj.rect.bottom() - 1.0);
        assert!(!c.label_box.contains(outside_label));
        assert!(c.contains_point(outside_label, true));
        assert!(!c.contains_point(outside_label, false));
    }

    #[test]
    fn bad_anchor_index_disables_silhouette() {
        let json = r#"{ "T": { "name": "T", "stars": [[0,0,1],[5,5,1]],
            "sprite": { "imageSize": [10, 10], "anchors": [
                { "starIndex": 0, "imgPos": [0, 0] }, { "starIndex": 9, "imgPos": [5, 5] } ] } } }"#;
        let catalog = ConstellationCatalog::from_json(json).unwrap();
        let c = Constellation::new(EntityId(1), catalog.patterns()[0].clone(), Vec2::ZERO, 1.0, ease());
        assert!(c.silhouette_projection().is_none());
    }
}
