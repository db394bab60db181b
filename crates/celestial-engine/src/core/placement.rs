//! Non-overlapping constellation placement.
//!
//! Greedy and order-dependent: each constellation samples anchors in the
//! edge regions around a central exclusion zone and keeps the first one
//! whose padded label box clears every box accepted so far.

use glam::Vec2;

use crate::api::types::Viewport;
use crate::core::geometry::Rect;
use crate::core::rng::Rng;

/// Distance kept from every viewport edge.
const EDGE_MARGIN: f32 = 100.0;
/// Gap between the side strips and the exclusion zone.
const SIDE_GAP: f32 = 50.0;
/// Gap between the top/bottom strips and the exclusion zone.
const CAP_GAP: f32 = 30.0;

/// Axis ranges an anchor may be sampled from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x: (f32, f32),
    pub y: (f32, f32),
}

impl Region {
    fn is_usable(&self) -> bool {
        self.x.0 <= self.x.1 && self.y.0 <= self.y.1
    }

    fn sample(&self, rng: &mut Rng) -> Vec2 {
        Vec2::new(rng.range(self.x.0, self.x.1), rng.range(self.y.0, self.y.1))
    }
}

/// Central area kept clear for foreground UI.
pub fn exclusion_zone(viewport: Viewport) -> Rect {
    Rect::new(
        viewport.width * 0.25,
        viewport.height * 0.1,
        viewport.width * 0.5,
        viewport.height * 0.8,
    )
}

/// Left, right, top and bottom strips around the exclusion zone.
pub fn edge_regions(viewport: Viewport) -> [Region; 4] {
    let zone = exclusion_zone(viewport);
    let (w, h) = (viewport.width, viewport.height);
    [
        Region { x: (EDGE_MARGIN, zone.x - SIDE_GAP), y: (EDGE_MARGIN, h - EDGE_MARGIN) },
        Region { x: (zone.right() + SIDE_GAP, w - EDGE_MARGIN), y: (EDGE_MARGIN, h - EDGE_MARGIN) },
        Region { x: (zone.x, zone.right()), y: (EDGE_MARGIN, zone.y - CAP_GAP) },
        Region { x: (zone.x, zone.right()), y: (zone.bottom() + CAP_GAP, h - EDGE_MARGIN) },
    ]
}

/// Anchor search over the edge regions of one viewport.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    regions: Vec<Region>,
    attempts: u32,
    padding: f32,
}

impl PlacementEngine {
    pub fn new(viewport: Viewport, attempts: u32, padding: f32) -> Self {
        // Small viewports invert some strips; those are never sampled.
        let regions = edge_regions(viewport)
            .into_iter()
            .filter(Region::is_usable)
            .collect();
        Self { regions, attempts, padding }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// True if `candidate` clears every accepted box by more than the padding.
    pub fn fits(&self, candidate: &Rect, accepted: &[Rect]) -> bool {
        !accepted.iter().any(|other| candidate.overlaps_padded(other, self.padding))
    }

    /// First sampled anchor whose label box fits, or `None` once the attempt
    /// budget is spent.
    pub fn find_anchor<F>(&self, label_box: F, accepted: &[Rect], rng: &mut Rng) -> Option<(Vec2, Rect)>
    where
        F: Fn(Vec2) -> Rect,
    {
        if self.regions.is_empty() {
            return None;
        }
        for _ in 0..self.attempts {
            let region = self.regions[rng.index(self.regions.len())];
            let anchor = region.sample(rng);
            let candidate = label_box(anchor);
            if self.fits(&candidate, accepted) {
                return Some((anchor, candidate));
            }
        }
        None
    }
}
