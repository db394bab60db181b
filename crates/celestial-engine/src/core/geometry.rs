use glam::Vec2;

/// Axis-aligned rectangle in screen space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    /// Smallest rectangle enclosing every point, or `None` for an empty set.
    pub fn bounding<I: IntoIterator<Item = Vec2>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self::from_origin_size(min, max - min))
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive point test; edges count as inside.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// True unless the two rectangles are separated by strictly more than
    /// `padding` along some axis.
    pub fn overlaps_padded(&self, other: &Rect, padding: f32) -> bool {
        !(self.right() + padding < other.x
            || other.right() + padding < self.x
            || self.bottom() + padding < other.y
            || other.bottom() + padding < self.y)
    }

    /// Gap between the rectangles along the axis that separates them most;
    /// negative when they intersect.
    pub fn separation(&self, other: &Rect) -> f32 {
        let dx = (other.x - self.right()).max(self.x - other.right());
        let dy = (other.y - self.bottom()).max(self.y - other.bottom());
        dx.max(dy)
    }
}
