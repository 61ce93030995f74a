//! Small 2D value types on top of `glam::Vec2`.

use glam::Vec2;

/// An interaction coordinate, usually in viewport (client) pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OriginPoint {
    pub x: f32,
    pub y: f32,
}

impl OriginPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec2> for OriginPoint {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Axis-aligned rectangle described by its top-left corner and size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Rectangle anchored at (0, 0), e.g. the full viewport.
    pub fn from_size(size: Vec2) -> Self {
        Self {
            origin: Vec2::ZERO,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Distance from `p` to the closest point of the rectangle; 0 inside.
    pub fn distance_to(&self, p: Vec2) -> f32 {
        let dx = (self.left() - p.x).max(p.x - self.right()).max(0.0);
        let dy = (self.top() - p.y).max(p.y - self.bottom()).max(0.0);
        (dx * dx + dy * dy).sqrt()
    }

    /// Scale around the centre; used for the hidden/visible cell variants.
    pub fn scaled(&self, factor: f32) -> Rect {
        let size = self.size * factor;
        Rect {
            origin: self.center() - size * 0.5,
            size,
        }
    }
}
