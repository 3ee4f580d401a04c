//! Screen-space points and the play field.

/// A point in screen pixels. `y` grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// The visible play area in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub width:  u32,
    pub height: u32,
}

impl Field {
    pub const fn new(width: u32, height: u32) -> Self {
        Field { width, height }
    }

    /// Centre of the field, rounded down to whole pixels.
    pub fn centre(&self) -> Point {
        Point::new((self.width / 2) as f32, (self.height / 2) as f32)
    }
}

impl Default for Field {
    fn default() -> Self {
        Field::new(1280, 720)
    }
}
