//! Balloons: spawning, rising, culling and their drawn shape.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::geometry::{Field, Point};

// ════════════════════════════════════════════════════════════════════════════
// Palette
// ════════════════════════════════════════════════════════════════════════════

/// Balloon colors as packed ARGB (0xAARRGGBB).
pub const PALETTE: [u32; 5] = [
    0xFFFF0000, // red
    0xFFFF69B4, // pink
    0xFF00BFFF, // sky blue
    0xFF00FF7F, // spring green
    0xFFFFD700, // gold
];

pub const MIN_RADIUS: u32 = 30;
pub const MAX_RADIUS: u32 = 45;
pub const MIN_SPEED:  f32 = 1.5;
pub const MAX_SPEED:  f32 = 3.5;

/// Horizontal margin kept free at both field edges when spawning.
const SPAWN_MARGIN: u32 = 50;
/// How far below the bottom edge a balloon may start.
const SPAWN_DEPTH:  u32 = 300;
/// Length of the string hanging under the body.
pub const STRING_LEN: f32 = 30.0;

// ════════════════════════════════════════════════════════════════════════════
// Balloon
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct Balloon {
    pub x:      f32,
    pub y:      f32,
    pub radius: f32,
    pub color:  u32,
    /// Pixels risen per tick.
    pub speed:  f32,
}

/// Axis-aligned ellipse, centre plus semi-axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    pub centre: Point,
    pub rx:     f32,
    pub ry:     f32,
}

impl Balloon {
    /// A fresh balloon somewhere below the bottom edge of `field`.
    pub fn spawn<R: Rng + ?Sized>(field: Field, rng: &mut R) -> Self {
        let lo = SPAWN_MARGIN.min(field.width / 2);
        let hi = field.width.saturating_sub(SPAWN_MARGIN).max(lo);
        Balloon {
            x:      rng.gen_range(lo..=hi) as f32,
            y:      field.height.saturating_add(rng.gen_range(0..=SPAWN_DEPTH)) as f32,
            radius: rng.gen_range(MIN_RADIUS..=MAX_RADIUS) as f32,
            color:  *PALETTE.choose(rng).unwrap_or(&PALETTE[0]),
            speed:  rng.gen_range(MIN_SPEED..MAX_SPEED),
        }
    }

    pub fn centre(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Rise by one tick.
    pub fn rise(&mut self) {
        self.y -= self.speed;
    }

    /// True once the balloon has left through the top of the field.
    pub fn is_gone(&self) -> bool {
        self.y + self.radius < 0.0
    }

    /// True when `p` lies strictly inside the hit circle.
    pub fn contains(&self, p: Point) -> bool {
        p.distance(self.centre()) < self.radius
    }

    /// The drawn body: the ellipse inscribed in
    /// `(x - r, y - 1.5r, 2r, 2.5r)`.
    pub fn body(&self) -> Ellipse {
        let r = self.radius;
        Ellipse {
            centre: Point::new(self.x, self.y - 0.25 * r),
            rx:     r,
            ry:     1.25 * r,
        }
    }

    /// Endpoints of the string below the body.
    pub fn string(&self) -> (Point, Point) {
        let top = self.y + self.radius;
        (Point::new(self.x, top), Point::new(self.x, top + STRING_LEN))
    }
}
