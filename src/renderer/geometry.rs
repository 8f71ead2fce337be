use std::ops::{Add, Mul};

/// A 2D vector in target (screen) space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Component-wise multiplication, used to apply a draw scale.
impl Mul for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x * rhs.x, self.y * rhs.y)
    }
}

/// Integer rectangle, as handed back to hosts for layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Axis-aligned box given by its two corners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Bounds {
    /// An empty box located at a single point.
    pub const fn at(x: f32, y: f32) -> Self {
        Self { x, y, x2: x, y2: y }
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y
    }

    /// Grow the box so it covers the given box.
    pub fn include(&mut self, other: &Bounds) {
        self.x = self.x.min(other.x);
        self.y = self.y.min(other.y);
        self.x2 = self.x2.max(other.x2);
        self.y2 = self.y2.max(other.y2);
    }

    /// Truncates `x`, `y`, width and height toward zero, each on its own.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.x as i32,
            self.y as i32,
            (self.x2 - self.x) as i32,
            (self.y2 - self.y) as i32,
        )
    }
}
