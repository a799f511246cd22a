//! Integer 2D vector used for tile and canvas coordinates.
//!
//! Tile space is board-relative: x grows to the right, y grows downward, and
//! (0, 0) is the upper-left cell. Canvas space is tile space scaled by
//! [`TILE_SIZE`](crate::TILE_SIZE) and offset by [`BOARD_POS`](crate::BOARD_POS).

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::{BOARD_POS, TILE_SIZE};

/// A pair of signed integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vector2 {
    pub x: i32,
    pub y: i32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise multiply.
    pub const fn mul_components(self, rhs: Vector2) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y)
    }

    /// Component-wise integer division (truncating toward zero).
    ///
    /// Panics if either component of `rhs` is zero.
    pub const fn div_components(self, rhs: Vector2) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y)
    }

    pub const fn dot(self, rhs: Vector2) -> i32 {
        self.x * rhs.x + self.y * rhs.y
    }

    /// Squared length.
    pub const fn mag2(self) -> i32 {
        self.dot(self)
    }

    pub fn magnitude(self) -> f64 {
        f64::from(self.mag2()).sqrt()
    }

    /// Squared distance to `other`.
    pub const fn dist2(self, other: Vector2) -> i32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    pub const fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Per-component sign: -1, 0 or 1.
    pub const fn sign(self) -> Self {
        Self::new(self.x.signum(), self.y.signum())
    }

    /// True if `0 <= self < bounds` on both axes.
    pub const fn inside(self, bounds: Vector2) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < bounds.x && self.y < bounds.y
    }

    /// Converts a row-major linear index into tile coordinates.
    pub const fn from_tile_index(index: usize, width: usize) -> Self {
        let y = index / width;
        let x = index - y * width;
        Self::new(x as i32, y as i32)
    }

    /// Converts a tile coordinate into the canvas pixel position of its
    /// upper-left corner.
    pub const fn tile_to_canvas(self) -> Self {
        let scaled = self.mul_components(TILE_SIZE);
        Self::new(scaled.x + BOARD_POS.x, scaled.y + BOARD_POS.y)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<i32> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: i32) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl From<(i32, i32)> for Vector2 {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{},{}>", self.x, self.y)
    }
}
