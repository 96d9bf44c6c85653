use derive_more::{Add, AddAssign, Display, Neg, Sub, SubAssign, Sum};
use serde::{Deserialize, Serialize};
use std::ops;

/// A 2D point (or vector) in pixel space. See module-level docs in
/// [crate::world::hex] for a description of what pixel space means.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    PartialOrd,
    Neg,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Sum,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", "self.x", "self.y")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Length of this vector, i.e. distance from the origin
    pub fn len(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Get a vector of length 1 pointing the same direction as this one.
    /// Returns `None` for the zero vector, which has no direction.
    pub fn normalize(self) -> Option<Self> {
        let len = self.len();
        if len == 0.0 {
            None
        } else {
            Some(self / len)
        }
    }

    pub fn distance_to(self, other: Self) -> f64 {
        (self - other).len()
    }

    /// Rotate this vector counterclockwise (with +y up) around the origin
    pub fn rotate(self, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(cos * self.x - sin * self.y, sin * self.x + cos * self.y)
    }

    /// Component-wise multiplication. Used to apply a per-axis size.
    pub fn scale(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    /// Component-wise division, the inverse of [Self::scale]
    pub fn unscale(self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y)
    }
}

impl From<nalgebra::Vector2<f64>> for Point {
    fn from(other: nalgebra::Vector2<f64>) -> Self {
        Self::new(other.x, other.y)
    }
}

impl From<Point> for nalgebra::Vector2<f64> {
    fn from(other: Point) -> Self {
        nalgebra::Vector2::new(other.x, other.y)
    }
}

impl ops::Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl ops::Div<f64> for Point {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, -4.0);
        assert_eq!(a + b, Point::new(4.0, -2.0));
        assert_eq!(a - b, Point::new(-2.0, 6.0));
        assert_eq!(-a, Point::new(-1.0, -2.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
        assert_eq!(b / 2.0, Point::new(1.5, -2.0));
        assert_eq!(a.scale(b), Point::new(3.0, -8.0));
        assert_eq!(a.scale(b).unscale(b), a);
        assert_eq!(vec![a, b].into_iter().sum::<Point>(), a + b);
        assert_eq!(a.to_string(), "(1, 2)");
    }

    #[test]
    fn test_len_and_distance() {
        assert_approx_eq!(Point::new(3.0, -4.0).len(), 5.0);
        assert_approx_eq!(Point::ZERO.len(), 0.0);
        assert_approx_eq!(
            Point::new(1.0, 1.0).distance_to(Point::new(4.0, 5.0)),
            5.0
        );
    }

    #[test]
    fn test_normalize() {
        let unit = Point::new(0.0, -7.5).normalize().unwrap();
        assert_approx_eq!(unit.x, 0.0);
        assert_approx_eq!(unit.y, -1.0);
        let unit = Point::new(3.0, 4.0).normalize().unwrap();
        assert_approx_eq!(unit.len(), 1.0);
        assert_eq!(Point::ZERO.normalize(), None);
    }

    #[test]
    fn test_rotate() {
        let rotated = Point::new(1.0, 0.0).rotate(90.0);
        assert_approx_eq!(rotated.x, 0.0);
        assert_approx_eq!(rotated.y, 1.0);

        let rotated = Point::new(2.0, 1.0).rotate(180.0);
        assert_approx_eq!(rotated.x, -2.0);
        assert_approx_eq!(rotated.y, -1.0);

        let rotated = Point::new(3.0, 4.0).rotate(-37.0);
        assert_approx_eq!(rotated.len(), 5.0);
    }
}
