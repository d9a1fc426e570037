use serde::Serialize;
use std::fmt;
use std::ops::{Add, Sub};

use super::real::Real;

/// An exact point in the plane.
///
/// Points order lexicographically by `(x, y)`, which is also the order of
/// points along any non-vertical line, and along a vertical line by `y`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    pub fn new(x: impl Into<Real>, y: impl Into<Real>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn origin() -> Self {
        Self::new(Real::zero(), Real::zero())
    }

    pub fn distance_squared_to(&self, other: &Self) -> Real {
        let dx = &self.x - &other.x;
        let dy = &self.y - &other.y;
        &dx * &dx + &dy * &dy
    }

    pub fn distance_to(&self, other: &Self) -> Real {
        // A sum of squares is never negative.
        self.distance_squared_to(other)
            .sqrt()
            .unwrap_or_else(Real::zero)
    }

    pub fn midpoint(&self, other: &Self) -> Self {
        let two = Real::from(2);
        Self {
            x: (&self.x + &other.x) / &two,
            y: (&self.y + &other.y) / &two,
        }
    }

    /// Floating-point approximation, for rendering only.
    pub fn to_f64(&self) -> (f64, f64) {
        (self.x.to_f64(), self.y.to_f64())
    }
}

impl Add for &Point {
    type Output = Point;
    fn add(self, rhs: &Point) -> Point {
        Point {
            x: &self.x + &rhs.x,
            y: &self.y + &rhs.y,
        }
    }
}

impl Sub for &Point {
    type Output = Point;
    fn sub(self, rhs: &Point) -> Point {
        Point {
            x: &self.x - &rhs.x,
            y: &self.y - &rhs.y,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(1, 0);
        let b = Point::new(4, 4);
        assert_eq!(a.distance_to(&b), Real::from(5));
        assert_eq!(a.distance_squared_to(&b), Real::from(25));
    }

    #[test]
    fn test_irrational_distance_is_exact() {
        let d = Point::origin().distance_to(&Point::new(8, 8));
        assert_eq!(d.square(), Real::from(128));
        assert_eq!(d, Real::from(8) * Real::from(2).sqrt().unwrap());
    }

    #[test]
    fn test_point_midpoint() {
        let m = Point::new(0, 0).midpoint(&Point::new(3, 8));
        assert_eq!(m, Point::new(Real::ratio(3, 2), 4));
    }

    #[test]
    fn test_point_sub_and_add() {
        let a = Point::new(3, 4);
        let b = Point::new(1, 1);
        let v = &a - &b;
        assert_eq!(v, Point::new(2, 3));
        assert_eq!(&v + &b, a);
    }

    #[test]
    fn test_lexicographic_order() {
        assert!(Point::new(0, 5) < Point::new(1, 0));
        assert!(Point::new(1, 0) < Point::new(1, 2));
    }
}
