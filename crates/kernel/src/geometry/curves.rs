use serde::Serialize;
use std::fmt;

use super::point::Point;
use super::real::Real;
use super::GeometryError;

/// An infinite line through two distinct points.
///
/// The stored points are whatever the line was built from; use
/// [`Line::canonical`] to get the representative that compares equal for
/// every pair of points on the same line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Line {
    p1: Point,
    p2: Point,
}

/// `a·x + b·y = c`
#[derive(Debug, Clone)]
pub struct Equation {
    pub a: Real,
    pub b: Real,
    pub c: Real,
}

impl Equation {
    pub fn contains(&self, p: &Point) -> bool {
        &self.a * &p.x + &self.b * &p.y == self.c
    }

    /// The normal `(a, b)` vanishes; no point satisfies or every point does.
    pub fn is_degenerate(&self) -> bool {
        self.a.is_zero() && self.b.is_zero()
    }
}

impl Line {
    pub fn through(p1: Point, p2: Point) -> Result<Self, GeometryError> {
        if p1 == p2 {
            return Err(GeometryError::CoincidentPoints { point: p1 });
        }
        Ok(Self { p1, p2 })
    }

    /// Caller guarantees `p1 != p2`.
    pub(crate) fn from_distinct(p1: Point, p2: Point) -> Self {
        debug_assert!(p1 != p2);
        Self { p1, p2 }
    }

    pub fn points(&self) -> (&Point, &Point) {
        (&self.p1, &self.p2)
    }

    pub fn is_vertical(&self) -> bool {
        self.p1.x == self.p2.x
    }

    /// Re-express the line through its crossings with the reference lines
    /// `x = 0` and `x = 1`, or `y = 0` and `y = 1` when it is vertical.
    ///
    /// The result depends only on the point set of the line, so canonical
    /// lines are equal iff they are geometrically identical.
    pub fn canonical(&self) -> Self {
        if self.is_vertical() {
            let x = self.p1.x.clone();
            return Self {
                p1: Point::new(x.clone(), Real::zero()),
                p2: Point::new(x, Real::one()),
            };
        }
        let slope = (&self.p2.y - &self.p1.y) / (&self.p2.x - &self.p1.x);
        let intercept = &self.p1.y - &(&slope * &self.p1.x);
        Self {
            p2: Point::new(Real::one(), &intercept + &slope),
            p1: Point::new(Real::zero(), intercept),
        }
    }

    pub fn equation(&self) -> Equation {
        let a = &self.p2.y - &self.p1.y;
        let b = &self.p1.x - &self.p2.x;
        let c = &a * &self.p1.x + &b * &self.p1.y;
        Equation { a, b, c }
    }

    pub fn contains(&self, p: &Point) -> bool {
        self.equation().contains(p)
    }

    pub fn is_parallel(&self, other: &Line) -> bool {
        let e1 = self.equation();
        let e2 = other.equation();
        (&e1.a * &e2.b - &e2.a * &e1.b).is_zero()
    }

    /// Same point set, regardless of how either line was built.
    pub fn is_same_line(&self, other: &Line) -> bool {
        self.canonical() == other.canonical()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line through {} and {}", self.p1, self.p2)
    }
}

/// A circle with an exact centre and exact squared radius.
///
/// The squared radius is what gets stored and compared; the radius itself
/// may be a surd and is only built on demand.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Circle {
    center: Point,
    radius_squared: Real,
}

impl Circle {
    pub fn new(center: Point, radius: Real) -> Result<Self, GeometryError> {
        if radius.signum() != std::cmp::Ordering::Greater {
            return Err(GeometryError::DegenerateCircle { center });
        }
        Ok(Self {
            radius_squared: radius.square(),
            center,
        })
    }

    /// The compass construction: centred on `center`, passing through `through`.
    pub fn through(center: Point, through: &Point) -> Result<Self, GeometryError> {
        if center == *through {
            return Err(GeometryError::DegenerateCircle { center });
        }
        Ok(Self {
            radius_squared: center.distance_squared_to(through),
            center,
        })
    }

    /// Caller guarantees a positive squared radius.
    pub(crate) fn from_radius_squared(center: Point, radius_squared: Real) -> Self {
        Self {
            center,
            radius_squared,
        }
    }

    pub fn center(&self) -> &Point {
        &self.center
    }

    pub fn radius_squared(&self) -> &Real {
        &self.radius_squared
    }

    pub fn radius(&self) -> Real {
        self.radius_squared.sqrt().unwrap_or_else(Real::zero)
    }

    pub fn contains(&self, p: &Point) -> bool {
        self.center.distance_squared_to(p) == self.radius_squared
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "circle at {} with radius {}", self.center, self.radius())
    }
}
