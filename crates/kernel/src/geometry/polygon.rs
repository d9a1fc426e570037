use serde::Serialize;
use std::collections::BTreeSet;

use super::curves::Line;
use super::point::Point;
use super::real::Real;
use super::GeometryError;

/// A closed polygon given by its vertices in boundary order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Polygon {
    vertices: Vec<Point>,
}

/// A bounded piece of a polygon boundary.
#[derive(Debug, Clone)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn line(&self) -> Line {
        Line::from_distinct(self.start.clone(), self.end.clone())
    }

    /// Whether a point already known to lie on [`Segment::line`] falls
    /// between the endpoints.
    pub fn contains_collinear(&self, p: &Point) -> bool {
        within(&p.x, &self.start.x, &self.end.x) && within(&p.y, &self.start.y, &self.end.y)
    }

    pub fn contains(&self, p: &Point) -> bool {
        self.line().contains(p) && self.contains_collinear(p)
    }

    /// Endpoints in point order, which is the order along the segment.
    pub fn ordered(&self) -> (&Point, &Point) {
        if self.start <= self.end {
            (&self.start, &self.end)
        } else {
            (&self.end, &self.start)
        }
    }
}

fn within(v: &Real, a: &Real, b: &Real) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    lo <= v && v <= hi
}

/// Exact `(cos, sin)` of `turns / 24` of a full turn, for the angles that
/// regular 3-, 4-, 6-, 8- and 12-gons need.
fn unit_direction(step: u32) -> Option<(Real, Real)> {
    let half = Real::ratio(1, 2);
    let root2 = Real::from(2).sqrt()? * &half;
    let root3 = Real::from(3).sqrt()? * &half;
    let zero = Real::zero();
    let one = Real::one();
    // first quadrant, in 1/24 turns
    let (c, s) = match step % 6 {
        0 => (one, zero),
        2 => (root3, half),
        3 => (root2.clone(), root2),
        4 => (half, root3),
        _ => return None,
    };
    Some(match (step / 6) % 4 {
        0 => (c, s),
        1 => (-s, c),
        2 => (-c, -s),
        _ => (s, -c),
    })
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Result<Self, GeometryError> {
        let distinct: BTreeSet<&Point> = vertices.iter().collect();
        if vertices.len() < 3 || distinct.len() != vertices.len() {
            return Err(GeometryError::InvalidPolygon {
                vertices: vertices.len(),
            });
        }
        Ok(Self { vertices })
    }

    /// The axis-aligned square `(0,0), (s,0), (s,s), (0,s)`.
    pub fn square(side: impl Into<Real>) -> Result<Self, GeometryError> {
        let side = side.into();
        if side.signum() != std::cmp::Ordering::Greater {
            return Err(GeometryError::InvalidPolygon { vertices: 4 });
        }
        Self::new(vec![
            Point::origin(),
            Point::new(side.clone(), Real::zero()),
            Point::new(side.clone(), side.clone()),
            Point::new(Real::zero(), side),
        ])
    }

    /// Regular polygon with its first vertex at angle zero from `center`.
    ///
    /// Only side counts whose vertex angles have exact coordinates in
    /// `Q(√2, √3)` are supported: 3, 4, 6, 8 and 12.
    pub fn regular(center: &Point, circumradius: impl Into<Real>, sides: u32) -> Result<Self, GeometryError> {
        let circumradius = circumradius.into();
        if !matches!(sides, 3 | 4 | 6 | 8 | 12) {
            return Err(GeometryError::UnsupportedPolygon { sides });
        }
        if circumradius.signum() != std::cmp::Ordering::Greater {
            return Err(GeometryError::InvalidPolygon {
                vertices: sides as usize,
            });
        }
        let stride = 24 / sides;
        let vertices = (0..sides)
            .map(|i| {
                let (cos, sin) =
                    unit_direction(i * stride).ok_or(GeometryError::UnsupportedPolygon { sides })?;
                Ok(Point::new(
                    &center.x + &(&circumradius * &cos),
                    &center.y + &(&circumradius * &sin),
                ))
            })
            .collect::<Result<Vec<_>, GeometryError>>()?;
        Self::new(vertices)
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Boundary segments, closing back to the first vertex.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Segment {
            start: self.vertices[i].clone(),
            end: self.vertices[(i + 1) % n].clone(),
        })
    }
}
