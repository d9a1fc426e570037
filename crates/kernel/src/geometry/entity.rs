use serde::Serialize;
use std::fmt;

use super::curves::{Circle, Line};
use super::intersection;
use super::point::Point;
use super::polygon::Polygon;

/// Anything that can take part in a construction.
///
/// The set is closed: only polygons, lines and circles exist, so an
/// unrecognised entity cannot be expressed at all.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Entity {
    Polygon(Polygon),
    Line(Line),
    Circle(Circle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    Polygon,
    Line,
    Circle,
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Polygon(_) => EntityKind::Polygon,
            Entity::Line(_) => EntityKind::Line,
            Entity::Circle(_) => EntityKind::Circle,
        }
    }

    /// Lines become canonical; everything else is already unique.
    pub fn normalized(self) -> Self {
        match self {
            Entity::Line(line) => Entity::Line(line.canonical()),
            other => other,
        }
    }

    /// Defining vertices, which count as interesting points on their own.
    pub fn vertices(&self) -> &[Point] {
        match self {
            Entity::Polygon(polygon) => polygon.vertices(),
            Entity::Line(_) | Entity::Circle(_) => &[],
        }
    }

    /// Points in the geometric intersection of two entities. Infinite
    /// intersections (coincident lines, identical circles, shared polygon
    /// edges) contribute nothing.
    pub fn intersect(&self, other: &Entity) -> Vec<Point> {
        match (self, other) {
            (Entity::Polygon(a), Entity::Polygon(b)) => intersection::polygon_polygon(a, b),
            (Entity::Polygon(p), Entity::Line(l)) | (Entity::Line(l), Entity::Polygon(p)) => {
                intersection::polygon_line(p, l)
            }
            (Entity::Polygon(p), Entity::Circle(c)) | (Entity::Circle(c), Entity::Polygon(p)) => {
                intersection::polygon_circle(p, c)
            }
            (Entity::Line(a), Entity::Line(b)) => intersection::line_line(a, b).into_iter().collect(),
            (Entity::Line(l), Entity::Circle(c)) | (Entity::Circle(c), Entity::Line(l)) => {
                intersection::line_circle(l, c)
            }
            (Entity::Circle(a), Entity::Circle(b)) => intersection::circle_circle(a, b),
        }
    }
}

impl From<Polygon> for Entity {
    fn from(value: Polygon) -> Self {
        Entity::Polygon(value)
    }
}

impl From<Line> for Entity {
    fn from(value: Line) -> Self {
        Entity::Line(value)
    }
}

impl From<Circle> for Entity {
    fn from(value: Circle) -> Self {
        Entity::Circle(value)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Polygon(polygon) => {
                write!(f, "polygon")?;
                for v in polygon.vertices() {
                    write!(f, " {v}")?;
                }
                Ok(())
            }
            Entity::Line(line) => write!(f, "{line}"),
            Entity::Circle(circle) => write!(f, "{circle}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::real::Real;
    use serde_json::json;

    #[test]
    fn test_entity_json_uses_exact_text() {
        let circle = Circle::through(Point::origin(), &Point::new(8, 8)).unwrap();
        assert_eq!(
            serde_json::to_value(Entity::Circle(circle)).unwrap(),
            json!({ "Circle": { "center": { "x": "0", "y": "0" }, "radius_squared": "128" } })
        );

        let line = Line::through(Point::new(Real::ratio(8, 5), Real::ratio(24, 5)), Point::new(8, 0)).unwrap();
        let value = serde_json::to_value(Entity::Line(line)).unwrap();
        assert_eq!(value["Line"]["p1"], json!({ "x": "8/5", "y": "24/5" }));
        assert_eq!(serde_json::to_value(EntityKind::Line).unwrap(), json!("Line"));
    }

    #[test]
    fn test_surd_serializes_as_display() {
        let root = Real::from(12).sqrt().unwrap();
        assert_eq!(serde_json::to_value(&root).unwrap(), json!("2·√3"));
        let p = Point::new(4, &root * &Real::from(2));
        assert_eq!(serde_json::to_value(&p).unwrap(), json!({ "x": "4", "y": "4·√3" }));
    }

    #[test]
    fn test_intersect_is_symmetric() {
        let square = Entity::Polygon(Polygon::square(8).unwrap());
        let bisector = Entity::Line(Line::through(Point::new(4, 0), Point::new(4, 1)).unwrap());
        let mut a = square.intersect(&bisector);
        let mut b = bisector.intersect(&square);
        a.sort();
        b.sort();
        assert_eq!(a, b);
        assert_eq!(a, vec![Point::new(4, 0), Point::new(4, 8)]);
        assert!(square.vertices().len() == 4 && bisector.vertices().is_empty());
    }
}
