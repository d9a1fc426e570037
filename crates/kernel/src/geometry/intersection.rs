use std::cmp::Ordering;

use super::curves::{Circle, Equation, Line};
use super::point::Point;
use super::polygon::{Polygon, Segment};
use super::real::Real;

// ─── Line-Line Intersection ──────────────────────────────────────────────────

/// The crossing point of two lines, `None` if they are parallel or identical.
pub fn line_line(l1: &Line, l2: &Line) -> Option<Point> {
    let e1 = l1.equation();
    let e2 = l2.equation();
    let det = &e1.a * &e2.b - &e2.a * &e1.b;
    if det.is_zero() {
        return None;
    }
    let x = (&e1.c * &e2.b - &e2.c * &e1.b) / &det;
    let y = (&e1.a * &e2.c - &e2.a * &e1.c) / &det;
    Some(Point::new(x, y))
}

// ─── Line-Circle Intersection ───────────────────────────────────────────────

/// Points of `a·x + b·y = c` on a circle: none, one (tangent) or two.
///
/// Uses the foot of the perpendicular from the centre, so only one square
/// root is ever taken.
pub fn equation_circle(eq: &Equation, circle: &Circle) -> Vec<Point> {
    if eq.is_degenerate() {
        return vec![];
    }
    let center = circle.center();
    let n2 = &eq.a * &eq.a + &eq.b * &eq.b;
    // signed offset of the centre from the line, scaled by |n|
    let s = &eq.c - &(&eq.a * &center.x) - &eq.b * &center.y;
    let disc = circle.radius_squared() * &n2 - &s * &s;
    let foot = Point::new(
        &center.x + &(&eq.a * &s) / &n2,
        &center.y + &(&eq.b * &s) / &n2,
    );
    match disc.signum() {
        Ordering::Less => vec![],
        Ordering::Equal => vec![foot],
        Ordering::Greater => {
            let Some(root) = disc.sqrt() else {
                return vec![];
            };
            let offset = &root / &n2;
            let dx = &eq.b * &offset;
            let dy = &eq.a * &offset;
            vec![
                Point::new(&foot.x - &dx, &foot.y + &dy),
                Point::new(&foot.x + &dx, &foot.y - &dy),
            ]
        }
    }
}

pub fn line_circle(line: &Line, circle: &Circle) -> Vec<Point> {
    equation_circle(&line.equation(), circle)
}

// ─── Circle-Circle Intersection ─────────────────────────────────────────────

/// Intersect the radical line of the two circles with the first one.
/// Concentric (including identical) circles give nothing.
pub fn circle_circle(c1: &Circle, c2: &Circle) -> Vec<Point> {
    let (p1, p2) = (c1.center(), c2.center());
    if p1 == p2 {
        return vec![];
    }
    let two = Real::from(2);
    let radical = Equation {
        a: &two * &(&p2.x - &p1.x),
        b: &two * &(&p2.y - &p1.y),
        c: c1.radius_squared() - c2.radius_squared() + (&p2.x * &p2.x - &p1.x * &p1.x)
            + (&p2.y * &p2.y - &p1.y * &p1.y),
    };
    equation_circle(&radical, c1)
}

// ─── Segment Intersections ──────────────────────────────────────────────────

pub fn segment_line(segment: &Segment, line: &Line) -> Vec<Point> {
    line_line(&segment.line(), line)
        .filter(|p| segment.contains_collinear(p))
        .into_iter()
        .collect()
}

pub fn segment_circle(segment: &Segment, circle: &Circle) -> Vec<Point> {
    line_circle(&segment.line(), circle)
        .into_iter()
        .filter(|p| segment.contains_collinear(p))
        .collect()
}

/// Crossing point of two segments. Collinear segments contribute a point
/// only when they overlap in exactly one endpoint.
pub fn segment_segment(s1: &Segment, s2: &Segment) -> Vec<Point> {
    let (l1, l2) = (s1.line(), s2.line());
    match line_line(&l1, &l2) {
        Some(p) => {
            if s1.contains_collinear(&p) && s2.contains_collinear(&p) {
                vec![p]
            } else {
                vec![]
            }
        }
        None if l1.contains(&s2.start) => {
            let (lo1, hi1) = s1.ordered();
            let (lo2, hi2) = s2.ordered();
            let lo = lo1.max(lo2);
            let hi = hi1.min(hi2);
            if lo == hi { vec![lo.clone()] } else { vec![] }
        }
        None => vec![],
    }
}

// ─── Polygon Intersections ──────────────────────────────────────────────────

pub fn polygon_line(polygon: &Polygon, line: &Line) -> Vec<Point> {
    polygon.edges().flat_map(|edge| segment_line(&edge, line)).collect()
}

pub fn polygon_circle(polygon: &Polygon, circle: &Circle) -> Vec<Point> {
    polygon
        .edges()
        .flat_map(|edge| segment_circle(&edge, circle))
        .collect()
}

pub fn polygon_polygon(a: &Polygon, b: &Polygon) -> Vec<Point> {
    a.edges()
        .flat_map(|e1| b.edges().flat_map(move |e2| segment_segment(&e1, &e2)).collect::<Vec<_>>())
        .collect()
}
