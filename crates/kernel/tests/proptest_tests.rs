//! Property-based tests for world invariants using the `proptest` crate.

use std::collections::BTreeSet;

use proptest::prelude::*;

use euclidea_kernel::geometry::intersection::line_line;
use euclidea_kernel::{Circle, Entity, Line, Point, Polygon, Real, World};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Arbitrary lattice point in a modest range.
fn arb_point() -> impl Strategy<Value = Point> {
    (-100i64..=100, -100i64..=100).prop_map(|(x, y)| Point::new(x, y))
}

/// Arbitrary line through two distinct lattice points.
fn arb_line() -> impl Strategy<Value = Line> {
    (arb_point(), arb_point())
        .prop_filter("points must differ", |(a, b)| a != b)
        .prop_map(|(a, b)| Line::through(a, b).unwrap())
}

/// Side counts with exact regular polygons.
fn arb_sides() -> impl Strategy<Value = u32> {
    prop::sample::select(vec![3u32, 4, 6, 8, 12])
}

fn arb_regular_polygon() -> impl Strategy<Value = (Point, i64, u32)> {
    (arb_point(), 1i64..=100, arb_sides())
}

fn distinct_points(max: usize) -> impl Strategy<Value = Vec<Point>> {
    prop::collection::btree_set((-20i64..=20, -20i64..=20), 2..=max)
        .prop_map(|set| set.into_iter().map(|(x, y)| Point::new(x, y)).collect())
}

fn point_set(world: &World) -> BTreeSet<Point> {
    world.points().iter().cloned().collect()
}

// ---------------------------------------------------------------------------
// 1. Two lines meet in exactly their analytic crossing, or not at all
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn points_from_two_lines(l1 in arb_line(), l2 in arb_line()) {
        let world = World::new([Entity::Line(l1.clone()), Entity::Line(l2.clone())]);
        if l1.is_parallel(&l2) {
            prop_assert!(world.points().is_empty());
        } else {
            let crossing = line_line(&l1, &l2).unwrap();
            prop_assert!(l1.contains(&crossing) && l2.contains(&crossing));
            prop_assert_eq!(point_set(&world), BTreeSet::from([crossing]));
        }
    }
}

// ---------------------------------------------------------------------------
// 2. A lone line has no interesting points
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn points_from_single_line(l in arb_line()) {
        prop_assert!(World::new([Entity::Line(l)]).points().is_empty());
    }
}

// ---------------------------------------------------------------------------
// 3. Canonical lines ignore the generating pair
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn canonical_line_ignores_generating_pair(
        a in arb_point(),
        b in arb_point(),
        k in -5i64..=5,
        m in -5i64..=5,
    ) {
        prop_assume!(a != b && k != m);
        let along = |t: i64| {
            let t = Real::from(t);
            Point::new(&a.x + &(&t * &(&b.x - &a.x)), &a.y + &(&t * &(&b.y - &a.y)))
        };
        let original = Line::through(a.clone(), b.clone()).unwrap();
        let rebuilt = Line::through(along(k), along(m)).unwrap();
        prop_assert_eq!(original.canonical(), rebuilt.canonical());
        prop_assert_eq!(
            World::new([Entity::Line(original)]),
            World::new([Entity::Line(rebuilt)])
        );
    }
}

// ---------------------------------------------------------------------------
// 4. A polygon on its own contributes exactly its vertices
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10))]
    #[test]
    fn points_from_polygon((center, radius, sides) in arb_regular_polygon()) {
        let polygon = Polygon::regular(&center, radius, sides).unwrap();
        let vertices: BTreeSet<Point> = polygon.vertices().iter().cloned().collect();
        let world = World::new([Entity::Polygon(polygon)]);
        prop_assert_eq!(point_set(&world), vertices);
    }
}

// ---------------------------------------------------------------------------
// 5. A line through the centre of a regular polygon crosses it twice
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10))]
    #[test]
    fn points_from_polygon_and_line(
        p in arb_point(),
        (center, radius, sides) in arb_regular_polygon(),
    ) {
        prop_assume!(p != center);
        let polygon = Polygon::regular(&center, radius, sides).unwrap();
        let line = Line::through(p, center).unwrap();
        prop_assume!(!polygon.vertices().iter().any(|v| line.contains(v)));
        let world = World::new([Entity::Polygon(polygon), Entity::Line(line)]);
        prop_assert_eq!(world.points().len(), 2 + sides as usize);
    }
}

// ---------------------------------------------------------------------------
// 6. all_circles counts
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn all_circles_single_point(p in arb_point()) {
        prop_assert_eq!(World::all_circles([p]).count(), 0);
    }

    #[test]
    fn all_circles_two_points(p1 in arb_point(), p2 in arb_point()) {
        prop_assume!(p1 != p2);
        let circles: BTreeSet<Circle> = World::all_circles([p1.clone(), p2.clone()]).collect();
        let expected = BTreeSet::from([
            Circle::through(p1.clone(), &p2).unwrap(),
            Circle::through(p2.clone(), &p1).unwrap(),
        ]);
        prop_assert_eq!(circles, expected);
    }

    #[test]
    fn all_circles_three_points(points in distinct_points(3).prop_filter("three points", |p| p.len() == 3)) {
        let circles: Vec<Circle> = World::all_circles(points.clone()).collect();
        prop_assert!((3..=6).contains(&circles.len()));
        for center in &points {
            for other in points.iter().filter(|o| *o != center) {
                let wanted = Circle::through(center.clone(), other).unwrap();
                prop_assert!(circles.contains(&wanted));
            }
        }
    }

    #[test]
    fn all_circles_count_bounds(points in distinct_points(7)) {
        let n = points.len();
        let count = World::all_circles(points).count();
        prop_assert!(count >= n && count <= n * (n - 1),
            "{} circles from {} points", count, n);
    }

    #[test]
    fn all_lines_one_per_pair(points in distinct_points(7)) {
        let n = points.len();
        let lines: Vec<_> = World::all_lines(points).collect();
        prop_assert_eq!(lines.len(), n * (n - 1) / 2);
        prop_assert!(lines.iter().all(|l| l.is_ok()));
    }
}

// ---------------------------------------------------------------------------
// 7. The incremental point cache equals a fresh computation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]
    #[test]
    fn incremental_points_match_fresh(picks in prop::collection::vec((any::<bool>(), 0usize..64, 0usize..64), 1..=3)) {
        let mut world = World::new([Entity::Polygon(Polygon::square(8).unwrap())]);
        for (circle, i, j) in picks {
            let points: Vec<Point> = world.points().iter().cloned().collect();
            let a = points[i % points.len()].clone();
            let b = points[j % points.len()].clone();
            if a == b {
                continue;
            }
            world = if circle {
                world.add_entity(Circle::through(a, &b).unwrap())
            } else {
                world.add_entity(Line::through(a, b).unwrap())
            };
        }
        let fresh = World::new(world.entities().iter().cloned());
        prop_assert_eq!(point_set(&world), point_set(&fresh));
    }
}
