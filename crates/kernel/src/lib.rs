//! Exact straightedge-and-compass geometry.
//!
//! Points, lines, circles and polygons over exact constructible numbers,
//! their pairwise intersections, and the immutable [`World`] snapshots a
//! construction search moves between.

pub mod geometry;
pub mod world;

// Re-export key types at crate root for convenience.
pub use geometry::GeometryError;
pub use geometry::curves::{Circle, Line};
pub use geometry::entity::{Entity, EntityKind};
pub use geometry::point::Point;
pub use geometry::polygon::{Polygon, Segment};
pub use geometry::real::Real;
pub use world::World;
