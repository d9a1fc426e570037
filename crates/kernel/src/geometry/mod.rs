pub mod real;
pub mod point;
pub mod curves;
pub mod polygon;
pub mod entity;
pub mod intersection;

use thiserror::Error;

use point::Point;

/// Geometry that cannot be constructed.
#[derive(Debug, Clone, Error)]
pub enum GeometryError {
    #[error("Cannot draw a line through the single point {point}")]
    CoincidentPoints { point: Point },

    #[error("Circle centred at {center} has no positive radius")]
    DegenerateCircle { center: Point },

    #[error("A polygon needs at least three distinct vertices (got {vertices})")]
    InvalidPolygon { vertices: usize },

    #[error("Regular {sides}-gon has no exact vertex coordinates here")]
    UnsupportedPolygon { sides: u32 },
}
