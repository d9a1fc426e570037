//! SVG drawings of construction worlds.

use euclidea_kernel::{Entity, Line, Point, World};

const PADDING: f64 = 40.0;
const TITLE_HEIGHT: f64 = 25.0;

/// Axis-aligned bounds in world coordinates.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Bounds {
    fn around(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut bounds = Bounds {
            min_x: f64::MAX,
            max_x: f64::MIN,
            min_y: f64::MAX,
            max_y: f64::MIN,
        };
        for (x, y) in points {
            bounds.min_x = bounds.min_x.min(x);
            bounds.max_x = bounds.max_x.max(x);
            bounds.min_y = bounds.min_y.min(y);
            bounds.max_y = bounds.max_y.max(y);
        }
        if bounds.min_x > bounds.max_x {
            return Bounds {
                min_x: -1.0,
                max_x: 1.0,
                min_y: -1.0,
                max_y: 1.0,
            };
        }
        bounds
    }

    fn grow(self, margin: f64) -> Self {
        Bounds {
            min_x: self.min_x - margin,
            max_x: self.max_x + margin,
            min_y: self.min_y - margin,
            max_y: self.max_y + margin,
        }
    }

    fn width(&self) -> f64 {
        (self.max_x - self.min_x).max(0.001)
    }

    fn height(&self) -> f64 {
        (self.max_y - self.min_y).max(0.001)
    }
}

/// Maps world coordinates onto the canvas, flipping y so it points up.
struct View {
    bounds: Bounds,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl View {
    fn fit(bounds: Bounds, width: f64, height: f64) -> Self {
        let avail_w = width - 2.0 * PADDING;
        let avail_h = height - 2.0 * PADDING - TITLE_HEIGHT;
        let scale = (avail_w / bounds.width()).min(avail_h / bounds.height());
        View {
            bounds,
            scale,
            offset_x: PADDING + (avail_w - bounds.width() * scale) / 2.0,
            offset_y: PADDING + TITLE_HEIGHT + (avail_h - bounds.height() * scale) / 2.0,
        }
    }

    fn map(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (
            (x - self.bounds.min_x) * self.scale + self.offset_x,
            (self.bounds.max_y - y) * self.scale + self.offset_y,
        )
    }

    /// The part of `line` inside the view, if any (Liang–Barsky).
    fn clip(&self, line: &Line) -> Option<((f64, f64), (f64, f64))> {
        let (p1, p2) = line.points();
        let (x0, y0) = p1.to_f64();
        let (x1, y1) = p2.to_f64();
        let (dx, dy) = (x1 - x0, y1 - y0);
        let b = &self.bounds;

        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;
        for (p, q) in [
            (-dx, x0 - b.min_x),
            (dx, b.max_x - x0),
            (-dy, y0 - b.min_y),
            (dy, b.max_y - y0),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t_min = t_min.max(t);
            } else {
                t_max = t_max.min(t);
            }
        }
        if t_min > t_max {
            return None;
        }
        Some((
            (x0 + t_min * dx, y0 + t_min * dy),
            (x0 + t_max * dx, y0 + t_max * dy),
        ))
    }
}

/// Draw every entity of `world`, its interesting points, and `goal`.
pub fn world_to_svg(world: &World, goal: &Point, width: f64, height: f64, title: &str) -> String {
    let goal_xy = goal.to_f64();
    let points: Vec<(f64, f64)> = world.points().iter().map(Point::to_f64).collect();
    let bounds = Bounds::around(points.iter().copied().chain([goal_xy]));
    let margin = 0.15 * bounds.width().max(bounds.height());
    let view = View::fit(bounds.grow(margin), width, height);

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" style=\"background:#1a1a2e\">\n\
         <text x=\"{}\" y=\"20\" font-family=\"monospace\" font-size=\"13\" fill=\"#8892b0\" text-anchor=\"middle\">{title}</text>\n",
        width / 2.0
    );

    for entity in world.entities() {
        match entity {
            Entity::Polygon(polygon) => {
                let corners: Vec<String> = polygon
                    .vertices()
                    .iter()
                    .map(|v| {
                        let (x, y) = view.map(v.to_f64());
                        format!("{x:.1},{y:.1}")
                    })
                    .collect();
                svg.push_str(&format!(
                    "  <polygon points=\"{}\" fill=\"rgb(60,90,140)\" fill-opacity=\"0.35\" stroke=\"#64a0dc\" stroke-width=\"1.5\"/>\n",
                    corners.join(" ")
                ));
            }
            Entity::Circle(circle) => {
                let (cx, cy) = view.map(circle.center().to_f64());
                let r = circle.radius_squared().to_f64().sqrt() * view.scale;
                svg.push_str(&format!(
                    "  <circle cx=\"{cx:.1}\" cy=\"{cy:.1}\" r=\"{r:.1}\" fill=\"none\" stroke=\"#7fb77e\" stroke-width=\"1\"/>\n"
                ));
            }
            Entity::Line(line) => {
                if let Some((a, b)) = view.clip(line) {
                    let (x1, y1) = view.map(a);
                    let (x2, y2) = view.map(b);
                    svg.push_str(&format!(
                        "  <line x1=\"{x1:.1}\" y1=\"{y1:.1}\" x2=\"{x2:.1}\" y2=\"{y2:.1}\" stroke=\"#dcb464\" stroke-width=\"1\"/>\n"
                    ));
                }
            }
        }
    }

    for xy in &points {
        let (x, y) = view.map(*xy);
        svg.push_str(&format!("  <circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"2.5\" fill=\"#ccd6f6\"/>\n"));
    }
    let (gx, gy) = view.map(goal_xy);
    let colour = if world.has_point(goal) { "#ff5c5c" } else { "#5a6080" };
    svg.push_str(&format!(
        "  <circle cx=\"{gx:.1}\" cy=\"{gy:.1}\" r=\"5\" fill=\"none\" stroke=\"{colour}\" stroke-width=\"2\"/>\n"
    ));

    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" font-family=\"monospace\" font-size=\"10\" fill=\"#5a6080\" \
         text-anchor=\"middle\">{} entities, {} points</text>\n",
        width / 2.0,
        height - 8.0,
        world.len(),
        points.len()
    ));
    svg.push_str("</svg>\n");
    svg
}
