//! # Shape Converters
//!
//! Turns each declarative shape into its canonical path program. `Shape`
//! is a closed sum type matched exhaustively below, so adding a variant
//! without a converter fails to compile.

use std::f32::consts::SQRT_2;

use crate::error::ErrorKind;
use crate::geom::Point;
use crate::path;
use crate::program::PathProgram;

/// Cubic approximation constant for circular arcs, 4·(√2−1)/3.
/// https://pomax.github.io/bezierinfo/#circles_cubic
const KAPPA: f32 = 4.0 * (SQRT_2 - 1.0) / 3.0;

/// One declarative shape element, geometry only. Presentation attributes
/// live in [`crate::style::Style`].
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect { origin: Point, size: Point },
    Circle { center: Point, radius: f32 },
    Ellipse { center: Point, rx: f32, ry: f32 },
    Line { from: Point, to: Point },
    Polygon { points: Vec<Point> },
    Polyline { points: Vec<Point> },
    Path { data: String },
}

impl Shape {
    /// Compile this shape into its canonical path program.
    pub fn to_program(&self) -> Result<PathProgram, ErrorKind> {
        match self {
            Shape::Rect { origin, size } => Ok(rect(*origin, *size)),
            Shape::Circle { center, radius } => Ok(ellipse(*center, *radius, *radius)),
            Shape::Ellipse { center, rx, ry } => Ok(ellipse(*center, *rx, *ry)),
            Shape::Line { from, to } => Ok(line(*from, *to)),
            Shape::Polygon { points } => Ok(poly(points, true)),
            Shape::Polyline { points } => Ok(poly(points, false)),
            Shape::Path { data } => path::compile(data),
        }
    }
}

fn rect(origin: Point, size: Point) -> PathProgram {
    let mut p = PathProgram::new();
    p.move_to(origin);
    p.line_to(origin + Point::new(size.x, 0.0));
    p.line_to(origin + size);
    p.line_to(origin + Point::new(0.0, size.y));
    p.close();
    p
}

/// Approximate a full ellipse with exactly four cubic segments, modeled
/// as a circle of radius `rx` scaled in the Y direction by `ry / rx`.
/// Starts at the top of the ellipse and returns to it.
fn ellipse(center: Point, rx: f32, ry: f32) -> PathProgram {
    let r = rx;
    let scale = ry / r;
    let curve = r * KAPPA;
    let top = Point::new(center.x, center.y - r * scale);

    let mut p = PathProgram::new();
    p.move_to(top);
    p.cube_to(
        Point::new(center.x + curve, center.y - r * scale),
        Point::new(center.x + r, center.y - curve * scale),
        Point::new(center.x + r, center.y),
    );
    p.cube_to(
        Point::new(center.x + r, center.y + curve * scale),
        Point::new(center.x + curve, center.y + r * scale),
        Point::new(center.x, center.y + r * scale),
    );
    p.cube_to(
        Point::new(center.x - curve, center.y + r * scale),
        Point::new(center.x - r, center.y + curve * scale),
        Point::new(center.x - r, center.y),
    );
    p.cube_to(
        Point::new(center.x - r, center.y - curve * scale),
        Point::new(center.x - curve, center.y - r * scale),
        top,
    );
    p
}

/// Lines are intentionally open; they pair with stroke, not fill.
fn line(from: Point, to: Point) -> PathProgram {
    let mut p = PathProgram::new();
    p.move_to(from);
    p.line_to(to);
    p
}

fn poly(points: &[Point], close: bool) -> PathProgram {
    let mut p = PathProgram::new();
    // Fewer than two vertices is a no-op, not an error.
    if points.len() < 2 {
        return p;
    }
    let first = points[0];
    p.move_to(first);
    let mut last = first;
    for &point in &points[1..] {
        p.line_to(point);
        last = point;
    }
    // Polygons close with an explicit line back to the first vertex, not
    // a Close op, and only when the loop is not already closed.
    if close && last != first {
        p.line_to(first);
    }
    p
}
