//! Path programs: the compiled, imperative form of a shape.

use serde::Serialize;

use crate::geom::Point;

/// One imperative drawing instruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DrawOp {
    MoveTo(Point),
    LineTo(Point),
    CubeTo(Point, Point, Point),
    Close,
}

/// An ordered sequence of [`DrawOp`]. Append-only while a shape is being
/// compiled, then immutable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathProgram(Vec<DrawOp>);

impl PathProgram {
    pub fn new() -> PathProgram {
        PathProgram(Vec::new())
    }

    pub fn move_to(&mut self, p: Point) {
        self.0.push(DrawOp::MoveTo(p));
    }

    pub fn line_to(&mut self, p: Point) {
        self.0.push(DrawOp::LineTo(p));
    }

    pub fn cube_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.0.push(DrawOp::CubeTo(ctrl1, ctrl2, to));
    }

    pub fn close(&mut self) {
        self.0.push(DrawOp::Close);
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// End point of the most recent pen-moving op. `Close` does not move
    /// the pen here; the path compiler accounts for it separately.
    pub fn pen(&self) -> Option<Point> {
        self.0.iter().rev().find_map(|op| match op {
            DrawOp::MoveTo(p) | DrawOp::LineTo(p) | DrawOp::CubeTo(_, _, p) => Some(*p),
            DrawOp::Close => None,
        })
    }
}
