//! # Geometry
//!
//! 2D point arithmetic and the affine transform used by shape elements.

use std::ops::{Add, Mul, Sub};

use serde::Serialize;

use crate::error::ErrorKind;
use crate::scan;

/// A 2D point or vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Point {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// An affine transform mapping (x, y) → (a·x + c·y + e, b·x + d·y + f).
///
/// The default value is the identity transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Affine {
    fn default() -> Affine {
        Affine::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Affine::IDENTITY
    }

    /// Parse a `transform` attribute.
    ///
    /// Only the `matrix(a,b,c,d,e,f)` textual form is supported. Any other
    /// function name (`translate`, `scale`, `rotate`, `skewX`, ...) is an
    /// explicit scope limit and fails with `UnsupportedTransform`.
    pub fn parse(text: &str) -> Result<Affine, ErrorKind> {
        let inner = text
            .trim()
            .strip_prefix("matrix(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ErrorKind::UnsupportedTransform(text.to_string()))?;
        let n = scan::number_list(inner);
        if n.len() != 6 {
            return Err(ErrorKind::InvalidTransform(text.to_string()));
        }
        Ok(Affine {
            a: n[0],
            b: n[1],
            c: n[2],
            d: n[3],
            e: n[4],
            f: n[5],
        })
    }
}
