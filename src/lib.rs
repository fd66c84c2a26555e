//! # svgc
//!
//! Compiles a restricted, well-defined subset of SVG into an ordered,
//! imperative drawing program: path primitives (move, line, cubic curve,
//! close) plus per-shape fill/stroke paint, ready to be replayed against
//! any host drawing API with moveTo/lineTo/cubicTo/close, fill, stroke,
//! and a push/pop transform scope.
//!
//! This is a compiler, not a renderer: the output is a program, never an
//! image. Gradients, masks, clip paths, CSS cascade, `<defs>`/`<use>`,
//! and arc path commands are outside the subset and fail loudly.
//!
//! ## Architecture
//!
//! ```text
//! Input (SVG text)
//!       ↓
//!   [walk]    — root/namespace checks, group flattening, dispatch
//!       ↓
//!   [style]   — fill/stroke/transform per shape   ([geom] for the math)
//!       ↓
//!   [shape]   — declarative geometry → path programs
//!       ↓
//!   [path]    — the d="" mini-language state machine
//!       ↓
//!   Document  — viewBox + ordered (transform, program, paint) tuples
//! ```
//!
//! The numeric scanner in [`scan`] is the shared leaf: every attribute
//! that holds numbers goes through it.
//!
//! Compilation is a single-threaded, single-pass, purely functional
//! transformation with no shared state between invocations; separate
//! documents can be compiled concurrently by independent calls.

pub mod error;
pub mod geom;
pub mod path;
pub mod program;
pub mod scan;
pub mod shape;
pub mod style;
pub mod walk;

pub use error::{Error, ErrorClass, ErrorKind};
pub use geom::{Affine, Point};
pub use program::{DrawOp, PathProgram};
pub use shape::Shape;
pub use style::{Color, Style};
pub use walk::{compile, CompiledShape, Document, Stroke, ViewBox};
