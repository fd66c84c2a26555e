//! # Path-Data Compiler
//!
//! Interprets the `d` attribute mini-language {M, L, H, V, C, S, Z and
//! their lower-case relative forms} as a state machine over three pieces
//! of state: the pen, the current subpath start, and the reflection
//! anchor for smooth-curve continuation. Arc commands (`A`/`a`) are
//! outside the supported subset and fail like any other unknown letter.
//!
//! Two behaviors here look surprising but are kept on purpose:
//! - a moveto with several coordinate pairs sets the subpath start from
//!   its first pair only; the rest become plain line-tos, and
//! - every relative coordinate in a multi-value command is offset from
//!   the pen as it stood before the command began, not from its
//!   predecessor within the command.

use crate::error::ErrorKind;
use crate::geom::Point;
use crate::program::PathProgram;
use crate::scan::{self, SEPARATORS};

/// Compile one `d` attribute into a path program.
pub fn compile(d: &str) -> Result<PathProgram, ErrorKind> {
    let mut program = PathProgram::new();
    let mut pen = Point::ZERO;
    let mut subpath_start = pen;
    // Second control point of the previous cubic, or the pen after any
    // command that is not a cubic curve.
    let mut last_control = pen;

    let mut rest = d.trim();
    loop {
        rest = rest.trim_start_matches(SEPARATORS);
        if rest.is_empty() {
            break;
        }
        let fragment = rest;
        let command = match rest.chars().next() {
            Some(c) => c,
            None => break,
        };
        rest = &rest[command.len_utf8()..];

        match command {
            'M' | 'm' | 'L' | 'l' | 'H' | 'h' | 'V' | 'v' | 'C' | 'c' | 'S' | 's' => {}
            'Z' | 'z' => {
                // Close emits the connecting line only when the pen is
                // away from the subpath start; idempotent otherwise.
                if pen != subpath_start {
                    program.line_to(subpath_start);
                    pen = subpath_start;
                }
                last_control = subpath_start;
                continue;
            }
            _ => {
                return Err(ErrorKind::UnknownPathCommand {
                    command,
                    fragment: fragment.to_string(),
                });
            }
        }

        let mut coords = Vec::new();
        loop {
            rest = rest.trim_start_matches(SEPARATORS);
            match scan::leading_number(rest) {
                Some((len, value)) => {
                    rest = &rest[len..];
                    coords.push(value);
                }
                None => break,
            }
        }

        let relative = command.is_ascii_lowercase();

        // H/V consume bare one-dimensional values; handle them before
        // pairing coordinates up.
        match command.to_ascii_lowercase() {
            'h' => {
                let mut end = pen;
                for &x in &coords {
                    let x = if relative { pen.x + x } else { x };
                    end = Point::new(x, pen.y);
                    program.line_to(end);
                }
                pen = end;
                last_control = pen;
                continue;
            }
            'v' => {
                let mut end = pen;
                for &y in &coords {
                    let y = if relative { pen.y + y } else { y };
                    end = Point::new(pen.x, y);
                    program.line_to(end);
                }
                pen = end;
                last_control = pen;
                continue;
            }
            _ => {}
        }

        if coords.len() % 2 != 0 {
            return Err(ErrorKind::MalformedPathData(fragment.to_string()));
        }
        let offset = if relative { pen } else { Point::ZERO };
        let points: Vec<Point> = coords
            .chunks(2)
            .map(|pair| Point::new(pair[0], pair[1]) + offset)
            .collect();

        match command.to_ascii_lowercase() {
            'm' | 'l' => {
                let mut starts_subpath = command.to_ascii_lowercase() == 'm';
                for &p in &points {
                    if starts_subpath {
                        program.move_to(p);
                        subpath_start = p;
                        starts_subpath = false;
                    } else {
                        program.line_to(p);
                    }
                    pen = p;
                }
                last_control = pen;
            }
            'c' => {
                if points.len() % 3 != 0 {
                    return Err(ErrorKind::MalformedPathData(fragment.to_string()));
                }
                for group in points.chunks(3) {
                    program.cube_to(group[0], group[1], group[2]);
                    last_control = group[1];
                    pen = group[2];
                }
            }
            's' => {
                if points.len() % 2 != 0 {
                    return Err(ErrorKind::MalformedPathData(fragment.to_string()));
                }
                // The reflection uses the pen and anchor as they stood
                // when the command began.
                let (base, anchor) = (pen, last_control);
                for group in points.chunks(2) {
                    let ctrl1 = base * 2.0 - anchor;
                    program.cube_to(ctrl1, group[0], group[1]);
                    last_control = group[0];
                    pen = group[1];
                }
            }
            _ => unreachable!("command set was checked above"),
        }
    }
    Ok(program)
}
