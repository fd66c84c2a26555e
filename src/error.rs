//! Structured error types for the SVG compiler.
//!
//! A compilation either produces a complete document or fails with exactly
//! one error; there is no partial output and no per-shape recovery. Errors
//! carry the file-relative line/column where the tokenizer stood when the
//! failure surfaced.

use std::fmt;

use thiserror::Error;

/// Everything that can go wrong while compiling one SVG document.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The root element is not `<svg>`.
    #[error("invalid SVG root: <{0}>")]
    InvalidRoot(String),
    /// The root element is not in the SVG namespace.
    #[error("unsupported SVG namespace: {0:?}")]
    UnsupportedNamespace(String),
    /// An element outside the supported subset appeared anywhere in the tree.
    #[error("unsupported tag: <{0}>")]
    UnsupportedElement(String),
    /// The document ended before the root element was closed.
    #[error("unexpected end of document")]
    UnexpectedEof,
    /// The underlying XML was not well formed.
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// A numeric attribute failed to parse.
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),
    /// A `viewBox` attribute did not supply exactly four numbers.
    #[error("invalid viewBox attribute: {0:?}")]
    InvalidViewBox(String),
    /// A `matrix(...)` transform did not supply exactly six numbers.
    #[error("malformed transform matrix: {0:?}")]
    InvalidTransform(String),
    /// A transform function other than `matrix(...)`, e.g. `rotate(...)`.
    #[error("unsupported transform: {0:?}")]
    UnsupportedTransform(String),
    /// A paint value that is neither `none` nor 6/8-digit hex.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
    /// A `points` list with an odd number of coordinates.
    #[error("malformed points list: {0:?}")]
    MalformedPoints(String),
    /// A letter outside the supported path command set.
    #[error("unknown <path> command {command:?} in {fragment:?}")]
    UnknownPathCommand { command: char, fragment: String },
    /// Wrong coordinate arity for a path command.
    #[error("wrong number of coordinates in <path> data: {0:?}")]
    MalformedPathData(String),
}

/// Coarse grouping of [`ErrorKind`], for callers that report structural,
/// attribute, and path-syntax failures differently. All three are fatal
/// for the file being compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Structural,
    Attribute,
    PathSyntax,
}

impl ErrorKind {
    pub fn class(&self) -> ErrorClass {
        match self {
            ErrorKind::InvalidRoot(_)
            | ErrorKind::UnsupportedNamespace(_)
            | ErrorKind::UnsupportedElement(_)
            | ErrorKind::UnexpectedEof
            | ErrorKind::Xml(_) => ErrorClass::Structural,
            ErrorKind::InvalidNumber(_)
            | ErrorKind::InvalidViewBox(_)
            | ErrorKind::InvalidTransform(_)
            | ErrorKind::UnsupportedTransform(_)
            | ErrorKind::InvalidColor(_)
            | ErrorKind::MalformedPoints(_) => ErrorClass::Attribute,
            ErrorKind::UnknownPathCommand { .. } | ErrorKind::MalformedPathData(_) => {
                ErrorClass::PathSyntax
            }
        }
    }
}

/// A compilation failure positioned within the source text.
///
/// Displays as `line:column: message` so a caller can prefix the file name
/// and get the conventional `file:line:column: message` shape.
#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub line: u64,
    pub column: u64,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.kind)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// Map a byte offset into `src` to a 1-based line/column pair.
pub(crate) fn line_col(src: &str, offset: usize) -> (u64, u64) {
    let upto = &src.as_bytes()[..offset.min(src.len())];
    let line = upto.iter().filter(|&&b| b == b'\n').count() as u64 + 1;
    let column = upto.iter().rev().take_while(|&&b| b != b'\n').count() as u64 + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_position() {
        let err = Error {
            kind: ErrorKind::UnsupportedElement("text".to_string()),
            line: 3,
            column: 7,
        };
        assert_eq!(err.to_string(), "3:7: unsupported tag: <text>");
    }

    #[test]
    fn line_col_maps_offsets() {
        let src = "ab\ncde\nf";
        assert_eq!(line_col(src, 0), (1, 1));
        assert_eq!(line_col(src, 2), (1, 3));
        assert_eq!(line_col(src, 3), (2, 1));
        assert_eq!(line_col(src, 7), (3, 1));
        // Past the end clamps to the last position.
        assert_eq!(line_col(src, 100), (3, 2));
    }

    #[test]
    fn taxonomy_classes() {
        assert_eq!(
            ErrorKind::UnexpectedEof.class(),
            ErrorClass::Structural
        );
        assert_eq!(
            ErrorKind::InvalidColor("red".into()).class(),
            ErrorClass::Attribute
        );
        assert_eq!(
            ErrorKind::MalformedPathData("L 1".into()).class(),
            ErrorClass::PathSyntax
        );
    }
}
