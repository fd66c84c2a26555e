//! # Document Walker
//!
//! Drives one compilation: tokenizes the XML with quick-xml, checks the
//! root element and namespace, flattens groups depth-first, dispatches
//! each shape element through the style resolver and shape converters,
//! and assembles the ordered output document.
//!
//! One unsupported element anywhere aborts the whole compilation; a
//! document compiles completely or not at all.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;
use serde::Serialize;

use crate::error::{line_col, Error, ErrorKind};
use crate::geom::{Affine, Point};
use crate::program::PathProgram;
use crate::scan;
use crate::shape::Shape;
use crate::style::{Color, Style};

const SVG_NS: &[u8] = b"http://www.w3.org/2000/svg";

/// The logical coordinate rectangle a document declares itself drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewBox {
    pub min: Point,
    pub max: Point,
}

/// Stroke paint for one compiled shape. Linecap and linejoin pass through
/// as the raw attribute text, empty when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub linecap: String,
    pub linejoin: String,
}

/// One shape's compiled drawing program with its paint and transform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledShape {
    pub transform: Affine,
    pub program: PathProgram,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

/// The compiled form of one SVG document: the declared view box plus the
/// shapes in source order, groups already flattened. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub view_box: Option<ViewBox>,
    pub shapes: Vec<CompiledShape>,
}

/// Compile one SVG document.
///
/// Purely functional: each call uses an independent state machine, so
/// separate documents may be compiled concurrently with zero shared state.
pub fn compile(src: &str) -> Result<Document, Error> {
    let mut walker = Walker {
        reader: NsReader::from_str(src),
        shapes: Vec::new(),
    };
    match walker.document() {
        Ok(document) => Ok(document),
        Err(kind) => {
            let offset = walker.reader.buffer_position() as usize;
            let (line, column) = line_col(src, offset);
            Err(Error { kind, line, column })
        }
    }
}

struct Walker<'a> {
    reader: NsReader<&'a [u8]>,
    shapes: Vec<CompiledShape>,
}

impl<'a> Walker<'a> {
    fn document(&mut self) -> Result<Document, ErrorKind> {
        loop {
            let (ns, event) = self.reader.read_resolved_event()?;
            let empty = matches!(event, Event::Empty(_));
            match event {
                Event::Start(e) | Event::Empty(e) => {
                    let name = local_name(&e);
                    if name != "svg" {
                        return Err(ErrorKind::InvalidRoot(name));
                    }
                    match ns {
                        ResolveResult::Bound(Namespace(n)) if n == SVG_NS => {}
                        ResolveResult::Bound(Namespace(n)) => {
                            return Err(ErrorKind::UnsupportedNamespace(
                                String::from_utf8_lossy(n).into_owned(),
                            ));
                        }
                        _ => return Err(ErrorKind::UnsupportedNamespace(String::new())),
                    }
                    let view_box = view_box(&e)?;
                    if !empty {
                        self.children()?;
                    }
                    return Ok(Document {
                        view_box,
                        shapes: std::mem::take(&mut self.shapes),
                    });
                }
                Event::Eof => return Err(ErrorKind::UnexpectedEof),
                _ => continue,
            }
        }
    }

    /// Walk the children of an open element until its end tag.
    fn children(&mut self) -> Result<(), ErrorKind> {
        loop {
            let (_, event) = self.reader.read_resolved_event()?;
            match event {
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(ErrorKind::UnexpectedEof),
                Event::Start(e) => self.element(&e, false)?,
                Event::Empty(e) => self.element(&e, true)?,
                _ => continue,
            }
        }
    }

    fn element(&mut self, e: &BytesStart<'a>, is_empty: bool) -> Result<(), ErrorKind> {
        let name = local_name(e);
        match name.as_str() {
            // Groups flatten into the parent sequence. Group-level
            // transforms and styles are unsupported in this subset.
            "g" => {
                if !is_empty {
                    self.children()?;
                }
            }
            "title" => {
                if !is_empty {
                    self.skip(e)?;
                }
            }
            "rect" | "circle" | "ellipse" | "line" | "polygon" | "polyline" | "path" => {
                if !is_empty {
                    self.skip(e)?;
                }
                self.shape(&name, e)?;
            }
            _ => return Err(ErrorKind::UnsupportedElement(name)),
        }
        Ok(())
    }

    /// Consume an element's entire subtree without interpreting it.
    fn skip(&mut self, e: &BytesStart<'a>) -> Result<(), ErrorKind> {
        self.reader.read_to_end(e.name())?;
        Ok(())
    }

    fn shape(&mut self, name: &str, e: &BytesStart<'a>) -> Result<(), ErrorKind> {
        let mut style = Style::default();
        let mut attrs: Vec<(String, String)> = Vec::new();
        for attr in e.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = match attr.unescape_value() {
                Ok(v) => v.into_owned(),
                Err(_) => continue,
            };
            if !style.apply_attr(&key, &value)? {
                attrs.push((key, value));
            }
        }

        let shape = decode_shape(name, &attrs)?;

        // A shape with neither fill nor stroke is dropped, so its path
        // data is never compiled.
        if !style.is_painted() {
            return Ok(());
        }
        let program: PathProgram = shape.to_program()?;
        let stroke = style.stroke.map(|color| Stroke {
            color,
            width: style.stroke_width,
            linecap: style.linecap.clone(),
            linejoin: style.linejoin.clone(),
        });
        self.shapes.push(CompiledShape {
            transform: style.transform,
            program,
            fill: style.fill,
            stroke,
        });
        Ok(())
    }
}

fn decode_shape(name: &str, attrs: &[(String, String)]) -> Result<Shape, ErrorKind> {
    Ok(match name {
        "rect" => Shape::Rect {
            origin: Point::new(num(attrs, "x")?, num(attrs, "y")?),
            size: Point::new(num(attrs, "width")?, num(attrs, "height")?),
        },
        "circle" => Shape::Circle {
            center: Point::new(num(attrs, "cx")?, num(attrs, "cy")?),
            radius: num(attrs, "r")?,
        },
        "ellipse" => Shape::Ellipse {
            center: Point::new(num(attrs, "cx")?, num(attrs, "cy")?),
            rx: num(attrs, "rx")?,
            ry: num(attrs, "ry")?,
        },
        "line" => Shape::Line {
            from: Point::new(num(attrs, "x1")?, num(attrs, "y1")?),
            to: Point::new(num(attrs, "x2")?, num(attrs, "y2")?),
        },
        "polygon" => Shape::Polygon {
            points: point_pairs(attrs)?,
        },
        "polyline" => Shape::Polyline {
            points: point_pairs(attrs)?,
        },
        "path" => Shape::Path {
            data: text(attrs, "d").unwrap_or_default().to_string(),
        },
        _ => unreachable!("element dispatch was checked by the walker"),
    })
}

/// A numeric attribute; missing means 0, garbage is an error.
fn num(attrs: &[(String, String)], key: &str) -> Result<f32, ErrorKind> {
    match text(attrs, key) {
        None => Ok(0.0),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ErrorKind::InvalidNumber(value.to_string())),
    }
}

fn text<'v>(attrs: &'v [(String, String)], key: &str) -> Option<&'v str> {
    attrs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Pair up a `points` list; an odd coordinate count is an error.
fn point_pairs(attrs: &[(String, String)]) -> Result<Vec<Point>, ErrorKind> {
    let raw = text(attrs, "points").unwrap_or_default();
    let numbers = scan::number_list(raw);
    if numbers.len() % 2 != 0 {
        return Err(ErrorKind::MalformedPoints(raw.to_string()));
    }
    Ok(numbers
        .chunks(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect())
}

fn view_box(e: &BytesStart) -> Result<Option<ViewBox>, ErrorKind> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() != b"viewBox" {
            continue;
        }
        let value = match attr.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => continue,
        };
        let n = scan::number_list(&value);
        if n.len() != 4 {
            return Err(ErrorKind::InvalidViewBox(value));
        }
        return Ok(Some(ViewBox {
            min: Point::new(n[0], n[1]),
            max: Point::new(n[2], n[3]),
        }));
    }
    Ok(None)
}

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::DrawOp;

    const HEADER: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24">"#;

    fn doc(body: &str) -> String {
        format!("{}{}</svg>", HEADER, body)
    }

    #[test]
    fn reports_view_box() {
        let d = compile(&doc("")).unwrap();
        assert_eq!(
            d.view_box,
            Some(ViewBox {
                min: Point::new(0.0, 0.0),
                max: Point::new(24.0, 24.0),
            })
        );
        assert!(d.shapes.is_empty());
    }

    #[test]
    fn view_box_is_optional() {
        let d = compile(r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#).unwrap();
        assert_eq!(d.view_box, None);
    }

    #[test]
    fn view_box_needs_exactly_four_numbers() {
        let src = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24"/>"#;
        let err = compile(src).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidViewBox(_)));
    }

    #[test]
    fn rejects_wrong_root() {
        let err = compile("<html></html>").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidRoot(name) if name == "html"));
    }

    #[test]
    fn rejects_missing_namespace() {
        let err = compile("<svg></svg>").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnsupportedNamespace(_)));
    }

    #[test]
    fn rejects_foreign_namespace() {
        let err = compile(r#"<svg xmlns="http://example.com/ns"></svg>"#).unwrap_err();
        assert!(
            matches!(err.kind, ErrorKind::UnsupportedNamespace(ns) if ns == "http://example.com/ns")
        );
    }

    #[test]
    fn truncated_document_is_eof() {
        let err = compile(HEADER).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnexpectedEof));
    }

    #[test]
    fn paintless_shape_is_dropped() {
        let d = compile(&doc(r#"<rect x="0" y="0" width="5" height="5"/>"#)).unwrap();
        assert!(d.shapes.is_empty());
    }

    #[test]
    fn filled_rect_compiles() {
        let d = compile(&doc(
            r##"<rect x="1" y="2" width="3" height="4" fill="#ff0000"/>"##,
        ))
        .unwrap();
        assert_eq!(d.shapes.len(), 1);
        let shape = &d.shapes[0];
        assert_eq!(shape.fill, Some(Color(0xffff0000)));
        assert_eq!(shape.stroke, None);
        assert_eq!(shape.program.ops()[0], DrawOp::MoveTo(Point::new(1.0, 2.0)));
        assert!(shape.transform.is_identity());
    }

    #[test]
    fn stroke_carries_width_and_joins() {
        let d = compile(&doc(
            r##"<line x1="0" y1="0" x2="9" y2="9" stroke="#00ff00" stroke-width="2"
                 stroke-linecap="round" stroke-linejoin="bevel"/>"##,
        ))
        .unwrap();
        let stroke = d.shapes[0].stroke.as_ref().unwrap();
        assert_eq!(stroke.color, Color(0xff00ff00));
        assert_eq!(stroke.width, 2.0);
        assert_eq!(stroke.linecap, "round");
        assert_eq!(stroke.linejoin, "bevel");
    }

    #[test]
    fn transform_attribute_is_carried() {
        let d = compile(&doc(
            r##"<rect width="2" height="2" fill="#000000" transform="matrix(1,0,0,1,5,6)"/>"##,
        ))
        .unwrap();
        let t = d.shapes[0].transform;
        assert!(!t.is_identity());
        assert_eq!(t.apply(Point::ZERO), Point::new(5.0, 6.0));
    }

    #[test]
    fn groups_flatten_without_inheritance() {
        let wrapped = compile(&doc(
            r##"<g><g><rect width="2" height="2" fill="#000000"/></g></g>"##,
        ))
        .unwrap();
        let bare = compile(&doc(r##"<rect width="2" height="2" fill="#000000"/>"##)).unwrap();
        assert_eq!(wrapped.shapes, bare.shapes);
    }

    #[test]
    fn title_subtree_is_skipped() {
        let d = compile(&doc(
            r##"<title>icon<desc>nested</desc></title><rect width="2" height="2" fill="#000000"/>"##,
        ))
        .unwrap();
        assert_eq!(d.shapes.len(), 1);
    }

    #[test]
    fn unsupported_element_fails_whole_compile() {
        let err = compile(&doc(
            r##"<rect width="2" height="2" fill="#000000"/><text>hi</text>"##,
        ))
        .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnsupportedElement(tag) if tag == "text"));
    }

    #[test]
    fn odd_points_list_is_an_error() {
        let err = compile(&doc(r##"<polygon points="0,0 1" fill="#000000"/>"##)).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::MalformedPoints(_)));
    }

    #[test]
    fn attribute_errors_surface_before_paint_check() {
        // The shape would be dropped as paintless, but its attributes
        // are still decoded first.
        let err = compile(&doc(r#"<rect width="wide" height="2"/>"#)).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidNumber(_)));
    }

    #[test]
    fn unpainted_path_data_is_never_compiled() {
        // Bad path data on a paintless shape is skipped silently.
        let d = compile(&doc(r#"<path d="M0,0 Q1,1 2,2"/>"#)).unwrap();
        assert!(d.shapes.is_empty());
    }

    #[test]
    fn missing_numeric_attributes_default_to_zero() {
        let d = compile(&doc(r##"<circle r="4" fill="#000000"/>"##)).unwrap();
        assert_eq!(
            d.shapes[0].program.ops()[0],
            DrawOp::MoveTo(Point::new(0.0, -4.0))
        );
    }

    #[test]
    fn errors_carry_position() {
        let src = format!("{}\n  <text/>\n</svg>", HEADER);
        let err = compile(&src).unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.column > 1);
    }
}
