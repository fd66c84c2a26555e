//! # Style Resolver
//!
//! Decodes per-shape presentation attributes: fill/stroke paint, stroke
//! width, linecap/linejoin, and the leaf-level `transform`. Styles are
//! owned by each shape element; nothing is inherited from ancestors in
//! this subset.

use serde::Serialize;

use crate::error::ErrorKind;
use crate::geom::Affine;

/// A packed 32-bit ARGB color. "No paint" is `Option::None` at use sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color(pub u32);

impl Color {
    /// Parse a paint attribute.
    ///
    /// `"none"` means unset. `#RRGGBB` packs with alpha forced to full
    /// opacity (six digits imply no alpha channel); `#RRGGBBAA` packs as
    /// written. Anything else is `InvalidColor`.
    pub fn parse(text: &str) -> Result<Option<Color>, ErrorKind> {
        if text == "none" {
            return Ok(None);
        }
        let hex = text
            .strip_prefix('#')
            .ok_or_else(|| ErrorKind::InvalidColor(text.to_string()))?;
        if hex.len() != 6 && hex.len() != 8 {
            return Err(ErrorKind::InvalidColor(text.to_string()));
        }
        let value = u32::from_str_radix(hex, 16)
            .map_err(|_| ErrorKind::InvalidColor(text.to_string()))?;
        if hex.len() == 6 {
            // Implied alpha.
            Ok(Some(Color(value | 0xff00_0000)))
        } else {
            Ok(Some(Color(value)))
        }
    }

    pub fn packed(self) -> u32 {
        self.0
    }

    /// The (alpha, red, green, blue) channels as bytes.
    pub fn argb(self) -> (u8, u8, u8, u8) {
        (
            (self.0 >> 24) as u8,
            (self.0 >> 16) as u8,
            (self.0 >> 8) as u8,
            self.0 as u8,
        )
    }
}

/// Presentation attributes of one shape element, with zero-value defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub transform: Affine,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f32,
    pub linecap: String,
    pub linejoin: String,
}

impl Style {
    /// Route one attribute into the style. Returns `false` when the
    /// attribute is not a style attribute (the caller keeps it).
    pub fn apply_attr(&mut self, name: &str, value: &str) -> Result<bool, ErrorKind> {
        match name {
            "transform" => self.transform = Affine::parse(value)?,
            "fill" => self.fill = Color::parse(value)?,
            "stroke" => self.stroke = Color::parse(value)?,
            "stroke-width" => {
                self.stroke_width = value
                    .trim()
                    .parse()
                    .map_err(|_| ErrorKind::InvalidNumber(value.to_string()))?;
            }
            "stroke-linecap" => self.linecap = value.to_string(),
            "stroke-linejoin" => self.linejoin = value.to_string(),
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Whether this shape belongs in the output at all. A shape with
    /// neither fill nor stroke is dropped, by convention.
    pub fn is_painted(&self) -> bool {
        self.fill.is_some() || self.stroke.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_digit_hex_forces_alpha() {
        assert_eq!(Color::parse("#ff0000").unwrap(), Some(Color(0xffff0000)));
        assert_eq!(Color::parse("#000000").unwrap(), Some(Color(0xff000000)));
    }

    #[test]
    fn eight_digit_hex_keeps_alpha() {
        assert_eq!(Color::parse("#11223344").unwrap(), Some(Color(0x11223344)));
    }

    #[test]
    fn none_is_unset() {
        assert_eq!(Color::parse("none").unwrap(), None);
    }

    #[test]
    fn rejects_other_forms() {
        for bad in ["red", "#f00", "#ff00", "#gggggg", "rgb(1,2,3)", ""] {
            assert!(
                matches!(Color::parse(bad), Err(ErrorKind::InvalidColor(_))),
                "expected InvalidColor for {:?}",
                bad
            );
        }
    }

    #[test]
    fn argb_channels() {
        let c = Color::parse("#12345678").unwrap().unwrap();
        assert_eq!(c.argb(), (0x12, 0x34, 0x56, 0x78));
    }

    #[test]
    fn style_routes_attributes() {
        let mut style = Style::default();
        assert!(style.apply_attr("fill", "#102030").unwrap());
        assert!(style.apply_attr("stroke-width", "2.5").unwrap());
        assert!(style.apply_attr("stroke-linecap", "round").unwrap());
        assert!(!style.apply_attr("points", "0,0 1,1").unwrap());
        assert_eq!(style.fill, Some(Color(0xff102030)));
        assert_eq!(style.stroke_width, 2.5);
        assert_eq!(style.linecap, "round");
        assert!(style.is_painted());
    }

    #[test]
    fn default_style_is_unpainted() {
        assert!(!Style::default().is_painted());
    }

    #[test]
    fn bad_stroke_width_is_an_error() {
        let mut style = Style::default();
        assert!(matches!(
            style.apply_attr("stroke-width", "wide"),
            Err(ErrorKind::InvalidNumber(_))
        ));
    }
}
