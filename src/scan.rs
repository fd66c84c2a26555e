//! # Numeric Scanner
//!
//! Extracts floating-point tokens from raw attribute text. The token
//! grammar is deliberately small: an optional leading `-`, digits, and at
//! most one `.`. No exponent notation — that is a grammar limit of the
//! supported subset, not an oversight.

/// Separators between numbers in attribute text and path data.
pub(crate) const SEPARATORS: &[char] = &[' ', ',', '\t', '\n', '\r'];

/// Scan a whitespace/comma separated list of numbers.
///
/// Stops at the first token that is not a number and silently drops the
/// remainder. Call sites that require an exact count (viewBox, transform
/// matrices) validate the result length themselves.
pub fn number_list(text: &str) -> Vec<f32> {
    let mut numbers = Vec::new();
    let mut rest = text;
    loop {
        rest = rest.trim_start_matches(SEPARATORS);
        if rest.is_empty() {
            break;
        }
        match leading_number(rest) {
            Some((len, value)) => {
                rest = &rest[len..];
                numbers.push(value);
            }
            None => break,
        }
    }
    numbers
}

/// Scan one number at the start of `text`.
///
/// Returns the consumed byte length and the value, or `None` when the
/// leading text is not a valid token (including an empty span and a span
/// with more than one `.`).
pub fn leading_number(text: &str) -> Option<(usize, f32)> {
    let bytes = text.as_bytes();
    let mut len = 0;
    if bytes.first() == Some(&b'-') {
        len += 1;
    }
    while len < bytes.len() && (bytes[len].is_ascii_digit() || bytes[len] == b'.') {
        len += 1;
    }
    text[..len].parse::<f32>().ok().map(|value| (len, value))
}
