//! Descriptor parsing: the `&`-joined shape list carried by a scanned code.
//!
//! Grammar:
//!
//! ```text
//! descriptor = shape *( "&" shape )          ; at most 5 shapes
//! shape      = "S-" int                      ; square
//!            / "P-" int                      ; pentagon
//!            / "H-" int                      ; hexagon
//!            / "T-" int "-" int "-" int      ; triangle
//! ```
//!
//! Every side is a whole number of centimetres in `15..=85`. Each shape is
//! validated on its own, so one bad token never hides the others.

use crate::geometry::is_valid_triangle;
use crate::model::{MAX_SIDE_CM, MIN_SIDE_CM, ShapeKind, ShapeSpec};

/// Most shapes a single descriptor may carry.
pub const MAX_SHAPES: usize = 5;

/// Why a descriptor, or one of its tokens, was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(
        "unrecognised shape `{token}`: shapes start with S-, T-, P-, or H- \
         and are joined with `&`, e.g. `S-40&T-30-40-50`"
    )]
    UnknownShapeFormat { token: String },

    #[error("invalid {kind} side `{value}`: expected a whole number of cm")]
    InvalidNumber { kind: ShapeKind, value: String },

    #[error("{kind} side must be between {min} and {max} cm, got {value}", min = MIN_SIDE_CM, max = MAX_SIDE_CM)]
    OutOfRange { kind: ShapeKind, value: i32 },

    #[error("malformed triangle `{token}`: expected T-xx-yy-zz")]
    MalformedTriangle { token: String },

    #[error("sides {a}, {b}, {c} do not form a triangle")]
    InvalidTriangle { a: i32, b: i32, c: i32 },

    #[error("a code may carry at most {max} shapes, got {count}", max = MAX_SHAPES)]
    TooManyShapes { count: usize },
}

/// Descriptor parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parser {
    /// Reject triangle sides outside `15..=85` while parsing.
    ///
    /// When off, triangles are only checked against the triangle inequality
    /// and out-of-range sides surface later as drive-time errors.
    pub enforce_triangle_bounds: bool,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            enforce_triangle_bounds: true,
        }
    }
}

impl Parser {
    /// Splits `raw` into shape tokens and validates each one.
    ///
    /// Returns one outcome per token, in input order. Fails as a whole only
    /// when there are more than [`MAX_SHAPES`] tokens.
    pub fn parse(&self, raw: &str) -> Result<Vec<Result<ShapeSpec, ParseError>>, ParseError> {
        let tokens = split_fields(raw.trim(), '&');
        if tokens.len() > MAX_SHAPES {
            return Err(ParseError::TooManyShapes {
                count: tokens.len(),
            });
        }
        Ok(tokens.into_iter().map(|token| self.parse_shape(token)).collect())
    }

    /// Parses a single shape token such as `S-40` or `T-50-40-30`.
    pub fn parse_shape(&self, token: &str) -> Result<ShapeSpec, ParseError> {
        let (kind, rest) = split_prefix(token).ok_or_else(|| ParseError::UnknownShapeFormat {
            token: token.to_string(),
        })?;

        match kind {
            ShapeKind::Square => parse_side(kind, rest).map(|side| ShapeSpec::Square { side }),
            ShapeKind::Pentagon => parse_side(kind, rest).map(|side| ShapeSpec::Pentagon { side }),
            ShapeKind::Hexagon => parse_side(kind, rest).map(|side| ShapeSpec::Hexagon { side }),
            ShapeKind::Triangle => self.parse_triangle(token, rest),
        }
    }

    fn parse_triangle(&self, token: &str, rest: &str) -> Result<ShapeSpec, ParseError> {
        let fields = split_fields(rest, '-');
        let [a, b, c] = fields[..] else {
            return Err(ParseError::MalformedTriangle {
                token: token.to_string(),
            });
        };
        let a = parse_int(ShapeKind::Triangle, a)?;
        let b = parse_int(ShapeKind::Triangle, b)?;
        let c = parse_int(ShapeKind::Triangle, c)?;

        if self.enforce_triangle_bounds {
            for side in [a, b, c] {
                check_range(ShapeKind::Triangle, side)?;
            }
        }
        if !is_valid_triangle(a, b, c) {
            return Err(ParseError::InvalidTriangle { a, b, c });
        }
        Ok(ShapeSpec::Triangle { a, b, c })
    }
}

fn split_prefix(token: &str) -> Option<(ShapeKind, &str)> {
    let kind = match token.get(..2)? {
        "S-" => ShapeKind::Square,
        "T-" => ShapeKind::Triangle,
        "P-" => ShapeKind::Pentagon,
        "H-" => ShapeKind::Hexagon,
        _ => return None,
    };
    Some((kind, &token[2..]))
}

fn parse_side(kind: ShapeKind, field: &str) -> Result<i32, ParseError> {
    let side = parse_int(kind, field)?;
    check_range(kind, side)?;
    Ok(side)
}

fn parse_int(kind: ShapeKind, field: &str) -> Result<i32, ParseError> {
    field.parse().map_err(|_| ParseError::InvalidNumber {
        kind,
        value: field.to_string(),
    })
}

fn check_range(kind: ShapeKind, value: i32) -> Result<(), ParseError> {
    if (MIN_SIDE_CM..=MAX_SIDE_CM).contains(&value) {
        Ok(())
    } else {
        Err(ParseError::OutOfRange { kind, value })
    }
}

/// Splits on `sep`, dropping trailing empty fields (`"S-40&"` is one token).
/// At least one field is always returned.
fn split_fields(s: &str, sep: char) -> Vec<&str> {
    let mut fields: Vec<&str> = s.split(sep).collect();
    while fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}
