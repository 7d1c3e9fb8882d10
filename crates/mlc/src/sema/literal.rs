//! Declared type vs. initializer text compatibility
//!
//! Purely textual: the initializer is never evaluated, identifiers are
//! never resolved and numbers are not range checked.

use crate::common::{Diagnostics, ErrorKind, Span};

/// Shape an initializer must have for a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralShape {
    Integer,
    Float,
    QuotedString,
    /// No literal is accepted for this type
    Unsupported,
}

impl LiteralShape {
    pub fn for_type(declared: &str) -> Self {
        match declared {
            "int" => LiteralShape::Integer,
            "float" | "double" => LiteralShape::Float,
            "string" => LiteralShape::QuotedString,
            _ => LiteralShape::Unsupported,
        }
    }

    pub fn accepts(self, text: &str) -> bool {
        match self {
            LiteralShape::Integer => is_signed_integer(text),
            LiteralShape::Float => is_number(text),
            LiteralShape::QuotedString => text.len() >= 2 && text.starts_with('"') && text.ends_with('"'),
            LiteralShape::Unsupported => false,
        }
    }
}

/// Optional sign followed by at least one decimal digit
fn is_signed_integer(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Decimal number `f64` accepts; rules out the `inf`/`nan` spellings,
/// which are identifiers here
fn is_number(text: &str) -> bool {
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    body.starts_with(|c: char| c.is_ascii_digit() || c == '.') && text.parse::<f64>().is_ok()
}

pub fn is_compatible(declared: &str, text: &str) -> bool {
    LiteralShape::for_type(declared).accepts(text)
}

/// Record a `TypeMismatch` when `text` does not fit `declared`.
/// Returns whether the pair was compatible.
pub fn check(diagnostics: &mut Diagnostics, declared: &str, text: &str, span: Span) -> bool {
    let compatible = is_compatible(declared, text);
    if !compatible {
        diagnostics.record_at(
            ErrorKind::TypeMismatch,
            format!("type '{}' is not compatible with value '{}'", declared, text),
            span,
        );
    }
    compatible
}
