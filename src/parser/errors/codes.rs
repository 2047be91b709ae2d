//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (tags, braces, delimiters)
//! - E03xx: Name and attribute errors
//! - E04xx: Expression errors
//! - E05xx: Schema type errors
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for parser diagnostics
///
/// Codes are stable across releases so diagnostics can be filtered by
/// code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors (invalid tokens)
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated string literal
    E0102,
    /// Unterminated comment, CDATA section or processing instruction
    E0103,

    // =========================================================================
    // E02xx: Structural errors (tags, braces, delimiters)
    // =========================================================================
    /// Unclosed tag (missing `>`)
    E0201,
    /// Unclosed brace `{`
    E0202,
    /// Unclosed parenthesis `(`
    E0203,
    /// Unclosed bracket `[`
    E0204,
    /// Unexpected closing delimiter
    E0205,
    /// End tag does not match start tag
    E0206,
    /// Element is never closed
    E0207,
    /// Content after the document element
    E0208,

    // =========================================================================
    // E03xx: Name and attribute errors
    // =========================================================================
    /// Missing name
    E0301,
    /// Missing attribute value
    E0302,
    /// Duplicate attribute
    E0303,

    // =========================================================================
    // E04xx: Expression errors
    // =========================================================================
    /// Missing operand in expression
    E0402,
    /// Unexpected tokens after a complete expression
    E0403,
    /// Unclosed function call
    E0404,
    /// Missing keyword (`return`, `then`, `else`, `in`, `satisfies`, ...)
    E0405,
    /// Missing expression where expected
    E0406,

    // =========================================================================
    // E05xx: Schema type errors
    // =========================================================================
    /// Comment in a schema type that does not allow comments
    E0501,
    /// Expected a sequence type
    E0502,
    /// Invalid hashed keyword
    E0503,
    /// Expected a name or name test
    E0504,
    /// The embedded language of a schema type is unavailable
    E0505,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token in current context
    E0901,
    /// Expected a specific token
    E0902,
    /// Internal parser error
    E0999,
}

impl ErrorCode {
    /// Short name of the code's category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 | Self::E0103 => "lexical error",
            Self::E0201
            | Self::E0202
            | Self::E0203
            | Self::E0204
            | Self::E0205
            | Self::E0206
            | Self::E0207
            | Self::E0208 => "structural error",
            Self::E0301 | Self::E0302 | Self::E0303 => "name error",
            Self::E0402 | Self::E0403 | Self::E0404 | Self::E0405 | Self::E0406 => {
                "expression error"
            }
            Self::E0501 | Self::E0502 | Self::E0503 | Self::E0504 | Self::E0505 => {
                "schema type error"
            }
            Self::E0901 | Self::E0902 | Self::E0999 => "syntax error",
        }
    }

    /// Message used when an error is built without one
    pub fn default_message(&self) -> &'static str {
        match self {
            // Lexical
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string literal",
            Self::E0103 => "unterminated comment",
            // Structural
            Self::E0201 => "unclosed tag",
            Self::E0202 => "unclosed brace",
            Self::E0203 => "unclosed parenthesis",
            Self::E0204 => "unclosed bracket",
            Self::E0205 => "unexpected closing delimiter",
            Self::E0206 => "mismatched end tag",
            Self::E0207 => "unclosed element",
            Self::E0208 => "content after document element",
            // Names
            Self::E0301 => "missing name",
            Self::E0302 => "missing attribute value",
            Self::E0303 => "duplicate attribute",
            // Expression
            Self::E0402 => "missing operand",
            Self::E0403 => "unexpected tokens after expression",
            Self::E0404 => "unclosed function call",
            Self::E0405 => "missing keyword",
            Self::E0406 => "expected expression",
            // Schema types
            Self::E0501 => "comment not allowed in schema type",
            Self::E0502 => "expected sequence type",
            Self::E0503 => "invalid hashed keyword",
            Self::E0504 => "expected name test",
            Self::E0505 => "embedded language unavailable",
            // Generic
            Self::E0901 => "unexpected token",
            Self::E0902 => "expected token",
            Self::E0999 => "internal parser error",
        }
    }

    /// Tags and delimiters
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::E0201
                | Self::E0202
                | Self::E0203
                | Self::E0204
                | Self::E0205
                | Self::E0206
                | Self::E0207
                | Self::E0208
        )
    }

    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::E0999)
    }
}

/// Prints the code itself, e.g. `E0202`.
impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
