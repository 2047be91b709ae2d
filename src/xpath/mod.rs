//! Rowan-based lossless parsers for the micro-languages embedded in XSLT
//!
//! Value templates, XPath expressions and patterns, sequence types and the
//! whitespace separated schema lists all share one token set and one tree
//! language ([`XPathLanguage`]); each language has its own root node kind
//! and entry point.
//!
//! ## Architecture
//!
//! ```text
//! Embedded text (attribute value or text node)
//!     ↓
//! Lexer (logos) → XPath tokens, or template runs + XPath tokens
//!     ↓
//! Parser → GreenNode tree, SyntaxErrors relative to the embedded text
//!     ↓
//! AST layer → VarRef, Binding, ValueTemplate::regions(), ...
//! ```

pub mod ast;
mod language;
mod lexer;
mod parser;
mod syntax_kind;

pub use ast::*;
pub use language::{EmbeddedParser, SchemaLanguage};
pub use lexer::{Lexer, Token, tokenize, tokenize_value_template};
pub use parser::{
    Parse, parse_eqnames_or_hashed_keywords, parse_expression, parse_item_type, parse_name_tests,
    parse_pattern, parse_sequence_type, parse_tokens, parse_value_template,
};
pub use syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, XPathLanguage};
