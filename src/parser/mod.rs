//! Rowan-based lossless parser for XML/XSLT host documents
//!
//! This module provides the bundled host tree using:
//! - **logos** for fast lexing (two morphing token sets)
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers, implements HostNode
//!     ↓
//! AST layer → Typed wrappers over SyntaxNode
//! ```
//!
//! The error types in [`errors`] are shared with the embedded-language
//! parsers in [`crate::xpath`].

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
pub mod errors;
mod lexer;
mod syntax_kind;

pub use ast::*;
pub use errors::{ErrorCode, RelatedInfo, SyntaxError};
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, parse_xml};
pub use syntax_kind::{
    SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeChildren, SyntaxToken, XmlLanguage,
};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
