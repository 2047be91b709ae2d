//! # xdm-base
//!
//! Core library for XDM item modeling over XML/XSLT documents, XSLT schema
//! types, and the XPath micro-languages embedded in attribute values and
//! text.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Document analysis (AnalysisHost, item_at, diagnostics)
//!   ↓
//! hir       → Item model, schema type registry, embedded dispatch
//!   ↓
//! xpath     → Embedded micro-language lexer, parser, typed AST
//!   ↓
//! parser    → XML host lexer, parser, typed AST, shared error types
//!   ↓
//! base      → Primitives (HostNode, NodePtr, TextRange, LineIndex)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → xpath → hir → ide)
// ============================================================================

/// Foundation types: HostNode, NodePtr, TextRange, LineIndex
pub mod base;

/// Host parser: logos lexer, recursive-descent XML parser, syntax errors
pub mod parser;

/// Embedded languages: value templates, expressions, patterns, types, lists
pub mod xpath;

/// High-level IR: XDM items, schema types, dispatch, XSLT inference
pub mod hir;

/// Analysis of whole documents
pub mod ide;

// Re-export foundation types
pub use base::{HostNode, LineIndex, NodePtr, Position, Span, TextRange, TextSize};
