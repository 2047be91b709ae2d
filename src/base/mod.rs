//! Foundation types for the xdm toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`HostNode`] - The capability set every host syntax tree must offer
//! - [`NodePtr`] - A weak, relocatable pointer to a node
//! - [`AstNode`] - Typed wrappers over rowan nodes
//! - [`EmbeddedText`] - Decoded embedded content mapped back to the host
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineIndex`], [`Position`], [`Span`] - Line/column conversion
//! - XML name helpers (NCName / QName checks)
//!
//! This module has NO dependencies on other xdm modules.

mod embedded_text;
mod node;
mod position;
pub mod text_utils;

pub use embedded_text::EmbeddedText;
pub use node::{AstNode, HostLanguage, HostNode, NodePtr};
pub use position::{LineIndex, Position, Span};
pub use text_size::{TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
