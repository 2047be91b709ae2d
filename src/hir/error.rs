//! Error types for schema dispatch and item classification.

use smol_str::SmolStr;
use text_size::TextRange;
use thiserror::Error;

use crate::parser::SyntaxError;

/// Errors raised while registering schema types or parsing embedded content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A schema type identifier was registered twice.
    #[error("Duplicate schema type: {0}")]
    DuplicateSchemaType(SmolStr),

    /// The embedded language behind a schema type could not be loaded.
    #[error("Unresolved language '{language}' for schema type {identifier}: {reason}")]
    UnresolvedLanguage {
        identifier: SmolStr,
        language: SmolStr,
        reason: String,
    },

    /// The embedded parser rejected the content. Diagnostics are in host
    /// coordinates.
    #[error("Invalid {identifier} at {range:?}: {} error(s)", .diagnostics.len())]
    EmbeddedParseError {
        identifier: SmolStr,
        range: TextRange,
        diagnostics: Vec<SyntaxError>,
    },
}

impl SchemaError {
    /// Create an unresolved-language error.
    pub fn unresolved(
        identifier: impl Into<SmolStr>,
        language: impl Into<SmolStr>,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnresolvedLanguage {
            identifier: identifier.into(),
            language: language.into(),
            reason: reason.into(),
        }
    }

    /// Diagnostics carried by the error, if any.
    pub fn diagnostics(&self) -> &[SyntaxError] {
        match self {
            Self::EmbeddedParseError { diagnostics, .. } => diagnostics,
            _ => &[],
        }
    }
}

/// Errors raised while building an item classifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    /// Two rules were given for the same node kind.
    #[error("Duplicate item rule for node kind {0}")]
    DuplicateItemKind(String),
}
