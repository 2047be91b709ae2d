//! Parsing a host node's value with its schema type's language.

use std::sync::Arc;

use rowan::GreenNode;
use text_size::{TextRange, TextSize};
use tracing::{trace, warn};

use super::error::SchemaError;
use super::schema::SchemaType;
use crate::base::{AstNode, EmbeddedText, HostNode};
use crate::xpath::{SyntaxNode, TemplateRegion, ValueTemplate};

/// A successfully parsed embedded value.
///
/// The tree's ranges are relative to the decoded value text; use
/// [`EmbeddedTree::to_host`] to map them into the host document.
#[derive(Debug, Clone)]
pub struct EmbeddedTree {
    schema_type: Arc<SchemaType>,
    green: GreenNode,
    text: EmbeddedText,
    host_range: TextRange,
}

impl EmbeddedTree {
    pub fn schema_type(&self) -> &Arc<SchemaType> {
        &self.schema_type
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// A fresh cursor over the embedded tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// The text the embedded parser saw
    pub fn text(&self) -> &EmbeddedText {
        &self.text
    }

    /// Host offset of the start of the embedded text
    pub fn offset(&self) -> TextSize {
        self.text.start()
    }

    /// Range of the host node the value came from
    pub fn host_range(&self) -> TextRange {
        self.host_range
    }

    pub fn to_host(&self, range: TextRange) -> TextRange {
        self.text.range_to_host(range)
    }

    /// Map a host offset into the embedded tree, if it falls inside it.
    pub fn from_host(&self, offset: TextSize) -> Option<TextSize> {
        self.text.from_host(offset)
    }

    /// Value template regions in host coordinates. Empty for other
    /// languages.
    pub fn regions(&self) -> Vec<TemplateRegion> {
        let Some(template) = ValueTemplate::cast(self.syntax()) else {
            return Vec::new();
        };
        template
            .regions()
            .into_iter()
            .map(|region| TemplateRegion {
                range: self.to_host(region.range),
                ..region
            })
            .collect()
    }
}

/// Parse the value of `node` as `schema_type`.
///
/// The language is resolved first; if that fails nothing is parsed. Any
/// parse diagnostic makes the whole value an error, with the diagnostics
/// mapped into host coordinates.
pub fn parse_embedded<N: HostNode>(
    node: &N,
    schema_type: &Arc<SchemaType>,
) -> Result<EmbeddedTree, SchemaError> {
    let language = schema_type.embedded_language();
    let parser = language.resolve().map_err(|reason| {
        warn!(
            identifier = schema_type.identifier(),
            language = language.name(),
            "cannot parse embedded value"
        );
        SchemaError::unresolved(schema_type.identifier(), language.name(), reason)
    })?;

    let text = node.embedded_text();
    trace!(
        identifier = schema_type.identifier(),
        language = parser.name(),
        offset = u32::from(text.start()),
        "parsing embedded value"
    );
    let parse = parser.parse(text.text());

    if !parse.errors.is_empty() {
        let diagnostics = parse
            .errors
            .into_iter()
            .map(|error| error.map_ranges(|range| text.range_to_host(range)))
            .collect();
        return Err(SchemaError::EmbeddedParseError {
            identifier: schema_type.identifier().into(),
            range: node.text_range(),
            diagnostics,
        });
    }

    Ok(EmbeddedTree {
        schema_type: schema_type.clone(),
        green: parse.green,
        text,
        host_range: node.text_range(),
    })
}
