//! Helpers for locating host nodes and building analysis hosts.

use std::sync::Arc;

use xdm::TextSize;
use xdm::hir::{AnalysisConfig, SchemaTypeRegistry};
use xdm::ide::AnalysisHost;
use xdm::parser::{SyntaxKind, SyntaxNode, parse_xml};

/// The `ATTRIBUTE_VALUE` node of the first attribute named `name`.
pub fn attribute_value(source: &str, name: &str) -> SyntaxNode {
    let root = parse_xml(source).syntax();
    root.descendants()
        .filter(|n| n.kind() == SyntaxKind::ATTRIBUTE)
        .find(|n| {
            n.children_with_tokens()
                .filter_map(|e| e.into_token())
                .any(|t| t.kind() == SyntaxKind::NAME && t.text() == name)
        })
        .and_then(|attr| attr.children().find(|n| n.kind() == SyntaxKind::ATTRIBUTE_VALUE))
        .unwrap_or_else(|| panic!("no attribute '{name}' in source"))
}

/// The first `TEXT` node containing `needle`.
pub fn text_node(source: &str, needle: &str) -> SyntaxNode {
    let root = parse_xml(source).syntax();
    root.descendants()
        .filter(|n| n.kind() == SyntaxKind::TEXT)
        .find(|n| n.text().to_string().contains(needle))
        .unwrap_or_else(|| panic!("no text containing '{needle}'"))
}

/// Offset of the first occurrence of `needle` in `source`.
pub fn offset_of(source: &str, needle: &str) -> TextSize {
    let offset = source
        .find(needle)
        .unwrap_or_else(|| panic!("'{needle}' not in source"));
    TextSize::new(offset as u32)
}

/// An analysis host holding one document.
pub fn host_with(path: &str, source: &str) -> AnalysisHost {
    let mut host = AnalysisHost::with_registry(
        Arc::new(SchemaTypeRegistry::xslt()),
        AnalysisConfig::default(),
    );
    host.set_document(path, source);
    host
}
