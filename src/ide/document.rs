//! Per-document analysis: find every embedded value and parse it.

use std::sync::Arc;

use rayon::prelude::*;
use rowan::GreenNode;
use text_size::{TextRange, TextSize};
use tracing::debug;

use crate::base::LineIndex;
use crate::hir::{
    AnalysisConfig, EmbeddedTree, SchemaError, SchemaType, SchemaTypeRegistry, global_registry,
    parse_embedded, schema_type_for,
};
use crate::parser::{ErrorCode, SyntaxError, SyntaxKind, SyntaxNode, parse_xml};

/// One host node whose content is written in an embedded language.
#[derive(Debug, Clone)]
pub struct EmbeddedRegion {
    /// Range of the host node (attribute value or text)
    pub host_range: TextRange,
    pub schema_type: Arc<SchemaType>,
    /// The parsed tree, or why there is none
    pub tree: Result<EmbeddedTree, SchemaError>,
}

impl EmbeddedRegion {
    pub fn is_ok(&self) -> bool {
        self.tree.is_ok()
    }

    /// Diagnostics for this region, in host coordinates
    pub fn diagnostics(&self) -> Vec<SyntaxError> {
        match &self.tree {
            Ok(_) => Vec::new(),
            Err(SchemaError::EmbeddedParseError { diagnostics, .. }) => diagnostics.clone(),
            Err(err) => vec![SyntaxError::new(err.to_string(), self.host_range, ErrorCode::E0505)],
        }
    }
}

/// Everything known about one document.
///
/// Holds only green trees and owned data, so it can be built on one thread
/// and read on another.
#[derive(Debug, Clone)]
pub struct DocumentAnalysis {
    green: GreenNode,
    line_index: LineIndex,
    host_errors: Vec<SyntaxError>,
    regions: Vec<EmbeddedRegion>,
}

impl DocumentAnalysis {
    /// The host document tree
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Syntax errors of the host document itself
    pub fn host_errors(&self) -> &[SyntaxError] {
        &self.host_errors
    }

    /// Embedded regions in document order
    pub fn regions(&self) -> &[EmbeddedRegion] {
        &self.regions
    }

    /// The innermost embedded region containing `offset`
    pub fn region_at(&self, offset: TextSize) -> Option<&EmbeddedRegion> {
        self.regions
            .iter()
            .filter(|region| region.host_range.contains_inclusive(offset))
            .min_by_key(|region| region.host_range.len())
    }

    /// Host errors (when enabled) followed by embedded diagnostics, sorted
    /// by position
    pub fn diagnostics(&self, config: &AnalysisConfig) -> Vec<SyntaxError> {
        let mut diagnostics = Vec::new();
        if config.report_host_errors {
            diagnostics.extend(self.host_errors.iter().cloned());
        }
        for region in &self.regions {
            diagnostics.extend(region.diagnostics());
        }
        diagnostics.sort_by_key(|d| (d.range.start(), d.range.end()));
        diagnostics
    }
}

/// Parse `text` and every embedded value in it.
///
/// A malformed or unparseable value is recorded on its region; it never
/// stops the rest of the document from being analyzed.
pub fn analyze_document(
    text: &str,
    registry: &SchemaTypeRegistry,
    config: &AnalysisConfig,
) -> DocumentAnalysis {
    let parse = parse_xml(text);
    let root = parse.syntax();

    let regions: Vec<EmbeddedRegion> = root
        .descendants()
        .filter(|node| {
            matches!(
                node.kind(),
                SyntaxKind::ATTRIBUTE_VALUE | SyntaxKind::TEXT | SyntaxKind::CDATA
            )
        })
        .filter_map(|node| {
            let schema_type = schema_type_for(&node, registry, config)?;
            let tree = parse_embedded(&node, &schema_type);
            Some(EmbeddedRegion {
                host_range: node.text_range(),
                schema_type,
                tree,
            })
        })
        .collect();

    debug!(
        regions = regions.len(),
        malformed = regions.iter().filter(|r| !r.is_ok()).count(),
        host_errors = parse.errors.len(),
        "analyzed document"
    );

    DocumentAnalysis {
        green: parse.green,
        line_index: LineIndex::new(text),
        host_errors: parse.errors,
        regions,
    }
}

/// Analyze many `(path, text)` documents in parallel against the global
/// registry with default options. Results keep the input order.
pub fn analyze_documents(documents: &[(&str, &str)]) -> Vec<(String, DocumentAnalysis)> {
    analyze_documents_with(documents, global_registry(), &AnalysisConfig::default())
}

pub fn analyze_documents_with(
    documents: &[(&str, &str)],
    registry: &SchemaTypeRegistry,
    config: &AnalysisConfig,
) -> Vec<(String, DocumentAnalysis)> {
    documents
        .par_iter()
        .map(|(path, text)| (path.to_string(), analyze_document(text, registry, config)))
        .collect()
}
