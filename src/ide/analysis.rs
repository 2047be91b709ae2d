//! AnalysisHost and Analysis: state management for document queries.
//!
//! The `AnalysisHost` owns the documents and their analyses and hands out
//! `Analysis` snapshots for querying. Changed documents are re-analyzed
//! (in parallel) when the next snapshot is taken.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//! host.set_document("main.xsl", text);
//!
//! let analysis = host.analysis();
//! let diagnostics = analysis.diagnostics("main.xsl");
//! let item = analysis.item_at("main.xsl", offset);
//! ```

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use rowan::TokenAtOffset;
use text_size::{TextRange, TextSize};
use tracing::debug;

use super::document::{DocumentAnalysis, EmbeddedRegion, analyze_document};
use crate::base::Position;
use crate::hir::{
    AnalysisConfig, EmbeddedTree, Item, ItemCategory, SchemaTypeRegistry, global_registry,
    xml_item_classifier, xpath_item_classifier,
};
use crate::parser::{SyntaxError, SyntaxNode as XmlNode};
use crate::xpath::SyntaxNode as XPathNode;

/// The item found at an offset, in the host tree or an embedded one.
#[derive(Debug, Clone)]
pub enum ItemAt {
    Host(Item<XmlNode>),
    Embedded {
        tree: EmbeddedTree,
        item: Item<XPathNode>,
    },
}

impl ItemAt {
    pub fn category(&self) -> ItemCategory {
        match self {
            Self::Host(item) => item.category(),
            Self::Embedded { item, .. } => item.category(),
        }
    }

    /// Range of the item in host coordinates
    pub fn host_range(&self) -> Option<TextRange> {
        match self {
            Self::Host(item) => item.range(),
            Self::Embedded { tree, item } => item.range().map(|range| tree.to_host(range)),
        }
    }
}

/// Owns all mutable state for analysis.
///
/// Apply changes via `set_document()` and `remove_document()`,
/// then get a consistent snapshot via `analysis()`.
pub struct AnalysisHost {
    /// Source text of each document
    sources: HashMap<PathBuf, Arc<str>>,
    /// Analyses, current for every document not in `dirty`
    documents: HashMap<PathBuf, DocumentAnalysis>,
    dirty: HashSet<PathBuf>,
    registry: Arc<SchemaTypeRegistry>,
    config: AnalysisConfig,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisHost {
    /// A host using the global registry and default options.
    pub fn new() -> Self {
        Self::with_registry(Arc::new(global_registry().clone()), AnalysisConfig::default())
    }

    pub fn with_registry(registry: Arc<SchemaTypeRegistry>, config: AnalysisConfig) -> Self {
        Self {
            sources: HashMap::new(),
            documents: HashMap::new(),
            dirty: HashSet::new(),
            registry,
            config,
        }
    }

    /// Add or replace a document.
    pub fn set_document(&mut self, path: impl Into<PathBuf>, text: impl Into<Arc<str>>) {
        let path = path.into();
        self.sources.insert(path.clone(), text.into());
        self.dirty.insert(path);
    }

    pub fn remove_document(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.sources.remove(path);
        self.documents.remove(path);
        self.dirty.remove(path);
    }

    pub fn has_document(&self, path: impl AsRef<Path>) -> bool {
        self.sources.contains_key(path.as_ref())
    }

    pub fn document_count(&self) -> usize {
        self.sources.len()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Change the options. Every document is re-analyzed on the next
    /// snapshot.
    pub fn set_config(&mut self, config: AnalysisConfig) {
        self.config = config;
        self.dirty.extend(self.sources.keys().cloned());
    }

    /// Re-analyze changed documents.
    ///
    /// This is called automatically by `analysis()`.
    pub fn refresh(&mut self) {
        if self.dirty.is_empty() {
            return;
        }
        let pending: Vec<(PathBuf, Arc<str>)> = self
            .dirty
            .drain()
            .filter_map(|path| {
                let text = self.sources.get(&path)?.clone();
                Some((path, text))
            })
            .collect();
        debug!(documents = pending.len(), "re-analyzing documents");

        let registry = &self.registry;
        let config = &self.config;
        let analyzed: Vec<(PathBuf, DocumentAnalysis)> = pending
            .into_par_iter()
            .map(|(path, text)| {
                let analysis = analyze_document(&text, registry, config);
                (path, analysis)
            })
            .collect();
        self.documents.extend(analyzed);
    }

    /// Get a consistent snapshot for querying.
    pub fn analysis(&mut self) -> Analysis<'_> {
        self.refresh();
        Analysis {
            documents: &self.documents,
            config: &self.config,
        }
    }
}

/// A read-only snapshot of the analyzed documents.
#[derive(Clone, Copy)]
pub struct Analysis<'a> {
    documents: &'a HashMap<PathBuf, DocumentAnalysis>,
    config: &'a AnalysisConfig,
}

impl<'a> Analysis<'a> {
    pub fn document(&self, path: impl AsRef<Path>) -> Option<&'a DocumentAnalysis> {
        self.documents.get(path.as_ref())
    }

    /// Paths of all documents, sorted
    pub fn paths(&self) -> Vec<&'a Path> {
        let mut paths: Vec<_> = self.documents.keys().map(PathBuf::as_path).collect();
        paths.sort();
        paths
    }

    /// Embedded regions of a document, in document order. Empty for an
    /// unknown document.
    pub fn embedded_regions(&self, path: impl AsRef<Path>) -> &'a [EmbeddedRegion] {
        self.document(path)
            .map(DocumentAnalysis::regions)
            .unwrap_or_default()
    }

    /// All diagnostics of a document, in host coordinates.
    pub fn diagnostics(&self, path: impl AsRef<Path>) -> Vec<SyntaxError> {
        self.document(path)
            .map(|doc| doc.diagnostics(self.config))
            .unwrap_or_default()
    }

    /// The innermost item at `offset`.
    ///
    /// Inside a successfully parsed embedded region the embedded tree is
    /// searched first; the host tree is the fallback.
    pub fn item_at(&self, path: impl AsRef<Path>, offset: TextSize) -> Option<ItemAt> {
        let doc = self.document(path)?;

        let embedded = doc
            .region_at(offset)
            .and_then(|region| region.tree.as_ref().ok())
            .and_then(|tree| embedded_item_at(tree, offset));
        if embedded.is_some() {
            return embedded;
        }

        let root = doc.syntax();
        let node = node_at(&root, offset)?;
        node.ancestors()
            .find_map(|n| xml_item_classifier().classify(&n))
            .map(ItemAt::Host)
    }

    /// Like [`Analysis::item_at`], at a line/column position.
    pub fn item_at_position(&self, path: impl AsRef<Path>, position: Position) -> Option<ItemAt> {
        let path = path.as_ref();
        let offset = self.document(path)?.line_index().offset(position)?;
        self.item_at(path, offset)
    }
}

fn embedded_item_at(tree: &EmbeddedTree, offset: TextSize) -> Option<ItemAt> {
    let local = tree.from_host(offset)?;
    let root = tree.syntax();
    let start = match root.token_at_offset(local) {
        TokenAtOffset::None => return None,
        TokenAtOffset::Single(token) => token,
        // Prefer the token the offset is at the start of
        TokenAtOffset::Between(_, right) => right,
    };
    start
        .parent_ancestors()
        .find_map(|n| xpath_item_classifier().classify(&n))
        .map(|item| ItemAt::Embedded {
            tree: tree.clone(),
            item,
        })
}

fn node_at(root: &XmlNode, offset: TextSize) -> Option<XmlNode> {
    match root.token_at_offset(offset) {
        TokenAtOffset::None => None,
        TokenAtOffset::Single(token) | TokenAtOffset::Between(_, token) => token.parent(),
    }
}
