//! The host syntax tree capability set.
//!
//! Everything above `base` talks to syntax trees only through [`HostNode`],
//! so any tree implementation (the bundled rowan trees, or a host IDE's own
//! tree) can be classified and dispatched without inheritance.

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Range;

use text_size::TextRange;

use super::EmbeddedText;

/// Minimal capability interface of a syntax node.
///
/// Node handles are expected to be cheap to clone and to compare by
/// identity (same node in the same tree), as rowan cursor nodes do.
pub trait HostNode: Clone + Eq + Hash + Debug {
    /// Structural kind tag of the node.
    type Kind: Copy + Eq + Hash + Debug;

    fn kind(&self) -> Self::Kind;

    fn parent(&self) -> Option<Self>;

    /// Child nodes in source order (tokens are not nodes).
    fn children(&self) -> Vec<Self>;

    fn text_range(&self) -> TextRange;

    /// Full source text covered by this node.
    fn text(&self) -> String;

    /// The part of the node that carries embedded content.
    ///
    /// Defaults to the whole node. An attribute value, for example, narrows
    /// this to the text between its quotes.
    fn value_range(&self) -> TextRange {
        self.text_range()
    }

    /// Source text of [`HostNode::value_range`].
    fn value_text(&self) -> String {
        let range = self.text_range();
        let text = self.text();
        self.value_range()
            .checked_sub(range.start())
            .and_then(|relative| text.get(Range::<usize>::from(relative)))
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// The embedded content as an embedded parser should see it.
    ///
    /// Defaults to [`HostNode::value_text`] taken verbatim.
    fn embedded_text(&self) -> EmbeddedText {
        EmbeddedText::verbatim(self.value_text(), self.value_range().start())
    }

    /// This node followed by its parents, innermost first.
    fn ancestors(&self) -> impl Iterator<Item = Self> {
        std::iter::successors(Some(self.clone()), |node| node.parent())
    }

    fn root(&self) -> Self {
        let mut node = self.clone();
        while let Some(parent) = node.parent() {
            node = parent;
        }
        node
    }
}

/// A weak pointer to a node: its kind and range.
///
/// Holding a `NodePtr` keeps nothing alive. [`NodePtr::resolve`] walks down
/// from a root and only ever returns nodes that exist in that tree, so a
/// pointer into an edited tree resolves to `None` rather than to a
/// fabricated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodePtr<K> {
    kind: K,
    range: TextRange,
}

impl<K: Copy + Eq + Hash + Debug> NodePtr<K> {
    pub fn new<N: HostNode<Kind = K>>(node: &N) -> Self {
        Self {
            kind: node.kind(),
            range: node.text_range(),
        }
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Locate the pointed-to node under `root`.
    pub fn resolve<N: HostNode<Kind = K>>(&self, root: &N) -> Option<N> {
        let mut node = root.clone();
        loop {
            if node.kind() == self.kind && node.text_range() == self.range {
                return Some(node);
            }
            node = node
                .children()
                .into_iter()
                .find(|child| child.text_range().contains_range(self.range))?;
        }
    }
}

/// A rowan language whose nodes can act as host nodes.
pub trait HostLanguage: rowan::Language {
    /// See [`HostNode::value_range`].
    fn value_range(node: &rowan::SyntaxNode<Self>) -> TextRange {
        node.text_range()
    }

    /// See [`HostNode::embedded_text`].
    fn embedded_text(node: &rowan::SyntaxNode<Self>) -> EmbeddedText {
        EmbeddedText::verbatim(HostNode::value_text(node), Self::value_range(node).start())
    }
}

impl<L: HostLanguage> HostNode for rowan::SyntaxNode<L> {
    type Kind = L::Kind;

    fn kind(&self) -> Self::Kind {
        rowan::SyntaxNode::kind(self)
    }

    fn parent(&self) -> Option<Self> {
        rowan::SyntaxNode::parent(self)
    }

    fn children(&self) -> Vec<Self> {
        rowan::SyntaxNode::children(self).collect()
    }

    fn text_range(&self) -> TextRange {
        rowan::SyntaxNode::text_range(self)
    }

    fn text(&self) -> String {
        rowan::SyntaxNode::text(self).to_string()
    }

    fn value_range(&self) -> TextRange {
        L::value_range(self)
    }

    fn embedded_text(&self) -> EmbeddedText {
        L::embedded_text(self)
    }
}

/// Typed wrapper over a rowan syntax node of one kind (or a few kinds).
pub trait AstNode: Sized {
    type Language: rowan::Language;

    fn can_cast(kind: <Self::Language as rowan::Language>::Kind) -> bool;
    fn cast(node: rowan::SyntaxNode<Self::Language>) -> Option<Self>;
    fn syntax(&self) -> &rowan::SyntaxNode<Self::Language>;
}
