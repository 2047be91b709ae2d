//! XDM item model over host syntax nodes.
//!
//! An [`Item`] is what a syntax node denotes in the XPath data model: an
//! atomic value, the node itself, a function, an array, a map, or a
//! reference to another node (a variable reference pointing at its
//! binding, for example).

use std::fmt;

use smol_str::SmolStr;
use text_size::TextRange;

use crate::base::{HostNode, NodePtr};

/// Built-in atomic types produced by literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AtomicType {
    String,
    Integer,
    Decimal,
    Double,
    Boolean,
    UntypedAtomic,
    AnyUri,
    QName,
}

impl AtomicType {
    /// The `xs:` name of the type
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "xs:string",
            Self::Integer => "xs:integer",
            Self::Decimal => "xs:decimal",
            Self::Double => "xs:double",
            Self::Boolean => "xs:boolean",
            Self::UntypedAtomic => "xs:untypedAtomic",
            Self::AnyUri => "xs:anyURI",
            Self::QName => "xs:QName",
        }
    }
}

impl fmt::Display for AtomicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An atomic value, kept in its lexical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AtomicValue {
    pub ty: AtomicType,
    /// The value as written in the source
    pub lexical: SmolStr,
    pub range: Option<TextRange>,
}

impl AtomicValue {
    pub fn new(ty: AtomicType, lexical: impl Into<SmolStr>) -> Self {
        Self {
            ty,
            lexical: lexical.into(),
            range: None,
        }
    }

    pub fn with_range(mut self, range: TextRange) -> Self {
        self.range = Some(range);
        self
    }
}

/// A function item: a named function reference or an inline function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FunctionItem {
    /// `None` for anonymous functions
    pub name: Option<SmolStr>,
    pub arity: usize,
    pub range: Option<TextRange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArrayItem {
    pub members: usize,
    pub range: Option<TextRange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MapItem {
    pub entries: usize,
    pub range: Option<TextRange>,
}

/// A node that stands for another node in the same tree.
///
/// The target is held as a [`NodePtr`] and re-located on demand, so a
/// reference never keeps a stale node alive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef<N: HostNode> {
    source: N,
    target: NodePtr<N::Kind>,
}

impl<N: HostNode> ElementRef<N> {
    pub fn new(source: N, target: &N) -> Self {
        Self {
            source,
            target: NodePtr::new(target),
        }
    }

    /// The referring node
    pub fn source(&self) -> &N {
        &self.source
    }

    pub fn target_ptr(&self) -> NodePtr<N::Kind> {
        self.target
    }

    /// The referenced node, looked up in the source's tree.
    pub fn target(&self) -> Option<N> {
        self.target.resolve(&self.source.root())
    }
}

/// What a syntax node denotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Item<N: HostNode> {
    Atomic(AtomicValue),
    Node(N),
    Function(FunctionItem),
    Array(ArrayItem),
    Map(MapItem),
    ElementReference(ElementRef<N>),
}

/// The variant of an [`Item`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemCategory {
    Atomic,
    Node,
    Function,
    Array,
    Map,
    ElementReference,
}

impl<N: HostNode> Item<N> {
    pub fn category(&self) -> ItemCategory {
        match self {
            Self::Atomic(_) => ItemCategory::Atomic,
            Self::Node(_) => ItemCategory::Node,
            Self::Function(_) => ItemCategory::Function,
            Self::Array(_) => ItemCategory::Array,
            Self::Map(_) => ItemCategory::Map,
            Self::ElementReference(_) => ItemCategory::ElementReference,
        }
    }

    /// The element this item stands for. See [`element_of`].
    pub fn element(&self) -> Option<N> {
        element_of(self)
    }

    /// Source range of the item, when it has one
    pub fn range(&self) -> Option<TextRange> {
        match self {
            Self::Atomic(value) => value.range,
            Self::Node(node) => Some(node.text_range()),
            Self::Function(function) => function.range,
            Self::Array(array) => array.range,
            Self::Map(map) => map.range,
            Self::ElementReference(reference) => Some(reference.source().text_range()),
        }
    }
}

/// The node an item stands for.
///
/// Node items yield themselves; references yield their target, followed
/// one level only. Atomic values, functions, arrays and maps have none.
pub fn element_of<N: HostNode>(item: &Item<N>) -> Option<N> {
    match item {
        Item::Node(node) => Some(node.clone()),
        Item::ElementReference(reference) => reference.target(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{SyntaxKind, SyntaxNode, parse_xml};

    fn elements(root: &SyntaxNode) -> Vec<SyntaxNode> {
        root.descendants()
            .filter(|n| n.kind() == SyntaxKind::ELEMENT)
            .collect()
    }

    #[test]
    fn test_node_item_is_its_own_element() {
        let root = parse_xml("<a><b/></a>").syntax();
        let b = elements(&root)[1].clone();
        let item = Item::Node(b.clone());
        assert_eq!(item.category(), ItemCategory::Node);
        assert_eq!(item.element(), Some(b.clone()));
        assert_eq!(item.range(), Some(b.text_range()));
    }

    #[test]
    fn test_reference_resolves_one_level() {
        let root = parse_xml("<a><b/><c/></a>").syntax();
        let all = elements(&root);
        let (b, c) = (all[1].clone(), all[2].clone());

        let item = Item::ElementReference(ElementRef::new(b.clone(), &c));
        assert_eq!(item.category(), ItemCategory::ElementReference);
        assert_eq!(element_of(&item), Some(c));
        assert_eq!(item.range(), Some(b.text_range()));
    }

    #[test]
    fn test_values_have_no_element() {
        let item: Item<SyntaxNode> = Item::Atomic(AtomicValue::new(AtomicType::Integer, "42"));
        assert_eq!(item.category(), ItemCategory::Atomic);
        assert_eq!(item.element(), None);
        assert_eq!(item.range(), None);

        let item: Item<SyntaxNode> = Item::Map(MapItem {
            entries: 2,
            range: None,
        });
        assert_eq!(element_of(&item), None);
    }

    #[test]
    fn test_atomic_type_names() {
        assert_eq!(AtomicType::AnyUri.to_string(), "xs:anyURI");
        assert_eq!(AtomicType::UntypedAtomic.name(), "xs:untypedAtomic");
    }
}
