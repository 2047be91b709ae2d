//! Node-kind driven item classification.
//!
//! An [`ItemClassifier`] is a table from node kind to [`ItemRule`]. Kinds
//! without a rule denote no item. The table is fixed once built, so a
//! classifier can be shared across threads and classification is a pure
//! function of the node.

use std::fmt;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::trace;

use super::error::ClassifierError;
use super::item::{ArrayItem, AtomicType, AtomicValue, ElementRef, FunctionItem, Item, MapItem};
use crate::base::{AstNode, HostNode};
use crate::parser::{SyntaxKind as XmlKind, SyntaxNode as XmlNode};
use crate::xpath::{
    Binding, CurlyArrayConstructor, InlineFunctionExpr, MapConstructor, NamedFunctionRef,
    SquareArrayConstructor, SyntaxKind as XPathKind, SyntaxNode as XPathNode, VarRef,
};

/// How nodes of one kind become items.
pub enum ItemRule<N: HostNode> {
    /// The node itself is the item.
    Node,
    /// A literal of the given type; the lexical form is the node text.
    Atomic(AtomicType),
    Function(fn(&N) -> FunctionItem),
    /// Array constructor; the function counts members.
    Array(fn(&N) -> usize),
    /// Map constructor; the function counts entries.
    Map(fn(&N) -> usize),
    /// The node refers to another node, located by the function.
    Reference(fn(&N) -> Option<N>),
}

impl<N: HostNode> Clone for ItemRule<N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: HostNode> Copy for ItemRule<N> {}

impl<N: HostNode> fmt::Debug for ItemRule<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node => f.write_str("Node"),
            Self::Atomic(ty) => f.debug_tuple("Atomic").field(ty).finish(),
            Self::Function(_) => f.write_str("Function"),
            Self::Array(_) => f.write_str("Array"),
            Self::Map(_) => f.write_str("Map"),
            Self::Reference(_) => f.write_str("Reference"),
        }
    }
}

/// Maps syntax nodes to XDM items.
pub struct ItemClassifier<N: HostNode> {
    rules: FxHashMap<N::Kind, ItemRule<N>>,
}

impl<N: HostNode> fmt::Debug for ItemClassifier<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemClassifier")
            .field("rules", &self.rules)
            .finish()
    }
}

impl<N: HostNode> ItemClassifier<N> {
    pub fn builder() -> ItemClassifierBuilder<N> {
        ItemClassifierBuilder::default()
    }

    /// The item `node` denotes, or `None` if its kind has no rule.
    ///
    /// A reference whose target cannot be found denotes no item.
    pub fn classify(&self, node: &N) -> Option<Item<N>> {
        let kind = node.kind();
        let rule = self.rules.get(&kind)?;
        let range = Some(node.text_range());
        trace!(?kind, ?rule, "classifying node");

        let item = match *rule {
            ItemRule::Node => Item::Node(node.clone()),
            ItemRule::Atomic(ty) => Item::Atomic(AtomicValue {
                ty,
                lexical: SmolStr::new(node.text()),
                range,
            }),
            ItemRule::Function(describe) => Item::Function(describe(node)),
            ItemRule::Array(count) => Item::Array(ArrayItem {
                members: count(node),
                range,
            }),
            ItemRule::Map(count) => Item::Map(MapItem {
                entries: count(node),
                range,
            }),
            ItemRule::Reference(resolve) => {
                let Some(target) = resolve(node) else {
                    trace!(?kind, "reference target not found");
                    return None;
                };
                Item::ElementReference(ElementRef::new(node.clone(), &target))
            }
        };
        Some(item)
    }

    /// Whether nodes of `kind` denote items.
    pub fn handles(&self, kind: N::Kind) -> bool {
        self.rules.contains_key(&kind)
    }

    pub fn rule(&self, kind: N::Kind) -> Option<ItemRule<N>> {
        self.rules.get(&kind).copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Collects rules and checks them for conflicts.
pub struct ItemClassifierBuilder<N: HostNode> {
    rules: Vec<(N::Kind, ItemRule<N>)>,
}

impl<N: HostNode> Default for ItemClassifierBuilder<N> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<N: HostNode> ItemClassifierBuilder<N> {
    pub fn rule(mut self, kind: N::Kind, rule: ItemRule<N>) -> Self {
        self.rules.push((kind, rule));
        self
    }

    pub fn rules(mut self, table: &[(N::Kind, ItemRule<N>)]) -> Self {
        self.rules.extend_from_slice(table);
        self
    }

    /// Build the classifier. Each kind may have one rule only.
    pub fn build(self) -> Result<ItemClassifier<N>, ClassifierError> {
        let mut rules = FxHashMap::default();
        for (kind, rule) in self.rules {
            if rules.insert(kind, rule).is_some() {
                return Err(ClassifierError::DuplicateItemKind(format!("{kind:?}")));
            }
        }
        Ok(ItemClassifier { rules })
    }
}

// =============================================================================
// Stock classifiers
// =============================================================================

const XML_RULES: &[(XmlKind, ItemRule<XmlNode>)] = &[
    (XmlKind::DOCUMENT, ItemRule::Node),
    (XmlKind::ELEMENT, ItemRule::Node),
    (XmlKind::ATTRIBUTE, ItemRule::Node),
    (XmlKind::TEXT, ItemRule::Node),
    (XmlKind::CDATA, ItemRule::Node),
    (XmlKind::COMMENT, ItemRule::Node),
    (XmlKind::PROCESSING_INSTRUCTION, ItemRule::Node),
];

const XPATH_RULES: &[(XPathKind, ItemRule<XPathNode>)] = &[
    (XPathKind::STRING_LITERAL, ItemRule::Atomic(AtomicType::String)),
    (XPathKind::INTEGER_LITERAL, ItemRule::Atomic(AtomicType::Integer)),
    (XPathKind::DECIMAL_LITERAL, ItemRule::Atomic(AtomicType::Decimal)),
    (XPathKind::DOUBLE_LITERAL, ItemRule::Atomic(AtomicType::Double)),
    (XPathKind::NAMED_FUNCTION_REF, ItemRule::Function(named_function)),
    (XPathKind::INLINE_FUNCTION_EXPR, ItemRule::Function(inline_function)),
    (XPathKind::SQUARE_ARRAY_CONSTRUCTOR, ItemRule::Array(square_array_members)),
    (XPathKind::CURLY_ARRAY_CONSTRUCTOR, ItemRule::Array(curly_array_members)),
    (XPathKind::MAP_CONSTRUCTOR, ItemRule::Map(map_entries)),
    (XPathKind::VAR_REF, ItemRule::Reference(variable_binding)),
];

static XML_CLASSIFIER: LazyLock<ItemClassifier<XmlNode>> =
    LazyLock::new(|| stock_classifier(XML_RULES));

static XPATH_CLASSIFIER: LazyLock<ItemClassifier<XPathNode>> =
    LazyLock::new(|| stock_classifier(XPATH_RULES));

/// A built-in rule table is static data; a conflict in it is a bug.
fn stock_classifier<N: HostNode>(table: &[(N::Kind, ItemRule<N>)]) -> ItemClassifier<N> {
    match ItemClassifier::builder().rules(table).build() {
        Ok(classifier) => classifier,
        Err(err) => panic!("invalid stock item rules: {err}"),
    }
}

/// Host XML nodes (document, elements, attributes, text and the like)
/// denote themselves.
pub fn xml_item_classifier() -> &'static ItemClassifier<XmlNode> {
    &XML_CLASSIFIER
}

/// Embedded XPath constructs: literals, function items, arrays, maps, and
/// variable references pointing at their bindings.
pub fn xpath_item_classifier() -> &'static ItemClassifier<XPathNode> {
    &XPATH_CLASSIFIER
}

fn named_function(node: &XPathNode) -> FunctionItem {
    let function = NamedFunctionRef::cast(node.clone());
    FunctionItem {
        name: function.as_ref().and_then(|f| f.name()).map(SmolStr::from),
        arity: function.and_then(|f| f.arity()).unwrap_or(0),
        range: Some(node.text_range()),
    }
}

fn inline_function(node: &XPathNode) -> FunctionItem {
    FunctionItem {
        name: None,
        arity: InlineFunctionExpr::cast(node.clone()).map_or(0, |f| f.arity()),
        range: Some(node.text_range()),
    }
}

fn square_array_members(node: &XPathNode) -> usize {
    SquareArrayConstructor::cast(node.clone()).map_or(0, |a| a.member_count())
}

fn curly_array_members(node: &XPathNode) -> usize {
    CurlyArrayConstructor::cast(node.clone()).map_or(0, |a| a.member_count())
}

fn map_entries(node: &XPathNode) -> usize {
    MapConstructor::cast(node.clone()).map_or(0, |m| m.entry_count())
}

/// The binding a variable reference refers to.
///
/// Scopes are searched innermost first. Within a `for`/`let`/quantified
/// expression a binding is visible to the bindings after it and to the
/// body, but not to its own value; the last matching binding wins, so an
/// inner `$x` shadows an outer one. Inline function parameters are
/// visible in the function body.
fn variable_binding(node: &XPathNode) -> Option<XPathNode> {
    let name = VarRef::cast(node.clone())?.name()?;
    let mut child = node.clone();

    for scope in node.ancestors().skip(1) {
        let found = match scope.kind() {
            XPathKind::FOR_EXPR | XPathKind::LET_EXPR | XPathKind::QUANTIFIED_EXPR => scope
                .children()
                .take_while(|n| *n != child)
                .filter_map(Binding::cast)
                .filter(|b| b.name().as_deref() == Some(name.as_str()))
                .last(),
            XPathKind::INLINE_FUNCTION_EXPR if child.kind() == XPathKind::FUNCTION_BODY => {
                InlineFunctionExpr::cast(scope.clone()).and_then(|f| {
                    f.params()
                        .filter(|p| p.name().as_deref() == Some(name.as_str()))
                        .last()
                })
            }
            _ => None,
        };
        if let Some(binding) = found {
            return Some(binding.syntax().clone());
        }
        child = scope;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::ItemCategory;
    use crate::parser::parse_xml;
    use crate::xpath::parse_expression;
    use rstest::rstest;

    fn first(root: &XPathNode, kind: XPathKind) -> XPathNode {
        root.descendants().find(|n| n.kind() == kind).unwrap()
    }

    fn var_refs(root: &XPathNode) -> Vec<XPathNode> {
        root.descendants()
            .filter(|n| n.kind() == XPathKind::VAR_REF)
            .collect()
    }

    #[test]
    fn test_duplicate_rule_rejected() {
        let result = ItemClassifier::<XmlNode>::builder()
            .rule(XmlKind::ELEMENT, ItemRule::Node)
            .rule(XmlKind::ELEMENT, ItemRule::Atomic(AtomicType::String))
            .build();
        assert_eq!(
            result.unwrap_err(),
            ClassifierError::DuplicateItemKind("ELEMENT".to_string())
        );
    }

    #[test]
    fn test_stock_classifiers_cover_their_tables() {
        assert_eq!(xml_item_classifier().len(), XML_RULES.len());
        assert_eq!(xpath_item_classifier().len(), XPATH_RULES.len());
    }

    #[test]
    #[should_panic(expected = "invalid stock item rules")]
    fn test_stock_table_conflict_fails_on_build() {
        let table = [
            (XmlKind::TEXT, ItemRule::<XmlNode>::Node),
            (XmlKind::TEXT, ItemRule::Atomic(AtomicType::String)),
        ];
        stock_classifier(&table);
    }

    #[test]
    fn test_unhandled_kind_is_none() {
        let root = parse_xml("<a x='1'/>").syntax();
        let tag = root
            .descendants()
            .find(|n| n.kind() == XmlKind::START_TAG)
            .unwrap();
        assert!(!xml_item_classifier().handles(XmlKind::START_TAG));
        assert_eq!(xml_item_classifier().classify(&tag), None);
    }

    #[test]
    fn test_xml_nodes_are_node_items() {
        let root = parse_xml("<a x='1'>text</a>").syntax();
        for kind in [XmlKind::DOCUMENT, XmlKind::ELEMENT, XmlKind::ATTRIBUTE, XmlKind::TEXT] {
            let node = root.descendants().find(|n| n.kind() == kind).unwrap();
            let item = xml_item_classifier().classify(&node).unwrap();
            assert_eq!(item, Item::Node(node));
        }
    }

    #[rstest]
    #[case("'it''s'", AtomicType::String, "'it''s'")]
    #[case("42", AtomicType::Integer, "42")]
    #[case("4.2", AtomicType::Decimal, "4.2")]
    #[case("4.2e1", AtomicType::Double, "4.2e1")]
    fn test_literals_are_atomic(
        #[case] input: &str,
        #[case] ty: AtomicType,
        #[case] lexical: &str,
    ) {
        let root = parse_expression(input).syntax();
        let literal = root
            .descendants()
            .find(|n| xpath_item_classifier().handles(n.kind()))
            .unwrap();
        let Some(Item::Atomic(value)) = xpath_item_classifier().classify(&literal) else {
            panic!("expected atomic item for {input}");
        };
        assert_eq!(value.ty, ty);
        assert_eq!(value.lexical, lexical);
        assert_eq!(value.range, Some(literal.text_range()));
    }

    #[test]
    fn test_function_items() {
        let root = parse_expression("(fn:concat#3, function($a, $b) { $a })").syntax();

        let named = first(&root, XPathKind::NAMED_FUNCTION_REF);
        let Some(Item::Function(function)) = xpath_item_classifier().classify(&named) else {
            panic!("expected function item");
        };
        assert_eq!(function.name.as_deref(), Some("fn:concat"));
        assert_eq!(function.arity, 3);

        let inline = first(&root, XPathKind::INLINE_FUNCTION_EXPR);
        let Some(Item::Function(function)) = xpath_item_classifier().classify(&inline) else {
            panic!("expected function item");
        };
        assert_eq!(function.name, None);
        assert_eq!(function.arity, 2);
    }

    #[test]
    fn test_arrays_and_maps() {
        let root = parse_expression("([1, 2, 3], array { 1, 2 }, map { 'a': 1 })").syntax();
        let classify = |kind| xpath_item_classifier().classify(&first(&root, kind));

        assert!(matches!(
            classify(XPathKind::SQUARE_ARRAY_CONSTRUCTOR),
            Some(Item::Array(ArrayItem { members: 3, .. }))
        ));
        assert!(matches!(
            classify(XPathKind::CURLY_ARRAY_CONSTRUCTOR),
            Some(Item::Array(ArrayItem { members: 2, .. }))
        ));
        assert!(matches!(
            classify(XPathKind::MAP_CONSTRUCTOR),
            Some(Item::Map(MapItem { entries: 1, .. }))
        ));
    }

    #[test]
    fn test_variable_reference_targets_binding() {
        let root = parse_expression("let $a := 1 return $a").syntax();
        let reference = var_refs(&root)[0].clone();
        let item = xpath_item_classifier().classify(&reference).unwrap();
        assert_eq!(item.category(), ItemCategory::ElementReference);

        let binding = item.element().unwrap();
        assert_eq!(binding.kind(), XPathKind::LET_BINDING);
        assert_eq!(binding.text().to_string(), "$a := 1");
    }

    #[test]
    fn test_inner_binding_shadows_outer() {
        let root = parse_expression("for $x in 1 return for $x in 2 return $x").syntax();
        let reference = var_refs(&root).pop().unwrap();
        let binding = xpath_item_classifier().classify(&reference).unwrap().element().unwrap();
        assert_eq!(binding.text().to_string(), "$x in 2");
    }

    #[test]
    fn test_binding_value_sees_outer_scope() {
        let root = parse_expression("let $x := 1 return let $x := $x + 1 return $x").syntax();
        let refs = var_refs(&root);
        let in_value = xpath_item_classifier().classify(&refs[0]).unwrap().element().unwrap();
        assert_eq!(in_value.text().to_string(), "$x := 1");
        let in_body = xpath_item_classifier().classify(&refs[1]).unwrap().element().unwrap();
        assert_eq!(in_body.text().to_string(), "$x := $x + 1");
    }

    #[test]
    fn test_later_binding_sees_earlier() {
        let root = parse_expression("for $a in 1, $b in $a return $b").syntax();
        let refs = var_refs(&root);
        let a = xpath_item_classifier().classify(&refs[0]).unwrap().element().unwrap();
        assert_eq!(a.text().to_string(), "$a in 1");
        let b = xpath_item_classifier().classify(&refs[1]).unwrap().element().unwrap();
        assert_eq!(b.text().to_string(), "$b in $a");
    }

    #[test]
    fn test_parameter_reference() {
        let root = parse_expression("function($p) { $p }").syntax();
        let reference = var_refs(&root)[0].clone();
        let param = xpath_item_classifier().classify(&reference).unwrap().element().unwrap();
        assert_eq!(param.kind(), XPathKind::PARAM);
    }

    #[test]
    fn test_free_variable_has_no_item() {
        let root = parse_expression("$free + 1").syntax();
        assert_eq!(xpath_item_classifier().classify(&var_refs(&root)[0]), None);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let root = parse_expression("let $a := [1] return $a").syntax();
        for node in root.descendants() {
            assert_eq!(
                xpath_item_classifier().classify(&node),
                xpath_item_classifier().classify(&node)
            );
        }
    }
}
