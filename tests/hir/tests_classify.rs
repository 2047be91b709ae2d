//! Item classification over embedded trees taken from real stylesheets.

use xdm::hir::{
    AnalysisConfig, AtomicType, EmbeddedTree, Item, ItemCategory, ItemClassifier, ItemRule,
    element_of, parse_embedded, schema_type_for, xml_item_classifier, xpath_item_classifier,
};
use xdm::parser::SyntaxNode as XmlNode;
use xdm::xpath::{SyntaxKind, SyntaxNode};

use crate::helpers::host_helpers::{attribute_value, text_node};
use crate::helpers::source_fixtures::{
    IDENTITY_TRANSFORM, MIXED_ERRORS, TEXT_VALUE_TEMPLATES, XSLT_REGISTRY,
};

fn embedded(node: &XmlNode) -> EmbeddedTree {
    let ty = schema_type_for(node, &XSLT_REGISTRY, &AnalysisConfig::default()).unwrap();
    parse_embedded(node, &ty).unwrap()
}

fn categories(root: &SyntaxNode) -> Vec<(SyntaxKind, ItemCategory)> {
    root.descendants()
        .filter_map(|n| {
            let item = xpath_item_classifier().classify(&n)?;
            Some((n.kind(), item.category()))
        })
        .collect()
}

#[test]
fn test_map_lookup_select() {
    let tree = embedded(&attribute_value(MIXED_ERRORS, "select"));
    assert_eq!(
        categories(&tree.syntax()),
        vec![
            (SyntaxKind::MAP_CONSTRUCTOR, ItemCategory::Map),
            (SyntaxKind::STRING_LITERAL, ItemCategory::Atomic),
            (SyntaxKind::INTEGER_LITERAL, ItemCategory::Atomic),
        ]
    );
}

#[test]
fn test_text_value_template_items() {
    let tree = embedded(&text_node(TEXT_VALUE_TEMPLATES, "Total"));
    let items = categories(&tree.syntax());
    // `$items` is free in the template, so it denotes nothing
    assert!(items.is_empty(), "{items:?}");
}

#[test]
fn test_identity_transform_has_no_embedded_items() {
    let tree = embedded(&attribute_value(IDENTITY_TRANSFORM, "match"));
    assert!(categories(&tree.syntax()).is_empty());
}

#[test]
fn test_host_nodes_are_node_items() {
    let value = attribute_value(IDENTITY_TRANSFORM, "on-no-match");
    let attribute = value.parent().unwrap();
    let item = xml_item_classifier().classify(&attribute).unwrap();
    assert_eq!(item, Item::Node(attribute.clone()));
    assert_eq!(element_of(&item), Some(attribute));

    // The value itself is part of the attribute node
    assert_eq!(xml_item_classifier().classify(&value), None);
}

#[test]
fn test_classification_is_idempotent_across_threads() {
    use rayon::prelude::*;

    let source = "let $a := [1, 2] return map { 'k': $a }";
    let expected = categories(&xdm::xpath::parse_expression(source).syntax());
    let all_equal = (0..32)
        .into_par_iter()
        .map(|_| categories(&xdm::xpath::parse_expression(source).syntax()))
        .all(|found| found == expected);
    assert!(all_equal);
    assert_eq!(
        expected,
        vec![
            (SyntaxKind::SQUARE_ARRAY_CONSTRUCTOR, ItemCategory::Array),
            (SyntaxKind::INTEGER_LITERAL, ItemCategory::Atomic),
            (SyntaxKind::INTEGER_LITERAL, ItemCategory::Atomic),
            (SyntaxKind::MAP_CONSTRUCTOR, ItemCategory::Map),
            (SyntaxKind::STRING_LITERAL, ItemCategory::Atomic),
            (SyntaxKind::VAR_REF, ItemCategory::ElementReference),
        ]
    );
}

fn context_item(node: &SyntaxNode) -> Option<SyntaxNode> {
    node.ancestors().find(|n| n.kind() == SyntaxKind::XPATH)
}

#[test]
fn test_custom_classifier() {
    let classifier = ItemClassifier::<SyntaxNode>::builder()
        .rule(SyntaxKind::CONTEXT_ITEM_EXPR, ItemRule::Reference(context_item))
        .rule(SyntaxKind::STRING_LITERAL, ItemRule::Atomic(AtomicType::UntypedAtomic))
        .build()
        .unwrap();
    assert_eq!(classifier.len(), 2);
    assert!(!classifier.handles(SyntaxKind::INTEGER_LITERAL));

    let root = xdm::xpath::parse_expression(". || 'x'").syntax();
    let dot = root
        .descendants()
        .find(|n| n.kind() == SyntaxKind::CONTEXT_ITEM_EXPR)
        .unwrap();
    let Some(Item::ElementReference(reference)) = classifier.classify(&dot) else {
        panic!("expected a reference");
    };
    assert_eq!(reference.source(), &dot);
    assert_eq!(reference.target(), Some(root.clone()));

    let literal = root
        .descendants()
        .find(|n| n.kind() == SyntaxKind::STRING_LITERAL)
        .unwrap();
    let Some(Item::Atomic(value)) = classifier.classify(&literal) else {
        panic!("expected an atomic value");
    };
    assert_eq!(value.ty, AtomicType::UntypedAtomic);
    assert_eq!(value.lexical, "'x'");
}
