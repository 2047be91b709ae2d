//! Embedded dispatch: inferring a host node's schema type and parsing its
//! value with that type's language.

use std::ops::Range;
use std::sync::Arc;

use xdm::hir::{
    AnalysisConfig, LanguageHandle, SchemaError, SchemaTypeRegistry, parse_embedded,
    schema_type_for,
};
use xdm::parser::ErrorCode;
use xdm::{TextRange, TextSize};
use xdm::xpath::{RegionKind, SyntaxKind};

use crate::helpers::host_helpers::{attribute_value, offset_of};
use crate::helpers::source_fixtures::{ENTITY_ESCAPES, HELLO_AVT, MIXED_ERRORS, XSLT_REGISTRY};

fn slice(source: &str, range: TextRange) -> &str {
    &source[Range::<usize>::from(range)]
}

#[test]
fn test_hello_template_regions() {
    let value = attribute_value(HELLO_AVT, "text");
    let ty = schema_type_for(&value, &XSLT_REGISTRY, &AnalysisConfig::default()).unwrap();
    assert_eq!(ty.identifier(), "xsl:avt");

    let tree = parse_embedded(&value, &ty).unwrap();
    assert_eq!(tree.offset(), offset_of(HELLO_AVT, "Hello"));

    let regions = tree.regions();
    let kinds: Vec<_> = regions.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![RegionKind::Literal, RegionKind::Expression, RegionKind::Literal]
    );
    let texts: Vec<_> = regions.iter().map(|r| slice(HELLO_AVT, r.range)).collect();
    assert_eq!(texts, vec!["Hello ", "{$name}", "!"]);
}

#[test]
fn test_entity_references_are_decoded() {
    let value = attribute_value(ENTITY_ESCAPES, "test");
    let ty = schema_type_for(&value, &XSLT_REGISTRY, &AnalysisConfig::default()).unwrap();
    assert_eq!(ty.identifier(), "xsl:expression");

    let tree = parse_embedded(&value, &ty).unwrap();
    assert_eq!(tree.text().text(), "$a < 3 and $b > 1");
    assert!(!tree.text().is_verbatim());

    // Operators map back onto the references that spell them
    let operators: Vec<_> = tree
        .syntax()
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| matches!(t.kind(), SyntaxKind::LT | SyntaxKind::GT))
        .map(|t| slice(ENTITY_ESCAPES, tree.to_host(t.text_range())))
        .collect();
    assert_eq!(operators, vec!["&lt;", "&gt;"]);

    let one = tree
        .syntax()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::INTEGER_LITERAL)
        .last()
        .unwrap();
    let start = offset_of(ENTITY_ESCAPES, "1\"");
    assert_eq!(
        tree.to_host(one.text_range()),
        TextRange::at(start, TextSize::new(1))
    );
}

#[test]
fn test_malformed_pattern_reports_host_diagnostics() {
    let value = attribute_value(MIXED_ERRORS, "match");
    let ty = XSLT_REGISTRY.lookup("xsl:pattern").unwrap();
    let err = parse_embedded(&value, &ty).unwrap_err();

    let SchemaError::EmbeddedParseError { identifier, range, diagnostics } = &err else {
        panic!("expected a parse error, got {err:?}");
    };
    assert_eq!(identifier, "xsl:pattern");
    assert_eq!(*range, value.text_range());
    assert!(!diagnostics.is_empty());
    for diagnostic in diagnostics {
        assert!(value.text_range().contains_range(diagnostic.range));
    }
    assert_eq!(err.diagnostics().len(), diagnostics.len());
}

#[test]
fn test_wrong_language_is_an_error() {
    // A value that is a fine expression but not a token list
    let value = attribute_value(MIXED_ERRORS, "select");
    let ty = XSLT_REGISTRY.lookup("xsl:tokens").unwrap();
    assert!(matches!(
        parse_embedded(&value, &ty),
        Err(SchemaError::EmbeddedParseError { .. })
    ));
}

#[test]
fn test_unresolved_language() {
    let mut registry = SchemaTypeRegistry::new();
    let broken = LanguageHandle::new("Broken", || Err("grammar not installed".to_string()));
    let ty = registry.register("my:broken", broken).unwrap();

    let value = attribute_value(HELLO_AVT, "text");
    let err = parse_embedded(&value, &ty).unwrap_err();
    assert_eq!(
        err,
        SchemaError::UnresolvedLanguage {
            identifier: "my:broken".into(),
            language: "Broken".into(),
            reason: "grammar not installed".to_string(),
        }
    );
    assert!(err.diagnostics().is_empty());

    // The failure is cached on the handle
    assert!(ty.embedded_language().is_resolved());
    assert!(parse_embedded(&value, &ty).is_err());
}

#[test]
fn test_custom_language_handle() {
    let mut registry = SchemaTypeRegistry::new();
    let handle = LanguageHandle::from_parser(Arc::new(xdm::xpath::SchemaLanguage::Tokens));
    let ty = registry.register("my:words", handle).unwrap();

    let value = attribute_value(HELLO_AVT, "text");
    // "Hello {$name}!" is not a token list
    let err = parse_embedded(&value, &ty).unwrap_err();
    assert!(
        err.diagnostics()
            .iter()
            .all(|d| d.code != ErrorCode::E0505)
    );
}
