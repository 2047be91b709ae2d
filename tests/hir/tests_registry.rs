//! Schema type registry behavior.

use std::sync::Arc;

use rayon::prelude::*;
use xdm::hir::{LanguageHandle, SchemaError, SchemaTypeRegistry, XSLT_SCHEMA_TYPES};
use xdm::xpath::{EmbeddedParser, SchemaLanguage};

use crate::helpers::source_fixtures::XSLT_REGISTRY;

#[test]
fn test_expr_avt_uses_value_template_language() {
    let ty = XSLT_REGISTRY.lookup("xsl:expr-avt").unwrap();
    assert_eq!(ty.identifier(), "xsl:expr-avt");
    assert!(
        ty.embedded_language()
            .ptr_eq(&SchemaLanguage::ValueTemplate.handle())
    );
}

#[test]
fn test_separate_registries_share_language_handles() {
    let other = SchemaTypeRegistry::xslt();
    for identifier in XSLT_REGISTRY.identifiers() {
        let a = XSLT_REGISTRY.lookup(identifier).unwrap();
        let b = other.lookup(identifier).unwrap();
        assert!(a.embedded_language().ptr_eq(b.embedded_language()), "{identifier}");
    }
}

#[test]
fn test_unknown_identifier_is_absent() {
    assert!(XSLT_REGISTRY.lookup("xsl:does-not-exist").is_none());
    assert!(XSLT_REGISTRY.lookup("").is_none());
    // Identifiers are case sensitive
    assert!(XSLT_REGISTRY.lookup("xsl:qname").is_none());
    assert!(XSLT_REGISTRY.lookup("xsl:QName").is_some());
}

#[test]
fn test_identifiers_match_table() {
    let identifiers: Vec<_> = XSLT_REGISTRY.identifiers().collect();
    let expected: Vec<_> = XSLT_SCHEMA_TYPES.iter().map(|(id, _)| *id).collect();
    assert_eq!(identifiers, expected);
}

#[test]
fn test_duplicate_registration_fails_and_keeps_first() {
    let mut registry = SchemaTypeRegistry::xslt();
    let before = registry.lookup("xsl:expression").unwrap();

    let result = registry.register("xsl:expression", SchemaLanguage::Tokens.handle());
    assert!(matches!(
        result,
        Err(SchemaError::DuplicateSchemaType(ref id)) if id == "xsl:expression"
    ));

    let after = registry.lookup("xsl:expression").unwrap();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(after.embedded_language().name(), "Expression");
    assert_eq!(registry.len(), XSLT_SCHEMA_TYPES.len());
}

#[test]
fn test_custom_language_registration() {
    let mut registry = SchemaTypeRegistry::new();
    let handle = LanguageHandle::new("Custom", || {
        Ok(Arc::new(SchemaLanguage::Tokens) as Arc<dyn EmbeddedParser>)
    });
    let ty = registry.register("my:custom", handle.clone()).unwrap();

    assert!(ty.embedded_language().ptr_eq(&handle));
    assert!(!handle.is_resolved());
    assert_eq!(handle.resolve().unwrap().name(), "Tokens");
    assert!(ty.embedded_language().is_resolved());
}

#[test]
fn test_concurrent_reads() {
    let results: Vec<bool> = (0..256)
        .into_par_iter()
        .map(|i| {
            let (identifier, language) = XSLT_SCHEMA_TYPES[i % XSLT_SCHEMA_TYPES.len()];
            let ty = XSLT_REGISTRY.lookup(identifier).unwrap();
            let parser = ty.embedded_language().resolve().unwrap();
            parser.name() == language.name()
                && ty.embedded_language().ptr_eq(&language.handle())
        })
        .collect();
    assert!(results.into_iter().all(|ok| ok));
}

#[test]
fn test_concurrent_reads_of_global_registry() {
    let count = (0..64)
        .into_par_iter()
        .filter(|_| xdm::hir::global_registry().lookup("xsl:pattern").is_some())
        .count();
    assert_eq!(count, 64);
}
