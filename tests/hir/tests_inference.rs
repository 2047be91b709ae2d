//! Schema inference over whole stylesheets.

use rstest::rstest;
use xdm::base::AstNode;
use xdm::hir::{AnalysisConfig, XsltVersion, effective_version, expand_text, schema_type_for};
use xdm::parser::{Element, SyntaxKind, parse_xml};

use crate::helpers::host_helpers::text_node;
use crate::helpers::source_fixtures::{
    ENTITY_ESCAPES, HELLO_AVT, IDENTITY_TRANSFORM, MIXED_ERRORS, TEXT_VALUE_TEMPLATES,
    XSLT_REGISTRY,
};

/// Schema type identifiers of every typed node, in document order.
fn inferred(source: &str, config: &AnalysisConfig) -> Vec<String> {
    parse_xml(source)
        .syntax()
        .descendants()
        .filter(|n| matches!(n.kind(), SyntaxKind::ATTRIBUTE_VALUE | SyntaxKind::TEXT))
        .filter_map(|n| schema_type_for(&n, &XSLT_REGISTRY, config))
        .map(|ty| ty.identifier().to_string())
        .collect()
}

#[rstest]
#[case::hello(HELLO_AVT, &["xsl:pattern", "xsl:avt"])]
#[case::identity(
    IDENTITY_TRANSFORM,
    &["xsl:pattern", "xsl:expression"]
)]
#[case::text_templates(
    TEXT_VALUE_TEMPLATES,
    &["xsl:EQName", "xsl:sequence-type", "xsl:text-value-template"]
)]
#[case::mixed(
    MIXED_ERRORS,
    &["xsl:pattern", "xsl:expression", "xsl:expression", "xsl:expression"]
)]
#[case::entities(ENTITY_ESCAPES, &["xsl:pattern", "xsl:expression"])]
fn test_inferred_schema_types(#[case] source: &str, #[case] expected: &[&str]) {
    assert_eq!(inferred(source, &AnalysisConfig::default()), expected);
}

#[test]
fn test_version_and_expand_text_settings() {
    let config = AnalysisConfig::default();
    let p = text_node(TEXT_VALUE_TEMPLATES, "Total")
        .parent()
        .and_then(Element::cast)
        .unwrap();
    assert_eq!(effective_version(&p, &config), XsltVersion::V3_0);
    assert!(expand_text(&p, &config));

    let older = TEXT_VALUE_TEMPLATES.replace("version=\"3.0\"", "version=\"2.0\"");
    let p = text_node(&older, "Total")
        .parent()
        .and_then(Element::cast)
        .unwrap();
    assert_eq!(effective_version(&p, &config), XsltVersion::V2_0);
    assert!(expand_text(&p, &config));
    assert_eq!(
        inferred(&older, &config),
        vec!["xsl:EQName", "xsl:sequence-type"]
    );
}

#[test]
fn test_config_version_is_the_fallback() {
    let config = AnalysisConfig {
        xslt_version: XsltVersion::V1_0,
        expand_text_default: true,
        ..AnalysisConfig::default()
    };
    assert!(inferred("<doc><p>{1}</p></doc>", &config).is_empty());

    let config = AnalysisConfig {
        expand_text_default: true,
        ..AnalysisConfig::default()
    };
    assert_eq!(
        inferred("<doc><p>{1}</p></doc>", &config),
        vec!["xsl:text-value-template"]
    );
}
