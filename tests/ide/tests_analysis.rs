//! Analysis of whole stylesheets.

use std::path::Path;

use xdm::{Position, TextSize};
use xdm::hir::{AnalysisConfig, ItemCategory, SchemaTypeRegistry};
use xdm::ide::{ItemAt, analyze_document, analyze_documents, analyze_documents_with};
use xdm::parser::ErrorCode;
use xdm::xpath::RegionKind;

use crate::helpers::host_helpers::{host_with, offset_of};
use crate::helpers::source_fixtures::{
    ENTITY_ESCAPES, HELLO_AVT, IDENTITY_TRANSFORM, MIXED_ERRORS, PROLOG_AND_MARKUP,
    TEXT_VALUE_TEMPLATES, XSLT_REGISTRY,
};

#[test]
fn test_malformed_regions_do_not_stop_analysis() {
    let mut host = host_with("mixed.xsl", MIXED_ERRORS);
    let analysis = host.analysis();

    let regions = analysis.embedded_regions("mixed.xsl");
    let summary: Vec<_> = regions
        .iter()
        .map(|r| (r.schema_type.identifier(), r.is_ok()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("xsl:pattern", false),
            ("xsl:expression", true),
            ("xsl:expression", false),
            ("xsl:expression", true),
        ]
    );

    let diagnostics = analysis.diagnostics("mixed.xsl");
    assert!(diagnostics.len() >= 2);
    assert!(
        diagnostics
            .windows(2)
            .all(|pair| pair[0].range.start() <= pair[1].range.start())
    );
    // Every diagnostic lies inside the region it came from
    for diagnostic in &diagnostics {
        assert!(
            regions
                .iter()
                .any(|r| r.host_range.contains_range(diagnostic.range)),
            "{diagnostic:?}"
        );
    }
    assert!(diagnostics[0].range.start() >= offset_of(MIXED_ERRORS, "a["));
}

#[test]
fn test_hello_regions_through_host() {
    let mut host = host_with("hello.xsl", HELLO_AVT);
    let analysis = host.analysis();
    let avt = analysis
        .embedded_regions("hello.xsl")
        .iter()
        .find(|r| r.schema_type.identifier() == "xsl:avt")
        .unwrap();

    let tree = avt.tree.as_ref().unwrap();
    let expression = tree
        .regions()
        .into_iter()
        .find(|r| r.kind == RegionKind::Expression)
        .unwrap();
    assert_eq!(expression.range.start(), offset_of(HELLO_AVT, "{$name}"));
    assert!(analysis.diagnostics("hello.xsl").is_empty());
}

#[test]
fn test_item_at_map_constructor() {
    let mut host = host_with("mixed.xsl", MIXED_ERRORS);
    let analysis = host.analysis();

    let item = analysis
        .item_at("mixed.xsl", offset_of(MIXED_ERRORS, "map {"))
        .unwrap();
    assert_eq!(item.category(), ItemCategory::Map);

    let literal = analysis
        .item_at("mixed.xsl", offset_of(MIXED_ERRORS, "'k'"))
        .unwrap();
    let ItemAt::Embedded { item, .. } = &literal else {
        panic!("expected an embedded item");
    };
    assert_eq!(item.category(), ItemCategory::Atomic);
    let range = literal.host_range().unwrap();
    assert_eq!(&MIXED_ERRORS[usize::from(range.start())..usize::from(range.end())], "'k'");
}

#[test]
fn test_item_at_entity_escaped_operand() {
    let mut host = host_with("escapes.xsl", ENTITY_ESCAPES);
    let analysis = host.analysis();
    let offset = offset_of(ENTITY_ESCAPES, "3 and");

    let found = analysis.item_at("escapes.xsl", offset).unwrap();
    let ItemAt::Embedded { tree, item } = &found else {
        panic!("expected an embedded item");
    };
    assert_eq!(tree.schema_type().identifier(), "xsl:expression");
    assert_eq!(item.category(), ItemCategory::Atomic);
    assert!(item.element().is_none());
    let range = found.host_range().unwrap();
    assert_eq!(&ENTITY_ESCAPES[usize::from(range.start())..usize::from(range.end())], "3");
}

#[test]
fn test_item_at_outside_regions_is_host_node() {
    let mut host = host_with("identity.xsl", IDENTITY_TRANSFORM);
    let analysis = host.analysis();

    let offset = offset_of(IDENTITY_TRANSFORM, "xsl:copy>");
    let Some(ItemAt::Host(item)) = analysis.item_at("identity.xsl", offset) else {
        panic!("expected a host item");
    };
    assert_eq!(item.category(), ItemCategory::Node);
    assert!(analysis.item_at("missing.xsl", TextSize::new(0)).is_none());
}

#[test]
fn test_item_at_position() {
    let mut host = host_with("tvt.xsl", TEXT_VALUE_TEMPLATES);
    let analysis = host.analysis();
    // Line 2 is `    <p>Total: {sum($items ! xs:decimal(.))}</p>`
    let item = analysis.item_at_position("tvt.xsl", Position::new(2, 7));
    assert!(matches!(item, Some(ItemAt::Host(_))));
    assert!(
        analysis
            .item_at_position("tvt.xsl", Position::new(99, 0))
            .is_none()
    );
}

#[test]
fn test_multiple_documents() {
    let mut host = host_with("hello.xsl", HELLO_AVT);
    host.set_document("identity.xsl", IDENTITY_TRANSFORM);
    host.set_document("mixed.xsl", MIXED_ERRORS);
    assert_eq!(host.document_count(), 3);

    let analysis = host.analysis();
    assert_eq!(
        analysis.paths(),
        vec![
            Path::new("hello.xsl"),
            Path::new("identity.xsl"),
            Path::new("mixed.xsl")
        ]
    );
    assert!(analysis.diagnostics("identity.xsl").is_empty());
    assert!(!analysis.diagnostics("mixed.xsl").is_empty());
}

#[test]
fn test_batch_analysis_in_parallel() {
    let documents: Vec<(&str, &str)> = vec![
        ("hello.xsl", HELLO_AVT),
        ("identity.xsl", IDENTITY_TRANSFORM),
        ("tvt.xsl", TEXT_VALUE_TEMPLATES),
        ("mixed.xsl", MIXED_ERRORS),
        ("escapes.xsl", ENTITY_ESCAPES),
    ];
    let results = analyze_documents(&documents);

    let paths: Vec<_> = results.iter().map(|(path, _)| path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["hello.xsl", "identity.xsl", "tvt.xsl", "mixed.xsl", "escapes.xsl"]
    );
    let region_counts: Vec<_> = results.iter().map(|(_, doc)| doc.regions().len()).collect();
    assert_eq!(region_counts, vec![2, 2, 3, 4, 2]);
}

#[test]
fn test_batch_analysis_with_options() {
    let documents = [("t.xml", "<doc><p>{1 + }</p></doc>")];
    let config = AnalysisConfig {
        expand_text_default: true,
        ..AnalysisConfig::default()
    };
    let results = analyze_documents_with(&documents, &SchemaTypeRegistry::xslt(), &config);
    let doc = &results[0].1;
    assert_eq!(doc.regions().len(), 1);
    let diagnostics = doc.diagnostics(&config);
    assert!(!diagnostics.is_empty());
    assert!(diagnostics.iter().all(|d| d.code != ErrorCode::E0505));
}

#[test]
fn test_unresolved_language_becomes_diagnostic() {
    use xdm::hir::LanguageHandle;

    let mut registry = SchemaTypeRegistry::new();
    registry
        .register(
            "xsl:expression",
            LanguageHandle::new("Expression", || Err("disabled".to_string())),
        )
        .unwrap();
    let documents = [("a.xsl", ENTITY_ESCAPES)];
    let results = analyze_documents_with(&documents, &registry, &AnalysisConfig::default());
    let doc = &results[0].1;

    // `match` has no registered type, `test` cannot be parsed
    assert_eq!(doc.regions().len(), 1);
    let diagnostics = doc.diagnostics(&AnalysisConfig::default());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E0505);
    assert_eq!(diagnostics[0].range, doc.regions()[0].host_range);
}

#[test]
fn test_prolog_is_not_document_text() {
    let config = AnalysisConfig::default();
    let doc = analyze_document(PROLOG_AND_MARKUP, &XSLT_REGISTRY, &config);
    assert!(doc.host_errors().is_empty(), "{:?}", doc.host_errors());
    assert!(doc.diagnostics(&config).is_empty());
}

#[test]
fn test_markup_inside_expand_text_scope() {
    let config = AnalysisConfig::default();
    let doc = analyze_document(PROLOG_AND_MARKUP, &XSLT_REGISTRY, &config);

    // The processing instruction and comment hold braces but are not text
    let templates: Vec<_> = doc
        .regions()
        .iter()
        .filter(|r| r.schema_type.identifier() == "xsl:text-value-template")
        .map(|r| r.tree.as_ref().unwrap().text().text().to_string())
        .collect();
    assert_eq!(templates, vec!["{$x}", "{$y}"]);

    let cdata = doc
        .regions()
        .iter()
        .find(|r| r.host_range.start() == offset_of(PROLOG_AND_MARKUP, "<![CDATA["))
        .unwrap();
    let tree = cdata.tree.as_ref().unwrap();
    assert_eq!(tree.offset(), offset_of(PROLOG_AND_MARKUP, "{$y}"));
}
