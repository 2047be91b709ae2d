//! The embedded languages as reached through the schema registry.

use rstest::rstest;
use xdm::parser::ErrorCode;
use xdm::xpath::{SchemaLanguage, SyntaxKind};

use crate::helpers::source_fixtures::XSLT_REGISTRY;

/// Parse `text` as the language of the schema type `identifier`.
fn parse_as(identifier: &str, text: &str) -> xdm::xpath::Parse {
    let ty = XSLT_REGISTRY
        .lookup(identifier)
        .unwrap_or_else(|| panic!("unknown schema type {identifier}"));
    ty.embedded_language().resolve().unwrap().parse(text)
}

#[rstest]
#[case("xsl:avt", "item-{position()}.xml")]
#[case("xsl:expr-avt", "{$a}{{literal}}")]
#[case("xsl:text-value-template", "Total: {sum($items ! xs:decimal(.))}")]
#[case("xsl:expression", "for $i in 1 to 3 return $i * 2")]
#[case("xsl:expression", "map { 'k': [1, 2] }?k?1")]
#[case("xsl:expression", "some $x in (1, 2) satisfies $x = 2")]
#[case("xsl:expression", "let $f := function($a) { $a + 1 } return $f(2)")]
#[case("xsl:expression", "$seq => sort() => reverse()")]
#[case("xsl:pattern", "@*|node()")]
#[case("xsl:pattern", "section/para[1]")]
#[case("xsl:pattern", "/")]
#[case("xsl:sequence-type", "element(p)")]
#[case("xsl:sequence-type", "map(xs:string, item()*)?")]
#[case("xsl:sequence-type", "empty-sequence()")]
#[case("xsl:item-type", "function(*)")]
#[case("xsl:element-names", "* p:* *:para Q{urn:x}*")]
#[case("xsl:modes", "#default #unnamed main")]
#[case("xsl:method", "xml")]
#[case("xsl:EQName", "Q{http://example.com}name")]
#[case("xsl:prefix-list-or-all", "#all")]
#[case("xsl:tokens", "alpha beta gamma")]
fn test_valid_values(#[case] identifier: &str, #[case] text: &str) {
    let parse = parse_as(identifier, text);
    assert!(parse.ok(), "{identifier} {text:?}: {:?}", parse.errors);
    assert_eq!(parse.syntax().text().to_string(), text);
}

#[rstest]
#[case("xsl:expression", "1 +")]
#[case("xsl:expression", "(1, 2")]
#[case("xsl:expression", "1 = 2 = 3")]
#[case("xsl:avt", "unclosed {$a")]
#[case("xsl:avt", "empty {}")]
#[case("xsl:pattern", "a[")]
#[case("xsl:sequence-type", "")]
#[case("xsl:element-names", "a, b")]
#[case("xsl:modes", "# default")]
#[case("xsl:tokens", "a 1")]
fn test_invalid_values(#[case] identifier: &str, #[case] text: &str) {
    let parse = parse_as(identifier, text);
    assert!(!parse.ok(), "{identifier} {text:?} should not parse");
    // The tree still covers the whole input
    assert_eq!(parse.syntax().text().to_string(), text);
    for error in &parse.errors {
        assert!(usize::from(error.range.end()) <= text.len());
    }
}

#[test]
fn test_comments_follow_language_policy() {
    for language in SchemaLanguage::ALL {
        let text = match language {
            SchemaLanguage::ValueTemplate => "a{ (: c :) 1}",
            SchemaLanguage::SequenceType | SchemaLanguage::ItemType => "(: c :) item()",
            SchemaLanguage::Pattern => "(: c :) a",
            SchemaLanguage::Expression => "(: c :) 1",
            _ => "(: c :) a",
        };
        let parse = language.parse(text);
        let comment_errors = parse
            .errors
            .iter()
            .filter(|e| e.code == ErrorCode::E0501)
            .count();
        if language.allows_comments() {
            assert!(parse.ok(), "{language}: {:?}", parse.errors);
        } else {
            assert_eq!(comment_errors, 1, "{language}");
        }
        let comments = parse
            .syntax()
            .descendants_with_tokens()
            .filter(|e| e.kind() == SyntaxKind::COMMENT)
            .count();
        assert_eq!(comments, 1, "{language}");
    }
}

#[test]
fn test_every_schema_type_resolves() {
    for identifier in XSLT_REGISTRY.identifiers() {
        let ty = XSLT_REGISTRY.lookup(identifier).unwrap();
        let parser = ty.embedded_language().resolve().unwrap();
        assert_eq!(parser.name(), ty.embedded_language().name());
        assert!(SchemaLanguage::from_name(parser.name()).is_some());
    }
}
