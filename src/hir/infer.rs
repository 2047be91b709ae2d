//! Picking the schema type of XSLT attribute values and text.
//!
//! Attributes of XSLT instructions have declared types (`select` is an
//! expression, `match` a pattern, and so on). Everything else is an
//! attribute value template when it sits inside XSLT and contains `{`, and
//! text is a text value template where `expand-text` is on.

use std::sync::Arc;

use tracing::trace;

use super::config::{AnalysisConfig, XsltVersion};
use super::schema::{SchemaType, SchemaTypeRegistry};
use crate::base::AstNode;
use crate::base::text_utils::is_yes;
use crate::parser::{
    Attribute, AttributeValue, Element, SyntaxKind, SyntaxNode, XSD_NAMESPACE, XSLT_NAMESPACE,
};

/// Declared types of XSLT attributes: `(element, attribute, schema type)`.
///
/// An element of `*` matches any XSLT element; element-specific entries
/// are checked first.
const DECLARED_ATTRIBUTES: &[(&str, &str, &str)] = &[
    ("apply-templates", "mode", "xsl:mode"),
    ("template", "mode", "xsl:modes"),
    ("context-item", "as", "xsl:item-type"),
    ("global-context-item", "as", "xsl:item-type"),
    ("function", "name", "xsl:EQName-in-namespace"),
    ("template", "name", "xsl:EQName"),
    ("call-template", "name", "xsl:EQName"),
    ("variable", "name", "xsl:EQName"),
    ("param", "name", "xsl:EQName"),
    ("with-param", "name", "xsl:EQName"),
    ("key", "name", "xsl:EQName"),
    ("mode", "name", "xsl:EQName"),
    ("accumulator", "name", "xsl:EQName"),
    ("attribute-set", "name", "xsl:EQName"),
    ("character-map", "name", "xsl:EQName"),
    ("decimal-format", "name", "xsl:EQName"),
    ("output", "name", "xsl:EQName"),
    ("output", "method", "xsl:method"),
    ("result-document", "method", "xsl:method"),
    ("preserve-space", "elements", "xsl:element-names"),
    ("strip-space", "elements", "xsl:element-names"),
    ("catch", "errors", "xsl:nametests"),
    ("namespace-alias", "stylesheet-prefix", "xsl:prefix-or-default"),
    ("namespace-alias", "result-prefix", "xsl:prefix-or-default"),
    ("*", "select", "xsl:expression"),
    ("*", "test", "xsl:expression"),
    ("*", "use", "xsl:expression"),
    ("*", "value", "xsl:expression"),
    ("*", "use-when", "xsl:expression"),
    ("*", "group-by", "xsl:expression"),
    ("*", "group-adjacent", "xsl:expression"),
    ("*", "initial-value", "xsl:expression"),
    ("*", "xpath", "xsl:expression"),
    ("*", "context-item", "xsl:expression"),
    ("*", "with-params", "xsl:expression"),
    ("*", "namespace-context", "xsl:expression"),
    ("*", "for-each-item", "xsl:expression"),
    ("*", "for-each-source", "xsl:expression"),
    ("*", "match", "xsl:pattern"),
    ("*", "count", "xsl:pattern"),
    ("*", "from", "xsl:pattern"),
    ("*", "group-starting-with", "xsl:pattern"),
    ("*", "group-ending-with", "xsl:pattern"),
    ("*", "as", "xsl:sequence-type"),
    ("*", "default-mode", "xsl:default-mode-type"),
    ("*", "use-accumulators", "xsl:accumulator-names"),
    ("*", "use-attribute-sets", "xsl:EQNames"),
    ("*", "use-character-maps", "xsl:EQNames"),
    ("*", "cdata-section-elements", "xsl:EQNames"),
    ("*", "type", "xsl:EQName"),
    ("*", "streamability", "xsl:streamability-type"),
    ("*", "exclude-result-prefixes", "xsl:prefix-list-or-all"),
    ("*", "extension-element-prefixes", "xsl:prefix-list"),
];

/// The declared schema type identifier of `attribute` on the XSLT element
/// `element` (both local names).
pub fn declared_attribute_type(element: &str, attribute: &str) -> Option<&'static str> {
    DECLARED_ATTRIBUTES
        .iter()
        .find(|(e, a, _)| *e == element && *a == attribute)
        .or_else(|| {
            DECLARED_ATTRIBUTES
                .iter()
                .find(|(e, a, _)| *e == "*" && *a == attribute)
        })
        .map(|(_, _, identifier)| *identifier)
}

/// The schema type of an XML host node's content, if it has one.
///
/// Attributes (or their values) and text nodes are considered; any other
/// node has no schema type.
pub fn schema_type_for(
    node: &SyntaxNode,
    registry: &SchemaTypeRegistry,
    config: &AnalysisConfig,
) -> Option<Arc<SchemaType>> {
    let identifier = match node.kind() {
        SyntaxKind::ATTRIBUTE_VALUE => AttributeValue::cast(node.clone())
            .and_then(|value| value.attribute())
            .and_then(|attr| attribute_schema(&attr)),
        SyntaxKind::ATTRIBUTE => {
            Attribute::cast(node.clone()).and_then(|attr| attribute_schema(&attr))
        }
        SyntaxKind::TEXT | SyntaxKind::CDATA => text_schema(node, config),
        _ => None,
    }?;
    trace!(range = ?node.text_range(), identifier, "inferred schema type");
    registry.lookup(identifier)
}

fn attribute_schema(attr: &Attribute) -> Option<&'static str> {
    if attr.is_namespace_declaration() {
        return None;
    }
    let owner = attr.owner()?;
    let element_name = owner.expanded_name();
    let attr_name = attr.expanded_name()?;

    let in_xsd = element_name
        .as_ref()
        .is_some_and(|name| name.namespace.as_deref() == Some(XSD_NAMESPACE));
    if !in_xsd {
        let declared = match (&element_name, attr_name.namespace.as_deref()) {
            // Unprefixed attributes of XSLT instructions
            (Some(element), None) if element.namespace.as_deref() == Some(XSLT_NAMESPACE) => {
                declared_attribute_type(&element.local, &attr_name.local)
            }
            // xsl:* attributes on literal result elements
            (_, Some(XSLT_NAMESPACE)) => declared_attribute_type("*", &attr_name.local),
            _ => None,
        };
        if declared.is_some() {
            return declared;
        }
    }

    // The owning element itself does not count
    let value = attr.value()?;
    let in_xslt = owner.ancestors_or_self().skip(1).any(|element| element.is_xslt());
    (in_xslt && value.contains('{')).then_some("xsl:avt")
}

fn text_schema(node: &SyntaxNode, config: &AnalysisConfig) -> Option<&'static str> {
    let parent = node.parent().and_then(Element::cast)?;
    if !effective_version(&parent, config).has_text_value_templates() {
        return None;
    }
    if !expand_text(&parent, config) {
        return None;
    }
    let text = node.text().to_string();
    text.contains(['{', '}']).then_some("xsl:text-value-template")
}

/// The XSLT version in effect at `element`: the nearest `version` on an
/// XSLT element or `xsl:version` on any other element.
pub fn effective_version(element: &Element, config: &AnalysisConfig) -> XsltVersion {
    element
        .ancestors_or_self()
        .find_map(|e| xslt_setting(&e, "version"))
        .and_then(|value| XsltVersion::from_attribute(&value))
        .unwrap_or(config.xslt_version)
}

/// Whether `expand-text` is on at `element`.
pub fn expand_text(element: &Element, config: &AnalysisConfig) -> bool {
    element
        .ancestors_or_self()
        .find_map(|e| xslt_setting(&e, "expand-text"))
        .map_or(config.expand_text_default, |value| is_yes(&value))
}

/// A standard XSLT attribute: unprefixed on XSLT elements, in the XSLT
/// namespace on others.
fn xslt_setting(element: &Element, local: &str) -> Option<String> {
    let on_xslt = element.is_xslt();
    element
        .attributes()
        .find(|attr| {
            attr.expanded_name().is_some_and(|name| {
                name.local == local
                    && if on_xslt {
                        name.namespace.is_none()
                    } else {
                        name.namespace.as_deref() == Some(XSLT_NAMESPACE)
                    }
            })
        })
        .and_then(|attr| attr.value())
}
