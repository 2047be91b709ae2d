//! Typed AST wrappers over the untyped XML CST.
//!
//! Each struct wraps a SyntaxNode and provides methods to access children.

use super::syntax_kind::{SyntaxKind, XmlLanguage};
use super::{SyntaxNode, SyntaxToken};
use crate::base::{AstNode, HostNode};
use crate::base::text_utils::split_qname;

/// The XSLT namespace URI.
pub const XSLT_NAMESPACE: &str = "http://www.w3.org/1999/XSL/Transform";

/// The XML Schema namespace URI.
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// The namespace URI bound to the reserved `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            type Language = XmlLanguage;

            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Document, DOCUMENT);
ast_node!(Element, ELEMENT);
ast_node!(StartTag, START_TAG);
ast_node!(EndTag, END_TAG);
ast_node!(Attribute, ATTRIBUTE);
ast_node!(AttributeValue, ATTRIBUTE_VALUE);
ast_node!(Text, TEXT);

fn first_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

/// A resolved element or attribute name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpandedName {
    pub namespace: Option<String>,
    pub local: String,
}

impl ExpandedName {
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local == local
    }
}

impl Document {
    /// The document element, if any
    pub fn root_element(&self) -> Option<Element> {
        self.0.children().find_map(Element::cast)
    }
}

impl Element {
    pub fn start_tag(&self) -> Option<StartTag> {
        self.0.children().find_map(StartTag::cast)
    }

    pub fn end_tag(&self) -> Option<EndTag> {
        self.0.children().find_map(EndTag::cast)
    }

    /// The lexical QName of the element, e.g. `xsl:template`
    pub fn name(&self) -> Option<String> {
        self.start_tag()
            .and_then(|tag| first_token(tag.syntax(), SyntaxKind::NAME))
            .map(|t| t.text().to_string())
    }

    pub fn attributes(&self) -> impl Iterator<Item = Attribute> {
        self.start_tag()
            .into_iter()
            .flat_map(|tag| tag.0.children().filter_map(Attribute::cast))
    }

    /// Find an attribute by its lexical name
    pub fn attribute(&self, name: &str) -> Option<Attribute> {
        self.attributes()
            .find(|attr| attr.name().as_deref() == Some(name))
    }

    pub fn child_elements(&self) -> impl Iterator<Item = Element> {
        self.0.children().filter_map(Element::cast)
    }

    pub fn texts(&self) -> impl Iterator<Item = Text> {
        self.0.children().filter_map(Text::cast)
    }

    pub fn parent_element(&self) -> Option<Element> {
        self.0.parent().and_then(Element::cast)
    }

    /// This element and the elements enclosing it, innermost first
    pub fn ancestors_or_self(&self) -> impl Iterator<Item = Element> {
        self.0.ancestors().filter_map(Element::cast)
    }

    /// Resolve a namespace prefix (`None` for the default namespace)
    /// against the `xmlns` declarations in scope at this element.
    pub fn lookup_namespace(&self, prefix: Option<&str>) -> Option<String> {
        if prefix == Some("xml") {
            return Some(XML_NAMESPACE.to_string());
        }
        let declaration = match prefix {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        self.ancestors_or_self()
            .find_map(|element| element.attribute(&declaration))
            .and_then(|attr| attr.value())
            .filter(|uri| !uri.is_empty())
    }

    /// The namespace-resolved name of the element
    pub fn expanded_name(&self) -> Option<ExpandedName> {
        let name = self.name()?;
        let (prefix, local) = split_qname(&name)?;
        Some(ExpandedName {
            namespace: self.lookup_namespace(prefix),
            local: local.to_string(),
        })
    }

    pub fn is_xslt(&self) -> bool {
        self.expanded_name()
            .is_some_and(|name| name.namespace.as_deref() == Some(XSLT_NAMESPACE))
    }
}

impl EndTag {
    pub fn name(&self) -> Option<String> {
        first_token(&self.0, SyntaxKind::NAME).map(|t| t.text().to_string())
    }
}

impl Attribute {
    /// The lexical name of the attribute, e.g. `select` or `xsl:expand-text`
    pub fn name(&self) -> Option<String> {
        first_token(&self.0, SyntaxKind::NAME).map(|t| t.text().to_string())
    }

    pub fn value_node(&self) -> Option<AttributeValue> {
        self.0.children().find_map(AttributeValue::cast)
    }

    /// The raw attribute value without quotes (entity references are kept as written)
    pub fn value(&self) -> Option<String> {
        self.value_node().map(|v| v.value())
    }

    pub fn owner(&self) -> Option<Element> {
        self.0.ancestors().find_map(Element::cast)
    }

    /// `xmlns` and `xmlns:p` attributes declare namespaces rather than carry data
    pub fn is_namespace_declaration(&self) -> bool {
        self.name()
            .is_some_and(|name| name == "xmlns" || name.starts_with("xmlns:"))
    }

    /// The namespace-resolved attribute name. Unprefixed attributes are in no namespace.
    pub fn expanded_name(&self) -> Option<ExpandedName> {
        let name = self.name()?;
        let (prefix, local) = split_qname(&name)?;
        let namespace = match prefix {
            Some(prefix) => self.owner()?.lookup_namespace(Some(prefix)),
            None => None,
        };
        Some(ExpandedName {
            namespace,
            local: local.to_string(),
        })
    }
}

impl AttributeValue {
    pub fn attribute(&self) -> Option<Attribute> {
        self.0.parent().and_then(Attribute::cast)
    }

    pub fn value(&self) -> String {
        self.0.value_text()
    }
}

impl Text {
    pub fn value(&self) -> String {
        self.0.text().to_string()
    }

    pub fn parent_element(&self) -> Option<Element> {
        self.0.parent().and_then(Element::cast)
    }
}
