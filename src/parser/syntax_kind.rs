//! Syntax kinds for the XML host CST
//!
//! This enum defines all node and token kinds in the host syntax tree.
//! The tree is lossless: every byte of the document lands in a token.

use text_size::{TextRange, TextSize};

use crate::base::{EmbeddedText, HostLanguage, HostNode};

/// All syntax kinds (tokens and nodes) of an XML/XSLT document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TOKENS - content mode
    // =========================================================================
    TEXT_CHUNK = 0,    // character data
    ENTITY_REF,        // &amp; &#10; &#x20;
    L_ANGLE,           // <
    L_ANGLE_SLASH,     // </
    COMMENT_TEXT,      // <!-- ... -->
    CDATA_TEXT,        // <![CDATA[ ... ]]>
    PI_TEXT,           // <? ... ?>
    DOCTYPE_TEXT,      // <!DOCTYPE ...>

    // =========================================================================
    // TOKENS - tag mode
    // =========================================================================
    WHITESPACE,
    NAME,              // xsl:template
    EQ,                // =
    QUOTED_VALUE,      // "..." or '...'
    R_ANGLE,           // >
    SLASH_R_ANGLE,     // />

    // =========================================================================
    // TOKENS - lexical errors
    // =========================================================================
    UNTERMINATED_COMMENT,
    UNTERMINATED_CDATA,
    UNTERMINATED_PI,
    UNTERMINATED_VALUE,
    BAD_CHAR,

    // =========================================================================
    // NODES
    // =========================================================================
    DOCUMENT,
    DOCTYPE,
    ELEMENT,
    START_TAG,
    END_TAG,
    ATTRIBUTE,
    ATTRIBUTE_VALUE,
    TEXT,
    CDATA,
    COMMENT,
    PROCESSING_INSTRUCTION,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token inside a tag
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE)
    }

    /// Check if this kind is a lexical error token
    pub fn is_lex_error(self) -> bool {
        matches!(
            self,
            Self::UNTERMINATED_COMMENT
                | Self::UNTERMINATED_CDATA
                | Self::UNTERMINATED_PI
                | Self::UNTERMINATED_VALUE
                | Self::BAD_CHAR
        )
    }

    /// Check if this is a node kind (as opposed to a token kind)
    pub fn is_node(self) -> bool {
        (self as u16) >= (Self::DOCUMENT as u16) && (self as u16) <= (Self::ERROR as u16)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum XmlLanguage {}

impl rowan::Language for XmlLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

impl HostLanguage for XmlLanguage {
    /// Attribute values exclude their quotes; CDATA sections exclude their
    /// markers. Everything else carries its whole text.
    fn value_range(node: &SyntaxNode) -> TextRange {
        let range = node.text_range();
        match node.kind() {
            SyntaxKind::ATTRIBUTE_VALUE => {
                let text = node.text().to_string();
                let quoted = text.len() >= 2
                    && (text.starts_with('"') && text.ends_with('"')
                        || text.starts_with('\'') && text.ends_with('\''));
                if quoted {
                    shrink(range, 1, 1)
                } else if text.starts_with(['"', '\'']) {
                    shrink(range, 1, 0)
                } else {
                    range
                }
            }
            SyntaxKind::ATTRIBUTE => node
                .children()
                .find(|child| child.kind() == SyntaxKind::ATTRIBUTE_VALUE)
                .map(|value| Self::value_range(&value))
                .unwrap_or_else(|| TextRange::empty(range.end())),
            SyntaxKind::CDATA => {
                let text = node.text().to_string();
                let tail = if text.ends_with("]]>") { 3 } else { 0 };
                shrink(range, "<![CDATA[".len().min(text.len()) as u32, tail)
            }
            _ => range,
        }
    }

    /// Attribute values and text decode entity and character references.
    fn embedded_text(node: &SyntaxNode) -> EmbeddedText {
        let start = Self::value_range(node).start();
        let raw = HostNode::value_text(node);
        match node.kind() {
            SyntaxKind::ATTRIBUTE_VALUE | SyntaxKind::ATTRIBUTE | SyntaxKind::TEXT => {
                EmbeddedText::decode_xml(&raw, start)
            }
            _ => EmbeddedText::verbatim(raw, start),
        }
    }
}

fn shrink(range: TextRange, head: u32, tail: u32) -> TextRange {
    let start = range.start() + TextSize::new(head);
    let end = range.end().checked_sub(TextSize::new(tail)).unwrap_or(start);
    TextRange::new(start, end.max(start))
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<XmlLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<XmlLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<XmlLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<XmlLanguage>;
