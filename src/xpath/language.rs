//! The built-in embedded micro-languages

use std::fmt;

use super::parser::{
    Parse, parse_eqnames_or_hashed_keywords, parse_expression, parse_item_type, parse_name_tests,
    parse_pattern, parse_sequence_type, parse_tokens, parse_value_template,
};

/// A parser for one embedded micro-language.
///
/// Implementations must be shareable across threads: a resolved parser is
/// cached once per language handle and used from every analysis.
pub trait EmbeddedParser: Send + Sync + fmt::Debug {
    /// Display name of the language, used in diagnostics and logs
    fn name(&self) -> &str;

    /// Parse `text` into an embedded tree. Offsets are relative to `text`.
    fn parse(&self, text: &str) -> Parse;
}

/// The micro-languages embedded in XSLT attribute values and text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemaLanguage {
    /// Attribute and text value templates: text with `{expr}` regions
    ValueTemplate,
    /// An XPath expression
    Expression,
    /// An XSLT pattern
    Pattern,
    /// A sequence type, e.g. `xs:string*`
    SequenceType,
    /// An item type, e.g. `element(foo)`
    ItemType,
    /// Whitespace separated name tests
    NameTests,
    /// Whitespace separated EQNames and `#keyword`s
    EQNamesOrHashedKeywords,
    /// Whitespace separated NCName tokens
    Tokens,
}

impl SchemaLanguage {
    pub const ALL: [SchemaLanguage; 8] = [
        Self::ValueTemplate,
        Self::Expression,
        Self::Pattern,
        Self::SequenceType,
        Self::ItemType,
        Self::NameTests,
        Self::EQNamesOrHashedKeywords,
        Self::Tokens,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::ValueTemplate => "ValueTemplate",
            Self::Expression => "Expression",
            Self::Pattern => "Pattern",
            Self::SequenceType => "SequenceType",
            Self::ItemType => "ItemType",
            Self::NameTests => "NameTests",
            Self::EQNamesOrHashedKeywords => "EQNamesOrHashedKeywords",
            Self::Tokens => "Tokens",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|language| language.name() == name)
    }

    /// Whether `(: :)` comments may appear in this language
    pub fn allows_comments(self) -> bool {
        !matches!(self, Self::NameTests | Self::EQNamesOrHashedKeywords | Self::Tokens)
    }

    pub fn parse(self, text: &str) -> Parse {
        match self {
            Self::ValueTemplate => parse_value_template(text),
            Self::Expression => parse_expression(text),
            Self::Pattern => parse_pattern(text),
            Self::SequenceType => parse_sequence_type(text),
            Self::ItemType => parse_item_type(text),
            Self::NameTests => parse_name_tests(text),
            Self::EQNamesOrHashedKeywords => parse_eqnames_or_hashed_keywords(text),
            Self::Tokens => parse_tokens(text),
        }
    }
}

impl fmt::Display for SchemaLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl EmbeddedParser for SchemaLanguage {
    fn name(&self) -> &str {
        SchemaLanguage::name(*self)
    }

    fn parse(&self, text: &str) -> Parse {
        SchemaLanguage::parse(*self, text)
    }
}
