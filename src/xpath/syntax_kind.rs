//! Syntax kinds for the embedded XPath-family CST
//!
//! One tree language covers every embedded micro-language: value templates,
//! XPath expressions and patterns, sequence types, and the whitespace
//! separated name lists used by XSLT attributes.

use crate::base::HostLanguage;

/// All syntax kinds (tokens and nodes) of the embedded languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,
    COMMENT,            // (: ... :)

    // =========================================================================
    // LITERALS AND NAMES
    // =========================================================================
    INTEGER_LIT,        // 42
    DECIMAL_LIT,        // 4.2
    DOUBLE_LIT,         // 4.2e1
    STRING_LIT,         // "a" or 'a'
    NCNAME,             // local
    QNAME,              // prefix:local
    BRACED_URI,         // Q{uri}
    PREFIX_WILDCARD,    // prefix:*
    LOCAL_WILDCARD,     // *:local

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,            // (
    R_PAREN,            // )
    L_BRACKET,          // [
    R_BRACKET,          // ]
    L_BRACE,            // {
    R_BRACE,            // }
    COMMA,              // ,
    DOLLAR,             // $
    HASH,               // #
    QUESTION,           // ?
    AT,                 // @
    DOT,                // .
    DOT_DOT,            // ..
    SLASH,              // /
    SLASH_SLASH,        // //
    PIPE,               // |
    PIPE_PIPE,          // ||
    BANG,               // !
    EQ,                 // =
    BANG_EQ,            // !=
    LT,                 // <
    LT_EQ,              // <=
    GT,                 // >
    GT_EQ,              // >=
    LT_LT,              // <<
    GT_GT,              // >>
    PLUS,               // +
    MINUS,              // -
    STAR,               // *
    ASSIGN,             // :=
    COLON_COLON,        // ::
    COLON,              // :
    ARROW,              // =>

    // =========================================================================
    // VALUE TEMPLATE TOKENS
    // =========================================================================
    VALUE_CONTENTS,     // literal text outside enclosed expressions
    ESCAPED_CHARACTER,  // {{ or }}

    // =========================================================================
    // LEXICAL ERRORS
    // =========================================================================
    UNTERMINATED_STRING,
    UNTERMINATED_COMMENT,
    BAD_CHAR,

    // =========================================================================
    // ROOT NODES (one per micro-language)
    // =========================================================================
    VALUE_TEMPLATE,
    XPATH,
    PATTERN,
    TYPE_DECL,
    NAME_TEST_LIST,
    EQNAME_LIST,
    TOKEN_LIST,

    // =========================================================================
    // EXPRESSION NODES
    // =========================================================================
    ENCLOSED_EXPR,
    SEQUENCE_EXPR,
    FOR_EXPR,
    LET_EXPR,
    QUANTIFIED_EXPR,
    IF_EXPR,
    FOR_BINDING,
    LET_BINDING,
    QUANTIFIED_BINDING,
    VAR_NAME,
    BINARY_EXPR,
    SIMPLE_MAP_EXPR,
    INSTANCE_OF_EXPR,
    TREAT_EXPR,
    CASTABLE_EXPR,
    CAST_EXPR,
    ARROW_EXPR,
    UNARY_EXPR,
    PATH_EXPR,
    AXIS_STEP,
    NAME_TEST,
    KIND_TEST,
    PREDICATE,
    FILTER_EXPR,
    DYNAMIC_FUNCTION_CALL,
    LOOKUP_EXPR,
    UNARY_LOOKUP,
    FUNCTION_CALL,
    ARGUMENT_LIST,
    ARGUMENT_PLACEHOLDER,
    STRING_LITERAL,
    INTEGER_LITERAL,
    DECIMAL_LITERAL,
    DOUBLE_LITERAL,
    VAR_REF,
    PARENTHESIZED_EXPR,
    CONTEXT_ITEM_EXPR,
    NAMED_FUNCTION_REF,
    INLINE_FUNCTION_EXPR,
    PARAM_LIST,
    PARAM,
    FUNCTION_BODY,
    MAP_CONSTRUCTOR,
    MAP_ENTRY,
    SQUARE_ARRAY_CONSTRUCTOR,
    CURLY_ARRAY_CONSTRUCTOR,

    // =========================================================================
    // TYPE NODES
    // =========================================================================
    SEQUENCE_TYPE,
    SINGLE_TYPE,
    ANY_ITEM_TYPE,
    ATOMIC_TYPE,
    FUNCTION_TEST,
    MAP_TEST,
    ARRAY_TEST,
    PARENTHESIZED_ITEM_TYPE,
    OCCURRENCE_INDICATOR,
    TYPE_ANNOTATION,

    // =========================================================================
    // NAMES
    // =========================================================================
    EQNAME,
    HASHED_KEYWORD,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT | Self::UNTERMINATED_COMMENT)
    }

    /// Check if this token can spell an EQName or start one
    pub fn is_name(self) -> bool {
        matches!(self, Self::NCNAME | Self::QNAME | Self::BRACED_URI)
    }

    /// Check if this is a literal token
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INTEGER_LIT | Self::DECIMAL_LIT | Self::DOUBLE_LIT | Self::STRING_LIT
        )
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_PAREN as u16) && (self as u16) <= (Self::ARROW as u16)
    }

    /// Check if this kind is the root of an embedded tree
    pub fn is_root(self) -> bool {
        (self as u16) >= (Self::VALUE_TEMPLATE as u16) && (self as u16) <= (Self::TOKEN_LIST as u16)
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
pub enum XPathLanguage {}

impl rowan::Language for XPathLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

impl HostLanguage for XPathLanguage {}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<XPathLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<XPathLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<XPathLanguage>;
