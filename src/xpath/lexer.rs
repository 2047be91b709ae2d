//! Logos-based lexer for the embedded XPath-family languages
//!
//! Two entry points: [`tokenize`] lexes a plain expression (or name list),
//! [`tokenize_value_template`] splits a value template into literal runs
//! and brace-delimited expressions, lexing each expression with the XPath
//! token set.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, XPathToken>,
    base: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_offset(input, 0)
    }

    /// Lex `input` as if it started at `base` in a larger text
    fn with_offset(input: &'a str, base: usize) -> Self {
        Self {
            inner: XPathToken::lexer(input),
            base,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new((self.base + self.inner.span().start) as u32);

        let kind = match token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::BAD_CHAR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire expression into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Tokenize a value template.
///
/// Outside braces the text is split into `VALUE_CONTENTS` runs and
/// `ESCAPED_CHARACTER` tokens for `{{` and `}}`. A single `{` opens an
/// enclosed expression which is lexed with the XPath token set until the
/// `}` that balances it. A `}` outside any expression is emitted as a
/// stray `R_BRACE` for the parser to report.
pub fn tokenize_value_template(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        let rest = &input[pos..];
        let offset = TextSize::new(pos as u32);

        if rest.starts_with("{{") || rest.starts_with("}}") {
            tokens.push(Token {
                kind: SyntaxKind::ESCAPED_CHARACTER,
                text: &rest[..2],
                offset,
            });
            pos += 2;
        } else if rest.starts_with('}') {
            tokens.push(Token {
                kind: SyntaxKind::R_BRACE,
                text: &rest[..1],
                offset,
            });
            pos += 1;
        } else if rest.starts_with('{') {
            tokens.push(Token {
                kind: SyntaxKind::L_BRACE,
                text: &rest[..1],
                offset,
            });
            pos = lex_enclosed(input, pos + 1, &mut tokens);
        } else {
            let len = rest.find(['{', '}']).unwrap_or(rest.len());
            tokens.push(Token {
                kind: SyntaxKind::VALUE_CONTENTS,
                text: &rest[..len],
                offset,
            });
            pos += len;
        }
    }

    tokens
}

/// Lex one enclosed expression starting at `start`, returning the position
/// just past its closing brace (or the end of input when unclosed).
fn lex_enclosed<'a>(input: &'a str, start: usize, tokens: &mut Vec<Token<'a>>) -> usize {
    let mut depth = 0usize;
    for token in Lexer::with_offset(&input[start..], start) {
        let end = usize::from(token.offset) + token.text.len();
        match token.kind {
            SyntaxKind::L_BRACE => depth += 1,
            SyntaxKind::R_BRACE if depth == 0 => {
                tokens.push(token);
                return end;
            }
            SyntaxKind::R_BRACE => depth -= 1,
            _ => {}
        }
        tokens.push(token);
    }
    input.len()
}

/// Scan a possibly nested `(: ... :)` comment. The token value records
/// whether the comment was closed.
fn lex_comment(lex: &mut logos::Lexer<XPathToken>) -> Option<bool> {
    let bytes = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i..].starts_with(b"(:") {
            depth += 1;
            i += 2;
        } else if bytes[i..].starts_with(b":)") {
            depth -= 1;
            i += 2;
            if depth == 0 {
                lex.bump(i);
                return Some(true);
            }
        } else {
            i += 1;
        }
    }
    lex.bump(bytes.len());
    Some(false)
}

/// Logos token enum - used internally for lexing
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum XPathToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[token("(:", lex_comment)]
    Comment(bool),

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"\.[0-9]+")]
    #[regex(r"[0-9]+\.[0-9]*")]
    Decimal,

    #[regex(r"(\.[0-9]+|[0-9]+(\.[0-9]*)?)[eE][+-]?[0-9]+")]
    Double,

    #[regex(r#""([^"]|"")*""#)]
    #[regex(r"'([^']|'')*'")]
    String,

    #[regex(r#""([^"]|"")*"#)]
    #[regex(r"'([^']|'')*")]
    UnterminatedString,

    // =========================================================================
    // NAMES
    // =========================================================================
    #[regex(r"[A-Za-z_\x{C0}-\x{10FFFF}][A-Za-z0-9_.\-\x{B7}\x{C0}-\x{10FFFF}]*")]
    NcName,

    #[regex(
        r"[A-Za-z_\x{C0}-\x{10FFFF}][A-Za-z0-9_.\-\x{B7}\x{C0}-\x{10FFFF}]*:[A-Za-z_\x{C0}-\x{10FFFF}][A-Za-z0-9_.\-\x{B7}\x{C0}-\x{10FFFF}]*"
    )]
    QName,

    #[regex(r"[A-Za-z_\x{C0}-\x{10FFFF}][A-Za-z0-9_.\-\x{B7}\x{C0}-\x{10FFFF}]*:\*")]
    PrefixWildcard,

    #[regex(r"\*:[A-Za-z_\x{C0}-\x{10FFFF}][A-Za-z0-9_.\-\x{B7}\x{C0}-\x{10FFFF}]*")]
    LocalWildcard,

    #[regex(r"Q\{[^{}]*\}")]
    BracedUri,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token("$")]
    Dollar,
    #[token("#")]
    Hash,
    #[token("?")]
    Question,
    #[token("@")]
    At,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token("/")]
    Slash,
    #[token("//")]
    SlashSlash,
    #[token("|")]
    Pipe,
    #[token("||")]
    PipePipe,
    #[token("!")]
    Bang,
    #[token("=")]
    Eq,
    #[token("!=")]
    BangEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token(":=")]
    Assign,
    #[token("::")]
    ColonColon,
    #[token(":")]
    Colon,
    #[token("=>")]
    Arrow,
}

impl From<XPathToken> for SyntaxKind {
    fn from(token: XPathToken) -> Self {
        match token {
            XPathToken::Whitespace => SyntaxKind::WHITESPACE,
            XPathToken::Comment(true) => SyntaxKind::COMMENT,
            XPathToken::Comment(false) => SyntaxKind::UNTERMINATED_COMMENT,
            XPathToken::Integer => SyntaxKind::INTEGER_LIT,
            XPathToken::Decimal => SyntaxKind::DECIMAL_LIT,
            XPathToken::Double => SyntaxKind::DOUBLE_LIT,
            XPathToken::String => SyntaxKind::STRING_LIT,
            XPathToken::UnterminatedString => SyntaxKind::UNTERMINATED_STRING,
            XPathToken::NcName => SyntaxKind::NCNAME,
            XPathToken::QName => SyntaxKind::QNAME,
            XPathToken::PrefixWildcard => SyntaxKind::PREFIX_WILDCARD,
            XPathToken::LocalWildcard => SyntaxKind::LOCAL_WILDCARD,
            XPathToken::BracedUri => SyntaxKind::BRACED_URI,
            XPathToken::LParen => SyntaxKind::L_PAREN,
            XPathToken::RParen => SyntaxKind::R_PAREN,
            XPathToken::LBracket => SyntaxKind::L_BRACKET,
            XPathToken::RBracket => SyntaxKind::R_BRACKET,
            XPathToken::LBrace => SyntaxKind::L_BRACE,
            XPathToken::RBrace => SyntaxKind::R_BRACE,
            XPathToken::Comma => SyntaxKind::COMMA,
            XPathToken::Dollar => SyntaxKind::DOLLAR,
            XPathToken::Hash => SyntaxKind::HASH,
            XPathToken::Question => SyntaxKind::QUESTION,
            XPathToken::At => SyntaxKind::AT,
            XPathToken::Dot => SyntaxKind::DOT,
            XPathToken::DotDot => SyntaxKind::DOT_DOT,
            XPathToken::Slash => SyntaxKind::SLASH,
            XPathToken::SlashSlash => SyntaxKind::SLASH_SLASH,
            XPathToken::Pipe => SyntaxKind::PIPE,
            XPathToken::PipePipe => SyntaxKind::PIPE_PIPE,
            XPathToken::Bang => SyntaxKind::BANG,
            XPathToken::Eq => SyntaxKind::EQ,
            XPathToken::BangEq => SyntaxKind::BANG_EQ,
            XPathToken::Lt => SyntaxKind::LT,
            XPathToken::LtEq => SyntaxKind::LT_EQ,
            XPathToken::Gt => SyntaxKind::GT,
            XPathToken::GtEq => SyntaxKind::GT_EQ,
            XPathToken::LtLt => SyntaxKind::LT_LT,
            XPathToken::GtGt => SyntaxKind::GT_GT,
            XPathToken::Plus => SyntaxKind::PLUS,
            XPathToken::Minus => SyntaxKind::MINUS,
            XPathToken::Star => SyntaxKind::STAR,
            XPathToken::Assign => SyntaxKind::ASSIGN,
            XPathToken::ColonColon => SyntaxKind::COLON_COLON,
            XPathToken::Colon => SyntaxKind::COLON,
            XPathToken::Arrow => SyntaxKind::ARROW,
        }
    }
}
