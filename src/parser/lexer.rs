//! Logos-based lexer for XML documents
//!
//! XML needs two token sets: character data between tags and the inside of
//! a tag. The lexer morphs between two logos lexers at `<`, `</`, `>` and `/>`.

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

enum Mode<'a> {
    Content(logos::Lexer<'a, ContentToken>),
    Tag(logos::Lexer<'a, TagToken>),
    Done,
}

/// Lexer wrapping the two logos-generated tokenizers
pub struct Lexer<'a> {
    mode: Mode<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            mode: Mode::Content(ContentToken::lexer(input)),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match std::mem::replace(&mut self.mode, Mode::Done) {
            Mode::Content(mut lexer) => {
                let token = lexer.next()?;
                let text = lexer.slice();
                let offset = TextSize::new(lexer.span().start as u32);
                let kind = match token {
                    Ok(t) => t.into(),
                    Err(()) => SyntaxKind::BAD_CHAR,
                };
                self.mode = if matches!(kind, SyntaxKind::L_ANGLE | SyntaxKind::L_ANGLE_SLASH) {
                    Mode::Tag(lexer.morph())
                } else {
                    Mode::Content(lexer)
                };
                Some(Token { kind, text, offset })
            }
            Mode::Tag(mut lexer) => {
                let token = lexer.next()?;
                let text = lexer.slice();
                let offset = TextSize::new(lexer.span().start as u32);
                let kind = match token {
                    Ok(t) => t.into(),
                    Err(()) => SyntaxKind::BAD_CHAR,
                };
                self.mode = if matches!(kind, SyntaxKind::R_ANGLE | SyntaxKind::SLASH_R_ANGLE) {
                    Mode::Content(lexer.morph())
                } else {
                    Mode::Tag(lexer)
                };
                Some(Token { kind, text, offset })
            }
            Mode::Done => None,
        }
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Tokens between tags
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum ContentToken {
    #[regex(r"[^<&]+")]
    Text,

    #[regex(r"&[A-Za-z_:][A-Za-z0-9_:.\-]*;")]
    #[regex(r"&#[0-9]+;")]
    #[regex(r"&#x[0-9a-fA-F]+;")]
    EntityRef,

    #[token("<")]
    LAngle,

    #[token("</")]
    LAngleSlash,

    #[token("<!--", lex_comment)]
    Comment,

    #[token("<![CDATA[", lex_cdata)]
    Cdata,

    #[token("<?", lex_pi)]
    ProcessingInstruction,

    #[token("<!DOCTYPE", lex_doctype)]
    Doctype,

    UnterminatedComment,

    UnterminatedCdata,

    UnterminatedPi,

    #[token("&")]
    BareAmpersand,
}

/// Consume markup up to and including `terminator`, or to end of input
fn close_markup(
    lex: &mut logos::Lexer<'_, ContentToken>,
    terminator: &str,
    closed: ContentToken,
    unterminated: ContentToken,
) -> ContentToken {
    match lex.remainder().find(terminator) {
        Some(end) => {
            lex.bump(end + terminator.len());
            closed
        }
        None => {
            lex.bump(lex.remainder().len());
            unterminated
        }
    }
}

fn lex_comment(lex: &mut logos::Lexer<'_, ContentToken>) -> ContentToken {
    close_markup(lex, "-->", ContentToken::Comment, ContentToken::UnterminatedComment)
}

fn lex_cdata(lex: &mut logos::Lexer<'_, ContentToken>) -> ContentToken {
    close_markup(lex, "]]>", ContentToken::Cdata, ContentToken::UnterminatedCdata)
}

fn lex_pi(lex: &mut logos::Lexer<'_, ContentToken>) -> ContentToken {
    close_markup(lex, "?>", ContentToken::ProcessingInstruction, ContentToken::UnterminatedPi)
}

// No internal subset support: the declaration ends at the first `>`
fn lex_doctype(lex: &mut logos::Lexer<'_, ContentToken>) -> ContentToken {
    close_markup(lex, ">", ContentToken::Doctype, ContentToken::Doctype)
}

impl From<ContentToken> for SyntaxKind {
    fn from(token: ContentToken) -> Self {
        match token {
            ContentToken::Text => SyntaxKind::TEXT_CHUNK,
            ContentToken::EntityRef => SyntaxKind::ENTITY_REF,
            ContentToken::LAngle => SyntaxKind::L_ANGLE,
            ContentToken::LAngleSlash => SyntaxKind::L_ANGLE_SLASH,
            ContentToken::Comment => SyntaxKind::COMMENT_TEXT,
            ContentToken::Cdata => SyntaxKind::CDATA_TEXT,
            ContentToken::ProcessingInstruction => SyntaxKind::PI_TEXT,
            ContentToken::Doctype => SyntaxKind::DOCTYPE_TEXT,
            ContentToken::UnterminatedComment => SyntaxKind::UNTERMINATED_COMMENT,
            ContentToken::UnterminatedCdata => SyntaxKind::UNTERMINATED_CDATA,
            ContentToken::UnterminatedPi => SyntaxKind::UNTERMINATED_PI,
            ContentToken::BareAmpersand => SyntaxKind::BAD_CHAR,
        }
    }
}

/// Tokens inside a start or end tag
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum TagToken {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"[A-Za-z_:\x{C0}-\x{10FFFF}][A-Za-z0-9_:.\-\x{B7}\x{C0}-\x{10FFFF}]*")]
    Name,

    #[token("=")]
    Eq,

    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^']*'")]
    QuotedValue,

    #[regex(r#""[^"]*"#)]
    #[regex(r"'[^']*")]
    UnterminatedValue,

    #[token(">")]
    RAngle,

    #[token("/>")]
    SlashRAngle,
}

impl From<TagToken> for SyntaxKind {
    fn from(token: TagToken) -> Self {
        match token {
            TagToken::Whitespace => SyntaxKind::WHITESPACE,
            TagToken::Name => SyntaxKind::NAME,
            TagToken::Eq => SyntaxKind::EQ,
            TagToken::QuotedValue => SyntaxKind::QUOTED_VALUE,
            TagToken::UnterminatedValue => SyntaxKind::UNTERMINATED_VALUE,
            TagToken::RAngle => SyntaxKind::R_ANGLE,
            TagToken::SlashRAngle => SyntaxKind::SLASH_R_ANGLE,
        }
    }
}
