//! Recursive descent parser for XML documents
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.

use super::errors::{ErrorCode, SyntaxError};
use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};
use rustc_hash::FxHashSet;

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse an XML document into a CST
pub fn parse_xml(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens, TextSize::of(input));
    parser.parse_document();
    parser.finish()
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    eof: TextSize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], eof: TextSize) -> Self {
        Self {
            tokens,
            pos: 0,
            eof,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn current_text(&self) -> &'a str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    fn current_range(&self) -> TextRange {
        self.current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| TextRange::empty(self.eof))
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        !self.at_eof() && self.current_kind() == kind
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        let tokens = self.tokens;
        if let Some(token) = tokens.get(self.pos) {
            let range = TextRange::at(token.offset, TextSize::of(token.text));
            self.report_lex_error(token.kind, range);
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>, code: ErrorCode) {
        let range = self.current_range();
        self.errors.push(SyntaxError::new(message, range, code));
    }

    fn report_lex_error(&mut self, kind: SyntaxKind, range: TextRange) {
        let (message, code) = match kind {
            SyntaxKind::UNTERMINATED_COMMENT => ("unterminated comment", ErrorCode::E0103),
            SyntaxKind::UNTERMINATED_CDATA => ("unterminated CDATA section", ErrorCode::E0103),
            SyntaxKind::UNTERMINATED_PI => {
                ("unterminated processing instruction", ErrorCode::E0103)
            }
            SyntaxKind::UNTERMINATED_VALUE => ("unterminated attribute value", ErrorCode::E0102),
            SyntaxKind::BAD_CHAR => ("invalid character", ErrorCode::E0101),
            _ => return,
        };
        self.errors.push(SyntaxError::new(message, range, code));
    }

    /// Wrap the current token in an ERROR node and move past it
    fn error_bump(&mut self, message: impl Into<String>, code: ErrorCode) {
        self.error(message, code);
        self.builder.start_node(SyntaxKind::ERROR.into());
        self.bump();
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// Document = Misc* Element Misc*
    fn parse_document(&mut self) {
        self.start_node(SyntaxKind::DOCUMENT);

        let mut seen_root = false;
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::TEXT_CHUNK if self.current_text().trim().is_empty() => self.bump(),
                SyntaxKind::TEXT_CHUNK | SyntaxKind::ENTITY_REF | SyntaxKind::CDATA_TEXT => {
                    self.error_bump(
                        "text is not allowed outside the document element",
                        ErrorCode::E0208,
                    );
                }
                SyntaxKind::L_ANGLE => {
                    if seen_root {
                        self.error("only one document element is allowed", ErrorCode::E0208);
                    }
                    seen_root = true;
                    self.parse_element();
                }
                SyntaxKind::L_ANGLE_SLASH => {
                    self.error("end tag without a matching start tag", ErrorCode::E0205);
                    self.start_node(SyntaxKind::ERROR);
                    self.parse_end_tag();
                    self.finish_node();
                }
                SyntaxKind::DOCTYPE_TEXT => {
                    self.start_node(SyntaxKind::DOCTYPE);
                    self.bump();
                    self.finish_node();
                }
                _ => self.parse_misc(),
            }
        }

        self.finish_node();
    }

    /// Comments, processing instructions and stray tokens
    fn parse_misc(&mut self) {
        match self.current_kind() {
            SyntaxKind::COMMENT_TEXT | SyntaxKind::UNTERMINATED_COMMENT => {
                self.start_node(SyntaxKind::COMMENT);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::PI_TEXT | SyntaxKind::UNTERMINATED_PI => {
                self.start_node(SyntaxKind::PROCESSING_INSTRUCTION);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::UNTERMINATED_CDATA => {
                self.start_node(SyntaxKind::CDATA);
                self.bump();
                self.finish_node();
            }
            _ => {
                // Lexical errors are reported by bump itself
                let message = format!("unexpected {:?}", self.current_kind());
                if self.current_kind().is_lex_error() {
                    self.start_node(SyntaxKind::ERROR);
                    self.bump();
                    self.finish_node();
                } else {
                    self.error_bump(message, ErrorCode::E0901);
                }
            }
        }
    }

    /// Element = StartTag (Content EndTag)?
    fn parse_element(&mut self) {
        self.start_node(SyntaxKind::ELEMENT);
        let start_range = self.current_range();
        let (name, self_closing) = self.parse_start_tag();

        if !self_closing {
            self.parse_content();
            if self.at(SyntaxKind::L_ANGLE_SLASH) {
                let end_range = self.current_range();
                let end_name = self.parse_end_tag();
                if end_name.is_some() && end_name.as_deref() != name.as_deref() {
                    let err = SyntaxError::builder(ErrorCode::E0206)
                        .message(format!(
                            "end tag '{}' does not match start tag '{}'",
                            end_name.as_deref().unwrap_or_default(),
                            name.as_deref().unwrap_or_default()
                        ))
                        .range(end_range)
                        .related("start tag here", start_range)
                        .build();
                    self.errors.push(err);
                }
            } else {
                let err = SyntaxError::builder(ErrorCode::E0207)
                    .message(format!(
                        "element '{}' is never closed",
                        name.as_deref().unwrap_or_default()
                    ))
                    .range(TextRange::empty(self.eof))
                    .related("start tag here", start_range)
                    .build();
                self.errors.push(err);
            }
        }

        self.finish_node();
    }

    /// StartTag = '<' Name (S Attribute)* S? ('>' | '/>')
    ///
    /// Returns the element name and whether the tag was self-closing.
    fn parse_start_tag(&mut self) -> (Option<String>, bool) {
        self.start_node(SyntaxKind::START_TAG);
        self.bump(); // <

        let name = if self.at(SyntaxKind::NAME) {
            let name = self.current_text().to_string();
            self.bump();
            Some(name)
        } else {
            self.error("expected element name", ErrorCode::E0301);
            None
        };

        let mut seen = FxHashSet::default();
        let self_closing = loop {
            self.skip_trivia();
            match self.current_kind() {
                _ if self.at_eof() => {
                    self.error("unclosed start tag", ErrorCode::E0201);
                    break true;
                }
                SyntaxKind::R_ANGLE => {
                    self.bump();
                    break false;
                }
                SyntaxKind::SLASH_R_ANGLE => {
                    self.bump();
                    break true;
                }
                SyntaxKind::NAME => self.parse_attribute(&mut seen),
                SyntaxKind::QUOTED_VALUE | SyntaxKind::UNTERMINATED_VALUE | SyntaxKind::EQ => {
                    self.error_bump("expected attribute name", ErrorCode::E0301);
                }
                _ => {
                    // A new tag or content token: the start tag was never closed
                    self.error("unclosed start tag", ErrorCode::E0201);
                    break true;
                }
            }
        };

        self.finish_node();
        (name, self_closing)
    }

    /// Attribute = Name S? '=' S? QuotedValue
    fn parse_attribute(&mut self, seen: &mut FxHashSet<&'a str>) {
        self.start_node(SyntaxKind::ATTRIBUTE);
        let name = self.current_text();
        if !seen.insert(name) {
            self.error(format!("duplicate attribute '{}'", name), ErrorCode::E0303);
        }
        self.bump();
        self.skip_trivia();

        if self.eat(SyntaxKind::EQ) {
            self.skip_trivia();
            if self.at(SyntaxKind::QUOTED_VALUE) || self.at(SyntaxKind::UNTERMINATED_VALUE) {
                self.start_node(SyntaxKind::ATTRIBUTE_VALUE);
                self.bump();
                self.finish_node();
            } else {
                self.error(
                    format!("expected a quoted value for attribute '{}'", name),
                    ErrorCode::E0302,
                );
            }
        } else {
            let err = SyntaxError::new(
                format!("attribute '{}' has no value", name),
                self.current_range(),
                ErrorCode::E0302,
            )
            .with_hint("attributes are written as name=\"value\"");
            self.errors.push(err);
        }

        self.finish_node();
    }

    /// Content = (Text | Element | Comment | PI | CDATA)*
    fn parse_content(&mut self) {
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::L_ANGLE_SLASH => return,
                SyntaxKind::L_ANGLE => self.parse_element(),
                SyntaxKind::TEXT_CHUNK | SyntaxKind::ENTITY_REF | SyntaxKind::BAD_CHAR => {
                    self.parse_text();
                }
                SyntaxKind::CDATA_TEXT => {
                    self.start_node(SyntaxKind::CDATA);
                    self.bump();
                    self.finish_node();
                }
                SyntaxKind::DOCTYPE_TEXT => {
                    self.error_bump("DOCTYPE is only allowed in the prolog", ErrorCode::E0901);
                }
                _ => self.parse_misc(),
            }
        }
    }

    /// Text = (CharData | EntityRef)+
    fn parse_text(&mut self) {
        self.start_node(SyntaxKind::TEXT);
        while matches!(
            self.current_kind(),
            SyntaxKind::TEXT_CHUNK | SyntaxKind::ENTITY_REF | SyntaxKind::BAD_CHAR
        ) && !self.at_eof()
        {
            self.bump();
        }
        self.finish_node();
    }

    /// EndTag = '</' Name S? '>'
    fn parse_end_tag(&mut self) -> Option<String> {
        self.start_node(SyntaxKind::END_TAG);
        self.bump(); // </

        let name = if self.at(SyntaxKind::NAME) {
            let name = self.current_text().to_string();
            self.bump();
            Some(name)
        } else {
            self.error("expected element name in end tag", ErrorCode::E0301);
            None
        };
        self.skip_trivia();
        if !self.eat(SyntaxKind::R_ANGLE) {
            self.error("unclosed end tag", ErrorCode::E0201);
            // Swallow anything left in the tag so content parsing can resume
            while !self.at_eof()
                && !matches!(
                    self.current_kind(),
                    SyntaxKind::L_ANGLE | SyntaxKind::L_ANGLE_SLASH | SyntaxKind::TEXT_CHUNK
                )
            {
                let closes = self.at(SyntaxKind::R_ANGLE) || self.at(SyntaxKind::SLASH_R_ANGLE);
                self.bump();
                if closes {
                    break;
                }
            }
        }

        self.finish_node();
        name
    }
}
