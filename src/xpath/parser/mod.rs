//! Recursive descent parser for the embedded XPath-family languages
//!
//! Builds a rowan GreenNode tree from tokens. Every entry point produces a
//! lossless tree: trivia and unexpected tokens end up in the tree, errors
//! are collected on the side.
//!
//! Grammar rules live in submodules:
//! - `expressions`: XPath 3.1 expressions and value templates
//! - `types`: sequence types, item types, kind tests
//! - `lists`: whitespace separated schema lists (name tests, EQNames, tokens)

mod expressions;
mod lists;
mod types;

use super::lexer::{Token, tokenize, tokenize_value_template};
use super::syntax_kind::SyntaxKind;
use crate::parser::{ErrorCode, SyntaxError};
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

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

/// Parse an attribute value template or text value template
pub fn parse_value_template(input: &str) -> Parse {
    let tokens = tokenize_value_template(input);
    run(&tokens, input, true, Parser::value_template)
}

/// Parse an XPath expression
pub fn parse_expression(input: &str) -> Parse {
    let tokens = tokenize(input);
    run(&tokens, input, true, |p| p.expression_root(SyntaxKind::XPATH))
}

/// Parse an XSLT pattern
pub fn parse_pattern(input: &str) -> Parse {
    let tokens = tokenize(input);
    run(&tokens, input, true, |p| p.expression_root(SyntaxKind::PATTERN))
}

/// Parse a sequence type such as `xs:string*`
pub fn parse_sequence_type(input: &str) -> Parse {
    let tokens = tokenize(input);
    run(&tokens, input, true, Parser::sequence_type_root)
}

/// Parse an item type such as `element(foo)`
pub fn parse_item_type(input: &str) -> Parse {
    let tokens = tokenize(input);
    run(&tokens, input, true, Parser::item_type_root)
}

/// Parse a whitespace separated list of name tests
pub fn parse_name_tests(input: &str) -> Parse {
    let tokens = tokenize(input);
    run(&tokens, input, false, Parser::name_test_list)
}

/// Parse a whitespace separated list of EQNames and `#keyword`s
pub fn parse_eqnames_or_hashed_keywords(input: &str) -> Parse {
    let tokens = tokenize(input);
    run(&tokens, input, false, Parser::eqname_list)
}

/// Parse a whitespace separated list of NCName tokens
pub fn parse_tokens(input: &str) -> Parse {
    let tokens = tokenize(input);
    run(&tokens, input, false, Parser::token_list)
}

fn run<'a>(
    tokens: &'a [Token<'a>],
    input: &str,
    comments_allowed: bool,
    rule: impl FnOnce(&mut Parser<'a>),
) -> Parse {
    let mut parser = Parser::new(tokens, TextSize::of(input), comments_allowed);
    rule(&mut parser);
    parser.finish()
}

/// Function names that cannot be called unprefixed because they start
/// other constructs.
const RESERVED_FUNCTION_NAMES: &[&str] = &[
    "array",
    "attribute",
    "comment",
    "document-node",
    "element",
    "empty-sequence",
    "function",
    "if",
    "item",
    "map",
    "namespace-node",
    "node",
    "processing-instruction",
    "schema-attribute",
    "schema-element",
    "switch",
    "text",
    "typeswitch",
];

/// Names that start a kind test when followed by `(`
const KIND_TEST_NAMES: &[&str] = &[
    "attribute",
    "comment",
    "document-node",
    "element",
    "namespace-node",
    "node",
    "processing-instruction",
    "schema-attribute",
    "schema-element",
    "text",
];

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    eof: TextSize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
    comments_allowed: bool,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], eof: TextSize, comments_allowed: bool) -> Self {
        Self {
            tokens,
            pos: 0,
            eof,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
            comments_allowed,
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection (trivia is skipped transparently)
    // =========================================================================

    /// Index of the n-th non-trivia token from the current position
    fn peek_index(&self, n: usize) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .skip(self.pos)
            .filter(|(_, t)| !t.kind.is_trivia())
            .nth(n)
            .map(|(i, _)| i)
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.peek_index(n)
            .map(|i| self.tokens[i].kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    fn nth_text(&self, n: usize) -> &'a str {
        self.peek_index(n).map(|i| self.tokens[i].text).unwrap_or("")
    }

    fn current_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn current_text(&self) -> &'a str {
        self.nth_text(0)
    }

    fn current_range(&self) -> TextRange {
        self.peek_index(0)
            .map(|i| token_range(&self.tokens[i]))
            .unwrap_or_else(|| TextRange::empty(self.eof))
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        !self.at_end() && self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        !self.at_end() && kinds.contains(&self.current_kind())
    }

    fn at_end(&self) -> bool {
        self.peek_index(0).is_none()
    }

    fn nth_is_keyword(&self, n: usize, keyword: &str) -> bool {
        self.nth(n) == SyntaxKind::NCNAME && self.nth_text(n) == keyword
    }

    /// Keywords are contextual: an unprefixed name spelled like the keyword
    fn at_keyword(&self, keyword: &str) -> bool {
        self.nth_is_keyword(0, keyword)
    }

    /// Is the token directly at the current position (no trivia) of `kind`
    fn at_adjacent(&self, kind: SyntaxKind) -> bool {
        self.tokens.get(self.pos).is_some_and(|t| t.kind == kind)
    }

    /// Number of tokens spelling the EQName at the n-th position (0 if none)
    fn eqname_len(&self, n: usize) -> usize {
        match self.nth(n) {
            SyntaxKind::NCNAME | SyntaxKind::QNAME => 1,
            SyntaxKind::BRACED_URI if self.nth(n + 1) == SyntaxKind::NCNAME => 2,
            _ => 0,
        }
    }

    fn at_kind_test(&self) -> bool {
        self.nth(0) == SyntaxKind::NCNAME
            && self.nth(1) == SyntaxKind::L_PAREN
            && KIND_TEST_NAMES.contains(&self.current_text())
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    /// Emit pending trivia into the current node
    fn eat_trivia(&mut self) {
        let tokens = self.tokens;
        while let Some(token) = tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            let range = token_range(token);
            if token.kind == SyntaxKind::UNTERMINATED_COMMENT {
                self.errors
                    .push(SyntaxError::new("unterminated comment", range, ErrorCode::E0103));
            }
            if token.kind == SyntaxKind::WHITESPACE || self.comments_allowed {
                self.builder.token(token.kind.into(), token.text);
            } else {
                self.errors.push(SyntaxError::new(
                    "comments are not allowed in this schema type",
                    range,
                    ErrorCode::E0501,
                ));
                self.builder.start_node(SyntaxKind::ERROR.into());
                self.builder.token(token.kind.into(), token.text);
                self.builder.finish_node();
            }
            self.pos += 1;
        }
    }

    fn bump(&mut self) {
        self.eat_trivia();
        let tokens = self.tokens;
        if let Some(token) = tokens.get(self.pos) {
            self.report_lex_error(token);
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

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(keyword) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error(format!("expected {what}"), ErrorCode::E0902);
        false
    }

    fn expect_keyword(&mut self, keyword: &str) -> bool {
        if self.eat_keyword(keyword) {
            return true;
        }
        self.error(format!("expected '{keyword}'"), ErrorCode::E0405);
        false
    }

    /// Expect the delimiter closing the one opened at `opened`
    fn expect_closing(&mut self, kind: SyntaxKind, opened: TextRange, code: ErrorCode) -> bool {
        if self.eat(kind) {
            return true;
        }
        let delimiter = match kind {
            SyntaxKind::R_PAREN => "')'",
            SyntaxKind::R_BRACKET => "']'",
            SyntaxKind::R_BRACE => "'}'",
            _ => "closing delimiter",
        };
        let err = SyntaxError::builder(code)
            .message(format!("expected {delimiter}"))
            .range(self.current_range())
            .related("opened here", opened)
            .build();
        self.errors.push(err);
        false
    }

    /// Consume the EQName at the current position, if any
    fn eat_eqname_tokens(&mut self) -> bool {
        match self.eqname_len(0) {
            0 => false,
            len => {
                for _ in 0..len {
                    self.bump();
                }
                true
            }
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>, code: ErrorCode) {
        let range = self.current_range();
        self.errors.push(SyntaxError::new(message, range, code));
    }

    fn report_lex_error(&mut self, token: &Token<'_>) {
        let (message, code) = match token.kind {
            SyntaxKind::UNTERMINATED_STRING => ("unterminated string literal", ErrorCode::E0102),
            SyntaxKind::BAD_CHAR => ("invalid character", ErrorCode::E0101),
            _ => return,
        };
        self.errors
            .push(SyntaxError::new(message, token_range(token), code));
    }

    /// Wrap the current token in an ERROR node and move past it
    fn error_bump(&mut self, message: impl Into<String>, code: ErrorCode) {
        self.error(message, code);
        self.start_node(SyntaxKind::ERROR);
        self.bump();
        self.finish_node();
    }

    /// Report and wrap everything left in the input
    fn expect_end(&mut self, what: &str) {
        if self.at_end() {
            return;
        }
        self.error(format!("unexpected tokens after {what}"), ErrorCode::E0403);
        self.start_node(SyntaxKind::ERROR);
        while !self.at_end() {
            self.bump();
        }
        self.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    /// Leading trivia goes to the enclosing node so node ranges stay tight
    fn start_node(&mut self, kind: SyntaxKind) {
        self.eat_trivia();
        self.builder.start_node(kind.into());
    }

    /// Root nodes open before any token so leading trivia lands inside them
    fn start_root(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.eat_trivia();
        self.builder.checkpoint()
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Roots
    // =========================================================================

    /// XPath = Expr
    fn expression_root(&mut self, root: SyntaxKind) {
        self.start_root(root);
        if !self.expr() {
            self.error("expected expression", ErrorCode::E0406);
        }
        self.expect_end("expression");
        self.eat_trivia();
        self.finish_node();
    }

    fn sequence_type_root(&mut self) {
        self.start_root(SyntaxKind::TYPE_DECL);
        self.sequence_type();
        self.expect_end("sequence type");
        self.eat_trivia();
        self.finish_node();
    }

    fn item_type_root(&mut self) {
        self.start_root(SyntaxKind::TYPE_DECL);
        if !self.item_type() {
            self.error("expected item type", ErrorCode::E0502);
        }
        self.expect_end("item type");
        self.eat_trivia();
        self.finish_node();
    }
}

fn token_range(token: &Token<'_>) -> TextRange {
    TextRange::at(token.offset, TextSize::of(token.text))
}
