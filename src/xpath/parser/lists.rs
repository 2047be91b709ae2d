//! Whitespace separated schema lists
//!
//! These languages never allow comments; the parser is run with comments
//! disabled so each `(: :)` is reported where it occurs.

use super::Parser;
use crate::parser::ErrorCode;
use crate::xpath::syntax_kind::SyntaxKind;

impl Parser<'_> {
    /// NameTests = NameTest*
    pub(super) fn name_test_list(&mut self) {
        self.start_root(SyntaxKind::NAME_TEST_LIST);
        while !self.at_end() {
            if !self.name_test() {
                self.error_bump("expected a name test", ErrorCode::E0504);
            }
        }
        self.eat_trivia();
        self.finish_node();
    }

    /// EQNamesOrHashedKeywords = (EQName | HashedKeyword)*
    pub(super) fn eqname_list(&mut self) {
        self.start_root(SyntaxKind::EQNAME_LIST);
        while !self.at_end() {
            if self.at(SyntaxKind::HASH) {
                self.hashed_keyword();
            } else if !self.eqname() {
                self.error_bump("expected an EQName or a '#' keyword", ErrorCode::E0504);
            }
        }
        self.eat_trivia();
        self.finish_node();
    }

    /// Tokens = NCName*
    pub(super) fn token_list(&mut self) {
        self.start_root(SyntaxKind::TOKEN_LIST);
        while !self.at_end() {
            if !self.eat(SyntaxKind::NCNAME) {
                self.error_bump("expected a token", ErrorCode::E0504);
            }
        }
        self.eat_trivia();
        self.finish_node();
    }

    pub(super) fn at_name_test(&self) -> bool {
        self.name_test_len() > 0
    }

    fn name_test_len(&self) -> usize {
        match self.nth(0) {
            SyntaxKind::NCNAME
            | SyntaxKind::QNAME
            | SyntaxKind::STAR
            | SyntaxKind::PREFIX_WILDCARD
            | SyntaxKind::LOCAL_WILDCARD => 1,
            SyntaxKind::BRACED_URI
                if matches!(self.nth(1), SyntaxKind::NCNAME | SyntaxKind::STAR) =>
            {
                2
            }
            _ => 0,
        }
    }

    /// NameTest = EQName | "*" | NCName ":*" | "*:" NCName | BracedURILiteral "*"
    pub(super) fn name_test(&mut self) -> bool {
        let len = self.name_test_len();
        if len == 0 {
            return false;
        }
        self.start_node(SyntaxKind::NAME_TEST);
        for _ in 0..len {
            self.bump();
        }
        self.finish_node();
        true
    }

    /// HashedKeyword = "#" NCName, with nothing in between
    fn hashed_keyword(&mut self) {
        self.start_node(SyntaxKind::HASHED_KEYWORD);
        self.bump(); // #
        if self.at_adjacent(SyntaxKind::NCNAME) {
            self.bump();
        } else {
            self.error("expected a keyword directly after '#'", ErrorCode::E0503);
        }
        self.finish_node();
    }
}
