//! Sequence types, item types and kind tests

use super::Parser;
use crate::parser::ErrorCode;
use crate::xpath::syntax_kind::SyntaxKind;

impl Parser<'_> {
    /// SequenceType = "empty-sequence" "(" ")" | ItemType OccurrenceIndicator?
    pub(super) fn sequence_type(&mut self) {
        self.start_node(SyntaxKind::SEQUENCE_TYPE);
        if self.at_keyword("empty-sequence") && self.nth(1) == SyntaxKind::L_PAREN {
            self.bump();
            let opened = self.current_range();
            self.bump();
            self.expect_closing(SyntaxKind::R_PAREN, opened, ErrorCode::E0203);
        } else if self.item_type() {
            if self.at_any(&[SyntaxKind::QUESTION, SyntaxKind::STAR, SyntaxKind::PLUS]) {
                self.start_node(SyntaxKind::OCCURRENCE_INDICATOR);
                self.bump();
                self.finish_node();
            }
        } else {
            self.error("expected sequence type", ErrorCode::E0502);
        }
        self.finish_node();
    }

    /// ItemType = KindTest | "item" "(" ")" | FunctionTest | MapTest | ArrayTest
    ///          | AtomicOrUnionType | "(" ItemType ")"
    pub(super) fn item_type(&mut self) -> bool {
        if self.at_kind_test() {
            self.kind_test();
            return true;
        }
        if self.nth(0) == SyntaxKind::NCNAME && self.nth(1) == SyntaxKind::L_PAREN {
            match self.current_text() {
                "item" => {
                    self.start_node(SyntaxKind::ANY_ITEM_TYPE);
                    self.bump();
                    let opened = self.current_range();
                    self.bump();
                    self.expect_closing(SyntaxKind::R_PAREN, opened, ErrorCode::E0203);
                    self.finish_node();
                    return true;
                }
                "function" => {
                    self.function_test();
                    return true;
                }
                "map" => {
                    self.map_test();
                    return true;
                }
                "array" => {
                    self.array_test();
                    return true;
                }
                _ => {}
            }
        }
        if self.at(SyntaxKind::L_PAREN) {
            self.start_node(SyntaxKind::PARENTHESIZED_ITEM_TYPE);
            let opened = self.current_range();
            self.bump();
            if !self.item_type() {
                self.error("expected item type", ErrorCode::E0502);
            }
            self.expect_closing(SyntaxKind::R_PAREN, opened, ErrorCode::E0203);
            self.finish_node();
            return true;
        }
        if self.eqname_len(0) > 0 {
            self.atomic_type();
            return true;
        }
        false
    }

    fn atomic_type(&mut self) {
        self.start_node(SyntaxKind::ATOMIC_TYPE);
        self.eqname();
        self.finish_node();
    }

    /// FunctionTest = "function" "(" ("*" | (SequenceType ("," SequenceType)*)?) ")" TypeAnnotation?
    fn function_test(&mut self) {
        self.start_node(SyntaxKind::FUNCTION_TEST);
        self.bump(); // function
        let opened = self.current_range();
        self.bump(); // (
        if !self.eat(SyntaxKind::STAR) && !self.at(SyntaxKind::R_PAREN) {
            loop {
                self.sequence_type();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        self.expect_closing(SyntaxKind::R_PAREN, opened, ErrorCode::E0203);
        self.type_annotation();
        self.finish_node();
    }

    /// MapTest = "map" "(" ("*" | AtomicOrUnionType "," SequenceType) ")"
    fn map_test(&mut self) {
        self.start_node(SyntaxKind::MAP_TEST);
        self.bump(); // map
        let opened = self.current_range();
        self.bump(); // (
        if !self.eat(SyntaxKind::STAR) {
            if self.eqname_len(0) > 0 {
                self.atomic_type();
            } else {
                self.error("expected map key type", ErrorCode::E0502);
            }
            self.expect(SyntaxKind::COMMA, "','");
            self.sequence_type();
        }
        self.expect_closing(SyntaxKind::R_PAREN, opened, ErrorCode::E0203);
        self.finish_node();
    }

    /// ArrayTest = "array" "(" ("*" | SequenceType) ")"
    fn array_test(&mut self) {
        self.start_node(SyntaxKind::ARRAY_TEST);
        self.bump(); // array
        let opened = self.current_range();
        self.bump(); // (
        if !self.eat(SyntaxKind::STAR) {
            self.sequence_type();
        }
        self.expect_closing(SyntaxKind::R_PAREN, opened, ErrorCode::E0203);
        self.finish_node();
    }

    /// KindTest = KindName "(" KindTestArgs? ")"
    ///
    /// Arguments are kept as written: names, wildcards, string literals,
    /// nested kind tests and `?` markers.
    pub(super) fn kind_test(&mut self) {
        self.start_node(SyntaxKind::KIND_TEST);
        self.bump(); // kind name
        let opened = self.current_range();
        self.bump(); // (
        while !self.at_end() && !self.at(SyntaxKind::R_PAREN) {
            if self.at_kind_test() {
                self.kind_test();
            } else if self.at_any(&[
                SyntaxKind::NCNAME,
                SyntaxKind::QNAME,
                SyntaxKind::BRACED_URI,
                SyntaxKind::STAR,
                SyntaxKind::COMMA,
                SyntaxKind::QUESTION,
                SyntaxKind::STRING_LIT,
            ]) {
                self.bump();
            } else {
                break;
            }
        }
        self.expect_closing(SyntaxKind::R_PAREN, opened, ErrorCode::E0203);
        self.finish_node();
    }

    /// SingleType = EQName "?"?
    pub(super) fn single_type(&mut self) {
        self.start_node(SyntaxKind::SINGLE_TYPE);
        if self.eqname() {
            self.eat(SyntaxKind::QUESTION);
        } else {
            self.error("expected type name", ErrorCode::E0301);
        }
        self.finish_node();
    }

    /// TypeAnnotation = ("as" SequenceType)?
    pub(super) fn type_annotation(&mut self) {
        if self.at_keyword("as") {
            self.start_node(SyntaxKind::TYPE_ANNOTATION);
            self.bump();
            self.sequence_type();
            self.finish_node();
        }
    }
}
