//! Value templates and the XPath 3.1 expression grammar

use super::{Parser, RESERVED_FUNCTION_NAMES};
use crate::parser::ErrorCode;
use crate::xpath::syntax_kind::SyntaxKind;

/// One binary precedence level
struct Level {
    tokens: &'static [SyntaxKind],
    keywords: &'static [&'static str],
    /// Non-chaining levels (comparisons, ranges) take one operator at most
    chains: bool,
}

/// Binary operators, loosest binding first
const LEVELS: &[Level] = &[
    Level {
        tokens: &[],
        keywords: &["or"],
        chains: true,
    },
    Level {
        tokens: &[],
        keywords: &["and"],
        chains: true,
    },
    Level {
        tokens: &[
            SyntaxKind::EQ,
            SyntaxKind::BANG_EQ,
            SyntaxKind::LT,
            SyntaxKind::LT_EQ,
            SyntaxKind::GT,
            SyntaxKind::GT_EQ,
            SyntaxKind::LT_LT,
            SyntaxKind::GT_GT,
        ],
        keywords: &["eq", "ne", "lt", "le", "gt", "ge", "is"],
        chains: false,
    },
    Level {
        tokens: &[SyntaxKind::PIPE_PIPE],
        keywords: &[],
        chains: true,
    },
    Level {
        tokens: &[],
        keywords: &["to"],
        chains: false,
    },
    Level {
        tokens: &[SyntaxKind::PLUS, SyntaxKind::MINUS],
        keywords: &[],
        chains: true,
    },
    Level {
        tokens: &[SyntaxKind::STAR],
        keywords: &["div", "idiv", "mod"],
        chains: true,
    },
    Level {
        tokens: &[SyntaxKind::PIPE],
        keywords: &["union"],
        chains: true,
    },
    Level {
        tokens: &[],
        keywords: &["intersect", "except"],
        chains: true,
    },
];

/// `first second Type` operators, loosest first. The flag selects a
/// sequence type (`true`) or a single type operand.
const TYPE_OPERATORS: &[(&str, &str, SyntaxKind, bool)] = &[
    ("instance", "of", SyntaxKind::INSTANCE_OF_EXPR, true),
    ("treat", "as", SyntaxKind::TREAT_EXPR, true),
    ("castable", "as", SyntaxKind::CASTABLE_EXPR, false),
    ("cast", "as", SyntaxKind::CAST_EXPR, false),
];

impl Parser<'_> {
    // =========================================================================
    // Value templates
    // =========================================================================

    /// ValueTemplate = (ValueContents | EscapedCharacter | EnclosedExpr)*
    pub(super) fn value_template(&mut self) {
        self.start_root(SyntaxKind::VALUE_TEMPLATE);
        while !self.at_end() {
            match self.current_kind() {
                SyntaxKind::VALUE_CONTENTS | SyntaxKind::ESCAPED_CHARACTER => self.bump(),
                SyntaxKind::L_BRACE => self.enclosed_expr(),
                SyntaxKind::R_BRACE => self.error_bump(
                    "mismatched '}' in value template, write '}}' for a literal brace",
                    ErrorCode::E0205,
                ),
                _ => self.error_bump("unexpected token in value template", ErrorCode::E0901),
            }
        }
        self.eat_trivia();
        self.finish_node();
    }

    /// EnclosedExpr = "{" Expr "}"
    ///
    /// The expression is required inside a value template.
    fn enclosed_expr(&mut self) {
        self.start_node(SyntaxKind::ENCLOSED_EXPR);
        let opened = self.current_range();
        self.bump(); // {

        let parsed = if self.at(SyntaxKind::R_BRACE) || self.at_end() {
            self.error("expected expression in enclosed expression", ErrorCode::E0406);
            false
        } else if self.expr() {
            true
        } else {
            self.error("expected expression", ErrorCode::E0406);
            false
        };

        if !self.at(SyntaxKind::R_BRACE) && !self.at_end() {
            if parsed {
                self.error("unexpected tokens in enclosed expression", ErrorCode::E0403);
            }
            self.skip_to_closing_brace();
        }
        self.expect_closing(SyntaxKind::R_BRACE, opened, ErrorCode::E0202);
        self.finish_node();
    }

    /// Wrap tokens up to the balancing `}` in an ERROR node
    fn skip_to_closing_brace(&mut self) {
        self.start_node(SyntaxKind::ERROR);
        let mut depth = 0usize;
        while !self.at_end() {
            match self.current_kind() {
                SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_BRACE if depth == 0 => break,
                SyntaxKind::R_BRACE => depth -= 1,
                _ => {}
            }
            self.bump();
        }
        self.finish_node();
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Expr = ExprSingle ("," ExprSingle)*
    pub(super) fn expr(&mut self) -> bool {
        let checkpoint = self.checkpoint();
        if !self.expr_single() {
            return false;
        }
        if self.at(SyntaxKind::COMMA) {
            self.start_node_at(checkpoint, SyntaxKind::SEQUENCE_EXPR);
            while self.eat(SyntaxKind::COMMA) {
                if !self.expr_single() {
                    self.error("expected expression after ','", ErrorCode::E0406);
                    break;
                }
            }
            self.finish_node();
        }
        true
    }

    /// ExprSingle = ForExpr | LetExpr | QuantifiedExpr | IfExpr | OrExpr
    ///
    /// Returns false without consuming anything when no expression starts here.
    pub(super) fn expr_single(&mut self) -> bool {
        if self.nth(1) == SyntaxKind::DOLLAR {
            if self.at_keyword("for") {
                self.binding_expr(SyntaxKind::FOR_EXPR, SyntaxKind::FOR_BINDING, "return");
                return true;
            }
            if self.at_keyword("let") {
                self.binding_expr(SyntaxKind::LET_EXPR, SyntaxKind::LET_BINDING, "return");
                return true;
            }
            if self.at_keyword("some") || self.at_keyword("every") {
                self.binding_expr(
                    SyntaxKind::QUANTIFIED_EXPR,
                    SyntaxKind::QUANTIFIED_BINDING,
                    "satisfies",
                );
                return true;
            }
        }
        if self.at_keyword("if") && self.nth(1) == SyntaxKind::L_PAREN {
            self.if_expr();
            return true;
        }
        self.binary_expr(0)
    }

    fn required_expr_single(&mut self, after: &str) {
        if !self.expr_single() {
            self.error(format!("expected expression after {after}"), ErrorCode::E0406);
        }
    }

    /// ForExpr = "for" ForBinding ("," ForBinding)* "return" ExprSingle
    /// LetExpr = "let" LetBinding ("," LetBinding)* "return" ExprSingle
    /// QuantifiedExpr = ("some" | "every") Binding ("," Binding)* "satisfies" ExprSingle
    fn binding_expr(&mut self, kind: SyntaxKind, binding: SyntaxKind, body_keyword: &str) {
        self.start_node(kind);
        self.bump(); // for | let | some | every
        loop {
            self.start_node(binding);
            self.var_name();
            if binding == SyntaxKind::LET_BINDING {
                self.expect(SyntaxKind::ASSIGN, "':='");
            } else {
                self.expect_keyword("in");
            }
            self.required_expr_single("binding");
            self.finish_node();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect_keyword(body_keyword);
        self.required_expr_single(&format!("'{body_keyword}'"));
        self.finish_node();
    }

    /// IfExpr = "if" "(" Expr ")" "then" ExprSingle "else" ExprSingle
    fn if_expr(&mut self) {
        self.start_node(SyntaxKind::IF_EXPR);
        self.bump(); // if
        let opened = self.current_range();
        self.bump(); // (
        if !self.expr() {
            self.error("expected condition", ErrorCode::E0406);
        }
        self.expect_closing(SyntaxKind::R_PAREN, opened, ErrorCode::E0203);
        self.expect_keyword("then");
        self.required_expr_single("'then'");
        self.expect_keyword("else");
        self.required_expr_single("'else'");
        self.finish_node();
    }

    /// VarName = "$" EQName
    pub(super) fn var_name(&mut self) {
        self.start_node(SyntaxKind::VAR_NAME);
        self.expect(SyntaxKind::DOLLAR, "'$'");
        if !self.eqname() {
            self.error("expected variable name", ErrorCode::E0301);
        }
        self.finish_node();
    }

    /// EQName = QName | NCName | BracedURILiteral NCName
    pub(super) fn eqname(&mut self) -> bool {
        if self.eqname_len(0) == 0 {
            return false;
        }
        self.start_node(SyntaxKind::EQNAME);
        self.eat_eqname_tokens();
        self.finish_node();
        true
    }

    fn binary_expr(&mut self, level: usize) -> bool {
        let Some(ops) = LEVELS.get(level) else {
            return self.type_operator_expr(0);
        };
        let checkpoint = self.checkpoint();
        if !self.binary_expr(level + 1) {
            return false;
        }
        while self.at_operator(ops) {
            self.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
            self.bump();
            if !self.binary_expr(level + 1) {
                self.error("expected operand", ErrorCode::E0402);
            }
            self.finish_node();
            if !ops.chains {
                break;
            }
        }
        true
    }

    fn at_operator(&self, level: &Level) -> bool {
        level.tokens.iter().any(|&kind| self.at(kind))
            || level.keywords.iter().any(|keyword| self.at_keyword(keyword))
    }

    /// InstanceofExpr, TreatExpr, CastableExpr, CastExpr
    fn type_operator_expr(&mut self, index: usize) -> bool {
        let Some(&(first, second, kind, sequence)) = TYPE_OPERATORS.get(index) else {
            return self.arrow_expr();
        };
        let checkpoint = self.checkpoint();
        if !self.type_operator_expr(index + 1) {
            return false;
        }
        if self.at_keyword(first) && self.nth_is_keyword(1, second) {
            self.start_node_at(checkpoint, kind);
            self.bump();
            self.bump();
            if sequence {
                self.sequence_type();
            } else {
                self.single_type();
            }
            self.finish_node();
        }
        true
    }

    /// ArrowExpr = UnaryExpr ("=>" ArrowFunctionSpecifier ArgumentList)*
    fn arrow_expr(&mut self) -> bool {
        let checkpoint = self.checkpoint();
        if !self.unary_expr() {
            return false;
        }
        while self.at(SyntaxKind::ARROW) {
            self.start_node_at(checkpoint, SyntaxKind::ARROW_EXPR);
            self.bump();
            if self.at(SyntaxKind::DOLLAR) {
                self.var_ref();
            } else if self.at(SyntaxKind::L_PAREN) {
                self.parenthesized_expr();
            } else if !self.eqname() {
                self.error("expected function after '=>'", ErrorCode::E0301);
            }
            self.argument_list();
            self.finish_node();
        }
        true
    }

    /// UnaryExpr = ("-" | "+")* SimpleMapExpr
    fn unary_expr(&mut self) -> bool {
        if !self.at_any(&[SyntaxKind::PLUS, SyntaxKind::MINUS]) {
            return self.simple_map_expr();
        }
        self.start_node(SyntaxKind::UNARY_EXPR);
        while self.at_any(&[SyntaxKind::PLUS, SyntaxKind::MINUS]) {
            self.bump();
        }
        if !self.simple_map_expr() {
            self.error("expected operand after unary operator", ErrorCode::E0402);
        }
        self.finish_node();
        true
    }

    /// SimpleMapExpr = PathExpr ("!" PathExpr)*
    fn simple_map_expr(&mut self) -> bool {
        let checkpoint = self.checkpoint();
        if !self.path_expr() {
            return false;
        }
        while self.at(SyntaxKind::BANG) {
            self.start_node_at(checkpoint, SyntaxKind::SIMPLE_MAP_EXPR);
            self.bump();
            if !self.path_expr() {
                self.error("expected operand after '!'", ErrorCode::E0402);
            }
            self.finish_node();
        }
        true
    }

    // =========================================================================
    // Paths
    // =========================================================================

    /// PathExpr = ("/" RelativePathExpr?) | ("//" RelativePathExpr) | RelativePathExpr
    fn path_expr(&mut self) -> bool {
        if self.at(SyntaxKind::SLASH) {
            self.start_node(SyntaxKind::PATH_EXPR);
            self.bump();
            if self.at_step_start() {
                self.relative_path();
            }
            self.finish_node();
            return true;
        }
        if self.at(SyntaxKind::SLASH_SLASH) {
            self.start_node(SyntaxKind::PATH_EXPR);
            self.bump();
            if !self.relative_path() {
                self.error("expected step after '//'", ErrorCode::E0402);
            }
            self.finish_node();
            return true;
        }

        let checkpoint = self.checkpoint();
        if !self.step_expr() {
            return false;
        }
        if self.at_any(&[SyntaxKind::SLASH, SyntaxKind::SLASH_SLASH]) {
            self.start_node_at(checkpoint, SyntaxKind::PATH_EXPR);
            self.path_steps();
            self.finish_node();
        }
        true
    }

    /// RelativePathExpr = StepExpr (("/" | "//") StepExpr)*
    fn relative_path(&mut self) -> bool {
        if !self.step_expr() {
            return false;
        }
        self.path_steps();
        true
    }

    fn path_steps(&mut self) {
        while self.at_any(&[SyntaxKind::SLASH, SyntaxKind::SLASH_SLASH]) {
            self.bump();
            if !self.step_expr() {
                self.error("expected step", ErrorCode::E0402);
                break;
            }
        }
    }

    /// Can the next token start a relative path (for a lone leading `/`)
    fn at_step_start(&self) -> bool {
        self.current_kind().is_literal()
            || self.at_any(&[
                SyntaxKind::DOT,
                SyntaxKind::DOT_DOT,
                SyntaxKind::AT,
                SyntaxKind::STAR,
                SyntaxKind::NCNAME,
                SyntaxKind::QNAME,
                SyntaxKind::PREFIX_WILDCARD,
                SyntaxKind::LOCAL_WILDCARD,
                SyntaxKind::BRACED_URI,
                SyntaxKind::DOLLAR,
                SyntaxKind::L_PAREN,
                SyntaxKind::L_BRACKET,
                SyntaxKind::QUESTION,
            ])
    }

    /// StepExpr = PostfixExpr | AxisStep
    fn step_expr(&mut self) -> bool {
        self.postfix_expr() || self.axis_step()
    }

    /// AxisStep = (AxisName "::" | "@")? NodeTest Predicate* | ".." Predicate*
    fn axis_step(&mut self) -> bool {
        let explicit_axis =
            self.nth(0) == SyntaxKind::NCNAME && self.nth(1) == SyntaxKind::COLON_COLON;
        let at_node_test = self.at_kind_test() || self.at_name_test();
        if !(explicit_axis || at_node_test || self.at_any(&[SyntaxKind::DOT_DOT, SyntaxKind::AT])) {
            return false;
        }

        self.start_node(SyntaxKind::AXIS_STEP);
        if !self.eat(SyntaxKind::DOT_DOT) {
            if explicit_axis {
                self.bump(); // axis name
                self.bump(); // ::
            } else {
                self.eat(SyntaxKind::AT);
            }
            if self.at_kind_test() {
                self.kind_test();
            } else if !self.name_test() {
                self.error("expected name test", ErrorCode::E0504);
            }
        }
        self.predicates();
        self.finish_node();
        true
    }

    fn predicates(&mut self) {
        while self.at(SyntaxKind::L_BRACKET) {
            self.predicate();
        }
    }

    /// Predicate = "[" Expr "]"
    fn predicate(&mut self) {
        self.start_node(SyntaxKind::PREDICATE);
        let opened = self.current_range();
        self.bump(); // [
        if !self.expr() {
            self.error("expected predicate expression", ErrorCode::E0406);
        }
        self.expect_closing(SyntaxKind::R_BRACKET, opened, ErrorCode::E0204);
        self.finish_node();
    }

    /// PostfixExpr = PrimaryExpr (Predicate | ArgumentList | Lookup)*
    fn postfix_expr(&mut self) -> bool {
        let checkpoint = self.checkpoint();
        if !self.primary_expr() {
            return false;
        }
        loop {
            if self.at(SyntaxKind::L_BRACKET) {
                self.start_node_at(checkpoint, SyntaxKind::FILTER_EXPR);
                self.predicate();
            } else if self.at(SyntaxKind::L_PAREN) {
                self.start_node_at(checkpoint, SyntaxKind::DYNAMIC_FUNCTION_CALL);
                self.argument_list();
            } else if self.at(SyntaxKind::QUESTION) {
                self.start_node_at(checkpoint, SyntaxKind::LOOKUP_EXPR);
                self.bump();
                self.key_specifier();
            } else {
                break;
            }
            self.finish_node();
        }
        true
    }

    /// KeySpecifier = NCName | IntegerLiteral | ParenthesizedExpr | "*"
    fn key_specifier(&mut self) {
        match self.current_kind() {
            SyntaxKind::NCNAME | SyntaxKind::INTEGER_LIT | SyntaxKind::STAR => self.bump(),
            SyntaxKind::L_PAREN => self.parenthesized_expr(),
            _ => self.error("expected key specifier after '?'", ErrorCode::E0902),
        }
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn primary_expr(&mut self) -> bool {
        match self.current_kind() {
            SyntaxKind::STRING_LIT | SyntaxKind::UNTERMINATED_STRING => {
                self.literal(SyntaxKind::STRING_LITERAL)
            }
            SyntaxKind::INTEGER_LIT => self.literal(SyntaxKind::INTEGER_LITERAL),
            SyntaxKind::DECIMAL_LIT => self.literal(SyntaxKind::DECIMAL_LITERAL),
            SyntaxKind::DOUBLE_LIT => self.literal(SyntaxKind::DOUBLE_LITERAL),
            SyntaxKind::DOLLAR => self.var_ref(),
            SyntaxKind::L_PAREN => self.parenthesized_expr(),
            SyntaxKind::DOT => {
                self.start_node(SyntaxKind::CONTEXT_ITEM_EXPR);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::L_BRACKET => self.square_array_constructor(),
            SyntaxKind::QUESTION => {
                self.start_node(SyntaxKind::UNARY_LOOKUP);
                self.bump();
                self.key_specifier();
                self.finish_node();
            }
            SyntaxKind::NCNAME | SyntaxKind::QNAME | SyntaxKind::BRACED_URI => {
                return self.name_primary();
            }
            _ => return false,
        }
        true
    }

    /// Primary expressions introduced by a name: function calls, named
    /// function references, inline functions, map and array constructors
    fn name_primary(&mut self) -> bool {
        let len = self.eqname_len(0);
        if len == 0 {
            return false;
        }
        let name = self.current_text();
        let unprefixed = self.current_kind() == SyntaxKind::NCNAME;
        match self.nth(len) {
            SyntaxKind::HASH => self.named_function_ref(),
            SyntaxKind::L_PAREN if unprefixed && name == "function" => self.inline_function_expr(),
            SyntaxKind::L_BRACE if unprefixed && name == "map" => self.map_constructor(),
            SyntaxKind::L_BRACE if unprefixed && name == "array" => self.curly_array_constructor(),
            SyntaxKind::L_PAREN if !(unprefixed && RESERVED_FUNCTION_NAMES.contains(&name)) => {
                self.function_call()
            }
            _ => return false,
        }
        true
    }

    fn literal(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.finish_node();
    }

    /// VarRef = "$" EQName
    fn var_ref(&mut self) {
        self.start_node(SyntaxKind::VAR_REF);
        self.bump(); // $
        if !self.eqname() {
            self.error("expected variable name after '$'", ErrorCode::E0301);
        }
        self.finish_node();
    }

    /// ParenthesizedExpr = "(" Expr? ")"
    fn parenthesized_expr(&mut self) {
        self.start_node(SyntaxKind::PARENTHESIZED_EXPR);
        let opened = self.current_range();
        self.bump(); // (
        if !self.at(SyntaxKind::R_PAREN) && !self.expr() {
            self.error("expected expression", ErrorCode::E0406);
        }
        self.expect_closing(SyntaxKind::R_PAREN, opened, ErrorCode::E0203);
        self.finish_node();
    }

    /// FunctionCall = EQName ArgumentList
    fn function_call(&mut self) {
        self.start_node(SyntaxKind::FUNCTION_CALL);
        self.eqname();
        self.argument_list();
        self.finish_node();
    }

    /// ArgumentList = "(" (Argument ("," Argument)*)? ")"
    /// Argument = ExprSingle | "?"
    fn argument_list(&mut self) {
        self.start_node(SyntaxKind::ARGUMENT_LIST);
        let opened = self.current_range();
        if self.expect(SyntaxKind::L_PAREN, "'('") {
            if !self.at(SyntaxKind::R_PAREN) {
                loop {
                    let placeholder = self.at(SyntaxKind::QUESTION)
                        && matches!(self.nth(1), SyntaxKind::COMMA | SyntaxKind::R_PAREN);
                    if placeholder {
                        self.start_node(SyntaxKind::ARGUMENT_PLACEHOLDER);
                        self.bump();
                        self.finish_node();
                    } else if !self.expr_single() {
                        self.error("expected argument", ErrorCode::E0406);
                        break;
                    }
                    if !self.eat(SyntaxKind::COMMA) {
                        break;
                    }
                }
            }
            self.expect_closing(SyntaxKind::R_PAREN, opened, ErrorCode::E0404);
        }
        self.finish_node();
    }

    /// NamedFunctionRef = EQName "#" IntegerLiteral
    fn named_function_ref(&mut self) {
        self.start_node(SyntaxKind::NAMED_FUNCTION_REF);
        self.eqname();
        self.bump(); // #
        if !self.eat(SyntaxKind::INTEGER_LIT) {
            self.error("expected arity after '#'", ErrorCode::E0902);
        }
        self.finish_node();
    }

    /// InlineFunctionExpr = "function" "(" ParamList? ")" TypeAnnotation? FunctionBody
    fn inline_function_expr(&mut self) {
        self.start_node(SyntaxKind::INLINE_FUNCTION_EXPR);
        self.bump(); // function

        self.start_node(SyntaxKind::PARAM_LIST);
        let opened = self.current_range();
        self.bump(); // (
        if !self.at(SyntaxKind::R_PAREN) {
            loop {
                if !self.at(SyntaxKind::DOLLAR) {
                    self.error("expected parameter", ErrorCode::E0902);
                    break;
                }
                self.start_node(SyntaxKind::PARAM);
                self.var_name();
                self.type_annotation();
                self.finish_node();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        self.expect_closing(SyntaxKind::R_PAREN, opened, ErrorCode::E0203);
        self.finish_node();

        self.type_annotation();

        self.start_node(SyntaxKind::FUNCTION_BODY);
        let opened = self.current_range();
        if self.expect(SyntaxKind::L_BRACE, "'{'") {
            if !self.at(SyntaxKind::R_BRACE) && !self.expr() {
                self.error("expected function body", ErrorCode::E0406);
            }
            self.expect_closing(SyntaxKind::R_BRACE, opened, ErrorCode::E0202);
        }
        self.finish_node();

        self.finish_node();
    }

    /// MapConstructor = "map" "{" (MapEntry ("," MapEntry)*)? "}"
    fn map_constructor(&mut self) {
        self.start_node(SyntaxKind::MAP_CONSTRUCTOR);
        self.bump(); // map
        let opened = self.current_range();
        self.bump(); // {
        if !self.at(SyntaxKind::R_BRACE) {
            loop {
                self.start_node(SyntaxKind::MAP_ENTRY);
                if !self.expr_single() {
                    self.error("expected map key", ErrorCode::E0406);
                }
                self.expect(SyntaxKind::COLON, "':' after map key");
                if !self.expr_single() {
                    self.error("expected map value", ErrorCode::E0406);
                }
                self.finish_node();
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        self.expect_closing(SyntaxKind::R_BRACE, opened, ErrorCode::E0202);
        self.finish_node();
    }

    /// SquareArrayConstructor = "[" (ExprSingle ("," ExprSingle)*)? "]"
    fn square_array_constructor(&mut self) {
        self.start_node(SyntaxKind::SQUARE_ARRAY_CONSTRUCTOR);
        let opened = self.current_range();
        self.bump(); // [
        if !self.at(SyntaxKind::R_BRACKET) {
            loop {
                if !self.expr_single() {
                    self.error("expected array member", ErrorCode::E0406);
                    break;
                }
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        self.expect_closing(SyntaxKind::R_BRACKET, opened, ErrorCode::E0204);
        self.finish_node();
    }

    /// CurlyArrayConstructor = "array" "{" Expr? "}"
    fn curly_array_constructor(&mut self) {
        self.start_node(SyntaxKind::CURLY_ARRAY_CONSTRUCTOR);
        self.bump(); // array
        let opened = self.current_range();
        self.bump(); // {
        if !self.at(SyntaxKind::R_BRACE) && !self.expr() {
            self.error("expected expression", ErrorCode::E0406);
        }
        self.expect_closing(SyntaxKind::R_BRACE, opened, ErrorCode::E0202);
        self.finish_node();
    }
}
