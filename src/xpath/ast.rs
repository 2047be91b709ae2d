//! Typed AST wrappers over the embedded-language CST.
//!
//! Only the constructs the item model and the template region view need
//! are wrapped; everything else is reached through the untyped tree.

use super::syntax_kind::{SyntaxKind, XPathLanguage};
use super::{SyntaxNode, SyntaxToken};
use crate::base::AstNode;
use rowan::TextRange;

macro_rules! ast_node {
    ($name:ident, $($kind:ident)|+) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            type Language = XPathLanguage;

            fn can_cast(kind: SyntaxKind) -> bool {
                matches!(kind, $(SyntaxKind::$kind)|+)
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(ValueTemplate, VALUE_TEMPLATE);
ast_node!(EnclosedExpr, ENCLOSED_EXPR);
ast_node!(EqName, EQNAME);
ast_node!(VarName, VAR_NAME);
ast_node!(VarRef, VAR_REF);
ast_node!(Binding, FOR_BINDING | LET_BINDING | QUANTIFIED_BINDING | PARAM);
ast_node!(NamedFunctionRef, NAMED_FUNCTION_REF);
ast_node!(InlineFunctionExpr, INLINE_FUNCTION_EXPR);
ast_node!(FunctionCall, FUNCTION_CALL);
ast_node!(MapConstructor, MAP_CONSTRUCTOR);
ast_node!(SquareArrayConstructor, SQUARE_ARRAY_CONSTRUCTOR);
ast_node!(CurlyArrayConstructor, CURLY_ARRAY_CONSTRUCTOR);
ast_node!(StringLiteral, STRING_LITERAL);
ast_node!(HashedKeyword, HASHED_KEYWORD);

fn significant_tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia())
}

// =============================================================================
// Names
// =============================================================================

impl EqName {
    /// The name as written, e.g. `fn:concat` or `Q{urn:x}local`
    pub fn text(&self) -> String {
        significant_tokens(&self.0).map(|t| t.text().to_string()).collect()
    }

    /// The local part of the name
    pub fn local_name(&self) -> String {
        let text = self.text();
        let local = match text.rfind(['}', ':']) {
            Some(index) => &text[index + 1..],
            None => text.as_str(),
        };
        local.to_string()
    }
}

impl VarName {
    pub fn eqname(&self) -> Option<EqName> {
        self.0.children().find_map(EqName::cast)
    }

    pub fn name(&self) -> Option<String> {
        self.eqname().map(|n| n.text())
    }
}

impl VarRef {
    pub fn eqname(&self) -> Option<EqName> {
        self.0.children().find_map(EqName::cast)
    }

    /// The referenced variable name, without the `$`
    pub fn name(&self) -> Option<String> {
        self.eqname().map(|n| n.text())
    }
}

impl HashedKeyword {
    /// The keyword without its `#`, e.g. `default`
    pub fn keyword(&self) -> Option<String> {
        significant_tokens(&self.0)
            .find(|t| t.kind() == SyntaxKind::NCNAME)
            .map(|t| t.text().to_string())
    }
}

// =============================================================================
// Variable bindings
// =============================================================================

impl Binding {
    pub fn var_name(&self) -> Option<VarName> {
        self.0.children().find_map(VarName::cast)
    }

    pub fn name(&self) -> Option<String> {
        self.var_name().and_then(|v| v.name())
    }

    /// The bound expression. Parameters have none.
    pub fn value(&self) -> Option<SyntaxNode> {
        if self.is_param() {
            return None;
        }
        self.0.children().find(|n| n.kind() != SyntaxKind::VAR_NAME)
    }

    pub fn is_param(&self) -> bool {
        self.0.kind() == SyntaxKind::PARAM
    }
}

// =============================================================================
// Functions, maps and arrays
// =============================================================================

impl NamedFunctionRef {
    pub fn name(&self) -> Option<String> {
        self.0.children().find_map(EqName::cast).map(|n| n.text())
    }

    pub fn arity(&self) -> Option<usize> {
        significant_tokens(&self.0)
            .find(|t| t.kind() == SyntaxKind::INTEGER_LIT)
            .and_then(|t| t.text().parse().ok())
    }
}

impl InlineFunctionExpr {
    pub fn params(&self) -> impl Iterator<Item = Binding> {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::PARAM_LIST)
            .flat_map(|list| list.children().filter_map(Binding::cast))
    }

    pub fn arity(&self) -> usize {
        self.params().count()
    }

    pub fn body(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind() == SyntaxKind::FUNCTION_BODY)
    }
}

impl FunctionCall {
    pub fn name(&self) -> Option<String> {
        self.0.children().find_map(EqName::cast).map(|n| n.text())
    }

    /// Number of arguments, placeholders included
    pub fn arity(&self) -> usize {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::ARGUMENT_LIST)
            .map(|list| list.children().count())
            .unwrap_or(0)
    }
}

impl MapConstructor {
    pub fn entry_count(&self) -> usize {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::MAP_ENTRY)
            .count()
    }
}

impl SquareArrayConstructor {
    pub fn member_count(&self) -> usize {
        self.0.children().count()
    }
}

impl CurlyArrayConstructor {
    /// Members as written: the comma separated operands of the enclosed
    /// expression. An operand evaluating to several items still counts once.
    pub fn member_count(&self) -> usize {
        match self.0.children().next() {
            None => 0,
            Some(expr) if expr.kind() == SyntaxKind::SEQUENCE_EXPR => expr.children().count(),
            Some(_) => 1,
        }
    }
}

impl StringLiteral {
    /// The literal value with quotes removed and doubled quotes unescaped
    pub fn value(&self) -> String {
        let text = self.0.text().to_string();
        let Some(quote) = text.chars().next() else {
            return String::new();
        };
        let inner = text.strip_prefix(quote).unwrap_or(&text);
        let inner = inner.strip_suffix(quote).unwrap_or(inner);
        let doubled: String = [quote, quote].iter().collect();
        inner.replace(&doubled, &quote.to_string())
    }
}

// =============================================================================
// Value templates
// =============================================================================

/// Kind of a value template region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RegionKind {
    /// Literal text, including `{{` and `}}` escapes
    Literal,
    /// An enclosed expression, braces included
    Expression,
}

/// A contiguous region of a value template
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TemplateRegion {
    pub kind: RegionKind,
    pub range: TextRange,
    pub text: String,
}

impl ValueTemplate {
    pub fn enclosed_exprs(&self) -> impl Iterator<Item = EnclosedExpr> {
        self.0.children().filter_map(EnclosedExpr::cast)
    }

    /// Literal and expression regions in source order. Adjacent literal
    /// pieces (text runs, escapes, stray braces) merge into one region.
    pub fn regions(&self) -> Vec<TemplateRegion> {
        let mut regions: Vec<TemplateRegion> = Vec::new();
        for element in self.0.children_with_tokens() {
            let kind = if element.kind() == SyntaxKind::ENCLOSED_EXPR {
                RegionKind::Expression
            } else {
                RegionKind::Literal
            };
            let range = element.text_range();
            let text = match &element {
                rowan::NodeOrToken::Node(node) => node.text().to_string(),
                rowan::NodeOrToken::Token(token) => token.text().to_string(),
            };

            match regions.last_mut() {
                Some(last) if kind == RegionKind::Literal && last.kind == RegionKind::Literal => {
                    last.range = last.range.cover(range);
                    last.text.push_str(&text);
                }
                _ => regions.push(TemplateRegion { kind, range, text }),
            }
        }
        regions
    }
}

impl EnclosedExpr {
    /// The expression between the braces
    pub fn expr(&self) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind() != SyntaxKind::ERROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xpath::{parse_eqnames_or_hashed_keywords, parse_expression, parse_value_template};

    fn first<N: AstNode<Language = XPathLanguage>>(root: &SyntaxNode) -> N {
        root.descendants().find_map(N::cast).unwrap()
    }

    #[test]
    fn test_template_regions() {
        let parse = parse_value_template("Hello {$name}!");
        let template = ValueTemplate::cast(parse.syntax()).unwrap();
        let regions = template.regions();
        let summary: Vec<_> = regions.iter().map(|r| (r.kind, r.text.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (RegionKind::Literal, "Hello "),
                (RegionKind::Expression, "{$name}"),
                (RegionKind::Literal, "!"),
            ]
        );
        assert_eq!(regions[1].range, TextRange::new(6.into(), 13.into()));
    }

    #[test]
    fn test_template_escapes_merge_into_literal() {
        let parse = parse_value_template("a{{b}}c{1}");
        let regions = ValueTemplate::cast(parse.syntax()).unwrap().regions();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].text, "a{{b}}c");
        assert_eq!(regions[0].range, TextRange::new(0.into(), 7.into()));
    }

    #[test]
    fn test_function_shapes() {
        let root = parse_expression("(fn:concat#3, function($a, $b) { $a }, f(1, ?))").syntax();
        let named: NamedFunctionRef = first(&root);
        assert_eq!(named.name().as_deref(), Some("fn:concat"));
        assert_eq!(named.arity(), Some(3));

        let inline: InlineFunctionExpr = first(&root);
        assert_eq!(inline.arity(), 2);
        let names: Vec<_> = inline.params().filter_map(|p| p.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(inline.params().all(|p| p.is_param() && p.value().is_none()));

        let call: FunctionCall = first(&root);
        assert_eq!(call.name().as_deref(), Some("f"));
        assert_eq!(call.arity(), 2);
    }

    #[test]
    fn test_map_and_array_counts() {
        let source = "(map { 1: 'a', 2: 'b' }, [1, (2, 3)], array { 1, 2, 3 }, array {})";
        let root = parse_expression(source).syntax();
        let map: MapConstructor = first(&root);
        assert_eq!(map.entry_count(), 2);
        let square: SquareArrayConstructor = first(&root);
        assert_eq!(square.member_count(), 2);
        let curly: Vec<_> = root.descendants().filter_map(CurlyArrayConstructor::cast).collect();
        assert_eq!(curly[0].member_count(), 3);
        assert_eq!(curly[1].member_count(), 0);
    }

    #[test]
    fn test_binding_value_and_names() {
        let root = parse_expression("let $x := 1 + 2 return $x").syntax();
        let binding: Binding = first(&root);
        assert_eq!(binding.name().as_deref(), Some("x"));
        assert_eq!(binding.value().map(|v| v.kind()), Some(SyntaxKind::BINARY_EXPR));

        let var: VarRef = first(&root);
        assert_eq!(var.name().as_deref(), Some("x"));
    }

    #[test]
    fn test_string_literal_value() {
        let root = parse_expression(r#"'it''s'"#).syntax();
        let literal: StringLiteral = first(&root);
        assert_eq!(literal.value(), "it's");
    }

    #[test]
    fn test_eqname_local_name() {
        let root = parse_expression("$Q{urn:x}local").syntax();
        let name: EqName = first(&root);
        assert_eq!(name.local_name(), "local");
        assert_eq!(name.text(), "Q{urn:x}local");
    }

    #[test]
    fn test_hashed_keyword() {
        let root = parse_eqnames_or_hashed_keywords("#default").syntax();
        let keyword: HashedKeyword = first(&root);
        assert_eq!(keyword.keyword().as_deref(), Some("default"));
    }
}
