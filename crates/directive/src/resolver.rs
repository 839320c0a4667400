//! Binding a tagged comment to the function it annotates.
//!
//! Two strategies are tried in order:
//!
//! 1. the nearest function-like ancestor (comment sits inside a body);
//! 2. the first non-comment next sibling, if it is function-like
//!    (comment sits above a declaration).
//!
//! A comment inside a function never reaches strategy 2, so the two never
//! compete for the same comment.

use crate::language::Language;
use crate::types::BindingKind;
use tree_sitter::Node;

/// Outcome of resolving one tagged comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'tree> {
    /// Comment lies inside this function
    Enclosing(Node<'tree>),
    /// Comment precedes this function declaration
    Following(Node<'tree>),
    /// Orphan comment, dropped by the assembler
    Unresolved,
}

impl<'tree> Resolution<'tree> {
    pub fn function(&self) -> Option<Node<'tree>> {
        match self {
            Self::Enclosing(node) | Self::Following(node) => Some(*node),
            Self::Unresolved => None,
        }
    }

    pub fn binding(&self) -> Option<BindingKind> {
        match self {
            Self::Enclosing(_) => Some(BindingKind::Inline),
            Self::Following(_) => Some(BindingKind::DocComment),
            Self::Unresolved => None,
        }
    }
}

/// Resolves tagged comments against one grammar's function kinds
#[derive(Debug, Clone, Copy)]
pub struct FunctionResolver {
    language: Language,
}

impl FunctionResolver {
    pub const fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn resolve<'tree>(&self, comment: Node<'tree>) -> Resolution<'tree> {
        if let Some(function) = self.enclosing_function(comment) {
            return Resolution::Enclosing(function);
        }

        match self.following_function(comment) {
            Some(function) => Resolution::Following(function),
            None => Resolution::Unresolved,
        }
    }

    /// Nearest function-like ancestor
    fn enclosing_function<'tree>(&self, node: Node<'tree>) -> Option<Node<'tree>> {
        let mut current = node.parent();
        while let Some(parent) = current {
            if self.language.is_function_kind(parent.kind()) {
                return Some(parent);
            }
            current = parent.parent();
        }
        None
    }

    /// First non-comment next sibling, when it is function-like
    fn following_function<'tree>(&self, node: Node<'tree>) -> Option<Node<'tree>> {
        let mut current = node.next_sibling();
        while let Some(sibling) = current {
            let kind = sibling.kind();
            if self.language.is_comment_kind(kind) {
                current = sibling.next_sibling();
                continue;
            }
            return self.language.is_function_kind(kind).then_some(sibling);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::TagQuery;
    use tree_sitter::{Parser, Tree};

    fn parse(language: Language, code: &str) -> Tree {
        let mut parser = Parser::new();
        parser
            .set_language(&language.tree_sitter_language().unwrap())
            .unwrap();
        parser.parse(code, None).unwrap()
    }

    /// (kind, start row) of the resolved function for every tagged comment
    fn resolve_all(language: Language, code: &str) -> Vec<Option<(&'static str, usize)>> {
        let tree = parse(language, code);
        let query = TagQuery::new(language, "@ai").unwrap();
        let resolver = FunctionResolver::new(language);

        query
            .tagged_comments(tree.root_node(), code.as_bytes())
            .into_iter()
            .map(|comment| {
                resolver
                    .resolve(comment)
                    .function()
                    .map(|f| (f.kind(), f.start_position().row))
            })
            .collect()
    }

    #[test]
    fn test_enclosing_wins_over_following() {
        let code = "package main\n\nfunc a() {\n\t// @ai inside\n}\n\nfunc b() {}\n";
        let tree = parse(Language::Go, code);
        let query = TagQuery::new(Language::Go, "@ai").unwrap();
        let comments = query.tagged_comments(tree.root_node(), code.as_bytes());

        let resolution = FunctionResolver::new(Language::Go).resolve(comments[0]);
        assert!(matches!(resolution, Resolution::Enclosing(_)));
        assert_eq!(resolution.binding(), Some(BindingKind::Inline));
        assert_eq!(resolution.function().unwrap().start_position().row, 2);
    }

    #[test]
    fn test_following_skips_comments() {
        let code = "package main\n\n// @ai doc\n// more\n/* block */\nfunc calc() int {\n\treturn 0\n}\n";
        assert_eq!(
            resolve_all(Language::Go, code),
            vec![Some(("function_declaration", 5))]
        );
    }

    #[test]
    fn test_innermost_literal() {
        let code = "package main\n\nfunc outer() {\n\tf := func() {\n\t\tg := func() {\n\t\t\t// @ai deep\n\t\t}\n\t\t_ = g\n\t}\n\t_ = f\n}\n";
        assert_eq!(resolve_all(Language::Go, code), vec![Some(("func_literal", 4))]);
    }

    #[test]
    fn test_method_declaration() {
        let code = "package main\n\n// @ai doc\nfunc (s *Server) run() {}\n";
        assert_eq!(
            resolve_all(Language::Go, code),
            vec![Some(("method_declaration", 3))]
        );
    }

    #[test]
    fn test_orphans() {
        let trailing = "package main\n\nfunc a() {}\n\n// @ai nothing follows\n";
        assert_eq!(resolve_all(Language::Go, trailing), vec![None]);

        let var_decl = "package main\n\n// @ai orphan comment\n\nvar x = 1\n";
        assert_eq!(resolve_all(Language::Go, var_decl), vec![None]);

        let type_decl = "package main\n\n// @ai on a type\ntype T struct{}\n";
        let tree = parse(Language::Go, type_decl);
        let query = TagQuery::new(Language::Go, "@ai").unwrap();
        let comment = query.tagged_comments(tree.root_node(), type_decl.as_bytes())[0];
        assert_eq!(
            FunctionResolver::new(Language::Go).resolve(comment),
            Resolution::Unresolved
        );
    }

    #[test]
    fn test_rust_closure_and_item() {
        let code = "// @ai doc\nfn a() {}\n\nfn b() {\n    let f = |x: i32| {\n        // @ai closure\n        x\n    };\n}\n";
        assert_eq!(
            resolve_all(Language::Rust, code),
            vec![Some(("function_item", 1)), Some(("closure_expression", 4))]
        );
    }
}
