use crate::error::{DirectiveError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Source grammar the extractor parses with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Go,
    Rust,
    JavaScript,
    TypeScript,
    Unknown,
}

impl Language {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "go" => Language::Go,
            "rs" => Language::Rust,
            "js" | "mjs" | "cjs" | "jsx" => Language::JavaScript,
            "ts" | "mts" | "cts" => Language::TypeScript,
            _ => Language::Unknown,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    /// Get language name as string
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Rust => "rust",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Unknown => "unknown",
        }
    }

    /// Check if a grammar is wired up for this language
    pub fn is_supported(self) -> bool {
        !matches!(self, Language::Unknown)
    }

    /// Get Tree-sitter language instance
    pub fn tree_sitter_language(self) -> Result<tree_sitter::Language> {
        match self {
            Language::Go => Ok(tree_sitter_go::LANGUAGE.into()),
            Language::Rust => Ok(tree_sitter_rust::LANGUAGE.into()),
            Language::JavaScript => Ok(tree_sitter_javascript::LANGUAGE.into()),
            Language::TypeScript => Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
            Language::Unknown => Err(DirectiveError::unsupported_language(self.as_str())),
        }
    }

    /// Markers that open a line comment, longest first
    ///
    /// Rust doc comments (`///`, `//!`) are line comments too and may carry
    /// a directive.
    pub fn line_comment_markers(self) -> &'static [&'static str] {
        match self {
            Language::Rust => &["///", "//!", "//"],
            Language::Go | Language::JavaScript | Language::TypeScript => &["//"],
            Language::Unknown => &[],
        }
    }

    /// Node kinds that may carry a directive (line comments)
    pub fn tag_comment_kinds(self) -> &'static [&'static str] {
        match self {
            Language::Go | Language::JavaScript | Language::TypeScript => &["comment"],
            Language::Rust => &["line_comment"],
            Language::Unknown => &[],
        }
    }

    /// Node kinds treated as comments when merging blocks and skipping siblings
    pub fn comment_kinds(self) -> &'static [&'static str] {
        match self {
            Language::Go | Language::JavaScript | Language::TypeScript => &["comment"],
            Language::Rust => &["line_comment", "block_comment"],
            Language::Unknown => &[],
        }
    }

    /// Node kinds a directive can bind to
    pub fn function_kinds(self) -> &'static [&'static str] {
        match self {
            Language::Go => &["function_declaration", "method_declaration", "func_literal"],
            Language::Rust => &["function_item", "closure_expression"],
            Language::JavaScript | Language::TypeScript => &[
                "function_declaration",
                "generator_function_declaration",
                "method_definition",
                "function_expression",
                "generator_function",
                "arrow_function",
            ],
            Language::Unknown => &[],
        }
    }

    pub fn is_comment_kind(self, kind: &str) -> bool {
        self.comment_kinds().contains(&kind)
    }

    pub fn is_function_kind(self, kind: &str) -> bool {
        self.function_kinds().contains(&kind)
    }
}

impl FromStr for Language {
    type Err = DirectiveError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "go" | "golang" => Ok(Language::Go),
            "rust" | "rs" => Ok(Language::Rust),
            "javascript" | "js" => Ok(Language::JavaScript),
            "typescript" | "ts" => Ok(Language::TypeScript),
            other => Err(DirectiveError::unsupported_language(other)),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
