use crate::block::collect_comment_block;
use crate::config::ExtractorConfig;
use crate::error::{DirectiveError, Result};
use crate::language::Language;
use crate::prompt::prompt_text;
use crate::query::TagQuery;
use crate::resolver::FunctionResolver;
use crate::types::{BindingKind, Directive};
use std::collections::HashSet;
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Main extractor interface: source in, directives out
///
/// The compiled tag query is shared; every call builds its own parser,
/// tree and query cursor, so one extractor can serve several threads.
pub struct Extractor {
    config: ExtractorConfig,
    ts_language: tree_sitter::Language,
    query: TagQuery,
    resolver: FunctionResolver,
}

impl Extractor {
    /// Create a new extractor, compiling the tag query up front
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        config.validate().map_err(DirectiveError::invalid_config)?;

        let language = config.language;
        let ts_language = language.tree_sitter_language()?;
        let query = TagQuery::new(language, &config.sentinel)?;

        let extractor = Self {
            config,
            ts_language,
            query,
            resolver: FunctionResolver::new(language),
        };
        // Probe the grammar once so setup errors come from new()
        extractor.parser()?;

        Ok(extractor)
    }

    /// Extractor with default settings for a language
    pub fn for_language(language: Language) -> Result<Self> {
        Self::new(ExtractorConfig::for_language(language))
    }

    /// Extract directives from a source buffer
    pub fn extract(&self, source: &[u8]) -> Result<Vec<Directive>> {
        log::debug!(
            "Parsing {} bytes of {} source",
            source.len(),
            self.config.language
        );

        let text = std::str::from_utf8(source).map_err(|e| {
            DirectiveError::parse(format!("source is not valid UTF-8: {e}"))
        })?;

        let mut parser = self.parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| DirectiveError::parse("tree-sitter produced no tree"))?;
        let root = tree.root_node();

        if self.config.reject_syntax_errors && root.has_error() {
            let line = first_error(root).map_or(1, |n| n.start_position().row + 1);
            return Err(DirectiveError::parse(format!(
                "syntax error near line {line}"
            )));
        }

        let directives = self.assemble(text, root)?;
        log::debug!("Found {} directives", directives.len());

        Ok(directives)
    }

    /// Extract directives from a string
    pub fn extract_str(&self, source: &str) -> Result<Vec<Directive>> {
        self.extract(source.as_bytes())
    }

    /// Extract directives from a file
    pub fn extract_file(&self, path: impl AsRef<Path>) -> Result<Vec<Directive>> {
        let content = std::fs::read(path.as_ref())?;
        self.extract(&content)
    }

    /// Instruction text of a directive, using this extractor's markers and sentinel
    #[must_use]
    pub fn prompt(&self, directive: &Directive) -> String {
        prompt_text(
            &directive.tag_text,
            self.config.language.line_comment_markers(),
            &self.config.sentinel,
        )
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Get statistics about extraction results
    #[must_use]
    pub fn get_stats(directives: &[Directive]) -> ExtractionStats {
        let count = |kind: BindingKind| directives.iter().filter(|d| d.binding == kind).count();
        let functions: HashSet<_> = directives
            .iter()
            .map(|d| (d.function_start_byte, d.function_end_byte))
            .collect();

        ExtractionStats {
            total_directives: directives.len(),
            inline: count(BindingKind::Inline),
            doc_comment: count(BindingKind::DocComment),
            distinct_functions: functions.len(),
        }
    }

    fn parser(&self) -> Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(&self.ts_language).map_err(|e| {
            DirectiveError::grammar_setup(format!(
                "setting {} language: {e}",
                self.config.language
            ))
        })?;
        Ok(parser)
    }

    /// Bind every tagged comment and build records in match order
    fn assemble(&self, source: &str, root: Node<'_>) -> Result<Vec<Directive>> {
        let mut directives = Vec::new();

        for comment in self.query.tagged_comments(root, source.as_bytes()) {
            let resolution = self.resolver.resolve(comment);
            let (Some(function), Some(binding)) = (resolution.function(), resolution.binding())
            else {
                log::debug!(
                    "Skipping orphan directive at line {}",
                    comment.start_position().row + 1
                );
                continue;
            };

            let block = collect_comment_block(self.config.language, source, comment)?;

            directives.push(Directive {
                tag_text: block.text,
                function_name: self.function_name(source, function),
                function_source: node_text(source, function)?.to_string(),
                function_start_line: function.start_position().row + 1,
                function_end_line: function.end_position().row + 1,
                function_start_byte: function.start_byte(),
                function_end_byte: function.end_byte(),
                comment_start_byte: block.start_byte,
                comment_end_byte: block.end_byte,
                binding,
            });
        }

        Ok(directives)
    }

    fn function_name(&self, source: &str, function: Node<'_>) -> String {
        function
            .child_by_field_name("name")
            .and_then(|name| source.get(name.byte_range()))
            .map_or_else(|| self.config.anonymous_name.clone(), str::to_string)
    }
}

/// Statistics about extraction results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionStats {
    pub total_directives: usize,
    pub inline: usize,
    pub doc_comment: usize,
    pub distinct_functions: usize,
}

impl std::fmt::Display for ExtractionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Directives: {} | Inline: {} | Doc: {} | Functions: {}",
            self.total_directives, self.inline, self.doc_comment, self.distinct_functions
        )
    }
}

fn node_text<'a>(source: &'a str, node: Node<'_>) -> Result<&'a str> {
    source.get(node.byte_range()).ok_or_else(|| {
        DirectiveError::parse(format!(
            "{} span {:?} is not a valid text range",
            node.kind(),
            node.byte_range()
        ))
    })
}

/// Leftmost error or missing node
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(first_error)
}
