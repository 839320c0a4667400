use crate::error::{DirectiveError, Result};
use crate::language::Language;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor};

const CAPTURE_NAME: &str = "directive";

/// Compiled query matching line comments that open with the sentinel
pub struct TagQuery {
    query: Query,
    capture: u32,
}

impl TagQuery {
    /// Compile the tag query for a grammar and sentinel
    pub fn new(language: Language, sentinel: &str) -> Result<Self> {
        let ts_language = language.tree_sitter_language()?;
        let source = Self::pattern(language, sentinel);

        let query = Query::new(&ts_language, &source).map_err(|e| {
            DirectiveError::query_compile(format!("compiling tag query for {language}: {e}"))
        })?;
        let capture = query.capture_index_for_name(CAPTURE_NAME).ok_or_else(|| {
            DirectiveError::query_compile(format!("tag query has no @{CAPTURE_NAME} capture"))
        })?;

        Ok(Self { query, capture })
    }

    /// Build the query source, one alternative per taggable comment kind
    ///
    /// For Go this is `((comment) @directive (#match? @directive "^//\\s*@ai"))`.
    pub fn pattern(language: Language, sentinel: &str) -> String {
        let markers: Vec<_> = language
            .line_comment_markers()
            .iter()
            .map(|marker| regex::escape(marker))
            .collect();
        let marker = match markers.as_slice() {
            [single] => single.clone(),
            _ => format!("(?:{})", markers.join("|")),
        };
        let regex = format!("^{marker}\\s*{}", regex::escape(sentinel));
        let literal = regex.replace('\\', "\\\\").replace('"', "\\\"");

        language
            .tag_comment_kinds()
            .iter()
            .map(|kind| {
                format!("(({kind}) @{CAPTURE_NAME} (#match? @{CAPTURE_NAME} \"{literal}\"))")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Tagged comment nodes under `root`, in document order
    pub fn tagged_comments<'tree>(&self, root: Node<'tree>, source: &[u8]) -> Vec<Node<'tree>> {
        let mut cursor = QueryCursor::new();
        let mut nodes = Vec::new();

        let mut matches = cursor.matches(&self.query, root, source);
        while let Some(m) = matches.next() {
            nodes.extend(
                m.captures
                    .iter()
                    .filter(|cap| cap.index == self.capture)
                    .map(|cap| cap.node),
            );
        }

        nodes
    }
}
