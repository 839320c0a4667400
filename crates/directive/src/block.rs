use crate::error::{DirectiveError, Result};
use crate::language::Language;
use tree_sitter::Node;

/// A run of adjacent sibling comments around a tagged comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    /// Block text with per-line indentation removed
    pub text: String,
    pub start_byte: usize,
    /// Exclusive
    pub end_byte: usize,
}

/// Expand `comment` over its contiguous comment siblings
pub fn collect_comment_block(
    language: Language,
    source: &str,
    comment: Node<'_>,
) -> Result<CommentBlock> {
    let mut start = comment.start_byte();
    let mut end = comment.end_byte();

    let mut prev = comment.prev_sibling();
    while let Some(sibling) = prev.filter(|n| language.is_comment_kind(n.kind())) {
        start = sibling.start_byte();
        prev = sibling.prev_sibling();
    }

    let mut next = comment.next_sibling();
    while let Some(sibling) = next.filter(|n| language.is_comment_kind(n.kind())) {
        end = sibling.end_byte();
        next = sibling.next_sibling();
    }

    let raw = source.get(start..end).ok_or_else(|| {
        DirectiveError::parse(format!("comment span {start}..{end} is not a valid text range"))
    })?;

    Ok(CommentBlock {
        text: trim_indentation(raw),
        start_byte: start,
        end_byte: end,
    })
}

/// Strip leading spaces and tabs from every line, keep everything else
pub fn trim_indentation(raw: &str) -> String {
    raw.split('\n')
        .map(|line| line.trim_start_matches([' ', '\t']))
        .collect::<Vec<_>>()
        .join("\n")
}
