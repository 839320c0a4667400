use crate::config::DEFAULT_SENTINEL;
use crate::prompt::prompt_text;
use serde::{Deserialize, Serialize};

/// A tagged comment bound to the function it annotates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Directive {
    /// Full comment block, indentation stripped, comment markers kept
    pub tag_text: String,

    /// Identifier of the bound function, or the anonymous name
    pub function_name: String,

    /// Verbatim source of the bound function
    pub function_source: String,

    /// Start line (1-indexed)
    pub function_start_line: usize,

    /// End line (1-indexed, inclusive)
    pub function_end_line: usize,

    pub function_start_byte: usize,

    /// Exclusive
    pub function_end_byte: usize,

    pub comment_start_byte: usize,

    /// Exclusive
    pub comment_end_byte: usize,

    /// How the comment was bound to the function
    pub binding: BindingKind,
}

impl Directive {
    /// Number of lines spanned by the function
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.function_end_line.saturating_sub(self.function_start_line) + 1
    }

    /// Check if the function spans a specific line
    #[must_use]
    pub const fn contains_line(&self, line: usize) -> bool {
        line >= self.function_start_line && line <= self.function_end_line
    }

    /// Byte range of the function in the original buffer
    #[must_use]
    pub const fn function_range(&self) -> std::ops::Range<usize> {
        self.function_start_byte..self.function_end_byte
    }

    /// Byte range of the merged comment block in the original buffer
    #[must_use]
    pub const fn comment_range(&self) -> std::ops::Range<usize> {
        self.comment_start_byte..self.comment_end_byte
    }

    /// Instruction text for `//`-style comments and the default sentinel
    #[must_use]
    pub fn prompt(&self) -> String {
        prompt_text(&self.tag_text, &["///", "//!", "//"], DEFAULT_SENTINEL)
    }
}

/// Where a directive sits relative to its function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    /// Comment inside the function body
    Inline,
    /// Comment directly above the declaration
    DocComment,
}

impl BindingKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::DocComment => "doc_comment",
        }
    }
}
