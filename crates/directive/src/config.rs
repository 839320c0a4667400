use crate::language::Language;
use serde::{Deserialize, Serialize};

/// Sentinel that marks a comment as a directive
pub const DEFAULT_SENTINEL: &str = "@ai";

/// Name reported for function literals without a `name` field
pub const ANONYMOUS_FUNCTION: &str = "<anonymous>";

/// Configuration for directive extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Grammar used to parse the source
    pub language: Language,

    /// Token that must open the comment text (after the marker)
    pub sentinel: String,

    /// Function name used for anonymous function literals
    pub anonymous_name: String,

    /// Fail the whole call when the tree contains syntax errors
    pub reject_syntax_errors: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            language: Language::Go,
            sentinel: DEFAULT_SENTINEL.to_string(),
            anonymous_name: ANONYMOUS_FUNCTION.to_string(),
            reject_syntax_errors: false,
        }
    }
}

impl ExtractorConfig {
    /// Default configuration for a language
    pub fn for_language(language: Language) -> Self {
        Self {
            language,
            ..Default::default()
        }
    }

    /// Builder: set sentinel token
    #[must_use]
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Builder: fail on trees with syntax errors
    #[must_use]
    pub const fn strict(mut self) -> Self {
        self.reject_syntax_errors = true;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.sentinel.is_empty() {
            return Err("sentinel must not be empty".to_string());
        }

        if self.sentinel.chars().any(char::is_whitespace) {
            return Err(format!(
                "sentinel ({:?}) cannot contain whitespace",
                self.sentinel
            ));
        }

        if self.anonymous_name.is_empty() {
            return Err("anonymous_name must not be empty".to_string());
        }

        Ok(())
    }
}
