use thiserror::Error;

/// Result type for directive extraction
pub type Result<T> = std::result::Result<T, DirectiveError>;

/// Errors that can occur during directive extraction
#[derive(Error, Debug)]
pub enum DirectiveError {
    /// No grammar is available for the requested language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Tree-sitter rejected the grammar
    #[error("Grammar setup error: {0}")]
    GrammarSetup(String),

    /// The tag query did not compile
    #[error("Query compile error: {0}")]
    QueryCompile(String),

    /// Failed to build a syntax tree from the source
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DirectiveError {
    pub fn unsupported_language(lang: impl Into<String>) -> Self {
        Self::UnsupportedLanguage(lang.into())
    }

    pub fn grammar_setup(msg: impl Into<String>) -> Self {
        Self::GrammarSetup(msg.into())
    }

    pub fn query_compile(msg: impl Into<String>) -> Self {
        Self::QueryCompile(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// True for failures that happen before any source is looked at
    pub const fn is_setup_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedLanguage(_)
                | Self::GrammarSetup(_)
                | Self::QueryCompile(_)
                | Self::InvalidConfig(_)
        )
    }
}
