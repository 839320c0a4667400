//! # Chisel Directive
//!
//! Extracts tagged comments ("directives") from source code and binds each
//! one to the function it annotates.
//!
//! ## Architecture
//!
//! ```text
//! Source bytes
//!     │
//!     ├──> Tree-sitter Parsing → AST (one grammar per extractor)
//!     │
//!     ├──> Tag Query: line comments opening with the sentinel (`// @ai`)
//!     │
//!     ├──> Per tagged comment
//!     │    ├─> Function Resolver: enclosing function, else following declaration
//!     │    └─> Comment Block Collector: merge adjacent comment siblings
//!     │
//!     └──> Directive Assembler
//!          └─> Emit Directive[] in source order, orphans dropped
//! ```
//!
//! ## Example
//!
//! ```rust
//! use chisel_directive::{Extractor, Language};
//!
//! let extractor = Extractor::for_language(Language::Go).unwrap();
//!
//! let code = r#"package main
//!
//! func process() {
//! 	// @ai validate the input first
//! }
//! "#;
//!
//! let directives = extractor.extract_str(code).unwrap();
//! assert_eq!(directives[0].function_name, "process");
//! assert_eq!(directives[0].prompt(), "validate the input first");
//! ```

mod block;
mod config;
mod error;
mod extractor;
mod language;
mod prompt;
mod query;
mod resolver;
mod types;

pub use block::{collect_comment_block, trim_indentation, CommentBlock};
pub use config::{ExtractorConfig, ANONYMOUS_FUNCTION, DEFAULT_SENTINEL};
pub use error::{DirectiveError, Result};
pub use extractor::{ExtractionStats, Extractor};
pub use language::Language;
pub use prompt::prompt_text;
pub use query::TagQuery;
pub use resolver::{FunctionResolver, Resolution};
pub use types::{BindingKind, Directive};
