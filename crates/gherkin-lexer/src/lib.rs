//! Character-level scanner for Gherkin feature files.
//!
//! The crate turns feature text into a flat stream of positioned
//! [`Token`]s: scope keywords, step keywords, titles, descriptions, step
//! text, tags, table cells, placeholders and doc strings. Keywords are
//! resolved against bundled language tables and the active language can be
//! switched in-band with a `# language: <code>` comment.
//!
//! Scanning never fails. Unsupported language directives and files without
//! any recognisable structure are reported as [`Diagnostic`]s collected in
//! the [`ScanContext`] that drives the scan.
//!
//! # Examples
//! ```
//! use gherkin_lexer::{Scope, TokenKind, scan};
//!
//! let result = scan("Feature: Coffee\n  Scenario: Brew\n", Some("coffee.feature"));
//! assert_eq!(result.tokens[0].kind, TokenKind::Scope(Scope::Feature));
//! assert_eq!(result.tokens[1].kind, TokenKind::Title("Coffee".into()));
//! assert!(result.diagnostics.is_empty());
//! ```

mod chars;
mod config;
mod context;
mod diagnostics;
mod error;
mod keyword;
mod language;
mod lexer;
pub mod localisation;
mod position;
mod token;

pub use config::{LANGUAGE_ENV, LexerConfig};
pub use context::ScanContext;
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::ConfigError;
pub use keyword::{Scope, StepKeyword, StepKeywordParseError};
pub use language::{DEFAULT_LANGUAGE, Language, ScopeMatch};
pub use lexer::Lexer;
pub use position::{Cursor, Position, SourceLocator};
pub use token::{DocString, Token, TokenKind};

/// Outcome of [`scan`].
#[derive(Debug, Clone)]
pub struct Scan {
    /// Tokens in source order.
    pub tokens: Vec<Token>,
    /// Findings recorded while scanning.
    pub diagnostics: Diagnostics,
    /// Language in effect when the scan finished.
    pub language: &'static Language,
}

/// Scan `text` in the default language with a fresh context.
///
/// `source` names the text in diagnostics; `None` or an empty string leaves
/// it unnamed.
#[must_use]
pub fn scan(text: &str, source: Option<&str>) -> Scan {
    let mut context = ScanContext::default();
    let mut lexer = source.map_or_else(
        || Lexer::new(text),
        |source| Lexer::with_source(text, source),
    );
    let tokens = lexer.lex(&mut context);
    Scan {
        tokens,
        language: context.language(),
        diagnostics: context.take_diagnostics(),
    }
}
