//! Scanner driver.
//!
//! The driver inspects the character under the cursor and routes it to a
//! producer. Per-line state lives in three fields: whether the cursor is
//! still at the start of a line, the structural scope read on this line and
//! the step keyword read on this line. Every newline clears the latter two.
//!
//! Producers either emit a token or ask the driver to dispatch again. Each
//! re-dispatch happens only after the cursor has advanced, so scanning
//! always terminates.

mod comment;
mod doc_string;
mod line;
mod table;

use crate::chars::{
    is_comment, is_doc_string_delimiter, is_escape, is_header_open, is_new_line,
    is_table_cell_delimiter, is_tag_character, is_tag_marker,
};
use crate::context::ScanContext;
use crate::diagnostics::Diagnostic;
use crate::keyword::{Scope, StepKeyword};
use crate::position::{Cursor, Position, SourceLocator};
use crate::token::{Token, TokenKind};

/// Outcome of one dispatch.
enum Dispatch {
    Emit(Token),
    Again,
}

/// Character-level scanner for one feature file.
///
/// A lexer is created per file, driven to exhaustion and discarded; it keeps
/// no state between files.
///
/// # Examples
/// ```
/// use gherkin_lexer::{Lexer, ScanContext, Scope, StepKeyword, TokenKind};
///
/// let mut context = ScanContext::default();
/// let tokens = Lexer::new("Feature: X\n  Given a thing\n").lex(&mut context);
/// let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
/// assert_eq!(kinds[0], TokenKind::Scope(Scope::Feature));
/// assert_eq!(kinds[3], TokenKind::Keyword(StepKeyword::Given));
/// assert_eq!(kinds[4], TokenKind::Match("a thing".into()));
/// ```
#[derive(Debug, Clone)]
pub struct Lexer {
    cursor: Cursor,
    at_line_start: bool,
    last_scope: Option<Scope>,
    last_keyword: Option<StepKeyword>,
}

impl Lexer {
    /// Create a lexer over `text` without a source locator.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self::with_locator(text, None)
    }

    /// Create a lexer over `text` whose diagnostics name `source`.
    ///
    /// An empty locator is treated as absent.
    #[must_use]
    pub fn with_source(text: &str, source: &str) -> Self {
        let locator = (!source.is_empty()).then(|| SourceLocator::parse(source));
        Self::with_locator(text, locator)
    }

    fn with_locator(text: &str, source: Option<SourceLocator>) -> Self {
        Self {
            cursor: Cursor::new(text, source),
            at_line_start: true,
            last_scope: None,
            last_keyword: None,
        }
    }

    /// Current cursor position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Number of characters consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.cursor.consumed()
    }

    /// Scan the whole input and return its tokens.
    ///
    /// The context's language is reset to its default first, so scanning the
    /// same text twice yields the same tokens. When nothing but descriptions
    /// and line breaks is found, a [`Diagnostic::NoValidGherkin`] is
    /// recorded; the tokens are returned either way.
    pub fn lex(&mut self, context: &mut ScanContext) -> Vec<Token> {
        context.reset_language();
        log::debug!(
            "scanning {} in '{}'",
            self.cursor.source().map_or("<unnamed>", SourceLocator::display_name),
            context.language().code()
        );
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token(context) {
            tokens.push(token);
        }
        if !tokens.iter().any(Token::is_structural) {
            context.record(Diagnostic::NoValidGherkin {
                source: self.cursor.source().cloned(),
            });
        }
        log::debug!("produced {} tokens", tokens.len());
        tokens
    }

    /// Produce the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self, context: &mut ScanContext) -> Option<Token> {
        loop {
            let c = self.cursor.current()?;
            if let Dispatch::Emit(token) = self.dispatch(c, context) {
                return Some(token);
            }
        }
    }

    fn dispatch(&mut self, c: char, context: &mut ScanContext) -> Dispatch {
        if is_new_line(c) {
            return Dispatch::Emit(self.read_new_line());
        }
        if is_comment(c) {
            self.read_comment(context);
            return Dispatch::Again;
        }
        if is_tag_marker(c) {
            self.at_line_start = false;
            return Dispatch::Emit(self.read_tag());
        }
        if is_table_cell_delimiter(c) {
            self.at_line_start = false;
            return self.read_table_cell();
        }
        if is_header_open(c) {
            self.at_line_start = false;
            return Dispatch::Emit(self.read_inline_header());
        }
        if self.at_line_start {
            return self.read_line_start(context);
        }
        if self.last_scope.is_some() {
            return self.read_title();
        }
        if is_doc_string_delimiter(c) {
            return Dispatch::Emit(self.read_doc_string());
        }
        if is_escape(c) {
            return Dispatch::Emit(self.read_escaped());
        }
        if self.last_keyword.is_some() {
            return self.read_match();
        }
        self.cursor.advance();
        Dispatch::Again
    }

    fn read_new_line(&mut self) -> Token {
        let position = self.cursor.position();
        self.cursor.advance();
        self.at_line_start = true;
        self.last_scope = None;
        self.last_keyword = None;
        Token::new(position, TokenKind::NewLine)
    }

    fn read_tag(&mut self) -> Token {
        let position = self.cursor.position();
        self.cursor.advance();
        let name = self.cursor.read_line_until(|c| !is_tag_character(c));
        Token::new(position, TokenKind::Tag(name))
    }
}
