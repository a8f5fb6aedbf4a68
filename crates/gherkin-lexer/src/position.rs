//! Source positions and the scanning cursor.

use std::fmt;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};

use crate::chars::{is_new_line, is_space};

/// Loosely parsed locator for the text being scanned.
///
/// The locator is only used to name the source in diagnostics, so it is
/// never validated. A leading `file://` scheme is dropped and the remainder
/// is treated as a UTF-8 path.
///
/// # Examples
/// ```
/// use gherkin_lexer::SourceLocator;
///
/// let locator = SourceLocator::parse("file:///tmp/features/login.feature");
/// assert_eq!(locator.display_name(), "login.feature");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocator(Arc<Utf8PathBuf>);

impl SourceLocator {
    /// Build a locator from a path or URI-like string.
    #[must_use]
    pub fn parse(locator: &str) -> Self {
        let path = locator.strip_prefix("file://").unwrap_or(locator);
        Self(Arc::new(Utf8PathBuf::from(path)))
    }

    /// Borrow the locator as a path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.0
    }

    /// Name used in diagnostics: the final path component when there is
    /// one, otherwise the whole locator.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.0.file_name().unwrap_or_else(|| self.0.as_str())
    }
}

impl fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Immutable snapshot of the cursor location when a token was produced.
///
/// Lines and columns are 1-based and count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: u32,
    /// Column number, starting at 1.
    pub column: u32,
    /// Locator of the scanned text, if one was supplied.
    pub source: Option<SourceLocator>,
}

impl Position {
    /// Create a position without a source locator.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self {
            line,
            column,
            source: None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{source}:{}:{}", self.line, self.column),
            None => write!(f, "{}:{}", self.line, self.column),
        }
    }
}

/// Character cursor that tracks line and column while advancing.
///
/// The text is materialised as characters up front so look-around never has
/// to re-decode UTF-8. Advancing past the end of the input is a no-op.
#[derive(Debug, Clone)]
pub struct Cursor {
    chars: Vec<char>,
    index: usize,
    line: u32,
    column: u32,
    source: Option<SourceLocator>,
}

impl Cursor {
    /// Place a cursor at the start of `text`.
    #[must_use]
    pub fn new(text: &str, source: Option<SourceLocator>) -> Self {
        Self {
            chars: text.chars().collect(),
            index: 0,
            line: 1,
            column: 1,
            source,
        }
    }

    /// Snapshot the current location.
    #[must_use]
    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
            source: self.source.clone(),
        }
    }

    /// Locator supplied when the cursor was created.
    #[must_use]
    pub fn source(&self) -> Option<&SourceLocator> {
        self.source.as_ref()
    }

    /// Character under the cursor, or `None` at the end of input.
    #[must_use]
    pub fn current(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    /// Character after the cursor, or `None` at the end of input.
    #[must_use]
    pub fn peek_next(&self) -> Option<char> {
        self.chars.get(self.index.saturating_add(1)).copied()
    }

    /// Character before the cursor, or `None` at the start of input.
    #[must_use]
    pub fn peek_previous(&self) -> Option<char> {
        self.index
            .checked_sub(1)
            .and_then(|prev| self.chars.get(prev).copied())
    }

    /// Number of characters consumed so far.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.index
    }

    /// Total number of characters in the input.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Return `true` when the input holds no characters at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Return `true` once every character has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.index >= self.chars.len()
    }

    /// Consume exactly one character.
    pub fn advance(&mut self) {
        let Some(c) = self.current() else {
            return;
        };
        if is_new_line(c) {
            self.line = self.line.saturating_add(1);
            self.column = 1;
        } else {
            self.column = self.column.saturating_add(1);
        }
        self.index = self.index.saturating_add(1);
    }

    /// Consume `count` characters, stopping early at the end of input.
    pub fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            self.advance();
        }
    }

    /// Consume characters until `stop` matches or the input ends.
    pub fn read_until(&mut self, stop: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(c) = self.current() {
            if stop(c) {
                break;
            }
            text.push(c);
            self.advance();
        }
        text
    }

    /// Consume characters until `stop` matches or the line ends.
    pub fn read_line_until(&mut self, stop: impl Fn(char) -> bool) -> String {
        self.read_until(|c| is_new_line(c) || stop(c))
    }

    /// Collect the characters that [`read_line_until`](Self::read_line_until)
    /// would consume, without moving the cursor.
    #[must_use]
    pub fn look_ahead_line_until(&self, stop: impl Fn(char) -> bool) -> String {
        self.chars
            .iter()
            .skip(self.index)
            .take_while(|&&c| !is_new_line(c) && !stop(c))
            .collect()
    }

    /// Character that would end [`look_ahead_line_until`](Self::look_ahead_line_until),
    /// or `None` when the input ends first.
    #[must_use]
    pub fn look_ahead_terminator(&self, stop: impl Fn(char) -> bool) -> Option<char> {
        self.chars
            .iter()
            .skip(self.index)
            .find(|&&c| is_new_line(c) || stop(c))
            .copied()
    }

    /// Consume a run of horizontal whitespace, reporting whether any was
    /// present.
    pub fn skip_spaces(&mut self) -> bool {
        !self.read_line_until(|c| !is_space(c)).is_empty()
    }
}
