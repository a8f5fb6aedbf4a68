//! Tokens produced by the scanner.

use crate::keyword::{Scope, StepKeyword};
use crate::position::Position;

/// Payload of a fenced doc string block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocString {
    /// Text between the fences with escape sequences kept verbatim.
    pub raw_literal: String,
    /// Decoded content with shared indentation and trailing blank lines
    /// removed.
    pub literal: String,
    /// Content type written after the opening fence, such as `json`.
    pub content_type: Option<String>,
}

/// Variant-specific payload of a [`Token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// End of a line.
    NewLine,
    /// Tag name without its `@` marker.
    Tag(String),
    /// Trimmed content of a data table cell.
    TableCell(String),
    /// Content of a `<...>` placeholder or bracket-fenced table cell.
    TableHeader(String),
    /// Structural keyword such as `Feature:`.
    Scope(Scope),
    /// Step keyword introducing a step line.
    Keyword(StepKeyword),
    /// Title following a structural keyword.
    Title(String),
    /// Free text on a line without a keyword.
    Description(String),
    /// Step text following a keyword.
    Match(String),
    /// Fenced doc string block.
    DocString(DocString),
}

/// A token and the position where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Where the token starts.
    pub position: Position,
    /// What the token is.
    pub kind: TokenKind,
}

impl Token {
    /// Pair a kind with its position.
    #[must_use]
    pub const fn new(position: Position, kind: TokenKind) -> Self {
        Self { position, kind }
    }

    /// Return `true` for [`TokenKind::NewLine`].
    #[must_use]
    pub const fn is_new_line(&self) -> bool {
        matches!(self.kind, TokenKind::NewLine)
    }

    /// Return `true` for [`TokenKind::Description`].
    #[must_use]
    pub const fn is_description(&self) -> bool {
        matches!(self.kind, TokenKind::Description(_))
    }

    /// Return `true` when the token carries Gherkin structure, that is,
    /// anything other than a description or a line break.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        !self.is_new_line() && !self.is_description()
    }

    /// Text carried by the token, if its kind has any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Tag(text)
            | TokenKind::TableCell(text)
            | TokenKind::TableHeader(text)
            | TokenKind::Title(text)
            | TokenKind::Description(text)
            | TokenKind::Match(text) => Some(text),
            TokenKind::DocString(doc) => Some(&doc.literal),
            TokenKind::NewLine | TokenKind::Scope(_) | TokenKind::Keyword(_) => None,
        }
    }
}
