//! Data table cells and `<...>` placeholders.

use super::{Dispatch, Lexer};
use crate::chars::{
    is_escape, is_header_close, is_header_open, is_new_line, is_space, is_table_cell_delimiter,
    TABLE_HEADER_CLOSE, TABLE_HEADER_OPEN,
};
use crate::token::{Token, TokenKind};

/// Decode the character following an escape inside a table cell.
fn decode_cell_escape(next: char) -> Option<char> {
    match next {
        'n' => Some('\n'),
        c if is_table_cell_delimiter(c)
            || is_escape(c)
            || is_header_open(c)
            || is_header_close(c) =>
        {
            Some(c)
        }
        _ => None,
    }
}

/// Tracks whether a cell is fenced as `<header>`.
///
/// The first non-space character must be an unescaped open marker and the
/// last non-space character an unescaped close marker.
#[derive(Debug, Default)]
struct HeaderFence {
    opened: Option<bool>,
    closed: bool,
}

impl HeaderFence {
    fn literal(&mut self) {
        self.opened.get_or_insert(false);
        self.closed = false;
    }

    fn marker(&mut self, c: char) {
        if is_space(c) {
            return;
        }
        self.opened.get_or_insert(is_header_open(c));
        self.closed = is_header_close(c);
    }

    fn is_fenced(&self) -> bool {
        self.opened == Some(true) && self.closed
    }
}

impl Lexer {
    /// Read the cell following a delimiter.
    ///
    /// The cell is emitted only when another delimiter terminates it; the
    /// trailing delimiter of a row, or an unterminated final cell, yields no
    /// token and the driver dispatches again.
    pub(super) fn read_table_cell(&mut self) -> Dispatch {
        let position = self.cursor.position();
        self.cursor.advance();
        let kind = self.read_cell();
        if self.cursor.current().is_some_and(is_table_cell_delimiter) {
            Dispatch::Emit(Token::new(position, kind))
        } else {
            Dispatch::Again
        }
    }

    fn read_cell(&mut self) -> TokenKind {
        let mut text = String::new();
        let mut fence = HeaderFence::default();
        while let Some(c) = self.cursor.current() {
            if is_new_line(c) || is_table_cell_delimiter(c) {
                break;
            }
            if is_escape(c) {
                if let Some(decoded) = self.cursor.peek_next().and_then(decode_cell_escape) {
                    text.push(decoded);
                    fence.literal();
                    self.cursor.advance_by(2);
                    continue;
                }
            }
            fence.marker(c);
            text.push(c);
            self.cursor.advance();
        }

        let trimmed = text.trim_matches(is_space);
        if fence.is_fenced() {
            let inner = trimmed
                .strip_prefix(TABLE_HEADER_OPEN)
                .and_then(|rest| rest.strip_suffix(TABLE_HEADER_CLOSE))
                .unwrap_or(trimmed);
            TokenKind::TableHeader(inner.trim_matches(is_space).to_string())
        } else {
            TokenKind::TableCell(trimmed.to_string())
        }
    }

    /// Read a `<name>` placeholder outside a table cell.
    ///
    /// Without a close marker on the same line the text is not a
    /// placeholder and is emitted as step text instead.
    pub(super) fn read_inline_header(&mut self) -> Token {
        let position = self.cursor.position();
        let closes = self.cursor.look_ahead_terminator(is_header_close) == Some(TABLE_HEADER_CLOSE);
        self.cursor.advance();
        if closes {
            let name = self.cursor.read_line_until(is_header_close);
            self.cursor.advance();
            Token::new(position, TokenKind::TableHeader(name))
        } else {
            let rest = self.cursor.read_line_until(|_| false);
            Token::new(position, TokenKind::Match(format!("{TABLE_HEADER_OPEN}{rest}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case('n', Some('\n'))]
    #[case('|', Some('|'))]
    #[case('\\', Some('\\'))]
    #[case('<', Some('<'))]
    #[case('>', Some('>'))]
    #[case('t', None)]
    fn decodes_cell_escapes(#[case] next: char, #[case] expected: Option<char>) {
        assert_eq!(decode_cell_escape(next), expected);
    }

    #[test]
    fn fence_requires_open_first_and_close_last() {
        let mut fence = HeaderFence::default();
        for c in " <name> ".chars() {
            fence.marker(c);
        }
        assert!(fence.is_fenced());

        let mut fence = HeaderFence::default();
        for c in "a <b>".chars() {
            fence.marker(c);
        }
        assert!(!fence.is_fenced());

        let mut fence = HeaderFence::default();
        for c in "<b".chars() {
            fence.marker(c);
        }
        fence.literal();
        assert!(!fence.is_fenced());
    }
}
