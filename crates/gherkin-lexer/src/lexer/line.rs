//! Line-level producers: scopes, step keywords, titles, descriptions and
//! step text.

use super::{Dispatch, Lexer};
use crate::chars::{
    is_comment, is_doc_string_delimiter, is_header_open, is_new_line, is_scope_terminator,
    is_space, is_symbol, COMMENT, ESCAPE, SCOPE_TERMINATOR,
};
use crate::context::ScanContext;
use crate::keyword::Scope;
use crate::token::{Token, TokenKind};

impl Lexer {
    /// Classify the first non-space text of a line.
    pub(super) fn read_line_start(&mut self, context: &ScanContext) -> Dispatch {
        if self.cursor.skip_spaces() {
            return Dispatch::Again;
        }
        self.at_line_start = false;
        if self.cursor.current().is_some_and(is_doc_string_delimiter)
            && self.at_doc_string_fence()
        {
            return Dispatch::Emit(self.read_doc_string());
        }

        let position = self.cursor.position();
        let head = self.cursor.look_ahead_line_until(is_scope_terminator);
        let terminator = self.cursor.look_ahead_terminator(is_scope_terminator);
        let resolved = context
            .language()
            .resolve(&head)
            .map(|found| (found.scope, found.keyword_len));

        let token = match resolved {
            Some((scope, _)) if scope.is_structural() && terminator == Some(SCOPE_TERMINATOR) => {
                self.cursor.advance_by(head.chars().count() + 1);
                self.cursor.skip_spaces();
                self.last_scope = Some(scope);
                Token::new(position, TokenKind::Scope(scope))
            }
            Some((Scope::Step(keyword), keyword_len)) => {
                self.cursor.advance_by(keyword_len);
                self.cursor.skip_spaces();
                self.last_keyword = Some(keyword);
                Token::new(position, TokenKind::Keyword(keyword))
            }
            _ => self.read_description(),
        };
        Dispatch::Emit(token)
    }

    fn read_description(&mut self) -> Token {
        let position = self.cursor.position();
        let text = self.cursor.read_line_until(|_| false);
        Token::new(position, TokenKind::Description(text.trim_matches(is_space).to_string()))
    }

    /// Read the title following a structural keyword, up to a placeholder
    /// or the end of the line.
    pub(super) fn read_title(&mut self) -> Dispatch {
        let position = self.cursor.position();
        let title = self.read_text_until(is_header_open);
        if title.is_empty() {
            return Dispatch::Again;
        }
        Dispatch::Emit(Token::new(position, TokenKind::Title(title)))
    }

    /// Read step text up to the next symbol.
    pub(super) fn read_match(&mut self) -> Dispatch {
        let position = self.cursor.position();
        let text = self.read_text_until(is_symbol);
        if text.is_empty() {
            return Dispatch::Again;
        }
        Dispatch::Emit(Token::new(position, TokenKind::Match(text)))
    }

    /// Read free text on the current line. Text that runs to the end of the
    /// line loses its trailing space. Always consumes at least one
    /// character when any remain on the line.
    fn read_text_until(&mut self, stop: impl Fn(char) -> bool) -> String {
        let mut text = self.cursor.read_line_until(stop);
        if text.is_empty() && self.cursor.current().is_some_and(|c| !is_new_line(c)) {
            self.cursor.advance();
            return text;
        }
        if self.cursor.current().is_none_or(is_new_line) {
            let trimmed = text.trim_end_matches(is_space).len();
            text.truncate(trimmed);
        }
        text
    }

    /// Read an escape outside a table cell or doc string.
    pub(super) fn read_escaped(&mut self) -> Token {
        let position = self.cursor.position();
        self.cursor.advance();
        let text = match self.cursor.current() {
            Some(c) if is_comment(c) => {
                self.cursor.advance();
                COMMENT.to_string()
            }
            Some(c) if is_symbol(c) && !is_new_line(c) => {
                self.cursor.advance();
                let rest = self.cursor.read_line_until(is_symbol);
                format!("{c}{rest}")
            }
            _ => {
                let rest = self.cursor.read_line_until(is_symbol);
                format!("{ESCAPE}{rest}")
            }
        };
        Token::new(position, TokenKind::Match(text))
    }
}
