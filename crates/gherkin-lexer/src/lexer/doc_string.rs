//! Fenced doc string blocks.
//!
//! A block opens with `"""` or ```` ``` ````, optionally followed by a
//! content type on the same line, and closes at the next occurrence of the
//! same fence. Escaped fence characters and escaped backslashes are decoded
//! in the literal but kept verbatim in the raw text.

use super::Lexer;
use crate::chars::{is_doc_string_delimiter, is_doc_string_fence, is_escape, is_space};
use crate::token::{DocString, Token, TokenKind};

impl Lexer {
    fn fence_run(&self) -> String {
        self.cursor.look_ahead_line_until(|c| !is_doc_string_delimiter(c))
    }

    /// Return `true` when the cursor sits on a valid opening fence.
    pub(super) fn at_doc_string_fence(&self) -> bool {
        is_doc_string_fence(&self.fence_run())
    }

    /// Read a doc string block, or a run of quote characters that does not
    /// form a fence.
    pub(super) fn read_doc_string(&mut self) -> Token {
        let position = self.cursor.position();
        let open = self.fence_run();
        let fence_len = open.chars().count();
        self.cursor.advance_by(fence_len);
        if !is_doc_string_fence(&open) {
            return Token::new(position, TokenKind::Match(open));
        }

        let mut literal = String::new();
        let mut raw = String::new();
        while let Some(c) = self.cursor.current() {
            if is_escape(c) {
                if let Some(next) = self
                    .cursor
                    .peek_next()
                    .filter(|&n| is_doc_string_delimiter(n) || is_escape(n))
                {
                    literal.push(next);
                    raw.push(c);
                    raw.push(next);
                    self.cursor.advance_by(2);
                    continue;
                }
            }
            if is_doc_string_delimiter(c) && self.fence_run() == open {
                break;
            }
            literal.push(c);
            raw.push(c);
            self.cursor.advance();
        }
        self.cursor.advance_by(fence_len);

        Token::new(position, TokenKind::DocString(assemble_doc_string(raw, &literal)))
    }
}

/// Split decoded content into the content type and the dedented literal.
///
/// The first line holds the content type. Indentation equal to the leading
/// whitespace of the first content line is stripped from every following
/// line, then trailing blank lines are dropped. A blank first content line
/// sets no indentation.
pub(crate) fn assemble_doc_string(raw_literal: String, decoded: &str) -> DocString {
    let lines: Vec<&str> = decoded.split('\n').collect();
    let indent = lines
        .get(1)
        .filter(|line| !line.trim().is_empty())
        .map_or(0, |line| line.chars().take_while(|&c| is_space(c)).count());

    let mut lines: Vec<String> = lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            if index == 0 {
                (*line).to_string()
            } else {
                strip_indent(line, indent)
            }
        })
        .collect();
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }

    let mut lines = lines.into_iter();
    let content_type = lines
        .next()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty());
    let literal = lines.collect::<Vec<_>>().join("\n");

    DocString {
        raw_literal,
        literal,
        content_type,
    }
}

fn strip_indent(line: &str, indent: usize) -> String {
    let mut chars = line.chars().peekable();
    let mut stripped = 0;
    while stripped < indent && chars.next_if(|&c| is_space(c)).is_some() {
        stripped += 1;
    }
    chars.collect()
}
