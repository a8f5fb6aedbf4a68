//! Character classification used by the scanner.
//!
//! Every predicate inspects a single character and has no side effects. The
//! scanner combines them with the cursor's look-around helpers when a
//! decision needs more than one character of context.

/// Line terminator.
pub const NEW_LINE: char = '\n';
/// Starts a comment running to the end of the line.
pub const COMMENT: char = '#';
/// Starts a tag such as `@smoke`.
pub const TAG_MARKER: char = '@';
/// Separates data table cells.
pub const TABLE_CELL_DELIMITER: char = '|';
/// Opens an outline placeholder or table header such as `<name>`.
pub const TABLE_HEADER_OPEN: char = '<';
/// Closes an outline placeholder or table header.
pub const TABLE_HEADER_CLOSE: char = '>';
/// Escapes the character that follows it.
pub const ESCAPE: char = '\\';
/// Ends the keyword part of a structural line such as `Feature:`.
pub const SCOPE_TERMINATOR: char = ':';

/// Opening and closing fences accepted for doc strings.
pub const DOC_STRING_FENCES: [&str; 2] = ["\"\"\"", "```"];

/// Return `true` for the line terminator.
#[must_use]
pub const fn is_new_line(c: char) -> bool {
    c == NEW_LINE
}

/// Return `true` for horizontal whitespace.
///
/// Any whitespace other than the line terminator counts, so the carriage
/// return of a CRLF pair behaves like trailing space.
#[must_use]
pub fn is_space(c: char) -> bool {
    c != NEW_LINE && c.is_whitespace()
}

/// Return `true` for the comment marker.
#[must_use]
pub const fn is_comment(c: char) -> bool {
    c == COMMENT
}

/// Return `true` for the tag marker.
#[must_use]
pub const fn is_tag_marker(c: char) -> bool {
    c == TAG_MARKER
}

/// Return `true` when `c` may appear in a tag name.
#[must_use]
pub fn is_tag_character(c: char) -> bool {
    !c.is_whitespace() && !is_tag_marker(c) && !is_comment(c)
}

/// Return `true` for the table cell delimiter.
#[must_use]
pub const fn is_table_cell_delimiter(c: char) -> bool {
    c == TABLE_CELL_DELIMITER
}

/// Return `true` for the header open marker.
#[must_use]
pub const fn is_header_open(c: char) -> bool {
    c == TABLE_HEADER_OPEN
}

/// Return `true` for the header close marker.
#[must_use]
pub const fn is_header_close(c: char) -> bool {
    c == TABLE_HEADER_CLOSE
}

/// Return `true` for characters that make up a doc string fence.
#[must_use]
pub const fn is_doc_string_delimiter(c: char) -> bool {
    matches!(c, '"' | '`')
}

/// Return `true` when `run` is exactly one of the accepted fences.
#[must_use]
pub fn is_doc_string_fence(run: &str) -> bool {
    DOC_STRING_FENCES.contains(&run)
}

/// Return `true` for the escape character.
#[must_use]
pub const fn is_escape(c: char) -> bool {
    c == ESCAPE
}

/// Return `true` for characters that end the keyword part of a line.
#[must_use]
pub const fn is_scope_terminator(c: char) -> bool {
    c == SCOPE_TERMINATOR || is_new_line(c)
}

/// Return `true` for characters that end a run of free step text.
///
/// Each symbol has its own branch in the scanner, so free text stopping at
/// one always hands control to a producer that consumes it.
#[must_use]
pub const fn is_symbol(c: char) -> bool {
    is_new_line(c)
        || is_comment(c)
        || is_tag_marker(c)
        || is_table_cell_delimiter(c)
        || is_header_open(c)
        || is_doc_string_delimiter(c)
        || is_escape(c)
}
