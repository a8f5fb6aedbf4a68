//! Comments and the in-band `# language:` directive.

use std::sync::LazyLock;

use regex::Regex;

use super::Lexer;
use crate::context::ScanContext;
use crate::diagnostics::Diagnostic;
use crate::language::Language;
use crate::position::Position;

static LANGUAGE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*language\s*:\s*(.*?)\s*$")
        .unwrap_or_else(|error| panic!("language directive pattern must compile: {error}"))
});

/// Extract the code from a `language: <code>` comment body.
pub(super) fn directive_code(comment: &str) -> Option<&str> {
    LANGUAGE_DIRECTIVE
        .captures(comment)
        .and_then(|captures| captures.get(1))
        .map(|code| code.as_str())
}

impl Lexer {
    /// Consume a comment without emitting a token.
    ///
    /// A comment that starts its line also consumes the line break, so
    /// comment lines leave no trace in the token stream.
    pub(super) fn read_comment(&mut self, context: &mut ScanContext) {
        let position = self.cursor.position();
        let owns_line = self.at_line_start;
        self.cursor.advance();
        let body = self.cursor.read_line_until(|_| false);
        if owns_line {
            self.cursor.advance();
        }
        if let Some(code) = directive_code(&body) {
            switch_language(code, position, context);
        }
    }
}

fn switch_language(code: &str, position: Position, context: &mut ScanContext) {
    let Some(language) = Language::find(code) else {
        context.record(Diagnostic::UnsupportedLanguage {
            language: code.to_string(),
            position,
        });
        return;
    };
    log::debug!(
        "{position}: switching language from '{}' to '{}'",
        context.language().code(),
        language.code()
    );
    context.set_language(language);
}
