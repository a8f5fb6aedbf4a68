//! Advisory findings recorded while scanning.
//!
//! Nothing here aborts a scan. The scanner appends to a [`Diagnostics`]
//! collection and callers inspect it once scanning has finished.

use std::fmt;

use fluent::FluentArgs;

use crate::localisation;
use crate::position::{Position, SourceLocator};

const UNNAMED_SOURCE: &str = "<unnamed>";

/// A single advisory finding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Diagnostic {
    /// A `# language:` directive named a language that is not bundled. The
    /// previously active language stays in effect.
    UnsupportedLanguage {
        /// Requested language code.
        language: String,
        /// Where the directive appeared.
        position: Position,
    },
    /// The text held nothing but descriptions and blank lines.
    NoValidGherkin {
        /// Locator of the scanned text, if one was supplied.
        source: Option<SourceLocator>,
    },
}

impl Diagnostic {
    /// Locator of the text the diagnostic refers to.
    #[must_use]
    pub fn source(&self) -> Option<&SourceLocator> {
        match self {
            Self::UnsupportedLanguage { position, .. } => position.source.as_ref(),
            Self::NoValidGherkin { source } => source.as_ref(),
        }
    }

    fn file_name(&self) -> &str {
        self.source().map_or(UNNAMED_SOURCE, SourceLocator::display_name)
    }

    pub(crate) const fn message_id(&self) -> &'static str {
        match self {
            Self::UnsupportedLanguage { .. } => "diagnostic-unsupported-language",
            Self::NoValidGherkin { .. } => "diagnostic-no-valid-gherkin",
        }
    }

    pub(crate) fn message_args(&self) -> FluentArgs<'static> {
        let mut args = FluentArgs::new();
        args.set("file", self.file_name().to_string());
        if let Self::UnsupportedLanguage { language, .. } = self {
            args.set("language", language.clone());
        }
        args
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&localisation::render(self))
    }
}

/// Append-only collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::UnsupportedLanguage { language, position } => log::warn!(
                "{}:{}:{}: unsupported language '{language}'",
                diagnostic.file_name(),
                position.line,
                position.column
            ),
            Diagnostic::NoValidGherkin { .. } => {
                log::warn!("{}: no valid gherkin", diagnostic.file_name());
            }
        }
        self.0.push(diagnostic);
    }

    /// Number of recorded diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the diagnostics in the order they were recorded.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// Render every diagnostic with the active localisation.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// Consume the collection, returning the diagnostics.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
