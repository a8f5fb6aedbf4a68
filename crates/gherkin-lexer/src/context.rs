//! Per-scan language selection and diagnostics.
//!
//! The active language and the diagnostics sink are threaded through the
//! scanner explicitly instead of living in process-wide globals. Scans that
//! use separate contexts are fully independent and may run in parallel;
//! callers that want a shared sink share one context (behind their own lock).

use crate::config::LexerConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::ConfigError;
use crate::language::Language;

/// Language selection and diagnostics shared by the producers of a scan.
#[derive(Debug, Clone)]
pub struct ScanContext {
    default_language: &'static Language,
    language: &'static Language,
    diagnostics: Diagnostics,
}

impl Default for ScanContext {
    fn default() -> Self {
        Self::new(Language::default_language())
    }
}

impl ScanContext {
    /// Create a context whose scans start in `default_language`.
    #[must_use]
    pub fn new(default_language: &'static Language) -> Self {
        Self {
            default_language,
            language: default_language,
            diagnostics: Diagnostics::default(),
        }
    }

    /// Create a context from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedLanguage`] when the configured
    /// default language is not bundled.
    pub fn from_config(config: &LexerConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.language()?))
    }

    /// Language currently used to resolve keywords.
    #[must_use]
    pub fn language(&self) -> &'static Language {
        self.language
    }

    /// Language every scan starts in.
    #[must_use]
    pub fn default_language(&self) -> &'static Language {
        self.default_language
    }

    /// Diagnostics recorded so far.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Take the recorded diagnostics, leaving the sink empty.
    pub fn take_diagnostics(&mut self) -> Diagnostics {
        std::mem::take(&mut self.diagnostics)
    }

    pub(crate) fn set_language(&mut self, language: &'static Language) {
        self.language = language;
    }

    pub(crate) fn reset_language(&mut self) {
        self.language = self.default_language;
    }

    pub(crate) fn record(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
