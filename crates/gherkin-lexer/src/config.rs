//! Scanner configuration.
//!
//! The only setting is the language active before any `# language:`
//! directive. It can be overridden with the `GHERKIN_LEXER_LANGUAGE`
//! environment variable.

use std::env;

use crate::error::ConfigError;
use crate::language::{DEFAULT_LANGUAGE, Language};

/// Environment variable naming the default language code.
pub const LANGUAGE_ENV: &str = "GHERKIN_LEXER_LANGUAGE";

/// Configuration for building a [`ScanContext`](crate::ScanContext).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerConfig {
    /// Code of the language used until a directive selects another.
    pub default_language: String,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl LexerConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `GHERKIN_LEXER_LANGUAGE`, falling back to the default when it
    /// is unset or blank.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedLanguage`] if the variable names a
    /// language that is not bundled.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedLanguage`] if the lookup names a
    /// language that is not bundled.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = match lookup(LANGUAGE_ENV) {
            Some(code) if !code.trim().is_empty() => {
                Self::default().with_default_language(code.trim())
            }
            _ => Self::default(),
        };
        config.language()?;
        Ok(config)
    }

    /// Apply optional overrides that take precedence over the environment.
    #[must_use]
    pub fn apply_overrides(mut self, default_language: Option<String>) -> Self {
        if let Some(code) = default_language {
            self.default_language = code;
        }
        self
    }

    /// Create a new configuration with the specified default language.
    #[must_use]
    pub fn with_default_language(mut self, code: impl Into<String>) -> Self {
        self.default_language = code.into();
        self
    }

    /// Resolve the configured default language.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedLanguage`] when the code is unknown.
    pub fn language(&self) -> Result<&'static Language, ConfigError> {
        Language::find(&self.default_language)
            .ok_or_else(|| ConfigError::UnsupportedLanguage(self.default_language.clone()))
    }
}
