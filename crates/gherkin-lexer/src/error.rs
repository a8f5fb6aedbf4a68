//! Error types for fallible scanner setup.
//!
//! Scanning itself never fails; advisory findings are recorded as
//! [`Diagnostic`](crate::Diagnostic) values instead.

use thiserror::Error;

/// Errors raised while building scanner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The requested default language is not bundled with the crate.
    #[error("unsupported default language '{0}'")]
    UnsupportedLanguage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_language_displays_code() {
        let error = ConfigError::UnsupportedLanguage("tlh".to_string());
        assert_eq!(error.to_string(), "unsupported default language 'tlh'");
    }
}
