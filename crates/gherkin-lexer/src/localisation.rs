//! Localised rendering of scanner diagnostics.
//!
//! Each [`Diagnostic`] maps to a Fluent message embedded in the crate. A
//! process-wide loader starts out in `en-US`; tools may switch it with
//! [`select_localisations`] or [`install_localisation_loader`], and a
//! thread-scoped [`ScopedLocalisation`] guard takes precedence over it.

use std::cell::RefCell;
use std::sync::{LazyLock, PoisonError, RwLock};

use i18n_embed::I18nEmbedError;
use i18n_embed::fluent::{FluentLanguageLoader, fluent_language_loader};
use rust_embed::RustEmbed;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

use crate::diagnostics::Diagnostic;

/// Embedded Fluent resources shipped with the crate.
///
/// # Examples
/// ```
/// # use gherkin_lexer::localisation::Localisations;
/// # use i18n_embed::fluent::fluent_language_loader;
/// # use unic_langid::langid;
/// let loader = fluent_language_loader!();
/// let selected = i18n_embed::select(&loader, &Localisations, &[langid!("fr")]).unwrap();
/// assert!(selected.contains(&langid!("fr")));
/// ```
#[derive(RustEmbed)]
#[folder = "i18n"]
pub struct Localisations;

// A loader that failed to select its resources still renders, showing the
// message id in place of the text.
static LANGUAGE_LOADER: LazyLock<RwLock<FluentLanguageLoader>> = LazyLock::new(|| {
    let loader = fluent_language_loader!();
    let english = [unic_langid::langid!("en-US")];
    if let Err(error) = i18n_embed::select(&loader, &Localisations, &english) {
        log::error!("diagnostic messages are unavailable: {error}");
    }
    RwLock::new(loader)
});

thread_local! {
    static OVERRIDE_LOADER: RefCell<Option<FluentLanguageLoader>> = const { RefCell::new(None) };
}

/// Errors from localisation setup and queries.
#[derive(Debug, Error)]
pub enum LocalisationError {
    /// The global localisation state was poisoned.
    #[error("localisation state is poisoned")]
    Poisoned,
    /// Loading or selecting Fluent resources failed.
    #[error("failed to load localisation resources: {0}")]
    Loader(#[from] I18nEmbedError),
}

/// Installs a thread-local loader until dropped.
#[must_use]
pub struct ScopedLocalisation {
    previous: Option<FluentLanguageLoader>,
}

impl ScopedLocalisation {
    /// Render diagnostics on this thread in the best match for `requested`.
    ///
    /// # Errors
    ///
    /// Returns [`LocalisationError::Loader`] if the resources cannot be
    /// loaded for the requested languages.
    pub fn new(requested: &[LanguageIdentifier]) -> Result<Self, LocalisationError> {
        let loader = fluent_language_loader!();
        i18n_embed::select(&loader, &Localisations, requested)?;
        let previous = OVERRIDE_LOADER.with(|cell| cell.replace(Some(loader)));
        Ok(Self { previous })
    }
}

impl Drop for ScopedLocalisation {
    fn drop(&mut self) {
        let previous = self.previous.take();
        OVERRIDE_LOADER.with(|cell| {
            *cell.borrow_mut() = previous;
        });
    }
}

/// Replace the global loader with a preconfigured instance.
///
/// # Errors
///
/// Returns [`LocalisationError::Poisoned`] when the global lock is poisoned.
pub fn install_localisation_loader(loader: FluentLanguageLoader) -> Result<(), LocalisationError> {
    let mut guard = LANGUAGE_LOADER
        .write()
        .map_err(|_| LocalisationError::Poisoned)?;
    *guard = loader;
    Ok(())
}

/// Switch the active loader to the best match for `requested`.
///
/// # Errors
///
/// Returns [`LocalisationError::Poisoned`] if the global lock is poisoned or
/// [`LocalisationError::Loader`] when resource selection fails.
pub fn select_localisations(
    requested: &[LanguageIdentifier],
) -> Result<Vec<LanguageIdentifier>, LocalisationError> {
    OVERRIDE_LOADER.with(|cell| -> Result<_, LocalisationError> {
        if let Some(loader) = cell.borrow().as_ref() {
            return Ok(i18n_embed::select(loader, &Localisations, requested)?);
        }
        let guard = LANGUAGE_LOADER
            .read()
            .map_err(|_| LocalisationError::Poisoned)?;
        Ok(i18n_embed::select(&*guard, &Localisations, requested)?)
    })
}

/// Languages diagnostics are currently rendered in, most preferred first.
///
/// # Errors
///
/// Returns [`LocalisationError::Poisoned`] if the global lock is poisoned.
pub fn current_languages() -> Result<Vec<LanguageIdentifier>, LocalisationError> {
    OVERRIDE_LOADER.with(|cell| -> Result<_, LocalisationError> {
        if let Some(loader) = cell.borrow().as_ref() {
            return Ok(loader.current_languages());
        }
        let guard = LANGUAGE_LOADER
            .read()
            .map_err(|_| LocalisationError::Poisoned)?;
        Ok(guard.current_languages())
    })
}

/// Render `diagnostic` with the active loader.
///
/// # Examples
/// ```
/// # use gherkin_lexer::{Diagnostic, localisation};
/// let rendered = localisation::render(&Diagnostic::NoValidGherkin { source: None });
/// assert!(rendered.contains("<unnamed>"));
/// ```
#[must_use]
pub fn render(diagnostic: &Diagnostic) -> String {
    OVERRIDE_LOADER.with(|cell| {
        if let Some(loader) = cell.borrow().as_ref() {
            return render_with_loader(loader, diagnostic);
        }
        let guard = LANGUAGE_LOADER.read().unwrap_or_else(PoisonError::into_inner);
        render_with_loader(&guard, diagnostic)
    })
}

/// Render `diagnostic` with a caller-supplied loader.
#[must_use]
pub fn render_with_loader(loader: &FluentLanguageLoader, diagnostic: &Diagnostic) -> String {
    let args = diagnostic.message_args();
    let message = loader.get_args_fluent(diagnostic.message_id(), Some(&args));
    strip_directional_isolates(&message)
}

// Fluent wraps interpolated values in bidi isolates.
fn strip_directional_isolates(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(*c, '\u{2066}' | '\u{2067}' | '\u{2068}' | '\u{2069}'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{Position, SourceLocator};
    use unic_langid::langid;

    fn scoped(locale: LanguageIdentifier) -> ScopedLocalisation {
        ScopedLocalisation::new(&[locale])
            .unwrap_or_else(|error| panic!("failed to scope locale: {error}"))
    }

    fn unsupported(language: &str) -> Diagnostic {
        Diagnostic::UnsupportedLanguage {
            language: language.into(),
            position: Position {
                line: 1,
                column: 1,
                source: Some(SourceLocator::parse("a.feature")),
            },
        }
    }

    #[test]
    fn renders_english_by_default() {
        let _guard = scoped(langid!("en-US"));
        let diagnostic = Diagnostic::NoValidGherkin {
            source: Some(SourceLocator::parse("empty.feature")),
        };
        assert_eq!(
            render(&diagnostic),
            "File: empty.feature does not contain any valid gherkin"
        );
    }

    #[test]
    fn scoped_override_switches_language() {
        let _guard = scoped(langid!("fr"));
        let rendered = render(&unsupported("tlh"));
        assert!(rendered.contains("non prise en charge"), "{rendered}");
        assert!(rendered.contains("tlh"), "{rendered}");
    }

    #[test]
    fn explicit_loader_ignores_the_active_one() {
        let _guard = scoped(langid!("fr"));
        let loader = fluent_language_loader!();
        i18n_embed::select(&loader, &Localisations, &[langid!("en-US")])
            .unwrap_or_else(|error| panic!("failed to load English: {error}"));
        assert_eq!(
            render_with_loader(&loader, &unsupported("xx")),
            "File: a.feature declares an unsupported language: xx"
        );
    }

    #[test]
    fn scoped_override_reports_current_languages() {
        let _guard = scoped(langid!("fr"));
        let languages = current_languages()
            .unwrap_or_else(|error| panic!("failed to query languages: {error}"));
        assert_eq!(languages.first(), Some(&langid!("fr")));
    }

    #[test]
    fn dropping_the_guard_restores_the_previous_loader() {
        {
            let _guard = scoped(langid!("fr"));
        }
        OVERRIDE_LOADER.with(|cell| assert!(cell.borrow().is_none()));
    }

    #[test]
    fn strips_isolates() {
        assert_eq!(strip_directional_isolates("\u{2068}a\u{2069}"), "a");
    }
}
