//! Locale keyword tables and scope resolution.
//!
//! Languages are data, not behaviour: each one maps every scope and step
//! keyword to an ordered list of surface synonyms. The tables are embedded
//! from a JSON resource in the shape of the upstream `gherkin-languages.json`
//! and resolved with a longest-match lookup.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Deserialize;
use unic_langid::LanguageIdentifier;

use crate::chars::is_space;
use crate::keyword::{Scope, StepKeyword};

/// Code of the language active before any `# language:` directive.
pub const DEFAULT_LANGUAGE: &str = "en";

const LANGUAGES_JSON: &str = include_str!("../languages/gherkin-languages.json");

static LANGUAGES: LazyLock<BTreeMap<String, Language>> = LazyLock::new(|| {
    let dialects: BTreeMap<String, Dialect> = serde_json::from_str(LANGUAGES_JSON)
        .unwrap_or_else(|error| panic!("embedded language table is malformed: {error}"));
    dialects
        .into_iter()
        .map(|(code, dialect)| (code.clone(), Language::from_dialect(code, dialect)))
        .collect()
});

/// Raw entry of the embedded language table.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Dialect {
    name: String,
    native: String,
    feature: Vec<String>,
    background: Vec<String>,
    rule: Vec<String>,
    scenario: Vec<String>,
    scenario_outline: Vec<String>,
    examples: Vec<String>,
    given: Vec<String>,
    when: Vec<String>,
    then: Vec<String>,
    and: Vec<String>,
    but: Vec<String>,
}

/// Result of matching line text against a language's synonyms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeMatch {
    /// Resolved scope.
    pub scope: Scope,
    /// Length in characters of the keyword text that matched.
    pub keyword_len: usize,
}

/// Keyword table for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    code: String,
    name: String,
    native: String,
    structural: Vec<(Scope, String)>,
    steps: Vec<(StepKeyword, String)>,
}

impl Language {
    fn from_dialect(code: String, dialect: Dialect) -> Self {
        let Dialect {
            name,
            native,
            feature,
            background,
            rule,
            scenario,
            scenario_outline,
            examples,
            given,
            when,
            then,
            and,
            but,
        } = dialect;

        let structural = [
            (Scope::Feature, feature),
            (Scope::Background, background),
            (Scope::Scenario, scenario),
            (Scope::ScenarioOutline, scenario_outline),
            (Scope::Rule, rule),
            (Scope::Examples, examples),
        ]
        .into_iter()
        .flat_map(|(scope, synonyms)| synonyms.into_iter().map(move |s| (scope, s)))
        .filter(|(_, synonym)| !synonym.trim().is_empty())
        .collect();

        let mut steps: Vec<(StepKeyword, String)> = Vec::new();
        for (keyword, synonyms) in [
            (StepKeyword::Given, given),
            (StepKeyword::When, when),
            (StepKeyword::Then, then),
            (StepKeyword::And, and),
            (StepKeyword::But, but),
        ] {
            for synonym in synonyms {
                let keyword = if synonym.trim() == "*" {
                    StepKeyword::Star
                } else {
                    keyword
                };
                if synonym.trim().is_empty() || steps.iter().any(|(_, s)| *s == synonym) {
                    continue;
                }
                steps.push((keyword, synonym));
            }
        }

        Self {
            code,
            name,
            native,
            structural,
            steps,
        }
    }

    /// Look up a language by code.
    ///
    /// Tries the code verbatim, then a lowercase form with `_` normalised to
    /// `-`, then the primary language subtag (so `fr-CA` finds `fr`).
    ///
    /// # Examples
    /// ```
    /// use gherkin_lexer::Language;
    ///
    /// assert_eq!(Language::find("fr").map(Language::code), Some("fr"));
    /// assert_eq!(Language::find("pt_BR").map(Language::code), Some("pt"));
    /// assert!(Language::find("tlh").is_none());
    /// ```
    #[must_use]
    pub fn find(code: &str) -> Option<&'static Self> {
        let code = code.trim();
        if let Some(language) = LANGUAGES.get(code) {
            return Some(language);
        }
        let normalised = code.replace('_', "-").to_lowercase();
        if let Some(language) = LANGUAGES.get(&normalised) {
            return Some(language);
        }
        let id: LanguageIdentifier = normalised.parse().ok()?;
        LANGUAGES.get(id.language.as_str())
    }

    /// The built-in language used when no directive selects another.
    ///
    /// # Panics
    ///
    /// Panics if the embedded table lacks [`DEFAULT_LANGUAGE`], which would
    /// mean the crate was packaged incorrectly.
    #[must_use]
    pub fn default_language() -> &'static Self {
        Self::find(DEFAULT_LANGUAGE)
            .unwrap_or_else(|| panic!("embedded language table lacks '{DEFAULT_LANGUAGE}'"))
    }

    /// Every bundled language, ordered by code.
    pub fn available() -> impl Iterator<Item = &'static Self> {
        LANGUAGES.values()
    }

    /// Locale code, such as `en` or `fr`.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// English name of the language.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the language in the language itself.
    #[must_use]
    pub fn native(&self) -> &str {
        &self.native
    }

    /// Surface synonyms accepted for a structural scope, in table order.
    pub fn synonyms(&self, scope: Scope) -> impl Iterator<Item = &str> {
        self.structural
            .iter()
            .filter(move |(s, _)| *s == scope)
            .map(|(_, synonym)| synonym.as_str())
    }

    /// Surface synonyms accepted for a step keyword, in table order.
    pub fn step_synonyms(&self, keyword: StepKeyword) -> impl Iterator<Item = &str> {
        self.steps
            .iter()
            .filter(move |(k, _)| *k == keyword)
            .map(|(_, synonym)| synonym.as_str())
    }

    /// Classify the leading text of a line.
    ///
    /// `text` starts at the first non-space character and stops before the
    /// scope terminator. Matching is case-sensitive and exact; see
    /// [`resolve`](Self::resolve) for the rules.
    ///
    /// # Examples
    /// ```
    /// use gherkin_lexer::{Language, Scope, StepKeyword};
    ///
    /// let en = Language::default_language();
    /// assert_eq!(en.scope_for("Scenario Outline"), Scope::ScenarioOutline);
    /// assert_eq!(en.scope_for("Given a thing"), Scope::Step(StepKeyword::Given));
    /// assert_eq!(en.scope_for("feature"), Scope::Unknown);
    /// ```
    #[must_use]
    pub fn scope_for(&self, text: &str) -> Scope {
        self.resolve(text).map_or(Scope::Unknown, |found| found.scope)
    }

    /// Classify the leading text of a line, reporting the keyword length.
    ///
    /// Structural synonyms must equal the text once trailing space is
    /// trimmed. Step synonyms match as prefixes, or when the text equals the
    /// synonym without its trailing space. The longest matching synonym wins
    /// and ties keep table order.
    #[must_use]
    pub fn resolve(&self, text: &str) -> Option<ScopeMatch> {
        let candidate = text.trim_end_matches(is_space);
        if let Some((scope, synonym)) = self.structural.iter().find(|(_, s)| s == candidate) {
            return Some(ScopeMatch {
                scope: *scope,
                keyword_len: synonym.chars().count(),
            });
        }

        self.steps
            .iter()
            .filter_map(|(keyword, synonym)| {
                if text.starts_with(synonym.as_str()) {
                    Some((*keyword, synonym.chars().count()))
                } else if candidate == synonym.trim_end_matches(is_space) {
                    Some((*keyword, candidate.chars().count()))
                } else {
                    None
                }
            })
            .min_by_key(|(_, len)| Reverse(*len))
            .map(|(keyword, keyword_len)| ScopeMatch {
                scope: Scope::Step(keyword),
                keyword_len,
            })
    }
}
