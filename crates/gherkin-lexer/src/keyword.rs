//! Canonical step keywords and structural scopes.
//!
//! Surface text differs per language; the scanner resolves it to these
//! canonical values so downstream consumers never compare localised strings.

use gherkin::StepType;
use std::fmt;
use std::str::FromStr;

/// Canonical keyword introducing a step.
///
/// `And`, `But` and `Star` are conjunctions: they inherit the meaning of the
/// preceding primary keyword, see [`resolve`](Self::resolve).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKeyword {
    /// Setup preconditions for a scenario.
    Given,
    /// Perform an action when testing behaviour.
    When,
    /// Assert the expected outcome of a scenario.
    Then,
    /// Additional conditions that share context with the previous step.
    And,
    /// Negative or contrasting conditions.
    But,
    /// The bullet form `*`, usable in place of any keyword.
    Star,
}

impl StepKeyword {
    /// Return the canonical English spelling of the keyword.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_lexer::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::Given.as_str(), "Given");
    /// assert_eq!(StepKeyword::Star.as_str(), "*");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
            Self::Star => "*",
        }
    }

    /// Return `true` for `And`, `But` and `*`.
    #[must_use]
    pub const fn is_conjunction(&self) -> bool {
        matches!(self, Self::And | Self::But | Self::Star)
    }

    /// Resolve conjunctions to the semantic keyword of the previous step.
    ///
    /// Conjunctions return the value stored in `prev` (defaulting to
    /// `Given` when nothing precedes them) and leave it untouched. Primary
    /// keywords update `prev` and are returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_lexer::StepKeyword;
    ///
    /// let mut prev = Some(StepKeyword::Given);
    /// assert_eq!(StepKeyword::Star.resolve(&mut prev), StepKeyword::Given);
    /// assert_eq!(StepKeyword::When.resolve(&mut prev), StepKeyword::When);
    /// assert_eq!(prev, Some(StepKeyword::When));
    /// ```
    #[must_use]
    pub fn resolve(self, prev: &mut Option<Self>) -> Self {
        if self.is_conjunction() {
            prev.as_ref().copied().unwrap_or(Self::Given)
        } else {
            *prev = Some(self);
            self
        }
    }

    /// Map a primary keyword onto the `gherkin` crate's step type.
    ///
    /// Conjunctions have no step type of their own; resolve them first.
    #[must_use]
    pub const fn step_type(&self) -> Option<StepType> {
        match self {
            Self::Given => Some(StepType::Given),
            Self::When => Some(StepType::When),
            Self::Then => Some(StepType::Then),
            Self::And | Self::But | Self::Star => None,
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`StepKeyword`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid step keyword: {0}")]
pub struct StepKeywordParseError(pub String);

impl FromStr for StepKeyword {
    type Err = StepKeywordParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        [
            Self::Given,
            Self::When,
            Self::Then,
            Self::And,
            Self::But,
            Self::Star,
        ]
        .into_iter()
        .find(|keyword| trimmed.eq_ignore_ascii_case(keyword.as_str()))
        .ok_or_else(|| StepKeywordParseError(trimmed.to_string()))
    }
}

impl From<StepType> for StepKeyword {
    fn from(ty: StepType) -> Self {
        match ty {
            StepType::Given => Self::Given,
            StepType::When => Self::When,
            StepType::Then => Self::Then,
        }
    }
}

/// Structural classification of a line's leading keyword.
///
/// A structural scope never doubles as a step; [`Scope::Step`] is a distinct
/// classification path carrying the canonical keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// `Feature:` and its synonyms.
    Feature,
    /// `Background:` and its synonyms.
    Background,
    /// `Scenario:` or `Example:`.
    Scenario,
    /// `Scenario Outline:` or `Scenario Template:`.
    ScenarioOutline,
    /// `Rule:`.
    Rule,
    /// `Examples:` or `Scenarios:`.
    Examples,
    /// A step line introduced by the given keyword.
    Step(StepKeyword),
    /// Text matching no keyword of the active language.
    Unknown,
}

impl Scope {
    /// Return `true` for [`Scope::Step`].
    #[must_use]
    pub const fn is_step(&self) -> bool {
        matches!(self, Self::Step(_))
    }

    /// Return `true` for the structural scopes, excluding steps and
    /// [`Scope::Unknown`].
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        !matches!(self, Self::Step(_) | Self::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Given", StepKeyword::Given)]
    #[case("given", StepKeyword::Given)]
    #[case(" WhEn ", StepKeyword::When)]
    #[case("THEN", StepKeyword::Then)]
    #[case("AND", StepKeyword::And)]
    #[case(" but ", StepKeyword::But)]
    #[case("*", StepKeyword::Star)]
    fn parses_case_insensitively(#[case] input: &str, #[case] expected: StepKeyword) {
        assert_eq!(input.parse::<StepKeyword>(), Ok(expected));
    }

    #[test]
    fn rejects_invalid_keyword() {
        assert_eq!(
            "Soit".parse::<StepKeyword>(),
            Err(StepKeywordParseError("Soit".into()))
        );
    }

    #[test]
    fn parse_error_names_the_input() {
        let err = StepKeywordParseError("nope".into());
        assert_eq!(err.to_string(), "invalid step keyword: nope");
    }

    #[rstest]
    #[case(StepType::Given, StepKeyword::Given)]
    #[case(StepType::When, StepKeyword::When)]
    #[case(StepType::Then, StepKeyword::Then)]
    fn round_trips_primary_step_types(#[case] ty: StepType, #[case] expected: StepKeyword) {
        let keyword = StepKeyword::from(ty);
        assert_eq!(keyword, expected);
        assert_eq!(keyword.step_type(), Some(ty));
    }

    #[rstest]
    #[case(StepKeyword::And)]
    #[case(StepKeyword::But)]
    #[case(StepKeyword::Star)]
    fn conjunctions_have_no_step_type(#[case] keyword: StepKeyword) {
        assert!(keyword.is_conjunction());
        assert_eq!(keyword.step_type(), None);
    }

    #[test]
    fn resolve_returns_previous_for_conjunctions() {
        let mut prev = Some(StepKeyword::When);
        assert_eq!(StepKeyword::And.resolve(&mut prev), StepKeyword::When);
        assert_eq!(StepKeyword::But.resolve(&mut prev), StepKeyword::When);
        assert_eq!(StepKeyword::Star.resolve(&mut prev), StepKeyword::When);
        assert_eq!(prev, Some(StepKeyword::When));
    }

    #[test]
    fn resolve_defaults_to_given_when_unseeded() {
        let mut prev = None;
        assert_eq!(StepKeyword::And.resolve(&mut prev), StepKeyword::Given);
        assert_eq!(prev, None);
    }

    #[test]
    fn scopes_classify_steps_separately() {
        assert!(Scope::Step(StepKeyword::Given).is_step());
        assert!(!Scope::Step(StepKeyword::Given).is_structural());
        assert!(Scope::Feature.is_structural());
        assert!(!Scope::Unknown.is_structural());
        assert!(!Scope::Unknown.is_step());
    }
}
