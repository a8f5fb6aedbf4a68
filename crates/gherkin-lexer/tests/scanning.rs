//! Behavioural tests for scanning complete feature files.

use gherkin::StepType;
use gherkin_lexer::{
    Diagnostic, Language, LexerConfig, Lexer, ScanContext, Scope, StepKeyword, Token, TokenKind,
    scan,
};
use rstest::{fixture, rstest};

const COFFEE: &str = "\
# A feature about coffee
@barista @morning
Feature: Serve coffee
  Coffee should not be served until paid for.

  Background:
    Given the machine is on

  Scenario Outline: Buy <count> coffees
    Given there are <stock> coffees left
    And I have deposited <money>
    When I press the button
    Then I should be served:
      \"\"\"text
      Enjoy your coffee!
      \"\"\"

    Examples:
      | stock | money | count |
      | 1     | 1$    | 1     |
";

#[fixture]
fn coffee() -> Vec<Token> {
    scan(COFFEE, Some("features/coffee.feature")).tokens
}

fn of_kind(tokens: &[Token], matches: impl Fn(&TokenKind) -> bool) -> Vec<&TokenKind> {
    tokens.iter().map(|token| &token.kind).filter(|kind| matches(kind)).collect()
}

#[rstest]
fn reads_structure_in_order(coffee: Vec<Token>) {
    let scopes: Vec<_> = of_kind(&coffee, |kind| matches!(kind, TokenKind::Scope(_)));
    assert_eq!(
        scopes,
        [
            &TokenKind::Scope(Scope::Feature),
            &TokenKind::Scope(Scope::Background),
            &TokenKind::Scope(Scope::ScenarioOutline),
            &TokenKind::Scope(Scope::Examples),
        ]
    );
}

#[rstest]
fn reads_tags_and_description(coffee: Vec<Token>) {
    let tags = of_kind(&coffee, |kind| matches!(kind, TokenKind::Tag(_)));
    assert_eq!(
        tags,
        [
            &TokenKind::Tag("barista".into()),
            &TokenKind::Tag("morning".into()),
        ]
    );
    let descriptions = of_kind(&coffee, |kind| matches!(kind, TokenKind::Description(_)));
    assert_eq!(descriptions, [&TokenKind::Description(
        "Coffee should not be served until paid for.".into()
    )]);
}

#[rstest]
fn conjunctions_resolve_to_the_preceding_keyword(coffee: Vec<Token>) {
    let mut previous = None;
    let resolved: Vec<_> = coffee
        .iter()
        .filter_map(|token| match token.kind {
            TokenKind::Keyword(keyword) => keyword.resolve(&mut previous).step_type(),
            _ => None,
        })
        .collect();
    assert_eq!(
        resolved,
        [
            StepType::Given,
            StepType::Given,
            StepType::Given,
            StepType::When,
            StepType::Then,
        ]
    );
}

#[rstest]
fn reads_placeholders_in_titles_and_steps(coffee: Vec<Token>) {
    let headers: Vec<_> = coffee
        .iter()
        .filter_map(|token| match &token.kind {
            TokenKind::TableHeader(name) => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(headers, ["count", "stock", "money"]);
}

#[rstest]
fn reads_doc_string_with_content_type(coffee: Vec<Token>) {
    let doc = coffee.iter().find_map(|token| match &token.kind {
        TokenKind::DocString(doc) => Some(doc),
        _ => None,
    });
    let doc = doc.unwrap_or_else(|| panic!("expected a doc string"));
    assert_eq!(doc.content_type.as_deref(), Some("text"));
    assert_eq!(doc.literal, "Enjoy your coffee!");
}

#[rstest]
fn reads_example_table(coffee: Vec<Token>) {
    let cells: Vec<_> = coffee
        .iter()
        .filter_map(|token| match &token.kind {
            TokenKind::TableCell(text) => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(cells, ["stock", "money", "count", "1", "1$", "1"]);
}

#[rstest]
fn positions_carry_the_source(coffee: Vec<Token>) {
    let feature = coffee
        .iter()
        .find(|token| token.kind == TokenKind::Scope(Scope::Feature))
        .unwrap_or_else(|| panic!("expected a feature scope"));
    assert_eq!(feature.position.to_string(), "features/coffee.feature:3:1");
}

#[test]
fn coffee_scan_has_no_diagnostics() {
    let result = scan(COFFEE, None);
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.language.code(), "en");
}

#[rstest]
#[case("de", "Funktionalität: Kaffee\n  Angenommen der Automat läuft\n")]
#[case("es", "Característica: Café\n  Dado que la máquina está encendida\n")]
#[case("nl", "Functionaliteit: Koffie\n  Gegeven de machine staat aan\n")]
#[case("pt", "Funcionalidade: Café\n  Dado que a máquina está ligada\n")]
fn scans_other_languages_via_directive(#[case] code: &str, #[case] body: &str) {
    let text = format!("# language: {code}\n{body}");
    let result = scan(&text, None);
    let kinds: Vec<_> = result.tokens.iter().map(|token| &token.kind).collect();
    assert_eq!(kinds.first(), Some(&&TokenKind::Scope(Scope::Feature)));
    assert!(
        kinds.contains(&&TokenKind::Keyword(StepKeyword::Given)),
        "{kinds:?}"
    );
    assert_eq!(result.language.code(), code);
}

#[test]
fn configured_default_language_applies_without_directive() {
    let config = LexerConfig::from_lookup(|_| Some("fr".to_string()))
        .unwrap_or_else(|error| panic!("config should load: {error}"));
    let mut context = ScanContext::from_config(&config)
        .unwrap_or_else(|error| panic!("context should build: {error}"));
    let tokens = Lexer::new("Fonctionnalité: Café\n").lex(&mut context);
    assert_eq!(tokens.first().map(|token| &token.kind), Some(&TokenKind::Scope(Scope::Feature)));
}

#[test]
fn shared_context_accumulates_diagnostics_across_files() {
    let mut context = ScanContext::new(Language::default_language());
    Lexer::with_source("notes only\n", "a.feature").lex(&mut context);
    Lexer::with_source("# language: xx\nFeature: B\n", "b.feature").lex(&mut context);
    let sources: Vec<_> = context
        .diagnostics()
        .iter()
        .filter_map(Diagnostic::source)
        .map(|source| source.display_name().to_string())
        .collect();
    assert_eq!(sources, ["a.feature", "b.feature"]);
}
