//! Running a feature's hook lifecycle on the designated executor.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use gherkin_hooks::{DesignatedExecutor, ExecutorError, Lifecycle};
use rstest::{fixture, rstest};

#[derive(Debug)]
struct Feature {
    name: &'static str,
}

#[derive(Debug)]
struct Scenario {
    name: &'static str,
    steps: Vec<Step>,
}

#[derive(Debug)]
struct Step {
    text: &'static str,
}

type Journal = Arc<Mutex<Vec<String>>>;

fn note(journal: &Journal, entry: String) {
    journal
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(entry);
}

fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap_or_else(PoisonError::into_inner).clone()
}

#[fixture]
fn journal() -> Journal {
    Journal::default()
}

fn lifecycle(journal: &Journal) -> Lifecycle<Feature, Scenario, Step> {
    let mut lifecycle = Lifecycle::default();
    let (a, b, c, d, e, f) = (
        Arc::clone(journal),
        Arc::clone(journal),
        Arc::clone(journal),
        Arc::clone(journal),
        Arc::clone(journal),
        Arc::clone(journal),
    );
    lifecycle
        .before_feature(None, move |feature: &Feature| {
            note(&a, format!("open {}", feature.name));
        })
        .before_feature(Some(0), move |_: &Feature| {
            note(&b, "prepare".to_string());
        })
        .before_scenario(None, move |scenario: &Scenario| {
            note(&c, format!("start {}", scenario.name));
        })
        .before_step(None, move |step: &Step| {
            note(&d, format!("step {}", step.text));
        })
        .after_scenario(Some(1), move |scenario: &Scenario| {
            note(&e, format!("finish {}", scenario.name));
        })
        .after_feature(None, move |feature: &Feature| {
            note(&f, format!("close {} on {:?}", feature.name, thread::current().name()));
        });
    lifecycle
}

fn run(lifecycle: &Lifecycle<Feature, Scenario, Step>, feature: &Feature, scenarios: &[Scenario]) {
    lifecycle.run_before_feature(feature);
    for scenario in scenarios {
        lifecycle.run_before_scenario(scenario);
        for step in &scenario.steps {
            lifecycle.run_before_step(step);
            lifecycle.run_after_step(step);
        }
        lifecycle.run_after_scenario(scenario);
    }
    lifecycle.run_after_feature(feature);
}

#[rstest]
fn runs_hooks_in_lifecycle_order_on_the_executor(journal: Journal) {
    let lifecycle = Arc::new(lifecycle(&journal));
    let executor = DesignatedExecutor::named("lifecycle")
        .unwrap_or_else(|error| panic!("executor should start: {error}"));

    let shared = Arc::clone(&lifecycle);
    executor
        .execute(move || {
            let feature = Feature { name: "coffee" };
            let scenarios = [Scenario {
                name: "brew",
                steps: vec![Step { text: "grind" }, Step { text: "pour" }],
            }];
            run(&shared, &feature, &scenarios);
        })
        .unwrap_or_else(|error| panic!("lifecycle should run: {error}"));

    assert_eq!(
        entries(&journal),
        [
            "prepare",
            "open coffee",
            "start brew",
            "step grind",
            "step pour",
            "finish brew",
            "close coffee on Some(\"lifecycle\")",
        ]
    );
    assert_eq!(lifecycle.len(), 6);
}

#[rstest]
fn nested_execute_runs_inline(journal: Journal) {
    let executor = Arc::new(
        DesignatedExecutor::new().unwrap_or_else(|error| panic!("executor should start: {error}")),
    );
    let inner = Arc::clone(&executor);
    let recorded = Arc::clone(&journal);
    let result = executor.execute(move || {
        inner.execute(move || note(&recorded, "nested".to_string()))
    });
    assert!(matches!(result, Ok(Ok(()))), "{result:?}");
    assert_eq!(entries(&journal), ["nested"]);
}

#[rstest]
fn nested_panic_unwinds_into_the_calling_job(journal: Journal) {
    let executor = Arc::new(
        DesignatedExecutor::new().unwrap_or_else(|error| panic!("executor should start: {error}")),
    );
    let inner = Arc::clone(&executor);
    let recorded = Arc::clone(&journal);
    let result = executor.execute(move || {
        let _ = inner.execute(|| -> u8 { panic!("inner hook failed") });
        note(&recorded, "unreachable".to_string());
    });
    assert!(
        matches!(
            &result,
            Err(ExecutorError::JobPanicked(message)) if message == "inner hook failed"
        ),
        "{result:?}"
    );
    assert!(entries(&journal).is_empty());
    assert!(executor.execute(|| ()).is_ok());
}
