//! Scanning with a host logger installed.

use std::sync::{Mutex, Once, PoisonError};

use gherkin_lexer::{Diagnostic, scan};
use log::{LevelFilter, Log, Metadata, Record};

struct Capture {
    records: Mutex<Vec<String>>,
}

impl Log for Capture {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::Level::Warn
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            self.records
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture {
    records: Mutex::new(Vec::new()),
};

fn captured() -> Vec<String> {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        log::set_logger(&CAPTURE)
            .unwrap_or_else(|error| panic!("failed to install logger: {error}"));
        log::set_max_level(LevelFilter::Warn);
    });
    CAPTURE
        .records
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

#[test]
fn diagnostics_are_logged_while_scanning() {
    captured();
    let result = scan("prose only\n", Some("notes.feature"));
    assert!(matches!(
        result.diagnostics.iter().next(),
        Some(Diagnostic::NoValidGherkin { .. })
    ));

    let result = scan("# language: tlh\nFeature: X\n", Some("klingon.feature"));
    assert_eq!(result.diagnostics.len(), 1);

    let records = captured();
    assert!(
        records.contains(&"notes.feature: no valid gherkin".to_string()),
        "{records:?}"
    );
    assert!(
        records.contains(&"klingon.feature:1:1: unsupported language 'tlh'".to_string()),
        "{records:?}"
    );
}
