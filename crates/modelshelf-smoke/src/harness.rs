//! Scenario table and runner

use crate::counters::CallCounters;
use std::fmt;
use tracing::info;

/// Name prefix that marks a procedure as a smoke scenario
pub const SCENARIO_PREFIX: &str = "smoke_";

/// One smoke procedure
#[derive(Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub run: fn(&mut CallCounters) -> Result<(), Failure>,
}

/// Why a smoke run stopped
#[derive(Debug)]
pub enum Failure {
    /// An output field did not match its recorded value
    Mismatch {
        task: &'static str,
        field: &'static str,
        expected: String,
        actual: String,
    },

    /// Loading or predicting failed outright
    Error {
        task: &'static str,
        source: modelshelf_core::Error,
    },
}

impl Failure {
    pub fn error(task: &'static str, source: modelshelf_core::Error) -> Self {
        Self::Error { task, source }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mismatch {
                task,
                field,
                expected,
                actual,
            } => write!(
                f,
                "{}: `{}` mismatch\n  expected: {}\n  actual:   {}",
                task, field, expected, actual
            ),
            Self::Error { task, source } => write!(f, "{}: {}", task, source),
        }
    }
}

impl std::error::Error for Failure {}

/// Compare an output field against its recorded value
pub fn expect_eq<T: PartialEq + fmt::Debug>(
    task: &'static str,
    field: &'static str,
    expected: T,
    actual: T,
) -> Result<(), Failure> {
    if expected == actual {
        return Ok(());
    }
    Err(Failure::Mismatch {
        task,
        field,
        expected: format!("{:?}", expected),
        actual: format!("{:?}", actual),
    })
}

/// Check a property of an output field
pub fn expect(
    task: &'static str,
    field: &'static str,
    expected: &str,
    actual: impl fmt::Debug,
    holds: bool,
) -> Result<(), Failure> {
    if holds {
        return Ok(());
    }
    Err(Failure::Mismatch {
        task,
        field,
        expected: expected.to_string(),
        actual: format!("{:?}", actual),
    })
}

/// Run every scenario whose name carries the prefix, in table order
///
/// The first failure halts the run and is returned with its context; on
/// success the number of executed scenarios is returned.
pub fn run_all(
    scenarios: &[Scenario],
    prefix: &str,
    counters: &mut CallCounters,
) -> Result<usize, Failure> {
    let mut executed = 0;
    for scenario in scenarios.iter().filter(|s| s.name.starts_with(prefix)) {
        info!(scenario = scenario.name, "running");
        (scenario.run)(counters)?;
        executed += 1;
    }
    Ok(executed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passes(counters: &mut CallCounters) -> Result<(), Failure> {
        counters.counted("passes", || ());
        Ok(())
    }

    fn fails(counters: &mut CallCounters) -> Result<(), Failure> {
        counters.counted("fails", || ());
        expect_eq("demo", "tags", vec!["O"], vec!["B-PER"])
    }

    const TABLE: &[Scenario] = &[
        Scenario { name: "smoke_first", run: passes },
        Scenario { name: "helper_not_a_scenario", run: fails },
        Scenario { name: "smoke_second", run: fails },
        Scenario { name: "smoke_third", run: passes },
    ];

    #[test]
    fn only_prefixed_procedures_run() {
        let mut counters = CallCounters::new();
        let result = run_all(&TABLE[..2], SCENARIO_PREFIX, &mut counters);

        assert_eq!(result.unwrap(), 1);
        assert_eq!(counters.count("fails"), 0);
    }

    #[test]
    fn first_failure_halts_the_run() {
        let mut counters = CallCounters::new();
        let failure = run_all(TABLE, SCENARIO_PREFIX, &mut counters).unwrap_err();

        // smoke_third never ran
        assert_eq!(counters.count("passes"), 1);
        assert!(matches!(failure, Failure::Mismatch { task: "demo", .. }));
    }

    #[test]
    fn mismatch_reports_both_sides() {
        let failure = expect_eq("ner", "tags", 8, 7).unwrap_err();
        let message = failure.to_string();
        assert!(message.contains("ner"));
        assert!(message.contains("expected: 8"));
        assert!(message.contains("actual:   7"));
    }
}
