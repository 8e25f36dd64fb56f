//! The process wide collection of tests and the loop that runs them

use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use lazy_static::lazy_static;
use tracing::{debug, info, warn};
use crate::case::{Registration, TestCase};
use crate::failure::{Failure, Outcome};
use crate::report::{self, Report};

lazy_static! {
    /// Created on first access, already holding every test linked into the program
    static ref REGISTRY: Mutex<TestRegistry> = {
        let mut registry = TestRegistry::new();
        registry.discover();
        Mutex::new(registry)
    };
}

/// Gives access to the global registry
pub fn registry() -> MutexGuard<'static, TestRegistry> {
    REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Adds a test to the global registry
///
/// A test added while a run is in progress is left for the next run.
pub fn register(test: Box<dyn TestCase>) {
    registry().register(test)
}

/// Runs every test in the global registry, returning true if all passed
///
/// The registry is locked only to take the tests, so test bodies may use
/// [`registry`] and [`register`] themselves.
pub fn run_all() -> bool {
    let (tests, report) = {
        let registry = registry();
        (registry.tests.clone(), registry.report.clone())
    };
    run_tests(&tests, &report)
}

/// An ordered collection of tests
///
/// Tests run in the order they were registered. Registering reports the test
/// as discovered; running reports one result line per test with the `...`
/// markers aligned after the longest name.
pub struct TestRegistry {
    tests: Vec<Arc<dyn TestCase>>,
    report: Report
}

impl TestRegistry {
    /// Creates an empty registry reporting to stdout
    pub fn new() -> Self {
        Self::with_sink(io::stdout())
    }

    /// Creates an empty registry reporting to `sink`
    pub fn with_sink<W: Write + Send + 'static>(sink: W) -> Self {
        TestRegistry {
            tests: Vec::new(),
            report: Report::new(Box::new(sink))
        }
    }

    /// Appends a test. No check is made for duplicate names.
    pub fn register(&mut self, test: Box<dyn TestCase>) {
        debug!(test = test.name(), position = self.tests.len(), "registered test");
        self.report.discovered(test.name());
        self.tests.push(Arc::from(test));
    }

    /// Registers every test declared with [`test_case!`](crate::test_case)
    /// that is linked into the program, in declaration order
    pub fn discover(&mut self) {
        for case in Registration::linked_cases() {
            self.register(Box::new(case));
        }
    }

    /// Runs every test once, in registration order
    ///
    /// A failing or panicking test is reported and the run continues with the
    /// next one. Returns true if every test passed.
    ///
    /// # Example
    ///
    /// ```
    /// use tester::{TestRegistry, TestFn, Failure};
    /// use tester::report::CapturedReport;
    ///
    /// let report = CapturedReport::new();
    /// let mut registry = TestRegistry::with_sink(report.clone());
    /// registry.register(Box::new(TestFn::new("passes", || Ok(()))));
    /// registry.register(Box::new(TestFn::new("fails", || Err(Failure::new("nope")))));
    /// assert!(!registry.run_all());
    /// assert_eq!(&report.lines()[2..], &[
    ///     "passes ... [PASSED]",
    ///     "fails  ... [FAILED] [Reason: nope]"
    /// ]);
    /// ```
    pub fn run_all(&self) -> bool {
        run_tests(&self.tests, &self.report)
    }

    /// Names of the registered tests, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tests.iter().map(|test| test.name())
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

impl Default for TestRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `tests` once each, in order, reporting every result
fn run_tests(tests: &[Arc<dyn TestCase>], report: &Report) -> bool {
    let width = report::name_width(tests.iter().map(|test| test.name()));
    let mut failed = 0;
    for test in tests {
        debug!(test = test.name(), "running test");
        report.started(test.name(), width);
        match run_guarded(test.as_ref()) {
            Ok(()) => report.passed(),
            Err(failure) => {
                match failure.location() {
                    Some(location) => warn!(test = test.name(), %location, reason = failure.reason(), "test failed"),
                    None => warn!(test = test.name(), reason = failure.reason(), "test failed")
                }
                report.failed(&failure);
                failed += 1;
            }
        }
    }
    info!(passed = tests.len() - failed, failed, "test run finished");
    failed == 0
}

/// Runs a test body, turning a panic into a failure
fn run_guarded(test: &dyn TestCase) -> Outcome {
    panic::catch_unwind(AssertUnwindSafe(|| test.run()))
        .unwrap_or_else(|payload| Err(Failure::from_panic(payload)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;
    use pretty_assertions::assert_eq;
    use crate::case::TestFn;
    use crate::report::CapturedReport;
    use crate::{test_case, expect_true};

    fn registry_with(tests: Vec<Box<dyn TestCase>>) -> (TestRegistry, CapturedReport) {
        let report = CapturedReport::new();
        let mut registry = TestRegistry::with_sink(report.clone());
        for test in tests {
            registry.register(test);
        }
        (registry, report)
    }

    fn passing(name: &str) -> Box<dyn TestCase> {
        Box::new(TestFn::new(name, || Ok(())))
    }

    fn failing(name: &str, message: &'static str) -> Box<dyn TestCase> {
        Box::new(TestFn::new(name, move || Err(Failure::new(message))))
    }

    #[test]
    fn test_register_reports_discovery() {
        let (registry, report) = registry_with(vec![passing("first"), passing("second")]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), ["first", "second"]);
        assert_eq!(report.lines(), ["Discovered test: first", "Discovered test: second"]);
    }

    #[test]
    fn test_run_all_passes() {
        let (registry, report) = registry_with(vec![passing("a"), passing("abc")]);
        assert!(registry.run_all());
        assert_eq!(&report.lines()[2..], &["a   ... [PASSED]", "abc ... [PASSED]"]);
    }

    #[test]
    fn test_failure_does_not_stop_the_run() {
        let ran_after = Arc::new(AtomicUsize::new(0));
        let counter = ran_after.clone();
        let tests: Vec<Box<dyn TestCase>> = vec![
            failing("breaks", "0 is not equal to 1"),
            Box::new(TestFn::new("after", move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })),
            Box::new(TestFn::new("silent", || Err(Failure::unknown())))
        ];
        let (registry, report) = registry_with(tests);
        assert!(!registry.run_all());
        assert_eq!(ran_after.load(Ordering::SeqCst), 1);
        assert_eq!(&report.lines()[3..], &[
            "breaks ... [FAILED] [Reason: 0 is not equal to 1]",
            "after  ... [PASSED]",
            "silent ... [FAILED] [Reason: UNKNOWN]"
        ]);
    }

    #[test]
    fn test_panic_is_a_failure() {
        let tests: Vec<Box<dyn TestCase>> = vec![
            Box::new(TestFn::new("panics", || panic!("went wrong"))),
            passing("next")
        ];
        let (registry, report) = registry_with(tests);
        assert!(!registry.run_all());
        assert_eq!(&report.lines()[2..], &[
            "panics ... [FAILED] [Reason: panicked: went wrong]",
            "next   ... [PASSED]"
        ]);
    }

    #[test]
    fn test_run_all_is_repeatable() {
        let (registry, report) = registry_with(vec![passing("one"), failing("two", "bad")]);
        let first = registry.run_all();
        let lines_after_first = report.lines();
        let second = registry.run_all();
        let lines = report.lines();
        assert_eq!(first, second);
        assert_eq!(&lines[2..lines_after_first.len()], &lines[lines_after_first.len()..]);
    }

    #[test]
    fn test_empty_registry_passes() {
        let (registry, report) = registry_with(Vec::new());
        assert!(registry.is_empty());
        assert!(registry.run_all());
        assert_eq!(report.contents(), "");
    }

    #[test]
    fn test_register_adds_to_the_global_registry() {
        crate::register(Box::new(TestFn::new("registered_by_hand", || Ok(()))));
        assert!(crate::registry().names().any(|name| name == "registered_by_hand"));
    }

    test_case! {
        fn reads_the_global_registry() {
            expect_true!(!crate::registry().is_empty());
        }

        fn registers_while_running() {
            crate::register(Box::new(TestFn::new("registered_while_running", || Ok(()))));
        }
    }

    #[test]
    fn test_bodies_may_use_the_global_registry() {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let _ = sender.send(crate::run_all());
        });
        let finished = receiver.recv_timeout(Duration::from_secs(30));
        assert!(finished.is_ok(), "run_all did not return while a test body used the registry");
        assert!(crate::registry().names().any(|name| name == "registered_while_running"));
    }
}
