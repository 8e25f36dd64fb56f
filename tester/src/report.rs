//! Line oriented test report

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;
use crate::failure::Failure;

/// Writes discovery and result lines to a sink
///
/// Clones share the sink, which is locked for one write at a time. Write
/// errors never stop a run. They are logged and the report carries on.
#[derive(Clone)]
pub(crate) struct Report {
    sink: Arc<Mutex<Box<dyn Write + Send>>>
}

impl Report {
    pub(crate) fn new(sink: Box<dyn Write + Send>) -> Self {
        Report { sink: Arc::new(Mutex::new(sink)) }
    }

    pub(crate) fn discovered(&self, name: &str) {
        self.write(|sink| writeln!(sink, "Discovered test: {}", name));
    }

    /// Starts the result line of a test, leaving it open until the test ends
    pub(crate) fn started(&self, name: &str, width: usize) {
        self.write(|sink| {
            write!(sink, "{}{:pad$} ... ", name, "", pad = padding(name, width))?;
            sink.flush()
        });
    }

    pub(crate) fn passed(&self) {
        self.write(|sink| writeln!(sink, "[PASSED]"));
    }

    pub(crate) fn failed(&self, failure: &Failure) {
        self.write(|sink| writeln!(sink, "[FAILED] [Reason: {}]", failure.reason()));
    }

    fn write(&self, line: impl FnOnce(&mut dyn Write) -> io::Result<()>) {
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = line(&mut **sink) {
            warn!(%err, "failed to write test report");
        }
    }
}

/// Length of a test name as it is laid out in the report
pub fn name_len(name: &str) -> usize {
    name.chars().count()
}

/// Width of the name column: the length of the longest name
pub fn name_width<'a>(names: impl IntoIterator<Item = &'a str>) -> usize {
    names.into_iter().map(name_len).max().unwrap_or(0)
}

/// Spaces needed after `name` so the `...` markers line up at `width`
pub fn padding(name: &str, width: usize) -> usize {
    width.saturating_sub(name_len(name))
}

/// An in-memory report sink which can be read while the registry owns a clone
///
/// # Example
///
/// ```
/// use tester::{TestRegistry, TestFn};
/// use tester::report::CapturedReport;
///
/// let report = CapturedReport::new();
/// let mut registry = TestRegistry::with_sink(report.clone());
/// registry.register(Box::new(TestFn::new("ok", || Ok(()))));
/// assert!(registry.run_all());
/// assert_eq!(report.contents(), "Discovered test: ok\nok ... [PASSED]\n");
/// ```
#[derive(Clone, Default)]
pub struct CapturedReport {
    buffer: Arc<Mutex<Vec<u8>>>
}

impl CapturedReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Written lines, without their line endings
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }
}

impl Write for CapturedReport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_padding_aligns_to_longest_name() {
        let names = ["a", "abc", "ab"];
        let width = name_width(names);
        assert_eq!(width, 3);
        assert_eq!(names.map(|name| padding(name, width)), [2, 0, 1]);
        assert_eq!(name_width([]), 0);
    }

    #[test]
    fn test_padding_counts_characters() {
        assert_eq!(name_len("größe"), 5);
        assert_eq!(padding("größe", 7), 2);
    }

    #[test]
    fn test_report_lines() {
        let captured = CapturedReport::new();
        let report = Report::new(Box::new(captured.clone()));
        report.discovered("short");
        report.started("short", 8);
        report.passed();
        report.started("a_longer", 8);
        report.failed(&Failure::new("1 is equal to 1"));
        report.started("silent", 8);
        report.failed(&Failure::unknown());
        assert_eq!(captured.lines(), [
            "Discovered test: short",
            "short    ... [PASSED]",
            "a_longer ... [FAILED] [Reason: 1 is equal to 1]",
            "silent   ... [FAILED] [Reason: UNKNOWN]"
        ]);
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_write_errors_are_swallowed() {
        let report = Report::new(Box::new(BrokenSink));
        report.discovered("t");
        report.started("t", 1);
        report.failed(&Failure::unknown());
    }
}
