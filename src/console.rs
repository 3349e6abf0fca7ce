//! Output channel between the VM and its embedding harness.
//!
//! All program output and diagnostics flow through a [`Console`] as ordered
//! lines tagged with a severity, so any sink (terminal, log widget, test
//! buffer) can consume them.

use std::cell::RefCell;
use std::rc::Rc;

/// Severity marker for an emitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Normal program output (`print`).
    Output,
    /// Diagnostics: compile errors, runtime errors, tracebacks.
    Error,
}

/// Where program output and diagnostics go.
pub trait Console {
    /// Emit one line of normal program output.
    fn print(&mut self, line: &str);
    /// Emit one line of diagnostic output.
    fn error(&mut self, line: &str);
}

/// Console backed by stdout/stderr.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn print(&mut self, line: &str) {
        println!("{}", line);
    }

    fn error(&mut self, line: &str) {
        eprintln!("{}", line);
    }
}

/// In-memory console for tests and embedders.
///
/// Clones share the same buffer, so a test can hand one clone to the
/// interpreter and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct BufferConsole {
    lines: Rc<RefCell<Vec<(Severity, String)>>>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// All emitted lines in order, with their severity.
    pub fn lines(&self) -> Vec<(Severity, String)> {
        self.lines.borrow().clone()
    }

    /// Only the normal-output lines, joined for easy assertions.
    pub fn output(&self) -> String {
        self.collect(Severity::Output)
    }

    /// Only the diagnostic lines, joined for easy assertions.
    pub fn errors(&self) -> String {
        self.collect(Severity::Error)
    }

    fn collect(&self, severity: Severity) -> String {
        self.lines
            .borrow()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, line)| format!("{}\n", line))
            .collect()
    }
}

impl Console for BufferConsole {
    fn print(&mut self, line: &str) {
        self.lines
            .borrow_mut()
            .push((Severity::Output, line.to_string()));
    }

    fn error(&mut self, line: &str) {
        self.lines
            .borrow_mut()
            .push((Severity::Error, line.to_string()));
    }
}
