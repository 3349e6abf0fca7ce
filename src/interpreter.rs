//! The embedding surface: compile a source buffer, run it, and surface
//! every diagnostic through the console.

use std::time::Instant;

use crate::compiler::{compile, dump};
use crate::config::{RuntimeConfig, TimingsFormat};
use crate::console::{Console, StdConsole};
use crate::vm::{GcStats, VM};

/// Outcome of one `execute` call. Process-level fatal aborts (memory
/// exhaustion) are not represented here; they never return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    CompileError,
    RuntimeError,
}

/// Wall-clock timings for one pipeline run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timings {
    pub compile_us: u128,
    pub execute_us: u128,
}

/// One persistent interpreter: a VM plus the compile pipeline in front of
/// it. Globals survive across `execute` calls, which is what makes the
/// REPL work; independent interpreters share nothing.
pub struct Interpreter {
    vm: VM,
    filename: String,
    config: RuntimeConfig,
    timings: Timings,
}

impl Interpreter {
    pub fn new(filename: &str, config: RuntimeConfig, console: Box<dyn Console>) -> Self {
        Self {
            vm: VM::new_with_config(&config, console),
            filename: filename.to_string(),
            config,
            timings: Timings::default(),
        }
    }

    /// Compile and run one whole source buffer.
    pub fn execute(&mut self, source: &str) -> ExitStatus {
        let compile_start = Instant::now();
        let script = match compile(source, self.vm.heap_mut()) {
            Ok(script) => script,
            Err(errors) => {
                self.report_compile_errors(&errors);
                return ExitStatus::CompileError;
            }
        };
        self.timings.compile_us = compile_start.elapsed().as_micros();

        if self.config.dump_bytecode {
            eprint!("{}", dump::disassemble(self.vm.heap(), script));
        }

        let execute_start = Instant::now();
        let result = self.vm.run(script);
        self.timings.execute_us = execute_start.elapsed().as_micros();

        match result {
            Ok(()) => ExitStatus::Success,
            Err(report) => {
                for line in report.lines() {
                    self.vm.console_mut().error(line);
                }
                ExitStatus::RuntimeError
            }
        }
    }

    /// Compile only; report diagnostics without running anything.
    pub fn check(&mut self, source: &str) -> ExitStatus {
        match compile(source, self.vm.heap_mut()) {
            Ok(_) => ExitStatus::Success,
            Err(errors) => {
                self.report_compile_errors(&errors);
                ExitStatus::CompileError
            }
        }
    }

    fn report_compile_errors(&mut self, errors: &[crate::compiler::CompileError]) {
        let filename = self.filename.clone();
        for error in errors {
            self.vm
                .console_mut()
                .error(&format!("error: {}", error.message));
            self.vm
                .console_mut()
                .error(&format!("  --> {}:{}", filename, error.line));
        }
    }

    pub fn gc_stats(&self) -> &GcStats {
        self.vm.gc_stats()
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    /// Print the last run's pipeline timings to stderr.
    pub fn report_timings(&self, format: TimingsFormat) {
        match format {
            TimingsFormat::Human => {
                eprintln!(
                    "[timings] compile: {}us, execute: {}us",
                    self.timings.compile_us, self.timings.execute_us
                );
            }
            TimingsFormat::Json => {
                let json = serde_json::json!({
                    "compile_us": self.timings.compile_us as u64,
                    "execute_us": self.timings.execute_us as u64,
                });
                eprintln!("{}", json);
            }
        }
    }
}

/// Compile and run a source buffer with default configuration, writing to
/// stdout/stderr. This is the one-shot entry point for simple embedders.
pub fn execute(source: &str) -> ExitStatus {
    let mut interpreter = Interpreter::new(
        "script",
        RuntimeConfig::default(),
        Box::new(StdConsole),
    );
    interpreter.execute(source)
}
