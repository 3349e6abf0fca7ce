//! Runtime configuration types.

/// Output format for pipeline timings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimingsFormat {
    #[default]
    Human,
    Json,
}

/// Runtime configuration for the interpreter
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Trace each executed instruction and the value stack to stderr
    pub trace_execution: bool,
    /// Disassemble every compiled function to stderr before running
    pub dump_bytecode: bool,
    /// Collect at every dispatch checkpoint instead of on threshold
    pub gc_stress: bool,
    /// Print GC statistics after execution
    pub gc_stats: bool,
    /// Whether GC is enabled (default: true)
    pub gc_enabled: bool,
    /// Hard limit on heap size in bytes (None = unlimited)
    pub heap_limit: Option<usize>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            trace_execution: false,
            dump_bytecode: false,
            gc_stress: false,
            gc_stats: false,
            gc_enabled: true,
            heap_limit: None,
        }
    }
}
