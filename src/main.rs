use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use rill::config::{RuntimeConfig, TimingsFormat};
use rill::console::StdConsole;
use rill::interpreter::{ExitStatus, Interpreter};
use rill::package;

// Wrapper type for clap ValueEnum support
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum TimingsFormatArg {
    #[default]
    Human,
    Json,
}

impl From<TimingsFormatArg> for TimingsFormat {
    fn from(arg: TimingsFormatArg) -> Self {
        match arg {
            TimingsFormatArg::Human => TimingsFormat::Human,
            TimingsFormatArg::Json => TimingsFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "rill")]
#[command(about = "A small scripting language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new rill project
    Init {
        /// Project name (defaults to directory name)
        name: Option<String>,
    },
    /// Compile and run a rill source file
    Run {
        /// The source file to run (defaults to rill.toml entry if in a project)
        file: Option<PathBuf>,

        /// Execute code directly from the command line
        #[arg(short = 'c', long)]
        code: Option<String>,

        /// Trace each executed instruction to stderr
        #[arg(long)]
        trace: bool,

        /// Disassemble compiled bytecode to stderr before running
        #[arg(long)]
        dump_bytecode: bool,

        /// Collect garbage at every dispatch checkpoint
        #[arg(long)]
        gc_stress: bool,

        /// Print GC statistics after execution
        #[arg(long)]
        gc_stats: bool,

        /// Disable garbage collection
        #[arg(long)]
        gc_off: bool,

        /// Hard limit on heap size in bytes
        #[arg(long)]
        heap_limit: Option<usize>,

        /// Print compiler pipeline timings (human or json format)
        #[arg(long, value_enum, require_equals = true, num_args = 0..=1, default_missing_value = "human")]
        timings: Option<TimingsFormatArg>,
    },
    /// Start an interactive session
    Repl,
    /// Compile a rill source file without running it
    Check {
        /// The source file to check (defaults to rill.toml entry if in a project)
        file: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { name } => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            if let Err(e) = package::init_project(&cwd, name.as_deref()) {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Commands::Run {
            file,
            code,
            trace,
            dump_bytecode,
            gc_stress,
            gc_stats,
            gc_off,
            heap_limit,
            timings,
        } => {
            let config = RuntimeConfig {
                trace_execution: trace,
                dump_bytecode,
                gc_stress,
                gc_stats,
                gc_enabled: !gc_off,
                heap_limit,
            };

            let (filename, source) = if let Some(source) = code {
                ("<code>".to_string(), source)
            } else {
                let path = match resolve_file(file) {
                    Ok(p) => p,
                    Err(e) => {
                        eprintln!("error: {}", e);
                        eprintln!("usage: rill run <file> or run from a rill project directory");
                        return ExitCode::FAILURE;
                    }
                };
                let source = match fs::read_to_string(&path) {
                    Ok(s) => s,
                    Err(e) => {
                        eprintln!("error: could not read {}: {}", path.display(), e);
                        return ExitCode::FAILURE;
                    }
                };
                (path.to_string_lossy().to_string(), source)
            };

            let mut interpreter = Interpreter::new(&filename, config.clone(), Box::new(StdConsole));
            let status = interpreter.execute(&source);

            if let Some(format) = timings {
                interpreter.report_timings(format.into());
            }
            if config.gc_stats {
                let stats = interpreter.gc_stats();
                eprintln!(
                    "[GC] collections: {}, total pause: {}us, max pause: {}us",
                    stats.cycles, stats.total_pause_us, stats.max_pause_us
                );
            }

            status_code(status)
        }
        Commands::Repl => repl(),
        Commands::Check { file } => {
            let path = match resolve_file(file) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("error: {}", e);
                    eprintln!("usage: rill check <file> or run from a rill project directory");
                    return ExitCode::FAILURE;
                }
            };
            let source = match fs::read_to_string(&path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("error: could not read {}: {}", path.display(), e);
                    return ExitCode::FAILURE;
                }
            };
            let filename = path.to_string_lossy().to_string();
            let mut interpreter = Interpreter::new(
                &filename,
                RuntimeConfig::default(),
                Box::new(StdConsole),
            );
            let status = interpreter.check(&source);
            if status == ExitStatus::Success {
                println!("Check passed.");
            }
            status_code(status)
        }
    }
}

/// Resolve the file to run: explicit path, or the project manifest's entry.
fn resolve_file(file: Option<PathBuf>) -> Result<PathBuf, String> {
    match file {
        Some(path) => Ok(path),
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            let manifest = package::ProjectManifest::load(&cwd)
                .map_err(|_| "no file specified and no rill.toml found".to_string())?;
            Ok(cwd.join(&manifest.package.entry))
        }
    }
}

fn status_code(status: ExitStatus) -> ExitCode {
    match status {
        ExitStatus::Success => ExitCode::SUCCESS,
        ExitStatus::CompileError => ExitCode::from(65),
        ExitStatus::RuntimeError => ExitCode::from(70),
    }
}

/// Interactive prompt on one persistent interpreter; globals carry over
/// between lines.
fn repl() -> ExitCode {
    let mut interpreter = Interpreter::new("repl", RuntimeConfig::default(), Box::new(StdConsole));
    let stdin = io::stdin();

    print!("rill> ");
    let _ = io::stdout().flush();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        if !line.trim().is_empty() {
            interpreter.execute(&line);
        }
        print!("rill> ");
        let _ = io::stdout().flush();
    }
    println!();
    ExitCode::SUCCESS
}
