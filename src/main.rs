mod commands;

use clang_bridge::logging::{LogConfig, init_logging};
use clang_bridge::{CompilationDatabase, Library, log_timing};
use clap::{Parser, Subcommand};
use commands::completion::CompletionRequest;
use commands::{VersionReport, print_report};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{Level, info};

/// Inspect C and C++ sources through libclang
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// compile_commands.json to take compiler arguments from
    #[arg(long, value_name = "PATH", global = true)]
    compile_commands: Option<PathBuf>,

    /// Log level (overrides RUST_LOG env var)
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    /// Log file path (overrides CLANG_BRIDGE_LOG_FILE env var)
    #[arg(long, value_name = "FILE", global = true)]
    log_file: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the libclang version
    Version,

    /// Parse a file and print its diagnostics
    Diagnostics {
        file: PathBuf,
        /// Compiler arguments, overriding the compilation database
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Code completion at a 1-based line and column
    Complete {
        file: PathBuf,
        line: u32,
        column: u32,
        /// Show at most this many completions
        #[arg(long)]
        limit: Option<usize>,
        /// Leave macros out of the results
        #[arg(long)]
        no_macros: bool,
        /// Include code patterns such as `for (...)`
        #[arg(long)]
        patterns: bool,
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// List entity references found by the indexer
    References {
        file: PathBuf,
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// List the declarations of a file
    Outline {
        file: PathBuf,
        #[arg(last = true)]
        args: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_config =
        LogConfig::from_env().with_overrides(args.log_level.clone(), args.log_file.clone(), false);
    if let Err(e) = init_logging(log_config) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    let database = match &args.compile_commands {
        Some(path) => Some(CompilationDatabase::new(path.clone())?),
        None => None,
    };
    let database = database.as_ref();

    let library = Library::load()?;
    let started = Instant::now();

    match args.command {
        Command::Version => {
            let report = VersionReport {
                version: library.clang_version(),
            };
            print_report(&report, args.json)?;
        }
        Command::Diagnostics { file, args: extra } => {
            let report = commands::diagnostics::run(&library, database, &file, &extra)?;
            print_report(&report, args.json)?;
            if report.has_errors() {
                info!(file = %file.display(), "Diagnostics contain errors");
                log_timing!(Level::DEBUG, "diagnostics", started.elapsed());
                std::process::exit(1);
            }
        }
        Command::Complete {
            file,
            line,
            column,
            limit,
            no_macros,
            patterns,
            args: extra,
        } => {
            let request = CompletionRequest {
                file,
                line,
                column,
                limit,
                include_macros: !no_macros,
                include_patterns: patterns,
                args: extra,
            };
            let report = commands::completion::run(&library, database, &request)?;
            print_report(&report, args.json)?;
        }
        Command::References { file, args: extra } => {
            let report = commands::references::run(&library, database, &file, &extra)?;
            print_report(&report, args.json)?;
        }
        Command::Outline { file, args: extra } => {
            let report = commands::outline::run(&library, database, &file, &extra)?;
            print_report(&report, args.json)?;
        }
    }

    log_timing!(Level::DEBUG, "command", started.elapsed());
    Ok(())
}
