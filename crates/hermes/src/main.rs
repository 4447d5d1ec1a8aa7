//! Hermes CLI - find the handler of a command, request or query type.
//!
//! Hermes parses the C# sources of a solution with tree-sitter and follows
//! mediator naming conventions to locate handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod cli;

/// Hermes: handler lookup for mediator-style C# solutions.
#[derive(Parser)]
#[command(name = "hermes")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Workspace root directory (defaults to current directory)
    #[arg(short, long, global = true)]
    workspace: Option<PathBuf>,

    /// Configuration file (defaults to <workspace>/.hermes/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Strategy selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Pick from the name's suffix
    Auto,
    /// Command handler in the domain module
    Command,
    /// Request or query handler in the application module
    Request,
    /// Every `Handle` method in the solution
    Solution,
}

impl StrategyArg {
    fn strategy(self) -> Option<hermes::Strategy> {
        match self {
            Self::Auto => None,
            Self::Command => Some(hermes::Strategy::Command),
            Self::Request => Some(hermes::Strategy::Request),
            Self::Solution => Some(hermes::Strategy::SolutionWide),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Find the handler of a type name
    Resolve {
        /// Type name (e.g., "`CreateOrderCommand`")
        name: String,

        /// Resolution strategy
        #[arg(short, long, value_enum, default_value_t = StrategyArg::Auto)]
        strategy: StrategyArg,

        /// Print the resolution as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the handler of the declaration at a position in a file
    At {
        /// Source file, absolute or relative to the workspace root
        file: PathBuf,

        /// Character offset from the start of the file
        #[arg(long, conflicts_with_all = ["line", "column"], required_unless_present = "line")]
        offset: Option<usize>,

        /// 1-based line
        #[arg(long, requires = "column")]
        line: Option<u32>,

        /// 1-based column, in characters
        #[arg(long, requires = "line")]
        column: Option<u32>,

        /// Print the resolution as JSON
        #[arg(long)]
        json: bool,
    },

    /// List discovered modules and the handler style each serves
    Modules,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let workspace = match cli.workspace {
        Some(w) => w,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!(
                    "{}: failed to get current directory: {e}",
                    "error".red().bold()
                );
                return ExitCode::FAILURE;
            }
        },
    };
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Resolve {
            name,
            strategy,
            json,
        } => cli::resolve::run(&workspace, config, &name, strategy.strategy(), json),
        Commands::At {
            file,
            offset,
            line,
            column,
            json,
        } => {
            let position = match (offset, line, column) {
                (Some(offset), _, _) => cli::at::Cursor::Offset(offset),
                (None, Some(line), Some(column)) => cli::at::Cursor::LineColumn { line, column },
                _ => cli::at::Cursor::Offset(0),
            };
            cli::at::run(&workspace, config, &file, position, json)
        }
        Commands::Modules => cli::modules::run(&workspace, config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}
