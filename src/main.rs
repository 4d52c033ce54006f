// SPDX-License-Identifier: PMPL-1.0-or-later

//! termax: shell assistant with command classification and session memory
//!
//! Runs shell commands, explains common failures, and keeps a per-session
//! history and context in a JSON file next to where you work.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io;
use std::path::PathBuf;
use termax::analyzer::CommandAnalyzer;
use termax::config::Config;
use termax::memory::SessionMemory;
use termax::repl::Repl;
use termax::report::ReportFormatter;
use termax::shell::{self, ShellExecutor};
use termax::suggest::LiteralSuggester;
use termax::types::CommandInput;
use termax::{diagnostics, storage};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "termax")]
#[command(version)]
#[command(about = "Shell assistant that runs commands, explains failures and remembers sessions")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file (JSON or YAML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Session to use (defaults to a new timestamp-based id)
    #[arg(short, long, global = true)]
    session: Option<String>,

    /// Directory holding session files
    #[arg(long, global = true, value_name = "DIR")]
    memory_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session
    Repl,

    /// Run one command, classify it and record it in the session
    Run {
        /// Command line, passed to the shell as-is
        #[arg(
            value_name = "COMMAND",
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        command: Vec<String>,
    },

    /// Classify a command result without running anything
    Analyze {
        /// Command that produced the output
        #[arg(value_name = "COMMAND", required_unless_present = "batch")]
        command: Option<String>,

        /// Captured standard output
        #[arg(long, default_value = "")]
        stdout: String,

        /// Captured standard error
        #[arg(long, default_value = "")]
        stderr: String,

        /// Exit code
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        code: i32,

        /// JSON file holding an array of command results
        #[arg(long, value_name = "FILE", conflicts_with = "command")]
        batch: Option<PathBuf>,
    },

    /// Extract keywords from text
    Keywords {
        #[arg(
            value_name = "TEXT",
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        text: Vec<String>,
    },

    /// Show recent commands of the session
    History {
        /// Number of records to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Read or change the session context
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },

    /// List stored sessions
    Sessions,

    /// Write commands into an executable bash script
    Script {
        /// Script path
        #[arg(short, long)]
        output: PathBuf,

        /// Commands, one per script line
        #[arg(value_name = "COMMAND", required = true)]
        commands: Vec<String>,
    },

    /// Check the local setup
    Doctor,
}

#[derive(Subcommand)]
enum ContextAction {
    /// Print one value, or the whole context when no key is given
    Get { key: Option<String> },

    /// Set a value (parsed as JSON when possible, otherwise stored as text)
    Set { key: String, value: String },

    /// Remove every context entry
    Clear,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_env();
    if let Some(session) = &cli.session {
        config.session_id = Some(session.clone());
    }
    if let Some(dir) = &cli.memory_dir {
        config.memory_dir = dir.clone();
    }
    debug!(?config, "configuration resolved");
    Ok(config)
}

fn open_memory(config: &Config) -> Result<SessionMemory> {
    let session_id = config.resolve_session_id();
    let memory = SessionMemory::open(session_id, &config.memory_dir)?;
    info!(
        session = %memory.session_id(),
        path = %memory.memory_file().display(),
        "session opened"
    );
    Ok(memory)
}

/// Context values given on the command line are JSON when they parse as such.
fn parse_context_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = build_config(&cli)?;
    let formatter = ReportFormatter::new();
    let analyzer = CommandAnalyzer::new();

    match cli.command {
        Commands::Repl => {
            let mut memory = open_memory(&config)?;
            let executor = ShellExecutor::new();
            let suggester = LiteralSuggester;
            let mut repl = Repl {
                suggester: &suggester,
                executor: &executor,
                analyzer: &analyzer,
                memory: &mut memory,
                formatter: &formatter,
            };
            let executed = repl.run(io::stdin().lock())?;
            println!("Executed {} command(s) in session {}", executed, memory.session_id());
        }

        Commands::Run { command } => {
            let command = command.join(" ");
            let mut memory = open_memory(&config)?;
            let record = ShellExecutor::new().run_and_record(&command, &analyzer, &mut memory)?;
            formatter.print_record(&record);
            println!("Recorded in session {}", memory.session_id());
            if !record.succeeded() {
                std::process::exit(record.return_code.clamp(1, 255));
            }
        }

        Commands::Analyze {
            command,
            stdout,
            stderr,
            code,
            batch,
        } => {
            if let Some(path) = batch {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading batch file {}", path.display()))?;
                let inputs: Vec<CommandInput> = serde_json::from_str(&content)
                    .with_context(|| format!("parsing batch file {}", path.display()))?;
                let analyses = analyzer.analyze_multiple_commands(&inputs);
                for (input, analysis) in inputs.iter().zip(&analyses) {
                    formatter.print_analysis(&input.command, analysis);
                    println!();
                }
            } else if let Some(command) = command {
                let analysis = analyzer.analyze(&command, &stdout, &stderr, code);
                formatter.print_analysis(&command, &analysis);
            } else {
                bail!("either a command or --batch is required");
            }
        }

        Commands::Keywords { text } => {
            let keywords = analyzer.extract_keywords(&text.join(" "));
            formatter.print_keywords(&keywords);
        }

        Commands::History { limit } => {
            let memory = open_memory(&config)?;
            let limit = limit.unwrap_or(config.recent_limit);
            formatter.print_history(memory.session_id(), memory.get_recent_commands(limit));
        }

        Commands::Context { action } => {
            let mut memory = open_memory(&config)?;
            match action {
                ContextAction::Get { key } => {
                    formatter.print_context(&memory.get_context(key.as_deref()));
                }
                ContextAction::Set { key, value } => {
                    memory.update_context(key, parse_context_value(&value))?;
                    println!("Context updated in session {}", memory.session_id());
                }
                ContextAction::Clear => {
                    memory.clear_context()?;
                    println!("Context cleared in session {}", memory.session_id());
                }
            }
        }

        Commands::Sessions => {
            let sessions = storage::list_sessions(&config.memory_dir)?;
            formatter.print_sessions(&sessions);
        }

        Commands::Script { output, commands } => {
            let path = shell::create_script(&commands, &output)?;
            println!("Script written to: {}", path.display());
        }

        Commands::Doctor => {
            diagnostics::run_self_diagnostics(&config)?;
        }
    }

    Ok(())
}
