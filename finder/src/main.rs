//! jbrecents - recent JetBrains IDE project finder.
//!
//! This binary lists the projects recently opened in installed JetBrains IDEs,
//! newest first, together with the application that can reopen each one.
//!
//! # Commands
//!
//! - `jbrecents list [QUERY]`: List projects, optionally filtered by name
//! - `jbrecents show <NAME> <APPLICATION>`: Show a single project
//!
//! # Environment Variables
//!
//! See the [`config`](jbrecents_finder::config) module for available
//! configuration options.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jbrecents_finder::config::Config;
use jbrecents_finder::discovery::discover;
use jbrecents_finder::types::ResolvedProject;

/// jbrecents - recent JetBrains IDE project finder.
///
/// Reads the recent project lists of every installed JetBrains IDE and
/// matches each project to the Toolbox-installed application that opens it.
#[derive(Parser, Debug)]
#[command(name = "jbrecents")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ENVIRONMENT VARIABLES:
    JBRECENTS_JETBRAINS_DIR    JetBrains root (default: <data dir>/JetBrains)
    JBRECENTS_TOOLBOX_DIR      Toolbox root (default: detected)
    JBRECENTS_HOME             Home directory for $USER_HOME$ (default: user home)
    JBRECENTS_IDENTITY_SCOPE   'application' or 'global' (default: application)
    RUST_LOG                   Log filter (default: warn)

EXAMPLES:
    # List every recent project
    jbrecents list

    # Projects whose name contains 'api'
    jbrecents list api

    # Machine-readable output
    jbrecents list --json
")]
struct Cli {
    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// List recent projects, most recently opened first.
    List {
        /// Case-insensitive substring of the project name.
        query: Option<String>,
    },

    /// Show one project by name and owning application.
    Show {
        /// Project display name.
        name: String,

        /// Owning application (e.g. GoLand, IntelliJIdea).
        application: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;
    let registry = discover(&config).context("Failed to discover recent projects")?;

    match cli.command {
        Command::List { query } => {
            let projects: Vec<&ResolvedProject> = match query.as_deref() {
                Some(query) => registry.filter(query),
                None => registry.list().iter().collect(),
            };

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&projects)?);
            } else if projects.is_empty() {
                eprintln!("No matching projects.");
            } else {
                for project in projects {
                    print_project(project);
                }
            }
        }

        Command::Show { name, application } => {
            let project = registry.lookup(&name, &application)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(project)?);
            } else {
                print_project(project);
            }
        }
    }

    Ok(())
}

/// Prints one project as a two-line text block.
fn print_project(project: &ResolvedProject) {
    let record = &project.record;
    let mut heading = format!(
        "{}  [{}]  {}",
        record.identity.name,
        record.identity.application,
        format_timestamp(record.last_opened)
    );
    if record.opened {
        heading.push_str(" (opened)");
    }

    println!("{heading}");
    println!("    {}  ->  {}", record.path, project.app_path);
}

/// Formats a Unix timestamp in local time, or `-` if it is out of range.
fn format_timestamp(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|utc| utc.with_timezone(&Local).to_rfc3339())
        .unwrap_or_else(|| "-".to_string())
}

/// Initializes the logging subsystem.
///
/// Logs go to stderr so stdout stays parseable.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}
