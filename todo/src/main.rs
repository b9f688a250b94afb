//! Terminal front end for the todo list.
//!
//! `todoflow` runs the Home/Details/Add screens over stdin and stdout.
//! `todoflow demo` plays a scripted session through the same screens.

use clap::{Parser, Subcommand};
use std::io::{self, Cursor};
use todoflow::{AppConfig, TodoAction, TodoStore, screens};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Scripted input for `todoflow demo`
const DEMO_SCRIPT: &str = "\
a
Buy milk
2%
.
a
Write documentation
Describe the store API
and the screens
.
a
Deploy to production
.
1
k
3
k
3
d
q
";

#[derive(Parser)]
#[command(name = "todoflow")]
#[command(about = "Pending/completed todo list in the terminal", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Print the final list as JSON on exit
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (can be repeated for more output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Use the screens interactively (default)
    Run,
    /// Play a scripted session
    Demo,
}

fn default_log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "todoflow=info,todoflow_runtime=info",
        1 => "todoflow=debug,todoflow_runtime=debug",
        _ => "todoflow=trace,todoflow_runtime=trace",
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // Initialize tracing on stderr so the screens own stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_log_filter(cli.verbose).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    // Descriptions reach whichever recorder the host installs
    todoflow_runtime::metrics::register_metrics();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    let mut todos = TodoStore::with_system_clock(config.timestamps);
    todos.subscribe(|event: &TodoAction| match event {
        TodoAction::TodoAdded { record } => {
            tracing::info!(id = %record.id, title = %record.title, "todo added");
        },
        TodoAction::TodoCompleted { id } => tracing::info!(%id, "todo completed"),
        TodoAction::TodoRestored { id } => tracing::info!(%id, "todo restored"),
        TodoAction::TodoDeleted { id, from } => tracing::info!(%id, %from, "todo deleted"),
        other => tracing::trace!(?other, "unexpected published action"),
    });

    let stdout = io::stdout();
    match cli.command.unwrap_or(Command::Run) {
        Command::Run => screens::run(&mut todos, io::stdin().lock(), stdout.lock())?,
        Command::Demo => screens::run(&mut todos, Cursor::new(DEMO_SCRIPT), stdout.lock())?,
    }

    tracing::info!(
        total = todos.len(),
        completed = todos.completed_count(),
        "session finished"
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(todos.state())?);
    }

    Ok(())
}
