mod app;
mod cmd;
mod ui;
mod worker;

use anyhow::{Context, Result};
use app::{App, AppState};
use clap::{Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use erd_builder::config::{parse_connections, resolve, CONNECTIONS_ENV};
use erd_builder::db::Extractor;
use erd_builder::export::DEFAULT_DIAGRAM_FILE;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "erd")]
#[command(about = "Browse a PostgreSQL schema and build Mermaid ER diagrams")]
struct Cli {
    /// Connection name or postgres:// URL to open on start
    #[arg(value_name = "CONNECTION")]
    connection: Option<String>,

    /// Named connections: name1=postgres://...,name2=postgres://...
    #[arg(long, env = CONNECTIONS_ENV, global = true, hide_env_values = true)]
    connections: Option<String>,

    /// Where `w` writes the diagram in the interactive UI
    #[arg(long, env = "ERD_OUTPUT", default_value = DEFAULT_DIAGRAM_FILE)]
    output: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured connections
    Connections,

    /// List tables and columns of a database
    Tables {
        /// Connection name or URL
        #[arg(long, short)]
        db: String,

        /// Print the schema snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a diagram for selected tables
    Render {
        /// Connection name or URL
        #[arg(long, short, required_unless_present = "schema_file", conflicts_with = "schema_file")]
        db: Option<String>,

        /// Render from a schema snapshot written by `export --format json`
        #[arg(long)]
        schema_file: Option<PathBuf>,

        /// schema.table (key columns), schema.table:col1,col2, or schema.table:*
        #[arg(long = "table", short, required = true)]
        tables: Vec<String>,

        /// Output file path (stdout if omitted)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Export the whole schema as a diagram or JSON snapshot
    Export {
        /// Connection name or URL
        #[arg(long, short)]
        db: String,

        /// Output format (guessed from the extension if omitted)
        #[arg(long, short, value_enum)]
        format: Option<ExportFormatArg>,

        /// Output file path
        #[arg(long, short)]
        out: PathBuf,
    },
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum ExportFormatArg {
    Mermaid,
    Json,
}

impl From<ExportFormatArg> for erd_builder::export::ExportFormat {
    fn from(fmt: ExportFormatArg) -> Self {
        match fmt {
            ExportFormatArg::Mermaid => erd_builder::export::ExportFormat::Mermaid,
            ExportFormatArg::Json => erd_builder::export::ExportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so they never mix with diagram output on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let connections = cli
        .connections
        .as_deref()
        .map(parse_connections)
        .unwrap_or_default();

    match cli.command {
        Some(Commands::Connections) => cmd::list_connections(&connections),
        Some(Commands::Tables { db, json }) => {
            cmd::list_tables(resolve(&db, &connections), json)
        }
        Some(Commands::Render {
            db,
            schema_file,
            tables,
            out,
        }) => {
            let source = match (db.as_deref(), schema_file) {
                (Some(db), _) => cmd::SchemaSource::Database(resolve(db, &connections).to_string()),
                (None, Some(path)) => cmd::SchemaSource::File(path),
                (None, None) => anyhow::bail!("Must specify either --db or --schema-file"),
            };
            cmd::render_tables(source, &tables, out.as_deref())
        }
        Some(Commands::Export { db, format, out }) => {
            cmd::export_schema(resolve(&db, &connections), format.map(Into::into), &out)
        }
        None => {
            let initial = cli
                .connection
                .as_deref()
                .map(|c| resolve(c, &connections).to_string());
            run_tui(AppState::new(connections, cli.output), initial)
        }
    }
}

fn run_tui(state: AppState, initial_connection: Option<String>) -> Result<()> {
    let extractor = Extractor::new().context("Failed to start database runtime")?;
    let worker = worker::Worker::new(extractor);

    let mut app = App::new(worker, state);

    if let Some(connection) = initial_connection {
        app.load_connection(connection);
    }

    let session = TerminalSession::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Main event loop
    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        if app.should_quit() {
            break;
        }

        app.process_worker_responses()?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    app.handle_key_event(key)?;
                }
                Event::Resize(_, _) => {
                    // Terminal will automatically redraw on next draw() call
                }
                _ => {}
            }
        }
    }

    drop(session);

    app.shutdown()?;

    Ok(())
}

/// Raw mode and the alternate screen, restored on drop so an early return
/// from the event loop still leaves a usable terminal
struct TerminalSession;

impl TerminalSession {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let session = TerminalSession;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, cursor::Show);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_session_drop_without_tty() {
        // Restoring must not panic even when stdout is not a terminal
        drop(TerminalSession);
    }
}

