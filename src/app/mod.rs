mod state;

use crate::worker::{Worker, WorkerMessage, WorkerResponse};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use erd_builder::export::{export_diagram, export_schema_json};
use std::io;
use tracing::{info, warn};

pub use state::{AppState, Focus};

/// Main application controller
pub struct App {
    pub state: AppState,
    worker: Worker,
    should_quit: bool,
}

impl App {
    pub fn new(worker: Worker, state: AppState) -> Self {
        Self {
            state,
            worker,
            should_quit: false,
        }
    }

    /// Check if application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Ask the worker to extract the schema behind `connection`
    pub fn load_connection(&mut self, connection: String) {
        self.state.loading = true;
        self.state.current_connection = Some(connection.clone());
        self.state.set_info("Loading schema...");
        if let Err(e) = self.worker.send(WorkerMessage::LoadSchema { connection }) {
            self.state.loading = false;
            self.state.set_error(format!("Failed to start loading: {}", e));
        }
    }

    /// Process worker responses
    pub fn process_worker_responses(&mut self) -> Result<(), io::Error> {
        while let Ok(Some(response)) = self.worker.try_recv() {
            match response {
                WorkerResponse::SchemaLoaded { schema } => {
                    self.state.schema_loaded(schema);
                }
                WorkerResponse::Error { message } => {
                    warn!(error = %message, "Schema load failed");
                    self.state.loading = false;
                    self.state.set_error(message);
                }
            }
        }
        Ok(())
    }

    /// Handle a key event
    pub fn handle_key_event(&mut self, event: KeyEvent) -> Result<(), io::Error> {
        if self.state.show_help {
            if matches!(event.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.state.show_help = false;
            }
            return Ok(());
        }

        if self.state.filter_mode {
            match event.code {
                KeyCode::Esc => {
                    self.state.filter_mode = false;
                    self.state.table_filter.clear();
                    self.state.selected_table_index = 0;
                }
                KeyCode::Enter => self.state.filter_mode = false,
                KeyCode::Backspace => self.state.pop_filter_char(),
                KeyCode::Char(c) => self.state.push_filter_char(c),
                _ => {}
            }
            return Ok(());
        }

        match event.code {
            KeyCode::Char('q') if event.modifiers.is_empty() => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.state.show_help = true;
            }
            KeyCode::Tab => {
                self.state.next_pane();
            }
            KeyCode::BackTab => {
                self.state.prev_pane();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.move_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.move_down();
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            KeyCode::Char('a') if self.state.focus != Focus::Connections => {
                self.state.select_all_columns();
            }
            KeyCode::Char('/') if self.state.focus == Focus::Tables => {
                self.state.filter_mode = true;
            }
            KeyCode::Char('r') => {
                if let Some(connection) = self.state.current_connection.clone() {
                    if !self.state.loading {
                        self.load_connection(connection);
                    }
                }
            }
            KeyCode::Char('c') if event.modifiers.is_empty() => {
                if !self.state.connections.is_empty() {
                    self.state.focus = Focus::Connections;
                }
            }
            KeyCode::Char('w') => self.write_diagram(),
            KeyCode::Char('J') => self.write_schema_json(),
            KeyCode::Esc => {
                if !self.state.table_filter.is_empty() {
                    self.state.table_filter.clear();
                    self.state.selected_table_index = 0;
                } else if self.state.focus == Focus::Connections && self.state.schema.is_some() {
                    self.state.focus = Focus::Tables;
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn activate(&mut self) {
        match self.state.focus {
            Focus::Connections => {
                if self.state.loading {
                    return;
                }
                if let Some(connection) = self.state.selected_connection() {
                    let url = connection.url.clone();
                    self.load_connection(url);
                }
            }
            Focus::Tables => self.state.toggle_current_table(),
            Focus::Columns => self.state.toggle_current_column(),
            Focus::Diagram => {}
        }
    }

    fn write_diagram(&mut self) {
        let Some(diagram) = self.state.diagram.clone() else {
            self.state.set_error("No tables selected");
            return;
        };

        let path = self.state.output_path.clone();
        match export_diagram(&path, &diagram) {
            Ok(()) => {
                info!(path = %path.display(), "Wrote diagram");
                self.state.set_info(format!("Wrote {}", path.display()));
            }
            Err(e) => self.state.set_error(format!("{:#}", e)),
        }
    }

    fn write_schema_json(&mut self) {
        let Some(schema) = &self.state.schema else {
            self.state.set_error("No schema loaded");
            return;
        };

        let path = self.state.output_path.with_extension("json");
        match export_schema_json(&path, schema) {
            Ok(()) => {
                info!(path = %path.display(), "Wrote schema snapshot");
                self.state.set_info(format!("Wrote {}", path.display()));
            }
            Err(e) => self.state.set_error(format!("{:#}", e)),
        }
    }

    /// Shutdown the worker
    pub fn shutdown(self) -> anyhow::Result<()> {
        self.worker.shutdown()
    }
}
