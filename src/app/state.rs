use erd_builder::config::NamedConnection;
use erd_builder::diagram;
use erd_builder::types::{Schema, Selection, Table};
use std::path::PathBuf;

/// Which pane currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Connections,
    Tables,
    Columns,
    Diagram,
}

/// Message shown in the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub is_error: bool,
}

/// Application state
#[derive(Debug)]
pub struct AppState {
    // Connection picker
    pub connections: Vec<NamedConnection>,
    pub selected_connection_index: usize,
    pub current_connection: Option<String>,

    // Schema snapshot and the user's picks over it
    pub schema: Option<Schema>,
    pub selection: Selection,
    pub loading: bool,

    // Tables pane
    pub selected_table_index: usize,
    pub table_filter: String,
    pub filter_mode: bool,

    // Columns pane
    pub selected_column_index: usize,

    // Diagram pane
    pub diagram: Option<String>,
    pub diagram_scroll: u16,
    pub output_path: PathBuf,

    // UI state
    pub focus: Focus,
    pub show_help: bool,
    pub status: Option<Status>,
}

impl AppState {
    pub fn new(connections: Vec<NamedConnection>, output_path: PathBuf) -> Self {
        Self {
            connections,
            selected_connection_index: 0,
            current_connection: None,
            schema: None,
            selection: Selection::new(),
            loading: false,
            selected_table_index: 0,
            table_filter: String::new(),
            filter_mode: false,
            selected_column_index: 0,
            diagram: None,
            diagram_scroll: 0,
            output_path,
            focus: Focus::Connections,
            show_help: false,
            status: None,
        }
    }

    /// Tables matching the filter, in schema order
    pub fn filtered_tables(&self) -> Vec<&Table> {
        let Some(schema) = &self.schema else {
            return Vec::new();
        };
        let filter = self.table_filter.to_lowercase();
        schema
            .tables
            .values()
            .filter(|t| filter.is_empty() || t.name.to_string().to_lowercase().contains(&filter))
            .collect()
    }

    /// Table under the cursor in the tables pane
    pub fn current_table(&self) -> Option<&Table> {
        self.filtered_tables().get(self.selected_table_index).copied()
    }

    pub fn selected_connection(&self) -> Option<&NamedConnection> {
        self.connections.get(self.selected_connection_index)
    }

    /// Replace the snapshot; the previous selection no longer applies
    pub fn schema_loaded(&mut self, schema: Schema) {
        let count = schema.len();
        self.schema = Some(schema);
        self.selection.clear();
        self.loading = false;
        self.selected_table_index = 0;
        self.selected_column_index = 0;
        self.table_filter.clear();
        self.filter_mode = false;
        self.focus = Focus::Tables;
        self.refresh_diagram();
        self.set_info(format!("Loaded {} tables", count));
    }

    /// Toggle the table under the cursor; switching it on pre-selects its keys
    pub fn toggle_current_table(&mut self) {
        let Some(table) = self.current_table().cloned() else {
            return;
        };

        if self.selection.contains_table(&table.name) {
            self.selection.remove_table(&table.name);
        } else {
            self.selection.select_table_with_keys(&table);
        }
        self.refresh_diagram();
    }

    /// Toggle the column under the cursor of the current table
    pub fn toggle_current_column(&mut self) {
        let Some(table) = self.current_table() else {
            return;
        };
        let Some(column) = table.columns.get(self.selected_column_index) else {
            return;
        };

        let name = table.name.clone();
        let column = column.name.clone();
        let selected = !self.selection.is_column_selected(&name, &column);
        self.selection.toggle_column(&name, &column, selected);
        self.refresh_diagram();
    }

    /// Select every column of the current table, in table order
    pub fn select_all_columns(&mut self) {
        let Some(table) = self.current_table() else {
            return;
        };
        let name = table.name.clone();
        let columns = table.column_names();
        self.selection.select_table(name, columns);
        self.refresh_diagram();
    }

    pub fn refresh_diagram(&mut self) {
        self.diagram = self
            .schema
            .as_ref()
            .and_then(|schema| diagram::preview(&self.selection, schema));
    }

    /// Move selection up in the focused pane
    pub fn move_up(&mut self) {
        match self.focus {
            Focus::Connections => {
                self.selected_connection_index =
                    wrap_prev(self.selected_connection_index, self.connections.len());
            }
            Focus::Tables => {
                let len = self.filtered_tables().len();
                self.selected_table_index = wrap_prev(self.selected_table_index, len);
                self.selected_column_index = 0;
            }
            Focus::Columns => {
                let len = self.current_table().map(|t| t.columns.len()).unwrap_or(0);
                self.selected_column_index = wrap_prev(self.selected_column_index, len);
            }
            Focus::Diagram => {
                self.diagram_scroll = self.diagram_scroll.saturating_sub(1);
            }
        }
    }

    /// Move selection down in the focused pane
    pub fn move_down(&mut self) {
        match self.focus {
            Focus::Connections => {
                self.selected_connection_index =
                    wrap_next(self.selected_connection_index, self.connections.len());
            }
            Focus::Tables => {
                let len = self.filtered_tables().len();
                self.selected_table_index = wrap_next(self.selected_table_index, len);
                self.selected_column_index = 0;
            }
            Focus::Columns => {
                let len = self.current_table().map(|t| t.columns.len()).unwrap_or(0);
                self.selected_column_index = wrap_next(self.selected_column_index, len);
            }
            Focus::Diagram => {
                let lines = self.diagram.as_deref().map(|d| d.lines().count()).unwrap_or(0);
                if (self.diagram_scroll as usize) + 1 < lines {
                    self.diagram_scroll = self.diagram_scroll.saturating_add(1);
                }
            }
        }
    }

    /// Switch to next pane; the connection picker is not part of the cycle
    pub fn next_pane(&mut self) {
        self.focus = match self.focus {
            Focus::Connections => Focus::Connections,
            Focus::Tables => Focus::Columns,
            Focus::Columns => Focus::Diagram,
            Focus::Diagram => Focus::Tables,
        };
    }

    pub fn prev_pane(&mut self) {
        self.focus = match self.focus {
            Focus::Connections => Focus::Connections,
            Focus::Tables => Focus::Diagram,
            Focus::Columns => Focus::Tables,
            Focus::Diagram => Focus::Columns,
        };
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.table_filter.push(c);
        self.selected_table_index = 0;
        self.selected_column_index = 0;
    }

    pub fn pop_filter_char(&mut self) {
        self.table_filter.pop();
        self.selected_table_index = 0;
        self.selected_column_index = 0;
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.status = Some(Status {
            message: message.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = Some(Status {
            message: message.into(),
            is_error: true,
        });
    }
}

fn wrap_prev(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (index + len - 1) % len
    }
}

fn wrap_next(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (index + 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use erd_builder::db::SchemaBuilder;
    use erd_builder::types::{Column, ForeignKey, QualifiedName};

    fn name(s: &str) -> QualifiedName {
        s.parse().unwrap()
    }

    fn loaded_state() -> AppState {
        let users = name("public.users");
        let orders = name("public.orders");
        let mut builder = SchemaBuilder::new();
        builder.add_table(users.clone());
        builder.add_table(orders.clone());
        builder.add_column(&orders, Column::new("id", "integer"));
        builder.add_column(&orders, Column::new("user_id", "integer"));
        builder.add_column(&orders, Column::new("note", "text"));
        builder.add_column(&users, Column::new("id", "integer"));
        builder.add_column(&users, Column::new("name", "text"));
        builder.add_primary_key(&orders, "id".into());
        builder.add_primary_key(&users, "id".into());
        builder.add_foreign_key(
            &orders,
            ForeignKey {
                column: "user_id".into(),
                foreign_table: users,
                foreign_column: "id".into(),
            },
        );

        let mut state = AppState::new(Vec::new(), PathBuf::from("erd_diagram.mmd"));
        state.schema_loaded(builder.build());
        state
    }

    #[test]
    fn test_schema_loaded_resets_selection() {
        let mut state = loaded_state();
        state.toggle_current_table();
        assert!(!state.selection.is_empty());

        let schema = state.schema.clone().unwrap();
        state.schema_loaded(schema);
        assert!(state.selection.is_empty());
        assert_eq!(state.diagram, None);
        assert_eq!(state.focus, Focus::Tables);
    }

    #[test]
    fn test_toggle_table_selects_keys_and_renders() {
        let mut state = loaded_state();
        // public.orders sorts first
        state.toggle_current_table();

        assert_eq!(state.selection.columns(&name("public.orders")).unwrap(), ["id", "user_id"]);
        let diagram = state.diagram.clone().unwrap();
        assert!(diagram.contains("        integer user_id FK"));

        state.toggle_current_table();
        assert!(state.selection.is_empty());
        assert_eq!(state.diagram, None);
    }

    #[test]
    fn test_toggle_column() {
        let mut state = loaded_state();
        state.focus = Focus::Columns;
        state.move_down();
        state.move_down();
        state.toggle_current_column();

        assert_eq!(state.selection.columns(&name("public.orders")).unwrap(), ["note"]);

        state.toggle_current_column();
        assert!(state.selection.columns(&name("public.orders")).unwrap().is_empty());
        assert_eq!(state.diagram.as_deref(), Some("erDiagram"));
    }

    #[test]
    fn test_edge_appears_once_both_tables_selected() {
        let mut state = loaded_state();
        state.toggle_current_table();
        state.move_down();
        state.toggle_current_table();

        let diagram = state.diagram.clone().unwrap();
        assert!(diagram.ends_with("    public_users ||--o{ public_orders : \"has\""));
    }

    #[test]
    fn test_filter_narrows_tables() {
        let mut state = loaded_state();
        for c in "USE".chars() {
            state.push_filter_char(c);
        }
        let tables: Vec<String> = state.filtered_tables().iter().map(|t| t.name.to_string()).collect();
        assert_eq!(tables, vec!["public.users"]);

        state.select_all_columns();
        assert_eq!(state.selection.columns(&name("public.users")).unwrap(), ["id", "name"]);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut state = loaded_state();
        state.move_up();
        assert_eq!(state.current_table().unwrap().name, name("public.users"));
        state.move_down();
        assert_eq!(state.current_table().unwrap().name, name("public.orders"));
    }

    #[test]
    fn test_diagram_scroll_stops_at_limit() {
        let mut state = loaded_state();
        state.focus = Focus::Diagram;
        state.diagram = Some("line\n".repeat(u16::MAX as usize + 10));
        state.diagram_scroll = u16::MAX;

        state.move_down();
        assert_eq!(state.diagram_scroll, u16::MAX);

        state.move_up();
        assert_eq!(state.diagram_scroll, u16::MAX - 1);
    }
}
