use crate::types::{QualifiedName, Table};

/// One selected table and its chosen columns, in the order they were picked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedTable {
    pub table: QualifiedName,
    pub columns: Vec<String>,
}

/// User-chosen subset of tables and columns to draw.
///
/// Entries keep insertion order. A table may be present with no columns,
/// meaning it was picked but nothing in it is shown yet; it still counts for
/// relationship edges. Keys are not checked against any schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    entries: Vec<SelectedTable>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains_table(&self, table: &QualifiedName) -> bool {
        self.position(table).is_some()
    }

    pub fn columns(&self, table: &QualifiedName) -> Option<&[String]> {
        self.position(table)
            .map(|idx| self.entries[idx].columns.as_slice())
    }

    pub fn is_column_selected(&self, table: &QualifiedName, column: &str) -> bool {
        self.columns(table)
            .map(|cols| cols.iter().any(|c| c == column))
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectedTable> {
        self.entries.iter()
    }

    /// Insert or replace a table's column list; a replaced entry keeps its position
    pub fn select_table(&mut self, table: QualifiedName, columns: Vec<String>) {
        let mut deduped: Vec<String> = Vec::with_capacity(columns.len());
        for column in columns {
            if !deduped.contains(&column) {
                deduped.push(column);
            }
        }

        match self.position(&table) {
            Some(idx) => self.entries[idx].columns = deduped,
            None => self.entries.push(SelectedTable {
                table,
                columns: deduped,
            }),
        }
    }

    /// Select a table with its primary, foreign and unique key columns
    pub fn select_table_with_keys(&mut self, table: &Table) {
        self.select_table(table.name.clone(), table.key_columns());
    }

    pub fn remove_table(&mut self, table: &QualifiedName) -> bool {
        match self.position(table) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Add or remove one column; an unknown table gets an empty entry first
    pub fn toggle_column(&mut self, table: &QualifiedName, column: &str, selected: bool) {
        let idx = match self.position(table) {
            Some(idx) => idx,
            None => {
                self.entries.push(SelectedTable {
                    table: table.clone(),
                    columns: Vec::new(),
                });
                self.entries.len() - 1
            }
        };

        let columns = &mut self.entries[idx].columns;
        if selected {
            if !columns.iter().any(|c| c == column) {
                columns.push(column.to_string());
            }
        } else {
            columns.retain(|c| c != column);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn position(&self, table: &QualifiedName) -> Option<usize> {
        self.entries.iter().position(|e| &e.table == table)
    }
}
