//! Mermaid ER diagram rendering for a selection over a schema snapshot.

pub mod mermaid;

use crate::types::{Schema, Selection, Table};
use mermaid::KeyMarker;

/// Render the selected tables and the relationships between them.
///
/// Tables selected with no columns get no block but still count for edges.
/// Columns or tables missing from `schema` fall back to the `string` type with
/// no markers. An empty selection yields just the header line.
pub fn render(selection: &Selection, schema: &Schema) -> String {
    let mut lines: Vec<String> = vec![mermaid::HEADER.to_string()];

    for entry in selection.iter() {
        if entry.columns.is_empty() {
            continue;
        }

        let table = schema.table(&entry.table);
        lines.push(mermaid::entity_open(&entry.table));

        for column in &entry.columns {
            let data_type = table
                .and_then(|t| t.column(column))
                .map(|c| c.data_type.as_str())
                .unwrap_or(mermaid::UNKNOWN_TYPE);
            let markers = table.map(|t| markers_for(t, column)).unwrap_or_default();
            lines.push(mermaid::attribute(data_type, column, &markers));
        }

        lines.push(mermaid::entity_close().to_string());
    }

    for rel in &schema.relationships {
        if selection.contains_table(&rel.from_table) && selection.contains_table(&rel.to_table) {
            lines.push(mermaid::relationship(&rel.to_table, &rel.from_table));
        }
    }

    lines.join("\n")
}

/// Like [`render`], but `None` when nothing is selected
pub fn preview(selection: &Selection, schema: &Schema) -> Option<String> {
    if selection.is_empty() {
        None
    } else {
        Some(render(selection, schema))
    }
}

/// PK, FK, UK in that order; UK is dropped when the column is already a PK
pub fn markers_for(table: &Table, column: &str) -> Vec<KeyMarker> {
    let mut markers = Vec::new();
    let primary = table.is_primary_key(column);
    if primary {
        markers.push(KeyMarker::Primary);
    }
    if table.is_foreign_key(column) {
        markers.push(KeyMarker::Foreign);
    }
    if table.is_unique(column) && !primary {
        markers.push(KeyMarker::Unique);
    }
    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SchemaBuilder;
    use crate::types::{Column, ForeignKey, QualifiedName};
    use pretty_assertions::assert_eq;

    fn name(s: &str) -> QualifiedName {
        s.parse().unwrap()
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn users_and_orders() -> Schema {
        let users = name("public.users");
        let orders = name("public.orders");
        let mut builder = SchemaBuilder::new();
        builder.add_table(users.clone());
        builder.add_table(orders.clone());
        builder.add_column(&users, Column::from_catalog("id", "integer", None));
        builder.add_column(&users, Column::from_catalog("name", "character varying", Some(255)));
        builder.add_column(&users, Column::from_catalog("email", "text", None));
        builder.add_column(&orders, Column::from_catalog("id", "integer", None));
        builder.add_column(&orders, Column::from_catalog("user_id", "integer", None));
        builder.add_primary_key(&users, "id".into());
        builder.add_unique_key(&users, "id".into());
        builder.add_unique_key(&users, "email".into());
        builder.add_primary_key(&orders, "id".into());
        builder.add_foreign_key(
            &orders,
            ForeignKey {
                column: "user_id".into(),
                foreign_table: users,
                foreign_column: "id".into(),
            },
        );
        builder.build()
    }

    #[test]
    fn test_render_both_tables_with_edge() {
        let schema = users_and_orders();
        let mut selection = Selection::new();
        selection.select_table(name("public.users"), cols(&["id", "name"]));
        selection.select_table(name("public.orders"), cols(&["id", "user_id"]));

        let expected = [
            "erDiagram",
            "    public_users {",
            "        integer id PK",
            "        character varying(255) name",
            "    }",
            "    public_orders {",
            "        integer id PK",
            "        integer user_id FK",
            "    }",
            "    public_users ||--o{ public_orders : \"has\"",
        ]
        .join("\n");
        assert_eq!(render(&selection, &schema), expected);
    }

    #[test]
    fn test_no_edge_when_parent_not_selected() {
        let schema = users_and_orders();
        let mut selection = Selection::new();
        selection.select_table(name("public.orders"), cols(&["id", "user_id"]));

        let output = render(&selection, &schema);
        assert!(output.contains("    public_orders {"));
        assert!(!output.contains("||--o{"));
    }

    #[test]
    fn test_table_without_columns_has_no_block() {
        let schema = users_and_orders();
        let mut selection = Selection::new();
        selection.select_table(name("public.users"), vec![]);

        assert_eq!(render(&selection, &schema), "erDiagram");
    }

    #[test]
    fn test_edge_drawn_even_without_fk_column_selected() {
        let schema = users_and_orders();
        let mut selection = Selection::new();
        selection.select_table(name("public.users"), vec![]);
        selection.select_table(name("public.orders"), cols(&["id"]));

        let output = render(&selection, &schema);
        assert!(!output.contains("public_users {"));
        assert!(output.ends_with("    public_users ||--o{ public_orders : \"has\""));
    }

    #[test]
    fn test_unknown_column_uses_placeholder_type() {
        let schema = users_and_orders();
        let mut selection = Selection::new();
        selection.select_table(name("public.users"), cols(&["id", "dropped_col"]));

        let output = render(&selection, &schema);
        assert!(output.contains("        string dropped_col\n"));
    }

    #[test]
    fn test_unknown_table_renders_placeholders() {
        let schema = users_and_orders();
        let mut selection = Selection::new();
        selection.select_table(name("archive.old"), cols(&["id"]));

        assert_eq!(
            render(&selection, &schema),
            "erDiagram\n    archive_old {\n        string id\n    }"
        );
    }

    #[test]
    fn test_unique_suppressed_for_primary_key() {
        let schema = users_and_orders();
        let mut selection = Selection::new();
        selection.select_table(name("public.users"), cols(&["id", "email"]));

        let output = render(&selection, &schema);
        assert!(output.contains("        integer id PK\n"));
        assert!(!output.contains("PK UK"));
        assert!(output.contains("        text email UK"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let schema = users_and_orders();
        let mut selection = Selection::new();
        selection.select_table(name("public.orders"), cols(&["user_id", "id"]));
        selection.select_table(name("public.users"), cols(&["email"]));

        assert_eq!(render(&selection, &schema), render(&selection, &schema));
    }

    #[test]
    fn test_adding_column_only_appends_to_block() {
        let schema = users_and_orders();
        let mut selection = Selection::new();
        selection.select_table(name("public.users"), cols(&["id"]));
        let before = render(&selection, &schema);

        selection.toggle_column(&name("public.users"), "email", true);
        let after = render(&selection, &schema);

        let before_lines: Vec<&str> = before.lines().collect();
        let after_lines: Vec<&str> = after.lines().collect();
        assert_eq!(after_lines.len(), before_lines.len() + 1);
        assert_eq!(&after_lines[..3], &before_lines[..3]);
        assert_eq!(after_lines[3], "        text email UK");
    }

    #[test]
    fn test_preview_empty_selection() {
        let schema = users_and_orders();
        assert_eq!(preview(&Selection::new(), &schema), None);
        assert_eq!(render(&Selection::new(), &schema), "erDiagram");
    }
}
