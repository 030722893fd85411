//! Non-interactive subcommands.

use anyhow::{Context, Result};
use erd_builder::config::NamedConnection;
use erd_builder::db::{describe_error, Extractor};
use erd_builder::diagram;
use erd_builder::export::{self, export_diagram, load_schema_json, ExportFormat};
use erd_builder::types::{QualifiedName, Schema, Selection};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Where `render` gets its schema from
pub enum SchemaSource {
    Database(String),
    File(PathBuf),
}

/// Column choice in a `--table` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSpec {
    Keys,
    All,
    Named(Vec<String>),
}

/// Parsed `--table` argument: `schema.table`, `schema.table:*` or
/// `schema.table:col1,col2`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub table: QualifiedName,
    pub columns: ColumnSpec,
}

impl FromStr for TableSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (table, columns) = match s.split_once(':') {
            None => (s, ColumnSpec::Keys),
            Some((table, "*")) => (table, ColumnSpec::All),
            Some((table, cols)) => {
                let cols: Vec<String> = cols
                    .split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(String::from)
                    .collect();
                (table, ColumnSpec::Named(cols))
            }
        };

        let table = table
            .parse::<QualifiedName>()
            .with_context(|| format!("Invalid --table value: '{}'", s))?;
        Ok(Self { table, columns })
    }
}

/// Turn table specs into a selection over `schema`; unknown tables are kept
/// so the diagram degrades the same way a stale interactive selection does
pub fn build_selection(specs: &[TableSpec], schema: &Schema) -> Selection {
    let mut selection = Selection::new();
    for spec in specs {
        let table = schema.table(&spec.table);
        let columns = match (&spec.columns, table) {
            (ColumnSpec::Named(cols), _) => cols.clone(),
            (ColumnSpec::Keys, Some(t)) => t.key_columns(),
            (ColumnSpec::All, Some(t)) => t.column_names(),
            (_, None) => Vec::new(),
        };
        selection.select_table(spec.table.clone(), columns);
    }
    selection
}

fn extract(url: &str) -> Result<Schema> {
    let extractor = Extractor::new().context("Failed to start database runtime")?;
    extractor
        .extract(url)
        .map_err(|e| anyhow::anyhow!("{}", describe_error(&e)))
}

pub fn list_connections(connections: &[NamedConnection]) -> Result<()> {
    if connections.is_empty() {
        println!(
            "No connections configured (set {})",
            erd_builder::config::CONNECTIONS_ENV
        );
        return Ok(());
    }

    let width = connections.iter().map(|c| c.name.len()).max().unwrap_or(0);
    for connection in connections {
        println!("{:width$}  {}", connection.name, connection.masked_url(), width = width);
    }
    Ok(())
}

pub fn list_tables(url: &str, json: bool) -> Result<()> {
    let schema = extract(url)?;

    if json {
        let output = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
        println!("{}", output);
        return Ok(());
    }

    for table in schema.tables.values() {
        println!("{}", table.name);
        for column in &table.columns {
            let markers: Vec<&str> = diagram::markers_for(table, &column.name)
                .iter()
                .map(|m| m.as_str())
                .collect();
            let line = format!("  {} {} {}", column.name, column.data_type, markers.join(" "));
            println!("{}", line.trim_end());
        }
    }
    Ok(())
}

pub fn render_tables(source: SchemaSource, tables: &[String], out: Option<&Path>) -> Result<()> {
    let specs: Vec<TableSpec> = tables
        .iter()
        .map(|t| t.parse())
        .collect::<Result<_>>()?;

    let schema = match source {
        SchemaSource::Database(url) => extract(&url)?,
        SchemaSource::File(path) => load_schema_json(&path)?,
    };

    let selection = build_selection(&specs, &schema);
    let text = diagram::render(&selection, &schema);

    match out {
        Some(path) => {
            export_diagram(path, &text)?;
            info!(path = %path.display(), tables = selection.len(), "Wrote diagram");
        }
        None => println!("{}", text),
    }
    Ok(())
}

pub fn export_schema(url: &str, format: Option<ExportFormat>, out: &Path) -> Result<()> {
    let schema = extract(url)?;
    let format = format.unwrap_or_else(|| ExportFormat::from_path(out));
    export::export(&schema, format, out)?;
    println!("Exported to: {}", out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use erd_builder::db::SchemaBuilder;
    use erd_builder::types::{Column, ForeignKey};

    fn schema() -> Schema {
        let users: QualifiedName = "public.users".parse().unwrap();
        let orders: QualifiedName = "public.orders".parse().unwrap();
        let mut builder = SchemaBuilder::new();
        builder.add_table(users.clone());
        builder.add_table(orders.clone());
        builder.add_column(&users, Column::new("id", "integer"));
        builder.add_column(&users, Column::new("name", "text"));
        builder.add_column(&orders, Column::new("id", "integer"));
        builder.add_column(&orders, Column::new("user_id", "integer"));
        builder.add_primary_key(&users, "id".into());
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
    fn test_parse_table_specs() {
        let spec: TableSpec = "public.users".parse().unwrap();
        assert_eq!(spec.columns, ColumnSpec::Keys);

        let spec: TableSpec = "sales.orders:*".parse().unwrap();
        assert_eq!(spec.table, QualifiedName::new("sales", "orders"));
        assert_eq!(spec.columns, ColumnSpec::All);

        let spec: TableSpec = "users:id, name,".parse().unwrap();
        assert_eq!(spec.table, QualifiedName::new("public", "users"));
        assert_eq!(
            spec.columns,
            ColumnSpec::Named(vec!["id".to_string(), "name".to_string()])
        );

        assert!(":id".parse::<TableSpec>().is_err());
    }

    #[test]
    fn test_build_selection() {
        let schema = schema();
        let specs: Vec<TableSpec> = ["public.orders", "public.users:*", "public.gone"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();

        let selection = build_selection(&specs, &schema);
        let orders: QualifiedName = "public.orders".parse().unwrap();
        let users: QualifiedName = "public.users".parse().unwrap();
        let gone: QualifiedName = "public.gone".parse().unwrap();

        assert_eq!(selection.columns(&orders).unwrap(), ["id", "user_id"]);
        assert_eq!(selection.columns(&users).unwrap(), ["id", "name"]);
        assert!(selection.columns(&gone).unwrap().is_empty());
    }
}
