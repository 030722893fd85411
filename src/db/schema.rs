use crate::db::error::{CatalogStep, ExtractError};
use crate::types::{Column, ForeignKey, QualifiedName, Relationship, Schema, Table};
use sqlx::PgConnection;
use tracing::{debug, warn};

const TABLES_QUERY: &str = r#"
    SELECT table_schema::text, table_name::text
    FROM information_schema.tables
    WHERE table_schema NOT IN ('pg_catalog', 'information_schema')
      AND table_type = 'BASE TABLE'
    ORDER BY table_schema, table_name
"#;

const COLUMNS_QUERY: &str = r#"
    SELECT table_schema::text, table_name::text, column_name::text,
           data_type::text, character_maximum_length::int4
    FROM information_schema.columns
    WHERE table_schema NOT IN ('pg_catalog', 'information_schema')
    ORDER BY table_schema, table_name, ordinal_position
"#;

const PRIMARY_KEYS_QUERY: &str = r#"
    SELECT tc.table_schema::text, tc.table_name::text, kcu.column_name::text
    FROM information_schema.table_constraints tc
    JOIN information_schema.key_column_usage kcu
      ON tc.constraint_name = kcu.constraint_name
     AND tc.table_schema = kcu.table_schema
    WHERE tc.constraint_type = 'PRIMARY KEY'
      AND tc.table_schema NOT IN ('pg_catalog', 'information_schema')
    ORDER BY tc.table_schema, tc.table_name, kcu.ordinal_position
"#;

// Each source column is paired with the referenced column at the same
// position of the referenced key, so composite keys yield one row per column.
const FOREIGN_KEYS_QUERY: &str = r#"
    SELECT kcu.table_schema::text, kcu.table_name::text, kcu.column_name::text,
           rku.table_schema::text, rku.table_name::text, rku.column_name::text
    FROM information_schema.table_constraints tc
    JOIN information_schema.key_column_usage kcu
      ON kcu.constraint_schema = tc.constraint_schema
     AND kcu.constraint_name = tc.constraint_name
     AND kcu.table_schema = tc.table_schema
     AND kcu.table_name = tc.table_name
    JOIN information_schema.referential_constraints rc
      ON rc.constraint_schema = tc.constraint_schema
     AND rc.constraint_name = tc.constraint_name
    JOIN information_schema.key_column_usage rku
      ON rku.constraint_schema = rc.unique_constraint_schema
     AND rku.constraint_name = rc.unique_constraint_name
     AND rku.ordinal_position = kcu.position_in_unique_constraint
    WHERE tc.constraint_type = 'FOREIGN KEY'
      AND tc.table_schema NOT IN ('pg_catalog', 'information_schema')
    ORDER BY tc.table_schema, tc.table_name, tc.constraint_name, kcu.ordinal_position
"#;

const UNIQUE_KEYS_QUERY: &str = r#"
    SELECT tc.table_schema::text, tc.table_name::text, kcu.column_name::text
    FROM information_schema.table_constraints tc
    JOIN information_schema.key_column_usage kcu
      ON tc.constraint_name = kcu.constraint_name
     AND tc.table_schema = kcu.table_schema
    WHERE tc.constraint_type = 'UNIQUE'
      AND tc.table_schema NOT IN ('pg_catalog', 'information_schema')
    ORDER BY tc.table_schema, tc.table_name, kcu.ordinal_position
"#;

type TableRow = (String, String);
type ColumnRow = (String, String, String, String, Option<i32>);
type KeyRow = (String, String, String);
type ForeignKeyRow = (String, String, String, String, String, String);

/// Run every catalog query over one connection and assemble the schema
pub async fn load_schema(conn: &mut PgConnection) -> Result<Schema, ExtractError> {
    let mut builder = SchemaBuilder::new();

    let tables: Vec<TableRow> = sqlx::query_as(TABLES_QUERY)
        .fetch_all(&mut *conn)
        .await
        .map_err(ExtractError::query(CatalogStep::Tables))?;
    debug!(rows = tables.len(), "Loaded tables");
    for (schema, name) in tables {
        builder.add_table(QualifiedName::new(schema, name));
    }

    let columns: Vec<ColumnRow> = sqlx::query_as(COLUMNS_QUERY)
        .fetch_all(&mut *conn)
        .await
        .map_err(ExtractError::query(CatalogStep::Columns))?;
    debug!(rows = columns.len(), "Loaded columns");
    for (schema, table, name, data_type, max_length) in columns {
        let column = Column::from_catalog(name, &data_type, max_length);
        builder.add_column(&QualifiedName::new(schema, table), column);
    }

    let primary_keys: Vec<KeyRow> = sqlx::query_as(PRIMARY_KEYS_QUERY)
        .fetch_all(&mut *conn)
        .await
        .map_err(ExtractError::query(CatalogStep::PrimaryKeys))?;
    debug!(rows = primary_keys.len(), "Loaded primary keys");
    for (schema, table, column) in primary_keys {
        builder.add_primary_key(&QualifiedName::new(schema, table), column);
    }

    let foreign_keys: Vec<ForeignKeyRow> = sqlx::query_as(FOREIGN_KEYS_QUERY)
        .fetch_all(&mut *conn)
        .await
        .map_err(ExtractError::query(CatalogStep::ForeignKeys))?;
    debug!(rows = foreign_keys.len(), "Loaded foreign keys");
    for (schema, table, column, foreign_schema, foreign_table, foreign_column) in foreign_keys {
        builder.add_foreign_key(
            &QualifiedName::new(schema, table),
            ForeignKey {
                column,
                foreign_table: QualifiedName::new(foreign_schema, foreign_table),
                foreign_column,
            },
        );
    }

    let unique_keys: Vec<KeyRow> = sqlx::query_as(UNIQUE_KEYS_QUERY)
        .fetch_all(&mut *conn)
        .await
        .map_err(ExtractError::query(CatalogStep::UniqueKeys))?;
    debug!(rows = unique_keys.len(), "Loaded unique keys");
    for (schema, table, column) in unique_keys {
        builder.add_unique_key(&QualifiedName::new(schema, table), column);
    }

    Ok(builder.build())
}

/// Assembles catalog rows into a [`Schema`].
///
/// Tables must be added first; rows for any other table are dropped, as are
/// foreign keys whose source column is not a known column of the table.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    schema: Schema,
    skipped: usize,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table(&mut self, name: QualifiedName) {
        self.schema
            .tables
            .entry(name.clone())
            .or_insert_with(|| Table::new(name));
    }

    pub fn add_column(&mut self, table: &QualifiedName, column: Column) -> bool {
        match self.schema.tables.get_mut(table) {
            Some(t) => t.push_column(column),
            None => {
                self.skipped += 1;
                false
            }
        }
    }

    pub fn add_primary_key(&mut self, table: &QualifiedName, column: String) -> bool {
        match self.schema.tables.get_mut(table) {
            Some(t) => {
                t.push_primary_key(column);
                true
            }
            None => {
                self.skipped += 1;
                false
            }
        }
    }

    pub fn add_unique_key(&mut self, table: &QualifiedName, column: String) -> bool {
        match self.schema.tables.get_mut(table) {
            Some(t) => {
                t.push_unique_key(column);
                true
            }
            None => {
                self.skipped += 1;
                false
            }
        }
    }

    /// Records the foreign key on its table and the matching schema-level relationship
    pub fn add_foreign_key(&mut self, table: &QualifiedName, fk: ForeignKey) -> bool {
        let Some(t) = self.schema.tables.get_mut(table) else {
            self.skipped += 1;
            return false;
        };

        if !t.has_column(&fk.column) {
            warn!(
                table = %table,
                column = %fk.column,
                "Skipping foreign key on unknown column"
            );
            self.skipped += 1;
            return false;
        }

        let relationship = Relationship {
            from_table: table.clone(),
            from_column: fk.column.clone(),
            to_table: fk.foreign_table.clone(),
            to_column: fk.foreign_column.clone(),
        };

        if t.push_foreign_key(fk) {
            self.schema.relationships.push(relationship);
        }
        true
    }

    /// Rows dropped because their table or column was unknown
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn build(self) -> Schema {
        if self.skipped > 0 {
            debug!(skipped = self.skipped, "Ignored catalog rows outside loaded tables");
        }
        self.schema
    }
}
