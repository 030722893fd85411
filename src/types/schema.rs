use crate::types::{QualifiedName, Table};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Directed foreign-key edge, child (`from`) to parent (`to`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub from_table: QualifiedName,
    pub from_column: String,
    pub to_table: QualifiedName,
    pub to_column: String,
}

/// Snapshot of a database catalog: every base table plus the flat list of
/// foreign-key relationships between them.
///
/// Built once per extraction and never updated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(with = "table_list")]
    pub tables: BTreeMap<QualifiedName, Table>,
    pub relationships: Vec<Relationship>,
}

impl Schema {
    pub fn table(&self, name: &QualifiedName) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Table names in (schema, name) order
    pub fn table_names(&self) -> Vec<QualifiedName> {
        self.tables.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Relationships where `table` is the child or the parent
    pub fn relationships_of<'a>(
        &'a self,
        table: &'a QualifiedName,
    ) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.relationships
            .iter()
            .filter(move |r| &r.from_table == table || &r.to_table == table)
    }
}

/// Snapshots store tables as a list; each table carries its own name, so the
/// map is rebuilt on load without reparsing names from strings
mod table_list {
    use super::{QualifiedName, Table};
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S>(tables: &BTreeMap<QualifiedName, Table>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(tables.values())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<QualifiedName, Table>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tables = Vec::<Table>::deserialize(deserializer)?;
        Ok(tables.into_iter().map(|t| (t.name.clone(), t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Column, ForeignKey};

    #[test]
    fn test_json_keeps_dotted_and_padded_names() {
        let dotted = QualifiedName::new("my.app", "users");
        let padded = QualifiedName::new("public", " spaced ");

        let mut users = Table::new(dotted.clone());
        users.push_column(Column::new("id", "integer"));
        let mut notes = Table::new(padded.clone());
        notes.push_column(Column::new("user_id", "integer"));
        notes.push_foreign_key(ForeignKey {
            column: "user_id".into(),
            foreign_table: dotted.clone(),
            foreign_column: "id".into(),
        });

        let mut schema = Schema::default();
        schema.tables.insert(dotted.clone(), users);
        schema.tables.insert(padded.clone(), notes);
        schema.relationships.push(Relationship {
            from_table: padded.clone(),
            from_column: "user_id".into(),
            to_table: dotted.clone(),
            to_column: "id".into(),
        });

        let json = serde_json::to_string(&schema).unwrap();
        let restored: Schema = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, schema);
        assert_eq!(restored.table(&dotted).unwrap().name.schema, "my.app");
        assert_eq!(restored.table(&padded).unwrap().name.name, " spaced ");
    }
}
