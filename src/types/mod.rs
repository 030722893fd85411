pub mod schema;
pub mod selection;
pub mod table;

pub use schema::{Relationship, Schema};
pub use selection::{SelectedTable, Selection};
pub use table::{Column, ForeignKey, InvalidQualifiedName, QualifiedName, Table, DEFAULT_SCHEMA};
