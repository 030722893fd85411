//! Build Mermaid ER diagrams from a PostgreSQL catalog.
//!
//! [`db::Extractor`] reads `information_schema` into a [`types::Schema`]
//! snapshot; [`diagram::render`] turns a [`types::Selection`] over that
//! snapshot into `erDiagram` markup.

pub mod config;
pub mod db;
pub mod diagram;
pub mod export;
pub mod types;
