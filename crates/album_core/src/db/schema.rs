//! Declarative table definitions and idempotent schema creation.
//!
//! # Responsibility
//! - Describe persisted tables as plain values.
//! - Create missing tables on connection setup.
//!
//! # Invariants
//! - `ensure_schema` only issues `CREATE TABLE IF NOT EXISTS`.
//! - Uniqueness of `(artist, album)` is not a table constraint; it is
//!   checked by the album service before insert.

use super::DbResult;
use rusqlite::Connection;

/// One column of a table definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub primary_key: bool,
}

impl ColumnDef {
    const fn new(name: &'static str, sql_type: &'static str) -> Self {
        Self {
            name,
            sql_type,
            primary_key: false,
        }
    }

    const fn primary_key(name: &'static str) -> Self {
        Self {
            name,
            sql_type: "INTEGER",
            primary_key: true,
        }
    }
}

/// Structural definition of a single table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [ColumnDef],
}

impl TableSchema {
    /// Renders the idempotent `CREATE TABLE` statement for this table.
    pub fn create_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|column| {
                if column.primary_key {
                    format!("{} {} PRIMARY KEY", column.name, column.sql_type)
                } else {
                    format!("{} {}", column.name, column.sql_type)
                }
            })
            .collect::<Vec<_>>()
            .join(",\n    ");
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n);",
            self.name, columns
        )
    }
}

/// The `album` table holding every album record.
pub const ALBUM_TABLE: TableSchema = TableSchema {
    name: "album",
    columns: &[
        ColumnDef::primary_key("id"),
        ColumnDef::new("year", "INTEGER"),
        ColumnDef::new("artist", "TEXT"),
        ColumnDef::new("genre", "TEXT"),
        ColumnDef::new("album", "TEXT"),
    ],
};

/// Every table the album store needs.
pub const ALL_TABLES: &[TableSchema] = &[ALBUM_TABLE];

/// Creates all tables in `schemas` that do not exist yet.
pub fn ensure_schema(conn: &Connection, schemas: &[TableSchema]) -> DbResult<()> {
    for schema in schemas {
        conn.execute_batch(&schema.create_sql())?;
    }
    Ok(())
}

/// Returns the names of tables from `schemas` that are absent on `conn`.
pub fn missing_tables(conn: &Connection, schemas: &[TableSchema]) -> DbResult<Vec<&'static str>> {
    let mut stmt = conn.prepare(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
    )?;

    let mut missing = Vec::new();
    for schema in schemas {
        let exists: bool = stmt.query_row([schema.name], |row| row.get(0))?;
        if !exists {
            missing.push(schema.name);
        }
    }
    Ok(missing)
}
