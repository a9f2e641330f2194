//! Store location parsing.
//!
//! Accepts `sqlite://<path>`, `sqlite:<path>` or a bare file path.

use super::{DbError, DbResult};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Connection string used when nothing else is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://albums.sqlite3";

const SQLITE_URL_PREFIXES: &[&str] = &["sqlite://", "sqlite:"];

/// File-backed SQLite store resolved from a connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocation {
    path: PathBuf,
}

impl StoreLocation {
    /// Creates a location that points directly at a database file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parses a connection string.
    ///
    /// # Errors
    /// - Returns `DbError::InvalidLocation` when no file path remains after
    ///   stripping the scheme.
    pub fn parse(url: &str) -> DbResult<Self> {
        let trimmed = url.trim();
        let path = SQLITE_URL_PREFIXES
            .iter()
            .find_map(|prefix| trimmed.strip_prefix(prefix))
            .unwrap_or(trimmed);

        if path.is_empty() {
            return Err(DbError::InvalidLocation(url.to_string()));
        }

        Ok(Self::from_path(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for StoreLocation {
    fn default() -> Self {
        Self::from_path("albums.sqlite3")
    }
}

impl FromStr for StoreLocation {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for StoreLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "sqlite://{}", self.path.display())
    }
}
