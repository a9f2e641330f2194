//! SQLite storage bootstrap and schema setup entry points.
//!
//! # Responsibility
//! - Resolve the configured store location.
//! - Open and configure SQLite connections for album storage.
//! - Create the album table when it is missing.
//!
//! # Invariants
//! - Core code must not read/write album data before `ensure_schema` succeeds.
//! - Schema creation is idempotent; existing tables are never altered.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod location;
mod open;
pub mod schema;

pub use location::{StoreLocation, DEFAULT_DATABASE_URL};
pub use open::{connect, open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    InvalidLocation(String),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::InvalidLocation(url) => write!(f, "invalid database location `{url}`"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::InvalidLocation(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
