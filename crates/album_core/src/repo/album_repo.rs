//! Album repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide lookup and insert APIs over the `album` table.
//! - Keep SQL details inside core persistence boundary.
//!
//! # Invariants
//! - Listing order is insertion order (`id ASC`).
//! - Read paths reject undecodable rows instead of masking them.
//! - Insert does not check uniqueness; see `AlbumService::save`.

use crate::db::DbError;
use crate::model::album::{Album, NewAlbum};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ALBUM_SELECT_SQL: &str = "SELECT
    id,
    year,
    artist,
    genre,
    album
FROM album";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for album persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted album data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for album lookups and inserts.
pub trait AlbumRepository {
    fn find_by_artist_and_album(&self, artist: &str, album: &str) -> RepoResult<Option<Album>>;
    fn find_all_by_artist(&self, artist: &str) -> RepoResult<Vec<Album>>;
    fn count_by_artist(&self, artist: &str) -> RepoResult<u64>;
    fn insert(&self, album: &NewAlbum) -> RepoResult<Album>;
}

/// SQLite-backed album repository.
pub struct SqliteAlbumRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAlbumRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AlbumRepository for SqliteAlbumRepository<'_> {
    fn find_by_artist_and_album(&self, artist: &str, album: &str) -> RepoResult<Option<Album>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ALBUM_SELECT_SQL}
             WHERE album = ?1 AND artist = ?2
             ORDER BY id ASC
             LIMIT 1;"
        ))?;

        let mut rows = stmt.query(params![album, artist])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_album_row(row)?));
        }

        Ok(None)
    }

    fn find_all_by_artist(&self, artist: &str) -> RepoResult<Vec<Album>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ALBUM_SELECT_SQL}
             WHERE artist = ?1
             ORDER BY id ASC;"
        ))?;

        let mut rows = stmt.query([artist])?;
        let mut albums = Vec::new();
        while let Some(row) = rows.next()? {
            albums.push(parse_album_row(row)?);
        }

        Ok(albums)
    }

    fn count_by_artist(&self, artist: &str) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM album WHERE artist = ?1;",
            [artist],
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative album count `{count}`")))
    }

    fn insert(&self, album: &NewAlbum) -> RepoResult<Album> {
        self.conn.execute(
            "INSERT INTO album (
                year,
                artist,
                genre,
                album
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                album.year,
                album.artist.as_str(),
                album.genre.as_str(),
                album.album.as_str(),
            ],
        )?;

        Ok(album.clone().into_album(self.conn.last_insert_rowid()))
    }
}

fn parse_album_row(row: &Row<'_>) -> RepoResult<Album> {
    let id: i64 = row.get("id")?;

    let year_value: i64 = row.get("year")?;
    let year = i32::try_from(year_value).map_err(|_| {
        RepoError::InvalidData(format!(
            "year `{year_value}` out of range in album.year (id={id})"
        ))
    })?;

    Ok(Album {
        id,
        year,
        artist: row.get("artist")?,
        genre: row.get("genre")?,
        album: row.get("album")?,
    })
}
