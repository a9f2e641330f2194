//! Album use-case service.
//!
//! # Responsibility
//! - Validate save input, check `(artist, album)` uniqueness and insert.
//! - Answer per-artist listing queries.
//!
//! # Invariants
//! - `save` performs at most one insert and never retries.
//! - The existence check and the insert are separate statements without a
//!   surrounding transaction. Two concurrent saves of the same pair can both
//!   pass the check.

use crate::db::{connect, DbError, StoreLocation};
use crate::model::album::{Album, AlbumId, AlbumValidationError, SaveAlbumRequest};
use crate::repo::album_repo::{AlbumRepository, RepoError, SqliteAlbumRepository};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for album use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Input field missing or malformed.
    Validation(AlbumValidationError),
    /// An album with the same artist and title is already stored.
    AlreadyExists { existing_id: AlbumId },
    /// The store could not be opened or initialized.
    Connection(DbError),
    /// Query or insert failure on an open store.
    Storage(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::AlreadyExists { existing_id } => {
                write!(f, "album already exists with id #{existing_id}")
            }
            Self::Connection(err) => write!(f, "database connection failed: {err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::AlreadyExists { .. } => None,
            Self::Connection(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<AlbumValidationError> for ServiceError {
    fn from(value: AlbumValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Albums of one artist in insertion order, with their total count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistAlbums {
    pub artist: String,
    pub albums: Vec<Album>,
    pub count: u64,
}

impl ArtistAlbums {
    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    /// Album titles in insertion order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.albums.iter().map(|album| album.album.as_str())
    }
}

/// Use-case service for album operations.
pub struct AlbumService<R: AlbumRepository> {
    repo: R,
}

impl<R: AlbumRepository> AlbumService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and stores a new album.
    ///
    /// # Contract
    /// - Missing text fields fail with `ServiceError::Validation`.
    /// - An existing `(artist, album)` pair fails with
    ///   `ServiceError::AlreadyExists` carrying the stored id, regardless of
    ///   `year` and `genre`.
    /// - Returns the stored album with its new id.
    pub fn save(&self, request: SaveAlbumRequest) -> ServiceResult<Album> {
        let new_album = request.validate()?;

        if let Some(existing) = self
            .repo
            .find_by_artist_and_album(&new_album.artist, &new_album.album)?
        {
            debug!(
                "event=album_save module=service status=conflict existing_id={}",
                existing.id
            );
            return Err(ServiceError::AlreadyExists {
                existing_id: existing.id,
            });
        }

        let album = self.repo.insert(&new_album)?;
        info!(
            "event=album_save module=service status=ok album_id={}",
            album.id
        );
        Ok(album)
    }

    /// Lists every album of `artist` in insertion order.
    pub fn albums_by_artist(&self, artist: &str) -> ServiceResult<ArtistAlbums> {
        let albums = self.repo.find_all_by_artist(artist)?;
        let count = if albums.is_empty() {
            0
        } else {
            self.repo.count_by_artist(artist)?
        };
        Ok(ArtistAlbums {
            artist: artist.to_string(),
            albums,
            count,
        })
    }
}

/// Runs `operation` against a service bound to a freshly opened connection.
///
/// The connection is closed when `operation` returns. Open or schema
/// failures surface as `ServiceError::Connection`.
pub fn with_album_service<T>(
    location: &StoreLocation,
    operation: impl FnOnce(&AlbumService<SqliteAlbumRepository<'_>>) -> ServiceResult<T>,
) -> ServiceResult<T> {
    let conn = connect(location).map_err(ServiceError::Connection)?;
    let service = AlbumService::new(SqliteAlbumRepository::new(&conn));
    operation(&service)
}
