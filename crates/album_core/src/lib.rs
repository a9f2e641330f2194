//! Core domain logic for the album registry.
//! This crate is the single source of truth for album storage and invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{connect, DbError, DbResult, StoreLocation, DEFAULT_DATABASE_URL};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::album::{
    parse_year, Album, AlbumId, AlbumValidationError, NewAlbum, SaveAlbumRequest,
};
pub use repo::album_repo::{AlbumRepository, RepoError, RepoResult, SqliteAlbumRepository};
pub use service::album_service::{
    with_album_service, AlbumService, ArtistAlbums, ServiceError, ServiceResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
