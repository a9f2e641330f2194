//! Album domain model.
//!
//! # Responsibility
//! - Define the persisted album record and its not-yet-persisted form.
//! - Turn raw save input into a validated `NewAlbum`.
//!
//! # Invariants
//! - `id` is assigned by storage and never reused.
//! - Text fields must be present; empty strings are accepted.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned album identifier.
pub type AlbumId = i64;

/// One album by one artist, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub year: i32,
    pub artist: String,
    pub genre: String,
    /// Album title.
    pub album: String,
}

/// Validated album data without an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAlbum {
    pub year: i32,
    pub artist: String,
    pub genre: String,
    pub album: String,
}

impl NewAlbum {
    pub fn new(
        year: i32,
        artist: impl Into<String>,
        genre: impl Into<String>,
        album: impl Into<String>,
    ) -> Self {
        Self {
            year,
            artist: artist.into(),
            genre: genre.into(),
            album: album.into(),
        }
    }

    /// Attaches the storage-assigned id.
    pub fn into_album(self, id: AlbumId) -> Album {
        Album {
            id,
            year: self.year,
            artist: self.artist,
            genre: self.genre,
            album: self.album,
        }
    }
}

/// Raw input for saving an album.
///
/// Text fields are optional because form submissions may omit them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveAlbumRequest {
    pub year: i32,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub album: Option<String>,
}

impl SaveAlbumRequest {
    /// Builds a request with every field present.
    pub fn new(
        year: i32,
        artist: impl Into<String>,
        genre: impl Into<String>,
        album: impl Into<String>,
    ) -> Self {
        Self {
            year,
            artist: Some(artist.into()),
            genre: Some(genre.into()),
            album: Some(album.into()),
        }
    }

    /// Checks field presence in declaration order and builds a `NewAlbum`.
    pub fn validate(self) -> Result<NewAlbum, AlbumValidationError> {
        let artist = self.artist.ok_or(AlbumValidationError::InvalidArtist)?;
        let genre = self.genre.ok_or(AlbumValidationError::InvalidGenre)?;
        let album = self.album.ok_or(AlbumValidationError::InvalidTitle)?;
        Ok(NewAlbum {
            year: self.year,
            artist,
            genre,
            album,
        })
    }
}

/// Input field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumValidationError {
    InvalidYear,
    InvalidArtist,
    InvalidGenre,
    InvalidTitle,
}

impl AlbumValidationError {
    /// Name of the offending form field.
    pub fn field(self) -> &'static str {
        match self {
            Self::InvalidYear => "year",
            Self::InvalidArtist => "artist",
            Self::InvalidGenre => "genre",
            Self::InvalidTitle => "album",
        }
    }
}

impl Display for AlbumValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidYear => write!(f, "invalid album year"),
            Self::InvalidArtist => write!(f, "invalid artist"),
            Self::InvalidGenre => write!(f, "invalid genre"),
            Self::InvalidTitle => write!(f, "invalid album title"),
        }
    }
}

impl Error for AlbumValidationError {}

/// Parses a submitted year value.
///
/// Surrounding whitespace is ignored; anything else that is not an `i32`
/// is rejected.
pub fn parse_year(value: Option<&str>) -> Result<i32, AlbumValidationError> {
    value
        .map(str::trim)
        .and_then(|value| value.parse::<i32>().ok())
        .ok_or(AlbumValidationError::InvalidYear)
}
