//! Request handlers for the album endpoints.
//!
//! # Invariants
//! - Each request opens its own store connection on the blocking pool.
//! - Handlers keep no state between requests.

use std::fmt::Write as _;
use std::sync::Arc;

use album_core::{
    parse_year, with_album_service, AlbumValidationError, ArtistAlbums, SaveAlbumRequest,
    ServiceResult, StoreLocation,
};
use log::info;
use percent_encoding::percent_decode_str;
use serde::Deserialize;
use warp::{http::StatusCode, reject::Rejection, Reply};

use crate::error::{reject_on_error, Error};

/// Form fields accepted by `POST /albums`.
#[derive(Debug, Default, Deserialize)]
pub struct AlbumForm {
    pub year: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub album: Option<String>,
}

impl AlbumForm {
    pub fn into_request(self) -> Result<SaveAlbumRequest, AlbumValidationError> {
        Ok(SaveAlbumRequest {
            year: parse_year(self.year.as_deref())?,
            artist: self.artist,
            genre: self.genre,
            album: self.album,
        })
    }
}

/// `GET /albums/{artist}`
pub async fn list_albums(
    artist: String,
    store: Arc<StoreLocation>,
) -> Result<impl Reply, Rejection> {
    let artist = decode_path_segment(&artist)?;
    let listed = run_blocking(move || {
        with_album_service(&store, |service| service.albums_by_artist(&artist))
    })
    .await?;

    if listed.is_empty() {
        return Err(reject_on_error(Error::NoAlbums {
            artist: listed.artist,
        }));
    }

    Ok(warp::reply::with_status(
        render_listing(&listed),
        StatusCode::OK,
    ))
}

/// `POST /albums`
pub async fn create_album(
    form: AlbumForm,
    store: Arc<StoreLocation>,
) -> Result<impl Reply, Rejection> {
    let request = form.into_request().map_err(reject_on_error)?;
    let album =
        run_blocking(move || with_album_service(&store, |service| service.save(request))).await?;

    info!(
        "event=album_saved module=http status=ok album_id={}",
        album.id
    );
    Ok(warp::reply::with_status(
        format!("album #{} saved", album.id),
        StatusCode::OK,
    ))
}

/// Renders titles one per line followed by the total count.
pub fn render_listing(listed: &ArtistAlbums) -> String {
    let mut body = format!("albums by {}:\n", listed.artist);
    for title in listed.titles() {
        body.push_str(title);
        body.push('\n');
    }
    let _ = write!(body, "album count: {}", listed.count);
    body
}

fn decode_path_segment(segment: &str) -> Result<String, Rejection> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| reject_on_error(AlbumValidationError::InvalidArtist))
}

async fn run_blocking<T, F>(task: F) -> Result<T, Rejection>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(reject_on_error)?
        .map_err(reject_on_error)
}
