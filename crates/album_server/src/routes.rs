//! Route table for the album service.

use std::sync::Arc;

use album_core::StoreLocation;
use warp::{filters::BoxedFilter, Filter, Reply};

use crate::{error::handle_rejection, handlers};

/// Upper bound for form submissions.
const FORM_BODY_LIMIT_BYTES: u64 = 16 * 1024;

/// Builds all album routes, recovered into plain-text error responses.
///
/// | Method | Path               |
/// |--------|--------------------|
/// | GET    | `/albums/{artist}` |
/// | POST   | `/albums`          |
pub fn albums(store: Arc<StoreLocation>) -> BoxedFilter<(impl Reply,)> {
    let store = warp::any().map(move || Arc::clone(&store));

    log::info!("Creating album routes");

    let albums_path = warp::path("albums");

    // Path before method, so unknown paths reject as not found
    // instead of method not allowed.
    let albums_list = albums_path
        .and(warp::get())
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(store.clone())
        .and_then(handlers::list_albums);

    let albums_create = albums_path
        .and(warp::post())
        .and(warp::path::end())
        .and(warp::body::content_length_limit(FORM_BODY_LIMIT_BYTES))
        .and(warp::body::form::<handlers::AlbumForm>())
        .and(store)
        .and_then(handlers::create_album);

    albums_list
        .or(albums_create)
        .recover(handle_rejection)
        .with(warp::log("album_server::http"))
        .boxed()
}
