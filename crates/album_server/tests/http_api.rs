use std::sync::Arc;

use album_core::StoreLocation;
use album_server::album_routes;
use tempfile::TempDir;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;

struct TestStore {
    _dir: TempDir,
    location: Arc<StoreLocation>,
}

fn test_store() -> TestStore {
    let dir = tempfile::tempdir().unwrap();
    let location = Arc::new(StoreLocation::from_path(dir.path().join("albums.sqlite3")));
    TestStore {
        _dir: dir,
        location,
    }
}

async fn post_album(store: &TestStore, body: &str) -> (StatusCode, String) {
    let res = warp::test::request()
        .method("POST")
        .path("/albums")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(body.to_string())
        .reply(&album_routes(Arc::clone(&store.location)))
        .await;
    split(res)
}

async fn get_path(store: &TestStore, path: &str) -> (StatusCode, String) {
    let res = warp::test::request()
        .method("GET")
        .path(path)
        .reply(&album_routes(Arc::clone(&store.location)))
        .await;
    split(res)
}

fn split(res: warp::http::Response<Bytes>) -> (StatusCode, String) {
    let status = res.status();
    let body = String::from_utf8(res.body().to_vec()).unwrap();
    (status, body)
}

fn album_id_in(body: &str) -> i64 {
    body.split('#')
        .nth(1)
        .and_then(|rest| {
            rest.split(|c: char| !c.is_ascii_digit())
                .next()
                .filter(|digits| !digits.is_empty())
        })
        .and_then(|digits| digits.parse().ok())
        .unwrap_or_else(|| panic!("no album id in `{body}`"))
}

#[tokio::test]
async fn create_duplicate_and_list_scenario() {
    let store = test_store();

    let (status, body) =
        post_album(&store, "year=2009&artist=Rihanna&genre=pop&album=Rated+R").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let id = album_id_in(&body);

    let (status, body) =
        post_album(&store, "year=2009&artist=Rihanna&genre=pop&album=Rated+R").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("already exists"), "{body}");
    assert_eq!(album_id_in(&body), id);

    let (status, body) = get_path(&store, "/albums/Rihanna").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Rated R"), "{body}");
    assert!(body.contains("count: 1"), "{body}");
}

#[tokio::test]
async fn non_integer_year_is_bad_request() {
    let store = test_store();

    for body in [
        "year=not-a-number&artist=X&genre=Y&album=Z",
        "year=&artist=X&genre=Y&album=Z",
        "artist=X&genre=Y&album=Z",
    ] {
        let (status, text) = post_album(&store, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(text, "invalid album year");
    }

    let (status, _) = get_path(&store, "/albums/X").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_text_field_is_bad_request_naming_the_field() {
    let store = test_store();

    let (status, body) = post_album(&store, "year=1975&artist=Queen&album=Jazz").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "invalid genre");
}

#[tokio::test]
async fn unknown_artist_is_not_found() {
    let store = test_store();

    let (status, body) = get_path(&store, "/albums/Queen").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "no albums found for Queen");
}

#[tokio::test]
async fn listing_has_every_title_and_the_count() {
    let store = test_store();

    for (year, title) in [(1975, "A Night at the Opera"), (1977, "News of the World"), (1980, "The Game")] {
        let (status, _) = post_album(
            &store,
            &format!("year={year}&artist=Queen&genre=rock&album={}", title.replace(' ', "+")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    post_album(&store, "year=2009&artist=Rihanna&genre=pop&album=Rated+R").await;

    let (status, first) = get_path(&store, "/albums/Queen").await;
    assert_eq!(status, StatusCode::OK);
    let lines: Vec<_> = first.lines().collect();
    assert_eq!(
        lines,
        vec![
            "albums by Queen:",
            "A Night at the Opera",
            "News of the World",
            "The Game",
            "album count: 3",
        ]
    );
    assert!(!first.contains("Rated R"));

    let (_, second) = get_path(&store, "/albums/Queen").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn artist_path_segment_is_percent_decoded() {
    let store = test_store();

    let (status, _) = post_album(
        &store,
        "year=1969&artist=The+Beatles&genre=rock&album=Abbey+Road",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_path(&store, "/albums/The%20Beatles").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("albums by The Beatles:"), "{body}");
    assert!(body.contains("Abbey Road"));
}

#[tokio::test]
async fn unknown_route_and_wrong_method() {
    let store = test_store();

    let (status, _) = get_path(&store, "/artists").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let res = warp::test::request()
        .method("DELETE")
        .path("/albums")
        .reply(&album_routes(Arc::clone(&store.location)))
        .await;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn unusable_store_is_internal_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let location = Arc::new(StoreLocation::from_path(
        dir.path().join("missing").join("albums.sqlite3"),
    ));

    let res = warp::test::request()
        .method("GET")
        .path("/albums/Queen")
        .reply(&album_routes(location))
        .await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body().as_ref(), b"internal server error");
}
