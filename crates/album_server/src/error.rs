//! HTTP error taxonomy and rejection recovery.

use std::convert::Infallible;

use album_core::{AlbumValidationError, ServiceError};
use log::{error, warn};
use thiserror::Error;
use warp::{
    body::BodyDeserializeError,
    http::StatusCode,
    reject::{self, LengthRequired, MethodNotAllowed, PayloadTooLarge, Reject, Rejection},
    Reply,
};

const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

#[derive(Error, Debug)]
pub enum Error {
    #[error("no albums found for {artist}")]
    NoAlbums { artist: String },

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    TaskScheduling(#[from] tokio::task::JoinError),
}

impl From<AlbumValidationError> for Error {
    fn from(err: AlbumValidationError) -> Self {
        Self::Service(ServiceError::Validation(err))
    }
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NoAlbums { .. } => StatusCode::NOT_FOUND,
            Self::Service(err) => match err {
                ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
                ServiceError::AlreadyExists { .. } => StatusCode::CONFLICT,
                ServiceError::Connection(_) | ServiceError::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::TaskScheduling(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Response body text; server-side failures are not detailed to clients.
    fn response_message(&self) -> String {
        if self.status_code().is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl Reject for Error {}

pub fn reject_on_error(err: impl Into<Error>) -> Rejection {
    reject::custom(err.into())
}

fn status_code_to_string(code: StatusCode) -> String {
    code.canonical_reason()
        .unwrap_or_else(|| code.as_str())
        .to_string()
}

/// Turns every rejection into a plain-text response.
#[allow(clippy::unused_async)] // async needed for warp filter
pub async fn handle_rejection(reject: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if reject.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = status_code_to_string(code);
    } else if let Some(err) = reject.find::<Error>() {
        code = err.status_code();
        if code.is_server_error() {
            error!(
                "event=request_failed module=http status=error code={} error={}",
                code.as_u16(),
                err
            );
        }
        message = err.response_message();
    } else if let Some(err) = reject.find::<BodyDeserializeError>() {
        warn!("event=request_rejected module=http status=bad_request error={err}");
        code = StatusCode::BAD_REQUEST;
        message = "invalid form data".to_string();
    } else if reject.find::<PayloadTooLarge>().is_some() {
        code = StatusCode::PAYLOAD_TOO_LARGE;
        message = status_code_to_string(code);
    } else if reject.find::<LengthRequired>().is_some() {
        code = StatusCode::LENGTH_REQUIRED;
        message = status_code_to_string(code);
    } else if reject.find::<MethodNotAllowed>().is_some() {
        // Least priority: most combined rejections carry a MethodNotAllowed.
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = status_code_to_string(code);
    } else {
        error!("Unhandled rejection {reject:?}");
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = INTERNAL_ERROR_MESSAGE.to_string();
    }

    Ok(warp::reply::with_status(message, code))
}
