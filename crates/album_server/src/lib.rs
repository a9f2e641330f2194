//! HTTP front end for the album registry.
//!
//! # Responsibility
//! - Translate HTTP requests into `album_core` service calls.
//! - Map service outcomes to status codes and plain-text bodies.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;

pub use config::{ConfigError, ServerConfig};
pub use routes::albums as album_routes;
