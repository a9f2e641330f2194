//! Album domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every stored album is identified by a storage-assigned `AlbumId`.
//! - Albums are never updated or deleted by this crate.

pub mod album;
