//! Domain logic for the cinelang catalog addon.
//!
//! This crate has no internal workspace dependencies so it can be shared
//! by the HTTP server, the TMDB client, and the database layer.

pub mod access;
pub mod cache;
pub mod catalog_id;
pub mod error;
pub mod hashing;
pub mod language;
pub mod meta;
pub mod movie;
pub mod source;
pub mod token;
