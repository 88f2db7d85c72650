//! Cinelang addon server library.
//!
//! Exposes config, state, error handling, the catalog pipeline, and routes
//! so integration tests and the binary entrypoint share them.

pub mod background;
pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
