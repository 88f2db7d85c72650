//! Request handlers.
//!
//! Catalog handlers answer in the aggregator's `{"metas": [...]}` shape and
//! never fail; the others map errors via [`AppError`](crate::error::AppError).

pub mod catalog;
pub mod health;
pub mod manifest;
pub mod refresh;
