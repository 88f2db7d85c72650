//! Shared response envelope types for API handlers.
//!
//! Non-catalog JSON responses use a `{ "data": ... }` envelope. Catalog
//! responses follow the aggregator's `{ "metas": [...] }` shape instead,
//! see [`crate::catalog::CatalogBody`].

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
