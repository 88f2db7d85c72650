mod catalog_cache;

pub use catalog_cache::{CatalogCacheRepo, CatalogCacheRow, PgCatalogCache};
