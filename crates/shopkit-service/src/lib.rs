//! # Shopkit Service
//!
//! Domain cache layer for the catalog: deterministic key derivation,
//! per-namespace TTL policy, and invalidation fan-out over the low-level
//! store in `shopkit-cache`.

pub mod cache_keys;
pub mod catalog_cache;

pub use cache_keys::ListFilter;
pub use catalog_cache::{
    CatalogCacheService, INVENTORY_TTL, LOCATIONS_TTL, LONG_TTL, PRODUCT_TTL, SHORT_TTL,
    TRANSFER_TTL, VARIANT_TTL,
};
