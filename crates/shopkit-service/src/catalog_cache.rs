//! Domain cache service for catalog entities.
//!
//! Translates entity-shaped cache requests into the low-level store's flat
//! key/value/ttl calls and encodes the invalidation relationships between
//! entities. Every method forwards to the store and inherits its fail-open
//! behavior: nothing here errors or blocks past the store's wait bound.

use crate::cache_keys::{self, ListFilter};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shopkit_cache::{CacheStore, CacheStoreExt};
use shopkit_core::{ProductId, TenantId, TransferId, VariantId};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// TTL for single products and product lists (10 minutes).
pub const PRODUCT_TTL: Duration = Duration::from_secs(600);

/// TTL for single variants and variant lists (10 minutes).
pub const VARIANT_TTL: Duration = Duration::from_secs(600);

/// TTL for inventory lists and levels (5 minutes).
pub const INVENTORY_TTL: Duration = Duration::from_secs(300);

/// TTL for locations (30 minutes; they change rarely).
pub const LOCATIONS_TTL: Duration = Duration::from_secs(1800);

/// TTL for transfers (5 minutes).
pub const TRANSFER_TTL: Duration = Duration::from_secs(300);

/// Generic short TTL for volatile lookups (2 minutes).
pub const SHORT_TTL: Duration = Duration::from_secs(120);

/// Generic long TTL for near-static data (1 hour).
pub const LONG_TTL: Duration = Duration::from_secs(3600);

/// Cache service for catalog entities.
///
/// Records are overwritten wholesale and destroyed either by an
/// `invalidate_*` call on a domain mutation or by TTL expiry in the
/// backing store. Invalidation purges the common list-filter shapes only;
/// lists cached under other filter combinations go stale until their TTL
/// runs out. Coherence is therefore best-effort and TTL-bounded: callers
/// needing stronger guarantees must invalidate after their write commits.
pub struct CatalogCacheService {
    store: Arc<dyn CacheStore>,
}

impl CatalogCacheService {
    /// Creates a new catalog cache service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Whether the underlying store is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.store.is_enabled()
    }

    // =========================================================================
    // Reads and writes
    // =========================================================================

    /// Get a cached product by ID.
    pub async fn get_product<T: DeserializeOwned + Send>(&self, id: &ProductId) -> Option<T> {
        self.store.get(&cache_keys::product(id)).await
    }

    /// Cache a product by ID.
    pub async fn set_product<T: Serialize + Send + Sync>(
        &self,
        id: &ProductId,
        data: &T,
        ttl: Option<Duration>,
    ) -> bool {
        self.store
            .set(&cache_keys::product(id), data, ttl.unwrap_or(PRODUCT_TTL))
            .await
    }

    /// Get a cached product list for a tenant and filter.
    pub async fn get_products<T: DeserializeOwned + Send>(
        &self,
        tenant: &TenantId,
        filter: &ListFilter,
    ) -> Option<T> {
        self.store.get(&cache_keys::products(tenant, filter)).await
    }

    /// Cache a product list for a tenant and filter.
    pub async fn set_products<T: Serialize + Send + Sync>(
        &self,
        tenant: &TenantId,
        filter: &ListFilter,
        data: &T,
        ttl: Option<Duration>,
    ) -> bool {
        self.store
            .set(
                &cache_keys::products(tenant, filter),
                data,
                ttl.unwrap_or(PRODUCT_TTL),
            )
            .await
    }

    /// Get a cached variant by ID.
    pub async fn get_variant<T: DeserializeOwned + Send>(&self, id: &VariantId) -> Option<T> {
        self.store.get(&cache_keys::variant(id)).await
    }

    /// Cache a variant by ID.
    pub async fn set_variant<T: Serialize + Send + Sync>(
        &self,
        id: &VariantId,
        data: &T,
        ttl: Option<Duration>,
    ) -> bool {
        self.store
            .set(&cache_keys::variant(id), data, ttl.unwrap_or(VARIANT_TTL))
            .await
    }

    /// Get a product's cached variant list.
    pub async fn get_variants<T: DeserializeOwned + Send>(
        &self,
        product_id: &ProductId,
    ) -> Option<T> {
        self.store.get(&cache_keys::variants(product_id)).await
    }

    /// Cache a product's variant list.
    pub async fn set_variants<T: Serialize + Send + Sync>(
        &self,
        product_id: &ProductId,
        data: &T,
        ttl: Option<Duration>,
    ) -> bool {
        self.store
            .set(
                &cache_keys::variants(product_id),
                data,
                ttl.unwrap_or(VARIANT_TTL),
            )
            .await
    }

    /// Get a cached inventory list for a tenant and filter.
    pub async fn get_inventory<T: DeserializeOwned + Send>(
        &self,
        tenant: &TenantId,
        filter: &ListFilter,
    ) -> Option<T> {
        self.store.get(&cache_keys::inventory(tenant, filter)).await
    }

    /// Cache an inventory list for a tenant and filter.
    pub async fn set_inventory<T: Serialize + Send + Sync>(
        &self,
        tenant: &TenantId,
        filter: &ListFilter,
        data: &T,
        ttl: Option<Duration>,
    ) -> bool {
        self.store
            .set(
                &cache_keys::inventory(tenant, filter),
                data,
                ttl.unwrap_or(INVENTORY_TTL),
            )
            .await
    }

    /// Get a variant's cached inventory levels.
    pub async fn get_inventory_levels<T: DeserializeOwned + Send>(
        &self,
        variant_id: &VariantId,
    ) -> Option<T> {
        self.store
            .get(&cache_keys::inventory_levels(variant_id))
            .await
    }

    /// Cache a variant's inventory levels.
    pub async fn set_inventory_levels<T: Serialize + Send + Sync>(
        &self,
        variant_id: &VariantId,
        data: &T,
        ttl: Option<Duration>,
    ) -> bool {
        self.store
            .set(
                &cache_keys::inventory_levels(variant_id),
                data,
                ttl.unwrap_or(INVENTORY_TTL),
            )
            .await
    }

    /// Get a tenant's cached locations.
    pub async fn get_locations<T: DeserializeOwned + Send>(&self, tenant: &TenantId) -> Option<T> {
        self.store.get(&cache_keys::locations(tenant)).await
    }

    /// Cache a tenant's locations.
    pub async fn set_locations<T: Serialize + Send + Sync>(
        &self,
        tenant: &TenantId,
        data: &T,
        ttl: Option<Duration>,
    ) -> bool {
        self.store
            .set(
                &cache_keys::locations(tenant),
                data,
                ttl.unwrap_or(LOCATIONS_TTL),
            )
            .await
    }

    /// Get a cached transfer by ID.
    pub async fn get_transfer<T: DeserializeOwned + Send>(&self, id: &TransferId) -> Option<T> {
        self.store.get(&cache_keys::transfer(id)).await
    }

    /// Cache a transfer by ID.
    pub async fn set_transfer<T: Serialize + Send + Sync>(
        &self,
        id: &TransferId,
        data: &T,
        ttl: Option<Duration>,
    ) -> bool {
        self.store
            .set(&cache_keys::transfer(id), data, ttl.unwrap_or(TRANSFER_TTL))
            .await
    }

    /// Get a cached transfer list for a tenant and filter.
    pub async fn get_transfers<T: DeserializeOwned + Send>(
        &self,
        tenant: &TenantId,
        filter: &ListFilter,
    ) -> Option<T> {
        self.store.get(&cache_keys::transfers(tenant, filter)).await
    }

    /// Cache a transfer list for a tenant and filter.
    pub async fn set_transfers<T: Serialize + Send + Sync>(
        &self,
        tenant: &TenantId,
        filter: &ListFilter,
        data: &T,
        ttl: Option<Duration>,
    ) -> bool {
        self.store
            .set(
                &cache_keys::transfers(tenant, filter),
                data,
                ttl.unwrap_or(TRANSFER_TTL),
            )
            .await
    }

    // =========================================================================
    // Invalidation fan-out
    // =========================================================================

    /// Invalidate a product: its entity key, its variants list, and the
    /// tenant's product lists under the common filter shapes.
    ///
    /// Returns the number of keys actually removed.
    pub async fn invalidate_product(&self, tenant: &TenantId, id: &ProductId) -> usize {
        let mut keys = vec![cache_keys::product(id), cache_keys::variants(id)];
        keys.extend(
            cache_keys::common_product_filters()
                .iter()
                .map(|filter| cache_keys::products(tenant, filter)),
        );

        debug!("Invalidating product {} for tenant {}", id, tenant);
        self.delete_all(keys).await
    }

    /// Invalidate a variant and its inventory levels.
    pub async fn invalidate_variant(&self, id: &VariantId) -> usize {
        debug!("Invalidating variant {}", id);
        self.delete_all(vec![
            cache_keys::variant(id),
            cache_keys::inventory_levels(id),
        ])
        .await
    }

    /// Invalidate a tenant's inventory lists under the common filter
    /// shapes, and optionally one variant's inventory levels.
    pub async fn invalidate_inventory(
        &self,
        tenant: &TenantId,
        variant_id: Option<&VariantId>,
    ) -> usize {
        let mut keys = Vec::new();
        if let Some(variant_id) = variant_id {
            keys.push(cache_keys::inventory_levels(variant_id));
        }
        keys.extend(
            cache_keys::common_inventory_filters()
                .iter()
                .map(|filter| cache_keys::inventory(tenant, filter)),
        );

        debug!("Invalidating inventory for tenant {}", tenant);
        self.delete_all(keys).await
    }

    /// Invalidate a tenant's locations and cascade into its inventory
    /// lists: inventory queries join on location, so location changes can
    /// change which inventory rows are visible.
    pub async fn invalidate_locations(&self, tenant: &TenantId) -> usize {
        debug!("Invalidating locations for tenant {}", tenant);

        let (locations_removed, inventory_removed) = tokio::join!(
            self.delete_all(vec![cache_keys::locations(tenant)]),
            self.invalidate_inventory(tenant, None),
        );

        locations_removed + inventory_removed
    }

    /// Invalidate a transfer: its entity key and the tenant's transfer
    /// lists under the common status filters.
    pub async fn invalidate_transfer(&self, tenant: &TenantId, id: &TransferId) -> usize {
        let mut keys = vec![cache_keys::transfer(id)];
        keys.extend(
            cache_keys::common_transfer_filters()
                .iter()
                .map(|filter| cache_keys::transfers(tenant, filter)),
        );

        debug!("Invalidating transfer {} for tenant {}", id, tenant);
        self.delete_all(keys).await
    }

    /// Delete a batch of keys concurrently, bounding total latency to
    /// roughly one store wait bound regardless of fan-out size.
    async fn delete_all(&self, keys: Vec<String>) -> usize {
        let deletes = keys.iter().map(|key| self.store.delete(key));
        let results = futures::future::join_all(deletes).await;

        let removed = results.into_iter().filter(|deleted| *deleted).count();
        debug!("Removed {} of {} targeted cache keys", removed, keys.len());
        removed
    }
}

impl std::fmt::Debug for CatalogCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogCacheService").finish_non_exhaustive()
    }
}
