//! Cache key generators for consistent key naming.
//!
//! Key derivation is a pure function of (namespace, entity id, normalized
//! filters): a read issued for the same logical query must compute the
//! exact key a previous write computed, regardless of how the caller
//! assembled its filters. The application-wide prefix is applied by the
//! low-level store, not here.

use serde_json::Value;
use shopkit_core::{ProductId, TenantId, TransferId, VariantId};
use std::collections::BTreeMap;

/// Filters identifying a cached list query.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListFilter {
    /// No filters; normalizes to the empty string.
    #[default]
    None,
    /// A pre-normalized filter string, used as-is.
    Raw(String),
    /// Structured filters; keys are sorted before serialization so
    /// logically-identical filters produce identical keys.
    Fields(BTreeMap<String, Value>),
}

impl ListFilter {
    /// Single-field filter.
    #[must_use]
    pub fn field(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Fields(BTreeMap::from([(key.into(), value.into())]))
    }

    /// Multi-field filter.
    #[must_use]
    pub fn fields<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Fields(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Stable string form folded into cache keys.
    #[must_use]
    pub fn normalized(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::Raw(raw) => raw.clone(),
            // BTreeMap keeps keys lexicographically sorted; a map of plain
            // strings and numbers cannot fail to serialize.
            Self::Fields(fields) => serde_json::to_string(fields).unwrap_or_default(),
        }
    }
}

impl From<&str> for ListFilter {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

/// Generate a cache key for a product by ID.
#[must_use]
pub fn product(id: &ProductId) -> String {
    format!("product:{}", id)
}

/// Generate a cache key for a tenant's filtered product list.
#[must_use]
pub fn products(tenant: &TenantId, filter: &ListFilter) -> String {
    format!("products:{}:{}", tenant, filter.normalized())
}

/// Generate a cache key for a variant by ID.
#[must_use]
pub fn variant(id: &VariantId) -> String {
    format!("variant:{}", id)
}

/// Generate a cache key for a product's variant list.
#[must_use]
pub fn variants(product_id: &ProductId) -> String {
    format!("variants:{}", product_id)
}

/// Generate a cache key for a tenant's filtered inventory list.
#[must_use]
pub fn inventory(tenant: &TenantId, filter: &ListFilter) -> String {
    format!("inventory:{}:{}", tenant, filter.normalized())
}

/// Generate a cache key for a variant's inventory levels.
#[must_use]
pub fn inventory_levels(variant_id: &VariantId) -> String {
    format!("inventory_levels:{}", variant_id)
}

/// Generate a cache key for a tenant's locations.
#[must_use]
pub fn locations(tenant: &TenantId) -> String {
    format!("locations:{}", tenant)
}

/// Generate a cache key for a transfer by ID.
#[must_use]
pub fn transfer(id: &TransferId) -> String {
    format!("transfer:{}", id)
}

/// Generate a cache key for a tenant's filtered transfer list.
#[must_use]
pub fn transfers(tenant: &TenantId, filter: &ListFilter) -> String {
    format!("transfers:{}:{}", tenant, filter.normalized())
}

/// Product-list filter shapes purged on product mutations.
///
/// List caches keyed by arbitrary filter combinations cannot all be
/// enumerated, so invalidation purges the known common ones; anything else
/// self-heals via TTL expiry.
#[must_use]
pub fn common_product_filters() -> Vec<ListFilter> {
    vec![
        ListFilter::None,
        ListFilter::field("status", "active"),
        ListFilter::field("status", "draft"),
    ]
}

/// Inventory-list filter shapes purged on inventory/location mutations.
#[must_use]
pub fn common_inventory_filters() -> Vec<ListFilter> {
    vec![
        ListFilter::None,
        ListFilter::field("location", "all"),
        ListFilter::field("status", "all"),
    ]
}

/// Transfer-list filter shapes purged on transfer mutations.
#[must_use]
pub fn common_transfer_filters() -> Vec<ListFilter> {
    vec![
        ListFilter::None,
        ListFilter::field("status", "all"),
        ListFilter::field("status", "pending"),
        ListFilter::field("status", "in_transit"),
        ListFilter::field("status", "completed"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_normalization_is_order_independent() {
        let a = ListFilter::fields([("status", "all"), ("location", "x")]);
        let b = ListFilter::fields([("location", "x"), ("status", "all")]);

        assert_eq!(a.normalized(), b.normalized());
        assert_eq!(a.normalized(), r#"{"location":"x","status":"all"}"#);
    }

    #[test]
    fn test_inventory_key_determinism() {
        let tenant = TenantId::new("T1");
        let a = inventory(&tenant, &ListFilter::fields([("status", "all"), ("location", "x")]));
        let b = inventory(&tenant, &ListFilter::fields([("location", "x"), ("status", "all")]));

        assert_eq!(a, b);
        assert_eq!(a, r#"inventory:T1:{"location":"x","status":"all"}"#);
    }

    #[test]
    fn test_raw_filter_used_as_is() {
        let filter = ListFilter::from("status=active");
        assert_eq!(filter.normalized(), "status=active");
    }

    #[test]
    fn test_empty_filter_normalizes_to_empty_string() {
        let tenant = TenantId::new("T1");
        assert_eq!(products(&tenant, &ListFilter::None), "products:T1:");
    }

    #[test]
    fn test_entity_key_shapes() {
        let id = ProductId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(product(&id), "product:550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(variants(&id), "variants:550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn test_common_filter_sets() {
        assert_eq!(common_product_filters().len(), 3);
        assert_eq!(common_inventory_filters().len(), 3);
        assert_eq!(common_transfer_filters().len(), 5);

        let statuses: Vec<String> = common_transfer_filters()
            .iter()
            .map(ListFilter::normalized)
            .collect();
        assert!(statuses.contains(&String::new()));
        assert!(statuses.contains(&r#"{"status":"in_transit"}"#.to_string()));
    }
}
