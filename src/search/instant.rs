//! Instant results shown while the user types.
//!
//! A query that names a brand switches to brand mode: every product of that
//! brand, in catalog order. Otherwise products are ranked in two tiers,
//! prefix matches on name/category/brand before plain substring matches.
//! No other ranking signal is used.

use crate::catalog::{Brand, Catalog, Product};
use crate::search::matcher;

/// Default render limit for the instant-results grid.
pub const DEFAULT_INSTANT_LIMIT: usize = 6;

/// Live results for a query.
#[derive(Debug, Clone, Default)]
pub struct InstantResults<'a> {
    /// The brand recognized by the query, when in brand mode.
    pub brand: Option<&'a Brand>,
    pub products: Vec<&'a Product>,
}

impl InstantResults<'_> {
    #[must_use]
    pub fn is_brand_mode(&self) -> bool {
        self.brand.is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Find the first brand whose name or id contains the normalized query.
#[must_use]
pub fn matched_brand<'a>(catalog: &'a Catalog, normalized: &str) -> Option<&'a Brand> {
    catalog
        .brands()
        .iter()
        .find(|b| matcher::contains(&b.name, normalized) || matcher::contains(&b.id, normalized))
}

/// Compose instant results for a raw query, capped at `limit`.
#[must_use]
pub fn instant_results<'a>(catalog: &'a Catalog, query: &str, limit: usize) -> InstantResults<'a> {
    let Some(normalized) = matcher::normalize(query) else {
        return InstantResults::default();
    };

    if let Some(brand) = matched_brand(catalog, &normalized) {
        let products = catalog
            .products()
            .iter()
            .filter(|p| p.brand.as_deref() == Some(brand.id.as_str()))
            .take(limit)
            .collect();
        return InstantResults {
            brand: Some(brand),
            products,
        };
    }

    let (starts, contains): (Vec<&Product>, Vec<&Product>) = catalog
        .products()
        .iter()
        .filter(|p| p.matches(&normalized))
        .partition(|p| p.starts_with(&normalized));

    let products = starts.into_iter().chain(contains).take(limit).collect();

    InstantResults {
        brand: None,
        products,
    }
}
