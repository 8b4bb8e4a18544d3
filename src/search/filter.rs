//! Results-page and shop-page filtering and sorting.
//!
//! Filters are conjunctive and independent of the sort. The full product list
//! is re-scanned on every call; the catalog itself is never reordered.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{ALL, Catalog, Product};
use crate::search::matcher;

/// Errors from parsing filter selections.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid price range '{0}' (expected 'all', 'min-max' or 'min-')")]
    InvalidPriceRange(String),

    #[error("Unknown sort '{0}' (expected newest, price-low, price-high or name)")]
    UnknownSort(String),
}

/// Inclusive price bounds; `max: None` is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl PriceRange {
    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && self.max.is_none_or(|max| price <= max)
    }
}

impl FromStr for PriceRange {
    type Err = FilterError;

    /// Parse `"min-max"` or `"min-"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FilterError::InvalidPriceRange(s.to_string());

        let (min, max) = s.trim().split_once('-').ok_or_else(invalid)?;
        let min: f64 = min.trim().parse().map_err(|_| invalid())?;
        let max = match max.trim() {
            "" => None,
            value => Some(value.parse::<f64>().map_err(|_| invalid())?),
        };

        if min < 0.0 || max.is_some_and(|max| max < min) {
            return Err(invalid());
        }

        Ok(Self { min, max })
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}-{}", self.min, max),
            None => write!(f, "{}-", self.min),
        }
    }
}

/// The single active ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Catalog order. Also accepted as "relevance".
    #[default]
    Newest,
    PriceLow,
    PriceHigh,
    Name,
}

impl FromStr for SortBy {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "newest" | "relevance" => Ok(Self::Newest),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "name" => Ok(Self::Name),
            other => Err(FilterError::UnknownSort(other.to_string())),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Newest => "newest",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Name => "name",
        };
        f.write_str(name)
    }
}

/// Current selections on the results or shop view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub category: String,
    pub brand: String,
    /// `None` means every price.
    pub price_range: Option<PriceRange>,
    pub sort_by: SortBy,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: ALL.to_string(),
            brand: ALL.to_string(),
            price_range: None,
            sort_by: SortBy::default(),
        }
    }
}

impl FilterState {
    /// Build a filter state from raw selections as the UI stores them.
    ///
    /// # Errors
    ///
    /// Returns `FilterError` if the price range or sort cannot be parsed.
    pub fn parse(
        category: Option<&str>,
        brand: Option<&str>,
        price_range: Option<&str>,
        sort_by: Option<&str>,
    ) -> Result<Self, FilterError> {
        let price_range = match price_range.map(str::trim) {
            None | Some(ALL) => None,
            Some(range) => Some(range.parse()?),
        };
        let sort_by = sort_by
            .map(str::parse::<SortBy>)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            category: category.unwrap_or(ALL).to_string(),
            brand: brand.unwrap_or(ALL).to_string(),
            price_range,
            sort_by,
        })
    }

    fn admits(&self, product: &Product) -> bool {
        (self.category.eq_ignore_ascii_case(ALL)
            || product.category.eq_ignore_ascii_case(&self.category))
            && (self.brand.eq_ignore_ascii_case(ALL)
                || product.brand.as_deref() == Some(self.brand.as_str()))
            && self
                .price_range
                .is_none_or(|range| range.contains(product.price))
    }
}

/// Apply filters then the active sort to a product slice.
#[must_use]
pub fn apply<'a>(products: &'a [Product], filters: &FilterState) -> Vec<&'a Product> {
    let mut result: Vec<&Product> = products.iter().filter(|p| filters.admits(p)).collect();

    match filters.sort_by {
        SortBy::Newest => {}
        SortBy::PriceLow => result.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortBy::PriceHigh => result.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortBy::Name => {
            result.sort_by_cached_key(|p| (matcher::collation_key(&p.name), p.name.clone()));
        }
    }

    result
}

/// Shop listing: the full catalog through the filters.
#[must_use]
pub fn shop_listing<'a>(catalog: &'a Catalog, filters: &FilterState) -> Vec<&'a Product> {
    apply(catalog.products(), filters)
}

/// Search results page: products matching the query, then the filters.
///
/// A blank query has no results.
#[must_use]
pub fn search_results<'a>(
    catalog: &'a Catalog,
    query: &str,
    filters: &FilterState,
) -> Vec<&'a Product> {
    let Some(normalized) = matcher::normalize(query) else {
        return vec![];
    };

    apply(catalog.products(), filters)
        .into_iter()
        .filter(|p| p.matches(&normalized))
        .collect()
}
