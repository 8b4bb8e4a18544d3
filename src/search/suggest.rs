//! Suggestion ranker for the search overlay.
//!
//! Two independent outputs: typed suggestions (products, then categories,
//! then brands) and plain-text completions.

use serde::Serialize;

use crate::catalog::{ALL, Brand, Catalog, Category, Product};
use crate::search::matcher;

/// Maximum product suggestions in the overlay.
pub const MAX_PRODUCT_SUGGESTIONS: usize = 4;
/// Maximum category suggestions in the overlay.
pub const MAX_CATEGORY_SUGGESTIONS: usize = 2;
/// Maximum brand suggestions in the overlay.
pub const MAX_BRAND_SUGGESTIONS: usize = 2;
/// Maximum text completions.
pub const MAX_COMPLETIONS: usize = 5;

/// A typed suggestion offered in the dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Suggestion {
    Product {
        id: u32,
        name: String,
        image: String,
        price: f64,
    },
    Category {
        id: String,
        name: String,
    },
    Brand {
        id: String,
        name: String,
    },
}

impl Suggestion {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Product { name, .. } | Self::Category { name, .. } | Self::Brand { name, .. } => {
                name
            }
        }
    }
}

impl From<&Product> for Suggestion {
    fn from(product: &Product) -> Self {
        Self::Product {
            id: product.id,
            name: product.name.clone(),
            image: product.image.clone(),
            price: product.price,
        }
    }
}

impl From<&Category> for Suggestion {
    fn from(category: &Category) -> Self {
        Self::Category {
            id: category.id.clone(),
            name: category.name.clone(),
        }
    }
}

impl From<&Brand> for Suggestion {
    fn from(brand: &Brand) -> Self {
        Self::Brand {
            id: brand.id.clone(),
            name: brand.name.clone(),
        }
    }
}

/// Suggestions grouped by kind, each list already capped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Suggestions {
    pub products: Vec<Suggestion>,
    pub categories: Vec<Suggestion>,
    pub brands: Vec<Suggestion>,
}

impl Suggestions {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.categories.is_empty() && self.brands.is_empty()
    }

    /// Flatten into the dropdown order: products first.
    #[must_use]
    pub fn into_list(self) -> Vec<Suggestion> {
        let mut list = self.products;
        list.extend(self.categories);
        list.extend(self.brands);
        list
    }
}

/// Build the overlay suggestions for a raw query.
///
/// Ties keep catalog order; a blank query yields no suggestions.
#[must_use]
pub fn suggestions(catalog: &Catalog, query: &str) -> Suggestions {
    let Some(normalized) = matcher::normalize(query) else {
        return Suggestions::default();
    };

    let products = catalog
        .products()
        .iter()
        .filter(|p| p.matches(&normalized))
        .take(MAX_PRODUCT_SUGGESTIONS)
        .map(Suggestion::from)
        .collect();

    let categories = catalog
        .categories()
        .iter()
        .filter(|c| c.id != ALL && matcher::contains(&c.name, &normalized))
        .take(MAX_CATEGORY_SUGGESTIONS)
        .map(Suggestion::from)
        .collect();

    let brands = catalog
        .brands()
        .iter()
        .filter(|b| matcher::contains(&b.name, &normalized) || matcher::contains(&b.id, &normalized))
        .take(MAX_BRAND_SUGGESTIONS)
        .map(Suggestion::from)
        .collect();

    Suggestions {
        products,
        categories,
        brands,
    }
}

/// "Did you mean" completions for a raw query.
///
/// The pool holds matching category, brand and product names plus the query
/// followed by a space. Entries equal to the query are dropped, duplicates
/// keep their first occurrence, and the rest are ordered prefix matches first,
/// then by ascending length.
#[must_use]
pub fn completions(catalog: &Catalog, query: &str) -> Vec<String> {
    let Some(normalized) = matcher::normalize(query) else {
        return vec![];
    };

    let category_names = catalog
        .categories()
        .iter()
        .filter(|c| c.id != ALL && matcher::contains(&c.name, &normalized))
        .map(|c| c.name.as_str());
    let brand_names = catalog
        .brands()
        .iter()
        .filter(|b| matcher::contains(&b.name, &normalized))
        .map(|b| b.name.as_str());
    let product_names = catalog
        .products()
        .iter()
        .filter(|p| {
            matcher::contains(&p.name, &normalized) || matcher::contains(&p.description, &normalized)
        })
        .map(|p| p.name.as_str());

    let trailing = format!("{normalized} ");
    let mut pool: Vec<String> = Vec::new();
    for candidate in category_names
        .chain(brand_names)
        .chain(product_names)
        .chain(std::iter::once(trailing.as_str()))
    {
        if candidate.trim().to_lowercase() == normalized {
            continue;
        }
        if !pool.iter().any(|existing| existing == candidate) {
            pool.push(candidate.to_string());
        }
    }

    pool.sort_by_key(|candidate| {
        (
            !matcher::starts_with(candidate, &normalized),
            candidate.chars().count(),
        )
    });
    pool.truncate(MAX_COMPLETIONS);
    pool
}
