//! Catalog store: products, categories and brands.
//!
//! The catalog is loaded once and never mutated. Every search, suggestion and
//! filter operation borrows it and returns references into it.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::search::matcher;

/// Identifier of the sentinel category that disables category filtering.
pub const ALL: &str = "all";

const SAMPLE_CATALOG: &str = include_str!("../../data/catalog.json");

/// Errors that can occur when loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog not found at {0}")]
    NotFound(PathBuf),

    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate product id: {0}")]
    DuplicateId(u32),

    #[error("Product {id} has an invalid price: {price}")]
    InvalidPrice { id: u32, price: f64 },
}

/// A product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique within the catalog.
    pub id: u32,
    pub name: String,
    pub price: f64,
    /// Category id (e.g., "handbags").
    pub category: String,
    /// Brand id, if the product belongs to one.
    #[serde(default)]
    pub brand: Option<String>,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub dimensions: String,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub made_in: String,
}

impl Product {
    /// True if the normalized query is a substring of the name, brand,
    /// category or description.
    #[must_use]
    pub fn matches(&self, normalized: &str) -> bool {
        matcher::contains(&self.name, normalized)
            || self
                .brand
                .as_deref()
                .is_some_and(|brand| matcher::contains(brand, normalized))
            || matcher::contains(&self.category, normalized)
            || matcher::contains(&self.description, normalized)
    }

    /// True if the name, category or brand starts with the normalized query.
    #[must_use]
    pub fn starts_with(&self, normalized: &str) -> bool {
        matcher::starts_with(&self.name, normalized)
            || matcher::starts_with(&self.category, normalized)
            || self
                .brand
                .as_deref()
                .is_some_and(|brand| matcher::starts_with(brand, normalized))
    }
}

/// A category reference entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A brand reference entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    pub name: String,
}

/// The static catalog: three read-only ordered collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    brands: Vec<Brand>,
}

impl Catalog {
    /// Build a catalog from its parts, checking product invariants.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two products share an id.
    /// Returns `CatalogError::InvalidPrice` for negative or non-finite prices.
    pub fn new(
        products: Vec<Product>,
        categories: Vec<Category>,
        brands: Vec<Brand>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            products,
            categories,
            brands,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file with `products`, `categories` and
    /// `brands` arrays.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the file doesn't exist.
    /// Returns `CatalogError::ReadError` if the file cannot be read.
    /// Returns `CatalogError::ParseError` if the JSON is invalid.
    /// Returns a validation error if product invariants don't hold.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse and validate a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` or a validation error.
    pub fn from_json(contents: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(contents)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// The built-in twelve-product sample catalog.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded data is corrupt.
    pub fn sample() -> Result<Self, CatalogError> {
        Self::from_json(SAMPLE_CATALOG)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::with_capacity(self.products.len());
        for product in &self.products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if !product.price.is_finite() || product.price < 0.0 {
                return Err(CatalogError::InvalidPrice {
                    id: product.id,
                    price: product.price,
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    #[must_use]
    pub fn product(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Display name for a brand id, falling back to the id itself.
    #[must_use]
    pub fn brand_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.brands
            .iter()
            .find(|b| b.id == id)
            .map_or(id, |b| b.name.as_str())
    }
}
