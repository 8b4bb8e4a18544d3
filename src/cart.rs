//! Shopping cart pricing.

use serde::Serialize;
use thiserror::Error;

use crate::catalog::Product;

pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 10;

/// Orders above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD: f64 = 200.0;
pub const SHIPPING_FEE: f64 = 25.0;

const PROMO_CODE: &str = "LUXE10";
const PROMO_RATE: f64 = 0.10;

#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    #[error("Quantity {0} out of range ({MIN_QUANTITY}-{MAX_QUANTITY})")]
    QuantityOutOfRange(u32),

    #[error("Product {0} is not in the cart")]
    NotInCart(u32),

    #[error("Please enter a promo code")]
    EmptyPromo,

    #[error("Invalid promo code: {0}")]
    InvalidPromo(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub product_id: u32,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl CartLine {
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Price breakdown for the current cart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub subtotal: f64,
    pub shipping: f64,
    pub discount: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    promo_applied: bool,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` of a product, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::QuantityOutOfRange` if the resulting quantity would
    /// leave the allowed range.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            let merged = line.quantity.saturating_add(quantity);
            check_quantity(merged)?;
            line.quantity = merged;
            return Ok(());
        }

        check_quantity(quantity)?;
        self.lines.push(CartLine {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity,
        });
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `CartError::QuantityOutOfRange` or `CartError::NotInCart`.
    pub fn set_quantity(&mut self, product_id: u32, quantity: u32) -> Result<(), CartError> {
        check_quantity(quantity)?;
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        line.quantity = quantity;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `CartError::NotInCart` if the product has no line.
    pub fn remove(&mut self, product_id: u32) -> Result<(), CartError> {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        if self.lines.len() == before {
            return Err(CartError::NotInCart(product_id));
        }
        Ok(())
    }

    /// Apply a promo code (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `CartError::EmptyPromo` for a blank code and
    /// `CartError::InvalidPromo` for an unknown one. A rejected code removes
    /// any previously applied discount.
    pub fn apply_promo(&mut self, code: &str) -> Result<(), CartError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(CartError::EmptyPromo);
        }
        if code.eq_ignore_ascii_case(PROMO_CODE) {
            self.promo_applied = true;
            Ok(())
        } else {
            self.promo_applied = false;
            Err(CartError::InvalidPromo(code.to_string()))
        }
    }

    #[must_use]
    pub fn totals(&self) -> Totals {
        let subtotal: f64 = self.lines.iter().map(CartLine::line_total).sum();
        let shipping = if self.lines.is_empty() || subtotal > FREE_SHIPPING_THRESHOLD {
            0.0
        } else {
            SHIPPING_FEE
        };
        let discount = if self.promo_applied {
            (subtotal * PROMO_RATE).round()
        } else {
            0.0
        };

        Totals {
            subtotal,
            shipping,
            discount,
            total: subtotal + shipping - discount,
        }
    }
}

fn check_quantity(quantity: u32) -> Result<(), CartError> {
    if (MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
        Ok(())
    } else {
        Err(CartError::QuantityOutOfRange(quantity))
    }
}
