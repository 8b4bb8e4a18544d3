//! Admin order listing and daily summaries over a local order file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default page size for order listings.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order file not found at {0}")]
    NotFound(PathBuf),

    #[error("Failed to read orders: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse orders: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Unknown payment status '{0}' (expected pending, processing, paid or cancelled)")]
    UnknownStatus(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Paid,
    Cancelled,
}

impl PaymentStatus {
    pub const ALL: [Self; 4] = [Self::Pending, Self::Processing, Self::Paid, Self::Cancelled];
}

impl FromStr for PaymentStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "paid" => Ok(Self::Paid),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(OrderError::UnknownStatus(s.to_string())),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: u32,
    pub name: String,
    #[serde(default)]
    pub size: Option<String>,
    pub quantity: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub customer_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub total_amount: f64,
    #[serde(default)]
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Listing parameters.
#[derive(Debug, Clone, Copy)]
pub struct OrderQuery {
    pub status: Option<PaymentStatus>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for OrderQuery {
    fn default() -> Self {
        Self {
            status: None,
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

/// One page of orders, newest first, with the count of all matches.
#[derive(Debug)]
pub struct OrderPage<'a> {
    pub orders: Vec<&'a Order>,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusTotal {
    pub status: PaymentStatus,
    pub count: usize,
    pub amount: f64,
}

/// Orders placed on one UTC day.
#[derive(Debug, Serialize)]
pub struct DailySummary<'a> {
    pub date: NaiveDate,
    pub orders: Vec<&'a Order>,
    pub revenue: f64,
    /// One entry per status with at least one order.
    pub by_status: Vec<StatusTotal>,
}

/// An immutable set of orders.
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    #[must_use]
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    /// Load orders from a JSON array file.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound`, `ReadError` or `ParseError`.
    pub fn load(path: &Path) -> Result<Self, OrderError> {
        if !path.exists() {
            return Err(OrderError::NotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)?;
        Ok(Self::new(serde_json::from_str(&contents)?))
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    #[must_use]
    pub fn list(&self, query: &OrderQuery) -> OrderPage<'_> {
        let mut matching: Vec<&Order> = self
            .orders
            .iter()
            .filter(|o| query.status.is_none_or(|status| o.payment_status == status))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let count = matching.len();
        let orders = matching
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect();

        OrderPage { orders, count }
    }

    #[must_use]
    pub fn daily_summary(&self, date: NaiveDate) -> DailySummary<'_> {
        let mut orders: Vec<&Order> = self
            .orders
            .iter()
            .filter(|o| o.created_at.date_naive() == date)
            .collect();
        orders.sort_by_key(|o| o.created_at);

        let revenue = orders.iter().map(|o| o.total_amount).sum();
        let by_status = PaymentStatus::ALL
            .into_iter()
            .filter_map(|status| {
                let (count, amount) = orders
                    .iter()
                    .filter(|o| o.payment_status == status)
                    .fold((0, 0.0), |(count, amount), o| (count + 1, amount + o.total_amount));
                (count > 0).then_some(StatusTotal {
                    status,
                    count,
                    amount,
                })
            })
            .collect();

        DailySummary {
            date,
            orders,
            revenue,
            by_status,
        }
    }
}
