//! CLI interface for luxe-catalog.
//!
//! Provides command-line argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::orders::DEFAULT_PAGE_SIZE;

/// Command-line interface for luxe-catalog.
#[derive(Parser)]
#[command(name = "luxe")]
#[command(author, version, about = "Storefront catalog search and filtering", long_about = None)]
pub struct Cli {
    /// Catalog JSON file (overrides the configured catalog).
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search the catalog and show the results page.
    Search {
        /// The search query string.
        query: String,

        /// Filter results to this category only.
        #[arg(short, long)]
        category: Option<String>,

        /// Filter results to this brand id only.
        #[arg(short, long)]
        brand: Option<String>,

        /// Price range as "min-max" or "min-".
        #[arg(short, long)]
        price: Option<String>,

        /// Sort order: newest, price-low, price-high or name.
        #[arg(short, long)]
        sort: Option<String>,

        /// Don't record the query in recent searches.
        #[arg(long)]
        no_history: bool,
    },

    /// Show overlay suggestions for a partial query.
    Suggest {
        /// The partial query.
        query: String,
    },

    /// Show instant results for a partial query.
    Instant {
        /// The partial query.
        query: String,

        /// Maximum number of products to show.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Replay input states read from stdin (one per line) through the
    /// debounced search overlay.
    Live {
        /// Submit the final input and record it in recent searches.
        #[arg(long)]
        submit: bool,
    },

    /// Show "did you mean" completions for a partial query.
    Complete {
        /// The partial query.
        query: String,
    },

    /// Browse the shop listing.
    Shop {
        /// Category id (e.g., "handbags").
        #[arg(short, long)]
        category: Option<String>,

        /// Price range as "min-max" or "min-".
        #[arg(short, long)]
        price: Option<String>,

        /// Sort order: newest, price-low, price-high or name.
        #[arg(short, long)]
        sort: Option<String>,
    },

    /// Show recent searches.
    History {
        /// Forget all recent searches.
        #[arg(long)]
        clear: bool,
    },

    /// Price a cart.
    Cart {
        /// Item as ID or ID:QTY; repeatable.
        #[arg(short, long = "item", required = true)]
        items: Vec<String>,

        /// Promo code to apply.
        #[arg(long)]
        promo: Option<String>,
    },

    /// List orders or summarize one day.
    Orders {
        /// JSON file containing an array of orders.
        #[arg(short, long)]
        file: PathBuf,

        /// Only orders with this payment status.
        #[arg(long)]
        status: Option<String>,

        /// Page size.
        #[arg(short, long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: usize,

        /// Number of orders to skip.
        #[arg(short, long, default_value_t = 0)]
        offset: usize,

        /// Summarize this day (YYYY-MM-DD) instead of listing.
        #[arg(short, long)]
        date: Option<String>,
    },
}
