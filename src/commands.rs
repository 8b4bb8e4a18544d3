//! Command implementations shared by the CLI and tests.

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::cart::{Cart, Totals};
use crate::catalog::{Catalog, Product};
use crate::config::Config;
use crate::history::RecentSearches;
use crate::navigation::Route;
use crate::orders::{Order, OrderBook, OrderQuery, StatusTotal};
use crate::search::{self, FilterState, Suggestion};
use crate::session::{self, LiveResults, SearchSession};
use crate::storage::local::LocalStore;

/// Loaded configuration and catalog shared by every command.
pub struct Context {
    pub config: Config,
    pub catalog: Catalog,
    store: LocalStore,
}

impl Context {
    /// Load config, then the catalog from `catalog_override`, the configured
    /// path, or the built-in sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the config or catalog cannot be loaded.
    pub fn load(catalog_override: Option<&Path>) -> anyhow::Result<Self> {
        let config = Config::load()?;
        let catalog_path = catalog_override
            .map(Path::to_path_buf)
            .or_else(|| config.catalog_path());

        let catalog = match catalog_path {
            Some(path) => {
                debug!(path = %path.display(), "Loading catalog");
                Catalog::load(&path)?
            }
            None => Catalog::sample()?,
        };

        Ok(Self::new(config, catalog))
    }

    #[must_use]
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let store = LocalStore::new(config.storage_dir());
        Self {
            config,
            catalog,
            store,
        }
    }

    /// Recent searches backed by the configured storage directory.
    #[must_use]
    pub fn history(&self) -> RecentSearches<'_> {
        RecentSearches::load(&self.store, self.config.search.history_cap)
    }

    #[must_use]
    pub fn storage_dir(&self) -> &Path {
        self.store.root()
    }
}

/// A product with display-ready brand name and route.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProductInfo {
    pub id: u32,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub brand: Option<String>,
    pub route: String,
}

impl ProductInfo {
    fn new(catalog: &Catalog, product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            category: product.category.clone(),
            brand: product
                .brand
                .as_deref()
                .map(|id| catalog.brand_name(id).to_string()),
            route: Route::Product(product.id).to_string(),
        }
    }
}

/// Outcome of a submitted search.
#[derive(Debug)]
pub struct SearchOutcome {
    pub route: Route,
    pub results: Vec<ProductInfo>,
}

/// Submit a search: optionally record it, then run the results-page filters.
///
/// Returns `None` for a blank query.
///
/// # Errors
///
/// Returns an error if the history cannot be persisted.
pub fn search(
    ctx: &Context,
    query: &str,
    filters: &FilterState,
    record: bool,
) -> anyhow::Result<Option<SearchOutcome>> {
    if query.trim().is_empty() {
        return Ok(None);
    }

    if record {
        ctx.history().record(query)?;
    }

    let results: Vec<ProductInfo> = search::search_results(&ctx.catalog, query, filters)
        .into_iter()
        .map(|p| ProductInfo::new(&ctx.catalog, p))
        .collect();
    info!(query, results = results.len(), "Search complete");

    Ok(Some(SearchOutcome {
        route: Route::search(query),
        results,
    }))
}

/// Overlay suggestions, products first.
#[must_use]
pub fn suggest(ctx: &Context, query: &str) -> Vec<Suggestion> {
    search::suggestions(&ctx.catalog, query).into_list()
}

/// Text completions for a partial query.
#[must_use]
pub fn complete(ctx: &Context, query: &str) -> Vec<String> {
    search::completions(&ctx.catalog, query)
}

/// Live overlay results, using the configured limit unless overridden.
#[must_use]
pub fn instant(ctx: &Context, query: &str, limit: Option<usize>) -> LiveResults {
    let limit = limit.unwrap_or(ctx.config.search.instant_limit);
    session::live_results(&ctx.catalog, query, limit)
}

/// What a replayed typing session settled on.
#[derive(Debug)]
pub struct LiveOutcome {
    /// Results published after the debounce delay; `None` if the final input
    /// was blank.
    pub results: Option<LiveResults>,
    /// Set when the final input was submitted.
    pub route: Option<Route>,
}

/// Feed successive input states through a debounced search session.
///
/// Only the last non-blank state outlives the debounce delay. With `submit`,
/// the final state is then submitted and recorded in history.
///
/// # Errors
///
/// Returns an error if the history cannot be persisted.
pub async fn live(ctx: &Context, inputs: &[String], submit: bool) -> anyhow::Result<LiveOutcome> {
    let mut session = SearchSession::new(
        Arc::new(ctx.catalog.clone()),
        ctx.config.search.debounce(),
        ctx.config.search.instant_limit,
    );
    let mut results = session.results();

    for input in inputs {
        session.input(input);
    }
    results.borrow_and_update();
    if session.is_searching() {
        results.changed().await?;
    }
    let settled = results.borrow().clone();
    debug!(inputs = inputs.len(), settled = settled.is_some(), "Live session settled");

    let route = match inputs.last() {
        Some(query) if submit => session.submit(query, &mut ctx.history())?,
        _ => None,
    };

    Ok(LiveOutcome {
        results: settled,
        route,
    })
}

/// Shop listing for the given filters.
#[must_use]
pub fn shop(ctx: &Context, filters: &FilterState) -> Vec<ProductInfo> {
    search::shop_listing(&ctx.catalog, filters)
        .into_iter()
        .map(|p| ProductInfo::new(&ctx.catalog, p))
        .collect()
}

/// Show or clear recent searches.
///
/// # Errors
///
/// Returns an error if clearing fails.
pub fn history(ctx: &Context, clear: bool) -> anyhow::Result<Vec<String>> {
    let mut history = ctx.history();
    if clear {
        history.clear()?;
    }
    Ok(history.entries().to_vec())
}

/// Parse a cart item argument of the form `ID` or `ID:QTY`.
///
/// # Errors
///
/// Returns an error if the id or quantity is not a positive integer.
pub fn parse_item(spec: &str) -> anyhow::Result<(u32, u32)> {
    let (id, quantity) = match spec.split_once(':') {
        Some((id, quantity)) => (id, quantity),
        None => (spec, "1"),
    };
    let id = id
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid product id in '{spec}'"))?;
    let quantity = quantity
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid quantity in '{spec}'"))?;
    Ok((id, quantity))
}

/// Price a cart of `(product id, quantity)` pairs.
///
/// # Errors
///
/// Returns an error for unknown products, out-of-range quantities, or a
/// rejected promo code.
pub fn cart(
    ctx: &Context,
    items: &[(u32, u32)],
    promo: Option<&str>,
) -> anyhow::Result<(Cart, Totals)> {
    let mut cart = Cart::new();
    for &(id, quantity) in items {
        let product = ctx
            .catalog
            .product(id)
            .ok_or_else(|| anyhow::anyhow!("Product not found: {id}"))?;
        cart.add(product, quantity)?;
    }
    if let Some(code) = promo {
        cart.apply_promo(code)?;
    }
    let totals = cart.totals();
    Ok((cart, totals))
}

/// Result of the orders command.
#[derive(Debug)]
pub enum OrdersReport {
    Page {
        orders: Vec<Order>,
        count: usize,
    },
    Daily {
        date: NaiveDate,
        orders: Vec<Order>,
        revenue: f64,
        by_status: Vec<StatusTotal>,
    },
}

/// List orders from a file, or summarize one day when `date` is given.
///
/// # Errors
///
/// Returns an error if the order file cannot be loaded.
pub fn orders(
    file: &Path,
    query: &OrderQuery,
    date: Option<NaiveDate>,
) -> anyhow::Result<OrdersReport> {
    let book = OrderBook::load(file)?;

    if let Some(date) = date {
        let summary = book.daily_summary(date);
        return Ok(OrdersReport::Daily {
            date: summary.date,
            orders: summary.orders.into_iter().cloned().collect(),
            revenue: summary.revenue,
            by_status: summary.by_status,
        });
    }

    let page = book.list(query);
    Ok(OrdersReport::Page {
        orders: page.orders.into_iter().cloned().collect(),
        count: page.count,
    })
}
