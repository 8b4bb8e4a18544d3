//! Search-overlay session: debounced live results plus submit and select.
//!
//! The session owns no UI state beyond the pending computation. Live results
//! are published through a watch channel; blank input clears them at once.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::catalog::{Brand, Catalog};
use crate::debounce::Debouncer;
use crate::history::RecentSearches;
use crate::navigation::Route;
use crate::search::{self, Suggestion, matcher};
use crate::storage::StorageError;

/// Everything the overlay renders for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveResults {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
    pub completions: Vec<String>,
    /// Set when the query names a brand.
    pub brand: Option<Brand>,
    pub instant: Vec<Suggestion>,
}

/// Compute live results synchronously.
#[must_use]
pub fn live_results(catalog: &Catalog, query: &str, instant_limit: usize) -> LiveResults {
    let instant = search::instant_results(catalog, query, instant_limit);
    LiveResults {
        query: query.to_string(),
        suggestions: search::suggestions(catalog, query).into_list(),
        completions: search::completions(catalog, query),
        brand: instant.brand.cloned(),
        instant: instant.products.into_iter().map(Suggestion::from).collect(),
    }
}

pub struct SearchSession {
    catalog: Arc<Catalog>,
    instant_limit: usize,
    debouncer: Debouncer<LiveResults>,
}

impl SearchSession {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, delay: Duration, instant_limit: usize) -> Self {
        Self {
            catalog,
            instant_limit,
            debouncer: Debouncer::new(delay),
        }
    }

    /// Receiver for the latest live results. `None` means nothing to show.
    #[must_use]
    pub fn results(&self) -> watch::Receiver<Option<LiveResults>> {
        self.debouncer.subscribe()
    }

    /// True while a keystroke is waiting out the debounce delay.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Handle a change of the input text.
    ///
    /// # Panics
    ///
    /// Panics if called with a non-blank query outside a Tokio runtime.
    pub fn input(&mut self, query: &str) {
        if matcher::normalize(query).is_none() {
            self.debouncer.clear();
            return;
        }

        let catalog = Arc::clone(&self.catalog);
        let limit = self.instant_limit;
        self.debouncer.schedule(query.to_string(), move |query| {
            live_results(&catalog, &query, limit)
        });
    }

    /// Submit the query: record it in history and route to the results page.
    ///
    /// Returns `None` for a blank query.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the history cannot be persisted.
    pub fn submit(
        &mut self,
        query: &str,
        history: &mut RecentSearches<'_>,
    ) -> Result<Option<Route>, StorageError> {
        if query.trim().is_empty() {
            return Ok(None);
        }

        self.debouncer.clear();
        history.record(query)?;
        debug!(query, "Search submitted");
        Ok(Some(Route::search(query)))
    }

    /// Follow a clicked suggestion.
    pub fn select(&mut self, suggestion: &Suggestion) -> Route {
        self.debouncer.clear();
        Route::for_suggestion(suggestion)
    }

    /// Follow a clicked recent search. The overlay closes, so pending and
    /// published live results are cleared rather than kept for the query.
    pub fn select_recent(&mut self, query: &str) -> Route {
        self.debouncer.clear();
        Route::search(query)
    }
}
