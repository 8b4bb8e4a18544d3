//! Catalog search: matching, suggestions, instant results and filtering.
//!
//! Everything here is a plain function over a borrowed [`Catalog`]. Callers
//! own any state (current query, filter selections) and recompute on change.
//!
//! [`Catalog`]: crate::catalog::Catalog

pub mod filter;
pub mod instant;
pub mod matcher;
pub mod suggest;

pub use filter::{FilterError, FilterState, PriceRange, SortBy, apply, search_results, shop_listing};
pub use instant::{DEFAULT_INSTANT_LIMIT, InstantResults, instant_results};
pub use suggest::{Suggestion, Suggestions, completions, suggestions};
