//! luxe-catalog - Storefront catalog search and filtering.
//!
//! This library implements the catalog core of a luxury-goods storefront:
//! substring/prefix matching over an in-memory catalog, typed suggestions and
//! text completions, instant results with brand detection, results-page
//! filtering and sorting, a bounded recent-search history, and a debounced
//! search session. Cart pricing and admin order summaries sit alongside.
//!
//! # Modules
//!
//! - [`catalog`] - Product, category and brand records
//! - [`search`] - Matching, suggestions, instant results, filter/sort
//! - [`session`] - Debounced search-overlay session
//! - [`debounce`] - Cancellable debounce timer
//! - [`history`] - Recent-search history
//! - [`storage`] - Key-value store trait and implementations
//! - [`navigation`] - Route targets
//! - [`cart`] - Cart pricing
//! - [`orders`] - Order listing and daily summaries
//! - [`commands`] - High-level operations used by the CLI
//! - [`config`] - Configuration loading
//! - [`cli`] - Command-line interface definitions

pub mod cart;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod debounce;
pub mod history;
pub mod navigation;
pub mod orders;
pub mod search;
pub mod session;
pub mod storage;
