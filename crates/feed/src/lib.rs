//! Price-feed consumption layer.
//!
//! Wraps the REST feed behind typed async calls and keeps all of its wire
//! quirks out of the computational crates:
//!
//! - [`client`]: the reqwest-based [`FeedClient`]
//! - [`models`]: wire rows and the domain types they convert into
//! - [`coerce`]: array-vs-wrapped-object and numeric-field coercion
//! - [`matching`]: feed label to catalog product and chain to store id
//!
//! The engine crates never see JSON; they receive `Store`, `Product`,
//! `PriceQuote` and `ProductSeries` values built here.

pub mod client;
pub mod coerce;
pub mod matching;
pub mod models;

pub use client::{FeedClient, FeedError, ProductQuery, SeriesQuery};
pub use matching::{capitalize_label, catalog_from_labels, find_product, normalize_label, store_id};
pub use models::{AvailabilityWindow, OptionCatalog, PriceQuote};
