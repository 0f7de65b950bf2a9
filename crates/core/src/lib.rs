pub mod config;
pub mod config_loader;
pub mod types;

pub use config::{AppConfig, FeedConfig, LimitConfig, TimerConfig};
pub use config_loader::ConfigLoader;
pub use types::{BasketItem, Product, ProductSeries, SeriesPoint, Store, MAX_QUANTITY, MIN_QUANTITY};
