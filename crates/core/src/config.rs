use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub timers: TimerConfig,
    pub limits: LimitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Delays that bound request volume (see the session crate).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Debounce applied to free-text search input, in milliseconds.
    pub search_debounce_ms: u64,
    /// Settle delay before firing a compound price lookup, in milliseconds.
    pub price_settle_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    /// Maximum number of basket lines.
    pub max_basket_items: usize,
    /// Maximum number of products in a trend comparison.
    pub max_compare_products: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed: FeedConfig {
                base_url: "http://localhost:8000/v1".to_string(),
                timeout_secs: 15,
            },
            timers: TimerConfig {
                search_debounce_ms: 350,
                price_settle_ms: 800,
            },
            limits: LimitConfig {
                max_basket_items: 10,
                max_compare_products: 4,
            },
        }
    }
}
