pub mod chains;
pub mod compare;
pub mod products;
pub mod trends;

pub use compare::CompareArgs;
pub use products::ProductsArgs;
pub use trends::TrendsArgs;

use anyhow::Result;
use feria_core::AppConfig;
use feria_feed::FeedClient;
use std::time::Duration;

/// Builds the feed client from configuration.
pub fn feed_client(config: &AppConfig) -> Result<FeedClient> {
    Ok(FeedClient::with_timeout(
        &config.feed.base_url,
        Duration::from_secs(config.feed.timeout_secs),
    )?)
}
