use anyhow::{Context, Result};
use feria_core::AppConfig;

pub async fn run(config: &AppConfig) -> Result<()> {
    let client = super::feed_client(config)?;
    let stores = client
        .chains()
        .await
        .context("could not load retail chains")?;

    if stores.is_empty() {
        println!("The feed reported no retail chains.");
        return Ok(());
    }

    println!("{:<20} NAME", "ID");
    for store in stores {
        println!("{:<20} {}", store.id, store.name);
    }
    Ok(())
}
