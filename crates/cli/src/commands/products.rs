use anyhow::{Context, Result};
use clap::Args;
use feria_core::AppConfig;
use feria_feed::ProductQuery;

#[derive(Args)]
pub struct ProductsArgs {
    /// Free-text search term
    #[arg(short, long)]
    pub search: Option<String>,
    /// Dataset to query (e.g. "consumidor", "mayorista")
    #[arg(short, long)]
    pub dataset: Option<String>,
    /// Category id to filter by
    #[arg(long)]
    pub category: Option<String>,
    /// Result page
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Results per page
    #[arg(long, default_value_t = 50)]
    pub page_size: u32,
}

pub async fn run(config: &AppConfig, args: ProductsArgs) -> Result<()> {
    let client = super::feed_client(config)?;
    let products = client
        .products(&ProductQuery {
            dataset: args.dataset,
            category_id: args.category,
            search: args.search,
            page: Some(args.page),
            page_size: Some(args.page_size),
        })
        .await
        .context("could not load the product catalog")?;

    if products.is_empty() {
        println!("No products matched.");
        return Ok(());
    }

    println!("{:<12} NAME", "ID");
    for product in products {
        println!("{:<12} {}", product.id, product.name);
    }
    Ok(())
}
