use anyhow::{bail, Context, Result};
use clap::Args;
use feria_compare::{sorted_totals, PriceTier, RankThresholds};
use feria_core::AppConfig;
use feria_feed::{catalog_from_labels, find_product, normalize_label};
use feria_session::BasketSession;

#[derive(Args)]
pub struct CompareArgs {
    /// Basket line as "product name" or "product name:quantity" (repeatable)
    #[arg(short, long = "item", required = true)]
    pub items: Vec<String>,
    /// Chain to compare (repeatable); defaults to the first three chains
    #[arg(short = 's', long = "store")]
    pub stores: Vec<String>,
    /// Sort the result from dearest to cheapest instead
    #[arg(long)]
    pub descending: bool,
}

pub async fn run(config: &AppConfig, args: CompareArgs) -> Result<()> {
    let client = super::feed_client(config)?;

    let chains = client
        .chains()
        .await
        .context("could not load retail chains")?;
    let labels = client
        .labels()
        .await
        .context("could not load the product label list")?;

    let mut session = BasketSession::new(config.limits.max_basket_items);
    session.set_catalog(catalog_from_labels(&labels));
    session.set_stores(chains, 3);

    if !args.stores.is_empty() {
        let ids: Vec<String> = session
            .stores()
            .iter()
            .filter(|store| {
                args.stores
                    .iter()
                    .any(|wanted| normalize_label(wanted) == normalize_label(&store.name))
            })
            .map(|store| store.id.clone())
            .collect();
        if ids.is_empty() {
            bail!("none of the requested chains are known to the feed");
        }
        let current: Vec<String> = session.enabled_stores().to_vec();
        for id in current {
            session.toggle_store(&id);
        }
        for id in ids {
            session.toggle_store(&id);
        }
    }

    for raw in &args.items {
        let (name, quantity) = parse_item(raw)?;
        let product_id = {
            let catalog = session.catalog();
            let product = find_product(catalog, name)
                .or_else(|| {
                    let needle = normalize_label(name);
                    catalog
                        .iter()
                        .find(|p| normalize_label(&p.name).contains(&needle))
                })
                .with_context(|| format!("no catalog product matches \"{name}\""))?;
            product.id.clone()
        };
        if !session.add_item(&product_id) {
            bail!("could not add \"{name}\" (duplicate, or basket is full)");
        }
        session.set_quantity(&product_id, quantity);
    }

    let request = session
        .begin_lookup()
        .context("nothing to compare: add items and enable at least one chain")?;
    let quotes = client
        .lookup_prices(&request.product_labels, &request.store_names)
        .await
        .context("price lookup failed; totals left empty")?;
    session.commit_prices(request.generation, &quotes);

    let summary = session.comparison();
    let best = summary.best.as_ref().map(|t| t.total);
    let worst = summary.worst.as_ref().map(|t| t.total);
    let thresholds = RankThresholds::default();

    println!("{:<20} {:>12}  TIER", "CHAIN", "TOTAL");
    for entry in sorted_totals(&summary, !args.descending) {
        let tier = match thresholds.classify(entry.total, best, worst) {
            PriceTier::Best => "best",
            PriceTier::Fair => "fair",
            PriceTier::Worst => "worst",
            PriceTier::None => "-",
        };
        let name = session
            .stores()
            .iter()
            .find(|s| s.id == entry.store_id)
            .map_or(entry.store_id.as_str(), |s| s.name.as_str());
        println!("{name:<20} {:>12}  {tier}", entry.total.round_dp(0));
    }

    if let (Some(best), Some(worst)) = (&summary.best, &summary.worst) {
        if best.store_id != worst.store_id {
            println!(
                "\nBuying at {} saves {} ({:.1}%) over {}.",
                best.store_id,
                summary.savings.round_dp(0),
                summary.savings_percent * 100.0,
                worst.store_id,
            );
        }
    }

    println!("\nPer-product spread (enabled chains with a known price):");
    for item in session.items() {
        match session.price_spread(&item.product_id) {
            Some(spread) => println!(
                "  {:<24} min {} @ {}, max {} @ {}",
                item.name,
                spread.min_price.round_dp(0),
                spread.min_store,
                spread.max_price.round_dp(0),
                spread.max_store,
            ),
            None => println!("  {:<24} no chain has a price yet", item.name),
        }
    }

    Ok(())
}

fn parse_item(raw: &str) -> Result<(&str, u32)> {
    match raw.rsplit_once(':') {
        Some((name, qty)) => {
            let quantity: u32 = qty
                .trim()
                .parse()
                .with_context(|| format!("invalid quantity in \"{raw}\""))?;
            Ok((name.trim(), quantity))
        }
        None => Ok((raw.trim(), 1)),
    }
}
