use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::Args;
use feria_core::{AppConfig, ProductSeries};
use feria_feed::{ProductQuery, SeriesQuery};
use feria_series::{
    filter, latest_shares, merge, per_product_change, summarize, to_index, DateWindow, Granularity,
};
use tracing::warn;

#[derive(Args)]
pub struct TrendsArgs {
    /// Product to compare, by catalog search term (repeatable)
    #[arg(short, long = "product", required = true)]
    pub products: Vec<String>,
    /// Dataset to query (e.g. "consumidor", "mayorista")
    #[arg(short, long)]
    pub dataset: Option<String>,
    /// First month of the window, as YYYY-MM
    #[arg(long)]
    pub from: String,
    /// Last month of the window, as YYYY-MM
    #[arg(long)]
    pub to: String,
    /// Bucket periods by year instead of month
    #[arg(long)]
    pub yearly: bool,
    /// Rebase every series to index 100 at the first period
    #[arg(long)]
    pub index: bool,
}

pub async fn run(config: &AppConfig, args: TrendsArgs) -> Result<()> {
    if args.products.len() > config.limits.max_compare_products {
        bail!(
            "at most {} products can be compared at once",
            config.limits.max_compare_products
        );
    }

    // Validate the window before anything is fetched or aggregated.
    let start = month_start(&args.from)
        .with_context(|| format!("\"{}\" is not a YYYY-MM month", args.from))?;
    let end = month_end(&args.to)
        .with_context(|| format!("\"{}\" is not a YYYY-MM month", args.to))?;
    let window = DateWindow::new(start, end)?;

    let client = super::feed_client(config)?;

    let mut series_list: Vec<ProductSeries> = Vec::new();
    for term in &args.products {
        let matches = client
            .products(&ProductQuery {
                dataset: args.dataset.clone(),
                search: Some(term.clone()),
                page_size: Some(10),
                ..ProductQuery::default()
            })
            .await
            .with_context(|| format!("catalog search for \"{term}\" failed"))?;
        let Some(product) = matches.into_iter().next() else {
            bail!("no catalog product matches \"{term}\"");
        };

        let units = client
            .units(&product.id)
            .await
            .with_context(|| format!("could not load units for {}", product.name))?;
        let Some(unit) = units.options.into_iter().next() else {
            warn!(product = %product.name, "no unit reported, series will be empty");
            series_list.push(ProductSeries {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                unit: String::new(),
                points: Vec::new(),
            });
            continue;
        };

        let series = client
            .series(
                &product,
                &SeriesQuery {
                    dataset: args.dataset.clone(),
                    unit,
                    from: Some(window.start()),
                    to: Some(window.end()),
                },
            )
            .await
            .with_context(|| format!("could not load the series for {}", product.name))?;
        series_list.push(series);
    }

    let coverage = filter(&series_list, &window);
    for name in &coverage.excluded {
        println!("NOTE: {name} has no data in the selected window and is not plotted.");
    }
    if coverage.valid.is_empty() {
        println!("No product has data in the selected window.");
        return Ok(());
    }

    let granularity = if args.yearly {
        Granularity::Year
    } else {
        Granularity::Month
    };
    let rows = merge(&series_list, &coverage.valid, granularity);
    let table = if args.index {
        to_index(&rows, &coverage.valid)
    } else {
        rows.clone()
    };

    // KPIs always derive from the price table, not the indexed view.
    let kpis = summarize(&rows, &coverage.valid);
    println!("\nLatest average: {}", kpis.latest_average.round_dp(0));
    println!("Variation:      {:+.1}%", kpis.variation * 100.0);
    println!("Volatility:     {}", kpis.average_volatility.round_dp(0));
    println!(
        "Top mover:      {} ({:+.1}%)",
        kpis.top_mover.name,
        kpis.top_mover.change * 100.0
    );

    println!("\nChange over the window:");
    for change in per_product_change(&rows, &coverage.valid) {
        println!("  {:<24} {:+.2}%", change.name, change.change_percent);
    }

    println!("\nShare of the latest period:");
    for share in latest_shares(&rows, &coverage.valid) {
        println!(
            "  {:<24} {} ({:.1}%)",
            share.name,
            share.value.round_dp(0),
            share.share * 100.0
        );
    }

    println!("\n{:<10} {}", "PERIOD", coverage.valid.join("  "));
    for row in &table {
        let cells: Vec<String> = coverage
            .valid
            .iter()
            .map(|name| {
                row.value(name)
                    .map_or_else(|| "-".to_string(), |v| v.round_dp(1).to_string())
            })
            .collect();
        println!("{:<10} {}", row.period, cells.join("  "));
    }

    Ok(())
}

fn month_start(ym: &str) -> Option<NaiveDate> {
    let (year, month) = ym.split_once('-')?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

fn month_end(ym: &str) -> Option<NaiveDate> {
    let first = month_start(ym)?;
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
    };
    next.pred_opt()
}
