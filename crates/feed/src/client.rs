//! HTTP client for the price feed.
//!
//! Every method returns domain types; wire shapes and their quirks stay in
//! [`crate::models`] and [`crate::coerce`]. Callers own retry policy (there
//! is none here) and stale-response discarding (see the session crate).

use std::time::Duration;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use feria_core::{Product, ProductSeries, SeriesPoint, Store};

use crate::coerce::{coerce_array, decimal_field, option_label};
use crate::models::{AvailabilityWindow, ChainRow, OptionCatalog, PriceQuote, ProductRow, QuoteRow};

#[derive(Debug, Error)]
pub enum FeedError {
    /// Non-2xx answer from the feed.
    #[error("feed returned HTTP {0}")]
    Status(u16),
    /// Connection, timeout or body-read failure.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    /// Payload arrived but could not be understood at all.
    #[error("malformed feed payload: {0}")]
    Decode(String),
}

/// Catalog listing filters; all optional, unset fields are omitted from the
/// query string.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub dataset: Option<String>,
    pub category_id: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Parameters of a per-product series request.
///
/// The feed is always asked for monthly averages; coarser bucketing happens
/// locally in the series crate.
#[derive(Debug, Clone)]
pub struct SeriesQuery {
    pub dataset: Option<String>,
    pub unit: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Client for the price-feed REST API.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: reqwest::Client,
    base_url: String,
}

impl FeedClient {
    /// Creates a client against a base URL (with or without trailing slash).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a client with a request timeout.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value, FeedError> {
        let response = self
            .client
            .get(self.url(path))
            .query(params)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }

    /// Retail chains, ids derived from their names.
    ///
    /// # Errors
    /// Fails on transport errors or a non-2xx status.
    pub async fn chains(&self) -> Result<Vec<Store>, FeedError> {
        let json = self.get_json("cadenas/", &[]).await?;
        let stores = coerce_array(&json, None)
            .iter()
            .filter_map(|row| serde_json::from_value::<ChainRow>(row.clone()).ok())
            .map(|row| Store::from_name(&row.nombre))
            .collect();
        Ok(stores)
    }

    /// Canonical product label list used for price-lookup matching.
    ///
    /// # Errors
    /// Fails on transport errors or a non-2xx status.
    pub async fn labels(&self) -> Result<Vec<String>, FeedError> {
        let json = self.get_json("etiqueta/", &[]).await?;
        Ok(coerce_array(&json, None)
            .iter()
            .filter_map(option_label)
            .collect())
    }

    /// Product catalog, optionally filtered and paginated.
    ///
    /// # Errors
    /// Fails on transport errors or a non-2xx status.
    pub async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, FeedError> {
        let mut params: Vec<(&str, String)> = vec![("ordering", "nombre".to_string())];
        if let Some(dataset) = &query.dataset {
            params.push(("dataset", dataset.clone()));
        }
        if let Some(category) = &query.category_id {
            params.push(("grupo_id", category.clone()));
        }
        if let Some(search) = &query.search {
            params.push(("q", search.clone()));
        }
        if let Some(page) = query.page {
            params.push(("page", page.to_string()));
        }
        if let Some(page_size) = query.page_size {
            params.push(("page_size", page_size.to_string()));
        }

        let json = self.get_json("productos", &params).await?;
        let products = coerce_array(&json, None)
            .iter()
            .filter_map(|row| serde_json::from_value::<ProductRow>(row.clone()).ok())
            .map(|row| Product {
                id: row.id.to_string(),
                name: row.nombre,
                category: None,
            })
            .collect();
        Ok(products)
    }

    /// Compound price lookup: every requested product at every requested
    /// store. Rows that answer with no usable price still come back, with
    /// price 0, so the caller can clear the pair.
    ///
    /// # Errors
    /// Fails on transport errors or a non-2xx status.
    pub async fn lookup_prices(
        &self,
        product_labels: &[String],
        store_names: &[String],
    ) -> Result<Vec<PriceQuote>, FeedError> {
        let body = serde_json::json!({
            "productos": product_labels,
            "supermercados": store_names,
        });
        debug!(
            products = product_labels.len(),
            stores = store_names.len(),
            "requesting price lookup"
        );

        let response = self
            .client
            .post(self.url("comparador/"))
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let json: Value = response.json().await?;
        let quotes = coerce_array(&json, None)
            .iter()
            .filter_map(|row| serde_json::from_value::<QuoteRow>(row.clone()).ok())
            .map(PriceQuote::from)
            .collect();
        Ok(quotes)
    }

    /// Historical monthly-average series for one product.
    ///
    /// Points with an unreadable date are dropped; missing value fields
    /// coerce to 0 rather than failing the whole series.
    ///
    /// # Errors
    /// Fails on transport errors or a non-2xx status.
    pub async fn series(
        &self,
        product: &Product,
        query: &SeriesQuery,
    ) -> Result<ProductSeries, FeedError> {
        let mut params: Vec<(&str, String)> = vec![
            ("unidad", query.unit.clone()),
            ("agg", "month".to_string()),
            ("valor", "promedio".to_string()),
        ];
        if let Some(dataset) = &query.dataset {
            params.push(("dataset", dataset.clone()));
        }
        if let Some(from) = query.from {
            params.push(("desde", from.to_string()));
        }
        if let Some(to) = query.to {
            params.push(("hasta", to.to_string()));
        }

        let path = format!("productos/{}/series", product.id);
        let json = self.get_json(&path, &params).await?;

        let points = coerce_array(&json, Some("points"))
            .iter()
            .filter_map(|row| {
                let raw_date = row.get("fecha").and_then(Value::as_str)?;
                let Ok(date) = raw_date.parse::<NaiveDate>() else {
                    warn!(product = %product.name, raw_date, "dropping point with unreadable date");
                    return None;
                };
                let value: Decimal = decimal_field(row, &["precio", "valor"]);
                Some(SeriesPoint { date, value })
            })
            .collect();

        Ok(ProductSeries {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            unit: query.unit.clone(),
            points,
        })
    }

    /// Units the product is quoted in, plus the availability window.
    ///
    /// # Errors
    /// Fails on transport errors or a non-2xx status.
    pub async fn units(&self, product_id: &str) -> Result<OptionCatalog, FeedError> {
        self.option_catalog(product_id, "unidades").await
    }

    /// Regions with data for the product, plus the availability window.
    ///
    /// # Errors
    /// Fails on transport errors or a non-2xx status.
    pub async fn regions(&self, product_id: &str) -> Result<OptionCatalog, FeedError> {
        self.option_catalog(product_id, "regiones").await
    }

    /// Markets with data for the product, plus the availability window.
    ///
    /// # Errors
    /// Fails on transport errors or a non-2xx status.
    pub async fn markets(&self, product_id: &str) -> Result<OptionCatalog, FeedError> {
        self.option_catalog(product_id, "mercados").await
    }

    async fn option_catalog(&self, product_id: &str, kind: &str) -> Result<OptionCatalog, FeedError> {
        let path = format!("productos/{product_id}/{kind}");
        let json = self.get_json(&path, &[]).await?;

        let options = coerce_array(&json, Some(kind))
            .iter()
            .filter_map(option_label)
            .collect();
        let available: AvailabilityWindow = serde_json::from_value(json).unwrap_or_default();

        Ok(OptionCatalog { options, available })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_regardless_of_slashes() {
        let client = FeedClient::new("http://localhost:8000/v1/");
        assert_eq!(client.url("cadenas/"), "http://localhost:8000/v1/cadenas/");
        assert_eq!(
            client.url("/productos/3/series"),
            "http://localhost:8000/v1/productos/3/series"
        );
    }
}
