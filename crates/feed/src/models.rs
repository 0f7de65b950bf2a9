//! Wire shapes of the price feed and the domain types they map to.
//!
//! The feed speaks Spanish field names; nothing outside this crate sees
//! them. Conversion favors graceful degradation: absent numeric fields
//! coerce to zero, which the matrix layer then treats as "unknown".

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// `GET <cadenas>/` row.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainRow {
    pub nombre: String,
}

/// `GET productos` row.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRow {
    pub id: i64,
    pub nombre: String,
}

/// `POST <comparador>/` row.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRow {
    pub etiqueta_producto: String,
    pub supermercado: String,
    #[serde(default)]
    pub precio_normal: Option<Decimal>,
    #[serde(default)]
    pub precio_oferta: Option<Decimal>,
    #[serde(default)]
    pub precio_final: Decimal,
    #[serde(default)]
    pub promo: Option<String>,
}

/// A price observation matched back to domain identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    /// Feed label of the product (matching key, not a catalog id).
    pub product_label: String,
    /// Chain name as reported by the feed.
    pub store_name: String,
    /// Final price after offers; 0 means the feed had no data.
    pub price: Decimal,
    /// Promotion text, when any.
    pub promo: Option<String>,
}

impl From<QuoteRow> for PriceQuote {
    fn from(row: QuoteRow) -> Self {
        Self {
            product_label: row.etiqueta_producto,
            store_name: row.supermercado,
            price: row.precio_final,
            promo: row.promo,
        }
    }
}

/// Date bounds the feed reports data for; used to bound date pickers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct AvailabilityWindow {
    #[serde(default)]
    pub desde: Option<NaiveDate>,
    #[serde(default)]
    pub hasta: Option<NaiveDate>,
}

/// An option list (units, regions or markets) for one product, plus the
/// availability window when the feed reports one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionCatalog {
    pub options: Vec<String>,
    pub available: AvailabilityWindow,
}
