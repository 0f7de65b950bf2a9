//! Matching feed labels to catalog products and chain names to store ids.

use feria_core::{Product, Store};

/// Lower-cases and collapses whitespace, the comparison key for labels.
#[must_use]
pub fn normalize_label(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Capitalizes a feed label for display.
///
/// Each word gets an upper-case initial except quantity tokens such as
/// `1kg` or `500g`, which stay lowercase.
#[must_use]
pub fn capitalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .map(|word| {
            if is_quantity_token(word) {
                word.to_lowercase()
            } else {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_quantity_token(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_digit())
        && word.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Builds a catalog from the feed's canonical label list.
///
/// Ids are positional (`prod_<n>`), names are capitalized labels, and the
/// category hint is the label's first word.
#[must_use]
pub fn catalog_from_labels(labels: &[String]) -> Vec<Product> {
    labels
        .iter()
        .enumerate()
        .map(|(index, label)| Product {
            id: format!("prod_{index}"),
            name: capitalize_label(label),
            category: label.split_whitespace().next().map(str::to_string),
        })
        .collect()
}

/// Finds the catalog product a feed label refers to.
///
/// Tries exact name equality, then the capitalized form of the label, then
/// a case-insensitive whitespace-normalized comparison.
#[must_use]
pub fn find_product<'a>(catalog: &'a [Product], label: &str) -> Option<&'a Product> {
    if let Some(product) = catalog.iter().find(|p| p.name == label) {
        return Some(product);
    }
    let capitalized = capitalize_label(label);
    if let Some(product) = catalog.iter().find(|p| p.name == capitalized) {
        return Some(product);
    }
    let normalized = normalize_label(label);
    catalog.iter().find(|p| normalize_label(&p.name) == normalized)
}

/// Store id for a chain name reported by the feed.
#[must_use]
pub fn store_id(chain_name: &str) -> String {
    Store::from_name(chain_name).id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_keeps_quantity_tokens_lowercase() {
        assert_eq!(capitalize_label("arroz grado 1kg"), "Arroz Grado 1kg");
        assert_eq!(capitalize_label("LECHE entera 1L"), "Leche Entera 1l");
        assert_eq!(capitalize_label("pan"), "Pan");
    }

    #[test]
    fn catalog_uses_positional_ids_and_category_hints() {
        let catalog = catalog_from_labels(&["arroz grado 1kg".to_string()]);
        assert_eq!(catalog[0].id, "prod_0");
        assert_eq!(catalog[0].name, "Arroz Grado 1kg");
        assert_eq!(catalog[0].category.as_deref(), Some("arroz"));
    }

    #[test]
    fn find_product_falls_back_to_case_insensitive() {
        let catalog = catalog_from_labels(&["arroz grado 1kg".to_string()]);
        assert!(find_product(&catalog, "Arroz Grado 1kg").is_some());
        assert!(find_product(&catalog, "arroz grado 1kg").is_some());
        assert!(find_product(&catalog, "ARROZ  GRADO 1KG").is_some());
        assert!(find_product(&catalog, "fideos").is_none());
    }

    #[test]
    fn store_id_matches_the_core_derivation() {
        assert_eq!(store_id("Santa Isabel"), "santa_isabel");
    }
}
