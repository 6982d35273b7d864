//! Static product seed.
//!
//! The catalog is never fetched over the network; the only producer is an
//! optional JSON file read once at startup:
//!
//! ```json
//! [{ "id": 1, "title": "Widget", "image": "http://x/a.png", "price": 9.99 }]
//! ```
//!
//! Ids may be numbers or strings.

use std::path::Path;

use kmpapp_catalog::{CatalogError, ImageUri, Price, Product};
use kmpapp_core::ProductId;
use serde::Deserialize;

use crate::error::DesktopError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SeedId {
    Number(u64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct SeedProduct {
    id: SeedId,
    title: String,
    image: String,
    price: f64,
}

impl SeedProduct {
    fn into_product(self) -> Result<Product, CatalogError> {
        let id = match self.id {
            SeedId::Number(n) => ProductId::from(n),
            SeedId::Text(s) => ProductId::new(s)?,
        };
        Ok(Product::new(
            id,
            self.title,
            ImageUri::new(self.image)?,
            Price::from_decimal(self.price)?,
        ))
    }
}

/// Parse a seed document. Blank input is an empty catalog.
pub fn parse_products(json: &str) -> Result<Vec<Product>, DesktopError> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    let raw: Vec<SeedProduct> = serde_json::from_str(json)?;
    let products = raw
        .into_iter()
        .map(SeedProduct::into_product)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(products)
}

pub fn load_products(path: &Path) -> Result<Vec<Product>, DesktopError> {
    let json = std::fs::read_to_string(path).map_err(|source| DesktopError::SeedIo {
        path: path.to_path_buf(),
        source,
    })?;
    let products = parse_products(&json)?;
    tracing::info!(path = %path.display(), products = products.len(), "loaded product seed");
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kmpapp_core::Entity;
    use std::io::Write;

    #[test]
    fn numeric_and_string_ids_are_accepted() {
        let products = parse_products(
            r#"[
                {"id": 1, "title": "Widget", "image": "http://x/a.png", "price": 9.99},
                {"id": "sku-2", "title": "Gadget", "image": "http://x/b.png", "price": 10}
            ]"#,
        )
        .unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id().as_str(), "1");
        assert_eq!(products[0].price().label(), "9.99 USD");
        assert_eq!(products[1].id().as_str(), "sku-2");
        assert_eq!(products[1].price().label(), "10.00 USD");
    }

    #[test]
    fn blank_document_is_an_empty_catalog() {
        assert!(parse_products("").unwrap().is_empty());
        assert!(parse_products("  \n").unwrap().is_empty());
        assert!(parse_products("[]").unwrap().is_empty());
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = parse_products(r#"[{"id": "", "title": "t", "image": "i", "price": 1}]"#).unwrap_err();
        assert!(matches!(err, DesktopError::Catalog(CatalogError::Domain(_))));

        let err = parse_products(r#"[{"id": 1, "title": "t", "image": "i", "price": -1}]"#).unwrap_err();
        assert!(matches!(err, DesktopError::Catalog(CatalogError::Domain(_))));

        let err = parse_products(r#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, DesktopError::SeedFormat(_)));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 7, "title": "Lamp", "image": "http://x/l.png", "price": 24.5}}]"#
        )
        .unwrap();

        let products = load_products(file.path()).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title(), "Lamp");
        assert_eq!(products[0].price().label(), "24.50 USD");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_products(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, DesktopError::SeedIo { .. }));
    }
}
