//! Catalog products as returned by the upstream store API.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product record. Read-only from the shop's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Absolute image URL.
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

/// Aggregate customer rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

impl Product {
    /// Case-insensitive check against the product's category label.
    #[must_use]
    pub fn in_category(&self, needle: &str) -> bool {
        self.category.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Case-insensitive check against the product's title.
    #[must_use]
    pub fn title_mentions(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(&needle.to_lowercase())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const UPSTREAM_PRODUCT: &str = r#"{
        "id": 1,
        "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
        "price": 109.95,
        "description": "Your perfect pack for everyday use and walks in the forest.",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
        "rating": { "rate": 3.9, "count": 120 }
    }"#;

    #[test]
    fn test_parse_upstream_product() {
        let product: Product = serde_json::from_str(UPSTREAM_PRODUCT).unwrap();
        assert_eq!(product.id, ProductId::from(1));
        assert_eq!(product.price.to_fixed(), "109.95");
        assert_eq!(product.rating.unwrap().count, 120);
        assert!(product.in_category("Clothing"));
        assert!(product.title_mentions("backpack"));
    }

    #[test]
    fn test_missing_optional_fields() {
        let product: Product =
            serde_json::from_str(r#"{"id": "x1", "title": "Mug", "price": 4}"#).unwrap();
        assert_eq!(product.category, "");
        assert!(product.rating.is_none());
    }
}
