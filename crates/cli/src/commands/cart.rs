//! Cart inspection and editing.
//!
//! Works directly on the storefront's slot files through the same
//! [`CartRegistry`] the server uses.

use std::path::Path;

use fakestore_core::{OptionSet, ProductId, RemoveOutcome, variants};
use fakestore_storefront::carts::CartRegistry;
use fakestore_storefront::catalog::CatalogClient;
use fakestore_storefront::config::CatalogConfig;
use fakestore_storefront::models::VisitorId;
use tracing::info;

/// Log every line of the visitor's cart and its total.
pub fn show(data_dir: &Path, visitor: &VisitorId) {
    let registry = CartRegistry::new(data_dir);
    registry.with_cart_blocking(visitor, |store| {
        let cart = store.cart();
        if cart.is_empty() {
            info!("Cart for {visitor} is empty");
            return;
        }

        info!("Cart for {visitor}:");
        for line in cart.items() {
            let options = if line.options.is_empty() {
                String::new()
            } else {
                format!(" [{}]", line.options.describe())
            };
            info!(
                "  #{} {}{} x{} @ {} = {}",
                line.product_id,
                line.title,
                options,
                line.quantity,
                line.price,
                line.line_total().rounded()
            );
        }
        info!("  {} item(s), total {}", cart.item_count(), store.get_total());
    });
}

/// Fetch `product` from the catalog and add one unit with `options`.
///
/// # Errors
///
/// Returns an error if the catalog is unreachable, the product does not
/// exist, or the options are not offered for it.
pub async fn add(
    data_dir: &Path,
    visitor: &VisitorId,
    product: &str,
    options: &[(String, String)],
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = CatalogClient::new(&CatalogConfig::from_env()?)?;
    let product = catalog.product(&ProductId::new(product.trim())).await?;
    let options = variants::select(
        &product,
        options.iter().map(|(name, value)| (name.as_str(), value.as_str())),
    )?;

    let registry = CartRegistry::new(data_dir);
    let quantity =
        registry.with_cart_blocking(visitor, |store| store.add_to_cart(&product, Some(options)));

    info!("Added {} (now x{quantity})", product.title);
    Ok(())
}

/// Remove one unit of the line `(product, options)`.
pub fn remove(
    data_dir: &Path,
    visitor: &VisitorId,
    product: &str,
    options: &[(String, String)],
) -> RemoveOutcome {
    let product_id = ProductId::new(product.trim());
    let options: OptionSet = options
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();

    let registry = CartRegistry::new(data_dir);
    let outcome = registry.with_cart_blocking(visitor, |store| {
        store.remove_from_cart(&product_id, Some(&options))
    });

    match outcome {
        RemoveOutcome::Decremented(quantity) => info!("Line #{product_id} now x{quantity}"),
        RemoveOutcome::Removed => info!("Line #{product_id} removed"),
        RemoveOutcome::NotFound => info!("No matching line for #{product_id}; cart unchanged"),
    }
    outcome
}

/// Empty the visitor's cart.
pub fn clear(data_dir: &Path, visitor: &VisitorId) {
    let registry = CartRegistry::new(data_dir);
    registry.with_cart_blocking(visitor, |store| store.clear_cart());
    info!("Cart for {visitor} cleared");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::num::NonZeroU32;

    use fakestore_core::{Price, Product};

    use super::*;

    fn seed(data_dir: &Path, visitor: &VisitorId) {
        let ring = Product {
            id: ProductId::from(5),
            title: "Princess ring".to_string(),
            price: Price::from_cents(999),
            description: String::new(),
            category: "jewelery".to_string(),
            image: String::new(),
            rating: None,
        };
        let options = OptionSet::from_iter([("metal", "Gold"), ("size", "7")]);
        CartRegistry::new(data_dir).with_cart_blocking(visitor, |store| {
            store.add_to_cart(&ring, Some(options.clone()));
            store.add_to_cart(&ring, Some(options));
        });
    }

    fn opts(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_remove_matches_options_in_any_order() {
        let dir = tempfile::tempdir().unwrap();
        let visitor = VisitorId::new();
        seed(dir.path(), &visitor);

        let outcome = remove(dir.path(), &visitor, "5", &opts(&[("size", "7"), ("metal", "Gold")]));
        assert_eq!(outcome, RemoveOutcome::Decremented(NonZeroU32::MIN));

        let outcome = remove(dir.path(), &visitor, "5", &opts(&[("size", "8"), ("metal", "Gold")]));
        assert_eq!(outcome, RemoveOutcome::NotFound);
    }

    #[test]
    fn test_clear_persists() {
        let dir = tempfile::tempdir().unwrap();
        let visitor = VisitorId::new();
        seed(dir.path(), &visitor);
        show(dir.path(), &visitor);

        clear(dir.path(), &visitor);

        let empty =
            CartRegistry::new(dir.path()).with_cart_blocking(&visitor, |s| s.cart().is_empty());
        assert!(empty);
    }
}
