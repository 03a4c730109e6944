//! Catalog queries against the configured Fake Store API.

use fakestore_core::{ProductId, variants};
use fakestore_storefront::catalog::CatalogClient;
use fakestore_storefront::config::CatalogConfig;
use tracing::info;

fn client() -> Result<CatalogClient, Box<dyn std::error::Error>> {
    Ok(CatalogClient::new(&CatalogConfig::from_env()?)?)
}

/// List category names.
///
/// # Errors
///
/// Returns an error if the catalog request fails.
pub async fn categories() -> Result<(), Box<dyn std::error::Error>> {
    for category in client()?.categories().await? {
        info!("{category}");
    }
    Ok(())
}

/// List products, optionally filtered by category.
///
/// # Errors
///
/// Returns an error if the catalog request fails.
pub async fn products(category: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let products = client()?.products(category).await?;
    for product in &products {
        info!("#{} {}  {}", product.id, product.price, product.title);
    }
    info!("{} product(s)", products.len());
    Ok(())
}

/// Show one product with the options it can be added with.
///
/// # Errors
///
/// Returns an error if the product does not exist or the request fails.
pub async fn product(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let product = client()?.product(&ProductId::new(id.trim())).await?;

    info!("#{} {}", product.id, product.title);
    info!("  Price:    {}", product.price);
    info!("  Category: {}", product.category);
    if let Some(rating) = product.rating {
        info!("  Rating:   {:.1} ({} reviews)", rating.rate, rating.count);
    }
    for group in variants::groups_for(&product) {
        let values: Vec<_> = group.choices.iter().map(|c| c.value).collect();
        info!("  Option {}: {}", group.name, values.join(", "));
    }
    Ok(())
}
