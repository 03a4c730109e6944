//! Cache types for catalog responses.

use fakestore_core::{Product, ProductId};

/// Cache key, one per distinct upstream request.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Categories,
    Products { category: Option<String> },
    Product(ProductId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Categories(Vec<String>),
    Products(Vec<Product>),
    Product(Box<Product>),
}
