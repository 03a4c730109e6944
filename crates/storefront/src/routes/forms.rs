//! Form decoding shared by cart and wishlist handlers.
//!
//! Cart forms carry a variable set of option fields, so they are decoded
//! from raw `(name, value)` pairs rather than a fixed struct.

use fakestore_core::{OptionSet, ProductId};
use serde::Deserialize;

use crate::error::AppError;

/// Prefix marking a form field as a product option, e.g. `option.size`.
pub const OPTION_PREFIX: &str = "option.";

/// A decoded add/remove cart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartForm {
    pub product_id: ProductId,
    /// Raw option pairs, unvalidated, prefix stripped.
    pub options: Vec<(String, String)>,
    pub return_to: Option<String>,
}

impl CartForm {
    /// Decode from urlencoded pairs.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if `product_id` is missing or blank.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, AppError> {
        let mut product_id = None;
        let mut options = Vec::new();
        let mut return_to = None;

        for (name, value) in pairs {
            if let Some(option) = name.strip_prefix(OPTION_PREFIX) {
                options.push((option.to_owned(), value));
                continue;
            }
            match name.as_str() {
                "product_id" => product_id = Some(value),
                "return_to" => return_to = Some(value),
                _ => {}
            }
        }

        let product_id = product_id
            .map(|id| id.trim().to_owned())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::BadRequest("product_id is required".to_string()))?;

        Ok(Self {
            product_id: ProductId::new(product_id),
            options,
            return_to,
        })
    }

    /// Options as submitted, blanks dropped, without catalog validation.
    ///
    /// Used to address an existing cart line, which was validated when added.
    #[must_use]
    pub fn raw_options(&self) -> OptionSet {
        self.options
            .iter()
            .map(|(name, value)| (name.trim(), value.trim()))
            .filter(|(_, value)| !value.is_empty())
            .collect()
    }
}

/// Wishlist toggle/remove form.
#[derive(Debug, Clone, Deserialize)]
pub struct WishlistForm {
    pub product_id: String,
    #[serde(default)]
    pub return_to: Option<String>,
}

impl WishlistForm {
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if `product_id` is blank.
    pub fn product_id(&self) -> Result<ProductId, AppError> {
        let id = self.product_id.trim();
        if id.is_empty() {
            return Err(AppError::BadRequest("product_id is required".to_string()));
        }
        Ok(ProductId::new(id))
    }
}

/// Redirect target from a `return_to` field.
///
/// Only local absolute paths are honoured; anything else (including
/// protocol-relative `//host` URLs) falls back to `fallback`.
#[must_use]
pub fn safe_return_to(return_to: Option<&str>, fallback: &str) -> String {
    match return_to.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_owned()
        }
        _ => fallback.to_owned(),
    }
}
