//! Display data for templates.
//!
//! Views are owned and preformatted (prices as `$12.34` strings) so the
//! templates stay free of logic.

use fakestore_core::variants::OptionGroup;
use fakestore_core::{LineItem, OptionSet, Product, Wishlist, variants};
use tower_sessions::Session;

use crate::error::Result;
use crate::models::session::{load_wishlist, take_flash};
use crate::models::{Flash, VisitorId};
use crate::state::AppState;

/// Header counts and the pending flash, shown on every page.
#[derive(Clone)]
pub struct Layout {
    pub cart_count: u32,
    pub wishlist_count: usize,
    pub flash: Option<Flash>,
}

impl Layout {
    /// Gather header data for `visitor`, consuming the pending flash.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store or the cart task fails.
    pub async fn load(state: &AppState, visitor: &VisitorId, session: &Session) -> Result<Self> {
        let flash = take_flash(session).await?;
        let wishlist_count = load_wishlist(session).await?.len();
        let cart_count = state
            .carts()
            .with_cart(visitor, |store| store.cart().item_count())
            .await?;

        Ok(Self {
            cart_count,
            wishlist_count,
            flash,
        })
    }
}

/// Product summary for grids.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub rating: Option<String>,
    pub in_wishlist: bool,
    /// Products with option groups must be configured on the detail page.
    pub has_options: bool,
}

impl ProductCardView {
    #[must_use]
    pub fn new(product: &Product, wishlist: &Wishlist) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
            category: product.category.clone(),
            rating: product
                .rating
                .map(|r| format!("{:.1} ({} reviews)", r.rate, r.count)),
            in_wishlist: wishlist.contains(&product.id),
            has_options: !variants::groups_for(product).is_empty(),
        }
    }

    #[must_use]
    pub fn list(products: &[Product], wishlist: &Wishlist) -> Vec<Self> {
        products.iter().map(|p| Self::new(p, wishlist)).collect()
    }
}

/// Category filter link.
#[derive(Clone)]
pub struct CategoryLink {
    pub name: String,
    pub href: String,
    pub active: bool,
}

impl CategoryLink {
    /// Links to `base_path?category=<name>` for each category, plus an
    /// "All" link back to `base_path`.
    #[must_use]
    pub fn list(categories: &[String], selected: Option<&str>, base_path: &str) -> Vec<Self> {
        let all = Self {
            name: "All".to_string(),
            href: base_path.to_string(),
            active: selected.is_none(),
        };
        std::iter::once(all)
            .chain(categories.iter().map(|name| Self {
                name: name.clone(),
                href: format!(
                    "{base_path}?category={}",
                    url::form_urlencoded::byte_serialize(name.as_bytes()).collect::<String>()
                ),
                active: selected == Some(name.as_str()),
            }))
            .collect()
    }
}

/// One `<option>` in a select.
#[derive(Clone)]
pub struct ChoiceView {
    pub value: String,
    pub label: String,
}

/// One option `<select>`, posted as `option.<name>`.
#[derive(Clone)]
pub struct OptionGroupView {
    pub field: String,
    pub label: String,
    pub choices: Vec<ChoiceView>,
}

impl From<&OptionGroup> for OptionGroupView {
    fn from(group: &OptionGroup) -> Self {
        Self {
            field: format!("{}{}", super::forms::OPTION_PREFIX, group.name),
            label: group.label.to_string(),
            choices: group
                .choices
                .iter()
                .map(|c| ChoiceView {
                    value: c.value.to_string(),
                    label: c.label.to_string(),
                })
                .collect(),
        }
    }
}

/// A hidden form field carrying one chosen option back to the server.
#[derive(Clone)]
pub struct OptionField {
    pub field: String,
    pub value: String,
}

fn option_fields(options: &OptionSet) -> Vec<OptionField> {
    options
        .iter()
        .map(|(name, value)| OptionField {
            field: format!("{}{name}", super::forms::OPTION_PREFIX),
            value: value.to_string(),
        })
        .collect()
}

/// Cart line display data.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: String,
    pub title: String,
    pub image: String,
    /// e.g. `"Color: Red, Size: M"`, empty when no options were chosen.
    pub options_label: String,
    pub option_fields: Vec<OptionField>,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.product_id.to_string(),
            title: item.title.clone(),
            image: item.image.clone(),
            options_label: item.options.describe(),
            option_fields: option_fields(&item.options),
            quantity: item.quantity.get(),
            price: item.price.to_string(),
            line_price: item.line_total().rounded().to_string(),
        }
    }
}

/// Cart display data.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl From<&fakestore_core::Cart> for CartView {
    fn from(cart: &fakestore_core::Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use fakestore_core::{Cart, Price, ProductId, Rating};

    use super::*;

    fn shirt() -> Product {
        Product {
            id: ProductId::from(2),
            title: "Mens Casual Premium Slim Fit T-Shirts".to_string(),
            price: Price::from_cents(2230),
            description: String::new(),
            category: "men's clothing".to_string(),
            image: "https://fakestoreapi.com/img/shirt.jpg".to_string(),
            rating: Some(Rating {
                rate: 4.1,
                count: 259,
            }),
        }
    }

    #[test]
    fn test_card_view() {
        let mut wishlist = Wishlist::new();
        wishlist.add(shirt());
        let card = ProductCardView::new(&shirt(), &wishlist);

        assert_eq!(card.price, "$22.30");
        assert_eq!(card.rating.as_deref(), Some("4.1 (259 reviews)"));
        assert!(card.in_wishlist);
        assert!(card.has_options);
    }

    #[test]
    fn test_cart_view() {
        let mut cart = Cart::new();
        let options = OptionSet::from_iter([("size", "M"), ("color", "Red")]);
        cart.add(&shirt(), Some(options.clone()));
        cart.add(&shirt(), Some(options));

        let view = CartView::from(&cart);
        assert_eq!(view.total, "$44.60");
        assert_eq!(view.item_count, 2);

        let line = &view.items[0];
        assert_eq!(line.options_label, "Color: Red, Size: M");
        assert_eq!(line.line_price, "$44.60");
        let fields: Vec<_> = line.option_fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, ["option.color", "option.size"]);
    }

    #[test]
    fn test_category_links() {
        let categories = vec!["electronics".to_string(), "men's clothing".to_string()];
        let links = CategoryLink::list(&categories, Some("men's clothing"), "/products");

        assert_eq!(links.len(), 3);
        assert_eq!(links[0].href, "/products");
        assert!(!links[0].active);
        assert_eq!(links[2].href, "/products?category=men%27s+clothing");
        assert!(links[2].active);
    }

    #[test]
    fn test_option_group_view() {
        let view = OptionGroupView::from(&variants::SCREEN_SIZE);
        assert_eq!(view.field, "option.screenSize");
        assert_eq!(view.choices[0].label, "32 inches");
    }
}
