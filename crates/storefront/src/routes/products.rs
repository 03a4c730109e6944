//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use fakestore_core::{ProductId, variants};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::Visitor;
use crate::models::session::load_wishlist;
use crate::routes::home::CategoryQuery;
use crate::routes::views::{CategoryLink, Layout, OptionGroupView, ProductCardView};
use crate::state::AppState;

/// Product detail display data.
#[derive(Clone)]
pub struct ProductView {
    pub card: ProductCardView,
    pub description: String,
    pub option_groups: Vec<OptionGroupView>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub layout: Layout,
    pub categories: Vec<CategoryLink>,
    pub heading: String,
    pub products: Vec<ProductCardView>,
    pub error: Option<String>,
    pub return_to: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub layout: Layout,
    pub product: ProductView,
    pub return_to: String,
}

/// Display product listing, optionally filtered by category.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    Visitor(visitor): Visitor,
    session: Session,
    Query(query): Query<CategoryQuery>,
) -> Result<ProductsIndexTemplate> {
    let selected = query.selected();
    let (categories, products) = tokio::join!(
        state.catalog().categories(),
        state.catalog().products(selected),
    );

    let wishlist = load_wishlist(&session).await?;
    let (categories, products, error) = match (categories, products) {
        (Ok(categories), Ok(products)) => (categories, products, None),
        (categories, products) => {
            if let Err(e) = &categories {
                tracing::warn!(error = %e, "Failed to load categories");
            }
            if let Err(e) = &products {
                tracing::warn!(error = %e, "Failed to load products");
            }
            (
                categories.unwrap_or_default(),
                products.unwrap_or_default(),
                Some("We couldn't load products right now. Please try again shortly.".to_string()),
            )
        }
    };

    let return_to = selected.map_or_else(
        || "/products".to_string(),
        |category| {
            format!(
                "/products?category={}",
                url::form_urlencoded::byte_serialize(category.as_bytes()).collect::<String>()
            )
        },
    );

    Ok(ProductsIndexTemplate {
        layout: Layout::load(&state, &visitor, &session).await?,
        categories: CategoryLink::list(&categories, selected, "/products"),
        heading: selected.map_or_else(|| "All products".to_string(), ToOwned::to_owned),
        products: ProductCardView::list(&products, &wishlist),
        error,
        return_to,
    })
}

/// Display product detail page with option selection.
#[instrument(skip(state, session), fields(product_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    Visitor(visitor): Visitor,
    session: Session,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate> {
    let id: ProductId = ProductId::new(id);
    let product = state.catalog().product(&id).await?;
    let wishlist = load_wishlist(&session).await?;

    let view = ProductView {
        card: ProductCardView::new(&product, &wishlist),
        description: product.description.clone(),
        option_groups: variants::groups_for(&product)
            .into_iter()
            .map(OptionGroupView::from)
            .collect(),
    };

    Ok(ProductShowTemplate {
        layout: Layout::load(&state, &visitor, &session).await?,
        return_to: format!("/products/{}", product.id),
        product: view,
    })
}
