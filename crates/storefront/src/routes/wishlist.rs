//! Wishlist route handlers.
//!
//! The wishlist is session-scoped: it survives page loads but not the end of
//! the browser session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::CatalogError;
use crate::error::Result;
use crate::middleware::Visitor;
use crate::models::Flash;
use crate::models::session::{load_wishlist, save_wishlist, set_flash};
use crate::routes::forms::{WishlistForm, safe_return_to};
use crate::routes::views::{Layout, ProductCardView};
use crate::state::AppState;

const CATALOG_UNAVAILABLE: &str =
    "We couldn't reach the catalog, so your wishlist is unchanged. Please try again.";

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist/show.html")]
pub struct WishlistTemplate {
    pub layout: Layout,
    pub products: Vec<ProductCardView>,
    pub return_to: String,
}

/// Display the wishlist.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    Visitor(visitor): Visitor,
    session: Session,
) -> Result<WishlistTemplate> {
    let wishlist = load_wishlist(&session).await?;

    Ok(WishlistTemplate {
        layout: Layout::load(&state, &visitor, &session).await?,
        products: ProductCardView::list(wishlist.entries(), &wishlist),
        return_to: "/wishlist".to_string(),
    })
}

/// Add a product if absent, remove it if present.
///
/// A saved product is removed without touching the catalog; adding one
/// fetches its current details. A catalog outage leaves the wishlist alone
/// and flashes an error instead.
#[instrument(skip(state, session))]
pub async fn toggle(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<WishlistForm>,
) -> Result<Redirect> {
    let product_id = form.product_id()?;
    let return_to = safe_return_to(form.return_to.as_deref(), "/wishlist");
    let mut wishlist = load_wishlist(&session).await?;

    let product = match wishlist.get(&product_id) {
        Some(saved) => saved.clone(),
        None => match state.catalog().product(&product_id).await {
            Ok(product) => product,
            Err(e @ CatalogError::NotFound(_)) => return Err(e.into()),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    product_id = %product_id,
                    "Catalog unavailable, wishlist unchanged"
                );
                set_flash(&session, Flash::error(CATALOG_UNAVAILABLE)).await?;
                return Ok(Redirect::to(&return_to));
            }
        },
    };
    let title = product.title.clone();
    let action = wishlist.toggle(product);

    save_wishlist(&session, &wishlist).await?;
    set_flash(&session, Flash::success(action.message(&title))).await?;

    Ok(Redirect::to(&return_to))
}

/// Remove a product from the wishlist. Missing products are a no-op.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<WishlistForm>) -> Result<Redirect> {
    let product_id = form.product_id()?;
    let mut wishlist = load_wishlist(&session).await?;

    let title = wishlist.get(&product_id).map(|p| p.title.clone());
    if let Some(title) = title
        && wishlist.remove(&product_id)
    {
        save_wishlist(&session, &wishlist).await?;
        set_flash(&session, Flash::info(format!("{title} removed from wishlist"))).await?;
    }

    Ok(Redirect::to(&safe_return_to(form.return_to.as_deref(), "/wishlist")))
}
