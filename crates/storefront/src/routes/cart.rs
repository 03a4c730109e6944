//! Cart route handlers.
//!
//! The cart lives in the visitor's durable slot (see [`crate::carts`]).
//! Mutations are plain form posts that redirect back with a flash message.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use fakestore_core::{RemoveOutcome, variants};
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::CatalogError;
use crate::error::{Result, add_breadcrumb};
use crate::middleware::Visitor;
use crate::models::Flash;
use crate::models::session::set_flash;
use crate::routes::forms::{CartForm, safe_return_to};
use crate::routes::views::{CartView, Layout};
use crate::state::AppState;

/// Shown when the catalog can't be reached while adding.
const CATALOG_UNAVAILABLE: &str =
    "We couldn't reach the catalog, so your cart is unchanged. Please try again.";

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: Layout,
    pub cart: CartView,
}

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    Visitor(visitor): Visitor,
    session: Session,
) -> Result<CartShowTemplate> {
    let cart = state
        .carts()
        .with_cart(&visitor, |store| CartView::from(store.cart()))
        .await?;

    Ok(CartShowTemplate {
        layout: Layout::load(&state, &visitor, &session).await?,
        cart,
    })
}

/// Add one unit of a product with the chosen options.
///
/// The product is fetched from the catalog so the line captures its current
/// title, price and image, and so the options can be checked against it.
/// If the catalog is down the cart is left alone and an error flash is
/// shown on the return page; an unknown product is still a 404.
#[instrument(skip(state, session, pairs))]
pub async fn add(
    State(state): State<AppState>,
    Visitor(visitor): Visitor,
    session: Session,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect> {
    let form = CartForm::from_pairs(pairs)?;
    let return_to = safe_return_to(form.return_to.as_deref(), "/cart");

    let product = match state.catalog().product(&form.product_id).await {
        Ok(product) => product,
        Err(e @ CatalogError::NotFound(_)) => return Err(e.into()),
        Err(e) => {
            tracing::warn!(
                error = %e,
                product_id = %form.product_id,
                "Catalog unavailable, cart unchanged"
            );
            set_flash(&session, Flash::error(CATALOG_UNAVAILABLE)).await?;
            return Ok(Redirect::to(&return_to));
        }
    };
    let options = variants::select(
        &product,
        form.options.iter().map(|(name, value)| (name.as_str(), value.as_str())),
    )?;

    let line = product.clone();
    let quantity = state
        .carts()
        .with_cart(&visitor, move |store| store.add_to_cart(&line, Some(options)))
        .await?;

    tracing::info!(
        product_id = %product.id,
        quantity = quantity.get(),
        "Added to cart"
    );
    add_breadcrumb("cart", "Added to cart", &[("product_id", product.id.as_str())]);

    set_flash(&session, Flash::success(format!("{} added to cart", product.title))).await?;
    Ok(Redirect::to(&return_to))
}

/// Remove one unit of a cart line.
#[instrument(skip(state, session, pairs))]
pub async fn remove(
    State(state): State<AppState>,
    Visitor(visitor): Visitor,
    session: Session,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect> {
    let form = CartForm::from_pairs(pairs)?;
    let options = form.raw_options();
    let product_id = form.product_id.clone();

    let (outcome, title) = state
        .carts()
        .with_cart(&visitor, move |store| {
            let title = store
                .cart()
                .get(&product_id, Some(&options))
                .map(|line| line.title.clone());
            (store.remove_from_cart(&product_id, Some(&options)), title)
        })
        .await?;

    let flash = match (outcome, title) {
        (RemoveOutcome::Removed, Some(title)) => {
            Some(Flash::info(format!("{title} removed from cart")))
        }
        (RemoveOutcome::Decremented(quantity), Some(title)) => {
            Some(Flash::info(format!("{title} quantity reduced to {quantity}")))
        }
        _ => None,
    };
    if let Some(flash) = flash {
        set_flash(&session, flash).await?;
    }

    Ok(Redirect::to(&safe_return_to(
        form.return_to.as_deref(),
        "/cart",
    )))
}

/// Empty the cart.
#[instrument(skip(state, session))]
pub async fn clear(
    State(state): State<AppState>,
    Visitor(visitor): Visitor,
    session: Session,
) -> Result<Redirect> {
    state
        .carts()
        .with_cart(&visitor, |store| store.clear_cart())
        .await?;
    set_flash(&session, Flash::info("Your cart is now empty")).await?;
    Ok(Redirect::to("/cart"))
}
