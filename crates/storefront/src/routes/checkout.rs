//! Mock checkout.
//!
//! Nothing is charged or shipped. A valid form produces a confirmation page
//! and empties the cart; an invalid one is re-rendered with field errors.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use fakestore_core::checkout::{CheckoutForm, FieldError, ShippingDetails};
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{Result, add_breadcrumb};
use crate::middleware::Visitor;
use crate::routes::views::{CartView, Layout};
use crate::state::AppState;

/// Per-field error messages for the form.
#[derive(Clone, Default)]
pub struct FormErrors {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
}

impl FormErrors {
    fn from_fields(errors: Vec<FieldError>) -> Self {
        let mut out = Self::default();
        for error in errors {
            let slot = match error.field {
                "full_name" => &mut out.full_name,
                "email" => &mut out.email,
                "address" => &mut out.address,
                "city" => &mut out.city,
                "postal_code" => &mut out.postal_code,
                _ => continue,
            };
            // Keep the first message per field
            slot.get_or_insert(error.message);
        }
        out
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub layout: Layout,
    pub cart: CartView,
    pub form: CheckoutForm,
    pub errors: FormErrors,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmed.html")]
pub struct ConfirmationTemplate {
    pub layout: Layout,
    pub reference: String,
    pub placed_at: String,
    pub total: String,
    pub item_count: u32,
    pub shipping: ShippingDetails,
}

/// Order reference such as `FS-1A2B3C4D`.
fn order_reference() -> String {
    let id = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("FS-{}", id.get(..8).unwrap_or(&id))
}

/// Display checkout summary and form.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    Visitor(visitor): Visitor,
    session: Session,
) -> Result<Response> {
    let cart = state
        .carts()
        .with_cart(&visitor, |store| CartView::from(store.cart()))
        .await?;
    if cart.items.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    Ok(CheckoutTemplate {
        layout: Layout::load(&state, &visitor, &session).await?,
        cart,
        form: CheckoutForm::default(),
        errors: FormErrors::default(),
    }
    .into_response())
}

/// Validate the form, confirm the order and clear the cart.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    Visitor(visitor): Visitor,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let shipping = match form.validate() {
        Ok(shipping) => shipping,
        Err(errors) => {
            let cart = state
                .carts()
                .with_cart(&visitor, |store| CartView::from(store.cart()))
                .await?;
            if cart.items.is_empty() {
                return Ok(Redirect::to("/cart").into_response());
            }
            let page = CheckoutTemplate {
                layout: Layout::load(&state, &visitor, &session).await?,
                cart,
                errors: FormErrors::from_fields(errors),
                form,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    // Snapshot and clear under one lock so a concurrent add can't slip between
    let placed = state
        .carts()
        .with_cart(&visitor, |store| {
            if store.cart().is_empty() {
                return None;
            }
            let summary = (store.get_total(), store.cart().item_count());
            store.clear_cart();
            Some(summary)
        })
        .await?;
    let Some((total, item_count)) = placed else {
        return Ok(Redirect::to("/cart").into_response());
    };

    let reference = order_reference();
    tracing::info!(
        reference = %reference,
        total = %total,
        item_count,
        "Order placed"
    );
    add_breadcrumb("checkout", "Order placed", &[("reference", reference.as_str())]);

    Ok(ConfirmationTemplate {
        layout: Layout::load(&state, &visitor, &session).await?,
        reference,
        placed_at: Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
        total: total.to_string(),
        item_count,
        shipping,
    }
    .into_response())
}
