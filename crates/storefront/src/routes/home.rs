//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::Visitor;
use crate::models::session::load_wishlist;
use crate::routes::views::{CategoryLink, Layout, ProductCardView};
use crate::state::AppState;

/// Number of products featured as best sellers.
const BEST_SELLER_COUNT: usize = 5;

/// Category filter query.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

impl CategoryQuery {
    /// The requested category, `None` when blank.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub categories: Vec<CategoryLink>,
    pub best_sellers: Vec<ProductCardView>,
    pub error: Option<String>,
    pub return_to: String,
}

/// Display home page.
#[instrument(skip(state, session))]
pub async fn home(
    State(state): State<AppState>,
    Visitor(visitor): Visitor,
    session: Session,
    Query(query): Query<CategoryQuery>,
) -> Result<HomeTemplate> {
    let selected = query.selected();
    let (categories, products) = tokio::join!(
        state.catalog().categories(),
        state.catalog().products(selected),
    );

    let wishlist = load_wishlist(&session).await?;
    let mut error = None;

    let categories = categories.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load categories");
        error = Some("We couldn't load the catalog right now. Please try again shortly.".to_string());
        Vec::new()
    });
    let products = products.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load products");
        error = Some("We couldn't load the catalog right now. Please try again shortly.".to_string());
        Vec::new()
    });

    let best_sellers: Vec<_> = products.into_iter().take(BEST_SELLER_COUNT).collect();

    Ok(HomeTemplate {
        layout: Layout::load(&state, &visitor, &session).await?,
        categories: CategoryLink::list(&categories, selected, "/"),
        best_sellers: ProductCardView::list(&best_sellers, &wishlist),
        error,
        return_to: home_path(selected),
    })
}

fn home_path(selected: Option<&str>) -> String {
    selected.map_or_else(
        || "/".to_string(),
        |category| {
            format!(
                "/?category={}",
                url::form_urlencoded::byte_serialize(category.as_bytes()).collect::<String>()
            )
        },
    )
}
