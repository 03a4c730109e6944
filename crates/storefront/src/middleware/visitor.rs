//! Visitor identity cookie.
//!
//! The cart must outlive the browser session, so it is keyed by a separate
//! long-lived `fs_visitor` cookie rather than the session id. A missing or
//! malformed cookie gets a fresh id, set on the response.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
        request::Parts,
    },
    middleware::Next,
    response::Response,
};
use tower_sessions::cookie::{Cookie, SameSite, time::Duration};
use tracing::Span;

use crate::error::AppError;
use crate::models::VisitorId;
use crate::state::AppState;

/// Visitor cookie name.
pub const VISITOR_COOKIE_NAME: &str = "fs_visitor";

const VISITOR_COOKIE_DAYS: i64 = 365;

/// Find a well-formed visitor id among the request's cookies.
fn visitor_from_headers(headers: &HeaderMap) -> Option<VisitorId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == VISITOR_COOKIE_NAME)
        .and_then(|cookie| cookie.value().parse().ok())
}

fn visitor_cookie(visitor: VisitorId, secure: bool) -> Cookie<'static> {
    Cookie::build((VISITOR_COOKIE_NAME, visitor.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::days(VISITOR_COOKIE_DAYS))
        .build()
}

/// Middleware that resolves the visitor id and stores it in request extensions.
pub async fn visitor_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let existing = visitor_from_headers(request.headers());
    let visitor = existing.unwrap_or_default();

    Span::current().record("visitor", tracing::field::display(visitor));
    request.extensions_mut().insert(visitor);

    let mut response = next.run(request).await;

    if existing.is_none() {
        let cookie = visitor_cookie(visitor, state.config().is_secure());
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => tracing::warn!(error = %e, "Failed to encode visitor cookie"),
        }
    }

    response
}

/// Extractor for the current visitor.
///
/// Requires [`visitor_middleware`] to have run.
#[derive(Debug, Clone, Copy)]
pub struct Visitor(pub VisitorId);

impl<S> FromRequestParts<S> for Visitor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<VisitorId>()
            .copied()
            .map(Self)
            .ok_or_else(|| {
                AppError::Internal("visitor id missing - middleware may be misconfigured".to_string())
            })
    }
}
