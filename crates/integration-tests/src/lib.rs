//! Integration tests for the Fake Store storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fakestore-integration-tests
//! ```
//!
//! Each [`TestContext`] starts a stub Fake Store API on an ephemeral port,
//! points a fresh storefront at it with a temporary data directory, and
//! drives the router in-process with `tower::ServiceExt::oneshot`. Cookies
//! are carried between requests like a browser would.

#![allow(clippy::missing_panics_doc)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use axum::{
    Json, Router,
    body::Body,
    extract::Path,
    http::{HeaderMap, Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use fakestore_storefront::config::{CatalogConfig, LogFormat, StorefrontConfig};
use fakestore_storefront::middleware::VISITOR_COOKIE_NAME;
use fakestore_storefront::state::AppState;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use url::Url;

// =============================================================================
// Stub upstream
// =============================================================================

/// Products served by the stub API.
#[must_use]
pub fn fixture_products() -> Value {
    json!([
        {
            "id": 1,
            "title": "Mens Cotton Jacket",
            "price": 55.99,
            "description": "Great outerwear for spring and autumn.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/jacket.jpg",
            "rating": {"rate": 4.7, "count": 500}
        },
        {
            "id": 5,
            "title": "Dragon Station Chain Bracelet",
            "price": 695,
            "description": "From the Legends Collection.",
            "category": "jewelery",
            "image": "https://fakestoreapi.com/img/bracelet.jpg",
            "rating": {"rate": 4.6, "count": 400}
        },
        {
            "id": 9,
            "title": "WD 2TB Elements Portable External Hard Drive",
            "price": 64,
            "description": "USB 3.0 and USB 2.0 compatibility.",
            "category": "electronics",
            "image": "https://fakestoreapi.com/img/drive.jpg",
            "rating": {"rate": 3.3, "count": 203}
        },
        {
            "id": 20,
            "title": "Coffee Mug",
            "price": 9.99,
            "description": "Holds coffee.",
            "category": "home",
            "image": "https://fakestoreapi.com/img/mug.jpg",
            "rating": null
        },
        {
            "id": 21,
            "title": "Sticker Pack",
            "price": 5.0,
            "description": "Assorted stickers.",
            "category": "home",
            "image": ""
        },
        {
            "id": 22,
            "title": "Desk Lamp",
            "price": 24.5,
            "description": "Adjustable arm.",
            "category": "home",
            "image": ""
        }
    ])
}

fn fixture_list() -> Vec<Value> {
    match fixture_products() {
        Value::Array(products) => products,
        _ => Vec::new(),
    }
}

async fn stub_products() -> Json<Value> {
    Json(fixture_products())
}

async fn stub_categories() -> Json<Value> {
    let mut categories: Vec<String> = Vec::new();
    for product in fixture_list() {
        if let Some(category) = product.get("category").and_then(Value::as_str)
            && !categories.iter().any(|c| c == category)
        {
            categories.push(category.to_owned());
        }
    }
    Json(json!(categories))
}

async fn stub_category(Path(category): Path<String>) -> Json<Value> {
    let products: Vec<Value> = fixture_list()
        .into_iter()
        .filter(|p| p.get("category").and_then(Value::as_str) == Some(category.as_str()))
        .collect();
    Json(Value::Array(products))
}

/// Like the real API, an unknown id is a 200 with an empty body.
async fn stub_product(Path(id): Path<String>) -> Response {
    fixture_list()
        .into_iter()
        .find(|p| p.get("id").map(ToString::to_string).as_deref() == Some(id.as_str()))
        .map_or_else(|| String::new().into_response(), |p| Json(p).into_response())
}

/// A working stub of the Fake Store API.
#[must_use]
pub fn stub_api() -> Router {
    Router::new()
        .route("/products", get(stub_products))
        .route("/products/categories", get(stub_categories))
        .route("/products/category/{category}", get(stub_category))
        .route("/products/{id}", get(stub_product))
}

/// An upstream that fails every request.
#[must_use]
pub fn broken_api() -> Router {
    Router::new().fallback(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream down") })
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub upstream");
    let addr = listener.local_addr().expect("stub upstream address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub upstream");
    });
    Url::parse(&format!("http://{addr}")).expect("stub upstream URL")
}

// =============================================================================
// Test context
// =============================================================================

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// A storefront wired to a stub upstream, plus a browser-like cookie jar.
pub struct TestContext {
    pub app: Router,
    pub config: StorefrontConfig,
    data_dir: TempDir,
    cookies: BTreeMap<String, String>,
}

impl TestContext {
    /// Storefront against a working stub catalog.
    pub async fn new() -> Self {
        Self::with_upstream(stub_api()).await
    }

    /// Storefront against an arbitrary upstream.
    pub async fn with_upstream(upstream: Router) -> Self {
        let base_url = serve(upstream).await;
        let data_dir = tempfile::tempdir().expect("temp data dir");

        let config = StorefrontConfig {
            host: "127.0.0.1".parse().expect("host"),
            port: 0,
            base_url: "http://localhost:3000".to_string(),
            data_dir: data_dir.path().to_path_buf(),
            static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static")),
            catalog: CatalogConfig {
                base_url,
                cache_ttl: Duration::from_secs(60),
                cache_capacity: 100,
            },
            log_format: LogFormat::Text,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 0.0,
            sentry_traces_sample_rate: 0.0,
        };

        let app = build_app(&config);
        Self {
            app,
            config,
            data_dir,
            cookies: BTreeMap::new(),
        }
    }

    /// Simulate a server restart: fresh state and session store over the
    /// same data directory. Only the visitor cookie survives, as the
    /// session cookie expires with the browser session anyway.
    pub fn restart(&mut self) {
        self.app = build_app(&self.config);
        self.cookies.retain(|name, _| name == VISITOR_COOKIE_NAME);
    }

    /// Forget every cookie, like a fresh browser.
    pub fn clear_cookies(&mut self) {
        self.cookies.clear();
    }

    /// Data directory holding visitor slots.
    #[must_use]
    pub fn data_dir(&self) -> &std::path::Path {
        self.data_dir.path()
    }

    /// The visitor id issued to this client, once a page has been visited.
    #[must_use]
    pub fn visitor(&self) -> Option<&str> {
        self.cookies.get(VISITOR_COOKIE_NAME).map(String::as_str)
    }

    /// Path of this visitor's persisted cart slot.
    #[must_use]
    pub fn cart_file(&self) -> Option<PathBuf> {
        self.visitor().map(|visitor| {
            self.data_dir()
                .join("visitors")
                .join(visitor)
                .join("cart.json")
        })
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("GET request");
        self.send(request).await
    }

    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("POST request");
        self.send(request).await
    }

    async fn send(&mut self, mut request: Request<Body>) -> TestResponse {
        if !self.cookies.is_empty() {
            let cookie = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            request.headers_mut().insert(
                header::COOKIE,
                cookie.parse().expect("cookie header"),
            );
        }

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("infallible router");

        for value in response.headers().get_all(header::SET_COOKIE) {
            let Ok(value) = value.to_str() else { continue };
            let pair = value.split(';').next().unwrap_or_default();
            if let Some((name, value)) = pair.split_once('=') {
                self.cookies.insert(name.trim().to_owned(), value.trim().to_owned());
            }
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

fn build_app(config: &StorefrontConfig) -> Router {
    let state = AppState::new(config.clone()).expect("application state");
    fakestore_storefront::app(state)
}
