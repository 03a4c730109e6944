//! Integration tests for the mock checkout.
//!
//! Run with: cargo test -p fakestore-integration-tests

use axum::http::StatusCode;
use fakestore_integration_tests::TestContext;

const VALID_FORM: &[(&str, &str)] = &[
    ("full_name", "Ada Lovelace"),
    ("email", "ada@example.com"),
    ("address", "12 Analytical Row"),
    ("city", "London"),
    ("postal_code", "NW1 2AB"),
];

async fn context_with_cart() -> TestContext {
    let mut ctx = TestContext::new().await;
    ctx.post_form("/cart/add", &[("product_id", "20")]).await;
    ctx.post_form("/cart/add", &[("product_id", "21")]).await;
    ctx
}

#[tokio::test]
async fn test_checkout_with_empty_cart_redirects() {
    let mut ctx = TestContext::new().await;

    let resp = ctx.get("/checkout").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/cart"));

    let resp = ctx.post_form("/checkout", VALID_FORM).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/cart"));
}

#[tokio::test]
async fn test_checkout_page_shows_summary() {
    let mut ctx = context_with_cart().await;

    let page = ctx.get("/checkout").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Coffee Mug"));
    assert!(page.body.contains("Sticker Pack"));
    assert!(page.body.contains("$14.99"));
    assert!(page.body.contains(r#"name="full_name""#));
}

#[tokio::test]
async fn test_invalid_checkout_rerenders_with_errors() {
    let mut ctx = context_with_cart().await;

    let resp = ctx
        .post_form(
            "/checkout",
            &[
                ("full_name", "Ada Lovelace"),
                ("email", "not-an-email"),
                ("address", ""),
                ("city", "London"),
                ("postal_code", "NW1 2AB"),
            ],
        )
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("Address is required"));
    assert!(resp.body.contains("Email must contain a single @ symbol"));
    // Submitted values are kept
    assert!(resp.body.contains("Ada Lovelace"));

    let page = ctx.get("/cart").await;
    assert!(page.body.contains("Total: $14.99"));
}

#[tokio::test]
async fn test_valid_checkout_confirms_and_clears_cart() {
    let mut ctx = context_with_cart().await;

    let resp = ctx.post_form("/checkout", VALID_FORM).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Thank you, Ada Lovelace!"));
    assert!(resp.body.contains("FS-"));
    assert!(resp.body.contains("2 item(s), total $14.99"));
    assert!(resp.body.contains("ada@example.com"));

    let page = ctx.get("/cart").await;
    assert!(page.body.contains("Your cart is empty"));

    // The cleared cart is what gets persisted
    ctx.restart();
    let page = ctx.get("/cart").await;
    assert!(page.body.contains("Your cart is empty"));
}
