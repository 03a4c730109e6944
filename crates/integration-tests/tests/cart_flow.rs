//! Integration tests for the cart: add, merge, remove, clear and persistence.
//!
//! Run with: cargo test -p fakestore-integration-tests

use axum::http::StatusCode;
use fakestore_integration_tests::{TestContext, broken_api};

/// Count `<tr>` rows in the cart table body.
fn cart_rows(body: &str) -> usize {
    body.split("<tbody>")
        .nth(1)
        .and_then(|rest| rest.split("</tbody>").next())
        .map_or(0, |rows| rows.matches("<tr>").count())
}

// ============================================================================
// Adding
// ============================================================================

#[tokio::test]
async fn test_add_redirects_to_cart_with_flash() {
    let mut ctx = TestContext::new().await;

    let resp = ctx.post_form("/cart/add", &[("product_id", "20")]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/cart"));

    let page = ctx.get("/cart").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Coffee Mug added to cart"));
    assert!(page.body.contains("Coffee Mug"));
    assert!(page.body.contains("Total: $9.99"));

    // Flash is shown once
    let again = ctx.get("/cart").await;
    assert!(!again.body.contains("added to cart"));
}

#[tokio::test]
async fn test_repeated_add_merges_into_one_line() {
    let mut ctx = TestContext::new().await;

    ctx.post_form("/cart/add", &[("product_id", "20")]).await;
    ctx.post_form("/cart/add", &[("product_id", "20")]).await;

    let page = ctx.get("/cart").await;
    assert_eq!(cart_rows(&page.body), 1);
    assert!(page.body.contains("<td>2</td>"));
    assert!(page.body.contains("Total: $19.98"));
    assert!(page.body.contains(r#"Cart <span class="badge">2</span>"#));
}

#[tokio::test]
async fn test_distinct_options_make_distinct_lines() {
    let mut ctx = TestContext::new().await;

    ctx.post_form(
        "/cart/add",
        &[("product_id", "1"), ("option.size", "M"), ("option.color", "Red")],
    )
    .await;
    ctx.post_form(
        "/cart/add",
        &[("product_id", "1"), ("option.size", "L"), ("option.color", "Red")],
    )
    .await;
    // Same options in a different order merge with the first line
    ctx.post_form(
        "/cart/add",
        &[("product_id", "1"), ("option.color", "Red"), ("option.size", "M")],
    )
    .await;

    let page = ctx.get("/cart").await;
    assert_eq!(cart_rows(&page.body), 2);
    assert!(page.body.contains("Size: M"));
    assert!(page.body.contains("Size: L"));
    assert!(page.body.contains("<td>2</td>"));
    assert!(page.body.contains("Items: 3"));
}

#[tokio::test]
async fn test_cart_page_add_one_keeps_line_options() {
    let mut ctx = TestContext::new().await;

    ctx.post_form(
        "/cart/add",
        &[("product_id", "1"), ("option.size", "M"), ("option.color", "Red")],
    )
    .await;

    // Every line offers an "Add one" form carrying its options
    let page = ctx.get("/cart").await;
    assert!(page.body.contains(r#"action="/cart/add""#));
    assert!(page.body.contains(r#"name="option.size" value="M""#));
    assert!(page.body.contains(r#"name="option.color" value="Red""#));
    assert!(page.body.contains(r#"name="return_to" value="/cart""#));
    assert!(page.body.contains("Add one"));

    let resp = ctx
        .post_form(
            "/cart/add",
            &[
                ("product_id", "1"),
                ("option.color", "Red"),
                ("option.size", "M"),
                ("return_to", "/cart"),
            ],
        )
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/cart"));

    let page = ctx.get("/cart").await;
    assert_eq!(cart_rows(&page.body), 1);
    assert!(page.body.contains("<td>2</td>"));
    assert!(page.body.contains("Items: 2"));
    assert!(page.body.contains("Total: $111.98"));
}

#[tokio::test]
async fn test_total_sums_lines_to_cents() {
    let mut ctx = TestContext::new().await;

    ctx.post_form("/cart/add", &[("product_id", "20")]).await;
    ctx.post_form("/cart/add", &[("product_id", "20")]).await;
    ctx.post_form("/cart/add", &[("product_id", "21")]).await;

    let page = ctx.get("/cart").await;
    assert!(page.body.contains("Total: $24.98"));
}

#[tokio::test]
async fn test_add_honours_safe_return_to() {
    let mut ctx = TestContext::new().await;

    let resp = ctx
        .post_form(
            "/cart/add",
            &[("product_id", "20"), ("return_to", "/products?category=home")],
        )
        .await;
    assert_eq!(resp.location(), Some("/products?category=home"));
}

#[tokio::test]
async fn test_add_rejects_offsite_return_to() {
    let mut ctx = TestContext::new().await;

    for target in ["https://evil.example", "//evil.example", "/\\evil.example"] {
        let resp = ctx
            .post_form("/cart/add", &[("product_id", "20"), ("return_to", target)])
            .await;
        assert_eq!(resp.location(), Some("/cart"), "return_to {target}");
    }
}

#[tokio::test]
async fn test_add_invalid_option_is_bad_request() {
    let mut ctx = TestContext::new().await;

    let resp = ctx
        .post_form("/cart/add", &[("product_id", "1"), ("option.size", "XXL")])
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = ctx
        .post_form("/cart/add", &[("product_id", "20"), ("option.size", "M")])
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let page = ctx.get("/cart").await;
    assert!(page.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_add_missing_product_id_is_bad_request() {
    let mut ctx = TestContext::new().await;

    let resp = ctx.post_form("/cart/add", &[("product_id", "  ")]).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_unknown_product_is_not_found() {
    let mut ctx = TestContext::new().await;

    let resp = ctx.post_form("/cart/add", &[("product_id", "999")]).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_during_catalog_outage_flashes_error() {
    let mut ctx = TestContext::with_upstream(broken_api()).await;

    let resp = ctx
        .post_form("/cart/add", &[("product_id", "20"), ("return_to", "/products")])
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/products"));

    let page = ctx.get("/cart").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("flash--error"));
    assert!(page.body.contains("your cart is unchanged"));
    assert!(page.body.contains("Your cart is empty"));
}

// ============================================================================
// Removing
// ============================================================================

#[tokio::test]
async fn test_remove_decrements_then_drops_line() {
    let mut ctx = TestContext::new().await;

    ctx.post_form("/cart/add", &[("product_id", "20")]).await;
    ctx.post_form("/cart/add", &[("product_id", "20")]).await;

    let resp = ctx.post_form("/cart/remove", &[("product_id", "20")]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    let page = ctx.get("/cart").await;
    assert!(page.body.contains("Coffee Mug quantity reduced to 1"));
    assert!(page.body.contains("<td>1</td>"));

    ctx.post_form("/cart/remove", &[("product_id", "20")]).await;
    let page = ctx.get("/cart").await;
    assert!(page.body.contains("Coffee Mug removed from cart"));
    assert!(page.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_remove_targets_matching_options_only() {
    let mut ctx = TestContext::new().await;

    ctx.post_form(
        "/cart/add",
        &[("product_id", "9"), ("option.storage", "1TB")],
    )
    .await;
    ctx.post_form(
        "/cart/add",
        &[("product_id", "9"), ("option.storage", "2TB")],
    )
    .await;

    ctx.post_form(
        "/cart/remove",
        &[("product_id", "9"), ("option.storage", "1TB")],
    )
    .await;

    let page = ctx.get("/cart").await;
    assert_eq!(cart_rows(&page.body), 1);
    assert!(page.body.contains("Storage: 2TB"));
    assert!(!page.body.contains("Storage: 1TB"));
}

#[tokio::test]
async fn test_remove_absent_line_is_noop() {
    let mut ctx = TestContext::new().await;

    ctx.post_form("/cart/add", &[("product_id", "21")]).await;
    let resp = ctx.post_form("/cart/remove", &[("product_id", "20")]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);

    let page = ctx.get("/cart").await;
    assert_eq!(cart_rows(&page.body), 1);
    assert!(page.body.contains("Total: $5.00"));
}

#[tokio::test]
async fn test_clear_empties_cart() {
    let mut ctx = TestContext::new().await;

    ctx.post_form("/cart/add", &[("product_id", "20")]).await;
    ctx.post_form("/cart/add", &[("product_id", "21")]).await;

    let resp = ctx.post_form("/cart/clear", &[]).await;
    assert_eq!(resp.location(), Some("/cart"));

    let page = ctx.get("/cart").await;
    assert!(page.body.contains("Your cart is now empty"));
    assert!(page.body.contains("Your cart is empty."));
    assert!(page.body.contains(r#"Cart <span class="badge">0</span>"#));
}

// ============================================================================
// Persistence
// ============================================================================

#[tokio::test]
async fn test_cart_survives_restart() {
    let mut ctx = TestContext::new().await;

    ctx.post_form("/cart/add", &[("product_id", "20")]).await;
    ctx.post_form("/cart/add", &[("product_id", "21")]).await;

    let cart_file = ctx.cart_file().expect("visitor cookie issued");
    assert!(cart_file.exists());

    ctx.restart();

    let page = ctx.get("/cart").await;
    assert!(page.body.contains("Coffee Mug"));
    assert!(page.body.contains("Sticker Pack"));
    assert!(page.body.contains("Total: $14.99"));
}

#[tokio::test]
async fn test_visitors_have_separate_carts() {
    let mut ctx = TestContext::new().await;
    ctx.post_form("/cart/add", &[("product_id", "20")]).await;
    let first = ctx.visitor().map(str::to_owned);

    // A browser without cookies is a new visitor
    ctx.clear_cookies();
    let page = ctx.get("/cart").await;
    assert!(page.body.contains("Your cart is empty"));
    assert!(ctx.visitor().is_some());
    assert_ne!(ctx.visitor().map(str::to_owned), first);
}
