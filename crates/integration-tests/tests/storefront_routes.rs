//! Route-level tests for the storefront against a fake profile API.

#![allow(clippy::unwrap_used)]

use artisan_market_core::ArtisanId;
use artisan_market_core::image_cache::{ImageCache, ImageKey};
use artisan_market_core::suggest::{BLUR_GRACE, DEBOUNCE};
use artisan_market_integration_tests::{FakeProfileApi, TestContext, multipart_body};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Value, json};

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10];

fn profiles() -> Value {
    json!({
        "user_profiles": [
            {
                "user_id": "u1",
                "name": "Lakshmi Potter",
                "craft_type": "Terracotta Pottery",
                "state": "Tamil Nadu",
                "materials": "clay, natural glaze",
                "years_experience": "15 years",
                "price_range": "500-2000",
                "backstory": "Learned from her mother.\n\nTagline: Earth shaped by hand",
                "products": [
                    { "id": "p1", "title": "Terracotta Lamp", "price": 450, "category": "pottery", "isNew": true },
                    { "title": "Clay Bowl", "price": "300" }
                ]
            },
            {
                "user_id": "u2",
                "name": "Anita Sharma",
                "craft_type": "Handloom Weaving",
                "state": "Assam",
                "materials": "muga silk, cotton",
                "products": [
                    { "id": "p3", "title": "Muga Stole", "price": 2200 }
                ]
            }
        ]
    })
}

fn many_profiles(count: usize) -> Value {
    let records: Vec<Value> = (0..count)
        .map(|i| json!({ "user_id": format!("m{i}"), "name": format!("Maker {i}"), "craft_type": "Basketry" }))
        .collect();
    json!({ "user_profiles": records })
}

// ============================================================================
// Listing pages
// ============================================================================

#[tokio::test]
async fn test_artisan_listing_shows_all_without_category() {
    let ctx = TestContext::start(FakeProfileApi::new().with_profiles(profiles())).await;

    let page = ctx.get("/artisans").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("All Artisans"));
    assert!(page.body.contains("Lakshmi Potter"));
    assert!(page.body.contains("Anita Sharma"));
    // No cached portrait: placeholder initial
    assert!(page.body.contains(">L</div>"));
}

#[tokio::test]
async fn test_artisan_listing_filters_by_category() {
    let ctx = TestContext::start(FakeProfileApi::new().with_profiles(profiles())).await;

    let page = ctx.get("/artisans?category=pottery&q=pot").await;

    assert_eq!(page.status, StatusCode::OK);
    // askama escapes `&` numerically
    assert!(page.body.contains("<h1>Pottery &#38; Ceramics</h1>"));
    assert!(page.body.contains("Lakshmi Potter"));
    assert!(!page.body.contains("Anita Sharma"));
    // Query prefills the search box
    assert!(page.body.contains("value=\"pot\""));
}

#[tokio::test]
async fn test_unknown_category_title() {
    let ctx = TestContext::start(FakeProfileApi::new().with_profiles(profiles())).await;

    let page = ctx.get("/artisans?category=metal").await;

    assert!(page.body.contains("Metal Artisans"));
    assert!(page.body.contains("No artisans found."));
}

#[tokio::test]
async fn test_malformed_body_renders_empty_listing() {
    for body in [json!({}), json!({ "user_profiles": null }), json!({ "user_profiles": "nope" })] {
        let ctx = TestContext::start(FakeProfileApi::new().with_profiles(body)).await;

        let page = ctx.get("/artisans").await;

        assert_eq!(page.status, StatusCode::OK);
        assert!(page.body.contains("No artisans found."));
    }
}

#[tokio::test]
async fn test_failed_fetch_renders_empty_pages() {
    let ctx = TestContext::start(FakeProfileApi::new()).await;

    let listing = ctx.get("/artisans").await;
    assert_eq!(listing.status, StatusCode::OK);
    assert!(listing.body.contains("No artisans found."));

    let products = ctx.get("/products").await;
    assert_eq!(products.status, StatusCode::OK);
    assert!(products.body.contains("No products found."));
}

#[tokio::test]
async fn test_demo_artisans_follow_remote_ones() {
    let ctx = TestContext::start_with(FakeProfileApi::new().with_profiles(profiles()), true).await;

    let page = ctx.get("/artisans").await;

    let remote = page.body.find("Anita Sharma").unwrap();
    let demo = page.body.find("Ravi Kumar").unwrap();
    assert!(remote < demo);

    // Demo materials are list-shaped, so the category filter reaches them
    let golden = ctx.get("/artisans?category=golden").await;
    assert!(golden.body.contains("Meena Devi"));
}

#[tokio::test]
async fn test_products_are_flattened_in_order_with_artisan_links() {
    let ctx = TestContext::start(FakeProfileApi::new().with_profiles(profiles())).await;

    let page = ctx.get("/products").await;

    assert_eq!(page.status, StatusCode::OK);
    let lamp = page.body.find("Terracotta Lamp").unwrap();
    let bowl = page.body.find("Clay Bowl").unwrap();
    let stole = page.body.find("Muga Stole").unwrap();
    assert!(lamp < bowl && bowl < stole);
    assert!(page.body.contains("href=\"/artisans/u2\""));
    assert!(page.body.contains("₹450"));
}

#[tokio::test]
async fn test_profile_list_is_cached() {
    let ctx = TestContext::start(FakeProfileApi::new().with_profiles(profiles())).await;

    ctx.get("/artisans").await;
    ctx.get("/products").await;

    assert_eq!(ctx.api.list_hits(), 1);
}

// ============================================================================
// Profile page
// ============================================================================

#[tokio::test]
async fn test_profile_page_splits_tagline() {
    let ctx = TestContext::start(FakeProfileApi::new().with_profiles(profiles())).await;

    let page = ctx.get("/artisans/u1").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Learned from her mother."));
    assert!(page.body.contains("Earth shaped by hand"));
    assert!(page.body.contains("15 years"));
    assert!(page.body.contains("500-2000"));
}

#[tokio::test]
async fn test_profile_falls_back_to_detail_endpoint() {
    let api = FakeProfileApi::new()
        .with_profiles(profiles())
        .with_profile("u9", json!({ "name": "Hidden Maker", "craft_type": "Bidri Work" }));
    let ctx = TestContext::start(api).await;

    let page = ctx.get("/artisans/u9").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Hidden Maker"));
}

#[tokio::test]
async fn test_unknown_artisan_is_not_found() {
    let ctx = TestContext::start(FakeProfileApi::new().with_profiles(profiles())).await;

    let page = ctx.get("/artisans/nobody").await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);

    let page = ctx.get("/artisans/bad%20id").await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);

    let page = ctx.get("/artisans/%20").await;
    assert_eq!(page.status, StatusCode::BAD_REQUEST);

    // Dot segments never reach another upstream endpoint
    let page = ctx.get("/artisans/%2E%2E").await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_free_text_artisan_ids_can_be_opened() {
    let api = FakeProfileApi::new()
        .with_profiles(json!({
            "user_profiles": [
                { "user_id": "ravi kumar", "name": "Ravi Kumar", "craft_type": "Blue Pottery" }
            ]
        }))
        .with_media("ravi kumar", json!({ "items": [{ "edited_image_base64": STANDARD.encode(PNG) }] }));
    let ctx = TestContext::start(api).await;

    let listing = ctx.get("/artisans").await;
    assert!(listing.body.contains("href=\"/artisans/ravi%20kumar\""));

    let profile = ctx.get("/artisans/ravi%20kumar").await;
    assert_eq!(profile.status, StatusCode::OK);
    assert!(profile.body.contains("Blue Pottery"));

    let gallery = ctx.get("/artisans/ravi%20kumar/gallery").await;
    assert_eq!(gallery.status, StatusCode::OK);
    assert_eq!(ctx.api.media_hits(), 1);
    assert!(ctx.images.has(&ImageKey::Gallery(ArtisanId::new("ravi kumar"), 0)));

    let select = ctx.get("/search/select?artisan=ravi%20kumar").await;
    assert_eq!(select.status, StatusCode::SEE_OTHER);
    assert_eq!(
        select.location(),
        Some("/artisans?category=Blue%20Pottery&q=Blue%20Pottery")
    );
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_suggest_matches_name_craft_and_text_materials() {
    let ctx = TestContext::start(FakeProfileApi::new().with_profiles(profiles())).await;

    let pot = ctx.get("/search/suggest?q=pot").await;
    assert!(pot.body.contains("Lakshmi Potter"));
    assert!(!pot.body.contains("Anita Sharma"));

    let sharma = ctx.get("/search/suggest?q=SHARMA").await;
    assert!(sharma.body.contains("Anita Sharma"));
    assert!(!sharma.body.contains("Lakshmi Potter"));

    let silk = ctx.get("/search/suggest?q=muga%20silk").await;
    assert!(silk.body.contains("Anita Sharma"));
}

#[tokio::test]
async fn test_short_query_does_not_fetch() {
    let ctx = TestContext::start(FakeProfileApi::new().with_profiles(profiles())).await;

    let page = ctx.get("/search/suggest?q=p").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(!page.body.contains("<li"));
    assert_eq!(ctx.api.list_hits(), 0);
}

#[tokio::test]
async fn test_suggestions_are_capped_at_eight() {
    let ctx = TestContext::start(FakeProfileApi::new().with_profiles(many_profiles(20))).await;

    let page = ctx.get("/search/suggest?q=maker").await;

    assert_eq!(page.body.matches("<li role=\"option\">").count(), 8);
    assert!(page.body.contains("Maker 7"));
    assert!(!page.body.contains("Maker 8"));
}

#[tokio::test]
async fn test_select_redirects_to_craft_listing() {
    let ctx = TestContext::start(FakeProfileApi::new().with_profiles(profiles())).await;

    let page = ctx.get("/search/select?artisan=u1").await;

    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(
        page.location(),
        Some("/artisans?category=Terracotta%20Pottery&q=Terracotta%20Pottery")
    );

    let listing = ctx.get(page.location().unwrap()).await;
    assert!(listing.body.contains("Terracotta Pottery Artisans"));
    assert!(listing.body.contains("Lakshmi Potter"));
}

#[tokio::test]
async fn test_search_box_timings_match_suggest_session() {
    let ctx = TestContext::start(FakeProfileApi::new().with_profiles(profiles())).await;

    let page = ctx.get("/").await;

    let debounce = format!("input changed delay:{}ms", DEBOUNCE.as_millis());
    let blur = format!("blur delay:{}ms from:#search-input", BLUR_GRACE.as_millis());
    assert!(page.body.contains(&debounce));
    assert!(page.body.contains(&blur));
    assert_eq!(page.body.matches("hx-sync=\"closest .search:replace\"").count(), 2);

    // The blur request carries no query and clears the list
    let cleared = ctx.get("/search/suggest").await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(!cleared.body.contains("<li"));
    assert_eq!(ctx.api.list_hits(), 1);
}

// ============================================================================
// Images
// ============================================================================

#[tokio::test]
async fn test_gallery_populates_image_cache() {
    let png = STANDARD.encode(PNG);
    let jpeg = STANDARD.encode(JPEG);
    let api = FakeProfileApi::new().with_profiles(profiles()).with_media(
        "u1",
        json!({
            "user_id": "u1",
            "count": 3,
            "items": [
                { "id": 1, "edited_image_base64": png },
                { "id": 2, "edited_image_base64": null },
                { "id": 3, "edited_image_base64": jpeg }
            ]
        }),
    );
    let ctx = TestContext::start(api).await;
    let id = ArtisanId::new("u1");

    let page = ctx.get("/artisans/u1/gallery").await;

    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body.matches("<img").count(), 2);
    assert_eq!(
        ctx.images.get(&ImageKey::Gallery(id.clone(), 0)),
        Some(format!("data:image/png;base64,{png}"))
    );
    assert_eq!(
        ctx.images.get(&ImageKey::Gallery(id.clone(), 1)),
        Some(format!("data:image/jpeg;base64,{jpeg}"))
    );
    assert!(ctx.images.has(&ImageKey::Portrait(id)));

    // The listing card now shows the cached portrait
    let listing = ctx.get("/artisans").await;
    assert!(listing.body.contains(&format!("src=\"data:image/png;base64,{png}\"")));
}

#[tokio::test]
async fn test_gallery_without_media_is_empty() {
    let ctx = TestContext::start(FakeProfileApi::new().with_profiles(profiles())).await;

    let page = ctx.get("/artisans/u2/gallery").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("No gallery images yet."));
    assert_eq!(ctx.api.media_hits(), 1);
}

#[tokio::test]
async fn test_portrait_upload_is_cached() {
    let ctx = TestContext::start(FakeProfileApi::new().with_profiles(profiles())).await;
    let boundary = "artisan-boundary";

    let page = ctx
        .send(
            Request::builder()
                .method("POST")
                .uri("/artisans/u2/image")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(multipart_body(boundary, "image", "image/jpeg", JPEG)))
                .unwrap(),
        )
        .await;

    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location(), Some("/artisans/u2"));
    assert_eq!(
        ctx.images.get(&ImageKey::Portrait(ArtisanId::new("u2"))),
        Some(format!("data:image/jpeg;base64,{}", STANDARD.encode(JPEG)))
    );
}

#[tokio::test]
async fn test_upload_without_image_field_is_rejected() {
    let ctx = TestContext::start(FakeProfileApi::new().with_profiles(profiles())).await;
    let boundary = "artisan-boundary";

    let page = ctx
        .send(
            Request::builder()
                .method("POST")
                .uri("/artisans/u2/image")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(multipart_body(boundary, "other", "image/png", PNG)))
                .unwrap(),
        )
        .await;

    assert_eq!(page.status, StatusCode::BAD_REQUEST);
    assert!(!ctx.images.has(&ImageKey::Portrait(ArtisanId::new("u2"))));
}

// ============================================================================
// Health and middleware
// ============================================================================

#[tokio::test]
async fn test_health_and_readiness() {
    let ctx = TestContext::start(FakeProfileApi::new().with_profiles(profiles())).await;

    let health = ctx.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body, "ok");

    let ready = ctx.get("/health/ready").await;
    assert_eq!(ready.status, StatusCode::OK);
}

#[tokio::test]
async fn test_responses_carry_request_id_and_csp() {
    let ctx = TestContext::start(FakeProfileApi::new().with_profiles(profiles())).await;

    let page = ctx.get("/health").await;

    assert!(page.headers.contains_key("x-request-id"));
    let csp = page.headers["content-security-policy"].to_str().unwrap();
    assert!(csp.contains("img-src 'self' data:"));
}
