//! Integration test harness for the artisan marketplace storefront.
//!
//! Tests drive the storefront router in-process with
//! `tower::ServiceExt::oneshot`. The remote profile API is replaced by a
//! small axum server bound to `127.0.0.1:0` whose responses each test
//! chooses.
//!
//! # Example
//!
//! ```rust,ignore
//! let api = FakeProfileApi::new().with_profiles(json!({ "user_profiles": [] }));
//! let ctx = TestContext::start(api).await;
//! let page = ctx.get("/artisans").await;
//! assert_eq!(page.status, StatusCode::OK);
//! ```

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use artisan_market_core::image_cache::{EvictionPolicy, ImageCache};
use artisan_market_storefront::config::{ProfileApiConfig, StorefrontConfig, parse_base_url};
use artisan_market_storefront::image_cache::MokaImageCache;
use artisan_market_storefront::state::AppState;
use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Path, State},
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::Value;
use tower::ServiceExt;

/// Largest response body read by the helpers.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

// =============================================================================
// Fake profile API
// =============================================================================

/// Scripted stand-in for the remote profile API.
#[derive(Clone, Default)]
pub struct FakeProfileApi {
    inner: Arc<FakeApiInner>,
}

#[derive(Default)]
struct FakeApiInner {
    /// Body of `GET /db/all`; `None` answers 500.
    profiles: Option<Value>,
    /// Bodies of `GET /user/{id}/profile`; missing ids answer 404.
    profile_details: HashMap<String, Value>,
    /// Bodies of `GET /user/{id}/media`; missing ids answer 404.
    media: HashMap<String, Value>,
    list_hits: AtomicUsize,
    media_hits: AtomicUsize,
}

impl FakeProfileApi {
    /// An API whose list endpoint fails until a body is set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_profiles(self, body: Value) -> Self {
        self.edit(|inner| inner.profiles = Some(body))
    }

    #[must_use]
    pub fn with_profile(self, id: &str, body: Value) -> Self {
        self.edit(|inner| {
            inner.profile_details.insert(id.to_string(), body);
        })
    }

    #[must_use]
    pub fn with_media(self, id: &str, body: Value) -> Self {
        self.edit(|inner| {
            inner.media.insert(id.to_string(), body);
        })
    }

    /// Number of `GET /db/all` requests served.
    #[must_use]
    pub fn list_hits(&self) -> usize {
        self.inner.list_hits.load(Ordering::SeqCst)
    }

    /// Number of `GET /user/{id}/media` requests served.
    #[must_use]
    pub fn media_hits(&self) -> usize {
        self.inner.media_hits.load(Ordering::SeqCst)
    }

    fn edit(self, f: impl FnOnce(&mut FakeApiInner)) -> Self {
        let mut inner = Arc::try_unwrap(self.inner).unwrap_or_else(|_| {
            panic!("FakeProfileApi must be configured before it is started")
        });
        f(&mut inner);
        Self {
            inner: Arc::new(inner),
        }
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/db/all", get(fake_list))
            .route("/user/{id}/profile", get(fake_profile))
            .route("/user/{id}/media", get(fake_media))
            .route("/health", get(|| async { Json(serde_json::json!({ "status": "ok" })) }))
            .with_state(self.clone())
    }

    /// Serve the fake API on an ephemeral local port.
    pub async fn spawn(&self) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake profile API");
        let addr = listener.local_addr().expect("fake profile API address");
        let router = self.router();
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("fake profile API server");
        });
        addr
    }
}

async fn fake_list(State(api): State<FakeProfileApi>) -> Response {
    api.inner.list_hits.fetch_add(1, Ordering::SeqCst);
    api.inner.profiles.clone().map_or_else(
        || (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response(),
        |body| Json(body).into_response(),
    )
}

async fn fake_profile(State(api): State<FakeProfileApi>, Path(id): Path<String>) -> Response {
    api.inner.profile_details.get(&id).cloned().map_or_else(
        || (StatusCode::NOT_FOUND, "Profile not found").into_response(),
        |body| Json(body).into_response(),
    )
}

async fn fake_media(State(api): State<FakeProfileApi>, Path(id): Path<String>) -> Response {
    api.inner.media_hits.fetch_add(1, Ordering::SeqCst);
    api.inner.media.get(&id).cloned().map_or_else(
        || (StatusCode::NOT_FOUND, "No media").into_response(),
        |body| Json(body).into_response(),
    )
}

// =============================================================================
// Storefront under test
// =============================================================================

/// A storefront router wired to a running fake profile API.
pub struct TestContext {
    pub api: FakeProfileApi,
    pub images: Arc<MokaImageCache>,
    app: Router,
}

/// A response with its body read to text.
pub struct Page {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl Page {
    /// The `Location` header, for redirects.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get("location")
            .and_then(|value| value.to_str().ok())
    }
}

impl TestContext {
    /// Start `api` and build a storefront without demo artisans.
    pub async fn start(api: FakeProfileApi) -> Self {
        Self::start_with(api, false).await
    }

    /// Start `api` and build a storefront, optionally with demo artisans.
    pub async fn start_with(api: FakeProfileApi, demo_catalog: bool) -> Self {
        let addr = api.spawn().await;
        let config = test_config(&format!("http://{addr}"), demo_catalog);
        let images = Arc::new(MokaImageCache::new(config.image_cache));
        let shared: Arc<dyn ImageCache> = images.clone();
        let app = artisan_market_storefront::app(AppState::with_image_cache(&config, shared));

        Self { api, images, app }
    }

    /// Send a request through the router.
    pub async fn send(&self, request: Request<Body>) -> Page {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .expect("read response body");

        Page {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// `GET` a path.
    pub async fn get(&self, uri: &str) -> Page {
        self.send(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
    }
}

/// Storefront configuration pointing at a local profile API.
#[must_use]
pub fn test_config(profile_api_url: &str, demo_catalog: bool) -> StorefrontConfig {
    StorefrontConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        profile_api: ProfileApiConfig {
            base_url: parse_base_url(profile_api_url).expect("valid profile API URL"),
            cache_ttl: Duration::from_secs(60),
        },
        image_cache: EvictionPolicy::Unbounded,
        demo_catalog,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Multipart body with one file field.
#[must_use]
pub fn multipart_body(boundary: &str, field: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"upload\"\r\nContent-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}
