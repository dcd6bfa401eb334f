//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use chrono::Utc;
use http::{Request, StatusCode, header};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use wishhub_core::config::{AppConfig, AuthConfig};

/// Secret shared between the tests' fake identity provider and the app.
pub const TEST_SECRET: &str = "integration-test-secret";

/// A user persona for tests.
#[derive(Debug, Clone)]
pub struct Persona {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl Persona {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    /// Issues a bearer token for this persona.
    pub fn token(&self) -> String {
        let now = Utc::now().timestamp();
        let claims = serde_json::json!({
            "sub": self.id,
            "name": self.name,
            "email": self.email,
            "iat": now,
            "exp": now + 3600,
        });
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .expect("encode token")
    }
}

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Full state, for driving the realtime engine directly.
    pub state: wishhub_api::AppState,
}

impl TestApp {
    /// Builds a full application over fresh in-memory stores.
    pub fn new() -> Self {
        let config = AppConfig {
            server: Default::default(),
            auth: AuthConfig {
                jwt_secret: TEST_SECRET.to_string(),
                leeway_seconds: 5,
            },
            realtime: Default::default(),
            logging: Default::default(),
        };

        let wishlists = Arc::new(wishhub_store::WishlistRepository::new());
        let products = Arc::new(wishhub_store::ProductRepository::new());
        let users = Arc::new(wishhub_store::UserDirectory::new());
        let membership = Arc::new(wishhub_store::MembershipIndex::new());
        let sagas = Arc::new(wishhub_store::DeletionSagaLog::new());

        let jwt_decoder = Arc::new(wishhub_auth::JwtDecoder::new(&config.auth));

        let policy = Arc::new(wishhub_service::RoomAccessPolicy::new(Arc::clone(
            &wishlists,
        )));
        let realtime = Arc::new(wishhub_realtime::RealtimeEngine::new(
            config.realtime.clone(),
            policy,
        ));

        let resolver = wishhub_service::ViewResolver::new(Arc::clone(&users));
        let wishlist_service = Arc::new(wishhub_service::WishlistService::new(
            Arc::clone(&wishlists),
            Arc::clone(&products),
            Arc::clone(&membership),
            Arc::clone(&sagas),
            resolver.clone(),
            Arc::clone(&realtime.bridge),
        ));
        let product_service = Arc::new(wishhub_service::ProductService::new(
            Arc::clone(&products),
            Arc::clone(&wishlists),
            resolver,
            Arc::clone(&realtime.bridge),
        ));

        let state = wishhub_api::AppState {
            config: Arc::new(config),
            jwt_decoder,
            users,
            wishlist_service,
            product_service,
            realtime,
        };

        Self {
            router: wishhub_api::build_router(state.clone()),
            state,
        }
    }

    /// Issues a request and returns (status, parsed JSON body).
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        persona: Option<&Persona>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(persona) = persona {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", persona.token()));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("route request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("parse body")
        };

        (status, json)
    }
}

/// Creates a wishlist and returns its JSON view (the `data` field).
pub async fn create_wishlist(app: &TestApp, owner: &Persona, name: &str, private: bool) -> Value {
    let (status, body) = app
        .request(
            "POST",
            "/api/wishlists",
            Some(owner),
            Some(serde_json::json!({
                "name": name,
                "description": "integration fixture",
                "isPrivate": private,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "create wishlist: {body}");
    body["data"].clone()
}

/// Adds a product and returns its JSON view.
pub async fn add_product(
    app: &TestApp,
    member: &Persona,
    wishlist_id: &str,
    name: &str,
    price: f64,
) -> Value {
    let (status, body) = app
        .request(
            "POST",
            "/api/products",
            Some(member),
            Some(serde_json::json!({
                "name": name,
                "price": price,
                "wishlistId": wishlist_id,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "add product: {body}");
    body["data"].clone()
}
