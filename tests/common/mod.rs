#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use campus_market_lib::api::config::Config;
use campus_market_lib::api::server::build_router;
use campus_market_lib::api::state::AppState;
use campus_market_lib::data::database::Database;
use campus_market_lib::data::models::business::NewBusiness;
use campus_market_lib::data::models::product::{NewProduct, Product};
use campus_market_lib::data::models::user::{AccountType, User};
use campus_market_lib::data::repos::implementors::product_repo::ProductRepo;
use campus_market_lib::data::repos::traits::repository::Repository;
use campus_market_lib::services::business_service::BusinessService;
use campus_market_lib::services::product_service::ProductService;
use campus_market_lib::services::user_service::UserService;
use campus_market_lib::utils::validation::Registration;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::atomic::{AtomicU32, Ordering};
use tempfile::TempDir;
use tower::ServiceExt;

pub const PASSWORD: &str = "secret12";
pub const JWT_SECRET: &str = "test-secret";

static NEXT_INDEX: AtomicU32 = AtomicU32::new(20_000_000);

/// A fresh SQLite database in a temp dir plus the full router on top of it.
pub struct TestApp {
    _dir: TempDir,
    pub db: Database,
    pub state: AppState,
    pub router: Router,
}

pub fn test_config(database_url: &str) -> Config {
    let database_url = database_url.to_string();
    Config::from_lookup(move |key| match key {
        "DATABASE_URL" => Some(database_url.clone()),
        "JWT_SECRET" => Some(JWT_SECRET.to_string()),
        "DATABASE_POOL_SIZE" => Some("4".to_string()),
        _ => None,
    })
    .expect("Test configuration should be valid")
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("market.db");
        let url = path.to_str().expect("Temp path is not UTF-8").to_string();

        let config = test_config(&url);
        let db = Database::new(&config.database_url, config.database_pool_size)
            .expect("Failed to open database");
        db.ensure_schema().await.expect("Failed to create schema");

        let state = AppState::new(db.clone(), config);
        let router = build_router(state.clone()).expect("Failed to build router");

        TestApp {
            _dir: dir,
            db,
            state,
            router,
        }
    }

    async fn register_as(&self, username: &str, account_type: AccountType) -> (User, String) {
        let index = NEXT_INDEX.fetch_add(1, Ordering::SeqCst).to_string();
        let email = format!("{username}@st.knust.edu.gh");

        let user = UserService::new(&self.db)
            .register(
                &Registration {
                    username: username.to_string(),
                    email,
                    password: PASSWORD.to_string(),
                    confirm_password: PASSWORD.to_string(),
                    first_name: "Test".to_string(),
                    last_name: "Student".to_string(),
                    index_number: index,
                    hall_of_residence: "Unity Hall".to_string(),
                    department: "Computer Engineering".to_string(),
                    phone_number: "0241234567".to_string(),
                },
                account_type,
            )
            .await
            .expect("Failed to register user");

        let token = self
            .state
            .jwt
            .generate_token(&user)
            .expect("Failed to generate token");

        (user, token)
    }

    /// Plain buyer account. Returns the user id and a bearer token.
    pub async fn register_user(&self, username: &str) -> (i32, String) {
        let (user, token) = self.register_as(username, AccountType::User).await;
        (user.id, token)
    }

    pub async fn register_owner(&self, username: &str) -> (i32, String) {
        let (user, token) = self.register_as(username, AccountType::BusinessOwner).await;
        (user.id, token)
    }

    pub async fn create_business(&self, owner_user_id: i32, name: &str) -> i32 {
        BusinessService::new(&self.db)
            .create_business(
                owner_user_id,
                NewBusiness {
                    owner_id: 0,
                    name,
                    description: Some("Home-cooked meals"),
                    category: "Food & Drinks",
                    location: "Unity Hall",
                    contact_number: "0241234567",
                    whatsapp_link: None,
                    instagram_handle: None,
                    logo_url: None,
                },
            )
            .await
            .expect("Failed to create business")
            .business
            .id
    }

    pub async fn create_product(
        &self,
        owner_user_id: i32,
        business_id: i32,
        name: &str,
        price_cents: i64,
        stock_quantity: i32,
    ) -> i32 {
        ProductService::new(&self.db)
            .create_product(
                owner_user_id,
                NewProduct {
                    business_id,
                    name,
                    description: None,
                    price_cents,
                    image_url: None,
                    category: "Food & Drinks",
                    stock_quantity,
                    is_available: true,
                },
            )
            .await
            .expect("Failed to create product")
            .product
            .id
    }

    pub async fn product(&self, id: i32) -> Product {
        ProductRepo::new(&self.db)
            .get_by_id(id)
            .await
            .expect("Query failed")
            .expect("Product not found")
    }

    pub async fn stock_of(&self, id: i32) -> i32 {
        self.product(id).await.stock_quantity
    }

    /// Sends one request through the router and decodes the JSON body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        send(self.router.clone(), request).await
    }
}

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("Router failed");
    let status = response.status();

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response body is not JSON")
    };

    (status, json)
}
