mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use campus_market_lib::data::models::schema::{business_owners, users};
use campus_market_lib::security::jwt::AccessClaims;
use common::{PASSWORD, TestApp, send};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde_json::{Value, json};

fn registration(username: &str, index_number: &str) -> Value {
    json!({
        "username": username,
        "email": format!("{username}@st.knust.edu.gh"),
        "password": PASSWORD,
        "confirmPassword": PASSWORD,
        "firstName": "Abena",
        "lastName": "Mensah",
        "indexNumber": index_number,
        "hallOfResidence": "Africa Hall",
        "department": "Pharmacy",
        "phoneNumber": "0501234567"
    })
}

async fn user_count(app: &TestApp) -> i64 {
    let mut conn = app.db.get_connection().await.expect("No connection");
    users::table
        .count()
        .get_result(&mut conn)
        .await
        .expect("Count failed")
}

#[tokio::test]
async fn test_register_returns_user_token_and_cookie() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(registration("abena", "30512345").to_string()))
        .expect("Failed to build request");

    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .expect("Router failed");

    assert_eq!(response.status(), StatusCode::CREATED);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("Set-Cookie missing")
        .to_string();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));

    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .expect("Failed to read body")
        .to_bytes();
    let body: Value = serde_json::from_slice(&bytes).expect("Body is not JSON");

    assert_eq!(body["message"], "Registration successful");
    assert_eq!(body["user"]["username"], "abena");
    assert_eq!(body["user"]["accountType"], "user");
    assert!(body["user"].get("passwordHash").is_none());

    let claims: AccessClaims = app
        .state
        .jwt
        .decode_token(body["token"].as_str().expect("Token missing"))
        .expect("Token should decode");
    assert_eq!(claims.username, "abena");
}

#[tokio::test]
async fn test_register_business_owner_creates_owner_record() {
    let app = TestApp::new().await;

    let mut payload = registration("yaa_owner", "30512346");
    payload["accountType"] = json!("business_owner");

    let (status, body) = app
        .request(Method::POST, "/api/auth/register", None, Some(payload))
        .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["user"]["accountType"], "business_owner");

    let user_id = body["user"]["id"].as_i64().expect("User id") as i32;
    let mut conn = app.db.get_connection().await.expect("No connection");
    let owners: i64 = business_owners::table
        .filter(business_owners::user_id.eq(user_id))
        .count()
        .get_result(&mut conn)
        .await
        .expect("Count failed");
    assert_eq!(owners, 1);
}

#[tokio::test]
async fn test_duplicate_username_is_conflict_and_inserts_nothing() {
    let app = TestApp::new().await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(registration("kwesi", "30512347")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user_count(&app).await, 1);

    let mut duplicate = registration("kwesi", "30512348");
    duplicate["email"] = json!("another@st.knust.edu.gh");

    let (status, body) = app
        .request(Method::POST, "/api/auth/register", None, Some(duplicate))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        "User already exists with this username, email, or index number"
    );
    assert_eq!(user_count(&app).await, 1);
}

#[tokio::test]
async fn test_register_reports_every_validation_failure() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "username": "ab",
                "email": "not-an-email",
                "password": "short",
                "confirmPassword": "different"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    let details = body["details"].as_array().expect("Details missing");
    assert!(details.len() >= 5);
    assert!(details.iter().any(|d| d == "Please provide a valid email address"));
    assert_eq!(user_count(&app).await, 0);
}

#[tokio::test]
async fn test_register_rejects_unknown_account_type() {
    let app = TestApp::new().await;

    let mut payload = registration("akosua", "30512349");
    payload["accountType"] = json!("admin");

    let (status, _) = app
        .request(Method::POST, "/api/auth/register", None, Some(payload))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(user_count(&app).await, 0);
}

#[tokio::test]
async fn test_login_by_username_or_email() {
    let app = TestApp::new().await;
    app.register_user("nana").await;

    for identifier in ["nana", "nana@st.knust.edu.gh"] {
        let (status, body) = app
            .request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "username": identifier, "password": PASSWORD })),
            )
            .await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["message"], "Login successful");
        assert!(body["token"].as_str().is_some());
    }

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "nana", "password": "wrong123" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid username or password");

    let (status, _) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "", "password": "" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_accepts_bearer_and_cookie() {
    let app = TestApp::new().await;
    let (user_id, token) = app.register_user("efua").await;

    let (status, body) = app
        .request(Method::GET, "/api/auth/me", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user_id);
    assert_eq!(body["username"], "efua");

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/auth/me")
        .header(header::COOKIE, format!("token={token}"))
        .body(Body::empty())
        .expect("Failed to build request");
    let (status, body) = send(app.router.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "efua");
}

#[tokio::test]
async fn test_rejects_missing_malformed_and_expired_tokens() {
    let app = TestApp::new().await;
    let (user_id, _) = app.register_user("kweku").await;

    let (status, body) = app.request(Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Access token required");

    let (status, body) = app
        .request(Method::GET, "/api/auth/me", Some("not.a.jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");

    let now = chrono::Utc::now().timestamp() as usize;
    let expired = app
        .state
        .jwt
        .encode_claims(&AccessClaims {
            sub: user_id,
            username: "kweku".to_string(),
            account_type: "user".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        })
        .expect("Failed to encode");

    let (status, body) = app
        .request(Method::GET, "/api/auth/me", Some(&expired), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token expired");
}

#[tokio::test]
async fn test_change_password_then_login_with_new_one() {
    let app = TestApp::new().await;
    let (_, token) = app.register_user("adjoa").await;

    let (status, body) = app
        .request(
            Method::PUT,
            "/api/auth/change-password",
            Some(&token),
            Some(json!({ "currentPassword": "wrong123", "newPassword": "newpass99" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Current password is incorrect");

    let (status, _) = app
        .request(
            Method::PUT,
            "/api/auth/change-password",
            Some(&token),
            Some(json!({
                "currentPassword": PASSWORD,
                "newPassword": "newpass99",
                "confirmPassword": "newpass99"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "adjoa", "password": "newpass99" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_profile_and_verify() {
    let app = TestApp::new().await;
    let (_, token) = app.register_user("mawuli").await;

    let (status, body) = app
        .request(
            Method::PUT,
            "/api/auth/profile",
            Some(&token),
            Some(json!({ "department": "Geomatic Engineering", "username": "ignored" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["user"]["department"], "Geomatic Engineering");
    assert_eq!(body["user"]["username"], "mawuli");

    let (status, _) = app
        .request(Method::PUT, "/api/auth/profile", Some(&token), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .request(Method::GET, "/api/auth/verify", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/logout")
        .body(Body::empty())
        .expect("Failed to build request");

    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .expect("Router failed");

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("Set-Cookie missing");
    assert!(cookie.starts_with("token="));
}
