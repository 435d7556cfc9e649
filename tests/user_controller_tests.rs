mod common;

use axum::http::{Method, StatusCode};
use common::{PASSWORD, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_list_users_shows_public_fields_only() {
    let app = TestApp::new().await;
    app.register_user("first_user").await;
    app.register_user("second_user").await;

    let (status, body) = app.request(Method::GET, "/api/users?limit=1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().expect("Expected a list");
    assert_eq!(rows.len(), 1);
    assert!(rows[0].get("email").is_none());
    assert!(rows[0].get("phoneNumber").is_none());
    assert!(rows[0].get("username").is_some());
}

#[tokio::test]
async fn test_get_user_full_for_self_public_for_others() {
    let app = TestApp::new().await;
    let (me, my_token) = app.register_user("self_viewer").await;
    let (other, _) = app.register_user("other_person").await;

    let (status, body) = app
        .request(Method::GET, &format!("/api/users/{me}"), Some(&my_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "self_viewer@st.knust.edu.gh");

    let (status, body) = app
        .request(Method::GET, &format!("/api/users/{other}"), Some(&my_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("email").is_none());

    let (status, _) = app
        .request(Method::GET, "/api/users/5000", Some(&my_token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_users_can_only_edit_themselves() {
    let app = TestApp::new().await;
    let (me, my_token) = app.register_user("editor").await;
    let (other, _) = app.register_user("edited").await;

    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/api/users/{other}"),
            Some(&my_token),
            Some(json!({ "firstName": "Hacked" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/users/{me}"),
            Some(&my_token),
            Some(json!({ "firstName": "Efo", "hallOfResidence": "Republic Hall" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["user"]["firstName"], "Efo");
    assert_eq!(body["user"]["hallOfResidence"], "Republic Hall");

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/users/{me}"),
            Some(&my_token),
            Some(json!({ "firstName": "E" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0], "First name must be at least 2 characters long");
}

#[tokio::test]
async fn test_deleted_user_cannot_log_in() {
    let app = TestApp::new().await;
    let (me, my_token) = app.register_user("leaver").await;
    let (other, _) = app.register_user("stayer").await;

    let (status, _) = app
        .request(Method::DELETE, &format!("/api/users/{other}"), Some(&my_token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request(Method::DELETE, &format!("/api/users/{me}"), Some(&my_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "leaver", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request(Method::GET, "/api/auth/verify", Some(&my_token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The username stays taken after deactivation.
    let (status, _) = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "username": "leaver",
                "email": "new_leaver@st.knust.edu.gh",
                "password": PASSWORD,
                "confirmPassword": PASSWORD,
                "firstName": "New",
                "lastName": "Leaver",
                "indexNumber": "40512345",
                "hallOfResidence": "Unity Hall",
                "department": "Law",
                "phoneNumber": "0201234567"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_become_business_owner_once() {
    let app = TestApp::new().await;
    let (me, my_token) = app.register_user("upgrader").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/users/me/business-owner",
            Some(&my_token),
            Some(json!({ "business_license_number": "BN-2024-001" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["user_id"], me);
    assert_eq!(body["business_license_number"], "BN-2024-001");

    let (_, body) = app.request(Method::GET, "/api/auth/me", Some(&my_token), None).await;
    assert_eq!(body["accountType"], "business_owner");

    let (status, _) = app
        .request(
            Method::POST,
            "/api/users/me/business-owner",
            Some(&my_token),
            Some(json!({})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/businesses",
            Some(&my_token),
            Some(json!({
                "name": "Upgraded Shop",
                "category": "Other",
                "location": "Brunei",
                "contact_number": "0241112222"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}
