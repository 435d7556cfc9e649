mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_create_product_requires_business_ownership() {
    let app = TestApp::new().await;
    let (owner_id, owner_token) = app.register_owner("gadget_owner").await;
    let (_, rival_token) = app.register_owner("rival_owner").await;
    let business_id = app.create_business(owner_id, "Gadget Hub").await;

    let payload = json!({
        "business_id": business_id,
        "name": "USB-C cable",
        "price": "25.00",
        "category": "Electronics",
        "stock_quantity": 12
    });

    let (status, _) = app
        .request(Method::POST, "/api/products", Some(&rival_token), Some(payload.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .request(Method::POST, "/api/products", Some(&owner_token), Some(payload))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["product"]["price"], "25.00");
    assert_eq!(body["product"]["stock_quantity"], 12);
    assert_eq!(body["product"]["is_available"], true);
    assert_eq!(body["product"]["business_name"], "Gadget Hub");

    let (status, _) = app
        .request(
            Method::POST,
            "/api/products",
            Some(&owner_token),
            Some(json!({
                "business_id": 9999,
                "name": "Ghost",
                "price": "1.00",
                "category": "Other"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_product_validation() {
    let app = TestApp::new().await;
    let (owner_id, owner_token) = app.register_owner("gadget_owner").await;
    let business_id = app.create_business(owner_id, "Gadget Hub").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/products",
            Some(&owner_token),
            Some(json!({
                "business_id": business_id,
                "name": "",
                "price": "-3.00",
                "category": "Electronics",
                "stock_quantity": -1
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_update_and_soft_delete_product() {
    let app = TestApp::new().await;
    let (owner_id, owner_token) = app.register_owner("gadget_owner").await;
    let (_, buyer_token) = app.register_user("gadget_buyer").await;
    let business_id = app.create_business(owner_id, "Gadget Hub").await;
    let product_id = app.create_product(owner_id, business_id, "Earbuds", 8000, 3).await;
    let uri = format!("/api/products/{product_id}");

    let (status, _) = app
        .request(Method::PUT, &uri, Some(&buyer_token), Some(json!({ "price": "1.00" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .request(
            Method::PUT,
            &uri,
            Some(&owner_token),
            Some(json!({ "price": "75.50", "stock_quantity": 9 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["product"]["price"], "75.50");
    assert_eq!(app.product(product_id).await.price_cents, 7550);
    assert_eq!(app.stock_of(product_id).await, 9);

    let (status, _) = app
        .request(Method::PUT, &uri, Some(&owner_token), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.request(Method::DELETE, &uri, Some(&buyer_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.request(Method::DELETE, &uri, Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.request(Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_search_and_filters() {
    let app = TestApp::new().await;
    let (owner_id, _) = app.register_owner("bookshop_owner").await;
    let books = app.create_business(owner_id, "Book Nook").await;
    let snacks = app.create_business(owner_id, "Snack Bar").await;
    app.create_product(owner_id, books, "Calculus Textbook", 12000, 2).await;
    app.create_product(owner_id, books, "Graph Paper", 200, 50).await;
    app.create_product(owner_id, snacks, "Plantain Chips", 500, 20).await;

    let (_, body) = app
        .request(Method::GET, "/api/products?search=calculus", None, None)
        .await;
    let rows = body.as_array().expect("Expected a list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Calculus Textbook");
    assert_eq!(rows[0]["price"], "120.00");

    let (_, body) = app
        .request(
            Method::GET,
            &format!("/api/products?business_id={books}"),
            None,
            None,
        )
        .await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let (_, body) = app
        .request(Method::GET, "/api/products?limit=2&offset=2", None, None)
        .await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_products_of_deleted_business_disappear() {
    let app = TestApp::new().await;
    let (owner_id, owner_token) = app.register_owner("closing_owner").await;
    let business_id = app.create_business(owner_id, "Closing Down").await;
    let product_id = app.create_product(owner_id, business_id, "Last Item", 100, 1).await;

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/businesses/{business_id}"),
            Some(&owner_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(Method::GET, &format!("/api/products/{product_id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.request(Method::GET, "/api/products", None, None).await;
    assert_eq!(body.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_product_image_must_be_a_url() {
    let app = TestApp::new().await;
    let (owner_id, owner_token) = app.register_owner("photo_owner").await;
    let business_id = app.create_business(owner_id, "Photo Shop").await;

    let payload = |image_url: &str| {
        json!({
            "business_id": business_id,
            "name": "Passport photos",
            "price": "10.00",
            "category": "Services",
            "image_url": image_url
        })
    };

    let (status, body) = app
        .request(
            Method::POST,
            "/api/products",
            Some(&owner_token),
            Some(payload("photos dot jpg")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0], "Please provide a valid image URL");

    let (status, body) = app
        .request(
            Method::POST,
            "/api/products",
            Some(&owner_token),
            Some(payload("https://cdn.example.com/photos.jpg")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["product"]["image_url"], "https://cdn.example.com/photos.jpg");
}
