mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use diesel_async::SimpleAsyncConnection;
use serde_json::json;

struct Shop {
    owner_token: String,
    buyer_id: i32,
    buyer_token: String,
    business_id: i32,
    product_id: i32,
}

async fn shop(app: &TestApp, stock: i32) -> Shop {
    let (owner_id, owner_token) = app.register_owner("esi_owner").await;
    let business_id = app.create_business(owner_id, "Esi's Snacks").await;
    let product_id = app.create_product(owner_id, business_id, "Meat pie", 1250, stock).await;
    let (buyer_id, buyer_token) = app.register_user("kojo_buyer").await;

    Shop {
        owner_token,
        buyer_id,
        buyer_token,
        business_id,
        product_id,
    }
}

#[tokio::test]
async fn test_order_lifecycle_stock_round_trip() {
    let app = TestApp::new().await;
    let shop = shop(&app, 5).await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/orders",
            Some(&shop.buyer_token),
            Some(json!({
                "business_id": shop.business_id,
                "items": [{ "product_id": shop.product_id, "quantity": 3 }],
                "delivery_address": "Katanga Hall, Block B"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], "Order created successfully");
    assert_eq!(body["order"]["status"], "pending");
    assert_eq!(body["order"]["total_amount"], "37.50");
    assert_eq!(body["order"]["items"][0]["unit_price"], "12.50");
    assert_eq!(body["order"]["items"][0]["product_name"], "Meat pie");
    assert_eq!(app.stock_of(shop.product_id).await, 2);

    let order_id = body["order"]["id"].as_i64().expect("Order id");

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/orders/{order_id}/cancel"),
            Some(&shop.buyer_token),
            Some(json!({ "reason": "Ordered by mistake" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["order"]["status"], "cancelled");
    assert_eq!(body["order"]["cancellation_reason"], "Ordered by mistake");
    assert_eq!(app.stock_of(shop.product_id).await, 5);

    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/api/orders/{order_id}/cancel"),
            Some(&shop.buyer_token),
            Some(json!({})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.stock_of(shop.product_id).await, 5);
}

#[tokio::test]
async fn test_unknown_status_is_rejected_and_order_unchanged() {
    let app = TestApp::new().await;
    let shop = shop(&app, 5).await;

    let (_, body) = app
        .request(
            Method::POST,
            "/api/orders",
            Some(&shop.buyer_token),
            Some(json!({
                "business_id": shop.business_id,
                "items": [{ "product_id": shop.product_id, "quantity": 1 }],
                "delivery_address": "Katanga Hall"
            })),
        )
        .await;
    let order_id = body["order"]["id"].as_i64().expect("Order id");

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/orders/{order_id}/status"),
            Some(&shop.owner_token),
            Some(json!({ "status": "shipped" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid order status: shipped");

    let (status, body) = app
        .request(
            Method::GET,
            &format!("/api/orders/{order_id}"),
            Some(&shop.buyer_token),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "pending");
}

#[tokio::test]
async fn test_owner_advances_status() {
    let app = TestApp::new().await;
    let shop = shop(&app, 5).await;

    let (_, body) = app
        .request(
            Method::POST,
            "/api/orders",
            Some(&shop.buyer_token),
            Some(json!({
                "business_id": shop.business_id,
                "items": [{ "product_id": shop.product_id, "quantity": 1 }],
                "delivery_address": "Katanga Hall"
            })),
        )
        .await;
    let order_id = body["order"]["id"].as_i64().expect("Order id");
    let uri = format!("/api/orders/{order_id}/status");

    let (status, body) = app
        .request(
            Method::PUT,
            &uri,
            Some(&shop.owner_token),
            Some(json!({ "status": "confirmed" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order status updated successfully");
    assert_eq!(body["order"]["status"], "confirmed");

    let (status, _) = app
        .request(
            Method::PUT,
            &uri,
            Some(&shop.owner_token),
            Some(json!({ "status": "pending" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .request(
            Method::PUT,
            &uri,
            Some(&shop.buyer_token),
            Some(json!({ "status": "ready" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_order_errors() {
    let app = TestApp::new().await;
    let shop = shop(&app, 2).await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/orders",
            Some(&shop.buyer_token),
            Some(json!({
                "business_id": shop.business_id,
                "items": [{ "product_id": shop.product_id, "quantity": 3 }],
                "delivery_address": "Katanga Hall"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");
    assert_eq!(app.stock_of(shop.product_id).await, 2);

    let (status, body) = app
        .request(
            Method::POST,
            "/api/orders",
            Some(&shop.buyer_token),
            Some(json!({
                "business_id": shop.business_id,
                "items": [],
                "delivery_address": ""
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"].as_array().map(Vec::len), Some(2));

    let (status, _) = app
        .request(
            Method::POST,
            "/api/orders",
            Some(&shop.buyer_token),
            Some(json!({
                "user_id": shop.buyer_id + 1,
                "business_id": shop.business_id,
                "items": [{ "product_id": shop.product_id, "quantity": 1 }],
                "delivery_address": "Katanga Hall"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/orders",
            Some(&shop.buyer_token),
            Some(json!({
                "business_id": shop.business_id,
                "items": [{ "product_id": shop.product_id, "quantity": 1, "unit_price": "1.00" }],
                "delivery_address": "Katanga Hall"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/orders",
            None,
            Some(json!({
                "business_id": shop.business_id,
                "items": [{ "product_id": shop.product_id, "quantity": 1 }],
                "delivery_address": "Katanga Hall"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_order_is_not_found() {
    let app = TestApp::new().await;
    let shop = shop(&app, 1).await;

    let (status, _) = app
        .request(Method::GET, "/api/orders/999", Some(&shop.buyer_token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(
            Method::PUT,
            "/api/orders/999/status",
            Some(&shop.owner_token),
            Some(json!({ "status": "confirmed" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(
            Method::PUT,
            "/api/orders/999/cancel",
            Some(&shop.buyer_token),
            Some(json!({ "reason": "gone" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_order_listings() {
    let app = TestApp::new().await;
    let shop = shop(&app, 5).await;

    let (status, _) = app
        .request(
            Method::PUT,
            "/api/auth/profile",
            Some(&shop.buyer_token),
            Some(json!({ "firstName": "Kojo", "lastName": "Asante" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    for quantity in [1, 2] {
        let (status, _) = app
            .request(
                Method::POST,
                "/api/orders",
                Some(&shop.buyer_token),
                Some(json!({
                    "business_id": shop.business_id,
                    "items": [{ "product_id": shop.product_id, "quantity": quantity }],
                    "delivery_address": "Katanga Hall"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app
        .request(Method::GET, "/api/orders", Some(&shop.buyer_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let (status, body) = app
        .request(
            Method::GET,
            &format!("/api/businesses/{}/orders", shop.business_id),
            Some(&shop.owner_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().expect("Expected a list");
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert_eq!(row["user_id"], shop.buyer_id);
        assert_eq!(row["buyer_first_name"], "Kojo");
        assert_eq!(row["buyer_last_name"], "Asante");
        assert_eq!(row["business_name"], "Esi's Snacks");
    }

    let order_id = rows[0]["id"].as_i64().expect("Order id");
    let (status, body) = app
        .request(
            Method::GET,
            &format!("/api/orders/{order_id}"),
            Some(&shop.owner_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["buyer_first_name"], "Kojo");
    assert_eq!(body["buyer_last_name"], "Asante");

    let (status, _) = app
        .request(
            Method::GET,
            &format!("/api/businesses/{}/orders", shop.business_id),
            Some(&shop.buyer_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .request(
            Method::GET,
            &format!("/api/users/{}/orders", shop.buyer_id),
            Some(&shop.buyer_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let (status, _) = app
        .request(
            Method::GET,
            &format!("/api/users/{}/orders", shop.buyer_id),
            Some(&shop.owner_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_store_failures_name_the_failed_action() {
    let app = TestApp::new().await;
    let shop = shop(&app, 5).await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/orders",
            Some(&shop.buyer_token),
            Some(json!({
                "business_id": shop.business_id,
                "items": [{ "product_id": shop.product_id, "quantity": 1 }],
                "delivery_address": "Katanga Hall"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let order_id = body["order"]["id"].as_i64().expect("Order id");

    let mut conn = app.db.get_connection().await.expect("No connection");
    conn.batch_execute("DROP TABLE order_items")
        .await
        .expect("Drop failed");
    drop(conn);

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/orders/{order_id}/status"),
            Some(&shop.owner_token),
            Some(json!({ "status": "confirmed" })),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Error updating order status");

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/orders/{order_id}/cancel"),
            Some(&shop.buyer_token),
            Some(json!({})),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Error cancelling order");
    assert_eq!(app.stock_of(shop.product_id).await, 4);
}
