//! Full end-to-end test: the wired `OrderSystem` with real HTTP gateways
//! talking to local stand-ins for the user registry and cart store.

use std::time::Duration;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde_json::json;

use order_service::config::GatewayConfig;
use order_service::domain::{OrderCreate, OrderItemDraft};
use order_service::runtime::OrderSystem;
use order_service::service::ServiceError;

async fn start_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Registry knows user 7; cart store has one cart for them.
async fn start_remote_services() -> (String, String) {
    let registry = Router::new().route(
        "/users/:id",
        get(|Path(id): Path<u64>| async move {
            if id == 7 {
                (StatusCode::OK, Json(json!({ "id": 7, "name": "Alice" }))).into_response()
            } else {
                StatusCode::NOT_FOUND.into_response()
            }
        }),
    );
    let carts = Router::new().route(
        "/paniers/user/:id",
        get(|Path(id): Path<u64>| async move {
            if id == 7 {
                (StatusCode::OK, Json(json!([{ "id": 1, "userId": 7 }]))).into_response()
            } else {
                StatusCode::NOT_FOUND.into_response()
            }
        }),
    );
    (start_server(registry).await, start_server(carts).await)
}

fn payload(user_id: Option<u64>) -> OrderCreate {
    OrderCreate {
        user_id,
        shipping_address: "1 Main St".into(),
        billing_address: "1 Main St".into(),
        total_amount: Decimal::new(2000, 2),
        status: None,
        items: vec![OrderItemDraft {
            product_id: "SKU1".into(),
            quantity: 2,
            unit_price: Decimal::new(1000, 2),
        }],
    }
}

#[tokio::test]
async fn create_and_enrich_against_live_remote_services() {
    let (registry_url, cart_url) = start_remote_services().await;
    let system = OrderSystem::new(GatewayConfig {
        identity_base_url: registry_url,
        cart_base_url: cart_url,
        request_timeout: Duration::from_secs(2),
    });

    // Creation validates user 7 against the live registry.
    let order = system.orders.create_order(payload(Some(7))).await.unwrap();
    assert_eq!(order.status, "CREATED");
    assert_eq!(order.items[0].total_line, Decimal::new(2000, 2));

    // Enrichment composes both live payloads.
    let view = system
        .orders
        .enriched_order(order.id.unwrap())
        .await
        .unwrap();
    assert_eq!(view.user, Some(json!({ "id": 7, "name": "Alice" })));
    assert_eq!(view.user_carts, Some(json!([{ "id": 1, "userId": 7 }])));

    // An order for a user the registry explicitly denies is rejected.
    let err = system.orders.create_order(payload(Some(42))).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn system_degrades_gracefully_with_both_services_down() {
    // Point both gateways at dead endpoints.
    let system = OrderSystem::new(GatewayConfig {
        identity_base_url: "http://127.0.0.1:1".to_string(),
        cart_base_url: "http://127.0.0.1:1".to_string(),
        request_timeout: Duration::from_millis(500),
    });

    // Creation fails open.
    let order = system.orders.create_order(payload(Some(7))).await.unwrap();
    assert!(order.id.is_some());

    // Enrichment answers with placeholders, not an error.
    let view = system
        .orders
        .enriched_order(order.id.unwrap())
        .await
        .unwrap();
    assert_eq!(view.user, Some(json!({ "error": "User not found" })));
    assert_eq!(view.user_carts, Some(json!({ "info": "No carts found" })));
}
