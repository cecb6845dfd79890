//! HTTP gateway tests.
//!
//! Starts axum stand-ins for the user registry and cart store on port 0 and
//! exercises the real `reqwest`-backed gateways against them, covering all
//! three outcome mappings: 200, 404, and transport/server failure.

use std::time::Duration;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use order_service::config::GatewayConfig;
use order_service::gateway::{
    CartGateway, HttpCartGateway, HttpIdentityGateway, IdentityGateway, Remote,
};

/// Bind to port 0 and return the server's base URL.
async fn start_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn registry_app() -> Router {
    Router::new().route(
        "/users/:id",
        get(|Path(id): Path<u64>| async move {
            match id {
                7 => (StatusCode::OK, Json(json!({ "id": 7, "name": "Alice" }))).into_response(),
                500 => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
                _ => StatusCode::NOT_FOUND.into_response(),
            }
        }),
    )
}

fn cart_app() -> Router {
    Router::new()
        .route(
            "/paniers/user/:id",
            get(|Path(id): Path<u64>| async move {
                match id {
                    7 => (
                        StatusCode::OK,
                        Json(json!([{ "id": 3, "userId": 7, "articles": [] }])),
                    )
                        .into_response(),
                    _ => StatusCode::NOT_FOUND.into_response(),
                }
            }),
        )
        .route(
            "/paniers/:id",
            get(|Path(id): Path<u64>| async move {
                match id {
                    3 => (StatusCode::OK, Json(json!({ "id": 3, "articles": [] }))).into_response(),
                    _ => StatusCode::NOT_FOUND.into_response(),
                }
            }),
        )
}

fn config(identity_base_url: String, cart_base_url: String) -> GatewayConfig {
    GatewayConfig {
        identity_base_url,
        cart_base_url,
        request_timeout: Duration::from_secs(2),
    }
}

#[tokio::test]
async fn identity_gateway_maps_success_and_not_found() {
    let base = start_server(registry_app()).await;
    let gateway = HttpIdentityGateway::new(config(base, String::new()));

    assert_eq!(gateway.check_exists(7).await, Remote::Found(()));
    assert_eq!(gateway.check_exists(42).await, Remote::Absent);

    let profile = gateway.user(7).await;
    assert_eq!(profile, Remote::Found(json!({ "id": 7, "name": "Alice" })));
    assert_eq!(gateway.user(42).await, Remote::Absent);
}

#[tokio::test]
async fn identity_gateway_reports_server_errors_as_unavailable() {
    let base = start_server(registry_app()).await;
    let gateway = HttpIdentityGateway::new(config(base, String::new()));

    // A 500 is not an "absent" answer; the caller must see it as unknown.
    assert!(matches!(
        gateway.check_exists(500).await,
        Remote::Unavailable(_)
    ));
}

#[tokio::test]
async fn identity_gateway_reports_transport_failure_as_unavailable() {
    // Nothing is listening here.
    let gateway = HttpIdentityGateway::new(config(
        "http://127.0.0.1:1".to_string(),
        String::new(),
    ));

    assert!(matches!(
        gateway.check_exists(7).await,
        Remote::Unavailable(_)
    ));
    assert!(matches!(gateway.user(7).await, Remote::Unavailable(_)));
}

#[tokio::test]
async fn cart_gateway_maps_all_three_outcomes() {
    let base = start_server(cart_app()).await;
    let gateway = HttpCartGateway::new(config(String::new(), base));

    let carts = gateway.carts_for_user(7).await;
    assert_eq!(
        carts,
        Remote::Found(json!([{ "id": 3, "userId": 7, "articles": [] }]))
    );
    assert_eq!(gateway.carts_for_user(42).await, Remote::Absent);

    assert_eq!(
        gateway.cart(3).await,
        Remote::Found(json!({ "id": 3, "articles": [] }))
    );
    assert_eq!(gateway.cart(99).await, Remote::Absent);

    let dead = HttpCartGateway::new(config(String::new(), "http://127.0.0.1:1".to_string()));
    assert!(matches!(
        dead.carts_for_user(7).await,
        Remote::Unavailable(_)
    ));
}
