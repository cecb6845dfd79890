//! HTTP client for the shopping-cart store.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::GatewayConfig;
use crate::gateway::{CartGateway, Remote};

/// Gateway to the cart store over HTTP.
///
/// Same three-outcome contract as the identity gateway:
/// `GET {base}/paniers/user/{id}` and `GET {base}/paniers/{id}`, with 200 as
/// [`Remote::Found`], 404 as [`Remote::Absent`], anything else as
/// [`Remote::Unavailable`].
#[derive(Debug, Clone)]
pub struct HttpCartGateway {
    http: Client,
    config: GatewayConfig,
}

impl HttpCartGateway {
    /// Creates a gateway with its own connection pool.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Creates a gateway sharing an existing connection pool.
    pub fn with_client(http: Client, config: GatewayConfig) -> Self {
        Self { http, config }
    }

    async fn fetch(&self, url: String) -> Remote<Value> {
        let response = match self
            .http
            .get(&url)
            .timeout(self.config.request_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Remote::Unavailable(e.to_string()),
        };

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!(%url, "no cart data found");
                Remote::Absent
            }
            status if status.is_success() => match response.json::<Value>().await {
                Ok(payload) => Remote::Found(payload),
                Err(e) => Remote::Unavailable(format!("malformed cart payload: {e}")),
            },
            status => Remote::Unavailable(format!("cart store answered {status}")),
        }
    }
}

#[async_trait]
impl CartGateway for HttpCartGateway {
    async fn carts_for_user(&self, user_id: u64) -> Remote<Value> {
        let url = format!("{}/paniers/user/{user_id}", self.config.cart_base_url);
        self.fetch(url).await
    }

    async fn cart(&self, cart_id: u64) -> Remote<Value> {
        let url = format!("{}/paniers/{cart_id}", self.config.cart_base_url);
        self.fetch(url).await
    }
}
