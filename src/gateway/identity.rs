//! HTTP client for the user registry.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::GatewayConfig;
use crate::gateway::{IdentityGateway, Remote};

/// Gateway to the user registry over HTTP.
///
/// `GET {base}/users/{id}`: 200 maps to [`Remote::Found`], 404 to
/// [`Remote::Absent`], everything else to [`Remote::Unavailable`].
/// Cloneable and safe for concurrent use; the inner `reqwest::Client`
/// pools connections and holds no per-call state.
#[derive(Debug, Clone)]
pub struct HttpIdentityGateway {
    http: Client,
    config: GatewayConfig,
}

impl HttpIdentityGateway {
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

    async fn fetch_user(&self, user_id: u64) -> Remote<Value> {
        let url = format!("{}/users/{user_id}", self.config.identity_base_url);
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
                debug!(user_id, "user not found in registry");
                Remote::Absent
            }
            status if status.is_success() => match response.json::<Value>().await {
                Ok(payload) => {
                    debug!(user_id, "user retrieved from registry");
                    Remote::Found(payload)
                }
                Err(e) => Remote::Unavailable(format!("malformed user payload: {e}")),
            },
            status => Remote::Unavailable(format!("registry answered {status}")),
        }
    }
}

#[async_trait]
impl IdentityGateway for HttpIdentityGateway {
    async fn check_exists(&self, user_id: u64) -> Remote<()> {
        match self.fetch_user(user_id).await {
            Remote::Found(_) => Remote::Found(()),
            Remote::Absent => Remote::Absent,
            Remote::Unavailable(reason) => Remote::Unavailable(reason),
        }
    }

    async fn user(&self, user_id: u64) -> Remote<Value> {
        self.fetch_user(user_id).await
    }
}
