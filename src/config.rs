//! Service-location configuration for the remote gateways.
//!
//! The base URLs are carried in an explicit struct injected at construction
//! time; there is no ambient global state to mutate.

use std::env;
use std::time::Duration;

/// Where to find the remote collaborators, and how long to wait for them.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Identity registry base URL, e.g. `"http://user-api-dev:3000"`.
    pub identity_base_url: String,

    /// Cart store base URL, e.g. `"http://cart-api-dev:5020"`.
    pub cart_base_url: String,

    /// Per-request timeout for both gateways.
    pub request_timeout: Duration,
}

impl GatewayConfig {
    /// Reads `USER_SERVICE_URL` and `CART_SERVICE_URL` from the environment,
    /// falling back to the conventional in-cluster addresses.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            identity_base_url: env::var("USER_SERVICE_URL")
                .unwrap_or(defaults.identity_base_url),
            cart_base_url: env::var("CART_SERVICE_URL").unwrap_or(defaults.cart_base_url),
            request_timeout: defaults.request_timeout,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            identity_base_url: "http://user-api-dev:3000".to_string(),
            cart_base_url: "http://cart-api-dev:5020".to_string(),
            request_timeout: Duration::from_secs(5),
        }
    }
}
