//! # Application State
//!
//! Shared state for the Axum application: the gateway client, the order
//! store, and the merchant configuration. Everything is constructed once at
//! startup and passed by reference into handlers; no ambient globals.

use relay_core::{BoxedGateway, BoxedOrderStore, InMemoryOrderStore};
use relay_paytm::{PaytmConfig, PaytmGateway};
use std::sync::Arc;

/// Listener configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Upstream gateway client
    pub gateway: BoxedGateway,
    /// Order persistence
    pub store: BoxedOrderStore,
    /// Merchant configuration
    pub paytm: Arc<PaytmConfig>,
    /// Listener config
    pub config: AppConfig,
}

impl AppState {
    /// Create state from the environment with the real gateway client and
    /// the in-memory order store
    pub fn from_env() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let paytm =
            PaytmConfig::from_env().map_err(|e| anyhow::anyhow!("Failed to load Paytm config: {e}"))?;

        let gateway = Arc::new(PaytmGateway::new(paytm.clone()));
        let store = Arc::new(InMemoryOrderStore::new());

        Ok(Self::with_parts(gateway, store, paytm, config))
    }

    /// Construct with explicit collaborators (for testing)
    pub fn with_parts(
        gateway: BoxedGateway,
        store: BoxedOrderStore,
        paytm: PaytmConfig,
        config: AppConfig,
    ) -> Self {
        Self {
            gateway,
            store,
            paytm: Arc::new(paytm),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 4000);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 4000,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.to_string(), "127.0.0.1:4000");
    }
}
