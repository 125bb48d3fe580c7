//! # Paytm Configuration
//!
//! Merchant identity and environment selection for the Paytm gateway.
//! All secrets are loaded from environment variables once at startup; the
//! resulting struct is immutable and passed by reference into handlers.

use relay_core::RelayError;
use std::env;

/// Production gateway host
pub const PRODUCTION_HOST: &str = "https://securegw.paytm.in";

/// Staging gateway host
pub const STAGING_HOST: &str = "https://securegw-stage.paytm.in";

/// Which gateway environment the relay targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayEnv {
    Production,
    Staging,
}

impl GatewayEnv {
    /// Label surfaced to callers in create-order responses
    pub fn label(&self) -> &'static str {
        match self {
            GatewayEnv::Production => "production",
            GatewayEnv::Staging => "staging",
        }
    }

    fn default_host(&self) -> &'static str {
        match self {
            GatewayEnv::Production => PRODUCTION_HOST,
            GatewayEnv::Staging => STAGING_HOST,
        }
    }
}

/// Paytm merchant configuration
#[derive(Debug, Clone)]
pub struct PaytmConfig {
    /// Merchant id issued by Paytm
    pub mid: String,

    /// Shared secret used for checksum generation and verification
    pub merchant_key: String,

    /// Website label (WEBSTAGING for test merchants)
    pub website: String,

    /// URL the gateway posts asynchronous callbacks to
    pub callback_url: String,

    /// Industry type id
    pub industry_type: String,

    /// Channel id
    pub channel_id: String,

    /// Selected gateway environment
    pub environment: GatewayEnv,

    /// Gateway host (derived from environment, overridable for tests)
    pub host: String,
}

impl PaytmConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `PAYTM_MID`
    /// - `PAYTM_MERCHANT_KEY`
    /// - `PAYTM_CALLBACK_URL`
    ///
    /// Optional: `PAYTM_WEBSITE` (default `WEBSTAGING`), `PAYTM_INDUSTRY_TYPE`
    /// (default `Retail`), `PAYTM_CHANNEL_ID` (default `WEB`), `PAYTM_ENV`
    /// (`production` or `staging`, default `staging`).
    pub fn from_env() -> Result<Self, RelayError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let mid = env::var("PAYTM_MID")
            .map_err(|_| RelayError::Configuration("PAYTM_MID not set".to_string()))?;

        let merchant_key = env::var("PAYTM_MERCHANT_KEY")
            .map_err(|_| RelayError::Configuration("PAYTM_MERCHANT_KEY not set".to_string()))?;

        let callback_url = env::var("PAYTM_CALLBACK_URL")
            .map_err(|_| RelayError::Configuration("PAYTM_CALLBACK_URL not set".to_string()))?;

        if merchant_key.is_empty() {
            return Err(RelayError::Configuration(
                "PAYTM_MERCHANT_KEY must not be empty".to_string(),
            ));
        }

        let environment = match env::var("PAYTM_ENV").as_deref() {
            Ok("production") | Ok("prod") => GatewayEnv::Production,
            _ => GatewayEnv::Staging,
        };

        Ok(Self {
            mid,
            merchant_key,
            website: env::var("PAYTM_WEBSITE").unwrap_or_else(|_| "WEBSTAGING".to_string()),
            callback_url,
            industry_type: env::var("PAYTM_INDUSTRY_TYPE").unwrap_or_else(|_| "Retail".to_string()),
            channel_id: env::var("PAYTM_CHANNEL_ID").unwrap_or_else(|_| "WEB".to_string()),
            environment,
            host: environment.default_host().to_string(),
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        mid: impl Into<String>,
        merchant_key: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            mid: mid.into(),
            merchant_key: merchant_key.into(),
            website: "WEBSTAGING".to_string(),
            callback_url: callback_url.into(),
            industry_type: "Retail".to_string(),
            channel_id: "WEB".to_string(),
            environment: GatewayEnv::Staging,
            host: STAGING_HOST.to_string(),
        }
    }

    /// Builder: point at a custom gateway host (for testing)
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Check if targeting the production gateway
    pub fn is_production(&self) -> bool {
        self.environment == GatewayEnv::Production
    }

    /// Environment label surfaced in create-order responses
    pub fn env_label(&self) -> &'static str {
        self.environment.label()
    }

    /// Initiate-transaction endpoint, parameterized by merchant and order id
    pub fn initiate_url(&self, order_id: &str) -> String {
        format!(
            "{}/theia/api/v1/initiateTransaction?mid={}&orderId={}",
            self.host, self.mid, order_id
        )
    }

    /// Order-status endpoint
    pub fn status_url(&self) -> String {
        format!("{}/v3/order/status", self.host)
    }
}
