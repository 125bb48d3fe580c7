//! # Paytm Order Relay
//!
//! Thin backend relay between a merchant front-end and Paytm's hosted
//! transaction APIs.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export PAYTM_MID=...
//! export PAYTM_MERCHANT_KEY=...
//! export PAYTM_CALLBACK_URL=https://merchant.example/api/paytm/callback
//!
//! # Run the server
//! paytm-relay
//! ```

use relay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::from_env()?;
    let addr = state.config.socket_addr();

    info!("Gateway environment: {}", state.paytm.env_label());
    info!("Merchant id: {}", state.paytm.mid);
    info!("Callback URL: {}", state.paytm.callback_url);

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Paytm order relay listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
