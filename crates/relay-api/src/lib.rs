//! # relay-api
//!
//! HTTP API layer for the Paytm order relay.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Liveness text |
//! | POST | `/api/paytm/create-order` | Create order, initiate transaction |
//! | POST | `/api/paytm/callback` | Gateway callback receiver |
//! | POST | `/api/paytm/status` | Transaction status check |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
