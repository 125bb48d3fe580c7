//! # relay-paytm
//!
//! Paytm gateway client for the order relay.
//!
//! This crate provides:
//!
//! 1. **PaytmConfig** - merchant identity, shared secret, and the
//!    environment-selected gateway host, loaded once from the environment
//! 2. **checksum** - signature generation and verification per the gateway's
//!    fixed scheme (HMAC-SHA256 over exact bytes, hex-encoded)
//! 3. **PaytmGateway** - `TransactionGateway` implementation over HTTPS for
//!    initiate-transaction and order-status
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relay_paytm::PaytmGateway;
//! use relay_core::{Money, TransactionGateway};
//!
//! // Create the client from environment
//! let gateway = PaytmGateway::from_env()?;
//!
//! // Initiate a transaction
//! let receipt = gateway.initiate("ORDER_1_1", &Money::inr(100.0), "cust1").await?;
//!
//! // Hand receipt.txn_token to the front-end
//! ```

pub mod checksum;
pub mod client;
pub mod config;

// Re-exports
pub use checksum::{canonical_params, sign, verify, CHECKSUM_FIELD};
pub use client::PaytmGateway;
pub use config::{GatewayEnv, PaytmConfig, PRODUCTION_HOST, STAGING_HOST};
