//! # relay-core
//!
//! Core types and traits for the Paytm order relay.
//!
//! This crate provides:
//! - `Order`, `Money`, and `OrderStatus` for the local order record
//! - `TransactionGateway` trait for the upstream gateway seam
//! - `OrderStore` trait and an in-memory implementation
//! - `RelayError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use relay_core::{Money, Order, OrderStatus, OrderStore};
//!
//! // Create a pending order
//! let order = Order::new(Money::inr(100.0), "cust1");
//!
//! // Initiate against the gateway, then persist
//! let receipt = gateway.initiate(&order.order_id, &order.amount, &order.customer_id).await?;
//! store.create(order.with_token(receipt.txn_token)).await?;
//! ```

pub mod error;
pub mod gateway;
pub mod order;
pub mod store;

// Re-exports for convenience
pub use error::{RelayError, RelayResult};
pub use gateway::{BoxedGateway, InitiateReceipt, StatusSnapshot, TransactionGateway};
pub use order::{generate_order_id, Money, Order, OrderStatus, CURRENCY, ORDER_ID_PREFIX};
pub use store::{BoxedOrderStore, InMemoryOrderStore, OrderStore};
