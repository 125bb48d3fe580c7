//! # Transaction Gateway Trait
//!
//! Seam between the relay and the external payment gateway. The gateway owns
//! the actual transaction state machine; this trait only covers the two
//! upstream calls the relay forwards: initiate-transaction and order status.
//!
//! The HTTP implementation lives in `relay-paytm`; tests substitute a stub.

use crate::error::RelayResult;
use crate::order::{Money, OrderStatus};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Outcome of a successful initiate-transaction call
#[derive(Debug, Clone)]
pub struct InitiateReceipt {
    /// Transaction token issued by the gateway
    pub txn_token: String,
    /// Raw gateway response body, kept for audit
    pub raw: Value,
}

/// Outcome of a status-check call
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    /// Gateway result status normalized into the local enumeration
    pub status: OrderStatus,
    /// The gateway's result-info substructure
    pub result_info: Value,
    /// Raw gateway response body
    pub raw: Value,
}

/// Upstream calls the relay delegates to the external gateway
#[async_trait]
pub trait TransactionGateway: Send + Sync {
    /// Submit a signed initiate-transaction request for a new order.
    ///
    /// Returns a receipt with the transaction token when the gateway reports
    /// success; a non-success result becomes `RelayError::GatewayRejected`
    /// carrying the raw body, and transport or parse failures become
    /// `RelayError::Upstream`.
    async fn initiate(
        &self,
        order_id: &str,
        amount: &Money,
        customer_id: &str,
    ) -> RelayResult<InitiateReceipt>;

    /// Submit a signed status query for an existing order
    async fn status(&self, order_id: &str) -> RelayResult<StatusSnapshot>;

    /// Gateway name (for logging)
    fn gateway_name(&self) -> &'static str;
}

/// Type alias for a shared gateway handle (dynamic dispatch)
pub type BoxedGateway = Arc<dyn TransactionGateway>;
