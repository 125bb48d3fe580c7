//! # Order Types
//!
//! The local order record and its gateway-driven lifecycle status.
//!
//! An `Order` represents one payment attempt. Its identifier, amount and
//! customer are fixed at creation; the status changes only from data the
//! gateway confirmed (initiation response or a status-check response),
//! never from local guesswork.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix for generated order identifiers
pub const ORDER_ID_PREFIX: &str = "ORDER";

/// The relay accepts exactly one currency
pub const CURRENCY: &str = "INR";

/// A currency-qualified amount, fixed at order creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal string with two fraction digits (e.g. "100.00")
    pub value: String,
    /// ISO currency code
    pub currency: String,
}

impl Money {
    /// Create an INR amount from a numeric value
    pub fn inr(amount: f64) -> Self {
        Self {
            value: format!("{amount:.2}"),
            currency: CURRENCY.to_string(),
        }
    }
}

/// Local order lifecycle status, normalized from the gateway's vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Initiated, outcome not yet confirmed
    Pending,
    /// Gateway confirmed the transaction succeeded
    Success,
    /// Gateway confirmed the transaction failed
    Failed,
    /// Gateway returned a code this relay does not recognize
    Unknown,
}

impl OrderStatus {
    /// Map a raw gateway result status onto the local enumeration.
    ///
    /// Unrecognized codes become `Unknown` so callers get a stable contract
    /// independent of the gateway's exact string vocabulary.
    pub fn from_gateway(result_status: &str) -> Self {
        match result_status {
            "TXN_SUCCESS" => OrderStatus::Success,
            "TXN_FAILURE" => OrderStatus::Failed,
            "PENDING" | "TXN_PENDING" => OrderStatus::Pending,
            _ => OrderStatus::Unknown,
        }
    }

    /// A terminal status is never regressed by a stale status check
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Success | OrderStatus::Failed)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

/// Generate a new order identifier: `ORDER_{millis}_{n}` with `n` in [0, 1000).
///
/// Best-effort uniqueness; collisions are possible but acceptably rare for
/// this relay's tolerance. The store rejects duplicate identifiers.
pub fn generate_order_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = rand::thread_rng().gen_range(0..1000);
    format!("{ORDER_ID_PREFIX}_{millis}_{suffix}")
}

/// A local record of one payment attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Generated identifier (immutable)
    pub order_id: String,

    /// Amount fixed at creation (immutable)
    pub amount: Money,

    /// Opaque customer identifier (immutable)
    pub customer_id: String,

    /// Lifecycle status, driven by gateway confirmations
    #[serde(default)]
    pub status: OrderStatus,

    /// Transaction token issued by the gateway at initiation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txn_token: Option<String>,

    /// Raw last-known gateway response, kept for audit/debug
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_gateway_response: Option<Value>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,

    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a new pending order with a generated identifier
    pub fn new(amount: Money, customer_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            order_id: generate_order_id(),
            amount,
            customer_id: customer_id.into(),
            status: OrderStatus::Pending,
            txn_token: None,
            last_gateway_response: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the transaction token issued by the gateway
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.txn_token = Some(token.into());
        self
    }

    /// Attach the raw gateway response for audit
    pub fn with_gateway_response(mut self, raw: Value) -> Self {
        self.last_gateway_response = Some(raw);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_shape() {
        let id = generate_order_id();
        assert!(id.starts_with("ORDER_"));

        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[1].parse::<i64>().is_ok());

        let suffix: u32 = parts[2].parse().unwrap();
        assert!(suffix < 1000);
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(Money::inr(100.0).value, "100.00");
        assert_eq!(Money::inr(99.5).value, "99.50");
        assert_eq!(Money::inr(0.1).currency, "INR");
    }

    #[test]
    fn test_status_normalization() {
        assert_eq!(OrderStatus::from_gateway("TXN_SUCCESS"), OrderStatus::Success);
        assert_eq!(OrderStatus::from_gateway("TXN_FAILURE"), OrderStatus::Failed);
        assert_eq!(OrderStatus::from_gateway("PENDING"), OrderStatus::Pending);
        assert_eq!(OrderStatus::from_gateway("TXN_PENDING"), OrderStatus::Pending);
        assert_eq!(OrderStatus::from_gateway("NO_RECORD_FOUND"), OrderStatus::Unknown);
        assert_eq!(OrderStatus::from_gateway(""), OrderStatus::Unknown);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Success).unwrap(),
            "\"SUCCESS\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"PENDING\""
        );
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Success.is_terminal());
        assert!(OrderStatus::Failed.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Unknown.is_terminal());
    }

    #[test]
    fn test_new_order_is_pending() {
        let order = Order::new(Money::inr(100.0), "cust1").with_token("TOK123");

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.txn_token.as_deref(), Some("TOK123"));
        assert_eq!(order.customer_id, "cust1");
    }
}
