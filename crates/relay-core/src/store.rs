//! # Order Store
//!
//! Persistence boundary for order state transitions. Creation records the
//! order as PENDING; later transitions come only from gateway-confirmed
//! status data, applied through `apply_status`.
//!
//! Status application is atomic per order and monotonic: once an order
//! reaches a terminal status, a stale status check racing a fresher one
//! cannot regress it to PENDING or UNKNOWN. The in-memory implementation
//! enforces this inside its write lock; a durable store must provide the
//! same discipline (compare-and-set keyed by order id).

use crate::error::{RelayError, RelayResult};
use crate::order::{Order, OrderStatus};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Persistence interface the relay requires
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Record a newly created order. Fails if the identifier already exists.
    async fn create(&self, order: Order) -> RelayResult<()>;

    /// Fetch an order by identifier
    async fn get(&self, order_id: &str) -> RelayResult<Option<Order>>;

    /// Apply a gateway-learned status and raw response to an order.
    ///
    /// Returns the updated order, or `None` when the identifier is unknown
    /// (status checks may target orders created by another process).
    async fn apply_status(
        &self,
        order_id: &str,
        learned: OrderStatus,
        raw: Value,
    ) -> RelayResult<Option<Order>>;
}

/// Type alias for a shared store handle
pub type BoxedOrderStore = Arc<dyn OrderStore>;

/// In-memory order store.
///
/// Cross-request state lives behind one `RwLock`; status transitions are
/// applied under the write lock so concurrent status checks cannot interleave
/// a stale update between read and write.
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<String, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: Order) -> RelayResult<()> {
        let mut orders = self.orders.write().await;
        if orders.contains_key(&order.order_id) {
            return Err(RelayError::Storage(format!(
                "order already exists: {}",
                order.order_id
            )));
        }
        orders.insert(order.order_id.clone(), order);
        Ok(())
    }

    async fn get(&self, order_id: &str) -> RelayResult<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(order_id).cloned())
    }

    async fn apply_status(
        &self,
        order_id: &str,
        learned: OrderStatus,
        raw: Value,
    ) -> RelayResult<Option<Order>> {
        let mut orders = self.orders.write().await;
        let Some(order) = orders.get_mut(order_id) else {
            return Ok(None);
        };

        // Terminal statuses win over a stale PENDING/UNKNOWN answer; the raw
        // response is still recorded for audit.
        if !(order.status.is_terminal() && !learned.is_terminal()) {
            order.status = learned;
        }
        order.last_gateway_response = Some(raw);
        order.updated_at = Utc::now();

        Ok(Some(order.clone()))
    }
}
