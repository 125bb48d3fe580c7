//! # Request Handlers
//!
//! Axum request handlers for the three relay operations: create-order,
//! callback receipt, and status check. Errors are converted to structured
//! responses at this boundary; nothing propagates further up.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Json,
};
use relay_core::{Money, Order, OrderStatus, RelayError};
use relay_paytm::checksum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create-order request
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default, rename = "customerId")]
    pub customer_id: Option<String>,
}

/// Create-order response
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub mid: String,
    #[serde(rename = "orderId")]
    pub order_id: String,
    pub amount: f64,
    #[serde(rename = "txnToken")]
    pub txn_token: String,
    #[serde(rename = "callbackUrl")]
    pub callback_url: String,
    pub env: &'static str,
}

/// Status-check request
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    #[serde(default, rename = "orderId")]
    pub order_id: Option<String>,
}

/// Status-check response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    #[serde(rename = "orderId")]
    pub order_id: String,
    pub status: OrderStatus,
    #[serde(rename = "resultInfo")]
    pub result_info: Value,
    #[serde(rename = "paytmResponse")]
    pub paytm_response: Value,
}

/// Error response for the JSON operations
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    /// Raw gateway response, surfaced for diagnostics on rejections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            response: None,
        }
    }
}

fn relay_error_to_response(err: RelayError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = match err {
        RelayError::GatewayRejected { response } => ErrorResponse {
            error: "Gateway rejected the request".to_string(),
            code,
            response: Some(response),
        },
        other => ErrorResponse::new(other.to_string(), code),
    };
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Liveness endpoint
pub async fn liveness() -> &'static str {
    "Paytm order relay is up"
}

/// Create an order and initiate a transaction with the gateway
#[instrument(skip(state, request))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>, (StatusCode, Json<ErrorResponse>)> {
    let (amount, customer_id) = match (request.amount, request.customer_id.as_deref()) {
        (Some(amount), Some(customer_id)) if amount != 0.0 && !customer_id.is_empty() => {
            (amount, customer_id)
        }
        _ => {
            return Err(relay_error_to_response(RelayError::BadRequest(
                "amount and customerId are required".to_string(),
            )))
        }
    };

    let order = Order::new(Money::inr(amount), customer_id);
    info!(
        "Creating order: order_id={}, amount={}",
        order.order_id, order.amount.value
    );

    let receipt = state
        .gateway
        .initiate(&order.order_id, &order.amount, &order.customer_id)
        .await
        .map_err(|e| {
            error!("Initiate failed for {}: {}", order.order_id, e);
            relay_error_to_response(e)
        })?;

    let order_id = order.order_id.clone();
    let persisted = order
        .with_token(receipt.txn_token.clone())
        .with_gateway_response(receipt.raw);

    // The initiate call cannot be rolled back; if persistence fails the
    // operation fails and no token reaches the caller.
    state.store.create(persisted).await.map_err(|e| {
        error!("Failed to persist order {}: {}", order_id, e);
        relay_error_to_response(e)
    })?;

    Ok(Json(CreateOrderResponse {
        mid: state.paytm.mid.clone(),
        order_id,
        amount,
        txn_token: receipt.txn_token,
        callback_url: state.paytm.callback_url.clone(),
        env: state.paytm.env_label(),
    }))
}

/// Receive an asynchronous gateway callback.
///
/// Responds in plain text, matching the synchronous form-POST style of the
/// sender. Verification fails closed: a missing signature is a mismatch.
#[instrument(skip(state, headers, body))]
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    // Audit trail first; logging must not depend on validation success
    info!("Callback payload: {}", String::from_utf8_lossy(&body));

    let mut fields = match parse_callback_fields(&headers, &body) {
        Ok(fields) => fields,
        Err(e) => {
            warn!("Malformed callback payload: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                "Malformed callback payload".to_string(),
            );
        }
    };

    let signature = fields.remove(checksum::CHECKSUM_FIELD).unwrap_or_default();
    let canonical = checksum::canonical_params(&fields);

    if signature.is_empty()
        || !checksum::verify(&canonical, &state.paytm.merchant_key, &signature)
    {
        warn!("Callback checksum mismatch");
        return (StatusCode::BAD_REQUEST, "Checksum mismatched".to_string());
    }

    // Callback receipt is not proof of payment. Reconcile authoritative
    // state through the status API when the payload names an order.
    if let Some(order_id) = fields.get("ORDERID") {
        match state.gateway.status(order_id).await {
            Ok(snapshot) => {
                if let Err(e) = state
                    .store
                    .apply_status(order_id, snapshot.status, snapshot.raw)
                    .await
                {
                    error!("Failed to record callback status for {}: {}", order_id, e);
                }
            }
            Err(e) => {
                // The callback itself was authentic; stored state catches up
                // on the next explicit status call.
                warn!("Callback reconciliation failed for {}: {}", order_id, e);
            }
        }
    }

    (StatusCode::OK, "Callback received".to_string())
}

/// Check the authoritative status of an order with the gateway
#[instrument(skip(state, request))]
pub async fn check_status(
    State(state): State<AppState>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<ErrorResponse>)> {
    let order_id = match request.order_id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            return Err(relay_error_to_response(RelayError::BadRequest(
                "orderId is required".to_string(),
            )))
        }
    };

    let snapshot = state.gateway.status(&order_id).await.map_err(|e| {
        error!("Status check failed for {}: {}", order_id, e);
        relay_error_to_response(e)
    })?;

    // Record the learned status; ids this process never created just skip
    // persistence.
    state
        .store
        .apply_status(&order_id, snapshot.status, snapshot.raw.clone())
        .await
        .map_err(|e| {
            error!("Failed to record status for {}: {}", order_id, e);
            relay_error_to_response(e)
        })?;

    Ok(Json(StatusResponse {
        order_id,
        status: snapshot.status,
        result_info: snapshot.result_info,
        paytm_response: snapshot.raw,
    }))
}

/// Parse a callback body as JSON or form-encoded fields by content type
fn parse_callback_fields(
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<HashMap<String, String>, String> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if content_type.starts_with("application/json") {
        let map: HashMap<String, Value> =
            serde_json::from_slice(body).map_err(|e| e.to_string())?;
        Ok(map
            .into_iter()
            .map(|(k, v)| {
                let value = match v {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (k, value)
            })
            .collect())
    } else {
        serde_urlencoded::from_bytes::<HashMap<String, String>>(body).map_err(|e| e.to_string())
    }
}
