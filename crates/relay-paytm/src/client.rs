//! # Paytm Gateway Client
//!
//! HTTP implementation of `TransactionGateway` against Paytm's hosted
//! transaction APIs: initiate-transaction and order status. Every request
//! body is serialized once, signed over those exact bytes, and transmitted
//! inside a `{body, head: {signature}}` envelope.

use crate::checksum;
use crate::config::PaytmConfig;
use async_trait::async_trait;
use relay_core::{
    InitiateReceipt, Money, OrderStatus, RelayError, RelayResult, StatusSnapshot,
    TransactionGateway,
};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument};

/// Bound on every call to the gateway; expiry surfaces as an upstream error
const GATEWAY_TIMEOUT_SECS: u64 = 30;

/// Paytm transaction API client
pub struct PaytmGateway {
    config: PaytmConfig,
    client: Client,
}

impl PaytmGateway {
    /// Create a client for the configured gateway host
    pub fn new(config: PaytmConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(GATEWAY_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> RelayResult<Self> {
        Ok(Self::new(PaytmConfig::from_env()?))
    }

    /// The merchant configuration this client was built with
    pub fn config(&self) -> &PaytmConfig {
        &self.config
    }

    /// Serialize a request body, sign those exact bytes, POST the signed
    /// envelope, and parse the response as JSON.
    ///
    /// The envelope re-serializes `body` with identical field order, so the
    /// signed bytes match the transmitted bytes.
    async fn post_signed<B: Serialize>(&self, url: &str, body: &B) -> RelayResult<Value> {
        let body_json =
            serde_json::to_string(body).map_err(|e| RelayError::Serialization(e.to_string()))?;
        let signature = checksum::sign(&body_json, &self.config.merchant_key);

        let response = self
            .client
            .post(url)
            .json(&Envelope {
                body,
                head: Head { signature },
            })
            .send()
            .await
            .map_err(|e| RelayError::Upstream(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RelayError::Upstream(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| {
            error!("Unparseable gateway response: status={}, body={}", status, text);
            RelayError::Upstream(format!("failed to parse gateway response: {e}"))
        })
    }
}

#[async_trait]
impl TransactionGateway for PaytmGateway {
    #[instrument(skip(self, amount, customer_id), fields(order_id = %order_id))]
    async fn initiate(
        &self,
        order_id: &str,
        amount: &Money,
        customer_id: &str,
    ) -> RelayResult<InitiateReceipt> {
        let body = InitiateBody {
            request_type: "Payment",
            mid: &self.config.mid,
            website_name: &self.config.website,
            industry_type_id: &self.config.industry_type,
            channel_id: &self.config.channel_id,
            order_id,
            callback_url: &self.config.callback_url,
            txn_amount: TxnAmount {
                value: &amount.value,
                currency: &amount.currency,
            },
            user_info: UserInfo { cust_id: customer_id },
        };

        let url = self.config.initiate_url(order_id);
        let raw = self.post_signed(&url, &body).await?;

        let result_status = raw
            .pointer("/body/resultInfo/resultStatus")
            .and_then(Value::as_str);

        if result_status != Some("S") {
            error!(
                "Initiate rejected: order_id={}, resultStatus={:?}",
                order_id, result_status
            );
            return Err(RelayError::GatewayRejected { response: raw });
        }

        // A success result without a token is unusable; surface it as an
        // upstream fault rather than hand the caller a tokenless success.
        let txn_token = raw
            .pointer("/body/txnToken")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| {
                RelayError::Upstream("initiate succeeded without a txnToken".to_string())
            })?;

        info!("Initiated transaction: order_id={}", order_id);
        Ok(InitiateReceipt { txn_token, raw })
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    async fn status(&self, order_id: &str) -> RelayResult<StatusSnapshot> {
        let body = StatusBody {
            mid: &self.config.mid,
            order_id,
        };

        let raw = self.post_signed(&self.config.status_url(), &body).await?;

        let result_info = raw
            .pointer("/body/resultInfo")
            .cloned()
            .unwrap_or(Value::Null);
        let code = result_info
            .get("resultStatus")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let status = OrderStatus::from_gateway(code);

        debug!(
            "Status check: order_id={}, gateway_code={}, normalized={:?}",
            order_id, code, status
        );
        Ok(StatusSnapshot {
            status,
            result_info,
            raw,
        })
    }

    fn gateway_name(&self) -> &'static str {
        "paytm"
    }
}

// =============================================================================
// Paytm API Types
// =============================================================================

#[derive(Serialize)]
struct Envelope<'a, B: Serialize> {
    body: &'a B,
    head: Head,
}

#[derive(Serialize)]
struct Head {
    signature: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InitiateBody<'a> {
    request_type: &'static str,
    mid: &'a str,
    website_name: &'a str,
    industry_type_id: &'a str,
    channel_id: &'a str,
    order_id: &'a str,
    callback_url: &'a str,
    txn_amount: TxnAmount<'a>,
    user_info: UserInfo<'a>,
}

#[derive(Serialize)]
struct TxnAmount<'a> {
    value: &'a str,
    currency: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserInfo<'a> {
    cust_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusBody<'a> {
    mid: &'a str,
    order_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_for(server_uri: String) -> PaytmGateway {
        let config = PaytmConfig::new("MID123", "secret-key", "https://merchant.example/callback")
            .with_host(server_uri);
        PaytmGateway::new(config)
    }

    #[tokio::test]
    async fn test_initiate_success_extracts_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/theia/api/v1/initiateTransaction"))
            .and(query_param("mid", "MID123"))
            .and(body_partial_json(json!({
                "body": {"requestType": "Payment", "mid": "MID123", "orderId": "ORDER_1_1"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "body": {"resultInfo": {"resultStatus": "S"}, "txnToken": "TOK123"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway_for(server.uri());
        let receipt = gateway
            .initiate("ORDER_1_1", &Money::inr(100.0), "cust1")
            .await
            .unwrap();

        assert_eq!(receipt.txn_token, "TOK123");
    }

    #[tokio::test]
    async fn test_initiate_rejected_surfaces_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/theia/api/v1/initiateTransaction"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "body": {"resultInfo": {"resultStatus": "F", "resultMsg": "Invalid website"}}
            })))
            .mount(&server)
            .await;

        let gateway = gateway_for(server.uri());
        let err = gateway
            .initiate("ORDER_1_1", &Money::inr(100.0), "cust1")
            .await
            .unwrap_err();

        match err {
            RelayError::GatewayRejected { response } => {
                assert_eq!(
                    response.pointer("/body/resultInfo/resultMsg").unwrap(),
                    "Invalid website"
                );
            }
            other => panic!("expected GatewayRejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_initiate_success_without_token_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/theia/api/v1/initiateTransaction"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "body": {"resultInfo": {"resultStatus": "S"}}
            })))
            .mount(&server)
            .await;

        let gateway = gateway_for(server.uri());
        let err = gateway
            .initiate("ORDER_1_1", &Money::inr(100.0), "cust1")
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_initiate_unparseable_body_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/theia/api/v1/initiateTransaction"))
            .respond_with(ResponseTemplate::new(500).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let gateway = gateway_for(server.uri());
        let err = gateway
            .initiate("ORDER_1_1", &Money::inr(100.0), "cust1")
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_status_normalizes_gateway_codes() {
        let cases = [
            ("TXN_SUCCESS", OrderStatus::Success),
            ("TXN_FAILURE", OrderStatus::Failed),
            ("PENDING", OrderStatus::Pending),
            ("NO_RECORD_FOUND", OrderStatus::Unknown),
        ];

        for (code, expected) in cases {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/v3/order/status"))
                .and(body_partial_json(json!({
                    "body": {"mid": "MID123", "orderId": "ORDER_1_1"}
                })))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "body": {"resultInfo": {"resultStatus": code, "resultCode": "01"}}
                })))
                .mount(&server)
                .await;

            let gateway = gateway_for(server.uri());
            let snapshot = gateway.status("ORDER_1_1").await.unwrap();

            assert_eq!(snapshot.status, expected, "code {code}");
            assert_eq!(
                snapshot.result_info.get("resultStatus").unwrap(),
                code
            );
        }
    }

    #[tokio::test]
    async fn test_status_missing_result_info_is_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v3/order/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"body": {}})))
            .mount(&server)
            .await;

        let gateway = gateway_for(server.uri());
        let snapshot = gateway.status("ORDER_1_1").await.unwrap();

        assert_eq!(snapshot.status, OrderStatus::Unknown);
        assert_eq!(snapshot.result_info, Value::Null);
    }

    #[tokio::test]
    async fn test_connection_failure_is_upstream_error() {
        // Nothing listens on this port
        let gateway = gateway_for("http://127.0.0.1:1".to_string());

        let err = gateway.status("ORDER_1_1").await.unwrap_err();
        assert!(matches!(err, RelayError::Upstream(_)));
    }
}
