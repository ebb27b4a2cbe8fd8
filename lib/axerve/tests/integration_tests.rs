//! Integration tests for `AxerveClient` using wiremock.

use std::time::Duration;

use assert2::{check, let_assert};
use axerve::{
    AxerveClient, ClientConfig, Error, ErrorKind, GatewayConfig, HeaderMap, HttpClient, Request,
    Response, USER_AGENT, VariantKind,
};
use bytes::Bytes;
use serde::Serialize;
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{any, body_json, header, method, path, query_param, query_param_is_missing},
};

const API_KEY: &str = "test-api-key";
const SHOP_LOGIN: &str = "GESPAY1";

fn config(server: &MockServer) -> GatewayConfig {
    GatewayConfig::builder()
        .api_key(API_KEY)
        .shop_login(SHOP_LOGIN)
        .base_url(server.uri())
        .build()
        .expect("valid config")
}

async fn setup() -> (MockServer, AxerveClient) {
    let server = MockServer::start().await;
    let client = AxerveClient::new(config(&server));
    (server, client)
}

fn ok(payload: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "error": {"code": "0", "description": "request correctly processed"},
        "payload": payload,
    }))
}

#[tokio::test]
async fn create_payment() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/payment/create"))
        .and(header("Authorization", format!("apikey {API_KEY}").as_str()))
        .and(header("Content-Type", "application/json"))
        .and(header("Accept", "application/json"))
        .and(header("User-Agent", USER_AGENT))
        .and(body_json(json!({
            "amount": "10.00",
            "currency": "EUR",
            "shopLogin": SHOP_LOGIN,
        })))
        .respond_with(ok(json!({
            "paymentToken": "TOKEN-1",
            "paymentID": "PAY-1",
            "userRedirect": {"href": "https://sandbox.gestpay.net/3ds"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client
        .payment()
        .create(&json!({"amount": "10.00", "currency": "EUR"}))
        .await
        .expect("created");

    check!(envelope.kind() == VariantKind::Creation);
    check!(!envelope.has_error());
    check!(envelope.is_successful());
    check!(envelope.is_redirect());
    check!(envelope.redirect_url() == Some("https://sandbox.gestpay.net/3ds"));
    check!(envelope.payment_token() == Some("TOKEN-1"));
    check!(envelope.payment_id() == Some("PAY-1"));
}

#[tokio::test]
async fn create_payment_from_struct() {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct CreatePayment<'a> {
        shop_login: &'a str,
        amount: &'a str,
        currency: &'a str,
    }

    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/payment/create"))
        .and(body_json(json!({"shopLogin": "OTHER", "amount": "5.00", "currency": "EUR"})))
        .respond_with(ok(json!({"paymentToken": "T", "paymentID": "P"})))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client
        .payment()
        .create(&CreatePayment {
            shop_login: "OTHER",
            amount: "5.00",
            currency: "EUR",
        })
        .await
        .expect("created");

    check!(envelope.is_successful());
    check!(!envelope.is_redirect());
}

#[tokio::test]
async fn submit_with_and_without_token() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/payment/submit"))
        .and(query_param("paymentToken", "TOKEN-1"))
        .respond_with(ok(json!({"paymentID": "PAY-1", "transactionResult": "APPROVED"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/payment/submit"))
        .and(query_param_is_missing("paymentToken"))
        .respond_with(ok(json!({"paymentID": "PAY-2", "transactionResult": "OK"})))
        .expect(1)
        .mount(&server)
        .await;

    let with_token = client
        .payment()
        .submit(&json!({"paymentID": "PAY-1"}), Some("TOKEN-1"))
        .await
        .expect("submitted");
    check!(with_token.kind() == VariantKind::Detail);
    check!(with_token.is_successful());
    check!(with_token.payment_id() == Some("PAY-1"));

    let without_token = client
        .payment()
        .submit(&json!({"paymentID": "PAY-2"}), None)
        .await
        .expect("submitted");
    check!(without_token.payment_id() == Some("PAY-2"));
}

#[tokio::test]
async fn transaction_operations() {
    let (server, client) = setup().await;

    for operation in ["update", "capture", "cancel", "refund"] {
        Mock::given(method("POST"))
            .and(path(format!("/v1/payment/{operation}")))
            .and(body_json(json!({"paymentID": "PAY-1", "shopLogin": SHOP_LOGIN})))
            .respond_with(ok(json!({
                "paymentID": "PAY-1",
                "transactionType": operation,
                "transactionResult": "OK",
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let data = json!({"paymentID": "PAY-1"});
    let payment = client.payment();
    let envelopes = [
        payment.update(&data).await.expect("update"),
        payment.capture(&data).await.expect("capture"),
        payment.cancel(&data).await.expect("cancel"),
        payment.refund(&data).await.expect("refund"),
    ];

    let operations = ["update", "capture", "cancel", "refund"];
    for (envelope, operation) in envelopes.iter().zip(operations) {
        check!(envelope.is_successful());
        let_assert!(Some(detail) = envelope.detail());
        check!(detail.transaction_type() == Some(operation));
    }
}

#[tokio::test]
async fn payment_methods() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/payment/methods/PAY-1/2"))
        .and(query_param("paymentToken", "TOKEN-1"))
        .respond_with(ok(json!({"paymentMethods": [{"name": "PAYPAL"}]})))
        .expect(1)
        .mount(&server)
        .await;

    let body = client
        .payment()
        .methods("PAY-1", "2", Some("TOKEN-1"))
        .await
        .expect("methods");

    check!(body.get("payload") == Some(&json!({"paymentMethods": [{"name": "PAYPAL"}]})));
}

#[tokio::test]
async fn payment_detail_with_in_band_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/payment/detail/PAY-1"))
        .and(query_param_is_missing("paymentToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {"code": "74", "description": "Transaction declined"},
            "payload": {
                "paymentID": "PAY-1",
                "transactionResult": "KO",
                "transactionErrorCode": "74",
                "cardData": {"circuit": "VISA", "pan": "4111********1111"},
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client
        .payment()
        .detail("PAY-1", None)
        .await
        .expect("in-band errors are not failures");

    check!(envelope.has_error());
    check!(envelope.error_code() == Some("74"));
    check!(envelope.error_message() == Some("Transaction declined"));
    check!(!envelope.is_successful());
    check!(!envelope.is_redirect());

    let_assert!(Some(detail) = envelope.detail());
    check!(detail.transaction_error_code() == Some("74"));
    let_assert!(Some(card) = detail.card_data());
    check!(card.circuit() == Some("VISA"));
}

#[tokio::test]
async fn retrieve_details_by_shop_transaction() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/payment/detail"))
        .and(body_json(json!({"shopTransactionID": "order-1", "shopLogin": SHOP_LOGIN})))
        .respond_with(ok(json!({"shopTransactionID": "order-1", "transactionResult": "OK"})))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client
        .payment()
        .retrieve_details(&json!({"shopTransactionID": "order-1"}))
        .await
        .expect("detail");

    check!(envelope.is_successful());
    check!(envelope.detail().and_then(|d| d.shop_transaction_id()) == Some("order-1"));
}

#[tokio::test]
async fn retrieve_details_requires_lookup_key() {
    let (server, client) = setup().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    for data in [
        json!({}),
        json!({"paymentID": ""}),
        json!({"amount": "1.00"}),
    ] {
        let result = client.payment().retrieve_details(&data).await;
        let_assert!(Err(Error::InvalidRequest(message)) = result);
        check!(message.contains("shopTransactionID"));
    }
}

#[tokio::test]
async fn check_credit_card() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/check/creditCard"))
        .respond_with(ok(json!({"transactionResult": "OK", "token": "CARD-TOKEN"})))
        .expect(1)
        .mount(&server)
        .await;

    let envelope = client
        .check()
        .credit_card(&json!({"creditcard": {"number": "4111111111111111"}}))
        .await
        .expect("checked");

    check!(envelope.is_successful());
    check!(envelope.detail().and_then(|d| d.token()) == Some("CARD-TOKEN"));
}

#[tokio::test]
async fn shop_methods() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/shop/methods/{SHOP_LOGIN}")))
        .respond_with(ok(json!({"paymentTypes": ["CREDITCARD"]})))
        .expect(1)
        .mount(&server)
        .await;

    let body = client.shop().methods(SHOP_LOGIN).await.expect("methods");
    check!(body.contains_key("payload"));
}

#[tokio::test]
async fn non_object_request_body_is_rejected() {
    let (_server, client) = setup().await;

    let result = client.payment().create(&json!([1, 2])).await;
    let_assert!(Err(Error::InvalidRequest(_)) = result);
}

// ============================================================================
// Status classification
// ============================================================================

async fn failing_detail(status: u16, body: Value) -> Error {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/payment/detail/PAY-1"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&server)
        .await;

    let result = client.payment().detail("PAY-1", None).await;
    let_assert!(Err(err) = result);
    err
}

#[tokio::test]
async fn unauthorized_is_authentication_error() {
    for status in [401, 403] {
        let err = failing_detail(
            status,
            json!({"error": {"code": "1", "description": "invalid api key"}}),
        )
        .await;

        check!(err.kind() == Some(ErrorKind::Authentication));
        check!(err.status() == Some(status));
        let_assert!(Error::Authentication { message, .. } = err);
        check!(message == "invalid api key");
    }
}

#[tokio::test]
async fn unprocessable_is_validation_error() {
    let err = failing_detail(
        422,
        json!({"error": {"code": "1142", "description": "invalid amount", "field": "amount"}}),
    )
    .await;

    check!(err.is_validation());
    let_assert!(Some(errors) = err.validation_errors());
    check!(
        Value::Object(errors.clone())
            == json!({"code": "1142", "description": "invalid amount", "field": "amount"})
    );
    insta::assert_snapshot!(err.to_string(), @"validation error (HTTP 422): invalid amount");
}

#[tokio::test]
async fn server_failure_is_server_error() {
    let err = failing_detail(503, json!({"error": {"description": "maintenance"}})).await;

    check!(err.is_server_error());
    insta::assert_snapshot!(err.to_string(), @"Axerve server error: maintenance (HTTP 503)");
}

#[tokio::test]
async fn other_client_error_is_api_error() {
    let err = failing_detail(404, json!({})).await;

    check!(err.kind() == Some(ErrorKind::Generic));
    insta::assert_snapshot!(err.to_string(), @"Axerve API error: unknown error (HTTP 404)");
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/payment/detail/PAY-1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let_assert!(Err(err) = client.payment().detail("PAY-1", None).await);
    check!(err.is_malformed());
    check!(err.status() == Some(502));
}

// ============================================================================
// Transport
// ============================================================================

#[tokio::test]
async fn slow_gateway_times_out() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ok(json!({})).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let impatient = ClientConfig::builder().timeout(Duration::from_millis(100));
    let config = GatewayConfig::builder()
        .api_key(API_KEY)
        .shop_login(SHOP_LOGIN)
        .base_url(server.uri())
        .client(impatient.build())
        .build()
        .expect("valid config");
    let client = AxerveClient::new(config);

    let_assert!(Err(err) = client.shop().methods(SHOP_LOGIN).await);
    check!(err.is_timeout());
    check!(err.is_transport());
}

#[tokio::test]
async fn unreachable_gateway_is_connection_error() {
    let config = GatewayConfig::builder()
        .api_key(API_KEY)
        .shop_login(SHOP_LOGIN)
        .base_url("http://127.0.0.1:1")
        .build()
        .expect("valid config");
    let client = AxerveClient::new(config);

    let_assert!(Err(err) = client.shop().methods(SHOP_LOGIN).await);
    check!(err.is_transport());
    check!(err.status().is_none());
}

/// Transport answering every request with the same body.
#[derive(Debug, Clone)]
struct CannedClient {
    status: u16,
    body: &'static str,
}

impl HttpClient for CannedClient {
    async fn execute(&self, request: Request<Bytes>) -> axerve::Result<Response<Bytes>> {
        let url = request.url().as_str();
        check!(url.starts_with("https://sandbox.gestpay.net/api/v1/"));
        Ok(Response::new(
            self.status,
            HeaderMap::new(),
            Bytes::from_static(self.body.as_bytes()),
        ))
    }
}

#[tokio::test]
async fn custom_transport() {
    let config = GatewayConfig::builder()
        .api_key(API_KEY)
        .shop_login(SHOP_LOGIN)
        .environment(axerve::Environment::Sandbox)
        .build()
        .expect("valid config");

    let client = AxerveClient::with_http_client(
        CannedClient {
            status: 200,
            body: r#"{"payload":{"paymentID":"PAY-9","transactionResult":"OK"}}"#,
        },
        config.clone(),
    );
    let_assert!(Ok(envelope) = client.payment().detail("PAY-9", None).await);
    check!(envelope.is_successful());
    check!(envelope.payment_id() == Some("PAY-9"));

    let client = AxerveClient::with_http_client(
        CannedClient {
            status: 200,
            body: "[]",
        },
        config,
    );
    let_assert!(Err(err) = client.payment().detail("PAY-9", None).await);
    check!(err.is_malformed());
}
