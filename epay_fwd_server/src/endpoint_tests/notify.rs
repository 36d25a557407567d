use actix_web::http::StatusCode;
use alipay_client::{AlipayApiError, TradeNotification};
use epay_protocol::{derive_merchant_key, verify_sign, NotifyRequest, ParamCarrier};
use wiremock::{
    matchers::{method, path, query_param},
    Mock,
    MockServer,
    ResponseTemplate,
};

use crate::endpoint_tests::{
    helpers::{post_form, test_options, TEST_FWD_SECRET},
    mocks::MockUpstream,
};

fn notification(trade_status: &str, passback_params: String) -> TradeNotification {
    TradeNotification {
        trade_no: "2024123456789".to_string(),
        out_trade_no: "T1".to_string(),
        trade_status: trade_status.to_string(),
        total_amount: "1.00".to_string(),
        subject: "Test Product".to_string(),
        passback_params,
    }
}

fn decoding_provider(notice: TradeNotification) -> MockUpstream {
    let mut provider = MockUpstream::new();
    provider.expect_decode_notification().times(1).return_once(move |_| Ok(notice));
    provider
}

// The raw platform form body is opaque to these tests; decoding it is the mocked provider's job
const PLATFORM_BODY: &str = "notify_id=ignored&sign=ignored&sign_type=RSA2";

#[actix_web::test]
async fn settlement_is_relayed_to_the_merchant_with_a_fresh_signature() {
    let _ = env_logger::try_init().ok();
    let merchant = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notify"))
        .and(query_param("pid", "123456"))
        .and(query_param("out_trade_no", "T1"))
        .and(query_param("type", "alipay"))
        .and(query_param("money", "1.00"))
        .and(query_param("trade_status", "TRADE_SUCCESS"))
        .and(query_param("param", "ref42"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("success", "text/plain"))
        .expect(1)
        .mount(&merchant)
        .await;
    let carrier = ParamCarrier::new(123456, &format!("{}/notify", merchant.uri()), "ref42");
    let provider = decoding_provider(notification("TRADE_SUCCESS", carrier.encode().unwrap()));

    let res = post_form(provider, test_options(), "/alipay/notify", PLATFORM_BODY.to_string()).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "success");
    assert_eq!(res.content_type.as_deref(), Some("text/plain"));

    // The delivered notification must verify against the merchant's derived key
    let requests = merchant.received_requests().await.expect("request recording is on");
    let query = requests[0].url.query().expect("the notification rides in the query string");
    let delivered: NotifyRequest = serde_urlencoded::from_str(query).unwrap();
    let key = derive_merchant_key(123456, TEST_FWD_SECRET);
    assert!(verify_sign(&delivered, &key).is_ok());
    assert_eq!(delivered.trade_no, "2024123456789");
    assert_eq!(delivered.name, "Test Product");
    assert_eq!(delivered.sign_type, "MD5");
}

#[actix_web::test]
async fn finished_trades_are_reported_as_success() {
    let _ = env_logger::try_init().ok();
    let merchant = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notify"))
        .and(query_param("trade_status", "TRADE_SUCCESS"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("success", "text/plain"))
        .expect(1)
        .mount(&merchant)
        .await;
    let carrier = ParamCarrier::new(123456, &format!("{}/notify", merchant.uri()), "");
    let provider = decoding_provider(notification("TRADE_FINISHED", carrier.encode().unwrap()));

    let res = post_form(provider, test_options(), "/alipay/notify", PLATFORM_BODY.to_string()).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[actix_web::test]
async fn other_trade_statuses_pass_through_unmapped() {
    let _ = env_logger::try_init().ok();
    let merchant = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notify"))
        .and(query_param("trade_status", "WAIT_BUYER_PAY"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("success", "text/plain"))
        .expect(1)
        .mount(&merchant)
        .await;
    let carrier = ParamCarrier::new(123456, &format!("{}/notify", merchant.uri()), "");
    let provider = decoding_provider(notification("WAIT_BUYER_PAY", carrier.encode().unwrap()));

    let res = post_form(provider, test_options(), "/alipay/notify", PLATFORM_BODY.to_string()).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[actix_web::test]
async fn merchant_response_is_relayed_verbatim() {
    let _ = env_logger::try_init().ok();
    let merchant = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notify"))
        .respond_with(ResponseTemplate::new(202).set_body_raw("{\"accepted\":true}", "application/json"))
        .expect(1)
        .mount(&merchant)
        .await;
    let carrier = ParamCarrier::new(123456, &format!("{}/notify", merchant.uri()), "");
    let provider = decoding_provider(notification("TRADE_SUCCESS", carrier.encode().unwrap()));

    let res = post_form(provider, test_options(), "/alipay/notify", PLATFORM_BODY.to_string()).await;
    assert_eq!(res.status, StatusCode::ACCEPTED);
    assert_eq!(res.content_type.as_deref(), Some("application/json"));
    assert_eq!(res.body, "{\"accepted\":true}");
}

#[actix_web::test]
async fn merchant_failure_becomes_a_server_error() {
    let _ = env_logger::try_init().ok();
    let merchant = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notify"))
        .respond_with(ResponseTemplate::new(500).set_body_raw("fail", "text/plain"))
        .expect(1)
        .mount(&merchant)
        .await;
    let carrier = ParamCarrier::new(123456, &format!("{}/notify", merchant.uri()), "");
    let provider = decoding_provider(notification("TRADE_SUCCESS", carrier.encode().unwrap()));

    let res = post_form(provider, test_options(), "/alipay/notify", PLATFORM_BODY.to_string()).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.body.contains("merchant endpoint answered"), "unexpected body: {}", res.body);
}

#[actix_web::test]
async fn unverifiable_notification_is_rejected() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockUpstream::new();
    provider
        .expect_decode_notification()
        .times(1)
        .returning(|_| Err(AlipayApiError::InvalidNotification("signature mismatch".to_string())));
    let res = post_form(provider, test_options(), "/alipay/notify", PLATFORM_BODY.to_string()).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body.contains("Could not verify the upstream notification"), "unexpected body: {}", res.body);
}

#[actix_web::test]
async fn corrupt_carrier_token_is_a_dead_letter() {
    let _ = env_logger::try_init().ok();
    let provider = decoding_provider(notification("TRADE_SUCCESS", "!!!not-a-token!!!".to_string()));
    let res = post_form(provider, test_options(), "/alipay/notify", PLATFORM_BODY.to_string()).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.body.contains("merchant context"), "unexpected body: {}", res.body);
}
