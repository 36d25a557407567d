use actix_web::http::StatusCode;
use alipay_client::Gateway;
use epay_protocol::{calculate_sign, derive_merchant_key, CheckoutRequest, ParamCarrier, MD5_SIGN_TYPE};
use url::Url;

use crate::endpoint_tests::{
    helpers::{post_form, test_options, TEST_FWD_SECRET},
    mocks::MockUpstream,
};

fn signed_checkout() -> CheckoutRequest {
    let mut req = CheckoutRequest {
        pid: 123456,
        pay_type: "alipay".to_string(),
        out_trade_no: "T1".to_string(),
        notify_url: "https://m.example/notify".to_string(),
        return_url: "https://m.example/return".to_string(),
        name: "Test Product".to_string(),
        money: "1.00".to_string(),
        param: "ref42".to_string(),
        device: String::new(),
        sign: String::new(),
        sign_type: MD5_SIGN_TYPE.to_string(),
    };
    let key = derive_merchant_key(req.pid, TEST_FWD_SECRET);
    req.sign = calculate_sign(&req, &key);
    req
}

fn form_body(req: &CheckoutRequest) -> String {
    serde_urlencoded::to_string(req.to_query_pairs()).expect("Could not encode the checkout form")
}

#[actix_web::test]
async fn valid_checkout_redirects_to_the_payment_page() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockUpstream::new();
    provider
        .expect_page_pay_url()
        .withf(|gateway, request| {
            let carrier = ParamCarrier::decode(&request.passback_params).expect("passback must carry the context");
            *gateway == Gateway::Sandbox &&
                request.notify_url == "https://fwd.example/alipay/notify" &&
                request.return_url == "https://m.example/return" &&
                request.subject == "Test Product" &&
                request.out_trade_no == "T1" &&
                request.total_amount == "1.00" &&
                carrier == ParamCarrier::new(123456, "https://m.example/notify", "ref42")
        })
        .times(1)
        .returning(|_, _| Ok(Url::parse("https://openapi-sandbox.dl.alipaydev.com/gateway.do?sign=abc").unwrap()));
    let req = signed_checkout();
    let res = post_form(provider, test_options(), "/epay/sandbox/submit.php", form_body(&req)).await;
    assert_eq!(res.status, StatusCode::FOUND);
    assert_eq!(res.location.as_deref(), Some("https://openapi-sandbox.dl.alipaydev.com/gateway.do?sign=abc"));
}

#[actix_web::test]
async fn tampered_amount_is_rejected() {
    let _ = env_logger::try_init().ok();
    let mut req = signed_checkout();
    req.money = "10000.00".to_string();
    // The mock carries no expectations: touching the upstream provider at all would panic the test
    let res = post_form(MockUpstream::new(), test_options(), "/epay/sandbox/submit.php", form_body(&req)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body.contains("signature"), "unexpected body: {}", res.body);
}

#[actix_web::test]
async fn unsigned_submission_is_rejected() {
    let _ = env_logger::try_init().ok();
    let mut req = signed_checkout();
    req.sign = String::new();
    let res = post_form(MockUpstream::new(), test_options(), "/epay/sandbox/submit.php", form_body(&req)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body.contains("does not carry a signature"), "unexpected body: {}", res.body);
}

#[actix_web::test]
async fn production_environment_is_refused_before_the_body_is_inspected() {
    let _ = env_logger::try_init().ok();
    // A garbage signature would be a 400 if the body were looked at; the guard must answer 403 first
    let mut req = signed_checkout();
    req.sign = "ffffffffffffffffffffffffffffffff".to_string();
    let res = post_form(MockUpstream::new(), test_options(), "/epay/prod/submit.php", form_body(&req)).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert!(res.body.contains("production environment is disabled"), "unexpected body: {}", res.body);
}

#[actix_web::test]
async fn production_environment_selects_the_production_gateway_when_enabled() {
    let _ = env_logger::try_init().ok();
    let mut options = test_options();
    options.enable_production = true;
    let mut provider = MockUpstream::new();
    provider
        .expect_page_pay_url()
        .withf(|gateway, _| *gateway == Gateway::Production)
        .times(1)
        .returning(|_, _| Ok(Url::parse("https://openapi.alipay.com/gateway.do?sign=abc").unwrap()));
    let req = signed_checkout();
    let res = post_form(provider, options, "/epay/production/submit.php", form_body(&req)).await;
    assert_eq!(res.status, StatusCode::FOUND);
    assert_eq!(res.location.as_deref(), Some("https://openapi.alipay.com/gateway.do?sign=abc"));
}

#[actix_web::test]
async fn upstream_failure_maps_to_a_server_error() {
    let _ = env_logger::try_init().ok();
    let mut provider = MockUpstream::new();
    provider
        .expect_page_pay_url()
        .times(1)
        .returning(|_, _| Err(alipay_client::AlipayApiError::Signing("key rejected".to_string())));
    let req = signed_checkout();
    let res = post_form(provider, test_options(), "/epay/sandbox/submit.php", form_body(&req)).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.body.contains("payment-page"), "unexpected body: {}", res.body);
}
