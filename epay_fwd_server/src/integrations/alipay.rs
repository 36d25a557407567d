use alipay_client::{AlipayApi, AlipayApiError, Gateway, PagePayRequest, TradeNotification};
use url::Url;

/// The upstream payment platform, as this service consumes it: build a hosted payment-page URL for an order, and
/// verify + decode an inbound settlement notification. The platform's own signature scheme stays behind this seam —
/// the relay never re-implements it. The production implementation is [`AlipayApi`]; endpoint tests substitute a
/// mock.
pub trait UpstreamProvider {
    fn page_pay_url(&self, gateway: Gateway, request: &PagePayRequest) -> Result<Url, AlipayApiError>;
    fn decode_notification(&self, params: &[(String, String)]) -> Result<TradeNotification, AlipayApiError>;
}

impl UpstreamProvider for AlipayApi {
    fn page_pay_url(&self, gateway: Gateway, request: &PagePayRequest) -> Result<Url, AlipayApiError> {
        AlipayApi::page_pay_url(self, gateway, request)
    }

    fn decode_notification(&self, params: &[(String, String)]) -> Result<TradeNotification, AlipayApiError> {
        AlipayApi::decode_notification(self, params)
    }
}
