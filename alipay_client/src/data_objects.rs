use serde::{Deserialize, Serialize};

/// The per-request inputs to an `alipay.trade.page.pay` call. `notify_url` and `return_url` travel as system-level
/// parameters; the rest is folded into the JSON `biz_content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagePayRequest {
    /// Where the platform delivers the asynchronous settlement notification. Always this service's own endpoint.
    pub notify_url: String,
    /// Where the payer's browser is sent after payment. Passed through from the merchant.
    pub return_url: String,
    pub subject: String,
    pub out_trade_no: String,
    pub total_amount: String,
    /// Opaque pass-through field, stored by the platform at checkout and returned unmodified in the notification.
    pub passback_params: String,
}

/// The decoded, signature-verified settlement notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeNotification {
    /// The platform's trade id.
    pub trade_no: String,
    /// The merchant order id echoed back from checkout.
    pub out_trade_no: String,
    pub trade_status: String,
    pub total_amount: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub passback_params: String,
}
