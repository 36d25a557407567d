use serde::{Deserialize, Serialize};

use crate::sign::{SignedRequest, SIGN_FIELD, SIGN_TYPE_FIELD};

/// The only signature algorithm the legacy protocol supports.
pub const MD5_SIGN_TYPE: &str = "MD5";

/// The channel label reported to merchants for trades settled through the upstream provider.
pub const PAYMENT_CHANNEL: &str = "alipay";

/// An inbound checkout submission from a merchant, as bound from the `submit.php` form body.
///
/// `money` is kept as the decimal string the merchant sent. Parsing it into a float and re-rendering it would risk
/// rounding drift in the signed content, so the amount passes through this service untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub pid: u64,
    /// The payment channel the merchant asked for, e.g. `alipay`.
    #[serde(rename = "type")]
    pub pay_type: String,
    pub out_trade_no: String,
    pub notify_url: String,
    pub return_url: String,
    pub name: String,
    pub money: String,
    #[serde(default)]
    pub param: String,
    #[serde(default)]
    pub device: String,
    #[serde(default)]
    pub sign: String,
    #[serde(default)]
    pub sign_type: String,
}

impl SignedRequest for CheckoutRequest {
    fn sign(&self) -> &str {
        &self.sign
    }

    fn sign_type(&self) -> &str {
        &self.sign_type
    }

    fn signed_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("pid", self.pid.to_string()),
            ("type", self.pay_type.clone()),
            ("out_trade_no", self.out_trade_no.clone()),
            ("notify_url", self.notify_url.clone()),
            ("return_url", self.return_url.clone()),
            ("name", self.name.clone()),
            ("money", self.money.clone()),
            ("param", self.param.clone()),
            ("device", self.device.clone()),
            (SIGN_FIELD, self.sign.clone()),
            (SIGN_TYPE_FIELD, self.sign_type.clone()),
        ]
    }
}

impl CheckoutRequest {
    /// Renders the request as form/query pairs, in the shape merchants submit it. `param` is omitted when empty so
    /// the transmitted field set matches the signed one.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("pid", self.pid.to_string()),
            ("type", self.pay_type.clone()),
            ("out_trade_no", self.out_trade_no.clone()),
            ("notify_url", self.notify_url.clone()),
            ("return_url", self.return_url.clone()),
            ("name", self.name.clone()),
            ("money", self.money.clone()),
        ];
        if !self.param.is_empty() {
            pairs.push(("param", self.param.clone()));
        }
        pairs.push((SIGN_FIELD, self.sign.clone()));
        pairs.push((SIGN_TYPE_FIELD, self.sign_type.clone()));
        pairs
    }
}

/// The asynchronous payment notification this service emits to a merchant's notify URL once the upstream provider
/// reports settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyRequest {
    pub pid: u64,
    /// The upstream provider's trade id.
    pub trade_no: String,
    /// The merchant's own order id, echoed back from checkout.
    pub out_trade_no: String,
    #[serde(rename = "type")]
    pub pay_type: String,
    pub name: String,
    pub money: String,
    pub trade_status: String,
    #[serde(default)]
    pub param: String,
    #[serde(default)]
    pub sign: String,
    #[serde(default)]
    pub sign_type: String,
}

impl SignedRequest for NotifyRequest {
    fn sign(&self) -> &str {
        &self.sign
    }

    fn sign_type(&self) -> &str {
        &self.sign_type
    }

    fn signed_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("pid", self.pid.to_string()),
            ("trade_no", self.trade_no.clone()),
            ("out_trade_no", self.out_trade_no.clone()),
            ("type", self.pay_type.clone()),
            ("name", self.name.clone()),
            ("money", self.money.clone()),
            ("trade_status", self.trade_status.clone()),
            ("param", self.param.clone()),
            (SIGN_FIELD, self.sign.clone()),
            (SIGN_TYPE_FIELD, self.sign_type.clone()),
        ]
    }
}

impl NotifyRequest {
    /// Renders the notification as the query pairs appended to the merchant's notify URL. `param` is omitted when
    /// empty so the transmitted field set matches the signed one.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("pid", self.pid.to_string()),
            ("trade_no", self.trade_no.clone()),
            ("out_trade_no", self.out_trade_no.clone()),
            ("type", self.pay_type.clone()),
            ("name", self.name.clone()),
            ("money", self.money.clone()),
            ("trade_status", self.trade_status.clone()),
        ];
        if !self.param.is_empty() {
            pairs.push(("param", self.param.clone()));
        }
        pairs.push((SIGN_FIELD, self.sign.clone()));
        pairs.push((SIGN_TYPE_FIELD, self.sign_type.clone()));
        pairs
    }
}
