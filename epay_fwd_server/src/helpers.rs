use epay_protocol::NotifyRequest;
use url::Url;

use crate::errors::ServerError;

/// The trade statuses the upstream vocabulary uses for a settled payment. Both collapse to `TRADE_SUCCESS` on the
/// merchant side; every other status passes through unchanged.
const SETTLED_STATUSES: [&str; 2] = ["TRADE_SUCCESS", "TRADE_FINISHED"];

pub fn normalize_trade_status(status: &str) -> String {
    if SETTLED_STATUSES.contains(&status) {
        "TRADE_SUCCESS".to_string()
    } else {
        status.to_string()
    }
}

/// The fixed settlement callback this service registers with the upstream provider at checkout time. Always points
/// at this service, never at the merchant.
pub fn settlement_notify_url(public_url: &str) -> Result<String, ServerError> {
    let mut base = Url::parse(public_url)
        .map_err(|e| ServerError::ConfigurationError(format!("Invalid public URL ({public_url}). {e}")))?;
    base.set_path("/alipay/notify");
    Ok(base.to_string())
}

/// Appends the signed notification fields to the merchant's notify URL as query parameters.
pub fn merchant_notify_url(notify_url: &str, notification: &NotifyRequest) -> Result<Url, ServerError> {
    let mut url = Url::parse(notify_url).map_err(|e| {
        ServerError::MerchantDeliveryFailed(format!("The merchant notify URL ({notify_url}) is invalid. {e}"))
    })?;
    url.query_pairs_mut().extend_pairs(notification.to_query_pairs());
    Ok(url)
}
