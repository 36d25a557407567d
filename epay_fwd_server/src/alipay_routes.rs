//----------------------------------------------   Settlement relay  ----------------------------------------------------

use actix_web::{
    http::{header, StatusCode},
    web,
    HttpResponse,
};
use epay_protocol::{calculate_sign, derive_merchant_key, NotifyRequest, ParamCarrier, MD5_SIGN_TYPE, PAYMENT_CHANNEL};
use log::{debug, error, info, warn};

use crate::{
    config::RelayOptions,
    errors::ServerError,
    helpers::{merchant_notify_url, normalize_trade_status},
    integrations::UpstreamProvider,
};

/// The fixed settlement-notification callback, `POST /alipay/notify`.
///
/// Verification and decoding of the platform's own wire format is delegated to the upstream provider. The decoded
/// notification is translated back into a signed legacy notification and delivered to the merchant's notify URL with
/// a single GET; the merchant's response is relayed back to the platform verbatim. Nothing is retried or persisted
/// here — delivery reliability rides entirely on the platform's own notification-retry policy.
pub async fn settlement_notify<P: UpstreamProvider>(
    form: web::Form<Vec<(String, String)>>,
    provider: web::Data<P>,
    options: web::Data<RelayOptions>,
    client: web::Data<reqwest::Client>,
) -> Result<HttpResponse, ServerError> {
    info!("📨️ Handling settlement notification");
    let notice = provider.decode_notification(&form.into_inner()).map_err(|e| {
        warn!("📨️ Could not verify the settlement notification. {e}");
        ServerError::InvalidNotification(e.to_string())
    })?;
    debug!(
        "📨️ Settlement notification: trade {}, order {}, status {}, amount {}",
        notice.trade_no, notice.out_trade_no, notice.trade_status, notice.total_amount
    );

    let trade_status = normalize_trade_status(&notice.trade_status);
    let carrier = ParamCarrier::decode(&notice.passback_params).map_err(|e| {
        // Without the carrier the merchant's notify URL is unrecoverable, so this notification is a dead letter
        error!("📨️ Could not decode the pass-through carrier for trade {}. {e}", notice.trade_no);
        e
    })?;
    debug!("📨️ Decoded carrier: pid {}, notify URL {}", carrier.pid, carrier.notify_url);

    let mut notification = NotifyRequest {
        pid: carrier.pid,
        trade_no: notice.trade_no,
        out_trade_no: notice.out_trade_no,
        pay_type: PAYMENT_CHANNEL.to_string(),
        name: notice.subject,
        money: notice.total_amount,
        trade_status,
        param: carrier.param,
        sign: String::new(),
        sign_type: MD5_SIGN_TYPE.to_string(),
    };
    let key = derive_merchant_key(carrier.pid, options.fwd_secret.reveal());
    notification.sign = calculate_sign(&notification, &key);

    let url = merchant_notify_url(&carrier.notify_url, &notification)?;
    info!("📨️ Forwarding notification for order {} to pid {}", notification.out_trade_no, notification.pid);
    let response = client.get(url).send().await.map_err(|e| {
        error!("📨️ GET to the merchant notify URL failed for pid {}. {e}", notification.pid);
        ServerError::MerchantDeliveryFailed(e.to_string())
    })?;
    if !response.status().is_success() {
        error!(
            "📨️ Merchant notify endpoint for pid {} answered {} for order {}",
            notification.pid,
            response.status(),
            notification.out_trade_no
        );
        return Err(ServerError::MerchantDeliveryFailed(format!(
            "The merchant endpoint answered {}.",
            response.status()
        )));
    }
    info!(
        "📨️ Successfully forwarded notification for order {} ({})",
        notification.out_trade_no,
        response.status()
    );

    // The merchant's response travels back to the platform bit for bit: status, content type and body
    let status = StatusCode::from_u16(response.status().as_u16())
        .map_err(|e| ServerError::Unspecified(format!("Merchant status code could not be relayed. {e}")))?;
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    let mut builder = HttpResponse::build(status);
    if let Some(ct) = content_type {
        builder.insert_header((header::CONTENT_TYPE, ct));
    }
    Ok(builder.streaming(response.bytes_stream()))
}
