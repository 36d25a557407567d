//----------------------------------------------   Checkout  ----------------------------------------------------

use actix_web::{http::header, web, HttpResponse};
use alipay_client::{Gateway, PagePayRequest};
use epay_protocol::{derive_merchant_key, verify_sign, CheckoutRequest, ParamCarrier};
use log::{debug, info, warn};

use crate::{
    config::RelayOptions,
    errors::ServerError,
    helpers::settlement_notify_url,
    integrations::UpstreamProvider,
};

/// The merchant-facing checkout endpoint, `POST /epay/{env}/submit.php`.
///
/// Verifies the submission's legacy signature with the merchant's derived key, folds the merchant's own notify URL
/// and business parameter into the pass-through carrier, and redirects the payer to the hosted payment page. An
/// `{env}` tag prefixed with `prod` selects the production gateway, which must be enabled explicitly.
pub async fn checkout<P: UpstreamProvider>(
    path: web::Path<String>,
    form: web::Form<CheckoutRequest>,
    provider: web::Data<P>,
    options: web::Data<RelayOptions>,
) -> Result<HttpResponse, ServerError> {
    let env = path.into_inner();
    let is_prod = env.starts_with("prod");
    info!("💳️ Handling checkout submission against the {env} environment");
    // The environment guard runs before anything in the request body is looked at
    if is_prod && !options.enable_production {
        warn!("💳️ Rejecting checkout against the production environment: production is disabled.");
        return Err(ServerError::EnvironmentDisabled);
    }
    let request = form.into_inner();
    debug!(
        "💳️ Checkout parameters: pid {}, order {}, product {}, amount {}",
        request.pid, request.out_trade_no, request.name, request.money
    );

    let key = derive_merchant_key(request.pid, options.fwd_secret.reveal());
    verify_sign(&request, &key).map_err(|e| {
        warn!("💳️ Signature verification failed for pid {}. {e}", request.pid);
        e
    })?;
    debug!("💳️ Signature verified for pid {}", request.pid);

    let carrier = ParamCarrier::new(request.pid, &request.notify_url, &request.param);
    let passback_params = carrier.encode()?;

    let page_pay = PagePayRequest {
        notify_url: settlement_notify_url(&options.public_url)?,
        // Passed through from the merchant without validation; the resulting open-redirect exposure is a known,
        // unresolved limitation of the legacy protocol
        return_url: request.return_url.clone(),
        subject: request.name.clone(),
        out_trade_no: request.out_trade_no.clone(),
        total_amount: request.money.clone(),
        passback_params,
    };
    let gateway = if is_prod { Gateway::Production } else { Gateway::Sandbox };
    let redirect = provider.page_pay_url(gateway, &page_pay).map_err(|e| {
        warn!("💳️ Could not build the payment-page request for order {}. {e}", request.out_trade_no);
        ServerError::UpstreamCallFailed(e.to_string())
    })?;

    info!("💳️ Redirecting order {} (pid {}) to the payment page", request.out_trade_no, request.pid);
    // 302, not 307: the gateway expects the follow-up navigation as a plain GET, not a replayed POST
    Ok(HttpResponse::Found().insert_header((header::LOCATION, redirect.to_string())).finish())
}
