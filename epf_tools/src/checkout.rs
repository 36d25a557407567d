use epay_protocol::{calculate_sign, derive_merchant_key, CheckoutRequest, MD5_SIGN_TYPE, PAYMENT_CHANNEL};
use log::info;

use crate::{keys::fwd_secret, CheckoutParams};

/// Builds a signed checkout form for the given merchant. With `--submit`, posts it to a running forwarder and prints
/// the redirect target instead of following it.
pub async fn run_checkout(params: CheckoutParams) -> anyhow::Result<()> {
    let secret = fwd_secret(params.secret.clone())?;
    let key = derive_merchant_key(params.pid, &secret);
    let out_trade_no =
        params.out_trade_no.unwrap_or_else(|| format!("tool-{}", chrono::Utc::now().format("%Y%m%d%H%M%S")));
    let mut request = CheckoutRequest {
        pid: params.pid,
        pay_type: PAYMENT_CHANNEL.to_string(),
        out_trade_no,
        notify_url: params.notify_url,
        return_url: params.return_url,
        name: params.name,
        money: params.money,
        param: params.param,
        device: String::new(),
        sign: String::new(),
        sign_type: MD5_SIGN_TYPE.to_string(),
    };
    request.sign = calculate_sign(&request, &key);
    let pairs = request.to_query_pairs();
    println!("Derived key: {key}");
    println!("Signed checkout form:");
    for (k, v) in &pairs {
        println!("  {k} = {v}");
    }

    let Some(server) = params.server else {
        return Ok(());
    };
    let env = if params.prod { "prod" } else { "sandbox" };
    let url = format!("{}/epay/{env}/submit.php", server.trim_end_matches('/'));
    info!("Submitting checkout to {url}");
    // Don't follow the redirect; the payment-page URL itself is the interesting part
    let client = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none()).build()?;
    let response = client.post(&url).form(&pairs).send().await?;
    println!("Status:   {}", response.status());
    match response.headers().get(reqwest::header::LOCATION).and_then(|v| v.to_str().ok()) {
        Some(location) => println!("Location: {location}"),
        None => println!("Body:     {}", response.text().await?),
    }
    Ok(())
}
