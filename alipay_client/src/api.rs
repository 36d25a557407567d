use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{FixedOffset, Utc};
use log::*;
use openssl::{
    hash::MessageDigest,
    pkey::{PKey, Private, Public},
    rsa::Rsa,
    sign::{Signer, Verifier},
};
use url::Url;

use crate::{config::Gateway, AlipayApiError, AlipayConfig, PagePayRequest, TradeNotification};

const METHOD_PAGE_PAY: &str = "alipay.trade.page.pay";
const PRODUCT_CODE: &str = "FAST_INSTANT_TRADE_PAY";
const SIGN_TYPE_RSA2: &str = "RSA2";
/// Alipay timestamps are expressed in China Standard Time, regardless of where the caller runs.
const CST_OFFSET_SECS: i32 = 8 * 3600;

#[derive(Clone)]
pub struct AlipayApi {
    config: AlipayConfig,
    signing_key: PKey<Private>,
    platform_key: PKey<Public>,
}

impl AlipayApi {
    /// Parses both PEM keys up front so that a misconfigured key pair fails at startup, not on the first trade.
    pub fn new(config: AlipayConfig) -> Result<Self, AlipayApiError> {
        let rsa = Rsa::private_key_from_pem(config.app_private_key.reveal().as_bytes())
            .map_err(|e| AlipayApiError::Initialization(format!("app private key: {e}")))?;
        let signing_key =
            PKey::from_rsa(rsa).map_err(|e| AlipayApiError::Initialization(format!("app private key: {e}")))?;
        let rsa = Rsa::public_key_from_pem(config.alipay_public_key.as_bytes())
            .map_err(|e| AlipayApiError::Initialization(format!("platform public key: {e}")))?;
        let platform_key =
            PKey::from_rsa(rsa).map_err(|e| AlipayApiError::Initialization(format!("platform public key: {e}")))?;
        Ok(Self { config, signing_key, platform_key })
    }

    /// Builds the signed redirect URL for a hosted payment page on the given gateway.
    pub fn page_pay_url(&self, gateway: Gateway, request: &PagePayRequest) -> Result<Url, AlipayApiError> {
        let biz_content = serde_json::json!({
            "subject": request.subject,
            "out_trade_no": request.out_trade_no,
            "total_amount": request.total_amount,
            "product_code": PRODUCT_CODE,
            "passback_params": request.passback_params,
        })
        .to_string();
        let timestamp = cst_now();
        let mut params: Vec<(&str, &str)> = vec![
            ("app_id", self.config.app_id.as_str()),
            ("method", METHOD_PAGE_PAY),
            ("format", "JSON"),
            ("charset", "utf-8"),
            ("sign_type", SIGN_TYPE_RSA2),
            ("timestamp", timestamp.as_str()),
            ("version", "1.0"),
            ("notify_url", request.notify_url.as_str()),
            ("return_url", request.return_url.as_str()),
            ("biz_content", biz_content.as_str()),
        ];
        // Empty parameters are neither signed nor transmitted
        params.retain(|(_, v)| !v.is_empty());
        params.sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));
        let content = join_pairs(&params);
        let sign = self.sign(&content)?;
        let mut url = Url::parse(gateway.base_url()).map_err(|e| AlipayApiError::UrlError(e.to_string()))?;
        {
            let mut query = url.query_pairs_mut();
            for (k, v) in &params {
                query.append_pair(k, v);
            }
            query.append_pair("sign", &sign);
        }
        trace!("Built page-pay URL for order {}", request.out_trade_no);
        Ok(url)
    }

    /// Verifies the RSA2 signature on a settlement notification and decodes its fields. `params` is the notification
    /// form body, percent-decoded.
    pub fn decode_notification(&self, params: &[(String, String)]) -> Result<TradeNotification, AlipayApiError> {
        let sign = find(params, "sign").ok_or(AlipayApiError::MissingParameter("sign"))?;
        let sign_type = find(params, "sign_type").ok_or(AlipayApiError::MissingParameter("sign_type"))?;
        if sign_type != SIGN_TYPE_RSA2 {
            return Err(AlipayApiError::UnsupportedSignType(sign_type.to_string()));
        }
        let mut signed: Vec<(&str, &str)> = params
            .iter()
            .filter(|(k, _)| k != "sign" && k != "sign_type")
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        signed.sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));
        let content = join_pairs(&signed);
        if !self.verify(&content, sign)? {
            warn!("Notification signature did not verify against the platform public key");
            return Err(AlipayApiError::InvalidNotification("signature mismatch".to_string()));
        }
        Ok(TradeNotification {
            trade_no: find(params, "trade_no").ok_or(AlipayApiError::MissingParameter("trade_no"))?.to_string(),
            out_trade_no: find(params, "out_trade_no")
                .ok_or(AlipayApiError::MissingParameter("out_trade_no"))?
                .to_string(),
            trade_status: find(params, "trade_status")
                .ok_or(AlipayApiError::MissingParameter("trade_status"))?
                .to_string(),
            total_amount: find(params, "total_amount")
                .ok_or(AlipayApiError::MissingParameter("total_amount"))?
                .to_string(),
            subject: find(params, "subject").unwrap_or_default().to_string(),
            passback_params: find(params, "passback_params").unwrap_or_default().to_string(),
        })
    }

    pub(crate) fn sign(&self, content: &str) -> Result<String, AlipayApiError> {
        let mut signer = Signer::new(MessageDigest::sha256(), &self.signing_key)
            .map_err(|e| AlipayApiError::Signing(e.to_string()))?;
        signer.update(content.as_bytes()).map_err(|e| AlipayApiError::Signing(e.to_string()))?;
        let signature = signer.sign_to_vec().map_err(|e| AlipayApiError::Signing(e.to_string()))?;
        Ok(STANDARD.encode(signature))
    }

    pub(crate) fn verify(&self, content: &str, signature_b64: &str) -> Result<bool, AlipayApiError> {
        let signature = STANDARD
            .decode(signature_b64)
            .map_err(|e| AlipayApiError::InvalidNotification(format!("signature is not valid base64: {e}")))?;
        let mut verifier = Verifier::new(MessageDigest::sha256(), &self.platform_key)
            .map_err(|e| AlipayApiError::InvalidNotification(e.to_string()))?;
        verifier.update(content.as_bytes()).map_err(|e| AlipayApiError::InvalidNotification(e.to_string()))?;
        verifier.verify(&signature).map_err(|e| AlipayApiError::InvalidNotification(e.to_string()))
    }
}

fn cst_now() -> String {
    let cst = FixedOffset::east_opt(CST_OFFSET_SECS).expect("UTC+8 is a valid offset");
    Utc::now().with_timezone(&cst).format("%Y-%m-%d %H:%M:%S").to_string()
}

fn join_pairs(pairs: &[(&str, &str)]) -> String {
    pairs.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join("&")
}

fn find<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}
