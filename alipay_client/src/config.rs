use epf_common::Secret;
use log::*;

const PRODUCTION_GATEWAY: &str = "https://openapi.alipay.com/gateway.do";
const SANDBOX_GATEWAY: &str = "https://openapi-sandbox.dl.alipaydev.com/gateway.do";

#[derive(Debug, Clone, Default)]
pub struct AlipayConfig {
    pub app_id: String,
    /// The app's RSA private key, PEM encoded. Used to sign outgoing requests.
    pub app_private_key: Secret<String>,
    /// The platform's RSA public key, PEM encoded. Used to verify incoming notifications.
    pub alipay_public_key: String,
}

impl AlipayConfig {
    pub fn new_from_env_or_default() -> Self {
        let app_id = std::env::var("ALIPAY_APP_ID").unwrap_or_else(|_| {
            error!("🪛️ ALIPAY_APP_ID is not set. Please set it to your Alipay open-platform app id.");
            String::default()
        });
        let app_private_key = Secret::new(std::env::var("ALIPAY_APP_PRIVATE_KEY").unwrap_or_else(|_| {
            error!("🪛️ ALIPAY_APP_PRIVATE_KEY is not set. Please set it to your app's RSA private key (PEM).");
            String::default()
        }));
        let alipay_public_key = std::env::var("ALIPAY_PUBLIC_KEY").unwrap_or_else(|_| {
            error!("🪛️ ALIPAY_PUBLIC_KEY is not set. Please set it to the Alipay RSA public key (PEM).");
            String::default()
        });
        Self { app_id, app_private_key, alipay_public_key }
    }
}

/// Selects which openapi gateway a page-pay request is built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gateway {
    Production,
    Sandbox,
}

impl Gateway {
    pub fn base_url(&self) -> &'static str {
        match self {
            Gateway::Production => PRODUCTION_GATEWAY,
            Gateway::Sandbox => SANDBOX_GATEWAY,
        }
    }
}
