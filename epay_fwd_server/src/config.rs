use std::{env, time::Duration};

use alipay_client::AlipayConfig;
use epf_common::Secret;
use log::*;

const DEFAULT_EPF_HOST: &str = "127.0.0.1";
const DEFAULT_EPF_PORT: u16 = 8310;
/// The legacy protocol prescribes no deadline for the outbound merchant notify call, so the bound is configuration
/// rather than contract. See `EPF_NOTIFY_TIMEOUT_SECS`.
const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// The externally reachable base URL of this service. Used to construct the settlement callback URL that is
    /// registered with the upstream provider at checkout time.
    pub public_url: String,
    /// The service-wide secret that per-merchant signing keys are derived from. No merchant key is stored anywhere.
    pub fwd_secret: Secret<String>,
    /// Checkout requests against a `prod`-prefixed environment tag are refused unless this is set.
    pub enable_production: bool,
    /// Upper bound on the outbound GET to a merchant's notify URL.
    pub merchant_notify_timeout: Duration,
    pub alipay: AlipayConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_EPF_HOST.to_string(),
            port: DEFAULT_EPF_PORT,
            public_url: format!("http://{DEFAULT_EPF_HOST}:{DEFAULT_EPF_PORT}"),
            fwd_secret: Secret::default(),
            enable_production: false,
            merchant_notify_timeout: DEFAULT_NOTIFY_TIMEOUT,
            alipay: AlipayConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("EPF_HOST").ok().unwrap_or_else(|| DEFAULT_EPF_HOST.into());
        let port = env::var("EPF_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for EPF_PORT. {e} Using the default, {DEFAULT_EPF_PORT}, instead."
                    );
                    DEFAULT_EPF_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_EPF_PORT);
        let public_url = env::var("EPF_PUBLIC_URL").ok().unwrap_or_else(|| {
            let fallback = format!("http://{host}:{port}");
            error!(
                "🪛️ EPF_PUBLIC_URL is not set. Using {fallback}, but the upstream provider can only deliver \
                 settlement notifications if this is the service's externally reachable base URL."
            );
            fallback
        });
        let fwd_secret = Secret::new(env::var("EPF_FWD_SECRET").ok().unwrap_or_else(|| {
            error!(
                "🚨️🚨️🚨️ EPF_FWD_SECRET is not set. Every merchant signing key is derived from this secret; without \
                 it, anyone who knows the derivation scheme can forge checkout requests. Set it before going \
                 anywhere near production. 🚨️🚨️🚨️"
            );
            String::default()
        }));
        let enable_production = env::var("EPF_ENABLE_PRODUCTION").map(|s| &s == "1" || &s == "true").unwrap_or(false);
        if !enable_production {
            info!("🪛️ The production gateway is disabled. Set EPF_ENABLE_PRODUCTION=1 to accept prod checkouts.");
        }
        let merchant_notify_timeout = env::var("EPF_NOTIFY_TIMEOUT_SECS")
            .map_err(|_| {
                info!(
                    "🪛️ EPF_NOTIFY_TIMEOUT_SECS is not set. Using the default value of {} s.",
                    DEFAULT_NOTIFY_TIMEOUT.as_secs()
                )
            })
            .and_then(|s| {
                s.parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| warn!("🪛️ Invalid configuration value for EPF_NOTIFY_TIMEOUT_SECS. {e}"))
            })
            .ok()
            .unwrap_or(DEFAULT_NOTIFY_TIMEOUT);
        let alipay = AlipayConfig::new_from_env_or_default();
        Self { host, port, public_url, fwd_secret, enable_production, merchant_notify_timeout, alipay }
    }
}

//-------------------------------------------------  RelayOptions  -----------------------------------------------------
/// The subset of the server configuration the request handlers need. Threaded into the actix app as shared state so
/// handlers never reach for process-global configuration.
#[derive(Clone, Debug)]
pub struct RelayOptions {
    pub public_url: String,
    pub fwd_secret: Secret<String>,
    pub enable_production: bool,
}

impl RelayOptions {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            public_url: config.public_url.clone(),
            fwd_secret: config.fwd_secret.clone(),
            enable_production: config.enable_production,
        }
    }
}
