//! A minimal Alipay open-platform client covering exactly what the forwarder needs: constructing a signed
//! `alipay.trade.page.pay` redirect URL, and verifying + decoding the asynchronous settlement notification.
//! Requests are signed RSA2 (SHA-256 RSA) with the app's private key; notifications are verified against the
//! platform's public key.

mod api;
mod config;
mod data_objects;
mod error;

pub use api::AlipayApi;
pub use config::{AlipayConfig, Gateway};
pub use data_objects::{PagePayRequest, TradeNotification};
pub use error::AlipayApiError;
