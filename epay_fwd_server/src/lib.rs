//! # Epay forwarder
//! This crate hosts the relay service that lets merchants speaking the legacy epay protocol settle payments through
//! Alipay. It is responsible for:
//! * Verifying and translating inbound epay checkout submissions into hosted payment-page redirects.
//! * Receiving Alipay's asynchronous settlement notifications, re-signing them in the epay wire format and
//!   forwarding them to the merchant's own notify endpoint.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/epay/{env}/submit.php`: The merchant-facing checkout endpoint; `{env}` prefixed with `prod` selects the
//!   production gateway.
//! * `/alipay/notify`: The fixed settlement-notification callback registered with Alipay at checkout time.

pub mod alipay_routes;
pub mod config;
pub mod epay_routes;
pub mod errors;
pub mod helpers;
pub mod integrations;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
