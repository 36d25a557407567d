//! The context carrier that rides through the upstream provider's opaque pass-through field.
//!
//! At checkout time the merchant's routing data (pid, notify URL, business parameter) is folded into a single token;
//! the settlement notification returns it unmodified and the relay decodes it to find its way back to the merchant.
//! The token is CBOR wrapped in URL-safe, padding-free base64, so it survives the pass-through field's length and
//! character-set restrictions without escaping. It is deliberately unauthenticated — integrity of the overall
//! exchange comes from the outer notification's signature — and must never contain credentials.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};

use crate::errors::CarrierError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamCarrier {
    pub pid: u64,
    pub notify_url: String,
    pub param: String,
}

impl ParamCarrier {
    pub fn new(pid: u64, notify_url: &str, param: &str) -> Self {
        Self { pid, notify_url: notify_url.to_string(), param: param.to_string() }
    }

    /// Serializes the carrier into an opaque token suitable for the pass-through field.
    pub fn encode(&self) -> Result<String, CarrierError> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf).map_err(|e| CarrierError::Encode(e.to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(&buf))
    }

    /// Reverses [`ParamCarrier::encode`]. Fails on malformed base64 or malformed CBOR; it never yields a silently
    /// wrong record.
    pub fn decode(token: &str) -> Result<Self, CarrierError> {
        let bytes =
            URL_SAFE_NO_PAD.decode(token).map_err(|e| CarrierError::TokenDecode(format!("base64: {e}")))?;
        ciborium::from_reader(&bytes[..]).map_err(|e| CarrierError::TokenDecode(format!("cbor: {e}")))
    }
}
