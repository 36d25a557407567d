use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Derives the per-merchant signing key from the merchant id and the service-wide forwarding secret.
///
/// No merchant key is ever stored: the key is HMAC-SHA256 over the 8-byte little-endian encoding of `pid`, keyed by
/// the forwarding secret, and is recomputed on every request. The same `(pid, secret)` pair always yields the same
/// key, and knowledge of one merchant's key reveals neither the secret nor any other merchant's key.
pub fn derive_merchant_key(pid: u64, fwd_secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(fwd_secret.as_bytes()).expect("HMAC accepts keys of any size");
    mac.update(&pid.to_le_bytes());
    URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
}
