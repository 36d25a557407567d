//! # Epay protocol
//! The legacy "epay" merchant protocol: wire models, the MD5 signature scheme, the passback context carrier and
//! per-merchant key derivation. This crate is pure — no I/O, no global state — so every function here is safe for
//! unbounded parallel invocation.
//!
//! The signature canonicalization in [`sign`] is a wire-compatibility requirement: merchants independently recompute
//! the same digest, so the empty-value pruning, byte-lexicographic sort and bare key suffix must match the protocol
//! exactly.

mod carrier;
mod errors;
mod keys;
mod model;
mod sign;

pub use carrier::ParamCarrier;
pub use errors::{CarrierError, SignatureError};
pub use keys::derive_merchant_key;
pub use model::{CheckoutRequest, NotifyRequest, MD5_SIGN_TYPE, PAYMENT_CHANNEL};
pub use sign::{calculate_sign, verify_sign, SignedRequest};
