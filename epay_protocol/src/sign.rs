//! The legacy signature scheme.
//!
//! Every signable record declares an explicit, ordered list of `(field name, rendered value)` pairs. The digest is
//! computed over a canonical string built from those pairs:
//! 1. the `sign` and `sign_type` fields are dropped,
//! 2. fields with empty values are dropped,
//! 3. the remainder is sorted byte-lexicographically by field name,
//! 4. joined as `name=value` pairs with `&`,
//! 5. the raw merchant key is appended with no separator,
//! and the MD5 of the UTF-8 bytes is rendered as lowercase hex.

use crate::errors::SignatureError;

pub const SIGN_FIELD: &str = "sign";
pub const SIGN_TYPE_FIELD: &str = "sign_type";

/// A record that can be signed or verified under the legacy scheme.
///
/// `signed_fields` must enumerate *every* protocol field of the record, including `sign` and `sign_type` — the
/// engine excludes those two by name, so that the exclusion rule lives in one place. Value rendering rules: integers
/// as plain decimal with no sign or leading zeros, booleans as literal `true`/`false`, strings verbatim.
pub trait SignedRequest {
    fn sign(&self) -> &str;
    fn sign_type(&self) -> &str;
    fn signed_fields(&self) -> Vec<(&'static str, String)>;
}

/// Builds the canonical `a=1&b=2` string over the signable fields of `req`.
pub(crate) fn canonical_string<T: SignedRequest + ?Sized>(req: &T) -> String {
    let mut fields = req
        .signed_fields()
        .into_iter()
        .filter(|(name, value)| *name != SIGN_FIELD && *name != SIGN_TYPE_FIELD && !value.is_empty())
        .collect::<Vec<_>>();
    fields.sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));
    fields.into_iter().map(|(name, value)| format!("{name}={value}")).collect::<Vec<_>>().join("&")
}

/// Computes the legacy digest for `req` under the given merchant key.
pub fn calculate_sign<T: SignedRequest + ?Sized>(req: &T, key: &str) -> String {
    let content = format!("{}{key}", canonical_string(req));
    format!("{:x}", md5::compute(content.as_bytes()))
}

/// Recomputes the digest and compares it to the one the record carries. Must run before any field of the record is
/// trusted downstream.
pub fn verify_sign<T: SignedRequest + ?Sized>(req: &T, key: &str) -> Result<(), SignatureError> {
    if key.is_empty() {
        return Err(SignatureError::MissingKey);
    }
    let provided = req.sign();
    if provided.is_empty() {
        return Err(SignatureError::MissingSignature);
    }
    if provided != calculate_sign(req, key) {
        return Err(SignatureError::InvalidSignature);
    }
    Ok(())
}
