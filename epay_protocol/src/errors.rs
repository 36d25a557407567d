use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("The signing key is empty.")]
    MissingKey,
    #[error("The request does not carry a signature.")]
    MissingSignature,
    #[error("The request signature does not match the signed content.")]
    InvalidSignature,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarrierError {
    #[error("Could not encode the parameter carrier. {0}")]
    Encode(String),
    #[error("Could not decode the parameter carrier token. {0}")]
    TokenDecode(String),
}
