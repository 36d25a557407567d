use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlipayApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Could not sign request: {0}")]
    Signing(String),
    #[error("Could not build gateway URL: {0}")]
    UrlError(String),
    #[error("Notification is missing the {0} parameter")]
    MissingParameter(&'static str),
    #[error("Unsupported sign type: {0}. Only RSA2 is accepted.")]
    UnsupportedSignType(String),
    #[error("Invalid notification: {0}")]
    InvalidNotification(String),
}
