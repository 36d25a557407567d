use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use epay_protocol::{CarrierError, SignatureError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("The production environment is disabled on this instance.")]
    EnvironmentDisabled,
    #[error("Could not verify the request signature. {0}")]
    SignatureError(#[from] SignatureError),
    #[error("Could not verify the upstream notification. {0}")]
    InvalidNotification(String),
    #[error("Could not recover the merchant context from the notification. {0}")]
    CarrierDecodeError(#[from] CarrierError),
    #[error("Could not build the hosted payment-page request. {0}")]
    UpstreamCallFailed(String),
    #[error("Could not deliver the notification to the merchant. {0}")]
    MerchantDeliveryFailed(String),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            // Checkout-path failures are the caller's to fix
            Self::SignatureError(_) => StatusCode::BAD_REQUEST,
            Self::InvalidNotification(_) => StatusCode::BAD_REQUEST,
            Self::EnvironmentDisabled => StatusCode::FORBIDDEN,
            // Relay-path failures surface as server errors so the upstream provider's retry policy takes over
            Self::CarrierDecodeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MerchantDeliveryFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UpstreamCallFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // The legacy protocol expects a plain-text reason, not a structured error body
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).insert_header(ContentType::plaintext()).body(self.to_string())
    }
}
