use laborsuche_core::FetchError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Request failed before a usable response arrived, or the body did not decode
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Service answered with a non-2xx status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

impl From<ClientError> for FetchError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Network(e) if e.is_decode() => FetchError::Decode(e.to_string()),
            ClientError::Network(e) => FetchError::Transport(e.to_string()),
            ClientError::Api { status, message } => FetchError::Status { status, message },
            ClientError::InvalidUrl(url) => FetchError::Transport(format!("invalid URL: {url}")),
        }
    }
}
