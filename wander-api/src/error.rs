use reqwest::StatusCode;
use thiserror::Error;
use wander_auth::AuthError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unauthorized: {body}")]
    Unauthorized { body: String },

    #[error("({status}) {body}")]
    Status { status: StatusCode, body: String },

    #[error("Could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Access token is not a valid header value")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Response carried no data{}", .0.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    MissingData(Option<String>),
}

impl ApiError {
    /// HTTP status of the failed response, if the server answered
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}
