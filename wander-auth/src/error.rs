use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Credential storage error: {0}")]
    CredentialStorage(String),

    #[error("Malformed access token: {0}")]
    MalformedToken(String),

    #[error("No refresh token available")]
    MissingRefreshToken,

    #[error("Session ended, sign in again")]
    SignedOut,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Auth error: {0}")]
    AuthClient(#[from] crate::client::AuthClientError),
}
