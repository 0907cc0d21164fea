use serde::Deserialize;

use crate::common::UserProfile;

// Token endpoints answer either with bare fields or inside the service's
// `{ status, data, message }` envelope; both shapes are accepted.
#[derive(Debug, Default, Deserialize)]
pub struct TokenEnvelope {
    #[serde(default, rename = "accessToken", alias = "access_token")]
    pub access_token: Option<String>,
    #[serde(default, rename = "refreshToken", alias = "refresh_token")]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub data: Option<Box<TokenEnvelope>>,
    #[serde(default)]
    pub message: Option<String>,
}

impl TokenEnvelope {
    pub fn access_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .or_else(|| self.data.as_ref().and_then(|d| d.access_token.as_deref()))
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token
            .as_deref()
            .or_else(|| self.data.as_ref().and_then(|d| d.refresh_token.as_deref()))
    }

    pub fn into_user(self) -> Option<UserProfile> {
        match self.user {
            Some(user) => Some(user),
            None => self.data.and_then(|d| d.user),
        }
    }
}

#[derive(Debug)]
pub enum AuthClientError {
    Http(reqwest::Error),
    Status(reqwest::StatusCode, String),
    MissingField(&'static str),
    InvalidUrl(String),
}

impl std::fmt::Display for AuthClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(e) => write!(f, "HTTP error: {}", e),
            Self::Status(status, body) => write!(f, "Auth server returned {}: {}", status, body),
            Self::MissingField(field) => write!(f, "Auth response is missing {}", field),
            Self::InvalidUrl(msg) => write!(f, "Invalid auth URL: {}", msg),
        }
    }
}

impl std::error::Error for AuthClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AuthClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}
