mod models;

use async_trait::async_trait;
pub use models::AuthClientError;
use models::TokenEnvelope;
use reqwest::Client;

use crate::common::{CredentialPair, LoginResponse};
use crate::settings::AuthSettings;

/// Authentication provider endpoints the token manager depends on
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Exchange a refresh token for a new access token
    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthClientError>;

    /// Exchange an OAuth authorization code for a credential pair and profile
    async fn exchange_code(&self, code: &str) -> Result<LoginResponse, AuthClientError>;
}

pub struct AuthClient {
    http_client: Client,
    base_url: String,
    refresh_path: String,
    refresh_header: String,
    login_path: String,
    authorize_url: Option<String>,
}

impl AuthClient {
    pub fn new(settings: &AuthSettings) -> Result<Self, AuthClientError> {
        let http_client = Client::builder().timeout(settings.timeout()).build()?;

        Ok(Self {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            refresh_path: settings.refresh_path.clone(),
            refresh_header: settings.refresh_header.clone(),
            login_path: settings.login_path.clone(),
            authorize_url: settings.authorize_url.clone(),
        })
    }

    /// Page the user signs in on before a code can be exchanged
    pub fn authorization_url(&self) -> Result<&str, AuthClientError> {
        self.authorize_url
            .as_deref()
            .ok_or_else(|| AuthClientError::InvalidUrl("auth.authorize_url is not set".into()))
    }

    async fn read_envelope(resp: reqwest::Response) -> Result<TokenEnvelope, AuthClientError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthClientError::Status(status, body));
        }
        Ok(resp.json::<TokenEnvelope>().await?)
    }
}

#[async_trait]
impl AuthProvider for AuthClient {
    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthClientError> {
        let url = format!("{}{}", self.base_url, self.refresh_path);

        let resp = self
            .http_client
            .post(&url)
            .header(
                self.refresh_header.as_str(),
                format!("Bearer {}", refresh_token),
            )
            .send()
            .await?;

        let body = Self::read_envelope(resp).await?;
        let access_token = body
            .access_token()
            .ok_or(AuthClientError::MissingField("accessToken"))?
            .to_string();

        tracing::debug!("Access token refreshed");
        Ok(access_token)
    }

    async fn exchange_code(&self, code: &str) -> Result<LoginResponse, AuthClientError> {
        let url = format!("{}{}", self.base_url, self.login_path);

        let resp = self
            .http_client
            .get(&url)
            .query(&[("code", code)])
            .send()
            .await?;

        let body = Self::read_envelope(resp).await?;
        let access_token = body
            .access_token()
            .ok_or(AuthClientError::MissingField("accessToken"))?
            .to_string();
        let refresh_token = body
            .refresh_token()
            .ok_or(AuthClientError::MissingField("refreshToken"))?
            .to_string();

        tracing::debug!("Exchanged authorization code for tokens");
        Ok(LoginResponse {
            credentials: CredentialPair::new(access_token, refresh_token),
            user: body.into_user(),
        })
    }
}
