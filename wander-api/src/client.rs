use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use wander_auth::TokenManager;

use crate::error::ApiError;
use crate::loading::{LoadingEvent, LoadingSignal};
use crate::request::{ApiRequest, RequestData};
use crate::settings::ClientSettings;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Body of a completed response
struct RawResponse {
    status: StatusCode,
    body: Vec<u8>,
}

/// Shared pipeline for every call to the service API.
///
/// Each call emits loading events, tops up the access token, sends the
/// request with a bearer credential and, if the server answers 401, refreshes
/// and re-issues the request once.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenManager>,
    loading: LoadingSignal,
}

pub struct ApiClientBuilder {
    base_url: String,
    tokens: Arc<TokenManager>,
    timeout: Duration,
    loading: Option<LoadingSignal>,
}

impl ApiClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Share an existing signal instead of creating a new one
    pub fn loading_signal(mut self, loading: LoadingSignal) -> Self {
        self.loading = Some(loading);
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(APP_USER_AGENT)
            .build()?;

        Ok(ApiClient {
            http,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            tokens: self.tokens,
            loading: self.loading.unwrap_or_default(),
        })
    }
}

impl ApiClient {
    pub fn builder(base_url: impl Into<String>, tokens: Arc<TokenManager>) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url: base_url.into(),
            tokens,
            timeout: DEFAULT_TIMEOUT,
            loading: None,
        }
    }

    pub fn from_settings(
        settings: &ClientSettings,
        tokens: Arc<TokenManager>,
    ) -> Result<Self, ApiError> {
        Self::builder(settings.base_url.clone(), tokens)
            .timeout(settings.timeout())
            .build()
    }

    pub fn loading(&self) -> &LoadingSignal {
        &self.loading
    }

    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    /// Send a typed request and decode its response
    pub async fn send<R>(&self, request: R) -> Result<R::Response, ApiError>
    where
        R: ApiRequest,
    {
        let builder = self.http.request(R::METHOD, self.url(&request.endpoint()));
        let builder = match request.data() {
            RequestData::Empty => builder,
            RequestData::Query(query) => builder.query(query),
            RequestData::Json(body) => builder.json(body),
        };

        let response = self.dispatch(builder.build()?).await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Send an untyped JSON request; an empty body decodes to `null`
    pub async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let mut builder = self.http.request(method, self.url(endpoint));
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = self.dispatch(builder.build()?).await?;
        if response.body.is_empty() {
            tracing::trace!(status = %response.status, "Empty response body");
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&response.body)?)
    }

    async fn dispatch(&self, request: reqwest::Request) -> Result<RawResponse, ApiError> {
        let retry = request.try_clone();

        let mut sent_token = None;
        let err = match self.execute_once(request, &mut sent_token).await {
            Err(err @ ApiError::Unauthorized { .. }) => err,
            other => return other,
        };

        // Streaming bodies cannot be replayed
        let Some(mut retry) = retry else {
            return Err(err);
        };

        tracing::debug!(
            method = %retry.method(),
            url = %retry.url(),
            "Request unauthorized, refreshing token and retrying once"
        );

        let token = match sent_token.as_deref() {
            Some(stale) => self.tokens.refresh_replacing(stale).await?,
            None => self.tokens.refresh().await?,
        };
        set_bearer(&mut retry, &token)?;

        let mut resent_token = None;
        self.execute_once(retry, &mut resent_token).await
    }

    async fn execute_once(
        &self,
        request: reqwest::Request,
        sent_token: &mut Option<String>,
    ) -> Result<RawResponse, ApiError> {
        let _loading = self.loading.begin();
        self.authorize_and_send(request, sent_token).await
    }

    async fn authorize_and_send(
        &self,
        mut request: reqwest::Request,
        sent_token: &mut Option<String>,
    ) -> Result<RawResponse, ApiError> {
        self.tokens.check_and_refresh().await?;

        if let Some(token) = self.tokens.access_token()? {
            set_bearer(&mut request, &token)?;
            *sent_token = Some(token);
        }

        let method = request.method().clone();
        let url = request.url().clone();

        let response = self.http.execute(request).await.map_err(|e| {
            tracing::warn!(method = %method, url = %url, error = %e, "Request failed");
            e
        })?;

        let status = response.status();
        let body = response.bytes().await?.to_vec();
        tracing::debug!(method = %method, url = %url, status = %status, "Response received");

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized {
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(RawResponse { status, body })
    }

    /// Subscribe to this client's request activity
    pub fn subscribe_loading(&self) -> tokio::sync::broadcast::Receiver<LoadingEvent> {
        self.loading.subscribe()
    }
}

fn set_bearer(request: &mut reqwest::Request, token: &str) -> Result<(), ApiError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
    value.set_sensitive(true);
    request.headers_mut().insert(AUTHORIZATION, value);
    Ok(())
}
