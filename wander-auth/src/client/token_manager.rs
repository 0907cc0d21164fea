use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::auth_client::AuthProvider;
use super::credential_store::{CredentialKey, CredentialStore};
use super::jwt::{decode_expiry, needs_refresh};
use super::navigator::{Navigator, LOGIN_ROUTE};
use crate::common::UserProfile;
use crate::error::AuthError;

const REFRESH_THRESHOLD: Duration = Duration::minutes(5);

/// Keeps the stored access token fresh.
///
/// Refreshes are single-flight: callers that arrive while a refresh is in
/// progress wait for it and reuse its token instead of issuing their own.
pub struct TokenManager {
    store: Arc<dyn CredentialStore>,
    provider: Arc<dyn AuthProvider>,
    navigator: Arc<dyn Navigator>,
    threshold: Duration,
    refresh_lock: Mutex<()>,
}

impl TokenManager {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        provider: Arc<dyn AuthProvider>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            store,
            provider,
            navigator,
            threshold: REFRESH_THRESHOLD,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn with_refresh_threshold(mut self, threshold: Duration) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    pub fn access_token(&self) -> Result<Option<String>, AuthError> {
        self.store.get(CredentialKey::AccessToken)
    }

    pub fn is_authenticated(&self) -> Result<bool, AuthError> {
        Ok(self.access_token()?.is_some())
    }

    /// Expiry of the stored access token, if there is one and it decodes
    pub fn token_expiry(&self) -> Result<Option<DateTime<Utc>>, AuthError> {
        match self.access_token()? {
            Some(token) => decode_expiry(&token).map(Some),
            None => Ok(None),
        }
    }

    /// Cached profile of the signed-in user
    pub fn user(&self) -> Result<Option<UserProfile>, AuthError> {
        match self.store.get(CredentialKey::User)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Refresh the access token if it expires within the threshold.
    ///
    /// Having no token is a valid, unauthenticated state. A token whose
    /// expiry cannot be decoded is left in place; the server rejects it
    /// later if it is actually stale.
    pub async fn check_and_refresh(&self) -> Result<(), AuthError> {
        let Some(token) = self.access_token()? else {
            return Ok(());
        };

        let expiry = match decode_expiry(&token) {
            Ok(expiry) => expiry,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read access token expiry, skipping refresh");
                return Ok(());
            }
        };

        if needs_refresh(expiry, Utc::now(), self.threshold) {
            tracing::debug!(expires_at = %expiry, "Access token nearing expiry");
            self.refresh_replacing(&token).await?;
        }

        Ok(())
    }

    /// Obtain a new access token unconditionally.
    ///
    /// On failure every stored credential is cleared and the user is sent to
    /// the login route before the error is returned.
    pub async fn refresh(&self) -> Result<String, AuthError> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// Obtain a new access token to replace `stale`.
    ///
    /// If another refresh already replaced `stale` while this caller waited,
    /// the newer token is returned without contacting the provider.
    pub async fn refresh_replacing(&self, stale: &str) -> Result<String, AuthError> {
        let _guard = self.refresh_lock.lock().await;

        match self.access_token()? {
            Some(current) if current != stale => {
                tracing::debug!("Access token already refreshed by a concurrent caller");
                return Ok(current);
            }
            Some(_) => {}
            // A concurrent refresh failed and already signed the user out
            None => return Err(AuthError::SignedOut),
        }

        self.refresh_locked().await
    }

    async fn refresh_locked(&self) -> Result<String, AuthError> {
        let Some(refresh_token) = self.store.get(CredentialKey::RefreshToken)? else {
            tracing::warn!("No refresh token stored, signing out");
            self.end_session();
            return Err(AuthError::MissingRefreshToken);
        };

        let result = self.provider.refresh(&refresh_token).await;

        // The store may have been rewritten while the provider call was in flight
        if self.store.get(CredentialKey::RefreshToken)?.as_deref() != Some(refresh_token.as_str()) {
            tracing::debug!("Session replaced during refresh, discarding result");
            return self.access_token()?.ok_or(AuthError::SignedOut);
        }

        let outcome = match result {
            Ok(token) => self
                .store
                .set(CredentialKey::AccessToken, &token)
                .map(|()| token),
            Err(e) => Err(e.into()),
        };

        match outcome {
            Ok(token) => {
                tracing::info!("Access token refreshed");
                Ok(token)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed, signing out");
                self.end_session();
                Err(e)
            }
        }
    }

    fn end_session(&self) {
        if let Err(e) = self.store.clear() {
            tracing::error!(error = %e, "Failed to clear stored credentials");
        }
        self.navigator.redirect(LOGIN_ROUTE);
    }

    /// Exchange an OAuth authorization code and store the resulting session.
    ///
    /// Waits for any refresh in flight so the new session is written last.
    pub async fn login(&self, code: &str) -> Result<Option<UserProfile>, AuthError> {
        let _guard = self.refresh_lock.lock().await;
        let response = self.provider.exchange_code(code).await?;

        self.store.set(
            CredentialKey::AccessToken,
            response.credentials.access_token(),
        )?;
        self.store.set(
            CredentialKey::RefreshToken,
            response.credentials.refresh_token(),
        )?;
        match &response.user {
            Some(user) => self
                .store
                .set(CredentialKey::User, &serde_json::to_string(user)?)?,
            None => self.store.remove(CredentialKey::User)?,
        }

        tracing::info!(
            nickname = response.user.as_ref().and_then(|u| u.nickname.as_deref()),
            "Signed in"
        );
        Ok(response.user)
    }

    /// Clear the session once any refresh in flight has settled
    pub async fn logout(&self) -> Result<(), AuthError> {
        let _guard = self.refresh_lock.lock().await;
        self.store.clear()?;
        tracing::info!("Signed out");
        Ok(())
    }
}
