use serde::Deserialize;
use std::time::Duration;

/// One week
const MAX_REFRESH_THRESHOLD_SECS: u64 = 7 * 24 * 60 * 60;

/// Settings for the authentication provider and the token refresh policy.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub base_url: String,

    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,

    #[serde(default = "default_refresh_header")]
    pub refresh_header: String,

    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Provider page the user authorizes on; the provider redirects back with a code.
    #[serde(default)]
    pub authorize_url: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_refresh_threshold_secs")]
    pub refresh_threshold_secs: u64,

    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

fn default_refresh_path() -> String {
    "/auth/refresh".to_string()
}

fn default_refresh_header() -> String {
    "Authorization-Refresh".to_string()
}

fn default_login_path() -> String {
    "/auth/login/kakao".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_refresh_threshold_secs() -> u64 {
    300
}

fn default_refresh_interval_secs() -> u64 {
    240
}

impl AuthSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            refresh_path: default_refresh_path(),
            refresh_header: default_refresh_header(),
            login_path: default_login_path(),
            authorize_url: None,
            timeout_secs: default_timeout_secs(),
            refresh_threshold_secs: default_refresh_threshold_secs(),
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("auth.base_url is required".to_string());
        }
        if !self.base_url.starts_with("http") {
            return Err("auth.base_url must be a valid HTTP(S) URL".to_string());
        }
        if self.refresh_header.trim().is_empty() {
            return Err("auth.refresh_header must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("auth.timeout_secs must be greater than zero".to_string());
        }
        if self.refresh_threshold_secs > MAX_REFRESH_THRESHOLD_SECS {
            return Err(format!(
                "auth.refresh_threshold_secs must be at most {}",
                MAX_REFRESH_THRESHOLD_SECS
            ));
        }
        if self.refresh_interval_secs == 0 {
            return Err("auth.refresh_interval_secs must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Saturates at the validated maximum
    pub fn refresh_threshold(&self) -> chrono::Duration {
        let secs = self.refresh_threshold_secs.min(MAX_REFRESH_THRESHOLD_SECS);
        chrono::Duration::seconds(secs as i64)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}
