// Common types shared by the token manager and its callers
pub mod common;

// Client library (public API for wander-api and the CLI)
mod client;
mod error;
mod settings;

pub use client::{
    decode_expiry, needs_refresh, spawn_refresh_loop, AuthClient, AuthClientError, AuthProvider,
    CredentialKey, CredentialStore, FileCredentialStore, LogNavigator, MemoryCredentialStore,
    Navigator, RefreshLoopHandle, TokenManager, LOGIN_ROUTE,
};
pub use common::{CredentialPair, LoginResponse, UserProfile};
pub use error::AuthError;
pub use settings::AuthSettings;
