pub mod auth_client;
mod credential_store;
mod jwt;
mod navigator;
mod refresh_loop;
mod token_manager;

pub use auth_client::{AuthClient, AuthClientError, AuthProvider};
pub use credential_store::{
    CredentialKey, CredentialStore, FileCredentialStore, MemoryCredentialStore,
};
pub use jwt::{decode_expiry, needs_refresh};
pub use navigator::{LogNavigator, Navigator, LOGIN_ROUTE};
pub use refresh_loop::{spawn_refresh_loop, RefreshLoopHandle};
pub use token_manager::TokenManager;
