mod client;
pub mod endpoints;
mod error;
pub mod loading;
mod macros;
pub mod repositories;
mod request;
mod settings;

pub use crate::client::{ApiClient, ApiClientBuilder};
pub use crate::error::ApiError;
pub use crate::loading::{LoadingEvent, LoadingGuard, LoadingSignal};
pub use crate::request::{ApiRequest, RequestData};
pub use crate::settings::ClientSettings;
pub use reqwest::Method;
use repositories::*;

/// Entry point for building typed requests
pub struct Request;

impl Request {
    pub fn trips() -> TripRepository {
        TripRepository::new()
    }

    pub fn posts() -> PostRepository {
        PostRepository::new()
    }

    pub fn chats() -> ChatRepository {
        ChatRepository::new()
    }

    pub fn users() -> UserRepository {
        UserRepository::new()
    }
}
