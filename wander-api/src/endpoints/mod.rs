pub mod chats;
pub mod posts;
pub mod trips;
pub mod users;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Envelope the service wraps most responses in.
///
/// None of the fields are guaranteed; callers decide what a given `status`
/// means for their endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub status: Option<serde_json::Value>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Unwrap `data`, turning its absence into an error carrying `message`
    pub fn into_data(self) -> Result<T, ApiError> {
        self.data.ok_or(ApiError::MissingData(self.message))
    }
}

/// Query parameters shared by paged list endpoints
#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// Author shown on posts and comments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: i64,
    pub nickname: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}
