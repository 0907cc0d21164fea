use super::ApiResponse;
use chrono::{DateTime, Utc};
use crate::request::ApiRequest;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoom {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub trip_id: Option<i64>,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct ListChatRooms;

impl ListChatRooms {
    pub fn new() -> Self {
        Self
    }
}

impl ApiRequest for ListChatRooms {
    type Data = ();
    type Response = ApiResponse<Vec<ChatRoom>>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/chats".into()
    }
}
