use super::{ApiResponse, Author, PageQuery};
use crate::request::{ApiRequest, RequestData};
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    pub author: Author,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub comment_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub author: Author,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListPosts {
    #[serde(flatten)]
    page: PageQuery,
}

impl ListPosts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page.page = Some(page);
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.page.size = Some(size);
        self
    }
}

impl ApiRequest for ListPosts {
    type Data = Self;
    type Response = ApiResponse<Vec<Post>>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/posts".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

#[derive(Debug, Clone)]
pub struct GetPost {
    id: i64,
}

impl GetPost {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl ApiRequest for GetPost {
    type Data = ();
    type Response = ApiResponse<Post>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/posts/{}", self.id).into()
    }
}

#[derive(Debug, Clone)]
pub struct ListComments {
    post_id: i64,
}

impl ListComments {
    pub fn new(post_id: i64) -> Self {
        Self { post_id }
    }
}

impl ApiRequest for ListComments {
    type Data = ();
    type Response = ApiResponse<Vec<Comment>>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/posts/{}/comments", self.post_id).into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateComment {
    #[serde(skip)]
    post_id: i64,
    content: String,
}

impl CreateComment {
    pub fn new(post_id: i64, content: impl Into<String>) -> Self {
        Self {
            post_id,
            content: content.into(),
        }
    }
}

impl ApiRequest for CreateComment {
    type Data = Self;
    type Response = ApiResponse<Comment>;

    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/posts/{}/comments", self.post_id).into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Json(self)
    }
}
