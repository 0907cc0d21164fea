use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;

/// Payload attached to a request
pub enum RequestData<T> {
    Empty,
    Query(T),
    Json(T),
}

/// A typed call against the service API.
///
/// `endpoint` is relative to the client's base URL.
pub trait ApiRequest {
    type Data: Serialize;
    type Response: DeserializeOwned;

    const METHOD: Method = Method::GET;

    fn endpoint(&self) -> Cow<'_, str>;

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }
}
