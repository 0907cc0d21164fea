use super::{ApiResponse, PageQuery};
use crate::macros::setter;
use crate::request::{ApiRequest, RequestData};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListTrips {
    #[serde(skip_serializing_if = "Option::is_none")]
    keyword: Option<String>,
    #[serde(flatten)]
    page: PageQuery,
}

impl ListTrips {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt keyword: String);

    pub fn page(mut self, page: u32) -> Self {
        self.page.page = Some(page);
        self
    }
}

impl ApiRequest for ListTrips {
    type Data = Self;
    type Response = ApiResponse<Vec<Trip>>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/trips".into()
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Query(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetTrip {
    id: i64,
}

impl GetTrip {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

impl ApiRequest for GetTrip {
    type Data = ();
    type Response = ApiResponse<Trip>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/trips/{}", self.id).into()
    }
}
