use super::ApiResponse;
use crate::request::ApiRequest;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub nickname: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub introduction: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Bank account trip earnings are settled to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementAccount {
    pub id: i64,
    pub bank_name: String,
    pub account_number: String,
    pub holder: String,
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct GetProfile;

impl ApiRequest for GetProfile {
    type Data = ();
    type Response = ApiResponse<Profile>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/users/me".into()
    }
}

#[derive(Default, Debug, Clone)]
pub struct ListSettlementAccounts;

impl ApiRequest for ListSettlementAccounts {
    type Data = ();
    type Response = ApiResponse<Vec<SettlementAccount>>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/users/me/settlements".into()
    }
}
