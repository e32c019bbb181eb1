//! Wire types for the Foody REST API
//!
//! Field names follow the service's JSON exactly, which mixes PascalCase
//! request fields with camelCase response fields.

use serde::{Deserialize, Serialize};

/// Login request body for `POST /api/User/Authentication`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Food payload for `POST /api/Food/Create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodPayload {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Url", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl FoodPayload {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// A single JSON-patch instruction sent to `PATCH /api/Food/Edit/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub path: String,
    pub op: String,
    pub value: serde_json::Value,
}

impl PatchOperation {
    /// `replace` the value at `path`
    pub fn replace(path: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            path: path.into(),
            op: "replace".to_string(),
            value: value.into(),
        }
    }
}

/// Message envelope returned by edit and delete
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiResponseDto {
    #[serde(rename = "Msg", alias = "msg", default)]
    pub msg: Option<String>,
}
