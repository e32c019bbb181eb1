//! Common E2E Test Infrastructure
//!
//! Provides a wiremock-backed stand-in for the Foody service:
//! - Login endpoint issuing a fixed bearer token
//! - Food endpoints that only answer requests carrying that token
//! - Configuration pointing the harness at the mock

use foody_harness::config::HarnessConfig;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token issued by the mock login endpoint
pub const TEST_TOKEN: &str = "e2e-test-token";

/// Id returned by the mock create endpoint
pub const TEST_FOOD_ID: &str = "food-123";

pub const TEST_USERNAME: &str = "Yoo";
pub const TEST_PASSWORD: &str = "123456";

/// Url sent with the invalid create variant
pub const INVALID_FOOD_URL: &str = "http://example.com/food.png";

/// Mock Foody service
pub struct FoodyMock {
    pub server: MockServer,
}

impl FoodyMock {
    /// Start an empty mock server
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Start a mock that behaves like a healthy Foody deployment
    pub async fn healthy() -> Self {
        let mock = Self::start().await;
        mock.mount_login(json!({ "accessToken": TEST_TOKEN, "username": TEST_USERNAME }))
            .await;
        mock.mount_food_endpoints(json!([
            { "foodId": TEST_FOOD_ID, "name": "Updated Food Name", "description": "Test food description" },
            { "foodId": "food-999", "name": "Pizza", "description": "Other food" }
        ]))
        .await;
        mock
    }

    /// Harness configuration targeting this mock
    pub fn config(&self) -> HarnessConfig {
        let mut config = HarnessConfig::default();
        config.target.base_url = self.server.uri();
        config.target.timeout_seconds = 2;
        config.credentials.username = TEST_USERNAME.into();
        config.credentials.password = TEST_PASSWORD.into();
        config
    }

    /// Login endpoint answering the test credentials with `body`
    pub async fn mount_login(&self, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/api/User/Authentication"))
            .and(body_json(json!({ "username": TEST_USERNAME, "password": TEST_PASSWORD })))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Food endpoints; `list` is the body served by `GET /api/Food/All`
    pub async fn mount_food_endpoints(&self, list: serde_json::Value) {
        let bearer = format!("Bearer {}", TEST_TOKEN);

        Mock::given(method("POST"))
            .and(path("/api/Food/Create"))
            .and(header("Authorization", bearer.as_str()))
            .and(body_json(json!({
                "Name": "New Food",
                "Description": "Test food description",
                "Url": ""
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "foodId": TEST_FOOD_ID })))
            .mount(&self.server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/Food/Create"))
            .and(header("Authorization", bearer.as_str()))
            .and(body_json(json!({ "Name": "", "Description": "" })))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errors": { "Name": ["The Name field is required."] }
            })))
            .mount(&self.server)
            .await;

        for invalid in [
            json!({ "Name": "", "Description": "", "Url": INVALID_FOOD_URL }),
            json!({ "Name": "", "Description": "Test food description" }),
        ] {
            Mock::given(method("POST"))
                .and(path("/api/Food/Create"))
                .and(header("Authorization", bearer.as_str()))
                .and(body_json(invalid))
                .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                    "errors": { "Name": ["The Name field is required."] }
                })))
                .mount(&self.server)
                .await;
        }

        Mock::given(method("PATCH"))
            .and(path(format!("/api/Food/Edit/{}", TEST_FOOD_ID)))
            .and(header("Authorization", bearer.as_str()))
            .and(body_json(json!([
                { "path": "/name", "op": "replace", "value": "Updated Food Name" }
            ])))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "msg": "Successfully edited" })))
            .mount(&self.server)
            .await;

        Mock::given(method("PATCH"))
            .and(path_regex(r"^/api/Food/Edit/.*$"))
            .and(header("Authorization", bearer.as_str()))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "msg": "No food revues..." })))
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/Food/All"))
            .and(header("Authorization", bearer.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(list))
            .mount(&self.server)
            .await;

        // First delete of the created id succeeds; later ones fall through.
        Mock::given(method("DELETE"))
            .and(path(format!("/api/Food/Delete/{}", TEST_FOOD_ID)))
            .and(header("Authorization", bearer.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Msg": "Deleted successfully!" })))
            .up_to_n_times(1)
            .mount(&self.server)
            .await;

        Mock::given(method("DELETE"))
            .and(path_regex(r"^/api/Food/Delete/.*$"))
            .and(header("Authorization", bearer.as_str()))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "Msg": "Unable to delete this food revue!"
            })))
            .mount(&self.server)
            .await;
    }

    /// Requests received so far, as `(method, path, authorization header)`
    pub async fn requests(&self) -> Vec<(String, String, Option<String>)> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|r| {
                let auth = r
                    .headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                (r.method.to_string(), r.url.path().to_string(), auth)
            })
            .collect()
    }
}

/// Response template that stalls past the harness's request timeout
pub fn stalled(status: u16) -> ResponseTemplate {
    ResponseTemplate::new(status).set_delay(Duration::from_secs(5))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_config_targets_mock() {
        let mock = FoodyMock::start().await;
        let config = mock.config();
        assert_eq!(config.target.base_url, mock.server.uri());
        assert!(config.validate().is_ok());
    }
}
