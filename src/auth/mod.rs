//! Authentication module
//!
//! Obtains the bearer credential used for the rest of the run. Login is a
//! single unauthenticated `POST /api/User/Authentication`.

use crate::error::HarnessError;
use crate::metrics;
use crate::models::LoginRequest;
use reqwest::header::HeaderValue;
use std::time::Instant;

/// Login endpoint path
pub const LOGIN_PATH: &str = "/api/User/Authentication";

/// Field of the login response carrying the token
pub const TOKEN_FIELD: &str = "accessToken";

/// Opaque bearer token
///
/// May be empty when the login response carried no token. That case is not
/// rejected here; the first authenticated step then fails on its status
/// assertion.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Authorization` header value, marked sensitive so it is never logged
    pub fn header_value(&self) -> Result<HeaderValue, HarnessError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.0))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Credential")
            .field(&if self.0.is_empty() { "<empty>" } else { "<redacted>" })
            .finish()
    }
}

/// Log in and return the bearer credential.
///
/// Errors only on transport failure or a body that is not JSON. A JSON body
/// without a string `accessToken` yields an empty credential.
#[tracing::instrument(name = "auth.login", skip(client, password), fields(http.url = %base_url))]
pub async fn authenticate(
    client: &reqwest::Client,
    base_url: &str,
    username: &str,
    password: &str,
) -> Result<Credential, HarnessError> {
    let url = format!("{}{}", base_url, LOGIN_PATH);
    let started = Instant::now();

    let response = client
        .post(&url)
        .json(&LoginRequest { username, password })
        .send()
        .await?;

    let status = response.status();
    metrics::record_http_request("POST", status.as_u16(), started.elapsed().as_secs_f64());

    let body = response.text().await?;
    let json: serde_json::Value =
        serde_json::from_str(&body).map_err(|source| HarnessError::Decode {
            endpoint: LOGIN_PATH.to_string(),
            source,
        })?;

    let token = json
        .get(TOKEN_FIELD)
        .and_then(|v| v.as_str())
        .unwrap_or_default();

    if token.is_empty() {
        tracing::warn!(status = status.as_u16(), "Login response carried no access token");
    } else {
        tracing::info!(status = status.as_u16(), "Obtained access token");
    }

    Ok(Credential::new(token))
}
