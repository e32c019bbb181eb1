//! Authenticated Foody API client and session lifecycle
//!
//! [`Session::open`] performs the one-time login and builds a client whose
//! default headers carry the bearer credential; [`Session::close`] releases
//! its connection pool.
//!
//! # Example
//!
//! ```no_run
//! use foody_harness::client::Session;
//! use foody_harness::config::HarnessConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Session::open(&HarnessConfig::default()).await?;
//! let response = session.client().list_foods().await?;
//! println!("{}", response.status);
//! session.close();
//! # Ok(())
//! # }
//! ```

use crate::auth::{self, Credential};
use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::metrics;
use crate::models::{ApiResponseDto, FoodPayload, PatchOperation};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

pub const CREATE_PATH: &str = "/api/Food/Create";
pub const EDIT_PATH: &str = "/api/Food/Edit";
pub const LIST_PATH: &str = "/api/Food/All";
pub const DELETE_PATH: &str = "/api/Food/Delete";

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Status and raw body of a completed request
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// Decode the body as `T`
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// The `Msg` field of the response envelope, if any
    pub fn message(&self) -> Result<Option<String>, serde_json::Error> {
        Ok(self.json::<ApiResponseDto>()?.msg)
    }
}

/// Client for the Food endpoints; every request carries the bearer credential
#[derive(Debug, Clone)]
pub struct FoodyClient {
    http: reqwest::Client,
    base_url: String,
}

impl FoodyClient {
    /// Build a client that attaches `credential` to every request
    pub fn new(
        base_url: &str,
        credential: &Credential,
        timeout: Duration,
    ) -> Result<Self, HarnessError> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, credential.header_value()?);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /api/Food/Create`
    pub async fn create_food(&self, payload: &FoodPayload) -> Result<ApiResponse, reqwest::Error> {
        let request = self.request(Method::POST, CREATE_PATH).json(payload);
        self.execute(Method::POST, CREATE_PATH, request).await
    }

    /// `PATCH /api/Food/Edit/{id}`
    pub async fn edit_food(
        &self,
        id: &str,
        changes: &[PatchOperation],
    ) -> Result<ApiResponse, reqwest::Error> {
        let path = resource_path(EDIT_PATH, id);
        let request = self.request(Method::PATCH, &path).json(changes);
        self.execute(Method::PATCH, &path, request).await
    }

    /// `GET /api/Food/All`
    pub async fn list_foods(&self) -> Result<ApiResponse, reqwest::Error> {
        let request = self.request(Method::GET, LIST_PATH);
        self.execute(Method::GET, LIST_PATH, request).await
    }

    /// `DELETE /api/Food/Delete/{id}`
    pub async fn delete_food(&self, id: &str) -> Result<ApiResponse, reqwest::Error> {
        let path = resource_path(DELETE_PATH, id);
        let request = self.request(Method::DELETE, &path);
        self.execute(Method::DELETE, &path, request).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<ApiResponse, reqwest::Error> {
        let started = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        let elapsed = started.elapsed();

        metrics::record_http_request(method.as_str(), status.as_u16(), elapsed.as_secs_f64());
        tracing::debug!(
            http.method = %method,
            http.path = %path,
            http.status = status.as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            "request completed"
        );

        Ok(ApiResponse { status, body })
    }
}

/// `{base}/{id}` with the id escaped as one path segment
fn resource_path(base: &str, id: &str) -> String {
    format!("{}/{}", base, utf8_percent_encode(id, PATH_SEGMENT))
}

/// One run's authenticated connection to the service
///
/// Dropping a session also releases the pool; [`Session::close`] makes the
/// release explicit and logged.
#[derive(Debug)]
pub struct Session {
    client: FoodyClient,
    credential: Credential,
}

impl Session {
    /// Log in once and build the authenticated client
    pub async fn open(config: &HarnessConfig) -> Result<Self, HarnessError> {
        let base_url = config.base_url();
        let timeout = config.target.timeout();

        let credential = {
            let login_client = reqwest::Client::builder().timeout(timeout).build()?;
            auth::authenticate(
                &login_client,
                base_url,
                &config.credentials.username,
                &config.credentials.password,
            )
            .await?
        };

        let client = FoodyClient::new(base_url, &credential, timeout)?;
        tracing::info!(base_url = %base_url, "Session opened");

        Ok(Self { client, credential })
    }

    pub fn client(&self) -> &FoodyClient {
        &self.client
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Release the client's connection pool
    pub fn close(self) {
        tracing::info!(base_url = %self.client.base_url, "Session closed");
        drop(self);
    }
}
