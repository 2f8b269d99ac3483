//! Authenticated HTTP plumbing for the Courier API

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::CourierConfig;
use crate::error::{CourierError, Result};
use crate::telemetry::ExceptionReporter;

/// Thin wrapper over `reqwest::Client` that knows the base URL and headers.
#[derive(Clone)]
pub struct CourierApi {
    base_url: String,
    bearer_token: String,
    http: reqwest::Client,
    reporter: Arc<dyn ExceptionReporter>,
}

impl CourierApi {
    pub fn new(config: &CourierConfig, reporter: Arc<dyn ExceptionReporter>) -> Self {
        Self {
            base_url: crate::config::normalize_base_url(&config.url),
            bearer_token: config.bearer_token.clone().unwrap_or_default(),
            http: reqwest::Client::new(),
            reporter,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, uri: &str) -> String {
        format!("{}{}", self.base_url, uri)
    }

    /// Headers sent with every request.
    ///
    /// The Authorization value repeats the header name (`Authorization: Bearer
    /// <token>`); the receiving side expects exactly this string.
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Authorization: Bearer {}", self.bearer_token))?,
        );
        Ok(headers)
    }

    /// Fetch and decode a JSON resource.
    ///
    /// Returns `None` on a non-200 status, and also on transport or decode
    /// failure after handing the error to the reporter.
    pub async fn request<T: DeserializeOwned>(&self, uri: &str, method: Method) -> Option<T> {
        match self.try_request(uri, method).await {
            Ok(body) => body,
            Err(e) => {
                self.reporter.report_exception(&e);
                None
            }
        }
    }

    async fn try_request<T: DeserializeOwned>(
        &self,
        uri: &str,
        method: Method,
    ) -> Result<Option<T>> {
        let url = self.endpoint(uri);
        let response = self
            .http
            .request(method.clone(), &url)
            .headers(self.headers()?)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(%method, %url, status = status.as_u16(), "Courier request not OK");
            return Ok(None);
        }

        let body = response.bytes().await?;
        let decoded =
            serde_json::from_slice(&body).map_err(|e| CourierError::parse(url.clone(), e))?;

        tracing::debug!(%method, %url, "Courier request succeeded");
        Ok(Some(decoded))
    }

    /// POST a JSON body and hand back the raw response, whatever its status
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        uri: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        let response = self
            .http
            .post(self.endpoint(uri))
            .headers(self.headers()?)
            .json(body)
            .send()
            .await?;
        Ok(response)
    }
}

impl std::fmt::Debug for CourierApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CourierApi")
            .field("base_url", &self.base_url)
            .field("bearer_token", &"<redacted>")
            .finish()
    }
}
