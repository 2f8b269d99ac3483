//! Courier notification client

use std::sync::Arc;

use reqwest::Method;
use serde_json::{Map, Value};

use super::api::CourierApi;
use super::payload::{Attachment, SendRequest};
use crate::config::CourierConfig;
use crate::error::{CourierError, Result};
use crate::metrics::{SendMetrics, TemplateMetrics};
use crate::telemetry::ExceptionReporter;
use crate::template::{NotificationListing, TemplateCache, TemplateSet};

const NOTIFICATIONS_URI: &str = "notifications";
const SEND_URI: &str = "send";

/// Client for the Courier send API with a locally cached template list.
///
/// The template set is resolved once, in [`CourierClient::new`], and is the
/// sole source for [`CourierClient::is_valid_template`] afterwards.
pub struct CourierClient {
    api: CourierApi,
    cache: TemplateCache,
    reporter: Arc<dyn ExceptionReporter>,
    templates: TemplateSet,
}

impl CourierClient {
    /// Build a client and load its template set.
    ///
    /// Resolution failures are reported and replaced by the fallback list.
    /// Failing to read the fallback list fails construction.
    pub async fn new(
        config: CourierConfig,
        reporter: Arc<dyn ExceptionReporter>,
    ) -> Result<Self> {
        let mut client = Self {
            api: CourierApi::new(&config, reporter.clone()),
            cache: TemplateCache::new(&config.templates_path, &config.fallback_templates_path),
            reporter,
            templates: TemplateSet::default(),
        };

        client.templates = match client.resolve_templates().await {
            Ok(templates) => templates,
            Err(e) => {
                TemplateMetrics::record_resolution_failure(e.kind());
                client.reporter.report_exception(&e);
                tracing::warn!(
                    error = %e,
                    fallback = %client.cache.fallback_path().display(),
                    "Template resolution failed, loading fallback templates"
                );

                let templates = client.cache.load_fallback().await?;
                TemplateMetrics::record_fallback_load();
                templates
            }
        };

        tracing::info!(
            base_url = %client.api.base_url(),
            templates = client.templates.len(),
            "Courier client initialized"
        );

        Ok(client)
    }

    /// Resolve the template set from the primary cache or, if absent, the API.
    ///
    /// A fresh remote listing is written to the primary cache before returning.
    /// Only the first page is read; further pages are logged and dropped.
    pub async fn resolve_templates(&self) -> Result<TemplateSet> {
        if let Some(templates) = self.cache.load_primary().await? {
            TemplateMetrics::record_cache_load();
            tracing::debug!(
                path = %self.cache.primary_path().display(),
                templates = templates.len(),
                "Using cached templates"
            );
            return Ok(templates);
        }

        let listing: NotificationListing = self
            .api
            .request(NOTIFICATIONS_URI, Method::GET)
            .await
            .ok_or_else(|| CourierError::EmptyResponse(self.api.endpoint(NOTIFICATIONS_URI)))?;

        let templates = listing.template_set();
        if listing.has_more() {
            tracing::warn!(
                fetched = templates.len(),
                "Template pagination is not implemented, remaining pages were ignored"
            );
        }

        self.cache.store_primary(&templates).await?;
        TemplateMetrics::record_remote_load();
        Ok(templates)
    }

    /// Re-resolve templates and overwrite the fallback list with them.
    ///
    /// The in-memory set is left untouched.
    pub async fn refresh_fallback(&self) -> Result<TemplateSet> {
        let templates = self.resolve_templates().await?;
        self.cache.store_fallback(&templates).await?;

        tracing::info!(
            path = %self.cache.fallback_path().display(),
            templates = templates.len(),
            "Fallback templates refreshed"
        );
        Ok(templates)
    }

    pub fn is_valid_template(&self, template_id: &str) -> bool {
        self.templates.contains(template_id)
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// Send `template_id` to `email` with `data` substituted.
    ///
    /// The raw response is returned whatever its status. `None` means the
    /// request never got a response; the outcome is unknown.
    pub async fn send(
        &self,
        email: &str,
        template_id: &str,
        data: Map<String, Value>,
        attachment: Option<Attachment>,
    ) -> Option<reqwest::Response> {
        let mut request = SendRequest::new(email, template_id, data);
        request.attachment = attachment;
        self.send_request(&request).await
    }

    /// Dispatch a prepared [`SendRequest`]; see [`CourierClient::send`]
    pub async fn send_request(&self, request: &SendRequest) -> Option<reqwest::Response> {
        let with_attachment = request.attachment.is_some();

        match self.api.post_json(SEND_URI, &request.payload()).await {
            Ok(response) => {
                SendMetrics::record_dispatched(with_attachment);
                tracing::info!(
                    template = %request.template_id,
                    status = response.status().as_u16(),
                    attachment = with_attachment,
                    "Send request dispatched"
                );
                Some(response)
            }
            Err(e) => {
                SendMetrics::record_transport_error();
                tracing::warn!(
                    template = %request.template_id,
                    error = %e,
                    "Send request failed"
                );
                None
            }
        }
    }
}

impl std::fmt::Debug for CourierClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CourierClient")
            .field("api", &self.api)
            .field("cache", &self.cache)
            .field("templates", &self.templates.len())
            .finish()
    }
}
