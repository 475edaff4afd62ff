//! Remote collaborator traits and their HTTP implementation.
//!
//! The three services the dashboard depends on are modelled as async traits so
//! the runtime can hold them as `Arc<dyn ...>` and tests can substitute fakes:
//!
//! - [`RemoteClassifier`]: text → [`Verdict`]
//! - [`RemoteExplainer`]: text → rationale
//! - [`StatsProvider`]: → [`StatsSnapshot`]
//!
//! [`HttpBackend`] implements all three over one `reqwest::Client`. Error payloads
//! may come with a non-2xx status, so bodies are decoded before the status is
//! considered; only an undecodable body turns into an `HTTP <status>` error.

use super::messages::{AnalysisRequest, ClassifyReply, ExplainReply, StatsReply, TraceContext};
use crate::domain::{Result, StatsSnapshot, ThreatscopeError, Verdict};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Header carrying the W3C trace context.
const TRACEPARENT_HEADER: &str = "traceparent";

/// Classifies text as threat or safe.
#[async_trait]
pub trait RemoteClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Verdict>;
}

/// Produces a natural-language rationale for a classification.
#[async_trait]
pub trait RemoteExplainer: Send + Sync {
    async fn explain(&self, text: &str) -> Result<String>;
}

/// Reports aggregate classification counts.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    async fn fetch_stats(&self) -> Result<StatsSnapshot>;
}

/// Endpoint layout of the analysis API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub base_url: String,
    pub classify_path: String,
    pub explain_path: String,
    pub stats_path: String,
}

impl Endpoints {
    /// Joins `path` onto the base URL with exactly one slash between them.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            classify_path: "/api/predict/".to_string(),
            explain_path: "/api/analyze/".to_string(),
            stats_path: "/api/stats/".to_string(),
        }
    }
}

/// HTTP client for the classify, explain, and stats endpoints.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    endpoints: Endpoints,
}

impl HttpBackend {
    /// Builds a backend whose every request is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ThreatscopeError::Http`] if the underlying client cannot be built.
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("threatscope/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, endpoints })
    }

    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn with_trace_context(request: RequestBuilder) -> RequestBuilder {
        match TraceContext::from_current() {
            Some(context) => request.header(TRACEPARENT_HEADER, context.traceparent()),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = Self::with_trace_context(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = %status, body_len = body.len(), "remote response received");

        decode_reply(status, &body)
    }

    async fn post_analysis<T: DeserializeOwned>(&self, path: &str, text: &str) -> Result<T> {
        let url = self.endpoints.url(path);
        let request = self.client.post(&url).json(&AnalysisRequest::new(text));
        self.send(request).await
    }
}

/// Decodes a reply body, falling back to an `HTTP <status>` error when the body
/// is not the expected JSON and the status is not a success.
///
/// # Errors
///
/// Returns [`ThreatscopeError::Serde`] for a malformed 2xx body and
/// [`ThreatscopeError::Runtime`] carrying the status otherwise.
pub fn decode_reply<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    match serde_json::from_str::<T>(body) {
        Ok(reply) => Ok(reply),
        Err(e) if status.is_success() => Err(ThreatscopeError::Serde(e)),
        Err(_) => Err(ThreatscopeError::Runtime(format!("HTTP {}", status.as_u16()))),
    }
}

#[async_trait]
impl RemoteClassifier for HttpBackend {
    async fn classify(&self, text: &str) -> Result<Verdict> {
        let reply: ClassifyReply = self
            .post_analysis(&self.endpoints.classify_path, text)
            .await
            .map_err(|e| ThreatscopeError::Classifier(e.user_message()))?;

        reply.into_verdict()
    }
}

#[async_trait]
impl RemoteExplainer for HttpBackend {
    async fn explain(&self, text: &str) -> Result<String> {
        let reply: ExplainReply = self
            .post_analysis(&self.endpoints.explain_path, text)
            .await
            .map_err(|e| ThreatscopeError::Explainer(e.user_message()))?;

        reply.into_text()
    }
}

#[async_trait]
impl StatsProvider for HttpBackend {
    async fn fetch_stats(&self) -> Result<StatsSnapshot> {
        let url = self.endpoints.url(&self.endpoints.stats_path);
        let reply: StatsReply = self
            .send(self.client.get(&url))
            .await
            .map_err(|e| ThreatscopeError::StatsRefresh(e.user_message()))?;

        reply.into_snapshot()
    }
}

/// The three collaborators the runtime dispatches remote actions to.
#[derive(Clone)]
pub struct Services {
    pub classifier: Arc<dyn RemoteClassifier>,
    pub explainer: Arc<dyn RemoteExplainer>,
    pub stats: Arc<dyn StatsProvider>,
}

impl Services {
    /// Uses one backend for all three roles.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: RemoteClassifier + RemoteExplainer + StatsProvider + 'static,
    {
        Self {
            classifier: backend.clone(),
            explainer: backend.clone(),
            stats: backend,
        }
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VerdictKind;

    #[test]
    fn test_url_join_normalizes_slashes() {
        let endpoints = Endpoints {
            base_url: "http://localhost:8000/".to_string(),
            ..Endpoints::default()
        };
        assert_eq!(endpoints.url("/api/predict/"), "http://localhost:8000/api/predict/");
        assert_eq!(endpoints.url("api/stats/"), "http://localhost:8000/api/stats/");
    }

    #[test]
    fn test_error_payload_is_decoded_despite_bad_status() {
        let reply: ClassifyReply =
            decode_reply(StatusCode::BAD_REQUEST, r#"{"error":"No input provided"}"#).unwrap();
        assert!(matches!(reply, ClassifyReply::Error { ref error } if error == "No input provided"));
    }

    #[test]
    fn test_undecodable_body_falls_back_to_status() {
        let err = decode_reply::<ClassifyReply>(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>")
            .unwrap_err();
        assert_eq!(err.to_string(), "Runtime error: HTTP 502");

        let err = decode_reply::<ClassifyReply>(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, ThreatscopeError::Serde(_)));
    }

    #[test]
    fn test_success_body_decodes_to_verdict() {
        let reply: ClassifyReply =
            decode_reply(StatusCode::OK, r#"{"input":"hello world","prediction":"non-threat"}"#).unwrap();
        assert_eq!(reply.into_verdict().unwrap().kind, VerdictKind::Safe);
    }

    #[test]
    fn test_backend_builds_with_timeout() {
        let backend = HttpBackend::new(Endpoints::default(), Duration::from_secs(5)).unwrap();
        assert_eq!(backend.endpoints().classify_path, "/api/predict/");
    }
}
