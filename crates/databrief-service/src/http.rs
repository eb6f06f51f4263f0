//! HTTP implementation of the analysis-service contract.
//!
//! Four endpoints, multipart/JSON. Every call either succeeds, maps a
//! well-formed `{"error": ...}` payload to `BriefError::Service`, or
//! fails as a transport error; nothing is retried.

use async_trait::async_trait;
use databrief_core::error::{BriefError, Result};
use databrief_core::{AnalysisResult, AnalysisService, AnalyzeRequest, HistoryEntry, SessionReport};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config;

/// Client for the DataBrief analysis service.
#[derive(Clone)]
pub struct HttpAnalysisService {
    client: Client,
    base_url: String,
}

impl HttpAnalysisService {
    /// Creates a client against the given base address.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Creates a client with the base address resolved from the
    /// environment, the config file, or the default.
    pub fn from_env() -> Self {
        Self::new(config::resolve_base_url())
    }

    /// Overrides the base address after construction.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn read_body(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| BriefError::transport(format!("Failed to read response body: {err}")))?;

        if !status.is_success() {
            return Err(BriefError::transport(format!(
                "Service answered {status}: {body}"
            )));
        }

        Ok(body)
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>> {
        let response = self
            .client
            .get(self.endpoint("history"))
            .send()
            .await
            .map_err(|err| BriefError::transport(format!("History fetch failed: {err}")))?;

        let body = Self::read_body(response).await?;
        serde_json::from_str(&body).map_err(|err| {
            BriefError::transport(format!("Unexpected history payload: {err}"))
        })
    }

    async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalysisResult> {
        let mut form = Form::new()
            .text("query", request.query.clone())
            .text(
                "needs_chart",
                if request.needs_chart { "true" } else { "false" },
            );
        if let Some(attachment) = request.attachment {
            form = form.part(
                "file",
                Part::bytes(attachment.bytes).file_name(attachment.file_name),
            );
        }

        tracing::debug!(
            target: "service",
            query = %request.query,
            needs_chart = request.needs_chart,
            "Submitting analysis request"
        );

        let response = self
            .client
            .post(self.endpoint("analyze"))
            .multipart(form)
            .send()
            .await
            .map_err(|err| BriefError::transport(format!("Analysis request failed: {err}")))?;

        let body = Self::read_body(response).await?;
        decode_outcome(&body)
    }

    async fn reset(&self) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint("reset"))
            .send()
            .await
            .map_err(|err| BriefError::transport(format!("Reset request failed: {err}")))?;

        // The acknowledgement body carries no information.
        Self::read_body(response).await?;
        Ok(())
    }

    async fn compile_report(&self) -> Result<SessionReport> {
        let response = self
            .client
            .get(self.endpoint("summary"))
            .send()
            .await
            .map_err(|err| BriefError::transport(format!("Report request failed: {err}")))?;

        let body = Self::read_body(response).await?;
        decode_outcome(&body)
    }
}

/// A well-formed service failure payload.
#[derive(Deserialize)]
struct ServiceFailure {
    error: String,
}

/// Discriminated decode of a service response: a `{"error": ...}`
/// payload beats the success shape, everything else is a transport
/// failure (unexpected shape).
#[derive(Deserialize)]
#[serde(untagged)]
enum ApiOutcome<T> {
    Failure(ServiceFailure),
    Success(T),
}

fn decode_outcome<T: DeserializeOwned>(body: &str) -> Result<T> {
    match serde_json::from_str::<ApiOutcome<T>>(body) {
        Ok(ApiOutcome::Success(value)) => Ok(value),
        Ok(ApiOutcome::Failure(failure)) => Err(BriefError::service(failure.error)),
        Err(err) => Err(BriefError::transport(format!(
            "Unexpected service payload: {err}"
        ))),
    }
}
