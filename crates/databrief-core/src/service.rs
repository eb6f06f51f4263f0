//! The analysis-service contract.
//!
//! The remote service is an external collaborator; this trait is the
//! only surface the session engine sees, so orchestration code is
//! testable against recording mocks.

use async_trait::async_trait;

use crate::analysis::AnalysisResult;
use crate::error::Result;
use crate::history::HistoryEntry;
use crate::report::SessionReport;

/// Query text sent when the user attached a file but typed nothing.
pub const DEFAULT_ANALYZE_QUERY: &str = "Analyze this data";

/// A tabular file forwarded unexamined with a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name as shown to the user and sent in the multipart form.
    pub file_name: String,
    /// Raw file bytes; content is opaque to the client.
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// One `/analyze` submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeRequest {
    /// The user's question; never empty on the wire (see
    /// [`AnalyzeRequest::new`]).
    pub query: String,
    /// Whether the service should produce a chart series.
    pub needs_chart: bool,
    /// At most one attached file.
    pub attachment: Option<Attachment>,
}

impl AnalyzeRequest {
    /// Builds a request, defaulting an empty query to
    /// [`DEFAULT_ANALYZE_QUERY`] when a file is attached.
    pub fn new(query: impl Into<String>, needs_chart: bool, attachment: Option<Attachment>) -> Self {
        let mut query = query.into();
        if query.is_empty() && attachment.is_some() {
            query = DEFAULT_ANALYZE_QUERY.to_string();
        }
        Self {
            query,
            needs_chart,
            attachment,
        }
    }
}

/// The remote analysis service, one method per endpoint.
///
/// A well-formed `{"error": ...}` payload surfaces as
/// [`crate::BriefError::Service`]; anything else that goes wrong is a
/// transport failure. Implementations do not retry.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// `GET /history` - the full chronological exchange log.
    async fn fetch_history(&self) -> Result<Vec<HistoryEntry>>;

    /// `POST /analyze` - one submission.
    async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalysisResult>;

    /// `POST /reset` - server-side session reset.
    async fn reset(&self) -> Result<()>;

    /// `GET /summary` - executive report over the accumulated history.
    async fn compile_report(&self) -> Result<SessionReport>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_with_attachment_gets_default() {
        let request = AnalyzeRequest::new("", true, Some(Attachment::new("q1.csv", vec![1, 2])));
        assert_eq!(request.query, DEFAULT_ANALYZE_QUERY);
    }

    #[test]
    fn explicit_query_is_kept() {
        let request = AnalyzeRequest::new("Analyze Q1 revenue", false, None);
        assert_eq!(request.query, "Analyze Q1 revenue");
        assert!(request.attachment.is_none());
    }
}
