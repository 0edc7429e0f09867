//! FeedbackClient - Posts feedback to the relay

use crate::error::{FeedbackError, Result};
use crate::request::{ErrorBody, FeedbackRequest, IssueCreated};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct FeedbackClient {
    http: reqwest::Client,
    endpoint: String,
}

impl FeedbackClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit feedback. Invalid requests are rejected locally, before any
    /// network traffic.
    pub async fn submit(&self, request: &FeedbackRequest) -> Result<IssueCreated> {
        request.validate()?;

        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| FeedbackError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let created: IssueCreated = response
                .json()
                .await
                .map_err(|e| FeedbackError::Transport(e.to_string()))?;
            debug!(number = created.issue_number, "feedback accepted");
            return Ok(created);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);
        warn!(status = status.as_u16(), %message, "feedback rejected");
        Err(FeedbackError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
