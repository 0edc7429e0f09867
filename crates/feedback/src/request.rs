//! Feedback wire types

use crate::error::ValidationError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Body posted by the feedback form.
///
/// Every field is optional on the wire, and a field of the wrong type reads
/// as absent, so validation reports the offending field by name instead of
/// deserialization failing the whole body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Page the form was opened from
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Accept any JSON value; keep it only when it has the expected type
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// A request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub labels: Vec<String>,
    pub title: String,
    pub description: String,
    pub page: Option<String>,
    pub user_agent: Option<String>,
}

impl FeedbackRequest {
    pub fn new(labels: Vec<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            labels: Some(labels),
            title: Some(title.into()),
            description: Some(description.into()),
            page: None,
            user_agent: None,
        }
    }

    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Check labels, then title, then description; the first failure wins.
    ///
    /// Whitespace-only values count as missing.
    pub fn validate(&self) -> Result<Submission, ValidationError> {
        let labels = match &self.labels {
            Some(labels) if !labels.is_empty() && labels.iter().all(|l| !is_blank(l)) => labels
                .iter()
                .map(|l| l.trim().to_string())
                .collect(),
            _ => return Err(ValidationError::Labels),
        };
        let title = required(&self.title).ok_or(ValidationError::Title)?;
        let description = required(&self.description).ok_or(ValidationError::Description)?;

        Ok(Submission {
            labels,
            title,
            description,
            page: self.page.clone(),
            user_agent: self.user_agent.clone(),
        })
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn required(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !is_blank(v))
        .map(|v| v.trim().to_string())
}

/// Successful issue creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCreated {
    pub success: bool,
    pub issue_number: u64,
    pub issue_url: String,
}

impl IssueCreated {
    pub fn new(issue_number: u64, issue_url: impl Into<String>) -> Self {
        Self {
            success: true,
            issue_number,
            issue_url: issue_url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Relay response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedbackResponse {
    Created(IssueCreated),
    Error(ErrorBody),
}

/// An issue label offered in the feedback form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> FeedbackRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_request() {
        let request = FeedbackRequest::new(vec!["bug".to_string()], "Broken link", "The P2 tab 404s")
            .with_page("/protocol-builder");
        let submission = request.validate().unwrap();
        assert_eq!(submission.labels, vec!["bug"]);
        assert_eq!(submission.page.as_deref(), Some("/protocol-builder"));
    }

    #[test]
    fn test_missing_labels_reported_first() {
        let request = parse(json!({}));
        assert_eq!(request.validate(), Err(ValidationError::Labels));
    }

    #[test]
    fn test_empty_labels_rejected() {
        let request = parse(json!({"labels": [], "title": "t", "description": "d"}));
        assert_eq!(request.validate(), Err(ValidationError::Labels));

        let request = parse(json!({"labels": ["  "], "title": "t", "description": "d"}));
        assert_eq!(request.validate(), Err(ValidationError::Labels));
    }

    #[test]
    fn test_title_checked_before_description() {
        let request = parse(json!({"labels": ["bug"]}));
        assert_eq!(request.validate(), Err(ValidationError::Title));

        let request = parse(json!({"labels": ["bug"], "title": "t", "description": "   "}));
        assert_eq!(request.validate(), Err(ValidationError::Description));
    }

    #[test]
    fn test_wrong_types_reported_in_field_order() {
        let request = parse(json!({"title": 5, "description": "d"}));
        assert_eq!(request.validate(), Err(ValidationError::Labels));

        let request = parse(json!({"labels": "bug", "title": "t", "description": "d"}));
        assert_eq!(request.validate(), Err(ValidationError::Labels));

        let request = parse(json!({"labels": ["bug", 7], "title": "t", "description": "d"}));
        assert_eq!(request.validate(), Err(ValidationError::Labels));

        let request = parse(json!({"labels": ["bug"], "title": ["t"], "description": 42}));
        assert_eq!(request.validate(), Err(ValidationError::Title));

        let request = parse(json!({"labels": ["bug"], "title": "t", "description": 42}));
        assert_eq!(request.validate(), Err(ValidationError::Description));
    }

    #[test]
    fn test_wrong_typed_optional_fields_dropped() {
        let request = parse(json!({
            "labels": ["bug"],
            "title": "t",
            "description": "d",
            "page": 3,
            "userAgent": null
        }));
        let submission = request.validate().unwrap();
        assert_eq!(submission.page, None);
        assert_eq!(submission.user_agent, None);
    }

    #[test]
    fn test_user_agent_is_camel_case() {
        let request = parse(json!({"userAgent": "Playwright Test"}));
        assert_eq!(request.user_agent.as_deref(), Some("Playwright Test"));
    }

    #[test]
    fn test_response_shapes() {
        let created = serde_json::to_value(FeedbackResponse::Created(IssueCreated::new(42, "https://github.com/x/y/issues/42"))).unwrap();
        assert_eq!(created, json!({"success": true, "issueNumber": 42, "issueUrl": "https://github.com/x/y/issues/42"}));

        let error: FeedbackResponse = serde_json::from_value(json!({"error": "Method not allowed"})).unwrap();
        assert_eq!(error, FeedbackResponse::Error(ErrorBody::new("Method not allowed")));
    }
}
