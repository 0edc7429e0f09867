//! IssueTracker - Where accepted feedback ends up

use crate::error::{FeedbackError, Result};
use crate::request::{IssueCreated, Label, Submission};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::RelayConfig;
use tracing::{debug, info};

#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// File one issue for a validated submission
    async fn create_issue(&self, submission: &Submission) -> Result<IssueCreated>;
}

/// Issue body: the description followed by a metadata footer
pub fn issue_body(submission: &Submission) -> String {
    let mut body = submission.description.clone();
    body.push_str("\n\n---\n");
    if let Some(page) = &submission.page {
        body.push_str(&format!("**Page:** `{}`\n", page));
    }
    if let Some(user_agent) = &submission.user_agent {
        body.push_str(&format!("**User agent:** {}\n", user_agent));
    }
    body.push_str("_Submitted via the feedback form_");
    body
}

#[derive(Serialize)]
struct CreateIssue<'a> {
    title: &'a str,
    body: String,
    labels: &'a [String],
}

#[derive(Deserialize)]
struct CreatedIssue {
    number: u64,
    html_url: String,
}

/// GitHub REST API tracker
#[derive(Debug, Clone)]
pub struct GitHubIssueTracker {
    client: reqwest::Client,
    api_url: String,
    repo: String,
    token: Option<String>,
}

impl GitHubIssueTracker {
    pub fn new(api_url: impl Into<String>, repo: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            repo: repo.into(),
            token,
        }
    }

    /// Build from relay settings, reading the token from `tokenEnv`
    pub fn from_config(config: &RelayConfig) -> Self {
        let token = std::env::var(&config.token_env).ok().filter(|t| !t.is_empty());
        if token.is_none() {
            debug!(env = %config.token_env, "no API token set; issue creation will be unauthenticated");
        }
        Self::new(&config.github_api_url, &config.github_repo, token)
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Labels users can pick from
    pub async fn labels(&self) -> Result<Vec<Label>> {
        let response = self
            .request(self.client.get(self.url("labels")))
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?.json().await.map_err(transport)
    }

    fn url(&self, tail: &str) -> String {
        format!("{}/repos/{}/{}", self.api_url, self.repo, tail)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder
            .header(reqwest::header::USER_AGENT, "ai-oversight-feedback-relay")
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

fn transport(e: reqwest::Error) -> FeedbackError {
    FeedbackError::Tracker(e.to_string())
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    Err(FeedbackError::Tracker(format!(
        "GitHub API returned {}: {}",
        status.as_u16(),
        text.trim()
    )))
}

#[async_trait]
impl IssueTracker for GitHubIssueTracker {
    async fn create_issue(&self, submission: &Submission) -> Result<IssueCreated> {
        let payload = CreateIssue {
            title: &submission.title,
            body: issue_body(submission),
            labels: &submission.labels,
        };

        let response = self
            .request(self.client.post(self.url("issues")))
            .json(&payload)
            .send()
            .await
            .map_err(transport)?;
        let created: CreatedIssue = check_status(response)
            .await?
            .json()
            .await
            .map_err(transport)?;

        info!(repo = %self.repo, number = created.number, "created issue");
        Ok(IssueCreated::new(created.number, created.html_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    fn submission() -> Submission {
        Submission {
            labels: vec!["user-feedback".to_string()],
            title: "Unclear guidance".to_string(),
            description: "Phase 2 text for S1 is vague.".to_string(),
            page: Some("/innovator".to_string()),
            user_agent: Some("Mozilla/5.0".to_string()),
        }
    }

    #[test]
    fn test_issue_body_has_footer() {
        let body = issue_body(&submission());
        assert!(body.starts_with("Phase 2 text for S1 is vague."));
        assert!(body.contains("**Page:** `/innovator`"));
        assert!(body.contains("Mozilla/5.0"));
    }

    #[test]
    fn test_issue_body_without_metadata() {
        let mut submission = submission();
        submission.page = None;
        submission.user_agent = None;
        let body = issue_body(&submission);
        assert!(!body.contains("Page"));
        assert!(body.ends_with("_Submitted via the feedback form_"));
    }

    #[test]
    fn test_urls() {
        let tracker = GitHubIssueTracker::new("https://api.github.com/", "MALathon/ai-oversight-tools", None);
        assert_eq!(
            tracker.url("labels"),
            "https://api.github.com/repos/MALathon/ai-oversight-tools/labels"
        );
    }

    /// Serve a fake repository API on an ephemeral port and return its base URL
    async fn fake_api(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_labels_listed_from_repository() {
        let router = Router::new().route(
            "/repos/o/r/labels",
            get(|headers: HeaderMap| async move {
                let authorized = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    == Some("Bearer secret");
                if !authorized {
                    return (StatusCode::UNAUTHORIZED, Json(json!({"message": "no"})));
                }
                (
                    StatusCode::OK,
                    Json(json!([
                        {"name": "bug", "color": "d73a4a", "description": "Something is wrong"},
                        {"name": "user-feedback", "color": "0e8a16"}
                    ])),
                )
            }),
        );
        let api = fake_api(router).await;

        let tracker = GitHubIssueTracker::new(&api, "o/r", Some("secret".to_string()));
        let labels = tracker.labels().await.unwrap();
        let names: Vec<&str> = labels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["bug", "user-feedback"]);
        assert_eq!(labels[1].description, None);
    }

    #[tokio::test]
    async fn test_labels_error_status_is_tracker_error() {
        let router = Router::new().route(
            "/repos/o/r/labels",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({"message": "Not Found"}))) }),
        );
        let api = fake_api(router).await;

        let tracker = GitHubIssueTracker::new(&api, "o/r", None);
        match tracker.labels().await {
            Err(FeedbackError::Tracker(message)) => assert!(message.contains("404")),
            other => panic!("expected tracker error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_issue_posts_title_body_and_labels() {
        let router = Router::new().route(
            "/repos/o/r/issues",
            axum::routing::post(|Json(payload): Json<Value>| async move {
                assert_eq!(payload["title"], "Unclear guidance");
                assert_eq!(payload["labels"], json!(["user-feedback"]));
                assert!(payload["body"].as_str().unwrap().contains("/innovator"));
                (
                    StatusCode::CREATED,
                    Json(json!({"number": 7, "html_url": "https://example.test/o/r/issues/7"})),
                )
            }),
        );
        let api = fake_api(router).await;

        let tracker = GitHubIssueTracker::new(&api, "o/r", None);
        let created = tracker.create_issue(&submission()).await.unwrap();
        assert_eq!(created.issue_number, 7);
        assert_eq!(created.issue_url, "https://example.test/o/r/issues/7");
    }
}
