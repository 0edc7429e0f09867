//! oversight feedback command

use crate::context::Context;
use clap::Args;
use console::style;
use dialoguer::{Input, MultiSelect};
use feedback::{FeedbackClient, FeedbackRequest, GitHubIssueTracker};
use tracing::debug;

#[derive(Debug, Args)]
pub struct FeedbackCommand {
    /// Issue label (repeatable)
    #[arg(short, long = "label")]
    pub labels: Vec<String>,

    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    /// Page the feedback is about
    #[arg(long)]
    pub page: Option<String>,
}

impl FeedbackCommand {
    pub async fn run(&self, ctx: &Context) -> anyhow::Result<()> {
        let client = FeedbackClient::new(&ctx.config.feedback_endpoint);

        let labels = if self.labels.is_empty() {
            let tracker = GitHubIssueTracker::from_config(&ctx.config.relay);
            prompt_labels(&tracker).await?
        } else {
            self.labels.clone()
        };
        let title = match &self.title {
            Some(title) => title.clone(),
            None => Input::new().with_prompt("Title").interact_text()?,
        };
        let description = match &self.description {
            Some(description) => description.clone(),
            None => Input::new().with_prompt("Description").interact_text()?,
        };

        let mut request = FeedbackRequest::new(labels, title, description)
            .with_user_agent(format!("oversight-cli/{}", env!("CARGO_PKG_VERSION")));
        if let Some(page) = &self.page {
            request = request.with_page(page.clone());
        }

        let created = client.submit(&request).await?;
        if ctx.json {
            return ctx.print_json(&created);
        }
        println!(
            "{} Created issue #{}: {}",
            style("✓").green(),
            created.issue_number,
            created.issue_url
        );
        Ok(())
    }
}

/// Offer the tracker's labels; fall back to free text when they cannot be listed
async fn prompt_labels(tracker: &GitHubIssueTracker) -> anyhow::Result<Vec<String>> {
    match tracker.labels().await {
        Ok(labels) if !labels.is_empty() => {
            let names: Vec<&str> = labels.iter().map(|l| l.name.as_str()).collect();
            let picked = MultiSelect::new()
                .with_prompt("Labels (space to select)")
                .items(&names)
                .interact()?;
            Ok(picked.into_iter().map(|i| names[i].to_string()).collect())
        }
        other => {
            if let Err(e) = other {
                debug!(error = %e, "label listing unavailable");
            }
            let raw: String = Input::new()
                .with_prompt("Labels (comma separated)")
                .interact_text()?;
            Ok(raw
                .split(',')
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect())
        }
    }
}
