//! # AI Oversight Feedback
//!
//! User feedback travels from the static site to an issue tracker through a
//! small relay that holds the tracker credentials.
//!
//! ## Components
//!
//! - `FeedbackRequest` - Wire body and field validation (labels, title, description)
//! - `FeedbackClient` - Validates locally, then posts to the relay
//! - `relay_router` / `serve` - HTTP relay with an origin allow-list
//! - `IssueTracker` - Tracker abstraction, `GitHubIssueTracker` in production

mod client;
mod cors;
mod error;
mod relay;
mod request;
mod tracker;

pub use client::FeedbackClient;
pub use cors::OriginPolicy;
pub use error::{FeedbackError, Result, ValidationError};
pub use relay::{relay_router, serve, RelayState};
pub use request::{ErrorBody, FeedbackRequest, FeedbackResponse, IssueCreated, Label, Submission};
pub use tracker::{issue_body, GitHubIssueTracker, IssueTracker};
