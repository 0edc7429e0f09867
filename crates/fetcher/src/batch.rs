//! Batch retrieval of resources

use async_trait::async_trait;
use shared::{resource_path, FetchError, ResourceId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::debug;

/// A single retrieval: which document, and the path it is served at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    pub id: ResourceId,
    pub path: String,
}

impl ResourceRequest {
    pub fn new(base_path: &str, id: ResourceId) -> Self {
        Self {
            id,
            path: resource_path(base_path, id),
        }
    }
}

/// Transport for static resources
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Retrieve the raw body of one resource
    async fn fetch(&self, request: &ResourceRequest) -> Result<String, FetchError>;
}

/// Raw bodies of a completed batch, keyed by resource id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceBag {
    bodies: HashMap<ResourceId, String>,
}

impl ResourceBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ResourceId, body: impl Into<String>) {
        self.bodies.insert(id, body.into());
    }

    pub fn get(&self, id: ResourceId) -> Option<&str> {
        self.bodies.get(&id).map(|s| s.as_str())
    }

    pub fn contains(&self, id: ResourceId) -> bool {
        self.bodies.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// Fetch every resource concurrently.
///
/// All requests are issued before any is awaited and results are taken in
/// completion order. The first request to fail fails the whole batch with
/// its error, no bag is returned, and requests still in flight are aborted.
pub async fn fetch_all(
    fetcher: Arc<dyn ResourceFetcher>,
    base_path: &str,
    ids: &[ResourceId],
) -> Result<ResourceBag, FetchError> {
    let mut seen = HashSet::new();
    let mut pending = JoinSet::new();

    for &id in ids {
        if !seen.insert(id) {
            continue;
        }
        let request = ResourceRequest::new(base_path, id);
        let task_fetcher = Arc::clone(&fetcher);
        pending.spawn(async move {
            let outcome = task_fetcher.fetch(&request).await;
            (request, outcome)
        });
    }

    let mut bag = ResourceBag::new();

    while let Some(joined) = pending.join_next().await {
        let (request, outcome) = match joined {
            Ok(done) => done,
            Err(join_error) if join_error.is_panic() => {
                std::panic::resume_unwind(join_error.into_panic())
            }
            // Cancelled; only aborted tasks end this way
            Err(_) => continue,
        };

        match outcome {
            Ok(body) => {
                debug!(resource = %request.id, path = %request.path, bytes = body.len(), "fetched resource");
                bag.insert(request.id, body);
            }
            Err(err) => {
                pending.abort_all();
                return Err(err);
            }
        }
    }

    Ok(bag)
}
