//! MemoryFetcher - In-memory resource transport
//!
//! Serves bodies registered by path. Useful for testing and for embedding
//! bundled data.

use crate::batch::{ResourceFetcher, ResourceRequest};
use async_trait::async_trait;
use shared::{resource_path, FetchError, FetchErrorKind, ResourceId};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct MemoryFetcher {
    bodies: HashMap<String, String>,
    failures: HashMap<String, FetchErrorKind>,
    delays: HashMap<String, Duration>,
    requested: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` at an exact path
    pub fn with_document(mut self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(path.into(), body.into());
        self
    }

    /// Serve `body` for a resource under a base path
    pub fn with_resource(self, base_path: &str, id: ResourceId, body: impl Into<String>) -> Self {
        self.with_document(resource_path(base_path, id), body)
    }

    /// Fail every request for `path`
    pub fn with_failure(mut self, path: &str, kind: FetchErrorKind) -> Self {
        self.failures.insert(path.to_string(), kind);
        self
    }

    /// Hold requests for `path` before answering
    pub fn with_delay(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self
    }

    /// Paths requested so far, in request order
    pub fn requested_paths(&self) -> Vec<String> {
        self.requested.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requested.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl ResourceFetcher for MemoryFetcher {
    async fn fetch(&self, request: &ResourceRequest) -> Result<String, FetchError> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(request.path.clone());
        }

        if let Some(delay) = self.delays.get(&request.path) {
            tokio::time::sleep(*delay).await;
        }

        if let Some(kind) = self.failures.get(&request.path) {
            return Err(FetchError::new(request.id, &request.path, kind.clone()));
        }

        self.bodies.get(&request.path).cloned().ok_or_else(|| {
            FetchError::new(request.id, &request.path, FetchErrorKind::Status(404))
        })
    }
}
