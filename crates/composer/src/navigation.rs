//! Navigator - Discards view-models from superseded navigations
//!
//! There is no cancellation. Each navigation takes a token; when its load
//! completes after a newer navigation has begun, the result is dropped.

use crate::loader::{LoadError, RouteLoader};
use crate::view_model::ViewModel;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationToken(u64);

pub struct Navigator {
    loader: RouteLoader,
    generation: AtomicU64,
}

impl Navigator {
    pub fn new(loader: RouteLoader) -> Self {
        Self {
            loader,
            generation: AtomicU64::new(0),
        }
    }

    /// Start a navigation, superseding any in flight
    pub fn begin(&self) -> NavigationToken {
        NavigationToken(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, token: NavigationToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token.0
    }

    /// Load a route; `Ok(None)` when a newer navigation started meanwhile
    pub async fn navigate(&self, route: &str) -> Result<Option<ViewModel>, LoadError> {
        let token = self.begin();
        let result = self.loader.load_by_name(route).await;

        if !self.is_current(token) {
            debug!(route, "discarding result of superseded navigation");
            return Ok(None);
        }

        result.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use shared::{resource_path, ResourceId};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_tokens_supersede() {
        let navigator = Navigator::new(RouteLoader::new(
            Arc::new(fixtures::memory_fetcher("")),
            "",
        ));

        let first = navigator.begin();
        assert!(navigator.is_current(first));

        let second = navigator.begin();
        assert!(!navigator.is_current(first));
        assert!(navigator.is_current(second));
    }

    #[tokio::test]
    async fn test_stale_navigation_is_discarded() {
        // protocol-builder is the only route reading traceability.json
        let fetcher = fixtures::memory_fetcher("").with_delay(
            &resource_path("", ResourceId::Traceability),
            Duration::from_millis(50),
        );
        let navigator = Navigator::new(RouteLoader::new(Arc::new(fetcher), ""));

        let (slow, fast) = tokio::join!(
            navigator.navigate("protocol-builder"),
            navigator.navigate("admin")
        );

        assert!(slow.unwrap().is_none());
        assert!(fast.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_sequential_navigations_all_complete() {
        let navigator = Navigator::new(RouteLoader::new(
            Arc::new(fixtures::memory_fetcher("")),
            "",
        ));

        assert!(navigator.navigate("admin").await.unwrap().is_some());
        assert!(navigator.navigate("innovator").await.unwrap().is_some());
    }
}
