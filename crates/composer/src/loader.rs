//! RouteLoader - Generic fetch + compose executor for every route

use crate::documents::ParsedBag;
use crate::routes::{route, RouteSpec};
use crate::view_model::ViewModel;
use fetcher::{fetch_all, ResourceFetcher};
use shared::{normalize_base_path, OversightError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// A route's data could not be assembled; the page shows "data unavailable"
#[derive(Debug, Error)]
#[error("Data unavailable for route '{route}': {source}")]
pub struct LoadError {
    pub route: String,
    #[source]
    pub source: OversightError,
}

impl LoadError {
    /// Navigating again may succeed after a transport failure
    pub fn is_retryable(&self) -> bool {
        self.source.is_transport()
    }
}

#[derive(Clone)]
pub struct RouteLoader {
    fetcher: Arc<dyn ResourceFetcher>,
    base_path: String,
}

impl RouteLoader {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, base_path: &str) -> Self {
        Self {
            fetcher,
            base_path: normalize_base_path(base_path),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Fetch every document the route needs, then compose.
    ///
    /// Nothing is composed until every fetch has completed and parsed.
    pub async fn load(&self, spec: &RouteSpec) -> Result<ViewModel, LoadError> {
        let fail = |source: OversightError| {
            warn!(route = spec.name, error = %source, "route data unavailable");
            LoadError {
                route: spec.name.to_string(),
                source,
            }
        };

        let bag = fetch_all(Arc::clone(&self.fetcher), &self.base_path, spec.resources)
            .await
            .map_err(|e| fail(e.into()))?;
        let parsed = ParsedBag::parse(&bag, spec.resources).map_err(fail)?;
        let view_model = (spec.compose)(&parsed).map_err(fail)?;

        info!(route = spec.name, fields = view_model.len(), "composed view-model");
        Ok(view_model)
    }

    pub async fn load_by_name(&self, name: &str) -> Result<ViewModel, LoadError> {
        let spec = route(name).ok_or_else(|| LoadError {
            route: name.to_string(),
            source: OversightError::Other(format!("Unknown route '{}'", name)),
        })?;
        self.load(spec).await
    }
}
