//! Error types for the oversight data layer

use crate::resource::ResourceId;
use thiserror::Error;

/// What went wrong while retrieving a single resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// The transport answered with a non-success status
    Status(u16),
    /// The request never produced a response
    Network(String),
    /// Local read failure (static directory fetcher)
    Io(String),
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchErrorKind::Status(code) => write!(f, "HTTP status {}", code),
            FetchErrorKind::Network(msg) => write!(f, "network error: {}", msg),
            FetchErrorKind::Io(msg) => write!(f, "read error: {}", msg),
        }
    }
}

/// Error thrown when a resource could not be retrieved
#[derive(Debug, Clone, Error)]
#[error("Failed to fetch '{path}' ({resource}): {kind}")]
pub struct FetchError {
    pub resource: ResourceId,
    pub path: String,
    pub kind: FetchErrorKind,
}

impl FetchError {
    pub fn new(resource: ResourceId, path: impl Into<String>, kind: FetchErrorKind) -> Self {
        Self {
            resource,
            path: path.into(),
            kind,
        }
    }

    /// True when the resource simply does not exist at the requested path
    pub fn is_not_found(&self) -> bool {
        self.kind == FetchErrorKind::Status(404)
    }
}

/// Error thrown when parsed JSON does not have the expected shape
#[derive(Debug, Clone, Error)]
#[error("Resource '{resource}' has an unexpected shape at '{property}': expected {expected}")]
pub struct ShapeError {
    pub resource: ResourceId,
    pub property: String,
    pub expected: String,
}

impl ShapeError {
    pub fn new(resource: ResourceId, property: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            resource,
            property: property.into(),
            expected: expected.into(),
        }
    }
}

/// General oversight error type
#[derive(Debug, Error)]
pub enum OversightError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("Resource '{resource}' is not valid JSON: {source}")]
    Parse {
        resource: ResourceId,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl OversightError {
    /// Transport failures may succeed on the next navigation; shape and
    /// parse failures are data-authoring errors that will not.
    pub fn is_transport(&self) -> bool {
        matches!(self, OversightError::Fetch(_))
    }
}

pub type Result<T> = std::result::Result<T, OversightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_message_names_path_and_status() {
        let err = FetchError::new(
            ResourceId::RiskSubdomains,
            "/data/risk-subdomains.json",
            FetchErrorKind::Status(503),
        );
        let msg = err.to_string();
        assert!(msg.contains("/data/risk-subdomains.json"));
        assert!(msg.contains("503"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_shape_error_names_property() {
        let err = ShapeError::new(ResourceId::MitigationStrategies, "mitigationCategories", "an array");
        assert!(err.to_string().contains("mitigationCategories"));
    }

    #[test]
    fn test_transport_classification() {
        let fetch: OversightError =
            FetchError::new(ResourceId::Traceability, "/data/traceability.json", FetchErrorKind::Status(404)).into();
        assert!(fetch.is_transport());

        let shape: OversightError = ShapeError::new(ResourceId::Traceability, "links", "an array").into();
        assert!(!shape.is_transport());
    }
}
