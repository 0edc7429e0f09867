//! HttpFetcher - Retrieve resources from the deployed site

use crate::batch::{ResourceFetcher, ResourceRequest};
use async_trait::async_trait;
use shared::{FetchError, FetchErrorKind};

/// Fetches `GET {origin}{path}` over HTTP
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    origin: String,
}

impl HttpFetcher {
    /// Create a fetcher for a site origin such as `https://malathon.github.io`
    pub fn new(origin: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), origin)
    }

    pub fn with_client(client: reqwest::Client, origin: impl Into<String>) -> Self {
        let origin = origin.into();
        Self {
            client,
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    /// Full URL for a request
    pub fn url_for(&self, request: &ResourceRequest) -> String {
        format!("{}{}", self.origin, request.path)
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, request: &ResourceRequest) -> Result<String, FetchError> {
        let url = self.url_for(request);
        let network = |e: reqwest::Error| {
            FetchError::new(request.id, &request.path, FetchErrorKind::Network(e.to_string()))
        };

        let response = self.client.get(&url).send().await.map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                request.id,
                &request.path,
                FetchErrorKind::Status(status.as_u16()),
            ));
        }

        response.text().await.map_err(network)
    }
}
