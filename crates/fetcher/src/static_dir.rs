//! StaticDirFetcher - Read resources from a local build directory

use crate::batch::{ResourceFetcher, ResourceRequest};
use async_trait::async_trait;
use shared::{FetchError, FetchErrorKind};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads `{data_dir}/{file}`; the base path only matters to HTTP transports
#[derive(Debug, Clone)]
pub struct StaticDirFetcher {
    data_dir: PathBuf,
}

impl StaticDirFetcher {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[async_trait]
impl ResourceFetcher for StaticDirFetcher {
    async fn fetch(&self, request: &ResourceRequest) -> Result<String, FetchError> {
        let file = self.data_dir.join(request.id.file_name());
        tokio::fs::read_to_string(&file).await.map_err(|e| {
            let kind = match e.kind() {
                ErrorKind::NotFound => FetchErrorKind::Status(404),
                _ => FetchErrorKind::Io(format!("{}: {}", file.display(), e)),
            };
            FetchError::new(request.id, &request.path, kind)
        })
    }
}
