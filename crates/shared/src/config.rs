//! Configuration types for the oversight tools

use crate::error::{OversightError, Result};
use crate::phase::{default_phases, Phase};
use crate::resource::normalize_base_path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for the feedback relay server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelayConfig {
    /// Address the relay listens on
    pub bind: String,

    /// Origin the published site is served from
    pub production_origin: String,

    /// Additional origins allowed during local development
    pub dev_origins: Vec<String>,

    /// `owner/name` of the repository issues are filed in
    pub github_repo: String,

    /// Base URL of the GitHub REST API
    pub github_api_url: String,

    /// Environment variable holding the API token
    pub token_env: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8787".to_string(),
            production_origin: "https://malathon.github.io".to_string(),
            dev_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:4173".to_string(),
            ],
            github_repo: "MALathon/ai-oversight-tools".to_string(),
            github_api_url: "https://api.github.com".to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
        }
    }
}

/// Application configuration (oversight.json / oversight.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Deployment prefix prepended to every data request
    pub base_path: String,

    /// Origin static data is fetched from over HTTP
    pub site_origin: String,

    /// Local directory holding the JSON documents; preferred over HTTP when set
    pub data_dir: Option<PathBuf>,

    /// Lifecycle phase enumeration
    pub phases: Vec<Phase>,

    /// Relay endpoint the feedback client posts to
    pub feedback_endpoint: String,

    pub relay: RelayConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            site_origin: "http://localhost:4173".to_string(),
            data_dir: None,
            phases: default_phases(),
            feedback_endpoint: "https://ai-oversight-feedback.malathon.workers.dev".to_string(),
            relay: RelayConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON or YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );

        let mut config: Self = if is_yaml {
            serde_yaml::from_str(&content)
                .map_err(|e| OversightError::Config(format!("{}: {}", path.display(), e)))?
        } else {
            serde_json::from_str(&content)?
        };
        config.base_path = normalize_base_path(&config.base_path);
        Ok(config)
    }

    /// Apply `OVERSIGHT_*` environment overrides
    pub fn apply_env(mut self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok());
        self
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(base) = lookup("OVERSIGHT_BASE_PATH") {
            self.base_path = normalize_base_path(&base);
        }
        if let Some(origin) = lookup("OVERSIGHT_SITE_ORIGIN") {
            self.site_origin = origin;
        }
        if let Some(dir) = lookup("OVERSIGHT_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(endpoint) = lookup("OVERSIGHT_FEEDBACK_ENDPOINT") {
            self.feedback_endpoint = endpoint;
        }
    }

    /// Known phase ids
    pub fn phase_ids(&self) -> Vec<&str> {
        self.phases.iter().map(|p| p.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.base_path, "");
        assert_eq!(config.phase_ids(), vec!["phase-1", "phase-2", "phase-3"]);
        assert_eq!(config.relay.production_origin, "https://malathon.github.io");
    }

    #[test]
    fn test_config_parse_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"basePath": "/ai-oversight-tools/", "relay": {{"bind": "0.0.0.0:9000"}}}}"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_path, "/ai-oversight-tools");
        assert_eq!(config.relay.bind, "0.0.0.0:9000");
        assert_eq!(config.relay.github_repo, "MALathon/ai-oversight-tools");
    }

    #[test]
    fn test_config_parse_yaml() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "basePath: ''").unwrap();
        writeln!(file, "dataDir: build").unwrap();
        writeln!(file, "phases:").unwrap();
        writeln!(file, "  - {{id: design, name: Design, short: D}}").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("build")));
        assert_eq!(config.phase_ids(), vec!["design"]);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("OVERSIGHT_BASE_PATH", "ai-oversight-tools"),
            ("OVERSIGHT_DATA_DIR", "/srv/site"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.base_path, "/ai-oversight-tools");
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/site")));
        assert_eq!(config.site_origin, "http://localhost:4173");
    }
}
