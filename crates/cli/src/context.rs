//! Global flags and the resolved configuration every command runs with

use clap::Args;
use fetcher::{HttpFetcher, ResourceFetcher, StaticDirFetcher};
use shared::{normalize_base_path, AppConfig};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Configuration file (JSON or YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Deployment base path, e.g. /ai-oversight-tools
    #[arg(long, global = true)]
    pub base_path: Option<String>,

    /// Read documents from this directory instead of the site
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Site origin documents are fetched from
    #[arg(long, global = true)]
    pub site_origin: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Configuration after file, environment and flags are layered
#[derive(Debug, Clone)]
pub struct Context {
    pub config: AppConfig,
    pub json: bool,
}

impl Context {
    pub fn from_args(args: &GlobalArgs) -> anyhow::Result<Self> {
        let config = match &args.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        Ok(Self::layer(config.apply_env(), args))
    }

    /// Flags override everything loaded before them
    fn layer(mut config: AppConfig, args: &GlobalArgs) -> Self {
        if let Some(base_path) = &args.base_path {
            config.base_path = normalize_base_path(base_path);
        }
        if let Some(data_dir) = &args.data_dir {
            config.data_dir = Some(data_dir.clone());
        }
        if let Some(origin) = &args.site_origin {
            config.site_origin = origin.clone();
        }
        Self {
            config,
            json: args.json,
        }
    }

    /// Local directory when configured, otherwise the site over HTTP
    pub fn fetcher(&self) -> Arc<dyn ResourceFetcher> {
        match &self.config.data_dir {
            Some(dir) => Arc::new(StaticDirFetcher::new(dir.clone())),
            None => Arc::new(HttpFetcher::new(self.config.site_origin.clone())),
        }
    }

    pub fn print_json<T: serde::Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
