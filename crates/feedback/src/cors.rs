//! Origin allow-list for the relay

use crate::error::{FeedbackError, Result};
use regex::Regex;
use shared::RelayConfig;

/// Decides which origin a response advertises.
///
/// Foreign origins are answered with the production origin, never echoed.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    production: String,
    dev_origins: Vec<String>,
    local: Regex,
}

impl OriginPolicy {
    pub fn new(production: impl Into<String>, dev_origins: Vec<String>) -> Result<Self> {
        let local = Regex::new(r"^http://(localhost|127\.0\.0\.1):\d{1,5}$")
            .map_err(|e| FeedbackError::Config(e.to_string()))?;
        Ok(Self {
            production: production.into(),
            dev_origins,
            local,
        })
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        Self::new(&config.production_origin, config.dev_origins.clone())
    }

    pub fn production(&self) -> &str {
        &self.production
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        origin == self.production
            || self.dev_origins.iter().any(|o| o == origin)
            || self.local.is_match(origin)
    }

    /// Value for `Access-Control-Allow-Origin`
    pub fn allow_origin<'a>(&'a self, origin: Option<&'a str>) -> &'a str {
        match origin {
            Some(origin) if self.is_allowed(origin) => origin,
            _ => &self.production,
        }
    }
}
