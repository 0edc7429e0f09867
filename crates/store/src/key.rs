//! StoreKey - Keys in the `ai-oversight:` namespace

use crate::error::{Result, StoreError};
use std::fmt;

pub const KEY_PREFIX: &str = "ai-oversight:";

/// Whether a raw key belongs to this application
pub fn is_product_key(raw: &str) -> bool {
    raw.starts_with(KEY_PREFIX) && raw.len() > KEY_PREFIX.len()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreKey(String);

impl StoreKey {
    /// Key for `name`, e.g. `admin-state` -> `ai-oversight:admin-state`
    pub fn new(name: &str) -> Self {
        StoreKey(format!("{}{}", KEY_PREFIX, name))
    }

    pub fn admin_state() -> Self {
        Self::new("admin-state")
    }

    pub fn parse(raw: &str) -> Result<Self> {
        if is_product_key(raw) {
            Ok(StoreKey(raw.to_string()))
        } else {
            Err(StoreError::ForeignKey(raw.to_string()))
        }
    }

    /// Name without the prefix
    pub fn name(&self) -> &str {
        &self.0[KEY_PREFIX.len()..]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
