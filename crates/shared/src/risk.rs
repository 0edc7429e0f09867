//! Risk domains, subdomains and model-type lookup tables

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Grouping entity referenced by subdomains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskDomain {
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A risk subdomain, the unit risks are assessed at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub domain: String,
    /// Phase id -> guidance text
    #[serde(default)]
    pub phase_guidance: BTreeMap<String, String>,
}

impl Risk {
    pub fn has_guidance(&self) -> bool {
        !self.phase_guidance.is_empty()
    }
}

/// Model type id -> subdomain id -> coefficient
pub type ModelTypeTable = BTreeMap<String, BTreeMap<String, serde_json::Value>>;
