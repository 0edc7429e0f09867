//! Technical controls and their category hierarchy

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A technical control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Control {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub subcategory_id: String,
    #[serde(default)]
    pub phases: Vec<String>,
    #[serde(default)]
    pub tech_types: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Control {
    /// `"all"` in techTypes applies the control to every model type
    pub fn applies_to_tech_type(&self, tech_type: &str) -> bool {
        self.tech_types.iter().any(|t| t == "all" || t == tech_type)
    }

    pub fn applies_to_phase(&self, phase_id: &str) -> bool {
        self.phases.iter().any(|p| p == phase_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlSubcategory {
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlCategory {
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
}
