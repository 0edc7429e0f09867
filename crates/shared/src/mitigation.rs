//! Mitigation strategies and regulations

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A mitigation strategy as nested under its category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mitigation {
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    /// Remaining fields, preserved for shallow unions
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A mitigation category owning an ordered list of strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MitigationCategory {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub strategies: Vec<Mitigation>,
}

/// A regulatory citation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Regulation {
    pub id: String,
    #[serde(default)]
    pub citation: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub framework: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_keeps_strategy_extras() {
        let cat: MitigationCategory = serde_json::from_str(
            r#"{"id":"gov","name":"Governance","strategies":[
                {"id":"s1","code":"1.1","name":"Board oversight","defenseLayer":"organizational"}]}"#,
        )
        .unwrap();
        assert_eq!(cat.strategies.len(), 1);
        assert_eq!(cat.strategies[0].extra["defenseLayer"], "organizational");
        assert!(cat.description.is_none());
    }
}
