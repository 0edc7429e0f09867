//! Traceability links between entities

use serde::{Deserialize, Serialize};

/// Kind of entity a link endpoint points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Question,
    Risk,
    Domain,
    Mitigation,
    Regulation,
    Control,
    ControlSubcategory,
}

impl EntityKind {
    /// Parse an endpoint's `entity` string
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(raw.to_string())).ok()
    }
}

/// A link endpoint: entity family + id. The entity is kept as written so
/// unknown kinds can be reported rather than rejected at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub entity: String,
    pub id: String,
}

impl EntityRef {
    pub fn kind(&self) -> Option<EntityKind> {
        EntityKind::parse(&self.entity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Trigger,
    Mitigation,
    Regulation,
}

/// A directed traceability edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    #[serde(rename = "type")]
    pub link_type: LinkType,
    pub from: EntityRef,
    pub to: EntityRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phases: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl Link {
    /// Links without a phase restriction apply to every phase
    pub fn applies_to_phase(&self, phase_id: &str) -> bool {
        self.phases
            .as_ref()
            .map(|p| p.iter().any(|id| id == phase_id))
            .unwrap_or(true)
    }

    pub fn touches(&self, entity: EntityKind, id: &str) -> bool {
        (self.from.kind() == Some(entity) && self.from.id == id)
            || (self.to.kind() == Some(entity) && self.to.id == id)
    }
}
