//! Resource catalog of the static content store
//!
//! Every entity family lives in one JSON document under `{basePath}/data/`.
//! The top-level property names are not uniform across files, so each
//! document declares the exact properties it carries.

use serde::{Deserialize, Serialize};

/// One static JSON document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceId {
    AssessmentQuestions,
    PhaseMitigations,
    RiskSubdomains,
    RiskDomains,
    UnifiedSchema,
    Traceability,
    MitigationStrategies,
    TechnicalControls,
    Regulations,
}

impl ResourceId {
    /// Every document in the store
    pub const ALL: [ResourceId; 9] = [
        ResourceId::AssessmentQuestions,
        ResourceId::PhaseMitigations,
        ResourceId::RiskSubdomains,
        ResourceId::RiskDomains,
        ResourceId::UnifiedSchema,
        ResourceId::Traceability,
        ResourceId::MitigationStrategies,
        ResourceId::TechnicalControls,
        ResourceId::Regulations,
    ];

    /// File name under the data directory
    pub fn file_name(&self) -> &'static str {
        match self {
            ResourceId::AssessmentQuestions => "assessment-questions.json",
            ResourceId::PhaseMitigations => "phase-mitigations.json",
            ResourceId::RiskSubdomains => "risk-subdomains.json",
            ResourceId::RiskDomains => "risk-domains.json",
            ResourceId::UnifiedSchema => "unified-schema.json",
            ResourceId::Traceability => "traceability.json",
            ResourceId::MitigationStrategies => "mitigation-strategies.json",
            ResourceId::TechnicalControls => "technical-controls.json",
            ResourceId::Regulations => "regulations.json",
        }
    }

    /// Top-level properties the document is expected to carry
    pub fn properties(&self) -> &'static [&'static str] {
        match self {
            ResourceId::AssessmentQuestions => &["questionCategories"],
            ResourceId::PhaseMitigations => &["phaseMitigations"],
            ResourceId::RiskSubdomains => &["riskSubdomains"],
            ResourceId::RiskDomains => &["riskDomains"],
            ResourceId::UnifiedSchema => &["modelTypeToSubdomainRelevance", "vulnerabilityMultipliers"],
            ResourceId::Traceability => &["links"],
            ResourceId::MitigationStrategies => &["mitigationCategories", "defenseLayerDescriptions"],
            ResourceId::TechnicalControls => &["controls"],
            ResourceId::Regulations => &["regulations"],
        }
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name().trim_end_matches(".json"))
    }
}

/// Normalize a deployment base path to either `""` or `/seg[/seg...]`
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Request path for a resource: `{basePath}/data/{file}`
pub fn resource_path(base_path: &str, id: ResourceId) -> String {
    format!("{}/data/{}", normalize_base_path(base_path), id.file_name())
}
