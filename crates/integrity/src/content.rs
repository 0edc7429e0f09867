//! StaticContent - Typed snapshot of every document in the store

use fetcher::{fetch_all, ResourceBag, ResourceFetcher, ResourceRequest};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use shared::{
    Control, ControlCategory, ControlSubcategory, Link, MitigationCategory, OversightError,
    QuestionCategory, Regulation, Result, ResourceId, Risk, RiskDomain, ShapeError,
};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionsDoc {
    question_categories: Vec<QuestionCategory>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubdomainsDoc {
    risk_subdomains: Vec<Risk>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DomainsDoc {
    risk_domains: Vec<RiskDomain>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnifiedDoc {
    #[serde(default)]
    model_type_to_subdomain_relevance: Value,
    #[serde(default)]
    vulnerability_multipliers: Value,
}

#[derive(Deserialize)]
struct TraceabilityDoc {
    links: Vec<Link>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MitigationsDoc {
    mitigation_categories: Vec<MitigationCategory>,
}

#[derive(Deserialize)]
struct ControlsDoc {
    controls: Vec<Control>,
    #[serde(default)]
    subcategories: Vec<ControlSubcategory>,
    #[serde(default)]
    categories: Vec<ControlCategory>,
}

#[derive(Deserialize)]
struct RegulationsDoc {
    regulations: Vec<Regulation>,
}

/// Every entity collection of the store
#[derive(Debug, Clone, Default)]
pub struct StaticContent {
    pub question_categories: Vec<QuestionCategory>,
    pub subdomains: Vec<Risk>,
    pub domains: Vec<RiskDomain>,
    pub mitigation_categories: Vec<MitigationCategory>,
    /// `None` when the deployment ships no regulations document
    pub regulations: Option<Vec<Regulation>>,
    pub controls: Vec<Control>,
    pub control_subcategories: Vec<ControlSubcategory>,
    pub control_categories: Vec<ControlCategory>,
    pub links: Vec<Link>,
    pub model_type_relevance: Value,
    pub vulnerability_multipliers: Value,
}

/// Documents every deployment must ship
const REQUIRED: [ResourceId; 7] = [
    ResourceId::AssessmentQuestions,
    ResourceId::RiskSubdomains,
    ResourceId::RiskDomains,
    ResourceId::UnifiedSchema,
    ResourceId::Traceability,
    ResourceId::MitigationStrategies,
    ResourceId::TechnicalControls,
];

impl StaticContent {
    /// Fetch and deserialize the whole store
    pub async fn load(fetcher: Arc<dyn ResourceFetcher>, base_path: &str) -> Result<Self> {
        let bag = fetch_all(Arc::clone(&fetcher), base_path, &REQUIRED).await?;
        let mut content = Self::from_bag(&bag)?;

        let request = ResourceRequest::new(base_path, ResourceId::Regulations);
        match fetcher.fetch(&request).await {
            Ok(body) => {
                let doc: RegulationsDoc = parse(ResourceId::Regulations, &body)?;
                content.regulations = Some(doc.regulations);
            }
            Err(e) if e.is_not_found() => {
                warn!(path = %request.path, "no regulations document; regulation links cannot resolve");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(content)
    }

    /// Deserialize from already-fetched bodies
    pub fn from_bag(bag: &ResourceBag) -> Result<Self> {
        let questions: QuestionsDoc = parse_required(bag, ResourceId::AssessmentQuestions)?;
        let subdomains: SubdomainsDoc = parse_required(bag, ResourceId::RiskSubdomains)?;
        let domains: DomainsDoc = parse_required(bag, ResourceId::RiskDomains)?;
        let unified: UnifiedDoc = parse_required(bag, ResourceId::UnifiedSchema)?;
        let traceability: TraceabilityDoc = parse_required(bag, ResourceId::Traceability)?;
        let mitigations: MitigationsDoc = parse_required(bag, ResourceId::MitigationStrategies)?;
        let controls: ControlsDoc = parse_required(bag, ResourceId::TechnicalControls)?;

        let regulations = match bag.get(ResourceId::Regulations) {
            Some(body) => Some(parse::<RegulationsDoc>(ResourceId::Regulations, body)?.regulations),
            None => None,
        };

        debug!(
            subdomains = subdomains.risk_subdomains.len(),
            links = traceability.links.len(),
            controls = controls.controls.len(),
            "loaded static content"
        );

        Ok(Self {
            question_categories: questions.question_categories,
            subdomains: subdomains.risk_subdomains,
            domains: domains.risk_domains,
            mitigation_categories: mitigations.mitigation_categories,
            regulations,
            controls: controls.controls,
            control_subcategories: controls.subcategories,
            control_categories: controls.categories,
            links: traceability.links,
            model_type_relevance: unified.model_type_to_subdomain_relevance,
            vulnerability_multipliers: unified.vulnerability_multipliers,
        })
    }
}

fn parse_required<T: DeserializeOwned>(bag: &ResourceBag, id: ResourceId) -> Result<T> {
    let body = bag
        .get(id)
        .ok_or_else(|| OversightError::Other(format!("Resource '{}' was not fetched", id)))?;
    parse(id, body)
}

/// Parse a body, requiring every property the catalog lists for `id`
fn parse<T: DeserializeOwned>(id: ResourceId, body: &str) -> Result<T> {
    let value: Value = serde_json::from_str(body)
        .map_err(|source| OversightError::Parse { resource: id, source })?;
    if let Some(missing) = id
        .properties()
        .iter()
        .find(|property| value.get(**property).map_or(true, Value::is_null))
    {
        return Err(ShapeError::new(id, *missing, "a present property").into());
    }
    serde_json::from_value(value)
        .map_err(|e| ShapeError::new(id, "(document)", format!("a well-formed document ({})", e)).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape_property(err: OversightError) -> String {
        match err {
            OversightError::Shape(shape) => shape.property,
            other => panic!("expected shape error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_catalog_property_is_named() {
        let body = r#"{"mitigationCategories": []}"#;
        let err = parse::<MitigationsDoc>(ResourceId::MitigationStrategies, body).err().unwrap();
        assert_eq!(shape_property(err), "defenseLayerDescriptions");
    }

    #[test]
    fn test_null_catalog_property_counts_as_missing() {
        let body = r#"{"modelTypeToSubdomainRelevance": {}, "vulnerabilityMultipliers": null}"#;
        let err = parse::<UnifiedDoc>(ResourceId::UnifiedSchema, body).err().unwrap();
        assert_eq!(shape_property(err), "vulnerabilityMultipliers");
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = parse::<TraceabilityDoc>(ResourceId::Traceability, "{").err().unwrap();
        assert!(matches!(err, OversightError::Parse { resource: ResourceId::Traceability, .. }));
    }

    #[test]
    fn test_complete_document_parses() {
        let body = r#"{"controls": [{"id": "c1", "subcategoryId": "s1", "phases": []}]}"#;
        let doc: ControlsDoc = parse(ResourceId::TechnicalControls, body).unwrap();
        assert_eq!(doc.controls.len(), 1);
        assert!(doc.categories.is_empty());
    }
}
