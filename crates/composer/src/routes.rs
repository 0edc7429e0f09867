//! Route table - which documents each route needs and how they are composed
//!
//! Adding a route means adding one `RouteSpec`; the executor is shared.

use crate::derive::{flatten_categories, reconstruct_phase_guidance, MITIGATION_STRATEGIES};
use crate::documents::ParsedBag;
use crate::view_model::ViewModel;
use serde_json::Value;
use shared::{ResourceId, Result};

/// Pure transformation from parsed documents to a route's view-model
pub type ComposeFn = fn(&ParsedBag) -> Result<ViewModel>;

/// Static data requirements of one route
#[derive(Clone, Copy)]
pub struct RouteSpec {
    pub name: &'static str,
    pub resources: &'static [ResourceId],
    pub compose: ComposeFn,
}

impl std::fmt::Debug for RouteSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteSpec")
            .field("name", &self.name)
            .field("resources", &self.resources)
            .finish_non_exhaustive()
    }
}

impl RouteSpec {
    pub fn needs(&self, id: ResourceId) -> bool {
        self.resources.contains(&id)
    }
}

pub static ROUTES: &[RouteSpec] = &[ADMIN, INNOVATOR, PROTOCOL_BUILDER];

/// Traceability editor
pub const ADMIN: RouteSpec = RouteSpec {
    name: "admin",
    resources: &[
        ResourceId::AssessmentQuestions,
        ResourceId::PhaseMitigations,
        ResourceId::RiskSubdomains,
        ResourceId::RiskDomains,
    ],
    compose: compose_admin,
};

/// Risk matrix for innovators
pub const INNOVATOR: RouteSpec = RouteSpec {
    name: "innovator",
    resources: &[
        ResourceId::AssessmentQuestions,
        ResourceId::PhaseMitigations,
        ResourceId::RiskSubdomains,
        ResourceId::RiskDomains,
        ResourceId::UnifiedSchema,
    ],
    compose: compose_innovator,
};

pub const PROTOCOL_BUILDER: RouteSpec = RouteSpec {
    name: "protocol-builder",
    resources: &[
        ResourceId::AssessmentQuestions,
        ResourceId::RiskSubdomains,
        ResourceId::RiskDomains,
        ResourceId::UnifiedSchema,
        ResourceId::Traceability,
        ResourceId::MitigationStrategies,
        ResourceId::TechnicalControls,
    ],
    compose: compose_protocol_builder,
};

/// Look up a route by name
pub fn route(name: &str) -> Option<&'static RouteSpec> {
    ROUTES.iter().find(|r| r.name == name)
}

pub fn route_names() -> Vec<&'static str> {
    ROUTES.iter().map(|r| r.name).collect()
}

/// Copy a top-level property through under a route-specific key
fn passthrough(
    vm: &mut ViewModel,
    key: &str,
    bag: &ParsedBag,
    id: ResourceId,
    property: &str,
) -> Result<()> {
    vm.insert(key, bag.property(id, property)?.clone());
    Ok(())
}

fn compose_admin(bag: &ParsedBag) -> Result<ViewModel> {
    let mut vm = ViewModel::new();
    vm.insert("questions", bag.document(ResourceId::AssessmentQuestions)?.clone());
    vm.insert("phaseMitigations", bag.document(ResourceId::PhaseMitigations)?.clone());
    passthrough(&mut vm, "subdomains", bag, ResourceId::RiskSubdomains, "riskSubdomains")?;
    passthrough(&mut vm, "domains", bag, ResourceId::RiskDomains, "riskDomains")?;
    Ok(vm)
}

fn compose_innovator(bag: &ParsedBag) -> Result<ViewModel> {
    let mut vm = ViewModel::new();
    passthrough(&mut vm, "questionCategories", bag, ResourceId::AssessmentQuestions, "questionCategories")?;
    passthrough(&mut vm, "phaseMitigations", bag, ResourceId::PhaseMitigations, "phaseMitigations")?;
    passthrough(&mut vm, "subdomains", bag, ResourceId::RiskSubdomains, "riskSubdomains")?;
    passthrough(&mut vm, "domains", bag, ResourceId::RiskDomains, "riskDomains")?;
    passthrough(&mut vm, "modelTypeRelevance", bag, ResourceId::UnifiedSchema, "modelTypeToSubdomainRelevance")?;
    passthrough(&mut vm, "vulnerabilityMultipliers", bag, ResourceId::UnifiedSchema, "vulnerabilityMultipliers")?;
    Ok(vm)
}

fn compose_protocol_builder(bag: &ParsedBag) -> Result<ViewModel> {
    let subdomains = bag.array(ResourceId::RiskSubdomains, "riskSubdomains")?;
    let phase_mitigations = reconstruct_phase_guidance(ResourceId::RiskSubdomains, subdomains)?;

    let categories = bag.array(ResourceId::MitigationStrategies, "mitigationCategories")?;
    let strategies = flatten_categories(
        ResourceId::MitigationStrategies,
        "mitigationCategories",
        categories,
        &MITIGATION_STRATEGIES,
    )?;

    let mut vm = ViewModel::new();
    passthrough(&mut vm, "questionCategories", bag, ResourceId::AssessmentQuestions, "questionCategories")?;
    vm.insert("phaseMitigations", Value::Object(phase_mitigations));
    vm.insert("subdomains", Value::Array(subdomains.clone()));
    passthrough(&mut vm, "domains", bag, ResourceId::RiskDomains, "riskDomains")?;
    passthrough(&mut vm, "modelTypeRelevance", bag, ResourceId::UnifiedSchema, "modelTypeToSubdomainRelevance")?;
    passthrough(&mut vm, "vulnerabilityMultipliers", bag, ResourceId::UnifiedSchema, "vulnerabilityMultipliers")?;
    passthrough(&mut vm, "links", bag, ResourceId::Traceability, "links")?;
    vm.insert("strategies", Value::Array(strategies));
    vm.insert("mitigationCategories", Value::Array(categories.clone()));
    passthrough(&mut vm, "defenseLayerDescriptions", bag, ResourceId::MitigationStrategies, "defenseLayerDescriptions")?;
    passthrough(&mut vm, "controls", bag, ResourceId::TechnicalControls, "controls")?;
    Ok(vm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use serde_json::json;
    use shared::OversightError;

    #[test]
    fn test_route_lookup() {
        assert_eq!(route("admin").map(|r| r.name), Some("admin"));
        assert!(route("reviewer").is_none());
        assert_eq!(route_names(), vec!["admin", "innovator", "protocol-builder"]);
        assert!(PROTOCOL_BUILDER.needs(ResourceId::TechnicalControls));
        assert!(!PROTOCOL_BUILDER.needs(ResourceId::PhaseMitigations));
    }

    #[test]
    fn test_every_route_composes_from_fixture() {
        let bag = fixtures::parsed_bag();
        for spec in ROUTES {
            let vm = (spec.compose)(&bag).unwrap();
            assert!(!vm.is_empty(), "route {} composed nothing", spec.name);
        }
    }

    #[test]
    fn test_admin_passes_whole_documents() {
        let vm = compose_admin(&fixtures::parsed_bag()).unwrap();
        let keys: Vec<&str> = vm.keys().collect();
        assert_eq!(keys.len(), 4);
        assert!(vm.get("questions").unwrap().get("questionCategories").is_some());
        assert!(vm.get("phaseMitigations").unwrap().get("phaseMitigations").is_some());
        assert_eq!(vm.count("subdomains"), Some(2));
    }

    #[test]
    fn test_innovator_renames_unified_schema_fields() {
        let vm = compose_innovator(&fixtures::parsed_bag()).unwrap();
        assert_eq!(
            vm.get("modelTypeRelevance").unwrap(),
            &json!({"llm": {"S1": 0.9, "S2": 0.4}})
        );
        assert!(vm.contains_key("vulnerabilityMultipliers"));
        assert_eq!(vm.get("phaseMitigations").unwrap(), &json!({"S1": {"phase-1": "legacy"}}));
    }

    #[test]
    fn test_protocol_builder_derives_phase_mitigations_and_strategies() {
        let vm = compose_protocol_builder(&fixtures::parsed_bag()).unwrap();

        assert_eq!(
            vm.get("phaseMitigations").unwrap(),
            &json!({"S1": {"design": "do X"}})
        );
        assert_eq!(vm.count("strategies"), Some(3));
        assert_eq!(vm.get("strategies").unwrap()[2]["categoryId"], "tech");
        assert_eq!(vm.count("mitigationCategories"), Some(2));
        assert_eq!(vm.count("links"), Some(1));
        assert_eq!(vm.count("controls"), Some(1));
        assert!(vm.contains_key("defenseLayerDescriptions"));
    }

    #[test]
    fn test_protocol_builder_missing_categories_fails() {
        let mut documents = fixtures::documents();
        documents.insert(ResourceId::MitigationStrategies, json!({"defenseLayerDescriptions": {}}));
        let bag = ParsedBag::from_documents(documents);

        match compose_protocol_builder(&bag) {
            Err(OversightError::Shape(err)) => assert_eq!(err.property, "mitigationCategories"),
            other => panic!("expected shape failure, got {:?}", other),
        }
    }

    #[test]
    fn test_composition_is_idempotent() {
        let bag = fixtures::parsed_bag();
        for spec in ROUTES {
            let first = (spec.compose)(&bag).unwrap();
            let second = (spec.compose)(&bag).unwrap();
            assert_eq!(first, second);
        }
    }
}
