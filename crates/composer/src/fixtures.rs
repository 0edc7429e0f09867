//! Small but complete static content store used across composer tests

use crate::documents::ParsedBag;
use fetcher::MemoryFetcher;
use serde_json::{json, Value};
use shared::ResourceId;
use std::collections::HashMap;

pub(crate) fn documents() -> HashMap<ResourceId, Value> {
    let mut docs = HashMap::new();
    docs.insert(
        ResourceId::AssessmentQuestions,
        json!({"questionCategories": [{
            "id": "data", "name": "Data",
            "questions": [
                {"id": "q1", "text": "Uses PHI?", "type": "radio", "category": "data",
                 "options": [{"value": "yes", "label": "Yes"}, {"value": "no", "label": "No"}]}
            ]
        }]}),
    );
    docs.insert(
        ResourceId::PhaseMitigations,
        json!({"phaseMitigations": {"S1": {"phase-1": "legacy"}}}),
    );
    docs.insert(
        ResourceId::RiskSubdomains,
        json!({"riskSubdomains": [
            {"id": "S1", "code": "1.1", "name": "Risk one", "shortName": "One", "domain": "D1",
             "phaseGuidance": {"design": "do X"}},
            {"id": "S2", "code": "1.2", "name": "Risk two", "shortName": "Two", "domain": "D1"}
        ]}),
    );
    docs.insert(
        ResourceId::RiskDomains,
        json!({"riskDomains": [{"id": "D1", "code": "1", "name": "Discrimination"}]}),
    );
    docs.insert(
        ResourceId::UnifiedSchema,
        json!({
            "modelTypeToSubdomainRelevance": {"llm": {"S1": 0.9, "S2": 0.4}},
            "vulnerabilityMultipliers": {"llm": {"S1": 1.5}}
        }),
    );
    docs.insert(
        ResourceId::Traceability,
        json!({"links": [{"id": "l1", "type": "trigger",
                          "from": {"entity": "question", "id": "q1"},
                          "to": {"entity": "risk", "id": "S1"}}]}),
    );
    docs.insert(
        ResourceId::MitigationStrategies,
        json!({
            "mitigationCategories": [
                {"id": "gov", "name": "Governance", "description": "Org",
                 "strategies": [{"id": "m1", "code": "1.1", "name": "Board oversight"},
                                {"id": "m2", "code": "1.2", "name": "Risk management"}]},
                {"id": "tech", "name": "Technical", "description": "Eng",
                 "strategies": [{"id": "m3", "code": "2.1", "name": "Security"}]}
            ],
            "defenseLayerDescriptions": {"organizational": "People and process"}
        }),
    );
    docs.insert(
        ResourceId::TechnicalControls,
        json!({"controls": [{"id": "c1", "name": "Pen test", "subcategoryId": "sec",
                             "phases": ["phase-2"], "techTypes": ["all"]}]}),
    );
    docs
}

pub(crate) fn parsed_bag() -> ParsedBag {
    ParsedBag::from_documents(documents())
}

pub(crate) fn memory_fetcher(base_path: &str) -> MemoryFetcher {
    documents()
        .into_iter()
        .fold(MemoryFetcher::new(), |fetcher, (id, doc)| {
            fetcher.with_resource(base_path, id, doc.to_string())
        })
}
