//! IntegrityChecker - Referential integrity across the static content store

use crate::content::StaticContent;
use serde::Serialize;
use serde_json::Value;
use shared::{EntityKind, EntityRef, ModelTypeTable, ResourceId};
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    DuplicateId,
    DanglingReference,
    UnknownPhase,
    UnknownEntityKind,
}

/// One problem found in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityIssue {
    pub kind: IssueKind,
    pub resource: ResourceId,
    /// Record the problem was found on
    pub subject: String,
    pub detail: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IntegrityReport {
    pub issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn by_kind(&self) -> BTreeMap<IssueKind, usize> {
        let mut counts = BTreeMap::new();
        for issue in &self.issues {
            *counts.entry(issue.kind).or_insert(0) += 1;
        }
        counts
    }

    fn push(&mut self, kind: IssueKind, resource: ResourceId, subject: impl Into<String>, detail: String) {
        self.issues.push(IntegrityIssue {
            kind,
            resource,
            subject: subject.into(),
            detail,
        });
    }
}

/// Known ids per entity family
#[derive(Debug, Default)]
struct EntityIndex {
    ids: HashMap<EntityKind, HashSet<String>>,
    present: HashSet<EntityKind>,
}

impl EntityIndex {
    fn build(content: &StaticContent) -> Self {
        let mut index = Self::default();
        index.add(
            EntityKind::Question,
            content
                .question_categories
                .iter()
                .flat_map(|c| c.questions.iter().map(|q| q.id.as_str())),
        );
        index.add(EntityKind::Risk, content.subdomains.iter().map(|r| r.id.as_str()));
        index.add(EntityKind::Domain, content.domains.iter().map(|d| d.id.as_str()));
        index.add(
            EntityKind::Mitigation,
            content
                .mitigation_categories
                .iter()
                .flat_map(|c| c.strategies.iter().map(|s| s.id.as_str())),
        );
        if let Some(regulations) = &content.regulations {
            index.add(EntityKind::Regulation, regulations.iter().map(|r| r.id.as_str()));
        }
        index.add(EntityKind::Control, content.controls.iter().map(|c| c.id.as_str()));
        if !content.control_subcategories.is_empty() {
            index.add(
                EntityKind::ControlSubcategory,
                content.control_subcategories.iter().map(|s| s.id.as_str()),
            );
        }
        index
    }

    fn add<'a>(&mut self, kind: EntityKind, ids: impl Iterator<Item = &'a str>) {
        self.present.insert(kind);
        self.ids
            .entry(kind)
            .or_default()
            .extend(ids.map(|id| id.to_string()));
    }

    fn contains(&self, kind: EntityKind, id: &str) -> bool {
        self.ids.get(&kind).map(|ids| ids.contains(id)).unwrap_or(false)
    }

    fn is_present(&self, kind: EntityKind) -> bool {
        self.present.contains(&kind)
    }
}

pub struct IntegrityChecker {
    phases: HashSet<String>,
}

impl IntegrityChecker {
    pub fn new<I, S>(phase_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phases: phase_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Run every check and collect all issues
    pub fn check(&self, content: &StaticContent) -> IntegrityReport {
        let index = EntityIndex::build(content);
        let mut report = IntegrityReport::default();

        self.check_duplicates(content, &mut report);
        self.check_questions(content, &index, &mut report);
        self.check_subdomains(content, &index, &mut report);
        self.check_controls(content, &mut report);
        self.check_links(content, &index, &mut report);
        self.check_model_tables(content, &index, &mut report);

        report
    }

    fn check_duplicates(&self, content: &StaticContent, report: &mut IntegrityReport) {
        let questions = content
            .question_categories
            .iter()
            .flat_map(|c| c.questions.iter().map(|q| q.id.as_str()));
        let strategies = content
            .mitigation_categories
            .iter()
            .flat_map(|c| c.strategies.iter().map(|s| s.id.as_str()));

        report_duplicates(report, ResourceId::AssessmentQuestions, questions);
        report_duplicates(report, ResourceId::RiskSubdomains, content.subdomains.iter().map(|r| r.id.as_str()));
        report_duplicates(report, ResourceId::RiskDomains, content.domains.iter().map(|d| d.id.as_str()));
        report_duplicates(report, ResourceId::MitigationStrategies, strategies);
        report_duplicates(report, ResourceId::TechnicalControls, content.controls.iter().map(|c| c.id.as_str()));
        report_duplicates(
            report,
            ResourceId::TechnicalControls,
            content.control_subcategories.iter().map(|s| s.id.as_str()),
        );
        report_duplicates(
            report,
            ResourceId::TechnicalControls,
            content.control_categories.iter().map(|c| c.id.as_str()),
        );
        report_duplicates(report, ResourceId::Traceability, content.links.iter().map(|l| l.id.as_str()));
        if let Some(regulations) = &content.regulations {
            report_duplicates(report, ResourceId::Regulations, regulations.iter().map(|r| r.id.as_str()));
        }
    }

    fn check_questions(&self, content: &StaticContent, index: &EntityIndex, report: &mut IntegrityReport) {
        for question in content.question_categories.iter().flat_map(|c| &c.questions) {
            for dependency in question.depends_on() {
                if !index.contains(EntityKind::Question, dependency) {
                    report.push(
                        IssueKind::DanglingReference,
                        ResourceId::AssessmentQuestions,
                        &question.id,
                        format!("showIf references unknown question '{}'", dependency),
                    );
                }
            }
        }
    }

    fn check_subdomains(&self, content: &StaticContent, index: &EntityIndex, report: &mut IntegrityReport) {
        for risk in &content.subdomains {
            if !index.contains(EntityKind::Domain, &risk.domain) {
                report.push(
                    IssueKind::DanglingReference,
                    ResourceId::RiskSubdomains,
                    &risk.id,
                    format!("domain '{}' does not exist", risk.domain),
                );
            }
            for phase in risk.phase_guidance.keys() {
                self.check_phase(report, ResourceId::RiskSubdomains, &risk.id, phase, "phaseGuidance");
            }
        }
    }

    fn check_controls(&self, content: &StaticContent, report: &mut IntegrityReport) {
        let subcategories: HashSet<&str> = content
            .control_subcategories
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        let categories: HashSet<&str> = content
            .control_categories
            .iter()
            .map(|c| c.id.as_str())
            .collect();

        for control in &content.controls {
            for phase in &control.phases {
                self.check_phase(report, ResourceId::TechnicalControls, &control.id, phase, "phases");
            }
            if !subcategories.is_empty() && !subcategories.contains(control.subcategory_id.as_str()) {
                report.push(
                    IssueKind::DanglingReference,
                    ResourceId::TechnicalControls,
                    &control.id,
                    format!("subcategory '{}' does not exist", control.subcategory_id),
                );
            }
        }

        if categories.is_empty() {
            return;
        }
        for subcategory in &content.control_subcategories {
            if !categories.contains(subcategory.category_id.as_str()) {
                report.push(
                    IssueKind::DanglingReference,
                    ResourceId::TechnicalControls,
                    &subcategory.id,
                    format!("category '{}' does not exist", subcategory.category_id),
                );
            }
        }
    }

    fn check_links(&self, content: &StaticContent, index: &EntityIndex, report: &mut IntegrityReport) {
        for link in &content.links {
            check_endpoint(report, index, &link.id, "from", &link.from);
            check_endpoint(report, index, &link.id, "to", &link.to);
            for phase in link.phases.iter().flatten() {
                self.check_phase(report, ResourceId::Traceability, &link.id, phase, "phases");
            }
        }
    }

    fn check_model_tables(&self, content: &StaticContent, index: &EntityIndex, report: &mut IntegrityReport) {
        let tables = [
            ("modelTypeToSubdomainRelevance", &content.model_type_relevance),
            ("vulnerabilityMultipliers", &content.vulnerability_multipliers),
        ];

        for (name, value) in tables {
            // Only model type -> subdomain -> coefficient tables carry subdomain keys
            let Some(table) = as_model_type_table(value) else {
                continue;
            };
            for (model_type, entries) in &table {
                for subdomain in entries.keys() {
                    if !index.contains(EntityKind::Risk, subdomain) {
                        report.push(
                            IssueKind::DanglingReference,
                            ResourceId::UnifiedSchema,
                            model_type,
                            format!("{} references unknown subdomain '{}'", name, subdomain),
                        );
                    }
                }
            }
        }
    }

    fn check_phase(&self, report: &mut IntegrityReport, resource: ResourceId, subject: &str, phase: &str, field: &str) {
        if !self.phases.contains(phase) {
            report.push(
                IssueKind::UnknownPhase,
                resource,
                subject,
                format!("{} uses unknown phase '{}'", field, phase),
            );
        }
    }
}

fn report_duplicates<'a>(report: &mut IntegrityReport, resource: ResourceId, ids: impl Iterator<Item = &'a str>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            report.push(
                IssueKind::DuplicateId,
                resource,
                id,
                format!("id '{}' appears more than once", id),
            );
        }
    }
}

fn check_endpoint(report: &mut IntegrityReport, index: &EntityIndex, link_id: &str, end: &str, endpoint: &EntityRef) {
    let Some(kind) = endpoint.kind() else {
        report.push(
            IssueKind::UnknownEntityKind,
            ResourceId::Traceability,
            link_id,
            format!("{} endpoint has unknown entity '{}'", end, endpoint.entity),
        );
        return;
    };

    if !index.is_present(kind) {
        report.push(
            IssueKind::DanglingReference,
            ResourceId::Traceability,
            link_id,
            format!("{} endpoint '{}' points at {:?}, which is not in the store", end, endpoint.id, kind),
        );
    } else if !index.contains(kind, &endpoint.id) {
        report.push(
            IssueKind::DanglingReference,
            ResourceId::Traceability,
            link_id,
            format!("{} endpoint {} '{}' does not exist", end, endpoint.entity, endpoint.id),
        );
    }
}

fn as_model_type_table(value: &Value) -> Option<ModelTypeTable> {
    let object = value.as_object()?;
    if object.is_empty() || !object.values().all(Value::is_object) {
        return None;
    }
    serde_json::from_value(value.clone()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fetcher::{MemoryFetcher, ResourceBag};
    use serde_json::json;
    use std::sync::Arc;

    fn bodies() -> Vec<(ResourceId, Value)> {
        vec![
            (
                ResourceId::AssessmentQuestions,
                json!({"questionCategories": [{"id": "model", "name": "Model", "questions": [
                    {"id": "q1", "text": "Model type?", "type": "radio", "category": "model"},
                    {"id": "q2", "text": "Fine-tuned?", "type": "radio", "category": "model",
                     "showIf": {"q1": ["llm", "foundation"]}}
                ]}]}),
            ),
            (
                ResourceId::RiskSubdomains,
                json!({"riskSubdomains": [
                    {"id": "toxic-content-1.2", "domain": "discrimination",
                     "phaseGuidance": {"phase-1": "Filter training data"}},
                    {"id": "privacy-breach-2.1", "domain": "privacy"}
                ]}),
            ),
            (
                ResourceId::RiskDomains,
                json!({"riskDomains": [{"id": "discrimination"}, {"id": "privacy"}]}),
            ),
            (
                ResourceId::UnifiedSchema,
                json!({"modelTypeToSubdomainRelevance": {"llm": {"toxic-content-1.2": 0.9}},
                       "vulnerabilityMultipliers": {"llm": {"privacy-breach-2.1": 1.2}}}),
            ),
            (
                ResourceId::Traceability,
                json!({"links": [
                    {"id": "t1", "type": "trigger", "from": {"entity": "question", "id": "q2"},
                     "to": {"entity": "risk", "id": "toxic-content-1.2"}},
                    {"id": "control-cat-1", "type": "mitigation", "from": {"entity": "risk", "id": "privacy-breach-2.1"},
                     "to": {"entity": "controlSubcategory", "id": "data-governance-3.2"}, "phases": ["phase-2"]},
                    {"id": "r1", "type": "regulation", "from": {"entity": "risk", "id": "privacy-breach-2.1"},
                     "to": {"entity": "regulation", "id": "hipaa-164.514"}}
                ]}),
            ),
            (
                ResourceId::MitigationStrategies,
                json!({"mitigationCategories": [{"id": "gov", "name": "Governance",
                       "strategies": [{"id": "m1", "name": "Oversight"}]}],
                       "defenseLayerDescriptions": {}}),
            ),
            (
                ResourceId::TechnicalControls,
                json!({"controls": [{"id": "c1", "subcategoryId": "data-governance-3.2", "phases": ["phase-1"]}],
                       "subcategories": [{"id": "data-governance-3.2", "categoryId": "operational"}],
                       "categories": [{"id": "operational"}]}),
            ),
            (
                ResourceId::Regulations,
                json!({"regulations": [{"id": "hipaa-164.514", "citation": "45 CFR 164.514",
                       "description": "De-identification", "framework": "HIPAA"}]}),
            ),
        ]
    }

    fn content_with(overrides: Vec<(ResourceId, Value)>) -> StaticContent {
        let mut bag = ResourceBag::new();
        for (id, body) in bodies().into_iter().chain(overrides) {
            bag.insert(id, body.to_string());
        }
        StaticContent::from_bag(&bag).unwrap()
    }

    fn checker() -> IntegrityChecker {
        IntegrityChecker::new(["phase-1", "phase-2", "phase-3"])
    }

    #[test]
    fn test_clean_store_has_no_issues() {
        let report = checker().check(&content_with(vec![]));
        assert!(report.is_clean(), "unexpected issues: {:?}", report.issues);
    }

    #[test]
    fn test_link_to_unknown_risk_is_reported() {
        let content = content_with(vec![(
            ResourceId::Traceability,
            json!({"links": [{"id": "t9", "type": "trigger", "from": {"entity": "question", "id": "q1"},
                              "to": {"entity": "risk", "id": "no-such-risk"}}]}),
        )]);

        let report = checker().check(&content);
        assert_eq!(report.len(), 1);
        assert_eq!(report.issues[0].kind, IssueKind::DanglingReference);
        assert_eq!(report.issues[0].subject, "t9");
        assert!(report.issues[0].detail.contains("no-such-risk"));
    }

    #[test]
    fn test_reports_every_issue_not_just_first() {
        let content = content_with(vec![
            (
                ResourceId::RiskSubdomains,
                json!({"riskSubdomains": [
                    {"id": "toxic-content-1.2", "domain": "nowhere", "phaseGuidance": {"phase-9": "x"}},
                    {"id": "toxic-content-1.2", "domain": "privacy"},
                    {"id": "privacy-breach-2.1", "domain": "privacy"}
                ]}),
            ),
            (
                ResourceId::Traceability,
                json!({"links": [{"id": "t1", "type": "trigger", "from": {"entity": "widget", "id": "w"},
                                  "to": {"entity": "risk", "id": "toxic-content-1.2"}, "phases": ["phase-4"]}]}),
            ),
        ]);

        let counts = checker().check(&content).by_kind();
        assert_eq!(counts.get(&IssueKind::DuplicateId), Some(&1));
        assert_eq!(counts.get(&IssueKind::DanglingReference), Some(&1));
        assert_eq!(counts.get(&IssueKind::UnknownPhase), Some(&2));
        assert_eq!(counts.get(&IssueKind::UnknownEntityKind), Some(&1));
    }

    #[test]
    fn test_show_if_on_unknown_question() {
        let content = content_with(vec![(
            ResourceId::AssessmentQuestions,
            json!({"questionCategories": [{"id": "model", "questions": [
                {"id": "q1", "text": "?"},
                {"id": "q2", "text": "?", "showIf": {"q0": "yes"}}
            ]}]}),
        )]);

        let report = checker().check(&content);
        assert!(report
            .issues
            .iter()
            .any(|i| i.subject == "q2" && i.detail.contains("q0")));
    }

    #[test]
    fn test_control_hierarchy_references() {
        let content = content_with(vec![(
            ResourceId::TechnicalControls,
            json!({"controls": [{"id": "c1", "subcategoryId": "missing-9.9", "phases": []}],
                   "subcategories": [{"id": "data-governance-3.2", "categoryId": "ghost"}],
                   "categories": [{"id": "operational"}]}),
        )]);

        let report = checker().check(&content);
        let subjects: Vec<&str> = report.issues.iter().map(|i| i.subject.as_str()).collect();
        assert!(subjects.contains(&"c1"));
        assert!(subjects.contains(&"data-governance-3.2"));
    }

    #[test]
    fn test_duplicate_control_hierarchy_ids() {
        let content = content_with(vec![(
            ResourceId::TechnicalControls,
            json!({"controls": [{"id": "c1", "subcategoryId": "s1", "phases": ["phase-1"]}],
                   "subcategories": [{"id": "s1", "categoryId": "operational"},
                                     {"id": "s1", "categoryId": "operational"}],
                   "categories": [{"id": "operational"}, {"id": "operational"}]}),
        )]);

        let report = checker().check(&content);
        assert_eq!(report.by_kind().get(&IssueKind::DuplicateId), Some(&2), "{:?}", report.issues);
        let duplicates: Vec<&IntegrityIssue> = report
            .issues
            .iter()
            .filter(|i| i.kind == IssueKind::DuplicateId)
            .collect();
        let subjects: Vec<&str> = duplicates.iter().map(|i| i.subject.as_str()).collect();
        assert!(subjects.contains(&"s1"));
        assert!(subjects.contains(&"operational"));
        assert!(duplicates.iter().all(|i| i.resource == ResourceId::TechnicalControls));
    }

    #[test]
    fn test_model_table_with_unknown_subdomain() {
        let content = content_with(vec![(
            ResourceId::UnifiedSchema,
            json!({"modelTypeToSubdomainRelevance": {"llm": {"gone-0.0": 0.5}},
                   "vulnerabilityMultipliers": {"dataSensitivity": 1.5}}),
        )]);

        let report = checker().check(&content);
        assert_eq!(report.len(), 1);
        assert_eq!(report.issues[0].subject, "llm");
    }

    #[tokio::test]
    async fn test_load_without_regulations_document() {
        let fetcher = bodies()
            .into_iter()
            .filter(|(id, _)| *id != ResourceId::Regulations)
            .fold(MemoryFetcher::new(), |f, (id, body)| f.with_resource("", id, body.to_string()));

        let content = StaticContent::load(Arc::new(fetcher), "").await.unwrap();
        assert!(content.regulations.is_none());

        let report = checker().check(&content);
        assert_eq!(report.len(), 1);
        assert_eq!(report.issues[0].subject, "r1");
    }
}
