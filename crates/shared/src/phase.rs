//! Lifecycle phases

use serde::{Deserialize, Serialize};

/// A lifecycle stage, used as a foreign key by guidance maps, controls and links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub id: String,
    pub name: String,
    pub short: String,
}

impl Phase {
    pub fn new(id: impl Into<String>, name: impl Into<String>, short: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            short: short.into(),
        }
    }
}

/// The three-phase framework the bundled data is authored against
pub fn default_phases() -> Vec<Phase> {
    vec![
        Phase::new("phase-1", "Phase 1: Design & Development", "P1"),
        Phase::new("phase-2", "Phase 2: Validation", "P2"),
        Phase::new("phase-3", "Phase 3: Deployment & Monitoring", "P3"),
    ]
}
