//! AdminRepository - Versioned admin working copy on top of a key-value store

use crate::error::{Result, StoreError};
use crate::key::{is_product_key, StoreKey};
use crate::memory::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared::{Control, Link, Mitigation, Question, Regulation, Risk};
use tracing::{debug, info};

pub const CURRENT_SCHEMA_VERSION: u64 = 2;

/// The admin editor's working copy of the traceability data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminState {
    pub version: u64,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub risks: Vec<Risk>,
    #[serde(default)]
    pub mitigations: Vec<Mitigation>,
    #[serde(default)]
    pub regulations: Vec<Regulation>,
    #[serde(default)]
    pub controls: Vec<Control>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for AdminState {
    fn default() -> Self {
        Self {
            version: CURRENT_SCHEMA_VERSION,
            questions: Vec::new(),
            risks: Vec::new(),
            mitigations: Vec::new(),
            regulations: Vec::new(),
            controls: Vec::new(),
            links: Vec::new(),
            updated_at: None,
        }
    }
}

/// Bring a stored document up to the current schema.
///
/// Documents without a version predate versioning and count as v1.
fn migrate(mut doc: Value) -> Result<Value> {
    let object = doc
        .as_object_mut()
        .ok_or_else(|| StoreError::Malformed("admin state is not an object".to_string()))?;
    let mut version = object.get("version").and_then(Value::as_u64).unwrap_or(1);

    if version > CURRENT_SCHEMA_VERSION {
        return Err(StoreError::UnsupportedVersion {
            found: version,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }

    while version < CURRENT_SCHEMA_VERSION {
        match version {
            // v2 split mitigations, regulations and controls out of links
            // and started stamping saves
            1 => {
                for collection in ["mitigations", "regulations", "controls"] {
                    object.entry(collection).or_insert_with(|| json!([]));
                }
                object.entry("updatedAt").or_insert(Value::Null);
            }
            other => {
                return Err(StoreError::Malformed(format!(
                    "no migration from schema version {}",
                    other
                )))
            }
        }
        version += 1;
        object.insert("version".to_string(), json!(version));
        debug!(version, "migrated admin state");
    }

    Ok(doc)
}

fn decode(raw: &str) -> Result<AdminState> {
    let doc: Value = serde_json::from_str(raw)?;
    let from = doc.get("version").and_then(Value::as_u64).unwrap_or(1);
    let state: AdminState = serde_json::from_value(migrate(doc)?)?;
    if from < CURRENT_SCHEMA_VERSION {
        info!(from, to = CURRENT_SCHEMA_VERSION, "upgraded stored admin state");
    }
    Ok(state)
}

pub struct AdminRepository<S: KeyValueStore> {
    store: S,
    key: StoreKey,
}

impl<S: KeyValueStore> AdminRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: StoreKey::admin_state(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored state, migrated to the current schema; `None` when nothing is saved
    pub fn load(&self) -> Result<Option<AdminState>> {
        match self.store.get(self.key.as_str())? {
            Some(raw) => decode(&raw).map(Some),
            None => Ok(None),
        }
    }

    /// Write the state at the current schema version, stamping `updatedAt`
    pub fn save(&self, state: &mut AdminState) -> Result<()> {
        state.version = CURRENT_SCHEMA_VERSION;
        state.updated_at = Some(Utc::now());
        let raw = serde_json::to_string(state)?;
        self.store.set(self.key.as_str(), &raw)?;
        debug!(key = %self.key, links = state.links.len(), "saved admin state");
        Ok(())
    }

    /// Remove every `ai-oversight:` key; other applications' keys stay
    pub fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        for key in self.store.keys()? {
            if is_product_key(&key) {
                self.store.remove(&key)?;
                removed += 1;
            }
        }
        info!(removed, "cleared admin store");
        Ok(removed)
    }

    /// Pretty-printed state for download; an empty state when nothing is saved
    pub fn export_json(&self) -> Result<String> {
        let state = self.load()?.unwrap_or_default();
        Ok(serde_json::to_string_pretty(&state)?)
    }

    /// Replace the stored state with an exported document, migrating it first
    pub fn import_json(&self, raw: &str) -> Result<AdminState> {
        let mut state = decode(raw)?;
        self.save(&mut state)?;
        Ok(state)
    }
}
