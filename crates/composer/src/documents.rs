//! ParsedBag - Parsed JSON documents of one route load

use fetcher::ResourceBag;
use serde_json::{Map, Value};
use shared::{OversightError, ResourceId, ShapeError};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ParsedBag {
    documents: HashMap<ResourceId, Value>,
}

impl ParsedBag {
    /// Parse the bodies for `ids` in order; the first invalid document fails
    /// the whole bag. Ids absent from `bag` are skipped.
    pub fn parse(bag: &ResourceBag, ids: &[ResourceId]) -> Result<Self, OversightError> {
        let mut documents = HashMap::with_capacity(ids.len());
        for &id in ids {
            let Some(body) = bag.get(id) else { continue };
            let value: Value = serde_json::from_str(body)
                .map_err(|source| OversightError::Parse { resource: id, source })?;
            documents.insert(id, value);
        }
        Ok(Self { documents })
    }

    /// Build from already-parsed documents
    pub fn from_documents(documents: impl IntoIterator<Item = (ResourceId, Value)>) -> Self {
        Self {
            documents: documents.into_iter().collect(),
        }
    }

    /// The whole document
    pub fn document(&self, id: ResourceId) -> Result<&Value, ShapeError> {
        self.documents
            .get(&id)
            .ok_or_else(|| ShapeError::new(id, "(document)", "a loaded document"))
    }

    /// A top-level property; absent or null is a shape failure
    pub fn property(&self, id: ResourceId, name: &str) -> Result<&Value, ShapeError> {
        let document = self.document(id)?;
        let object = document
            .as_object()
            .ok_or_else(|| ShapeError::new(id, "(document)", "a JSON object"))?;

        match object.get(name) {
            None | Some(Value::Null) => Err(ShapeError::new(id, name, "a present property")),
            Some(value) => Ok(value),
        }
    }

    pub fn array(&self, id: ResourceId, name: &str) -> Result<&Vec<Value>, ShapeError> {
        self.property(id, name)?
            .as_array()
            .ok_or_else(|| ShapeError::new(id, name, "an array"))
    }

    pub fn object(&self, id: ResourceId, name: &str) -> Result<&Map<String, Value>, ShapeError> {
        self.property(id, name)?
            .as_object()
            .ok_or_else(|| ShapeError::new(id, name, "an object"))
    }
}
