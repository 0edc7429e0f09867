//! Derivations shared by every route
//!
//! Pure functions of their inputs: no counters, timestamps or caches.

use serde_json::{Map, Value};
use shared::{ResourceId, ShapeError};

/// Rebuild the subdomain id -> phase guidance mapping.
///
/// Subdomains without guidance (absent, null or empty) are left out rather
/// than given an empty entry. Duplicate ids are last-write-wins.
pub fn reconstruct_phase_guidance(
    resource: ResourceId,
    subdomains: &[Value],
) -> Result<Map<String, Value>, ShapeError> {
    let mut result = Map::new();

    for subdomain in subdomains {
        let record = subdomain
            .as_object()
            .ok_or_else(|| ShapeError::new(resource, "riskSubdomains[]", "an object"))?;

        let guidance = match record.get("phaseGuidance") {
            None | Some(Value::Null) => continue,
            Some(Value::Object(map)) if map.is_empty() => continue,
            Some(guidance @ Value::Object(_)) => guidance,
            Some(_) => {
                return Err(ShapeError::new(
                    resource,
                    "riskSubdomains[].phaseGuidance",
                    "an object",
                ))
            }
        };

        let id = record
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| ShapeError::new(resource, "riskSubdomains[].id", "a string"))?;

        result.insert(id.to_string(), guidance.clone());
    }

    Ok(result)
}

/// How a two-level category list is flattened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenSpec {
    /// Field of each parent holding its ordered children
    pub children: &'static str,
    /// (parent field, key injected on each child)
    pub inject: &'static [(&'static str, &'static str)],
}

/// Mitigation categories -> strategies
pub const MITIGATION_STRATEGIES: FlattenSpec = FlattenSpec {
    children: "strategies",
    inject: &[
        ("id", "categoryId"),
        ("name", "categoryName"),
        ("description", "categoryDescription"),
    ],
};

/// Control subcategories -> controls
pub const CONTROL_SUBCATEGORIES: FlattenSpec = FlattenSpec {
    children: "controls",
    inject: &[("id", "categoryId"), ("name", "categoryName")],
};

/// Flatten parents' children into one sequence annotated with parent fields.
///
/// Output order is each parent's children in declared order, parents in
/// declared order. Injected keys replace any child field of the same name;
/// a parent lacking the source field removes the key from the child.
pub fn flatten_categories(
    resource: ResourceId,
    property: &str,
    categories: &[Value],
    spec: &FlattenSpec,
) -> Result<Vec<Value>, ShapeError> {
    let mut flattened = Vec::new();

    for (index, category) in categories.iter().enumerate() {
        let parent = category
            .as_object()
            .ok_or_else(|| ShapeError::new(resource, format!("{}[{}]", property, index), "an object"))?;

        let children = parent
            .get(spec.children)
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ShapeError::new(
                    resource,
                    format!("{}[{}].{}", property, index, spec.children),
                    "an array",
                )
            })?;

        for (child_index, child) in children.iter().enumerate() {
            let mut record = child.as_object().cloned().ok_or_else(|| {
                ShapeError::new(
                    resource,
                    format!("{}[{}].{}[{}]", property, index, spec.children, child_index),
                    "an object",
                )
            })?;

            for (from, to) in spec.inject {
                match parent.get(*from) {
                    Some(value) => {
                        record.insert((*to).to_string(), value.clone());
                    }
                    None => {
                        record.remove(*to);
                    }
                }
            }

            flattened.push(Value::Object(record));
        }
    }

    Ok(flattened)
}
