//! Registry comparison
//!
//! Compares two registry snapshots record by record on their serialized
//! JSON form, so every field (including external snapshots) is covered.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;
use crate::schema::Resource;

/// A changed field: `(old, new)`, `None` where the field is absent
pub type FieldChange = (Option<Value>, Option<Value>);

/// Differences between two registries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryDiff {
    pub added: BTreeSet<String>,
    pub deleted: BTreeSet<String>,
    pub updated: BTreeMap<String, BTreeMap<String, FieldChange>>,
}

impl RegistryDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.updated.is_empty()
    }
}

fn fields(resource: &Resource) -> Result<serde_json::Map<String, Value>> {
    match serde_json::to_value(resource)? {
        Value::Object(map) => Ok(map),
        _ => Ok(serde_json::Map::new()),
    }
}

/// Compare an old registry against a new one
pub fn compare_registries(
    old: &BTreeMap<String, Resource>,
    new: &BTreeMap<String, Resource>,
) -> Result<RegistryDiff> {
    let mut diff = RegistryDiff {
        added: new.keys().filter(|p| !old.contains_key(*p)).cloned().collect(),
        deleted: old.keys().filter(|p| !new.contains_key(*p)).cloned().collect(),
        ..Default::default()
    };

    for (prefix, old_resource) in old {
        let Some(new_resource) = new.get(prefix) else {
            continue;
        };
        if old_resource == new_resource {
            continue;
        }
        let old_fields = fields(old_resource)?;
        let new_fields = fields(new_resource)?;
        let keys: BTreeSet<&String> = old_fields.keys().chain(new_fields.keys()).collect();

        let changes: BTreeMap<String, FieldChange> = keys
            .into_iter()
            .filter_map(|key| {
                let before = old_fields.get(key);
                let after = new_fields.get(key);
                (before != after).then(|| (key.clone(), (before.cloned(), after.cloned())))
            })
            .collect();
        if !changes.is_empty() {
            diff.updated.insert(prefix.clone(), changes);
        }
    }

    Ok(diff)
}
